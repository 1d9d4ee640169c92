/*!
 * Unit tests for the synchronizer's push and pull propagation paths.
 */

use std::sync::Arc;

use tokio_test::assert_ok;
use trilingua::lang::{Language, LanguageText};
use trilingua::session::{PollOutcome, SessionStore, Synchronizer};

fn new_synchronizer() -> Synchronizer {
    Synchronizer::new(Arc::new(SessionStore::new()))
}

fn no_translations() -> LanguageText {
    LanguageText::empty()
}

#[tokio::test]
async fn test_poll_aheadOfStore_shouldReportUnchanged() {
    let sync = new_synchronizer();
    sync.apply_edit("s", Language::English, "Hi.", &no_translations())
        .await
        .unwrap();

    // A reader claiming a future revision gets no state back
    let outcome = sync.poll("s", 99).await.unwrap();
    assert_eq!(outcome, PollOutcome::Unchanged);
}

#[tokio::test]
async fn test_poll_emptySessionId_shouldBeRejected() {
    let sync = new_synchronizer();
    assert!(sync.poll("", 0).await.is_err());
}

#[tokio::test]
async fn test_subscribe_emptySessionId_shouldBeRejected() {
    let sync = new_synchronizer();
    assert!(sync.subscribe("").await.is_err());
}

#[tokio::test]
async fn test_subscriber_shouldReceiveOneSnapshotPerEdit() {
    crate::common::init_test_logging();

    let sync = new_synchronizer();
    let mut subscription = assert_ok!(sync.subscribe("s").await);

    for text in ["One.", "Two.", "Three."] {
        sync.apply_edit("s", Language::French, text, &no_translations())
            .await
            .unwrap();
    }

    for expected_revision in 1..=3u64 {
        let snapshot = subscription.updates.recv().await.unwrap();
        assert_eq!(snapshot.revision, expected_revision);
    }
    // Exactly three: nothing else is buffered
    assert!(subscription.updates.try_recv().is_err());
}

#[tokio::test]
async fn test_editsOnOtherSessions_shouldNotReachSubscriber() {
    let sync = new_synchronizer();
    let mut subscription = sync.subscribe("mine").await.unwrap();

    sync.apply_edit("other", Language::English, "Elsewhere.", &no_translations())
        .await
        .unwrap();
    sync.apply_edit("mine", Language::English, "Here.", &no_translations())
        .await
        .unwrap();

    let snapshot = subscription.updates.recv().await.unwrap();
    assert_eq!(snapshot.session_id, "mine");
    assert_eq!(snapshot.texts.get(Language::English), "Here.");
    assert!(subscription.updates.try_recv().is_err());
}

#[tokio::test]
async fn test_lastWriterWins_sequentialEdits_shouldFullyReplaceState() {
    let sync = new_synchronizer();

    let mut first_translations = LanguageText::empty();
    first_translations.set(Language::French, "Premier.");
    first_translations.set(Language::Polish, "Pierwszy.");
    sync.apply_edit("s", Language::English, "First.", &first_translations)
        .await
        .unwrap();

    let mut second_translations = LanguageText::empty();
    second_translations.set(Language::English, "Second.");
    second_translations.set(Language::Polish, "Drugi.");
    let last = sync
        .apply_edit("s", Language::French, "Deuxieme.", &second_translations)
        .await
        .unwrap();

    // No merge: the whole session reflects the second edit only
    assert_eq!(last.active_language, Language::French);
    assert_eq!(last.texts.get(Language::French), "Deuxieme.");
    assert_eq!(last.texts.get(Language::English), "Second.");
    assert_eq!(last.texts.get(Language::Polish), "Drugi.");
}

#[tokio::test]
async fn test_pushThenPoll_shouldAgreeOnRevision() {
    let sync = new_synchronizer();
    let mut subscription = sync.subscribe("s").await.unwrap();

    sync.apply_edit("s", Language::Polish, "Tak.", &no_translations())
        .await
        .unwrap();

    let pushed = subscription.updates.recv().await.unwrap();
    match sync.poll("s", 0).await.unwrap() {
        PollOutcome::Changed(pulled) => assert_eq!(pulled, pushed),
        PollOutcome::Unchanged => panic!("expected changed state"),
    }
}

#[tokio::test]
async fn test_subscriberCount_shouldTrackDrops() {
    let sync = new_synchronizer();

    let first = sync.subscribe("s").await.unwrap();
    let second = sync.subscribe("s").await.unwrap();
    assert_eq!(sync.subscriber_count("s"), 2);

    drop(first);
    drop(second);

    // Receivers are gone; the next notify prunes the channel
    sync.apply_edit("s", Language::English, "Bye.", &no_translations())
        .await
        .unwrap();
    assert_eq!(sync.subscriber_count("s"), 0);
}
