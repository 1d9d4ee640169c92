/*!
 * End-to-end tests: edit -> translate -> store -> propagate.
 */

use std::sync::Arc;

use trilingua::app_controller::{Controller, TranslateRequest};
use trilingua::clients::mock::MockClient;
use trilingua::errors::SyncError;
use trilingua::lang::Language;
use trilingua::session::{EditRequest, PollOutcome, PollRequest};

use crate::common::dictionary_translate;

fn controller_with(client: &MockClient) -> Controller {
    Controller::with_client(Arc::new(client.clone()))
}

fn edit(session_id: &str, language: Language, text: &str) -> EditRequest {
    EditRequest {
        session_id: session_id.to_string(),
        language,
        text: text.to_string(),
    }
}

#[tokio::test]
async fn test_editFlow_shouldProduceExpectedSnapshotForAllSubscribers() {
    crate::common::init_test_logging();

    let client = MockClient::working().with_translate_fn(dictionary_translate);
    let controller = controller_with(&client);

    let mut first = controller.handle_subscribe("S").await.unwrap();
    let mut second = controller.handle_subscribe("S").await.unwrap();

    let snapshot = controller
        .handle_edit(&edit("S", Language::English, "Hello."))
        .await
        .unwrap();

    assert_eq!(snapshot.texts.get(Language::English), "Hello.");
    assert_eq!(snapshot.texts.get(Language::French), "Bonjour.");
    assert_eq!(snapshot.texts.get(Language::Polish), "Witaj.");
    assert_eq!(snapshot.active_language, Language::English);
    assert_eq!(snapshot.revision, 1);

    // Every subscriber receives exactly that snapshot, exactly once
    for subscription in [&mut first, &mut second] {
        let received = subscription.updates.recv().await.unwrap();
        assert_eq!(received, snapshot);
        assert!(subscription.updates.try_recv().is_err());
    }
}

#[tokio::test]
async fn test_editFlow_clearEdit_shouldEmptyAllSlotsWithoutRemoteCalls() {
    let client = MockClient::working().with_translate_fn(dictionary_translate);
    let controller = controller_with(&client);

    controller
        .handle_edit(&edit("S", Language::English, "Hello."))
        .await
        .unwrap();
    let calls_after_first = client.call_count();

    let cleared = controller
        .handle_edit(&edit("S", Language::English, ""))
        .await
        .unwrap();

    assert_eq!(client.call_count(), calls_after_first);
    assert_eq!(cleared.revision, 2);
    assert!(cleared.texts.is_empty());
}

#[tokio::test]
async fn test_editFlow_invalidSessionId_shouldRejectBeforeTranslating() {
    let client = MockClient::working();
    let controller = controller_with(&client);

    let result = controller
        .handle_edit(&edit("", Language::French, "Bonjour."))
        .await;

    assert!(matches!(result, Err(SyncError::InvalidRequest(_))));
    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_editFlow_serviceDown_shouldStillSyncDegradedState() {
    let client = MockClient::failing();
    let controller = controller_with(&client);

    let snapshot = controller
        .handle_edit(&edit("S", Language::English, "Hello."))
        .await
        .unwrap();

    // Partial success preferred over all-or-nothing failure: the edit is
    // stored and propagated with source text standing in for the targets
    assert_eq!(snapshot.revision, 1);
    assert_eq!(snapshot.texts.get(Language::French), "Hello.");
    assert_eq!(snapshot.texts.get(Language::Polish), "Hello.");
}

#[tokio::test]
async fn test_pollFlow_shouldSeeEditsAndThenQuiesce() {
    let client = MockClient::working().with_translate_fn(dictionary_translate);
    let controller = controller_with(&client);

    controller
        .handle_edit(&edit("S", Language::English, "Good night."))
        .await
        .unwrap();

    let poll = PollRequest {
        session_id: "S".to_string(),
        since_revision: 0,
    };
    let revision = match controller.handle_poll(&poll).await.unwrap() {
        PollOutcome::Changed(state) => {
            assert_eq!(state.texts.get(Language::French), "Bonne nuit.");
            assert_eq!(state.texts.get(Language::Polish), "Dobranoc.");
            state.revision
        }
        PollOutcome::Unchanged => panic!("expected changed state"),
    };

    let quiet = PollRequest {
        session_id: "S".to_string(),
        since_revision: revision,
    };
    assert_eq!(
        controller.handle_poll(&quiet).await.unwrap(),
        PollOutcome::Unchanged
    );
}

#[tokio::test]
async fn test_translateEndpoint_shouldEchoSourceAndFillTargets() {
    let client = MockClient::working().with_translate_fn(dictionary_translate);
    let controller = controller_with(&client);

    let request = TranslateRequest {
        text: "Hello.".to_string(),
        source_language: Language::English,
    };
    let result = controller.handle_translate(&request).await;

    assert_eq!(result.texts.get(Language::English), "Hello.");
    assert_eq!(result.texts.get(Language::French), "Bonjour.");
    assert_eq!(result.texts.get(Language::Polish), "Witaj.");
}

#[tokio::test]
async fn test_editFlow_successiveEditsFromDifferentLanguages_shouldConverge() {
    let client = MockClient::working();
    let controller = controller_with(&client);

    controller
        .handle_edit(&edit("S", Language::English, "Hello."))
        .await
        .unwrap();
    let last = controller
        .handle_edit(&edit("S", Language::French, "Salut."))
        .await
        .unwrap();

    // Second edit fully replaces the session: last-writer-wins
    assert_eq!(last.revision, 2);
    assert_eq!(last.active_language, Language::French);
    assert_eq!(last.texts.get(Language::French), "Salut.");
    assert_eq!(last.texts.get(Language::English), "[English] Salut.");
    assert_eq!(last.texts.get(Language::Polish), "[Polish] Salut.");
}
