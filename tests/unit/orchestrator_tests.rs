/*!
 * Unit tests for translation orchestration: combined call, fallback,
 * degradation, and reassembly.
 */

use std::sync::Arc;

use trilingua::clients::mock::MockClient;
use trilingua::lang::Language;
use trilingua::translation::TranslationOrchestrator;

fn orchestrator_with(client: &MockClient) -> TranslationOrchestrator {
    TranslationOrchestrator::new(Arc::new(client.clone()))
}

#[tokio::test]
async fn test_translate_workingService_shouldFillBothTargets() {
    let client = MockClient::working();
    let orchestrator = orchestrator_with(&client);

    let result = orchestrator.translate("Hello there.", Language::English).await;

    assert_eq!(result.texts.get(Language::English), "Hello there.");
    assert!(!result.texts.get(Language::French).is_empty());
    assert!(!result.texts.get(Language::Polish).is_empty());
}

#[tokio::test]
async fn test_translate_emptyText_shouldMakeNoRemoteCalls() {
    let client = MockClient::working();
    let orchestrator = orchestrator_with(&client);

    let result = orchestrator.translate("", Language::French).await;

    assert_eq!(client.call_count(), 0);
    assert_eq!(result.texts.get(Language::English), "");
    assert_eq!(result.texts.get(Language::Polish), "");
}

#[tokio::test]
async fn test_translate_whitespaceOnlyText_shouldMakeNoRemoteCalls() {
    let client = MockClient::working();
    let orchestrator = orchestrator_with(&client);

    orchestrator.translate("   \n  ", Language::Polish).await;

    assert_eq!(client.call_count(), 0);
}

#[tokio::test]
async fn test_translate_workingService_shouldUseOnlyCombinedCalls() {
    let client = MockClient::working();
    let orchestrator = orchestrator_with(&client);

    orchestrator.translate("One line.", Language::English).await;

    assert_eq!(client.pair_call_count(), 1);
    assert_eq!(client.single_call_count(), 0);
}

#[tokio::test]
async fn test_translate_identityFunction_shouldPreserveMultiLineBoundaries() {
    let client = MockClient::working().with_translate_fn(|text, _| text.to_string());
    let orchestrator = orchestrator_with(&client);

    let result = orchestrator
        .translate("First line.\nSecond line.", Language::English)
        .await;

    assert_eq!(
        result.texts.get(Language::French),
        "First line.\n\nSecond line."
    );
    assert_eq!(
        result.texts.get(Language::Polish),
        "First line.\n\nSecond line."
    );
}

#[tokio::test]
async fn test_translate_identityFunction_shouldPreserveSingleLine() {
    let client = MockClient::working().with_translate_fn(|text, _| text.to_string());
    let orchestrator = orchestrator_with(&client);

    let result = orchestrator
        .translate("One. Two. Three.", Language::English)
        .await;

    // Short single line: one unit, no reassembly seams
    assert_eq!(result.texts.get(Language::French), "One. Two. Three.");
}

#[tokio::test]
async fn test_translate_combinedOneLine_shouldFallBackAndFillBoth() {
    let client = MockClient::combined_incomplete();
    let orchestrator = orchestrator_with(&client);

    let result = orchestrator.translate("Hello.", Language::English).await;

    // One failed combined attempt, then one single call per target
    assert_eq!(client.pair_call_count(), 1);
    assert_eq!(client.single_call_count(), 2);
    assert!(!result.texts.get(Language::French).is_empty());
    assert!(!result.texts.get(Language::Polish).is_empty());
}

#[tokio::test]
async fn test_translate_combinedError_shouldFallBackToSingles() {
    let client = MockClient::failing_pair();
    let orchestrator = orchestrator_with(&client);

    let result = orchestrator.translate("Hello.", Language::English).await;

    assert_eq!(client.single_call_count(), 2);
    assert_eq!(result.texts.get(Language::French), "[French] Hello.");
    assert_eq!(result.texts.get(Language::Polish), "[Polish] Hello.");
}

#[tokio::test]
async fn test_translate_oneFallbackTargetFails_shouldIsolateFailure() {
    // Pair requests fail so the fallback runs; Polish singles also fail
    let client = MockClient::fail_single(Language::Polish);
    let orchestrator = orchestrator_with(&client);

    let result = orchestrator.translate("Hello.", Language::English).await;

    // Polish degrades to source text; French is unaffected
    assert_eq!(result.texts.get(Language::Polish), "Hello.");
    assert_eq!(result.texts.get(Language::French), "[French] Hello.");
}

#[tokio::test]
async fn test_translate_totalFailure_shouldDegradeToSourceText() {
    let client = MockClient::failing();
    let orchestrator = orchestrator_with(&client);

    let result = orchestrator.translate("Hello.", Language::English).await;

    // Never empty under total service failure
    assert_eq!(result.texts.get(Language::French), "Hello.");
    assert_eq!(result.texts.get(Language::Polish), "Hello.");
}

#[tokio::test]
async fn test_translate_emptyResponses_shouldDegradeToSourceText() {
    let client = MockClient::empty();
    let orchestrator = orchestrator_with(&client);

    let result = orchestrator.translate("Hello.", Language::French).await;

    assert_eq!(result.texts.get(Language::English), "Hello.");
    assert_eq!(result.texts.get(Language::Polish), "Hello.");
}

#[tokio::test]
async fn test_translate_multipleUnits_shouldPreserveOrder() {
    let client = MockClient::working().with_translate_fn(|text, _| text.to_uppercase());
    let orchestrator = orchestrator_with(&client);

    let result = orchestrator
        .translate("Alpha line.\nBravo line.\nCharlie line.", Language::English)
        .await;

    assert_eq!(
        result.texts.get(Language::French),
        "ALPHA LINE.\n\nBRAVO LINE.\n\nCHARLIE LINE."
    );
}

#[tokio::test]
async fn test_translate_sourceSlot_shouldEchoInputUnchanged() {
    let client = MockClient::working();
    let orchestrator = orchestrator_with(&client);

    let input = "Ligne une.\nLigne deux.";
    let result = orchestrator.translate(input, Language::French).await;

    assert_eq!(result.source, Language::French);
    assert_eq!(result.texts.get(Language::French), input);
}

#[tokio::test]
async fn test_translate_unitFailure_shouldOnlyDegradeThatUnit() {
    // Every pair call fails; singles succeed, so per-unit fallback recovers
    // each unit independently
    let client = MockClient::failing_pair();
    let orchestrator = orchestrator_with(&client);

    let result = orchestrator
        .translate("First.\nSecond.", Language::English)
        .await;

    assert_eq!(
        result.texts.get(Language::French),
        "[French] First.\n\n[French] Second."
    );
}
