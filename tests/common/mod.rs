/*!
 * Common test utilities shared across the test suite.
 */

use trilingua::lang::Language;

/// Initialize test logging once; safe to call from every test.
#[allow(dead_code)]
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fixed dictionary used by end-to-end tests: a tiny deterministic stand-in
/// for the external translation model.
pub fn dictionary_translate(text: &str, target: Language) -> String {
    match (text, target) {
        ("Hello.", Language::French) => "Bonjour.".to_string(),
        ("Hello.", Language::Polish) => "Witaj.".to_string(),
        ("Good night.", Language::French) => "Bonne nuit.".to_string(),
        ("Good night.", Language::Polish) => "Dobranoc.".to_string(),
        _ => format!("[{}] {}", target.display_name(), text),
    }
}
