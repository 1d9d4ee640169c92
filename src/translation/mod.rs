/*!
 * Translation orchestration for the three-language session.
 *
 * This module contains the core functionality for turning one edited
 * passage into translations for the other two languages. It is split into
 * submodules:
 *
 * - `orchestrator`: combined-call/fallback orchestration and reassembly
 * - `prompts`: prompt templates for combined and single-target requests
 */

// Re-export main types for easier usage
pub use self::orchestrator::{TranslationOptions, TranslationOrchestrator, TranslationResult};

// Submodules
pub mod orchestrator;
pub mod prompts;
