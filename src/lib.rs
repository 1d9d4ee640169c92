/*!
 * # Trilingua - Collaborative three-language translation
 *
 * A Rust library for jointly authoring a passage of text while it is
 * continuously translated among three fixed languages (French, English,
 * Polish), with every connected device converging on the same view.
 *
 * ## Features
 *
 * - Sentence/line segmentation of passages into translation units
 * - Combined-call translation with per-unit parallel fallback
 * - Pluggable translation clients (Gemini API, local Ollama, test mock)
 * - In-memory session store with per-session atomic updates
 * - Push (broadcast) and pull (staleness check) state propagation
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `lang`: The closed language set and per-language text storage
 * - `segmenter`: Passage segmentation and reassembly
 * - `translation`: Orchestration of the external translation service:
 *   - `translation::orchestrator`: combined call, fallback, reassembly
 *   - `translation::prompts`: prompt templates
 * - `clients`: Client implementations for the translation service:
 *   - `clients::gemini`: Gemini API client
 *   - `clients::ollama`: Ollama API client
 *   - `clients::mock`: deterministic client for tests
 * - `session`: Session store and synchronization layer
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod clients;
pub mod errors;
pub mod lang;
pub mod segmenter;
pub mod session;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::{Controller, TranslateRequest};
pub use errors::{AppError, ClientError, SyncError, TranslationError};
pub use lang::{Language, LanguageText};
pub use session::{EditRequest, PollOutcome, PollRequest, SessionSnapshot, Synchronizer};
pub use translation::{TranslationOrchestrator, TranslationResult};
