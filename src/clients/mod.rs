/*!
 * Client implementations for the external translation service.
 *
 * This module contains the `TranslationClient` capability trait and the
 * clients that implement it:
 * - Gemini: Google Gemini API over HTTP
 * - Ollama: local LLM server
 * - Mock: deterministic client for tests and benches
 *
 * The orchestrator only ever sees the trait, so the remote service can be
 * faked deterministically in tests.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ClientError;
use crate::lang::Language;

/// Target languages for one remote request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Targets {
    /// Both non-source languages, in the fixed target order
    Pair([Language; 2]),

    /// A single target language (fallback path)
    Single(Language),
}

impl Targets {
    /// Number of translations the response is expected to carry
    pub fn expected_count(&self) -> usize {
        match self {
            Targets::Pair(_) => 2,
            Targets::Single(_) => 1,
        }
    }
}

/// One translate-one-request operation against the external service
#[derive(Debug, Clone)]
pub struct ClientRequest {
    /// The text to translate
    pub text: String,

    /// Source language
    pub source: Language,

    /// Target language(s)
    pub targets: Targets,
}

impl ClientRequest {
    /// Request translating `text` into both targets at once
    pub fn pair(text: impl Into<String>, source: Language, targets: [Language; 2]) -> Self {
        Self {
            text: text.into(),
            source,
            targets: Targets::Pair(targets),
        }
    }

    /// Request translating `text` into a single target
    pub fn single(text: impl Into<String>, source: Language, target: Language) -> Self {
        Self {
            text: text.into(),
            source,
            targets: Targets::Single(target),
        }
    }
}

/// Common trait for translation service clients.
///
/// A response is the raw model output: for a `Pair` request, one translation
/// per line in target order; for a `Single` request, the bare translation.
/// Parsing and recovery belong to the orchestrator.
#[async_trait]
pub trait TranslationClient: Send + Sync + Debug {
    /// Complete one translation request
    async fn translate(&self, request: ClientRequest) -> Result<String, ClientError>;

    /// Test the connection to the service
    async fn test_connection(&self) -> Result<(), ClientError>;
}

pub mod gemini;
pub mod mock;
pub mod ollama;
