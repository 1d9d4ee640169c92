/*!
 * Mock translation client for testing.
 *
 * This module provides a mock client that simulates different service
 * behaviors:
 * - `MockClient::working()` - always succeeds with translated text
 * - `MockClient::combined_incomplete()` - pair responses carry a single line
 * - `MockClient::failing_pair()` - pair requests fail, singles succeed
 * - `MockClient::fail_single(lang)` - single requests for one target fail
 * - `MockClient::failing()` - every request fails
 * - `MockClient::empty()` - returns empty responses
 */

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::clients::{ClientRequest, Targets, TranslationClient};
use crate::errors::ClientError;
use crate::lang::Language;

/// Behavior mode for the mock client
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always succeeds with a proper translation
    Working,
    /// Pair responses contain only one parseable line
    CombinedIncomplete,
    /// Pair requests fail; single requests succeed
    FailingPair,
    /// Pair requests fail, and so do single requests for the given target;
    /// singles for the other target succeed
    FailSingle(Language),
    /// Always fails with an error
    Failing,
    /// Returns empty responses
    Empty,
}

/// Mock client with configurable behavior and call counting
#[derive(Debug)]
pub struct MockClient {
    /// Behavior mode
    behavior: MockBehavior,
    /// Total requests received
    calls: Arc<AtomicUsize>,
    /// Pair requests received
    pair_calls: Arc<AtomicUsize>,
    /// Single requests received
    single_calls: Arc<AtomicUsize>,
    /// Custom per-target translation (optional)
    translate_fn: Option<fn(&str, Language) -> String>,
}

impl MockClient {
    /// Create a new mock client with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
            pair_calls: Arc::new(AtomicUsize::new(0)),
            single_calls: Arc::new(AtomicUsize::new(0)),
            translate_fn: None,
        }
    }

    /// Create a working mock client that always succeeds
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Create a mock whose combined responses are missing a line
    pub fn combined_incomplete() -> Self {
        Self::new(MockBehavior::CombinedIncomplete)
    }

    /// Create a mock whose pair requests always fail
    pub fn failing_pair() -> Self {
        Self::new(MockBehavior::FailingPair)
    }

    /// Create a mock that forces the fallback path and fails it for one
    /// target language
    pub fn fail_single(target: Language) -> Self {
        Self::new(MockBehavior::FailSingle(target))
    }

    /// Create a failing mock client that always errors
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Create a mock that returns empty responses
    pub fn empty() -> Self {
        Self::new(MockBehavior::Empty)
    }

    /// Set a custom per-target translation function
    pub fn with_translate_fn(mut self, f: fn(&str, Language) -> String) -> Self {
        self.translate_fn = Some(f);
        self
    }

    /// Total requests received so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Pair requests received so far
    pub fn pair_call_count(&self) -> usize {
        self.pair_calls.load(Ordering::SeqCst)
    }

    /// Single requests received so far
    pub fn single_call_count(&self) -> usize {
        self.single_calls.load(Ordering::SeqCst)
    }

    /// Translate one span for one target
    fn render(&self, text: &str, target: Language) -> String {
        match self.translate_fn {
            Some(f) => f(text, target),
            None => format!("[{}] {}", target.display_name(), text),
        }
    }

    fn service_error() -> ClientError {
        ClientError::ApiError {
            status_code: 500,
            message: "Simulated service failure".to_string(),
        }
    }
}

impl Clone for MockClient {
    fn clone(&self) -> Self {
        Self {
            behavior: self.behavior,
            calls: Arc::clone(&self.calls),
            pair_calls: Arc::clone(&self.pair_calls),
            single_calls: Arc::clone(&self.single_calls),
            translate_fn: self.translate_fn,
        }
    }
}

#[async_trait]
impl TranslationClient for MockClient {
    async fn translate(&self, request: ClientRequest) -> Result<String, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match request.targets {
            Targets::Pair(_) => self.pair_calls.fetch_add(1, Ordering::SeqCst),
            Targets::Single(_) => self.single_calls.fetch_add(1, Ordering::SeqCst),
        };

        match (self.behavior, request.targets) {
            (MockBehavior::Failing, _) => Err(Self::service_error()),
            (MockBehavior::Empty, _) => Ok(String::new()),

            (MockBehavior::FailingPair, Targets::Pair(_))
            | (MockBehavior::FailSingle(_), Targets::Pair(_)) => Err(Self::service_error()),
            (MockBehavior::CombinedIncomplete, Targets::Pair(targets)) => {
                // One line where two are required
                Ok(format!("1. {}", self.render(&request.text, targets[0])))
            }
            (_, Targets::Pair(targets)) => Ok(format!(
                "1. {}\n2. {}",
                self.render(&request.text, targets[0]),
                self.render(&request.text, targets[1])
            )),

            (MockBehavior::FailSingle(failing), Targets::Single(target)) if failing == target => {
                Err(Self::service_error())
            }
            (_, Targets::Single(target)) => Ok(self.render(&request.text, target)),
        }
    }

    async fn test_connection(&self) -> Result<(), ClientError> {
        match self.behavior {
            MockBehavior::Failing => Err(Self::service_error()),
            _ => Ok(()),
        }
    }
}
