/*!
 * Error types for the trilingua application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when calling a translation client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The service answered with no usable content
    #[error("Empty response from translation service")]
    EmptyResponse,
}

/// Errors that can occur during translation orchestration.
///
/// These never escape the orchestrator's `translate` operation; they exist
/// for unit-level bookkeeping and logging.
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the client API
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Combined response did not contain one line per target language
    #[error("Combined response had {found} parseable lines, expected {expected}")]
    IncompleteBatch {
        /// Lines recovered from the response
        found: usize,
        /// Lines required
        expected: usize,
    },
}

/// Errors that can occur in the session synchronization layer
#[derive(Error, Debug)]
pub enum SyncError {
    /// Request was malformed; rejected without touching the store
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A subscriber channel could not deliver the initial state
    #[error("Subscription channel closed for session {0}")]
    ChannelClosed(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a configuration problem
    #[error("Config error: {0}")]
    Config(String),

    /// Error from a translation client
    #[error("Client error: {0}")]
    Client(#[from] ClientError),

    /// Error from translation orchestration
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from session synchronization
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Config(error.to_string())
    }
}
