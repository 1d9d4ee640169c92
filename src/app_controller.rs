/*!
 * Application controller: the interaction contract between the translation
 * orchestrator and the session synchronization layer.
 *
 * Boundary layers (web handlers, socket layers, the CLI) talk to this
 * controller and never to the subsystems directly. An edit flows through
 * translation first and touches the store only once the translations are
 * in hand, so no session lock is ever held across remote I/O.
 */

use anyhow::Result;
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::app_config::{Config, TranslationProvider};
use crate::clients::TranslationClient;
use crate::clients::gemini::Gemini;
use crate::clients::ollama::Ollama;
use crate::errors::{ClientError, SyncError};
use crate::lang::Language;
use crate::session::{
    EditRequest, PollOutcome, PollRequest, SessionSnapshot, SessionStore, Subscription,
    Synchronizer,
};
use crate::translation::{TranslationOptions, TranslationOrchestrator, TranslationResult};

/// A whole-passage translation request from the boundary layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    /// The passage to translate
    pub text: String,

    /// The language it was authored in
    pub source_language: Language,
}

/// Main application controller
pub struct Controller {
    /// Translation orchestration
    orchestrator: TranslationOrchestrator,

    /// Session state and propagation
    synchronizer: Synchronizer,
}

impl Controller {
    /// Create a controller from an application configuration
    pub fn with_config(config: Config) -> Result<Self> {
        let client = create_client(&config)?;
        let options = TranslationOptions {
            max_concurrent_units: config.translation.common.concurrent_units,
        };

        info!(
            "Using {} provider with model {}",
            config.translation.provider.display_name(),
            config.translation.get_model()
        );

        Ok(Self {
            orchestrator: TranslationOrchestrator::with_options(client, options),
            synchronizer: Synchronizer::with_capacity(
                Arc::new(SessionStore::new()),
                config.sync.channel_capacity,
            ),
        })
    }

    /// Create a controller over an injected client (used by tests)
    pub fn with_client(client: Arc<dyn TranslationClient>) -> Self {
        Self {
            orchestrator: TranslationOrchestrator::new(client),
            synchronizer: Synchronizer::new(Arc::new(SessionStore::new())),
        }
    }

    /// The session synchronizer
    pub fn synchronizer(&self) -> &Synchronizer {
        &self.synchronizer
    }

    /// Translate a passage without touching any session
    pub async fn handle_translate(&self, request: &TranslateRequest) -> TranslationResult {
        self.orchestrator
            .translate(&request.text, request.source_language)
            .await
    }

    /// Apply one edit end to end: translate, store atomically, propagate.
    ///
    /// Translation degradation never fails the edit; only a malformed
    /// request is rejected.
    pub async fn handle_edit(&self, request: &EditRequest) -> Result<SessionSnapshot, SyncError> {
        if request.session_id.trim().is_empty() {
            return Err(SyncError::InvalidRequest(
                "session id must not be empty".to_string(),
            ));
        }

        let result = self
            .orchestrator
            .translate(&request.text, request.language)
            .await;

        self.synchronizer
            .apply_edit(
                &request.session_id,
                request.language,
                &request.text,
                &result.texts,
            )
            .await
    }

    /// Staleness check for a polling reader
    pub async fn handle_poll(&self, request: &PollRequest) -> Result<PollOutcome, SyncError> {
        self.synchronizer
            .poll(&request.session_id, request.since_revision)
            .await
    }

    /// Subscribe a device to a session's push channel
    pub async fn handle_subscribe(&self, session_id: &str) -> Result<Subscription, SyncError> {
        self.synchronizer.subscribe(session_id).await
    }
}

/// Build the configured translation client
fn create_client(config: &Config) -> Result<Arc<dyn TranslationClient>> {
    let translation = &config.translation;
    let client: Arc<dyn TranslationClient> = match translation.provider {
        TranslationProvider::Gemini => Arc::new(Gemini::new_with_config(
            translation.get_api_key(),
            translation.get_endpoint(),
            translation.get_model(),
            translation.common.retry_count,
            translation.common.retry_backoff_ms,
            translation.get_timeout_secs(),
        )),
        TranslationProvider::Ollama => Arc::new(Ollama::new(
            translation.get_endpoint(),
            translation.get_model(),
            translation.get_timeout_secs(),
        )),
    };
    Ok(client)
}

/// Test the connection to the configured provider
pub async fn test_connection(config: &Config) -> Result<(), ClientError> {
    let client = create_client(config)
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    client.test_connection().await
}
