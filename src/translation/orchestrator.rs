/*!
 * Translation orchestration across the three-language set.
 *
 * For each translation unit the orchestrator prefers a single combined
 * remote call producing both target translations, and falls back to two
 * independent single-target calls when the combined call fails or is
 * malformed. Failures degrade per unit and per target; `translate` always
 * returns a complete result.
 */

use futures::stream::{self, StreamExt};
use log::{debug, warn};
use std::sync::Arc;
use std::time::Instant;

use crate::clients::{ClientRequest, TranslationClient};
use crate::errors::{ClientError, TranslationError};
use crate::lang::{Language, LanguageText};
use crate::segmenter::{self, TranslationUnit};

/// Options for customizing the orchestration process
#[derive(Debug, Clone)]
pub struct TranslationOptions {
    /// Maximum number of units translated concurrently
    pub max_concurrent_units: usize,
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self {
            max_concurrent_units: 4,
        }
    }
}

/// Whole-passage translation outcome.
///
/// The source language's slot echoes the input text unchanged; the two
/// target slots hold the reassembled translations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationResult {
    /// The language the passage was authored in
    pub source: Language,

    /// Text for all three languages
    pub texts: LanguageText,
}

/// Orchestrates unit-level translation against an injected client
pub struct TranslationOrchestrator {
    /// The translation service client
    client: Arc<dyn TranslationClient>,

    /// Orchestration options
    options: TranslationOptions,
}

impl TranslationOrchestrator {
    /// Create a new orchestrator with default options
    pub fn new(client: Arc<dyn TranslationClient>) -> Self {
        Self::with_options(client, TranslationOptions::default())
    }

    /// Create a new orchestrator with explicit options
    pub fn with_options(client: Arc<dyn TranslationClient>, options: TranslationOptions) -> Self {
        Self { client, options }
    }

    /// Translate a passage into the two non-source languages.
    ///
    /// Never fails: unit-level errors degrade to the unit's source text, so
    /// the result is always complete for both targets.
    pub async fn translate(&self, text: &str, source: Language) -> TranslationResult {
        let start = Instant::now();
        let mut texts = LanguageText::empty();
        texts.set(source, text);

        // Fast path: nothing to translate, no remote calls
        if text.trim().is_empty() {
            return TranslationResult { source, texts };
        }

        let targets = Language::targets_of(source);
        let units = segmenter::segment(text);
        debug!(
            "Translating {} unit(s) from {} ({} chars)",
            units.len(),
            source,
            text.len()
        );

        // Fan out per unit with bounded concurrency, then restore unit order
        let mut results: Vec<(usize, [String; 2])> = stream::iter(units)
            .map(|unit| {
                let index = unit.index;
                async move { (index, self.translate_unit(&unit, source, targets).await) }
            })
            .buffer_unordered(self.options.max_concurrent_units)
            .collect()
            .await;
        results.sort_by_key(|(index, _)| *index);

        for (slot, target) in targets.iter().enumerate() {
            let parts: Vec<String> = results
                .iter()
                .map(|(_, unit_texts)| unit_texts[slot].clone())
                .collect();
            texts.set(*target, segmenter::join_units(text, &parts));
        }

        debug!("Translation completed in {:?}", start.elapsed());
        TranslationResult { source, texts }
    }

    /// Translate one unit into both targets, in target order.
    ///
    /// The combined attempt is awaited to completion before the fallback is
    /// dispatched, so only one path's results ever reach the caller.
    async fn translate_unit(
        &self,
        unit: &TranslationUnit,
        source: Language,
        targets: [Language; 2],
    ) -> [String; 2] {
        match self.combined_call(unit, source, targets).await {
            Ok(translations) => translations,
            Err(e) => {
                warn!(
                    "Combined call failed for unit {} ({}), falling back to single calls",
                    unit.index, e
                );
                self.fallback_calls(unit, source, targets).await
            }
        }
    }

    /// One remote request producing both target translations
    async fn combined_call(
        &self,
        unit: &TranslationUnit,
        source: Language,
        targets: [Language; 2],
    ) -> Result<[String; 2], TranslationError> {
        let request = ClientRequest::pair(unit.text.clone(), source, targets);
        let expected = request.targets.expected_count();
        let response = self.client.translate(request).await?;

        let lines = parse_combined_response(&response);
        if lines.len() < expected {
            return Err(TranslationError::IncompleteBatch {
                found: lines.len(),
                expected,
            });
        }

        Ok([lines[0].clone(), lines[1].clone()])
    }

    /// Two independent single-target calls, dispatched concurrently.
    ///
    /// A failure in one target never blocks or corrupts the other; a failed
    /// target keeps the unit's source text so the reassembled passage stays
    /// length-plausible.
    async fn fallback_calls(
        &self,
        unit: &TranslationUnit,
        source: Language,
        targets: [Language; 2],
    ) -> [String; 2] {
        let first = self.single_call(unit, source, targets[0]);
        let second = self.single_call(unit, source, targets[1]);
        let (first, second) = tokio::join!(first, second);

        let degrade = |result: Result<String, ClientError>, target: Language| match result {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Fallback call failed for unit {} target {}: {}",
                    unit.index, target, e
                );
                unit.text.clone()
            }
        };

        [degrade(first, targets[0]), degrade(second, targets[1])]
    }

    /// One single-target remote request
    async fn single_call(
        &self,
        unit: &TranslationUnit,
        source: Language,
        target: Language,
    ) -> Result<String, ClientError> {
        let request = ClientRequest::single(unit.text.clone(), source, target);
        let response = self.client.translate(request).await?;

        let cleaned = clean_single_response(&response);
        if cleaned.is_empty() {
            return Err(ClientError::EmptyResponse);
        }
        Ok(cleaned)
    }
}

/// Parse a combined response into its non-empty translation lines.
///
/// Leading enumeration markers (`1.`, `2)`, `-`) are stripped; blank lines
/// are discarded. Lines map positionally to the fixed target order.
pub fn parse_combined_response(response: &str) -> Vec<String> {
    response
        .lines()
        .filter_map(|line| {
            let mut line = line.trim();
            if line.starts_with(|c: char| c.is_ascii_digit()) || line.starts_with('-') {
                line = line[1..].trim_start();
                if line.starts_with('.') || line.starts_with(')') {
                    line = line[1..].trim_start();
                }
            }
            if line.is_empty() {
                None
            } else {
                Some(line.to_string())
            }
        })
        .collect()
}

/// Clean a single-target response: trim and strip one layer of wrapping quotes
pub fn clean_single_response(response: &str) -> String {
    let trimmed = response.trim();
    let unquoted = if (trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2)
        || (trimmed.starts_with('\'') && trimmed.ends_with('\'') && trimmed.len() >= 2)
    {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    };
    unquoted.to_string()
}
