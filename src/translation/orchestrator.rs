/*!
 * Translation orchestrator with ordered provider fallback.
 *
 * Providers are tried one at a time in ascending priority. The first attempt
 * that yields a non-empty translation wins; every other outcome is recorded
 * and the next provider is tried. Only exhaustion reaches the caller.
 */

use anyhow::Result;
use log::{debug, error, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::errors::{ProviderError, ProviderFailure, TranslationError};
use crate::providers::transport::Transport;
use crate::providers::{Provider, ProviderTranslation, build_provider};

use super::request::{TranslationRequest, TranslationResult};

/// One provider in the fallback chain
#[derive(Debug)]
pub struct ProviderSlot {
    /// Provider client
    pub provider: Box<dyn Provider>,

    /// Lower values are tried first
    pub priority: u32,

    /// Timeout for a single attempt
    pub timeout: Duration,
}

impl ProviderSlot {
    pub fn new(provider: Box<dyn Provider>, priority: u32, timeout: Duration) -> Self {
        Self {
            provider,
            priority,
            timeout,
        }
    }
}

/// Translation front door for callers
///
/// Holds only immutable data, so one instance can serve concurrent calls.
#[derive(Debug)]
pub struct TranslationOrchestrator {
    /// Enabled providers, already in fallback order
    slots: Vec<ProviderSlot>,

    /// Transport shared by every provider
    transport: Arc<dyn Transport>,
}

impl TranslationOrchestrator {
    /// Create an orchestrator from explicit slots
    ///
    /// Slots are ordered by priority; equal priorities keep the given order.
    pub fn new(mut slots: Vec<ProviderSlot>, transport: Arc<dyn Transport>) -> Self {
        slots.sort_by_key(|slot| slot.priority);
        Self { slots, transport }
    }

    /// Create an orchestrator for the enabled providers of a configuration
    pub fn from_config(config: &Config, transport: Arc<dyn Transport>) -> Result<Self> {
        let mut slots = Vec::new();
        for provider_config in config.enabled_providers() {
            let provider = build_provider(provider_config)?;
            debug!(
                "Enabled provider {} (priority {}, timeout {}s)",
                provider.id(),
                provider_config.priority,
                provider_config.timeout_secs
            );
            slots.push(ProviderSlot::new(
                provider,
                provider_config.priority,
                provider_config.timeout(),
            ));
        }

        if slots.is_empty() {
            warn!("No translation provider is enabled; every request will fail");
        }

        Ok(Self::new(slots, transport))
    }

    /// Identifiers of the enabled providers in fallback order
    pub fn provider_ids(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.provider.id()).collect()
    }

    /// Translate a request, falling back through the providers
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult, TranslationError> {
        request.validate()?;

        let mut failures = Vec::new();

        for slot in &self.slots {
            let provider_id = slot.provider.id();
            let start_time = Instant::now();

            match self.attempt(slot, request).await {
                Ok(translation) => {
                    info!(
                        "Translated {} chars with {} in {:?}",
                        request.source_text.chars().count(),
                        provider_id,
                        start_time.elapsed()
                    );
                    return Ok(TranslationResult {
                        translated_text: translation.text,
                        detected_source_language: translation.detected_source_language,
                        provider_used: provider_id.to_string(),
                        source_language: request.source_language.clone(),
                        target_language: request.target_language.clone(),
                    });
                }
                Err(e) => {
                    warn!("Provider {} failed [{}]: {}", provider_id, e.code(), e);
                    failures.push(ProviderFailure::new(provider_id, e));
                }
            }
        }

        let exhausted = TranslationError::AllProvidersFailed { failures };
        error!("Translation failed: {}", exhausted.diagnostics());
        Err(exhausted)
    }

    /// One provider attempt as a tagged outcome
    async fn attempt(
        &self,
        slot: &ProviderSlot,
        request: &TranslationRequest,
    ) -> Result<ProviderTranslation, ProviderError> {
        let outbound = slot.provider.build_request(request)?;
        debug!("Trying provider {}", slot.provider.id());

        let response = tokio::time::timeout(slot.timeout, self.transport.send(outbound, slot.timeout))
            .await
            .map_err(|_| ProviderError::Timeout(slot.timeout))??;

        if !response.is_success() {
            return Err(ProviderError::from_status(response.status, &response.body));
        }

        let translation = slot.provider.parse_response(&response)?;
        if translation.text.trim().is_empty() {
            return Err(ProviderError::EmptyTranslation);
        }

        Ok(translation)
    }
}
