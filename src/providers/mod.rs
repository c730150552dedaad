/*!
 * Provider implementations for different translation services.
 *
 * This module contains client implementations for the supported backends:
 * - DeepL: premium neural translation API (requires an API key)
 * - LibreTranslate: open-source translation server, public or self-hosted
 * - MyMemory: free community translation memory API
 *
 * Providers never perform I/O themselves. They turn a `TranslationRequest`
 * into an `HttpRequest` and parse the raw body of a successful response; the
 * `Transport` in between is chosen by the caller.
 */

use std::fmt::Debug;
use std::str::FromStr;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::app_config::ProviderConfig;
use crate::errors::ProviderError;
use crate::translation::TranslationRequest;
use transport::{HttpRequest, HttpResponse};

/// Translation extracted from a provider response
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderTranslation {
    /// The translated text
    pub text: String,
    /// Source language the backend detected, already in caller vocabulary
    pub detected_source_language: Option<String>,
}

/// Common trait for all translation providers
///
/// This trait defines the interface that all provider implementations must follow,
/// allowing them to be used interchangeably in the fallback chain.
pub trait Provider: Send + Sync + Debug {
    /// Stable identifier reported as `provider_used`
    fn id(&self) -> &str;

    /// Build the outbound request for this backend
    ///
    /// # Arguments
    /// * `request` - The validated, normalized translation request
    fn build_request(&self, request: &TranslationRequest) -> Result<HttpRequest, ProviderError>;

    /// Parse the body of a response whose HTTP status was successful
    ///
    /// Backend specific error markers inside the body must be reported as errors.
    fn parse_response(&self, response: &HttpResponse) -> Result<ProviderTranslation, ProviderError>;
}

/// Supported translation backends
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    DeepL,
    LibreTranslate,
    MyMemory,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [Self::DeepL, Self::LibreTranslate, Self::MyMemory];

    // @returns: Lowercase provider identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeepL => "deepl",
            Self::LibreTranslate => "libretranslate",
            Self::MyMemory => "mymemory",
        }
    }

    /// Whether a provider of this kind can be used with the given settings
    pub fn is_enabled(&self, config: &ProviderConfig) -> bool {
        match self {
            Self::DeepL => !config.api_key.trim().is_empty(),
            Self::LibreTranslate | Self::MyMemory => !config.endpoint.trim().is_empty(),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "deepl" => Ok(Self::DeepL),
            "libretranslate" | "libre" => Ok(Self::LibreTranslate),
            "mymemory" => Ok(Self::MyMemory),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Build the client for one configured provider
pub fn build_provider(config: &ProviderConfig) -> Result<Box<dyn Provider>> {
    let provider: Box<dyn Provider> = match config.kind()? {
        ProviderKind::DeepL => Box::new(deepl::DeepL::new(&config.api_key, &config.endpoint)),
        ProviderKind::LibreTranslate => Box::new(libretranslate::LibreTranslate::new(
            &config.endpoint,
            &config.api_key,
        )),
        ProviderKind::MyMemory => Box::new(mymemory::MyMemory::new(&config.endpoint, &config.email)),
    };
    Ok(provider)
}

/// Decode a JSON body, mapping failures to `ParseError`
pub(crate) fn decode_json<T: serde::de::DeserializeOwned>(
    provider: &str,
    body: &str,
) -> Result<T, ProviderError> {
    serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("{} response: {}", provider, e)))
}

pub mod transport;
pub mod deepl;
pub mod libretranslate;
pub mod mymemory;
