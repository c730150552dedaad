/*!
 * Request and result value objects for the translation orchestrator.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TranslationError;
use crate::language_utils::{self, AUTO};

/// Source language of a request: explicit code or backend auto-detection
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceLanguage {
    /// Let the backend detect the source language
    #[default]
    Auto,
    /// An explicit language code, already normalized
    Explicit(String),
}

impl SourceLanguage {
    /// The explicit code, if any
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Auto => None,
            Self::Explicit(code) => Some(code),
        }
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl fmt::Display for SourceLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "{}", AUTO),
            Self::Explicit(code) => write!(f, "{}", code),
        }
    }
}

impl FromStr for SourceLanguage {
    type Err = std::convert::Infallible;

    // Empty and "auto" both mean auto-detection
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = language_utils::normalize_code(s);
        if normalized.is_empty() || normalized == AUTO {
            Ok(Self::Auto)
        } else {
            Ok(Self::Explicit(normalized))
        }
    }
}

impl From<&str> for SourceLanguage {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(lang) => lang,
            Err(never) => match never {},
        }
    }
}

impl Serialize for SourceLanguage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SourceLanguage {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from(raw.as_str()))
    }
}

/// A single translation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranslationRequest {
    /// Text to translate
    pub source_text: String,

    /// Source language or auto-detection
    #[serde(default)]
    pub source_language: SourceLanguage,

    /// Target language code
    pub target_language: String,
}

impl TranslationRequest {
    /// Create a request; codes are normalized, nothing is validated yet
    pub fn new(
        source_text: impl Into<String>,
        source_language: impl Into<SourceLanguage>,
        target_language: impl AsRef<str>,
    ) -> Self {
        Self {
            source_text: source_text.into(),
            source_language: source_language.into(),
            target_language: language_utils::normalize_code(target_language.as_ref()),
        }
    }

    /// Reject requests that no provider should ever see
    pub fn validate(&self) -> Result<(), TranslationError> {
        if self.source_text.trim().is_empty() {
            return Err(TranslationError::InvalidRequest(
                "source text is empty".to_string(),
            ));
        }

        let target = language_utils::normalize_code(&self.target_language);
        if target.is_empty() {
            return Err(TranslationError::InvalidRequest(
                "target language is missing".to_string(),
            ));
        }
        if target == AUTO {
            return Err(TranslationError::InvalidRequest(
                "target language cannot be auto".to_string(),
            ));
        }

        Ok(())
    }
}

/// Outcome of a successful translation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationResult {
    /// Translated text, never empty
    pub translated_text: String,

    /// Source language reported by the backend, in caller vocabulary
    pub detected_source_language: Option<String>,

    /// Identifier of the provider that produced the translation
    pub provider_used: String,

    /// Source language exactly as requested
    pub source_language: SourceLanguage,

    /// Target language exactly as requested
    pub target_language: String,
}
