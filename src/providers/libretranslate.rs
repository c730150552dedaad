use serde::Deserialize;
use serde_json::json;

use crate::errors::ProviderError;
use crate::language_utils::{AUTO, apply_alias, reverse_alias};
use crate::translation::TranslationRequest;

use super::transport::{HttpRequest, HttpResponse, RequestBody};
use super::{Provider, ProviderTranslation, decode_json};

/// Codes LibreTranslate knows under another name
pub const ALIASES: &[(&str, &str)] = &[("no", "nb")];

/// LibreTranslate client
#[derive(Debug, Clone)]
pub struct LibreTranslate {
    /// Full translate URL
    endpoint: String,
    /// API key, required by some public instances
    api_key: String,
}

/// LibreTranslate translate response
///
/// Some instances answer 200 with only an `error` field set.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibreTranslateResponse {
    #[serde(default)]
    pub translated_text: Option<String>,
    #[serde(default)]
    pub detected_language: Option<DetectedLanguage>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Language detected by LibreTranslate for an `auto` source
#[derive(Debug, Deserialize)]
pub struct DetectedLanguage {
    pub language: String,
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl LibreTranslate {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim().to_string(),
            api_key: api_key.into(),
        }
    }
}

impl Provider for LibreTranslate {
    fn id(&self) -> &str {
        "libretranslate"
    }

    fn build_request(&self, request: &TranslationRequest) -> Result<HttpRequest, ProviderError> {
        // LibreTranslate accepts "auto" natively
        let source = match request.source_language.code() {
            Some(code) => apply_alias(code, ALIASES),
            None => AUTO.to_string(),
        };

        let mut body = json!({
            "q": request.source_text,
            "source": source,
            "target": apply_alias(&request.target_language, ALIASES),
            "format": "text",
        });
        if !self.api_key.trim().is_empty() {
            body["api_key"] = serde_json::Value::String(self.api_key.clone());
        }

        Ok(HttpRequest::post(&self.endpoint, RequestBody::Json(body))
            .header("Content-Type", "application/json"))
    }

    fn parse_response(&self, response: &HttpResponse) -> Result<ProviderTranslation, ProviderError> {
        let parsed: LibreTranslateResponse = decode_json(self.id(), &response.body)?;

        if let Some(message) = parsed.error {
            return Err(ProviderError::EmbeddedError {
                status: "error".to_string(),
                message,
            });
        }

        let text = parsed.translated_text.ok_or_else(|| {
            ProviderError::ParseError("libretranslate response has no translatedText".to_string())
        })?;

        Ok(ProviderTranslation {
            text,
            detected_source_language: parsed
                .detected_language
                .map(|d| reverse_alias(&d.language, ALIASES)),
        })
    }
}
