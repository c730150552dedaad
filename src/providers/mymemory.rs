use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils::{apply_alias, reverse_alias};
use crate::translation::TranslationRequest;

use super::transport::{HttpRequest, HttpResponse};
use super::{Provider, ProviderTranslation, decode_json};

/// MyMemory's own token for source auto-detection
const AUTODETECT: &str = "autodetect";

/// Codes MyMemory expects in region form
pub const ALIASES: &[(&str, &str)] = &[("zh", "zh-CN"), ("no", "nb")];

/// MyMemory client
#[derive(Debug, Clone)]
pub struct MyMemory {
    /// Full `get` URL
    endpoint: String,
    /// Contact email, raises the free daily quota
    email: String,
}

/// MyMemory `get` response
///
/// Errors arrive with HTTP 200 and a non-200 `responseStatus`, which is a
/// number or a string depending on the error.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryResponse {
    #[serde(default)]
    pub response_data: Option<MyMemoryData>,
    #[serde(default)]
    pub response_status: Value,
    #[serde(default)]
    pub response_details: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MyMemoryData {
    #[serde(default)]
    pub translated_text: Option<String>,
    #[serde(default)]
    pub detected_language: Option<String>,
}

impl MyMemory {
    pub fn new(endpoint: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into().trim().to_string(),
            email: email.into(),
        }
    }
}

/// Status as a string, whichever JSON type it came in
fn status_text(status: &Value) -> Option<String> {
    match status {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.trim().to_string()),
        _ => None,
    }
}

impl Provider for MyMemory {
    fn id(&self) -> &str {
        "mymemory"
    }

    fn build_request(&self, request: &TranslationRequest) -> Result<HttpRequest, ProviderError> {
        let source = match request.source_language.code() {
            Some(code) => apply_alias(code, ALIASES),
            None => AUTODETECT.to_string(),
        };
        let langpair = format!("{}|{}", source, apply_alias(&request.target_language, ALIASES));

        let mut params = vec![
            ("q", request.source_text.as_str()),
            ("langpair", langpair.as_str()),
        ];
        if !self.email.trim().is_empty() {
            params.push(("de", self.email.trim()));
        }

        let url = Url::parse_with_params(&self.endpoint, &params)
            .map_err(|e| ProviderError::RequestFailed(format!("invalid mymemory endpoint: {}", e)))?;

        Ok(HttpRequest::get(url.as_str()))
    }

    fn parse_response(&self, response: &HttpResponse) -> Result<ProviderTranslation, ProviderError> {
        let parsed: MyMemoryResponse = decode_json(self.id(), &response.body)?;

        let status = status_text(&parsed.response_status).ok_or_else(|| {
            ProviderError::ParseError("mymemory response has no responseStatus".to_string())
        })?;
        if status != "200" {
            let message = match parsed.response_details {
                Value::String(details) => details,
                Value::Null => String::new(),
                other => other.to_string(),
            };
            return Err(ProviderError::EmbeddedError { status, message });
        }

        let data = parsed.response_data.ok_or_else(|| {
            ProviderError::ParseError("mymemory response has no responseData".to_string())
        })?;
        let text = data.translated_text.ok_or_else(|| {
            ProviderError::ParseError("mymemory response has no translatedText".to_string())
        })?;

        Ok(ProviderTranslation {
            text,
            detected_source_language: data
                .detected_language
                .filter(|code| !code.trim().is_empty())
                .map(|code| reverse_alias(&code, ALIASES)),
        })
    }
}
