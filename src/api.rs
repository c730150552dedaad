/*!
 * JSON request/reply surface over the orchestrator.
 *
 * Callers hand over a raw request body and get back an HTTP-style status and a
 * JSON body. Provider identities and diagnostics never reach the reply; they
 * are logged instead.
 */

use log::{error, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::errors::TranslationError;
use crate::translation::{SourceLanguage, TranslationOrchestrator, TranslationRequest, TranslationResult};

pub const MISSING_PARAMETERS: &str = "Missing required parameters";
pub const INVALID_BODY: &str = "Invalid request body";
pub const SERVICE_UNAVAILABLE: &str = "Translation service temporarily unavailable. Please try again.";

/// Incoming translation request
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranslateBody {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub source_lang: Option<String>,
    #[serde(default)]
    pub target_lang: Option<String>,
}

/// Successful reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranslateReply {
    pub translation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    pub source_lang: String,
    pub target_lang: String,
}

impl From<TranslationResult> for TranslateReply {
    fn from(result: TranslationResult) -> Self {
        Self {
            translation: result.translated_text,
            detected_language: result.detected_source_language,
            provider: Some(result.provider_used),
            source_lang: result.source_language.to_string(),
            target_lang: result.target_language,
        }
    }
}

/// Error reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorReply {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Status code and JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct ApiReply {
    pub status: u16,
    pub body: Value,
}

impl ApiReply {
    fn ok(reply: TranslateReply) -> Self {
        Self {
            status: 200,
            body: json!(reply),
        }
    }

    fn error(status: u16, error: &str, details: Option<String>) -> Self {
        Self {
            status,
            body: json!(ErrorReply {
                error: error.to_string(),
                details,
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl TranslateBody {
    /// Convert into a validated translation request
    pub fn into_request(self) -> Result<TranslationRequest, ApiReply> {
        let text = self.text.unwrap_or_default();
        let target = self.target_lang.unwrap_or_default();
        if text.trim().is_empty() || target.trim().is_empty() {
            return Err(ApiReply::error(400, MISSING_PARAMETERS, None));
        }

        let source = SourceLanguage::from(self.source_lang.as_deref().unwrap_or_default());
        let request = TranslationRequest::new(text, source, target);
        request
            .validate()
            .map_err(|e| ApiReply::error(400, MISSING_PARAMETERS, Some(e.to_string())))?;
        Ok(request)
    }
}

/// Translate a parsed body
pub async fn handle_body(orchestrator: &TranslationOrchestrator, body: TranslateBody) -> ApiReply {
    let request = match body.into_request() {
        Ok(request) => request,
        Err(reply) => return reply,
    };

    match orchestrator.translate(&request).await {
        Ok(result) => ApiReply::ok(TranslateReply::from(result)),
        Err(TranslationError::InvalidRequest(message)) => {
            ApiReply::error(400, MISSING_PARAMETERS, Some(message))
        }
        Err(e @ TranslationError::AllProvidersFailed { .. }) => {
            error!("{}: {}", e, e.diagnostics());
            ApiReply::error(503, SERVICE_UNAVAILABLE, None)
        }
    }
}

/// Translate a raw JSON request body
pub async fn handle_translate(orchestrator: &TranslationOrchestrator, raw: &str) -> ApiReply {
    match serde_json::from_str::<TranslateBody>(raw) {
        Ok(body) => handle_body(orchestrator, body).await,
        Err(e) => {
            warn!("Rejected malformed translation request: {}", e);
            ApiReply::error(400, INVALID_BODY, Some(e.to_string()))
        }
    }
}
