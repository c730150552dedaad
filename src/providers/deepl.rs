use serde::Deserialize;

use crate::errors::ProviderError;
use crate::language_utils::{apply_alias, reverse_alias};
use crate::translation::TranslationRequest;

use super::transport::{HttpRequest, HttpResponse, RequestBody};
use super::{Provider, ProviderTranslation, decode_json};

const FREE_ENDPOINT: &str = "https://api-free.deepl.com/v2/translate";
const PRO_ENDPOINT: &str = "https://api.deepl.com/v2/translate";

/// Target codes DeepL does not accept as-is
pub const TARGET_ALIASES: &[(&str, &str)] = &[
    ("en", "en-us"),
    ("pt", "pt-pt"),
    ("no", "nb"),
    ("ms", "id"),
    ("zh", "zh-hans"),
];

/// Source codes DeepL does not accept as-is
pub const SOURCE_ALIASES: &[(&str, &str)] = &[("no", "nb"), ("ms", "id")];

/// DeepL client
#[derive(Debug, Clone)]
pub struct DeepL {
    /// API key for authentication
    api_key: String,
    /// Full translate URL
    endpoint: String,
}

/// DeepL translate response
#[derive(Debug, Deserialize)]
pub struct DeepLResponse {
    pub translations: Vec<DeepLTranslation>,
}

/// One translated text in a DeepL response
#[derive(Debug, Deserialize)]
pub struct DeepLTranslation {
    pub text: String,
    #[serde(default)]
    pub detected_source_language: Option<String>,
}

impl DeepL {
    /// Create a new DeepL client
    ///
    /// With an empty endpoint the URL follows the key type: free keys end
    /// in `:fx`.
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let endpoint = endpoint.into();
        let endpoint = if endpoint.trim().is_empty() {
            Self::default_endpoint(&api_key).to_string()
        } else {
            endpoint.trim().to_string()
        };
        Self { api_key, endpoint }
    }

    pub fn default_endpoint(api_key: &str) -> &'static str {
        if api_key.trim().ends_with(":fx") {
            FREE_ENDPOINT
        } else {
            PRO_ENDPOINT
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Provider for DeepL {
    fn id(&self) -> &str {
        "deepl"
    }

    fn build_request(&self, request: &TranslationRequest) -> Result<HttpRequest, ProviderError> {
        let mut form = vec![
            ("text".to_string(), request.source_text.clone()),
            (
                "target_lang".to_string(),
                apply_alias(&request.target_language, TARGET_ALIASES).to_uppercase(),
            ),
        ];
        // DeepL rejects an explicit "auto"; leaving the field out asks it to detect
        if let Some(source) = request.source_language.code() {
            form.push((
                "source_lang".to_string(),
                apply_alias(source, SOURCE_ALIASES).to_uppercase(),
            ));
        }

        Ok(HttpRequest::post(&self.endpoint, RequestBody::Form(form))
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key)))
    }

    fn parse_response(&self, response: &HttpResponse) -> Result<ProviderTranslation, ProviderError> {
        let parsed: DeepLResponse = decode_json(self.id(), &response.body)?;
        let first = parsed.translations.into_iter().next().ok_or_else(|| {
            ProviderError::ParseError("deepl response has no translations".to_string())
        })?;

        Ok(ProviderTranslation {
            text: first.text,
            detected_source_language: first
                .detected_source_language
                .filter(|code| !code.trim().is_empty())
                .map(|code| reverse_alias(&code, SOURCE_ALIASES)),
        })
    }
}
