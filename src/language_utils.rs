use anyhow::{Result, anyhow};
use isolang::Language;

// Language utilities for language code handling
//
// This module holds the catalogue of languages offered to callers, name lookup
// for arbitrary ISO 639 codes, and the alias helpers providers use to rewrite
// codes for outbound requests.

/// Sentinel source language meaning "let the backend decide"
pub const AUTO: &str = "auto";

/// Languages offered for translation (code, English name)
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
    ("tr", "Turkish"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("sv", "Swedish"),
    ("fi", "Finnish"),
    ("da", "Danish"),
    ("no", "Norwegian"),
    ("cs", "Czech"),
    ("el", "Greek"),
    ("he", "Hebrew"),
    ("id", "Indonesian"),
    ("ms", "Malay"),
    ("th", "Thai"),
    ("vi", "Vietnamese"),
    ("uk", "Ukrainian"),
    ("bg", "Bulgarian"),
    ("ro", "Romanian"),
    ("bn", "Bengali"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("hu", "Hungarian"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("hr", "Croatian"),
    ("sr", "Serbian"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("et", "Estonian"),
    ("ha", "Hausa (Nigeria)"),
    ("yo", "Yoruba (Nigeria)"),
    ("ig", "Igbo (Nigeria)"),
];

/// Normalize a caller supplied code: trimmed and lowercase
pub fn normalize_code(code: &str) -> String {
    code.trim().to_lowercase()
}

/// Check whether a code is the auto-detect sentinel
pub fn is_auto(code: &str) -> bool {
    normalize_code(code) == AUTO
}

/// Check whether a code is in the supported catalogue
pub fn is_supported_language(code: &str) -> bool {
    let normalized = normalize_code(code);
    SUPPORTED_LANGUAGES.iter().any(|(c, _)| *c == normalized)
}

/// Get the language name from a code
///
/// Catalogue names win; other ISO 639-1 or 639-3 codes are resolved through
/// `isolang`. Region suffixes such as `pt-BR` are ignored for the lookup.
pub fn get_language_name(code: &str) -> Result<String> {
    let normalized = normalize_code(code);
    if let Some((_, name)) = SUPPORTED_LANGUAGES.iter().find(|(c, _)| *c == normalized) {
        return Ok((*name).to_string());
    }

    let base = normalized.split(['-', '_']).next().unwrap_or_default();
    let lang = match base.len() {
        2 => Language::from_639_1(base),
        3 => Language::from_639_3(base),
        _ => None,
    }
    .ok_or_else(|| anyhow!("Unknown language code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// Rewrite a code through a fixed alias table, used for outbound requests only
pub fn apply_alias(code: &str, aliases: &[(&str, &str)]) -> String {
    let normalized = normalize_code(code);
    aliases
        .iter()
        .find(|(from, _)| *from == normalized)
        .map(|(_, to)| (*to).to_string())
        .unwrap_or(normalized)
}

/// Map a code reported by a backend back to the caller's vocabulary
///
/// A code that is already in the catalogue is returned unchanged, so an alias
/// target that is also a real language (DeepL's `id`) keeps its own meaning.
pub fn reverse_alias(code: &str, aliases: &[(&str, &str)]) -> String {
    let normalized = normalize_code(code);
    if is_supported_language(&normalized) {
        return normalized;
    }
    aliases
        .iter()
        .find(|(_, to)| to.eq_ignore_ascii_case(&normalized))
        .map(|(from, _)| (*from).to_string())
        .unwrap_or(normalized)
}
