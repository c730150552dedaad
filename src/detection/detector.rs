use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use super::profiles::{DEFAULT_TABLE, DetectionTable, LexicalProfile, ScriptProfile};

/// Plain Latin text the fallback treats as English
static PLAIN_LATIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[a-zA-Z\s\d.,!?;:'"()\-]+$"#).expect("valid regex"));

/// Advisory guess about the language of a text
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSignal {
    pub code: String,
    pub display_name: String,
    /// In [0, 1]
    pub confidence: f64,
}

/// Coarse bucket for presenting a confidence value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLabel {
    High,
    Medium,
    Low,
}

impl fmt::Display for ConfidenceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ConfidenceLabel::High => "high",
            ConfidenceLabel::Medium => "medium",
            ConfidenceLabel::Low => "low",
        };
        write!(f, "{}", label)
    }
}

pub fn confidence_label(confidence: f64) -> ConfidenceLabel {
    if confidence >= 0.8 {
        ConfidenceLabel::High
    } else if confidence >= 0.5 {
        ConfidenceLabel::Medium
    } else {
        ConfidenceLabel::Low
    }
}

/// Detect with the process-wide table
pub fn detect(text: &str) -> Option<LanguageSignal> {
    Detector::default().detect(text)
}

/// Heuristic detector over a profile table
///
/// Pure and deterministic: the same text and table always give the same signal.
#[derive(Debug, Clone, Copy)]
pub struct Detector<'a> {
    table: &'a DetectionTable,
}

impl Default for Detector<'static> {
    fn default() -> Self {
        Self { table: &DEFAULT_TABLE }
    }
}

impl<'a> Detector<'a> {
    pub fn new(table: &'a DetectionTable) -> Self {
        Self { table }
    }

    pub fn detect(&self, text: &str) -> Option<LanguageSignal> {
        let visible: Vec<char> = text.chars().filter(|c| !c.is_whitespace()).collect();
        if visible.len() < self.table.thresholds.min_text_chars {
            return None;
        }

        if let Some(signal) = self.script_pass(text, &visible) {
            return Some(signal);
        }

        let tokens = tokenize(text);
        if let Some((profile, confidence)) = self.best_lexicon(&tokens, |p| !p.script_variant) {
            return Some(signal(profile.code, profile.name, confidence));
        }

        if PLAIN_LATIN.is_match(text) {
            let (code, name) = self.table.fallback;
            return Some(signal(code, name, self.table.thresholds.fallback_confidence));
        }

        None
    }

    fn script_pass(&self, text: &str, visible: &[char]) -> Option<LanguageSignal> {
        let script = self
            .table
            .scripts
            .iter()
            .find(|script| visible.iter().any(|c| script.triggers(*c)))?;

        let confidence = self.script_confidence(script, visible);

        if !script.variants.is_empty() {
            let tokens = tokenize(text);
            if let Some((variant, _)) =
                self.best_lexicon(&tokens, |p| script.variants.contains(&p.code))
            {
                return Some(signal(variant.code, variant.name, confidence));
            }
        }

        Some(signal(script.code, script.name, confidence))
    }

    fn script_confidence(&self, script: &ScriptProfile, visible: &[char]) -> f64 {
        let counted = visible.iter().filter(|c| script.counts(**c)).count();
        let fraction = counted as f64 / visible.len() as f64;
        let floor = self.table.thresholds.script_confidence_floor;
        (floor + (1.0 - floor) * fraction).min(1.0)
    }

    /// Highest-scoring lexical profile among those `eligible` accepts
    ///
    /// Ties keep the first-declared profile.
    fn best_lexicon<F>(&self, tokens: &[String], eligible: F) -> Option<(&'a LexicalProfile, f64)>
    where
        F: Fn(&LexicalProfile) -> bool,
    {
        if tokens.is_empty() {
            return None;
        }

        let mut best: Option<(&'a LexicalProfile, usize)> = None;
        for profile in self.table.lexicons.iter().filter(|p| eligible(p)) {
            let count = tokens
                .iter()
                .filter(|t| profile.stop_words.contains(t.as_str()))
                .count();
            if count < profile.threshold {
                continue;
            }
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((profile, count));
            }
        }

        let (profile, count) = best?;
        let confidence = (count as f64 / tokens.len() as f64).min(1.0);
        if confidence < self.table.thresholds.min_lexical_confidence {
            return None;
        }
        Some((profile, confidence))
    }
}

fn signal(code: &str, name: &str, confidence: f64) -> LanguageSignal {
    LanguageSignal {
        code: code.to_string(),
        display_name: name.to_string(),
        confidence,
    }
}

fn is_word_char(c: char) -> bool {
    // combining diacritics (e.g. Yoruba tone marks) belong to the word
    c.is_alphanumeric() || ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Lower-cased word tokens with punctuation removed
///
/// Apostrophes survive only between word characters, so `c'est` stays whole.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split_whitespace()
        .map(|raw| {
            let kept: String = raw
                .chars()
                .filter(|c| is_word_char(*c) || *c == '\'' || *c == '\u{2019}')
                .map(|c| if c == '\u{2019}' { '\'' } else { c })
                .collect();
            kept.trim_matches('\'').to_string()
        })
        .filter(|token| !token.is_empty())
        .collect()
}
