/*!
 * Simple statistics for a text sample.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Reading speed used for the time estimate
pub const WORDS_PER_MINUTE: usize = 200;

static SENTENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStats {
    pub words: usize,
    pub characters: usize,
    pub sentences: usize,
    pub reading_time: String,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let words = text.split_whitespace().count();
        Self {
            words,
            characters: text.chars().count(),
            sentences: SENTENCE.find_iter(text).count(),
            reading_time: reading_time(words),
        }
    }
}

/// Estimated reading time in started minutes
pub fn reading_time(words: usize) -> String {
    let minutes = words.div_ceil(WORDS_PER_MINUTE);
    if minutes == 0 {
        "< 1 min".to_string()
    } else {
        format!("{} min", minutes)
    }
}
