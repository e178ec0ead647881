//! Score extraction — tolerant pattern-match over free-text model output.
//!
//! The model is instructed to emit four `- <Category>: XX%` lines, but its
//! output format is not guaranteed by contract. The extractor scans the
//! whole text case-insensitively, tolerates interleaved prose, out-of-order
//! and missing categories, and values above 100 (no range validation).
//! Later matches for the same category overwrite earlier ones.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Default for any score category not found in a response.
pub const NOT_AVAILABLE: &str = "N/A";

static SCORE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)-\s*(Skills|Experience|Education|Overall)\s*:\s*(\d{1,3})\s*%")
        .expect("regex is compile-time constant")
});

/// The four-category percentage mapping derived from one provider's
/// response. Every category is always present, defaulting to the
/// `"N/A"` sentinel when unmatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreSet {
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub overall: String,
}

impl Default for ScoreSet {
    fn default() -> Self {
        Self {
            skills: NOT_AVAILABLE.to_string(),
            experience: NOT_AVAILABLE.to_string(),
            education: NOT_AVAILABLE.to_string(),
            overall: NOT_AVAILABLE.to_string(),
        }
    }
}

/// Scans raw backend text for score lines and returns the derived
/// `ScoreSet`. Last match wins per category.
pub fn extract_scores(text: &str) -> ScoreSet {
    let mut scores = ScoreSet::default();
    for caps in SCORE_LINE.captures_iter(text) {
        let value = format!("{}%", &caps[2]);
        match caps[1].to_ascii_lowercase().as_str() {
            "skills" => scores.skills = value,
            "experience" => scores.experience = value,
            "education" => scores.education = value,
            "overall" => scores.overall = value,
            _ => {}
        }
    }
    scores
}

/// Coerces a score entry to an integer for threshold comparisons.
/// Well-formed `"NN%"` → NN; the sentinel or anything malformed → 0.
pub fn score_percent(score: &str) -> u32 {
    match score.strip_suffix('%') {
        Some(digits) => digits.trim().parse().unwrap_or(0),
        None => 0,
    }
}
