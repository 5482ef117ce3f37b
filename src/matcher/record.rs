//! Match records produced by the match engine

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which strategy produced a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Regex,
    Detect,
    Fuzzy,
}

impl MatchKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Regex => "regex",
            Self::Detect => "detect",
            Self::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported occurrence of a flagged string
///
/// `trigger` is the regex source, detect variant or fuzzy reference that
/// fired. `score` is only set for fuzzy matches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub source_url: String,
    pub matched_text: String,
    pub kind: MatchKind,
    pub trigger: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl MatchRecord {
    #[must_use]
    pub fn regex(source_url: &str, matched_text: &str, pattern: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            matched_text: matched_text.to_string(),
            kind: MatchKind::Regex,
            trigger: pattern.to_string(),
            score: None,
        }
    }

    #[must_use]
    pub fn detect(source_url: &str, matched_text: &str, variant: &str) -> Self {
        Self {
            source_url: source_url.to_string(),
            matched_text: matched_text.to_string(),
            kind: MatchKind::Detect,
            trigger: variant.to_string(),
            score: None,
        }
    }

    #[must_use]
    pub fn fuzzy(source_url: &str, matched_text: &str, reference: &str, score: f64) -> Self {
        Self {
            source_url: source_url.to_string(),
            matched_text: matched_text.to_string(),
            kind: MatchKind::Fuzzy,
            trigger: reference.to_string(),
            score: Some(score),
        }
    }

    /// The `Match_Type` column: kind plus the triggering string,
    /// e.g. `detect 'Dana Farber'` or `fuzzy 'Dana-Farber' (90.9)`.
    #[must_use]
    pub fn match_type_label(&self) -> String {
        match self.score {
            Some(score) => format!("{} '{}' ({score:.1})", self.kind, self.trigger),
            None => format!("{} '{}'", self.kind, self.trigger),
        }
    }
}
