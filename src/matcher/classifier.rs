//! String classifier: the labeled string sets a crawl matches against
//!
//! Holds the official, detect and fuzzy sets plus the compiled regex
//! patterns as read-only data for the lifetime of a crawl.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::crawl_engine::CrawlError;

/// The three labeled string sets plus regex pattern sources
///
/// Roles are disjoint, contents need not be: a string may be both official
/// and fuzzy, in which case it is checked for typos but never reported
/// verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringSets {
    pub official: Vec<String>,
    pub detect: Vec<String>,
    pub fuzzy: Vec<String>,
    pub regex_patterns: Vec<String>,
}

impl StringSets {
    /// Trim every entry, drop empty ones and remove duplicates while keeping
    /// first-seen order
    #[must_use]
    pub fn cleaned(self) -> Self {
        Self {
            official: clean_list(self.official),
            detect: clean_list(self.detect),
            fuzzy: clean_list(self.fuzzy),
            regex_patterns: clean_list(self.regex_patterns),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.detect.is_empty() && self.fuzzy.is_empty() && self.regex_patterns.is_empty()
    }
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !out.iter().any(|v| v == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}

/// Compile regex pattern sources, optionally case-insensitive.
///
/// # Errors
///
/// Returns `CrawlError::Config` naming the first pattern that fails.
pub fn compile_patterns(
    patterns: &[String],
    case_insensitive: bool,
) -> Result<Vec<Regex>, CrawlError> {
    patterns
        .iter()
        .map(|p| {
            RegexBuilder::new(p)
                .case_insensitive(case_insensitive)
                .build()
                .map_err(|e| CrawlError::Config(format!("Invalid regex pattern '{p}': {e}")))
        })
        .collect()
}

/// A detect variant with its case-insensitive literal searcher
#[derive(Debug, Clone)]
pub(crate) struct DetectVariant {
    pub(crate) variant: String,
    pub(crate) searcher: Regex,
}

/// A fuzzy reference with its lowercased form cached
#[derive(Debug, Clone)]
pub(crate) struct FuzzyReference {
    pub(crate) reference: String,
    pub(crate) lowered: String,
}

/// Read-only view of the labeled string sets used by the match engine
#[derive(Debug, Clone)]
pub struct StringClassifier {
    official: Vec<String>,
    official_lowered: Vec<String>,
    detect: Vec<DetectVariant>,
    fuzzy: Vec<FuzzyReference>,
    patterns: Vec<Regex>,
}

impl StringClassifier {
    /// Build a classifier from string sets and already-compiled patterns.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Config` if a detect variant cannot be turned
    /// into a literal searcher (only possible for pathologically large input).
    pub fn new(sets: StringSets, patterns: Vec<Regex>) -> Result<Self, CrawlError> {
        let sets = sets.cleaned();

        let official_lowered = sets.official.iter().map(|s| s.to_lowercase()).collect();

        let detect = sets
            .detect
            .into_iter()
            .map(|variant| {
                RegexBuilder::new(&regex::escape(&variant))
                    .case_insensitive(true)
                    .build()
                    .map(|searcher| DetectVariant { variant: variant.clone(), searcher })
                    .map_err(|e| {
                        CrawlError::Config(format!("Invalid detect string '{variant}': {e}"))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let fuzzy = sets
            .fuzzy
            .into_iter()
            .map(|reference| FuzzyReference {
                lowered: reference.to_lowercase(),
                reference,
            })
            .collect();

        Ok(Self {
            official: sets.official,
            official_lowered,
            detect,
            fuzzy,
            patterns,
        })
    }

    /// Build a classifier straight from string sets, compiling the patterns.
    pub fn from_sets(sets: StringSets, case_insensitive_regex: bool) -> Result<Self, CrawlError> {
        let patterns = compile_patterns(&sets.regex_patterns, case_insensitive_regex)?;
        Self::new(sets, patterns)
    }

    /// Case-sensitive exact membership in the official set
    #[must_use]
    pub fn is_official(&self, s: &str) -> bool {
        self.official.iter().any(|o| o == s)
    }

    /// True if `text` contains any official string, ignoring case
    #[must_use]
    pub fn excluded_by_official(&self, text: &str) -> bool {
        if self.official_lowered.is_empty() {
            return false;
        }
        let lowered = text.to_lowercase();
        self.official_lowered.iter().any(|o| lowered.contains(o.as_str()))
    }

    #[must_use]
    pub fn official(&self) -> &[String] {
        &self.official
    }

    #[must_use]
    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    pub(crate) fn detect_variants(&self) -> &[DetectVariant] {
        &self.detect
    }

    pub(crate) fn fuzzy_references(&self) -> &[FuzzyReference] {
        &self.fuzzy
    }

    /// Detect strings as configured
    pub fn detect(&self) -> impl Iterator<Item = &str> {
        self.detect.iter().map(|d| d.variant.as_str())
    }

    /// Fuzzy reference strings as configured
    pub fn fuzzy(&self) -> impl Iterator<Item = &str> {
        self.fuzzy.iter().map(|f| f.reference.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets(official: &[&str]) -> StringSets {
        StringSets {
            official: official.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn official_membership_is_case_sensitive() {
        let c = StringClassifier::from_sets(sets(&["Dana-Farber"]), true).unwrap();
        assert!(c.is_official("Dana-Farber"));
        assert!(!c.is_official("dana-farber"));
    }

    #[test]
    fn exclusion_is_case_insensitive_substring() {
        let c = StringClassifier::from_sets(sets(&["Dana-Farber"]), true).unwrap();
        assert!(c.excluded_by_official("Visit DANA-FARBER today"));
        assert!(!c.excluded_by_official("Visit Dana Farber today"));
    }

    #[test]
    fn cleaning_trims_and_dedups() {
        let cleaned = StringSets {
            detect: vec![" DFCI ".into(), "DFCI".into(), "".into(), "Dana Farber".into()],
            ..Default::default()
        }
        .cleaned();
        assert_eq!(cleaned.detect, vec!["DFCI".to_string(), "Dana Farber".to_string()]);
    }

    #[test]
    fn bad_pattern_is_config_error() {
        let result = compile_patterns(&["(unclosed".to_string()], true);
        assert!(matches!(result, Err(CrawlError::Config(_))));
    }
}
