//! Match engine: runs the three strategies over one page's text
//!
//! Strategy order is fixed (regex, detect, fuzzy) so output is reproducible.
//! The strategies are independent: none of them sees another's results, and
//! each applies its own official-string exclusion.

use std::sync::Arc;

use super::classifier::StringClassifier;
use super::record::MatchRecord;
use super::similarity::ratio;

/// Scan one page with all three strategies.
///
/// `threshold` is the inclusive fuzzy cutoff on the 0-100 similarity scale.
/// An empty page yields no records.
#[must_use]
pub fn scan(
    page_text: &str,
    source_url: &str,
    classifier: &StringClassifier,
    threshold: f64,
) -> Vec<MatchRecord> {
    if page_text.is_empty() {
        return Vec::new();
    }

    let mut records = regex_matches(page_text, source_url, classifier);
    records.extend(detect_matches(page_text, source_url, classifier));
    records.extend(fuzzy_matches(page_text, source_url, classifier, threshold));
    records
}

/// Every match of every compiled pattern, skipping exact official strings.
#[must_use]
pub fn regex_matches(
    page_text: &str,
    source_url: &str,
    classifier: &StringClassifier,
) -> Vec<MatchRecord> {
    let mut records = Vec::new();
    for pattern in classifier.patterns() {
        for m in pattern.find_iter(page_text) {
            let text = m.as_str();
            if text.is_empty() || classifier.is_official(text) {
                continue;
            }
            records.push(MatchRecord::regex(source_url, text, pattern.as_str()));
        }
    }
    records
}

/// Case-insensitive occurrences of each detect variant.
///
/// Variants that are themselves official are never searched. The recorded
/// text keeps the casing found on the page.
#[must_use]
pub fn detect_matches(
    page_text: &str,
    source_url: &str,
    classifier: &StringClassifier,
) -> Vec<MatchRecord> {
    let mut records = Vec::new();
    for detect in classifier.detect_variants() {
        if classifier.is_official(&detect.variant) {
            continue;
        }
        for m in detect.searcher.find_iter(page_text) {
            records.push(MatchRecord::detect(source_url, m.as_str(), &detect.variant));
        }
    }
    records
}

/// Line-by-line similarity against each fuzzy reference.
///
/// Lines that already contain an official string (ignoring case) are
/// skipped. A line can match several references.
#[must_use]
pub fn fuzzy_matches(
    page_text: &str,
    source_url: &str,
    classifier: &StringClassifier,
    threshold: f64,
) -> Vec<MatchRecord> {
    let references = classifier.fuzzy_references();
    if references.is_empty() {
        return Vec::new();
    }

    let mut records = Vec::new();
    for line in page_text.lines() {
        if classifier.excluded_by_official(line) {
            continue;
        }
        let trimmed = line.trim();
        // Blank lines score 0 against everything; never report them
        if trimmed.is_empty() {
            continue;
        }
        let lowered = trimmed.to_lowercase();
        for reference in references {
            let score = ratio(&lowered, &reference.lowered);
            if score >= threshold {
                records.push(MatchRecord::fuzzy(
                    source_url,
                    trimmed,
                    &reference.reference,
                    score,
                ));
            }
        }
    }
    records
}

/// Shareable scanner bound to one classifier and threshold
#[derive(Debug, Clone)]
pub struct MatchEngine {
    classifier: Arc<StringClassifier>,
    threshold: f64,
}

impl MatchEngine {
    #[must_use]
    pub fn new(classifier: Arc<StringClassifier>, threshold: f64) -> Self {
        Self {
            classifier,
            threshold,
        }
    }

    #[must_use]
    pub fn classifier(&self) -> &StringClassifier {
        &self.classifier
    }

    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub fn scan(&self, page_text: &str, source_url: &str) -> Vec<MatchRecord> {
        scan(page_text, source_url, &self.classifier, self.threshold)
    }
}
