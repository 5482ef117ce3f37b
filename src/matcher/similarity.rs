//! Edit-distance similarity scoring for fuzzy matching

/// Normalized similarity of two strings on a 0-100 scale.
///
/// Indel ratio: `100 * 2 * LCS(a, b) / (|a| + |b|)`, measured in chars.
/// 100 means identical; an empty operand scores 0 so blank lines never match.
/// Comparison is exact, so callers lowercase both sides first.
#[must_use]
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let lcs = lcs_length(&a, &b);
    100.0 * (2 * lcs) as f64 / (a.len() + b.len()) as f64
}

/// Longest common subsequence length, two-row dynamic programming
fn lcs_length(a: &[char], b: &[char]) -> usize {
    // Keep the shorter string on the inner axis
    let (outer, inner) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    let mut prev = vec![0usize; inner.len() + 1];
    let mut curr = vec![0usize; inner.len() + 1];

    for &oc in outer {
        for (j, &ic) in inner.iter().enumerate() {
            curr[j + 1] = if oc == ic {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[inner.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_score_100() {
        assert!((ratio("dana-farber", "dana-farber") - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn one_substitution_in_eleven_chars() {
        let score = ratio("dana farber", "dana-farber");
        assert!(score > 90.0 && score < 91.0, "score was {score}");
    }

    #[test]
    fn empty_operands_never_match() {
        assert_eq!(ratio("", "dana-farber"), 0.0);
        assert_eq!(ratio("dana-farber", ""), 0.0);
        assert_eq!(ratio("", ""), 0.0);
    }

    #[test]
    fn symmetric() {
        assert_eq!(ratio("kitten", "sitting"), ratio("sitting", "kitten"));
    }

    #[test]
    fn counts_chars_not_bytes() {
        // "é" is two bytes but one char
        let score = ratio("café", "cafe");
        assert!((score - 75.0).abs() < 1e-9, "score was {score}");
    }
}
