//! Shared fuzzy-matching primitive.
//!
//! Both the coverage scorer and the section-heading check accept a match at
//! normalized similarity ≥ 0.85. They call the same function so the threshold
//! behaves identically in both places.

use strsim::levenshtein;

/// Accept threshold used by every fuzzy call site.
pub const FUZZY_THRESHOLD: f64 = 0.85;

/// `1 − levenshtein(a, b) / max(len(a), len(b))`, in [0, 1].
/// Two empty strings are identical (1.0).
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / max_len as f64
}

/// True when `a` and `b` are close enough to count as the same term.
pub fn is_fuzzy_match(a: &str, b: &str) -> bool {
    normalized_similarity(a, b) >= FUZZY_THRESHOLD
}
