//! Coverage scorer — matches extracted JD keywords against the flattened
//! corpus using exact token, alias, and fuzzy matching.

use tracing::debug;

use crate::analysis::similarity::is_fuzzy_match;
use crate::models::analysis::{CorpusEntry, CoverageResult, ItemRef, KeywordMatch};

/// Bidirectional alias groups for common tech abbreviations. A keyword in
/// any group is searched as every member of that group.
const ALIAS_GROUPS: &[&[&str]] = &[
    &["kubernetes", "k8s"],
    &["ci/cd", "cicd", "ci cd"],
    &["javascript", "js"],
    &["typescript", "ts"],
    &["postgresql", "postgres"],
    &["amazon web services", "aws"],
    &["google cloud platform", "google cloud", "gcp"],
    &["machine learning", "ml"],
    &["artificial intelligence", "ai"],
    &["react", "react.js", "reactjs"],
    &["node", "node.js", "nodejs"],
    &["vue", "vue.js", "vuejs"],
    &["angular", "angularjs"],
    &["next.js", "nextjs"],
    &["express", "express.js", "expressjs"],
    &["mongodb", "mongo"],
    &["golang", "go"],
    &["rest", "restful"],
];

/// Characters that terminate a token: whitespace plus the separators resumes
/// actually use, so "node.js" matches inside "node.js developer" and "react"
/// matches inside "react.js".
fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '.' | '/' | ',' | ';' | '|' | '(' | ')' | '-')
}

/// Search terms for a keyword: its alias group, or just the keyword itself.
/// Always lowercase.
pub fn search_terms(keyword: &str) -> Vec<String> {
    let lower = keyword.to_lowercase();
    for group in ALIAS_GROUPS {
        if group.contains(&lower.as_str()) {
            return group.iter().map(|s| s.to_string()).collect();
        }
    }
    vec![lower]
}

/// Whole-token substring check: `term` must appear in `text` bounded by
/// string edges or delimiter characters on both sides.
fn contains_token(text: &str, term: &str) -> bool {
    for (start, _) in text.match_indices(term) {
        let before_ok = text[..start]
            .chars()
            .next_back()
            .map_or(true, is_delimiter);
        let after_ok = text[start + term.len()..]
            .chars()
            .next()
            .map_or(true, is_delimiter);
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

/// True when the (lowercase) entry text matches any of the search terms,
/// exactly or fuzzily. Fuzzy comparison only considers entry words longer
/// than 2 chars.
fn entry_matches(entry_text: &str, terms: &[String]) -> bool {
    for term in terms {
        if contains_token(entry_text, term) {
            return true;
        }
    }
    entry_text
        .split(is_delimiter)
        .filter(|w| w.chars().count() > 2)
        .any(|word| terms.iter().any(|term| is_fuzzy_match(word, term)))
}

/// Every corpus item a keyword matches, in corpus order.
pub fn find_matching_items(keyword: &str, corpus: &[CorpusEntry]) -> Vec<ItemRef> {
    let terms = search_terms(keyword);
    corpus
        .iter()
        .filter(|entry| entry_matches(&entry.text, &terms))
        .map(|entry| ItemRef {
            source_type: entry.source_type,
            item_id: entry.item_id.clone(),
        })
        .collect()
}

/// Scores keyword coverage against the corpus. Matched/missing lists follow
/// the order keywords were supplied. An empty keyword list scores 0.
pub fn score_coverage(keywords: &[String], corpus: &[CorpusEntry]) -> CoverageResult {
    if keywords.is_empty() {
        return CoverageResult::empty();
    }

    let mut matched_keywords = Vec::new();
    let mut missing_keywords = Vec::new();
    let mut keyword_matches = Vec::new();

    for keyword in keywords {
        let items = find_matching_items(keyword, corpus);
        if items.is_empty() {
            missing_keywords.push(keyword.clone());
        } else {
            matched_keywords.push(keyword.clone());
            keyword_matches.push(KeywordMatch {
                keyword: keyword.clone(),
                items,
            });
        }
    }

    let score = matched_keywords.len() as f64 / keywords.len() as f64;
    debug!(
        "coverage: {}/{} keywords matched",
        matched_keywords.len(),
        keywords.len()
    );

    CoverageResult {
        score,
        matched_keywords,
        missing_keywords,
        keyword_matches,
    }
}
