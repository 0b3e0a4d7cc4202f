//! Output data models for the analysis pipeline: checks, keyword coverage,
//! and suggestions. All are computed per invocation and never persisted here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Check engine output
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

/// Check categories, in the fixed report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    Parsability,
    Keywords,
    Readability,
    Format,
}

impl CheckCategory {
    /// Report order: parsability, keywords, readability, format.
    pub const ORDERED: [CheckCategory; 4] = [
        CheckCategory::Parsability,
        CheckCategory::Keywords,
        CheckCategory::Readability,
        CheckCategory::Format,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            CheckCategory::Parsability => "parsability",
            CheckCategory::Keywords => "keywords",
            CheckCategory::Readability => "readability",
            CheckCategory::Format => "format",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CheckCategory::Parsability => "ATS Parsability",
            CheckCategory::Keywords => "Keyword Match",
            CheckCategory::Readability => "Readability",
            CheckCategory::Format => "Formatting",
        }
    }
}

/// A single heuristic check result. Ids are category-prefixed: P1, K2, R4, F3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Check {
    pub id: String,
    pub category: CheckCategory,
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

impl Check {
    pub fn new(
        id: &str,
        category: CheckCategory,
        name: &str,
        status: CheckStatus,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.to_string(),
            category,
            name: name.to_string(),
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = Some(details);
        self
    }
}

/// Per-category rollup. Invariant: passed + warned + failed == total == checks.len().
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: String,
    pub label: String,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
    pub total: usize,
    pub checks: Vec<Check>,
}

/// Aggregate check report. Invariant: total_passed + total_warned + total_failed == total_checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// 0–100; warnings earn half credit, failures none.
    pub score: u32,
    pub categories: Vec<CategorySummary>,
    pub total_checks: usize,
    pub total_passed: usize,
    pub total_warned: usize,
    pub total_failed: usize,
    pub checked_at: DateTime<Utc>,
}

// ────────────────────────────────────────────────────────────────────────────
// Keyword extraction / coverage output
// ────────────────────────────────────────────────────────────────────────────

/// Validated keyword set extracted from a job description.
/// `keywords` is the flat union used downstream; the three category lists
/// are informational.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractedKeywords {
    pub keywords: Vec<String>,
    pub technical: Vec<String>,
    pub soft_skills: Vec<String>,
    pub qualifications: Vec<String>,
}

/// Where a corpus entry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Experience,
    Project,
    SkillGroup,
}

/// One flattened, lowercase searchable unit of CMS content.
/// Derived and ephemeral — rebuilt on every analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub text: String,
    pub source_type: SourceType,
    pub item_id: String,
}

/// Reference to a matched content item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub source_type: SourceType,
    pub item_id: String,
}

/// Keyword → matched items association. Kept as an ordered list rather than
/// a map so iteration follows first-seen keyword order deterministically.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub items: Vec<ItemRef>,
}

/// Coverage of extracted JD keywords against the candidate's corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageResult {
    /// matched / total keywords; 0.0 when the keyword list is empty.
    pub score: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub keyword_matches: Vec<KeywordMatch>,
}

impl CoverageResult {
    pub fn empty() -> Self {
        Self {
            score: 0.0,
            matched_keywords: vec![],
            missing_keywords: vec![],
            keyword_matches: vec![],
        }
    }

    /// Items associated with a matched keyword, if any.
    pub fn items_for(&self, keyword: &str) -> Option<&[ItemRef]> {
        self.keyword_matches
            .iter()
            .find(|m| m.keyword == keyword)
            .map(|m| m.items.as_slice())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Suggestions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionType {
    IncludeExperience,
    IncludeProject,
    IncludeSkillGroup,
    Emphasize,
}

/// A recommendation to include or emphasize one content item.
/// At most one suggestion per item id per run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub suggestion_type: SuggestionType,
    pub item_id: String,
    pub reason: String,
}
