//! Keyword checks (K1–K3) — active only when a JD coverage result is
//! supplied. Each returns `None` as the not-applicable sentinel; the
//! orchestrator filters those out before aggregation.

use crate::models::analysis::{Check, CheckCategory, CheckStatus, CoverageResult};
use crate::models::resume::ResumeData;

const CATEGORY: CheckCategory = CheckCategory::Keywords;

/// K3 passes when at least this many matched keywords appear in the summary.
const SUMMARY_KEYWORD_TARGET: usize = 3;

pub fn run(resume: &ResumeData, coverage: Option<&CoverageResult>) -> Vec<Check> {
    [
        check_jd_coverage(coverage),
        check_missing_keywords(coverage),
        check_keywords_in_summary(resume, coverage),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// K1 — overall JD keyword coverage.
fn check_jd_coverage(coverage: Option<&CoverageResult>) -> Option<Check> {
    let coverage = coverage?;
    let percent = (coverage.score * 100.0).round() as u32;
    let status = if coverage.score >= 0.70 {
        CheckStatus::Pass
    } else if coverage.score >= 0.50 {
        CheckStatus::Warning
    } else {
        CheckStatus::Fail
    };
    Some(Check::new(
        "K1",
        CATEGORY,
        "JD keyword coverage",
        status,
        format!("Resume covers {percent}% of job description keywords"),
    ))
}

/// K2 — keywords the resume does not cover at all.
fn check_missing_keywords(coverage: Option<&CoverageResult>) -> Option<Check> {
    let coverage = coverage?;
    let name = "Missing keywords";
    if coverage.missing_keywords.is_empty() {
        return Some(Check::new(
            "K2",
            CATEGORY,
            name,
            CheckStatus::Pass,
            "Every extracted keyword appears somewhere in your content",
        ));
    }
    Some(
        Check::new(
            "K2",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!(
                "{} keyword(s) from the job description are missing",
                coverage.missing_keywords.len()
            ),
        )
        .with_details(coverage.missing_keywords.clone()),
    )
}

/// K3 — matched keywords should surface in the summary, the first thing
/// both the ATS and the recruiter read.
fn check_keywords_in_summary(
    resume: &ResumeData,
    coverage: Option<&CoverageResult>,
) -> Option<Check> {
    let coverage = coverage?;
    let name = "Keywords in summary";

    let summary = resume
        .summary
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if summary.is_empty() {
        return Some(Check::new(
            "K3",
            CATEGORY,
            name,
            CheckStatus::Warning,
            "Summary is empty — add one that features your strongest matched keywords",
        ));
    }

    let summary_lower = summary.to_lowercase();
    let found: Vec<String> = coverage
        .matched_keywords
        .iter()
        .filter(|k| summary_lower.contains(&k.to_lowercase()))
        .cloned()
        .collect();

    if found.len() >= SUMMARY_KEYWORD_TARGET {
        Some(Check::new(
            "K3",
            CATEGORY,
            name,
            CheckStatus::Pass,
            format!("Summary features {} matched keywords", found.len()),
        ))
    } else {
        let mut check = Check::new(
            "K3",
            CATEGORY,
            name,
            CheckStatus::Warning,
            format!(
                "Summary features only {} matched keyword(s) — aim for at least {}",
                found.len(),
                SUMMARY_KEYWORD_TARGET
            ),
        );
        if !found.is_empty() {
            check = check.with_details(found);
        }
        Some(check)
    }
}
