//! Check engine orchestrator — runs every heuristic check, groups results
//! by category, and computes the aggregate score.
//!
//! Every check is total over its input domain: empty sections, missing
//! summaries, and zero bullets are handled branches, never panics. This
//! module therefore never fails.

pub mod format;
pub mod keywords;
pub mod parsability;
pub mod readability;

use chrono::Utc;
use tracing::debug;

use crate::models::analysis::{
    CategorySummary, Check, CheckCategory, CheckResult, CheckStatus, CoverageResult,
};
use crate::models::resume::ResumeData;

/// Checks that always run, regardless of JD analysis: P1–P7, R1–R7, F1–F4.
pub const BASE_CHECK_COUNT: usize = 18;
/// Full battery when a coverage result is supplied (adds K1–K3).
pub const FULL_CHECK_COUNT: usize = 21;

/// Runs the full check battery against an assembled resume and its rendered
/// HTML. Keyword checks only run when `coverage` is supplied; without it the
/// keywords category is absent entirely.
pub fn run_checks(
    resume: &ResumeData,
    html: &str,
    coverage: Option<&CoverageResult>,
) -> CheckResult {
    let mut checks: Vec<Check> = Vec::with_capacity(FULL_CHECK_COUNT);
    checks.extend(parsability::run(resume, html));
    checks.extend(keywords::run(resume, coverage));
    checks.extend(readability::run(resume));
    checks.extend(format::run(resume));

    let categories: Vec<CategorySummary> = CheckCategory::ORDERED
        .iter()
        .filter_map(|category| summarize_category(*category, &checks))
        .collect();

    let total_checks = checks.len();
    let total_passed = count_status(&checks, CheckStatus::Pass);
    let total_warned = count_status(&checks, CheckStatus::Warning);
    let total_failed = count_status(&checks, CheckStatus::Fail);
    let score = compute_score(total_passed, total_warned, total_checks);

    debug!(
        "check run: score={score} ({total_passed} passed, {total_warned} warned, {total_failed} failed)"
    );

    CheckResult {
        score,
        categories,
        total_checks,
        total_passed,
        total_warned,
        total_failed,
        checked_at: Utc::now(),
    }
}

/// `round(((passed + 0.5*warned) / total) * 100)`; 0 for an empty battery.
/// Bounded to [0, 100] by construction.
fn compute_score(passed: usize, warned: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (((passed as f64 + warned as f64 * 0.5) / total as f64) * 100.0).round() as u32
}

fn count_status(checks: &[Check], status: CheckStatus) -> usize {
    checks.iter().filter(|c| c.status == status).count()
}

/// Rolls up one category, preserving check order. Empty categories are
/// omitted from the report.
fn summarize_category(category: CheckCategory, checks: &[Check]) -> Option<CategorySummary> {
    let members: Vec<Check> = checks
        .iter()
        .filter(|c| c.category == category)
        .cloned()
        .collect();
    if members.is_empty() {
        return None;
    }
    Some(CategorySummary {
        id: category.id().to_string(),
        label: category.label().to_string(),
        passed: count_status(&members, CheckStatus::Pass),
        warned: count_status(&members, CheckStatus::Warning),
        failed: count_status(&members, CheckStatus::Fail),
        total: members.len(),
        checks: members,
    })
}
