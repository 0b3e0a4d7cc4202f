//! Resume analysis engine: a rule-based ATS compatibility checker plus a
//! job-description keyword-coverage analyzer.
//!
//! Two pipelines:
//! - JD text → [`sanitize_job_description`] → [`extract_keywords`] →
//!   [`score_coverage`] → [`generate_suggestions`]
//! - assembled resume + rendered HTML (+ optional coverage result) →
//!   [`run_checks`]
//!
//! Every entry point is a stateless function. Only `extract_keywords` does
//! I/O (one Anthropic API call, retried at most once with a shortened JD);
//! everything else is pure and total.

pub mod analysis;
pub mod checks;
pub mod config;
pub mod errors;
pub mod llm_client;
pub mod models;

pub use analysis::corpus::build_corpus;
pub use analysis::coverage::score_coverage;
pub use analysis::extractor::extract_keywords;
pub use analysis::sanitize::sanitize_job_description;
pub use analysis::suggestions::generate_suggestions;
pub use checks::run_checks;
pub use errors::JdAnalysisError;
