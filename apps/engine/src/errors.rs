use thiserror::Error;

/// Typed failure for JD keyword extraction. The extractor fails closed: a
/// degraded extraction is a total failure, never a partial keyword set.
///
/// Timeouts surface through the `Http` variant (the request is abandoned by
/// the client when the 15s deadline expires).
#[derive(Debug, Error)]
pub enum JdAnalysisError {
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Failed to parse LLM response")]
    Parse,
}
