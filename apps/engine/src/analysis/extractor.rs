//! Keyword extractor — one LLM call (plus at most one retry with a shortened
//! JD) that turns a job description into a validated [`ExtractedKeywords`].
//!
//! Fail-closed: either the response validates completely or the whole
//! extraction fails with a typed error. No partial keyword sets.

use serde_json::Value;
use tracing::warn;

use crate::analysis::sanitize::sanitize_job_description;
use crate::errors::JdAnalysisError;
use crate::llm_client::prompts::{
    KEYWORD_EXTRACTION_PROMPT_TEMPLATE, KEYWORD_EXTRACTION_SYSTEM, SHORTENED_RETRY_PREFIX,
};
use crate::llm_client::{strip_json_fences, LlmClient};
use crate::models::analysis::ExtractedKeywords;

/// JD length used for the shortened retry, in chars.
const SHORTENED_JD_CHARS: usize = 3_000;

/// Extracts keywords from a job description via the Anthropic API.
///
/// The JD is sanitized before prompting. If the first response fails to
/// parse, the call is retried once with the first 3,000 chars of the JD and
/// an explicit "shortened" framing; a second parse failure is a
/// [`JdAnalysisError::Parse`]. Network and API failures are not retried.
pub async fn extract_keywords(
    job_description: &str,
    api_key: &str,
) -> Result<ExtractedKeywords, JdAnalysisError> {
    let client = LlmClient::new(api_key)?;
    extract_with_client(job_description, &client).await
}

/// The attempt sequence, separated from client construction so it can run
/// against any endpoint the client was built for.
async fn extract_with_client(
    job_description: &str,
    client: &LlmClient,
) -> Result<ExtractedKeywords, JdAnalysisError> {
    let jd = sanitize_job_description(job_description);

    let prompt = KEYWORD_EXTRACTION_PROMPT_TEMPLATE.replace("{jd_text}", &jd);
    let text = client.complete(&prompt, KEYWORD_EXTRACTION_SYSTEM).await?;
    if let Some(keywords) = parse_keyword_response(&text) {
        return Ok(keywords);
    }

    warn!("keyword extraction response failed to parse, retrying with shortened JD");
    let shortened: String = jd.chars().take(SHORTENED_JD_CHARS).collect();
    let retry_prompt = format!(
        "{SHORTENED_RETRY_PREFIX}{}",
        KEYWORD_EXTRACTION_PROMPT_TEMPLATE.replace("{jd_text}", &shortened)
    );
    let text = client
        .complete(&retry_prompt, KEYWORD_EXTRACTION_SYSTEM)
        .await?;
    parse_keyword_response(&text).ok_or(JdAnalysisError::Parse)
}

/// Parse-then-validate: locates the first brace-balanced JSON object in the
/// response text and checks the [`ExtractedKeywords`] shape. Non-string
/// array entries are discarded; a missing or mistyped field fails the parse.
pub fn parse_keyword_response(text: &str) -> Option<ExtractedKeywords> {
    let text = strip_json_fences(text);
    let json = first_json_object(text)?;
    let value: Value = serde_json::from_str(&json).ok()?;

    Some(ExtractedKeywords {
        keywords: string_array(&value, "keywords")?,
        technical: string_array(&value, "technical")?,
        soft_skills: string_array(&value, "soft_skills")?,
        qualifications: string_array(&value, "qualifications")?,
    })
}

/// The field must exist and be an array; entries that are not strings are
/// dropped rather than failing the whole parse.
fn string_array(value: &Value, field: &str) -> Option<Vec<String>> {
    let array = value.get(field)?.as_array()?;
    Some(
        array
            .iter()
            .filter_map(|v| v.as_str())
            .map(|s| s.to_string())
            .collect(),
    )
}

/// Extracts the first brace-balanced `{...}` span, tracking JSON string
/// literals so braces inside strings do not affect the depth count.
fn first_json_object(text: &str) -> Option<String> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(text[start..start + i + c.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_RESPONSE: &str = r#"{
        "keywords": ["React", "TypeScript", "communication"],
        "technical": ["React", "TypeScript"],
        "soft_skills": ["communication"],
        "qualifications": []
    }"#;

    #[test]
    fn test_parse_valid_response() {
        let parsed = parse_keyword_response(VALID_RESPONSE).unwrap();
        assert_eq!(parsed.keywords.len(), 3);
        assert_eq!(parsed.technical, vec!["React", "TypeScript"]);
        assert!(parsed.qualifications.is_empty());
    }

    #[test]
    fn test_parse_response_wrapped_in_fences() {
        let wrapped = format!("```json\n{VALID_RESPONSE}\n```");
        assert!(parse_keyword_response(&wrapped).is_some());
    }

    #[test]
    fn test_parse_response_with_surrounding_prose() {
        let noisy = format!("Here are the keywords you asked for:\n{VALID_RESPONSE}\nHope that helps!");
        let parsed = parse_keyword_response(&noisy).unwrap();
        assert_eq!(parsed.keywords.len(), 3);
    }

    #[test]
    fn test_parse_discards_non_string_entries() {
        let response = r#"{
            "keywords": ["React", 42, null, "Rust"],
            "technical": ["Rust"],
            "soft_skills": [],
            "qualifications": [{"x": 1}]
        }"#;
        let parsed = parse_keyword_response(response).unwrap();
        assert_eq!(parsed.keywords, vec!["React", "Rust"]);
        assert!(parsed.qualifications.is_empty());
    }

    #[test]
    fn test_parse_fails_on_missing_field() {
        let response = r#"{"keywords": ["React"], "technical": []}"#;
        assert!(parse_keyword_response(response).is_none());
    }

    #[test]
    fn test_parse_fails_on_mistyped_field() {
        let response = r#"{
            "keywords": "React",
            "technical": [],
            "soft_skills": [],
            "qualifications": []
        }"#;
        assert!(parse_keyword_response(response).is_none());
    }

    #[test]
    fn test_parse_fails_on_no_json_at_all() {
        assert!(parse_keyword_response("I cannot help with that.").is_none());
    }

    #[test]
    fn test_first_json_object_ignores_braces_in_strings() {
        let text = r#"{"keywords": ["a } b"], "technical": [], "soft_skills": [], "qualifications": []}"#;
        let parsed = parse_keyword_response(text).unwrap();
        assert_eq!(parsed.keywords, vec!["a } b"]);
    }

    #[test]
    fn test_first_json_object_picks_first_of_several() {
        let text = r#"{"a": 1} {"b": 2}"#;
        assert_eq!(first_json_object(text).as_deref(), Some(r#"{"a": 1}"#));
    }

    // ───────────────────────── attempt sequence ─────────────────────────

    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Minimal HTTP server answering every request with an Anthropic-shaped
    /// 200 body whose text block is `reply`, recording request bodies.
    async fn spawn_llm_stub(reply: &'static str) -> (SocketAddr, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                let (mut socket, _) = match listener.accept().await {
                    Ok(pair) => pair,
                    Err(_) => return,
                };
                let body = read_http_body(&mut socket).await;
                recorded.lock().unwrap().push(body);
                let payload = serde_json::json!({
                    "content": [{"type": "text", "text": reply}]
                })
                .to_string();
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\n\
                     content-length: {}\r\nconnection: close\r\n\r\n{}",
                    payload.len(),
                    payload
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        (addr, requests)
    }

    async fn read_http_body(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let headers = String::from_utf8_lossy(&buf[..pos]).to_ascii_lowercase();
                let content_length = headers
                    .lines()
                    .find_map(|l| l.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                while buf.len() < pos + 4 + content_length {
                    let n = socket.read(&mut chunk).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    buf.extend_from_slice(&chunk[..n]);
                }
                return String::from_utf8_lossy(&buf[pos + 4..]).to_string();
            }
        }
        String::new()
    }

    #[tokio::test]
    async fn test_unparseable_response_retries_once_with_shortened_jd() {
        let (addr, requests) = spawn_llm_stub("I cannot produce JSON today.").await;
        let client = LlmClient::with_base_url("test-key", format!("http://{addr}")).unwrap();

        // Longer than the 3,000-char retry cut so the two prompts differ.
        let jd = "distributed systems ".repeat(300);
        let err = extract_with_client(&jd, &client).await.unwrap_err();
        assert!(matches!(err, JdAnalysisError::Parse));

        let requests = requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert!(!requests[0].contains("SHORTENED to its opening section"));
        assert!(requests[1].contains("SHORTENED to its opening section"));
        // The retry carries the truncated JD, so its body is shorter.
        assert!(requests[1].len() < requests[0].len());
    }

    #[tokio::test]
    async fn test_valid_first_response_needs_no_retry() {
        let (addr, requests) = spawn_llm_stub(VALID_RESPONSE).await;
        let client = LlmClient::with_base_url("test-key", format!("http://{addr}")).unwrap();

        let extracted = extract_with_client("Senior React engineer, TypeScript required.", &client)
            .await
            .unwrap();
        assert_eq!(extracted.keywords.len(), 3);
        assert_eq!(requests.lock().unwrap().len(), 1);
    }
}
