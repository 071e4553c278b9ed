//! Gemini REST bridge.
//!
//! Thin wrapper over the `generateContent` endpoint: builds the request
//! body, extracts the first candidate's text, trims surrounding whitespace.
//! Nothing deeper of the provider's response format is interpreted here.
//!
//! Answers are memoized in-memory per client, keyed by a SHA-256 of
//! `(model, prompt)` — disposable request-scope caching, nothing persisted.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use serde::Deserialize;
use serde_json::json;
use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use careerguide_shared::{CareerGuideError, GeminiSettings, Result};

/// User-Agent string for bridge requests.
const USER_AGENT: &str = concat!("CareerGuide/", env!("CARGO_PKG_VERSION"));

/// Request timeout for generation calls. Generation is slower than a page
/// fetch, so this is looser than the scrape-side timeout.
const REQUEST_TIMEOUT_SECS: u64 = 60;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Explicit per-client configuration. The API key is a value handed in at
/// construction time, never read from process-global state.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key for the `key=` query parameter.
    pub api_key: String,
    /// Model identifier, e.g. `gemini-2.0-flash-lite`.
    pub model: String,
    /// Endpoint root, e.g. `https://generativelanguage.googleapis.com/v1beta/models`.
    pub endpoint: String,
}

impl GeminiConfig {
    /// Build a config from the settings section plus a resolved key.
    pub fn from_settings(settings: &GeminiSettings, api_key: String) -> Self {
        Self {
            api_key,
            model: settings.model.clone(),
            endpoint: settings.endpoint.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Response shapes (only the fields we read)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Gemini `generateContent` client with an in-memory answer memo.
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
    memo: Mutex<HashMap<String, String>>,
}

impl GeminiClient {
    /// Create a client for the given configuration.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| CareerGuideError::Llm(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            config,
            memo: Mutex::new(HashMap::new()),
        })
    }

    /// Model identifier this client generates with.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Generate text for a prompt. Identical prompts within this client's
    /// lifetime return the memoized answer without a second call.
    #[instrument(skip_all, fields(model = %self.config.model, prompt_len = prompt.len()))]
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let key = prompt_key(&self.config.model, prompt);

        if let Some(cached) = self.memo.lock().expect("memo poisoned").get(&key) {
            debug!("answer memo hit");
            return Ok(cached.clone());
        }

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model,
            self.config.api_key,
        );

        let body = json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CareerGuideError::Llm(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(CareerGuideError::Llm(format!(
                "provider returned HTTP {status}: {error_body}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CareerGuideError::Llm(format!("invalid response body: {e}")))?;

        let text = extract_text(&parsed)?;

        info!(answer_len = text.len(), "generation complete");
        self.memo
            .lock()
            .expect("memo poisoned")
            .insert(key, text.clone());

        Ok(text)
    }
}

/// Pull the first candidate's first part out of the response, trimmed.
fn extract_text(response: &GenerateResponse) -> Result<String> {
    response
        .candidates
        .first()
        .and_then(|c| c.content.parts.first())
        .map(|p| p.text.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| CareerGuideError::Llm("response carried no candidate text".into()))
}

/// Memo key: SHA-256 over model + prompt.
fn prompt_key(model: &str, prompt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(model.as_bytes());
    hasher.update(prompt.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(endpoint: String) -> GeminiConfig {
        GeminiConfig {
            api_key: "test-key".into(),
            model: "gemini-2.0-flash-lite".into(),
            endpoint,
        }
    }

    #[test]
    fn prompt_key_deterministic() {
        let k1 = prompt_key("gemini-2.0-flash-lite", "Quem é você?");
        let k2 = prompt_key("gemini-2.0-flash-lite", "Quem é você?");
        assert_eq!(k1, k2);
    }

    #[test]
    fn prompt_key_differs_by_model() {
        let k1 = prompt_key("gemini-2.0-flash-lite", "pergunta");
        let k2 = prompt_key("gemini-2.0-flash", "pergunta");
        assert_ne!(k1, k2);
    }

    #[test]
    fn extract_text_trims_whitespace() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"  resposta \n"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(&response).unwrap(), "resposta");
    }

    #[test]
    fn extract_text_rejects_empty_candidates() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(extract_text(&response).is_err());

        let response: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
        assert!(extract_text(&response).is_err());
    }

    #[tokio::test]
    async fn generate_calls_endpoint_and_parses_answer() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path(
                "/gemini-2.0-flash-lite:generateContent",
            ))
            .and(wiremock::matchers::query_param("key", "test-key"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(
                r#"{"candidates":[{"content":{"parts":[{"text":"Data Science trabalha com dados."}]}}]}"#,
            ))
            .mount(&server)
            .await;

        let client = GeminiClient::new(test_config(server.uri())).unwrap();
        let answer = client.generate("O que faz Data Science?").await.unwrap();
        assert_eq!(answer, "Data Science trabalha com dados.");
    }

    #[tokio::test]
    async fn generate_memoizes_identical_prompts() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(
                r#"{"candidates":[{"content":{"parts":[{"text":"resposta"}]}}]}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let client = GeminiClient::new(test_config(server.uri())).unwrap();
        let first = client.generate("mesma pergunta").await.unwrap();
        let second = client.generate("mesma pergunta").await.unwrap();
        assert_eq!(first, second);
        // wiremock verifies the expect(1) mount on drop
    }

    #[tokio::test]
    async fn generate_surfaces_provider_error() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(
                wiremock::ResponseTemplate::new(429)
                    .set_body_string(r#"{"error":{"message":"quota exceeded"}}"#),
            )
            .mount(&server)
            .await;

        let client = GeminiClient::new(test_config(server.uri())).unwrap();
        let err = client.generate("pergunta").await.unwrap_err();
        assert!(err.to_string().contains("429"));
    }
}
