//! Client for the Gemini `generateContent` endpoint.
//!
//! One call in, one text reply out. Replies that do not have the
//! `candidates[0].content.parts[0].text` shape are reported as
//! [`RelayError::Parse`] rather than turned into an empty reply.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

/// Upstream error bodies are cut to this many characters before reaching a client.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Google API key not configured")]
    Configuration,

    #[error("Error communicating with Google AI Studio: {0}")]
    Transport(String),

    #[error("Error parsing Google AI Studio response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        // The URL carries the key as a query parameter.
        RelayError::Transport(err.without_url().to_string())
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

impl<'a> GenerateContentRequest<'a> {
    fn single_turn(message: &'a str) -> Self {
        Self {
            contents: vec![Content {
                parts: vec![Part { text: message }],
            }],
        }
    }
}

#[derive(Debug, Clone)]
pub struct RelayClient {
    client: Client,
    api_key: Option<String>,
    api_base: String,
    model: String,
}

impl RelayClient {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn api_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.api_base, self.model)
    }

    /// Send `message` upstream and return the first candidate's text.
    pub async fn generate(&self, message: &str) -> Result<String, RelayError> {
        self.send(message).await.inspect_err(|err| {
            tracing::warn!(model = %self.model, error = %err, "Gemini request failed");
        })
    }

    async fn send(&self, message: &str) -> Result<String, RelayError> {
        let api_key = self.api_key.as_deref().ok_or(RelayError::Configuration)?;

        tracing::debug!(
            model = %self.model,
            message_len = message.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.api_url())
            .query(&[("key", api_key)])
            .json(&GenerateContentRequest::single_turn(message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    tracing::debug!(error = %e.without_url(), "failed to read upstream error body");
                    String::new()
                }
            };
            return Err(RelayError::Transport(format!(
                "upstream returned {}: {}",
                status,
                truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS)
            )));
        }

        let body = response.bytes().await?;
        extract_reply(&body)
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

fn extract_reply(body: &[u8]) -> Result<String, RelayError> {
    let reply: GenerateContentResponse =
        serde_json::from_slice(body).map_err(|e| RelayError::Parse(e.to_string()))?;

    let candidate = reply
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| RelayError::Parse("no candidates in response".to_string()))?;

    candidate
        .content
        .parts
        .into_iter()
        .next()
        .map(|p| p.text)
        .ok_or_else(|| RelayError::Parse("candidate has no content parts".to_string()))
}
