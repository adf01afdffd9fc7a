//! Prompt assembly and the text-generation client.
//!
//! [`ReadmeGenerator`] is the seam for the external generation provider;
//! [`GeminiClient`] implements it against the `generateContent` endpoint.
//! The API key comes from the environment only, never from source.

use std::fmt;

use async_trait::async_trait;
#[cfg(any(test, feature = "test-export-mocks"))]
use mockall::automock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::ConfigError;

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Environment variable holding the generation API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

/// Wraps the aggregated repository text in the fixed instruction template.
pub fn build_prompt(aggregated: &str) -> String {
    format!(
        "Create a README.md for this GitHub repository. Here are all the code files:\n\n\
         {aggregated}\n\n\
         Make it comprehensive but not too long. Include installation, usage, and any \
         important info, make sure to use proper GitHub markdown syntax"
    )
}

#[derive(Debug)]
pub enum GenerateError {
    /// Aggregation produced no text; checked before any network call.
    NoEligibleFiles,
    Http(u16),
    Transport(reqwest::Error),
    /// The response did not contain the expected candidate text field.
    MalformedResponse,
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::NoEligibleFiles => {
                write!(f, "no eligible source files found in the repository")
            }
            GenerateError::Http(status) => write!(f, "generation API error: HTTP {status}"),
            GenerateError::Transport(e) => write!(f, "generation request failed: {e}"),
            GenerateError::MalformedResponse => {
                write!(f, "unexpected response format from the generation API")
            }
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Transport(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GenerateError {
    fn from(e: reqwest::Error) -> Self {
        GenerateError::Transport(e)
    }
}

/// Turns aggregated repository text into a generated README document.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait ReadmeGenerator: Send + Sync {
    async fn generate(&self, aggregated: &str) -> Result<String, GenerateError>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Client for the `generateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Builds a client from `GEMINI_API_KEY` (dotenv-loadable).
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(API_KEY_VAR) {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key)),
            _ => Err(ConfigError::MissingApiKey(API_KEY_VAR.to_string())),
        }
    }

    /// Point the client at a different API host. Used by tests.
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

#[async_trait]
impl ReadmeGenerator for GeminiClient {
    async fn generate(&self, aggregated: &str) -> Result<String, GenerateError> {
        if aggregated.trim().is_empty() {
            return Err(GenerateError::NoEligibleFiles);
        }

        let prompt = build_prompt(aggregated);
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
        };

        debug!(model = %self.model, prompt_chars = prompt.len(), "Calling generation endpoint");
        let response = self.http.post(self.generate_url()).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GenerateError::Http(status.as_u16()));
        }

        let raw = response.text().await?;
        let parsed: GenerateResponse =
            serde_json::from_str(&raw).map_err(|_| GenerateError::MalformedResponse)?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .ok_or(GenerateError::MalformedResponse)?;

        info!(chars = text.len(), "Generation completed");
        Ok(text)
    }
}
