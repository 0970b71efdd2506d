use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::CompletionService;
use crate::domain::{DomainError, GenerationParams, Prompt};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const COMPLETIONS_PATH: &str = "/chat/completions";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for OpenAI-compatible chat completion APIs (Groq by default).
///
/// Configured from the environment:
///
/// | Variable        | Default                           |
/// |-----------------|-----------------------------------|
/// | `GROQ_API_KEY`  | none; required                    |
/// | `GROQ_BASE_URL` | `https://api.groq.com/openai/v1`  |
/// | `GROQ_MODEL`    | `llama-3.3-70b-versatile`         |
///
/// One request per call, no retries. Connection failures and timeouts map to
/// [`DomainError::Transport`], non-2xx statuses to [`DomainError::Provider`],
/// and empty or undecodable bodies to [`DomainError::MalformedResponse`].
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl GroqClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::internal(format!("GroqClient: failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            url,
        })
    }

    /// Construct from environment variables. Returns `Ok(None)` when
    /// `GROQ_API_KEY` is unset or blank.
    pub fn from_env(timeout: Duration) -> Result<Option<Self>, DomainError> {
        let key = match std::env::var("GROQ_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => return Ok(None),
        };
        let base =
            std::env::var("GROQ_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = std::env::var("GROQ_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        Self::new(key, model, base, timeout).map(Some)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionService for GroqClient {
    async fn complete(
        &self,
        prompt: &Prompt,
        params: GenerationParams,
    ) -> Result<String, DomainError> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: prompt.system(),
                },
                ApiMessage {
                    role: "user",
                    content: prompt.body(),
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::transport(format!("GroqClient: request timed out: {e}"))
                } else {
                    DomainError::transport(format!("GroqClient: request failed: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("GroqClient: API returned {status}: {body}");
            return Err(DomainError::provider(
                status.as_u16(),
                format!("GroqClient: API returned {status}"),
            ));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                DomainError::transport(format!("GroqClient: timed out reading response: {e}"))
            } else {
                DomainError::malformed(format!("GroqClient: failed to parse response: {e}"))
            }
        })?;

        let content = api_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| DomainError::malformed("GroqClient: response contained no content"))?;

        debug!("GroqClient: received {} characters", content.len());
        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
