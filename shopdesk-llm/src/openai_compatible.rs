//! Generic OpenAI-compatible chat completion client
//!
//! Works with any provider exposing OpenAI's `/chat/completions` format
//! (Groq, OpenAI, Together, local gateways).

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use shopdesk_core::{GenerationParams, LlmError};
use url::Url;

use crate::Llm;

/// Request body for the chat completions endpoint
#[derive(Serialize, Debug, Clone)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub stream: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Non-streaming response from chat completions
#[derive(Deserialize, Debug, Clone)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub model: String,
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Choice {
    pub index: u32,
    pub message: ResponseMessage,
    pub finish_reason: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ResponseMessage {
    pub role: String,
    pub content: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// OpenAI-style error response
#[derive(Deserialize, Debug, Clone)]
pub struct OpenAiError {
    pub error: ErrorDetail,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: Option<String>,
    pub code: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    endpoint: String,
    api_key: SecretString,
    model: String,
    params: GenerationParams,
    http: Client,
}

impl std::fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("params", &self.params)
            .finish()
    }
}

impl OpenAiCompatibleClient {
    pub fn builder() -> OpenAiCompatibleBuilder {
        OpenAiCompatibleBuilder::default()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn params(&self) -> &GenerationParams {
        &self.params
    }

    fn request_body(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
            top_p: self.params.top_p,
            // Completions are always requested whole; the agent loop parses
            // complete turns only.
            stream: false,
        }
    }

    fn transport_error(&self, err: reqwest::Error) -> LlmError {
        if err.is_timeout() {
            LlmError::Timeout(self.params.timeout)
        } else {
            LlmError::Unknown(err.without_url().to_string())
        }
    }

    fn status_error(&self, status: StatusCode, body: &str) -> LlmError {
        let message = serde_json::from_str::<OpenAiError>(body)
            .map(|e| e.error.message)
            .unwrap_or_else(|_| body.trim().to_string());
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Auth(message),
            StatusCode::TOO_MANY_REQUESTS => LlmError::RateLimited(message),
            StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
                LlmError::Timeout(self.params.timeout)
            }
            StatusCode::CONFLICT => LlmError::Unknown(format!("HTTP {status}: {message}")),
            _ if status.is_client_error() => LlmError::Rejected(format!("HTTP {status}: {message}")),
            _ => LlmError::Unknown(format!("HTTP {status}: {message}")),
        }
    }
}

#[async_trait]
impl Llm for OpenAiCompatibleClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.status_error(status, &body));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| self.transport_error(err))?;

        tracing::debug!(
            model = %self.model,
            total_tokens = completion.usage.as_ref().map(|u| u.total_tokens),
            "chat completion received"
        );

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| LlmError::Unknown("response contained no choices".to_string()))
    }
}

#[derive(Default)]
pub struct OpenAiCompatibleBuilder {
    base_url: Option<Url>,
    api_key: Option<SecretString>,
    model: Option<String>,
    params: GenerationParams,
}

impl OpenAiCompatibleBuilder {
    pub fn base_url(mut self, base_url: &str) -> Result<Self, LlmError> {
        let url = Url::parse(base_url)
            .map_err(|err| LlmError::Unknown(format!("invalid base url {base_url:?}: {err}")))?;
        self.base_url = Some(url);
        Ok(self)
    }

    pub fn api_key(mut self, api_key: SecretString) -> Self {
        self.api_key = Some(api_key);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn params(mut self, params: GenerationParams) -> Self {
        self.params = params;
        self
    }

    pub fn build(self) -> Result<OpenAiCompatibleClient, LlmError> {
        let base_url = self
            .base_url
            .ok_or_else(|| LlmError::Unknown("base url is required".to_string()))?;
        let api_key = self
            .api_key
            .filter(|key| !key.expose_secret().trim().is_empty())
            .ok_or_else(|| LlmError::Auth("API key not set".to_string()))?;
        let model = self
            .model
            .filter(|model| !model.trim().is_empty())
            .ok_or_else(|| LlmError::Unknown("model identifier is required".to_string()))?;

        let http = Client::builder()
            .timeout(self.params.timeout)
            .build()
            .map_err(|err| LlmError::Unknown(err.to_string()))?;

        Ok(OpenAiCompatibleClient {
            endpoint: format!("{}/chat/completions", base_url.as_str().trim_end_matches('/')),
            api_key,
            model,
            params: self.params,
            http,
        })
    }
}
