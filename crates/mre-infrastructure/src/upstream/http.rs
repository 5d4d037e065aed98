//! HTTP Upstream Client
//!
//! One pooled reqwest client serving every configured provider. Each
//! provider type maps to a request/response dialect; transport and HTTP
//! failures are classified into the domain [`ErrorClass`] taxonomy so
//! the dispatcher never sees a raw transport error.

use crate::constants::{
    ANTHROPIC_API_VERSION, HTTP_CLIENT_IDLE_TIMEOUT_SECS, HTTP_CONNECT_TIMEOUT_SECS,
    HTTP_MAX_IDLE_PER_HOST,
};
use crate::utils::TimedOperation;
use async_trait::async_trait;
use mre_domain::error::{Error, Result};
use mre_domain::ports::providers::upstream::{UpstreamClient, UpstreamResponse};
use mre_domain::value_objects::credential::ResolvedCredential;
use mre_domain::value_objects::model::ModelSpec;
use mre_domain::value_objects::provider::{Provider, ProviderType};
use mre_domain::value_objects::request::{CompletionRequest, MessageRole};
use mre_domain::value_objects::usage::{ErrorClass, TokenUsage};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// Reqwest-backed implementation of the upstream port
pub struct HttpUpstreamClient {
    client: reqwest::Client,
}

impl HttpUpstreamClient {
    /// Build the pooled client
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .pool_idle_timeout(Duration::from_secs(HTTP_CLIENT_IDLE_TIMEOUT_SECS))
            .pool_max_idle_per_host(HTTP_MAX_IDLE_PER_HOST)
            .build()
            .map_err(|err| {
                Error::infrastructure_with_source("Failed to build HTTP client", err)
            })?;
        Ok(Self { client })
    }

    fn build_request(
        &self,
        provider: &Provider,
        model: &ModelSpec,
        credential: &ResolvedCredential,
        request: &CompletionRequest,
    ) -> reqwest::RequestBuilder {
        let base = provider.base_url.trim_end_matches('/');
        match provider.provider_type {
            ProviderType::OpenAi | ProviderType::Mistral | ProviderType::OpenAiCompatible => {
                let messages: Vec<Value> = request
                    .messages
                    .iter()
                    .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
                    .collect();
                let mut body = json!({ "model": model.id, "messages": messages });
                if let Some(max) = request.max_output_tokens {
                    body["max_tokens"] = json!(max);
                }
                if let Some(temperature) = request.temperature {
                    body["temperature"] = json!(temperature);
                }
                self.client
                    .post(format!("{}/chat/completions", base))
                    .bearer_auth(&credential.secret)
                    .json(&body)
            }
            ProviderType::Anthropic => {
                let system: Vec<&str> = request
                    .messages
                    .iter()
                    .filter(|m| m.role == MessageRole::System)
                    .map(|m| m.content.as_str())
                    .collect();
                let messages: Vec<Value> = request
                    .messages
                    .iter()
                    .filter(|m| m.role != MessageRole::System)
                    .map(|m| json!({ "role": m.role.as_str(), "content": m.content }))
                    .collect();
                let mut body = json!({
                    "model": model.id,
                    // The messages dialect requires an explicit cap.
                    "max_tokens": request.max_output_tokens.unwrap_or(1024),
                    "messages": messages,
                });
                if !system.is_empty() {
                    body["system"] = json!(system.join("\n"));
                }
                if let Some(temperature) = request.temperature {
                    body["temperature"] = json!(temperature);
                }
                self.client
                    .post(format!("{}/v1/messages", base))
                    .header("x-api-key", &credential.secret)
                    .header("anthropic-version", ANTHROPIC_API_VERSION)
                    .json(&body)
            }
            ProviderType::Google => {
                let contents: Vec<Value> = request
                    .messages
                    .iter()
                    .filter(|m| m.role != MessageRole::System)
                    .map(|m| {
                        let role = if m.role == MessageRole::Assistant {
                            "model"
                        } else {
                            "user"
                        };
                        json!({ "role": role, "parts": [{ "text": m.content }] })
                    })
                    .collect();
                let mut body = json!({ "contents": contents });
                let system: Vec<&str> = request
                    .messages
                    .iter()
                    .filter(|m| m.role == MessageRole::System)
                    .map(|m| m.content.as_str())
                    .collect();
                if !system.is_empty() {
                    body["systemInstruction"] =
                        json!({ "parts": [{ "text": system.join("\n") }] });
                }
                let mut generation = serde_json::Map::new();
                if let Some(max) = request.max_output_tokens {
                    generation.insert("maxOutputTokens".to_string(), json!(max));
                }
                if let Some(temperature) = request.temperature {
                    generation.insert("temperature".to_string(), json!(temperature));
                }
                if !generation.is_empty() {
                    body["generationConfig"] = Value::Object(generation);
                }
                self.client
                    .post(format!(
                        "{}/v1beta/models/{}:generateContent",
                        base, model.id
                    ))
                    .query(&[("key", credential.secret.as_str())])
                    .json(&body)
            }
        }
    }

    fn parse_response(provider: &Provider, body: &Value) -> Result<(String, TokenUsage)> {
        let malformed = |field: &str| {
            Error::upstream(
                &provider.name,
                ErrorClass::ServerError,
                format!("unexpected upstream response shape: missing {}", field),
            )
        };
        match provider.provider_type {
            ProviderType::OpenAi | ProviderType::Mistral | ProviderType::OpenAiCompatible => {
                let content = body["choices"][0]["message"]["content"]
                    .as_str()
                    .ok_or_else(|| malformed("choices[0].message.content"))?
                    .to_string();
                let usage = TokenUsage::new(
                    count(&body["usage"]["prompt_tokens"]),
                    count(&body["usage"]["completion_tokens"]),
                );
                Ok((content, usage))
            }
            ProviderType::Anthropic => {
                let content = body["content"][0]["text"]
                    .as_str()
                    .ok_or_else(|| malformed("content[0].text"))?
                    .to_string();
                let usage = TokenUsage::new(
                    count(&body["usage"]["input_tokens"]),
                    count(&body["usage"]["output_tokens"]),
                );
                Ok((content, usage))
            }
            ProviderType::Google => {
                let content = body["candidates"][0]["content"]["parts"][0]["text"]
                    .as_str()
                    .ok_or_else(|| malformed("candidates[0].content.parts[0].text"))?
                    .to_string();
                let usage = TokenUsage::new(
                    count(&body["usageMetadata"]["promptTokenCount"]),
                    count(&body["usageMetadata"]["candidatesTokenCount"]),
                );
                Ok((content, usage))
            }
        }
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn complete(
        &self,
        provider: &Provider,
        model: &ModelSpec,
        credential: &ResolvedCredential,
        request: &CompletionRequest,
        timeout: Duration,
    ) -> Result<UpstreamResponse> {
        let timer = TimedOperation::start();
        debug!(
            provider = %provider.name,
            model = %model.id,
            dialect = %provider.provider_type,
            "issuing upstream call"
        );

        let response = self
            .build_request(provider, model, credential, request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|err| {
                Error::upstream(
                    &provider.name,
                    classify_transport(&err),
                    format!("transport failure: {}", err),
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::upstream(
                &provider.name,
                classify_status(status),
                format!("upstream returned HTTP {}", status.as_u16()),
            ));
        }

        let body: Value = response.json().await.map_err(|err| {
            Error::upstream(
                &provider.name,
                ErrorClass::ServerError,
                format!("failed to decode upstream body: {}", err),
            )
        })?;

        let (content, usage) = Self::parse_response(provider, &body)?;
        Ok(UpstreamResponse {
            content,
            usage,
            latency_ms: timer.elapsed_ms(),
        })
    }
}

fn count(value: &Value) -> u32 {
    value.as_u64().unwrap_or(0) as u32
}

fn classify_status(status: StatusCode) -> ErrorClass {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ErrorClass::AuthRejected,
        StatusCode::TOO_MANY_REQUESTS => ErrorClass::RateLimited,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => ErrorClass::Timeout,
        status if status.is_client_error() => ErrorClass::BadRequest,
        _ => ErrorClass::ServerError,
    }
}

fn classify_transport(err: &reqwest::Error) -> ErrorClass {
    if err.is_timeout() {
        ErrorClass::Timeout
    } else {
        ErrorClass::ServerError
    }
}
