use std::time::Duration;
use serde::Deserialize;
use log::{debug, trace, error};

use crate::config::{ProviderConfig, TransportConfig};
use crate::request::{ChatCompletionRequest, ChatCompletionResponse};

// ===== Model List Types =====

/// Either the OpenAI `/v1/models` shape or Ollama's `/api/tags`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum ModelsResponse
{   OpenAi
    {   data: Vec<OpenAiModel>
    }
  , Ollama
    {   models: Vec<OllamaModel>
    }
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAiModel
{   id: String
}

#[derive(Debug, Clone, Deserialize)]
struct OllamaModel
{   name: String
}

impl ModelsResponse
{   fn into_names(self) -> Vec<String>
    {   match self
        {   ModelsResponse::OpenAi { data } => {
              data.into_iter().map(|m| m.id).collect()
            }
          , ModelsResponse::Ollama { models } => {
              models.into_iter().map(|m| m.name).collect()
            }
        }
    }
}

// ===== HTTP Transport =====

/// OpenAI-compatible HTTP transport; also serves Ollama, which
/// exposes the same endpoints under `/v1`
pub struct HttpTransport
{   http_client: reqwest::Client
}

impl HttpTransport
{   pub fn new(config: &TransportConfig)
      -> Result<Self, crate::error::Error>
    {   debug!(
          "Creating HttpTransport with timeout: {:?}",
          config.timeout_secs
        );
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs
        {   builder = builder.timeout(Duration::from_secs(secs));
        }
        let http_client = builder.build().map_err(|e| {
          error!("Failed to build HTTP client: {}", e);
          crate::error::Error::InvalidConfiguration(e.to_string())
        })?;
        Ok(HttpTransport { http_client })
    }

    fn with_headers(
      builder: reqwest::RequestBuilder
    , provider: &ProviderConfig
    ) -> reqwest::RequestBuilder
    {   provider.headers
          .iter()
          .fold(builder, |b, (name, value)| {
            b.header(name.as_str(), value.as_str())
          })
    }

    async fn send(
      builder: reqwest::RequestBuilder
    ) -> Result<reqwest::Response, crate::error::Error>
    {   let response = builder
          .send()
          .await
          .map_err(|e| {
            error!("HTTP error: {}", e);
            if e.is_timeout()
            {   crate::error::Error::Timeout
            } else
            {   crate::error::Error::HttpError(e.to_string())
            }
          })?;

        let status = response.status();
        trace!("Response status: {}", status);

        if !status.is_success()
        {   let error_text = response.text().await
              .unwrap_or_else(|_|
                "Unknown error".to_string()
              );
            error!("API error {}: {}", status, error_text);
            return Err(crate::error::Error::ApiError(
              format!("{}: {}", status, error_text)
            ));
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl super::CompletionTransport for HttpTransport
{   async fn get_models_list(&self, provider: &ProviderConfig)
      -> Result<Vec<String>, crate::error::Error>
    {   let url = provider.endpoint_url(&provider.models_endpoint);
        debug!("Fetching models from {}", url);

        let builder = Self::with_headers(
          self.http_client.get(&url),
          provider
        );
        let response = Self::send(builder).await?;

        let models: ModelsResponse
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::ParseError(e.to_string())
          })?;

        let model_names = models.into_names();
        debug!("Retrieved {} models", model_names.len());
        Ok(model_names)
    }

    async fn get_completion_response(
      &self
    , provider: &ProviderConfig
    , request: &ChatCompletionRequest
    ) -> Result<String, crate::error::Error>
    {   let url = provider.endpoint_url(&provider.completion_endpoint);
        debug!(
          "Requesting completion from {} with model {}",
          url, request.model
        );
        trace!("Completion request: {:?}", request);

        let builder = Self::with_headers(
          self.http_client.post(&url).json(request),
          provider
        );
        let response = Self::send(builder).await?;

        let chat_response: ChatCompletionResponse
          = response.json().await.map_err(|e| {
            error!("Parse error: {}", e);
            crate::error::Error::ParseError(e.to_string())
          })?;

        if let Some(usage) = &chat_response.usage
        {   debug!(
              "Token usage: prompt={} completion={} total={}",
              usage.prompt_tokens,
              usage.completion_tokens,
              usage.total_tokens
            );
        }

        chat_response.choices
          .into_iter()
          .next()
          .map(|c| c.message.content)
          .ok_or_else(|| {
            error!("No choices in response");
            crate::error::Error::NoChoicesInResponse
          })
    }
}
