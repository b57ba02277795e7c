//! Configuration for providers, models, languages and transport

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_OLLAMA_BASE_URL: &str
  = "http://localhost:11434";
pub const DEFAULT_OPENAI_BASE_URL: &str
  = "http://localhost:8080";
pub const DEFAULT_MODELS_ENDPOINT: &str = "/v1/models";
pub const DEFAULT_COMPLETION_ENDPOINT: &str
  = "/v1/chat/completions";

/// Backend flavour of a provider; decides request shape details
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderType
{   /// Any OpenAI-compatible endpoint
    Custom
  , /// Ollama, which also wants sampling values under `options`
    Ollama
}

/// Provider configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig
{   /// Unique provider name
    pub provider_name: String
  , pub provider_type: ProviderType
  , /// API base URL, e.g. `http://localhost:11434`
    pub base_url: String
  , /// Path of the model listing endpoint
    pub models_endpoint: String
  , /// Path of the chat completion endpoint
    pub completion_endpoint: String
  , /// Extra headers sent with every request
    #[serde(default)]
    pub headers: HashMap<String, String>
}

impl ProviderConfig
{   /// Local Ollama server on its default port
    pub fn ollama_default() -> Self
    {   ProviderConfig
        {   provider_name: "Ollama".to_string()
          , provider_type: ProviderType::Ollama
          , base_url: DEFAULT_OLLAMA_BASE_URL.to_string()
          , models_endpoint: DEFAULT_MODELS_ENDPOINT.to_string()
          , completion_endpoint
              : DEFAULT_COMPLETION_ENDPOINT.to_string()
          , headers: HashMap::new()
        }
    }

    /// Generic OpenAI-compatible server (llama.cpp, LM Studio, ...)
    pub fn openai_compatible_default() -> Self
    {   ProviderConfig
        {   provider_name: "OpenAI Compatible".to_string()
          , provider_type: ProviderType::Custom
          , base_url: DEFAULT_OPENAI_BASE_URL.to_string()
          , models_endpoint: DEFAULT_MODELS_ENDPOINT.to_string()
          , completion_endpoint
              : DEFAULT_COMPLETION_ENDPOINT.to_string()
          , headers: HashMap::new()
        }
    }

    /// Join base URL and endpoint path without doubling slashes
    pub fn endpoint_url(&self, endpoint: &str) -> String
    {   format!(
          "{}/{}",
          self.base_url.trim_end_matches('/'),
          endpoint.trim_start_matches('/')
        )
    }
}

/// Model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig
{   /// Model name as the backend knows it
    pub name: String
  , /// Send `temperature` with completion requests
    #[serde(default)]
    pub is_temperature_enabled: bool
  , #[serde(default = "default_temperature")]
    pub temperature: f32
}

fn default_temperature() -> f32
{   0.5
}

impl Default for ModelConfig
{   fn default() -> Self
    {   ModelConfig
        {   name: String::new()
          , is_temperature_enabled: false
          , temperature: default_temperature()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language
{   pub id: String
  , pub name: String
}

/// Languages offered by the UI and the default pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageConfig
{   pub languages: Vec<Language>
  , pub default_input_language: String
  , pub default_output_language: String
}

impl Default for LanguageConfig
{   fn default() -> Self
    {   let languages = [
          ("en", "English"),
          ("de", "German"),
          ("fr", "French"),
          ("es", "Spanish"),
          ("it", "Italian"),
          ("uk", "Ukrainian"),
          ("ru", "Russian"),
          ("zh", "Chinese"),
          ("ja", "Japanese"),
        ]
          .iter()
          .map(|(id, name)| Language
            {   id: id.to_string()
              , name: name.to_string()
            })
          .collect();

        LanguageConfig
        {   languages
          , default_input_language: "en".to_string()
          , default_output_language: "de".to_string()
        }
    }
}

/// Snapshot of everything one pipeline run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings
{   pub available_provider_configs: Vec<ProviderConfig>
  , pub current_provider_config: ProviderConfig
  , pub model_config: ModelConfig
  , #[serde(default)]
    pub language_config: LanguageConfig
  , #[serde(default)]
    pub use_markdown_for_output: bool
}

impl Settings
{   /// Parse settings from their JSON form
    pub fn from_json_str(json: &str)
      -> Result<Settings, crate::error::Error>
    {   serde_json::from_str(json).map_err(|e| {
          crate::error::Error::Settings(e.to_string())
        })
    }
}

impl Default for Settings
{   fn default() -> Self
    {   let ollama = ProviderConfig::ollama_default();
        Settings
        {   available_provider_configs: vec![
              ollama.clone()
            , ProviderConfig::openai_compatible_default()
            ]
          , current_provider_config: ollama
          , model_config: ModelConfig::default()
          , language_config: LanguageConfig::default()
          , use_markdown_for_output: false
        }
    }
}

/// HTTP transport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportConfig
{   /// Request timeout in seconds; `None` waits indefinitely
    pub timeout_secs: Option<u64>
}

impl Default for TransportConfig
{   fn default() -> Self
    {   TransportConfig
        {   timeout_secs: Some(120)
        }
    }
}
