//! Action requests and the chat completion wire types

use serde::{Deserialize, Serialize};

/// One user-triggered action, as sent by the UI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest
{   /// Action (prompt) ID, e.g. `translatePlain`
    pub id: String
  , /// Text the action is applied to
    pub input_text: String
  , /// Current contents of the output pane; not read here
    #[serde(default)]
    pub output_text: String
  , #[serde(default)]
    pub input_language_id: String
  , #[serde(default)]
    pub output_language_id: String
}

impl ActionRequest
{   pub fn new(id: impl Into<String>, input_text: impl Into<String>)
      -> Self
    {   ActionRequest
        {   id: id.into()
          , input_text: input_text.into()
          , ..Default::default()
        }
    }

    /// Set the source and target language IDs
    pub fn with_languages(
      mut self
    , input_language_id: impl Into<String>
    , output_language_id: impl Into<String>
    ) -> Self
    {   self.input_language_id = input_language_id.into();
        self.output_language_id = output_language_id.into();
        self
    }
}

// ===== Chat Completion Wire Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage
{   pub role: String
  , pub content: String
}

impl ChatMessage
{   pub fn system(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: "system".to_string()
          , content: content.into()
        }
    }

    pub fn user(content: impl Into<String>) -> Self
    {   ChatMessage
        {   role: "user".to_string()
          , content: content.into()
        }
    }
}

/// Sampling options in the shape Ollama reads them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OllamaOptions
{   #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest
{   pub model: String
  , pub messages: Vec<ChatMessage>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>
  , #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OllamaOptions>
  , pub stream: bool
  , pub n: u32
}

impl ChatCompletionRequest
{   /// Single-shot, non-streamed request with one system and
    /// one user turn
    pub fn new(
      model: impl Into<String>
    , system_prompt: impl Into<String>
    , user_prompt: impl Into<String>
    ) -> Self
    {   ChatCompletionRequest
        {   model: model.into()
          , messages: vec![
              ChatMessage::system(system_prompt)
            , ChatMessage::user(user_prompt)
            ]
          , temperature: None
          , options: None
          , stream: false
          , n: 1
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse
{   #[serde(default)]
    pub choices: Vec<Choice>
  , #[serde(default)]
    pub usage: Option<Usage>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice
{   #[serde(default)]
    pub index: u32
  , pub message: ChatMessage
  , #[serde(default)]
    pub finish_reason: Option<String>
}

#[derive(Debug, Clone, Deserialize)]
pub struct Usage
{   #[serde(default)]
    pub prompt_tokens: u32
  , #[serde(default)]
    pub completion_tokens: u32
  , #[serde(default)]
    pub total_tokens: u32
}
