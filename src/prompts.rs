//! Prompt definitions and the catalog that resolves them

use std::sync::OnceLock;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use log::{debug, error};

/// The one category with extra template tokens and the
/// same-language shortcut
pub const TRANSLATION_CATEGORY: &str = "translation";

pub const PROOFREAD_CATEGORY: &str = "proofread";
pub const SUMMARY_CATEGORY: &str = "summary";
pub const FORMAT_CATEGORY: &str = "format";
pub const TRANSFORMING_CATEGORY: &str = "transforming";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptType
{   System
  , User
}

/// A named prompt template bound to a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptDefinition
{   pub id: String
  , pub name: String
  , #[serde(rename = "type")]
    pub prompt_type: PromptType
  , pub category: String
  , /// Template text with `{{...}}` placeholders
    pub value: String
}

/// Actions of one category, for building menus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionGroup
{   pub category: String
  , pub actions: Vec<ActionEntry>
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionEntry
{   pub id: String
  , pub name: String
}

/// Source of prompt templates and per-category system prompts
#[async_trait]
pub trait PromptCatalog: Send + Sync
{   async fn get_prompt(&self, id: &str)
      -> Result<PromptDefinition, crate::error::Error>;

    async fn get_system_prompt(&self, category: &str)
      -> Result<String, crate::error::Error>;

    /// User-facing actions grouped by category
    async fn action_groups(&self) -> Vec<ActionGroup>;
}

/// In-memory catalog; immutable once built
pub struct StaticPromptCatalog
{   prompts: Vec<PromptDefinition>
  , system_prompts: Vec<(String, String)>
  , groups: OnceLock<Vec<ActionGroup>>
}

impl StaticPromptCatalog
{   pub fn new(
      prompts: Vec<PromptDefinition>
    , system_prompts: Vec<(String, String)>
    ) -> Self
    {   debug!(
          "Creating prompt catalog with {} prompts",
          prompts.len()
        );
        StaticPromptCatalog
        {   prompts
          , system_prompts
          , groups: OnceLock::new()
        }
    }

    /// Catalog shipped with the application
    pub fn builtin() -> Self
    {   let user = |id: &str, name: &str, category: &str, value: &str| {
          PromptDefinition
          {   id: id.to_string()
            , name: name.to_string()
            , prompt_type: PromptType::User
            , category: category.to_string()
            , value: value.to_string()
          }
        };

        let prompts = vec![
          user(
            "translatePlain", "Translate", TRANSLATION_CATEGORY,
            "Translate the following text from {{input_language}} to \
             {{output_language}}. Keep the meaning and tone. Format the \
             result as {{user_format}}.\n\nText:\n{{user_text}}"
          )
        , user(
            "translateFormal", "Translate (formal)", TRANSLATION_CATEGORY,
            "Translate the following text from {{input_language}} to \
             {{output_language}} using a formal, polite register. Format \
             the result as {{user_format}}.\n\nText:\n{{user_text}}"
          )
        , user(
            "translateCasual", "Translate (casual)", TRANSLATION_CATEGORY,
            "Translate the following text from {{input_language}} to \
             {{output_language}} using a casual, friendly register. \
             Format the result as {{user_format}}.\n\nText:\n{{user_text}}"
          )
        , user(
            "proofread", "Proofread", PROOFREAD_CATEGORY,
            "Correct spelling, grammar and punctuation in the following \
             text. Do not change its meaning.\n\nText:\n{{user_text}}"
          )
        , user(
            "rewriteFormal", "Rewrite formally", PROOFREAD_CATEGORY,
            "Rewrite the following text in a formal style. Format the \
             result as {{user_format}}.\n\nText:\n{{user_text}}"
          )
        , user(
            "summarize", "Summarize", SUMMARY_CATEGORY,
            "Summarize the following text in a few sentences. Format the \
             result as {{user_format}}.\n\nText:\n{{user_text}}"
          )
        , user(
            "keyPoints", "Key points", SUMMARY_CATEGORY,
            "List the key points of the following text. Format the \
             result as {{user_format}}.\n\nText:\n{{user_text}}"
          )
        , user(
            "formatAsList", "Format as list", FORMAT_CATEGORY,
            "Reformat the following text as a bulleted list. Format the \
             result as {{user_format}}.\n\nText:\n{{user_text}}"
          )
        , user(
            "formatAsTable", "Format as table", FORMAT_CATEGORY,
            "Reformat the following text as a table. Format the result \
             as {{user_format}}.\n\nText:\n{{user_text}}"
          )
        , user(
            "toUpperCase", "Uppercase", TRANSFORMING_CATEGORY,
            "Convert the following text to upper case.\n\n\
             Text:\n{{user_text}}"
          )
        ];

        let system = |category: &str, value: &str| {
          (category.to_string(), value.to_string())
        };

        let system_prompts = vec![
          system(
            TRANSLATION_CATEGORY,
            "You are a professional translator. Reply with the \
             translation only, without explanations or quotes."
          )
        , system(
            PROOFREAD_CATEGORY,
            "You are a meticulous proofreader. Reply with the corrected \
             text only."
          )
        , system(
            SUMMARY_CATEGORY,
            "You are an assistant that writes short, accurate summaries. \
             Reply with the summary only."
          )
        , system(
            FORMAT_CATEGORY,
            "You are a text formatting assistant. Reply with the \
             reformatted text only."
          )
        , system(
            TRANSFORMING_CATEGORY,
            "You are a text transformation assistant. Reply with the \
             transformed text only."
          )
        ];

        StaticPromptCatalog::new(prompts, system_prompts)
    }

    fn build_groups(&self) -> Vec<ActionGroup>
    {   let mut groups: Vec<ActionGroup> = Vec::new();
        for prompt in self.prompts
          .iter()
          .filter(|p| p.prompt_type == PromptType::User)
        {   let entry = ActionEntry
            {   id: prompt.id.clone()
              , name: prompt.name.clone()
            };
            match groups
              .iter_mut()
              .find(|g| g.category == prompt.category)
            {   Some(group) => group.actions.push(entry)
              , None => groups.push(ActionGroup
                {   category: prompt.category.clone()
                  , actions: vec![entry]
                })
            }
        }
        debug!("Built {} action groups", groups.len());
        groups
    }
}

#[async_trait]
impl PromptCatalog for StaticPromptCatalog
{   async fn get_prompt(&self, id: &str)
      -> Result<PromptDefinition, crate::error::Error>
    {   self.prompts
          .iter()
          .find(|p| p.id == id)
          .cloned()
          .ok_or_else(|| {
            error!("Unknown prompt ID: {}", id);
            crate::error::Error::PromptNotFound(id.to_string())
          })
    }

    async fn get_system_prompt(&self, category: &str)
      -> Result<String, crate::error::Error>
    {   self.system_prompts
          .iter()
          .find(|(c, _)| c == category)
          .map(|(_, value)| value.clone())
          .ok_or_else(|| {
            error!("Unknown prompt category: {}", category);
            crate::error::Error::SystemPromptNotFound(
              category.to_string()
            )
          })
    }

    async fn action_groups(&self) -> Vec<ActionGroup>
    {   self.groups
          .get_or_init(|| self.build_groups())
          .clone()
    }
}
