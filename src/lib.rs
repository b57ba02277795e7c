pub mod error;
pub mod config;
pub mod request;
pub mod prompts;
pub mod settings;
pub mod template;
pub mod sanitize;
pub mod providers;
pub mod pipeline;
pub mod client;

/*

textaction turns a selected text "action" (translate, proofread,
summarize, reformat, transform) into one completion request against
an OpenAI/Ollama-compatible endpoint and returns the cleaned answer.

textaction/
├── Cargo.toml
├── src/
│   ├── lib.rs          # Re-exports and backend command types
│   ├── error.rs        # Error type and error kinds
│   ├── config.rs       # Provider, model, language settings
│   ├── request.rs      # Action request and chat wire types
│   ├── prompts.rs      # Prompt definitions and catalog
│   ├── settings.rs     # Settings snapshot stores
│   ├── template.rs     # Placeholder substitution
│   ├── sanitize.rs     # Reasoning block removal
│   ├── providers/      # Completion transports
│   ├── pipeline.rs     # ProcessAction orchestration
│   ├── client.rs       # Backend actor for the UI bridge
│   └── bin/            # Command line runner
└── tests/

*/

pub use client::ActionBackend;
pub use config::{ModelConfig, ProviderConfig, ProviderType, Settings};
pub use error::{Error, ErrorKind};
pub use pipeline::ActionPipeline;
pub use prompts::{PromptCatalog, PromptDefinition, StaticPromptCatalog};
pub use providers::{CompletionTransport, HttpTransport};
pub use request::ActionRequest;
pub use settings::{FileSettingsStore, SettingsStore, StaticSettingsStore};

/// BACKEND API INTERFACE:

// ===== ProcessAction =====

pub type ProcessActionReply = Result<String, crate::error::Error>;
pub type ProcessActionReplySender
  = tokio::sync::mpsc::UnboundedSender<ProcessActionReply>;

pub struct ProcessActionArgs
{   pub request: crate::request::ActionRequest
  , pub reply: ProcessActionReplySender
}

// ===== GetActionGroups =====

pub type GetActionGroupsReply
  = Result<Vec<crate::prompts::ActionGroup>, crate::error::Error>;
pub type GetActionGroupsReplySender
  = tokio::sync::mpsc::UnboundedSender<GetActionGroupsReply>;

pub struct GetActionGroupsArgs
{   pub reply: GetActionGroupsReplySender
}

// ===== KillProcess =====

pub type KillProcessReply = Result<(), crate::error::Error>;
pub type KillProcessReplySender
  = tokio::sync::mpsc::UnboundedSender<KillProcessReply>;

pub struct KillProcessArgs
{   pub reply: KillProcessReplySender
}

// ===== ActionHand (sender side) =====

pub struct ActionHand
{   pub process_action_tx
      : tokio::sync::mpsc::UnboundedSender<ProcessActionArgs>
  , pub get_action_groups_tx
      : tokio::sync::mpsc::UnboundedSender<GetActionGroupsArgs>
  , pub kill_process_tx
      : tokio::sync::mpsc::UnboundedSender<KillProcessArgs>
}

// ===== ActionFoot (receiver side) =====

pub struct ActionFoot
{   pub process_action_rx
      : tokio::sync::mpsc::UnboundedReceiver<ProcessActionArgs>
  , pub get_action_groups_rx
      : tokio::sync::mpsc::UnboundedReceiver<GetActionGroupsArgs>
  , pub kill_process_rx
      : tokio::sync::mpsc::UnboundedReceiver<KillProcessArgs>
}

/// Flatten a reply into the `(text, error message)` pair the UI
/// bridge expects; failures always carry an empty text
pub fn into_ui_reply(reply: ProcessActionReply)
  -> (String, Option<String>)
{   match reply
    {   Ok(text) => (text, None)
      , Err(e) => (String::new(), Some(e.to_string()))
    }
}
