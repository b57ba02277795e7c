//! Completion backends

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::request::ChatCompletionRequest;

pub mod openai;

// Re-export for convenience
pub use openai::HttpTransport;

/// Network side of the pipeline. The provider is passed on every
/// call so both requests of one run use the same snapshot.
#[async_trait]
pub trait CompletionTransport: Send + Sync
{   /// Model names the backend advertises
    async fn get_models_list(&self, provider: &ProviderConfig)
      -> Result<Vec<String>, crate::error::Error>;

    /// Content of the first choice of a completion
    async fn get_completion_response(
      &self
    , provider: &ProviderConfig
    , request: &ChatCompletionRequest
    ) -> Result<String, crate::error::Error>;
}
