//! Action completion pipeline

use std::sync::Arc;
use std::time::Instant;
use log::{debug, trace, info, warn, error};

use crate::config::{ModelConfig, ProviderConfig, ProviderType, Settings};
use crate::error::Error;
use crate::prompts::{PromptCatalog, TRANSLATION_CATEGORY};
use crate::providers::CompletionTransport;
use crate::request::{ActionRequest, ChatCompletionRequest, OllamaOptions};
use crate::settings::SettingsStore;

/// Turns an [`ActionRequest`] into a finished text.
///
/// Holds no mutable state; one instance can serve any number of
/// concurrent calls. Settings are re-read and both network requests
/// re-issued on every call.
pub struct ActionPipeline
{   prompts: Arc<dyn PromptCatalog>
  , settings: Arc<dyn SettingsStore>
  , transport: Arc<dyn CompletionTransport>
}

impl ActionPipeline
{   pub fn new(
      prompts: Arc<dyn PromptCatalog>
    , settings: Arc<dyn SettingsStore>
    , transport: Arc<dyn CompletionTransport>
    ) -> Self
    {   ActionPipeline
        {   prompts
          , settings
          , transport
        }
    }

    pub fn prompts(&self) -> &Arc<dyn PromptCatalog>
    {   &self.prompts
    }

    /// Run one action end to end.
    ///
    /// Steps run strictly in order and the first failure ends the run:
    /// resolve prompt, resolve system prompt, check the request fields
    /// the prompt's category needs, load settings, check the
    /// provider configuration, check the model list (warnings only),
    /// build the user prompt, then either return the input untouched
    /// for a same-language translation or call the backend and strip
    /// reasoning blocks from its answer.
    pub async fn process_action(&self, action: &ActionRequest)
      -> Result<String, Error>
    {   if action.id.trim().is_empty()
        {   error!("Action ID is empty");
            return Err(Error::EmptyActionId);
        }
        debug!("Processing action: {}", action.id);

        let prompt = self.prompts
          .get_prompt(&action.id)
          .await
          .map_err(|e| e.context("failed to resolve action prompt"))?;

        let system_prompt = self.prompts
          .get_system_prompt(&prompt.category)
          .await
          .map_err(|e| e.context("failed to resolve system prompt"))?;

        crate::template::validate_request(&prompt.category, action)
          .map_err(|e| {
            error!("Invalid request for action {}: {}", action.id, e);
            e
          })?;

        let settings = self.settings
          .get_current_settings()
          .await
          .map_err(|e| e.context("failed to load settings"))?;

        validate_provider(
          &settings.current_provider_config,
          &settings.model_config
        )?;

        self.check_model_availability(&settings).await?;

        let user_prompt = crate::template::build_prompt(
          &prompt.value,
          &prompt.category,
          Some(action),
          settings.use_markdown_for_output
        ).map_err(|e| e.context("failed to build user prompt"))?;

        if prompt.category == TRANSLATION_CATEGORY
          && action.input_language_id == action.output_language_id
        {   info!(
              "Input and output language are both {}, skipping completion",
              action.input_language_id
            );
            return Ok(action.input_text.clone());
        }

        let request = build_completion_request(
          &settings,
          system_prompt,
          user_prompt
        );
        let raw = self.complete(&settings, &request).await?;

        crate::sanitize::sanitize_reasoning_block(&raw)
          .map_err(|e| e.context("failed to sanitize response"))
    }

    /// Compare the configured model with what the backend lists.
    ///
    /// Only a failed request is an error. Backends can serve aliases
    /// or models they do not list, so an empty list or a missing name
    /// is logged and ignored.
    pub async fn check_model_availability(&self, settings: &Settings)
      -> Result<(), Error>
    {   let provider = &settings.current_provider_config;
        let model = &settings.model_config.name;

        let models = self.transport
          .get_models_list(provider)
          .await
          .map_err(|e| {
            error!(
              "Failed to list models of {}: {}",
              provider.provider_name, e
            );
            e.context(format!(
              "failed to get models list from {}",
              provider.provider_name
            ))
          })?;

        if models.is_empty()
        {   warn!(
              "Provider {} reported no models, trying {} anyway",
              provider.provider_name, model
            );
        } else if !models.iter().any(|m| m == model)
        {   warn!(
              "Model {} not listed by {} (available: {}), trying anyway",
              model,
              provider.provider_name,
              models.join(", ")
            );
        } else
        {   trace!("Model {} is available", model);
        }
        Ok(())
    }

    async fn complete(
      &self
    , settings: &Settings
    , request: &ChatCompletionRequest
    ) -> Result<String, Error>
    {   let provider = &settings.current_provider_config;
        let started = Instant::now();

        let result = self.transport
          .get_completion_response(provider, request)
          .await;
        let elapsed = started.elapsed();

        match result
        {   Ok(content) => {
              debug!(
                "Completion from {} with {} took {:?}",
                provider.provider_name, request.model, elapsed
              );
              Ok(content)
            }
          , Err(e) => {
              error!(
                "Completion failed for model {} on {} after {:?}: {}",
                request.model, provider.provider_name, elapsed, e
              );
              Err(e.context(format!(
                "completion failed (model: {}, provider: {}, elapsed: {:?})",
                request.model, provider.provider_name, elapsed
              )))
            }
        }
    }
}

/// Reject provider settings that cannot produce a request, before
/// anything touches the network
pub fn validate_provider(
  provider: &ProviderConfig
, model: &ModelConfig
) -> Result<(), Error>
{   if provider.base_url.trim().is_empty()
    {   error!("Provider {} has no base URL", provider.provider_name);
        return Err(Error::MissingBaseUrl);
    }
    if provider.completion_endpoint.trim().is_empty()
    {   error!(
          "Provider {} has no completion endpoint",
          provider.provider_name
        );
        return Err(Error::MissingCompletionEndpoint);
    }
    if model.name.trim().is_empty()
    {   error!("No model configured");
        return Err(Error::MissingModelName);
    }
    Ok(())
}

/// System turn, user turn and sampling options for the active
/// provider. Ollama reads temperature from `options`, so it is
/// mirrored there as well.
pub fn build_completion_request(
  settings: &Settings
, system_prompt: String
, user_prompt: String
) -> ChatCompletionRequest
{   let model = &settings.model_config;
    let mut request = ChatCompletionRequest::new(
      model.name.clone(),
      system_prompt,
      user_prompt
    );

    if model.is_temperature_enabled
    {   request.temperature = Some(model.temperature);
        if settings.current_provider_config.provider_type
          == ProviderType::Ollama
        {   request.options = Some(OllamaOptions
            {   temperature: Some(model.temperature)
            });
        }
    }
    request
}
