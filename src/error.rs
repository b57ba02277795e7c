use std::fmt;

/// Broad failure classes, used by callers to decide how to
/// present an error without matching every variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind
{   Validation
  , NotFound
  , Configuration
  , Transport
  , ResponseShape
  , Other
}

/// Custom error type for action pipeline operations
/// Implements Clone for sending through channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error
{   /// No action request was supplied
    MissingRequest
  , /// Action ID is blank
    EmptyActionId
  , /// Input text is blank
    EmptyInputText
  , /// Prompt template is blank
    EmptyTemplate
  , /// Prompt category is blank
    EmptyCategory
  , /// Translation request without a source language
    MissingInputLanguage
  , /// Translation request without a target language
    MissingOutputLanguage
  , /// No prompt registered for this action ID
    PromptNotFound(String)
  , /// No system prompt registered for this category
    SystemPromptNotFound(String)
  , /// Provider base URL is blank
    MissingBaseUrl
  , /// Provider completion endpoint is blank
    MissingCompletionEndpoint
  , /// Model name is blank
    MissingModelName
  , /// Settings could not be loaded or parsed
    Settings(String)
  , /// HTTP request error
    HttpError(String)
  , /// API returned an error response
    ApiError(String)
  , /// Failed to parse API response
    ParseError(String)
  , /// No choices in API response
    NoChoicesInResponse
  , /// Invalid configuration
    InvalidConfiguration(String)
  , /// Timeout error
    Timeout
  , /// Another error with operational context attached
    Context
    {   context: String
      , cause: Box<Error>
    }
  , /// Generic error
    Other(String)
}

impl Error
{   /// Wrap this error with a context message, keeping it
    /// reachable through `source()`
    pub fn context(self, context: impl Into<String>) -> Self
    {   Error::Context
        {   context: context.into()
          , cause: Box::new(self)
        }
    }

    /// Innermost error of a context chain
    pub fn root(&self) -> &Error
    {   match self
        {   Error::Context { cause, .. } => cause.root()
          , other => other
        }
    }

    pub fn kind(&self) -> ErrorKind
    {   match self.root()
        {   Error::MissingRequest
          | Error::EmptyActionId
          | Error::EmptyInputText
          | Error::EmptyTemplate
          | Error::EmptyCategory
          | Error::MissingInputLanguage
          | Error::MissingOutputLanguage => ErrorKind::Validation
          , Error::PromptNotFound(_)
          | Error::SystemPromptNotFound(_) => ErrorKind::NotFound
          , Error::MissingBaseUrl
          | Error::MissingCompletionEndpoint
          | Error::MissingModelName
          | Error::InvalidConfiguration(_)
          | Error::Settings(_) => ErrorKind::Configuration
          , Error::HttpError(_)
          | Error::ApiError(_)
          | Error::ParseError(_)
          | Error::Timeout => ErrorKind::Transport
          , Error::NoChoicesInResponse => ErrorKind::ResponseShape
          , _ => ErrorKind::Other
        }
    }
}

impl fmt::Display for Error
{   fn fmt(&self, f: &mut fmt::Formatter<'_>)
      -> fmt::Result
    {   match self
        {   Error::MissingRequest => {
              write!(f, "Validation error: action request is missing")
            }
          , Error::EmptyActionId => {
              write!(f, "Validation error: action ID is empty")
            }
          , Error::EmptyInputText => {
              write!(f, "Validation error: input text is empty")
            }
          , Error::EmptyTemplate => {
              write!(f, "Validation error: prompt template is empty")
            }
          , Error::EmptyCategory => {
              write!(f, "Validation error: prompt category is empty")
            }
          , Error::MissingInputLanguage => {
              write!(f,
                "Validation error: input language is required for translation"
              )
            }
          , Error::MissingOutputLanguage => {
              write!(f,
                "Validation error: output language is required for translation"
              )
            }
          , Error::PromptNotFound(id) => {
              write!(f, "Prompt not found for action: {}", id)
            }
          , Error::SystemPromptNotFound(category) => {
              write!(f,
                "System prompt not found for category: {}",
                category
              )
            }
          , Error::MissingBaseUrl => {
              write!(f, "Configuration error: base URL is empty")
            }
          , Error::MissingCompletionEndpoint => {
              write!(f,
                "Configuration error: completion endpoint is empty"
              )
            }
          , Error::MissingModelName => {
              write!(f, "Configuration error: model name is empty")
            }
          , Error::Settings(msg) => {
              write!(f, "Settings error: {}", msg)
            }
          , Error::HttpError(msg) => {
              write!(f, "HTTP error: {}", msg)
            }
          , Error::ApiError(msg) => {
              write!(f, "API error: {}", msg)
            }
          , Error::ParseError(msg) => {
              write!(f, "Parse error: {}", msg)
            }
          , Error::NoChoicesInResponse => {
              write!(f, "Invalid response: no choices returned")
            }
          , Error::InvalidConfiguration(msg) => {
              write!(f, "Invalid configuration: {}", msg)
            }
          , Error::Timeout => {
              write!(f, "Request timed out")
            }
          , Error::Context { context, cause } => {
              write!(f, "{}: {}", context, cause)
            }
          , Error::Other(msg) => {
              write!(f, "Error: {}", msg)
            }
        }
    }
}

impl std::error::Error for Error
{   fn source(&self)
      -> Option<&(dyn std::error::Error + 'static)>
    {   match self
        {   Error::Context { cause, .. } => Some(cause.as_ref())
          , _ => None
        }
    }
}

impl From<String> for Error
{   fn from(s: String) -> Self
    {   Error::Other(s)
    }
}

impl From<&str> for Error
{   fn from(s: &str) -> Self
    {   Error::Other(s.to_string())
    }
}
