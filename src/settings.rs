//! Settings snapshot providers

use std::path::PathBuf;
use async_trait::async_trait;
use log::{debug, error};

use crate::config::Settings;

/// Hands out the active settings; each call is a fresh snapshot
#[async_trait]
pub trait SettingsStore: Send + Sync
{   async fn get_current_settings(&self)
      -> Result<Settings, crate::error::Error>;
}

/// Fixed settings held in memory
pub struct StaticSettingsStore
{   settings: Settings
}

impl StaticSettingsStore
{   pub fn new(settings: Settings) -> Self
    {   StaticSettingsStore { settings }
    }
}

#[async_trait]
impl SettingsStore for StaticSettingsStore
{   async fn get_current_settings(&self)
      -> Result<Settings, crate::error::Error>
    {   Ok(self.settings.clone())
    }
}

/// Read-only JSON settings file, re-read on every call so edits
/// made elsewhere are picked up by the next action
pub struct FileSettingsStore
{   path: PathBuf
}

impl FileSettingsStore
{   pub fn new(path: impl Into<PathBuf>) -> Self
    {   FileSettingsStore { path: path.into() }
    }
}

#[async_trait]
impl SettingsStore for FileSettingsStore
{   async fn get_current_settings(&self)
      -> Result<Settings, crate::error::Error>
    {   debug!("Loading settings from {}", self.path.display());
        let json = tokio::fs::read_to_string(&self.path)
          .await
          .map_err(|e| {
            error!(
              "Failed to read settings {}: {}",
              self.path.display(), e
            );
            crate::error::Error::Settings(format!(
              "{}: {}", self.path.display(), e
            ))
          })?;
        Settings::from_json_str(&json)
    }
}
