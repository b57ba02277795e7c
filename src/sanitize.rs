//! Cleanup of raw model output

use std::sync::OnceLock;
use regex::Regex;
use log::{debug, error};

const REASONING_BLOCK_PATTERN: &str = r"(?s)<think>.*?</think>";

fn reasoning_block_regex()
  -> Result<&'static Regex, crate::error::Error>
{   static RE: OnceLock<Result<Regex, regex::Error>>
      = OnceLock::new();
    RE.get_or_init(|| Regex::new(REASONING_BLOCK_PATTERN))
      .as_ref()
      .map_err(|e| {
        error!("Invalid reasoning block pattern: {}", e);
        crate::error::Error::Other(e.to_string())
      })
}

/// Remove `<think>...</think>` blocks and trim the result.
///
/// Matching is non-greedy, so each opening tag pairs with the first
/// closing tag after it. Nested blocks therefore leave their outer
/// closing tag behind.
pub fn sanitize_reasoning_block(raw: &str)
  -> Result<String, crate::error::Error>
{   if raw.trim().is_empty()
    {   return Ok(String::new());
    }

    let re = reasoning_block_regex()?;
    let cleaned = re.replace_all(raw, "");
    if cleaned.len() != raw.len()
    {   debug!(
          "Stripped {} bytes of reasoning output",
          raw.len() - cleaned.len()
        );
    }
    Ok(cleaned.trim().to_string())
}
