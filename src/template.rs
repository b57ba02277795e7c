//! Placeholder substitution for user prompt templates

use log::{debug, trace};

use crate::error::Error;
use crate::prompts::TRANSLATION_CATEGORY;
use crate::request::ActionRequest;

pub const USER_TEXT_TOKEN: &str = "{{user_text}}";
pub const INPUT_LANGUAGE_TOKEN: &str = "{{input_language}}";
pub const OUTPUT_LANGUAGE_TOKEN: &str = "{{output_language}}";
pub const USER_FORMAT_TOKEN: &str = "{{user_format}}";

pub const MARKDOWN_FORMAT: &str = "Markdown";
pub const PLAIN_TEXT_FORMAT: &str = "plain text";

/// Fill `template` with values taken from `request`.
///
/// Validation runs before any substitution. The language tokens are
/// only filled for the translation category, and the format token only
/// when the template actually uses it. Missing placeholders are not an
/// error; the template is returned as is.
pub fn build_prompt(
  template: &str
, category: &str
, request: Option<&ActionRequest>
, use_markdown: bool
) -> Result<String, Error>
{   let request = request.ok_or(Error::MissingRequest)?;

    if template.trim().is_empty()
    {   return Err(Error::EmptyTemplate);
    }
    if category.trim().is_empty()
    {   return Err(Error::EmptyCategory);
    }
    validate_request(category, request)?;

    let is_translation = category == TRANSLATION_CATEGORY;
    let mut replacements: Vec<(&str, String)> = vec![
      (USER_TEXT_TOKEN, request.input_text.clone())
    ];
    if is_translation
    {   replacements.push(
          (INPUT_LANGUAGE_TOKEN, request.input_language_id.clone())
        );
        replacements.push(
          (OUTPUT_LANGUAGE_TOKEN, request.output_language_id.clone())
        );
    }
    if template.contains(USER_FORMAT_TOKEN)
    {   let format = if use_markdown
        {   MARKDOWN_FORMAT
        } else
        {   PLAIN_TEXT_FORMAT
        };
        replacements.push((USER_FORMAT_TOKEN, format.to_string()));
    }

    debug!(
      "Building prompt for action {} with {} tokens",
      request.id,
      replacements.len()
    );

    let prompt = replace_tokens(template, &replacements);
    trace!("Built prompt: {}", prompt);
    Ok(prompt)
}

/// Check the request fields a prompt of `category` needs: ID and
/// input text always, both language IDs for translation
pub fn validate_request(category: &str, request: &ActionRequest)
  -> Result<(), Error>
{   if request.id.trim().is_empty()
    {   return Err(Error::EmptyActionId);
    }
    if request.input_text.trim().is_empty()
    {   return Err(Error::EmptyInputText);
    }
    if category == TRANSLATION_CATEGORY
    {   if request.input_language_id.trim().is_empty()
        {   return Err(Error::MissingInputLanguage);
        }
        if request.output_language_id.trim().is_empty()
        {   return Err(Error::MissingOutputLanguage);
        }
    }
    Ok(())
}

/// Replace every occurrence of each token in one left-to-right pass.
///
/// Inserted values are never scanned again, so a value that contains
/// another token comes out verbatim and list order does not matter.
pub fn replace_tokens(
  template: &str
, replacements: &[(&str, String)]
) -> String
{   let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop
    {   let next = replacements
          .iter()
          .filter(|(token, _)| !token.is_empty())
          .filter_map(|(token, value)| {
            rest.find(*token).map(|pos| (pos, *token, value))
          })
          .min_by_key(|(pos, _, _)| *pos);

        match next
        {   Some((pos, token, value)) => {
              out.push_str(&rest[..pos]);
              out.push_str(value);
              rest = &rest[pos + token.len()..];
            }
          , None => {
              out.push_str(rest);
              return out;
            }
        }
    }
}
