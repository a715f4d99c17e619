//! Inbound request body and prompt validation.
use serde::{Deserialize, Serialize};

use crate::error::WallpaperError;

pub const MIN_PROMPT_CHARS: usize = 3;
pub const MAX_PROMPT_CHARS: usize = 500;

/// Body of `POST /api/v1/generate-wallpaper` as sent by the client.
///
/// Every field is optional at this layer so a missing prompt surfaces as
/// `INVALID_PROMPT` rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateWallpaperBody {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub app_version: Option<String>,
}

/// A prompt that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallpaperRequest {
    prompt: String,
    pub user_id: Option<String>,
    pub app_version: Option<String>,
}

impl WallpaperRequest {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

impl TryFrom<GenerateWallpaperBody> for WallpaperRequest {
    type Error = WallpaperError;

    fn try_from(body: GenerateWallpaperBody) -> Result<Self, Self::Error> {
        let prompt = body.prompt.unwrap_or_default();
        validate_prompt(&prompt)?;
        Ok(WallpaperRequest {
            prompt,
            user_id: body.user_id,
            app_version: body.app_version,
        })
    }
}

/// Too-short is checked first; the upper bound applies to the raw prompt,
/// surrounding whitespace included.
pub fn validate_prompt(prompt: &str) -> Result<(), WallpaperError> {
    if prompt.trim().chars().count() < MIN_PROMPT_CHARS {
        return Err(WallpaperError::InvalidPrompt);
    }
    if prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(WallpaperError::PromptTooLong);
    }
    Ok(())
}
