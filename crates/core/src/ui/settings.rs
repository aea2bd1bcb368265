//! User settings persistence and UI configuration.
//!
//! This module handles loading and saving user preferences,
//! including model selection, API key override, and the chat
//! assistant's system prompt.

use crate::config::{DEFAULT_CHAT_MODEL, DEFAULT_IMAGE_MODEL};
use crate::error::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Available image-editing models for selection in the UI.
pub const AVAILABLE_IMAGE_MODELS: &[&str] = &[
    "gemini-2.5-flash-image",
    "nano-banana-pro-preview",
];

/// Available chat models for the help assistant.
pub const AVAILABLE_CHAT_MODELS: &[&str] = &[
    "gemini-flash-latest",
    "gemini-flash-lite-latest",
    "gemini-2.5-pro",
];

/// User-configurable settings persisted between sessions.
///
/// Settings are stored as JSON in the user's config directory
/// (e.g., `~/.config/photo-studio/settings.json` on Linux).
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Selected image-editing model name.
    pub image_model: String,
    /// Selected chat model name.
    pub chat_model: String,
    /// System prompt for the help assistant (empty = built-in default).
    pub system_prompt: String,
    /// API key override (takes precedence over environment).
    #[serde(default)]
    pub api_key: String,
}

impl Settings {
    /// Returns the path to the settings file.
    ///
    /// Creates the config directory if it doesn't exist.
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "photo-studio").map(|dirs| {
            let config_dir = dirs.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            config_dir.join("settings.json")
        })
    }

    /// Loads settings from disk, falling back to defaults if not found.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(&path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Persists settings to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            let json = serde_json::to_string_pretty(self)?;
            fs::write(path, json)?;
        }
        Ok(())
    }

    /// Returns whether an API key override is set.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            system_prompt: String::new(),
            api_key: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_config_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(settings.chat_model, DEFAULT_CHAT_MODEL);
        assert!(!settings.has_api_key());
    }

    #[test]
    fn json_round_trip() {
        let settings = Settings {
            image_model: "nano-banana-pro-preview".to_string(),
            chat_model: "gemini-2.5-pro".to_string(),
            system_prompt: "be brief".to_string(),
            api_key: "secret".to_string(),
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert!(back == settings);
    }

    #[test]
    fn missing_api_key_defaults_empty() {
        let json = r#"{
            "image_model": "gemini-2.5-flash-image",
            "chat_model": "gemini-flash-latest",
            "system_prompt": ""
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert!(!settings.has_api_key());
    }
}
