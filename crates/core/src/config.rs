use crate::error::{AppError, Result};
use dotenvy::dotenv;
use std::env;

/// Default model for image editing requests.
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Default model for the help-chat assistant.
pub const DEFAULT_CHAT_MODEL: &str = "gemini-flash-latest";

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: String,
    pub image_model: String,
    pub chat_model: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file if it exists, ignore if it doesn't
        let _ = dotenv();

        let api_key = env::var("GEMINI_API_KEY").map_err(|_| {
            AppError::Config(
                "GEMINI_API_KEY must be set in environment or .env file".to_string(),
            )
        })?;

        let image_model =
            env::var("GEMINI_IMAGE_MODEL").unwrap_or_else(|_| DEFAULT_IMAGE_MODEL.to_string());
        let chat_model =
            env::var("GEMINI_CHAT_MODEL").unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string());

        Ok(Self {
            gemini_api_key: api_key,
            image_model,
            chat_model,
        })
    }

    /// Starts building a configuration programmatically, bypassing the environment.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for [`Config`], used when settings override the environment.
#[derive(Default)]
pub struct ConfigBuilder {
    api_key: Option<String>,
    image_model: Option<String>,
    chat_model: Option<String>,
}

impl ConfigBuilder {
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = Some(model.into());
        self
    }

    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = Some(model.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    /// Returns [`AppError::Config`] if no API key was provided or the key is empty.
    pub fn build(self) -> Result<Config> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AppError::Config("API key not found. Please check your settings.".to_string()))?;

        Ok(Config {
            gemini_api_key: api_key,
            image_model: self.image_model.unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string()),
            chat_model: self.chat_model.unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_with_explicit_key() {
        let config = Config::builder().with_api_key("test-key").build().unwrap();
        assert_eq!(config.gemini_api_key, "test-key");
        assert_eq!(config.image_model, DEFAULT_IMAGE_MODEL);
        assert_eq!(config.chat_model, DEFAULT_CHAT_MODEL);
    }

    #[test]
    fn builder_rejects_missing_key() {
        assert!(Config::builder().build().is_err());
    }

    #[test]
    fn builder_rejects_blank_key() {
        assert!(Config::builder().with_api_key("   ").build().is_err());
    }

    #[test]
    fn builder_model_overrides() {
        let config = Config::builder()
            .with_api_key("k")
            .with_image_model("nano-banana-pro-preview")
            .with_chat_model("gemini-2.5-pro")
            .build()
            .unwrap();
        assert_eq!(config.image_model, "nano-banana-pro-preview");
        assert_eq!(config.chat_model, "gemini-2.5-pro");
    }
}
