use crate::config::Config;
use crate::editor::{GenerativeBackend, InlineImage};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use gemini_rust::{Blob, Content, Gemini, Message, Part, Role};

pub struct GeminiClient {
    client: Gemini,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient").finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Creates a client bound to the configured image-editing model.
    pub fn for_image_editing(config: &Config) -> Result<Self> {
        Self::new(&config.gemini_api_key, &config.image_model)
    }

    /// Creates a client bound to the configured chat model.
    pub fn for_chat(config: &Config) -> Result<Self> {
        Self::new(&config.gemini_api_key, &config.chat_model)
    }

    pub fn new(api_key: &str, model_name: &str) -> Result<Self> {
        // Credential absence is a configuration error, surfaced before any network call
        if api_key.trim().is_empty() {
            return Err(AppError::Config(
                "API key not found. Please check your settings.".to_string(),
            ));
        }

        // Initialize the client with the API key and model, explicitly setting the base URL to avoid BadScheme error
        let base_url = url::Url::parse("https://generativelanguage.googleapis.com/v1beta/")
            .map_err(|e| AppError::Config(format!("Invalid base URL: {}", e)))?;

        let model_name = if model_name.starts_with("models/") {
            model_name.to_string()
        } else {
            format!("models/{}", model_name)
        };
        let model_url = format!("https://generativelanguage.googleapis.com/v1beta/{}", model_name);

        let client = Gemini::with_model_and_base_url(api_key, model_url, base_url)
            .map_err(|e| AppError::Config(format!("Failed to create Gemini client: {}", e)))?;

        Ok(Self { client })
    }

    fn user_message(parts: Vec<Part>) -> Message {
        Message {
            role: Role::User,
            content: Content {
                role: Some(Role::User),
                parts: Some(parts),
            },
        }
    }
}

/// Maps a binding-level failure onto the error taxonomy.
///
/// Quota exhaustion gets its own variant so the UI can suggest retrying;
/// everything else stays a general API error.
fn classify_api_error(detail: String) -> AppError {
    let lower = detail.to_lowercase();
    if lower.contains("429")
        || lower.contains("resource_exhausted")
        || lower.contains("rate limit")
    {
        AppError::RateLimited
    } else {
        AppError::GeminiApi(format!("API request failed: {}", detail))
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    /// Sends an image and an edit prompt, returning the first inline image
    /// found in the response.
    async fn edit_image(&self, image: InlineImage, prompt: String) -> Result<InlineImage> {
        // Image part first, then the instruction text
        let image_part = Part::InlineData {
            inline_data: Blob {
                mime_type: image.mime_type,
                data: image.data,
            },
        };

        let text_part = Part::Text {
            text: prompt,
            thought: None,
            thought_signature: None,
        };

        let message = Self::user_message(vec![image_part, text_part]);

        let response = self
            .client
            .generate_content()
            .with_messages(vec![message])
            .execute()
            .await
            .map_err(|e| classify_api_error(format!("{:?}", e)))?;

        let candidate = response.candidates.first().ok_or(AppError::NoResponse)?;

        // Scan the content parts for the first one carrying inline binary data
        if let Some(parts) = &candidate.content.parts {
            for part in parts {
                if let Part::InlineData { inline_data } = part {
                    return Ok(InlineImage {
                        mime_type: inline_data.mime_type.clone(),
                        data: inline_data.data.clone(),
                    });
                }
            }
        }

        Err(AppError::NoImage)
    }

    /// Sends a text-only message, returning the first text part of the reply.
    async fn generate_text(
        &self,
        message: String,
        system_prompt: Option<String>,
    ) -> Result<String> {
        let text_part = Part::Text {
            text: message,
            thought: None,
            thought_signature: None,
        };

        let message = Self::user_message(vec![text_part]);

        let mut request = self.client.generate_content().with_messages(vec![message]);

        if let Some(system_prompt) = system_prompt {
            if !system_prompt.trim().is_empty() {
                request = request.with_system_prompt(&system_prompt);
            }
        }

        let response = request
            .execute()
            .await
            .map_err(|e| classify_api_error(format!("{:?}", e)))?;

        let candidate = response.candidates.first().ok_or(AppError::NoResponse)?;

        if let Some(parts) = &candidate.content.parts {
            for part in parts {
                if let Part::Text { text, .. } = part {
                    return Ok(text.clone());
                }
            }
        }

        Err(AppError::NoResponse)
    }
}
