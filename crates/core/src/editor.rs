//! The edit request adapter.
//!
//! This module owns the one reusable contract in the studio: take a
//! data-URL-encoded source image and a natural-language instruction,
//! hand both to a generative backend, and re-wrap the first inline
//! image the backend returns as a data URL.
//!
//! The backend is an injected capability ([`GenerativeBackend`]) so the
//! adapter can be exercised against a fake implementation without any
//! network dependency.

use crate::data_url::DataUrl;
use crate::error::Result;
use async_trait::async_trait;

/// Task preamble prepended to every edit instruction.
pub const EDIT_PREAMBLE: &str = "TASK: PROFESSIONAL IMAGE EDITING. \
Maintain face identity 100%. \
Return only the processed image.";

/// System instruction for the help-chat assistant.
pub const ASSISTANT_SYSTEM_PROMPT: &str =
    "You are the studio help assistant. Help users with photo editing tasks.";

/// An inline binary image payload: base64 data plus its MIME type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: String,
}

/// Capability for generative content calls.
///
/// Implemented by [`crate::gemini::GeminiClient`] in production and by
/// fakes in tests. Stateless across invocations.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Sends an image and an instruction, returning the edited image.
    async fn edit_image(&self, image: InlineImage, prompt: String) -> Result<InlineImage>;

    /// Sends a free-text message, returning the text reply.
    async fn generate_text(&self, message: String, system_prompt: Option<String>)
        -> Result<String>;
}

/// Edits a data-URL-encoded image with a natural-language instruction.
///
/// Splits the data URL into payload and MIME type, prepends the fixed
/// task preamble to the instruction, calls the backend, and re-encodes
/// the returned inline image as a data URL using the MIME type the
/// backend reported.
///
/// # Errors
///
/// - [`crate::error::AppError::InvalidDataUrl`] if `source` is malformed
/// - [`crate::error::AppError::NoResponse`] if the service returned no candidate
/// - [`crate::error::AppError::NoImage`] if no inline-data part came back
/// - [`crate::error::AppError::GeminiApi`] for transport or service failures
pub async fn edit_image(
    backend: &dyn GenerativeBackend,
    source: &str,
    instruction: &str,
) -> Result<String> {
    let source = DataUrl::parse(source)?;

    let prompt = format!("{}\nInstructions: {}", EDIT_PREAMBLE, instruction);

    let edited = backend
        .edit_image(
            InlineImage {
                mime_type: source.mime_type,
                data: source.data,
            },
            prompt,
        )
        .await?;

    Ok(DataUrl {
        mime_type: edited.mime_type,
        data: edited.data,
    }
    .to_string())
}

/// Forwards a free-text question to the assistant model.
pub async fn ask_assistant(backend: &dyn GenerativeBackend, message: &str) -> Result<String> {
    backend
        .generate_text(
            message.to_string(),
            Some(ASSISTANT_SYSTEM_PROMPT.to_string()),
        )
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::sync::Mutex;

    /// Records the request and replays a canned outcome.
    struct FakeBackend {
        outcome: Mutex<Option<Result<InlineImage>>>,
        seen_prompt: Mutex<Option<String>>,
        seen_image: Mutex<Option<InlineImage>>,
    }

    impl FakeBackend {
        fn returning(outcome: Result<InlineImage>) -> Self {
            Self {
                outcome: Mutex::new(Some(outcome)),
                seen_prompt: Mutex::new(None),
                seen_image: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl GenerativeBackend for FakeBackend {
        async fn edit_image(&self, image: InlineImage, prompt: String) -> Result<InlineImage> {
            *self.seen_image.lock().unwrap() = Some(image);
            *self.seen_prompt.lock().unwrap() = Some(prompt);
            self.outcome.lock().unwrap().take().unwrap()
        }

        async fn generate_text(
            &self,
            _message: String,
            _system_prompt: Option<String>,
        ) -> Result<String> {
            Ok("reply".to_string())
        }
    }

    const SOURCE: &str = "data:image/jpeg;base64,aGVsbG8=";

    #[tokio::test]
    async fn success_returns_data_url_with_backend_mime() {
        let backend = FakeBackend::returning(Ok(InlineImage {
            mime_type: "image/png".to_string(),
            data: "d29ybGQ=".to_string(),
        }));

        let result = edit_image(&backend, SOURCE, "remove background")
            .await
            .unwrap();

        assert_eq!(result, "data:image/png;base64,d29ybGQ=");
        assert!(result.starts_with("data:"));
    }

    #[tokio::test]
    async fn forwards_payload_and_preamble() {
        let backend = FakeBackend::returning(Ok(InlineImage {
            mime_type: "image/png".to_string(),
            data: "d29ybGQ=".to_string(),
        }));

        edit_image(&backend, SOURCE, "remove background")
            .await
            .unwrap();

        let image = backend.seen_image.lock().unwrap().clone().unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert_eq!(image.data, "aGVsbG8=");

        let prompt = backend.seen_prompt.lock().unwrap().clone().unwrap();
        assert!(prompt.starts_with(EDIT_PREAMBLE));
        assert!(prompt.ends_with("Instructions: remove background"));
    }

    #[tokio::test]
    async fn malformed_source_fails_before_backend_call() {
        let backend = FakeBackend::returning(Ok(InlineImage {
            mime_type: "image/png".to_string(),
            data: "d29ybGQ=".to_string(),
        }));

        let err = edit_image(&backend, "not-a-data-url", "x").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidDataUrl(_)));
        assert!(backend.seen_image.lock().unwrap().is_none());
    }

    #[tokio::test]
    async fn no_candidate_surfaces_no_response() {
        let backend = FakeBackend::returning(Err(AppError::NoResponse));
        let err = edit_image(&backend, SOURCE, "x").await.unwrap_err();
        assert!(matches!(err, AppError::NoResponse));
    }

    #[tokio::test]
    async fn no_inline_part_surfaces_no_image() {
        let backend = FakeBackend::returning(Err(AppError::NoImage));
        let err = edit_image(&backend, SOURCE, "x").await.unwrap_err();
        assert!(matches!(err, AppError::NoImage));
    }

    #[tokio::test]
    async fn service_error_is_propagated() {
        let backend = FakeBackend::returning(Err(AppError::gemini("quota exceeded")));
        let err = edit_image(&backend, SOURCE, "x").await.unwrap_err();
        assert!(matches!(err, AppError::GeminiApi(_)));
    }

    #[tokio::test]
    async fn ask_assistant_returns_reply() {
        let backend = FakeBackend::returning(Err(AppError::NoResponse));
        let reply = ask_assistant(&backend, "how do I swap clothes?")
            .await
            .unwrap();
        assert_eq!(reply, "reply");
    }
}
