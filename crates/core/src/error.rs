//! Error types for the photo-studio-core library.
//!
//! This module provides granular error variants for different failure modes,
//! enabling precise error handling and user-friendly error messages.

use thiserror::Error;

/// Errors that can occur within the photo-studio-core library.
///
/// Each variant represents a specific failure mode with contextual information
/// to help diagnose and handle errors appropriately.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors (missing keys, invalid values).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The supplied string is not a well-formed base64 data URL.
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// Image decoding or encoding failed.
    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    /// The AI service returned no response candidate.
    #[error("No response received from the AI service")]
    NoResponse,

    /// The AI service responded, but produced no image payload.
    #[error("The AI did not produce an image")]
    NoImage,

    /// General Gemini API error (transport, quota, malformed request).
    #[error("Gemini API error: {0}")]
    GeminiApi(String),

    /// Rate limited by the Gemini API.
    #[error("Rate limited by Gemini API, please retry later")]
    RateLimited,

    /// UI-related errors (rendering, window management).
    #[error("UI error: {0}")]
    Ui(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An unclassified error.
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AppError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates a data URL error with the given message.
    pub fn data_url(msg: impl Into<String>) -> Self {
        Self::InvalidDataUrl(msg.into())
    }

    /// Creates an image processing error with the given message.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::ImageProcessing(msg.into())
    }

    /// Creates a Gemini API error with the given message.
    pub fn gemini(msg: impl Into<String>) -> Self {
        Self::GeminiApi(msg.into())
    }

    /// Creates a UI error with the given message.
    pub fn ui(msg: impl Into<String>) -> Self {
        Self::Ui(msg.into())
    }
}

/// A convenient alias for Result with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
