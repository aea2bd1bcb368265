//! Photo Studio Core Library
//!
//! This library provides the core functionality for the AI Photo Studio,
//! including the edit request adapter, data-URL handling, and the
//! desktop studio UI built on Gemini AI.
//!
//! # Overview
//!
//! The studio lets users load a photo, apply generative edits with canned
//! or free-text instructions, preview the result, and save it. The
//! library handles:
//!
//! - **Data URLs**: parsing and encoding via [`data_url`]
//! - **Edit Adapter**: the request/response contract via [`editor`]
//! - **AI Integration**: the Gemini backend via [`gemini`]
//! - **File Transfer**: photo load/save via [`files`]
//! - **User Interface**: the studio window via [`ui`]
//!
//! # Quick Start
//!
//! The simplest way to use the library is through the [`PhotoStudio`] facade:
//!
//! ```ignore
//! use photo_studio_core::PhotoStudio;
//!
//! // Initialize with environment configuration
//! let studio = PhotoStudio::new()?;
//!
//! // Headless edit
//! let edited = studio.edit_file("portrait.jpg".as_ref(), "remove background").await?;
//!
//! // Or launch the interactive window
//! studio.run_studio(None)?;
//! ```
//!
//! # Module Structure
//!
//! - [`catalog`]: static prompt catalog (wardrobe options, canned actions)
//! - [`config`]: configuration loading and management
//! - [`data_url`]: base64 data URL codec
//! - [`editor`]: the edit request adapter and backend capability trait
//! - [`error`]: error types and result aliases
//! - [`files`]: photo upload/download paths
//! - [`gemini`]: Gemini backend implementation
//! - [`ui`]: user interface components

pub mod catalog;
pub mod config;
pub mod data_url;
pub mod editor;
pub mod error;
pub mod files;
pub mod gemini;
pub mod ui;

// Re-export primary types for convenience
pub use config::Config;
pub use data_url::DataUrl;
pub use editor::{GenerativeBackend, InlineImage};
pub use error::{AppError, Result};
pub use gemini::GeminiClient;

use std::path::Path;

/// Main entry point for the photo studio.
///
/// This struct provides a facade over the various subsystems,
/// handling initialization and orchestration. It's the recommended
/// way to use the library for most use cases.
///
/// # Example
///
/// ```ignore
/// use photo_studio_core::PhotoStudio;
///
/// let studio = PhotoStudio::new()?;
/// studio.run_studio(None)?;
/// ```
pub struct PhotoStudio {
    config: Config,
}

impl PhotoStudio {
    /// Creates a new studio instance with default configuration.
    ///
    /// Loads configuration from environment variables (including `.env` files).
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing from the environment.
    pub fn new() -> Result<Self> {
        let config = Config::load()?;
        Ok(Self { config })
    }

    /// Creates an instance with custom configuration.
    ///
    /// Use this when you need to override environment-based configuration,
    /// such as specifying a different model or API key.
    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    /// Edits a photo loaded from disk, returning the result as a data URL.
    ///
    /// # Arguments
    /// * `path` - Path to the source image file
    /// * `instruction` - Natural-language edit instruction
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the credential is
    /// missing, or the service fails to produce an image.
    pub async fn edit_file(&self, path: &Path, instruction: &str) -> Result<String> {
        let data_url = files::load_image(path)?;
        self.edit_data_url(&data_url, instruction).await
    }

    /// Edits a data-URL-encoded photo, returning the result as a data URL.
    pub async fn edit_data_url(&self, data_url: &str, instruction: &str) -> Result<String> {
        let client = GeminiClient::for_image_editing(&self.config)?;
        editor::edit_image(&client, data_url, instruction).await
    }

    /// Sends a free-text question to the studio assistant.
    pub async fn chat(&self, message: &str) -> Result<String> {
        let client = GeminiClient::for_chat(&self.config)?;
        editor::ask_assistant(&client, message).await
    }

    /// Launches the interactive studio window.
    ///
    /// # Arguments
    /// * `initial` - An optional data-URL photo to pre-load
    pub fn run_studio(&self, initial: Option<String>) -> Result<()> {
        ui::run_studio(initial, self.config.clone())
    }

    /// Returns a reference to the current configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns a mutable reference to the configuration.
    ///
    /// Allows modifying settings like the model names after initialization.
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}

/// Initializes the library by loading environment variables.
///
/// Call this once at application startup before using any other functions.
/// This loads `.env` files if present and sets up the environment.
///
/// # Example
///
/// ```ignore
/// photo_studio_core::init();
/// let config = photo_studio_core::Config::load()?;
/// ```
pub fn init() {
    let _ = dotenvy::dotenv();
}
