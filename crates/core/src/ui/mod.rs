//! User interface components for the photo studio.
//!
//! This module provides the desktop studio window: photo preview,
//! canned AI edit actions, the wardrobe picker, and the help chat,
//! all backed by Google's Gemini API.
//!
//! # Architecture
//!
//! The UI is split into focused submodules:
//! - [`state`]: the image state machine, request tokens and event types
//! - [`settings`]: user preferences and persistence
//! - [`rendering`]: texture decoding and drawing helpers
//! - [`studio`]: the main window logic
//!
//! # Usage
//!
//! ```ignore
//! use photo_studio_core::ui;
//! use photo_studio_core::Config;
//!
//! let config = Config::load()?;
//!
//! // Launch the studio window with no photo loaded
//! ui::run_studio(None, config)?;
//! ```

mod rendering;
mod settings;
mod state;
mod studio;

// Public API exports
pub use settings::{Settings, AVAILABLE_CHAT_MODELS, AVAILABLE_IMAGE_MODELS};
pub use state::{ChatMessage, ChatRole, ImageState, RequestSlot, UiMode};
pub use studio::StudioApp;

use crate::config::Config;
use crate::error::Result;

/// Launches the studio window.
///
/// Blocks until the user closes the window.
///
/// # Arguments
/// * `initial` - An optional data-URL photo to pre-load
/// * `config` - Application configuration with API keys and model names
pub fn run_studio(initial: Option<String>, config: Config) -> Result<()> {
    studio::run(initial, config)
}
