//! Main studio window.
//!
//! This module contains the `StudioApp` struct which implements the
//! `eframe::App` trait for the photo-editing window.

use super::rendering::{
    color_image_from_data_url, draw_empty_state, draw_error_banner, draw_processing_indicator,
};
use super::settings::{Settings, AVAILABLE_CHAT_MODELS, AVAILABLE_IMAGE_MODELS};
use super::state::{ChatMessage, ChatRole, ImageState, RequestSlot, StudioEvent, UiMode};
use crate::catalog::{APP_TITLE, CLOTHING_OPTIONS, REMOVE_BACKGROUND_PROMPT};
use crate::config::Config;
use crate::editor::{self, GenerativeBackend};
use crate::error::{AppError, Result};
use crate::files;
use crate::gemini::GeminiClient;
use eframe::egui;
use egui_commonmark::{CommonMarkCache, CommonMarkViewer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

const CHAT_WELCOME: &str = "Welcome! I'm the studio assistant. How can I help you today?";
const CHAT_BUSY_FALLBACK: &str = "The server is a bit busy right now. Please try again.";
const CHAT_EMPTY_FALLBACK: &str = "Sorry, I didn't quite get that.";

/// The main studio application window.
///
/// Holds the image state machine, the chat log, and the channel that
/// background request threads report through.
pub struct StudioApp {
    config: Config,

    // Image state
    state: ImageState,
    mode: UiMode,

    // Preview texture, cached per data URL
    preview_src: Option<String>,
    preview_texture: Option<egui::TextureHandle>,

    // Request tokens + event channel
    edit_slot: RequestSlot,
    chat_slot: RequestSlot,
    rx: Receiver<StudioEvent>,
    tx: Sender<StudioEvent>,

    // Upload path entry
    path_input: String,
    last_saved: Option<PathBuf>,

    // Chat state
    chat_messages: Vec<ChatMessage>,
    chat_input: String,
    chat_loading: bool,

    // Markdown rendering
    markdown_cache: CommonMarkCache,

    // Settings
    settings: Settings,
    show_settings: bool,
}

impl StudioApp {
    /// Creates a new studio window, optionally pre-loaded with a photo.
    ///
    /// # Arguments
    /// * `initial` - A data-URL photo to start with (e.g. from the CLI)
    /// * `config` - Application configuration
    pub fn new(initial: Option<String>, config: Config) -> Self {
        let (tx, rx) = channel();

        // Load settings, using config's API key as fallback
        let mut settings = Settings::load();
        if settings.api_key.is_empty() {
            settings.api_key = config.gemini_api_key.clone();
        }

        let mut state = ImageState::default();
        if let Some(data_url) = initial {
            state.load(data_url);
        }

        Self {
            config,
            state,
            mode: UiMode::Studio,
            preview_src: None,
            preview_texture: None,
            edit_slot: RequestSlot::default(),
            chat_slot: RequestSlot::default(),
            rx,
            tx,
            path_input: String::new(),
            last_saved: None,
            chat_messages: vec![ChatMessage::assistant(CHAT_WELCOME)],
            chat_input: String::new(),
            chat_loading: false,
            markdown_cache: CommonMarkCache::default(),
            settings,
            show_settings: false,
        }
    }

    /// Builds the effective configuration from settings overrides.
    fn effective_config(&self) -> Result<Config> {
        Config::builder()
            .with_api_key(&self.settings.api_key)
            .with_image_model(&self.settings.image_model)
            .with_chat_model(&self.settings.chat_model)
            .build()
    }

    /// Submits an edit request for the current photo.
    ///
    /// Spawns a background thread for the API call; the result is sent
    /// through the channel tagged with a fresh request token, so a
    /// response that arrives after a clear or a newer request is inert.
    fn submit_edit(&mut self, instruction: String) {
        let Some(source) = self.state.original.clone() else {
            return;
        };
        if !self.state.begin_edit() {
            return;
        }
        self.mode = UiMode::Studio;
        self.last_saved = None;

        if let Err(e) = self.settings.save() {
            eprintln!("Warning: Failed to save settings: {}", e);
        }

        let token = self.edit_slot.issue();
        let tx = self.tx.clone();
        let config = self.effective_config();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build();

            let rt = match runtime {
                Ok(rt) => rt,
                Err(e) => {
                    let _ = tx.send(StudioEvent::EditFailed {
                        token,
                        message: format!("Failed to create async runtime: {}", e),
                    });
                    return;
                }
            };

            rt.block_on(async {
                let config = match config {
                    Ok(c) => c,
                    Err(e) => {
                        let _ = tx.send(StudioEvent::EditFailed {
                            token,
                            message: e.to_string(),
                        });
                        return;
                    }
                };

                let client = match GeminiClient::for_image_editing(&config) {
                    Ok(c) => c,
                    Err(e) => {
                        let _ = tx.send(StudioEvent::EditFailed {
                            token,
                            message: e.to_string(),
                        });
                        return;
                    }
                };

                match editor::edit_image(&client, &source, &instruction).await {
                    Ok(data_url) => {
                        let _ = tx.send(StudioEvent::EditDone { token, data_url });
                    }
                    Err(e) => {
                        let _ = tx.send(StudioEvent::EditFailed {
                            token,
                            message: e.to_string(),
                        });
                    }
                }
            });
        });
    }

    /// Submits the current chat input to the assistant.
    fn submit_chat(&mut self) {
        let message = self.chat_input.trim().to_string();
        if message.is_empty() || self.chat_loading {
            return;
        }
        self.chat_input.clear();
        self.chat_messages.push(ChatMessage::user(message.clone()));
        self.chat_loading = true;

        let token = self.chat_slot.issue();
        let tx = self.tx.clone();
        let config = self.effective_config();
        let system_prompt = self.settings.system_prompt.clone();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build();

            let rt = match runtime {
                Ok(rt) => rt,
                Err(_) => {
                    let _ = tx.send(StudioEvent::ChatFailed { token });
                    return;
                }
            };

            rt.block_on(async {
                let client = match config.and_then(|c| GeminiClient::for_chat(&c)) {
                    Ok(c) => c,
                    Err(_) => {
                        let _ = tx.send(StudioEvent::ChatFailed { token });
                        return;
                    }
                };

                let system_prompt = if system_prompt.trim().is_empty() {
                    Some(editor::ASSISTANT_SYSTEM_PROMPT.to_string())
                } else {
                    Some(system_prompt)
                };

                match client.generate_text(message, system_prompt).await {
                    Ok(text) if text.trim().is_empty() => {
                        let _ = tx.send(StudioEvent::ChatReply {
                            token,
                            text: CHAT_EMPTY_FALLBACK.to_string(),
                        });
                    }
                    Ok(text) => {
                        let _ = tx.send(StudioEvent::ChatReply { token, text });
                    }
                    Err(_) => {
                        let _ = tx.send(StudioEvent::ChatFailed { token });
                    }
                }
            });
        });
    }

    /// Drains events from background threads, discarding stale ones.
    fn process_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                StudioEvent::EditDone { token, data_url } => {
                    if self.edit_slot.accepts(token) {
                        self.state.finish_success(data_url);
                        ctx.request_repaint();
                    }
                }
                StudioEvent::EditFailed { token, message } => {
                    if self.edit_slot.accepts(token) {
                        self.state.finish_failure(message);
                        ctx.request_repaint();
                    }
                }
                StudioEvent::ChatReply { token, text } => {
                    if self.chat_slot.accepts(token) {
                        self.chat_messages.push(ChatMessage::assistant(text));
                        self.chat_loading = false;
                        ctx.request_repaint();
                    }
                }
                StudioEvent::ChatFailed { token } => {
                    if self.chat_slot.accepts(token) {
                        self.chat_messages
                            .push(ChatMessage::assistant(CHAT_BUSY_FALLBACK));
                        self.chat_loading = false;
                        ctx.request_repaint();
                    }
                }
            }
        }
    }

    /// Loads a photo from disk, replacing the image state wholesale.
    fn load_photo(&mut self, path: &Path) {
        match files::load_image(path) {
            Ok(data_url) => {
                // A new photo invalidates any in-flight edit
                self.edit_slot.invalidate();
                self.state.load(data_url);
                self.last_saved = None;
            }
            Err(e) => {
                self.state.error = Some(format!("Could not load photo: {}", e));
            }
        }
    }

    /// Accepts photos dropped onto the window.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped: Vec<_> = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.into_iter().find_map(|f| f.path) {
            self.load_photo(&path);
        }
    }

    /// Uploads the preview texture when the edited data URL changes.
    fn update_preview_texture(&mut self, ctx: &egui::Context) {
        let Some(edited) = self.state.edited.clone() else {
            self.preview_src = None;
            self.preview_texture = None;
            return;
        };

        if self.preview_src.as_deref() == Some(edited.as_str()) {
            return;
        }

        match color_image_from_data_url(&edited) {
            Ok(color_image) => {
                self.preview_texture =
                    Some(ctx.load_texture("preview", color_image, egui::TextureOptions::LINEAR));
                self.preview_src = Some(edited);
            }
            Err(e) => {
                self.preview_src = Some(edited);
                self.preview_texture = None;
                self.state.error = Some(format!("Preview failed: {}", e));
            }
        }
    }

    /// Saves the current edited photo to the pictures folder.
    fn download(&mut self) {
        let Some(edited) = self.state.edited.clone() else {
            return;
        };
        match files::save_edited(&edited, &files::default_output_dir()) {
            Ok(path) => {
                self.last_saved = Some(path);
                self.state.error = None;
            }
            Err(e) => {
                self.state.error = Some(format!("Save failed: {}", e));
            }
        }
    }

    fn clear(&mut self) {
        // Invalidate so a late response cannot resurrect cleared state
        self.edit_slot.invalidate();
        self.state.clear();
        self.preview_src = None;
        self.preview_texture = None;
        self.last_saved = None;
    }

    fn render_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading(APP_TITLE);
        ui.separator();

        if !self.state.has_image() {
            ui.label("Load a photo to begin:");
            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.path_input)
                        .hint_text("/path/to/photo.jpg")
                        .desired_width(180.0),
                );
                if ui.button("Load").clicked() && !self.path_input.trim().is_empty() {
                    let path = PathBuf::from(self.path_input.trim());
                    self.load_photo(&path);
                }
            });
            ui.label(
                egui::RichText::new("JPG, PNG and WEBP are supported")
                    .small()
                    .color(egui::Color32::GRAY),
            );
        } else {
            let busy = self.state.is_processing;

            ui.label(egui::RichText::new("AI Tools").small().strong());
            if ui
                .add_enabled(!busy, egui::Button::new("Remove Background"))
                .clicked()
            {
                self.submit_edit(REMOVE_BACKGROUND_PROMPT.to_string());
            }
            if ui
                .add_enabled(!busy, egui::Button::new("Select Formal Clothing"))
                .clicked()
            {
                self.mode = UiMode::Wardrobe;
            }

            ui.separator();
            ui.horizontal(|ui| {
                if ui.add_enabled(!busy, egui::Button::new("Restore")).clicked() {
                    self.state.restore();
                }
                if ui.button("Clear").clicked() {
                    self.clear();
                }
            });

            if self.state.edited.is_some() {
                ui.separator();
                if ui.button("Download Final").clicked() {
                    self.download();
                }
                if let Some(path) = &self.last_saved {
                    ui.label(
                        egui::RichText::new(format!("Saved to {}", path.display()))
                            .small()
                            .color(egui::Color32::LIGHT_GREEN),
                    );
                }
            }
        }

        ui.separator();
        ui.horizontal(|ui| {
            if ui.button("💬 Help").clicked() {
                self.mode = UiMode::Help;
            }
            if ui.button("⚙").clicked() {
                self.show_settings = !self.show_settings;
            }
        });

        if self.show_settings {
            self.render_settings_ui(ui);
        }
    }

    /// Renders the settings panel.
    fn render_settings_ui(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        ui.label("Settings");

        egui::ComboBox::from_label("Image model")
            .selected_text(&self.settings.image_model)
            .show_ui(ui, |ui| {
                for model in AVAILABLE_IMAGE_MODELS {
                    ui.selectable_value(&mut self.settings.image_model, model.to_string(), *model);
                }
            });

        egui::ComboBox::from_label("Chat model")
            .selected_text(&self.settings.chat_model)
            .show_ui(ui, |ui| {
                for model in AVAILABLE_CHAT_MODELS {
                    ui.selectable_value(&mut self.settings.chat_model, model.to_string(), *model);
                }
            });

        ui.label("API Key:");
        ui.add(
            egui::TextEdit::singleline(&mut self.settings.api_key)
                .password(true)
                .hint_text("Paste Gemini API Key"),
        );

        ui.label("Assistant Instructions:");
        ui.add(
            egui::TextEdit::multiline(&mut self.settings.system_prompt)
                .desired_rows(3)
                .desired_width(f32::INFINITY),
        );
    }

    fn render_preview(&mut self, ui: &mut egui::Ui) {
        if self.state.is_processing {
            draw_processing_indicator(ui);
            return;
        }

        if !self.state.has_image() {
            draw_empty_state(ui);
            return;
        }

        if let Some(texture) = &self.preview_texture {
            let available = ui.available_size() - egui::vec2(0.0, 40.0);
            let tex_size = texture.size_vec2();
            let scale = (available.x / tex_size.x)
                .min(available.y / tex_size.y)
                .min(1.0);

            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.image((texture.id(), tex_size * scale));
            });
        }

        if let Some(error) = self.state.error.clone() {
            ui.add_space(8.0);
            draw_error_banner(ui, &error);
        }
    }

    fn render_wardrobe(&mut self, ctx: &egui::Context) {
        let mut open = true;
        let mut chosen: Option<String> = None;

        egui::Window::new("Wardrobe Hub")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Pick an outfit to apply to the loaded photo:");
                ui.add_space(6.0);
                egui::Grid::new("wardrobe_grid").num_columns(4).show(ui, |ui| {
                    for (i, option) in CLOTHING_OPTIONS.iter().enumerate() {
                        let button = egui::Button::new(option.name)
                            .min_size(egui::vec2(110.0, 40.0));
                        if ui
                            .add_enabled(!self.state.is_processing, button)
                            .on_hover_text(option.prompt)
                            .clicked()
                        {
                            chosen = Some(option.prompt.to_string());
                        }
                        if (i + 1) % 4 == 0 {
                            ui.end_row();
                        }
                    }
                });
            });

        if let Some(prompt) = chosen {
            self.submit_edit(prompt);
        } else if !open {
            self.mode = UiMode::Studio;
        }
    }

    fn render_help(&mut self, ctx: &egui::Context) {
        let mut open = true;
        let mut send = false;
        let mut copy_text: Option<String> = None;

        egui::Window::new("Live Support")
            .open(&mut open)
            .collapsible(false)
            .default_size(egui::vec2(380.0, 420.0))
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(300.0)
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        for (i, message) in self.chat_messages.clone().iter().enumerate() {
                            match message.role {
                                ChatRole::User => {
                                    ui.with_layout(
                                        egui::Layout::right_to_left(egui::Align::TOP),
                                        |ui| {
                                            ui.label(
                                                egui::RichText::new(&message.text)
                                                    .color(egui::Color32::LIGHT_BLUE),
                                            );
                                        },
                                    );
                                }
                                ChatRole::Assistant => {
                                    ui.push_id(i, |ui| {
                                        CommonMarkViewer::new().show(
                                            ui,
                                            &mut self.markdown_cache,
                                            &message.text,
                                        );
                                    });
                                }
                            }
                        }
                        if self.chat_loading {
                            ui.spinner();
                        }
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.chat_input)
                            .hint_text("What would you like to know?")
                            .desired_width(280.0),
                    );
                    let enter_pressed =
                        response.has_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("➤").clicked() || enter_pressed {
                        send = true;
                    }
                    if ui.button("Copy").clicked() {
                        copy_text = self
                            .chat_messages
                            .iter()
                            .rev()
                            .find(|m| m.role == ChatRole::Assistant)
                            .map(|m| m.text.clone());
                    }
                });
            });

        if send {
            self.submit_chat();
        }
        if let Some(text) = copy_text {
            if let Ok(mut clipboard) = arboard::Clipboard::new() {
                let _ = clipboard.set_text(text);
            }
        }
        if !open {
            self.mode = UiMode::Studio;
        }
    }
}

impl eframe::App for StudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.process_events(ctx);
        self.handle_dropped_files(ctx);
        self.update_preview_texture(ctx);

        // While a request is outstanding, keep polling the channel
        if self.state.is_processing || self.chat_loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::SidePanel::left("controls")
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| {
                self.render_controls(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_preview(ui);
        });

        match self.mode {
            UiMode::Studio => {}
            UiMode::Wardrobe => self.render_wardrobe(ctx),
            UiMode::Help => self.render_help(ctx),
        }
    }
}

/// Launches the studio window and returns when the user closes it.
///
/// # Arguments
/// * `initial` - An optional data-URL photo to pre-load
/// * `config` - Application configuration
pub fn run(initial: Option<String>, config: Config) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 720.0])
            .with_title(APP_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(StudioApp::new(initial, config)) as Box<dyn eframe::App>)),
    )
    .map_err(|e| AppError::ui(format!("Failed to run UI: {}", e)))?;

    Ok(())
}
