//! Rendering helpers for the studio window.
//!
//! Contains the data-URL-to-texture decoding path and small reusable
//! draw helpers used by the main window.

use crate::data_url::DataUrl;
use crate::error::{AppError, Result};
use eframe::egui;

/// Decodes a data URL into an egui color image ready for texture upload.
///
/// This is the expensive step (base64 decode + image decode + RGBA
/// conversion), so callers cache the result per data URL.
pub fn color_image_from_data_url(data_url: &str) -> Result<egui::ColorImage> {
    let parsed = DataUrl::parse(data_url)?;
    let bytes = parsed.decode()?;

    let decoded = image::load_from_memory(&bytes)
        .map_err(|e| AppError::image(format!("Failed to decode image: {}", e)))?;

    let rgba = decoded.to_rgba8();
    let size = [decoded.width() as usize, decoded.height() as usize];
    let pixels = rgba.as_flat_samples();

    Ok(egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice()))
}

/// Draws the dismissible error banner at the bottom of the preview area.
pub fn draw_error_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::default()
        .fill(egui::Color32::from_rgba_unmultiplied(120, 20, 20, 220))
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(format!("⚠ {}", message)).color(egui::Color32::LIGHT_RED),
            );
        });
}

/// Draws the processing indicator shown while an edit is outstanding.
pub fn draw_processing_indicator(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.4);
        ui.spinner();
        ui.add_space(8.0);
        ui.label(egui::RichText::new("Synthesizing pixels…").strong());
        ui.label(
            egui::RichText::new("Please wait, the AI is rendering")
                .small()
                .color(egui::Color32::GRAY),
        );
    });
}

/// Draws the placeholder shown before any photo is loaded.
pub fn draw_empty_state(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.35);
        ui.label(
            egui::RichText::new("Studio Ready")
                .heading()
                .color(egui::Color32::DARK_GRAY),
        );
        ui.label(
            egui::RichText::new("Drop a photo here, or enter a path below")
                .small()
                .color(egui::Color32::GRAY),
        );
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0B, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x63, 0x60, 0x00, 0x02, 0x00, 0x00, 0x05, 0x00, 0x01, 0x7A, 0x5E, 0xAB, 0x3F,
        0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn decodes_png_data_url() {
        let data_url = DataUrl::encode("image/png", PNG_BYTES).to_string();
        let img = color_image_from_data_url(&data_url).unwrap();
        assert_eq!(img.size, [1, 1]);
    }

    #[test]
    fn rejects_garbage_payload() {
        let data_url = DataUrl::encode("image/png", b"not an image").to_string();
        assert!(matches!(
            color_image_from_data_url(&data_url),
            Err(AppError::ImageProcessing(_))
        ));
    }

    #[test]
    fn rejects_malformed_data_url() {
        assert!(matches!(
            color_image_from_data_url("nope"),
            Err(AppError::InvalidDataUrl(_))
        ));
    }
}
