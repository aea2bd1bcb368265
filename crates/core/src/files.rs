//! Loading photos from disk and saving edited results.
//!
//! Upload is a file read plus data-URL encoding; download decodes the
//! current edited data URL and writes it under a timestamped filename.

use crate::data_url::DataUrl;
use crate::error::{AppError, Result};
use directories::UserDirs;
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Reads an image file and encodes it as a data URL.
///
/// The MIME type is sniffed from the file content via the `image` crate,
/// falling back to the extension, then to `image/png`.
///
/// # Errors
/// Returns [`AppError::Io`] if the file cannot be read.
pub fn load_image(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;

    let mime = image::guess_format(&bytes)
        .ok()
        .or_else(|| ImageFormat::from_path(path).ok())
        .map(|f| f.to_mime_type())
        .unwrap_or("image/png");

    Ok(DataUrl::encode(mime, &bytes).to_string())
}

/// Saves an edited data URL to `dir` under a timestamped filename.
///
/// The filename is `studio_<millis>.<ext>`, with the extension derived
/// from the MIME type embedded in the data URL. Returns the path written.
///
/// # Errors
/// Returns [`AppError::InvalidDataUrl`] if the data URL is malformed,
/// or [`AppError::Io`] if the write fails.
pub fn save_edited(data_url: &str, dir: &Path) -> Result<PathBuf> {
    let parsed = DataUrl::parse(data_url)?;
    let bytes = parsed.decode()?;

    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::Unknown(format!("System clock error: {}", e)))?
        .as_millis();

    let path = dir.join(format!(
        "studio_{}.{}",
        millis,
        extension_for_mime(&parsed.mime_type)
    ));
    fs::write(&path, bytes)?;

    Ok(path)
}

/// Default directory for saved results: the user's pictures folder,
/// or the current directory when no home is available.
pub fn default_output_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.picture_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 transparent PNG
    const PNG_BYTES: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48,
        0x44, 0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00,
        0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x44, 0x41, 0x54, 0x78,
        0x9C, 0x62, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00,
        0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ];

    #[test]
    fn load_image_sniffs_png() {
        let dir = std::env::temp_dir();
        let path = dir.join("studio_test_load.png");
        fs::write(&path, PNG_BYTES).unwrap();

        let data_url = load_image(&path).unwrap();
        assert!(data_url.starts_with("data:image/png;base64,"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn load_image_missing_file_is_io_error() {
        let err = load_image(Path::new("/nonexistent/photo.png")).unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn save_edited_writes_timestamped_file() {
        let data_url = DataUrl::encode("image/jpeg", b"fake-jpeg-bytes").to_string();
        let dir = std::env::temp_dir();

        let path = save_edited(&data_url, &dir).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("studio_"));
        assert!(name.ends_with(".jpg"));
        assert_eq!(fs::read(&path).unwrap(), b"fake-jpeg-bytes");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_edited_rejects_malformed_url() {
        assert!(save_edited("not a data url", Path::new(".")).is_err());
    }

    #[test]
    fn extension_mapping() {
        assert_eq!(extension_for_mime("image/jpeg"), "jpg");
        assert_eq!(extension_for_mime("image/webp"), "webp");
        assert_eq!(extension_for_mime("image/png"), "png");
        assert_eq!(extension_for_mime("application/octet-stream"), "png");
    }
}
