//! Base64 data URL parsing and encoding.
//!
//! Images move through the studio as `data:<mime>;base64,<payload>` strings,
//! the same representation the Gemini API uses for inline image parts.
//! This module is the single place that splits and re-assembles that form.

use crate::error::{AppError, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::fmt;

/// MIME type assumed when a data URL omits one.
pub const DEFAULT_MIME: &str = "image/png";

/// A parsed base64 data URL.
///
/// `data` holds the base64 payload as-is; use [`DataUrl::decode`] to get
/// the raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub data: String,
}

impl DataUrl {
    /// Parses a `data:<mime>;base64,<payload>` string.
    ///
    /// A missing MIME type defaults to [`DEFAULT_MIME`]. Anything that does
    /// not match the base64 data URL shape is rejected.
    ///
    /// # Errors
    /// Returns [`AppError::InvalidDataUrl`] for malformed input.
    pub fn parse(input: &str) -> Result<Self> {
        let rest = input
            .strip_prefix("data:")
            .ok_or_else(|| AppError::data_url("missing 'data:' prefix"))?;

        let (meta, payload) = rest
            .split_once(',')
            .ok_or_else(|| AppError::data_url("missing ',' separator"))?;

        let mime = meta
            .strip_suffix(";base64")
            .ok_or_else(|| AppError::data_url("payload is not base64-encoded"))?;

        if payload.is_empty() {
            return Err(AppError::data_url("empty payload"));
        }

        let mime_type = if mime.is_empty() {
            DEFAULT_MIME.to_string()
        } else {
            mime.to_string()
        };

        Ok(Self {
            mime_type,
            data: payload.to_string(),
        })
    }

    /// Encodes raw bytes into a data URL with the given MIME type.
    pub fn encode(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: BASE64.encode(bytes),
        }
    }

    /// Decodes the base64 payload back into raw bytes.
    ///
    /// # Errors
    /// Returns [`AppError::InvalidDataUrl`] if the payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>> {
        BASE64
            .decode(&self.data)
            .map_err(|e| AppError::data_url(format!("bad base64 payload: {}", e)))
    }
}

impl fmt::Display for DataUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.mime_type, self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_well_formed() {
        let url = DataUrl::parse("data:image/jpeg;base64,aGVsbG8=").unwrap();
        assert_eq!(url.mime_type, "image/jpeg");
        assert_eq!(url.data, "aGVsbG8=");
        assert_eq!(url.decode().unwrap(), b"hello");
    }

    #[test]
    fn parse_defaults_missing_mime() {
        let url = DataUrl::parse("data:;base64,aGVsbG8=").unwrap();
        assert_eq!(url.mime_type, DEFAULT_MIME);
    }

    #[test]
    fn parse_rejects_missing_prefix() {
        assert!(matches!(
            DataUrl::parse("image/png;base64,aGVsbG8="),
            Err(AppError::InvalidDataUrl(_))
        ));
    }

    #[test]
    fn parse_rejects_non_base64_encoding() {
        assert!(DataUrl::parse("data:text/plain;charset=utf-8,hello").is_err());
    }

    #[test]
    fn parse_rejects_missing_separator() {
        assert!(DataUrl::parse("data:image/png;base64").is_err());
    }

    #[test]
    fn parse_rejects_empty_payload() {
        assert!(DataUrl::parse("data:image/png;base64,").is_err());
    }

    #[test]
    fn encode_round_trip() {
        let url = DataUrl::encode("image/webp", b"\x89PNG");
        assert_eq!(url.to_string(), format!("data:image/webp;base64,{}", url.data));
        let back = DataUrl::parse(&url.to_string()).unwrap();
        assert_eq!(back, url);
        assert_eq!(back.decode().unwrap(), b"\x89PNG");
    }

    #[test]
    fn decode_rejects_bad_payload() {
        let url = DataUrl {
            mime_type: "image/png".to_string(),
            data: "!!not base64!!".to_string(),
        };
        assert!(url.decode().is_err());
    }
}
