//! Artifact Inspector
//!
//! Derives image metadata (pixel dimensions, byte size, format, mime type)
//! from a file without mutating it, and loads bytes for inline transport.
//! Dimensions come from a header-only probe; format and mime type come from
//! the file extension, not content sniffing, so a mismatched extension
//! yields a wrong format label. Metadata is recomputed on every call.

use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs;
use std::path::Path;

use crate::mcp::types::ToolError;

/// Image extensions accepted by pick_image, lowercase, without the dot
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "bmp", "webp", "heic", "heif"];

/// Read-only facts about an image file
#[derive(Debug, Clone)]
pub struct ImageMetadata {
    pub filename: String,
    /// Format label taken from the extension (e.g., "png")
    pub format: String,
    pub width: u64,
    pub height: u64,
    pub size_bytes: u64,
    /// Size in KB with two decimals, e.g. "12.34"
    pub size_kb: String,
    pub mime_type: String,
    /// Last modification time, RFC 3339 with millisecond precision
    pub modified: Option<String>,
}

/// Map an extension (lowercase, no dot) to a mime type.
/// Unknown extensions default to image/jpeg.
pub fn mime_for_extension(ext: &str) -> &'static str {
    match ext {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        _ => "image/jpeg",
    }
}

/// Lowercase extension of a path, without the leading dot
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
}

/// Derive [`ImageMetadata`] for the file at `path`
pub fn inspect(path: &Path) -> Result<ImageMetadata, ToolError> {
    let dimensions = imagesize::size(path)
        .map_err(|err| ToolError::Unreadable(format!("{}: {}", path.display(), err)))?;
    let stat = fs::metadata(path)
        .map_err(|err| ToolError::Unreadable(format!("{}: {}", path.display(), err)))?;

    let ext = extension_of(path).unwrap_or_default();
    let size_bytes = stat.len();
    let modified = stat.modified().ok().map(|mtime| {
        DateTime::<Utc>::from(mtime).to_rfc3339_opts(SecondsFormat::Millis, true)
    });

    Ok(ImageMetadata {
        filename: path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default(),
        format: ext.clone(),
        width: dimensions.width as u64,
        height: dimensions.height as u64,
        size_bytes,
        size_kb: format!("{:.2}", size_bytes as f64 / 1024.0),
        mime_type: mime_for_extension(&ext).to_string(),
        modified,
    })
}

/// Load the file's bytes and encode them for inline transport
pub fn load_base64(path: &Path) -> Result<String, ToolError> {
    let bytes = fs::read(path)
        .map_err(|err| ToolError::Unreadable(format!("{}: {}", path.display(), err)))?;
    Ok(general_purpose::STANDARD.encode(bytes))
}
