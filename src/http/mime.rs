//! MIME type detection based on file extensions.

use std::path::Path;

pub const TEXT_HTML: &str = "text/html; charset=utf-8";
pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
pub const TEXT_CSS: &str = "text/css";

/// Infers a content type from the file extension, falling back to
/// `application/octet-stream` for unknown or missing extensions.
pub fn from_path(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().to_string()
}
