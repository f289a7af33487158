//! Extension to media type mapping.

use std::path::Path;

/// Media type served when the extension is unmapped.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Derive the media type for a path from its file extension.
///
/// The table covers the asset types a device image actually ships
/// (markup, scripts, styles, images, fonts). Anything else is served
/// as an opaque byte stream.
#[must_use]
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    match ext.to_ascii_lowercase().as_str() {
        "html" | "htm" => "text/html; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "js" | "mjs" => "text/javascript; charset=utf-8",
        "json" => "application/json",
        "xml" => "application/xml",
        "txt" => "text/plain; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "eot" => "application/vnd.ms-fontobject",
        "wasm" => "application/wasm",
        "gz" => "application/gzip",
        _ => OCTET_STREAM,
    }
}
