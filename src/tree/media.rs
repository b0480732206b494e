//! Media type lookup by file extension.

use crate::types::{DEFAULT_MEDIA_TYPE, MARKDOWN_MEDIA_TYPE};

/// Media type for a lowercase extension without the leading dot.
pub fn media_type_for_extension(extension: &str) -> &'static str {
    match extension {
        "md" | "markdown" | "mdown" | "mkd" => MARKDOWN_MEDIA_TYPE,
        "txt" | "text" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" | "mjs" => "application/javascript",
        "json" => "application/json",
        "xml" => "application/xml",
        "yaml" | "yml" => "text/yaml",
        "toml" => "application/toml",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "mp3" => "audio/mpeg",
        "mp4" => "video/mp4",
        _ => DEFAULT_MEDIA_TYPE,
    }
}

/// Whether a media type is handled by markdown enrichment.
pub fn is_markdown(media_type: &str) -> bool {
    media_type == MARKDOWN_MEDIA_TYPE || media_type == "text/x-markdown"
}
