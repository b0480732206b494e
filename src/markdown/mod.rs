//! Markdown enrichment
//!
//! Splits a document into its YAML front matter and body, then renders the body to HTML.

pub mod frontmatter;
pub mod render;

use crate::error::EnrichmentError;
use serde_json::{Map, Value};

/// Structured fields extracted from one markdown document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub frontmatter: Map<String, Value>,
    /// Rendered HTML body
    pub content: String,
    /// Body with the front matter block removed
    pub raw_content: String,
}

/// Parse front matter and render the body of a markdown source.
///
/// The returned front matter always carries a `title` key, empty when the document sets none.
pub fn enrich_document(source: &str) -> Result<Document, EnrichmentError> {
    let (frontmatter, body) = frontmatter::split(source)?;
    let mut frontmatter = frontmatter.unwrap_or_default();
    frontmatter
        .entry("title")
        .or_insert_with(|| Value::String(String::new()));

    Ok(Document {
        frontmatter,
        content: render::render_html(body),
        raw_content: body.to_string(),
    })
}

/// Enrich a document from raw file bytes.
pub fn enrich_bytes(bytes: Vec<u8>) -> Result<Document, EnrichmentError> {
    let source = String::from_utf8(bytes)
        .map_err(|e| EnrichmentError::Read(format!("invalid UTF-8: {}", e)))?;
    enrich_document(&source)
}
