//! Core types shared by the graph builder and the query engine.

/// NodeId: lowercase hex blake3 hash of a node's absolute path
pub type NodeId = String;

/// Digest: lowercase hex blake3 hash of file content or directory metadata
pub type Digest = String;

/// Media type assigned to markdown documents
pub const MARKDOWN_MEDIA_TYPE: &str = "text/markdown";

/// Media type used when the extension is not recognized
pub const DEFAULT_MEDIA_TYPE: &str = "application/octet-stream";
