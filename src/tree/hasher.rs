//! Identity and digest computation for filesystem nodes

use crate::types::{Digest, NodeId};
use serde::Serialize;

/// Compute the NodeId for an absolute path.
///
/// The id depends on nothing but the path string, so rebuilding the same tree yields the
/// same ids.
pub fn compute_node_id(absolute_path: &str) -> NodeId {
    hex::encode(blake3::hash(absolute_path.as_bytes()).as_bytes())
}

/// Digest of file content
pub fn content_digest(bytes: &[u8]) -> Digest {
    hex::encode(blake3::hash(bytes).as_bytes())
}

/// Directory metadata hashed in place of content
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryIdentity<'a> {
    pub absolute_path: &'a str,
    pub file_size: u64,
    pub created: &'a str,
    pub updated: &'a str,
}

/// Digest of a directory's identity metadata
pub fn directory_digest(identity: &DirectoryIdentity<'_>) -> Digest {
    // Serializing a struct of strings and integers cannot fail.
    let encoded = serde_json::to_vec(identity).unwrap_or_default();
    content_digest(&encoded)
}
