//! Filesystem node records and their materialization

use crate::error::{BuildError, EnrichmentError};
use crate::markdown::Document;
use crate::tree::hasher::{self, DirectoryIdentity};
use crate::tree::media;
use crate::tree::walker::relative_path;
use crate::types::{Digest, NodeId};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use std::time::SystemTime;

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Directory,
}

/// Outcome of markdown enrichment for one node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum EnrichmentStatus {
    /// Not a markdown document
    Skipped,
    /// Markdown document awaiting enrichment
    Pending,
    Enriched,
    Failed { reason: String },
}

/// Materialized record for one discovered file or directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub absolute_path: String,
    pub relative_path: String,
    pub extension: String,
    pub file_size: u64,
    pub content_digest: Digest,
    pub media_type: Option<String>,
    pub created: String,
    pub updated: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_content: Option<String>,
    pub enrichment: EnrichmentStatus,
}

/// Format a filesystem timestamp as RFC 3339 UTC with millisecond precision.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl Node {
    /// Stat, hash and classify one discovered path.
    ///
    /// Markdown files come back with the bytes already read for hashing, so enrichment
    /// works from the same read.
    pub async fn materialize(
        path: &Path,
        root: &Path,
    ) -> Result<(Node, Option<Vec<u8>>), BuildError> {
        let io_error = |source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        };
        let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;

        let absolute_path = path.to_string_lossy().replace('\\', "/");
        let relative_path = relative_path(root, path);
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        let updated = metadata.modified().map(format_timestamp).map_err(io_error)?;
        let created = metadata
            .created()
            .map(format_timestamp)
            .unwrap_or_else(|_| updated.clone());

        let (kind, content_digest, media_type, enrichment, source) = if metadata.is_dir() {
            let digest = hasher::directory_digest(&DirectoryIdentity {
                absolute_path: &absolute_path,
                file_size: metadata.len(),
                created: &created,
                updated: &updated,
            });
            (NodeKind::Directory, digest, None, EnrichmentStatus::Skipped, None)
        } else {
            let bytes = tokio::fs::read(path).await.map_err(io_error)?;
            let media_type = media::media_type_for_extension(&extension);
            let digest = hasher::content_digest(&bytes);
            let (enrichment, source) = if media::is_markdown(media_type) {
                (EnrichmentStatus::Pending, Some(bytes))
            } else {
                (EnrichmentStatus::Skipped, None)
            };
            (
                NodeKind::File,
                digest,
                Some(media_type.to_string()),
                enrichment,
                source,
            )
        };

        let node = Node {
            id: hasher::compute_node_id(&absolute_path),
            kind,
            absolute_path,
            relative_path,
            extension,
            file_size: metadata.len(),
            content_digest,
            media_type,
            created,
            updated,
            frontmatter: None,
            content: None,
            raw_content: None,
            enrichment,
        };
        Ok((node, source))
    }

    pub fn is_markdown(&self) -> bool {
        self.kind == NodeKind::File
            && self
                .media_type
                .as_deref()
                .map(media::is_markdown)
                .unwrap_or(false)
    }

    /// Whether this node becomes a page (a markdown file with the `md` extension).
    pub fn is_page(&self) -> bool {
        self.kind == NodeKind::File && self.extension == "md"
    }

    /// Record the enrichment outcome. A failure leaves `frontmatter`, `content` and
    /// `raw_content` unset.
    pub fn apply_enrichment(&mut self, result: Result<Document, EnrichmentError>) {
        match result {
            Ok(document) => {
                self.frontmatter = Some(document.frontmatter);
                self.content = Some(document.content);
                self.raw_content = Some(document.raw_content);
                self.enrichment = EnrichmentStatus::Enriched;
            }
            Err(err) => {
                self.frontmatter = None;
                self.content = None;
                self.raw_content = None;
                self.enrichment = EnrichmentStatus::Failed {
                    reason: err.to_string(),
                };
            }
        }
    }
}
