//! Content Graph
//!
//! Turns materialized markdown nodes into routable pages, infers their hierarchy from slug
//! structure and persists the ordered page list.

pub mod builder;
pub mod parent;
pub mod persistence;
pub mod slug;

pub use builder::{BuildReport, GraphBuilder};

use crate::tree::{EnrichmentStatus, Node};
use crate::types::NodeId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Whether a page carries its enriched fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Enriched,
    /// Enrichment failed; `frontmatter`, `content` and `rawContent` are null
    Degraded,
}

impl PageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageStatus::Enriched => "enriched",
            PageStatus::Degraded => "degraded",
        }
    }
}

/// Query-facing projection of a markdown node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: NodeId,
    pub slug: String,
    pub parent_id: Option<NodeId>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub updated: String,
    pub content: Option<String>,
    pub raw_content: Option<String>,
    pub frontmatter: Option<Map<String, Value>>,
    #[serde(default)]
    pub status: PageStatus,
    #[serde(default)]
    pub error: Option<String>,
}

impl Page {
    /// Project a node onto a page with the given slug. `parent_id` is filled in later by
    /// [`parent::assign_parents`].
    pub fn from_node(node: &Node, slug: String) -> Self {
        let (status, error) = match &node.enrichment {
            EnrichmentStatus::Failed { reason } => (PageStatus::Degraded, Some(reason.clone())),
            _ => (PageStatus::Enriched, None),
        };
        Page {
            id: node.id.clone(),
            slug,
            parent_id: None,
            created: node.created.clone(),
            updated: node.updated.clone(),
            content: node.content.clone(),
            raw_content: node.raw_content.clone(),
            frontmatter: node.frontmatter.clone(),
            status,
            error,
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.status == PageStatus::Degraded
    }

    /// Convenience accessor for `frontmatter.title`.
    pub fn title(&self) -> Option<&str> {
        self.frontmatter
            .as_ref()
            .and_then(|fm| fm.get("title"))
            .and_then(Value::as_str)
    }
}

/// Project the page-bearing nodes (markdown files with the `md` extension) onto pages,
/// in node order, with parents inferred over the full set.
pub fn assemble_pages(nodes: &[Node]) -> Vec<Page> {
    let mut pages: Vec<Page> = nodes
        .iter()
        .filter(|node| node.is_page())
        .map(|node| Page::from_node(node, slug::derive_slug(&node.relative_path)))
        .collect();
    parent::assign_parents(&mut pages);
    pages
}
