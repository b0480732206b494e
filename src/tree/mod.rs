//! Filesystem tree: discovery and per-path node materialization.

pub mod hasher;
pub mod media;
pub mod node;
pub mod walker;

pub use node::{EnrichmentStatus, Node, NodeKind};
pub use walker::{DiscoveredPath, Walker, WalkerConfig};
