//! Graph builder: one batch pass from content root to persisted page graph.
//!
//! Discovery runs to completion first. Every discovered path is then dispatched as its own
//! task (materialize, then enrich markdown); all tasks are joined before slugs and parents are
//! computed, because parent inference needs the complete page set.

use super::{assemble_pages, persistence, Page};
use crate::config::{PagegraphConfig, ResolvedPaths};
use crate::error::{ApiError, BuildError};
use crate::markdown;
use crate::tree::{DiscoveredPath, Node, Walker, WalkerConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Summary of a completed build
#[derive(Debug, Clone)]
pub struct BuildReport {
    /// Persisted pages, in discovery order
    pub pages: Vec<Page>,
    /// Nodes materialized, directories included
    pub node_count: usize,
    /// Pages whose enrichment failed
    pub degraded_count: usize,
    pub output_file: PathBuf,
}

/// Content graph builder
pub struct GraphBuilder {
    content_root: PathBuf,
    output_file: PathBuf,
    walker_config: WalkerConfig,
}

impl GraphBuilder {
    /// Builder over an explicit content root and artifact path with default ignores.
    pub fn new(content_root: PathBuf, output_file: PathBuf) -> Self {
        Self {
            content_root,
            output_file,
            walker_config: WalkerConfig::default(),
        }
    }

    /// Builder for resolved configuration paths plus the configured extra ignores.
    pub fn from_paths(paths: &ResolvedPaths, extra_ignores: &[String]) -> Self {
        Self::new(paths.markdown_dir.clone(), paths.output_file.clone())
            .with_walker_config(WalkerConfig::with_extra_ignores(extra_ignores.iter().cloned()))
    }

    pub fn from_config(config: &PagegraphConfig) -> Result<Self, ApiError> {
        let paths = config.resolve_paths()?;
        Ok(Self::from_paths(&paths, &config.ignore))
    }

    pub fn with_walker_config(mut self, walker_config: WalkerConfig) -> Self {
        self.walker_config = walker_config;
        self
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Run the full pipeline and persist the result.
    pub async fn build(&self) -> Result<BuildReport, BuildError> {
        let started = Instant::now();
        let nodes = self.collect_nodes().await?;
        let pages = assemble_pages(&nodes);
        let degraded_count = pages.iter().filter(|page| page.is_degraded()).count();

        let output_file = self.output_file.clone();
        let pages = tokio::task::spawn_blocking(move || {
            persistence::write_pages(&output_file, &pages).map(|()| pages)
        })
        .await
        .map_err(|e| BuildError::Task(e.to_string()))??;

        info!(
            nodes = nodes.len(),
            pages = pages.len(),
            degraded = degraded_count,
            output = %self.output_file.display(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Page graph built"
        );

        Ok(BuildReport {
            node_count: nodes.len(),
            degraded_count,
            pages,
            output_file: self.output_file.clone(),
        })
    }

    /// Discover, materialize and enrich every path under the content root.
    ///
    /// The returned arena is in discovery order regardless of task completion order.
    pub async fn collect_nodes(&self) -> Result<Vec<Node>, BuildError> {
        let root = self.resolve_root().await?;
        let walker = Walker::new(root.clone(), self.walker_config.clone())?;
        let discovered = tokio::task::spawn_blocking(move || walker.discover())
            .await
            .map_err(|e| BuildError::Task(e.to_string()))??;
        debug!(paths = discovered.len(), "Dispatching node tasks");

        let root = Arc::new(root);
        let handles: Vec<_> = discovered
            .into_iter()
            .map(|entry| {
                let root = Arc::clone(&root);
                tokio::spawn(async move { process_path(entry, &root).await })
            })
            .collect();

        let mut nodes = Vec::with_capacity(handles.len());
        for joined in futures::future::join_all(handles).await {
            let node = joined.map_err(|e| BuildError::Task(e.to_string()))??;
            nodes.push(node);
        }
        Ok(nodes)
    }

    async fn resolve_root(&self) -> Result<PathBuf, BuildError> {
        match tokio::fs::metadata(&self.content_root).await {
            Ok(metadata) if metadata.is_dir() => {}
            _ => return Err(BuildError::ContentRootNotFound(self.content_root.clone())),
        }
        dunce::canonicalize(&self.content_root).map_err(|source| BuildError::Io {
            path: self.content_root.clone(),
            source,
        })
    }
}

/// Materialize one path and, for markdown documents, enrich it in place from the bytes
/// materialization already read.
async fn process_path(entry: DiscoveredPath, root: &Path) -> Result<Node, BuildError> {
    let (mut node, source) = Node::materialize(&entry.path, root).await?;
    if let Some(bytes) = source {
        let result = markdown::enrich_bytes(bytes);
        if let Err(err) = &result {
            warn!(
                path = %node.absolute_path,
                node_id = %node.id,
                error = %err,
                "Error processing markdown; page left unenriched"
            );
        }
        node.apply_enrichment(result);
    }
    Ok(node)
}
