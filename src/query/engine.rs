//! Read-only query engine over a loaded page graph.

use super::catalog::Catalog;
use super::filter::{Filter, WhereInput};
use super::sort::sort_pages;
use super::OPERATOR_SEPARATOR;
use crate::config::PagegraphConfig;
use crate::error::{ApiError, QueryError, StorageError};
use crate::graph::{persistence, Page};
use crate::types::NodeId;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Page size used when the caller does not give one.
pub const DEFAULT_LIMIT: usize = 10;

/// Arguments of a find-all query
#[derive(Debug, Clone, PartialEq)]
pub struct FindAllArgs {
    pub where_clause: WhereInput,
    /// Sort key name (`frontmatter_order_DESC`) or its catalog index
    pub order_by: Option<String>,
    pub skip: usize,
    pub limit: usize,
}

impl Default for FindAllArgs {
    fn default() -> Self {
        Self {
            where_clause: WhereInput::new(),
            order_by: None,
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl FindAllArgs {
    pub fn filter(mut self, key: impl Into<String>, value: Value) -> Self {
        self.where_clause.insert(key.into(), value);
        self
    }

    pub fn order_by(mut self, key: impl Into<String>) -> Self {
        self.order_by = Some(key.into());
        self
    }

    pub fn skip(mut self, skip: usize) -> Self {
        self.skip = skip;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// One page of find-all results
#[derive(Debug, Clone, Serialize)]
pub struct PageConnection<'a> {
    /// Matching pages before pagination
    pub count: usize,
    pub nodes: Vec<&'a Page>,
}

/// Immutable query engine; owns the pages, the catalog and the lookup indexes
#[derive(Debug)]
pub struct QueryEngine {
    pages: Vec<Page>,
    catalog: Catalog,
    by_id: HashMap<NodeId, usize>,
    by_slug: HashMap<String, usize>,
    children: HashMap<NodeId, Vec<usize>>,
}

impl QueryEngine {
    /// Index `pages` and synthesize their catalog.
    pub fn new(pages: Vec<Page>) -> Self {
        let catalog = Catalog::from_pages(&pages);
        let mut by_id = HashMap::with_capacity(pages.len());
        let mut by_slug = HashMap::with_capacity(pages.len());
        let mut children: HashMap<NodeId, Vec<usize>> = HashMap::new();
        for (idx, page) in pages.iter().enumerate() {
            by_id.entry(page.id.clone()).or_insert(idx);
            by_slug.entry(page.slug.clone()).or_insert(idx);
            if let Some(parent_id) = &page.parent_id {
                children.entry(parent_id.clone()).or_default().push(idx);
            }
        }
        debug!(
            pages = pages.len(),
            fields = catalog.fields().len(),
            "Query engine indexed"
        );
        Self {
            pages,
            catalog,
            by_id,
            by_slug,
            children,
        }
    }

    /// Load the persisted artifact at `path`.
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let pages = persistence::read_pages(path)?;
        info!(path = %path.display(), pages = pages.len(), "Loaded page graph");
        Ok(Self::new(pages))
    }

    /// Load the artifact named by the configured output location.
    pub fn from_config(config: &PagegraphConfig) -> Result<Self, ApiError> {
        let paths = config.resolve_paths()?;
        Ok(Self::load(&paths.output_file)?)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Filter, sort and paginate the whole page set.
    pub fn find_all(&self, args: &FindAllArgs) -> Result<PageConnection<'_>, QueryError> {
        self.run(self.pages.iter(), &args.where_clause, args)
    }

    /// Exact match on `id` when given, otherwise on `slug`.
    pub fn find_one(&self, id: Option<&str>, slug: Option<&str>) -> Option<&Page> {
        let idx = match (id, slug) {
            (Some(id), _) => self.by_id.get(id),
            (None, Some(slug)) => self.by_slug.get(slug),
            (None, None) => None,
        }?;
        self.pages.get(*idx)
    }

    /// Root-to-page chain ending at `id`; empty when `id` is unknown.
    pub fn find_path(&self, id: &str) -> Result<Vec<&Page>, QueryError> {
        let Some(mut current) = self.find_one(Some(id), None) else {
            return Ok(Vec::new());
        };
        let mut chain = vec![current];
        while let Some(parent_id) = &current.parent_id {
            if chain.len() >= self.pages.len() {
                return Err(QueryError::Integrity(format!(
                    "parent chain of {} exceeds {} pages",
                    id,
                    self.pages.len()
                )));
            }
            current = self.find_one(Some(parent_id), None).ok_or_else(|| {
                QueryError::Integrity(format!(
                    "page {} references missing parent {}",
                    current.id, parent_id
                ))
            })?;
            chain.push(current);
        }
        chain.reverse();
        Ok(chain)
    }

    /// Children of `page`, with the caller's filter, ordering and pagination applied.
    pub fn children(
        &self,
        page: &Page,
        args: &FindAllArgs,
    ) -> Result<PageConnection<'_>, QueryError> {
        let mut where_clause = args.where_clause.clone();
        where_clause.insert(
            format!("parentId{}eq", OPERATOR_SEPARATOR),
            Value::String(page.id.clone()),
        );
        let candidates = self
            .children
            .get(&page.id)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|&idx| &self.pages[idx]);
        self.run(candidates, &where_clause, args)
    }

    pub fn parent(&self, page: &Page) -> Option<&Page> {
        page.parent_id
            .as_deref()
            .and_then(|parent_id| self.find_one(Some(parent_id), None))
    }

    pub fn path(&self, page: &Page) -> Result<Vec<&Page>, QueryError> {
        self.find_path(&page.id)
    }

    fn run<'a>(
        &'a self,
        candidates: impl Iterator<Item = &'a Page>,
        where_clause: &WhereInput,
        args: &FindAllArgs,
    ) -> Result<PageConnection<'a>, QueryError> {
        let filter = Filter::compile(where_clause, &self.catalog)?;
        let sort_key = match &args.order_by {
            Some(name) => Some(
                self.catalog
                    .sort_key(name)
                    .or_else(|| {
                        name.parse::<usize>()
                            .ok()
                            .and_then(|index| self.catalog.sort_key_at(index))
                    })
                    .ok_or_else(|| QueryError::UnknownSortKey(name.clone()))?,
            ),
            None => None,
        };

        let mut matched: Vec<&Page> = candidates.filter(|page| filter.matches(page)).collect();
        if let Some(key) = sort_key {
            sort_pages(&mut matched, key);
        }
        let count = matched.len();
        let nodes = matched.into_iter().skip(args.skip).take(args.limit).collect();
        Ok(PageConnection { count, nodes })
    }
}
