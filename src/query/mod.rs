//! Query Engine
//!
//! Loads a persisted page graph, derives the filter/sort catalog from the observed field
//! shapes, and answers find-all, find-one, find-path and relation queries.

pub mod catalog;
pub mod engine;
pub mod filter;
pub mod sort;
pub mod value;

pub use catalog::{Catalog, FieldEntry, FieldKind, FieldPath, Operator, PageField, SortKey};
pub use engine::{FindAllArgs, PageConnection, QueryEngine, DEFAULT_LIMIT};
pub use filter::{Filter, WhereInput};

/// Separator between a field name and its operator in filter keys (`frontmatter_order__gt`).
pub const OPERATOR_SEPARATOR: &str = "__";

/// Prefix namespacing frontmatter keys (`frontmatter_order`).
pub const FRONTMATTER_PREFIX: &str = "frontmatter_";
