//! Pagegraph: Content Graph Builder and Query Engine
//!
//! Walks a tree of markdown content, infers the page hierarchy from slug structure,
//! persists the resulting page graph and answers filter/sort/paginate/relation
//! queries against it.

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod markdown;
pub mod query;
pub mod tooling;
pub mod tree;
pub mod types;
