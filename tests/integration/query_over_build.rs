use pagegraph::config::PagegraphConfig;
use pagegraph::error::QueryError;
use pagegraph::graph::GraphBuilder;
use pagegraph::query::{FieldKind, FindAllArgs, QueryEngine};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;

use crate::integration::support::write_site;

async fn built_engine(temp: &TempDir) -> QueryEngine {
    write_site(&temp.path().join("content"));
    let config = PagegraphConfig::with_cwd(temp.path());
    GraphBuilder::from_config(&config)
        .unwrap()
        .build()
        .await
        .unwrap();
    QueryEngine::from_config(&config).unwrap()
}

fn slugs(nodes: &[&pagegraph::graph::Page]) -> Vec<String> {
    nodes.iter().map(|p| p.slug.clone()).collect()
}

#[tokio::test]
async fn test_catalog_reflects_built_frontmatter() {
    let temp = TempDir::new().unwrap();
    let engine = built_engine(&temp).await;
    let catalog = engine.catalog();

    assert_eq!(catalog.field("frontmatter_order").unwrap().kind, FieldKind::Int);
    assert_eq!(catalog.field("frontmatter_title").unwrap().kind, FieldKind::String);
    assert_eq!(catalog.field("frontmatter_menuOrder").unwrap().kind, FieldKind::Int);
    assert!(catalog.field("frontmatter_tags").is_none());
    assert!(catalog
        .nested_fields()
        .contains(&"frontmatter_tags".to_string()));
}

#[tokio::test]
async fn test_filter_sort_paginate() {
    let temp = TempDir::new().unwrap();
    let engine = built_engine(&temp).await;

    let eq = engine
        .find_all(&FindAllArgs::default().filter("frontmatter_order__eq", json!(2)))
        .unwrap();
    assert_eq!(slugs(&eq.nodes), vec!["/about"]);

    let page = engine
        .find_all(
            &FindAllArgs::default()
                .order_by("frontmatter_order_DESC")
                .skip(1)
                .limit(2),
        )
        .unwrap();
    assert_eq!(page.count, 5);
    assert_eq!(slugs(&page.nodes), vec!["/docs", "/contact"]);

    let in_menu = engine
        .find_all(
            &FindAllArgs::default()
                .filter("frontmatter_menuOrder__ne", Value::Null)
                .order_by("frontmatter_menuOrder_ASC"),
        )
        .unwrap();
    assert_eq!(slugs(&in_menu.nodes), vec!["/", "/about"]);
}

#[tokio::test]
async fn test_relations_over_built_graph() {
    let temp = TempDir::new().unwrap();
    let engine = built_engine(&temp).await;

    let root = engine.find_one(None, Some("/")).unwrap();
    let children = engine
        .children(root, &FindAllArgs::default().order_by("slug_ASC"))
        .unwrap();
    assert_eq!(slugs(&children.nodes), vec!["/about", "/contact", "/docs"]);

    let setup = engine.find_one(None, Some("/docs/guide/setup")).unwrap();
    let path = engine.path(setup).unwrap();
    assert_eq!(slugs(&path), vec!["/", "/docs", "/docs/guide/setup"]);
    assert_eq!(engine.parent(setup).unwrap().slug, "/docs");
    assert_eq!(engine.find_one(Some(&setup.id), None).unwrap().slug, setup.slug);
}

#[tokio::test]
async fn test_rejected_queries_over_built_graph() {
    let temp = TempDir::new().unwrap();
    let engine = built_engine(&temp).await;

    let nested = engine.find_all(&FindAllArgs::default().filter("frontmatter_tags__eq", json!("x")));
    assert!(matches!(nested, Err(QueryError::UnknownField(_))));

    let wrong_type =
        engine.find_all(&FindAllArgs::default().filter("frontmatter_order__gt", json!("1")));
    assert!(matches!(wrong_type, Err(QueryError::InvalidValue { .. })));
}

#[tokio::test]
async fn test_engine_shared_between_threads() {
    let temp = TempDir::new().unwrap();
    let engine = Arc::new(built_engine(&temp).await);

    let handles: Vec<_> = ["/", "/about", "/docs"]
        .into_iter()
        .map(|slug| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let page = engine.find_one(None, Some(slug)).unwrap();
                engine.path(page).unwrap().len()
            })
        })
        .collect();
    let depths: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(depths, vec![1, 2, 2]);
}
