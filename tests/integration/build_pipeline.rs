use pagegraph::config::PagegraphConfig;
use pagegraph::error::BuildError;
use pagegraph::graph::persistence::read_pages;
use pagegraph::graph::{GraphBuilder, Page, PageStatus};
use pagegraph::tree::hasher::compute_node_id;
use tempfile::TempDir;

use crate::integration::support::{write, write_site};

fn by_slug<'a>(pages: &'a [Page], slug: &str) -> &'a Page {
    pages
        .iter()
        .find(|p| p.slug == slug)
        .unwrap_or_else(|| panic!("no page with slug {slug}"))
}

#[tokio::test]
async fn test_build_writes_pages_in_discovery_order() {
    let temp = TempDir::new().unwrap();
    write_site(&temp.path().join("content"));

    let builder = GraphBuilder::from_config(&PagegraphConfig::with_cwd(temp.path())).unwrap();
    let report = builder.build().await.unwrap();

    let slugs: Vec<&str> = report.pages.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(
        slugs,
        vec!["/about", "/contact", "/docs/guide/setup", "/docs", "/"]
    );
    assert_eq!(report.degraded_count, 0);
    assert_eq!(report.output_file, temp.path().join("build/pages.json"));
    assert_eq!(read_pages(&report.output_file).unwrap(), report.pages);
}

#[tokio::test]
async fn test_build_infers_hierarchy_from_slugs() {
    let temp = TempDir::new().unwrap();
    write_site(&temp.path().join("content"));

    let builder = GraphBuilder::from_config(&PagegraphConfig::with_cwd(temp.path())).unwrap();
    let pages = builder.build().await.unwrap().pages;

    let root = by_slug(&pages, "/");
    let docs = by_slug(&pages, "/docs");
    assert_eq!(root.parent_id, None);
    assert_eq!(by_slug(&pages, "/about").parent_id.as_deref(), Some(root.id.as_str()));
    assert_eq!(by_slug(&pages, "/contact").parent_id.as_deref(), Some(root.id.as_str()));
    assert_eq!(docs.parent_id.as_deref(), Some(root.id.as_str()));
    assert_eq!(
        by_slug(&pages, "/docs/guide/setup").parent_id.as_deref(),
        Some(docs.id.as_str())
    );
}

#[tokio::test]
async fn test_build_enriches_page_fields() {
    let temp = TempDir::new().unwrap();
    let content = temp.path().join("content");
    write_site(&content);

    let builder = GraphBuilder::from_config(&PagegraphConfig::with_cwd(temp.path())).unwrap();
    let pages = builder.build().await.unwrap().pages;

    let home = by_slug(&pages, "/");
    assert_eq!(home.title(), Some("Homepage"));
    assert_eq!(home.raw_content.as_deref(), Some("# Welcome\n"));
    assert_eq!(home.content.as_deref(), Some("<h1>Welcome</h1>\n"));
    assert_eq!(home.status, PageStatus::Enriched);
    assert!(home.created.ends_with('Z'));

    let index_path = dunce::canonicalize(content.join("index.md")).unwrap();
    assert_eq!(home.id, compute_node_id(&index_path.to_string_lossy()));

    let docs = by_slug(&pages, "/docs");
    assert_eq!(docs.raw_content.as_deref(), Some(""));
    let setup = by_slug(&pages, "/docs/guide/setup");
    assert_eq!(
        setup.frontmatter.as_ref().unwrap()["tags"],
        serde_json::json!(["install"])
    );
}

#[tokio::test]
async fn test_build_skips_ignored_paths() {
    let temp = TempDir::new().unwrap();
    let content = temp.path().join("content");
    write_site(&content);
    write(&content, "drafts/wip.md", "# wip");

    let mut config = PagegraphConfig::with_cwd(temp.path());
    config.ignore = vec!["**/drafts".to_string()];
    let pages = GraphBuilder::from_config(&config)
        .unwrap()
        .build()
        .await
        .unwrap()
        .pages;

    assert!(pages.iter().all(|p| !p.slug.starts_with("/drafts")));
    assert!(pages.iter().all(|p| !p.slug.starts_with("/node_modules")));
    assert_eq!(pages.len(), 5);
}

#[tokio::test]
async fn test_build_honors_output_options() {
    let temp = TempDir::new().unwrap();
    write_site(&temp.path().join("site"));

    let mut config = PagegraphConfig::with_cwd(temp.path());
    config.markdown_dir = "site".into();
    config.output_dir = "public/data".into();
    config.output_filename = "graph.json".into();
    let report = GraphBuilder::from_config(&config)
        .unwrap()
        .build()
        .await
        .unwrap();

    assert_eq!(report.output_file, temp.path().join("public/data/graph.json"));
    assert!(report.output_file.is_file());
}

#[tokio::test]
async fn test_build_fails_without_content_root() {
    let temp = TempDir::new().unwrap();
    let builder = GraphBuilder::from_config(&PagegraphConfig::with_cwd(temp.path())).unwrap();
    let result = builder.build().await;
    assert!(matches!(result, Err(BuildError::ContentRootNotFound(_))));
    assert!(!temp.path().join("build").exists());
}

#[tokio::test]
async fn test_degraded_page_keeps_its_place_in_the_graph() {
    let temp = TempDir::new().unwrap();
    let content = temp.path().join("content");
    write_site(&content);
    write(&content, "contact/form.md", "---\ntitle: [broken\n---\nForm");

    let report = GraphBuilder::from_config(&PagegraphConfig::with_cwd(temp.path()))
        .unwrap()
        .build()
        .await
        .unwrap();

    assert_eq!(report.degraded_count, 1);
    let form = by_slug(&report.pages, "/contact/form");
    let contact = by_slug(&report.pages, "/contact");
    assert_eq!(form.status, PageStatus::Degraded);
    assert!(form.frontmatter.is_none());
    assert_eq!(form.parent_id.as_deref(), Some(contact.id.as_str()));
}
