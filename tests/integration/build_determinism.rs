use pagegraph::config::PagegraphConfig;
use pagegraph::graph::GraphBuilder;
use tempfile::TempDir;

use crate::integration::support::{write, write_site};

#[tokio::test]
async fn test_rebuild_of_unchanged_tree_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    write_site(&temp.path().join("content"));
    let builder = GraphBuilder::from_config(&PagegraphConfig::with_cwd(temp.path())).unwrap();

    let first = builder.build().await.unwrap();
    let first_bytes = std::fs::read(&first.output_file).unwrap();
    let second = builder.build().await.unwrap();
    let second_bytes = std::fs::read(&second.output_file).unwrap();

    assert_eq!(first_bytes, second_bytes);
    assert!(first_bytes.ends_with(b"]\n"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_dispatch_keeps_order_stable() {
    let temp = TempDir::new().unwrap();
    let content = temp.path().join("content");
    write(&content, "index.md", "# Home");
    for section in 0..8 {
        for page in 0..8 {
            write(
                &content,
                &format!("s{section}/p{page}.md"),
                &format!("---\ntitle: Page {page}\norder: {page}\n---\nBody {section}.{page}\n"),
            );
        }
    }
    let builder = GraphBuilder::from_config(&PagegraphConfig::with_cwd(temp.path())).unwrap();

    let expected: Vec<String> = builder
        .build()
        .await
        .unwrap()
        .pages
        .iter()
        .map(|p| p.slug.clone())
        .collect();
    for _ in 0..3 {
        let slugs: Vec<String> = builder
            .build()
            .await
            .unwrap()
            .pages
            .iter()
            .map(|p| p.slug.clone())
            .collect();
        assert_eq!(slugs, expected);
    }
    assert_eq!(expected.len(), 65);
    assert_eq!(expected.first().map(String::as_str), Some("/"));
    assert_eq!(expected[1], "/s0/p0");
}

#[tokio::test]
async fn test_rebuild_reflects_removed_pages() {
    let temp = TempDir::new().unwrap();
    let content = temp.path().join("content");
    write_site(&content);
    let builder = GraphBuilder::from_config(&PagegraphConfig::with_cwd(temp.path())).unwrap();
    assert_eq!(builder.build().await.unwrap().pages.len(), 5);

    std::fs::remove_file(content.join("about.md")).unwrap();
    let report = builder.build().await.unwrap();
    assert_eq!(report.pages.len(), 4);
    assert!(report.pages.iter().all(|p| p.slug != "/about"));
}
