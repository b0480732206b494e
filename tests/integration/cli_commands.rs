use clap::Parser;
use pagegraph::error::ApiError;
use pagegraph::tooling::cli::{Cli, CliContext, Commands, FindArgs, QueryCommands};
use serde_json::Value;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::integration::support::{write, write_site};

fn built_site() -> (TempDir, CliContext) {
    let temp = TempDir::new().unwrap();
    write_site(&temp.path().join("content"));
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli.execute(&Commands::Build { config: None }).unwrap();
    assert_eq!(output, "Wrote 5 pages");
    (temp, cli)
}

fn find(filters: &[&str], order_by: Option<&str>) -> FindArgs {
    FindArgs {
        filters: filters.iter().map(|f| f.to_string()).collect(),
        order_by: order_by.map(str::to_string),
        skip: 0,
        limit: 10,
    }
}

fn query_json(cli: &CliContext, command: QueryCommands) -> Value {
    let output = cli.execute(&Commands::Query { command }).unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["pagegraph", "build"],
        vec!["pagegraph", "build", "site.toml"],
        vec!["pagegraph", "--config", "site.toml", "query", "fields"],
        vec![
            "pagegraph",
            "query",
            "pages",
            "--where",
            "frontmatter_order__gt=1",
            "--where",
            "slug__start_with=/docs",
            "--order-by",
            "frontmatter_order_DESC",
            "--skip",
            "1",
            "--limit",
            "5",
            "--format",
            "json",
        ],
        vec!["pagegraph", "query", "page", "--slug", "/about"],
        vec!["pagegraph", "query", "page", "--id", "abc"],
        vec!["pagegraph", "query", "path", "abc"],
        vec!["pagegraph", "query", "children", "abc", "--limit", "3"],
        vec!["pagegraph", "query", "parent", "abc"],
        vec!["pagegraph", "--log-level", "debug", "--log-output", "stdout", "build"],
    ];

    for args in cases {
        let parsed = Cli::try_parse_from(args.clone());
        assert!(parsed.is_ok(), "expected valid parse for args: {args:?}");
    }
}

#[test]
fn parse_rejects_conflicting_page_targets() {
    let both = Cli::try_parse_from([
        "pagegraph", "query", "page", "--id", "abc", "--slug", "/about",
    ]);
    assert!(both.is_err());

    let neither = Cli::try_parse_from(["pagegraph", "query", "page"]);
    assert!(neither.is_err());
}

#[test]
fn build_reports_degraded_pages() {
    let temp = TempDir::new().unwrap();
    let content = temp.path().join("content");
    write_site(&content);
    write(&content, "broken.md", "---\ntitle: [oops\n---\n");

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli.execute(&Commands::Build { config: None }).unwrap();
    let mut lines = output.lines();
    assert_eq!(lines.next(), Some("Wrote 6 pages"));
    assert!(lines.next().unwrap().starts_with("1 pages degraded"));
}

#[test]
fn build_with_explicit_config_file() {
    let temp = TempDir::new().unwrap();
    write_site(&temp.path().join("site/pages"));
    write(
        temp.path(),
        "conf/site.toml",
        "markdown_dir = \"site/pages\"\noutput_dir = \"out\"\noutput_filename = \"graph.json\"\n",
    );

    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let output = cli
        .execute(&Commands::Build {
            config: Some(PathBuf::from("conf/site.toml")),
        })
        .unwrap();
    assert_eq!(output, "Wrote 5 pages");
    assert!(temp.path().join("out/graph.json").is_file());
    assert!(!temp.path().join("conf/out").exists());
}

#[test]
fn config_file_in_subdirectory_resolves_against_working_directory() {
    let temp = TempDir::new().unwrap();
    write_site(&temp.path().join("content"));
    write(temp.path(), "conf/site.toml", "output_filename = \"graph.json\"\n");

    let cli = CliContext::new(
        temp.path().to_path_buf(),
        Some(PathBuf::from("conf/site.toml")),
    )
    .unwrap();
    let output = cli.execute(&Commands::Build { config: None }).unwrap();
    assert_eq!(output, "Wrote 5 pages");
    assert!(temp.path().join("build/graph.json").is_file());
}

#[test]
fn build_fails_without_content_root() {
    let temp = TempDir::new().unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let result = cli.execute(&Commands::Build { config: None });
    assert!(matches!(result, Err(ApiError::Build(_))));
}

#[test]
fn query_pages_json_contract() {
    let (_temp, cli) = built_site();
    let parsed = query_json(
        &cli,
        QueryCommands::Pages {
            find: find(&["frontmatter_order__gte=3"], Some("frontmatter_order_ASC")),
            format: "json".to_string(),
        },
    );
    assert_eq!(parsed["count"], 3);
    let nodes = parsed["nodes"].as_array().unwrap();
    let slugs: Vec<&str> = nodes.iter().map(|n| n["slug"].as_str().unwrap()).collect();
    assert_eq!(slugs, vec!["/contact", "/docs", "/docs/guide/setup"]);
    for node in nodes {
        assert!(node.get("id").and_then(|v| v.as_str()).is_some());
        assert!(node.get("parentId").is_some());
        assert!(node.get("rawContent").is_some());
        assert!(node.get("frontmatter").and_then(|v| v.as_object()).is_some());
    }
}

#[test]
fn query_page_and_relations_json() {
    let (_temp, cli) = built_site();
    let setup = query_json(
        &cli,
        QueryCommands::Page {
            id: None,
            slug: Some("/docs/guide/setup".to_string()),
            format: "json".to_string(),
        },
    );
    let setup_id = setup["id"].as_str().unwrap().to_string();

    let path = query_json(
        &cli,
        QueryCommands::Path {
            id: setup_id.clone(),
            format: "json".to_string(),
        },
    );
    let slugs: Vec<&str> = path
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["/", "/docs", "/docs/guide/setup"]);

    let parent = query_json(
        &cli,
        QueryCommands::Parent {
            id: setup_id,
            format: "json".to_string(),
        },
    );
    assert_eq!(parent["slug"], "/docs");

    let root_id = path[0]["id"].as_str().unwrap().to_string();
    let children = query_json(
        &cli,
        QueryCommands::Children {
            id: root_id.clone(),
            find: find(&[], Some("slug_DESC")),
            format: "json".to_string(),
        },
    );
    assert_eq!(children["count"], 3);
    assert_eq!(children["nodes"][0]["slug"], "/docs");

    let root_parent = query_json(
        &cli,
        QueryCommands::Parent {
            id: root_id,
            format: "json".to_string(),
        },
    );
    assert!(root_parent.is_null());
}

#[test]
fn query_text_output() {
    let (_temp, cli) = built_site();
    let output = cli
        .execute(&Commands::Query {
            command: QueryCommands::Pages {
                find: find(&["frontmatter_title__eq=About"], None),
                format: "text".to_string(),
            },
        })
        .unwrap();
    assert!(output.contains("/about"));
    assert!(output.contains("Showing 1 of 1 pages."));

    let fields = cli
        .execute(&Commands::Query {
            command: QueryCommands::Fields {
                format: "text".to_string(),
            },
        })
        .unwrap();
    assert!(fields.contains("frontmatter_menuOrder"));
    assert!(fields.contains("frontmatter_tags"));
}

#[test]
fn query_fields_json_lists_sort_keys() {
    let (_temp, cli) = built_site();
    let parsed = query_json(
        &cli,
        QueryCommands::Fields {
            format: "json".to_string(),
        },
    );
    let sort_keys = parsed["sortKeys"].as_array().unwrap();
    assert_eq!(sort_keys[0]["name"], "id_ASC");
    assert_eq!(sort_keys[0]["index"], 0);
    assert!(sort_keys
        .iter()
        .any(|k| k["name"] == "frontmatter_order_DESC"));
    assert_eq!(parsed["nested"][0], "frontmatter_tags");
}

#[test]
fn query_errors_surface() {
    let (_temp, cli) = built_site();
    let unknown_field = cli.execute(&Commands::Query {
        command: QueryCommands::Pages {
            find: find(&["frontmatter_color__eq=red"], None),
            format: "json".to_string(),
        },
    });
    assert!(matches!(unknown_field, Err(ApiError::Query(_))));

    let unknown_page = cli.execute(&Commands::Query {
        command: QueryCommands::Children {
            id: "missing".to_string(),
            find: find(&[], None),
            format: "json".to_string(),
        },
    });
    assert!(matches!(unknown_page, Err(ApiError::PageNotFound(_))));

    let bad_format = cli.execute(&Commands::Query {
        command: QueryCommands::Fields {
            format: "yaml".to_string(),
        },
    });
    assert!(matches!(bad_format, Err(ApiError::InvalidArgument(_))));
}

#[test]
fn query_before_build_reports_missing_artifact() {
    let temp = TempDir::new().unwrap();
    let cli = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let result = cli.execute(&Commands::Query {
        command: QueryCommands::Fields {
            format: "text".to_string(),
        },
    });
    assert!(matches!(result, Err(ApiError::StorageError(_))));
}
