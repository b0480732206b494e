//! CLI Tooling
//!
//! Command-line interface for building the page graph and querying a built graph. Every
//! command returns its rendered output; the binary decides where it goes.

use super::format::{
    format_catalog_text, format_connection_text, format_page_text, format_path_text,
};
use crate::config::{ConfigLoader, PagegraphConfig, ResolvedPaths};
use crate::error::ApiError;
use crate::graph::{GraphBuilder, Page};
use crate::logging::LoggingConfig;
use crate::query::{FindAllArgs, PageConnection, QueryEngine, WhereInput, DEFAULT_LIMIT};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// Pagegraph CLI - content graph builder and query engine for markdown sites
#[derive(Parser)]
#[command(name = "pagegraph")]
#[command(about = "Build and query a content graph of markdown pages")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Working directory that relative config paths resolve against
    #[arg(long, default_value = ".")]
    pub cwd: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold the logging flags over the configured logging section.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        if let Some(file) = &self.log_file {
            config.file = Some(file.clone());
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover, enrich and persist the page graph
    Build {
        /// Configuration file for this build (overrides --config)
        config: Option<PathBuf>,
    },
    /// Query a built page graph
    Query {
        #[command(subcommand)]
        command: QueryCommands,
    },
}

/// Filter, ordering and pagination flags shared by list queries
#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    /// Filter as KEY=VALUE, e.g. frontmatter_order__gt=1 (repeatable)
    #[arg(long = "where", value_name = "KEY=VALUE")]
    pub filters: Vec<String>,

    /// Sort key name or index, e.g. frontmatter_order_DESC
    #[arg(long)]
    pub order_by: Option<String>,

    /// Results to skip
    #[arg(long, default_value_t = 0)]
    pub skip: usize,

    /// Maximum results to return
    #[arg(long, default_value_t = DEFAULT_LIMIT)]
    pub limit: usize,
}

impl FindArgs {
    pub fn to_find_all_args(&self) -> Result<FindAllArgs, ApiError> {
        Ok(FindAllArgs {
            where_clause: parse_where(&self.filters)?,
            order_by: self.order_by.clone(),
            skip: self.skip,
            limit: self.limit,
        })
    }
}

#[derive(Subcommand)]
pub enum QueryCommands {
    /// List pages matching filters
    Pages {
        #[command(flatten)]
        find: FindArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show a single page by id or slug
    Page {
        /// Page id
        #[arg(long, conflicts_with = "slug", required_unless_present = "slug")]
        id: Option<String>,
        /// Page slug, e.g. /about
        #[arg(long)]
        slug: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the root-to-page chain of a page
    Path {
        /// Page id
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List the children of a page
    Children {
        /// Page id
        id: String,
        #[command(flatten)]
        find: FindArgs,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Show the parent of a page
    Parent {
        /// Page id
        id: String,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// List filterable fields, operators and sort keys
    Fields {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Parse `KEY=VALUE` filters. Values are read as JSON, falling back to a plain string.
pub fn parse_where(entries: &[String]) -> Result<WhereInput, ApiError> {
    let mut input = WhereInput::new();
    for entry in entries {
        let (key, raw) = entry.split_once('=').ok_or_else(|| {
            ApiError::InvalidArgument(format!("Expected KEY=VALUE, got '{}'", entry))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ApiError::InvalidArgument(format!(
                "Missing filter key in '{}'",
                entry
            )));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        input.insert(key.to_string(), value);
    }
    Ok(input)
}

fn validate_format(format: &str) -> Result<(), ApiError> {
    match format {
        "text" | "json" => Ok(()),
        other => Err(ApiError::InvalidArgument(format!(
            "Invalid format: {} (must be 'text' or 'json')",
            other
        ))),
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::StorageError(crate::error::StorageError::Serialization(e)))
}

/// CLI context: the loaded configuration and where it resolves to
pub struct CliContext {
    cwd: PathBuf,
    config: PagegraphConfig,
}

impl CliContext {
    /// Load configuration from `config_path` when given, otherwise from `cwd`.
    pub fn new(cwd: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = load_config(&cwd, config_path.as_deref())?;
        Ok(Self { cwd, config })
    }

    pub fn config(&self) -> &PagegraphConfig {
        &self.config
    }

    pub fn paths(&self) -> Result<ResolvedPaths, ApiError> {
        self.config.resolve_paths()
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = match command {
            Commands::Build { config } => self.handle_build(config.as_ref()),
            Commands::Query { command } => self.handle_query(command),
        };
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn handle_build(&self, config_path: Option<&PathBuf>) -> Result<String, ApiError> {
        let config = match config_path {
            Some(path) => load_config(&self.cwd, Some(path.as_path()))?,
            None => self.config.clone(),
        };
        let builder = GraphBuilder::from_config(&config)?;
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| ApiError::Runtime(format!("Failed to start runtime: {}", e)))?;
        let report = runtime.block_on(builder.build())?;

        let mut out = format!("Wrote {} pages", report.pages.len());
        if report.degraded_count > 0 {
            out.push_str(&format!(
                "\n{} pages degraded (front matter could not be read)",
                report.degraded_count
            ));
        }
        Ok(out)
    }

    fn handle_query(&self, command: &QueryCommands) -> Result<String, ApiError> {
        let engine = QueryEngine::from_config(&self.config)?;
        match command {
            QueryCommands::Pages { find, format } => {
                validate_format(format)?;
                let connection = engine.find_all(&find.to_find_all_args()?)?;
                render_connection("Pages", &connection, format)
            }
            QueryCommands::Page { id, slug, format } => {
                validate_format(format)?;
                let page = engine.find_one(id.as_deref(), slug.as_deref());
                render_optional_page(page, format)
            }
            QueryCommands::Path { id, format } => {
                validate_format(format)?;
                let path = engine.find_path(id)?;
                if format == "json" {
                    to_json(&path)
                } else {
                    Ok(format_path_text(&path))
                }
            }
            QueryCommands::Children { id, find, format } => {
                validate_format(format)?;
                let page = require_page(&engine, id)?;
                let connection = engine.children(page, &find.to_find_all_args()?)?;
                render_connection(&format!("Children of {}", page.slug), &connection, format)
            }
            QueryCommands::Parent { id, format } => {
                validate_format(format)?;
                let page = require_page(&engine, id)?;
                render_optional_page(engine.parent(page), format)
            }
            QueryCommands::Fields { format } => {
                validate_format(format)?;
                let catalog = engine.catalog();
                if format == "json" {
                    let fields: Vec<Value> = catalog
                        .fields()
                        .iter()
                        .map(|field| {
                            json!({
                                "name": field.name,
                                "type": field.kind.name(),
                                "operators": field.kind.operators().iter().map(|op| op.as_str()).collect::<Vec<_>>(),
                            })
                        })
                        .collect();
                    let sort_keys: Vec<Value> = catalog
                        .sort_keys()
                        .iter()
                        .map(|key| json!({ "index": key.index, "name": key.name }))
                        .collect();
                    to_json(&json!({
                        "fields": fields,
                        "nested": catalog.nested_fields(),
                        "sortKeys": sort_keys,
                    }))
                } else {
                    Ok(format_catalog_text(catalog))
                }
            }
        }
    }
}

fn load_config(
    cwd: &std::path::Path,
    config_path: Option<&std::path::Path>,
) -> Result<PagegraphConfig, ApiError> {
    let mut config = match config_path {
        Some(path) => ConfigLoader::load_from_file(&cwd.join(path))?,
        None => ConfigLoader::load(cwd)?,
    };
    if config.cwd.is_none() {
        config.cwd = Some(cwd.to_path_buf());
    }
    Ok(config)
}

fn require_page<'a>(engine: &'a QueryEngine, id: &str) -> Result<&'a Page, ApiError> {
    engine
        .find_one(Some(id), None)
        .ok_or_else(|| ApiError::PageNotFound(id.to_string()))
}

fn render_connection(
    heading: &str,
    connection: &PageConnection<'_>,
    format: &str,
) -> Result<String, ApiError> {
    if format == "json" {
        to_json(connection)
    } else {
        Ok(format_connection_text(heading, connection))
    }
}

fn render_optional_page(page: Option<&Page>, format: &str) -> Result<String, ApiError> {
    match (page, format) {
        (page, "json") => to_json(&page),
        (Some(page), _) => Ok(format_page_text(page)),
        (None, _) => Ok("No page found.".to_string()),
    }
}

fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Build { .. } => "build",
        Commands::Query { command } => match command {
            QueryCommands::Pages { .. } => "query.pages",
            QueryCommands::Page { .. } => "query.page",
            QueryCommands::Path { .. } => "query.path",
            QueryCommands::Children { .. } => "query.children",
            QueryCommands::Parent { .. } => "query.parent",
            QueryCommands::Fields { .. } => "query.fields",
        },
    }
}
