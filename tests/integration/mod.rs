//! Integration tests for the pagegraph build pipeline, query engine and CLI

mod build_determinism;
mod build_pipeline;
mod cli_commands;
mod query_over_build;
mod support;
