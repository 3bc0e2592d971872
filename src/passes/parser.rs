use anyhow::{Context, Result};
use syn::File;

/// Parses Rust source text into a syntax tree for the collector.
pub fn parse_source(source: &str) -> Result<File> {
    syn::parse_str(source).context("failed to parse source code")
}
