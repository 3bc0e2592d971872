//! Flowchart compiler: turns structured function bodies into directed
//! control-flow graphs suitable for diagramming, with an operator table for
//! structured-programming annotations.
//!
//! The core (graph model, surgery, builder, labeling, assembler) is
//! front-end agnostic and works on the [`ast`] statement tree; the bundled
//! syn front-end lowers Rust source into it.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub mod ast;
pub mod error;
pub mod graph;
pub mod passes;
pub mod style;

pub use ast::{Function, Stmt};
pub use error::GraphError;
pub use graph::{
    EdgeData, FlowGraph, OperatorCategory, OperatorDescriptor, OperatorTable, VertexData,
    VertexKind,
};
pub use passes::{
    assemble, assign_labels, inline_call, render_document, render_dot, FunctionFlowchart,
};

/// Builds a labeled flowchart for every function in `source`.
pub fn analyze_source(source: &str) -> Result<Vec<FunctionFlowchart>> {
    let file = passes::parse_source(source)?;
    let charts = passes::FunctionCollector::collect(&file)
        .iter()
        .map(|func| assemble(&passes::lower_function(func)))
        .collect();
    Ok(charts)
}

/// Builds a labeled flowchart for every function in the file at `path`.
pub fn analyze_file(path: &Path) -> Result<Vec<FunctionFlowchart>> {
    let source =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    analyze_source(&source).with_context(|| format!("failed to analyze {}", path.display()))
}
