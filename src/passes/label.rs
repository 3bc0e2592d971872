//! Sequential labeling of a completed graph.
//!
//! One depth-first traversal from `Begin`, following out-edges in insertion
//! order, hands each vertex with an operator-table entry the next label of
//! its category. A `LoopClose` copies its paired `LoopOpen`'s label instead
//! of allocating one, so both brackets render with the same identifier.

use petgraph::stable_graph::NodeIndex;
use std::collections::HashSet;

use crate::graph::surgery;
use crate::graph::{FlowGraph, OperatorCategory, OperatorTable, VertexKind};

/// Four independent monotonically increasing counters, one per category.
#[derive(Debug, Default)]
pub struct LabelCounters {
    operators: u32,
    conditions: u32,
    loops: u32,
    subprograms: u32,
}

impl LabelCounters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, category: OperatorCategory) -> String {
        let counter = match category {
            OperatorCategory::Operator => &mut self.operators,
            OperatorCategory::Condition => &mut self.conditions,
            OperatorCategory::Loop => &mut self.loops,
            OperatorCategory::Subprogram => &mut self.subprograms,
        };
        *counter += 1;
        format!("{}{}", category.prefix(), counter)
    }
}

/// Assigns labels to every vertex reachable from `begin` and mirrors them
/// into the operator table. Tree edges of the traversal are marked visited.
pub fn assign_labels(g: &mut FlowGraph, begin: NodeIndex, table: &mut OperatorTable) {
    let mut counters = LabelCounters::new();
    let mut discovered = HashSet::new();
    visit(g, begin, table, &mut counters, &mut discovered);
}

fn visit(
    g: &mut FlowGraph,
    vertex: NodeIndex,
    table: &mut OperatorTable,
    counters: &mut LabelCounters,
    discovered: &mut HashSet<NodeIndex>,
) {
    if !discovered.insert(vertex) {
        return;
    }

    match g.kind(vertex) {
        VertexKind::LoopClose { open } => {
            // The open bracket is always discovered first: the close is only
            // reachable through the loop body.
            let label = g.vertex(open).label.clone();
            g.vertex_mut(vertex).label = label;
        }
        _ => {
            // Begin/End have no table entry and keep their label.
            if let Some(descriptor) = table.get_mut(vertex) {
                let label = counters.next(descriptor.category);
                descriptor.label = label.clone();
                g.vertex_mut(vertex).label = label;
            }
        }
    }

    for (edge, target) in surgery::out_edges(&g.graph, vertex) {
        if !discovered.contains(&target) {
            g.graph[edge].visited = true;
            visit(g, target, table, counters, discovered);
        }
    }
}
