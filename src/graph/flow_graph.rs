use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use crate::graph::surgery;
use crate::graph::{EdgeData, VertexData, VertexKind};

/// Directed multigraph of flowchart vertices for one function.
///
/// Stable indices are required because call-site inlining removes the
/// substituted vertex; edge insertion order is recoverable (see
/// [`FlowGraph::successors`]) because the switch reversal and the labeling
/// DFS both depend on it.
pub struct FlowGraph {
    pub(crate) graph: StableDiGraph<VertexData, EdgeData>,
}

impl Default for FlowGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowGraph {
    pub fn new() -> Self {
        FlowGraph {
            graph: StableDiGraph::new(),
        }
    }

    pub fn add_vertex(&mut self, kind: VertexKind, depth: u32) -> NodeIndex {
        self.graph.add_node(VertexData::new(kind, depth))
    }

    pub fn add_edge(
        &mut self,
        from: NodeIndex,
        to: NodeIndex,
        text: impl Into<String>,
    ) -> EdgeIndex {
        self.graph.add_edge(from, to, EdgeData::new(text))
    }

    /// Removes one `from -> to` edge if present.
    pub fn remove_edge_between(&mut self, from: NodeIndex, to: NodeIndex) {
        if let Some(edge) = self.graph.find_edge(from, to) {
            self.graph.remove_edge(edge);
        }
    }

    pub fn vertex(&self, v: NodeIndex) -> &VertexData {
        &self.graph[v]
    }

    pub fn vertex_mut(&mut self, v: NodeIndex) -> &mut VertexData {
        &mut self.graph[v]
    }

    pub fn kind(&self, v: NodeIndex) -> VertexKind {
        self.graph[v].kind
    }

    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn vertices(&self) -> impl Iterator<Item = (NodeIndex, &VertexData)> {
        self.graph.node_indices().map(|v| (v, &self.graph[v]))
    }

    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &EdgeData)> {
        self.graph
            .edge_references()
            .map(|e| (e.source(), e.target(), e.weight()))
    }

    /// All vertices of one kind, in insertion order.
    pub fn vertices_of_kind(&self, kind: VertexKind) -> Vec<NodeIndex> {
        self.graph
            .node_indices()
            .filter(|v| self.graph[*v].kind == kind)
            .collect()
    }

    /// Successors of `v` in edge insertion order.
    pub fn successors(&self, v: NodeIndex) -> Vec<NodeIndex> {
        surgery::out_edges(&self.graph, v)
            .into_iter()
            .map(|(_, target)| target)
            .collect()
    }

    /// Text of the first `from -> to` edge, if any.
    pub fn edge_text(&self, from: NodeIndex, to: NodeIndex) -> Option<&str> {
        self.graph
            .find_edge(from, to)
            .map(|e| self.graph[e].text.as_str())
    }

    pub fn inner(&self) -> &StableDiGraph<VertexData, EdgeData> {
        &self.graph
    }

    pub fn inner_mut(&mut self) -> &mut StableDiGraph<VertexData, EdgeData> {
        &mut self.graph
    }
}
