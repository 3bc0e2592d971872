//! Generic surgery on directed graphs: structural queries, splicing a
//! subgraph into another graph, and out-edge reordering.
//!
//! Everything here is generic over the payload types so the same operations
//! serve the flowchart builder and any later graph-merging caller.

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use std::collections::HashMap;

use crate::error::GraphError;

/// Out-edges of `v` in insertion order.
///
/// petgraph yields adjacency lists most-recently-added first; every pass
/// that cares about order goes through this helper so the rest of the crate
/// can reason in insertion order.
pub fn out_edges<N, E>(
    g: &StableDiGraph<N, E>,
    v: NodeIndex,
) -> Vec<(EdgeIndex, NodeIndex)> {
    let mut edges: Vec<_> = g.edges(v).map(|e| (e.id(), e.target())).collect();
    edges.reverse();
    edges
}

/// Vertices `v` points to, in edge insertion order.
pub fn adjacent_vertices<N, E>(g: &StableDiGraph<N, E>, v: NodeIndex) -> Vec<NodeIndex> {
    out_edges(g, v).into_iter().map(|(_, t)| t).collect()
}

/// Vertices with an edge into `v`.
pub fn pointing_vertices<N, E>(g: &StableDiGraph<N, E>, v: NodeIndex) -> Vec<NodeIndex> {
    let mut sources: Vec<_> = g
        .edges_directed(v, Direction::Incoming)
        .map(|e| e.source())
        .collect();
    sources.reverse();
    sources
}

/// True if `v` has no outgoing edges.
pub fn is_terminal<N, E>(g: &StableDiGraph<N, E>, v: NodeIndex) -> bool {
    g.edges(v).next().is_none()
}

/// True if some edge targets `v`.
pub fn has_incoming<N, E>(g: &StableDiGraph<N, E>, v: NodeIndex) -> bool {
    g.edges_directed(v, Direction::Incoming).next().is_some()
}

/// Vertices with no incoming edges; a subgraph's entry points.
pub fn starting_vertices<N, E>(g: &StableDiGraph<N, E>) -> Vec<NodeIndex> {
    g.node_indices().filter(|v| !has_incoming(g, *v)).collect()
}

/// Vertices with no outgoing edges; a subgraph's exit points.
pub fn terminal_vertices<N, E>(g: &StableDiGraph<N, E>) -> Vec<NodeIndex> {
    g.node_indices().filter(|v| is_terminal(g, *v)).collect()
}

/// Removes one `first -> second` edge and routes control through `vertex`
/// instead. New edges carry default payloads.
pub fn insert_between<N, E: Default>(
    g: &mut StableDiGraph<N, E>,
    first: NodeIndex,
    second: NodeIndex,
    vertex: NodeIndex,
) -> NodeIndex {
    if let Some(edge) = g.find_edge(first, second) {
        g.remove_edge(edge);
    }
    g.add_edge(first, vertex, E::default());
    g.add_edge(vertex, second, E::default());
    vertex
}

/// As [`insert_between`] but creates the intermediate vertex.
pub fn insert_between_new<N: Default, E: Default>(
    g: &mut StableDiGraph<N, E>,
    first: NodeIndex,
    second: NodeIndex,
) -> NodeIndex {
    let vertex = g.add_node(N::default());
    insert_between(g, first, second, vertex)
}

/// Adds an edge from every vertex in `sources` to `target`.
pub fn connect_all_to<N, E: Default>(
    g: &mut StableDiGraph<N, E>,
    sources: &[NodeIndex],
    target: NodeIndex,
) {
    for &source in sources {
        g.add_edge(source, target, E::default());
    }
}

/// Copies every vertex and edge of `src` into `dst`; returns the index
/// mapping. Per-vertex out-edge order is preserved.
pub fn copy_into<N: Clone, E: Clone>(
    dst: &mut StableDiGraph<N, E>,
    src: &StableDiGraph<N, E>,
) -> HashMap<NodeIndex, NodeIndex> {
    let mut map = HashMap::new();
    for v in src.node_indices() {
        map.insert(v, dst.add_node(src[v].clone()));
    }
    for v in src.node_indices() {
        for (edge, target) in out_edges(src, v) {
            dst.add_edge(map[&v], map[&target], src[edge].clone());
        }
    }
    map
}

/// Replaces `index` in `dst` with a full copy of `src`.
///
/// Every predecessor of `index` is connected to every starting vertex of
/// `src`, every vertex `index` pointed to receives an edge from every
/// terminal vertex of `src`, then `index` and its edges are removed. This is
/// the mechanism for inlining one function's flowchart at a call site.
pub fn substitute_vertex<N: Clone, E: Clone + Default>(
    dst: &mut StableDiGraph<N, E>,
    src: &StableDiGraph<N, E>,
    index: NodeIndex,
) {
    let predecessors = pointing_vertices(dst, index);
    let successors = adjacent_vertices(dst, index);

    let entries: Vec<_> = starting_vertices(src);
    let exits: Vec<_> = terminal_vertices(src);
    let map = copy_into(dst, src);

    for &entry in &entries {
        connect_all_to(dst, &predecessors, map[&entry]);
    }
    for &successor in &successors {
        let exits: Vec<_> = exits.iter().map(|e| map[e]).collect();
        connect_all_to(dst, &exits, successor);
    }

    dst.remove_node(index);
}

/// Appends a copy of `src` after `to`: `to` gains an edge to every starting
/// vertex of the copy.
pub fn attach_graph<N: Clone, E: Clone + Default>(
    g: &mut StableDiGraph<N, E>,
    to: NodeIndex,
    src: &StableDiGraph<N, E>,
) {
    let entries = starting_vertices(src);
    let map = copy_into(g, src);
    for entry in entries {
        g.add_edge(to, map[&entry], E::default());
    }
}

/// Splices a copy of `src` onto the `first -> second` edge.
pub fn insert_graph_between<N: Clone, E: Clone + Default>(
    g: &mut StableDiGraph<N, E>,
    first: NodeIndex,
    second: NodeIndex,
    src: &StableDiGraph<N, E>,
) {
    let entries = starting_vertices(src);
    let exits = terminal_vertices(src);
    if let Some(edge) = g.find_edge(first, second) {
        g.remove_edge(edge);
    }
    let map = copy_into(g, src);
    for entry in entries {
        g.add_edge(first, map[&entry], E::default());
    }
    for exit in exits {
        g.add_edge(map[&exit], second, E::default());
    }
}

/// Splices `src` after `first`, either appending (no successor) or inserting
/// between `first` and its single successor. More than one successor is
/// ambiguous and signals a caller bug.
pub fn insert_after<N: Clone, E: Clone + Default>(
    g: &mut StableDiGraph<N, E>,
    first: NodeIndex,
    src: &StableDiGraph<N, E>,
) -> Result<(), GraphError> {
    let successors = adjacent_vertices(g, first);
    match successors.as_slice() {
        [] => attach_graph(g, first, src),
        [second] => insert_graph_between(g, first, *second, src),
        more => return Err(GraphError::AmbiguousAttach(more.len())),
    }
    Ok(())
}

/// Reverses the insertion order of `v`'s out-edges, payloads included.
///
/// Switch assembly discovers case edges in reverse source order; this
/// restores declaration order before the labeling DFS runs.
pub fn reverse_out_edges<N, E: Clone>(g: &mut StableDiGraph<N, E>, v: NodeIndex) {
    let snapshot: Vec<(NodeIndex, E)> = out_edges(g, v)
        .into_iter()
        .map(|(edge, target)| (target, g[edge].clone()))
        .collect();
    let ids: Vec<EdgeIndex> = g.edges(v).map(|e| e.id()).collect();
    for id in ids {
        g.remove_edge(id);
    }
    for (target, payload) in snapshot.into_iter().rev() {
        g.add_edge(v, target, payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestGraph = StableDiGraph<&'static str, u32>;

    fn chain(names: &[&'static str]) -> (TestGraph, Vec<NodeIndex>) {
        let mut g = TestGraph::new();
        let nodes: Vec<_> = names.iter().map(|n| g.add_node(*n)).collect();
        for pair in nodes.windows(2) {
            g.add_edge(pair[0], pair[1], 0);
        }
        (g, nodes)
    }

    #[test]
    fn out_edges_are_in_insertion_order() {
        let mut g = TestGraph::new();
        let a = g.add_node("a");
        let b = g.add_node("b");
        let c = g.add_node("c");
        let d = g.add_node("d");
        g.add_edge(a, b, 1);
        g.add_edge(a, c, 2);
        g.add_edge(a, d, 3);
        let targets = adjacent_vertices(&g, a);
        assert_eq!(targets, vec![b, c, d]);
    }

    #[test]
    fn starting_and_terminal_vertices() {
        let (g, nodes) = chain(&["a", "b", "c"]);
        assert_eq!(starting_vertices(&g), vec![nodes[0]]);
        assert_eq!(terminal_vertices(&g), vec![nodes[2]]);
        assert!(is_terminal(&g, nodes[2]));
        assert!(!is_terminal(&g, nodes[1]));
        assert!(has_incoming(&g, nodes[1]));
        assert!(!has_incoming(&g, nodes[0]));
    }

    #[test]
    fn insert_between_retargets_the_edge() {
        let (mut g, nodes) = chain(&["a", "b"]);
        let mid = g.add_node("mid");
        insert_between(&mut g, nodes[0], nodes[1], mid);
        assert_eq!(adjacent_vertices(&g, nodes[0]), vec![mid]);
        assert_eq!(adjacent_vertices(&g, mid), vec![nodes[1]]);
        assert!(g.find_edge(nodes[0], nodes[1]).is_none());
    }

    #[test]
    fn substitute_vertex_splices_the_subgraph() {
        // a -> x -> b, with x replaced by the chain p -> q.
        let (mut g, nodes) = chain(&["a", "x", "b"]);
        let (sub, sub_nodes) = chain(&["p", "q"]);

        substitute_vertex(&mut g, &sub, nodes[1]);

        let p = g.node_indices().find(|v| g[*v] == "p").unwrap();
        let q = g.node_indices().find(|v| g[*v] == "q").unwrap();
        assert_eq!(adjacent_vertices(&g, nodes[0]), vec![p]);
        assert_eq!(adjacent_vertices(&g, p), vec![q]);
        assert_eq!(adjacent_vertices(&g, q), vec![nodes[2]]);
        assert!(!g.contains_node(nodes[1]));
        let _ = sub_nodes;
    }

    #[test]
    fn insert_after_appends_to_a_terminal_vertex() {
        let (mut g, nodes) = chain(&["a", "b"]);
        let (sub, _) = chain(&["p"]);
        insert_after(&mut g, nodes[1], &sub).unwrap();
        let p = g.node_indices().find(|v| g[*v] == "p").unwrap();
        assert_eq!(adjacent_vertices(&g, nodes[1]), vec![p]);
    }

    #[test]
    fn insert_after_splices_before_a_single_successor() {
        let (mut g, nodes) = chain(&["a", "b"]);
        let (sub, _) = chain(&["p"]);
        insert_after(&mut g, nodes[0], &sub).unwrap();
        let p = g.node_indices().find(|v| g[*v] == "p").unwrap();
        assert_eq!(adjacent_vertices(&g, nodes[0]), vec![p]);
        assert_eq!(adjacent_vertices(&g, p), vec![nodes[1]]);
    }

    #[test]
    fn insert_after_rejects_ambiguous_targets() {
        let mut g = TestGraph::new();
        let a = g.add_node("a");
        let b = g.add_node("b");
        let c = g.add_node("c");
        g.add_edge(a, b, 0);
        g.add_edge(a, c, 0);
        let (sub, _) = chain(&["p"]);
        let err = insert_after(&mut g, a, &sub).unwrap_err();
        assert!(matches!(err, GraphError::AmbiguousAttach(2)));
    }

    #[test]
    fn reverse_out_edges_flips_order_and_keeps_payloads() {
        let mut g = TestGraph::new();
        let a = g.add_node("a");
        let b = g.add_node("b");
        let c = g.add_node("c");
        g.add_edge(a, b, 1);
        g.add_edge(a, c, 2);

        reverse_out_edges(&mut g, a);

        assert_eq!(adjacent_vertices(&g, a), vec![c, b]);
        let first = g.find_edge(a, c).unwrap();
        assert_eq!(g[first], 2);
    }
}
