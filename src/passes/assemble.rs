//! Top-level driver: one flowchart per function.

use log::debug;
use petgraph::stable_graph::NodeIndex;

use crate::ast::Function;
use crate::graph::surgery;
use crate::graph::{FlowGraph, OperatorTable, VertexKind};
use crate::passes::expand::{expand, BuildContext, Flow};
use crate::passes::label::assign_labels;

/// A completed, labeled flowchart for one function. Read-only after
/// assembly apart from explicit merging.
pub struct FunctionFlowchart {
    pub name: String,
    pub graph: FlowGraph,
    pub table: OperatorTable,
    pub begin: NodeIndex,
    pub end: NodeIndex,
}

/// Builds and labels the flowchart of `function`.
pub fn assemble(function: &Function) -> FunctionFlowchart {
    let mut graph = FlowGraph::new();
    let mut ctx = BuildContext::new();

    let begin = graph.add_vertex(VertexKind::Begin, 0);
    graph.vertex_mut(begin).label = function.name.clone();
    let end = graph.add_vertex(VertexKind::End, 0);
    graph.vertex_mut(end).label = "End".to_string();

    let flow = Flow {
        end,
        on_return: end,
        on_break: end,
        on_continue: end,
    };
    let entry = expand(&function.body, &mut graph, &mut ctx, begin, flow, 1);
    graph.add_edge(begin, entry, "");

    let mut table = ctx.table;
    assign_labels(&mut graph, begin, &mut table);

    debug!(
        "assembled flowchart for `{}`: {} vertices, {} edges, {} table entries",
        function.name,
        graph.vertex_count(),
        graph.edge_count(),
        table.len()
    );

    FunctionFlowchart {
        name: function.name.clone(),
        graph,
        table,
        begin,
        end,
    }
}

/// Splices a copy of `callee`'s graph over the `call` vertex in `caller`:
/// callers of the call site flow into the callee's starting vertices, its
/// terminal vertices flow onward, and the call vertex disappears.
pub fn inline_call(caller: &mut FlowGraph, call: NodeIndex, callee: &FlowGraph) {
    surgery::substitute_vertex(&mut caller.graph, &callee.graph, call);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Stmt;

    fn function(name: &str, body: Stmt) -> Function {
        Function {
            name: name.into(),
            body,
        }
    }

    #[test]
    fn assembles_begin_body_end() {
        let chart = assemble(&function(
            "main",
            Stmt::Compound(vec![Stmt::Expr("a = 1".into())]),
        ));

        assert_eq!(chart.graph.kind(chart.begin), VertexKind::Begin);
        assert_eq!(chart.graph.kind(chart.end), VertexKind::End);
        assert_eq!(chart.graph.vertex(chart.begin).label, "main");
        let entry = chart.graph.successors(chart.begin)[0];
        assert_eq!(chart.graph.kind(entry), VertexKind::Operator);
        assert_eq!(chart.graph.vertex(entry).label, "O1");
        assert_eq!(chart.graph.successors(entry), vec![chart.end]);
    }

    #[test]
    fn empty_body_connects_begin_to_end() {
        let chart = assemble(&function("noop", Stmt::Compound(vec![])));
        assert_eq!(chart.graph.successors(chart.begin), vec![chart.end]);
        assert!(chart.table.is_empty());
    }

    #[test]
    fn inline_replaces_the_call_vertex() {
        let caller = function(
            "caller",
            Stmt::Compound(vec![Stmt::Call {
                text: "callee()".into(),
                external: false,
            }]),
        );
        let callee = function("callee", Stmt::Compound(vec![Stmt::Expr("work".into())]));

        let mut caller_chart = assemble(&caller);
        let callee_chart = assemble(&callee);

        let call = caller_chart.graph.vertices_of_kind(VertexKind::Call)[0];
        let before = caller_chart.graph.vertex_count();
        inline_call(&mut caller_chart.graph, call, &callee_chart.graph);

        assert!(caller_chart.graph.vertices_of_kind(VertexKind::Call).is_empty());
        assert_eq!(
            caller_chart.graph.vertex_count(),
            before - 1 + callee_chart.graph.vertex_count()
        );
        // The caller's begin now flows into the callee's begin vertex.
        let entry = caller_chart.graph.successors(caller_chart.begin)[0];
        assert_eq!(caller_chart.graph.kind(entry), VertexKind::Begin);
        assert_eq!(caller_chart.graph.vertex(entry).label, "callee");
    }
}
