//! DOT emission for completed flowcharts.
//!
//! Walks vertices and edges of a labeled graph: shape per vertex kind,
//! vertex label plus operator-table content as the node text, edge text as
//! the edge label.

use crate::passes::assemble::FunctionFlowchart;
use crate::style::{EdgeStyle, NodeStyle};

/// Renders one function's flowchart as a standalone DOT digraph.
pub fn render_dot(chart: &FunctionFlowchart) -> String {
    let mut dot = String::from("digraph G {\n");
    dot.push_str("    graph [fontname=\"monospace\", rankdir=TB];\n");
    dot.push_str("    node [fontname=\"monospace\"];\n");
    dot.push_str("    edge [fontname=\"monospace\"];\n\n");
    render_body(chart, &mut dot);
    dot.push_str("}\n");
    dot
}

/// Renders several flowcharts into one digraph, one cluster per function.
pub fn render_document(charts: &[FunctionFlowchart]) -> String {
    let mut dot = String::from("digraph G {\n");
    dot.push_str("    graph [fontname=\"monospace\", rankdir=TB];\n");
    dot.push_str("    node [fontname=\"monospace\"];\n");
    dot.push_str("    edge [fontname=\"monospace\"];\n");
    for (cluster, chart) in charts.iter().enumerate() {
        dot.push_str(&format!(
            "\n    subgraph cluster_{cluster} {{\n        label=\"{}\";\n",
            escape(&chart.name)
        ));
        render_body(chart, &mut dot);
        dot.push_str("    }\n");
    }
    dot.push_str("}\n");
    dot
}

fn render_body(chart: &FunctionFlowchart, dot: &mut String) {
    // Node names embed the function so clusters never collide.
    let prefix = &chart.name;
    for (v, data) in chart.graph.vertices() {
        let text = match chart.table.get(v) {
            Some(descriptor) => format!("{}\n{}", data.label, descriptor.content),
            None => data.label.clone(),
        };
        dot.push_str(&format!(
            "    {prefix}_{} [label=\"{}\", shape=\"{}\", style=\"filled\", \
             fillcolor=\"{}\", peripheries={}];\n",
            v.index(),
            escape(&text),
            NodeStyle::shape(data.kind),
            NodeStyle::fillcolor(data.kind),
            NodeStyle::peripheries(data.kind),
        ));
    }
    for (source, target, edge) in chart.graph.edges() {
        dot.push_str(&format!(
            "    {prefix}_{} -> {prefix}_{} [label=\"{}\", color=\"{}\", penwidth={}];\n",
            source.index(),
            target.index(),
            escape(&edge.text),
            EdgeStyle::color(&edge.text),
            EdgeStyle::penwidth(edge.visited),
        ));
    }
}

/// Escapes quotes, backslashes and newlines for DOT label strings.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Function, Stmt};
    use crate::passes::assemble::assemble;

    #[test]
    fn escape_handles_quotes_and_backslashes() {
        assert_eq!(escape(r#"say "hi" \ bye"#), r#"say \"hi\" \\ bye"#);
        assert_eq!(escape("a\nb"), "a\\nb");
    }

    #[test]
    fn renders_shapes_and_labels() {
        let chart = assemble(&Function {
            name: "demo".into(),
            body: Stmt::If {
                cond: "x > 0".into(),
                then_branch: Box::new(Stmt::Expr("y = 1".into())),
                else_branch: None,
            },
        });
        let dot = render_dot(&chart);

        assert!(dot.contains("shape=\"diamond\""));
        assert!(dot.contains("shape=\"ellipse\""));
        assert!(dot.contains("label=\"true\""));
        assert!(dot.contains("label=\"false\""));
        assert!(dot.contains("C1\\nx > 0"));
        assert!(dot.contains("demo"));
    }

    #[test]
    fn document_renders_one_cluster_per_function() {
        let charts = vec![
            assemble(&Function {
                name: "first".into(),
                body: Stmt::Compound(vec![]),
            }),
            assemble(&Function {
                name: "second".into(),
                body: Stmt::Compound(vec![]),
            }),
        ];
        let dot = render_document(&charts);
        assert!(dot.contains("subgraph cluster_0"));
        assert!(dot.contains("subgraph cluster_1"));
        assert!(dot.contains("label=\"first\""));
        assert!(dot.contains("label=\"second\""));
    }
}
