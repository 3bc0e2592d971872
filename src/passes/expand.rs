//! The recursive flowchart builder.
//!
//! Every statement kind expands into zero or more vertices wired against a
//! continuation set: where control goes on fall-through, on `return`, on
//! `break` and on `continue`. Handlers return the vertex a predecessor
//! should connect *to*; pass-through kinds (`break`, `continue`, empty
//! blocks) return the matching continuation directly.

use petgraph::stable_graph::NodeIndex;

use crate::ast::Stmt;
use crate::graph::surgery;
use crate::graph::{FlowGraph, OperatorCategory, VertexKind};
use crate::passes::classify::{classify, StmtKind};

pub const TRUE_BRANCH: &str = "true";
pub const FALSE_BRANCH: &str = "false";
pub const DEFAULT_BRANCH: &str = "default";

/// Mutable build state threaded through the expansion; scoped to one graph.
#[derive(Default)]
pub struct BuildContext {
    pub table: crate::graph::OperatorTable,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Continuation targets for one statement expansion.
#[derive(Debug, Clone, Copy)]
pub struct Flow {
    /// Fall-through target on normal completion.
    pub end: NodeIndex,
    pub on_return: NodeIndex,
    pub on_break: NodeIndex,
    pub on_continue: NodeIndex,
}

impl Flow {
    /// Same continuations with a different fall-through target.
    pub fn to(self, end: NodeIndex) -> Self {
        Flow { end, ..self }
    }
}

/// Expands `stmt` into `g` and returns its entry vertex.
///
/// `begin` is the vertex the statement hangs off; only `case`/`default`
/// handlers use it, to re-label the edge from their switch vertex.
pub fn expand(
    stmt: &Stmt,
    g: &mut FlowGraph,
    ctx: &mut BuildContext,
    begin: NodeIndex,
    flow: Flow,
    depth: u32,
) -> NodeIndex {
    match stmt {
        Stmt::Expr(_) | Stmt::Call { external: true, .. } => {
            expand_simple_run(std::slice::from_ref(&stmt), g, ctx, flow, depth)
        }
        Stmt::Call { text, .. } => {
            let vertex = g.add_vertex(VertexKind::Call, depth);
            g.add_edge(vertex, flow.end, "");
            ctx.table
                .insert(vertex, OperatorCategory::Subprogram, text.clone());
            vertex
        }
        Stmt::Return { .. } => {
            let vertex = g.add_vertex(VertexKind::Operator, depth);
            g.add_edge(vertex, flow.on_return, "");
            ctx.table
                .insert(vertex, OperatorCategory::Operator, stmt.text());
            vertex
        }
        Stmt::Break => flow.on_break,
        Stmt::Continue => flow.on_continue,
        Stmt::If {
            cond,
            then_branch,
            else_branch,
        } => {
            let vertex = g.add_vertex(VertexKind::If, depth);
            ctx.table
                .insert(vertex, OperatorCategory::Condition, cond.clone());

            let then_vertex = expand(then_branch, g, ctx, vertex, flow, depth + 1);
            g.add_edge(vertex, then_vertex, TRUE_BRANCH);

            let false_target = match else_branch {
                Some(else_branch) => expand(else_branch, g, ctx, vertex, flow, depth + 1),
                None => flow.end,
            };
            g.add_edge(vertex, false_target, FALSE_BRANCH);

            vertex
        }
        Stmt::Compound(children) => expand_compound(children, g, ctx, begin, flow, depth),
        Stmt::For {
            init, cond, inc, body, ..
        } => {
            let content = if init.is_empty() && inc.is_empty() {
                format!("for ({cond})")
            } else {
                format!("for ({init}; {cond}; {inc})")
            };
            expand_loop(body.as_deref(), content, g, ctx, flow, depth)
        }
        Stmt::While { cond, body } => expand_loop(body.as_deref(), cond.clone(), g, ctx, flow, depth),
        Stmt::DoWhile { cond, body } => {
            expand_loop(body.as_deref(), format!("do while ({cond})"), g, ctx, flow, depth)
        }
        Stmt::Switch { cond, body } => expand_switch(cond, body, g, ctx, flow, depth),
        Stmt::Case { .. } | Stmt::Default { .. } => expand_case(stmt, g, ctx, begin, flow, depth),
    }
}

/// Expands an optional statement; `None` leaves control unchanged.
pub fn expand_opt(
    stmt: Option<&Stmt>,
    g: &mut FlowGraph,
    ctx: &mut BuildContext,
    begin: NodeIndex,
    flow: Flow,
    depth: u32,
) -> NodeIndex {
    match stmt {
        Some(stmt) => expand(stmt, g, ctx, begin, flow, depth),
        None => flow.end,
    }
}

/// One grouped child of a compound or switch body: either a single
/// non-trivial statement or a run of adjacent trivial ones.
enum Grouped<'a> {
    One(&'a Stmt),
    Run(Vec<&'a Stmt>),
}

impl Grouped<'_> {
    fn kind(&self) -> StmtKind {
        match self {
            Grouped::One(stmt) => classify(stmt),
            Grouped::Run(_) => StmtKind::Simple,
        }
    }
}

/// Scans children in order, folding runs of consecutive `Simple`-kind
/// statements into one group so the diagram gets one box per run.
fn group_children(children: &[Stmt]) -> Vec<Grouped<'_>> {
    let mut grouped = Vec::new();
    let mut run: Vec<&Stmt> = Vec::new();

    for child in children {
        if classify(child) == StmtKind::Simple {
            run.push(child);
        } else {
            if !run.is_empty() {
                grouped.push(Grouped::Run(std::mem::take(&mut run)));
            }
            grouped.push(Grouped::One(child));
        }
    }
    if !run.is_empty() {
        grouped.push(Grouped::Run(run));
    }
    grouped
}

fn expand_grouped(
    item: &Grouped<'_>,
    g: &mut FlowGraph,
    ctx: &mut BuildContext,
    begin: NodeIndex,
    flow: Flow,
    depth: u32,
) -> NodeIndex {
    match item {
        Grouped::One(stmt) => expand(stmt, g, ctx, begin, flow, depth),
        Grouped::Run(stmts) => expand_simple_run(stmts, g, ctx, flow, depth),
    }
}

/// One operator vertex for a run of trivial statements, its content the
/// statements' text joined by newlines in source order.
fn expand_simple_run(
    stmts: &[&Stmt],
    g: &mut FlowGraph,
    ctx: &mut BuildContext,
    flow: Flow,
    depth: u32,
) -> NodeIndex {
    let content = stmts
        .iter()
        .map(|s| s.text())
        .collect::<Vec<_>>()
        .join("\n");
    let vertex = g.add_vertex(VertexKind::Operator, depth);
    g.add_edge(vertex, flow.end, "");
    ctx.table.insert(vertex, OperatorCategory::Operator, content);
    vertex
}

/// Chains grouped children back to front: the last child expands against the
/// block's fall-through, each earlier child against the next child's entry.
fn expand_compound(
    children: &[Stmt],
    g: &mut FlowGraph,
    ctx: &mut BuildContext,
    begin: NodeIndex,
    flow: Flow,
    depth: u32,
) -> NodeIndex {
    let grouped = group_children(children);
    if grouped.is_empty() {
        return flow.end;
    }

    let mut entry = flow.end;
    for child in grouped.iter().rev() {
        entry = expand_grouped(child, g, ctx, begin, flow.to(entry), depth);
    }
    entry
}

/// Paired `LoopOpen`/`LoopClose` bracket; the body expands with `break`
/// retargeted past the close vertex and `continue` onto it.
fn expand_loop(
    body: Option<&Stmt>,
    content: String,
    g: &mut FlowGraph,
    ctx: &mut BuildContext,
    flow: Flow,
    depth: u32,
) -> NodeIndex {
    let open = g.add_vertex(VertexKind::LoopOpen, depth);
    let close = g.add_vertex(VertexKind::LoopClose { open }, depth);
    g.add_edge(close, flow.end, "");

    let body_flow = Flow {
        end: close,
        on_return: flow.on_return,
        on_break: flow.end,
        on_continue: close,
    };
    let body_vertex = expand_opt(body, g, ctx, open, body_flow, depth + 1);
    g.add_edge(open, body_vertex, "");

    ctx.table.insert(open, OperatorCategory::Loop, content);
    open
}

/// Fans grouped children out from the switch vertex.
///
/// Children are processed back to front so each case knows its fallthrough
/// target. A `Break` child severs fallthrough (it contributes no vertex);
/// plain statements between cases keep no direct edge from the switch
/// vertex, they are only reachable by falling through from the previous
/// case. Assembly appends case edges in reverse source order, so the
/// out-edges are reversed at the end to restore declaration order.
fn expand_switch(
    cond: &str,
    body: &[Stmt],
    g: &mut FlowGraph,
    ctx: &mut BuildContext,
    flow: Flow,
    depth: u32,
) -> NodeIndex {
    let vertex = g.add_vertex(VertexKind::Switch, depth);
    ctx.table.insert(
        vertex,
        OperatorCategory::Condition,
        format!("switch: {cond}"),
    );

    // Inside the switch, `break` jumps to the switch's own fall-through.
    let child_flow = Flow {
        end: flow.end,
        on_return: flow.on_return,
        on_break: flow.end,
        on_continue: flow.on_continue,
    };

    let grouped = group_children(body);
    match grouped.as_slice() {
        [] => {
            g.add_edge(vertex, flow.end, "");
        }
        [only] => match only.kind() {
            StmtKind::Break => {
                g.add_edge(vertex, flow.end, "");
            }
            StmtKind::Case | StmtKind::Default => {
                expand_grouped(only, g, ctx, vertex, child_flow, depth + 1);
            }
            _ => {
                // A lone statement with no case label stays reachable
                // through a direct unlabeled edge.
                let child = expand_grouped(only, g, ctx, vertex, child_flow, depth + 1);
                g.add_edge(vertex, child, "");
            }
        },
        _ => {
            let count = grouped.len();
            let mut entries: Vec<NodeIndex> = vec![flow.end; count];

            for i in (0..count).rev() {
                let child = &grouped[i];
                if child.kind() == StmtKind::Break {
                    // No vertex; the previous child's fallthrough target is
                    // resolved to the switch exit below.
                    continue;
                }
                let local_end = if i + 1 < count {
                    if grouped[i + 1].kind() == StmtKind::Break {
                        flow.end
                    } else {
                        entries[i + 1]
                    }
                } else {
                    flow.end
                };
                let entry =
                    expand_grouped(child, g, ctx, vertex, child_flow.to(local_end), depth + 1);
                entries[i] = entry;
                match child.kind() {
                    StmtKind::Case | StmtKind::Default => {}
                    // Dead statement between cases: drop the direct edge so
                    // it is only reachable via fallthrough.
                    _ => g.remove_edge_between(vertex, entry),
                }
            }
        }
    }

    surgery::reverse_out_edges(&mut g.graph, vertex);
    vertex
}

/// Delegates to the labeled statement and re-labels the edge from the
/// switch vertex with the collected case values.
///
/// Stacked labels (`case 1: case 2: stmt`, `default` included) collapse
/// into one comma-joined edge label.
fn expand_case(
    stmt: &Stmt,
    g: &mut FlowGraph,
    ctx: &mut BuildContext,
    begin: NodeIndex,
    flow: Flow,
    depth: u32,
) -> NodeIndex {
    let mut values = Vec::new();
    let mut inner = stmt;
    loop {
        match inner {
            Stmt::Case { value, body } => {
                values.push(value.clone());
                inner = body;
            }
            Stmt::Default { body } => {
                values.push(DEFAULT_BRANCH.to_string());
                inner = body;
            }
            _ => break,
        }
    }

    let vertex = expand(inner, g, ctx, begin, flow, depth);

    // The edge label must name the case, not the inner statement: replace
    // whatever edge the inner expansion may have left from the switch.
    g.remove_edge_between(begin, vertex);
    g.add_edge(begin, vertex, values.join(", "));
    vertex
}
