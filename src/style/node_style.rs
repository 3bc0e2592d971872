use crate::graph::VertexKind;

pub struct NodeStyle;

impl NodeStyle {
    pub fn shape(kind: VertexKind) -> &'static str {
        kind.shape()
    }

    pub fn fillcolor(kind: VertexKind) -> &'static str {
        match kind {
            VertexKind::Begin => "lightgreen",
            VertexKind::End => "lightpink",
            VertexKind::Operator => "white",
            VertexKind::Call => "lightblue",
            VertexKind::If | VertexKind::Switch => "lightyellow",
            VertexKind::LoopOpen | VertexKind::LoopClose { .. } => "lightgray",
        }
    }

    /// Subprogram boxes render with doubled borders.
    pub fn peripheries(kind: VertexKind) -> u32 {
        match kind {
            VertexKind::Call => 2,
            _ => 1,
        }
    }
}
