use petgraph::stable_graph::NodeIndex;
use serde::Serialize;
use std::collections::HashMap;

/// Vertex kind; the flowchart shape is derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexKind {
    Begin,
    End,
    Operator,
    Call,
    If,
    Switch,
    LoopOpen,
    /// Closing bracket of a loop; keeps a back-reference to its opening
    /// vertex so the labeling pass can give both the same label.
    LoopClose { open: NodeIndex },
}

impl VertexKind {
    pub fn shape(&self) -> &'static str {
        match self {
            VertexKind::Begin | VertexKind::End => "ellipse",
            VertexKind::Operator | VertexKind::Call => "rectangle",
            VertexKind::If | VertexKind::Switch => "diamond",
            VertexKind::LoopOpen => "trapezium",
            VertexKind::LoopClose { .. } => "invtrapezium",
        }
    }
}

/// Per-vertex payload. `label` starts empty and is filled by the labeling
/// pass; `depth` records nesting depth and is informational only.
#[derive(Debug, Clone)]
pub struct VertexData {
    pub kind: VertexKind,
    pub label: String,
    pub depth: u32,
}

impl VertexData {
    pub fn new(kind: VertexKind, depth: u32) -> Self {
        Self {
            kind,
            label: String::new(),
            depth,
        }
    }
}

impl Default for VertexData {
    fn default() -> Self {
        Self::new(VertexKind::Operator, 0)
    }
}

/// Per-edge payload. `visited` marks spanning-tree edges during the labeling
/// DFS and is only consumed by the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeData {
    pub text: String,
    pub visited: bool,
}

impl EdgeData {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            visited: false,
        }
    }
}

/// Category an operator-table entry belongs to; each category numbers its
/// labels independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperatorCategory {
    Operator,
    Condition,
    Loop,
    Subprogram,
}

impl OperatorCategory {
    pub fn prefix(&self) -> &'static str {
        match self {
            OperatorCategory::Operator => "O",
            OperatorCategory::Condition => "C",
            OperatorCategory::Loop => "L",
            OperatorCategory::Subprogram => "S",
        }
    }
}

/// Record attached to a vertex at build time; `label` is filled by the
/// labeling pass.
#[derive(Debug, Clone, Serialize)]
pub struct OperatorDescriptor {
    pub category: OperatorCategory,
    pub content: String,
    pub label: String,
}

/// Per-graph map from vertex to descriptor. Never holds entries for
/// `Begin`/`End` vertices.
#[derive(Debug, Default)]
pub struct OperatorTable {
    entries: HashMap<NodeIndex, OperatorDescriptor>,
}

impl OperatorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, vertex: NodeIndex, category: OperatorCategory, content: String) {
        self.entries.insert(
            vertex,
            OperatorDescriptor {
                category,
                content,
                label: String::new(),
            },
        );
    }

    pub fn get(&self, vertex: NodeIndex) -> Option<&OperatorDescriptor> {
        self.entries.get(&vertex)
    }

    pub fn get_mut(&mut self, vertex: NodeIndex) -> Option<&mut OperatorDescriptor> {
        self.entries.get_mut(&vertex)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, &OperatorDescriptor)> {
        self.entries.iter().map(|(v, d)| (*v, d))
    }
}
