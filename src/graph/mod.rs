mod flow_graph;
pub mod surgery;
mod vertex;

pub use flow_graph::FlowGraph;
pub use vertex::{
    EdgeData, OperatorCategory, OperatorDescriptor, OperatorTable, VertexData, VertexKind,
};
