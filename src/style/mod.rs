mod edge_style;
mod node_style;

pub use edge_style::EdgeStyle;
pub use node_style::NodeStyle;
