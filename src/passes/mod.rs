mod assemble;
pub mod classify;
mod collector;
pub mod expand;
mod label;
mod lower;
mod parser;
mod renderer;

pub use assemble::{assemble, inline_call, FunctionFlowchart};
pub use classify::{classify, StmtKind};
pub use collector::FunctionCollector;
pub use expand::{expand, BuildContext, Flow};
pub use label::{assign_labels, LabelCounters};
pub use lower::lower_function;
pub use parser::parse_source;
pub use renderer::{render_document, render_dot};
