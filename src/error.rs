use thiserror::Error;

/// Errors raised by graph surgery when a structural precondition is broken.
///
/// These indicate a caller bug rather than malformed input; there is no
/// recovery for a half-spliced graph, so callers abort the current
/// function's construction.
#[derive(Debug, Error)]
pub enum GraphError {
    #[error(
        "cannot attach a subgraph after a vertex with {0} successors; \
         the vertex must have zero or one outgoing edge"
    )]
    AmbiguousAttach(usize),
}
