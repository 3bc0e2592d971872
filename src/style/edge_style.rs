use crate::passes::expand::{FALSE_BRANCH, TRUE_BRANCH};

pub struct EdgeStyle;

impl EdgeStyle {
    pub fn color(text: &str) -> &'static str {
        match text {
            TRUE_BRANCH => "green",
            FALSE_BRANCH => "red",
            _ => "black",
        }
    }

    /// Spanning-tree edges of the labeling DFS are drawn heavier.
    pub fn penwidth(visited: bool) -> u32 {
        if visited { 2 } else { 1 }
    }
}
