//! Statement tree handed to the flowchart builder by a front-end.
//!
//! The builder never re-parses source text: every node carries the rendered
//! text of the expressions it needs for labels, produced by whichever
//! front-end lowered the source (see `passes::lower` for the syn one).

/// A single function ready to be turned into a flowchart.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: String,
    pub body: Stmt,
}

/// Structured statement, one variant per statement kind the builder knows.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// A `{ ... }` block of child statements.
    Compound(Vec<Stmt>),
    If {
        cond: String,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    /// Switch body is the flat child list of its block: `Case`/`Default`
    /// labels, `Break`s and any plain statements between them.
    Switch { cond: String, body: Vec<Stmt> },
    /// `case value:` label; `body` is the statement the label is attached to,
    /// possibly another `Case`/`Default` when labels stack.
    Case { value: String, body: Box<Stmt> },
    Default { body: Box<Stmt> },
    For {
        init: String,
        cond: String,
        inc: String,
        body: Option<Box<Stmt>>,
    },
    While { cond: String, body: Option<Box<Stmt>> },
    DoWhile { cond: String, body: Option<Box<Stmt>> },
    /// Call statement. `external` marks callees the front-end has no body
    /// for; those render as plain operators rather than subprogram boxes.
    Call { text: String, external: bool },
    Return { value: Option<String> },
    Break,
    Continue,
    /// Any other statement, kept only as its rendered text.
    Expr(String),
}

impl Stmt {
    /// Rendered text of a statement, as used for operator-box contents.
    pub fn text(&self) -> String {
        match self {
            Stmt::Expr(text) => text.clone(),
            Stmt::Call { text, .. } => text.clone(),
            Stmt::Return { value: Some(v) } => format!("return {v}"),
            Stmt::Return { value: None } => "return".to_string(),
            Stmt::Break => "break".to_string(),
            Stmt::Continue => "continue".to_string(),
            Stmt::If { cond, .. } => format!("if ({cond})"),
            Stmt::Switch { cond, .. } => format!("switch ({cond})"),
            Stmt::Case { value, .. } => format!("case {value}:"),
            Stmt::Default { .. } => "default:".to_string(),
            Stmt::For { init, cond, inc, .. } => format!("for ({init}; {cond}; {inc})"),
            Stmt::While { cond, .. } => format!("while ({cond})"),
            Stmt::DoWhile { cond, .. } => format!("do while ({cond})"),
            Stmt::Compound(_) => "{ ... }".to_string(),
        }
    }
}
