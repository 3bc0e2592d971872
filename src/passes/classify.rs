use crate::ast::Stmt;

/// Statement kind driving handler selection in the builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StmtKind {
    Simple,
    Compound,
    If,
    Switch,
    Case,
    Default,
    For,
    While,
    DoWhile,
    Call,
    Return,
    Break,
    Continue,
}

/// Maps a statement to its handler kind.
///
/// A call whose callee is opaque to the front-end (no body available)
/// degrades to `Simple`: it renders as a plain operator box instead of a
/// subprogram box.
pub fn classify(stmt: &Stmt) -> StmtKind {
    match stmt {
        Stmt::Compound(_) => StmtKind::Compound,
        Stmt::If { .. } => StmtKind::If,
        Stmt::Switch { .. } => StmtKind::Switch,
        Stmt::Case { .. } => StmtKind::Case,
        Stmt::Default { .. } => StmtKind::Default,
        Stmt::For { .. } => StmtKind::For,
        Stmt::While { .. } => StmtKind::While,
        Stmt::DoWhile { .. } => StmtKind::DoWhile,
        Stmt::Call { external: true, .. } => StmtKind::Simple,
        Stmt::Call { .. } => StmtKind::Call,
        Stmt::Return { .. } => StmtKind::Return,
        Stmt::Break => StmtKind::Break,
        Stmt::Continue => StmtKind::Continue,
        Stmt::Expr(_) => StmtKind::Simple,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_calls_degrade_to_simple() {
        let external = Stmt::Call {
            text: "helper()".into(),
            external: true,
        };
        let local = Stmt::Call {
            text: "helper()".into(),
            external: false,
        };
        assert_eq!(classify(&external), StmtKind::Simple);
        assert_eq!(classify(&local), StmtKind::Call);
    }

    #[test]
    fn each_variant_maps_to_its_kind() {
        assert_eq!(classify(&Stmt::Break), StmtKind::Break);
        assert_eq!(classify(&Stmt::Continue), StmtKind::Continue);
        assert_eq!(classify(&Stmt::Compound(vec![])), StmtKind::Compound);
        assert_eq!(classify(&Stmt::Expr("x = 1".into())), StmtKind::Simple);
        assert_eq!(
            classify(&Stmt::Return { value: None }),
            StmtKind::Return
        );
    }
}
