//! syn front-end: lowers Rust functions into the builder's statement tree.
//!
//! Rust has no C-style switch; `match` lowers to a switch whose arms become
//! `Case`/`Default` children, each followed by a synthetic `Break` since
//! arms never fall through. `loop` lowers to a `while (true)`.

use quote::{quote, ToTokens};
use syn::{Block, Expr, ExprIf, ExprMatch, ItemFn, Pat};

use crate::ast::{Function, Stmt};

fn render<T: ToTokens>(tokens: &T) -> String {
    quote!(#tokens).to_string()
}

pub fn lower_function(func: &ItemFn) -> Function {
    Function {
        name: func.sig.ident.to_string(),
        body: lower_block(&func.block),
    }
}

fn lower_block(block: &Block) -> Stmt {
    Stmt::Compound(block.stmts.iter().map(lower_stmt).collect())
}

fn lower_stmt(stmt: &syn::Stmt) -> Stmt {
    match stmt {
        syn::Stmt::Expr(expr, _) => lower_expr(expr),
        // let bindings, nested items, macro statements: plain operators.
        other => Stmt::Expr(render(other)),
    }
}

fn lower_expr(expr: &Expr) -> Stmt {
    match expr {
        Expr::If(expr_if) => lower_if(expr_if),
        Expr::While(expr_while) => {
            let cond = &expr_while.cond;
            Stmt::While {
                cond: render(cond),
                body: Some(Box::new(lower_block(&expr_while.body))),
            }
        }
        Expr::Loop(expr_loop) => Stmt::While {
            cond: "true".to_string(),
            body: Some(Box::new(lower_block(&expr_loop.body))),
        },
        Expr::ForLoop(expr_for) => {
            let pat = &expr_for.pat;
            let iter = &expr_for.expr;
            Stmt::For {
                init: String::new(),
                cond: format!("{} in {}", render(pat), render(iter)),
                inc: String::new(),
                body: Some(Box::new(lower_block(&expr_for.body))),
            }
        }
        Expr::Match(expr_match) => lower_match(expr_match),
        Expr::Return(expr_return) => Stmt::Return {
            value: expr_return.expr.as_ref().map(render),
        },
        Expr::Break(_) => Stmt::Break,
        Expr::Continue(_) => Stmt::Continue,
        Expr::Block(expr_block) => lower_block(&expr_block.block),
        Expr::Call(call) => {
            // A bare single-segment callee is assumed local; anything else
            // (paths into other modules, macros, methods) is opaque to this
            // front-end and degrades to a plain operator.
            let external = match call.func.as_ref() {
                Expr::Path(path) => path.path.segments.len() != 1,
                _ => true,
            };
            Stmt::Call {
                text: render(expr),
                external,
            }
        }
        Expr::MethodCall(_) => Stmt::Call {
            text: render(expr),
            external: true,
        },
        _ => Stmt::Expr(render(expr)),
    }
}

fn lower_if(expr_if: &ExprIf) -> Stmt {
    let cond = &expr_if.cond;
    let else_branch = expr_if.else_branch.as_ref().map(|(_, else_expr)| {
        Box::new(match else_expr.as_ref() {
            Expr::Block(block) => lower_block(&block.block),
            // else-if chains nest as the else branch.
            other => lower_expr(other),
        })
    });
    Stmt::If {
        cond: render(cond),
        then_branch: Box::new(lower_block(&expr_if.then_branch)),
        else_branch,
    }
}

fn lower_match(expr_match: &ExprMatch) -> Stmt {
    let subject = &expr_match.expr;
    let mut body = Vec::new();
    for arm in &expr_match.arms {
        let arm_body = match arm.body.as_ref() {
            Expr::Block(block) => lower_block(&block.block),
            other => lower_expr(other),
        };
        let labeled = if matches!(&arm.pat, Pat::Wild(_)) {
            Stmt::Default {
                body: Box::new(arm_body),
            }
        } else {
            Stmt::Case {
                value: render(&arm.pat),
                body: Box::new(arm_body),
            }
        };
        body.push(labeled);
        body.push(Stmt::Break);
    }
    Stmt::Switch {
        cond: render(subject),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::classify::{classify, StmtKind};

    fn lower_source(source: &str) -> Function {
        let file: syn::File = syn::parse_str(source).unwrap();
        let func = file
            .items
            .iter()
            .find_map(|item| match item {
                syn::Item::Fn(f) => Some(f),
                _ => None,
            })
            .unwrap();
        lower_function(func)
    }

    #[test]
    fn lowers_if_else_and_calls() {
        let func = lower_source("fn main() { if x { f(); } else { g(); } }");
        let Stmt::Compound(children) = &func.body else {
            panic!("expected compound body");
        };
        let Stmt::If {
            cond,
            then_branch,
            else_branch,
        } = &children[0]
        else {
            panic!("expected if");
        };
        assert_eq!(cond, "x");
        let Stmt::Compound(then_children) = then_branch.as_ref() else {
            panic!("expected block");
        };
        assert_eq!(classify(&then_children[0]), StmtKind::Call);
        assert!(else_branch.is_some());
    }

    #[test]
    fn match_lowers_to_switch_with_breaks() {
        let func = lower_source("fn main() { match x { 1 => a(), 2 => b(), _ => c() } }");
        let Stmt::Compound(children) = &func.body else {
            panic!("expected compound body");
        };
        let Stmt::Switch { cond, body } = &children[0] else {
            panic!("expected switch");
        };
        assert_eq!(cond, "x");
        assert_eq!(body.len(), 6);
        assert!(matches!(&body[0], Stmt::Case { value, .. } if value == "1"));
        assert!(matches!(&body[1], Stmt::Break));
        assert!(matches!(&body[4], Stmt::Default { .. }));
        assert!(matches!(&body[5], Stmt::Break));
    }

    #[test]
    fn loop_lowers_to_while_true() {
        let func = lower_source("fn main() { loop { tick(); } }");
        let Stmt::Compound(children) = &func.body else {
            panic!("expected compound body");
        };
        assert!(matches!(&children[0], Stmt::While { cond, .. } if cond == "true"));
    }

    #[test]
    fn qualified_calls_are_external() {
        let func = lower_source("fn main() { std::process::exit(0); local(); x.method(); }");
        let Stmt::Compound(children) = &func.body else {
            panic!("expected compound body");
        };
        assert!(matches!(&children[0], Stmt::Call { external: true, .. }));
        assert!(matches!(&children[1], Stmt::Call { external: false, .. }));
        assert!(matches!(&children[2], Stmt::Call { external: true, .. }));
    }

    #[test]
    fn let_bindings_are_plain_operators() {
        let func = lower_source("fn main() { let x = 5; }");
        let Stmt::Compound(children) = &func.body else {
            panic!("expected compound body");
        };
        assert_eq!(classify(&children[0]), StmtKind::Simple);
    }
}
