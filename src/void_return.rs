// Copyright (C) Brian G. Milnes 2025

//! Return/yield-of-void normalization
//!
//! `return Log();` where `Log` statically returns no value becomes the
//! bare call statement `Log();`; the vacuous yield-return shape drops
//! its wrapper the same way. Withheld whenever the callee's return type
//! cannot be resolved.

pub mod void_return {
    use crate::ast::ast::{AstNode, Expr, ReturnStmt, Stmt, YieldStmt};
    use crate::rules::rules::{local_finding, Finding, RuleContext, RuleKind, TextEdit};
    use crate::syntax::syntax::SyntaxNode;
    use crate::trivia::trivia::RelocationPlan;
    use rowan::TextRange;

    pub fn detect(root: &SyntaxNode, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        for node in root.descendants() {
            let Some(stmt) = Stmt::cast(node) else {
                continue;
            };
            let (range, keyword_range, operand) = match &stmt {
                Stmt::Return(return_stmt) => match parts_of_return(return_stmt) {
                    Some(parts) => parts,
                    None => continue,
                },
                Stmt::Yield(yield_stmt) => match parts_of_yield(yield_stmt) {
                    Some(parts) => parts,
                    None => continue,
                },
                _ => continue,
            };
            if !ctx.model.is_void_call(&operand, ctx.doc_index) {
                continue;
            }
            let replacement = format!("{};", operand.text().trim());
            let plan = RelocationPlan::for_range(root, range);
            if !plan.permits(&replacement) {
                continue;
            }
            findings.push(local_finding(
                RuleKind::DropVoidReturn,
                keyword_range,
                vec![keyword_range],
                vec![operand.text().trim().to_string()],
                range,
                vec![TextEdit { range, replacement }],
                false,
            ));
        }
        findings
    }

    fn parts_of_return(return_stmt: &ReturnStmt) -> Option<(TextRange, TextRange, Expr)> {
        let operand = return_stmt.expr()?;
        let keyword = return_stmt.return_token()?;
        Some((
            return_stmt.syntax().text_range(),
            keyword.text_range(),
            operand,
        ))
    }

    fn parts_of_yield(yield_stmt: &YieldStmt) -> Option<(TextRange, TextRange, Expr)> {
        if yield_stmt.is_break() {
            return None;
        }
        let operand = yield_stmt.expr()?;
        let keyword = yield_stmt.yield_token()?;
        Some((
            yield_stmt.syntax().text_range(),
            keyword.text_range(),
            operand,
        ))
    }
}
