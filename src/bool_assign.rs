// Copyright (C) Brian G. Milnes 2025

//! Boolean assignment/return from a two-branch conditional
//!
//! `if (c) { x = true; } else { x = false; }` collapses to `x = c;`,
//! negating the condition when the branches are flipped. The same shape
//! over return and yield-return statements collapses to a single return
//! or yield of the condition.

pub mod bool_assign {
    use crate::ast::ast::{AstNode, Expr, IfStmt, Stmt, syntactically_equal};
    use crate::chain::chain;
    use crate::rules::rules::{
        local_finding, negate_condition, unwrap_single, Finding, RuleContext, RuleKind, TextEdit,
    };
    use crate::syntax::syntax::SyntaxNode;
    use crate::trivia::trivia::RelocationPlan;

    pub fn detect(kind: RuleKind, root: &SyntaxNode, _ctx: &RuleContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        for node in root.descendants() {
            let Some(if_stmt) = IfStmt::cast(node) else {
                continue;
            };
            if let Some(finding) = check(kind, root, &if_stmt) {
                findings.push(finding);
            }
        }
        findings
    }

    fn check(kind: RuleKind, root: &SyntaxNode, if_stmt: &IfStmt) -> Option<Finding> {
        if !chain::is_simple_if_else(if_stmt) {
            return None;
        }
        let cond_chain = chain::chain_of(if_stmt)?;
        if cond_chain.len() != 2 {
            return None;
        }
        let terminal = cond_chain.terminal()?;
        let first = &cond_chain.links()[0];
        let condition = first.condition.clone()?;
        let then_stmt = unwrap_single(&first.body);
        let else_stmt = unwrap_single(&terminal.body);

        let replacement = match kind {
            RuleKind::AssignCondition => try_assignment(&condition, &then_stmt, &else_stmt)?,
            RuleKind::ReturnCondition => try_return(&condition, &then_stmt, &else_stmt)
                .or_else(|| try_yield(&condition, &then_stmt, &else_stmt))?,
            _ => return None,
        };

        // Every comment or directive in the replaced span must survive in
        // the replacement, or the rewrite is withheld
        let range = if_stmt.syntax().text_range();
        let plan = RelocationPlan::for_range(root, range);
        if !plan.permits(&replacement) {
            return None;
        }

        let mut fades = Vec::new();
        if let Some(if_token) = if_stmt.if_token() {
            fades.push(if_token.text_range());
        }
        if let Some(else_token) = if_stmt.else_clause().and_then(|clause| clause.else_token()) {
            fades.push(else_token.text_range());
        }
        let primary = if_stmt
            .if_token()
            .map(|token| token.text_range())
            .unwrap_or(range);

        Some(local_finding(
            kind,
            primary,
            fades,
            vec![replacement.clone()],
            range,
            vec![TextEdit { range, replacement }],
            true,
        ))
    }

    /// The condition's text, negated when the then branch carried `false`.
    fn condition_text(condition: &Expr, then_value: bool) -> String {
        if then_value {
            condition.text().trim().to_string()
        } else {
            negate_condition(condition)
        }
    }

    fn opposite_bool_values(a: &Expr, b: &Expr) -> Option<bool> {
        let first = a.as_bool_literal()?;
        let second = b.as_bool_literal()?;
        if first == second {
            return None;
        }
        Some(first)
    }

    fn try_assignment(condition: &Expr, then_stmt: &Stmt, else_stmt: &Stmt) -> Option<String> {
        let (Stmt::Expr(then_expr), Stmt::Expr(else_expr)) = (then_stmt, else_stmt) else {
            return None;
        };
        let (Some(Expr::Assign(then_assign)), Some(Expr::Assign(else_assign))) =
            (then_expr.expr(), else_expr.expr())
        else {
            return None;
        };
        let then_lhs = then_assign.lhs()?;
        let else_lhs = else_assign.lhs()?;
        if !syntactically_equal(then_lhs.syntax(), else_lhs.syntax()) {
            return None;
        }
        let then_value = opposite_bool_values(&then_assign.rhs()?, &else_assign.rhs()?)?;
        Some(format!(
            "{} = {};",
            then_lhs.text().trim(),
            condition_text(condition, then_value)
        ))
    }

    fn try_return(condition: &Expr, then_stmt: &Stmt, else_stmt: &Stmt) -> Option<String> {
        let (Stmt::Return(then_return), Stmt::Return(else_return)) = (then_stmt, else_stmt)
        else {
            return None;
        };
        let then_value = opposite_bool_values(&then_return.expr()?, &else_return.expr()?)?;
        Some(format!("return {};", condition_text(condition, then_value)))
    }

    fn try_yield(condition: &Expr, then_stmt: &Stmt, else_stmt: &Stmt) -> Option<String> {
        let (Stmt::Yield(then_yield), Stmt::Yield(else_yield)) = (then_stmt, else_stmt) else {
            return None;
        };
        if then_yield.is_break() || else_yield.is_break() {
            return None;
        }
        let then_value = opposite_bool_values(&then_yield.expr()?, &else_yield.expr()?)?;
        Some(format!(
            "yield return {};",
            condition_text(condition, then_value)
        ))
    }
}
