// Copyright (C) Brian G. Milnes 2025

//! Nested-if merge
//!
//! `if (a) { if (b) { Work(); } }` becomes `if (a && b) { Work(); }`.
//! The rewrite is withheld when comments or directives sit in any of the
//! gaps the merge would close.

pub mod merge_nested_if {
    use crate::ast::ast::{AstNode, Block, IfStmt, Stmt};
    use crate::chain::chain;
    use crate::rules::rules::{
        local_finding, parenthesize_for_and, unwrap_single, Finding, RuleContext, RuleKind,
        TextEdit,
    };
    use crate::syntax::syntax::SyntaxNode;
    use crate::trivia::trivia;
    use rowan::{TextRange, TextSize};

    pub fn detect(root: &SyntaxNode, _ctx: &RuleContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        for node in root.descendants() {
            let Some(outer) = IfStmt::cast(node) else {
                continue;
            };
            if let Some(finding) = check(root, &outer) {
                findings.push(finding);
            }
        }
        findings
    }

    fn gap(from: TextSize, to: TextSize) -> Option<TextRange> {
        if from <= to {
            Some(TextRange::new(from, to))
        } else {
            None
        }
    }

    fn protected_in_gap(root: &SyntaxNode, from: TextSize, to: TextSize) -> bool {
        match gap(from, to) {
            Some(range) => trivia::has_protected_trivia(root, range),
            None => true,
        }
    }

    fn check(root: &SyntaxNode, outer: &IfStmt) -> Option<Finding> {
        if !chain::is_simple_if(outer) {
            return None;
        }
        let outer_body = outer.then_branch()?;
        let inner = match unwrap_single(&outer_body) {
            Stmt::If(inner) => inner,
            _ => return None,
        };
        if inner.else_clause().is_some() {
            return None;
        }

        let outer_condition = outer.condition()?;
        let inner_condition = inner.condition()?;
        // Top-level disjunctions stay as separate branches
        if outer_condition.is_logical_or() || inner_condition.is_logical_or() {
            return None;
        }

        // No comment or directive may sit between the outer condition's
        // close paren and the inner if keyword
        let outer_rparen = outer.r_paren()?;
        let inner_if_token = inner.if_token()?;
        if protected_in_gap(
            root,
            outer_rparen.text_range().end(),
            inner_if_token.text_range().start(),
        ) {
            return None;
        }
        // Nor inside the inner if's own parentheses
        let inner_lparen = inner.l_paren()?;
        let inner_rparen = inner.r_paren()?;
        if protected_in_gap(
            root,
            inner_lparen.text_range().end(),
            inner_condition.syntax().text_range().start(),
        ) || protected_in_gap(
            root,
            inner_condition.syntax().text_range().end(),
            inner_rparen.text_range().start(),
        ) {
            return None;
        }

        let inner_body = inner.then_branch()?;
        // Nor, when both bodies are braced, in either pair of braces
        // beyond whitespace
        if let (Stmt::Block(outer_block), Stmt::Block(inner_block)) = (&outer_body, &inner_body) {
            if brace_gaps_hold_protected(root, outer_block, inner.syntax())
                || block_edge_gaps_hold_protected(root, inner_block)
            {
                return None;
            }
        }

        let combined = format!(
            "{} && {}",
            parenthesize_for_and(&outer_condition),
            parenthesize_for_and(&inner_condition)
        );
        // Splice unwrapped statements only when the outer braces survive
        // to hold them; an unbraced outer body keeps the inner block
        let body_replacement = if matches!(outer_body, Stmt::Block(_)) {
            inner_body_text(&inner_body)
        } else {
            inner_body.syntax().text().to_string()
        };

        let condition_edit = TextEdit {
            range: outer_condition.syntax().text_range(),
            replacement: combined.clone(),
        };
        let body_edit = TextEdit {
            range: inner.syntax().text_range(),
            replacement: body_replacement,
        };

        let fade = TextRange::new(
            inner_if_token.text_range().start(),
            inner_rparen.text_range().end(),
        );
        let primary = outer
            .if_token()
            .map(|token| token.text_range())
            .unwrap_or_else(|| outer.syntax().text_range());

        Some(local_finding(
            RuleKind::MergeNestedIf,
            primary,
            vec![fade],
            vec![combined],
            outer.syntax().text_range(),
            vec![condition_edit, body_edit],
            true,
        ))
    }

    /// The statement sequence the merged body keeps: the inner block's
    /// contents unwrapped, or the lone unbraced statement.
    fn inner_body_text(inner_body: &Stmt) -> String {
        if let Stmt::Block(block) = inner_body {
            let statements: Vec<Stmt> = block.statements().collect();
            if let (Some(first), Some(last)) = (statements.first(), statements.last()) {
                let block_start: usize = block.syntax().text_range().start().into();
                let start: usize = usize::from(first.syntax().text_range().start()) - block_start;
                let end: usize = usize::from(last.syntax().text_range().end()) - block_start;
                return block.syntax().text().to_string()[start..end].to_string();
            }
            return String::new();
        }
        inner_body.syntax().text().to_string()
    }

    /// Protected trivia between the outer block's braces and the inner
    /// if statement.
    fn brace_gaps_hold_protected(
        root: &SyntaxNode,
        outer_block: &Block,
        inner_if: &SyntaxNode,
    ) -> bool {
        let Some(l_brace) = outer_block.l_brace() else {
            return true;
        };
        let Some(r_brace) = outer_block.r_brace() else {
            return true;
        };
        protected_in_gap(
            root,
            l_brace.text_range().end(),
            inner_if.text_range().start(),
        ) || protected_in_gap(root, inner_if.text_range().end(), r_brace.text_range().start())
    }

    /// Protected trivia between the inner block's braces and its first
    /// and last statements.
    fn block_edge_gaps_hold_protected(root: &SyntaxNode, block: &Block) -> bool {
        let Some(l_brace) = block.l_brace() else {
            return true;
        };
        let Some(r_brace) = block.r_brace() else {
            return true;
        };
        let statements: Vec<Stmt> = block.statements().collect();
        let (Some(first), Some(last)) = (statements.first(), statements.last()) else {
            // An empty inner block merges to an empty body; only
            // whitespace may sit between its braces
            return protected_in_gap(
                root,
                l_brace.text_range().end(),
                r_brace.text_range().start(),
            );
        };
        protected_in_gap(
            root,
            l_brace.text_range().end(),
            first.syntax().text_range().start(),
        ) || protected_in_gap(
            root,
            last.syntax().text_range().end(),
            r_brace.text_range().start(),
        )
    }
}
