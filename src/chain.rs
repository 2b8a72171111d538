// Copyright (C) Brian G. Milnes 2025

//! Conditional chain classifier
//!
//! Walks a linked sequence of if / else-if / else branches and produces an
//! ordered, typed representation of the chain. All walks are linear in the
//! chain length; chains are acyclic and bounded by source length.

pub mod chain {
    use crate::ast::ast::{AstNode, ElseClause, Expr, IfStmt, Stmt};
    use crate::syntax::syntax::{SyntaxKind, SyntaxNode};

    /// One branch of a chain. The terminal else link has no condition.
    #[derive(Debug, Clone)]
    pub struct ChainLink {
        pub condition: Option<Expr>,
        pub body: Stmt,
        pub has_braces: bool,
        /// The conditional node this link came from; None for the
        /// terminal else link.
        pub if_stmt: Option<IfStmt>,
    }

    impl ChainLink {
        pub fn is_terminal(&self) -> bool {
            self.condition.is_none()
        }
    }

    /// An ordered chain, outer-to-inner. Length is at least 1 and only
    /// the last link may lack a condition.
    #[derive(Debug, Clone)]
    pub struct ConditionalChain {
        links: Vec<ChainLink>,
    }

    impl ConditionalChain {
        pub fn links(&self) -> &[ChainLink] {
            &self.links
        }

        pub fn len(&self) -> usize {
            self.links.len()
        }

        pub fn is_empty(&self) -> bool {
            self.links.is_empty()
        }

        pub fn terminal(&self) -> Option<&ChainLink> {
            self.links.last().filter(|link| link.is_terminal())
        }

        /// True when the chain holds the given conditional's link.
        pub fn contains(&self, if_stmt: &IfStmt) -> bool {
            self.links
                .iter()
                .any(|link| link.if_stmt.as_ref() == Some(if_stmt))
        }
    }

    /// True if the conditional is the else body of another conditional.
    pub fn is_else_body(if_stmt: &IfStmt) -> bool {
        if_stmt
            .syntax()
            .parent()
            .is_some_and(|parent| parent.kind() == SyntaxKind::ELSE_CLAUSE)
    }

    /// The first link of the chain this conditional belongs to, reached
    /// by walking previous links until none remains.
    pub fn topmost(if_stmt: &IfStmt) -> IfStmt {
        let mut current = if_stmt.clone();
        loop {
            let Some(else_clause) = current
                .syntax()
                .parent()
                .and_then(ElseClause::cast)
            else {
                return current;
            };
            let Some(previous) = else_clause.syntax().parent().and_then(IfStmt::cast) else {
                return current;
            };
            current = previous;
        }
    }

    /// True if the node is a chain's topmost conditional or lies within one.
    /// Ancestor walks in rowan include the node itself.
    pub fn is_part_of_chain(node: &SyntaxNode) -> bool {
        node.ancestors().any(|ancestor| ancestor.kind() == SyntaxKind::IF_STMT)
    }

    pub fn is_topmost(if_stmt: &IfStmt) -> bool {
        !is_else_body(if_stmt)
    }

    /// Chain of length 1 with no terminal link: no else, not an else body.
    pub fn is_simple_if(if_stmt: &IfStmt) -> bool {
        is_topmost(if_stmt) && if_stmt.else_clause().is_none()
    }

    /// Chain of length 2 whose second link is terminal: an else whose
    /// body is not itself a conditional.
    pub fn is_simple_if_else(if_stmt: &IfStmt) -> bool {
        if !is_topmost(if_stmt) {
            return false;
        }
        match if_stmt.else_clause() {
            Some(else_clause) => else_clause.if_stmt().is_none(),
            None => false,
        }
    }

    fn link_of(if_stmt: &IfStmt) -> Option<ChainLink> {
        let body = if_stmt.then_branch()?;
        let has_braces = matches!(body, Stmt::Block(_));
        Some(ChainLink {
            condition: if_stmt.condition(),
            has_braces,
            body,
            if_stmt: Some(if_stmt.clone()),
        })
    }

    /// The ordered chain starting at the given conditional, produced by
    /// repeatedly following else links until a branch with no further
    /// else or a terminal else is reached.
    pub fn chain_of(if_stmt: &IfStmt) -> Option<ConditionalChain> {
        let mut links = Vec::new();
        let mut current = if_stmt.clone();
        loop {
            links.push(link_of(&current)?);
            let Some(else_clause) = current.else_clause() else {
                break;
            };
            if let Some(next) = else_clause.if_stmt() {
                current = next;
                continue;
            }
            let body = else_clause.body()?;
            let has_braces = matches!(body, Stmt::Block(_));
            links.push(ChainLink { condition: None, has_braces, body, if_stmt: None });
            break;
        }
        Some(ConditionalChain { links })
    }
}
