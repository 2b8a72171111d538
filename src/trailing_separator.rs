// Copyright (C) Brian G. Milnes 2025

//! Redundant trailing separator removal
//!
//! An initializer list whose separator count equals its element count
//! carries a dangling trailing comma. Only the comma token is deleted;
//! the trivia around it stays in place, attached to the preceding
//! element and the closing brace.

pub mod trailing_separator {
    use crate::ast::ast::{AstNode, InitializerList};
    use crate::rules::rules::{local_finding, Finding, RuleContext, RuleKind, TextEdit};
    use crate::syntax::syntax::SyntaxNode;

    pub fn detect(root: &SyntaxNode, _ctx: &RuleContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        for node in root.descendants() {
            let Some(list) = InitializerList::cast(node) else {
                continue;
            };
            if let Some(finding) = check(&list) {
                findings.push(finding);
            }
        }
        findings
    }

    fn check(list: &InitializerList) -> Option<Finding> {
        let elements = list.element_count();
        if elements == 0 || list.separator_count() != elements {
            return None;
        }
        // The dangling separator is the one after the last element
        let last_element_end = list
            .elements()
            .last()?
            .syntax()
            .text_range()
            .end();
        let separator = list
            .separators()
            .find(|token| token.text_range().start() >= last_element_end)?;
        let range = separator.text_range();

        Some(local_finding(
            RuleKind::TrailingSeparator,
            range,
            vec![range],
            vec![separator.text().to_string()],
            list.syntax().text_range(),
            vec![TextEdit { range, replacement: String::new() }],
            false,
        ))
    }
}
