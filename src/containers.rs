// Copyright (C) Brian G. Milnes 2025

//! Statement container abstraction
//!
//! Uniform read/replace access to the ordered statement list owned by a
//! block-like node, hiding which concrete kind of node holds the list.
//! Creation fails closed for node kinds that own no statement list.

pub mod containers {
    use crate::ast::ast::Stmt;
    use crate::syntax::syntax::{SyntaxKind, SyntaxNode};
    use rowan::TextRange;
    use SyntaxKind::*;

    /// A view over any node kind that owns an ordered statement sequence.
    #[derive(Debug, Clone)]
    pub struct StatementContainer {
        host: SyntaxNode,
    }

    impl StatementContainer {
        /// Succeeds only for node kinds that own a statement list; all
        /// other kinds fail closed.
        pub fn try_create(node: &SyntaxNode) -> Option<StatementContainer> {
            match node.kind() {
                BLOCK | CASE_SECTION | SOURCE_FILE => {
                    Some(StatementContainer { host: node.clone() })
                }
                _ => None,
            }
        }

        pub fn host(&self) -> &SyntaxNode {
            &self.host
        }

        pub fn statements(&self) -> Vec<Stmt> {
            self.host.children().filter_map(Stmt::cast).collect()
        }

        pub fn statement_count(&self) -> usize {
            self.statements().len()
        }

        pub fn index_of(&self, stmt: &SyntaxNode) -> Option<usize> {
            self.statements()
                .iter()
                .position(|candidate| candidate.syntax() == stmt)
        }

        /// Replacement text for the host node with its statement list
        /// replaced, every other structural field unchanged. Trivia
        /// between surviving slots is reused; extra slots fall back to a
        /// newline plus the first statement's indentation.
        pub fn with_statements(&self, new_statements: &[String]) -> String {
            let host_text = self.host.text().to_string();
            let host_start: usize = self.host.text_range().start().into();
            let statements = self.statements();

            if statements.is_empty() {
                return self.with_statements_into_empty(new_statements, &host_text, host_start);
            }

            let first_start: usize =
                usize::from(statements[0].syntax().text_range().start()) - host_start;
            let last_end: usize = usize::from(
                statements[statements.len() - 1].syntax().text_range().end(),
            ) - host_start;

            // Original inter-statement gaps, reused as separators
            let mut gaps: Vec<String> = Vec::new();
            for pair in statements.windows(2) {
                let gap_start: usize =
                    usize::from(pair[0].syntax().text_range().end()) - host_start;
                let gap_end: usize =
                    usize::from(pair[1].syntax().text_range().start()) - host_start;
                gaps.push(host_text[gap_start..gap_end].to_string());
            }
            let fallback = format!(
                "\n{}",
                crate::trivia::trivia::indentation_of(statements[0].syntax())
            );

            let mut spliced = String::new();
            for (index, stmt_text) in new_statements.iter().enumerate() {
                if index > 0 {
                    spliced.push_str(gaps.get(index - 1).unwrap_or(&fallback));
                }
                spliced.push_str(stmt_text);
            }

            let mut result = String::new();
            result.push_str(&host_text[..first_start]);
            result.push_str(&spliced);
            result.push_str(&host_text[last_end..]);
            result
        }

        fn with_statements_into_empty(
            &self,
            new_statements: &[String],
            host_text: &str,
            host_start: usize,
        ) -> String {
            // Insert after the opening brace or the last case label colon
            let tokens: Vec<_> = self
                .host
                .descendants_with_tokens()
                .filter_map(|element| element.into_token())
                .collect();
            let anchor = match self.host.kind() {
                CASE_SECTION => tokens.iter().filter(|token| token.kind() == COLON).last(),
                _ => tokens.iter().find(|token| token.kind() == L_BRACE),
            };
            let insert_at = anchor
                .map(|token| usize::from(token.text_range().end()) - host_start)
                .unwrap_or(0);
            let mut result = String::new();
            result.push_str(&host_text[..insert_at]);
            for stmt_text in new_statements {
                result.push(' ');
                result.push_str(stmt_text);
            }
            result.push_str(&host_text[insert_at..]);
            result
        }
    }

    /// A container view restricted to the contiguous statements whose
    /// spans fall entirely inside a text span. Partial overlaps are
    /// excluded, never truncated.
    #[derive(Debug, Clone)]
    pub struct StatementContainerSlice {
        container: StatementContainer,
        start_index: usize,
        count: usize,
    }

    impl StatementContainerSlice {
        pub fn try_create(node: &SyntaxNode, span: TextRange) -> Option<StatementContainerSlice> {
            let container = StatementContainer::try_create(node)?;
            let statements = container.statements();
            let mut start_index = None;
            let mut count = 0;
            for (index, stmt) in statements.iter().enumerate() {
                let inside = span.contains_range(stmt.syntax().text_range());
                if inside {
                    if start_index.is_none() {
                        start_index = Some(index);
                    }
                    count += 1;
                } else if start_index.is_some() {
                    break;
                }
            }
            Some(StatementContainerSlice {
                container,
                start_index: start_index.unwrap_or(0),
                count,
            })
        }

        pub fn container(&self) -> &StatementContainer {
            &self.container
        }

        pub fn start_index(&self) -> usize {
            self.start_index
        }

        pub fn count(&self) -> usize {
            self.count
        }

        pub fn is_empty(&self) -> bool {
            self.count == 0
        }

        pub fn statements(&self) -> Vec<Stmt> {
            self.container
                .statements()
                .into_iter()
                .skip(self.start_index)
                .take(self.count)
                .collect()
        }
    }
}
