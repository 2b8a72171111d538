// Copyright (C) Brian G. Milnes 2025

//! Rule registry and the shared detection/fix plumbing
//!
//! Each rewrite rule is a variant of one closed enumeration, dispatched
//! through a single match. Rules are independent and stateless: they
//! pair an applicability predicate over the tree with a rewrite, and
//! they withhold rather than guess whenever a precondition cannot be
//! statically confirmed.

pub mod rules {
    use crate::cancel::cancel::CancelToken;
    use crate::config::config::Settings;
    use crate::semantics::semantics::SemanticModel;
    use crate::syntax::syntax::SyntaxNode;
    use anyhow::Result;
    use rowan::TextRange;
    use serde::{Deserialize, Serialize};

    /// A serializable half-open text span.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct Span {
        pub start: usize,
        pub end: usize,
    }

    impl From<TextRange> for Span {
        fn from(range: TextRange) -> Span {
            Span { start: range.start().into(), end: range.end().into() }
        }
    }

    /// What detection hands the host: the rule, where it fired, which
    /// sub-ranges to render as "to be removed", and message arguments.
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Diagnostic {
        pub rule_id: String,
        pub primary_span: Span,
        pub secondary_fade_spans: Vec<Span>,
        pub message_args: Vec<String>,
    }

    impl std::fmt::Display for Diagnostic {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(
                f,
                "[{}] at {}..{}: {}",
                self.rule_id,
                self.primary_span.start,
                self.primary_span.end,
                self.message_args.join(", ")
            )
        }
    }

    /// One text replacement against a document snapshot.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct TextEdit {
        pub range: TextRange,
        pub replacement: String,
    }

    /// A computed rewrite for one document. Carries no mutable state.
    #[derive(Debug, Clone)]
    pub struct RewriteCandidate {
        pub rule_id: &'static str,
        pub target_span: TextRange,
        pub edits: Vec<TextEdit>,
        /// Marks the produced region for the host's pretty-printer.
        pub reformat: bool,
    }

    /// Edits to one document of a multi-document rewrite.
    #[derive(Debug, Clone)]
    pub struct DocumentEdits {
        pub doc_index: usize,
        pub edits: Vec<TextEdit>,
    }

    /// A rewrite is either local to the analyzed document or an atomic
    /// multi-document update.
    #[derive(Debug, Clone)]
    pub enum Rewrite {
        Local(RewriteCandidate),
        Workspace(Vec<DocumentEdits>),
    }

    /// One detection result: the diagnostic plus its executable rewrite.
    #[derive(Debug, Clone)]
    pub struct Finding {
        pub diagnostic: Diagnostic,
        pub rewrite: Rewrite,
    }

    /// Apply edits to a snapshot in reverse offset order so earlier
    /// ranges stay valid. Overlapping edits are a programmer error;
    /// callers filter candidates to disjoint sets first.
    pub fn apply_edits(source: &str, edits: &[TextEdit]) -> String {
        let mut sorted: Vec<&TextEdit> = edits.iter().collect();
        sorted.sort_by_key(|edit| edit.range.start());
        sorted.reverse();
        let mut text = source.to_string();
        for edit in sorted {
            let start: usize = edit.range.start().into();
            let end: usize = edit.range.end().into();
            debug_assert!(start <= end && end <= text.len());
            if start > end || end > text.len() {
                continue;
            }
            text.replace_range(start..end, &edit.replacement);
        }
        text
    }

    /// The closed set of rewrite rules.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum RuleKind {
        AssignCondition,
        ReturnCondition,
        MergeNestedIf,
        DropVoidReturn,
        TrailingSeparator,
        AutoProperty,
        UseElementAccess,
        UseCountCheck,
    }

    impl RuleKind {
        pub const ALL: [RuleKind; 8] = [
            RuleKind::AssignCondition,
            RuleKind::ReturnCondition,
            RuleKind::MergeNestedIf,
            RuleKind::DropVoidReturn,
            RuleKind::TrailingSeparator,
            RuleKind::AutoProperty,
            RuleKind::UseElementAccess,
            RuleKind::UseCountCheck,
        ];

        pub fn id(self) -> &'static str {
            match self {
                RuleKind::AssignCondition => "assign-condition",
                RuleKind::ReturnCondition => "return-condition",
                RuleKind::MergeNestedIf => "merge-nested-if",
                RuleKind::DropVoidReturn => "drop-void-return",
                RuleKind::TrailingSeparator => "trailing-separator",
                RuleKind::AutoProperty => "auto-property",
                RuleKind::UseElementAccess => "use-element-access",
                RuleKind::UseCountCheck => "use-count-check",
            }
        }

        pub fn from_id(id: &str) -> Option<RuleKind> {
            RuleKind::ALL.into_iter().find(|kind| kind.id() == id)
        }

        pub fn message(self) -> &'static str {
            match self {
                RuleKind::AssignCondition => {
                    "Assign the condition directly instead of branching"
                }
                RuleKind::ReturnCondition => {
                    "Return the condition directly instead of branching"
                }
                RuleKind::MergeNestedIf => "Merge the nested if into the outer condition",
                RuleKind::DropVoidReturn => "Remove the redundant return of a void call",
                RuleKind::TrailingSeparator => "Remove the trailing separator",
                RuleKind::AutoProperty => "Convert to an auto property",
                RuleKind::UseElementAccess => {
                    "Use element access instead of the enumeration method"
                }
                RuleKind::UseCountCheck => "Compare the count instead of calling Any",
            }
        }
    }

    /// Everything a rule may consult while detecting: the immutable
    /// model, the settings snapshot, and the cancellation token.
    pub struct RuleContext<'a> {
        pub doc_index: usize,
        pub model: &'a SemanticModel<'a>,
        pub settings: &'a Settings,
        pub cancel: &'a CancelToken,
    }

    /// Build a single-document finding: the shared finalization step
    /// every local rule funnels through.
    pub fn local_finding(
        kind: RuleKind,
        primary: TextRange,
        fades: Vec<TextRange>,
        args: Vec<String>,
        target: TextRange,
        edits: Vec<TextEdit>,
        reformat: bool,
    ) -> Finding {
        Finding {
            diagnostic: Diagnostic {
                rule_id: kind.id().to_string(),
                primary_span: primary.into(),
                secondary_fade_spans: fades.into_iter().map(Span::from).collect(),
                message_args: args,
            },
            rewrite: Rewrite::Local(RewriteCandidate {
                rule_id: kind.id(),
                target_span: target,
                edits,
                reformat,
            }),
        }
    }

    /// Unwrap a single-statement block; any other statement is returned
    /// unchanged. Goes through the container abstraction so every
    /// block-like holder behaves the same.
    pub fn unwrap_single(stmt: &crate::ast::ast::Stmt) -> crate::ast::ast::Stmt {
        use crate::containers::containers::StatementContainer;
        if let crate::ast::ast::Stmt::Block(_) = stmt {
            if let Some(container) = StatementContainer::try_create(stmt.syntax()) {
                let mut statements = container.statements();
                if statements.len() == 1 {
                    return statements.remove(0);
                }
            }
        }
        stmt.clone()
    }

    /// Source text of the logical negation of a condition, flipping
    /// comparison operators where that reads better than a bang.
    pub fn negate_condition(expr: &crate::ast::ast::Expr) -> String {
        use crate::ast::ast::Expr;
        use crate::syntax::syntax::SyntaxKind::*;
        match expr {
            Expr::Prefix(prefix) if prefix.is_negation() => prefix
                .operand()
                .map(|operand| operand.text().trim().to_string())
                .unwrap_or_else(|| format!("!({})", expr.text().trim())),
            Expr::Bin(bin) => {
                let flipped = match bin.op_kind() {
                    Some(EQEQ) => Some("!="),
                    Some(NEQ) => Some("=="),
                    Some(LT) => Some(">="),
                    Some(GTEQ) => Some("<"),
                    Some(GT) => Some("<="),
                    Some(LTEQ) => Some(">"),
                    _ => None,
                };
                match (flipped, bin.lhs(), bin.rhs()) {
                    (Some(op), Some(lhs), Some(rhs)) => {
                        format!("{} {} {}", lhs.text().trim(), op, rhs.text().trim())
                    }
                    _ => format!("!({})", expr.text().trim()),
                }
            }
            Expr::Assign(_) => format!("!({})", expr.text().trim()),
            _ => format!("!{}", expr.text().trim()),
        }
    }

    /// The expression's text, parenthesized unless it can stand as an
    /// `&&` operand as-is.
    pub fn parenthesize_for_and(expr: &crate::ast::ast::Expr) -> String {
        let text = expr.text().trim().to_string();
        if expr.safe_as_and_operand() {
            text
        } else {
            format!("({text})")
        }
    }

    /// Run one rule over a document root. The single dispatch point for
    /// the whole library.
    pub fn run_rule(
        kind: RuleKind,
        root: &SyntaxNode,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Finding>> {
        if !ctx.settings.is_enabled(kind.id()) {
            return Ok(Vec::new());
        }
        match kind {
            RuleKind::AssignCondition | RuleKind::ReturnCondition => {
                Ok(crate::bool_assign::bool_assign::detect(kind, root, ctx))
            }
            RuleKind::MergeNestedIf => {
                Ok(crate::merge_nested_if::merge_nested_if::detect(root, ctx))
            }
            RuleKind::DropVoidReturn => Ok(crate::void_return::void_return::detect(root, ctx)),
            RuleKind::TrailingSeparator => {
                Ok(crate::trailing_separator::trailing_separator::detect(root, ctx))
            }
            RuleKind::AutoProperty => crate::auto_property::auto_property::detect(root, ctx),
            RuleKind::UseElementAccess | RuleKind::UseCountCheck => {
                Ok(crate::element_access::element_access::detect(kind, root, ctx))
            }
        }
    }

    /// Run every enabled rule over a document root.
    pub fn run_all_rules(root: &SyntaxNode, ctx: &RuleContext<'_>) -> Result<Vec<Finding>> {
        let mut findings = Vec::new();
        for kind in RuleKind::ALL {
            ctx.cancel.check()?;
            findings.extend(run_rule(kind, root, ctx)?);
        }
        findings.sort_by_key(|finding| finding.diagnostic.primary_span.start);
        Ok(findings)
    }
}
