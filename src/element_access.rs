// Copyright (C) Brian G. Milnes 2025

//! Element access instead of enumeration methods
//!
//! Positional lookups over indexable sequences become direct element
//! access: `items.ElementAt(i)` -> `items[i]`, `items.First()` ->
//! `items[0]`, `items.Last()` -> `items[items.Length - 1]`. The `Any()`
//! emptiness probe becomes a count comparison: `items.Any()` ->
//! `items.Count > 0`, `!items.Any()` -> `items.Count == 0`. Both
//! decline whenever the receiver's static type is unresolved.

pub mod element_access {
    use crate::ast::ast::{AstNode, CallExpr, Expr, PrefixExpr};
    use crate::rules::rules::{local_finding, Finding, RuleContext, RuleKind, TextEdit};
    use crate::syntax::syntax::SyntaxNode;
    use rowan::TextRange;

    pub fn detect(kind: RuleKind, root: &SyntaxNode, ctx: &RuleContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();
        for node in root.descendants() {
            let Some(call) = CallExpr::cast(node) else {
                continue;
            };
            let finding = match kind {
                RuleKind::UseElementAccess => check_element_access(&call, ctx),
                RuleKind::UseCountCheck => check_count(&call, ctx),
                _ => None,
            };
            if let Some(finding) = finding {
                findings.push(finding);
            }
        }
        findings
    }

    /// Receivers duplicated into the replacement must be repeat-safe:
    /// bare names, member chains over names, or `this` members.
    fn repeat_safe(receiver: &Expr) -> bool {
        match receiver {
            Expr::NameRef(_) | Expr::This(_) => true,
            Expr::Member(member) => member.receiver().as_ref().is_some_and(repeat_safe),
            _ => false,
        }
    }

    fn fade_after_receiver(call: &CallExpr, receiver: &Expr) -> TextRange {
        TextRange::new(
            receiver.syntax().text_range().end(),
            call.syntax().text_range().end(),
        )
    }

    fn check_element_access(call: &CallExpr, ctx: &RuleContext<'_>) -> Option<Finding> {
        let (receiver, method) = call.method_call_parts()?;
        let receiver_ty = ctx.model.type_of(&receiver, ctx.doc_index);
        if !receiver_ty.has_int_indexer() {
            return None;
        }
        let arg_count = call.arg_list().map(|args| args.arg_count()).unwrap_or(0);
        let receiver_text = receiver.text().trim().to_string();

        let replacement = match (method.as_str(), arg_count) {
            ("ElementAt", 1) => {
                let arg = call.arg_list()?.args().next()?;
                format!("{receiver_text}[{}]", arg.text().trim())
            }
            ("First", 0) => format!("{receiver_text}[0]"),
            ("Last", 0) => {
                // The receiver is written twice; only duplicate it when
                // re-evaluation is safe
                if !repeat_safe(&receiver) {
                    return None;
                }
                let count = receiver_ty.count_member(ctx.model)?;
                format!("{receiver_text}[{receiver_text}.{count} - 1]")
            }
            _ => return None,
        };

        let range = call.syntax().text_range();
        Some(local_finding(
            RuleKind::UseElementAccess,
            range,
            vec![fade_after_receiver(call, &receiver)],
            vec![replacement.clone()],
            range,
            vec![TextEdit { range, replacement }],
            false,
        ))
    }

    fn check_count(call: &CallExpr, ctx: &RuleContext<'_>) -> Option<Finding> {
        let (receiver, method) = call.method_call_parts()?;
        if method != "Any" {
            return None;
        }
        let arg_count = call.arg_list().map(|args| args.arg_count()).unwrap_or(0);
        if arg_count != 0 {
            return None;
        }
        let receiver_ty = ctx.model.type_of(&receiver, ctx.doc_index);
        if receiver_ty.is_unknown() {
            return None;
        }
        let count = receiver_ty.count_member(ctx.model)?;
        if !repeat_safe(&receiver) {
            return None;
        }
        let receiver_text = receiver.text().trim().to_string();

        // A negated probe rewrites the whole prefix expression
        let negation = call
            .syntax()
            .parent()
            .and_then(PrefixExpr::cast)
            .filter(PrefixExpr::is_negation);
        let (range, replacement) = match negation {
            Some(prefix) => (
                prefix.syntax().text_range(),
                format!("{receiver_text}.{count} == 0"),
            ),
            None => (
                call.syntax().text_range(),
                format!("{receiver_text}.{count} > 0"),
            ),
        };

        Some(local_finding(
            RuleKind::UseCountCheck,
            range,
            vec![fade_after_receiver(call, &receiver)],
            vec![replacement.clone()],
            range,
            vec![TextEdit { range, replacement }],
            false,
        ))
    }
}
