// Copyright (C) Brian G. Milnes 2025

//! Fixer module: the fix-application contract
//!
//! Rewrites are computed against snapshots and produce new text; a
//! multi-document rewrite is applied together or not at all. Re-running
//! analysis on a fixed document yields no diagnostic for the applied
//! rule at the rewritten location.

pub mod fixer {
    use crate::cancel::cancel::CancelToken;
    use crate::config::config::Settings;
    use crate::rules::rules::{
        apply_edits, run_all_rules, run_rule, Rewrite, RuleContext, RuleKind, TextEdit,
    };
    use crate::semantics::semantics::{SemanticModel, Workspace};
    use anyhow::Result;
    use rowan::TextRange;
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn overlaps(a: TextRange, b: TextRange) -> bool {
        a.start() < b.end() && b.start() < a.end()
    }

    /// Select a disjoint subset of rewrites, earliest first. Later
    /// candidates overlapping an accepted one wait for the next pass.
    fn select_disjoint(mut candidates: Vec<(TextRange, Vec<TextEdit>)>) -> Vec<TextEdit> {
        candidates.sort_by_key(|(span, _)| span.start());
        let mut accepted: Vec<TextRange> = Vec::new();
        let mut edits = Vec::new();
        for (span, candidate_edits) in candidates {
            if accepted.iter().any(|taken| overlaps(*taken, span)) {
                continue;
            }
            accepted.push(span);
            edits.extend(candidate_edits);
        }
        edits
    }

    /// Apply every enabled rule's local rewrites to one document root,
    /// returning the fixed source text.
    pub fn fix(root: &crate::syntax::syntax::SyntaxNode, ctx: &RuleContext<'_>) -> Result<String> {
        let source = root.text().to_string();
        let findings = run_all_rules(root, ctx)?;
        let candidates: Vec<(TextRange, Vec<TextEdit>)> = findings
            .into_iter()
            .filter_map(|finding| match finding.rewrite {
                Rewrite::Local(candidate) => Some((candidate.target_span, candidate.edits)),
                // Multi-document rewrites go through apply_rule
                Rewrite::Workspace(_) => None,
            })
            .collect();
        Ok(apply_edits(&source, &select_disjoint(candidates)))
    }

    /// Apply one rule across a workspace snapshot: every affected
    /// document's new text, computed independently and returned as one
    /// atomic update. Cancellation aborts with no partial edits.
    pub fn apply_rule(
        kind: RuleKind,
        workspace: &Workspace,
        settings: &Settings,
        cancel: &CancelToken,
    ) -> Result<Vec<(PathBuf, String)>> {
        let model = SemanticModel::build(workspace, cancel)?;
        let mut edits_by_doc: HashMap<usize, Vec<(TextRange, Vec<TextEdit>)>> = HashMap::new();

        for (doc_index, document) in workspace.documents().iter().enumerate() {
            cancel.check()?;
            let root = document.root();
            let ctx = RuleContext { doc_index, model: &model, settings, cancel };
            for finding in run_rule(kind, &root, &ctx)? {
                match finding.rewrite {
                    Rewrite::Local(candidate) => {
                        edits_by_doc
                            .entry(doc_index)
                            .or_default()
                            .push((candidate.target_span, candidate.edits));
                    }
                    Rewrite::Workspace(documents) => {
                        for doc_edits in documents {
                            for edit in doc_edits.edits {
                                edits_by_doc
                                    .entry(doc_edits.doc_index)
                                    .or_default()
                                    .push((edit.range, vec![edit.clone()]));
                            }
                        }
                    }
                }
            }
        }

        let mut results = Vec::new();
        for (doc_index, candidates) in edits_by_doc {
            cancel.check()?;
            let document = workspace.document(doc_index);
            let new_text = apply_edits(&document.text, &select_disjoint(candidates));
            if new_text != document.text {
                results.push((document.path.clone(), new_text));
            }
        }
        results.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(results)
    }

    /// Apply every enabled rule to a workspace, local rewrites only,
    /// one pass per document.
    pub fn fix_workspace(
        workspace: &Workspace,
        settings: &Settings,
        cancel: &CancelToken,
    ) -> Result<Vec<(PathBuf, String)>> {
        let model = SemanticModel::build(workspace, cancel)?;
        let mut results = Vec::new();
        for (doc_index, document) in workspace.documents().iter().enumerate() {
            cancel.check()?;
            let root = document.root();
            let ctx = RuleContext { doc_index, model: &model, settings, cancel };
            let new_text = fix(&root, &ctx)?;
            if new_text != document.text {
                results.push((document.path.clone(), new_text));
            }
        }
        Ok(results)
    }
}
