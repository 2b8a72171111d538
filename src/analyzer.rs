// Copyright (C) Brian G. Milnes 2025

//! Analyzer module: the detection contract
//!
//! Runs every enabled rule over parsed documents and reports
//! diagnostics. Analysis is read-only over immutable snapshots, so it
//! fans out across documents in parallel.

pub mod analyzer {
    use crate::cancel::cancel::CancelToken;
    use crate::config::config::Settings;
    use crate::rules::rules::{run_all_rules, Diagnostic, Finding, RuleContext};
    use crate::semantics::semantics::{SemanticModel, Workspace};
    use anyhow::Result;
    use rayon::prelude::*;
    use std::path::PathBuf;

    /// Diagnostics for one analyzed document.
    #[derive(Debug, Clone)]
    pub struct FileDiagnostics {
        pub path: PathBuf,
        pub diagnostics: Vec<Diagnostic>,
    }

    /// Analyze one document root under an existing model.
    pub fn analyze(
        root: &crate::syntax::syntax::SyntaxNode,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Diagnostic>> {
        let findings = run_all_rules(root, ctx)?;
        Ok(findings.into_iter().map(|finding| finding.diagnostic).collect())
    }

    /// Full findings (diagnostics plus rewrites) for one document root.
    pub fn findings(
        root: &crate::syntax::syntax::SyntaxNode,
        ctx: &RuleContext<'_>,
    ) -> Result<Vec<Finding>> {
        run_all_rules(root, ctx)
    }

    /// Analyze every document of a workspace, in parallel. The model is
    /// built once; each worker materializes its own tree root.
    pub fn analyze_workspace(
        workspace: &Workspace,
        settings: &Settings,
        cancel: &CancelToken,
    ) -> Result<Vec<FileDiagnostics>> {
        let model = SemanticModel::build(workspace, cancel)?;
        workspace
            .documents()
            .par_iter()
            .enumerate()
            .map(|(doc_index, document)| {
                cancel.check()?;
                let root = document.root();
                let ctx = RuleContext { doc_index, model: &model, settings, cancel };
                let diagnostics = analyze(&root, &ctx)?;
                Ok(FileDiagnostics { path: document.path.clone(), diagnostics })
            })
            .collect()
    }
}
