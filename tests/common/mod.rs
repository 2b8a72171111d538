// Copyright (C) Brian G. Milnes 2025

//! Common test utilities for integration tests

use simplicate::{
    analyze_workspace, fix_workspace, CancelToken, Diagnostic, Settings, Workspace,
};

/// Analyze an in-memory snippet with default settings.
pub fn analyze_source(source: &str) -> Vec<Diagnostic> {
    let workspace = Workspace::single(source).unwrap();
    let cancel = CancelToken::new();
    analyze_workspace(&workspace, &Settings::default(), &cancel)
        .unwrap()
        .into_iter()
        .flat_map(|file| file.diagnostics)
        .collect()
}

/// Apply every local rewrite to an in-memory snippet and return the
/// result; an unchanged snippet comes back as-is.
pub fn fix_source(source: &str) -> String {
    let workspace = Workspace::single(source).unwrap();
    let cancel = CancelToken::new();
    let mut results = fix_workspace(&workspace, &Settings::default(), &cancel).unwrap();
    match results.pop() {
        Some((_, fixed)) => fixed,
        None => source.to_string(),
    }
}

/// Diagnostics for one specific rule id.
pub fn diagnostics_for(source: &str, rule_id: &str) -> Vec<Diagnostic> {
    analyze_source(source)
        .into_iter()
        .filter(|diagnostic| diagnostic.rule_id == rule_id)
        .collect()
}
