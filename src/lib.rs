// Copyright (C) Brian G. Milnes 2025

//! Simplicate - AST-based simplification review and fix tool
//!
//! This library parses a C-like structured language into lossless syntax
//! trees, detects syntactic patterns that can be mechanically simplified,
//! and rewrites them into equivalent but simpler forms while preserving
//! every comment and directive that is not logically part of the change.

pub mod syntax;
pub mod lexer;
pub mod parser;
pub mod ast;
pub mod containers;
pub mod chain;
pub mod trivia;
pub mod rules;
pub mod bool_assign;
pub mod merge_nested_if;
pub mod void_return;
pub mod trailing_separator;
pub mod auto_property;
pub mod element_access;
pub mod semantics;
pub mod unique_names;
pub mod config;
pub mod cancel;
pub mod analyzer;
pub mod fixer;
pub mod args;
pub mod logging;

use anyhow::Result;
use std::path::Path;

// Re-export commonly used items
pub use analyzer::analyzer::{analyze, analyze_workspace, FileDiagnostics};
pub use args::args::{find_source_files, format_number, StandardArgs};
pub use cancel::cancel::{CancelToken, Cancelled};
pub use chain::chain::{chain_of, is_simple_if, is_simple_if_else, is_topmost, topmost};
pub use config::config::Settings;
pub use containers::containers::{StatementContainer, StatementContainerSlice};
pub use fixer::fixer::{apply_rule, fix, fix_workspace};
pub use parser::parser::{parse, parse_source, Parse};
pub use rules::rules::{Diagnostic, Finding, RuleContext, RuleKind};
pub use semantics::semantics::{Document, SemanticModel, Workspace};
pub use syntax::syntax::{find_nodes, find_nodes_where, line_number, SyntaxKind, SyntaxNode};
pub use unique_names::unique_names::{ensure_unique_in_set, ReservedNameSet};

/// Review a source file and provide feedback
pub fn review(file: &Path, format: &str) -> Result<()> {
    let workspace = Workspace::load(&[file.to_path_buf()])?;
    let cancel = CancelToken::new();
    let results = analyze_workspace(&workspace, &Settings::default(), &cancel)?;
    let diagnostics: Vec<_> = results
        .into_iter()
        .flat_map(|file_diagnostics| file_diagnostics.diagnostics)
        .collect();

    match format {
        "json" => {
            let json = serde_json::to_string_pretty(&diagnostics)?;
            println!("{json}");
        }
        _ => {
            if diagnostics.is_empty() {
                println!("✓ No issues found!");
            } else {
                println!("Found {} issue(s):", diagnostics.len());
                for diagnostic in diagnostics {
                    println!("  - {diagnostic}");
                }
            }
        }
    }

    Ok(())
}

/// Fix simplifiable patterns in a source file
pub fn fix_file(file: &Path, in_place: bool) -> Result<()> {
    let workspace = Workspace::load(&[file.to_path_buf()])?;
    let cancel = CancelToken::new();
    let results = fix_workspace(&workspace, &Settings::default(), &cancel)?;

    match results.into_iter().next() {
        Some((path, fixed)) if in_place => {
            std::fs::write(&path, fixed)?;
            println!("Fixed and saved to {path:?}");
        }
        Some((_, fixed)) => println!("{fixed}"),
        None => println!("{}", workspace.document(0).text),
    }

    Ok(())
}

/// Parse a source file and display its syntax tree
pub fn dump_tree(file: &Path) -> Result<()> {
    let source = std::fs::read_to_string(file)?;
    let root = parse_source(&source)?;

    println!("{root:#?}");

    Ok(())
}
