// Copyright (C) Brian G. Milnes 2025

//! Fix: apply simplification rewrites in place
//!
//! Applies every enabled rule's rewrites to the given files. With
//! --rule, applies a single rule workspace-wide, which enables the
//! multi-document rewrites (auto-property promotion over partial
//! classes); edits across documents are written together or not at all.
//!
//! Binary: simplicate-fix

use anyhow::Result;
use simplicate::logging::logging::ToolLogger;
use simplicate::{
    apply_rule, find_source_files, fix_workspace, format_number, CancelToken, Document,
    RuleKind, Settings, StandardArgs, Workspace,
};
use std::fs;
use std::time::Instant;

fn main() -> Result<()> {
    let start = Instant::now();
    let args = StandardArgs::parse()?;
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let mut logger = ToolLogger::new("simplicate-fix");

    let files = find_source_files(&args.paths);
    logger.log(&format!("Processing {} files...", format_number(files.len())));
    if args.dry_run {
        logger.log("[DRY RUN MODE - No files will be modified]");
    }

    let mut documents = Vec::new();
    for file in &files {
        let text = fs::read_to_string(file)?;
        match Document::parse(file.clone(), text) {
            Ok(document) => documents.push(document),
            Err(e) => logger.log(&format!("  Skipping: {e}")),
        }
    }
    let workspace = Workspace::from_documents(documents);
    let cancel = CancelToken::new();

    let results = match &args.rule {
        Some(rule_id) => {
            let Some(kind) = RuleKind::from_id(rule_id) else {
                anyhow::bail!("Unknown rule id: {rule_id}");
            };
            apply_rule(kind, &workspace, &settings, &cancel)?
        }
        None => fix_workspace(&workspace, &settings, &cancel)?,
    };

    if args.dry_run {
        for (path, _) in &results {
            logger.log(&format!("  [DRY RUN] Would rewrite {}", path.display()));
        }
    } else {
        // A multi-document rewrite lands as one update: all files or none
        for (path, new_text) in &results {
            fs::write(path, new_text)?;
            logger.log(&format!("  ✓ Rewrote {}", path.display()));
        }
    }

    logger.finalize(&format!(
        "Summary: {} files processed, {} files changed, completed in {}ms",
        format_number(workspace.len()),
        format_number(results.len()),
        start.elapsed().as_millis()
    ));

    Ok(())
}
