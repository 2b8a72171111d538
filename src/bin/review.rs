// Copyright (C) Brian G. Milnes 2025

//! Review: detect simplifiable patterns in C-like source
//!
//! Runs every enabled rewrite rule over the given files and reports
//! diagnostics without changing anything. Exit code 1 when any
//! diagnostic is found.
//!
//! Binary: simplicate-review

use anyhow::Result;
use simplicate::{
    analyze_workspace, find_source_files, format_number, CancelToken, Document, RuleKind,
    Settings, StandardArgs, Workspace,
};
use std::fs;
use std::time::Instant;

macro_rules! log {
    ($($arg:tt)*) => {{
        use std::io::Write;
        let msg = format!($($arg)*);
        println!("{}", msg);
        if let Ok(mut file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("analyses/review.log")
        {
            let _ = writeln!(file, "{}", msg);
        }
    }};
}

fn main() -> Result<()> {
    let _ = fs::create_dir_all("analyses");
    let _ = fs::remove_file("analyses/review.log");

    let start = Instant::now();
    let args = StandardArgs::parse()?;
    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let files = find_source_files(&args.paths);
    log!("Analyzing {} files...", format_number(files.len()));

    // Files that fail to parse are skipped, not fatal
    let mut documents = Vec::new();
    let mut skipped = 0;
    for file in &files {
        let text = match fs::read_to_string(file) {
            Ok(text) => text,
            Err(e) => {
                log!("  Skipping {}: {}", file.display(), e);
                skipped += 1;
                continue;
            }
        };
        match Document::parse(file.clone(), text) {
            Ok(document) => documents.push(document),
            Err(e) => {
                log!("  Skipping: {}", e);
                skipped += 1;
            }
        }
    }
    let workspace = Workspace::from_documents(documents);

    let cancel = CancelToken::new();
    let results = analyze_workspace(&workspace, &settings, &cancel)?;

    let mut total = 0;
    if args.format == "json" {
        let diagnostics: Vec<_> = results
            .iter()
            .flat_map(|file| file.diagnostics.iter().cloned())
            .collect();
        total = diagnostics.len();
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
    } else {
        for file in &results {
            if file.diagnostics.is_empty() {
                continue;
            }
            log!("{}:", file.path.display());
            for diagnostic in &file.diagnostics {
                let message = RuleKind::from_id(&diagnostic.rule_id)
                    .map(RuleKind::message)
                    .unwrap_or_default();
                log!("  {diagnostic} - {message}");
                total += 1;
            }
        }
    }

    log!("");
    log!(
        "Summary: {} files checked, {} skipped, {} total violations",
        format_number(workspace.len()),
        format_number(skipped),
        format_number(total)
    );
    log!("Completed in {}ms", start.elapsed().as_millis());

    if total > 0 {
        std::process::exit(1);
    }
    Ok(())
}
