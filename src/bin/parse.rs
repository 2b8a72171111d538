// Copyright (C) Brian G. Milnes 2025

//! Parse and display the syntax tree of a source file

use anyhow::Result;
use clap::Parser;
use simplicate::{find_nodes, line_number, parse_source, SyntaxKind};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "parse")]
#[command(about = "Parse and display the syntax tree of a source file", long_about = None)]
struct Args {
    /// Path to the file to parse
    #[arg(short, long)]
    path: PathBuf,

    /// Print per-kind node counts instead of the full tree
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    let start = Instant::now();
    let args = Args::parse();

    println!("Parsing file: {:?}", args.path);
    println!();

    if args.stats {
        let source = std::fs::read_to_string(&args.path)?;
        let root = parse_source(&source)?;
        for kind in [
            SyntaxKind::CLASS_DECL,
            SyntaxKind::PROPERTY_DECL,
            SyntaxKind::METHOD_DECL,
            SyntaxKind::IF_STMT,
            SyntaxKind::SWITCH_STMT,
            SyntaxKind::INITIALIZER_LIST,
        ] {
            let nodes = find_nodes(&root, kind);
            if nodes.is_empty() {
                continue;
            }
            let lines: Vec<String> = nodes
                .iter()
                .map(|node| line_number(node, &source).to_string())
                .collect();
            println!("{kind:?}: {} (lines {})", nodes.len(), lines.join(", "));
        }
    } else {
        simplicate::dump_tree(&args.path)?;
    }

    println!();
    println!("Completed in {}ms", start.elapsed().as_millis());

    Ok(())
}
