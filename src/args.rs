// Copyright (C) Brian G. Milnes 2025

//! Standard argument handling for simplicate tools
//!
//! Every binary takes paths to files or directories, discovers source
//! files under them, and shares a few output options.

pub mod args {
    use anyhow::Result;
    use clap::Parser;
    use std::path::PathBuf;
    use walkdir::WalkDir;

    /// Extension of the C-like sources the tools operate on.
    pub const SOURCE_EXTENSION: &str = "cs";

    #[derive(Debug, Parser)]
    #[command(about = "AST-based simplification review and fix tool")]
    pub struct StandardArgs {
        /// Files or directories to analyze (default: current directory)
        pub paths: Vec<PathBuf>,

        /// Output format: text or json
        #[arg(long, default_value = "text")]
        pub format: String,

        /// Settings document (rule enablement, naming preference)
        #[arg(long)]
        pub settings: Option<PathBuf>,

        /// Restrict to a single rule id
        #[arg(long)]
        pub rule: Option<String>,

        /// Report what would change without writing files
        #[arg(long)]
        pub dry_run: bool,
    }

    impl StandardArgs {
        pub fn parse() -> Result<StandardArgs> {
            let mut args = <StandardArgs as Parser>::try_parse()?;
            if args.paths.is_empty() {
                args.paths.push(PathBuf::from("."));
            }
            Ok(args)
        }
    }

    /// Find all source files under the given paths.
    pub fn find_source_files(paths: &[PathBuf]) -> Vec<PathBuf> {
        let mut files = Vec::new();
        for path in paths {
            if path.is_file() {
                files.push(path.clone());
                continue;
            }
            for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
                if entry.file_type().is_file()
                    && entry
                        .path()
                        .extension()
                        .is_some_and(|ext| ext == SOURCE_EXTENSION)
                {
                    files.push(entry.path().to_path_buf());
                }
            }
        }
        files.sort();
        files.dedup();
        files
    }

    /// Format a number with thousands separators (e.g., 1234 -> "1,234")
    pub fn format_number(n: usize) -> String {
        let digits = n.to_string();
        let mut result = String::new();
        for (index, ch) in digits.chars().enumerate() {
            if index > 0 && (digits.len() - index) % 3 == 0 {
                result.push(',');
            }
            result.push(ch);
        }
        result
    }
}
