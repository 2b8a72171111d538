// Copyright (C) Brian G. Milnes 2025

//! Tests for the nested-if merge

mod common;

use common::{analyze_source, diagnostics_for, fix_source};

#[test]
fn test_merge_basic() {
    let source = "if (x > 0) { if (y > 0) { Combine(); } }";
    let diagnostics = diagnostics_for(source, "merge-nested-if");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(fix_source(source), "if (x > 0 && y > 0) { Combine(); }");
}

#[test]
fn test_merge_keeps_multiple_inner_statements() {
    let source = "if (a) { if (b) { First(); Second(); } }";
    assert_eq!(fix_source(source), "if (a && b) { First(); Second(); }");
}

#[test]
fn test_merge_unbraced_inner() {
    let source = "if (a) { if (b) Work(); }";
    assert_eq!(fix_source(source), "if (a && b) { Work(); }");
}

#[test]
fn test_merge_unbraced_outer_keeps_inner_braces() {
    let source = "if (a) if (b) { First(); Second(); }";
    assert_eq!(fix_source(source), "if (a && b) { First(); Second(); }");
}

#[test]
fn test_outer_else_declines() {
    let source = "if (a) { if (b) { Work(); } } else { Other(); }";
    assert!(diagnostics_for(source, "merge-nested-if").is_empty());
}

#[test]
fn test_inner_else_declines() {
    let source = "if (a) { if (b) { Work(); } else { Other(); } }";
    assert!(diagnostics_for(source, "merge-nested-if").is_empty());
}

#[test]
fn test_extra_outer_statement_declines() {
    let source = "if (a) { if (b) { Work(); } Extra(); }";
    assert!(diagnostics_for(source, "merge-nested-if").is_empty());
}

#[test]
fn test_or_condition_declines() {
    let source = "if (a || b) { if (c) { Work(); } }";
    assert!(diagnostics_for(source, "merge-nested-if").is_empty());
}

#[test]
fn test_comment_before_inner_if_declines() {
    let source = "if (a) { /* why */ if (b) { Work(); } }";
    assert!(diagnostics_for(source, "merge-nested-if").is_empty());
    assert_eq!(fix_source(source), source);
}

#[test]
fn test_comment_in_inner_parens_declines() {
    let source = "if (a) { if (/* why */ b) { Work(); } }";
    assert!(diagnostics_for(source, "merge-nested-if").is_empty());
}

#[test]
fn test_comment_at_inner_body_edge_declines() {
    let source = "if (a) { if (b) { /* keep */ Work(); } }";
    // The gap between the inner brace and the first statement holds a
    // comment, so the merge is withheld
    assert_eq!(fix_source(source), source);
}

#[test]
fn test_comment_within_statement_span_merges() {
    let source = "if (a) { if (b) { Work(); /* mid */ More(); } }";
    assert_eq!(fix_source(source), "if (a && b) { Work(); /* mid */ More(); }");
}

#[test]
fn test_comparison_conditions_need_no_parens() {
    let source = "if (x > 0) { if (y != 2) { Work(); } }";
    assert_eq!(fix_source(source), "if (x > 0 && y != 2) { Work(); }");
}

#[test]
fn test_nested_and_conditions_stay_flat() {
    let source = "if (a && b) { if (c) { Work(); } }";
    assert_eq!(fix_source(source), "if (a && b && c) { Work(); }");
}

#[test]
fn test_idempotent_after_fix() {
    let source = "if (x > 0) { if (y > 0) { Combine(); } }";
    let fixed = fix_source(source);
    assert!(analyze_source(&fixed).is_empty());
}
