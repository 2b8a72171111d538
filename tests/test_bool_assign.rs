// Copyright (C) Brian G. Milnes 2025

//! Tests for boolean-assignment/return-from-if

mod common;

use common::{analyze_source, diagnostics_for, fix_source};

#[test]
fn test_assign_condition_basic() {
    let source = "if (done) { status = true; } else { status = false; }";
    let diagnostics = diagnostics_for(source, "assign-condition");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(fix_source(source), "status = done;");
}

#[test]
fn test_assign_condition_flipped_branches_negate() {
    let source = "if (done) { status = false; } else { status = true; }";
    assert_eq!(fix_source(source), "status = !done;");
}

#[test]
fn test_negation_flips_comparison_operator() {
    let source = "if (x > 0) { positive = false; } else { positive = true; }";
    assert_eq!(fix_source(source), "positive = x <= 0;");
}

#[test]
fn test_negation_unwraps_existing_bang() {
    let source = "if (!ready) { idle = false; } else { idle = true; }";
    assert_eq!(fix_source(source), "idle = ready;");
}

#[test]
fn test_unbraced_branches() {
    let source = "if (done) status = true; else status = false;";
    assert_eq!(fix_source(source), "status = done;");
}

#[test]
fn test_different_targets_decline() {
    let source = "if (done) { status = true; } else { other = false; }";
    assert!(diagnostics_for(source, "assign-condition").is_empty());
    assert_eq!(fix_source(source), source);
}

#[test]
fn test_same_literal_declines() {
    let source = "if (done) { status = true; } else { status = true; }";
    assert!(diagnostics_for(source, "assign-condition").is_empty());
}

#[test]
fn test_non_literal_rhs_declines() {
    let source = "if (done) { status = x; } else { status = false; }";
    assert!(diagnostics_for(source, "assign-condition").is_empty());
}

#[test]
fn test_chain_with_else_if_declines() {
    let source =
        "if (a) { status = true; } else if (b) { status = false; } else { status = true; }";
    assert!(diagnostics_for(source, "assign-condition").is_empty());
}

#[test]
fn test_multi_statement_branch_declines() {
    let source = "if (done) { status = true; log = 1; } else { status = false; }";
    assert!(diagnostics_for(source, "assign-condition").is_empty());
}

#[test]
fn test_return_condition() {
    let source = "class C { bool M(bool done) { if (done) { return true; } else { return false; } } }";
    let diagnostics = diagnostics_for(source, "return-condition");
    assert_eq!(diagnostics.len(), 1);
    let fixed = fix_source(source);
    assert!(fixed.contains("{ return done; }"));
}

#[test]
fn test_return_condition_negated() {
    let source = "class C { bool M(bool done) { if (done) { return false; } else { return true; } } }";
    let fixed = fix_source(source);
    assert!(fixed.contains("return !done;"));
}

#[test]
fn test_yield_return_condition() {
    let source =
        "class C { bool M(bool done) { if (done) { yield return true; } else { yield return false; } } }";
    let fixed = fix_source(source);
    assert!(fixed.contains("yield return done;"));
}

#[test]
fn test_fade_spans_mark_keywords() {
    let source = "if (done) { status = true; } else { status = false; }";
    let diagnostics = diagnostics_for(source, "assign-condition");
    // The if and else keywords are faded
    assert_eq!(diagnostics[0].secondary_fade_spans.len(), 2);
    assert_eq!(diagnostics[0].primary_span.start, 0);
    assert_eq!(diagnostics[0].primary_span.end, 2);
}

#[test]
fn test_idempotent_after_fix() {
    let source = "if (done) { status = true; } else { status = false; }";
    let fixed = fix_source(source);
    assert!(analyze_source(&fixed).is_empty());
}
