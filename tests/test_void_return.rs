// Copyright (C) Brian G. Milnes 2025

//! Tests for return/yield-of-void normalization

mod common;

use common::{analyze_source, diagnostics_for, fix_source};

#[test]
fn test_return_of_void_call_drops_keyword() {
    let source = "class C { void Log() { } void M() { return Log(); } }";
    let diagnostics = diagnostics_for(source, "drop-void-return");
    assert_eq!(diagnostics.len(), 1);
    let fixed = fix_source(source);
    assert!(fixed.contains("{ Log(); }"));
    assert!(!fixed.contains("return Log();"));
}

#[test]
fn test_yield_return_of_void_call_drops_wrapper() {
    let source = "class C { void Log() { } void M() { yield return Log(); } }";
    let fixed = fix_source(source);
    assert!(fixed.contains("{ Log(); }"));
    assert!(!fixed.contains("yield return"));
}

#[test]
fn test_bare_return_is_untouched() {
    let source = "class C { void M() { return; } }";
    assert!(diagnostics_for(source, "drop-void-return").is_empty());
}

#[test]
fn test_non_void_return_is_untouched() {
    let source = "class C { int Get() { return 1; } int M() { return Get(); } }";
    assert!(diagnostics_for(source, "drop-void-return").is_empty());
}

#[test]
fn test_unresolved_callee_declines() {
    // The callee's static type cannot be resolved, so the rule withholds
    let source = "class C { void M() { return Unknown(); } }";
    assert!(diagnostics_for(source, "drop-void-return").is_empty());
}

#[test]
fn test_yield_break_is_untouched() {
    let source = "class C { void M() { yield break; } }";
    assert!(diagnostics_for(source, "drop-void-return").is_empty());
}

#[test]
fn test_method_call_receiver_resolves() {
    let source = "class C { void Log() { } void M(C other) { return other.Log(); } }";
    let fixed = fix_source(source);
    assert!(fixed.contains("{ other.Log(); }"));
}

#[test]
fn test_idempotent_after_fix() {
    let source = "class C { void Log() { } void M() { return Log(); } }";
    let fixed = fix_source(source);
    assert!(analyze_source(&fixed).is_empty());
}
