// Copyright (C) Brian G. Milnes 2025

//! Tests for element-access and count-check rewrites

mod common;

use common::{analyze_source, diagnostics_for, fix_source};

#[test]
fn test_any_becomes_count_comparison() {
    let source = "List list; bool any = list.Any();";
    let diagnostics = diagnostics_for(source, "use-count-check");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(fix_source(source), "List list; bool any = list.Count > 0;");
}

#[test]
fn test_negated_any_becomes_equality() {
    let source = "List list; bool empty = !list.Any();";
    assert_eq!(fix_source(source), "List list; bool empty = list.Count == 0;");
}

#[test]
fn test_array_any_uses_length() {
    let source = "int[] items; bool any = items.Any();";
    assert_eq!(fix_source(source), "int[] items; bool any = items.Length > 0;");
}

#[test]
fn test_unknown_receiver_declines() {
    let source = "bool any = mystery.Any();";
    assert!(diagnostics_for(source, "use-count-check").is_empty());
    assert_eq!(fix_source(source), source);
}

#[test]
fn test_any_with_argument_declines() {
    let source = "List list; bool any = list.Any(x);";
    assert!(diagnostics_for(source, "use-count-check").is_empty());
}

#[test]
fn test_first_becomes_index_zero() {
    let source = "int[] items; int first = items.First();";
    let diagnostics = diagnostics_for(source, "use-element-access");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(fix_source(source), "int[] items; int first = items[0];");
}

#[test]
fn test_last_uses_length_minus_one() {
    let source = "int[] items; int last = items.Last();";
    assert_eq!(
        fix_source(source),
        "int[] items; int last = items[items.Length - 1];"
    );
}

#[test]
fn test_last_on_list_uses_count() {
    let source = "List list; int last = list.Last();";
    assert_eq!(fix_source(source), "List list; int last = list[list.Count - 1];");
}

#[test]
fn test_element_at_becomes_index() {
    let source = "int[] items; int x = items.ElementAt(i + 1);";
    assert_eq!(fix_source(source), "int[] items; int x = items[i + 1];");
}

#[test]
fn test_call_receiver_declines_for_last() {
    // Re-evaluating the receiver twice is not safe for a call
    let source = "class C { int[] Items() { return data; } void M() { x = Items().Last(); } }";
    assert!(diagnostics_for(source, "use-element-access").is_empty());
}

#[test]
fn test_member_chain_receiver_is_allowed() {
    let source = "class Box { int[] items; void M() { x = this.items.Last(); } }";
    let fixed = fix_source(source);
    assert!(fixed.contains("this.items[this.items.Length - 1]"));
}

#[test]
fn test_idempotent_after_fix() {
    let source = "List list; bool empty = !list.Any();";
    let fixed = fix_source(source);
    assert!(analyze_source(&fixed).is_empty());
}
