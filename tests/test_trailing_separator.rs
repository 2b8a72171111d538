// Copyright (C) Brian G. Milnes 2025

//! Tests for redundant trailing separator removal

mod common;

use common::{analyze_source, diagnostics_for, fix_source};

#[test]
fn test_trailing_comma_removed() {
    let source = "int[] a = { 1, 2, 3, };";
    let diagnostics = diagnostics_for(source, "trailing-separator");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(fix_source(source), "int[] a = { 1, 2, 3 };");
}

#[test]
fn test_balanced_list_untouched() {
    let source = "int[] a = { 1, 2, 3 };";
    assert!(diagnostics_for(source, "trailing-separator").is_empty());
    assert_eq!(fix_source(source), source);
}

#[test]
fn test_single_element_trailing_comma() {
    let source = "int[] a = { 1, };";
    assert_eq!(fix_source(source), "int[] a = { 1 };");
}

#[test]
fn test_empty_list_untouched() {
    let source = "int[] a = { };";
    assert!(diagnostics_for(source, "trailing-separator").is_empty());
}

#[test]
fn test_comment_near_separator_survives() {
    // Only the comma token is deleted; its surrounding trivia stays in
    // place on the neighboring elements
    let source = "int[] a = { 1, 2, 3, /* keep */ };";
    assert_eq!(fix_source(source), "int[] a = { 1, 2, 3 /* keep */ };");
}

#[test]
fn test_new_expression_initializer() {
    let source = "x = new List() { 1, 2, };";
    assert_eq!(fix_source(source), "x = new List() { 1, 2 };");
}

#[test]
fn test_fade_span_is_the_separator() {
    let source = "int[] a = { 1, 2, 3, };";
    let diagnostics = diagnostics_for(source, "trailing-separator");
    let fade = &diagnostics[0].secondary_fade_spans[0];
    assert_eq!(&source[fade.start..fade.end], ",");
}

#[test]
fn test_idempotent_after_fix() {
    let source = "int[] a = { 1, 2, 3, };";
    let fixed = fix_source(source);
    assert!(analyze_source(&fixed).is_empty());
}
