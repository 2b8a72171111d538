// Copyright (C) Brian G. Milnes 2025

//! Tests for the statement container abstraction

use rowan::TextRange;
use simplicate::ast::ast::AstNode;
use simplicate::parse_source;
use simplicate::{StatementContainer, StatementContainerSlice, SyntaxKind};

#[test]
fn test_try_create_fails_closed() {
    let root = parse_source("if (a) { b = 1; }").unwrap();
    let if_node = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::IF_STMT)
        .unwrap();
    assert!(StatementContainer::try_create(&if_node).is_none());

    let condition = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::NAME_REF)
        .unwrap();
    assert!(StatementContainer::try_create(&condition).is_none());
}

#[test]
fn test_block_statements_and_index() {
    let root = parse_source("{ a = 1; b = 2; c = 3; }").unwrap();
    let block = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::BLOCK)
        .unwrap();
    let container = StatementContainer::try_create(&block).unwrap();

    let statements = container.statements();
    assert_eq!(statements.len(), 3);
    assert_eq!(container.index_of(statements[1].syntax()), Some(1));
    assert_eq!(container.index_of(&root), None);
}

#[test]
fn test_case_section_is_a_container() {
    let root = parse_source("switch (x) { case 1: a = 1; break; default: break; }").unwrap();
    let section = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::CASE_SECTION)
        .unwrap();
    let container = StatementContainer::try_create(&section).unwrap();
    assert_eq!(container.statement_count(), 2);
}

#[test]
fn test_with_statements_preserves_structure() {
    let root = parse_source("{ a = 1; b = 2; }").unwrap();
    let block = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::BLOCK)
        .unwrap();
    let container = StatementContainer::try_create(&block).unwrap();

    let replaced = container.with_statements(&["x = 9;".to_string()]);
    assert_eq!(replaced, "{ x = 9; }");

    let swapped =
        container.with_statements(&["x = 9;".to_string(), "y = 8;".to_string()]);
    assert_eq!(swapped, "{ x = 9; y = 8; }");
}

#[test]
fn test_slice_excludes_partial_overlaps() {
    let source = "{ a = 1; b = 2; c = 3; }";
    let root = parse_source(source).unwrap();
    let block = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::BLOCK)
        .unwrap();
    let container = StatementContainer::try_create(&block).unwrap();
    let statements = container.statements();

    // A span covering the second statement fully and the third partially
    let span = TextRange::new(
        statements[1].syntax().text_range().start(),
        statements[2].syntax().text_range().start() + rowan::TextSize::from(2),
    );
    let slice = StatementContainerSlice::try_create(&block, span).unwrap();
    assert_eq!(slice.count(), 1);
    assert_eq!(slice.start_index(), 1);
    let sliced = slice.statements();
    assert_eq!(sliced.len(), 1);
    assert_eq!(sliced[0].syntax().text().to_string(), "b = 2;");
}

#[test]
fn test_slice_over_whole_block() {
    let source = "{ a = 1; b = 2; }";
    let root = parse_source(source).unwrap();
    let block = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::BLOCK)
        .unwrap();
    let slice =
        StatementContainerSlice::try_create(&block, block.text_range()).unwrap();
    assert_eq!(slice.count(), 2);
    assert_eq!(slice.start_index(), 0);
}

#[test]
fn test_slice_fails_closed_like_container() {
    let root = parse_source("if (a) { b = 1; }").unwrap();
    let if_node = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::IF_STMT)
        .unwrap();
    assert!(StatementContainerSlice::try_create(&if_node, if_node.text_range()).is_none());
}
