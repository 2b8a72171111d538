// Copyright (C) Brian G. Milnes 2025

//! Tests for the conditional chain classifier

use simplicate::ast::ast::{AstNode, IfStmt};
use simplicate::chain::chain;
use simplicate::parse_source;

fn if_stmts(source: &str) -> Vec<IfStmt> {
    let root = parse_source(source).unwrap();
    root.descendants().filter_map(IfStmt::cast).collect()
}

#[test]
fn test_simple_if_classification() {
    let stmts = if_stmts("if (a) { b = 1; }");
    assert_eq!(stmts.len(), 1);
    assert!(chain::is_simple_if(&stmts[0]));
    assert!(chain::is_topmost(&stmts[0]));
    assert!(!chain::is_simple_if_else(&stmts[0]));
}

#[test]
fn test_simple_if_else_classification() {
    let stmts = if_stmts("if (a) { b = 1; } else { b = 2; }");
    assert_eq!(stmts.len(), 1);
    assert!(!chain::is_simple_if(&stmts[0]));
    assert!(chain::is_simple_if_else(&stmts[0]));

    let chain = chain::chain_of(&stmts[0]).unwrap();
    assert_eq!(chain.len(), 2);
    assert!(chain.terminal().is_some());
}

#[test]
fn test_else_if_is_not_simple() {
    let stmts = if_stmts("if (a) { x = 1; } else if (b) { x = 2; }");
    let outer = &stmts[0];
    let inner = &stmts[1];

    assert!(!chain::is_simple_if_else(outer));
    assert!(chain::is_topmost(outer));
    assert!(!chain::is_topmost(inner));
    assert!(chain::is_else_body(inner));
}

#[test]
fn test_topmost_walks_previous_links() {
    let stmts = if_stmts("if (a) { x = 1; } else if (b) { x = 2; } else { x = 3; }");
    let outer = &stmts[0];
    let inner = &stmts[1];

    assert_eq!(&chain::topmost(inner), outer);
    assert_eq!(&chain::topmost(outer), outer);
}

#[test]
fn test_chain_well_formedness() {
    let stmts = if_stmts("if (a) { x = 1; } else if (b) { x = 2; } else { x = 3; }");
    let outer = &stmts[0];
    let inner = &stmts[1];

    let chain = chain::chain_of(&chain::topmost(inner)).unwrap();
    // Ordered outer-to-inner, the node's own link exactly once
    assert_eq!(chain.len(), 3);
    assert!(chain.contains(outer));
    assert!(chain.contains(inner));
    assert_eq!(
        chain
            .links()
            .iter()
            .filter(|link| link.if_stmt.as_ref() == Some(inner))
            .count(),
        1
    );
    // At most one terminal link, and it is last
    let terminal_positions: Vec<usize> = chain
        .links()
        .iter()
        .enumerate()
        .filter(|(_, link)| link.is_terminal())
        .map(|(index, _)| index)
        .collect();
    assert_eq!(terminal_positions, vec![2]);
}

#[test]
fn test_chain_without_terminal() {
    let stmts = if_stmts("if (a) { x = 1; } else if (b) { x = 2; }");
    let chain = chain::chain_of(&stmts[0]).unwrap();
    assert_eq!(chain.len(), 2);
    assert!(chain.terminal().is_none());
}

#[test]
fn test_unbraced_branch_has_no_braces() {
    let stmts = if_stmts("if (a) x = 1; else { x = 2; }");
    let chain = chain::chain_of(&stmts[0]).unwrap();
    assert!(!chain.links()[0].has_braces);
    assert!(chain.links()[1].has_braces);
}

#[test]
fn test_is_part_of_chain() {
    let root = parse_source("if (a) { x = 1; } y = 2;").unwrap();
    let if_node = root
        .descendants()
        .find(|node| node.kind() == simplicate::SyntaxKind::IF_STMT)
        .unwrap();
    let assignment_inside = if_node
        .descendants()
        .find(|node| node.kind() == simplicate::SyntaxKind::ASSIGN_EXPR)
        .unwrap();
    assert!(chain::is_part_of_chain(&assignment_inside));

    let last_stmt = root.children().last().unwrap();
    assert!(!chain::is_part_of_chain(&last_stmt));
}
