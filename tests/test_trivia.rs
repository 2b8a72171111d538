// Copyright (C) Brian G. Milnes 2025

//! Tests for the trivia relocation protocol

mod common;

use common::fix_source;
use simplicate::parse_source;
use simplicate::trivia::trivia::{
    atoms_in_range, has_protected_trivia, indentation_of, protected_atoms_in_range,
    RelocationPlan,
};
use simplicate::SyntaxKind;

#[test]
fn test_atoms_in_range_finds_all_trivia() {
    let source = "x = 1; // note\ny = 2;";
    let root = parse_source(source).unwrap();
    let atoms = atoms_in_range(&root, root.text_range());
    let kinds: Vec<SyntaxKind> = atoms.iter().map(|atom| atom.kind).collect();
    assert!(kinds.contains(&SyntaxKind::WHITESPACE));
    assert!(kinds.contains(&SyntaxKind::LINE_COMMENT));
    assert!(kinds.contains(&SyntaxKind::EOL));
}

#[test]
fn test_protected_atoms_exclude_whitespace() {
    let source = "x = 1; /* keep */ y = 2;\n#region z\n";
    let root = parse_source(source).unwrap();
    let protected = protected_atoms_in_range(&root, root.text_range());
    assert_eq!(protected.len(), 2);
    assert!(protected.iter().all(|atom| atom.is_protected()));
    assert_eq!(protected[0].text, "/* keep */");
    assert_eq!(protected[1].text, "#region z");
}

#[test]
fn test_has_protected_trivia_is_range_scoped() {
    let source = "x = 1; /* keep */ y = 2;";
    let root = parse_source(source).unwrap();
    assert!(has_protected_trivia(&root, root.text_range()));

    let first_stmt = root.children().next().unwrap();
    assert!(!has_protected_trivia(&root, first_stmt.text_range()));
}

#[test]
fn test_relocation_plan_permits_carried_comment() {
    let source = "x = 1; /* keep */ y = 2;";
    let root = parse_source(source).unwrap();
    let plan = RelocationPlan::for_range(&root, root.text_range());
    assert!(plan.permits("z = 3; /* keep */"));
    assert!(!plan.permits("z = 3;"));
}

#[test]
fn test_relocation_plan_counts_duplicates() {
    let source = "/* c */ x = 1; /* c */ y = 2;";
    let root = parse_source(source).unwrap();
    let plan = RelocationPlan::for_range(&root, root.text_range());
    // Two atoms with identical text both need destinations
    assert!(!plan.permits("z = 3; /* c */"));
    assert!(plan.permits("/* c */ z = 3; /* c */"));
}

#[test]
fn test_indentation_of_copies_existing_indent() {
    let source = "{\n        x = 1;\n}";
    let root = parse_source(source).unwrap();
    let stmt = root
        .descendants()
        .find(|node| node.kind() == SyntaxKind::EXPR_STMT)
        .unwrap();
    assert_eq!(indentation_of(&stmt), "        ");
}

#[test]
fn test_indentation_of_unindented_line() {
    let source = "x = 1;\ny = 2;";
    let root = parse_source(source).unwrap();
    let last = root.children().last().unwrap();
    assert_eq!(indentation_of(&last), "");
}

// Trivia conservation across a real rewrite: the multiset of comments
// in the output equals the input's for every accepted fix.
#[test]
fn test_rewrite_conserves_condition_comment() {
    let source = "if (a /* why */ && b) { status = true; } else { status = false; }";
    let fixed = fix_source(source);
    assert_eq!(fixed, "status = a /* why */ && b;");
}

#[test]
fn test_rewrite_withheld_for_orphaned_comment() {
    // The comment between branches has no destination, so the rewrite
    // must not fire at all
    let source = "if (done) { status = true; } /* orphan */ else { status = false; }";
    let fixed = fix_source(source);
    assert_eq!(fixed, source);
}

#[test]
fn test_rewrite_withheld_for_comment_after_condition() {
    // A comment between the condition and its close paren sits outside
    // the condition node, so it has no destination either
    let source = "if (done /* why */) { status = true; } else { status = false; }";
    let fixed = fix_source(source);
    assert_eq!(fixed, source);
}
