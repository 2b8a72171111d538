// Copyright (C) Brian G. Milnes 2025

//! Tests for the unique name generator

use simplicate::unique_names::unique_names::{
    ensure_unique, ensure_unique_async_name, ensure_unique_in_set, NameSource, ReservedNames,
    ReservedNameSet,
};
use simplicate::{CancelToken, SemanticModel, Workspace};

#[test]
fn test_free_base_name_is_returned_unchanged() {
    let reserved = ReservedNameSet::from_names(["other"]);
    assert_eq!(ensure_unique_in_set("item", &reserved, true), "item");
}

#[test]
fn test_suffix_counter_starts_at_two() {
    let reserved = ReservedNameSet::from_names(["item"]);
    assert_eq!(ensure_unique_in_set("item", &reserved, true), "item2");
}

#[test]
fn test_counter_skips_taken_suffixes() {
    let reserved = ReservedNameSet::from_names(["item", "item2"]);
    assert_eq!(ensure_unique_in_set("item", &reserved, true), "item3");
}

#[test]
fn test_convergence_on_repeated_requests() {
    let mut reserved = ReservedNameSet::from_names(["item"]);
    let first = ensure_unique_in_set("item", &reserved, true);
    assert_eq!(first, "item2");
    reserved.insert(first.clone());
    let second = ensure_unique_in_set("item", &reserved, true);
    assert_ne!(first, second);
    assert_eq!(second, "item3");
}

#[test]
fn test_case_insensitive_comparison() {
    let reserved = ReservedNameSet::from_names(["Item"]);
    assert_eq!(ensure_unique_in_set("item", &reserved, false), "item2");
    assert_eq!(ensure_unique_in_set("item", &reserved, true), "item");
}

#[test]
fn test_async_suffix_shape() {
    let reserved = ReservedNameSet::new();
    let mut sources = ReservedNames::from_set(reserved);
    assert_eq!(
        ensure_unique_async_name("load", &mut sources, true).unwrap(),
        "loadAsync"
    );
}

#[test]
fn test_async_counter_interleaves_before_suffix() {
    let reserved = ReservedNameSet::from_names(["loadAsync", "load2Async"]);
    let mut sources = ReservedNames::from_set(reserved);
    assert_eq!(
        ensure_unique_async_name("load", &mut sources, true).unwrap(),
        "load3Async"
    );
}

#[test]
fn test_layered_sources_cheapest_first() {
    let cheap = ReservedNameSet::from_names(["item"]);
    let costly = ReservedNameSet::from_names(["item2"]);
    let mut sources = ReservedNames::new(vec![
        NameSource::Set(cheap),
        NameSource::Set(costly),
    ]);
    assert_eq!(ensure_unique("item", &mut sources, true).unwrap(), "item3");
}

#[test]
fn test_scope_source_sees_locals_and_members() {
    let source = r#"class Bag {
    int item;
    void M(int item2) {
        x = 1;
    }
}
"#;
    let workspace = Workspace::single(source).unwrap();
    let cancel = CancelToken::new();
    let model = SemanticModel::build(&workspace, &cancel).unwrap();
    let root = workspace.document(0).root();
    // Resolve scope at the statement inside M
    let at = root
        .descendants()
        .find(|node| node.kind() == simplicate::SyntaxKind::EXPR_STMT)
        .unwrap();

    let mut sources = ReservedNames::new(vec![NameSource::Scope {
        model: &model,
        at,
        doc_index: 0,
    }]);
    // `item` is a member, `item2` a parameter; both are reserved
    assert_eq!(ensure_unique("item", &mut sources, true).unwrap(), "item3");
}

#[test]
fn test_reference_source_is_cancellable() {
    let source = r#"class Bag {
    int item;
    int Get() {
        return item;
    }
}
"#;
    let workspace = Workspace::single(source).unwrap();
    let cancel = CancelToken::new();
    let model = SemanticModel::build(&workspace, &cancel).unwrap();
    let symbol = model.unique_field("Bag", "item").unwrap();

    cancel.cancel();
    let mut sources = ReservedNames::new(vec![NameSource::References {
        model: &model,
        symbol,
        cancel: cancel.clone(),
    }]);
    assert!(ensure_unique("item", &mut sources, true).is_err());
}

#[test]
fn test_reference_source_guards_call_site_scopes() {
    let source = r#"class Bag {
    int item;
    int Get() {
        int shadow = 1;
        return item;
    }
}
"#;
    let workspace = Workspace::single(source).unwrap();
    let cancel = CancelToken::new();
    let model = SemanticModel::build(&workspace, &cancel).unwrap();
    let symbol = model.unique_field("Bag", "item").unwrap();

    let mut sources = ReservedNames::new(vec![NameSource::References {
        model: &model,
        symbol,
        cancel: cancel.clone(),
    }]);
    // `shadow` is visible at the reference inside Get, so it is reserved
    assert_eq!(ensure_unique("shadow", &mut sources, true).unwrap(), "shadow2");
}
