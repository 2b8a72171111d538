// Copyright (C) Brian G. Milnes 2025

//! Tests for auto-property promotion and its inverse

mod common;

use common::diagnostics_for;
use simplicate::ast::ast::{AstNode, PropertyDecl};
use simplicate::auto_property::auto_property::expand_auto_property;
use simplicate::rules::rules::apply_edits;
use simplicate::{
    apply_rule, CancelToken, Cancelled, RuleContext, RuleKind, SemanticModel, Settings,
    Workspace,
};

fn promote(sources: &[(&str, &str)]) -> Vec<(String, String)> {
    let workspace = Workspace::in_memory(sources).unwrap();
    let cancel = CancelToken::new();
    apply_rule(RuleKind::AutoProperty, &workspace, &Settings::default(), &cancel)
        .unwrap()
        .into_iter()
        .map(|(path, text)| (path.display().to_string(), text))
        .collect()
}

const PERSON: &str = r#"class Person {
    private string name;
    string Name {
        get { return name; }
        set { name = value; }
    }
    string Greet() {
        return name + "!";
    }
}
"#;

#[test]
fn test_basic_promotion() {
    let results = promote(&[("person.cs", PERSON)]);
    assert_eq!(results.len(), 1);
    let fixed = &results[0].1;

    assert!(fixed.contains("string Name { get; set; }"));
    assert!(!fixed.contains("private string name;"));
    // The remaining read goes through the property, self-qualified
    assert!(fixed.contains("return this.Name + \"!\";"));
}

#[test]
fn test_promotion_diagnostic_fades_the_field() {
    let diagnostics = diagnostics_for(PERSON, "auto-property");
    assert_eq!(diagnostics.len(), 1);
    let fade = &diagnostics[0].secondary_fade_spans[0];
    assert_eq!(&PERSON[fade.start..fade.end], "private string name;");
}

#[test]
fn test_field_initializer_moves_to_property() {
    let source = r#"class Counter {
    private int count = 10;
    int Count {
        get { return count; }
        set { count = value; }
    }
}
"#;
    let results = promote(&[("counter.cs", source)]);
    assert!(results[0].1.contains("int Count { get; set; } = 10;"));
}

#[test]
fn test_getter_only_property_without_writes() {
    let source = r#"class Box {
    private int size;
    int Size {
        get { return size; }
    }
}
"#;
    let results = promote(&[("box.cs", source)]);
    assert!(results[0].1.contains("int Size { get; }"));
}

#[test]
fn test_getter_only_with_external_write_declines() {
    let source = r#"class Box {
    private int size;
    int Size {
        get { return size; }
    }
    void Grow() {
        size = size + 1;
    }
}
"#;
    assert!(diagnostics_for(source, "auto-property").is_empty());
}

#[test]
fn test_volatile_field_declines() {
    let source = r#"class Box {
    private volatile int size;
    int Size {
        get { return size; }
        set { size = value; }
    }
}
"#;
    assert!(diagnostics_for(source, "auto-property").is_empty());
}

#[test]
fn test_attributed_field_declines() {
    let source = r#"class Box {
    [Obsolete]
    private int size;
    int Size {
        get { return size; }
        set { size = value; }
    }
}
"#;
    assert!(diagnostics_for(source, "auto-property").is_empty());
}

#[test]
fn test_layout_class_declines() {
    let source = r#"[StructLayout(1)]
class Box {
    private int size;
    int Size {
        get { return size; }
        set { size = value; }
    }
}
"#;
    assert!(diagnostics_for(source, "auto-property").is_empty());
}

#[test]
fn test_directive_in_field_span_declines() {
    let source = r#"class Box {
#if DEBUG
    private int size;
#endif
    int Size {
        get { return size; }
        set { size = value; }
    }
}
"#;
    assert!(diagnostics_for(source, "auto-property").is_empty());
}

#[test]
fn test_mismatched_staticness_declines() {
    let source = r#"class Box {
    private static int size;
    int Size {
        get { return size; }
        set { size = value; }
    }
}
"#;
    assert!(diagnostics_for(source, "auto-property").is_empty());
}

#[test]
fn test_ambiguous_field_across_partials_declines() {
    let part_a = r#"partial class Box {
    private int size;
    int Size {
        get { return size; }
        set { size = value; }
    }
}
"#;
    let part_b = r#"partial class Box {
    private int size;
}
"#;
    let workspace = Workspace::in_memory(&[("a.cs", part_a), ("b.cs", part_b)]).unwrap();
    let cancel = CancelToken::new();
    let results =
        apply_rule(RuleKind::AutoProperty, &workspace, &Settings::default(), &cancel).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_partial_class_rewrite_is_atomic_across_files() {
    let part_a = r#"partial class Counter {
    private static int total;
    static int Total {
        get { return total; }
        set { total = value; }
    }
}
"#;
    let part_b = r#"partial class Counter {
    static int Bump() {
        total = total + 1;
        return total;
    }
}
"#;
    let results = promote(&[("a.cs", part_a), ("b.cs", part_b)]);
    // Both documents change together
    assert_eq!(results.len(), 2);
    let doc_a = &results.iter().find(|(path, _)| path == "a.cs").unwrap().1;
    let doc_b = &results.iter().find(|(path, _)| path == "b.cs").unwrap().1;

    assert!(doc_a.contains("static int Total { get; set; }"));
    assert!(!doc_a.contains("private static int total;"));
    // Static references qualify with the type name
    assert!(doc_b.contains("Counter.Total = Counter.Total + 1;"));
    assert!(doc_b.contains("return Counter.Total;"));
}

#[test]
fn test_cancellation_aborts_promotion() {
    let workspace = Workspace::in_memory(&[("person.cs", PERSON)]).unwrap();
    let cancel = CancelToken::new();
    cancel.cancel();
    let error =
        apply_rule(RuleKind::AutoProperty, &workspace, &Settings::default(), &cancel)
            .unwrap_err();
    assert!(error.downcast_ref::<Cancelled>().is_some());
}

// Inverse: expanding an auto property synthesizes a backing field

fn expand(source: &str, settings: &Settings) -> String {
    let workspace = Workspace::single(source).unwrap();
    let cancel = CancelToken::new();
    let model = SemanticModel::build(&workspace, &cancel).unwrap();
    let root = workspace.document(0).root();
    let ctx = RuleContext { doc_index: 0, model: &model, settings, cancel: &cancel };
    let property = root.descendants().find_map(PropertyDecl::cast).unwrap();
    let candidate = expand_auto_property(&root, &property, &ctx).unwrap().unwrap();
    apply_edits(source, &candidate.edits)
}

#[test]
fn test_expand_generates_underscore_field() {
    let source = "class Person {\n    string Name { get; set; }\n}\n";
    let expanded = expand(source, &Settings::default());
    assert!(expanded.contains("private string _name;"));
    assert!(expanded.contains("string Name { get { return _name; } set { _name = value; } }"));
}

#[test]
fn test_expand_without_underscore_preference() {
    let source = "class Person {\n    string Name { get; set; }\n}\n";
    let settings = Settings { underscore_field_prefix: false, ..Settings::default() };
    let expanded = expand(source, &settings);
    assert!(expanded.contains("private string name;"));
    assert!(expanded.contains("get { return name; }"));
}

#[test]
fn test_expand_avoids_member_collision() {
    let source =
        "class Person {\n    string Name { get; set; }\n    void name() { }\n}\n";
    let settings = Settings { underscore_field_prefix: false, ..Settings::default() };
    let expanded = expand(source, &settings);
    // `name` is taken by the method, so the generator appends a counter
    assert!(expanded.contains("private string name2;"));
    assert!(expanded.contains("get { return name2; }"));
}
