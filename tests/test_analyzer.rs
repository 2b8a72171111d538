// Copyright (C) Brian G. Milnes 2025

//! Tests for the analyzer and fixer contracts

mod common;

use common::{analyze_source, fix_source};
use simplicate::{
    analyze_workspace, fix_workspace, CancelToken, Cancelled, RuleKind, Settings, Workspace,
};

#[test]
fn test_analyze_empty_file() {
    assert!(analyze_source("").is_empty());
}

#[test]
fn test_analyze_clean_file_reports_nothing() {
    let source = r#"class Person {
    string Name { get; set; }
    string Greet() {
        return Name;
    }
}
"#;
    assert!(analyze_source(source).is_empty());
}

#[test]
fn test_multiple_rules_fire_in_one_pass() {
    let source = "int[] a = { 1, 2, }; if (done) { ok = true; } else { ok = false; }";
    let diagnostics = analyze_source(source);
    let rules: Vec<&str> = diagnostics
        .iter()
        .map(|diagnostic| diagnostic.rule_id.as_str())
        .collect();
    assert!(rules.contains(&"trailing-separator"));
    assert!(rules.contains(&"assign-condition"));
    assert_eq!(
        fix_source(source),
        "int[] a = { 1, 2 }; ok = done;"
    );
}

#[test]
fn test_diagnostics_are_ordered_by_position() {
    let source = "int[] a = { 1, }; if (x) { b = true; } else { b = false; }";
    let diagnostics = analyze_source(source);
    let starts: Vec<usize> = diagnostics
        .iter()
        .map(|diagnostic| diagnostic.primary_span.start)
        .collect();
    let mut sorted = starts.clone();
    sorted.sort_unstable();
    assert_eq!(starts, sorted);
}

#[test]
fn test_disabled_rule_is_silent() {
    let source = "int[] a = { 1, 2, 3, };";
    let mut settings = Settings::default();
    settings.disabled_rules.insert("trailing-separator".to_string());

    let workspace = Workspace::single(source).unwrap();
    let cancel = CancelToken::new();
    let results = analyze_workspace(&workspace, &settings, &cancel).unwrap();
    assert!(results[0].diagnostics.is_empty());

    let fixes = fix_workspace(&workspace, &settings, &cancel).unwrap();
    assert!(fixes.is_empty());
}

#[test]
fn test_rule_ids_round_trip() {
    for kind in RuleKind::ALL {
        assert_eq!(RuleKind::from_id(kind.id()), Some(kind));
    }
    assert_eq!(RuleKind::from_id("no-such-rule"), None);
}

#[test]
fn test_diagnostics_serialize_to_json() {
    let diagnostics = analyze_source("int[] a = { 1, 2, 3, };");
    let json = serde_json::to_string(&diagnostics).unwrap();
    assert!(json.contains("\"rule_id\":\"trailing-separator\""));
    assert!(json.contains("\"primary_span\""));
}

#[test]
fn test_settings_default_on_missing_file() {
    let settings = Settings::load(std::path::Path::new("/nonexistent/settings.json")).unwrap();
    assert!(settings.underscore_field_prefix);
    assert!(settings.disabled_rules.is_empty());
    assert!(settings.is_enabled("assign-condition"));
}

#[test]
fn test_settings_parse_from_json() {
    let settings: Settings =
        serde_json::from_str(r#"{ "disabled_rules": ["use-count-check"] }"#).unwrap();
    assert!(!settings.is_enabled("use-count-check"));
    assert!(settings.is_enabled("use-element-access"));
    // Unspecified keys fall back to the defaults
    assert!(settings.underscore_field_prefix);
}

#[test]
fn test_cancellation_unwinds_analysis() {
    let workspace = Workspace::single("x = 1;").unwrap();
    let cancel = CancelToken::new();
    cancel.cancel();
    let error = analyze_workspace(&workspace, &Settings::default(), &cancel).unwrap_err();
    assert!(error.downcast_ref::<Cancelled>().is_some());
}

#[test]
fn test_fix_is_idempotent_for_every_rule() {
    let sources = [
        "if (done) { status = true; } else { status = false; }",
        "if (x > 0) { if (y > 0) { Combine(); } }",
        "int[] a = { 1, 2, 3, };",
        "List list; bool empty = !list.Any();",
        "int[] items; int last = items.Last();",
        "class C { void Log() { } void M() { return Log(); } }",
    ];
    for source in sources {
        let fixed = fix_source(source);
        assert_ne!(fixed, source, "expected a rewrite for {source}");
        assert!(
            analyze_source(&fixed).is_empty(),
            "expected no further diagnostics for {fixed}"
        );
    }
}

#[test]
fn test_analysis_is_parallel_safe_across_documents() {
    let sources: Vec<(String, String)> = (0..8)
        .map(|index| {
            (
                format!("doc{index}.cs"),
                "if (done) { status = true; } else { status = false; }".to_string(),
            )
        })
        .collect();
    let borrowed: Vec<(&str, &str)> = sources
        .iter()
        .map(|(name, text)| (name.as_str(), text.as_str()))
        .collect();
    let workspace = Workspace::in_memory(&borrowed).unwrap();
    let cancel = CancelToken::new();
    let results = analyze_workspace(&workspace, &Settings::default(), &cancel).unwrap();
    assert_eq!(results.len(), 8);
    assert!(results.iter().all(|file| file.diagnostics.len() == 1));
}
