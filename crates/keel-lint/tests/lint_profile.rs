//! Integration tests: linting whole profile documents, including ones
//! produced by the keel generator.

use keel_lint::{lint_file, lint_str, lint_value, LintOptions};
use serde_yaml::{Mapping, Value};

fn proxy(name: &str) -> Value {
    let mut mapping = Mapping::new();
    mapping.insert(Value::from("name"), Value::from(name));
    mapping.insert(Value::from("server"), Value::from("example.net"));
    Value::Mapping(mapping)
}

#[test]
fn test_generated_profile_with_inline_proxies_lints_clean() {
    let mut base = Mapping::new();
    base.insert(
        Value::from("proxies"),
        Value::Sequence(vec![
            proxy("US-Vless-1"),
            proxy("Russia-Vless-2"),
            proxy("Netherlands(R)-Vless-3"),
        ]),
    );

    let profile = keel_profile::transform(base);
    let result = lint_value(
        &Value::Mapping(profile),
        "generated.yaml",
        &LintOptions::default(),
    );

    assert!(result.is_valid(), "{:#?}", result.issues);
    assert!(!result.has_warnings(), "{:#?}", result.issues);
}

#[test]
fn test_generated_provider_mode_profile_lints_clean() {
    let yaml = r#"
proxy-providers:
  subscription:
    type: http
    url: https://example.net/sub
    path: ./providers/subscription.yaml
"#;
    let mut profile: Mapping = serde_yaml::from_str(yaml).unwrap();
    keel_profile::apply(&mut profile);

    let result = lint_value(
        &Value::Mapping(profile),
        "generated.yaml",
        &LintOptions::default(),
    );
    assert!(result.is_valid(), "{:#?}", result.issues);
}

#[test]
fn test_lint_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("profile.yaml");

    let mut doc = keel_profile::ProfileDocument::new();
    doc.apply_overlay();
    doc.write_to(&path).unwrap();

    let result = lint_file(&path, &LintOptions::default());
    assert_eq!(result.files_checked, 1);
    assert!(result.is_valid(), "{:#?}", result.issues);
}

#[test]
fn test_lint_file_reports_read_failure() {
    let result = lint_file(
        std::path::Path::new("/no/such/profile.yaml"),
        &LintOptions::default(),
    );
    assert_eq!(result.errors, 1);
    assert_eq!(result.issues[0].code, "E001");
}

#[test]
fn test_lint_str_reports_parse_failure() {
    let result = lint_str("{ not: [valid", "broken.yaml", &LintOptions::default());
    assert_eq!(result.errors, 1);
    assert_eq!(result.issues[0].code, "E002");
}

#[test]
fn test_hand_written_profile_with_mixed_issues() {
    let result = lint_str(
        r#"
port: 443
mode: rule
rule-providers:
  unused_list:
    type: http
    behavior: classical
    url: https://example.net/unused.list
    path: ./rules/unused.yaml
    interval: 86400
proxy-groups:
  - name: PROXY
    type: select
    proxies: [GHOST, DIRECT]
rules:
  - DOMAIN-SUFFIX,ru,DIRECT
"#,
        "handwritten.yaml",
        &LintOptions::default(),
    );

    let codes: Vec<&str> = result.issues.iter().map(|i| i.code).collect();
    assert!(codes.contains(&"W001"), "{codes:?}"); // privileged port
    assert!(codes.contains(&"E206"), "{codes:?}"); // GHOST member
    assert!(codes.contains(&"E306"), "{codes:?}"); // missing catch-all
    assert!(codes.contains(&"W002"), "{codes:?}"); // unused provider
}
