//! Core validation logic for profile documents.

use std::collections::HashSet;
use std::path::Path;

use serde_yaml::{Mapping, Value};

use crate::types::{LintIssue, LintOptions, LintResult};

const GROUP_TYPES: &[&str] = &["select", "url-test", "fallback", "load-balance", "relay"];
/// Group types that latency-probe their members and need a probe URL.
const PROBED_GROUP_TYPES: &[&str] = &["url-test", "fallback", "load-balance"];

const PROVIDER_TYPES: &[&str] = &["http", "file", "inline"];
const PROVIDER_BEHAVIORS: &[&str] = &["domain", "ipcidr", "classical"];

const MODES: &[&str] = &["rule", "global", "direct"];
const LOG_LEVELS: &[&str] = &["debug", "info", "warning", "error", "silent"];
const DNS_MODES: &[&str] = &["fake-ip", "redir-host", "normal"];

const BUILTIN_OUTBOUNDS: &[&str] = &["DIRECT", "REJECT", "REJECT-DROP", "PASS"];

const RULE_KINDS: &[&str] = &[
    "AND",
    "OR",
    "NOT",
    "RULE-SET",
    "DOMAIN",
    "DOMAIN-SUFFIX",
    "DOMAIN-KEYWORD",
    "GEOSITE",
    "GEOIP",
    "IP-CIDR",
    "IP-CIDR6",
    "IP-ASN",
    "SRC-IP-CIDR",
    "DST-PORT",
    "SRC-PORT",
    "PROCESS-NAME",
    "NETWORK",
    "MATCH",
];

/// Rule kinds that match on addresses and may carry the no-resolve modifier.
const NO_RESOLVE_KINDS: &[&str] = &["RULE-SET", "GEOIP", "IP-CIDR", "IP-CIDR6", "IP-ASN"];

const PORT_KEYS: &[&str] = &["port", "socks-port", "mixed-port", "redir-port", "tproxy-port"];

/// Names a group member or rule target can resolve against.
struct NameTable {
    proxies: HashSet<String>,
    groups: HashSet<String>,
}

impl NameTable {
    fn from_profile(root: &Mapping) -> Self {
        let proxies = root
            .get("proxies")
            .and_then(Value::as_sequence)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|e| e.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let groups = root
            .get("proxy-groups")
            .and_then(Value::as_sequence)
            .map(|groups| {
                groups
                    .iter()
                    .filter_map(|g| g.get("name").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Self { proxies, groups }
    }

    fn resolves(&self, name: &str) -> bool {
        BUILTIN_OUTBOUNDS.contains(&name)
            || self.groups.contains(name)
            || self.proxies.contains(name)
    }
}

/// Validate a complete profile document.
pub fn validate_profile(
    file: &Path,
    profile: &Value,
    result: &mut LintResult,
    _options: &LintOptions,
) {
    let root = match profile.as_mapping() {
        Some(root) => root,
        None => {
            result.add_issue(
                LintIssue::error("E003", "Profile root must be a mapping", file.to_path_buf())
                    .with_suggestion("Top level must be key: value pairs, not a list or scalar"),
            );
            return;
        }
    };

    check_required_sections(file, root, result);
    check_ports(file, root, result);
    check_enumerations(file, root, result);

    let declared_providers = check_rule_providers(file, root, result);
    let names = NameTable::from_profile(root);
    check_proxy_groups(file, root, &names, result);
    let referenced = check_rules(file, root, &names, &declared_providers, result);

    // Providers nothing routes through are dead weight the client still
    // fetches on schedule.
    for provider in &declared_providers {
        if !referenced.contains(provider) {
            result.add_issue(
                LintIssue::warning(
                    "W002",
                    format!("Rule provider '{provider}' is referenced by no rule"),
                    file.to_path_buf(),
                )
                .with_location(format!("rule-providers.{provider}"))
                .with_suggestion("Remove the provider or add a RULE-SET rule for it"),
            );
        }
    }
}

fn check_required_sections(file: &Path, root: &Mapping, result: &mut LintResult) {
    for section in ["proxy-groups", "rules"] {
        match root.get(section) {
            None => {
                result.add_issue(
                    LintIssue::error(
                        "E004",
                        format!("Missing required section: {section}"),
                        file.to_path_buf(),
                    )
                    .with_suggestion(format!("Add a '{section}' list to the profile")),
                );
            }
            Some(value) if value.as_sequence().is_none() => {
                result.add_issue(
                    LintIssue::error(
                        "E004",
                        format!("Section '{section}' must be a list"),
                        file.to_path_buf(),
                    )
                    .with_location(section),
                );
            }
            Some(_) => {}
        }
    }
}

fn check_ports(file: &Path, root: &Mapping, result: &mut LintResult) {
    for key in PORT_KEYS {
        let Some(value) = root.get(*key) else {
            continue;
        };
        match value.as_u64() {
            Some(port) if (1..=65535).contains(&port) => {
                if port < 1024 {
                    result.add_issue(
                        LintIssue::warning(
                            "W001",
                            format!("Port {port} is a privileged port (requires root)"),
                            file.to_path_buf(),
                        )
                        .with_location(*key)
                        .with_suggestion("Consider using a port >= 1024"),
                    );
                }
            }
            _ => {
                result.add_issue(
                    LintIssue::error(
                        "E005",
                        format!("'{key}' must be an integer in 1-65535"),
                        file.to_path_buf(),
                    )
                    .with_location(*key),
                );
            }
        }
    }
}

fn check_enumerations(file: &Path, root: &Mapping, result: &mut LintResult) {
    check_enum_key(file, root, "mode", MODES, result);
    check_enum_key(file, root, "log-level", LOG_LEVELS, result);

    if let Some(dns) = root.get("dns").and_then(Value::as_mapping) {
        if let Some(value) = dns.get("enhanced-mode") {
            if !value.as_str().is_some_and(|v| DNS_MODES.contains(&v)) {
                result.add_issue(
                    LintIssue::error(
                        "E006",
                        format!("Invalid dns enhanced-mode: {}", render(value)),
                        file.to_path_buf(),
                    )
                    .with_location("dns.enhanced-mode")
                    .with_suggestion(format!("Use one of: {}", DNS_MODES.join(", "))),
                );
            }
        }
    }
}

fn check_enum_key(
    file: &Path,
    root: &Mapping,
    key: &str,
    allowed: &[&str],
    result: &mut LintResult,
) {
    if let Some(value) = root.get(key) {
        if !value.as_str().is_some_and(|v| allowed.contains(&v)) {
            result.add_issue(
                LintIssue::error(
                    "E006",
                    format!("Invalid {key}: {}", render(value)),
                    file.to_path_buf(),
                )
                .with_location(key)
                .with_suggestion(format!("Use one of: {}", allowed.join(", "))),
            );
        }
    }
}

/// Validate the `rule-providers` section. Returns the declared provider keys.
fn check_rule_providers(file: &Path, root: &Mapping, result: &mut LintResult) -> HashSet<String> {
    let mut declared = HashSet::new();

    let Some(section) = root.get("rule-providers") else {
        return declared;
    };
    let Some(providers) = section.as_mapping() else {
        result.add_issue(
            LintIssue::error(
                "E101",
                "'rule-providers' must be a mapping of name to descriptor",
                file.to_path_buf(),
            )
            .with_location("rule-providers"),
        );
        return declared;
    };

    for (key, descriptor) in providers {
        let Some(name) = key.as_str() else {
            result.add_issue(
                LintIssue::error(
                    "E101",
                    "Rule provider keys must be strings",
                    file.to_path_buf(),
                )
                .with_location("rule-providers"),
            );
            continue;
        };
        declared.insert(name.to_string());
        let location = format!("rule-providers.{name}");

        let Some(descriptor) = descriptor.as_mapping() else {
            result.add_issue(
                LintIssue::error(
                    "E101",
                    format!("Rule provider '{name}' must be a mapping"),
                    file.to_path_buf(),
                )
                .with_location(location),
            );
            continue;
        };

        let kind = descriptor.get("type").and_then(Value::as_str);
        for field in ["type", "behavior", "path"] {
            if descriptor.get(field).is_none() {
                result.add_issue(
                    LintIssue::error(
                        "E101",
                        format!("Rule provider '{name}' is missing '{field}'"),
                        file.to_path_buf(),
                    )
                    .with_location(location.clone()),
                );
            }
        }

        if let Some(kind) = kind {
            if !PROVIDER_TYPES.contains(&kind) {
                result.add_issue(
                    LintIssue::error(
                        "E102",
                        format!("Rule provider '{name}' has unknown type '{kind}'"),
                        file.to_path_buf(),
                    )
                    .with_location(location.clone())
                    .with_suggestion(format!("Use one of: {}", PROVIDER_TYPES.join(", "))),
                );
            }
        }
        if let Some(behavior) = descriptor.get("behavior").and_then(Value::as_str) {
            if !PROVIDER_BEHAVIORS.contains(&behavior) {
                result.add_issue(
                    LintIssue::error(
                        "E102",
                        format!("Rule provider '{name}' has unknown behavior '{behavior}'"),
                        file.to_path_buf(),
                    )
                    .with_location(location.clone())
                    .with_suggestion(format!("Use one of: {}", PROVIDER_BEHAVIORS.join(", "))),
                );
            }
        }

        // Remote providers need a fetchable URL.
        if kind == Some("http") && descriptor.get("url").is_none() {
            result.add_issue(
                LintIssue::error(
                    "E101",
                    format!("Rule provider '{name}' is missing 'url'"),
                    file.to_path_buf(),
                )
                .with_location(location.clone()),
            );
        }
        if let Some(url) = descriptor.get("url").and_then(Value::as_str) {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                result.add_issue(
                    LintIssue::error(
                        "E103",
                        format!("Rule provider '{name}' has a non-http(s) url: {url}"),
                        file.to_path_buf(),
                    )
                    .with_location(location.clone()),
                );
            }
        }
        if let Some(interval) = descriptor.get("interval") {
            if !interval.as_u64().is_some_and(|i| i > 0) {
                result.add_issue(
                    LintIssue::error(
                        "E104",
                        format!("Rule provider '{name}' interval must be a positive integer"),
                        file.to_path_buf(),
                    )
                    .with_location(location),
                );
            }
        }
    }

    declared
}

fn check_proxy_groups(file: &Path, root: &Mapping, names: &NameTable, result: &mut LintResult) {
    let Some(groups) = root.get("proxy-groups").and_then(Value::as_sequence) else {
        return;
    };

    let mut seen = HashSet::new();
    for (idx, group) in groups.iter().enumerate() {
        let location = format!("proxy-groups[{idx}]");

        let Some(group) = group.as_mapping() else {
            result.add_issue(
                LintIssue::error("E201", "Proxy group must be a mapping", file.to_path_buf())
                    .with_location(location),
            );
            continue;
        };

        let name = match group.get("name").and_then(Value::as_str) {
            Some(name) if !name.is_empty() => name,
            _ => {
                result.add_issue(
                    LintIssue::error(
                        "E201",
                        "Proxy group is missing a non-empty 'name'",
                        file.to_path_buf(),
                    )
                    .with_location(location),
                );
                continue;
            }
        };

        if !seen.insert(name) {
            result.add_issue(
                LintIssue::error(
                    "E202",
                    format!("Duplicate proxy group name '{name}'"),
                    file.to_path_buf(),
                )
                .with_location(location.clone()),
            );
        }

        let kind = group.get("type").and_then(Value::as_str);
        match kind {
            Some(kind) if GROUP_TYPES.contains(&kind) => {}
            Some(kind) => {
                result.add_issue(
                    LintIssue::error(
                        "E203",
                        format!("Group '{name}' has unknown type '{kind}'"),
                        file.to_path_buf(),
                    )
                    .with_location(location.clone())
                    .with_suggestion(format!("Use one of: {}", GROUP_TYPES.join(", "))),
                );
            }
            None => {
                result.add_issue(
                    LintIssue::error(
                        "E203",
                        format!("Group '{name}' is missing 'type'"),
                        file.to_path_buf(),
                    )
                    .with_location(location.clone()),
                );
            }
        }

        // Probed groups must know what to probe and how often.
        if kind.is_some_and(|k| PROBED_GROUP_TYPES.contains(&k)) {
            if group.get("url").and_then(Value::as_str).is_none() {
                result.add_issue(
                    LintIssue::error(
                        "E204",
                        format!("Probed group '{name}' is missing its health-check 'url'"),
                        file.to_path_buf(),
                    )
                    .with_location(location.clone()),
                );
            }
            if !group
                .get("interval")
                .is_some_and(|i| i.as_u64().is_some_and(|i| i > 0))
            {
                result.add_issue(
                    LintIssue::error(
                        "E204",
                        format!("Probed group '{name}' needs a positive probe 'interval'"),
                        file.to_path_buf(),
                    )
                    .with_location(location.clone()),
                );
            }
        }

        check_group_members(file, group, name, &location, names, result);
    }
}

fn check_group_members(
    file: &Path,
    group: &Mapping,
    name: &str,
    location: &str,
    names: &NameTable,
    result: &mut LintResult,
) {
    let members = group.get("proxies").and_then(Value::as_sequence);
    let providers = group.get("use").and_then(Value::as_sequence);

    match (members, providers) {
        (Some(_), Some(_)) | (None, None) => {
            result.add_issue(
                LintIssue::error(
                    "E205",
                    format!("Group '{name}' needs exactly one member source: 'proxies' or 'use'"),
                    file.to_path_buf(),
                )
                .with_location(location.to_string()),
            );
            return;
        }
        (Some(members), None) => {
            if members.is_empty() {
                result.add_issue(
                    LintIssue::warning(
                        "W004",
                        format!("Group '{name}' has an empty member list"),
                        file.to_path_buf(),
                    )
                    .with_location(format!("{location}.proxies")),
                );
            }
            for (idx, member) in members.iter().enumerate() {
                match member.as_str() {
                    Some(member) if names.resolves(member) => {}
                    Some(member) => {
                        result.add_issue(
                            LintIssue::error(
                                "E206",
                                format!(
                                    "Group '{name}' references unknown member '{member}'"
                                ),
                                file.to_path_buf(),
                            )
                            .with_location(format!("{location}.proxies[{idx}]"))
                            .with_suggestion(
                                "Members must name a proxy, another group, or a built-in outbound",
                            ),
                        );
                    }
                    None => {
                        result.add_issue(
                            LintIssue::error(
                                "E206",
                                format!("Group '{name}' members must be strings"),
                                file.to_path_buf(),
                            )
                            .with_location(format!("{location}.proxies[{idx}]")),
                        );
                    }
                }
            }
        }
        (None, Some(_)) => {
            check_group_filter(file, group, name, location, result);
        }
    }
}

/// Best-effort compile check of a provider-backed group's name filter. The
/// client's regexp engine supports lookaround that the `regex` crate does
/// not, so such patterns are skipped rather than misreported.
fn check_group_filter(
    file: &Path,
    group: &Mapping,
    name: &str,
    location: &str,
    result: &mut LintResult,
) {
    let Some(filter) = group.get("filter").and_then(Value::as_str) else {
        return;
    };
    if filter.contains("(?!") || filter.contains("(?<") {
        return;
    }
    if let Err(e) = regex::Regex::new(filter) {
        result.add_issue(
            LintIssue::warning(
                "W003",
                format!("Group '{name}' filter does not compile as a regex: {e}"),
                file.to_path_buf(),
            )
            .with_location(format!("{location}.filter")),
        );
    }
}

/// One routing directive, decomposed.
struct ParsedRule<'a> {
    kind: &'a str,
    payload: Option<&'a str>,
    target: &'a str,
    no_resolve: bool,
}

/// Split a directive into kind, payload, target, and the no-resolve modifier.
/// Composite payloads (`AND,((...),(...)),TARGET`) keep their inner commas:
/// the target is always the text after the last comma.
fn parse_rule(text: &str) -> Result<ParsedRule<'_>, String> {
    let (kind, rest) = text
        .split_once(',')
        .ok_or_else(|| "directive has no target".to_string())?;

    let (rest, no_resolve) = match rest.strip_suffix(",no-resolve") {
        Some(rest) => (rest, true),
        None => (rest, false),
    };
    if rest.is_empty() {
        return Err("directive has no target".to_string());
    }

    if kind == "MATCH" {
        if rest.contains(',') {
            return Err("MATCH takes only a target".to_string());
        }
        return Ok(ParsedRule {
            kind,
            payload: None,
            target: rest,
            no_resolve,
        });
    }

    let (payload, target) = rest
        .rsplit_once(',')
        .ok_or_else(|| format!("{kind} needs a payload and a target"))?;
    if payload.is_empty() || target.is_empty() {
        return Err(format!("{kind} needs a payload and a target"));
    }
    Ok(ParsedRule {
        kind,
        payload: Some(payload),
        target,
        no_resolve,
    })
}

/// Validate the `rules` section. Returns the provider names referenced by
/// RULE-SET directives.
fn check_rules(
    file: &Path,
    root: &Mapping,
    names: &NameTable,
    declared_providers: &HashSet<String>,
    result: &mut LintResult,
) -> HashSet<String> {
    let mut referenced = HashSet::new();

    let Some(rules) = root.get("rules").and_then(Value::as_sequence) else {
        return referenced;
    };

    let mut catch_all_at = None;
    for (idx, rule) in rules.iter().enumerate() {
        let location = format!("rules[{idx}]");

        let Some(text) = rule.as_str() else {
            result.add_issue(
                LintIssue::error("E301", "Rule directives must be strings", file.to_path_buf())
                    .with_location(location),
            );
            continue;
        };

        let parsed = match parse_rule(text) {
            Ok(parsed) => parsed,
            Err(e) => {
                result.add_issue(
                    LintIssue::error(
                        "E301",
                        format!("Unparseable rule '{text}': {e}"),
                        file.to_path_buf(),
                    )
                    .with_location(location),
                );
                continue;
            }
        };

        if !RULE_KINDS.contains(&parsed.kind) {
            result.add_issue(
                LintIssue::error(
                    "E302",
                    format!("Unknown rule kind '{}'", parsed.kind),
                    file.to_path_buf(),
                )
                .with_location(location.clone()),
            );
            continue;
        }

        if parsed.kind == "RULE-SET" {
            let set = parsed.payload.unwrap_or_default();
            referenced.insert(set.to_string());
            if !declared_providers.contains(set) {
                result.add_issue(
                    LintIssue::error(
                        "E303",
                        format!("RULE-SET references undeclared provider '{set}'"),
                        file.to_path_buf(),
                    )
                    .with_location(location.clone())
                    .with_suggestion("Declare the provider under 'rule-providers'"),
                );
            }
        }

        if !names.resolves(parsed.target) {
            result.add_issue(
                LintIssue::error(
                    "E304",
                    format!("Rule targets unknown outbound '{}'", parsed.target),
                    file.to_path_buf(),
                )
                .with_location(location.clone()),
            );
        }

        if parsed.no_resolve && !NO_RESOLVE_KINDS.contains(&parsed.kind) {
            result.add_issue(
                LintIssue::error(
                    "E305",
                    format!("no-resolve is not valid on {} rules", parsed.kind),
                    file.to_path_buf(),
                )
                .with_location(location.clone())
                .with_suggestion("no-resolve only applies to IP-matching rules"),
            );
        }

        if parsed.kind == "MATCH" && catch_all_at.is_none() {
            catch_all_at = Some(idx);
        }
    }

    match catch_all_at {
        None => {
            result.add_issue(
                LintIssue::error(
                    "E306",
                    "Rule table has no catch-all MATCH directive",
                    file.to_path_buf(),
                )
                .with_location("rules")
                .with_suggestion("Terminate the table with 'MATCH,<group>'"),
            );
        }
        Some(idx) if idx + 1 != rules.len() => {
            result.add_issue(
                LintIssue::error(
                    "E306",
                    format!(
                        "Rules after the catch-all at rules[{idx}] are unreachable"
                    ),
                    file.to_path_buf(),
                )
                .with_location(format!("rules[{idx}]")),
            );
        }
        _ => {}
    }

    referenced
}

fn render(value: &Value) -> String {
    match value.as_str() {
        Some(s) => format!("'{s}'"),
        None => serde_yaml::to_string(value)
            .unwrap_or_default()
            .trim_end()
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lint(yaml: &str) -> LintResult {
        let value: Value = serde_yaml::from_str(yaml).unwrap();
        let mut result = LintResult::new();
        validate_profile(
            Path::new("test.yaml"),
            &value,
            &mut result,
            &LintOptions::default(),
        );
        result
    }

    fn codes(result: &LintResult) -> Vec<&'static str> {
        result.issues.iter().map(|i| i.code).collect()
    }

    const MINIMAL: &str = r#"
proxy-groups:
  - name: PROXY
    type: select
    proxies: [DIRECT]
rules:
  - MATCH,PROXY
"#;

    #[test]
    fn test_minimal_profile_is_clean() {
        let result = lint(MINIMAL);
        assert!(result.is_valid(), "{:?}", result.issues);
        assert!(!result.has_warnings(), "{:?}", result.issues);
    }

    #[test]
    fn test_non_mapping_root() {
        let result = lint("- a\n- b\n");
        assert_eq!(codes(&result), ["E003"]);
    }

    #[test]
    fn test_missing_required_sections() {
        let result = lint("port: 7890\n");
        let codes = codes(&result);
        assert_eq!(codes.iter().filter(|c| **c == "E004").count(), 2);
    }

    #[test]
    fn test_port_checks() {
        let result = lint(&format!("port: 99999\nsocks-port: 80\n{MINIMAL}"));
        assert!(codes(&result).contains(&"E005"));
        assert!(codes(&result).contains(&"W001"));
    }

    #[test]
    fn test_enumeration_checks() {
        let result = lint(&format!(
            "mode: chaos\nlog-level: noisy\ndns:\n  enhanced-mode: real-ip\n{MINIMAL}"
        ));
        assert_eq!(codes(&result).iter().filter(|c| **c == "E006").count(), 3);
    }

    #[test]
    fn test_provider_descriptor_checks() {
        let result = lint(&format!(
            r#"
rule-providers:
  broken:
    type: carrier-pigeon
    behavior: classical
    url: ftp://example.net/list
    path: ./rules/broken.yaml
    interval: 0
{MINIMAL}"#
        ));
        let codes = codes(&result);
        assert!(codes.contains(&"E102"), "{codes:?}");
        assert!(codes.contains(&"E103"), "{codes:?}");
        assert!(codes.contains(&"E104"), "{codes:?}");
        // Declared but unreferenced.
        assert!(codes.contains(&"W002"), "{codes:?}");
    }

    #[test]
    fn test_provider_missing_fields() {
        let result = lint(&format!(
            "rule-providers:\n  bare: {{ type: http }}\n{MINIMAL}"
        ));
        // behavior, path, url all missing
        assert_eq!(codes(&result).iter().filter(|c| **c == "E101").count(), 3);
    }

    #[test]
    fn test_duplicate_group_names() {
        let result = lint(
            r#"
proxy-groups:
  - name: PROXY
    type: select
    proxies: [DIRECT]
  - name: PROXY
    type: select
    proxies: [DIRECT]
rules:
  - MATCH,PROXY
"#,
        );
        assert!(codes(&result).contains(&"E202"));
    }

    #[test]
    fn test_probed_group_requires_url_and_interval() {
        let result = lint(
            r#"
proxy-groups:
  - name: AUTO
    type: url-test
    proxies: [DIRECT]
rules:
  - MATCH,AUTO
"#,
        );
        assert_eq!(codes(&result).iter().filter(|c| **c == "E204").count(), 2);
    }

    #[test]
    fn test_group_needs_exactly_one_member_source() {
        let result = lint(
            r#"
proxy-groups:
  - name: BOTH
    type: select
    proxies: [DIRECT]
    use: [sub]
  - name: NEITHER
    type: select
rules:
  - MATCH,BOTH
"#,
        );
        assert_eq!(codes(&result).iter().filter(|c| **c == "E205").count(), 2);
    }

    #[test]
    fn test_unresolved_group_member() {
        let result = lint(
            r#"
proxy-groups:
  - name: PROXY
    type: select
    proxies: [GHOST]
rules:
  - MATCH,PROXY
"#,
        );
        assert!(codes(&result).contains(&"E206"));
    }

    #[test]
    fn test_members_resolve_to_proxies_groups_and_builtins() {
        let result = lint(
            r#"
proxies:
  - name: UAE-Vless-7
    server: example.net
proxy-groups:
  - name: AUTO
    type: url-test
    url: http://www.gstatic.com/generate_204
    interval: 300
    proxies: [UAE-Vless-7]
  - name: PROXY
    type: select
    proxies: [AUTO, DIRECT, REJECT]
rules:
  - MATCH,PROXY
"#,
        );
        assert!(result.is_valid(), "{:?}", result.issues);
    }

    #[test]
    fn test_bad_filter_regex_warns() {
        let result = lint(
            r#"
proxy-groups:
  - name: PROXY
    type: select
    use: [sub]
    filter: "([unclosed"
rules:
  - MATCH,PROXY
"#,
        );
        assert!(codes(&result).contains(&"W003"));
    }

    #[test]
    fn test_lookaround_filters_are_not_misreported() {
        let result = lint(
            r#"
proxy-groups:
  - name: PROXY
    type: select
    use: [sub]
    filter: "(?i)^(?!.*(Russia|Belarus|Ukraine)).*Vless.*$"
rules:
  - MATCH,PROXY
"#,
        );
        assert!(!codes(&result).contains(&"W003"));
    }

    #[test]
    fn test_composite_rule_parses() {
        let parsed = parse_rule("AND,((NETWORK,UDP),(DST-PORT,443)),REJECT").unwrap();
        assert_eq!(parsed.kind, "AND");
        assert_eq!(parsed.payload, Some("((NETWORK,UDP),(DST-PORT,443))"));
        assert_eq!(parsed.target, "REJECT");
        assert!(!parsed.no_resolve);
    }

    #[test]
    fn test_no_resolve_modifier_parses() {
        let parsed = parse_rule("RULE-SET,domain_ips,PROXY,no-resolve").unwrap();
        assert_eq!(parsed.payload, Some("domain_ips"));
        assert!(parsed.no_resolve);
    }

    #[test]
    fn test_unparseable_and_unknown_rules() {
        let result = lint(
            r#"
proxy-groups:
  - name: PROXY
    type: select
    proxies: [DIRECT]
rules:
  - JUSTTEXT
  - FROBNICATE,example.com,PROXY
  - MATCH,PROXY
"#,
        );
        assert!(codes(&result).contains(&"E301"));
        assert!(codes(&result).contains(&"E302"));
    }

    #[test]
    fn test_rule_set_must_reference_declared_provider() {
        let result = lint(
            r#"
proxy-groups:
  - name: PROXY
    type: select
    proxies: [DIRECT]
rules:
  - RULE-SET,ghost_list,PROXY
  - MATCH,PROXY
"#,
        );
        assert!(codes(&result).contains(&"E303"));
    }

    #[test]
    fn test_rule_target_must_resolve() {
        let result = lint(
            r#"
proxy-groups:
  - name: PROXY
    type: select
    proxies: [DIRECT]
rules:
  - DOMAIN-SUFFIX,ru,GHOST
  - MATCH,PROXY
"#,
        );
        assert!(codes(&result).contains(&"E304"));
    }

    #[test]
    fn test_no_resolve_only_on_ip_kinds() {
        let result = lint(
            r#"
proxy-groups:
  - name: PROXY
    type: select
    proxies: [DIRECT]
rules:
  - DOMAIN-SUFFIX,ru,DIRECT,no-resolve
  - GEOIP,RU,DIRECT,no-resolve
  - MATCH,PROXY
"#,
        );
        assert_eq!(codes(&result).iter().filter(|c| **c == "E305").count(), 1);
    }

    #[test]
    fn test_catch_all_missing_or_shadowed() {
        let missing = lint(
            r#"
proxy-groups:
  - name: PROXY
    type: select
    proxies: [DIRECT]
rules:
  - DOMAIN-SUFFIX,ru,DIRECT
"#,
        );
        assert!(codes(&missing).contains(&"E306"));

        let shadowed = lint(
            r#"
proxy-groups:
  - name: PROXY
    type: select
    proxies: [DIRECT]
rules:
  - MATCH,PROXY
  - DOMAIN-SUFFIX,ru,DIRECT
"#,
        );
        assert!(codes(&shadowed).contains(&"E306"));
    }
}
