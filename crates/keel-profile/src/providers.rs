//! Remote rule-set descriptors attached to every generated profile.
//!
//! The descriptors are data only: the client fetches and refreshes the
//! lists, this crate never does.

use serde::Serialize;
use serde_yaml::{Mapping, Value};

use crate::yaml_value;

/// Base URL the remote rule lists are published under.
const RULE_SET_BASE_URL: &str =
    "https://raw.githubusercontent.com/Simonerrror/ShadowRocket/main/rules";

/// Directory the client caches fetched lists in.
const RULE_SET_CACHE_DIR: &str = "./rules";

/// Refresh interval shared by every list, in seconds.
const RULE_SET_REFRESH_SECS: u64 = 86_400;

/// Descriptor key, remote list file, local cache file. Remote file names do
/// not always match the key (`google_gemini` fetches `google-gemini.list`,
/// `google_full` fetches `google.list`).
const RULE_SETS: &[(&str, &str, &str)] = &[
    ("whitelist_direct", "whitelist_direct.list", "whitelist.yaml"),
    ("greylist_proxy", "greylist_proxy.list", "greylist.yaml"),
    ("google_gemini", "google-gemini.list", "google_gemini.yaml"),
    ("google_full", "google.list", "google.yaml"),
    ("gemini_ip", "gemini_ip.list", "gemini_ip.yaml"),
    ("youtube", "youtube.list", "youtube.yaml"),
    ("youtubemusic", "youtubemusic.list", "youtubemusic.yaml"),
    ("microsoft", "microsoft.list", "microsoft.yaml"),
    ("domains_community", "domains_community.list", "domains_community.yaml"),
    ("domain_ips", "domain_ips.list", "domain_ips.yaml"),
    ("voice_ports", "voice_ports.list", "voice_ports.yaml"),
    ("telegram", "telegram.list", "telegram.yaml"),
];

/// A periodically refreshed remote rule list, as understood by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleProvider {
    #[serde(rename = "type")]
    pub kind: String,
    pub behavior: String,
    pub url: String,
    pub path: String,
    pub interval: u64,
}

impl RuleProvider {
    /// Descriptor for a remote classical list cached under the shared
    /// directory.
    fn remote(list_file: &str, cache_file: &str) -> Self {
        Self {
            kind: "http".to_string(),
            behavior: "classical".to_string(),
            url: format!("{RULE_SET_BASE_URL}/{list_file}"),
            path: format!("{RULE_SET_CACHE_DIR}/{cache_file}"),
            interval: RULE_SET_REFRESH_SECS,
        }
    }
}

/// The fixed descriptor table, in emission order.
pub fn rule_providers() -> Vec<(&'static str, RuleProvider)> {
    RULE_SETS
        .iter()
        .map(|&(name, list_file, cache_file)| (name, RuleProvider::remote(list_file, cache_file)))
        .collect()
}

/// The descriptor table rendered as the `rule-providers` mapping.
pub fn rule_providers_value() -> Value {
    let mut mapping = Mapping::new();
    for (name, provider) in rule_providers() {
        mapping.insert(Value::from(name), yaml_value(&provider));
    }
    Value::Mapping(mapping)
}

/// Whether `name` is one of the declared descriptor keys.
pub fn is_rule_set(name: &str) -> bool {
    RULE_SETS.iter().any(|&(key, _, _)| key == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_has_twelve_descriptors_in_order() {
        let providers = rule_providers();
        assert_eq!(providers.len(), 12);
        assert_eq!(providers[0].0, "whitelist_direct");
        assert_eq!(providers[11].0, "telegram");
    }

    #[test]
    fn test_every_descriptor_shares_kind_behavior_interval() {
        for (name, provider) in rule_providers() {
            assert_eq!(provider.kind, "http", "{name}");
            assert_eq!(provider.behavior, "classical", "{name}");
            assert_eq!(provider.interval, 86_400, "{name}");
            assert!(provider.url.starts_with("https://"), "{name}");
            assert!(provider.path.starts_with("./rules/"), "{name}");
        }
    }

    #[test]
    fn test_remote_file_names_that_differ_from_keys() {
        let providers = rule_providers();
        let google_gemini = &providers[2].1;
        assert!(google_gemini.url.ends_with("/google-gemini.list"));
        assert_eq!(google_gemini.path, "./rules/google_gemini.yaml");

        let google_full = &providers[3].1;
        assert!(google_full.url.ends_with("/google.list"));
        assert_eq!(google_full.path, "./rules/google.yaml");

        let whitelist = &providers[0].1;
        assert_eq!(whitelist.path, "./rules/whitelist.yaml");
    }

    #[test]
    fn test_rendered_mapping_preserves_order_and_shape() {
        let value = rule_providers_value();
        let mapping = value.as_mapping().unwrap();
        assert_eq!(mapping.len(), 12);

        let keys: Vec<&str> = mapping.keys().filter_map(Value::as_str).collect();
        assert_eq!(keys[0], "whitelist_direct");
        assert_eq!(keys[1], "greylist_proxy");
        assert_eq!(keys[11], "telegram");

        let telegram = mapping.get("telegram").unwrap();
        assert_eq!(telegram.get("type"), Some(&Value::from("http")));
        assert_eq!(telegram.get("interval"), Some(&Value::from(86_400)));
    }

    #[test]
    fn test_is_rule_set() {
        assert!(is_rule_set("domain_ips"));
        assert!(!is_rule_set("no_such_list"));
    }
}
