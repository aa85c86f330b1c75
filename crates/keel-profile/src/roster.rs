//! Clean-proxy roster assembled from a base profile.

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::classify::classify;

/// Proxy entries that survive filtering, in input order, with their names
/// and the priority subset precomputed at ingestion time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    entries: Vec<Value>,
    names: Vec<String>,
    priority: Vec<String>,
}

impl Roster {
    /// Read and filter the `proxies` section of a profile. A missing or
    /// malformed section yields an empty roster.
    pub fn from_profile(profile: &Mapping) -> Self {
        let raw = profile
            .get("proxies")
            .and_then(Value::as_sequence)
            .map(Vec::as_slice)
            .unwrap_or_default();
        Self::from_entries(raw)
    }

    /// Filter raw proxy entries. Entries without a string `name` never match
    /// the protocol marker and drop out; kept entries are cloned unmodified.
    pub fn from_entries(raw: &[Value]) -> Self {
        let mut roster = Roster::default();

        for entry in raw {
            let name = entry.get("name").and_then(Value::as_str).unwrap_or("");
            let class = classify(name);
            if !class.is_clean() {
                continue;
            }
            if class.is_priority() {
                roster.priority.push(name.to_string());
            }
            roster.names.push(name.to_string());
            roster.entries.push(entry.clone());
        }

        debug!(
            kept = roster.names.len(),
            dropped = raw.len() - roster.names.len(),
            priority = roster.priority.len(),
            "filtered proxy list"
        );
        roster
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Filtered entries, ready to replace the profile's `proxies` section.
    pub fn entries(&self) -> &[Value] {
        &self.entries
    }

    /// Names of every clean proxy, in input order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Priority-region names, falling back to every clean name when no entry
    /// carries a priority marker. Empty only when the roster itself is empty.
    pub fn priority_or_all(&self) -> &[String] {
        if self.priority.is_empty() {
            &self.names
        } else {
            &self.priority
        }
    }
}
