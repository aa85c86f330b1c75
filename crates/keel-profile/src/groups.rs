//! Proxy selection groups.
//!
//! Three groups are produced for every profile: a manual top-level selector
//! and two latency-probed groups. The probed groups carry their candidates
//! either as an explicit member list (proxies known at generation time) or as
//! a provider reference plus name filter the client evaluates at runtime.

use serde::Serialize;
use tracing::debug;

use crate::roster::Roster;

/// Top-level selector the rule table routes through by default.
pub const SELECTOR_GROUP: &str = "PROXY";
/// Low-latency pick among priority-region proxies.
pub const PRIORITY_GROUP: &str = "GOOGLE";
/// Latency-best pick among all clean proxies.
pub const CATCH_ALL_GROUP: &str = "AUTO-MAIN";

/// Built-in direct-connect outbound.
pub const DIRECT: &str = "DIRECT";

/// Health probe endpoint used by the latency-tested groups.
pub const PROBE_URL: &str = "http://www.gstatic.com/generate_204";

const PRIORITY_PROBE_INTERVAL_SECS: u64 = 300;
const PRIORITY_PROBE_TOLERANCE_MS: u64 = 50;
const CATCH_ALL_PROBE_INTERVAL_SECS: u64 = 600;
const CATCH_ALL_PROBE_TOLERANCE_MS: u64 = 100;

/// Runtime name filter equivalent to the priority-region classification.
/// Evaluated by the client's regexp engine, not by this crate.
const PRIORITY_FILTER: &str = r"(?i)(Netherlands\(R\)|UAE).*Vless";

/// Runtime name filter equivalent to the clean-proxy classification. The
/// negative lookahead is supported by the client's regexp engine.
const CLEAN_FILTER: &str = r"(?i)^(?!.*(Russia|Belarus|Ukraine)).*Vless.*$";

/// Where a group's candidate proxies come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProxySource {
    /// Explicit ordered member list, fixed at generation time.
    Members { proxies: Vec<String> },
    /// Candidates supplied by an external provider at runtime, narrowed by a
    /// name filter.
    Provider {
        #[serde(rename = "use")]
        providers: Vec<String>,
        filter: String,
    },
}

/// Group selection behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GroupKind {
    /// Manual choice, remembered by the client.
    Select,
    /// Periodic latency probe picking the fastest candidate.
    UrlTest,
}

/// A named selector resolving to one concrete upstream at routing time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProxyGroup {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: GroupKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tolerance: Option<u64>,
    #[serde(flatten)]
    pub source: ProxySource,
}

impl ProxyGroup {
    /// Manual selector over fixed members.
    fn selector(name: &str, members: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            kind: GroupKind::Select,
            url: None,
            interval: None,
            tolerance: None,
            source: ProxySource::Members { proxies: members },
        }
    }

    /// Latency-probed group over the given candidate source.
    fn latency_probe(name: &str, interval: u64, tolerance: u64, source: ProxySource) -> Self {
        Self {
            name: name.to_string(),
            kind: GroupKind::UrlTest,
            url: Some(PROBE_URL.to_string()),
            interval: Some(interval),
            tolerance: Some(tolerance),
            source,
        }
    }
}

/// Candidate source for a probed group: explicit members when any are known,
/// otherwise a reference to the first declared provider (empty reference
/// list when none is declared) with the equivalent runtime filter.
fn source_for(members: &[String], provider: Option<&str>, filter: &str) -> ProxySource {
    if members.is_empty() {
        debug!(?provider, filter, "no inline candidates, deferring to provider");
        ProxySource::Provider {
            providers: provider.map(|name| vec![name.to_string()]).unwrap_or_default(),
            filter: filter.to_string(),
        }
    } else {
        ProxySource::Members {
            proxies: members.to_vec(),
        }
    }
}

/// Build the three groups for a profile, in emission order.
pub fn proxy_groups(roster: &Roster, provider: Option<&str>) -> Vec<ProxyGroup> {
    let selector = ProxyGroup::selector(
        SELECTOR_GROUP,
        vec![
            CATCH_ALL_GROUP.to_string(),
            PRIORITY_GROUP.to_string(),
            DIRECT.to_string(),
        ],
    );

    let priority = ProxyGroup::latency_probe(
        PRIORITY_GROUP,
        PRIORITY_PROBE_INTERVAL_SECS,
        PRIORITY_PROBE_TOLERANCE_MS,
        source_for(roster.priority_or_all(), provider, PRIORITY_FILTER),
    );

    let catch_all = ProxyGroup::latency_probe(
        CATCH_ALL_GROUP,
        CATCH_ALL_PROBE_INTERVAL_SECS,
        CATCH_ALL_PROBE_TOLERANCE_MS,
        source_for(roster.names(), provider, CLEAN_FILTER),
    );

    vec![selector, priority, catch_all]
}
