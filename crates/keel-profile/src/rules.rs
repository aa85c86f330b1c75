//! The static routing rule table.
//!
//! Order is load-bearing: the routing engine evaluates first-match-wins, so
//! the table is emitted exactly as declared here and terminated by the
//! catch-all default route.

use std::fmt;

use crate::groups::{DIRECT, PRIORITY_GROUP, SELECTOR_GROUP};

/// Built-in blackhole outbound.
const REJECT: &str = "REJECT";

/// One directive consumed by the routing engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRule {
    /// Drop QUIC-style UDP traffic to the given destination port.
    RejectUdpPort(u16),
    /// Route everything matched by a named remote rule set. `no_resolve`
    /// suppresses DNS resolution before matching, for IP-based sets.
    RuleSet {
        set: &'static str,
        target: &'static str,
        no_resolve: bool,
    },
    /// Route a whole domain suffix.
    DomainSuffix {
        suffix: &'static str,
        target: &'static str,
    },
    /// Route by GeoIP country of the destination address.
    GeoIp {
        country: &'static str,
        target: &'static str,
    },
    /// Catch-all applied when nothing above matched. Must come last.
    Default { target: &'static str },
}

impl fmt::Display for RouteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteRule::RejectUdpPort(port) => {
                write!(f, "AND,((NETWORK,UDP),(DST-PORT,{port})),{REJECT}")
            }
            RouteRule::RuleSet {
                set,
                target,
                no_resolve,
            } => {
                write!(f, "RULE-SET,{set},{target}")?;
                if *no_resolve {
                    write!(f, ",no-resolve")?;
                }
                Ok(())
            }
            RouteRule::DomainSuffix { suffix, target } => {
                write!(f, "DOMAIN-SUFFIX,{suffix},{target}")
            }
            RouteRule::GeoIp { country, target } => write!(f, "GEOIP,{country},{target}"),
            RouteRule::Default { target } => write!(f, "MATCH,{target}"),
        }
    }
}

/// Shorthand for a plain rule-set reference.
const fn rule_set(set: &'static str, target: &'static str) -> RouteRule {
    RouteRule::RuleSet {
        set,
        target,
        no_resolve: false,
    }
}

/// Shorthand for an IP rule-set reference matched without DNS resolution.
const fn rule_set_no_resolve(set: &'static str, target: &'static str) -> RouteRule {
    RouteRule::RuleSet {
        set,
        target,
        no_resolve: true,
    }
}

/// The full rule table, in evaluation order.
pub fn routing_rules() -> Vec<RouteRule> {
    vec![
        RouteRule::RejectUdpPort(443),
        RouteRule::RejectUdpPort(853),
        rule_set("whitelist_direct", DIRECT),
        rule_set("greylist_proxy", SELECTOR_GROUP),
        rule_set("google_gemini", PRIORITY_GROUP),
        rule_set("google_full", PRIORITY_GROUP),
        rule_set_no_resolve("gemini_ip", PRIORITY_GROUP),
        rule_set("youtube", PRIORITY_GROUP),
        rule_set("youtubemusic", PRIORITY_GROUP),
        rule_set("microsoft", SELECTOR_GROUP),
        rule_set("domains_community", SELECTOR_GROUP),
        rule_set_no_resolve("domain_ips", SELECTOR_GROUP),
        rule_set("voice_ports", SELECTOR_GROUP),
        rule_set("telegram", SELECTOR_GROUP),
        RouteRule::DomainSuffix {
            suffix: "ru",
            target: DIRECT,
        },
        RouteRule::DomainSuffix {
            suffix: "рф",
            target: DIRECT,
        },
        RouteRule::DomainSuffix {
            suffix: "su",
            target: DIRECT,
        },
        RouteRule::GeoIp {
            country: "RU",
            target: DIRECT,
        },
        RouteRule::Default {
            target: SELECTOR_GROUP,
        },
    ]
}

/// The rule table rendered to directive strings.
pub fn rendered_rules() -> Vec<String> {
    routing_rules().iter().map(RouteRule::to_string).collect()
}
