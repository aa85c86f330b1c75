//! The profile overlay: one linear pass over a base profile mapping.

use serde_yaml::{Mapping, Value};
use tracing::debug;

use crate::roster::Roster;
use crate::{baseline, groups, providers, rules, yaml_value};

/// Apply the overlay to `profile` in place.
///
/// Total over any mapping: absent or malformed `proxies` and
/// `proxy-providers` sections degrade to empty collections, never errors.
/// Keys the overlay does not own are left untouched.
pub fn apply(profile: &mut Mapping) {
    baseline::apply(profile);

    profile.insert(
        Value::from("rule-providers"),
        providers::rule_providers_value(),
    );

    let roster = Roster::from_profile(profile);
    let provider = first_provider_name(profile);
    let groups = groups::proxy_groups(&roster, provider.as_deref());

    // Keep the filtered list only when it kept anything; otherwise the
    // original section (possibly absent) stays and providers supply proxies
    // at runtime.
    if !roster.is_empty() {
        profile.insert(
            Value::from("proxies"),
            Value::Sequence(roster.entries().to_vec()),
        );
    }

    profile.insert(Value::from("proxy-groups"), yaml_value(&groups));
    profile.insert(
        Value::from("rules"),
        Value::Sequence(rules::rendered_rules().into_iter().map(Value::from).collect()),
    );

    debug!(
        proxies = roster.names().len(),
        provider_mode = roster.is_empty(),
        "profile overlay applied"
    );
}

/// By-value form of [`apply`].
pub fn transform(mut profile: Mapping) -> Mapping {
    apply(&mut profile);
    profile
}

/// First key under `proxy-providers`, when the section is a mapping with a
/// string key. Anything else means no usable provider.
fn first_provider_name(profile: &Mapping) -> Option<String> {
    profile
        .get("proxy-providers")
        .and_then(Value::as_mapping)
        .and_then(|mapping| mapping.keys().next())
        .and_then(Value::as_str)
        .map(str::to_string)
}
