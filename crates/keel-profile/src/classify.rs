//! Ingestion-time classification of proxy entry names.
//!
//! Upstream subscriptions encode protocol and region in the free-text `name`
//! field. Each name is classified exactly once, when the entry is read from
//! the base profile; everything downstream works on the resulting attributes
//! instead of re-matching strings.

use once_cell::sync::Lazy;
use regex::Regex;

/// Entries must carry this protocol marker to be kept.
static VLESS_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)vless").unwrap());

/// Entries from these regions are always dropped.
static EXCLUDED_REGION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)russia|belarus|ukraine").unwrap());

/// Regions preferred for the latency-sensitive group. The `(R)` suffix is a
/// literal tag used by the subscription, not a pattern.
static PRIORITY_REGION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)netherlands\(r\)|uae").unwrap());

/// Region attribute derived from a proxy's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionClass {
    /// Carries an excluded-region marker; never kept.
    Excluded,
    /// Carries a priority-region marker.
    Priority,
    /// No recognized region marker.
    Unmarked,
}

/// Structured attributes for one proxy entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProxyClass {
    /// Name carries the VLESS protocol marker.
    pub vless: bool,
    pub region: RegionClass,
}

impl ProxyClass {
    /// Kept by the filter: right protocol, not an excluded region.
    pub fn is_clean(self) -> bool {
        self.vless && self.region != RegionClass::Excluded
    }

    pub fn is_priority(self) -> bool {
        self.region == RegionClass::Priority
    }
}

/// Classify a proxy display name. Exclusion takes precedence over priority,
/// so a name carrying both markers is dropped.
pub fn classify(name: &str) -> ProxyClass {
    let region = if EXCLUDED_REGION.is_match(name) {
        RegionClass::Excluded
    } else if PRIORITY_REGION.is_match(name) {
        RegionClass::Priority
    } else {
        RegionClass::Unmarked
    };

    ProxyClass {
        vless: VLESS_MARKER.is_match(name),
        region,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vless_marker_is_case_insensitive() {
        assert!(classify("US-Vless-1").vless);
        assert!(classify("us-VLESS-2").vless);
        assert!(classify("vless tokyo").vless);
        assert!(!classify("US-Trojan-1").vless);
        assert!(!classify("").vless);
    }

    #[test]
    fn test_excluded_regions() {
        assert_eq!(classify("Russia-Vless-2").region, RegionClass::Excluded);
        assert_eq!(classify("belarus-vless").region, RegionClass::Excluded);
        assert_eq!(classify("UKRAINE-VLESS").region, RegionClass::Excluded);
        assert_eq!(classify("US-Vless-1").region, RegionClass::Unmarked);
    }

    #[test]
    fn test_priority_regions() {
        assert_eq!(
            classify("Netherlands(R)-Vless-3").region,
            RegionClass::Priority
        );
        assert_eq!(classify("UAE-Vless-7").region, RegionClass::Priority);
        // Plain "Netherlands" without the (R) tag is not a priority marker.
        assert_eq!(classify("Netherlands-Vless-4").region, RegionClass::Unmarked);
    }

    #[test]
    fn test_exclusion_beats_priority() {
        let class = classify("Russia-UAE-Vless");
        assert_eq!(class.region, RegionClass::Excluded);
        assert!(!class.is_clean());
    }

    #[test]
    fn test_clean_requires_both_attributes() {
        assert!(classify("Netherlands(R)-Vless-3").is_clean());
        assert!(!classify("Netherlands(R)-Trojan-3").is_clean());
        assert!(!classify("Ukraine-Vless-9").is_clean());
    }
}
