//! Static baseline settings applied to every generated profile.
//!
//! Pure assignment: ports, run mode, and the `tun`/`dns` blocks. Values
//! already present in the base document are overwritten.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::yaml_value;

/// HTTP proxy listener port.
pub const HTTP_PORT: u16 = 7890;
/// SOCKS proxy listener port.
pub const SOCKS_PORT: u16 = 7891;

/// Tunnel device settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TunSettings {
    pub enable: bool,
    pub stack: String,
    pub dns_hijack: Vec<String>,
    pub auto_route: bool,
    pub auto_detect_interface: bool,
}

impl Default for TunSettings {
    fn default() -> Self {
        Self {
            enable: true,
            stack: "system".to_string(),
            dns_hijack: vec!["any:53".to_string()],
            auto_route: true,
            auto_detect_interface: true,
        }
    }
}

/// DNS interception mode used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DnsMode {
    /// Synthetic addresses, resolved for real at connect time.
    FakeIp,
    RedirHost,
    Normal,
}

/// Resolver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct DnsSettings {
    pub enable: bool,
    pub listen: String,
    pub ipv6: bool,
    pub enhanced_mode: DnsMode,
    pub fake_ip_range: String,
    pub fake_ip_filter: Vec<String>,
    pub nameserver: Vec<String>,
    pub fallback: Vec<String>,
}

impl Default for DnsSettings {
    fn default() -> Self {
        Self {
            enable: true,
            listen: "0.0.0.0:1053".to_string(),
            ipv6: false,
            enhanced_mode: DnsMode::FakeIp,
            fake_ip_range: "198.18.0.1/16".to_string(),
            fake_ip_filter: vec!["*".to_string(), "+.lan".to_string(), "+.local".to_string()],
            nameserver: vec![
                "https://1.1.1.1/dns-query".to_string(),
                "https://8.8.8.8/dns-query".to_string(),
            ],
            fallback: vec![
                "https://8.8.8.8/dns-query".to_string(),
                "https://94.140.14.14/dns-query".to_string(),
            ],
        }
    }
}

/// Write the baseline scalars and the `tun`/`dns` blocks into `profile`.
pub fn apply(profile: &mut Mapping) {
    profile.insert(Value::from("port"), Value::from(HTTP_PORT));
    profile.insert(Value::from("socks-port"), Value::from(SOCKS_PORT));
    profile.insert(Value::from("allow-lan"), Value::from(false));
    profile.insert(Value::from("mode"), Value::from("rule"));
    profile.insert(Value::from("log-level"), Value::from("info"));
    profile.insert(Value::from("ipv6"), Value::from(false));

    profile.insert(Value::from("tun"), yaml_value(&TunSettings::default()));
    profile.insert(Value::from("dns"), yaml_value(&DnsSettings::default()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sets_scalar_baseline() {
        let mut profile = Mapping::new();
        apply(&mut profile);

        assert_eq!(profile.get("port"), Some(&Value::from(7890)));
        assert_eq!(profile.get("socks-port"), Some(&Value::from(7891)));
        assert_eq!(profile.get("allow-lan"), Some(&Value::from(false)));
        assert_eq!(profile.get("mode"), Some(&Value::from("rule")));
        assert_eq!(profile.get("log-level"), Some(&Value::from("info")));
        assert_eq!(profile.get("ipv6"), Some(&Value::from(false)));
    }

    #[test]
    fn test_apply_overwrites_existing_values() {
        let mut profile = Mapping::new();
        profile.insert(Value::from("mode"), Value::from("global"));
        apply(&mut profile);
        assert_eq!(profile.get("mode"), Some(&Value::from("rule")));
    }

    #[test]
    fn test_tun_block_uses_kebab_case_keys() {
        let tun = yaml_value(&TunSettings::default());
        assert_eq!(tun.get("stack"), Some(&Value::from("system")));
        assert_eq!(
            tun.get("dns-hijack"),
            Some(&Value::Sequence(vec![Value::from("any:53")]))
        );
        assert_eq!(tun.get("auto-route"), Some(&Value::from(true)));
        assert_eq!(tun.get("auto-detect-interface"), Some(&Value::from(true)));
    }

    #[test]
    fn test_dns_block_defaults() {
        let dns = yaml_value(&DnsSettings::default());
        assert_eq!(dns.get("enhanced-mode"), Some(&Value::from("fake-ip")));
        assert_eq!(dns.get("fake-ip-range"), Some(&Value::from("198.18.0.1/16")));
        assert_eq!(dns.get("listen"), Some(&Value::from("0.0.0.0:1053")));

        let nameserver = dns.get("nameserver").and_then(Value::as_sequence).unwrap();
        assert_eq!(nameserver.len(), 2);
        assert_eq!(nameserver[0], Value::from("https://1.1.1.1/dns-query"));
    }
}
