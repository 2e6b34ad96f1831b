//! Target specification parsing and expansion.
//!
//! Accepts:
//! - Single IP addresses ("192.168.1.1")
//! - Hostnames ("scanme.example"), passed through unresolved
//! - CIDR blocks ("192.168.1.0/24"), expanded to usable hosts
//! - Comma-separated lists of any of the above

use crate::error::{SpecError, SpecResult};
use ipnetwork::IpNetwork;
use std::collections::HashSet;
use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

/// One entry of a target expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSpec {
    /// A single IP address.
    Single(IpAddr),
    /// A CIDR network range.
    Cidr(IpNetwork),
    /// A hostname, resolved later by the connect layer.
    Hostname(String),
}

impl TargetSpec {
    /// Maximum number of addresses allowed in a CIDR block (/16 for IPv4).
    pub const MAX_CIDR_HOSTS: u128 = 65536;

    /// Parse a single target token.
    pub fn parse(s: &str) -> SpecResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(SpecError::target(s, "empty target"));
        }

        if let Ok(ip) = s.parse::<IpAddr>() {
            return Ok(Self::Single(ip));
        }

        if s.contains('/') {
            let parsed: IpNetwork = s
                .parse()
                .map_err(|e| SpecError::target(s, format!("invalid CIDR block: {e}")))?;
            // Host bits are allowed; normalise to the enclosing network.
            let network = IpNetwork::new(parsed.network(), parsed.prefix())
                .map_err(|e| SpecError::target(s, format!("invalid CIDR block: {e}")))?;

            let size = block_size(&network);
            if size > Self::MAX_CIDR_HOSTS {
                return Err(SpecError::target(
                    s,
                    format!("block holds {size} addresses (max {})", Self::MAX_CIDR_HOSTS),
                ));
            }
            return Ok(Self::Cidr(network));
        }

        if is_valid_hostname(s) {
            return Ok(Self::Hostname(s.to_string()));
        }

        Err(SpecError::target(s, "not an IP address, CIDR block, or hostname"))
    }

    /// Expand into literal host strings.
    ///
    /// Network and broadcast addresses are excluded for IPv4 prefixes shorter
    /// than /31. A /31 yields both addresses (point-to-point link) and a /32
    /// yields its single address.
    pub fn hosts(&self) -> Vec<String> {
        match self {
            Self::Single(ip) => vec![ip.to_string()],
            Self::Hostname(name) => vec![name.clone()],
            Self::Cidr(network) => network
                .iter()
                .filter(|ip| match (network, ip) {
                    (IpNetwork::V4(net), IpAddr::V4(addr)) if net.prefix() < 31 => {
                        *addr != net.network() && *addr != net.broadcast()
                    }
                    _ => true,
                })
                .map(|ip| ip.to_string())
                .collect(),
        }
    }
}

impl FromStr for TargetSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(ip) => write!(f, "{}", ip),
            Self::Cidr(network) => write!(f, "{}", network),
            Self::Hostname(hostname) => write!(f, "{}", hostname),
        }
    }
}

/// Expand a full target expression into an ordered, deduplicated host list.
///
/// A blank expression yields no hosts.
pub fn expand_targets(expr: &str) -> SpecResult<Vec<String>> {
    if expr.trim().is_empty() {
        return Ok(Vec::new());
    }

    let specs = expr
        .split(',')
        .map(TargetSpec::parse)
        .collect::<SpecResult<Vec<_>>>()?;

    let mut seen = HashSet::new();
    Ok(specs
        .iter()
        .flat_map(TargetSpec::hosts)
        .filter(|host| seen.insert(host.clone()))
        .collect())
}

fn block_size(network: &IpNetwork) -> u128 {
    let (bits, prefix) = match network {
        IpNetwork::V4(net) => (32, u32::from(net.prefix())),
        IpNetwork::V6(net) => (128, u32::from(net.prefix())),
    };
    match bits - prefix {
        128 => u128::MAX,
        host_bits => 1u128 << host_bits,
    }
}

/// Check if a string is a syntactically valid hostname.
fn is_valid_hostname(s: &str) -> bool {
    if s.len() > 253 {
        return false;
    }

    // Dotted numbers that failed to parse as an address are a typo'd IP.
    if s.split('.').all(|label| !label.is_empty() && label.chars().all(|c| c.is_ascii_digit())) {
        return false;
    }

    s.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.starts_with(|c: char| c.is_ascii_alphanumeric())
            && label.ends_with(|c: char| c.is_ascii_alphanumeric())
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_and_hostname() {
        assert!(matches!(
            TargetSpec::parse("192.168.1.1").unwrap(),
            TargetSpec::Single(IpAddr::V4(_))
        ));
        assert!(matches!(
            TargetSpec::parse("example.com").unwrap(),
            TargetSpec::Hostname(_)
        ));
        assert!(matches!(
            TargetSpec::parse("localhost").unwrap(),
            TargetSpec::Hostname(_)
        ));
    }

    #[test]
    fn test_cidr_30_excludes_network_and_broadcast() {
        let hosts = expand_targets("192.168.1.0/30").unwrap();
        assert_eq!(hosts, vec!["192.168.1.1", "192.168.1.2"]);
    }

    #[test]
    fn test_cidr_31_includes_both_addresses() {
        let hosts = expand_targets("10.0.0.0/31").unwrap();
        assert_eq!(hosts, vec!["10.0.0.0", "10.0.0.1"]);
    }

    #[test]
    fn test_cidr_32_is_single_host() {
        let hosts = expand_targets("10.0.0.7/32").unwrap();
        assert_eq!(hosts, vec!["10.0.0.7"]);
    }

    #[test]
    fn test_cidr_host_bits_are_normalised() {
        let hosts = expand_targets("192.168.1.5/30").unwrap();
        assert_eq!(hosts, vec!["192.168.1.5", "192.168.1.6"]);
    }

    #[test]
    fn test_comma_list_trimmed_and_deduplicated() {
        let hosts = expand_targets(" 10.0.0.2 ,example.com, 10.0.0.2").unwrap();
        assert_eq!(hosts, vec!["10.0.0.2", "example.com"]);
    }

    #[test]
    fn test_blank_expression_is_empty() {
        assert!(expand_targets("   ").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_targets_rejected() {
        for bad in ["256.1.1.1", "10.0.0.0/33", "bad_host!", "10.0.0.1,,10.0.0.2", "-lead.com", "10.0.0.0/8"] {
            let err = expand_targets(bad).unwrap_err();
            assert!(matches!(err, SpecError::InvalidTarget { .. }), "{bad} should be rejected");
        }
    }
}
