//! Port numbers and port expressions.
//!
//! A port expression is either an explicit list (`"22,80,8000-8010"`) or a
//! half-open numeric interval. Both collapse into one sorted set of ports.

use crate::error::{SpecError, SpecResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// A scannable TCP port. Zero is never a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Port(u16);

impl Port {
    pub const MIN: u16 = 1;
    pub const MAX: u16 = 65535;

    #[inline]
    pub const fn new(port: u16) -> Option<Self> {
        match port {
            0 => None,
            p => Some(Self(p)),
        }
    }

    #[inline]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Parse one numeric bound. Errors carry `whole`, the full token it came from.
    fn parse_bound(bound: &str, whole: &str) -> SpecResult<Self> {
        let value: u32 = bound
            .trim()
            .parse()
            .map_err(|_| SpecError::port(whole, "not an integer"))?;
        u16::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| SpecError::port(whole, format!("{value} is not in 1-65535")))
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<u16> for Port {
    type Error = SpecError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| SpecError::port("0", "port 0 is not scannable"))
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> Self {
        port.0
    }
}

/// The deduplicated, ordered set of ports a scan covers.
///
/// Built either by parsing a comma-separated list of ports and inclusive
/// `a-b` ranges, or from half-open bounds with [`PortSpec::from_bounds`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortSpec {
    ports: BTreeSet<Port>,
}

impl PortSpec {
    /// Ports in `[start, end)`. `end` may be 65536 to reach port 65535.
    pub fn from_bounds(start: u32, end: u32) -> SpecResult<Self> {
        let token = format!("{start}-{end}");
        if start < u32::from(Port::MIN) {
            return Err(SpecError::port(token, "start port must be at least 1"));
        }
        if end > u32::from(Port::MAX) + 1 {
            return Err(SpecError::port(token, "end port must be at most 65536"));
        }

        let mut spec = Self::default();
        if start < end {
            // Bounds checked above; both fit in u16.
            spec.insert_span(start as u16..=(end - 1) as u16);
        }
        Ok(spec)
    }

    fn insert_span(&mut self, span: RangeInclusive<u16>) {
        self.ports.extend(span.map(Port));
    }

    /// Ports in ascending order.
    pub fn to_ports(&self) -> Vec<Port> {
        self.ports.iter().copied().collect()
    }

    pub fn count(&self) -> usize {
        self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ports.is_empty()
    }
}

impl FromStr for PortSpec {
    type Err = SpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(SpecError::port(s.trim(), "no ports given"));
        }

        let mut spec = Self::default();
        for token in s.split(',').map(str::trim) {
            if token.is_empty() {
                return Err(SpecError::port(token, "empty port token"));
            }

            let Some((lo, hi)) = token.split_once('-') else {
                spec.ports.insert(Port::parse_bound(token, token)?);
                continue;
            };
            if hi.contains('-') {
                return Err(SpecError::port(token, "a range has exactly two bounds"));
            }
            let (lo, hi) = (Port::parse_bound(lo, token)?, Port::parse_bound(hi, token)?);
            if lo > hi {
                return Err(SpecError::port(token, format!("{lo} is greater than {hi}")));
            }
            spec.insert_span(lo.0..=hi.0);
        }
        Ok(spec)
    }
}
