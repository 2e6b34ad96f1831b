//! Scan plans: the concrete (host, port) work items of one invocation.

use super::port::{Port, PortSpec};
use super::target::expand_targets;
use crate::error::SpecResult;
use std::fmt;

/// One (host, port) pair scheduled for a connect attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkItem {
    host: String,
    port: Port,
}

impl WorkItem {
    pub fn new(host: impl Into<String>, port: Port) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// The host as given by the user or produced by CIDR expansion.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Port {
        self.port
    }
}

impl fmt::Display for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Ordered work items: target-major, port-minor, every pair exactly once.
#[derive(Debug, Clone, Default)]
pub struct ScanPlan {
    targets: Vec<String>,
    ports: Vec<Port>,
}

impl ScanPlan {
    /// Build a plan from already-expanded hosts and a port specification.
    pub fn new(targets: Vec<String>, ports: &PortSpec) -> Self {
        Self {
            targets,
            ports: ports.to_ports(),
        }
    }

    /// Parse a target expression and a port specification into a plan.
    ///
    /// Both inputs are fully validated before anything is returned.
    pub fn parse(targets: &str, ports: &PortSpec) -> SpecResult<Self> {
        Ok(Self::new(expand_targets(targets)?, ports))
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn ports(&self) -> &[Port] {
        &self.ports
    }

    /// Total number of work items.
    pub fn len(&self) -> usize {
        self.targets.len() * self.ports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = WorkItem> + '_ {
        self.targets
            .iter()
            .flat_map(move |host| self.ports.iter().map(move |&port| WorkItem::new(host.clone(), port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpecError;

    #[test]
    fn test_target_major_port_minor_order() {
        let ports: PortSpec = "443,22".parse().unwrap();
        let plan = ScanPlan::parse("10.0.0.1,10.0.0.2", &ports).unwrap();
        let items: Vec<String> = plan.iter().map(|w| w.to_string()).collect();
        assert_eq!(
            items,
            vec!["10.0.0.1:22", "10.0.0.1:443", "10.0.0.2:22", "10.0.0.2:443"]
        );
        assert_eq!(plan.len(), 4);
    }

    #[test]
    fn test_empty_inputs_yield_no_items() {
        let no_ports = PortSpec::from_bounds(10, 10).unwrap();
        let plan = ScanPlan::parse("127.0.0.1", &no_ports).unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.iter().count(), 0);

        let ports: PortSpec = "80".parse().unwrap();
        assert!(ScanPlan::parse("", &ports).unwrap().is_empty());
    }

    #[test]
    fn test_bad_target_produces_no_plan() {
        let ports: PortSpec = "80".parse().unwrap();
        let err = ScanPlan::parse("10.0.0.1,300.0.0.1", &ports).unwrap_err();
        assert!(matches!(err, SpecError::InvalidTarget { .. }));
    }
}
