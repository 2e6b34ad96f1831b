//! Prober trait abstraction and the result record it produces.
//!
//! The engine only knows how to schedule work; what one attempt does is
//! behind [`Prober`], so tests can swap in instrumented implementations.

use crate::error::ConnectError;
use crate::types::WorkItem;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A confirmed-open endpoint.
///
/// Only created after a successful connect; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScanResult {
    /// Host as given in the work item (address or hostname).
    pub ip: String,
    pub port: u16,
    /// Classified service label.
    pub service: String,
    /// Sanitised initial bytes from the service; may be empty.
    pub banner: String,
}

impl ScanResult {
    pub fn new(
        ip: impl Into<String>,
        port: u16,
        service: impl Into<String>,
        banner: impl Into<String>,
    ) -> Self {
        Self {
            ip: ip.into(),
            port,
            service: service.into(),
            banner: banner.into(),
        }
    }
}

/// One bounded connect-and-read attempt.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Attempt `item`; `Ok` means the port accepted a connection.
    async fn probe(&self, item: &WorkItem) -> Result<ScanResult, ConnectError>;
}
