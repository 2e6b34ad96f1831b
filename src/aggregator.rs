//! Result aggregation for concurrent scan workers.
//!
//! Workers hold a cloned [`ResultSender`] and push each [`ScanResult`] over
//! a channel; a single task owns the growing vector. The [`ResultSet`] can
//! only be obtained from [`Aggregator::finish`], which waits for every sender
//! to be dropped, so no one can observe a half-finished scan.

use crate::scanner::ScanResult;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Write half handed to scan workers.
#[derive(Debug, Clone)]
pub struct ResultSender {
    tx: mpsc::UnboundedSender<ScanResult>,
}

impl ResultSender {
    /// Append one result. Appends are atomic with respect to other workers.
    pub fn send(&self, result: ScanResult) {
        // The receiver lives until every sender is gone, so this cannot fail
        // while a worker still holds `self`.
        let _ = self.tx.send(result);
    }
}

/// Single-writer collector task.
#[derive(Debug)]
pub struct Aggregator {
    handle: JoinHandle<Vec<ScanResult>>,
}

impl Aggregator {
    /// Spawn the collector and return it along with the first sender.
    pub fn spawn() -> (Self, ResultSender) {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move {
            let mut results = Vec::new();
            while let Some(result) = rx.recv().await {
                results.push(result);
            }
            results
        });
        (Self { handle }, ResultSender { tx })
    }

    /// Wait for all senders to drop and return the collected results.
    pub async fn finish(self) -> ResultSet {
        match self.handle.await {
            Ok(results) => ResultSet(results),
            Err(e) => {
                tracing::error!(error = %e, "result aggregator task failed");
                ResultSet::default()
            }
        }
    }
}

/// All results of one scan, in completion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultSet(Vec<ScanResult>);

impl ResultSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScanResult> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ScanResult] {
        &self.0
    }

    /// Copy of the results ordered by host then port, for display.
    pub fn sorted(&self) -> Vec<ScanResult> {
        let mut results = self.0.clone();
        results.sort_by(|a, b| {
            host_key(&a.ip)
                .cmp(&host_key(&b.ip))
                .then(a.port.cmp(&b.port))
        });
        results
    }

    pub fn into_vec(self) -> Vec<ScanResult> {
        self.0
    }
}

/// Addresses order numerically; hostnames come first, by name.
fn host_key(host: &str) -> (Option<IpAddr>, &str) {
    (host.parse().ok(), host)
}

impl From<Vec<ScanResult>> for ResultSet {
    fn from(results: Vec<ScanResult>) -> Self {
        Self(results)
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ScanResult;
    type IntoIter = std::slice::Iter<'a, ScanResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
