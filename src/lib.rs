//! # portsweep - a concurrent TCP reachability scanner
//!
//! portsweep expands a target expression and a port expression into a scan
//! plan, attempts a TCP connect to every (host, port) pair under a bounded
//! concurrency limit, reads a short banner from each open port, and labels
//! the service behind it.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use portsweep::invoke::{run, Invocation};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let invocation = Invocation::new("192.168.1.0/30")
//!         .with_ports("22,80,443")
//!         .with_timeout(Duration::from_millis(300));
//!
//!     let report = run(&invocation).await.unwrap();
//!     for result in report.results.sorted() {
//!         println!("{}:{} - {}", result.ip, result.port, result.service);
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - port/target parsing and the scan plan
//! - [`services`] - port table and banner keyword classification
//! - [`scanner`] - the bounded-concurrency engine and the TCP prober
//! - [`aggregator`] - channel-backed result collection
//! - [`output`] - JSON/CSV export and terminal output
//! - [`invoke`] - the single entry point for CLI and embedding callers
//! - [`config`] - engine tunables and the settings file
//! - [`error`] - error types

pub mod aggregator;
pub mod banner;
pub mod cli;
pub mod config;
pub mod error;
pub mod invoke;
pub mod output;
pub mod scanner;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use aggregator::ResultSet;
pub use error::{ConnectError, ExportError, InvokeError, SpecError};
pub use invoke::{Invocation, ScanReport};
pub use scanner::{Prober, ScanEngine, ScanResult, TcpConnectProber};
pub use services::classify;
pub use types::{Port, PortSpec, ScanPlan, TargetSpec, WorkItem};
