//! The single entry point used by the CLI and by embedding front-ends.
//!
//! An [`Invocation`] carries the raw target and port strings. They are
//! validated in full before any socket is opened; a bad token aborts the
//! whole run with nothing scanned.

use crate::aggregator::ResultSet;
use crate::config::{ScanConfig, DEFAULT_BANNER_TIMEOUT, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT};
use crate::error::{ExportError, InvokeError};
use crate::output::export_to_path;
use crate::scanner::{ScanEngine, TcpConnectProber};
use crate::types::{PortSpec, ScanId, ScanPlan};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{info, info_span, warn, Instrument};

/// Everything a caller supplies for one scan.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Target expression: addresses, hostnames, CIDR blocks, comma-separated.
    pub targets: String,
    /// Explicit port specification; when absent or blank the numeric range is used.
    pub ports: Option<String>,
    /// First port of the numeric range (inclusive).
    pub start_port: u32,
    /// End of the numeric range (exclusive).
    pub end_port: u32,
    pub concurrency: usize,
    pub timeout: Duration,
    pub banner_timeout: Duration,
    /// Export destination; `.json` or `.csv`.
    pub output: Option<PathBuf>,
    /// Show a progress bar on stderr while scanning.
    pub progress: bool,
}

impl Invocation {
    pub fn new(targets: impl Into<String>) -> Self {
        Self {
            targets: targets.into(),
            ports: None,
            start_port: 1,
            end_port: 65535,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: DEFAULT_TIMEOUT,
            banner_timeout: DEFAULT_BANNER_TIMEOUT,
            output: None,
            progress: false,
        }
    }

    pub fn with_ports(mut self, ports: impl Into<String>) -> Self {
        self.ports = Some(ports.into());
        self
    }

    pub fn with_range(mut self, start: u32, end: u32) -> Self {
        self.start_port = start;
        self.end_port = end;
        self
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_banner_timeout(mut self, banner_timeout: Duration) -> Self {
        self.banner_timeout = banner_timeout;
        self
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn with_progress(mut self) -> Self {
        self.progress = true;
        self
    }

    /// Resolve the port set: explicit spec if given, otherwise `[start, end)`.
    pub fn port_spec(&self) -> Result<PortSpec, InvokeError> {
        let spec = match self.ports.as_deref().map(str::trim) {
            Some(explicit) if !explicit.is_empty() => explicit.parse::<PortSpec>()?,
            _ => PortSpec::from_bounds(self.start_port, self.end_port)?,
        };
        Ok(spec)
    }

    /// Validate everything and build the plan and engine configuration.
    pub fn prepare(&self) -> Result<(ScanPlan, ScanConfig), InvokeError> {
        let ports = self.port_spec()?;
        let plan = ScanPlan::parse(&self.targets, &ports)?;
        let config = ScanConfig::new(self.concurrency, self.timeout)?
            .with_banner_timeout(self.banner_timeout)?;
        Ok((plan, config))
    }
}

/// Outcome of a completed scan.
#[derive(Debug)]
pub struct ScanReport {
    pub id: ScanId,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub hosts: usize,
    pub ports: usize,
    pub work_items: usize,
    pub results: ResultSet,
    /// Set when the scan finished but writing the export file failed.
    pub export_error: Option<ExportError>,
}

impl ScanReport {
    /// 0 for a completed scan with or without results, 1 if the export failed.
    pub fn exit_code(&self) -> i32 {
        if self.export_error.is_some() {
            1
        } else {
            0
        }
    }
}

/// Run a scan to completion.
pub async fn run(invocation: &Invocation) -> Result<ScanReport, InvokeError> {
    run_with_cancel(invocation, CancellationToken::new()).await
}

/// Run a scan that stops submitting new attempts once `cancel` fires.
pub async fn run_with_cancel(
    invocation: &Invocation,
    cancel: CancellationToken,
) -> Result<ScanReport, InvokeError> {
    let (plan, config) = invocation.prepare()?;
    let id = ScanId::new();
    let span = info_span!("scan", id = %id.short());

    async move {
        info!(
            hosts = plan.targets().len(),
            ports = plan.ports().len(),
            "scan plan ready"
        );

        let started_at = Utc::now();
        let clock = Instant::now();

        let mut engine = ScanEngine::new(config);
        if invocation.progress {
            engine = engine.with_progress();
        }
        let prober = Arc::new(TcpConnectProber::new(&config));
        let results = engine.run_with_cancel(&plan, prober, cancel).await;
        let duration = clock.elapsed();

        let export_error = invocation
            .output
            .as_deref()
            .and_then(|path| export_to_path(&results, path).err());
        if let Some(e) = &export_error {
            warn!(error = %e, "export failed");
        }

        Ok::<_, InvokeError>(ScanReport {
            id,
            started_at,
            duration,
            hosts: plan.targets().len(),
            ports: plan.ports().len(),
            work_items: plan.len(),
            results,
            export_error,
        })
    }
    .instrument(span)
    .await
}
