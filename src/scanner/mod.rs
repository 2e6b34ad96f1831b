//! Scan engine - runs a scan plan under a bounded concurrency limit.
//!
//! A semaphore permit is taken before each attempt is spawned, so at most
//! `concurrency` attempts exist at any moment no matter how large the plan
//! is. Successful attempts are pushed to the [`Aggregator`]; failed ones are
//! logged at trace level and dropped.

pub mod tcp;
pub mod traits;

use crate::aggregator::{Aggregator, ResultSet};
use crate::config::ScanConfig;
use crate::error::ConnectError;
use crate::types::ScanPlan;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, trace, warn};

pub use tcp::TcpConnectProber;
pub use traits::{Prober, ScanResult};

/// Bounded-concurrency executor for scan plans.
pub struct ScanEngine {
    config: ScanConfig,
    progress: Option<ProgressBar>,
}

impl ScanEngine {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Report per-item progress on a bar sized to the plan.
    pub fn with_progress(mut self) -> Self {
        let pb = ProgressBar::new(0);
        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        ) {
            pb.set_style(style.progress_chars("=>-"));
        }
        self.progress = Some(pb);
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Run every work item in `plan` and return the open endpoints.
    pub async fn run<P>(&self, plan: &ScanPlan, prober: Arc<P>) -> ResultSet
    where
        P: Prober + 'static,
    {
        self.run_with_cancel(plan, prober, CancellationToken::new())
            .await
    }

    /// Like [`run`](Self::run), but stops submitting new attempts once
    /// `cancel` fires. Attempts already in flight still finish or time out.
    pub async fn run_with_cancel<P>(
        &self,
        plan: &ScanPlan,
        prober: Arc<P>,
        cancel: CancellationToken,
    ) -> ResultSet
    where
        P: Prober + 'static,
    {
        info!(
            work_items = plan.len(),
            concurrency = self.config.concurrency(),
            timeout_ms = self.config.timeout().as_millis() as u64,
            "starting scan"
        );

        if let Some(pb) = &self.progress {
            pb.set_length(plan.len() as u64);
        }

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency()));
        let budget = self.config.attempt_budget();
        let (aggregator, sender) = Aggregator::spawn();
        let mut tasks = JoinSet::new();

        for item in plan.iter() {
            let permit = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!("scan cancelled, draining in-flight attempts");
                    break;
                }
                permit = Arc::clone(&semaphore).acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => break,
                },
            };

            let prober = Arc::clone(&prober);
            let sender = sender.clone();
            let progress = self.progress.clone();

            tasks.spawn(async move {
                let _permit = permit;

                let outcome = tokio::time::timeout(budget, prober.probe(&item))
                    .await
                    .unwrap_or(Err(ConnectError::TimedOut));

                match outcome {
                    Ok(result) => {
                        trace!(item = %item, service = %result.service, "open");
                        if let Some(pb) = &progress {
                            pb.set_message(format!("open: {item}"));
                        }
                        sender.send(result);
                    }
                    Err(e) => trace!(item = %item, outcome = %e, "dropped"),
                }

                if let Some(pb) = &progress {
                    pb.inc(1);
                }
            });

            // Reap finished attempts so the set stays proportional to the limit.
            while let Some(joined) = tasks.try_join_next() {
                log_join_error(joined);
            }
        }

        drop(sender);
        while let Some(joined) = tasks.join_next().await {
            log_join_error(joined);
        }

        if let Some(pb) = &self.progress {
            pb.finish_with_message("scan complete");
        }

        let results = aggregator.finish().await;
        info!(open = results.len(), "scan finished");
        results
    }
}

fn log_join_error(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        warn!(error = %e, "scan attempt aborted");
    }
}
