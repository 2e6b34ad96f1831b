//! TCP connect prober.
//!
//! Completes a full handshake through the operating system's socket API,
//! so no elevated privileges are needed. Each attempt has one deadline that
//! covers name resolution and the handshake; the banner read that follows
//! has its own, shorter budget.

use crate::banner::{read_banner, sanitize_banner};
use crate::config::ScanConfig;
use crate::error::ConnectError;
use crate::scanner::traits::{Prober, ScanResult};
use crate::services::classify;
use crate::types::WorkItem;
use async_trait::async_trait;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{timeout_at, Instant};
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

/// Resolver built from the host's own configuration (`/etc/resolv.conf`
/// nameservers and search domains), so names only the local network knows
/// still resolve. Falls back to the built-in upstream servers if that
/// configuration cannot be read.
fn system_resolver() -> TokioAsyncResolver {
    TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "system resolver config unavailable, using defaults");
        TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
    })
}

/// TCP connect prober with passive banner grabbing.
pub struct TcpConnectProber {
    timeout: Duration,
    banner_timeout: Duration,
    resolver: TokioAsyncResolver,
}

impl TcpConnectProber {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            timeout: config.timeout(),
            banner_timeout: config.banner_timeout(),
            resolver: system_resolver(),
        }
    }

    /// Resolve a host string; IP literals skip the resolver.
    async fn resolve(&self, host: &str) -> Result<IpAddr, ConnectError> {
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(ip);
        }

        let response = self.resolver.lookup_ip(host).await.map_err(|e| {
            tracing::trace!(host, error = %e, "lookup failed");
            ConnectError::Unresolved(host.to_string())
        })?;

        response
            .iter()
            .next()
            .ok_or_else(|| ConnectError::Unresolved(host.to_string()))
    }

    async fn attempt_connect(&self, item: &WorkItem) -> Result<TcpStream, ConnectError> {
        let deadline = Instant::now() + self.timeout;

        let ip = timeout_at(deadline, self.resolve(item.host()))
            .await
            .map_err(|_| ConnectError::Unresolved(item.host().to_string()))??;
        let addr = SocketAddr::new(ip, item.port().as_u16());

        match timeout_at(deadline, TcpStream::connect(addr)).await {
            Ok(Ok(stream)) => Ok(stream),
            Ok(Err(e)) => Err(ConnectError::from_io(&e)),
            Err(_) => Err(ConnectError::TimedOut),
        }
    }
}

#[async_trait]
impl Prober for TcpConnectProber {
    async fn probe(&self, item: &WorkItem) -> Result<ScanResult, ConnectError> {
        let mut stream = self.attempt_connect(item).await?;
        let banner = read_banner(&mut stream, self.banner_timeout).await;
        let port = item.port().as_u16();

        Ok(ScanResult::new(
            item.host(),
            port,
            classify(port, &banner),
            sanitize_banner(&banner),
        ))
    }
}
