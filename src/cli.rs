//! Command-line interface definitions for portsweep.
//!
//! Uses `clap` derive macros for declarative argument parsing. Flags left
//! unset fall back to the settings file, then to built-in defaults.

use crate::config::Settings;
use crate::invoke::Invocation;
use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// A concurrent TCP reachability scanner with service identification.
#[derive(Parser, Debug)]
#[command(name = "portsweep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Concurrent TCP port scanner with banner-based service detection", long_about = None)]
pub struct Args {
    /// Target IP(s), hostname(s), or subnet (e.g. 192.168.1.1,192.168.1.2 or 192.168.1.0/24)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Comma-separated ports or ranges (e.g. "22,80,443,1000-1010")
    #[arg(short, long)]
    pub ports: Option<String>,

    /// Start port when --ports is not given (inclusive)
    #[arg(long)]
    pub start: Option<u32>,

    /// End port when --ports is not given (exclusive)
    #[arg(long)]
    pub end: Option<u32>,

    /// Maximum number of concurrent connect attempts
    #[arg(short = 't', long = "threads", env = "PORTSWEEP_THREADS")]
    pub concurrency: Option<usize>,

    /// Connect timeout in milliseconds
    #[arg(long = "timeout")]
    pub timeout_ms: Option<u64>,

    /// Banner read timeout in milliseconds
    #[arg(long = "banner-timeout")]
    pub banner_timeout_ms: Option<u64>,

    /// Write results to a file (.json or .csv)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Format for results printed to stdout
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Path to a settings file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Verbose output (progress bar and debug logging)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print results, no summary or log output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Merge flags over `settings` into an invocation.
    pub fn to_invocation(&self, settings: &Settings) -> Invocation {
        let mut invocation = Invocation::new(self.target.clone())
            .with_range(
                self.start.unwrap_or(settings.start_port),
                self.end.unwrap_or(settings.end_port),
            )
            .with_concurrency(self.concurrency.unwrap_or(settings.concurrency))
            .with_timeout(Duration::from_millis(
                self.timeout_ms.unwrap_or(settings.timeout_ms),
            ))
            .with_banner_timeout(Duration::from_millis(
                self.banner_timeout_ms.unwrap_or(settings.banner_timeout_ms),
            ));

        if let Some(ports) = &self.ports {
            invocation = invocation.with_ports(ports.clone());
        }
        if let Some(path) = &self.output {
            invocation = invocation.with_output(path.clone());
        }
        if self.verbose {
            invocation = invocation.with_progress();
        }
        invocation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let args = Args::parse_from([
            "portsweep",
            "10.0.0.1",
            "--ports",
            "22,80",
            "--threads",
            "50",
            "--timeout",
            "250",
        ]);
        let inv = args.to_invocation(&Settings::default());

        assert_eq!(inv.targets, "10.0.0.1");
        assert_eq!(inv.ports.as_deref(), Some("22,80"));
        assert_eq!(inv.concurrency, 50);
        assert_eq!(inv.timeout, Duration::from_millis(250));
        assert_eq!(inv.banner_timeout, Duration::from_millis(500));
    }

    #[test]
    fn test_settings_fill_unset_flags() {
        let settings = Settings {
            concurrency: 64,
            start_port: 20,
            end_port: 8100,
            ..Settings::default()
        };
        let args = Args::parse_from(["portsweep", "127.0.0.1", "--end", "1024"]);
        let inv = args.to_invocation(&settings);

        assert_eq!(inv.ports, None);
        assert_eq!(inv.concurrency, 64);
        assert_eq!((inv.start_port, inv.end_port), (20, 1024));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["portsweep", "127.0.0.1", "-q", "-v"]).is_err());
    }
}
