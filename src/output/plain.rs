//! Plain text output formatting.
//!
//! Produces human-readable output with colors and formatting.

use crate::invoke::ScanReport;
use console::style;
use std::io::{self, Write};

const RULE: &str = "═══════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "───────────────────────────────────────────────────────────────";

/// Write the human-readable report.
pub fn write_plain<W: Write>(report: &ScanReport, mut out: W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out, "                  {} Scan Results", style("portsweep").cyan().bold())?;
    writeln!(out, "{}", style(RULE).cyan())?;
    writeln!(out)?;

    writeln!(out, "  {} {}", style("Scan ID:").bold(), style(report.id.short()).dim())?;
    writeln!(out, "  {} {}", style("Started:").bold(), report.started_at.to_rfc3339())?;
    writeln!(
        out,
        "  {} {} hosts x {} ports = {} attempts in {:.2}s",
        style("Statistics:").bold(),
        report.hosts,
        report.ports,
        report.work_items,
        report.duration.as_secs_f64()
    )?;
    writeln!(
        out,
        "               {} open",
        style(report.results.len()).green().bold()
    )?;
    writeln!(out)?;

    if report.results.is_empty() {
        writeln!(out, "  {}", style("No open ports found.").dim())?;
    } else {
        writeln!(out, "  {}", style(THIN_RULE).dim())?;
        writeln!(
            out,
            "  {:<22}  {:<12}  {}",
            style("ENDPOINT").bold(),
            style("SERVICE").bold(),
            style("BANNER").bold()
        )?;
        writeln!(out, "  {}", style(THIN_RULE).dim())?;

        for result in report.results.sorted() {
            writeln!(
                out,
                "  {:<22}  {:<12}  {}",
                format!("{}:{}", result.ip, result.port),
                style(&result.service).green(),
                style(truncate_string(&result.banner, 35)).dim()
            )?;
        }

        writeln!(out, "  {}", style(THIN_RULE).dim())?;
    }

    writeln!(out)?;
    Ok(())
}

/// One `host:port - service` line per result, in display order.
pub fn summary_lines(report: &ScanReport) -> Vec<String> {
    report
        .results
        .sorted()
        .iter()
        .map(|r| format!("{}:{} - {}", r.ip, r.port, r.service))
        .collect()
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    eprintln!("{} {}", style("✓").green().bold(), msg);
}

/// Truncate to `max_len` characters, adding an ellipsis if truncated.
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
