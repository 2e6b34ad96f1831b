use anyhow::Context;
use clap::Parser;
use portsweep::cli::Args;
use portsweep::config::Settings;
use portsweep::output::{self, OutputFormat};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    init_tracing(&args);

    let settings = match &args.config {
        Some(path) => Settings::load_from(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::load().unwrap_or_else(|e| {
            output::print_warning(&format!("ignoring settings file: {e}"));
            Settings::default()
        }),
    };

    let invocation = args.to_invocation(&settings);
    let report = match portsweep::invoke::run(&invocation).await {
        Ok(report) => report,
        Err(e) => {
            output::print_error(&e.to_string());
            return Ok(exit_code(e.exit_code()));
        }
    };

    if args.quiet && args.format == OutputFormat::Plain {
        for line in output::summary_lines(&report) {
            println!("{line}");
        }
    } else {
        output::print_report(&report, args.format).context("writing results to stdout")?;
    }

    match (&report.export_error, &invocation.output) {
        (Some(e), _) => output::print_error(&e.to_string()),
        (None, Some(path)) if !args.quiet => {
            output::print_success(&format!("Results written to {}", path.display()))
        }
        _ => {}
    }

    Ok(exit_code(report.exit_code()))
}

fn init_tracing(args: &Args) {
    let default_level = if args.verbose {
        "portsweep=debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
