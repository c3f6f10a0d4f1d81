use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use txnlogs::config::{Config, ConfigOverrides};
use txnlogs::logging::LogFormat;
use txnlogs::report::ReportPrinter;

/// txnlogs - correlate Cloud Logging entries for a payment transaction
#[derive(Parser, Debug)]
#[command(name = "txnlogs")]
#[command(version, about, long_about = None)]
struct Args {
    /// Transaction ID of the request for which logs are to be displayed
    #[arg(long)]
    txnid: Option<String>,

    /// RRN of the payment for which logs are to be displayed
    #[arg(long)]
    rrn: Option<String>,

    /// Transactions API endpoint (host:port); remote lookup is skipped without it
    #[arg(long)]
    addr: Option<String>,

    /// Use a plaintext gRPC channel to --addr instead of TLS
    #[arg(long)]
    insecure: bool,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Project whose logs are searched (overrides logging.resource_names)
    #[arg(long)]
    project: Option<String>,

    /// Only search log entries from the last N hours
    #[arg(long)]
    lookback_hours: Option<u32>,

    /// Diagnostic log level when RUST_LOG is unset
    #[arg(long)]
    log_level: Option<String>,

    /// Diagnostic log format (text or json)
    #[arg(long)]
    log_format: Option<LogFormat>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            txnid: self.txnid.clone(),
            rrn: self.rrn.clone(),
            addr: self.addr.clone(),
            insecure: self.insecure,
            project: self.project.clone(),
            lookback_hours: self.lookback_hours,
            log_level: self.log_level.clone(),
            log_format: self.log_format,
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => Config::default(),
    };
    config.apply_overrides(args.overrides());
    Ok(config)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = txnlogs::logging::init_subscriber(
        &config.diagnostics.log_level,
        config.diagnostics.log_format,
    ) {
        eprintln!("Failed to initialize logging subsystem: {}", e);
        return ExitCode::FAILURE;
    }

    // Calls are issued one at a time; a single thread is all the tool needs.
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start async runtime");
            return ExitCode::FAILURE;
        }
    };

    let mut printer = ReportPrinter::stdout();

    match runtime.block_on(txnlogs::pipeline::run(&config, &mut printer)) {
        Ok(report) => {
            tracing::info!(
                records = report.investigation.records.len(),
                lookup_failures = report.lookup.as_ref().map(|l| l.failures).unwrap_or(0),
                "Done"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, kind = e.kind().as_str(), "Fatal error");
            ExitCode::FAILURE
        }
    }
}
