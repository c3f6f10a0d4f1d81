// Run pipeline - validation, record discovery, correlation, remote lookup
//
// Data only flows forward: the identity filter finds records, the records
// drive the correlation loop, and the same records (or the RRN) drive the
// remote lookup.

use std::io::Write;
use std::sync::Arc;

use crate::cloud_logging::{CloudLoggingClient, LogBackend, LogClient, TransactionLogDetail};
use crate::config::Config;
use crate::correlation::{correlate, CorrelationReport};
use crate::error::{Result, TxnLogsError};
use crate::filter::FilterBuilder;
use crate::report::ReportPrinter;
use crate::transactions::{remote_lookup, GrpcTransactionsClient, LookupReport};
use crate::validation::validate_params;

/// Result of the log phases (discovery + correlation)
#[derive(Debug, Clone, Default)]
pub struct Investigation {
    /// Records discovered by the identity query, in backend order
    pub records: Vec<TransactionLogDetail>,
    pub correlation: CorrelationReport,
}

/// Result of a complete run
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub investigation: Investigation,
    /// `None` when no transactions API address is configured
    pub lookup: Option<LookupReport>,
}

/// Discover the transaction records and print their correlated logs
///
/// A failed discovery query is logged and treated as "no records", so the
/// remote lookup can still fall back to the RRN.
pub async fn investigate<W: Write>(
    config: &Config,
    backend: Arc<dyn LogBackend>,
    printer: &mut ReportPrinter<W>,
) -> Result<Investigation> {
    validate_params(&config.query.rrn, &config.query.txnid)?;

    let filters =
        FilterBuilder::new(&config.filter).with_lookback_hours(config.logging.lookback_hours);
    let client = LogClient::new(backend, &config.logging, &config.filter);

    let identity = filters.identity_filter(&config.query.txnid, &config.query.rrn);
    tracing::info!(filter = %identity, "Searching for transaction records");

    let records = match client
        .find_transaction_records(&filters.scoped(&identity))
        .await
    {
        Ok(records) => records,
        Err(e) if e.is_fatal() => return Err(e),
        Err(e) => {
            tracing::error!(
                filter = %identity,
                error = %e,
                kind = e.kind().as_str(),
                "Failed to search for transaction records"
            );
            Vec::new()
        }
    };

    if records.is_empty() {
        printer.print_no_records(&identity)?;
    }

    let correlation = correlate(&client, &filters, &records, printer).await?;

    tracing::info!(
        records = records.len(),
        processed = correlation.records_processed,
        failed = correlation.failed_fetches,
        entries = correlation.entries_printed,
        "Correlation finished"
    );

    Ok(Investigation {
        records,
        correlation,
    })
}

/// Single entry point of the tool
///
/// Fatal conditions: missing identifiers, invalid config, and failing to
/// create either backend connection. Everything else is logged and the run
/// completes with partial output.
pub async fn run<W: Write>(config: &Config, printer: &mut ReportPrinter<W>) -> Result<RunReport> {
    validate_params(&config.query.rrn, &config.query.txnid)?;
    config.validate().map_err(TxnLogsError::Config)?;

    let backend = Arc::new(CloudLoggingClient::new(&config.logging)?);
    let investigation = investigate(config, backend, printer).await?;

    let lookup = if config.transactions.is_enabled() {
        let api = GrpcTransactionsClient::connect(&config.transactions).await?;
        let report =
            remote_lookup(&api, &config.query.rrn, &investigation.records, printer).await?;
        if report.failures > 0 {
            tracing::error!(
                failures = report.failures,
                calls = report.filters.len(),
                "Some ListTransactions calls failed; output is partial"
            );
        }
        Some(report)
    } else {
        tracing::info!("No transactions API address configured, skipping remote lookup");
        None
    };

    Ok(RunReport {
        investigation,
        lookup,
    })
}
