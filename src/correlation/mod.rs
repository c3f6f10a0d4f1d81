//! Correlation loop
//!
//! For each transaction record: fetch its log lines with a detail filter,
//! print them, and report the request ID carried by the first backend
//! acknowledgment log.

use std::io::Write;

use crate::cloud_logging::{LogClient, TransactionLogDetail};
use crate::error::Result;
use crate::filter::FilterBuilder;
use crate::report::ReportPrinter;

/// Outcome of one pass over the discovered records
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrelationReport {
    /// Records whose logs were fetched and printed
    pub records_processed: usize,
    /// Log entries printed across all records
    pub entries_printed: usize,
    /// Records skipped because their log fetch failed
    pub failed_fetches: usize,
    /// (transaction ID, request ID) pairs from backend acknowledgment logs
    pub request_ids: Vec<(String, String)>,
}

/// Walk the records in order, printing their logs
///
/// A failed fetch is logged and the loop moves on to the next record.
/// Only fatal errors (e.g. the report cannot be written) end the loop early.
pub async fn correlate<W: Write>(
    client: &LogClient,
    filters: &FilterBuilder,
    records: &[TransactionLogDetail],
    printer: &mut ReportPrinter<W>,
) -> Result<CorrelationReport> {
    let mut report = CorrelationReport::default();

    for detail in records {
        let filter =
            filters.scoped(&filters.detail_filter(detail.transaction_id(), detail.message_id()));

        let entries = match client.find_log_entries(&filter).await {
            Ok(entries) => entries,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::error!(
                    transaction_id = detail.transaction_id(),
                    message_id = detail.message_id(),
                    error = %e,
                    kind = e.kind().as_str(),
                    "Failed to fetch log entries, skipping record"
                );
                report.failed_fetches += 1;
                continue;
            }
        };

        printer.print_transaction_details(detail, entries.len())?;

        for entry in &entries {
            printer.print_log_entry(entry)?;
        }
        report.entries_printed += entries.len();

        if let Some(ack) = entries.iter().find(|e| client.is_backend_ack(e)) {
            match client.extract_request_id(ack) {
                Some(request_id) => {
                    printer.print_request_id(&request_id)?;
                    report
                        .request_ids
                        .push((detail.transaction_id().to_string(), request_id));
                }
                None => tracing::warn!(
                    transaction_id = detail.transaction_id(),
                    "Backend acknowledgment log carries no request ID"
                ),
            }
        }

        report.records_processed += 1;
    }

    Ok(report)
}
