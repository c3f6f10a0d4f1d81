//! Human readable correlation report
//!
//! Everything the user is meant to read goes through [`ReportPrinter`];
//! diagnostics go through `tracing` instead.

use std::io::{self, Write};

use chrono::SecondsFormat;

use crate::cloud_logging::{LogEntry, TransactionLogDetail};
use crate::transactions::ListTransactionsResponse;

/// Writes the correlation report to any writer (stdout in the binary)
pub struct ReportPrinter<W: Write> {
    out: W,
}

impl ReportPrinter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReportPrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the printer and return the writer
    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn print_transaction_details(
        &mut self,
        detail: &TransactionLogDetail,
        entry_count: usize,
    ) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "=== Transaction {} (message {}) ===",
            detail.transaction_id(),
            detail.message_id()
        )?;
        writeln!(self.out, "log entries: {}", entry_count)
    }

    pub fn print_log_entry(&mut self, entry: &LogEntry) -> io::Result<()> {
        let timestamp = entry
            .timestamp
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_else(|| "-".to_string());
        let severity = entry.severity.as_deref().unwrap_or("DEFAULT");
        let message = entry.message().unwrap_or_default();

        writeln!(self.out, "{} {:<8} {}", timestamp, severity, message)?;

        if let Some(payload) = &entry.json_payload {
            let rendered = serde_json::to_string(payload).map_err(io::Error::other)?;
            writeln!(self.out, "    {}", rendered)?;
        }
        Ok(())
    }

    pub fn print_request_id(&mut self, request_id: &str) -> io::Result<()> {
        writeln!(self.out, "request ID is {}", request_id)
    }

    pub fn print_no_records(&mut self, filter: &str) -> io::Result<()> {
        writeln!(self.out, "No transaction records found for filter: {}", filter)
    }

    /// Print a `ListTransactions` response as received
    pub fn print_list_response(
        &mut self,
        filter: &str,
        response: &ListTransactionsResponse,
    ) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "=== ListTransactions [{}] ===", filter)?;
        writeln!(self.out, "{:#?}", response)
    }
}
