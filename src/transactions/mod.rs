//! Remote lookup against the issuer switch transactions API
//!
//! After the logs have been correlated, the discovered transaction IDs (or
//! the RRN, when nothing was found) are sent to `ListTransactions` and each
//! response is printed.

use std::io::Write;

use async_trait::async_trait;

pub mod client;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

#[allow(clippy::all)]
pub mod proto {
    tonic::include_proto!("issuerswitch.v1");
}

pub use client::GrpcTransactionsClient;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockTransactionsApi;
pub use proto::{ListTransactionsRequest, ListTransactionsResponse, TransactionSummary};

use crate::cloud_logging::TransactionLogDetail;
use crate::error::Result;
use crate::filter::api_filters;
use crate::report::ReportPrinter;

/// A transaction-query service accepting one filter per call
#[async_trait]
pub trait TransactionsApi: Send + Sync {
    async fn list_transactions(&self, filter: &str) -> Result<ListTransactionsResponse>;
}

/// Outcome of the remote lookup phase
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupReport {
    /// Filters sent, in order
    pub filters: Vec<String>,
    /// Calls that returned an error
    pub failures: usize,
    /// Transactions returned across all successful calls
    pub transactions: usize,
}

/// Issue one `ListTransactions` call per API filter and print the responses
///
/// A failed call is logged and counted; the remaining filters still run.
/// Only a failure to write the report aborts the phase.
pub async fn remote_lookup<W: Write>(
    api: &dyn TransactionsApi,
    rrn: &str,
    records: &[TransactionLogDetail],
    printer: &mut ReportPrinter<W>,
) -> Result<LookupReport> {
    let filters = api_filters(rrn, records);
    let mut report = LookupReport::default();

    for filter in &filters {
        report.filters.push(filter.clone());

        match api.list_transactions(filter).await {
            Ok(response) => {
                tracing::info!(
                    filter = %filter,
                    transactions = response.transactions.len(),
                    "ListTransactions succeeded"
                );
                report.transactions += response.transactions.len();
                printer.print_list_response(filter, &response)?;
            }
            Err(e) => {
                tracing::error!(
                    filter = %filter,
                    error = %e,
                    kind = e.kind().as_str(),
                    "ListTransactions failed"
                );
                report.failures += 1;
            }
        }
    }

    Ok(report)
}
