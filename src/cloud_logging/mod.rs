//! Cloud Logging access
//!
//! [`LogBackend`] is the seam to the logging service (one `entries:list`
//! page per call). [`LogClient`] sits on top of it: it follows page tokens,
//! turns entries into [`TransactionLogDetail`] records and knows how to spot
//! backend acknowledgment logs.

use std::collections::HashSet;
use std::sync::Arc;

pub mod backend;
pub mod client;
pub mod extract;
#[cfg(any(test, feature = "test-util"))]
pub mod mock_backend;
pub mod types;

pub use backend::{EntriesPage, ListEntriesRequest, LogBackend};
pub use client::CloudLoggingClient;
pub use extract::{extract_request_id, is_backend_ack};
#[cfg(any(test, feature = "test-util"))]
pub use mock_backend::MockLogBackend;
pub use types::{LogEntry, TransactionLogDetail};

use crate::config::{CloudLoggingConfig, FilterConfig};
use crate::error::Result;

/// Paging and parsing adapter over a [`LogBackend`]
#[derive(Clone)]
pub struct LogClient {
    backend: Arc<dyn LogBackend>,
    resource_names: Vec<String>,
    page_size: u32,
    max_pages: u32,
    order_by: String,
    ack_marker: String,
}

impl LogClient {
    pub fn new(
        backend: Arc<dyn LogBackend>,
        logging: &CloudLoggingConfig,
        filter: &FilterConfig,
    ) -> Self {
        Self {
            backend,
            resource_names: logging.resource_names.clone(),
            page_size: logging.page_size,
            max_pages: logging.max_pages,
            order_by: logging.order_by.clone(),
            ack_marker: filter.backend_ack_marker.clone(),
        }
    }

    /// Fetch every entry matching `filter`, following page tokens
    ///
    /// Stops after `max_pages` pages; a truncated result is logged.
    async fn fetch_all(&self, filter: &str) -> Result<Vec<LogEntry>> {
        let mut entries = Vec::new();
        let mut page_token: Option<String> = None;

        for page_no in 1..=self.max_pages {
            let request = ListEntriesRequest {
                resource_names: self.resource_names.clone(),
                filter: filter.to_string(),
                order_by: self.order_by.clone(),
                page_size: self.page_size,
                page_token: page_token.take(),
            };

            let page = self.backend.list_entries(&request).await?;
            let next = page.next_token().map(str::to_string);
            entries.extend(page.entries);

            match next {
                Some(token) if page_no < self.max_pages => page_token = Some(token),
                Some(_) => {
                    tracing::warn!(
                        filter = %filter,
                        max_pages = self.max_pages,
                        fetched = entries.len(),
                        "Page limit reached, results truncated"
                    );
                    break;
                }
                None => break,
            }
        }

        Ok(entries)
    }

    /// Find the transaction records matching an identity filter
    ///
    /// Records keep backend order. Entries that do not carry both
    /// identifiers are skipped, and repeated records are reported once.
    pub async fn find_transaction_records(
        &self,
        filter: &str,
    ) -> Result<Vec<TransactionLogDetail>> {
        let entries = self.fetch_all(filter).await?;

        let mut seen = HashSet::new();
        let mut records = Vec::new();

        for entry in &entries {
            match TransactionLogDetail::from_entry(entry) {
                Ok(detail) => {
                    if seen.insert(detail.clone()) {
                        records.push(detail);
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        kind = e.kind().as_str(),
                        insert_id = entry.insert_id.as_deref().unwrap_or(""),
                        "Skipping log entry without transaction identifiers"
                    );
                }
            }
        }

        tracing::info!(
            entries = entries.len(),
            records = records.len(),
            "Transaction records discovered"
        );

        Ok(records)
    }

    /// Find all log entries matching a detail filter, in backend order
    pub async fn find_log_entries(&self, filter: &str) -> Result<Vec<LogEntry>> {
        self.fetch_all(filter).await
    }

    /// Request identifier carried by an entry, if any
    pub fn extract_request_id(&self, entry: &LogEntry) -> Option<String> {
        extract_request_id(entry)
    }

    /// Whether an entry is a backend acknowledgment log
    pub fn is_backend_ack(&self, entry: &LogEntry) -> bool {
        is_backend_ack(entry, &self.ack_marker)
    }
}
