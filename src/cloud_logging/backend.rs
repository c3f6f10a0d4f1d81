//! Backend trait for `entries:list` paging

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::types::LogEntry;
use crate::error::Result;

/// Request body of `entries:list`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntriesRequest {
    pub resource_names: Vec<String>,
    pub filter: String,
    pub order_by: String,
    pub page_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_token: Option<String>,
}

/// One page of `entries:list` results
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntriesPage {
    #[serde(default)]
    pub entries: Vec<LogEntry>,
    #[serde(default)]
    pub next_page_token: Option<String>,
}

impl EntriesPage {
    pub fn new(entries: Vec<LogEntry>) -> Self {
        Self {
            entries,
            next_page_token: None,
        }
    }

    /// Token of the following page; an empty token means there is none
    pub fn next_token(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Read-only access to a log store, one page at a time
#[async_trait]
pub trait LogBackend: Send + Sync {
    async fn list_entries(&self, request: &ListEntriesRequest) -> Result<EntriesPage>;
}
