//! Mock transactions API for testing

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::proto::ListTransactionsResponse;
use super::TransactionsApi;
use crate::error::{Result, TxnLogsError};

#[derive(Default)]
struct MockState {
    responses: HashMap<String, ListTransactionsResponse>,
    failing_filters: HashSet<String>,
    filters: Vec<String>,
}

/// In-memory [`TransactionsApi`] answering by exact filter match
#[derive(Clone, Default)]
pub struct MockTransactionsApi {
    state: Arc<Mutex<MockState>>,
}

impl MockTransactionsApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `filter` with `response`; unknown filters get an empty response
    pub fn respond(&self, filter: &str, response: ListTransactionsResponse) {
        self.lock().responses.insert(filter.to_string(), response);
    }

    /// Make calls with `filter` fail
    pub fn fail(&self, filter: &str) {
        self.lock().failing_filters.insert(filter.to_string());
    }

    /// Filters received so far, in call order
    pub fn filters(&self) -> Vec<String> {
        self.lock().filters.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl TransactionsApi for MockTransactionsApi {
    async fn list_transactions(&self, filter: &str) -> Result<ListTransactionsResponse> {
        let mut state = self.lock();
        state.filters.push(filter.to_string());

        if state.failing_filters.contains(filter) {
            return Err(TxnLogsError::Query(format!(
                "Simulated ListTransactions failure for '{}'",
                filter
            )));
        }

        Ok(state.responses.get(filter).cloned().unwrap_or_default())
    }
}
