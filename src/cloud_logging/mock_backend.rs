//! Mock log backend for testing (in-memory, scripted by filter)

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::backend::{EntriesPage, ListEntriesRequest, LogBackend};
use super::types::LogEntry;
use crate::error::{Result, TxnLogsError};

#[derive(Default)]
struct MockState {
    pages: HashMap<String, VecDeque<EntriesPage>>,
    failing_calls: HashSet<usize>,
    failing_filters: HashSet<String>,
    requests: Vec<ListEntriesRequest>,
}

/// Backend returning scripted pages per filter, with injectable failures
///
/// Filters are matched by substring so tests do not depend on scoping
/// clauses added around them.
#[derive(Clone, Default)]
pub struct MockLogBackend {
    state: Arc<Mutex<MockState>>,
}

impl MockLogBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `entries` as a single page for queries containing `filter`
    pub fn add_entries(&self, filter: &str, entries: Vec<LogEntry>) {
        self.add_page(filter, EntriesPage::new(entries));
    }

    /// Queue a page for queries containing `filter`; pages are served in order
    pub fn add_page(&self, filter: &str, page: EntriesPage) {
        let mut state = self.lock();
        state
            .pages
            .entry(filter.to_string())
            .or_default()
            .push_back(page);
    }

    /// Make the n-th call (1-based, counted across all filters) fail
    pub fn fail_call(&self, n: usize) {
        self.lock().failing_calls.insert(n);
    }

    /// Make every query containing `filter` fail
    pub fn fail_filter(&self, filter: &str) {
        self.lock().failing_filters.insert(filter.to_string());
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ListEntriesRequest> {
        self.lock().requests.clone()
    }

    pub fn call_count(&self) -> usize {
        self.lock().requests.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        // A panicking test thread must not hide later assertions
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl LogBackend for MockLogBackend {
    async fn list_entries(&self, request: &ListEntriesRequest) -> Result<EntriesPage> {
        let mut state = self.lock();
        state.requests.push(request.clone());
        let call = state.requests.len();

        if state.failing_calls.contains(&call) {
            return Err(TxnLogsError::BackendUnavailable(format!(
                "Simulated failure on call {}",
                call
            )));
        }

        if state
            .failing_filters
            .iter()
            .any(|f| request.filter.contains(f.as_str()))
        {
            return Err(TxnLogsError::Query(format!(
                "Simulated query failure for filter {}",
                request.filter
            )));
        }

        // Longest matching key wins so a detail filter is not shadowed by
        // an identity filter that happens to be its prefix.
        let key = state
            .pages
            .keys()
            .filter(|k| request.filter.contains(k.as_str()))
            .max_by_key(|k| k.len())
            .cloned();

        let page = key
            .and_then(|k| state.pages.get_mut(&k).and_then(|q| q.pop_front()))
            .unwrap_or_default();

        Ok(page)
    }
}
