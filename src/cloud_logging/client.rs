//! Cloud Logging REST client
//!
//! Calls `POST {endpoint}/v2/entries:list` with a bearer token. The token is
//! expected to carry the read-only logging scope; nothing here writes.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::backend::{EntriesPage, ListEntriesRequest, LogBackend};
use crate::config::CloudLoggingConfig;
use crate::constants::LOGGING_READ_SCOPE;
use crate::error::{Result, TxnLogsError};

/// `entries:list` client backed by reqwest
#[derive(Debug, Clone)]
pub struct CloudLoggingClient {
    endpoint: String,
    access_token: Option<String>,
    timeout: Option<Duration>,
    client: Client,
}

impl CloudLoggingClient {
    /// Creates a new client from the logging backend configuration
    ///
    /// # Errors
    /// Returns `BackendConnection` if the HTTP client cannot be built.
    pub fn new(config: &CloudLoggingConfig) -> Result<Self> {
        let timeout = config.request_timeout_secs.map(Duration::from_secs);

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            TxnLogsError::BackendConnection(format!("Failed to create HTTP client: {}", e))
        })?;

        let access_token = config
            .access_token
            .as_ref()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        if access_token.is_none() {
            tracing::warn!(
                scope = LOGGING_READ_SCOPE,
                "No Cloud Logging access token configured; requests will be unauthenticated"
            );
        }

        Ok(Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            access_token,
            timeout,
            client,
        })
    }

    /// Returns the endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Returns the request timeout, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn list_url(&self) -> String {
        format!("{}/v2/entries:list", self.endpoint)
    }
}

#[async_trait]
impl LogBackend for CloudLoggingClient {
    async fn list_entries(&self, request: &ListEntriesRequest) -> Result<EntriesPage> {
        let mut req = self.client.post(self.list_url()).json(request);

        if let Some(ref token) = self.access_token {
            req = req.bearer_auth(token);
        }

        tracing::debug!(
            filter = %request.filter,
            page_token = request.page_token.as_deref().unwrap_or(""),
            "Listing log entries"
        );

        let response = req.send().await.map_err(|e| {
            if e.is_timeout() {
                TxnLogsError::BackendUnavailable(format!("Request timed out: {}", e))
            } else if e.is_connect() {
                TxnLogsError::BackendUnavailable(format!("Failed to connect: {}", e))
            } else {
                TxnLogsError::BackendUnavailable(format!("HTTP request failed: {}", e))
            }
        })?;

        let status = response.status();

        if status.is_success() {
            response
                .json::<EntriesPage>()
                .await
                .map_err(|e| TxnLogsError::Query(format!("Failed to parse response: {}", e)))
        } else if status.as_u16() == 401 || status.as_u16() == 403 {
            Err(TxnLogsError::Query(format!(
                "Access denied ({}); the token needs the {} scope",
                status.as_u16(),
                LOGGING_READ_SCOPE
            )))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            Err(TxnLogsError::Query(format!(
                "Cloud Logging API error ({}): {}",
                status.as_u16(),
                error_body
            )))
        }
    }
}
