//! gRPC client for the issuer switch transactions API

use std::time::Duration;

use async_trait::async_trait;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint};
use tonic::{Code, Request, Status};

use super::proto::issuer_switch_transactions_client::IssuerSwitchTransactionsClient;
use super::proto::{ListTransactionsRequest, ListTransactionsResponse};
use super::TransactionsApi;
use crate::config::TransactionsConfig;
use crate::error::{Result, TxnLogsError};

/// Map a gRPC status onto the error taxonomy
pub(crate) fn status_to_error(status: Status) -> TxnLogsError {
    match status.code() {
        Code::Unavailable | Code::DeadlineExceeded | Code::Cancelled => {
            TxnLogsError::BackendUnavailable(format!(
                "ListTransactions failed ({:?}): {}",
                status.code(),
                status.message()
            ))
        }
        code => TxnLogsError::Query(format!(
            "ListTransactions failed ({:?}): {}",
            code,
            status.message()
        )),
    }
}

/// Client over a single tonic channel
#[derive(Debug, Clone)]
pub struct GrpcTransactionsClient {
    client: IssuerSwitchTransactionsClient<Channel>,
    endpoint: String,
    parent: String,
    page_size: i32,
}

impl GrpcTransactionsClient {
    /// Open the channel to `config.addr`
    ///
    /// TLS with the platform's native roots is used unless `insecure` is
    /// set, in which case the channel is plaintext.
    ///
    /// # Errors
    /// - `Config` if no address is configured or it is not a valid URI
    /// - `BackendConnection` if TLS setup or the connection fails
    pub async fn connect(config: &TransactionsConfig) -> Result<Self> {
        let uri = config
            .endpoint_uri()
            .ok_or_else(|| TxnLogsError::Config("transactions.addr is not set".to_string()))?;

        let mut endpoint = Endpoint::from_shared(uri.clone())
            .map_err(|e| TxnLogsError::Config(format!("Invalid endpoint '{}': {}", uri, e)))?
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));

        if let Some(secs) = config.request_timeout_secs {
            endpoint = endpoint.timeout(Duration::from_secs(secs));
        }

        if config.insecure {
            tracing::warn!(
                endpoint = %uri,
                "Using a plaintext channel to the transactions API (insecure override)"
            );
        } else {
            endpoint = endpoint
                .tls_config(ClientTlsConfig::new().with_native_roots())
                .map_err(|e| {
                    TxnLogsError::BackendConnection(format!(
                        "TLS setup for '{}' failed: {}",
                        uri, e
                    ))
                })?;
        }

        let channel = endpoint.connect().await.map_err(|e| {
            TxnLogsError::BackendConnection(format!("Failed to connect to '{}': {}", uri, e))
        })?;

        tracing::info!(
            endpoint = %uri,
            insecure = config.insecure,
            "Connected to transactions API"
        );

        Ok(Self {
            client: IssuerSwitchTransactionsClient::new(channel),
            endpoint: uri,
            parent: config.parent.clone(),
            page_size: config.page_size,
        })
    }

    /// Returns the endpoint URI
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TransactionsApi for GrpcTransactionsClient {
    async fn list_transactions(&self, filter: &str) -> Result<ListTransactionsResponse> {
        let request = Request::new(ListTransactionsRequest {
            parent: self.parent.clone(),
            page_size: self.page_size,
            page_token: String::new(),
            filter: filter.to_string(),
        });

        // Generated clients take &mut self; clones share the channel.
        let mut client = self.client.clone();
        client
            .list_transactions(request)
            .await
            .map(|response| response.into_inner())
            .map_err(status_to_error)
    }
}
