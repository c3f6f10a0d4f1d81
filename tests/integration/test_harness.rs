// Test harness: config fixtures, log entry builders and a fake
// transactions API served over a real tonic channel.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use serde_json::json;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::{Request, Response, Status};
use txnlogs::cloud_logging::LogEntry;
use txnlogs::config::Config;
use txnlogs::transactions::proto::issuer_switch_transactions_server::{
    IssuerSwitchTransactions, IssuerSwitchTransactionsServer,
};
use txnlogs::transactions::{ListTransactionsRequest, ListTransactionsResponse, TransactionSummary};

/// Config pointing at a test project, with the given identifiers
pub fn test_config(txnid: &str, rrn: &str) -> Config {
    let mut config = Config::default();
    config.query.txnid = txnid.to_string();
    config.query.rrn = rrn.to_string();
    config.logging.resource_names = vec!["projects/issuer-switch-test".to_string()];
    config
}

/// Entry marking a transaction record
pub fn record_entry(txn: &str, msg: &str) -> LogEntry {
    let mut entry = LogEntry::with_json(json!({
        "transactionID": txn,
        "messageID": msg,
        "message": "Request received"
    }));
    entry.severity = Some("INFO".to_string());
    entry
}

/// Ordinary log line belonging to a record
pub fn log_line(txn: &str, msg: &str, message: &str) -> LogEntry {
    LogEntry::with_json(json!({
        "transactionID": txn,
        "messageID": msg,
        "message": message
    }))
}

/// Backend acknowledgment log carrying a request ID
pub fn ack_entry(txn: &str, msg: &str, request_id: &str) -> LogEntry {
    LogEntry::with_json(json!({
        "transactionID": txn,
        "messageID": msg,
        "message": "Backend acknowledgement received",
        "requestID": request_id
    }))
}

/// Fake transactions API; answers every filter with one summary
#[derive(Clone, Default)]
pub struct FakeTransactionsService {
    pub filters: Arc<Mutex<Vec<String>>>,
    pub parents: Arc<Mutex<Vec<String>>>,
}

#[tonic::async_trait]
impl IssuerSwitchTransactions for FakeTransactionsService {
    async fn list_transactions(
        &self,
        request: Request<ListTransactionsRequest>,
    ) -> Result<Response<ListTransactionsResponse>, Status> {
        let request = request.into_inner();
        self.filters.lock().unwrap().push(request.filter.clone());
        self.parents.lock().unwrap().push(request.parent.clone());

        if request.filter.contains("REJECT") {
            return Err(Status::invalid_argument("unsupported filter"));
        }

        let transaction_id = request
            .filter
            .strip_prefix("transactionID = ")
            .unwrap_or("")
            .to_string();
        let rrn = request.filter.strip_prefix("rrn = ").unwrap_or("").to_string();

        Ok(Response::new(ListTransactionsResponse {
            transactions: vec![TransactionSummary {
                name: format!("{}/transactions/{}", request.parent, transaction_id),
                transaction_id,
                rrn,
                state: "SUCCEEDED".to_string(),
                ..Default::default()
            }],
            next_page_token: String::new(),
        }))
    }
}

/// Serve `service` on an ephemeral localhost port
pub async fn spawn_fake_server(service: FakeTransactionsService) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        tonic::transport::Server::builder()
            .add_service(IssuerSwitchTransactionsServer::new(service))
            .serve_with_incoming(TcpListenerStream::new(listener))
            .await
            .unwrap();
    });

    addr
}

/// Writer whose every write fails, like a closed stdout pipe
pub struct BrokenPipe;

impl std::io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "report sink closed",
        ))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
