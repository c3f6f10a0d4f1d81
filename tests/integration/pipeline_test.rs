// Integration tests for the complete run

use crate::integration::test_harness::{spawn_fake_server, test_config, FakeTransactionsService};
use txnlogs::config::Config;
use txnlogs::error::TxnLogsError;
use txnlogs::pipeline::run;
use txnlogs::report::ReportPrinter;

/// Config whose log backend refuses connections
fn unreachable_logging(txnid: &str, rrn: &str) -> Config {
    let mut config = test_config(txnid, rrn);
    config.logging.endpoint = "http://127.0.0.1:1".to_string();
    config.logging.access_token = Some("test-token".to_string());
    config
}

#[tokio::test]
async fn test_missing_identifiers_fail_before_any_connection() {
    let mut config = test_config("", "  ");
    // Would fail validation too; the identifier check must come first
    config.logging.resource_names.clear();
    let mut printer = ReportPrinter::new(Vec::new());

    let result = run(&config, &mut printer).await;

    assert!(matches!(result, Err(TxnLogsError::InvalidArgument(_))));
    assert!(printer.into_inner().is_empty());
}

#[tokio::test]
async fn test_invalid_config_is_fatal() {
    let mut config = test_config("TX123", "");
    config.logging.page_size = 0;
    let mut printer = ReportPrinter::new(Vec::new());

    let result = run(&config, &mut printer).await;

    match result {
        Err(TxnLogsError::Config(msg)) => assert!(msg.contains("page_size")),
        other => panic!("Expected Config error, got: {:?}", other.err()),
    }
}

#[tokio::test]
async fn test_unreachable_log_backend_completes_without_lookup() {
    let config = unreachable_logging("TX123", "");
    let mut printer = ReportPrinter::new(Vec::new());

    let report = run(&config, &mut printer).await.unwrap();

    assert!(report.investigation.records.is_empty());
    assert!(report.lookup.is_none());
    let out = String::from_utf8(printer.into_inner()).unwrap();
    assert!(out.contains("No transaction records found"));
}

#[tokio::test]
async fn test_no_records_falls_back_to_rrn_lookup() {
    let service = FakeTransactionsService::default();
    let addr = spawn_fake_server(service.clone()).await;
    let mut config = unreachable_logging("", "123456789012");
    config.transactions.addr = Some(addr.to_string());
    config.transactions.insecure = true;
    let mut printer = ReportPrinter::new(Vec::new());

    let report = run(&config, &mut printer).await.unwrap();

    let lookup = report.lookup.unwrap();
    assert_eq!(lookup.filters, vec!["rrn = 123456789012"]);
    assert_eq!(lookup.failures, 0);
    assert_eq!(*service.filters.lock().unwrap(), vec!["rrn = 123456789012"]);
    let out = String::from_utf8(printer.into_inner()).unwrap();
    assert!(out.contains("=== ListTransactions [rrn = 123456789012] ==="));
}

#[tokio::test]
async fn test_unreachable_transactions_api_is_fatal() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut config = unreachable_logging("TX123", "");
    config.transactions.addr = Some(addr.to_string());
    config.transactions.insecure = true;
    config.transactions.connect_timeout_secs = 2;
    let mut printer = ReportPrinter::new(Vec::new());

    let result = run(&config, &mut printer).await;

    assert!(matches!(result, Err(TxnLogsError::BackendConnection(_))));
}
