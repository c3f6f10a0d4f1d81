// Integration tests for report write failures
//
// Losing stdout ends the run: the error surfaces as `Output` and no
// further backend calls are made.

use std::sync::Arc;

use crate::integration::test_harness::{log_line, record_entry, test_config, BrokenPipe};
use txnlogs::cloud_logging::{MockLogBackend, TransactionLogDetail};
use txnlogs::error::TxnLogsError;
use txnlogs::pipeline::investigate;
use txnlogs::report::ReportPrinter;
use txnlogs::transactions::{
    remote_lookup, ListTransactionsResponse, MockTransactionsApi, TransactionSummary,
};

#[tokio::test]
async fn test_write_failure_stops_correlation_after_first_record() {
    let backend = MockLogBackend::new();
    backend.add_entries(
        "\"custRef=\\\"123456789012\\\"\"",
        vec![
            record_entry("A", "M1"),
            record_entry("B", "M2"),
            record_entry("C", "M3"),
        ],
    );
    backend.add_entries(
        "jsonPayload.transactionID = \"A\"",
        vec![log_line("A", "M1", "Debit posted")],
    );
    let config = test_config("", "123456789012");
    let mut printer = ReportPrinter::new(BrokenPipe);

    let result = investigate(&config, Arc::new(backend.clone()), &mut printer).await;

    match result {
        Err(e @ TxnLogsError::Output(_)) => assert!(e.is_fatal()),
        other => panic!("Expected Output error, got: {:?}", other.map(|i| i.records)),
    }
    // Identity query plus the detail fetch for A; B and C are never queried
    assert_eq!(backend.call_count(), 2);
}

#[tokio::test]
async fn test_write_failure_on_empty_result_skips_correlation() {
    let backend = MockLogBackend::new();
    let config = test_config("TX404", "");
    let mut printer = ReportPrinter::new(BrokenPipe);

    let result = investigate(&config, Arc::new(backend.clone()), &mut printer).await;

    assert!(matches!(result, Err(TxnLogsError::Output(_))));
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn test_write_failure_stops_remote_lookup() {
    let api = MockTransactionsApi::new();
    api.respond(
        "transactionID = A",
        ListTransactionsResponse {
            transactions: vec![TransactionSummary {
                transaction_id: "A".to_string(),
                ..Default::default()
            }],
            next_page_token: String::new(),
        },
    );
    let records = vec![
        TransactionLogDetail::new("A", "M1"),
        TransactionLogDetail::new("B", "M2"),
    ];
    let mut printer = ReportPrinter::new(BrokenPipe);

    let result = remote_lookup(&api, "123456789012", &records, &mut printer).await;

    match result {
        Err(TxnLogsError::Output(msg)) => assert!(msg.contains("report sink closed")),
        other => panic!("Expected Output error, got: {:?}", other),
    }
    assert_eq!(api.filters(), vec!["transactionID = A"]);
}
