// Filter builder unit tests

use rstest::rstest;
use txnlogs::cloud_logging::TransactionLogDetail;
use txnlogs::config::FilterConfig;
use txnlogs::filter::{api_filters, FilterBuilder};

#[rstest]
#[case("123456789012")]
#[case("000000000001")]
#[case("RRN-with-dash")]
fn test_rrn_only_selects_quoted_customer_reference(#[case] rrn: &str) {
    let builder = FilterBuilder::default();

    let filter = builder.identity_filter("", rrn);

    assert_eq!(filter, format!("\"custRef=\\\"{}\\\"\"", rrn));
}

#[rstest]
#[case("TX123", "")]
#[case("TX123", "123456789012")]
fn test_txnid_wins_and_rrn_is_ignored(#[case] txnid: &str, #[case] rrn: &str) {
    let builder = FilterBuilder::default();

    let filter = builder.identity_filter(txnid, rrn);

    assert_eq!(filter, "jsonPayload.transactionID = \"TX123\"");
    if !rrn.is_empty() {
        assert!(!filter.contains(rrn));
    }
}

#[test]
fn test_whitespace_txnid_falls_back_to_rrn() {
    let builder = FilterBuilder::default();
    assert_eq!(
        builder.identity_filter("   ", "42"),
        "\"custRef=\\\"42\\\"\""
    );
}

#[test]
fn test_detail_filter_selects_both_identifiers() {
    let builder = FilterBuilder::default();

    let filter = builder.detail_filter("TX123", "M1");

    assert_eq!(
        filter,
        "jsonPayload.transactionID = \"TX123\" AND jsonPayload.messageID = \"M1\""
    );
}

#[test]
fn test_custom_field_names_and_template() {
    let config = FilterConfig {
        transaction_id_field: "labels.txn".to_string(),
        message_id_field: "labels.msg".to_string(),
        customer_ref_template: "customerReference={rrn}".to_string(),
        ..Default::default()
    };
    let builder = FilterBuilder::new(&config);

    assert_eq!(builder.identity_filter("T", ""), "labels.txn = \"T\"");
    assert_eq!(builder.identity_filter("", "R"), "\"customerReference=R\"");
    assert_eq!(
        builder.detail_filter("T", "M"),
        "labels.txn = \"T\" AND labels.msg = \"M\""
    );
}

#[test]
fn test_api_filters_fall_back_to_single_rrn_filter() {
    let filters = api_filters("123456789012", &[]);
    assert_eq!(filters, vec!["rrn = 123456789012".to_string()]);
}

#[test]
fn test_api_filters_one_per_record_in_order() {
    let records = vec![
        TransactionLogDetail::new("A", "M1"),
        TransactionLogDetail::new("B", "M2"),
    ];

    let filters = api_filters("123456789012", &records);

    assert_eq!(
        filters,
        vec!["transactionID = A".to_string(), "transactionID = B".to_string()]
    );
}

#[test]
fn test_api_filters_keep_repeated_transaction_ids() {
    // Two messages of the same transaction still produce two lookups
    let records = vec![
        TransactionLogDetail::new("A", "M1"),
        TransactionLogDetail::new("A", "M2"),
    ];

    assert_eq!(api_filters("", &records).len(), 2);
}
