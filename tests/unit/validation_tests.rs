// Argument validation unit tests

use rstest::rstest;
use txnlogs::error::{ErrorKind, TxnLogsError};
use txnlogs::validation::validate_params;

#[rstest]
#[case("", "")]
#[case(" ", "")]
#[case("", "\n")]
fn test_missing_identifiers_fail_with_invalid_argument(#[case] rrn: &str, #[case] txnid: &str) {
    let err = validate_params(rrn, txnid).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(err.is_fatal());
    assert!(matches!(err, TxnLogsError::InvalidArgument(_)));
}

#[rstest]
#[case("123456789012", "")]
#[case("", "TX123")]
#[case("123456789012", "TX123")]
fn test_one_identifier_is_enough(#[case] rrn: &str, #[case] txnid: &str) {
    assert!(validate_params(rrn, txnid).is_ok());
}
