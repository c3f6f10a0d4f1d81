// Argument validation performed once, before any backend is contacted

use crate::error::{Result, TxnLogsError};

/// Ensure at least one of `rrn` or `txnid` is supplied
///
/// Whitespace-only values count as empty.
pub fn validate_params(rrn: &str, txnid: &str) -> Result<()> {
    if rrn.trim().is_empty() && txnid.trim().is_empty() {
        return Err(TxnLogsError::InvalidArgument(
            "at least one of rrn or txnid must be provided".to_string(),
        ));
    }
    Ok(())
}
