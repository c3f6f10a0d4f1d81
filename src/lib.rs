// txnlogs library
// Correlates Cloud Logging entries for a payment transaction and
// cross-checks them against the issuer switch transactions API.

pub mod cloud_logging;
pub mod config;
pub mod constants;
pub mod correlation;
pub mod error;
pub mod filter;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod transactions;
pub mod validation;
