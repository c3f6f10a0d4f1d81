//! Filter construction for Cloud Logging queries and the transactions API.
//!
//! Three kinds of filters are produced:
//! - the *identity* filter, which finds the transaction records for the
//!   transaction ID or RRN the user asked about,
//! - the *detail* filter, which selects every log line of one record,
//! - the *API* filters sent to `ListTransactions`.
//!
//! Identity and detail filters can additionally be *scoped* with a base
//! clause and a lookback window before they are sent.

use chrono::{DateTime, Duration, SecondsFormat, Utc};

use crate::cloud_logging::TransactionLogDetail;
use crate::config::FilterConfig;
use crate::constants::RRN_PLACEHOLDER;

/// Quote a value as a Cloud Logging string literal
///
/// Backslashes and double quotes inside the value are escaped.
pub fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

/// Filters for the `ListTransactions` call
///
/// One `transactionID = <id>` filter per discovered record, in order. When
/// no records were discovered, a single `rrn = <rrn>` fallback filter is
/// returned instead.
pub fn api_filters(rrn: &str, records: &[TransactionLogDetail]) -> Vec<String> {
    if records.is_empty() {
        return vec![format!("rrn = {}", rrn)];
    }
    records
        .iter()
        .map(|d| format!("transactionID = {}", d.transaction_id()))
        .collect()
}

/// Builds Cloud Logging filters from configured field names and templates
#[derive(Debug, Clone)]
pub struct FilterBuilder {
    transaction_id_field: String,
    message_id_field: String,
    customer_ref_template: String,
    base: Option<String>,
    lookback: Option<Duration>,
}

impl FilterBuilder {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            transaction_id_field: config.transaction_id_field.clone(),
            message_id_field: config.message_id_field.clone(),
            customer_ref_template: config.customer_ref_template.clone(),
            base: config
                .base
                .as_ref()
                .map(|b| b.trim().to_string())
                .filter(|b| !b.is_empty()),
            lookback: None,
        }
    }

    /// Restrict scoped queries to entries newer than `hours`
    pub fn with_lookback_hours(mut self, hours: Option<u32>) -> Self {
        self.lookback = hours.map(|h| Duration::hours(i64::from(h)));
        self
    }

    /// Filter selecting the records of a transaction
    ///
    /// A non-empty `txnid` wins and `rrn` is ignored. Otherwise the RRN is
    /// searched for through the customer reference literal, e.g.
    /// `"custRef=\"123456789012\""`.
    pub fn identity_filter(&self, txnid: &str, rrn: &str) -> String {
        let txnid = txnid.trim();
        if !txnid.is_empty() {
            return format!("{} = {}", self.transaction_id_field, quote(txnid));
        }
        let literal = self
            .customer_ref_template
            .replace(RRN_PLACEHOLDER, rrn.trim());
        quote(&literal)
    }

    /// Filter selecting every log line of one record
    pub fn detail_filter(&self, transaction_id: &str, message_id: &str) -> String {
        format!(
            "{} = {} AND {} = {}",
            self.transaction_id_field,
            quote(transaction_id),
            self.message_id_field,
            quote(message_id)
        )
    }

    /// Add the base clause and lookback window, relative to now
    pub fn scoped(&self, filter: &str) -> String {
        self.scoped_at(filter, Utc::now())
    }

    /// Add the base clause and lookback window, relative to `now`
    pub fn scoped_at(&self, filter: &str, now: DateTime<Utc>) -> String {
        let mut clauses = Vec::with_capacity(3);
        if let Some(base) = &self.base {
            clauses.push(format!("({})", base));
        }
        if let Some(lookback) = self.lookback {
            let since = (now - lookback).to_rfc3339_opts(SecondsFormat::Secs, true);
            clauses.push(format!("timestamp >= {}", quote(&since)));
        }

        if clauses.is_empty() {
            return filter.to_string();
        }

        clauses.insert(0, format!("({})", filter));
        clauses.join(" AND ")
    }
}

impl Default for FilterBuilder {
    fn default() -> Self {
        Self::new(&FilterConfig::default())
    }
}
