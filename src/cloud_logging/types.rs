//! Log entry and transaction record types

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{PAYLOAD_MESSAGE_ID_KEY, PAYLOAD_MESSAGE_KEYS, PAYLOAD_TRANSACTION_ID_KEY};
use crate::error::{Result, TxnLogsError};

/// A Cloud Logging entry, as returned by `entries:list`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    #[serde(default)]
    pub log_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_payload: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_payload: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl LogEntry {
    /// Entry with a structured payload
    pub fn with_json(payload: Value) -> Self {
        Self {
            json_payload: Some(payload),
            ..Default::default()
        }
    }

    /// Entry with a plain text payload
    pub fn with_text(payload: impl Into<String>) -> Self {
        Self {
            text_payload: Some(payload.into()),
            ..Default::default()
        }
    }

    /// Top-level payload field rendered as a string
    ///
    /// Numbers are accepted as well since some emitters log IDs unquoted.
    pub fn payload_field(&self, key: &str) -> Option<String> {
        let value = self.json_payload.as_ref()?.get(key)?;
        value_as_string(value)
    }

    /// Human readable message: the payload's `message` field, else the text payload
    pub fn message(&self) -> Option<String> {
        PAYLOAD_MESSAGE_KEYS
            .iter()
            .find_map(|key| self.payload_field(key))
            .or_else(|| self.text_payload.clone())
    }
}

/// Render a scalar JSON value as a non-empty string
pub(crate) fn value_as_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Identifiers of one transaction record found in the logs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionLogDetail {
    transaction_id: String,
    message_id: String,
}

impl TransactionLogDetail {
    pub fn new(transaction_id: impl Into<String>, message_id: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            message_id: message_id.into(),
        }
    }

    /// Parse the record identifiers out of a structured log entry
    pub fn from_entry(entry: &LogEntry) -> Result<Self> {
        let entry_ref = entry.insert_id.as_deref().unwrap_or("<no insertId>");

        if entry.json_payload.is_none() {
            return Err(TxnLogsError::Parse(format!(
                "entry {} has no structured payload",
                entry_ref
            )));
        }

        let transaction_id = entry.payload_field(PAYLOAD_TRANSACTION_ID_KEY).ok_or_else(|| {
            TxnLogsError::Parse(format!(
                "entry {} is missing {}",
                entry_ref, PAYLOAD_TRANSACTION_ID_KEY
            ))
        })?;
        let message_id = entry.payload_field(PAYLOAD_MESSAGE_ID_KEY).ok_or_else(|| {
            TxnLogsError::Parse(format!(
                "entry {} is missing {}",
                entry_ref, PAYLOAD_MESSAGE_ID_KEY
            ))
        })?;

        Ok(Self::new(transaction_id, message_id))
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    pub fn message_id(&self) -> &str {
        &self.message_id
    }
}
