//! Filter template configuration.
//!
//! Field names and literal templates used when building Cloud Logging
//! filters, plus the marker that identifies backend acknowledgment logs.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BACKEND_ACK_MARKER, DEFAULT_CUSTOMER_REF_TEMPLATE, DEFAULT_MESSAGE_ID_FIELD,
    DEFAULT_TRANSACTION_ID_FIELD, RRN_PLACEHOLDER,
};

fn default_transaction_id_field() -> String {
    DEFAULT_TRANSACTION_ID_FIELD.to_string()
}

fn default_message_id_field() -> String {
    DEFAULT_MESSAGE_ID_FIELD.to_string()
}

fn default_customer_ref_template() -> String {
    DEFAULT_CUSTOMER_REF_TEMPLATE.to_string()
}

fn default_backend_ack_marker() -> String {
    DEFAULT_BACKEND_ACK_MARKER.to_string()
}

/// Filter configuration (YAML format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Log field compared against the transaction ID
    #[serde(default = "default_transaction_id_field")]
    pub transaction_id_field: String,

    /// Log field compared against the message ID
    #[serde(default = "default_message_id_field")]
    pub message_id_field: String,

    /// Search literal for an RRN; must contain `{rrn}`
    #[serde(default = "default_customer_ref_template")]
    pub customer_ref_template: String,

    /// Extra clause ANDed onto every query (e.g. a logName restriction)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    /// Text identifying a backend acknowledgment log
    #[serde(default = "default_backend_ack_marker")]
    pub backend_ack_marker: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            transaction_id_field: default_transaction_id_field(),
            message_id_field: default_message_id_field(),
            customer_ref_template: default_customer_ref_template(),
            base: None,
            backend_ack_marker: default_backend_ack_marker(),
        }
    }
}

impl FilterConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.transaction_id_field.trim().is_empty() {
            return Err("filter.transaction_id_field cannot be empty".to_string());
        }
        if self.message_id_field.trim().is_empty() {
            return Err("filter.message_id_field cannot be empty".to_string());
        }
        if !self.customer_ref_template.contains(RRN_PLACEHOLDER) {
            return Err(format!(
                "filter.customer_ref_template '{}' must contain the {} placeholder",
                self.customer_ref_template, RRN_PLACEHOLDER
            ));
        }
        if self.backend_ack_marker.trim().is_empty() {
            return Err("filter.backend_ack_marker cannot be empty".to_string());
        }
        Ok(())
    }
}
