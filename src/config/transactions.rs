//! Transactions API (gRPC) configuration.
//!
//! The remote lookup phase only runs when `addr` is set. Transport security
//! is TLS unless `insecure` is explicitly turned on.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_LIST_PAGE_SIZE};

fn default_page_size() -> i32 {
    DEFAULT_LIST_PAGE_SIZE
}

fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

/// Transactions API configuration (YAML format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsConfig {
    /// Service endpoint, `host:port` or a full URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addr: Option<String>,

    /// Use a plaintext channel instead of TLS
    #[serde(default)]
    pub insecure: bool,

    /// Parent resource sent with every list request
    #[serde(default)]
    pub parent: String,

    /// Page size sent with every list request
    #[serde(default = "default_page_size")]
    pub page_size: i32,

    /// Connect timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Per-call deadline; unset means no deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for TransactionsConfig {
    fn default() -> Self {
        Self {
            addr: None,
            insecure: false,
            parent: String::new(),
            page_size: default_page_size(),
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: None,
        }
    }
}

impl TransactionsConfig {
    /// Whether the remote lookup phase should run
    pub fn is_enabled(&self) -> bool {
        self.addr
            .as_deref()
            .map(|a| !a.trim().is_empty())
            .unwrap_or(false)
    }

    /// Endpoint URI with a scheme matching the transport security setting
    pub fn endpoint_uri(&self) -> Option<String> {
        let addr = self.addr.as_deref()?.trim();
        if addr.is_empty() {
            return None;
        }
        if addr.starts_with("http://") || addr.starts_with("https://") {
            return Some(addr.to_string());
        }
        let scheme = if self.insecure { "http" } else { "https" };
        Some(format!("{}://{}", scheme, addr))
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(uri) = self.endpoint_uri() {
            if self.insecure && uri.starts_with("https://") {
                return Err(format!(
                    "transactions.addr '{}' uses https:// but insecure is set",
                    uri
                ));
            }
            if !self.insecure && uri.starts_with("http://") {
                return Err(format!(
                    "transactions.addr '{}' uses http:// which requires insecure: true",
                    uri
                ));
            }
        }
        if self.page_size <= 0 {
            return Err(format!(
                "transactions.page_size {} must be > 0",
                self.page_size
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err("transactions.connect_timeout_secs must be > 0".to_string());
        }
        if self.request_timeout_secs == Some(0) {
            return Err("transactions.request_timeout_secs must be > 0 when set".to_string());
        }
        Ok(())
    }
}
