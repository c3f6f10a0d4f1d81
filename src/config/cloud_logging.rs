//! Cloud Logging backend configuration.
//!
//! Controls where `entries:list` requests go, which resources they search,
//! how pages are followed and how far back a query looks.
//!
//! Default values are sourced from `crate::constants`.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_LOGGING_ENDPOINT, DEFAULT_MAX_PAGES, DEFAULT_ORDER_BY, DEFAULT_PAGE_SIZE,
};

fn default_endpoint() -> String {
    DEFAULT_LOGGING_ENDPOINT.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

fn default_order_by() -> String {
    DEFAULT_ORDER_BY.to_string()
}

/// Resource name prefixes accepted by `entries:list`
const VALID_RESOURCE_PREFIXES: &[&str] =
    &["projects/", "organizations/", "folders/", "billingAccounts/"];

/// Cloud Logging backend configuration (YAML format)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudLoggingConfig {
    /// API endpoint (default: the sandbox staging endpoint)
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Resources to search, e.g. `projects/my-project`
    #[serde(default)]
    pub resource_names: Vec<String>,

    /// OAuth2 access token with the logging.read scope
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,

    /// Entries requested per page (1..=1000)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Upper bound on pages followed for a single query
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Result ordering (default: "timestamp asc")
    #[serde(default = "default_order_by")]
    pub order_by: String,

    /// Only search entries newer than this many hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookback_hours: Option<u32>,

    /// Per-request deadline; unset means no deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl Default for CloudLoggingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            resource_names: Vec::new(),
            access_token: None,
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            order_by: default_order_by(),
            lookback_hours: None,
            request_timeout_secs: None,
        }
    }
}

impl CloudLoggingConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(format!(
                "logging.endpoint '{}' must start with http:// or https://",
                self.endpoint
            ));
        }

        if self.resource_names.is_empty() {
            return Err(
                "logging.resource_names must list at least one resource (e.g. projects/my-project)"
                    .to_string(),
            );
        }

        for name in &self.resource_names {
            if !VALID_RESOURCE_PREFIXES.iter().any(|p| name.starts_with(p)) {
                return Err(format!(
                    "Invalid resource name '{}'. Expected one of: {}",
                    name,
                    VALID_RESOURCE_PREFIXES
                        .iter()
                        .map(|p| format!("{}<id>", p))
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
        }

        if self.page_size == 0 || self.page_size > 1000 {
            return Err(format!(
                "logging.page_size {} is out of range. Must be between 1 and 1000.",
                self.page_size
            ));
        }

        if self.max_pages == 0 {
            return Err("logging.max_pages must be >= 1".to_string());
        }

        if self.lookback_hours == Some(0) {
            return Err("logging.lookback_hours must be > 0 when set".to_string());
        }

        if self.request_timeout_secs == Some(0) {
            return Err("logging.request_timeout_secs must be > 0 when set".to_string());
        }

        Ok(())
    }
}
