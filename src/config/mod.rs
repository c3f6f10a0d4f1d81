// Configuration module

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::DEFAULT_LOG_LEVEL;
use crate::logging::LogFormat;

pub mod cloud_logging;
pub mod filter;
pub mod transactions;

pub use cloud_logging::CloudLoggingConfig;
pub use filter::FilterConfig;
pub use transactions::TransactionsConfig;

/// Everything a run needs, passed explicitly into [`crate::pipeline::run`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub logging: CloudLoggingConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub transactions: TransactionsConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
}

/// Identifiers of the transaction being investigated
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryConfig {
    #[serde(default)]
    pub txnid: String,
    #[serde(default)]
    pub rrn: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

/// Diagnostic log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    /// Level used when RUST_LOG is unset (default: info)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub txnid: Option<String>,
    pub rrn: Option<String>,
    pub addr: Option<String>,
    pub insecure: bool,
    pub project: Option<String>,
    pub lookback_hours: Option<u32>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

impl Config {
    pub fn from_yaml_with_env(yaml: &str) -> Result<Self, String> {
        // Replace ${VAR_NAME} with environment variable values
        let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;

        for caps in re.captures_iter(yaml) {
            let var_name = &caps[1];
            std::env::var(var_name).map_err(|_| {
                format!(
                    "Environment variable '{}' is referenced but not set",
                    var_name
                )
            })?;
        }

        let substituted = re.replace_all(yaml, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        });

        // An empty file is a valid "all defaults" config
        if substituted.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&substituted).map_err(|e| e.to_string())
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_yaml_with_env(&yaml)
    }

    /// Apply command-line overrides; flags always win over the file
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(txnid) = overrides.txnid {
            self.query.txnid = txnid;
        }
        if let Some(rrn) = overrides.rrn {
            self.query.rrn = rrn;
        }
        if let Some(addr) = overrides.addr {
            self.transactions.addr = Some(addr);
        }
        if overrides.insecure {
            self.transactions.insecure = true;
        }
        if let Some(project) = overrides.project {
            self.logging.resource_names = vec![format!("projects/{}", project)];
        }
        if let Some(hours) = overrides.lookback_hours {
            self.logging.lookback_hours = Some(hours);
        }
        if let Some(level) = overrides.log_level {
            self.diagnostics.log_level = level;
        }
        if let Some(format) = overrides.log_format {
            self.diagnostics.log_format = format;
        }
    }

    /// Validate backend settings. The txnid/rrn presence check is separate
    /// (see [`crate::validation::validate_params`]).
    pub fn validate(&self) -> Result<(), String> {
        self.logging.validate()?;
        self.filter.validate()?;
        self.transactions.validate()?;

        if self.diagnostics.log_level.trim().is_empty() {
            return Err("diagnostics.log_level cannot be empty".to_string());
        }

        Ok(())
    }
}
