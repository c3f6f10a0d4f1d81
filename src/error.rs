// Error types module

use thiserror::Error;

/// Centralized error type for txnlogs
///
/// Every backend call returns `Result<T, TxnLogsError>`; callers decide
/// whether to abort or keep going from [`TxnLogsError::is_fatal`].
#[derive(Debug, Clone, Error)]
pub enum TxnLogsError {
    /// Neither a transaction ID nor an RRN was supplied
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration errors (invalid YAML, missing env vars, bad values)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Could not establish a connection to a backend
    #[error("Backend connection error: {0}")]
    BackendConnection(String),

    /// A request was sent but the backend could not be reached
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend rejected the query or returned an undecodable response
    #[error("Query error: {0}")]
    Query(String),

    /// A single log entry could not be interpreted
    #[error("Parse error: {0}")]
    Parse(String),

    /// The report could not be written (e.g. closed stdout)
    #[error("Output error: {0}")]
    Output(String),
}

impl From<std::io::Error> for TxnLogsError {
    fn from(e: std::io::Error) -> Self {
        TxnLogsError::Output(e.to_string())
    }
}

/// Error categories, used for logging fields and continue/abort decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    Config,
    BackendConnection,
    BackendUnavailable,
    Query,
    Parse,
    Output,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Config => "config",
            ErrorKind::BackendConnection => "backend_connection",
            ErrorKind::BackendUnavailable => "backend_unavailable",
            ErrorKind::Query => "query",
            ErrorKind::Parse => "parse",
            ErrorKind::Output => "output",
        }
    }
}

impl TxnLogsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TxnLogsError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            TxnLogsError::Config(_) => ErrorKind::Config,
            TxnLogsError::BackendConnection(_) => ErrorKind::BackendConnection,
            TxnLogsError::BackendUnavailable(_) => ErrorKind::BackendUnavailable,
            TxnLogsError::Query(_) => ErrorKind::Query,
            TxnLogsError::Parse(_) => ErrorKind::Parse,
            TxnLogsError::Output(_) => ErrorKind::Output,
        }
    }

    /// Fatal errors stop the run; everything else is logged and skipped
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidArgument
                | ErrorKind::Config
                | ErrorKind::BackendConnection
                | ErrorKind::Output
        )
    }
}

pub type Result<T> = std::result::Result<T, TxnLogsError>;
