// Constants module - centralized default values for configuration
//
// Filter field names, payload keys and backend defaults live here so the
// filter builder, the log client and the config layer agree on them.

// =============================================================================
// Cloud Logging defaults
// =============================================================================

/// Default Cloud Logging API endpoint
pub const DEFAULT_LOGGING_ENDPOINT: &str = "https://staging-logging.sandbox.googleapis.com";

/// OAuth scope the access token is expected to carry (read-only)
pub const LOGGING_READ_SCOPE: &str = "https://www.googleapis.com/auth/logging.read";

/// Default number of entries requested per `entries:list` page
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Default maximum number of pages followed for a single query
pub const DEFAULT_MAX_PAGES: u32 = 20;

/// Default result ordering for `entries:list`
pub const DEFAULT_ORDER_BY: &str = "timestamp asc";

// =============================================================================
// Filter defaults
// =============================================================================

/// Log field holding the transaction ID
pub const DEFAULT_TRANSACTION_ID_FIELD: &str = "jsonPayload.transactionID";

/// Log field holding the message ID
pub const DEFAULT_MESSAGE_ID_FIELD: &str = "jsonPayload.messageID";

/// Literal template for the customer reference search term; `{rrn}` is replaced
pub const DEFAULT_CUSTOMER_REF_TEMPLATE: &str = "custRef=\"{rrn}\"";

/// Placeholder replaced by the RRN in the customer reference template
pub const RRN_PLACEHOLDER: &str = "{rrn}";

// =============================================================================
// Payload keys
// =============================================================================

/// JSON payload key carrying the transaction ID
pub const PAYLOAD_TRANSACTION_ID_KEY: &str = "transactionID";

/// JSON payload key carrying the message ID
pub const PAYLOAD_MESSAGE_ID_KEY: &str = "messageID";

/// JSON payload keys tried, in order, for the human readable message
pub const PAYLOAD_MESSAGE_KEYS: &[&str] = &["message", "msg"];

/// JSON payload keys recognised as a request identifier
pub const REQUEST_ID_KEYS: &[&str] = &["requestID", "requestId", "request_id"];

/// Default marker identifying a backend acknowledgment log (case-insensitive,
/// either spelling of "acknowledgment" matches)
pub const DEFAULT_BACKEND_ACK_MARKER: &str = "backend acknowledgment";

// =============================================================================
// Transactions API defaults
// =============================================================================

/// Default page size sent with `ListTransactions`
pub const DEFAULT_LIST_PAGE_SIZE: i32 = 100;

/// Default gRPC connect timeout in seconds
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

// =============================================================================
// Logging defaults
// =============================================================================

/// Default log level when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "info";
