//! Error handling for the hotel aggregator
//!
//! This module provides the error taxonomy shared by every stage of the
//! aggregation pipeline and the user-facing reporting used by the CLI.
//!
//! # Architecture
//!
//! - [`HotelError`] - Enumerated failure cases of the core and its boundary
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//! - [`ErrorResponse`] - Wire shape (`error_code`, `message`) handed to callers
//!
//! # Error Categories
//!
//! - **Supplier fetch failures**: [`HotelError::SupplierUnreachable`],
//!   [`HotelError::SupplierStatus`] and [`HotelError::SupplierPayload`]. Raised by
//!   the fetcher and propagated unchanged through reconciliation and the cache.
//!   A refresh never degrades into a partial or empty dataset.
//! - **Validation**: [`HotelError::InvalidRequest`] is raised only by the request
//!   boundary ([`crate::query::params`]), never by the core itself.
//! - **Configuration**: [`HotelError::ConfigError`] for unusable config files.
//!
//! Missing or malformed fields inside an otherwise successful supplier payload
//! are *not* errors: the schema mapper degrades them to absent canonical fields.
//!
//! # Examples
//!
//! ```rust,no_run
//! use hotel_aggregator::core::{HotelError, ErrorResponse};
//!
//! let error = HotelError::SupplierStatus {
//!     supplier: "acme".to_string(),
//!     url: "https://example.com/acme".to_string(),
//!     status: 503,
//! };
//!
//! assert_eq!(error.error_code(), "UPSTREAM_UNAVAILABLE");
//! assert_eq!(error.http_status_code(), 502);
//!
//! let response = ErrorResponse::from(&error);
//! println!("{}", serde_json::to_string(&response).unwrap());
//! ```

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The main error type for hotel aggregation.
///
/// Every variant carries owned strings only, so the type is cheaply [`Clone`].
/// Cloning matters for the cache: when a single-flight refresh fails, the same
/// failure is handed to every caller that was awaiting it.
///
/// # Supplier fetch failures
///
/// - [`SupplierUnreachable`] - connection, DNS or timeout failures
/// - [`SupplierStatus`] - the supplier answered with a non-success HTTP status
/// - [`SupplierPayload`] - the body was not a JSON array of records
///
/// [`SupplierUnreachable`]: HotelError::SupplierUnreachable
/// [`SupplierStatus`]: HotelError::SupplierStatus
/// [`SupplierPayload`]: HotelError::SupplierPayload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HotelError {
    /// Supplier endpoint could not be reached
    ///
    /// # Fields
    /// - `supplier`: Registry name of the supplier
    /// - `url`: Endpoint that was requested
    /// - `reason`: Transport-level failure description
    #[error("Supplier '{supplier}' is unreachable at {url}: {reason}")]
    SupplierUnreachable {
        /// Registry name of the supplier
        supplier: String,
        /// Endpoint that was requested
        url: String,
        /// Transport-level failure description
        reason: String,
    },

    /// Supplier answered with a non-success status code
    #[error("Supplier '{supplier}' returned HTTP {status} from {url}")]
    SupplierStatus {
        /// Registry name of the supplier
        supplier: String,
        /// Endpoint that was requested
        url: String,
        /// HTTP status code returned by the supplier
        status: u16,
    },

    /// Supplier payload could not be parsed as a list of records
    #[error("Supplier '{supplier}' returned a malformed payload: {reason}")]
    SupplierPayload {
        /// Registry name of the supplier
        supplier: String,
        /// Why the payload was rejected
        reason: String,
    },

    /// Caller-supplied query is malformed
    ///
    /// Raised by the request boundary before the core is consulted.
    #[error("{message}")]
    InvalidRequest {
        /// Message shown to the caller verbatim
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Generic error for cases not covered by specific variants
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl HotelError {
    /// Shorthand for an [`HotelError::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Whether this error originated from a supplier retrieval.
    #[must_use]
    pub const fn is_supplier_failure(&self) -> bool {
        matches!(
            self,
            Self::SupplierUnreachable { .. }
                | Self::SupplierStatus { .. }
                | Self::SupplierPayload { .. }
        )
    }

    /// Stable machine-readable code for the boundary layer.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::SupplierUnreachable { .. }
            | Self::SupplierStatus { .. }
            | Self::SupplierPayload { .. } => "UPSTREAM_UNAVAILABLE",
            Self::InvalidRequest { .. } => "INVALID_REQUEST",
            Self::ConfigError { .. } | Self::Other { .. } => "INTERNAL_ERROR",
        }
    }

    /// HTTP status the boundary layer should answer with.
    ///
    /// Supplier outages map to `502 Bad Gateway`.
    #[must_use]
    pub const fn http_status_code(&self) -> u16 {
        match self {
            Self::SupplierUnreachable { .. }
            | Self::SupplierStatus { .. }
            | Self::SupplierPayload { .. } => 502,
            Self::InvalidRequest { .. } => 400,
            Self::ConfigError { .. } | Self::Other { .. } => 500,
        }
    }
}

/// Structured error handed to callers of the query surface.
///
/// Serializes as `{"error_code": ..., "message": ...}`; the HTTP status is kept
/// alongside for the boundary layer but is not part of the body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. `INVALID_REQUEST`)
    pub error_code: String,
    /// Human-readable message
    pub message: String,
    /// HTTP status the response should carry
    #[serde(skip)]
    pub http_status_code: u16,
}

impl From<&HotelError> for ErrorResponse {
    fn from(error: &HotelError) -> Self {
        Self {
            error_code: error.error_code().to_string(),
            message: error.to_string(),
            http_status_code: error.http_status_code(),
        }
    }
}

/// Error context wrapper that provides user-friendly messages for the CLI.
///
/// ```rust,no_run
/// use hotel_aggregator::core::{HotelError, ErrorContext};
///
/// let context = ErrorContext::new(HotelError::ConfigError {
///     message: "unknown supplier 'foo'".to_string(),
/// })
/// .with_suggestion("Remove the entry from the [suppliers] table");
/// context.display();
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: HotelError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: HotelError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`].
///
/// Recognizes [`HotelError`] anywhere in the `anyhow` chain and attaches
/// tailored suggestions; everything else is reported as [`HotelError::Other`]
/// with the full context chain as the message.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(hotel_error) = error.chain().find_map(|e| e.downcast_ref::<HotelError>()) {
        return create_error_context(hotel_error.clone());
    }

    ErrorContext::new(HotelError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: HotelError) -> ErrorContext {
    match &error {
        HotelError::SupplierUnreachable { supplier, .. } => {
            let supplier = supplier.clone();
            ErrorContext::new(error)
                .with_details("A refresh needs every supplier to respond; no partial dataset is served")
                .with_suggestion(format!(
                    "Check network access to supplier '{supplier}' or override its URL in the [suppliers] config table"
                ))
        }
        HotelError::SupplierStatus { .. } => ErrorContext::new(error)
            .with_details("The supplier endpoint answered, but not with a success status")
            .with_suggestion("Retry later; the supplier may be temporarily unavailable"),
        HotelError::SupplierPayload { .. } => ErrorContext::new(error)
            .with_details("Supplier endpoints must return a JSON array of hotel records"),
        HotelError::InvalidRequest { .. } => ErrorContext::new(error).with_suggestion(
            "Pass exactly one of --destination-id or --hotel-ids; --page-size must be between 1 and 100",
        ),
        HotelError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Fix the configuration file or pass a different one with --config"),
        HotelError::Other { .. } => ErrorContext::new(error),
    }
}
