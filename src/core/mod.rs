//! Core types shared by every stage of the aggregation pipeline
//!
//! Currently this is the error taxonomy:
//! - [`HotelError`] - Enumerated failure modes, cheaply cloneable
//! - [`ErrorResponse`] - The `{error_code, message}` shape returned to callers
//! - [`ErrorContext`] - User-facing wrapper with details and suggestions
//! - [`user_friendly_error`] - Turn any `anyhow` chain into an [`ErrorContext`]

pub mod error;

pub use error::{ErrorContext, ErrorResponse, HotelError, user_friendly_error};
