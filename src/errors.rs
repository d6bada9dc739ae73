//! Unified error types for the gifting core.
//!
//! Every exposed mutation either succeeds completely or fails with one of
//! these variants leaving the cart untouched. Advisory conditions (duplicate
//! recipients) and blocked step transitions are modeled as values, not
//! errors; see [`crate::core::recipient`] and [`crate::core::gates`].

use thiserror::Error;

/// Unified error type for all gifting-core operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// A required field was missing or empty
    #[error("Validation error on '{field}': {message}")]
    Validation {
        /// Name of the offending field
        field: String,
        /// Description of the requirement
        message: String,
    },

    /// A gift-line change would push a box past its capacity ceiling
    #[error("Capacity exceeded: box holds at most {capacity} items, requested total {attempted}")]
    CapacityExceeded {
        /// Maximum total gift-line quantity the box allows
        capacity: u32,
        /// Total quantity the rejected call would have produced
        attempted: u32,
    },

    /// Defaults-store error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
