//! Common types and utilities.

/// Hashing error type.
pub use crate::error::Error;

/// Hashing result type.
pub type Result<T> = core::result::Result<T, Error>;
