//! Error types for the nesting planner.

use thiserror::Error;

/// Result alias used throughout the LaserNest crates.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while validating a nesting request.
///
/// Every variant is produced before the first placement attempt. A run that
/// cannot place all requested parts is not an error; see
/// [`NestingOutcome`](crate::result::NestingOutcome).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A part has unusable dimensions.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A sheet specification has unusable dimensions or cost.
    #[error("Invalid sheet: {0}")]
    InvalidSheet(String),

    /// A constraint or run parameter is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The part list or sheet catalog is empty.
    #[error("Empty input: {0}")]
    EmptyInput(String),

    /// Two parts share the same identifier.
    #[error("Duplicate part id: {0}")]
    DuplicatePart(String),
}
