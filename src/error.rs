//! Error types for panekit
//!
//! Layout itself is a total function: a layout pass never fails, no matter
//! how degenerate the geometry is. Errors only arise when constructing value
//! objects with invalid numeric inputs (negative insets, negative gaps,
//! percentages outside their domain).
//!
//! All errors use the `thiserror` crate for minimal boilerplate and proper
//! error trait implementations.

use thiserror::Error;

/// Result type alias for panekit operations
///
/// # Examples
///
/// ```
/// use panekit::{Insets, Result};
///
/// fn padding() -> Result<Insets> {
///   Insets::new(4.0, 8.0, 4.0, 8.0)
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by fallible value-object constructors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
  /// A dimension that must be non-negative was negative
  #[error("invalid {what}: {value} (must be >= 0)")]
  InvalidDimension {
    /// Which input was rejected (e.g. "inset", "spacing", "gap")
    what: &'static str,
    /// The offending value
    value: f32,
  },

  /// A percentage outside the accepted domain
  #[error("invalid percentage: {value} (must be finite)")]
  InvalidPercentage {
    /// The offending value
    value: f32,
  },
}
