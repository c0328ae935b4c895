//! Validation error taxonomy.
//!
//! Per the error handling design, these are *programming* errors:
//! null/invalid arguments, non-finite scalars, out-of-range
//! configuration. Geometric degeneracies (zero-length segments,
//! coincident centers, failed EPA refinement) are never reported
//! here — they are absorbed into a well-defined fallback by the
//! narrow phase and primitive contact generators.

use thiserror::Error;

/// Errors surfaced synchronously at the call site for invalid input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CollisionError {
    /// A scalar that must be finite was NaN or infinite.
    #[error("field `{field}` must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A radius or size was negative.
    #[error("field `{field}` must be >= 0, got {value}")]
    NegativeValue {
        /// Name of the offending field.
        field: &'static str,
        /// The offending value.
        value: f64,
    },

    /// A broad-phase cell size was zero or negative.
    #[error("broad-phase cell size must be > 0, got {0}")]
    InvalidCellSize(f64),

    /// A percentage/stiffness/friction-like value fell outside its
    /// documented range.
    #[error("field `{field}` must be in [{min}, {max}], got {value}")]
    OutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// Lower bound of the valid range.
        min: f64,
        /// Upper bound of the valid range.
        max: f64,
        /// The offending value.
        value: f64,
    },

    /// `World::step` was called with a non-positive or non-finite
    /// time step.
    #[error("dt must be finite and > 0, got {0}")]
    NonPositiveDt(f64),

    /// `World::step` was called without a bound `RigidBodyAdapter`.
    #[error("World::step requires a body adapter to be bound first")]
    MissingBodyAdapter,

    /// A required collection or callback argument was absent.
    #[error("required argument `{0}` was null/missing")]
    NullInput(&'static str),
}

/// Convenience result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CollisionError>;

pub(crate) fn require_finite(field: &'static str, value: crate::Real) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CollisionError::NonFinite {
            field,
            value: value as f64,
        })
    }
}

pub(crate) fn require_non_negative(field: &'static str, value: crate::Real) -> Result<()> {
    require_finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(CollisionError::NegativeValue {
            field,
            value: value as f64,
        })
    }
}

pub(crate) fn require_range(
    field: &'static str,
    value: crate::Real,
    min: crate::Real,
    max: crate::Real,
) -> Result<()> {
    require_finite(field, value)?;
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(CollisionError::OutOfRange {
            field,
            min: min as f64,
            max: max as f64,
            value: value as f64,
        })
    }
}
