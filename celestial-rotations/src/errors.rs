//! Error types for rotation construction.
//!
//! Conversions, composition, inversion and canonicalization are total, so the only
//! failure this crate reports is a caller handing a validating constructor a set of
//! coefficients that does not lie on the rotation manifold.
//!
//! | Constructor | Check | Tolerance |
//! |-------------|-------|-----------|
//! | [`RotationMatrix::try_new`](crate::RotationMatrix::try_new) | `R * R^T = I`, `det(R) = 1` | `1e-4` |
//! | [`UnitQuaternion::try_new`](crate::UnitQuaternion::try_new) | `|q| = 1` | `1e-6` |
//! | [`RotationQuaternion::try_new`](crate::RotationQuaternion::try_new) | `|q| = 1` | `1e-6` |
//!
//! The checks run in debug builds and are compiled out of release builds unless the
//! `validate` feature is enabled. Callers that need guaranteed validity in release
//! builds should call `is_valid` themselves or repair values with `fix`.
//!
//! ```
//! use celestial_rotations::{RotationMatrix, RotationError, ValidityFailure};
//!
//! let result = RotationMatrix::<f64>::try_new(
//!     2.0, 0.0, 0.0,
//!     0.0, 1.0, 0.0,
//!     0.0, 0.0, 1.0,
//! );
//! # if cfg!(debug_assertions) {
//! let err = result.unwrap_err();
//! assert!(matches!(
//!     err,
//!     RotationError::InvalidRepresentation { failure: ValidityFailure::NotOrthogonal, .. }
//! ));
//! # }
//! ```

use crate::rotation::RotationKind;
use thiserror::Error;

/// Classification of manifold-constraint violations.
///
/// Used with [`RotationError::InvalidRepresentation`] to tell the failure modes apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidityFailure {
    /// `R * R^T` differs from identity beyond tolerance.
    NotOrthogonal,
    /// Determinant differs from +1 beyond tolerance (scaling or reflection).
    NotProperRotation,
    /// Quaternion norm differs from 1 beyond tolerance.
    NotUnitNorm,
    /// Quaternion norm is zero, so no unit quaternion can be derived from it.
    ZeroNorm,
}

/// Error raised by validating constructors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RotationError {
    /// Coefficients fail the representation's manifold constraint.
    #[error("Invalid {kind} ({failure:?}): {message}")]
    InvalidRepresentation {
        kind: RotationKind,
        failure: ValidityFailure,
        message: String,
    },
}

/// Convenience alias for `Result<T, RotationError>`.
pub type RotationResult<T> = Result<T, RotationError>;

impl RotationError {
    /// Creates an [`InvalidRepresentation`](Self::InvalidRepresentation) error.
    pub fn invalid_representation(
        kind: RotationKind,
        failure: ValidityFailure,
        reason: &str,
    ) -> Self {
        tracing::debug!(%kind, ?failure, reason, "rejected rotation coefficients");
        Self::InvalidRepresentation {
            kind,
            failure,
            message: reason.to_string(),
        }
    }

    /// Returns the representation whose constructor rejected its input.
    pub fn kind(&self) -> RotationKind {
        match self {
            Self::InvalidRepresentation { kind, .. } => *kind,
        }
    }

    /// Returns which constraint was violated.
    pub fn failure(&self) -> ValidityFailure {
        match self {
            Self::InvalidRepresentation { failure, .. } => *failure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_representation_message() {
        let err = RotationError::invalid_representation(
            RotationKind::Matrix,
            ValidityFailure::NotProperRotation,
            "determinant is -1",
        );
        assert_eq!(
            err.to_string(),
            "Invalid rotation matrix (NotProperRotation): determinant is -1"
        );
    }

    #[test]
    fn test_accessors() {
        let err = RotationError::invalid_representation(
            RotationKind::Quaternion,
            ValidityFailure::NotUnitNorm,
            "norm is 2",
        );
        assert_eq!(err.kind(), RotationKind::Quaternion);
        assert_eq!(err.failure(), ValidityFailure::NotUnitNorm);
        assert!(err.to_string().contains("rotation quaternion"));
    }

    #[test]
    fn test_send_sync() {
        fn _assert_send<T: Send>() {}
        fn _assert_sync<T: Sync>() {}
        _assert_send::<RotationError>();
        _assert_sync::<RotationError>();
    }
}
