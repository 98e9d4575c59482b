//! Tolerances used by the validating constructors.

/// Maximum deviation of `R * R^T` from identity, and of `det(R)` from 1, accepted
/// when building a [`RotationMatrix`](crate::RotationMatrix) from raw coefficients.
pub const MATRIX_TOLERANCE: f64 = 1e-4;

/// Maximum deviation of the quaternion norm from 1 accepted when building a
/// [`UnitQuaternion`](crate::UnitQuaternion) from raw coefficients.
pub const QUATERNION_TOLERANCE: f64 = 1e-6;

/// Upper bound on the re-orthogonalization steps taken by `RotationMatrix::fix`.
pub const MAX_ORTHOGONALIZATION_STEPS: usize = 4;

/// Whether validating constructors check their input.
///
/// Checks run in debug builds, and in release builds with the `validate` feature.
pub const VALIDATION_ENABLED: bool = cfg!(any(debug_assertions, feature = "validate"));
