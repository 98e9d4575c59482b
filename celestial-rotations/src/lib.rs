//! Rotation representations for 3-D orientation.
//!
//! `celestial-rotations` provides six interchangeable ways of writing down a rotation
//! of 3-D space, exact conversions between every pair of them, and a small algebra
//! (composition, inversion, canonical form, drift correction) that works the same way
//! on all of them. Every type is generic over `f32` and `f64`.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`rotations`] | [`RotationMatrix`], [`RotationQuaternion`], [`AngleAxis`], [`RotationVector`], [`EulerAnglesZyx`], [`EulerAnglesXyz`] |
//! | [`rotation`] | The [`Rotation`] algebra, [`ConvertFrom`] dispatch, [`RotationKind`] |
//! | [`quaternion`] | Unconstrained [`Quaternion`] and [`UnitQuaternion`] |
//! | [`scalar`] | The [`Real`] precision trait and angle wrapping |
//! | [`constants`] | Validation tolerances and iteration limits |
//! | [`errors`] | [`RotationError`] and [`RotationResult`] |
//!
//! # Conversions
//!
//! Any representation converts into any other, across precisions, with
//! [`Rotation::from_rotation`] or [`Rotation::convert_to`]:
//!
//! ```
//! use celestial_rotations::{AngleAxis, EulerAnglesZyx, RotationMatrix, RotationVector, Rotation};
//! use nalgebra::Vector3;
//!
//! let aa = AngleAxis::new(0.5_f64, Vector3::y());
//! let m: RotationMatrix<f32> = aa.convert_to();
//! let zyx = EulerAnglesZyx::<f64>::from_rotation(&m);
//! assert!((zyx.pitch() - 0.5).abs() < 1e-6);
//!
//! let rv = RotationVector::<f64>::from_rotation(&zyx);
//! assert!(rv.is_near(&aa, 1e-6));
//! ```
//!
//! # Composition
//!
//! `a.compose(&b)` applies `b` first and then `a`, and returns a value in `a`'s
//! representation whatever the representation of `b`.
//!
//! ```
//! use celestial_rotations::{RotationMatrix, RotationQuaternion, Rotation};
//!
//! let a = RotationQuaternion::<f64>::from_rotation(&RotationMatrix::about_x(0.2));
//! let b = RotationMatrix::about_z(1.0);
//! let ab = a.compose(&b);
//! assert!(ab.is_near(&(RotationMatrix::about_x(0.2) * b), 1e-14));
//! ```
//!
//! # Design Notes
//!
//! - **Active rotations**: every representation rotates vectors in a fixed frame;
//!   `RotationMatrix::about_z(pi/2)` takes X to Y.
//!
//! - **Total operations**: conversion, composition, inversion and canonicalization
//!   never fail. The only fallible calls are the validating constructors, and their
//!   checks only run in debug builds or with the `validate` feature.
//!
//! - **Raw vs. rotational equality**: `==` compares coefficients. Use
//!   [`Rotation::same_rotation`] or [`Rotation::is_near`] to compare rotations.
//!
//! - **Logging**: rejected constructor input is reported at `debug` level and drift
//!   corrections at `trace` level through `tracing`. No subscriber is installed.

pub mod constants;
pub mod errors;
pub mod quaternion;
pub mod rotation;
pub mod rotations;
pub mod scalar;

pub use errors::{RotationError, RotationResult, ValidityFailure};
pub use quaternion::{Quaternion, UnitQuaternion};
pub use rotation::{ConvertFrom, Rotation, RotationKind};
pub use rotations::{
    AngleAxis, EulerAnglesXyz, EulerAnglesZyx, RotationMatrix, RotationQuaternion,
    RotationVector,
};
pub use scalar::Real;

pub mod test_helpers;
