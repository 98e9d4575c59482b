//! The rotation algebra shared by every representation.
//!
//! Two traits tie the representations together:
//!
//! - [`ConvertFrom`] is the conversion dispatch table. It is implemented once for every
//!   ordered pair (destination, source) of the six [`RotationKind`]s, including the
//!   same-kind pairs, and for every combination of source and destination precision.
//!   A missing pair is a compile error, not a runtime fallback.
//!
//! - [`Rotation`] is the capability every representation provides: identity, inverse,
//!   native composition, canonical form, drift correction. On top of those it supplies
//!   the cross-representation operations (`compose`, `same_rotation`, `is_near`,
//!   `set_from`) purely in terms of [`ConvertFrom`].
//!
//! # Composition order
//!
//! `a.compose(&b)` is the rotation that applies `b` first and `a` second, i.e.
//! `R(a) * R(b)` in matrix form. The result is always in `a`'s representation; `b` is
//! converted into it first when the kinds differ.
//!
//! ```
//! use celestial_rotations::{AngleAxis, RotationMatrix, RotationQuaternion, Rotation};
//! use nalgebra::Vector3;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let quarter_z = AngleAxis::new(FRAC_PI_2, Vector3::z());
//! let quarter_x = RotationQuaternion::<f64>::from_rotation(&AngleAxis::new(FRAC_PI_2, Vector3::x()));
//!
//! // Mixed kinds: the quaternion is converted to angle-axis before composing.
//! let combined = quarter_z.compose(&quarter_x);
//!
//! let as_matrix = RotationMatrix::<f64>::from_rotation(&quarter_z)
//!     .compose(&quarter_x);
//! assert!(combined.is_near(&as_matrix, 1e-12));
//! ```
//!
//! # Equality
//!
//! Derived `PartialEq` compares raw coefficients, which is rarely what you want for
//! rotations: `q` and `-q` are the same rotation. Use
//! [`same_rotation`](Rotation::same_rotation) (canonical coefficients within a
//! tolerance) or [`is_near`](Rotation::is_near) (angle of the relative rotation).

use crate::rotations::RotationQuaternion;
use crate::scalar::Real;
use nalgebra::Vector3;
use std::fmt;

/// The closed set of rotation representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationKind {
    Matrix,
    Quaternion,
    AngleAxis,
    RotationVector,
    EulerAnglesZyx,
    EulerAnglesXyz,
}

impl RotationKind {
    /// Every kind, in dispatch-table order.
    pub const ALL: [RotationKind; 6] = [
        RotationKind::Matrix,
        RotationKind::Quaternion,
        RotationKind::AngleAxis,
        RotationKind::RotationVector,
        RotationKind::EulerAnglesZyx,
        RotationKind::EulerAnglesXyz,
    ];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            RotationKind::Matrix => "rotation matrix",
            RotationKind::Quaternion => "rotation quaternion",
            RotationKind::AngleAxis => "angle-axis",
            RotationKind::RotationVector => "rotation vector",
            RotationKind::EulerAnglesZyx => "Euler angles ZYX",
            RotationKind::EulerAnglesXyz => "Euler angles XYZ",
        }
    }

    /// Number of scalars the representation stores.
    pub fn coefficient_count(&self) -> usize {
        match self {
            RotationKind::Matrix => 9,
            RotationKind::Quaternion | RotationKind::AngleAxis => 4,
            RotationKind::RotationVector
            | RotationKind::EulerAnglesZyx
            | RotationKind::EulerAnglesXyz => 3,
        }
    }
}

impl fmt::Display for RotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Conversion from another representation.
///
/// Total: every implementation produces a valid destination from a valid source.
pub trait ConvertFrom<Source>: Sized {
    fn convert_from(source: &Source) -> Self;
}

/// Capability interface implemented by every rotation representation.
pub trait Rotation: Copy + fmt::Debug + fmt::Display {
    /// Numeric precision of the coefficients.
    type Scalar: Real;

    /// Tag of this representation.
    const KIND: RotationKind;

    /// The rotation that leaves every vector unchanged.
    fn identity() -> Self;

    /// The algebraic inverse.
    fn inverted(&self) -> Self;

    /// Native composition of two values of the same representation: applies
    /// `other` first, then `self`.
    fn concatenate(&self, other: &Self) -> Self;

    /// The canonical member of this value's equivalence class.
    fn unique(&self) -> Self;

    /// This value re-projected onto the valid manifold.
    fn fixed(&self) -> Self;

    /// Whether the coefficients satisfy the manifold constraint within `tolerance`.
    fn is_valid(&self, tolerance: Self::Scalar) -> bool;

    /// Largest absolute difference between corresponding raw coefficients.
    fn max_difference(&self, other: &Self) -> Self::Scalar;

    /// Applies this rotation to a vector.
    fn rotate(&self, vector: &Vector3<Self::Scalar>) -> Vector3<Self::Scalar>;

    /// Returns the representation tag of this value.
    fn kind(&self) -> RotationKind {
        Self::KIND
    }

    fn invert(&mut self) -> &mut Self {
        *self = self.inverted();
        self
    }

    fn set_unique(&mut self) -> &mut Self {
        *self = self.unique();
        self
    }

    fn fix(&mut self) -> &mut Self {
        *self = self.fixed();
        self
    }

    fn set_identity(&mut self) -> &mut Self {
        *self = Self::identity();
        self
    }

    /// Builds this representation from any other one.
    fn from_rotation<R>(other: &R) -> Self
    where
        Self: ConvertFrom<R>,
    {
        Self::convert_from(other)
    }

    /// Converts this value into another representation.
    fn convert_to<D>(&self) -> D
    where
        D: ConvertFrom<Self>,
    {
        D::convert_from(self)
    }

    /// Replaces this value with the conversion of `other`.
    fn set_from<R>(&mut self, other: &R) -> &mut Self
    where
        Self: ConvertFrom<R>,
    {
        *self = Self::convert_from(other);
        self
    }

    /// Applies `other` first, then `self`. The result keeps `self`'s representation.
    fn compose<R>(&self, other: &R) -> Self
    where
        Self: ConvertFrom<R>,
    {
        self.concatenate(&Self::convert_from(other))
    }

    /// Equality as rotations: both sides in this representation, canonicalized,
    /// coefficients within `tolerance`.
    ///
    /// Near a canonical-form boundary (a quaternion with `w` close to zero, Euler
    /// angles near +/-pi) two close rotations can land on opposite sides; prefer
    /// [`is_near`](Self::is_near) there.
    fn same_rotation<R>(&self, other: &R, tolerance: Self::Scalar) -> bool
    where
        Self: ConvertFrom<R>,
    {
        let other = Self::convert_from(other);
        self.unique().max_difference(&other.unique()) <= tolerance
    }

    /// Angle of the rotation taking `self` to `other`, in [0, pi].
    fn disparity_angle<R>(&self, other: &R) -> Self::Scalar
    where
        RotationQuaternion<Self::Scalar>: ConvertFrom<Self> + ConvertFrom<R>,
    {
        let lhs = RotationQuaternion::<Self::Scalar>::convert_from(self);
        let rhs = RotationQuaternion::<Self::Scalar>::convert_from(other);
        lhs.inverted().concatenate(&rhs).angle()
    }

    /// Whether the relative rotation between `self` and `other` is below
    /// `angle_tolerance` radians.
    fn is_near<R>(&self, other: &R, angle_tolerance: Self::Scalar) -> bool
    where
        RotationQuaternion<Self::Scalar>: ConvertFrom<Self> + ConvertFrom<R>,
    {
        self.disparity_angle(other) <= angle_tolerance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(RotationKind::Matrix.to_string(), "rotation matrix");
        assert_eq!(RotationKind::EulerAnglesZyx.name(), "Euler angles ZYX");
    }

    #[test]
    fn test_kind_table_is_exhaustive() {
        let total: usize = RotationKind::ALL
            .iter()
            .map(RotationKind::coefficient_count)
            .sum();
        assert_eq!(RotationKind::ALL.len(), 6);
        assert_eq!(total, 9 + 4 + 4 + 3 + 3 + 3);
    }
}
