//! Angle-axis rotations.
//!
//! A rotation by `angle` radians about a unit `axis`. `(a, n)`, `(-a, -n)` and
//! `(a + 2k*pi, n)` are the same rotation; the canonical form has `angle` in
//! `[0, pi]`, and at exactly `pi` the first nonzero axis component is positive. The
//! zero rotation is canonically `(0, +X)`.

use crate::rotation::{ConvertFrom, Rotation, RotationKind};
use crate::rotations::{
    EulerAnglesXyz, EulerAnglesZyx, RotationMatrix, RotationQuaternion, RotationVector,
};
use crate::scalar::{wrap_pm_pi, Real};
use nalgebra::Vector3;
use std::fmt;

/// A rotation angle with a unit rotation axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngleAxis<T: Real> {
    angle: T,
    axis: Vector3<T>,
}

impl<T: Real> AngleAxis<T> {
    /// Creates an angle-axis rotation. `axis` is expected to be unit length; see
    /// [`fix`](Rotation::fix) to normalize it.
    #[inline]
    pub fn new(angle: T, axis: Vector3<T>) -> Self {
        Self { angle, axis }
    }

    /// Creates an angle-axis rotation from four scalars.
    #[inline]
    pub fn from_components(angle: T, x: T, y: T, z: T) -> Self {
        Self::new(angle, Vector3::new(x, y, z))
    }

    #[inline]
    pub fn angle(&self) -> T {
        self.angle
    }

    #[inline]
    pub fn axis(&self) -> Vector3<T> {
        self.axis
    }

    pub fn set_angle(&mut self, angle: T) {
        self.angle = angle;
    }

    pub fn set_axis(&mut self, axis: Vector3<T>) {
        self.axis = axis;
    }

    pub fn cast<U: Real>(&self) -> AngleAxis<U> {
        AngleAxis::new(self.angle.cast(), self.axis.map(|c| c.cast::<U>()))
    }
}

impl<T: Real> Rotation for AngleAxis<T> {
    type Scalar = T;
    const KIND: RotationKind = RotationKind::AngleAxis;

    fn identity() -> Self {
        Self::new(T::zero(), Vector3::x())
    }

    fn inverted(&self) -> Self {
        Self::new(-self.angle, self.axis)
    }

    fn concatenate(&self, other: &Self) -> Self {
        let product =
            RotationQuaternion::<T>::convert_from(self) * RotationQuaternion::convert_from(other);
        Self::convert_from(&product)
    }

    fn unique(&self) -> Self {
        let mut angle = wrap_pm_pi(self.angle);
        let mut axis = self.axis;
        if angle < T::zero() {
            angle = -angle;
            axis = -axis;
        }
        if angle == T::zero() {
            return Self::identity();
        }
        if T::pi() - angle <= half_turn_tolerance() {
            angle = T::pi();
            axis = with_positive_lead(axis);
        }
        Self::new(angle, axis)
    }

    /// Normalizes the axis. A zero axis collapses to the identity.
    fn fixed(&self) -> Self {
        let norm = self.axis.norm();
        if norm <= T::dummy_precision() {
            tracing::trace!(norm = %norm, "angle-axis with degenerate axis reset to identity");
            return Self::identity();
        }
        Self::new(self.angle, self.axis / norm)
    }

    fn is_valid(&self, tolerance: T) -> bool {
        self.angle.is_finite() && (self.axis.norm() - T::one()).abs() <= tolerance
    }

    fn max_difference(&self, other: &Self) -> T {
        let angle_difference = (self.angle - other.angle).abs();
        angle_difference.max((self.axis - other.axis).amax())
    }

    fn rotate(&self, vector: &Vector3<T>) -> Vector3<T> {
        let (s, c) = self.angle.sin_cos();
        let n = &self.axis;
        vector * c + n.cross(vector) * s + n * (n.dot(vector) * (T::one() - c))
    }
}

/// Distance from `pi` inside which an angle is taken as a half turn. Covers the
/// rounding of `wrap_pm_pi` and of a recomputed vector norm.
pub(crate) fn half_turn_tolerance<T: Real>() -> T {
    T::constant(16.0) * T::machine_epsilon() * T::pi()
}

/// `v` or `-v`, whichever has a positive first nonzero component.
pub(crate) fn with_positive_lead<T: Real>(v: Vector3<T>) -> Vector3<T> {
    match v.iter().find(|c| **c != T::zero()) {
        Some(c) if *c < T::zero() => -v,
        _ => v,
    }
}

impl<T: Real> Default for AngleAxis<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> fmt::Display for AngleAxis<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, {} {} {}",
            self.angle, self.axis.x, self.axis.y, self.axis.z
        )
    }
}

impl<D: Real, S: Real> ConvertFrom<AngleAxis<S>> for AngleAxis<D> {
    fn convert_from(source: &AngleAxis<S>) -> Self {
        source.cast()
    }
}

/// The sign of `q` is absorbed into the axis, so the angle is always in `[0, pi]`.
/// Only a vector part of exactly zero leaves the axis undefined; that gives the
/// identity.
impl<D: Real, S: Real> ConvertFrom<RotationQuaternion<S>> for AngleAxis<D> {
    fn convert_from(source: &RotationQuaternion<S>) -> Self {
        let q = source.cast::<D>();
        let v = q.vector();
        let norm = v.norm();
        if norm == D::zero() {
            return Self::identity();
        }
        let angle = D::constant(2.0) * norm.atan2(q.w().abs());
        let axis = if q.w() < D::zero() { -v / norm } else { v / norm };
        Self::new(angle, axis)
    }
}

impl<D: Real, S: Real> ConvertFrom<RotationMatrix<S>> for AngleAxis<D> {
    fn convert_from(source: &RotationMatrix<S>) -> Self {
        Self::convert_from(&RotationQuaternion::<D>::convert_from(source))
    }
}

impl<D: Real, S: Real> ConvertFrom<RotationVector<S>> for AngleAxis<D> {
    fn convert_from(source: &RotationVector<S>) -> Self {
        let v = source.cast::<D>().vector();
        let angle = v.norm();
        if angle == D::zero() {
            return Self::identity();
        }
        Self::new(angle, v / angle)
    }
}

impl<D: Real, S: Real> ConvertFrom<EulerAnglesZyx<S>> for AngleAxis<D> {
    fn convert_from(source: &EulerAnglesZyx<S>) -> Self {
        Self::convert_from(&RotationQuaternion::<D>::convert_from(source))
    }
}

impl<D: Real, S: Real> ConvertFrom<EulerAnglesXyz<S>> for AngleAxis<D> {
    fn convert_from(source: &EulerAnglesXyz<S>) -> Self {
        Self::convert_from(&RotationQuaternion::<D>::convert_from(source))
    }
}
