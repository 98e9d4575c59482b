//! Rotation vectors: the rotation axis scaled by the rotation angle.
//!
//! Three coefficients and no constraint, which makes them the natural choice for
//! small increments and for optimization. Near the zero vector the axis is
//! undefined, so the conversions switch to first-order forms below
//! [`Real::dummy_precision`].

use crate::rotation::{ConvertFrom, Rotation, RotationKind};
use crate::rotations::angle_axis::{half_turn_tolerance, with_positive_lead};
use crate::rotations::{
    AngleAxis, EulerAnglesXyz, EulerAnglesZyx, RotationMatrix, RotationQuaternion,
};
use crate::scalar::Real;
use nalgebra::Vector3;
use std::fmt;

/// A rotation vector `angle * axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationVector<T: Real> {
    vector: Vector3<T>,
}

impl<T: Real> RotationVector<T> {
    #[inline]
    pub fn new(x: T, y: T, z: T) -> Self {
        Self::from_vector(Vector3::new(x, y, z))
    }

    #[inline]
    pub fn from_vector(vector: Vector3<T>) -> Self {
        Self { vector }
    }

    #[inline]
    pub fn vector(&self) -> Vector3<T> {
        self.vector
    }

    pub fn set_vector(&mut self, vector: Vector3<T>) {
        self.vector = vector;
    }

    #[inline]
    pub fn x(&self) -> T {
        self.vector.x
    }

    #[inline]
    pub fn y(&self) -> T {
        self.vector.y
    }

    #[inline]
    pub fn z(&self) -> T {
        self.vector.z
    }

    /// Rotation angle, the norm of the vector.
    pub fn angle(&self) -> T {
        self.vector.norm()
    }

    pub fn cast<U: Real>(&self) -> RotationVector<U> {
        RotationVector::from_vector(self.vector.map(|c| c.cast::<U>()))
    }
}

impl<T: Real> Rotation for RotationVector<T> {
    type Scalar = T;
    const KIND: RotationKind = RotationKind::RotationVector;

    fn identity() -> Self {
        Self::from_vector(Vector3::zeros())
    }

    fn inverted(&self) -> Self {
        Self::from_vector(-self.vector)
    }

    fn concatenate(&self, other: &Self) -> Self {
        let product =
            RotationQuaternion::<T>::convert_from(self) * RotationQuaternion::convert_from(other);
        Self::convert_from(&product)
    }

    /// Norm in `[0, pi]`. A vector already inside the ball is returned as is; a half
    /// turn gets the angle-axis sign rule; anything longer is wrapped through
    /// [`AngleAxis::unique`].
    fn unique(&self) -> Self {
        // Half the angle-axis band, so a wrapped result never lands on a boundary.
        let band = half_turn_tolerance::<T>() * T::constant(0.5);
        let norm = self.vector.norm();
        let pi = T::pi();
        if norm < pi - band {
            return *self;
        }
        if norm <= pi + band {
            return Self::from_vector(with_positive_lead(self.vector));
        }
        Self::convert_from(&AngleAxis::<T>::convert_from(self).unique())
    }

    /// Every finite vector is a valid rotation vector.
    fn fixed(&self) -> Self {
        *self
    }

    fn is_valid(&self, _tolerance: T) -> bool {
        self.vector.iter().all(|c| c.is_finite())
    }

    fn max_difference(&self, other: &Self) -> T {
        (self.vector - other.vector).amax()
    }

    fn rotate(&self, vector: &Vector3<T>) -> Vector3<T> {
        RotationMatrix::<T>::convert_from(self).rotate(vector)
    }
}

impl<T: Real> Default for RotationVector<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> fmt::Display for RotationVector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.vector.x, self.vector.y, self.vector.z)
    }
}

impl<D: Real, S: Real> ConvertFrom<RotationVector<S>> for RotationVector<D> {
    fn convert_from(source: &RotationVector<S>) -> Self {
        source.cast()
    }
}

impl<D: Real, S: Real> ConvertFrom<AngleAxis<S>> for RotationVector<D> {
    fn convert_from(source: &AngleAxis<S>) -> Self {
        let aa = source.cast::<D>();
        Self::from_vector(aa.axis() * aa.angle())
    }
}

/// Logarithm of the quaternion. Below [`Real::dummy_precision`] the first-order
/// form `2 v / w` is used; `w` is then close to +/-1.
impl<D: Real, S: Real> ConvertFrom<RotationQuaternion<S>> for RotationVector<D> {
    fn convert_from(source: &RotationQuaternion<S>) -> Self {
        let q = source.cast::<D>();
        let two = D::constant(2.0);
        let v = q.vector();
        let w = q.w();
        let norm = v.norm();

        if norm < D::dummy_precision() {
            return Self::from_vector(v * (two / w));
        }
        let angle = two * norm.atan2(w.abs());
        let scale = if w < D::zero() { -angle / norm } else { angle / norm };
        Self::from_vector(v * scale)
    }
}

impl<D: Real, S: Real> ConvertFrom<RotationMatrix<S>> for RotationVector<D> {
    fn convert_from(source: &RotationMatrix<S>) -> Self {
        Self::convert_from(&RotationQuaternion::<D>::convert_from(source))
    }
}

impl<D: Real, S: Real> ConvertFrom<EulerAnglesZyx<S>> for RotationVector<D> {
    fn convert_from(source: &EulerAnglesZyx<S>) -> Self {
        Self::convert_from(&RotationQuaternion::<D>::convert_from(source))
    }
}

impl<D: Real, S: Real> ConvertFrom<EulerAnglesXyz<S>> for RotationVector<D> {
    fn convert_from(source: &EulerAnglesXyz<S>) -> Self {
        Self::convert_from(&RotationQuaternion::<D>::convert_from(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_identity_is_zero_vector() {
        let rv = RotationVector::<f64>::identity();
        assert_eq!(rv.vector(), Vector3::zeros());
        assert_eq!(RotationMatrix::<f64>::convert_from(&rv), RotationMatrix::identity());
    }

    #[test]
    fn test_inverse_negates() {
        let rv = RotationVector::new(0.1, -0.2, 0.3);
        assert_eq!(rv.inverted(), RotationVector::new(-0.1, 0.2, -0.3));
    }

    #[test]
    fn test_small_quaternion_branch() {
        let q = RotationQuaternion::new_unchecked(-1.0, 1e-13, 0.0, 0.0);
        let rv = RotationVector::<f64>::convert_from(&q);
        assert_abs_diff_eq!(rv.x(), -2e-13, epsilon = 1e-27);
    }

    #[test]
    fn test_negative_quaternion_gives_short_vector() {
        let rv = RotationVector::new(0.0_f64, 0.4, 0.0);
        let q = RotationQuaternion::<f64>::convert_from(&rv);
        let negated = RotationQuaternion::from_unit_quaternion(q.unit_quaternion().negated());
        let back = RotationVector::<f64>::convert_from(&negated);
        assert!(back.max_difference(&rv) < 1e-15);
    }

    #[test]
    fn test_unique_shortens_long_vectors() {
        let rv = RotationVector::new(0.0, 0.0, 1.5 * PI);
        let u = rv.unique();
        assert_abs_diff_eq!(u.vector(), Vector3::new(0.0, 0.0, -0.5 * PI), epsilon = 1e-14);
        assert!(u.unique().max_difference(&u) < 1e-15);
        assert!(u.is_near(&rv, 1e-14));
    }

    #[test]
    fn test_unique_half_turn_is_stable() {
        let v = Vector3::new(1.9339, -0.2423, -2.4639);
        let rv = RotationVector::from_vector(v * (PI / v.norm()));
        let u = rv.unique();
        assert_eq!(u.unique(), u);
        assert!(u.x() > 0.0);
        assert_eq!(RotationVector::from_vector(-rv.vector()).unique(), u);
    }

    #[test]
    fn test_concatenate_about_same_axis_adds() {
        let a = RotationVector::new(0.2, 0.0, 0.0);
        let b = RotationVector::new(0.5, 0.0, 0.0);
        assert_abs_diff_eq!(a.concatenate(&b).x(), 0.7, epsilon = 1e-15);
    }

    #[test]
    fn test_rotate() {
        let rv = RotationVector::new(0.0, 0.0, PI / 2.0);
        assert_abs_diff_eq!(rv.rotate(&Vector3::x()), Vector3::y(), epsilon = 1e-15);
    }

    #[test]
    fn test_is_valid() {
        assert!(RotationVector::new(10.0, -3.0, 0.0).is_valid(0.0));
        assert!(!RotationVector::new(f64::NAN, 0.0, 0.0).is_valid(1.0));
    }
}
