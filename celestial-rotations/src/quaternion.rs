//! Quaternion algebra underneath [`RotationQuaternion`](crate::RotationQuaternion).
//!
//! Two layers, each wrapping the one below rather than extending it:
//!
//! - [`Quaternion`]: any four coefficients `(w, x, y, z)`. No norm constraint; the
//!   default value is the zero quaternion. Supports the Hamilton product, conjugate,
//!   inverse and normalization.
//! - [`UnitQuaternion`]: a quaternion whose norm is 1 within
//!   [`QUATERNION_TOLERANCE`](crate::constants::QUATERNION_TOLERANCE). Its inverse is
//!   its conjugate.
//!
//! Coefficients are always listed scalar part first: `w, x, y, z`.
//!
//! ```
//! use celestial_rotations::{Quaternion, UnitQuaternion};
//!
//! let q = Quaternion::new(0.0_f64, 3.0, 0.0, 4.0);
//! assert_eq!(q.norm(), 5.0);
//!
//! let unit = q.to_unit_quaternion().unwrap();
//! assert!((unit.x() - 0.6).abs() < 1e-15);
//!
//! let product = unit * unit.conjugated();
//! assert!((product.w() - 1.0).abs() < 1e-15);
//! ```

use crate::constants::{QUATERNION_TOLERANCE, VALIDATION_ENABLED};
use crate::errors::{RotationError, RotationResult, ValidityFailure};
use crate::rotation::RotationKind;
use crate::scalar::Real;
use nalgebra::Vector3;
use std::fmt;

/// A quaternion with no norm constraint.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quaternion<T: Real> {
    inner: nalgebra::Quaternion<T>,
}

impl<T: Real> Quaternion<T> {
    /// Creates a quaternion from its coefficients.
    #[inline]
    pub fn new(w: T, x: T, y: T, z: T) -> Self {
        Self {
            inner: nalgebra::Quaternion::new(w, x, y, z),
        }
    }

    /// The zero quaternion.
    #[inline]
    pub fn zero() -> Self {
        Self::new(T::zero(), T::zero(), T::zero(), T::zero())
    }

    /// Builds a quaternion from a scalar part and a vector part.
    #[inline]
    pub fn from_parts(w: T, vector: Vector3<T>) -> Self {
        Self::new(w, vector.x, vector.y, vector.z)
    }

    /// Wraps an `nalgebra` quaternion.
    #[inline]
    pub fn from_nalgebra(inner: nalgebra::Quaternion<T>) -> Self {
        Self { inner }
    }

    /// The underlying `nalgebra` quaternion.
    #[inline]
    pub fn as_nalgebra(&self) -> &nalgebra::Quaternion<T> {
        &self.inner
    }

    #[inline]
    pub fn w(&self) -> T {
        self.inner.coords[3]
    }

    #[inline]
    pub fn x(&self) -> T {
        self.inner.coords[0]
    }

    #[inline]
    pub fn y(&self) -> T {
        self.inner.coords[1]
    }

    #[inline]
    pub fn z(&self) -> T {
        self.inner.coords[2]
    }

    /// The vector part `(x, y, z)`.
    #[inline]
    pub fn vector(&self) -> Vector3<T> {
        Vector3::new(self.x(), self.y(), self.z())
    }

    /// Coefficients in `[w, x, y, z]` order.
    #[inline]
    pub fn to_array(&self) -> [T; 4] {
        [self.w(), self.x(), self.y(), self.z()]
    }

    /// Overwrites all four coefficients.
    pub fn set_coefficients(&mut self, w: T, x: T, y: T, z: T) {
        self.inner = nalgebra::Quaternion::new(w, x, y, z);
    }

    #[inline]
    pub fn norm(&self) -> T {
        self.inner.norm()
    }

    #[inline]
    pub fn norm_squared(&self) -> T {
        self.inner.norm_squared()
    }

    /// Negates the vector part.
    #[inline]
    pub fn conjugated(&self) -> Self {
        Self::from_nalgebra(self.inner.conjugate())
    }

    /// Multiplicative inverse `conj(q) / |q|^2`.
    ///
    /// The zero quaternion has no inverse; its coefficients come back non-finite.
    pub fn inverted(&self) -> Self {
        let n2 = self.norm_squared();
        let c = self.inner.conjugate();
        Self::from_nalgebra(c / n2)
    }

    /// Returns this quaternion scaled to unit norm.
    pub fn normalized(&self) -> Self {
        Self::from_nalgebra(self.inner.normalize())
    }

    /// Scales this quaternion to unit norm in place.
    pub fn normalize(&mut self) -> &mut Self {
        *self = self.normalized();
        self
    }

    /// Negates every coefficient.
    #[inline]
    pub fn negated(&self) -> Self {
        Self::from_nalgebra(-self.inner)
    }

    /// Normalizes into a [`UnitQuaternion`].
    ///
    /// Fails with [`ValidityFailure::ZeroNorm`] when the norm is below
    /// [`Real::dummy_precision`], since no direction can be recovered.
    pub fn to_unit_quaternion(&self) -> RotationResult<UnitQuaternion<T>> {
        let norm = self.norm();
        if norm <= T::dummy_precision() {
            return Err(RotationError::invalid_representation(
                RotationKind::Quaternion,
                ValidityFailure::ZeroNorm,
                &format!("quaternion norm {} cannot be normalized", norm),
            ));
        }
        Ok(UnitQuaternion::new_unchecked_from(self.normalized()))
    }

    /// Converts the coefficients to another precision.
    pub fn cast<U: Real>(&self) -> Quaternion<U> {
        Quaternion::new(
            self.w().cast(),
            self.x().cast(),
            self.y().cast(),
            self.z().cast(),
        )
    }

    /// Largest absolute difference between corresponding coefficients.
    pub fn max_difference(&self, other: &Self) -> T {
        (self.inner.coords - other.inner.coords).amax()
    }
}

impl<T: Real> Default for Quaternion<T> {
    fn default() -> Self {
        Self::zero()
    }
}

/// Hamilton product.
impl<T: Real> std::ops::Mul for Quaternion<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::from_nalgebra(self.inner * rhs.inner)
    }
}

impl<T: Real> fmt::Display for Quaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.w(), self.x(), self.y(), self.z())
    }
}

/// A quaternion of unit norm.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitQuaternion<T: Real> {
    quaternion: Quaternion<T>,
}

impl<T: Real> UnitQuaternion<T> {
    /// The identity `(1, 0, 0, 0)`.
    #[inline]
    pub fn identity() -> Self {
        Self::new_unchecked(T::one(), T::zero(), T::zero(), T::zero())
    }

    /// Creates a unit quaternion, checking the norm.
    ///
    /// Fails with [`ValidityFailure::NotUnitNorm`] when `|q|` differs from 1 by more
    /// than [`QUATERNION_TOLERANCE`]. The check is skipped in release builds without
    /// the `validate` feature.
    pub fn try_new(w: T, x: T, y: T, z: T) -> RotationResult<Self> {
        Self::try_from_quaternion(Quaternion::new(w, x, y, z))
    }

    /// Wraps a quaternion, checking the norm like [`try_new`](Self::try_new).
    pub fn try_from_quaternion(quaternion: Quaternion<T>) -> RotationResult<Self> {
        if VALIDATION_ENABLED {
            check_unit_norm(&quaternion)?;
        }
        Ok(Self { quaternion })
    }

    /// Creates a unit quaternion without checking the norm.
    #[inline]
    pub fn new_unchecked(w: T, x: T, y: T, z: T) -> Self {
        Self::new_unchecked_from(Quaternion::new(w, x, y, z))
    }

    /// Wraps a quaternion without checking the norm.
    #[inline]
    pub fn new_unchecked_from(quaternion: Quaternion<T>) -> Self {
        Self { quaternion }
    }

    #[inline]
    pub fn w(&self) -> T {
        self.quaternion.w()
    }

    #[inline]
    pub fn x(&self) -> T {
        self.quaternion.x()
    }

    #[inline]
    pub fn y(&self) -> T {
        self.quaternion.y()
    }

    #[inline]
    pub fn z(&self) -> T {
        self.quaternion.z()
    }

    #[inline]
    pub fn vector(&self) -> Vector3<T> {
        self.quaternion.vector()
    }

    #[inline]
    pub fn to_array(&self) -> [T; 4] {
        self.quaternion.to_array()
    }

    /// The unconstrained quaternion with the same coefficients.
    #[inline]
    pub fn quaternion(&self) -> Quaternion<T> {
        self.quaternion
    }

    #[inline]
    pub fn norm(&self) -> T {
        self.quaternion.norm()
    }

    #[inline]
    pub fn conjugated(&self) -> Self {
        Self::new_unchecked_from(self.quaternion.conjugated())
    }

    /// For a unit quaternion the inverse is the conjugate.
    #[inline]
    pub fn inverted(&self) -> Self {
        self.conjugated()
    }

    #[inline]
    pub fn negated(&self) -> Self {
        Self::new_unchecked_from(self.quaternion.negated())
    }

    /// Rescales to exactly unit norm, removing accumulated drift.
    pub fn normalized(&self) -> Self {
        Self::new_unchecked_from(self.quaternion.normalized())
    }

    /// Whether `|q|` is within `tolerance` of 1.
    pub fn is_valid(&self, tolerance: T) -> bool {
        (self.norm() - T::one()).abs() <= tolerance
    }

    pub fn cast<U: Real>(&self) -> UnitQuaternion<U> {
        UnitQuaternion::new_unchecked_from(self.quaternion.cast())
    }

    pub fn max_difference(&self, other: &Self) -> T {
        self.quaternion.max_difference(&other.quaternion)
    }
}

impl<T: Real> Default for UnitQuaternion<T> {
    fn default() -> Self {
        Self::identity()
    }
}

/// The product of two unit quaternions is a unit quaternion.
impl<T: Real> std::ops::Mul for UnitQuaternion<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new_unchecked_from(self.quaternion * rhs.quaternion)
    }
}

impl<T: Real> fmt::Display for UnitQuaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.quaternion, f)
    }
}

fn check_unit_norm<T: Real>(quaternion: &Quaternion<T>) -> RotationResult<()> {
    let norm = quaternion.norm();
    if (norm - T::one()).abs() > T::constant(QUATERNION_TOLERANCE) {
        return Err(RotationError::invalid_representation(
            RotationKind::Quaternion,
            ValidityFailure::NotUnitNorm,
            &format!("quaternion norm is {}, expected 1", norm),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zero() {
        let q = Quaternion::<f64>::default();
        assert_eq!(q.to_array(), [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(UnitQuaternion::<f64>::default().to_array(), [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_accessors_follow_wxyz_order() {
        let q = Quaternion::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(q.w(), 1.0);
        assert_eq!(q.x(), 2.0);
        assert_eq!(q.y(), 3.0);
        assert_eq!(q.z(), 4.0);
        assert_eq!(q.vector(), Vector3::new(2.0, 3.0, 4.0));
        assert_eq!(q.to_string(), "1 2 3 4");
    }

    #[test]
    fn test_hamilton_product() {
        // i * j = k
        let i = Quaternion::new(0.0, 1.0, 0.0, 0.0);
        let j = Quaternion::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!((i * j).to_array(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!((j * i).to_array(), [0.0, 0.0, 0.0, -1.0]);
    }

    #[test]
    fn test_inverse() {
        let q = Quaternion::new(1.0_f64, 2.0, -1.0, 0.5);
        let product = q * q.inverted();
        assert!((product.w() - 1.0).abs() < 1e-15);
        assert!(product.vector().norm() < 1e-15);
    }

    #[test]
    fn test_normalize_in_place() {
        let mut q = Quaternion::new(2.0, 0.0, 0.0, 0.0);
        q.normalize();
        assert_eq!(q.to_array(), [1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_to_unit_quaternion_rejects_zero() {
        let err = Quaternion::<f64>::zero().to_unit_quaternion().unwrap_err();
        assert_eq!(err.failure(), ValidityFailure::ZeroNorm);
    }

    #[test]
    #[cfg(any(debug_assertions, feature = "validate"))]
    fn test_unit_quaternion_validation() {
        assert!(UnitQuaternion::try_new(1.0, 0.0, 0.0, 0.0).is_ok());
        assert!(UnitQuaternion::try_new(1.0 + 5e-7, 0.0, 0.0, 0.0).is_ok());
        let err = UnitQuaternion::try_new(1.0, 0.1, 0.0, 0.0).unwrap_err();
        assert_eq!(err.failure(), ValidityFailure::NotUnitNorm);
    }

    #[test]
    fn test_unit_quaternion_inverse_is_conjugate() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let q = UnitQuaternion::try_new(h, 0.0, h, 0.0).unwrap();
        let product = q * q.inverted();
        assert!(product.max_difference(&UnitQuaternion::identity()) < 1e-15);
        assert_eq!(q.inverted().y(), -h);
    }

    #[test]
    fn test_cast_to_f32() {
        let q = Quaternion::new(0.5_f64, 0.5, 0.5, 0.5);
        let narrow: Quaternion<f32> = q.cast();
        assert_eq!(narrow.to_array(), [0.5_f32; 4]);
    }
}
