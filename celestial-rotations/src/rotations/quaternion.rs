//! Rotation quaternions.
//!
//! A [`RotationQuaternion`] is a [`UnitQuaternion`] read as a rotation. `q` and `-q`
//! describe the same rotation; [`unique`](Rotation::unique) picks the one with a
//! non-negative scalar part. Composition is the Hamilton product, inversion is the
//! conjugate, and drift correction is renormalization.

use crate::errors::RotationResult;
use crate::quaternion::{Quaternion, UnitQuaternion};
use crate::rotation::{ConvertFrom, Rotation, RotationKind};
use crate::rotations::{AngleAxis, EulerAnglesXyz, EulerAnglesZyx, RotationMatrix, RotationVector};
use crate::scalar::Real;
use nalgebra::{Matrix3, Vector3};
use std::fmt;

/// A unit quaternion representing a rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationQuaternion<T: Real> {
    unit: UnitQuaternion<T>,
}

impl<T: Real> RotationQuaternion<T> {
    /// Creates a rotation quaternion from `(w, x, y, z)`, checking the norm.
    ///
    /// ```
    /// use celestial_rotations::RotationQuaternion;
    ///
    /// let h = std::f64::consts::FRAC_1_SQRT_2;
    /// let q = RotationQuaternion::try_new(h, 0.0, 0.0, h).unwrap();
    /// assert!((q.angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-15);
    /// ```
    pub fn try_new(w: T, x: T, y: T, z: T) -> RotationResult<Self> {
        Ok(Self::from_unit_quaternion(UnitQuaternion::try_new(w, x, y, z)?))
    }

    /// Creates a rotation quaternion without checking the norm.
    #[inline]
    pub fn new_unchecked(w: T, x: T, y: T, z: T) -> Self {
        Self::from_unit_quaternion(UnitQuaternion::new_unchecked(w, x, y, z))
    }

    #[inline]
    pub fn from_unit_quaternion(unit: UnitQuaternion<T>) -> Self {
        Self { unit }
    }

    /// Normalizes an arbitrary nonzero quaternion into a rotation.
    pub fn try_from_quaternion(quaternion: &Quaternion<T>) -> RotationResult<Self> {
        Ok(Self::from_unit_quaternion(quaternion.to_unit_quaternion()?))
    }

    #[inline]
    pub fn w(&self) -> T {
        self.unit.w()
    }

    #[inline]
    pub fn x(&self) -> T {
        self.unit.x()
    }

    #[inline]
    pub fn y(&self) -> T {
        self.unit.y()
    }

    #[inline]
    pub fn z(&self) -> T {
        self.unit.z()
    }

    #[inline]
    pub fn vector(&self) -> Vector3<T> {
        self.unit.vector()
    }

    /// Coefficients in `[w, x, y, z]` order.
    #[inline]
    pub fn to_array(&self) -> [T; 4] {
        self.unit.to_array()
    }

    #[inline]
    pub fn unit_quaternion(&self) -> UnitQuaternion<T> {
        self.unit
    }

    #[inline]
    pub fn quaternion(&self) -> Quaternion<T> {
        self.unit.quaternion()
    }

    pub fn norm(&self) -> T {
        self.unit.norm()
    }

    #[inline]
    pub fn conjugated(&self) -> Self {
        Self::from_unit_quaternion(self.unit.conjugated())
    }

    /// Rotation angle in [0, pi], independent of the sign of `q`.
    pub fn angle(&self) -> T {
        let two = T::constant(2.0);
        two * self.vector().norm().atan2(self.w().abs())
    }

    pub fn cast<U: Real>(&self) -> RotationQuaternion<U> {
        RotationQuaternion::from_unit_quaternion(self.unit.cast())
    }
}

impl<T: Real> Rotation for RotationQuaternion<T> {
    type Scalar = T;
    const KIND: RotationKind = RotationKind::Quaternion;

    fn identity() -> Self {
        Self::from_unit_quaternion(UnitQuaternion::identity())
    }

    fn inverted(&self) -> Self {
        self.conjugated()
    }

    fn concatenate(&self, other: &Self) -> Self {
        Self::from_unit_quaternion(self.unit * other.unit)
    }

    /// Non-negative `w`. When `w` is exactly zero the first nonzero of `x, y, z` is
    /// made positive.
    fn unique(&self) -> Self {
        let zero = T::zero();
        let keep = if self.w() != zero {
            self.w() > zero
        } else if self.x() != zero {
            self.x() > zero
        } else if self.y() != zero {
            self.y() > zero
        } else {
            self.z() >= zero
        };
        if keep {
            *self
        } else {
            Self::from_unit_quaternion(self.unit.negated())
        }
    }

    fn fixed(&self) -> Self {
        if (self.norm() - T::one()).abs() > T::dummy_precision() {
            tracing::trace!(norm = %self.norm(), "renormalized rotation quaternion");
        }
        Self::from_unit_quaternion(self.unit.normalized())
    }

    fn is_valid(&self, tolerance: T) -> bool {
        self.unit.is_valid(tolerance)
    }

    fn max_difference(&self, other: &Self) -> T {
        self.unit.max_difference(&other.unit)
    }

    /// `q * (0, v) * conj(q)`, expanded.
    fn rotate(&self, vector: &Vector3<T>) -> Vector3<T> {
        let two = T::constant(2.0);
        let u = self.vector();
        let t = u.cross(vector) * two;
        vector + t * self.w() + u.cross(&t)
    }
}

impl<T: Real> Default for RotationQuaternion<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> std::ops::Mul for RotationQuaternion<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.concatenate(&rhs)
    }
}

impl<T: Real> fmt::Display for RotationQuaternion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.unit, f)
    }
}

/// Shepperd's method: pivot on the largest of the trace and the diagonal so the
/// square root never sees a small argument.
fn from_matrix<T: Real>(m: &Matrix3<T>) -> Quaternion<T> {
    let half = T::constant(0.5);
    let one = T::one();
    let trace = m[(0, 0)] + m[(1, 1)] + m[(2, 2)];

    if trace > T::zero() {
        let t = (trace + one).sqrt();
        let w = half * t;
        let t = half / t;
        return Quaternion::new(
            w,
            (m[(2, 1)] - m[(1, 2)]) * t,
            (m[(0, 2)] - m[(2, 0)]) * t,
            (m[(1, 0)] - m[(0, 1)]) * t,
        );
    }

    let mut i = 0;
    if m[(1, 1)] > m[(0, 0)] {
        i = 1;
    }
    if m[(2, 2)] > m[(i, i)] {
        i = 2;
    }
    let j = (i + 1) % 3;
    let k = (j + 1) % 3;

    let t = (m[(i, i)] - m[(j, j)] - m[(k, k)] + one).sqrt();
    let mut v = [T::zero(); 3];
    v[i] = half * t;
    let t = half / t;
    let w = (m[(k, j)] - m[(j, k)]) * t;
    v[j] = (m[(j, i)] + m[(i, j)]) * t;
    v[k] = (m[(k, i)] + m[(i, k)]) * t;
    Quaternion::new(w, v[0], v[1], v[2])
}

impl<D: Real, S: Real> ConvertFrom<RotationQuaternion<S>> for RotationQuaternion<D> {
    fn convert_from(source: &RotationQuaternion<S>) -> Self {
        source.cast()
    }
}

impl<D: Real, S: Real> ConvertFrom<RotationMatrix<S>> for RotationQuaternion<D> {
    fn convert_from(source: &RotationMatrix<S>) -> Self {
        let q = from_matrix(&source.cast::<D>().matrix());
        Self::from_unit_quaternion(UnitQuaternion::new_unchecked_from(q))
    }
}

impl<D: Real, S: Real> ConvertFrom<AngleAxis<S>> for RotationQuaternion<D> {
    fn convert_from(source: &AngleAxis<S>) -> Self {
        let aa = source.cast::<D>();
        let (s, c) = (aa.angle() * D::constant(0.5)).sin_cos();
        let q = Quaternion::from_parts(c, aa.axis() * s);
        Self::from_unit_quaternion(UnitQuaternion::new_unchecked_from(q))
    }
}

/// Below [`Real::dummy_precision`] the first-order form `(1, v/2)` is normalized;
/// above it, the half-angle form is used.
impl<D: Real, S: Real> ConvertFrom<RotationVector<S>> for RotationQuaternion<D> {
    fn convert_from(source: &RotationVector<S>) -> Self {
        let v = source.cast::<D>().vector();
        let half = D::constant(0.5);
        let norm = v.norm();

        let q = if norm < D::dummy_precision() {
            Quaternion::from_parts(D::one(), v * half).normalized()
        } else {
            let (s, c) = (norm * half).sin_cos();
            Quaternion::from_parts(c, v * (s / norm))
        };
        Self::from_unit_quaternion(UnitQuaternion::new_unchecked_from(q))
    }
}

impl<D: Real, S: Real> ConvertFrom<EulerAnglesZyx<S>> for RotationQuaternion<D> {
    fn convert_from(source: &EulerAnglesZyx<S>) -> Self {
        let zyx = source.cast::<D>();
        let half = D::constant(0.5);
        let (sy, cy) = (zyx.yaw() * half).sin_cos();
        let (sp, cp) = (zyx.pitch() * half).sin_cos();
        let (sr, cr) = (zyx.roll() * half).sin_cos();

        Self::new_unchecked(
            cr * cp * cy + sr * sp * sy,
            sr * cp * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
        )
    }
}

impl<D: Real, S: Real> ConvertFrom<EulerAnglesXyz<S>> for RotationQuaternion<D> {
    fn convert_from(source: &EulerAnglesXyz<S>) -> Self {
        let xyz = source.cast::<D>();
        let half = D::constant(0.5);
        let (sr, cr) = (xyz.roll() * half).sin_cos();
        let (sp, cp) = (xyz.pitch() * half).sin_cos();
        let (sy, cy) = (xyz.yaw() * half).sin_cos();

        Self::new_unchecked(
            cr * cp * cy - sr * sp * sy,
            sr * cp * cy + cr * sp * sy,
            cr * sp * cy - sr * cp * sy,
            cr * cp * sy + sr * sp * cy,
        )
    }
}
