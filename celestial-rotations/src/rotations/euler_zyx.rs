//! Euler angles in the Z-Y'-X'' (yaw-pitch-roll) sequence.
//!
//! The rotation is `Rz(yaw) * Ry(pitch) * Rx(roll)`: intrinsic rotations about the
//! body Z axis, then the new Y axis, then the new X axis. Gimbal lock is at pitch
//! `+/-pi/2`, where only `yaw - roll` (at `+pi/2`) or `yaw + roll` (at `-pi/2`) is
//! determined; the canonical form then sets roll to zero.
//!
//! ```
//! use celestial_rotations::{EulerAnglesZyx, RotationMatrix, Rotation};
//!
//! let zyx = EulerAnglesZyx::new(0.3_f64, 0.0, 0.0);
//! let m = RotationMatrix::<f64>::from_rotation(&zyx);
//! assert!(m.max_difference(&RotationMatrix::about_z(0.3)) < 1e-15);
//! ```

use crate::rotation::{ConvertFrom, Rotation, RotationKind};
use crate::rotations::{
    canonical_tait_bryan, AngleAxis, EulerAnglesXyz, RotationMatrix, RotationQuaternion,
    RotationVector,
};
use crate::scalar::Real;
use nalgebra::Vector3;
use std::fmt;

/// Yaw, pitch and roll, applied as `Rz(yaw) * Ry(pitch) * Rx(roll)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EulerAnglesZyx<T: Real> {
    /// `[yaw, pitch, roll]`, in sequence order.
    angles: Vector3<T>,
}

impl<T: Real> EulerAnglesZyx<T> {
    #[inline]
    pub fn new(yaw: T, pitch: T, roll: T) -> Self {
        Self {
            angles: Vector3::new(yaw, pitch, roll),
        }
    }

    /// Builds from `[yaw, pitch, roll]`.
    #[inline]
    pub fn from_vector(angles: Vector3<T>) -> Self {
        Self { angles }
    }

    /// `[yaw, pitch, roll]`.
    #[inline]
    pub fn vector(&self) -> Vector3<T> {
        self.angles
    }

    /// Rotation about Z.
    #[inline]
    pub fn yaw(&self) -> T {
        self.angles[0]
    }

    /// Rotation about the once-rotated Y axis.
    #[inline]
    pub fn pitch(&self) -> T {
        self.angles[1]
    }

    /// Rotation about the twice-rotated X axis.
    #[inline]
    pub fn roll(&self) -> T {
        self.angles[2]
    }

    pub fn set_yaw(&mut self, yaw: T) {
        self.angles[0] = yaw;
    }

    pub fn set_pitch(&mut self, pitch: T) {
        self.angles[1] = pitch;
    }

    pub fn set_roll(&mut self, roll: T) {
        self.angles[2] = roll;
    }

    pub fn cast<U: Real>(&self) -> EulerAnglesZyx<U> {
        EulerAnglesZyx::from_vector(self.angles.map(|c| c.cast::<U>()))
    }
}

impl<T: Real> Rotation for EulerAnglesZyx<T> {
    type Scalar = T;
    const KIND: RotationKind = RotationKind::EulerAnglesZyx;

    fn identity() -> Self {
        Self::from_vector(Vector3::zeros())
    }

    /// `(Rz(a) Ry(b) Rx(c))^-1 = Rx(-c) Ry(-b) Rz(-a)`, an XYZ sequence.
    fn inverted(&self) -> Self {
        Self::convert_from(&EulerAnglesXyz::new(-self.roll(), -self.pitch(), -self.yaw()))
    }

    fn concatenate(&self, other: &Self) -> Self {
        let product =
            RotationQuaternion::<T>::convert_from(self) * RotationQuaternion::convert_from(other);
        Self::convert_from(&product)
    }

    fn unique(&self) -> Self {
        let (yaw, pitch, roll) =
            canonical_tait_bryan(self.yaw(), self.pitch(), self.roll(), -T::one());
        Self::new(yaw, pitch, roll)
    }

    fn fixed(&self) -> Self {
        *self
    }

    fn is_valid(&self, _tolerance: T) -> bool {
        self.angles.iter().all(|c| c.is_finite())
    }

    fn max_difference(&self, other: &Self) -> T {
        (self.angles - other.angles).amax()
    }

    fn rotate(&self, vector: &Vector3<T>) -> Vector3<T> {
        RotationMatrix::<T>::convert_from(self).rotate(vector)
    }
}

impl<T: Real> Default for EulerAnglesZyx<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> fmt::Display for EulerAnglesZyx<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.yaw(), self.pitch(), self.roll())
    }
}

impl<D: Real, S: Real> ConvertFrom<EulerAnglesZyx<S>> for EulerAnglesZyx<D> {
    fn convert_from(source: &EulerAnglesZyx<S>) -> Self {
        source.cast()
    }
}

/// Pitch comes out in `[-pi/2, pi/2]`. At gimbal lock roll is set to zero and the
/// whole rotation about Z is carried by yaw.
impl<D: Real, S: Real> ConvertFrom<RotationMatrix<S>> for EulerAnglesZyx<D> {
    fn convert_from(source: &RotationMatrix<S>) -> Self {
        let m = source.cast::<D>();
        let cos_pitch = m.get(0, 0).hypot(m.get(1, 0));
        let pitch = (-m.get(2, 0)).atan2(cos_pitch);

        if cos_pitch < D::dummy_precision() {
            let yaw = (-m.get(0, 1)).atan2(m.get(1, 1));
            return Self::new(yaw, pitch, D::zero());
        }

        let yaw = m.get(1, 0).atan2(m.get(0, 0));
        let roll = m.get(2, 1).atan2(m.get(2, 2));
        Self::new(yaw, pitch, roll)
    }
}

impl<D: Real, S: Real> ConvertFrom<RotationQuaternion<S>> for EulerAnglesZyx<D> {
    fn convert_from(source: &RotationQuaternion<S>) -> Self {
        Self::convert_from(&RotationMatrix::<D>::convert_from(source))
    }
}

impl<D: Real, S: Real> ConvertFrom<AngleAxis<S>> for EulerAnglesZyx<D> {
    fn convert_from(source: &AngleAxis<S>) -> Self {
        Self::convert_from(&RotationMatrix::<D>::convert_from(source))
    }
}

impl<D: Real, S: Real> ConvertFrom<RotationVector<S>> for EulerAnglesZyx<D> {
    fn convert_from(source: &RotationVector<S>) -> Self {
        Self::convert_from(&RotationMatrix::<D>::convert_from(source))
    }
}

impl<D: Real, S: Real> ConvertFrom<EulerAnglesXyz<S>> for EulerAnglesZyx<D> {
    fn convert_from(source: &EulerAnglesXyz<S>) -> Self {
        Self::convert_from(&RotationMatrix::<D>::convert_from(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_accessors() {
        let zyx = EulerAnglesZyx::new(0.1, 0.2, 0.3);
        assert_eq!(zyx.yaw(), 0.1);
        assert_eq!(zyx.pitch(), 0.2);
        assert_eq!(zyx.roll(), 0.3);
        assert_eq!(zyx.to_string(), "0.1 0.2 0.3");
    }

    #[test]
    fn test_matrix_round_trip() {
        let zyx = EulerAnglesZyx::new(-2.5_f64, 0.7, 1.4);
        let back = EulerAnglesZyx::<f64>::convert_from(&RotationMatrix::<f64>::convert_from(&zyx));
        assert!(back.max_difference(&zyx) < 1e-14);
    }

    #[test]
    fn test_gimbal_lock_from_matrix() {
        let zyx = EulerAnglesZyx::new(0.4_f64, FRAC_PI_2, 0.1);
        let m = RotationMatrix::<f64>::convert_from(&zyx);
        let back = EulerAnglesZyx::<f64>::convert_from(&m);
        assert_eq!(back.roll(), 0.0);
        assert_abs_diff_eq!(back.pitch(), FRAC_PI_2, epsilon = 1e-7);
        assert_abs_diff_eq!(back.yaw(), 0.3, epsilon = 1e-7);
        assert!(back.is_near(&zyx, 1e-7));
    }

    #[test]
    fn test_inverse() {
        let zyx = EulerAnglesZyx::new(0.3_f64, -0.6, 2.0);
        let product = zyx.compose(&zyx.inverted());
        assert!(product.is_near(&EulerAnglesZyx::<f64>::identity(), 1e-14));
    }

    #[test]
    fn test_unique_folds_pitch() {
        let zyx = EulerAnglesZyx::new(0.2_f64, PI - 0.3, -0.4);
        let u = zyx.unique();
        assert_abs_diff_eq!(u.pitch(), 0.3, epsilon = 1e-14);
        assert_abs_diff_eq!(u.yaw(), 0.2 - PI, epsilon = 1e-14);
        assert_abs_diff_eq!(u.roll(), PI - 0.4, epsilon = 1e-14);
        assert!(u.is_near(&zyx, 1e-14));
        assert_eq!(u.unique(), u);
    }

    #[test]
    fn test_unique_gimbal_lock_keeps_rotation() {
        let zyx = EulerAnglesZyx::new(0.5_f64, -FRAC_PI_2, 0.2);
        let u = zyx.unique();
        assert_eq!(u.roll(), 0.0);
        assert!(u.is_near(&zyx, 1e-14));
    }
}
