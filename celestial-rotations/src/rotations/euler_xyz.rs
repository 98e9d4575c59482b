//! Euler angles in the X-Y'-Z'' (roll-pitch-yaw) sequence.
//!
//! The rotation is `Rx(roll) * Ry(pitch) * Rz(yaw)`. Gimbal lock is at pitch
//! `+/-pi/2`, where only `roll + yaw` (at `+pi/2`) or `yaw - roll` (at `-pi/2`) is
//! determined; the canonical form then sets roll to zero.

use crate::rotation::{ConvertFrom, Rotation, RotationKind};
use crate::rotations::{
    canonical_tait_bryan, AngleAxis, EulerAnglesZyx, RotationMatrix, RotationQuaternion,
    RotationVector,
};
use crate::scalar::Real;
use nalgebra::Vector3;
use std::fmt;

/// Roll, pitch and yaw, applied as `Rx(roll) * Ry(pitch) * Rz(yaw)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EulerAnglesXyz<T: Real> {
    /// `[roll, pitch, yaw]`, in sequence order.
    angles: Vector3<T>,
}

impl<T: Real> EulerAnglesXyz<T> {
    #[inline]
    pub fn new(roll: T, pitch: T, yaw: T) -> Self {
        Self {
            angles: Vector3::new(roll, pitch, yaw),
        }
    }

    /// Builds from `[roll, pitch, yaw]`.
    #[inline]
    pub fn from_vector(angles: Vector3<T>) -> Self {
        Self { angles }
    }

    #[inline]
    pub fn vector(&self) -> Vector3<T> {
        self.angles
    }

    #[inline]
    pub fn roll(&self) -> T {
        self.angles[0]
    }

    #[inline]
    pub fn pitch(&self) -> T {
        self.angles[1]
    }

    #[inline]
    pub fn yaw(&self) -> T {
        self.angles[2]
    }

    pub fn set_roll(&mut self, roll: T) {
        self.angles[0] = roll;
    }

    pub fn set_pitch(&mut self, pitch: T) {
        self.angles[1] = pitch;
    }

    pub fn set_yaw(&mut self, yaw: T) {
        self.angles[2] = yaw;
    }

    pub fn cast<U: Real>(&self) -> EulerAnglesXyz<U> {
        EulerAnglesXyz::from_vector(self.angles.map(|c| c.cast::<U>()))
    }
}

impl<T: Real> Rotation for EulerAnglesXyz<T> {
    type Scalar = T;
    const KIND: RotationKind = RotationKind::EulerAnglesXyz;

    fn identity() -> Self {
        Self::from_vector(Vector3::zeros())
    }

    /// `(Rx(a) Ry(b) Rz(c))^-1 = Rz(-c) Ry(-b) Rx(-a)`, a ZYX sequence.
    fn inverted(&self) -> Self {
        Self::convert_from(&EulerAnglesZyx::new(-self.yaw(), -self.pitch(), -self.roll()))
    }

    fn concatenate(&self, other: &Self) -> Self {
        let product =
            RotationQuaternion::<T>::convert_from(self) * RotationQuaternion::convert_from(other);
        Self::convert_from(&product)
    }

    fn unique(&self) -> Self {
        let (yaw, pitch, roll) =
            canonical_tait_bryan(self.yaw(), self.pitch(), self.roll(), T::one());
        Self::new(roll, pitch, yaw)
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

impl<T: Real> Default for EulerAnglesXyz<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> fmt::Display for EulerAnglesXyz<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.roll(), self.pitch(), self.yaw())
    }
}

impl<D: Real, S: Real> ConvertFrom<EulerAnglesXyz<S>> for EulerAnglesXyz<D> {
    fn convert_from(source: &EulerAnglesXyz<S>) -> Self {
        source.cast()
    }
}

impl<D: Real, S: Real> ConvertFrom<RotationMatrix<S>> for EulerAnglesXyz<D> {
    fn convert_from(source: &RotationMatrix<S>) -> Self {
        let m = source.cast::<D>();
        let cos_pitch = m.get(0, 0).hypot(m.get(0, 1));
        let pitch = m.get(0, 2).atan2(cos_pitch);

        if cos_pitch < D::dummy_precision() {
            let yaw = m.get(1, 0).atan2(m.get(1, 1));
            return Self::new(D::zero(), pitch, yaw);
        }

        let roll = (-m.get(1, 2)).atan2(m.get(2, 2));
        let yaw = (-m.get(0, 1)).atan2(m.get(0, 0));
        Self::new(roll, pitch, yaw)
    }
}

impl<D: Real, S: Real> ConvertFrom<RotationQuaternion<S>> for EulerAnglesXyz<D> {
    fn convert_from(source: &RotationQuaternion<S>) -> Self {
        Self::convert_from(&RotationMatrix::<D>::convert_from(source))
    }
}

impl<D: Real, S: Real> ConvertFrom<AngleAxis<S>> for EulerAnglesXyz<D> {
    fn convert_from(source: &AngleAxis<S>) -> Self {
        Self::convert_from(&RotationMatrix::<D>::convert_from(source))
    }
}

impl<D: Real, S: Real> ConvertFrom<RotationVector<S>> for EulerAnglesXyz<D> {
    fn convert_from(source: &RotationVector<S>) -> Self {
        Self::convert_from(&RotationMatrix::<D>::convert_from(source))
    }
}

impl<D: Real, S: Real> ConvertFrom<EulerAnglesZyx<S>> for EulerAnglesXyz<D> {
    fn convert_from(source: &EulerAnglesZyx<S>) -> Self {
        Self::convert_from(&RotationMatrix::<D>::convert_from(source))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_accessors_follow_sequence_order() {
        let xyz = EulerAnglesXyz::new(0.1, 0.2, 0.3);
        assert_eq!(xyz.roll(), 0.1);
        assert_eq!(xyz.yaw(), 0.3);
        assert_eq!(xyz.vector(), Vector3::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_matrix_round_trip() {
        let xyz = EulerAnglesXyz::new(1.2_f64, -1.1, -3.0);
        let back = EulerAnglesXyz::<f64>::convert_from(&RotationMatrix::<f64>::convert_from(&xyz));
        assert!(back.max_difference(&xyz) < 1e-14);
    }

    #[test]
    fn test_gimbal_lock_from_matrix() {
        let xyz = EulerAnglesXyz::new(0.1_f64, FRAC_PI_2, 0.4);
        let back = EulerAnglesXyz::<f64>::convert_from(&RotationMatrix::<f64>::convert_from(&xyz));
        assert_eq!(back.roll(), 0.0);
        assert_abs_diff_eq!(back.yaw(), 0.5, epsilon = 1e-7);
        assert!(back.is_near(&xyz, 1e-7));
    }

    #[test]
    fn test_inverse() {
        let xyz = EulerAnglesXyz::new(-0.9_f64, 0.5, 2.2);
        let product = xyz.inverted().compose(&xyz);
        assert!(product.is_near(&EulerAnglesXyz::<f64>::identity(), 1e-14));
    }

    #[test]
    fn test_zyx_and_xyz_agree_on_single_axis() {
        let zyx = EulerAnglesZyx::new(0.0_f64, 0.6, 0.0);
        let xyz = EulerAnglesXyz::<f64>::convert_from(&zyx);
        assert_abs_diff_eq!(xyz.pitch(), 0.6, epsilon = 1e-15);
        assert_abs_diff_eq!(xyz.roll(), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn test_unique_gimbal_lock_keeps_rotation() {
        let xyz = EulerAnglesXyz::new(0.3_f64, FRAC_PI_2, -0.8);
        let u = xyz.unique();
        assert_eq!(u.roll(), 0.0);
        assert_abs_diff_eq!(u.yaw(), -0.5, epsilon = 1e-15);
        assert!(u.is_near(&xyz, 1e-14));
    }
}
