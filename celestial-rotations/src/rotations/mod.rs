//! The six rotation representations.
//!
//! | Type | Coefficients | Constraint | Canonical form |
//! |------|--------------|------------|----------------|
//! | [`RotationMatrix`] | 9 | orthogonal, `det = +1` | itself |
//! | [`RotationQuaternion`] | 4 (`w, x, y, z`) | unit norm | `w >= 0` |
//! | [`AngleAxis`] | 4 (`angle, axis`) | unit axis | `angle` in `[0, pi]` |
//! | [`RotationVector`] | 3 | none | norm in `[0, pi]` |
//! | [`EulerAnglesZyx`] | 3 (`yaw, pitch, roll`) | none | pitch in `[-pi/2, pi/2]` |
//! | [`EulerAnglesXyz`] | 3 (`roll, pitch, yaw`) | none | pitch in `[-pi/2, pi/2]` |
//!
//! Each file holds one representation together with every conversion *into* it.

mod angle_axis;
mod euler_xyz;
mod euler_zyx;
mod matrix;
mod quaternion;
mod rotation_vector;

pub use angle_axis::AngleAxis;
pub use euler_xyz::EulerAnglesXyz;
pub use euler_zyx::EulerAnglesZyx;
pub use matrix::RotationMatrix;
pub use quaternion::RotationQuaternion;
pub use rotation_vector::RotationVector;

use crate::scalar::{wrap_pm_pi, Real};

/// Canonical `(yaw, pitch, roll)` for a Tait-Bryan sequence with pitch about Y.
///
/// Pitch is folded into `[-pi/2, pi/2]` through the identity
/// `(yaw, pitch, roll) = (yaw + pi, pi - pitch, roll + pi)`. At gimbal lock only the
/// combination `yaw + fold * roll` (at pitch `+pi/2`; `yaw - fold * roll` at `-pi/2`)
/// is observable, so roll is moved into yaw.
pub(crate) fn canonical_tait_bryan<T: Real>(yaw: T, pitch: T, roll: T, fold: T) -> (T, T, T) {
    let pi = T::pi();
    let half_pi = T::frac_pi_2();

    let mut yaw = wrap_pm_pi(yaw);
    let mut pitch = wrap_pm_pi(pitch);
    let mut roll = wrap_pm_pi(roll);

    if pitch > half_pi {
        pitch = pi - pitch;
        yaw = wrap_pm_pi(yaw + pi);
        roll = wrap_pm_pi(roll + pi);
    } else if pitch < -half_pi {
        pitch = -pi - pitch;
        yaw = wrap_pm_pi(yaw + pi);
        roll = wrap_pm_pi(roll + pi);
    }

    if (pitch.abs() - half_pi).abs() < T::dummy_precision() {
        if pitch > T::zero() {
            yaw = wrap_pm_pi(yaw + fold * roll);
            pitch = half_pi;
        } else {
            yaw = wrap_pm_pi(yaw - fold * roll);
            pitch = -half_pi;
        }
        roll = T::zero();
    }

    (yaw, pitch, roll)
}
