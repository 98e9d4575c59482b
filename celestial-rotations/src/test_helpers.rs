//! Assertions and sample rotations for tests.
//!
//! The samples deliberately include values next to the numerical boundaries the
//! conversions care about: rotations just above and below the small-angle threshold,
//! half turns, and Euler angles at gimbal lock.

use crate::rotation::{ConvertFrom, Rotation};
use crate::rotations::{AngleAxis, RotationQuaternion};
use nalgebra::Vector3;
use std::f64::consts::{FRAC_PI_2, PI};

/// Asserts that two rotations, of any representations, differ by at most
/// `angle_tolerance` radians.
#[track_caller]
pub fn assert_same_rotation<A, B>(a: &A, b: &B, angle_tolerance: f64)
where
    A: Rotation<Scalar = f64>,
    B: std::fmt::Display,
    RotationQuaternion<f64>: ConvertFrom<A> + ConvertFrom<B>,
{
    let angle = a.disparity_angle(b);
    assert!(
        angle <= angle_tolerance,
        "rotations differ by {} rad (tolerance {}):\n  left:  {}\n  right: {}",
        angle,
        angle_tolerance,
        a,
        b
    );
}

/// Asserts that two rotations differ by at most `angle_tolerance` radians.
///
/// ```ignore
/// assert_rotation_near!(q, m, 1e-12);
/// assert_rotation_near!(q, m, 1e-12, "after {} steps", n);
/// ```
#[macro_export]
macro_rules! assert_rotation_near {
    ($a:expr, $b:expr, $tol:expr) => {{
        let angle = $crate::Rotation::disparity_angle(&$a, &$b);
        assert!(
            angle <= $tol,
            "{} vs {}: rotations differ by {} rad (tolerance {})",
            stringify!($a),
            stringify!($b),
            angle,
            $tol
        );
    }};
    ($a:expr, $b:expr, $tol:expr, $($arg:tt)*) => {{
        let angle = $crate::Rotation::disparity_angle(&$a, &$b);
        assert!(
            angle <= $tol,
            "{}: rotations differ by {} rad (tolerance {})",
            format!($($arg)*),
            angle,
            $tol
        );
    }};
}

/// Angle-axis samples covering generic, tiny, threshold-adjacent and half-turn
/// rotations.
pub fn sample_angle_axes() -> Vec<AngleAxis<f64>> {
    let oblique = Vector3::new(1.0, -2.0, 0.5).normalize();
    let diagonal = Vector3::new(1.0, 1.0, 1.0).normalize();
    vec![
        AngleAxis::identity(),
        AngleAxis::new(0.3, Vector3::x()),
        AngleAxis::new(1.2, oblique),
        AngleAxis::new(-2.4, diagonal),
        AngleAxis::new(FRAC_PI_2, Vector3::z()),
        AngleAxis::new(3.0, Vector3::new(0.0, 0.6, -0.8)),
        AngleAxis::new(PI - 1e-9, oblique),
        AngleAxis::new(PI, Vector3::y()),
        AngleAxis::new(PI, diagonal),
        AngleAxis::new(1e-6, oblique),
        AngleAxis::new(2e-12, diagonal),
        AngleAxis::new(5e-13, oblique),
        AngleAxis::new(1e-15, Vector3::z()),
    ]
}

/// Rotation-quaternion samples: the angle-axis samples plus their negations.
pub fn sample_quaternions() -> Vec<RotationQuaternion<f64>> {
    sample_angle_axes()
        .iter()
        .flat_map(|aa| {
            let q = RotationQuaternion::<f64>::convert_from(aa);
            let negated = RotationQuaternion::from_unit_quaternion(q.unit_quaternion().negated());
            [q, negated]
        })
        .collect()
}
