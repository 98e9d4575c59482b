//! Numeric precision parameter shared by every rotation representation.
//!
//! All representations are generic over a [`Real`] scalar. The trait is a thin
//! layer over [`nalgebra::RealField`] that adds the one thing the conversion
//! formulas need beyond ordinary arithmetic: a precision-dependent threshold
//! below which an angle or a vector norm is treated as zero.
//!
//! | Scalar | `dummy_precision()` |
//! |--------|---------------------|
//! | `f32`  | `1e-5`              |
//! | `f64`  | `1e-12`             |
//!
//! Cross-precision conversion goes through `f64`, so narrowing a `f64` value into
//! an `f32` representation performs the usual lossy cast.
//!
//! ```
//! use celestial_rotations::Real;
//!
//! let narrowed: f32 = 0.1_f64.cast();
//! assert!((narrowed - 0.1_f32).abs() < 1e-8);
//! assert!(f32::dummy_precision() > 1e-6);
//! assert!(f64::dummy_precision() < 1e-9);
//! ```

use nalgebra::RealField;
use std::fmt;

/// Floating-point scalar accepted by the rotation types.
pub trait Real: RealField + Copy + fmt::Display + fmt::Debug {
    /// Threshold under which a norm or an angle counts as zero.
    ///
    /// Selects the linearized branch of the small-angle conversions.
    fn dummy_precision() -> Self;

    /// Distance from 1 to the next representable value.
    fn machine_epsilon() -> Self;

    /// Builds a scalar from an `f64` literal.
    #[inline]
    fn constant(value: f64) -> Self {
        nalgebra::convert(value)
    }

    /// Widens this scalar to `f64`.
    #[inline]
    fn to_f64(self) -> f64 {
        nalgebra::convert_unchecked::<Self, f64>(self)
    }

    /// Converts this scalar to another precision.
    #[inline]
    fn cast<U: Real>(self) -> U {
        U::constant(self.to_f64())
    }
}

impl Real for f32 {
    #[inline]
    fn dummy_precision() -> Self {
        1e-5
    }

    #[inline]
    fn machine_epsilon() -> Self {
        f32::EPSILON
    }
}

impl Real for f64 {
    #[inline]
    fn dummy_precision() -> Self {
        1e-12
    }

    #[inline]
    fn machine_epsilon() -> Self {
        f64::EPSILON
    }
}

/// Wraps an angle to [-pi, +pi) radians.
///
/// The result is stable under repeated application, which the Euler-angle and
/// angle-axis canonical forms rely on.
///
/// ```
/// use celestial_rotations::scalar::wrap_pm_pi;
/// use std::f64::consts::PI;
///
/// assert!((wrap_pm_pi(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
/// assert_eq!(wrap_pm_pi(PI), -PI);
/// assert_eq!(wrap_pm_pi(-PI), -PI);
/// ```
#[inline]
pub fn wrap_pm_pi<T: Real>(x: T) -> T {
    let pi = T::pi();
    let two_pi = T::two_pi();
    let w = x - two_pi * ((x + pi) / two_pi).floor();
    if w >= pi {
        w - two_pi
    } else if w < -pi {
        w + two_pi
    } else {
        w
    }
}

/// Wraps an angle to [0, 2pi) radians.
#[inline]
pub fn wrap_0_2pi<T: Real>(x: T) -> T {
    let two_pi = T::two_pi();
    let w = x - two_pi * (x / two_pi).floor();
    if w >= two_pi || w < T::zero() {
        T::zero()
    } else {
        w
    }
}
