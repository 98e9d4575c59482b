//! 3x3 rotation matrices.
//!
//! A rotation matrix is a 3x3 orthogonal matrix with determinant +1. It is the only
//! representation with no ambiguity at all: every rotation has exactly one matrix, so
//! [`unique`](Rotation::unique) is the identity operation. The price is nine
//! coefficients for three degrees of freedom, which makes matrices the representation
//! most prone to drift after long chains of products.
//!
//! # Rotation Convention
//!
//! All rotations in this crate are *active*: a matrix rotates vectors expressed in a
//! fixed frame. A positive rotation of 90 degrees about Z takes `[1, 0, 0]` to
//! `[0, 1, 0]`:
//!
//! ```
//! use celestial_rotations::{RotationMatrix, Rotation};
//! use nalgebra::Vector3;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let m = RotationMatrix::<f64>::about_z(FRAC_PI_2);
//! let v = m.rotate(&Vector3::x());
//! assert!((v - Vector3::y()).norm() < 1e-15);
//! ```
//!
//! # Composing Transformations
//!
//! Rotation matrices compose by multiplication. To apply rotation A, then rotation B,
//! compute `B * A` (the rightmost matrix acts first on the vector). The named form is
//! [`compose`](Rotation::compose), which also accepts any other representation as the
//! right-hand operand.
//!
//! ```
//! use celestial_rotations::{RotationMatrix, RotationVector, Rotation};
//!
//! let a = RotationMatrix::about_x(0.1_f64);
//! let b = RotationMatrix::about_y(0.2);
//! let product = b * a;
//!
//! let mixed = b.compose(&RotationVector::new(0.1, 0.0, 0.0));
//! assert!(product.max_difference(&mixed) < 1e-15);
//! ```
//!
//! # Validation
//!
//! [`try_new`](RotationMatrix::try_new) and [`from_matrix`](RotationMatrix::from_matrix)
//! check that `R * R^T` is within `1e-4` of identity and that the determinant is within
//! `1e-4` of 1. The `*_unchecked` constructors and [`from_array`](RotationMatrix::from_array)
//! skip the check.
//!
//! # Drift Correction
//!
//! [`fix`](Rotation::fix) divides the matrix by the cube root of its determinant and
//! then applies Björck orthogonalization steps `X <- X (3I - X^T X) / 2` until `X^T X`
//! is identity to within a few units of [`Real::machine_epsilon`].
//!
//! # Storage Layout
//!
//! The coefficients live in an `nalgebra::Matrix3`. The element at row `i`, column `j`
//! is `matrix[(i, j)]` or `matrix.get(i, j)`, 0-based.

use crate::constants::{MATRIX_TOLERANCE, MAX_ORTHOGONALIZATION_STEPS, VALIDATION_ENABLED};
use crate::errors::{RotationError, RotationResult, ValidityFailure};
use crate::rotation::{ConvertFrom, Rotation, RotationKind};
use crate::rotations::{
    AngleAxis, EulerAnglesXyz, EulerAnglesZyx, RotationQuaternion, RotationVector,
};
use crate::scalar::Real;
use nalgebra::{Matrix3, Vector3};
use std::fmt;

/// A 3x3 rotation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RotationMatrix<T: Real> {
    matrix: Matrix3<T>,
}

impl<T: Real> RotationMatrix<T> {
    /// Creates a rotation matrix from nine row-major coefficients, checking that the
    /// result is a proper rotation.
    ///
    /// ```
    /// use celestial_rotations::RotationMatrix;
    ///
    /// // 90 degrees about Z
    /// let m = RotationMatrix::try_new(
    ///     0.0, -1.0, 0.0,
    ///     1.0, 0.0, 0.0,
    ///     0.0, 0.0, 1.0,
    /// ).unwrap();
    /// assert_eq!(m.get(1, 0), 1.0);
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn try_new(
        r11: T,
        r12: T,
        r13: T,
        r21: T,
        r22: T,
        r23: T,
        r31: T,
        r32: T,
        r33: T,
    ) -> RotationResult<Self> {
        Self::from_matrix(Matrix3::new(r11, r12, r13, r21, r22, r23, r31, r32, r33))
    }

    /// Wraps an `nalgebra` matrix, checking it like [`try_new`](Self::try_new).
    pub fn from_matrix(matrix: Matrix3<T>) -> RotationResult<Self> {
        if VALIDATION_ENABLED {
            check_rotation(&matrix)?;
        }
        Ok(Self { matrix })
    }

    /// Wraps an `nalgebra` matrix without any check.
    #[inline]
    pub fn from_matrix_unchecked(matrix: Matrix3<T>) -> Self {
        Self { matrix }
    }

    /// Creates a rotation matrix from a row-major array.
    ///
    /// `elements[i][j]` is row `i`, column `j`. This does not validate the input; use
    /// [`is_rotation_matrix`](Self::is_rotation_matrix) if needed.
    pub fn from_array(elements: [[T; 3]; 3]) -> Self {
        Self::from_matrix_unchecked(Matrix3::new(
            elements[0][0],
            elements[0][1],
            elements[0][2],
            elements[1][0],
            elements[1][1],
            elements[1][2],
            elements[2][0],
            elements[2][1],
            elements[2][2],
        ))
    }

    /// Active rotation by `angle` radians about the X axis.
    ///
    /// ```text
    /// Rx(a) = | 1    0       0    |
    ///         | 0  cos(a) -sin(a) |
    ///         | 0  sin(a)  cos(a) |
    /// ```
    pub fn about_x(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let (zero, one) = (T::zero(), T::one());
        Self::from_matrix_unchecked(Matrix3::new(one, zero, zero, zero, c, -s, zero, s, c))
    }

    /// Active rotation by `angle` radians about the Y axis.
    ///
    /// ```text
    /// Ry(a) = |  cos(a)  0  sin(a) |
    ///         |    0     1    0    |
    ///         | -sin(a)  0  cos(a) |
    /// ```
    pub fn about_y(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let (zero, one) = (T::zero(), T::one());
        Self::from_matrix_unchecked(Matrix3::new(c, zero, s, zero, one, zero, -s, zero, c))
    }

    /// Active rotation by `angle` radians about the Z axis.
    ///
    /// ```text
    /// Rz(a) = | cos(a) -sin(a)  0 |
    ///         | sin(a)  cos(a)  0 |
    ///         |   0       0     1 |
    /// ```
    pub fn about_z(angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        let (zero, one) = (T::zero(), T::one());
        Self::from_matrix_unchecked(Matrix3::new(c, -s, zero, s, c, zero, zero, zero, one))
    }

    /// Returns the element at the specified row and column.
    ///
    /// Indices are 0-based. Panics if `row >= 3` or `col >= 3`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.matrix[(row, col)]
    }

    /// Sets the element at the specified row and column.
    ///
    /// Indices are 0-based. Panics if `row >= 3` or `col >= 3`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.matrix[(row, col)] = value;
    }

    /// Copy of the underlying `nalgebra` matrix.
    #[inline]
    pub fn matrix(&self) -> Matrix3<T> {
        self.matrix
    }

    /// Replaces the underlying matrix without any check.
    pub fn set_matrix(&mut self, matrix: Matrix3<T>) {
        self.matrix = matrix;
    }

    /// Row-major copy of the coefficients.
    pub fn to_array(&self) -> [[T; 3]; 3] {
        let m = &self.matrix;
        [
            [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
            [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
            [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
        ]
    }

    /// Computes the determinant. +1 for a proper rotation.
    #[inline]
    pub fn determinant(&self) -> T {
        self.matrix.determinant()
    }

    /// Returns the transpose, which for a rotation matrix is its inverse.
    #[inline]
    pub fn transposed(&self) -> Self {
        Self::from_matrix_unchecked(self.matrix.transpose())
    }

    /// Transposes in place.
    pub fn transpose(&mut self) -> &mut Self {
        *self = self.transposed();
        self
    }

    /// Checks whether this matrix is a proper rotation within `tolerance`.
    ///
    /// Both the determinant (+1, not -1) and orthogonality (`M * M^T = I`) are checked.
    ///
    /// ```
    /// use celestial_rotations::RotationMatrix;
    ///
    /// assert!(RotationMatrix::about_z(0.5).is_rotation_matrix(1e-14));
    ///
    /// let scaled = RotationMatrix::from_array([
    ///     [2.0, 0.0, 0.0],
    ///     [0.0, 1.0, 0.0],
    ///     [0.0, 0.0, 1.0],
    /// ]);
    /// assert!(!scaled.is_rotation_matrix(1e-14));
    /// ```
    pub fn is_rotation_matrix(&self, tolerance: T) -> bool {
        (self.determinant() - T::one()).abs() <= tolerance
            && orthogonality_error(&self.matrix) <= tolerance
    }

    /// Converts the coefficients to another precision.
    pub fn cast<U: Real>(&self) -> RotationMatrix<U> {
        RotationMatrix::from_matrix_unchecked(self.matrix.map(|x| x.cast::<U>()))
    }
}

impl<T: Real> Rotation for RotationMatrix<T> {
    type Scalar = T;
    const KIND: RotationKind = RotationKind::Matrix;

    fn identity() -> Self {
        Self::from_matrix_unchecked(Matrix3::identity())
    }

    fn inverted(&self) -> Self {
        self.transposed()
    }

    fn concatenate(&self, other: &Self) -> Self {
        Self::from_matrix_unchecked(self.matrix * other.matrix)
    }

    /// A rotation matrix is always unique.
    fn unique(&self) -> Self {
        *self
    }

    /// Rescales by `det^(-1/3)` and re-orthogonalizes with Bjorck iterations. A
    /// singular or reflecting matrix has no nearby rotation for that scheme and is
    /// projected through its SVD instead; a non-finite one becomes the identity.
    fn fixed(&self) -> Self {
        let det = self.determinant();
        if !det.is_finite() {
            tracing::debug!("non-finite rotation matrix reset to identity");
            return Self::identity();
        }
        if det <= T::zero() {
            tracing::debug!(determinant = %det, "projected degenerate matrix onto SO(3)");
            return Self::from_matrix_unchecked(nearest_rotation(&self.matrix));
        }

        let mut m = self.matrix * (T::one() / det.cbrt());

        let identity = Matrix3::<T>::identity();
        let three_halves = T::constant(1.5);
        let half = T::constant(0.5);
        let converged = T::machine_epsilon() * T::constant(8.0);
        for _ in 0..MAX_ORTHOGONALIZATION_STEPS {
            let gram = m.transpose() * m;
            if (gram - identity).amax() <= converged {
                break;
            }
            m = m * (identity * three_halves - gram * half);
        }

        if (det - T::one()).abs() > T::dummy_precision() {
            tracing::trace!(determinant = %det, "corrected rotation matrix drift");
        }
        Self::from_matrix_unchecked(m)
    }

    fn is_valid(&self, tolerance: T) -> bool {
        self.is_rotation_matrix(tolerance)
    }

    fn max_difference(&self, other: &Self) -> T {
        (self.matrix - other.matrix).amax()
    }

    fn rotate(&self, vector: &Vector3<T>) -> Vector3<T> {
        self.matrix * vector
    }
}

impl<T: Real> Default for RotationMatrix<T> {
    fn default() -> Self {
        Self::identity()
    }
}

impl<T: Real> std::ops::Mul for RotationMatrix<T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.concatenate(&rhs)
    }
}

impl<T: Real> std::ops::Mul<Vector3<T>> for RotationMatrix<T> {
    type Output = Vector3<T>;

    fn mul(self, vec: Vector3<T>) -> Vector3<T> {
        self.rotate(&vec)
    }
}

impl<T: Real> std::ops::Index<(usize, usize)> for RotationMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.matrix[(row, col)]
    }
}

impl<T: Real> fmt::Display for RotationMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RotationMatrix:")?;
        for row in self.to_array() {
            writeln!(f, "  [{} {} {}]", row[0], row[1], row[2])?;
        }
        Ok(())
    }
}

/// Closest proper rotation in the Frobenius norm: `U V^T`, with the singular vector
/// of the smallest singular value flipped when that product is a reflection.
fn nearest_rotation<T: Real>(matrix: &Matrix3<T>) -> Matrix3<T> {
    let svd = (*matrix).svd(true, true);
    let (Some(mut u), Some(v_t)) = (svd.u, svd.v_t) else {
        return Matrix3::identity();
    };
    if (u * v_t).determinant() < T::zero() {
        u.column_mut(svd.singular_values.imin()).neg_mut();
    }
    u * v_t
}

fn orthogonality_error<T: Real>(matrix: &Matrix3<T>) -> T {
    (matrix * matrix.transpose() - Matrix3::identity()).amax()
}

fn check_rotation<T: Real>(matrix: &Matrix3<T>) -> RotationResult<()> {
    let tolerance = T::constant(MATRIX_TOLERANCE);

    let error = orthogonality_error(matrix);
    if error > tolerance {
        return Err(RotationError::invalid_representation(
            RotationKind::Matrix,
            ValidityFailure::NotOrthogonal,
            &format!("|R * R^T - I| = {} exceeds {}", error, tolerance),
        ));
    }

    let det = matrix.determinant();
    if (det - T::one()).abs() > tolerance {
        return Err(RotationError::invalid_representation(
            RotationKind::Matrix,
            ValidityFailure::NotProperRotation,
            &format!("determinant is {}, expected 1", det),
        ));
    }

    Ok(())
}

impl<D: Real, S: Real> ConvertFrom<RotationMatrix<S>> for RotationMatrix<D> {
    fn convert_from(source: &RotationMatrix<S>) -> Self {
        source.cast()
    }
}

impl<D: Real, S: Real> ConvertFrom<RotationQuaternion<S>> for RotationMatrix<D> {
    fn convert_from(source: &RotationQuaternion<S>) -> Self {
        let q = source.cast::<D>();
        let (w, x, y, z) = (q.w(), q.x(), q.y(), q.z());
        let one = D::one();
        let two = D::constant(2.0);

        Self::from_matrix_unchecked(Matrix3::new(
            one - two * (y * y + z * z),
            two * (x * y - w * z),
            two * (x * z + w * y),
            two * (x * y + w * z),
            one - two * (x * x + z * z),
            two * (y * z - w * x),
            two * (x * z - w * y),
            two * (y * z + w * x),
            one - two * (x * x + y * y),
        ))
    }
}

/// Rodrigues' formula.
impl<D: Real, S: Real> ConvertFrom<AngleAxis<S>> for RotationMatrix<D> {
    fn convert_from(source: &AngleAxis<S>) -> Self {
        let aa = source.cast::<D>();
        let n = aa.axis();
        let (x, y, z) = (n.x, n.y, n.z);
        let (s, c) = aa.angle().sin_cos();
        let t = D::one() - c;

        Self::from_matrix_unchecked(Matrix3::new(
            t * x * x + c,
            t * x * y - s * z,
            t * x * z + s * y,
            t * x * y + s * z,
            t * y * y + c,
            t * y * z - s * x,
            t * x * z - s * y,
            t * y * z + s * x,
            t * z * z + c,
        ))
    }
}

/// Below [`Real::dummy_precision`] the linearized form `I + [v]x` is used; above it,
/// the half-angle expansion, which never divides by a vanishing norm.
impl<D: Real, S: Real> ConvertFrom<RotationVector<S>> for RotationMatrix<D> {
    fn convert_from(source: &RotationVector<S>) -> Self {
        let rv = source.cast::<D>().vector();
        let (v1, v2, v3) = (rv.x, rv.y, rv.z);
        let v = rv.norm();
        let one = D::one();
        let two = D::constant(2.0);

        if v < D::dummy_precision() {
            return Self::from_matrix_unchecked(Matrix3::new(
                one, -v3, v2, //
                v3, one, -v1, //
                -v2, v1, one,
            ));
        }

        let t3 = v * D::constant(0.5);
        let (t2, t4) = t3.sin_cos();
        let t5 = one / (v * v);
        let t6 = t4 * v * v3;
        let t7 = t2 * v1 * v2;
        let t8 = t2 * t2;
        let t9 = v1 * v1;
        let t10 = v2 * v2;
        let t11 = v3 * v3;
        let t12 = v * v;
        let t13 = t4 * t4;
        let t14 = t12 * t13;
        let t15 = t2 * v1 * v3;
        let t16 = t4 * v * v1;
        let t17 = t2 * v2 * v3;

        Self::from_matrix_unchecked(Matrix3::new(
            t5 * (t14 - t8 * (-t9 + t10 + t11)),
            -(t2 * t5 * (t6 - t7) * two),
            t2 * t5 * (t15 + t4 * v * v2) * two,
            t2 * t5 * (t6 + t7) * two,
            t5 * (t14 - t8 * (t9 - t10 + t11)),
            -(t2 * t5 * (t16 - t17) * two),
            t2 * t5 * (t15 - t4 * v * v2) * two,
            t2 * t5 * (t16 + t17) * two,
            t5 * (t14 - t8 * (t9 + t10 - t11)),
        ))
    }
}

/// `Rz(yaw) * Ry(pitch) * Rx(roll)`.
impl<D: Real, S: Real> ConvertFrom<EulerAnglesZyx<S>> for RotationMatrix<D> {
    fn convert_from(source: &EulerAnglesZyx<S>) -> Self {
        let zyx = source.cast::<D>();
        let (sy, cy) = zyx.yaw().sin_cos();
        let (sp, cp) = zyx.pitch().sin_cos();
        let (sr, cr) = zyx.roll().sin_cos();

        Self::from_matrix_unchecked(Matrix3::new(
            cy * cp,
            cy * sp * sr - sy * cr,
            cy * sp * cr + sy * sr,
            sy * cp,
            sy * sp * sr + cy * cr,
            sy * sp * cr - cy * sr,
            -sp,
            cp * sr,
            cp * cr,
        ))
    }
}

/// `Rx(roll) * Ry(pitch) * Rz(yaw)`.
impl<D: Real, S: Real> ConvertFrom<EulerAnglesXyz<S>> for RotationMatrix<D> {
    fn convert_from(source: &EulerAnglesXyz<S>) -> Self {
        let xyz = source.cast::<D>();
        let (sr, cr) = xyz.roll().sin_cos();
        let (sp, cp) = xyz.pitch().sin_cos();
        let (sy, cy) = xyz.yaw().sin_cos();

        Self::from_matrix_unchecked(Matrix3::new(
            cp * cy,
            -cp * sy,
            sp,
            cr * sy + sr * sp * cy,
            cr * cy - sr * sp * sy,
            -sr * cp,
            sr * sy - cr * sp * cy,
            sr * cy + cr * sp * sy,
            cr * cp,
        ))
    }
}
