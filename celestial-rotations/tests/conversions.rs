use approx::assert_abs_diff_eq;
use celestial_rotations::test_helpers::{assert_same_rotation, sample_angle_axes, sample_quaternions};
use celestial_rotations::{
    assert_rotation_near, AngleAxis, ConvertFrom, EulerAnglesXyz, EulerAnglesZyx, Rotation,
    RotationMatrix, RotationQuaternion, RotationVector,
};
use nalgebra::{Matrix3, Vector3};
use std::f64::consts::{FRAC_PI_2, PI};

/// Converts every sample into `A`, through `B`, and back into `A`.
fn round_trip<A, B>()
where
    A: Rotation<Scalar = f64> + ConvertFrom<AngleAxis<f64>> + ConvertFrom<B>,
    B: Rotation<Scalar = f64> + ConvertFrom<A>,
    RotationQuaternion<f64>: ConvertFrom<A> + ConvertFrom<B>,
{
    for aa in sample_angle_axes() {
        let a = A::convert_from(&aa);
        let b = B::convert_from(&a);
        let back = A::convert_from(&b);
        assert_same_rotation(&a, &b, 1e-9);
        assert_same_rotation(&back, &a, 1e-9);
        assert_same_rotation(&back, &aa, 1e-9);
    }
}

macro_rules! for_each_pair {
    ($f:ident; $($kind:ty),+) => {
        for_each_pair!(@outer $f; [$($kind),+]; $($kind),+);
    };
    (@outer $f:ident; $all:tt; $($a:ty),+) => {
        $( for_each_pair!(@inner $f; $a; $all); )+
    };
    (@inner $f:ident; $a:ty; [$($b:ty),+]) => {
        $( $f::<$a, $b>(); )+
    };
}

// --- Round trips ---

#[test]
fn every_pair_round_trips() {
    for_each_pair!(
        round_trip;
        RotationMatrix<f64>,
        RotationQuaternion<f64>,
        AngleAxis<f64>,
        RotationVector<f64>,
        EulerAnglesZyx<f64>,
        EulerAnglesXyz<f64>
    );
}

#[test]
fn round_trips_in_single_precision() {
    for aa in sample_angle_axes() {
        let aa32 = AngleAxis::<f32>::convert_from(&aa);
        let m = RotationMatrix::<f32>::convert_from(&aa32);
        let zyx = EulerAnglesZyx::<f32>::convert_from(&m);
        let rv = RotationVector::<f32>::convert_from(&zyx);
        let q = RotationQuaternion::<f32>::convert_from(&rv);
        let xyz = EulerAnglesXyz::<f32>::convert_from(&q);
        let back = AngleAxis::<f32>::convert_from(&xyz);
        assert_rotation_near!(back, aa32, 1e-3, "f32 chain from {}", aa);
    }
}

#[test]
fn cross_precision_conversions_agree() {
    for aa in sample_angle_axes() {
        let wide = RotationMatrix::<f64>::convert_from(&aa);
        let narrow = RotationQuaternion::<f32>::convert_from(&wide);
        let widened = RotationMatrix::<f64>::convert_from(&narrow);
        assert!(widened.max_difference(&wide) < 1e-5, "{}", aa);

        let direct = RotationQuaternion::<f32>::convert_from(&aa);
        assert_rotation_near!(direct, narrow, 1e-5, "{}", aa);
    }
}

#[test]
fn same_kind_conversion_is_exact() {
    let m = RotationMatrix::about_x(0.3_f64) * RotationMatrix::about_y(-1.0);
    assert_eq!(RotationMatrix::<f64>::convert_from(&m), m);

    let zyx = EulerAnglesZyx::new(7.0_f64, -3.0, 12.0);
    assert_eq!(EulerAnglesZyx::<f64>::convert_from(&zyx), zyx);
}

#[test]
fn conversions_produce_valid_representations() {
    for aa in sample_angle_axes() {
        assert!(RotationMatrix::<f64>::convert_from(&aa).is_valid(1e-12), "{}", aa);
        assert!(RotationQuaternion::<f64>::convert_from(&aa).is_valid(1e-12), "{}", aa);
        let m = RotationMatrix::<f64>::convert_from(&aa);
        assert!(AngleAxis::<f64>::convert_from(&m).is_valid(1e-12), "{}", aa);
        assert!(RotationMatrix::<f64>::convert_from(&RotationVector::<f64>::convert_from(&m))
            .is_valid(1e-12));
    }
}

// --- Concrete scenarios ---

#[test]
fn quarter_turn_about_z_as_matrix() {
    let aa = AngleAxis::new(FRAC_PI_2, Vector3::z());
    let m = RotationMatrix::<f64>::convert_from(&aa);
    let expected = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);
    assert_abs_diff_eq!(m.matrix(), expected, epsilon = 1e-15);
}

#[test]
fn zero_rotation_vector_is_exact_identity() {
    let rv = RotationVector::new(0.0_f64, 0.0, 0.0);
    assert_eq!(RotationMatrix::<f64>::convert_from(&rv), RotationMatrix::identity());
    assert_eq!(
        RotationQuaternion::<f64>::convert_from(&rv),
        RotationQuaternion::identity()
    );
    assert_eq!(AngleAxis::<f64>::convert_from(&rv), AngleAxis::identity());
}

#[test]
fn negative_identity_quaternion_is_identity() {
    let q = RotationQuaternion::new_unchecked(-1.0_f64, 0.0, 0.0, 0.0);
    assert_eq!(q.unique().to_array(), [1.0, 0.0, 0.0, 0.0]);
    assert_eq!(RotationMatrix::<f64>::convert_from(&q), RotationMatrix::identity());
    assert_eq!(AngleAxis::<f64>::convert_from(&q), AngleAxis::identity());
    assert!(q.same_rotation(&RotationMatrix::<f64>::identity(), 0.0));
}

// --- Singularities ---

#[test]
fn rotation_vector_is_continuous_across_small_angle_threshold() {
    let axis = Vector3::new(2.0, -1.0, 3.0).normalize();
    for norm in [0.5e-12, 0.99e-12, 1e-12, 1.01e-12, 2e-12, 1e-9] {
        let rv = RotationVector::from_vector(axis * norm);
        let exact = AngleAxis::new(norm, axis);

        let m = RotationMatrix::<f64>::convert_from(&rv);
        assert_rotation_near!(m, exact, 1e-15, "matrix at |v| = {}", norm);

        let q = RotationQuaternion::<f64>::convert_from(&rv);
        assert_rotation_near!(q, exact, 1e-15, "quaternion at |v| = {}", norm);

        let back = RotationVector::<f64>::convert_from(&q);
        assert!(back.max_difference(&rv) < 1e-20, "log map at |v| = {}", norm);
    }
}

#[test]
fn tiny_rotations_survive_angle_axis_pivot() {
    for angle in [8e-13, 5e-13, 3e-14, 1e-15] {
        let aa = AngleAxis::new(angle, Vector3::y());
        let q = RotationQuaternion::<f64>::convert_from(&aa);
        let back = AngleAxis::<f64>::convert_from(&q);
        assert_abs_diff_eq!(back.angle(), angle, epsilon = angle * 1e-12);
        assert_abs_diff_eq!(back.axis(), Vector3::y(), epsilon = 1e-15);

        let rv = RotationVector::new(0.0, angle, 0.0);
        let from_rv = AngleAxis::<f64>::convert_from(&rv);
        assert_eq!(from_rv.angle(), angle);
        assert_eq!(from_rv.axis(), Vector3::y());
        assert_eq!(rv.unique(), rv);
        assert!(!rv.same_rotation(&RotationVector::<f64>::identity(), 0.0));

        let zyx = EulerAnglesZyx::new(angle, 0.0, 0.0);
        let through_aa = RotationMatrix::<f64>::convert_from(&AngleAxis::<f64>::convert_from(&zyx));
        let direct = RotationMatrix::<f64>::convert_from(&zyx);
        assert_abs_diff_eq!(through_aa.get(1, 0), angle, epsilon = angle * 1e-12);
        assert!(through_aa.max_difference(&direct) <= angle * 1e-14, "{}", angle);
    }
}

#[test]
fn quaternion_double_cover() {
    let samples = sample_quaternions();
    for pair in samples.chunks(2) {
        let (q, negated) = (pair[0], pair[1]);
        let m = RotationMatrix::<f64>::convert_from(&q);
        let n = RotationMatrix::<f64>::convert_from(&negated);
        assert!(m.max_difference(&n) < 1e-15, "{}", q);
        assert!(q.same_rotation(&negated, 1e-15), "{}", q);

        let rv = RotationVector::<f64>::convert_from(&q);
        let rv_negated = RotationVector::<f64>::convert_from(&negated);
        assert!(rv.max_difference(&rv_negated) < 1e-15, "{}", q);
    }
}

#[test]
fn half_turns_convert_through_every_kind() {
    for axis in [Vector3::x(), Vector3::y(), Vector3::z(), Vector3::new(0.0, 0.6, 0.8)] {
        let aa = AngleAxis::new(PI, axis);
        let m = RotationMatrix::<f64>::convert_from(&aa);
        let q = RotationQuaternion::<f64>::convert_from(&m);
        assert_abs_diff_eq!(q.w(), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(q.angle(), PI, epsilon = 1e-15);

        let back = AngleAxis::<f64>::convert_from(&q).unique();
        assert_abs_diff_eq!(back.angle(), PI, epsilon = 1e-15);
        assert_rotation_near!(back, aa, 1e-14);
    }
}

#[test]
fn euler_gimbal_lock_preserves_rotation() {
    for pitch in [FRAC_PI_2, -FRAC_PI_2] {
        let zyx = EulerAnglesZyx::new(0.8, pitch, -0.3);
        let m = RotationMatrix::<f64>::convert_from(&zyx);
        let back = EulerAnglesZyx::<f64>::convert_from(&m);
        assert_eq!(back.roll(), 0.0);
        assert_rotation_near!(back, zyx, 1e-7);

        let xyz = EulerAnglesXyz::new(-0.3, pitch, 0.8);
        let back = EulerAnglesXyz::<f64>::convert_from(&RotationMatrix::<f64>::convert_from(&xyz));
        assert_eq!(back.roll(), 0.0);
        assert_rotation_near!(back, xyz, 1e-7);
    }
}

// --- Vector rotation ---

#[test]
fn every_kind_rotates_vectors_alike() {
    let v = Vector3::new(0.4, -1.3, 2.2);
    for aa in sample_angle_axes() {
        let expected = RotationMatrix::<f64>::convert_from(&aa).rotate(&v);
        let q = RotationQuaternion::<f64>::convert_from(&aa);
        assert_abs_diff_eq!(q.rotate(&v), expected, epsilon = 1e-13);
        assert_abs_diff_eq!(aa.rotate(&v), expected, epsilon = 1e-13);
        let rv = RotationVector::<f64>::convert_from(&aa);
        assert_abs_diff_eq!(rv.rotate(&v), expected, epsilon = 1e-13);
        let zyx = EulerAnglesZyx::<f64>::convert_from(&aa);
        assert_abs_diff_eq!(zyx.rotate(&v), expected, epsilon = 1e-12);
        let xyz = EulerAnglesXyz::<f64>::convert_from(&aa);
        assert_abs_diff_eq!(xyz.rotate(&v), expected, epsilon = 1e-12);
    }
}

// --- Serialization ---

#[cfg(feature = "serde")]
#[test]
fn representations_serialize_to_json() {
    let aa = AngleAxis::new(1.25_f64, Vector3::y());
    let json = serde_json::to_string(&aa).unwrap();
    let back: AngleAxis<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, aa);

    let q = RotationQuaternion::<f64>::convert_from(&aa);
    let json = serde_json::to_string(&q).unwrap();
    let back: RotationQuaternion<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, q);

    let m = RotationMatrix::<f64>::convert_from(&aa);
    let json = serde_json::to_string(&m).unwrap();
    let back: RotationMatrix<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, m);
}
