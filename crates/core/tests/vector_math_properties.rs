//! Algebraic properties of the vector helpers

mod common;

use approx::{assert_abs_diff_eq, assert_relative_eq};
use nalgebra::{DVector, SVector};
use rain_cloth_core::core_types::vector_math::{
    add, add_dyn, distance, distance_dyn, scale, sub, sub_dyn,
};
use rain_cloth_core::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_vec3(rng: &mut StdRng) -> Vec3 {
    Vec3::new(
        rng.random_range(-100.0..100.0),
        rng.random_range(-100.0..100.0),
        rng.random_range(-100.0..100.0),
    )
}

#[test]
fn add_and_sub_are_inverses() {
    let mut rng = StdRng::seed_from_u64(100);
    for _ in 0..500 {
        let a = random_vec3(&mut rng);
        let b = random_vec3(&mut rng);
        assert_relative_eq!(sub(&add(&a, &b), &b), a, epsilon = 1e-9);
    }
}

#[test]
fn distance_is_zero_to_self_and_symmetric() {
    let mut rng = StdRng::seed_from_u64(101);
    for _ in 0..500 {
        let a = random_vec3(&mut rng);
        let b = random_vec3(&mut rng);
        assert_eq!(distance(&a, &a), 0.0);
        assert_eq!(distance(&a, &b), distance(&b, &a));
    }
}

#[test]
fn scale_matches_repeated_addition() {
    let a = Vec3::new(0.25, -1.5, 4.0);
    assert_eq!(scale(&a, 3.0), add(&add(&a, &a), &a));
    assert_eq!(scale(&a, 0.0), Vec3::zeros());
}

#[test]
fn helpers_are_length_generic() {
    let a = SVector::<f64, 5>::from_element(1.0);
    let b = SVector::<f64, 5>::from_element(3.0);
    assert_abs_diff_eq!(distance(&a, &b), 20.0_f64.sqrt(), epsilon = 1e-12);

    let c = DVector::from_vec(vec![1.0, 2.0]);
    let d = DVector::from_vec(vec![4.0, 6.0]);
    assert_eq!(distance_dyn(&c, &d), 5.0);
    assert_eq!(sub_dyn(&add_dyn(&c, &d), &d), c);
}

#[test]
#[should_panic(expected = "vector length mismatch")]
fn mismatched_lengths_fail_fast() {
    let short = DVector::from_vec(vec![1.0, 2.0]);
    let long = DVector::from_vec(vec![1.0, 2.0, 3.0]);
    let _ = add_dyn(&short, &long);
}
