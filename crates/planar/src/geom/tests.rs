use super::*;
use nalgebra::{matrix, vector};
use proptest::prelude::*;

fn close(a: nalgebra::Vector2<f64>, b: nalgebra::Vector2<f64>, tol: f64) -> bool {
    (a - b).norm() <= tol * (1.0 + a.norm().max(b.norm()))
}

#[test]
fn identity_is_neutral() {
    let f = Affine2::scaling(2.0, -3.0).translate(5.0, 7.0);
    let id = Affine2::identity();
    assert_eq!(f.then(&id), f);
    assert_eq!(id.then(&f), f);
    let p = vector![1.5, -2.0];
    assert_eq!(id.apply(p), p);
}

#[test]
fn translate_shifts_output() {
    let f = Affine2::scaling(45.0, -45.0).translate(400.0, 300.0);
    assert_eq!(f.apply(vector![0.0, 0.0]), vector![400.0, 300.0]);
    assert_eq!(f.apply(vector![1.0, 0.0]).x - f.apply(vector![0.0, 0.0]).x, 45.0);
    // y flipped: plane-up is screen-up
    assert!(f.apply(vector![0.0, 1.0]).y < 300.0);
}

#[test]
fn scale_keeps_image_of_origin() {
    let f = Affine2::scaling(45.0, -45.0).translate(400.0, 300.0);
    let g = f.scale(2.0, 2.0);
    assert_eq!(g.apply(vector![0.0, 0.0]), vector![400.0, 300.0]);
    assert_eq!(g.apply(vector![1.0, 0.0]).x, 490.0);
    assert_eq!(g.unit_length_x(), 90.0);
}

#[test]
fn then_matches_sequential_application() {
    let a = Affine2 {
        m: matrix![2.0, 0.0; 0.0, 0.5],
        t: vector![1.0, -1.0],
    };
    let b = Affine2::translation(3.0, 4.0).scale(-1.0, 2.0);
    let p = vector![0.25, 8.0];
    let composed = a.then(&b).apply(p);
    let seq = b.apply(a.apply(p));
    assert!(close(composed, seq, 1e-12));
}

#[test]
fn singular_map_has_no_inverse() {
    let f = Affine2 {
        m: matrix![1.0, 2.0; 2.0, 4.0],
        t: vector![0.0, 0.0],
    };
    assert!(f.inverse().is_none());
    assert!(Affine2::identity().inverse().is_some());
}

#[test]
fn conditioning_rejects_singular_and_non_finite_maps() {
    assert!(Affine2::scaling(45.0, -45.0).translate(400.0, 300.0).is_well_conditioned());
    assert!(!Affine2::scaling(0.0, 1.0).is_well_conditioned());
    assert!(!Affine2::scaling(1e-160, 1e-160).is_well_conditioned());
    assert!(!Affine2::scaling(1e200, 1e200).is_well_conditioned());
    assert!(!Affine2::translation(f64::INFINITY, 0.0).is_well_conditioned());
}

#[test]
fn distance_is_exact_for_pythagorean_triples() {
    assert_eq!(distance(vector![0.0, 0.0], vector![3.0, 4.0]), 5.0);
    assert_eq!(distance(vector![1.0, 1.0], vector![1.0, 1.0]), 0.0);
    let a = vector![-3.25, 10.5];
    let b = vector![7.0, -0.125];
    assert_eq!(distance(a, b), distance(b, a));
}

#[test]
fn lattice_points_are_integral_and_bounded() {
    let pts = crate::geom::rand::rand_lattice_points(50, 2, 7);
    assert_eq!(pts.len(), 50);
    for p in pts {
        assert_eq!(p.x.fract(), 0.0);
        assert!(p.x.abs() <= 2.0 && p.y.abs() <= 2.0);
    }
}

#[derive(Clone, Debug)]
enum Step {
    Translate(f64, f64),
    Scale(f64, f64),
}

fn factor() -> impl Strategy<Value = f64> {
    prop_oneof![0.5f64..4.0, -4.0f64..-0.5]
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        (-1e3f64..1e3, -1e3f64..1e3).prop_map(|(dx, dy)| Step::Translate(dx, dy)),
        (factor(), factor()).prop_map(|(sx, sy)| Step::Scale(sx, sy)),
    ]
}

proptest! {
    #[test]
    fn inverse_round_trips(steps in prop::collection::vec(step(), 0..6),
                           x in -1e3f64..1e3, y in -1e3f64..1e3) {
        let mut f = Affine2::identity();
        for s in &steps {
            f = match *s {
                Step::Translate(dx, dy) => f.translate(dx, dy),
                Step::Scale(sx, sy) => f.scale(sx, sy),
            };
        }
        let inv = f.inverse().expect("translate/scale compositions stay invertible");
        let p = vector![x, y];
        prop_assert!(close(inv.apply(f.apply(p)), p, 1e-9));
    }
}
