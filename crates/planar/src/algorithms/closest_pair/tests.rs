use super::*;
use crate::algorithms::{AlgoError, AlgorithmResult, GeometryAlgorithm};
use crate::geom::rand::{rand_lattice_points, rand_points};
use nalgebra::{vector, Vector2};
use proptest::prelude::*;

fn both(points: &[Vector2<f64>]) -> (ClosestPair, ClosestPair) {
    let naive = closest_pair_naive(points).expect("naive");
    let dc = closest_pair_divide_and_conquer(points).expect("dc");
    (naive, dc)
}

#[test]
fn example_three_points() {
    let pts = vec![vector![0.0, 0.0], vector![3.0, 4.0], vector![1.0, 1.0]];
    let (naive, dc) = both(&pts);
    for cp in [naive, dc] {
        assert_eq!(cp.distance, 2f64.sqrt());
        assert_eq!(cp.p1, vector![0.0, 0.0]);
        assert_eq!(cp.p2, vector![1.0, 1.0]);
    }
}

#[test]
fn example_two_points() {
    let pts = vec![vector![0.0, 0.0], vector![10.0, 10.0]];
    let (naive, dc) = both(&pts);
    assert_eq!(naive.distance, 200f64.sqrt());
    assert!((naive.distance - 14.142).abs() < 1e-3);
    assert_eq!(dc.distance, naive.distance);
    assert_eq!((naive.i, naive.j), (0, 1));
    assert_eq!((dc.i, dc.j), (0, 1));
}

#[test]
fn exact_duplicates_give_zero() {
    let mut pts = rand_points(40, 100.0, 3);
    pts.push(pts[17]);
    let (naive, dc) = both(&pts);
    assert_eq!(naive.distance, 0.0);
    assert_eq!(dc.distance, 0.0);
    assert_eq!(dc.p1, dc.p2);
}

#[test]
fn all_points_coincident() {
    let pts = vec![vector![2.5, -1.0]; 9];
    let (naive, dc) = both(&pts);
    assert_eq!(naive.distance, 0.0);
    assert_eq!(dc.distance, 0.0);
    // earliest pair in scan order
    assert_eq!((naive.i, naive.j), (0, 1));
}

#[test]
fn naive_keeps_earliest_tie() {
    // (0,1) and (2,3) are both at distance 1.
    let pts = vec![
        vector![0.0, 0.0],
        vector![1.0, 0.0],
        vector![10.0, 0.0],
        vector![11.0, 0.0],
    ];
    let cp = closest_pair_naive(&pts).unwrap();
    assert_eq!((cp.i, cp.j), (0, 1));
}

#[test]
fn collinear_vertical_and_horizontal() {
    let vertical: Vec<_> = (0..50).map(|k| vector![3.0, (k * k) as f64]).collect();
    let (naive, dc) = both(&vertical);
    assert_eq!(naive.distance, 1.0);
    assert_eq!(dc.distance, 1.0);

    let horizontal: Vec<_> = (0..50).rev().map(|k| vector![(k * 3) as f64 + 0.5, -7.0]).collect();
    let (naive, dc) = both(&horizontal);
    assert_eq!(naive.distance, 3.0);
    assert_eq!(dc.distance, 3.0);
}

#[test]
fn two_points_is_enough_to_execute() {
    let pts = [vector![1.0, 1.0], vector![4.0, 5.0]];
    let algs: [&dyn GeometryAlgorithm; 2] = [&ClosestPairNaive, &ClosestPairDivideAndConquer::default()];
    for alg in algs {
        assert_eq!(
            alg.execute(&pts).unwrap(),
            AlgorithmResult::PointPair {
                p1: pts[0],
                p2: pts[1],
                distance: 5.0,
            }
        );
    }
}

#[test]
fn too_few_points_is_invalid_argument() {
    let algs: [&dyn GeometryAlgorithm; 2] = [&ClosestPairNaive, &ClosestPairDivideAndConquer::default()];
    for alg in algs {
        for pts in [vec![], vec![vector![1.0, 1.0]]] {
            let err = alg.execute(&pts).unwrap_err();
            assert_eq!(
                err,
                AlgoError::InvalidArgument {
                    algorithm: alg.name().to_string(),
                    required: 2,
                    given: pts.len(),
                }
            );
        }
    }
    assert!(closest_pair_naive(&[]).is_none());
    assert!(closest_pair_divide_and_conquer(&[vector![0.0, 0.0]]).is_none());
}

#[test]
fn execute_wraps_point_pair() {
    let pts = vec![vector![0.0, 0.0], vector![3.0, 4.0], vector![1.0, 1.0]];
    let res = ClosestPairDivideAndConquer::default().execute(&pts).unwrap();
    assert_eq!(
        res,
        AlgorithmResult::PointPair {
            p1: vector![0.0, 0.0],
            p2: vector![1.0, 1.0],
            distance: 2f64.sqrt(),
        }
    );
    assert_eq!(res.distance(), Some(2f64.sqrt()));
}

#[test]
fn lattice_inputs_with_many_ties_agree() {
    for seed in 0..40 {
        let pts = rand_lattice_points(120, 6, seed);
        let (naive, dc) = both(&pts);
        assert_eq!(naive.distance, dc.distance, "seed {seed}");
    }
}

#[test]
fn parallel_recursion_matches_sequential() {
    let pts = rand_points(3000, 1000.0, 11);
    let seq = ClosestPairDivideAndConquer::sequential().execute(&pts).unwrap();
    let par = ClosestPairDivideAndConquer::with_parallel_cutoff(8)
        .execute(&pts)
        .unwrap();
    assert_eq!(seq, par);
    let naive = closest_pair_naive(&pts).unwrap();
    assert_eq!(seq.distance(), Some(naive.distance));
}

#[test]
fn reported_distance_matches_reported_points() {
    let pts = rand_points(500, 50.0, 5);
    let dc = closest_pair_divide_and_conquer(&pts).unwrap();
    assert_eq!(dc.p1, pts[dc.i]);
    assert_eq!(dc.p2, pts[dc.j]);
    assert_eq!(dc.distance, crate::geom::distance(dc.p1, dc.p2));
}

fn point() -> impl Strategy<Value = Vector2<f64>> {
    (-1000.0f64..=1000.0, -1000.0f64..=1000.0).prop_map(|(x, y)| Vector2::new(x, y))
}

proptest! {
    #[test]
    fn naive_and_dc_agree(pts in prop::collection::vec(point(), 2..=200)) {
        let (naive, dc) = both(&pts);
        prop_assert_eq!(naive.distance, dc.distance);
    }

    #[test]
    fn permutation_keeps_distance(
        (pts, shuffled) in prop::collection::vec(point(), 2..=120)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    ) {
        let a = closest_pair_divide_and_conquer(&pts).unwrap();
        let b = closest_pair_divide_and_conquer(&shuffled).unwrap();
        prop_assert_eq!(a.distance, b.distance);
        let a = closest_pair_naive(&pts).unwrap();
        let b = closest_pair_naive(&shuffled).unwrap();
        prop_assert_eq!(a.distance, b.distance);
    }
}
