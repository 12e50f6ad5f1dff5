use nalgebra::Vector2;

use super::ClosestPair;
use crate::geom::{cmp_f64, distance};

/// Divide-and-conquer closest pair on a single thread. `None` for fewer than 2 points.
///
/// Precondition: finite coordinates. Duplicates and collinear inputs are fine;
/// coincident points yield distance `0.0`.
pub fn closest_pair_divide_and_conquer(points: &[Vector2<f64>]) -> Option<ClosestPair> {
    (points.len() >= 2).then(|| solve(points, usize::MAX))
}

#[derive(Clone, Copy, Debug)]
struct Best {
    a: usize,
    b: usize,
    d: f64,
}

/// Requires at least 2 points.
pub(super) fn solve(points: &[Vector2<f64>], parallel_cutoff: usize) -> ClosestPair {
    debug_assert!(points.len() >= 2);
    // Stable sorts over ascending indices: ties keep input order.
    let mut px: Vec<usize> = (0..points.len()).collect();
    px.sort_by(|&a, &b| cmp_f64(points[a].x, points[b].x));
    let mut py: Vec<usize> = (0..points.len()).collect();
    py.sort_by(|&a, &b| cmp_f64(points[a].y, points[b].y));

    let mut rank_x = vec![0usize; points.len()];
    for (r, &i) in px.iter().enumerate() {
        rank_x[i] = r;
    }
    let ctx = Ctx {
        points,
        rank_x: &rank_x,
        parallel_cutoff,
    };
    let best = ctx.recurse(&px, 0, &py);
    ClosestPair::from_indices(points, best.a, best.b, best.d)
}

struct Ctx<'a> {
    points: &'a [Vector2<f64>],
    /// Position of each input index in the global x order.
    rank_x: &'a [usize],
    parallel_cutoff: usize,
}

impl Ctx<'_> {
    /// `px` is the x-ordered range starting at global rank `offset`; `py` holds the
    /// same indices in y order.
    fn recurse(&self, px: &[usize], offset: usize, py: &[usize]) -> Best {
        let n = px.len();
        debug_assert_eq!(n, py.len());
        if n <= 3 {
            return self.brute(px);
        }
        let mid = n / 2;
        let split_rank = offset + mid;
        let (py_left, py_right): (Vec<usize>, Vec<usize>) =
            py.iter().partition(|&&i| self.rank_x[i] < split_rank);
        let (px_left, px_right) = px.split_at(mid);

        let (left, right) = if n >= self.parallel_cutoff {
            rayon::join(
                || self.recurse(px_left, offset, &py_left),
                || self.recurse(px_right, split_rank, &py_right),
            )
        } else {
            (
                self.recurse(px_left, offset, &py_left),
                self.recurse(px_right, split_rank, &py_right),
            )
        };
        let best = if left.d <= right.d { left } else { right };
        self.merge_strip(py, self.points[px[mid]].x, best)
    }

    /// Scan the y-ordered strip `|x - mid_x| < d`; each point is compared only with
    /// later strip points closer than the current best in y.
    fn merge_strip(&self, py: &[usize], mid_x: f64, mut best: Best) -> Best {
        let strip: Vec<usize> = py
            .iter()
            .copied()
            .filter(|&i| (self.points[i].x - mid_x).abs() < best.d)
            .collect();
        for (k, &a) in strip.iter().enumerate() {
            let pa = self.points[a];
            for &b in &strip[k + 1..] {
                let pb = self.points[b];
                if pb.y - pa.y >= best.d {
                    break;
                }
                let d = distance(pa, pb);
                if d < best.d {
                    best = Best { a, b, d };
                }
            }
        }
        best
    }

    fn brute(&self, px: &[usize]) -> Best {
        let mut best = Best {
            a: px[0],
            b: px[1],
            d: distance(self.points[px[0]], self.points[px[1]]),
        };
        for (k, &a) in px.iter().enumerate() {
            for &b in &px[k + 1..] {
                let d = distance(self.points[a], self.points[b]);
                if d < best.d {
                    best = Best { a, b, d };
                }
            }
        }
        best
    }
}
