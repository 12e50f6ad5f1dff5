//! Affine map between plane and viewport coordinates.
//!
//! - `Affine2`: `x ↦ M x + t` with composition helpers used by the transform engine.
//!
//! Composition rules
//! - `translate` adds a translation in the output (screen) space.
//! - `scale` multiplies the linear part on the input side; the image of the
//!   plane origin (`t`) is unchanged, so zoom is centred on it.

use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

/// 2D affine map: `x ↦ M x + t`.
///
/// Invariant: `det(M) != 0` for every map produced by `identity`, `scaling`,
/// `translation`, `translate`, `scale` and `then` with nonzero factors.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Affine2 {
    pub m: Matrix2<f64>,
    pub t: Vector2<f64>,
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Affine2 {
    #[inline]
    pub fn identity() -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::zeros(),
        }
    }

    /// Pure axis scaling `diag(sx, sy)`. A zero factor gives a singular map.
    #[inline]
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            m: Matrix2::new(sx, 0.0, 0.0, sy),
            t: Vector2::zeros(),
        }
    }

    /// Pure translation by `(dx, dy)`.
    #[inline]
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: Matrix2::identity(),
            t: Vector2::new(dx, dy),
        }
    }

    /// `T(dx,dy) ∘ self`: shift the output by `(dx, dy)`.
    #[inline]
    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self {
            m: self.m,
            t: self.t + Vector2::new(dx, dy),
        }
    }

    /// `self` with its linear part scaled by `diag(sx, sy)`; `t` is kept.
    #[inline]
    pub fn scale(&self, sx: f64, sy: f64) -> Self {
        Self {
            m: self.m * Matrix2::new(sx, 0.0, 0.0, sy),
            t: self.t,
        }
    }

    /// `other ∘ self`: apply `self` first, then `other`.
    #[inline]
    pub fn then(&self, other: &Affine2) -> Self {
        Self {
            m: other.m * self.m,
            t: other.m * self.t + other.t,
        }
    }

    #[inline]
    pub fn apply(&self, v: Vector2<f64>) -> Vector2<f64> {
        self.m * v + self.t
    }

    #[inline]
    pub fn determinant(&self) -> f64 {
        self.m.determinant()
    }

    /// Inverse map, or `None` if the linear part is singular.
    #[inline]
    pub fn inverse(&self) -> Option<Self> {
        self.m.try_inverse().map(|minv| Self {
            m: minv,
            t: -(minv * self.t),
        })
    }

    /// Finite entries, a normal determinant and a finite inverse.
    pub fn is_well_conditioned(&self) -> bool {
        let finite = |a: &Self| a.m.iter().chain(a.t.iter()).all(|v| v.is_finite());
        finite(self)
            && self.determinant().is_normal()
            && self.inverse().is_some_and(|inv| finite(&inv))
    }

    /// Screen length of one plane unit along x (absolute value).
    #[inline]
    pub fn unit_length_x(&self) -> f64 {
        (self.apply(Vector2::new(1.0, 0.0)) - self.t).norm()
    }
}
