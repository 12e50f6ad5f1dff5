use std::collections::BTreeSet;
use std::fmt;

use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

use crate::geom::distance;
use crate::view::Viewport;

/// Point identifier; equals the insertion index since the last reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(pub usize);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Plane points in insertion order. Ids are never reused until `clear`.
#[derive(Clone, Debug, Default)]
pub struct PointStore {
    points: Vec<Vector2<f64>>,
}

impl PointStore {
    /// Store a plane point; its id is the current size.
    pub fn insert(&mut self, world: Vector2<f64>) -> PointId {
        let id = PointId(self.points.len());
        self.points.push(world);
        id
    }

    /// Place a point clicked at `screen`. No-op outside the viewport; otherwise the
    /// position is mapped through the committed inverse.
    pub fn add_point(&mut self, screen: Vector2<f64>, viewport: &Viewport) -> Option<PointId> {
        if !viewport.contains(screen) {
            return None;
        }
        Some(self.insert(viewport.to_world.apply(screen)))
    }

    pub fn get(&self, id: PointId) -> Option<Vector2<f64>> {
        self.points.get(id.0).copied()
    }

    pub fn contains(&self, id: PointId) -> bool {
        id.0 < self.points.len()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointId, Vector2<f64>)> + '_ {
        self.points.iter().enumerate().map(|(i, p)| (PointId(i), *p))
    }

    pub fn ids(&self) -> impl Iterator<Item = PointId> {
        (0..self.points.len()).map(PointId)
    }

    /// Nearest stored point to `world`; the first one in insertion order wins ties.
    pub fn pick_nearest(&self, world: Vector2<f64>) -> Option<PointId> {
        let mut best: Option<(PointId, f64)> = None;
        for (id, p) in self.iter() {
            let d = distance(p, world);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Drop all points and restart ids at zero.
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

/// Selected point ids, iterated in ascending order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<PointId>,
}

impl SelectionSet {
    /// Add if absent, remove if present. Returns whether `id` is selected afterwards.
    pub fn toggle(&mut self, id: PointId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn insert(&mut self, id: PointId) -> bool {
        self.ids.insert(id)
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = PointId> + '_ {
        self.ids.iter().copied()
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }
}
