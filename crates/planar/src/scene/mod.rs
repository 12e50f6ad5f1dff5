//! Points on the plane, the selected subset, and cached algorithm results.
//!
//! - `PointStore`: points keyed by dense ids `0..n` in insertion order.
//! - `SelectionSet`: ids of selected points; every id refers to a stored point.
//! - `Scene`: the three stores behind one lock, so `reset` is atomic.

mod state;
mod store;

pub use state::{Scene, SceneSnapshot};
pub use store::{PointId, PointStore, SelectionSet};
