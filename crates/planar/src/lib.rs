//! Points on an infinite pannable/zoomable plane and geometric algorithms over them.
//!
//! Layers (leaves first)
//! - `geom`: `Vec2`, `Affine2`, `distance`, seeded random point clouds.
//! - `view`: pending/committed transform engine and its periodic commit ticker.
//! - `scene`: point store, selection set, cached results; reset is atomic.
//! - `algorithms`: capability trait, registry, closest pair (naive and divide & conquer).
//! - `session`: composes the above behind the pointer/viewport input protocol.
//! - `events`: explicit change notification for views.
//!
//! Rendering, panels and window bootstrap live outside this crate; they consume
//! `session::Frame` and the event stream.

pub mod algorithms;
pub mod api;
pub mod events;
pub mod geom;
pub mod scene;
pub mod session;
pub mod view;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom::Affine2;
pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::algorithms::{
        AlgoError, AlgorithmRegistry, AlgorithmResult, ClosestPairDivideAndConquer,
        ClosestPairNaive, GeometryAlgorithm,
    };
    pub use crate::geom::{distance, rand::rand_points, Affine2};
    pub use crate::scene::PointId;
    pub use crate::session::{Click, Frame, InputEvent, Session};
    pub use crate::view::{CommitTicker, ViewCfg};
    pub use nalgebra::{Matrix2 as Mat2, Vector2 as Vec2};
}
