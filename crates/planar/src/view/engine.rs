use std::sync::{Mutex, MutexGuard, PoisonError};

use nalgebra::Vector2;
use serde::Serialize;

use super::cfg::ViewCfg;
use crate::events::{EventBus, SceneEvent};
use crate::geom::Affine2;

/// Snapshot of the committed view: size plus both directions of the map.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// World → screen.
    pub to_screen: Affine2,
    /// Screen → world.
    pub to_world: Affine2,
}

impl Viewport {
    /// `screen` lies in `[0, width] × [0, height]`.
    #[inline]
    pub fn contains(&self, screen: Vector2<f64>) -> bool {
        (0.0..=self.width).contains(&screen.x) && (0.0..=self.height).contains(&screen.y)
    }
}

#[derive(Clone, Copy, Debug)]
struct State {
    pending: Affine2,
    committed: Affine2,
    committed_inv: Affine2,
    width: f64,
    height: f64,
}

/// Pending/committed world → screen transform driven by pointer and viewport events.
///
/// All methods take `&self`; one mutex serializes writers so the engine can be
/// shared with a `CommitTicker`.
#[derive(Debug)]
pub struct TransformEngine {
    cfg: ViewCfg,
    state: Mutex<State>,
    bus: EventBus,
}

impl TransformEngine {
    pub fn new(cfg: ViewCfg, bus: EventBus) -> Self {
        Self {
            cfg,
            state: Mutex::new(State {
                pending: Affine2::identity(),
                committed: Affine2::identity(),
                committed_inv: Affine2::identity(),
                width: 0.0,
                height: 0.0,
            }),
            bus,
        }
    }

    pub fn cfg(&self) -> &ViewCfg {
        &self.cfg
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reset pending to `scale(ppu, ±ppu)` then `translate(w/2, h/2)` if the size changed.
    ///
    /// Any unfinished pan/zoom is discarded. Returns whether the view was reset; a
    /// configuration that yields a degenerate map leaves everything unchanged.
    pub fn on_resize(&self, width: f64, height: f64) -> bool {
        {
            let mut s = self.lock();
            if s.width == width && s.height == height {
                return false;
            }
            let ppu = self.cfg.pixels_per_unit;
            let sy = if self.cfg.flip_y { -ppu } else { ppu };
            let candidate = Affine2::scaling(ppu, sy).translate(width / 2.0, height / 2.0);
            if !candidate.is_well_conditioned() {
                tracing::warn!(width, height, ppu, "ignoring resize to a degenerate view");
                return false;
            }
            s.pending = candidate;
            s.width = width;
            s.height = height;
        }
        tracing::debug!(width, height, "viewport resized");
        self.bus.emit(SceneEvent::Resized { width, height });
        true
    }

    /// Screen-space pan: `pending = pending.translate(dx, dy)`.
    ///
    /// Returns whether the pan was applied; one that would leave the map
    /// non-finite is dropped.
    pub fn on_pan_delta(&self, dx: f64, dy: f64) -> bool {
        let mut s = self.lock();
        let candidate = s.pending.translate(dx, dy);
        if !candidate.is_well_conditioned() {
            tracing::warn!(dx, dy, "ignoring degenerate pan");
            return false;
        }
        s.pending = candidate;
        true
    }

    /// Zoom by `1 + delta_y * scroll_factor`, centred on the screen image of the plane origin.
    ///
    /// Returns whether the zoom was applied. A step whose result would underflow to a
    /// singular map or overflow to a non-finite one is dropped.
    pub fn on_scroll(&self, delta_y: f64, scroll_factor: f64) -> bool {
        let k = 1.0 + delta_y * scroll_factor;
        if k == 0.0 || !k.is_finite() {
            tracing::warn!(delta_y, scroll_factor, "ignoring degenerate zoom");
            return false;
        }
        let mut s = self.lock();
        let candidate = s.pending.scale(k, k);
        if !candidate.is_well_conditioned() {
            tracing::warn!(delta_y, scroll_factor, "ignoring degenerate zoom");
            return false;
        }
        s.pending = candidate;
        true
    }

    /// Copy pending into committed and recompute the inverse.
    ///
    /// Returns whether the committed transform changed.
    ///
    /// # Panics
    /// If pending is singular. Every update to pending is checked with
    /// `Affine2::is_well_conditioned`, so this is an internal invariant violation.
    pub fn tick(&self) -> bool {
        let changed = {
            let mut s = self.lock();
            if s.committed == s.pending {
                false
            } else {
                let inv = match s.pending.inverse() {
                    Some(inv) => inv,
                    None => panic!("pending transform is singular: {:?}", s.pending),
                };
                s.committed = s.pending;
                s.committed_inv = inv;
                true
            }
        };
        if changed {
            tracing::trace!("transform committed");
            self.bus.emit(SceneEvent::TransformCommitted);
        }
        changed
    }

    pub fn pending(&self) -> Affine2 {
        self.lock().pending
    }

    pub fn committed(&self) -> Affine2 {
        self.lock().committed
    }

    pub fn committed_inverse(&self) -> Affine2 {
        self.lock().committed_inv
    }

    /// Last known viewport size.
    pub fn size(&self) -> (f64, f64) {
        let s = self.lock();
        (s.width, s.height)
    }

    pub fn viewport(&self) -> Viewport {
        let s = self.lock();
        Viewport {
            width: s.width,
            height: s.height,
            to_screen: s.committed,
            to_world: s.committed_inv,
        }
    }

    /// World → screen through the committed transform.
    pub fn to_screen(&self, world: Vector2<f64>) -> Vector2<f64> {
        self.lock().committed.apply(world)
    }

    /// Screen → world through the committed inverse.
    pub fn to_world(&self, screen: Vector2<f64>) -> Vector2<f64> {
        self.lock().committed_inv.apply(screen)
    }
}
