//! Interactive view core: one engine, one scene, a shared registry and an event bus.
//!
//! Pointer protocol (screen space, origin top-left, y down)
//! - `press` starts a gesture; `move_delta` pans while the primary button is held.
//! - `release` on the primary button without movement is a click: in selection mode it
//!   toggles the nearest point, otherwise it places a new point.
//! - `scroll` zooms; `resize` resets the view for the new size.
//!
//! The committed transform only changes on `tick`, either called directly or through
//! the `CommitTicker` returned by `start_ticker`.

mod input;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crossbeam_channel::Receiver;
use nalgebra::Vector2;
use serde::Serialize;

use crate::algorithms::{AlgoError, AlgorithmRegistry, AlgorithmResult, GeometryAlgorithm};
use crate::events::{EventBus, SceneEvent};
use crate::geom::Affine2;
use crate::scene::{PointId, Scene};
use crate::view::{CommitTicker, TransformEngine, ViewCfg, Viewport};

pub use input::InputEvent;

/// What a pointer release did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Click {
    /// Outside the viewport, secondary button, or the end of a drag.
    Ignored,
    Added { id: PointId },
    Toggled { id: PointId, selected: bool },
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub to_screen: Affine2,
    pub to_world: Affine2,
    pub points: Vec<(PointId, Vector2<f64>)>,
    pub selection: Vec<PointId>,
    pub results: BTreeMap<String, AlgorithmResult>,
    pub selection_mode: bool,
}

#[derive(Debug)]
pub struct Session {
    cfg: ViewCfg,
    engine: Arc<TransformEngine>,
    scene: Scene,
    registry: Arc<AlgorithmRegistry>,
    bus: EventBus,
    moved: AtomicBool,
}

impl Session {
    pub fn new(cfg: ViewCfg, registry: Arc<AlgorithmRegistry>) -> Self {
        let bus = EventBus::new();
        Self {
            cfg,
            engine: Arc::new(TransformEngine::new(cfg, bus.clone())),
            scene: Scene::new(bus.clone()),
            registry,
            bus,
            moved: AtomicBool::new(false),
        }
    }

    /// Default config and the default algorithm set.
    pub fn with_defaults() -> Self {
        Self::new(
            ViewCfg::default(),
            Arc::new(AlgorithmRegistry::with_defaults()),
        )
    }

    pub fn cfg(&self) -> &ViewCfg {
        &self.cfg
    }

    pub fn engine(&self) -> &Arc<TransformEngine> {
        &self.engine
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn registry(&self) -> &AlgorithmRegistry {
        &self.registry
    }

    pub fn subscribe(&self) -> Receiver<SceneEvent> {
        self.bus.subscribe()
    }

    /// Spawn the periodic commit at `cfg.tick_interval_ms`. Stop or drop the
    /// returned handle when the view goes away.
    pub fn start_ticker(&self) -> std::io::Result<CommitTicker> {
        CommitTicker::spawn(Arc::clone(&self.engine), self.cfg.tick_interval())
    }

    pub fn tick(&self) -> bool {
        self.engine.tick()
    }

    pub fn viewport(&self) -> Viewport {
        self.engine.viewport()
    }

    pub fn handle(&self, event: InputEvent) -> Click {
        match event {
            InputEvent::Press => self.press(),
            InputEvent::MoveDelta { dx, dy } => self.move_delta(dx, dy),
            InputEvent::Release { x, y, primary } => return self.release(Vector2::new(x, y), primary),
            InputEvent::Scroll { delta_y, factor } => {
                self.scroll_with(delta_y, factor.unwrap_or(self.cfg.scroll_factor))
            }
            InputEvent::Resize { width, height } => {
                self.resize(width, height);
            }
        }
        Click::Ignored
    }

    pub fn press(&self) {
        self.moved.store(false, Ordering::Relaxed);
    }

    /// Pan by a pointer delta; only meaningful while the primary button is held.
    pub fn move_delta(&self, dx: f64, dy: f64) {
        self.moved.store(true, Ordering::Relaxed);
        self.engine.on_pan_delta(dx, dy);
    }

    pub fn release(&self, screen: Vector2<f64>, primary: bool) -> Click {
        let viewport = self.engine.viewport();
        if !viewport.contains(screen) || !primary || self.moved.load(Ordering::Relaxed) {
            return Click::Ignored;
        }
        if self.scene.selection_mode() {
            let world = viewport.to_world.apply(screen);
            match self.scene.toggle_nearest(world) {
                Some((id, selected)) => Click::Toggled { id, selected },
                None => Click::Ignored,
            }
        } else {
            match self.scene.add_point(screen, &viewport) {
                Some(id) => Click::Added { id },
                None => Click::Ignored,
            }
        }
    }

    /// Zoom with the configured scroll factor.
    pub fn scroll(&self, delta_y: f64) {
        self.scroll_with(delta_y, self.cfg.scroll_factor);
    }

    pub fn scroll_with(&self, delta_y: f64, scroll_factor: f64) {
        self.engine.on_scroll(delta_y, scroll_factor);
    }

    pub fn resize(&self, width: f64, height: f64) -> bool {
        self.engine.on_resize(width, height)
    }

    pub fn toggle_selection_mode(&self) -> bool {
        self.scene.toggle_selection_mode()
    }

    pub fn select_all(&self) {
        self.scene.select_all();
    }

    pub fn clear_selection(&self) {
        self.scene.clear_selection();
    }

    pub fn clear_results(&self) {
        self.scene.clear_results();
    }

    /// Clear points, selection and results together.
    pub fn reset(&self) {
        self.scene.reset();
    }

    /// Whether the current selection is large enough for `alg`.
    pub fn can_execute(&self, alg: &dyn GeometryAlgorithm) -> bool {
        self.scene.snapshot().selection.len() >= alg.minimum_points()
    }

    /// Run the first algorithm registered as `name` on the selected points.
    ///
    /// `Ok(None)` if no such algorithm exists or the selection is below its minimum;
    /// the result is stored under the algorithm's name otherwise.
    pub fn execute(&self, name: &str) -> Result<Option<AlgorithmResult>, AlgoError> {
        let Some(alg) = self.registry.lookup(name) else {
            tracing::warn!(name, "unknown algorithm");
            return Ok(None);
        };
        let points = self.scene.selected_points();
        if points.len() < alg.minimum_points() {
            tracing::debug!(
                name,
                selected = points.len(),
                required = alg.minimum_points(),
                "selection too small"
            );
            return Ok(None);
        }
        self.run(alg.as_ref(), &points).map(Some)
    }

    /// Run `alg` on the selected points without the minimum check; a short selection
    /// surfaces as `InvalidArgument`.
    pub fn execute_with(&self, alg: &dyn GeometryAlgorithm) -> Result<AlgorithmResult, AlgoError> {
        let points = self.scene.selected_points();
        self.run(alg, &points)
    }

    fn run(
        &self,
        alg: &dyn GeometryAlgorithm,
        points: &[Vector2<f64>],
    ) -> Result<AlgorithmResult, AlgoError> {
        let result = self.registry.execute(alg, points)?;
        self.scene.store_result(alg.name(), result.clone());
        Ok(result)
    }

    pub fn frame(&self) -> Frame {
        let vp = self.engine.viewport();
        let snap = self.scene.snapshot();
        Frame {
            width: vp.width,
            height: vp.height,
            to_screen: vp.to_screen,
            to_world: vp.to_world,
            points: snap.points,
            selection: snap.selection,
            results: snap.results,
            selection_mode: snap.selection_mode,
        }
    }
}
