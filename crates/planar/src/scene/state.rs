use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use nalgebra::Vector2;
use serde::Serialize;

use super::store::{PointId, PointStore, SelectionSet};
use crate::algorithms::AlgorithmResult;
use crate::events::{EventBus, SceneEvent};
use crate::view::Viewport;

#[derive(Debug, Default)]
struct State {
    points: PointStore,
    selection: SelectionSet,
    results: BTreeMap<String, AlgorithmResult>,
    selection_mode: bool,
}

/// Consistent copy of the scene taken under a single lock.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SceneSnapshot {
    pub points: Vec<(PointId, Vector2<f64>)>,
    pub selection: Vec<PointId>,
    pub results: BTreeMap<String, AlgorithmResult>,
    pub selection_mode: bool,
}

/// Points, selection and latest result per algorithm name, serialized by one mutex.
///
/// Compound operations (`reset`, `toggle_nearest`) happen under a single lock
/// acquisition; events are emitted after the lock is released.
#[derive(Debug, Default)]
pub struct Scene {
    state: Mutex<State>,
    bus: EventBus,
}

impl Scene {
    pub fn new(bus: EventBus) -> Self {
        Self {
            state: Mutex::default(),
            bus,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Place a point clicked at `screen`; `None` if outside the viewport.
    pub fn add_point(&self, screen: Vector2<f64>, viewport: &Viewport) -> Option<PointId> {
        let added = {
            let mut s = self.lock();
            s.points
                .add_point(screen, viewport)
                .and_then(|id| s.points.get(id).map(|pos| (id, pos)))
        };
        match added {
            Some((id, pos)) => {
                tracing::trace!(%id, x = pos.x, y = pos.y, "point added");
                self.bus.emit(SceneEvent::PointAdded { id, pos });
                Some(id)
            }
            None => {
                tracing::trace!(x = screen.x, y = screen.y, "click outside viewport");
                None
            }
        }
    }

    /// Store a plane point directly.
    pub fn insert_world(&self, world: Vector2<f64>) -> PointId {
        let id = self.lock().points.insert(world);
        self.bus.emit(SceneEvent::PointAdded { id, pos: world });
        id
    }

    pub fn pick_nearest(&self, world: Vector2<f64>) -> Option<PointId> {
        self.lock().points.pick_nearest(world)
    }

    /// Toggle `id` in the selection. Unknown ids are ignored (`None`).
    pub fn toggle_select(&self, id: PointId) -> Option<bool> {
        let selected = {
            let mut s = self.lock();
            if !s.points.contains(id) {
                return None;
            }
            s.selection.toggle(id)
        };
        self.bus.emit(SceneEvent::SelectionChanged);
        Some(selected)
    }

    /// Pick the point nearest to `world` and toggle it; returns the id and its new state.
    pub fn toggle_nearest(&self, world: Vector2<f64>) -> Option<(PointId, bool)> {
        let toggled = {
            let mut s = self.lock();
            let id = s.points.pick_nearest(world)?;
            (id, s.selection.toggle(id))
        };
        self.bus.emit(SceneEvent::SelectionChanged);
        Some(toggled)
    }

    pub fn select_all(&self) {
        {
            let mut s = self.lock();
            let State {
                points, selection, ..
            } = &mut *s;
            selection.clear();
            for id in points.ids() {
                selection.insert(id);
            }
        }
        self.bus.emit(SceneEvent::SelectionChanged);
    }

    pub fn clear_selection(&self) {
        self.lock().selection.clear();
        self.bus.emit(SceneEvent::SelectionChanged);
    }

    pub fn selection_mode(&self) -> bool {
        self.lock().selection_mode
    }

    /// Flip selection mode; leaving it clears the selection. Returns the new mode.
    pub fn toggle_selection_mode(&self) -> bool {
        let enabled = {
            let mut s = self.lock();
            s.selection_mode = !s.selection_mode;
            if !s.selection_mode {
                s.selection.clear();
            }
            s.selection_mode
        };
        self.bus.emit(SceneEvent::SelectionModeChanged { enabled });
        if !enabled {
            self.bus.emit(SceneEvent::SelectionChanged);
        }
        enabled
    }

    /// Selected points in ascending id order.
    pub fn selected_points(&self) -> Vec<Vector2<f64>> {
        let s = self.lock();
        s.selection
            .iter()
            .filter_map(|id| s.points.get(id))
            .collect()
    }

    pub fn store_result(&self, name: &str, result: AlgorithmResult) {
        self.lock().results.insert(name.to_string(), result);
        self.bus.emit(SceneEvent::ResultStored {
            name: name.to_string(),
        });
    }

    pub fn result(&self, name: &str) -> Option<AlgorithmResult> {
        self.lock().results.get(name).cloned()
    }

    pub fn clear_results(&self) {
        self.lock().results.clear();
        self.bus.emit(SceneEvent::ResultsCleared);
    }

    /// Empty points, selection and results together; ids restart at zero.
    pub fn reset(&self) {
        {
            let mut s = self.lock();
            s.points.clear();
            s.selection.clear();
            s.results.clear();
        }
        tracing::debug!("scene reset");
        self.bus.emit(SceneEvent::Reset);
    }

    pub fn len(&self) -> usize {
        self.lock().points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().points.is_empty()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let s = self.lock();
        SceneSnapshot {
            points: s.points.iter().collect(),
            selection: s.selection.iter().collect(),
            results: s.results.clone(),
            selection_mode: s.selection_mode,
        }
    }
}
