//! Explicit change notification for views.
//!
//! Stores and the transform engine emit `SceneEvent`s on an `EventBus`; a view
//! subscribes and redraws from a fresh snapshot instead of relying on implicit
//! reactivity.

use std::sync::{Arc, Mutex, PoisonError};

use crossbeam_channel::{Receiver, Sender};
use nalgebra::Vector2;
use serde::Serialize;

use crate::scene::PointId;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SceneEvent {
    Resized { width: f64, height: f64 },
    /// The committed transform changed on a tick.
    TransformCommitted,
    PointAdded { id: PointId, pos: Vector2<f64> },
    SelectionChanged,
    SelectionModeChanged { enabled: bool },
    ResultStored { name: String },
    ResultsCleared,
    /// Points, selection and results were cleared together.
    Reset,
}

/// Fan-out of events to any number of subscribers. Cheap to clone; clones share subscribers.
#[derive(Clone, Debug, Default)]
pub struct EventBus {
    subscribers: Arc<Mutex<Vec<Sender<SceneEvent>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// New unbounded subscription. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> Receiver<SceneEvent> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
        rx
    }

    /// Deliver to all live subscribers; disconnected ones are pruned.
    pub fn emit(&self, event: SceneEvent) {
        let mut subs = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subs.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fan_out_and_prune() {
        let bus = EventBus::new();
        let a = bus.subscribe();
        let b = bus.subscribe();
        bus.emit(SceneEvent::Reset);
        assert_eq!(a.try_recv(), Ok(SceneEvent::Reset));
        assert_eq!(b.try_recv(), Ok(SceneEvent::Reset));

        drop(b);
        bus.emit(SceneEvent::ResultsCleared);
        assert_eq!(bus.subscriber_count(), 1);
        assert_eq!(a.try_recv(), Ok(SceneEvent::ResultsCleared));
        assert!(a.try_recv().is_err());
    }
}
