use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{select, Sender};

use super::engine::TransformEngine;

/// Background thread that calls `TransformEngine::tick` at a fixed period.
///
/// `stop` (or drop) cancels and joins the thread; once it returns the ticker never
/// touches the committed transform again.
#[derive(Debug)]
pub struct CommitTicker {
    cancel: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl CommitTicker {
    pub fn spawn(engine: Arc<TransformEngine>, interval: Duration) -> std::io::Result<Self> {
        let (cancel_tx, cancel_rx) = crossbeam_channel::bounded::<()>(0);
        let handle = std::thread::Builder::new()
            .name("commit-ticker".into())
            .spawn(move || {
                let ticks = crossbeam_channel::tick(interval);
                tracing::debug!(interval_ms = interval.as_millis() as u64, "ticker started");
                loop {
                    select! {
                        recv(cancel_rx) -> _ => break,
                        recv(ticks) -> _ => {
                            engine.tick();
                        }
                    }
                }
                tracing::debug!("ticker stopped");
            })?;
        Ok(Self {
            cancel: Some(cancel_tx),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel and wait for the thread to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender disconnects `cancel_rx`, which wakes the select.
        drop(self.cancel.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("ticker thread panicked");
            }
        }
    }
}

impl Drop for CommitTicker {
    fn drop(&mut self) {
        self.shutdown();
    }
}
