use serde::{Deserialize, Serialize};

/// Pointer and viewport input in screen space (origin top-left, y down).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum InputEvent {
    Press,
    MoveDelta {
        dx: f64,
        dy: f64,
    },
    Release {
        x: f64,
        y: f64,
        #[serde(default = "primary_default")]
        primary: bool,
    },
    Scroll {
        delta_y: f64,
        /// Overrides the configured scroll factor.
        #[serde(default)]
        factor: Option<f64>,
    },
    Resize {
        width: f64,
        height: f64,
    },
}

fn primary_default() -> bool {
    true
}
