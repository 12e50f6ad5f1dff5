use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Viewport configuration.
///
/// Missing fields fall back to the defaults when deserialized.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewCfg {
    /// Screen pixels per plane unit after a resize.
    pub pixels_per_unit: f64,
    /// Flip y so that plane-up is screen-up.
    pub flip_y: bool,
    /// Period of the pending → committed copy.
    pub tick_interval_ms: u64,
    /// Multiplier applied to raw scroll deltas before zooming.
    pub scroll_factor: f64,
}

impl Default for ViewCfg {
    fn default() -> Self {
        Self {
            pixels_per_unit: 45.0,
            flip_y: true,
            tick_interval_ms: 30,
            scroll_factor: 0.1,
        }
    }
}

/// A `ViewCfg` field outside its valid range.
#[derive(Clone, Debug, PartialEq)]
pub struct CfgError {
    pub field: &'static str,
    pub value: f64,
}

impl fmt::Display for CfgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid view config: {} = {}", self.field, self.value)
    }
}

impl std::error::Error for CfgError {}

impl ViewCfg {
    /// `pixels_per_unit` must be a positive normal float and `scroll_factor` finite.
    pub fn validate(&self) -> Result<(), CfgError> {
        if !(self.pixels_per_unit.is_normal() && self.pixels_per_unit > 0.0) {
            return Err(CfgError {
                field: "pixels_per_unit",
                value: self.pixels_per_unit,
            });
        }
        if !self.scroll_factor.is_finite() {
            return Err(CfgError {
                field: "scroll_factor",
                value: self.scroll_factor,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }
}
