//! Viewport: pan/zoom transform engine and its periodic commit ticker.
//!
//! Two transforms are kept:
//! - pending: updated synchronously on every pointer event (pan, scroll, resize);
//! - committed: copied from pending on each tick, together with its inverse.
//!
//! Consumers (rendering, picking, point placement) only ever see the committed pair.

mod cfg;
mod engine;
mod ticker;

pub use cfg::{CfgError, ViewCfg};
pub use engine::{TransformEngine, Viewport};
pub use ticker::CommitTicker;
