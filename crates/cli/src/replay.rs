//! Scripted interaction: drive a `Session` from a JSON list of steps.
//!
//! Each step is either a pointer/viewport input (`{"op": "resize", ...}`,
//! `{"op": "press"}`, `{"op": "move_delta", ...}`, `{"op": "release", ...}`,
//! `{"op": "scroll", ...}`) or a command (`tick`, `run`, `selection_mode`,
//! `select_all`, `clear_selection`, `clear_results`, `reset`).

use anyhow::{Context, Result};
use planar::session::{Click, Frame, InputEvent, Session};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Step {
    Input(InputEvent),
    Command(Command),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Command {
    Tick,
    Run { algo: String },
    SelectionMode,
    SelectAll,
    ClearSelection,
    ClearResults,
    Reset,
}

/// Per-step outcome, reported alongside the final frame.
#[derive(Debug, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Outcome {
    Click(Click),
    Committed { changed: bool },
    Ran { algo: String, executed: bool },
    SelectionMode { enabled: bool },
    Done,
}

#[derive(Debug, Serialize)]
pub struct Transcript {
    pub steps: Vec<Outcome>,
    pub frame: Frame,
}

pub fn load_script(path: &Path) -> Result<Vec<Step>> {
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&raw).with_context(|| format!("parsing {}", path.display()))
}

pub fn replay(session: &Session, steps: &[Step]) -> Result<Transcript> {
    let mut out = Vec::with_capacity(steps.len());
    for (k, step) in steps.iter().enumerate() {
        let outcome = match step {
            Step::Input(InputEvent::Release { x, y, primary }) => {
                Outcome::Click(session.release(planar::Vec2::new(*x, *y), *primary))
            }
            Step::Input(ev) => {
                session.handle(*ev);
                Outcome::Done
            }
            Step::Command(Command::Tick) => Outcome::Committed {
                changed: session.tick(),
            },
            Step::Command(Command::Run { algo }) => {
                let executed = session
                    .execute(algo)
                    .with_context(|| format!("step {k}: running {algo}"))?
                    .is_some();
                Outcome::Ran {
                    algo: algo.clone(),
                    executed,
                }
            }
            Step::Command(Command::SelectionMode) => Outcome::SelectionMode {
                enabled: session.toggle_selection_mode(),
            },
            Step::Command(Command::SelectAll) => {
                session.select_all();
                Outcome::Done
            }
            Step::Command(Command::ClearSelection) => {
                session.clear_selection();
                Outcome::Done
            }
            Step::Command(Command::ClearResults) => {
                session.clear_results();
                Outcome::Done
            }
            Step::Command(Command::Reset) => {
                session.reset();
                Outcome::Done
            }
        };
        tracing::debug!(step = k, ?outcome, "replayed");
        out.push(outcome);
    }
    Ok(Transcript {
        steps: out,
        frame: session.frame(),
    })
}
