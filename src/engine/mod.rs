//! Step-sequencing timer engine.
//!
//! The engine owns a single `RunState` for one recipe walkthrough and
//! changes it only through `tick`, `toggle`, `reset_current_step` and
//! `reset_run`. It holds no clock: the host drives one tick per second.

pub mod alert;
mod state;
mod timer;

pub use state::{RunPhase, RunState};
pub use timer::{StepTimer, TimerEvent};
