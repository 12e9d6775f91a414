//! Terminal host for a recipe run.
//!
//! The session owns the `StepTimer`, schedules exactly one pending tick
//! at a time, turns alert events into sounds, and prints a snapshot
//! after every change. Commands arrive as lines on stdin.

mod input;
mod render;
mod session;
mod ticker;

pub use input::{spawn_stdin_reader, HELP};
pub use render::{render, render_list};
pub use session::Session;
