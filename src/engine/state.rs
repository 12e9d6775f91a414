use std::collections::BTreeSet;

use crate::recipe::Recipe;

/// Coarse state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Paused, or not yet started, with work left.
    Idle,
    Running,
    /// The last step has completed. Only `reset_run` leaves this phase.
    Terminal,
}

/// Snapshot of one walkthrough. Owned and mutated only by `StepTimer`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunState {
    pub current_step: usize,
    pub remaining_secs: u32,
    pub is_running: bool,
    /// Steps whose countdown reached zero at least once.
    pub completed: BTreeSet<usize>,
    pub alert_fired: bool,
    step_count: usize,
}

impl RunState {
    /// Step 0, full first-step duration, paused. Callers guarantee
    /// `recipe.steps` is non-empty.
    pub(crate) fn initial(recipe: &Recipe) -> Self {
        Self {
            current_step: 0,
            remaining_secs: recipe.steps.first().map_or(0, |s| s.duration_secs),
            is_running: false,
            completed: BTreeSet::new(),
            alert_fired: false,
            step_count: recipe.steps.len(),
        }
    }

    pub fn step_count(&self) -> usize {
        self.step_count
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 >= self.step_count
    }

    pub fn is_terminal(&self) -> bool {
        self.is_last_step() && self.completed.contains(&self.current_step)
    }

    pub fn is_completed(&self, index: usize) -> bool {
        self.completed.contains(&index)
    }

    pub fn phase(&self) -> RunPhase {
        if self.is_terminal() {
            RunPhase::Terminal
        } else if self.is_running {
            RunPhase::Running
        } else {
            RunPhase::Idle
        }
    }
}
