use super::alert::should_fire;
use super::state::RunState;
use crate::error::EngineError;
use crate::recipe::{Recipe, Step};

/// Side effects of a tick, in the order they happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// The host should play the alert sound.
    AlertFired { step: usize },
    StepCompleted { step: usize },
    /// `step` became current; `running` is true when it was auto-advanced.
    StepStarted { step: usize, running: bool },
    RunFinished,
}

/// Countdown state machine bound to one recipe.
#[derive(Debug, Clone)]
pub struct StepTimer {
    recipe: Recipe,
    state: RunState,
}

impl StepTimer {
    /// Bind to `recipe` and build its initial run state.
    pub fn start(recipe: Recipe) -> Result<Self, EngineError> {
        if recipe.steps.is_empty() {
            return Err(EngineError::InvalidRecipe(recipe.id));
        }
        let state = RunState::initial(&recipe);
        log::debug!("Run started for recipe {} ({} steps)", recipe.id, recipe.steps.len());
        Ok(Self { recipe, state })
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn current_step(&self) -> &Step {
        &self.recipe.steps[self.state.current_step]
    }

    /// Advance time by one second. At most one step transition happens
    /// per call; a paused or finished run is left untouched.
    pub fn tick(&mut self) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if !self.state.is_running || self.state.is_terminal() {
            return events;
        }

        let index = self.state.current_step;
        if self.state.remaining_secs > 0 {
            self.state.remaining_secs -= 1;
            if should_fire(self.current_step(), self.state.remaining_secs, self.state.alert_fired) {
                self.state.alert_fired = true;
                log::debug!("Alert for step {index}");
                events.push(TimerEvent::AlertFired { step: index });
            }
        }

        if self.state.remaining_secs == 0 {
            self.complete_current(&mut events);
        }
        events
    }

    fn complete_current(&mut self, events: &mut Vec<TimerEvent>) {
        let index = self.state.current_step;
        self.state.is_running = false;
        self.state.completed.insert(index);
        events.push(TimerEvent::StepCompleted { step: index });

        if self.state.is_last_step() {
            log::debug!("Run finished for recipe {}", self.recipe.id);
            events.push(TimerEvent::RunFinished);
            return;
        }

        let auto_advance = self.recipe.steps[index].auto_advance;
        let next = index + 1;
        self.state.current_step = next;
        self.state.remaining_secs = self.recipe.steps[next].duration_secs;
        self.state.alert_fired = false;
        self.state.is_running = auto_advance;
        log::debug!("Advanced to step {next} (running: {auto_advance})");
        events.push(TimerEvent::StepStarted { step: next, running: auto_advance });
    }

    /// Pause or resume. Ignored once the run is terminal.
    pub fn toggle(&mut self) -> &RunState {
        if !self.state.is_terminal() {
            self.state.is_running = !self.state.is_running;
        }
        &self.state
    }

    /// Rewind the current step to its full duration and pause. Does not
    /// touch completed steps. Ignored once the run is terminal.
    pub fn reset_current_step(&mut self) -> &RunState {
        if !self.state.is_terminal() {
            self.state.is_running = false;
            self.state.remaining_secs = self.current_step().duration_secs;
            self.state.alert_fired = false;
        }
        &self.state
    }

    /// Back to step 0 with nothing completed.
    pub fn reset_run(&mut self) -> &RunState {
        self.state = RunState::initial(&self.recipe);
        &self.state
    }
}

#[cfg(test)]
#[path = "timer_tests.rs"]
mod tests;
