use std::io::Write;
use std::time::Duration;

use async_channel::{Receiver, Sender};

use super::input::Command;
use super::render::render;
use super::ticker::Ticker;
use crate::audio_feedback::AlertSink;
use crate::engine::{RunState, StepTimer, TimerEvent};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Events delivered to the session loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// A scheduled tick, tagged with the ticker generation that armed it.
    Tick(u64),
    Command(Command),
    InputClosed,
}

/// What a finished session leaves behind.
#[derive(Debug, Clone)]
pub struct SessionReport {
    pub state: RunState,
    pub alerts: u32,
}

/// One walkthrough of a recipe, driven by ticks and user commands.
pub struct Session<W> {
    timer: StepTimer,
    ticker: Ticker,
    sender: Sender<HostEvent>,
    events: Receiver<HostEvent>,
    sink: Box<dyn AlertSink>,
    out: W,
    exit_on_finish: bool,
    alerts: u32,
}

impl<W: Write> Session<W> {
    pub fn new(timer: StepTimer, sink: Box<dyn AlertSink>, out: W) -> Self {
        let (sender, events) = async_channel::unbounded();
        Self {
            timer,
            ticker: Ticker::new(sender.clone(), TICK_PERIOD),
            sender,
            events,
            sink,
            out,
            exit_on_finish: false,
            alerts: 0,
        }
    }

    /// End the session as soon as the last step completes.
    pub fn exit_on_finish(mut self, exit: bool) -> Self {
        self.exit_on_finish = exit;
        self
    }

    /// Sender for commands into this session.
    pub fn sender(&self) -> Sender<HostEvent> {
        self.sender.clone()
    }

    pub async fn run(mut self) -> std::io::Result<SessionReport> {
        log::info!("Starting run of \"{}\"", self.timer.recipe().name);
        self.render()?;

        while let Ok(event) = self.events.recv().await {
            match event {
                HostEvent::Tick(generation) => {
                    if !self.ticker.is_current(generation) {
                        log::debug!("Discarding stale tick {generation}");
                        continue;
                    }
                    let finished = self.on_tick();
                    self.render()?;
                    if finished && self.exit_on_finish {
                        break;
                    }
                }
                HostEvent::Command(Command::Back) | HostEvent::InputClosed => break,
                HostEvent::Command(Command::Toggle) => {
                    self.timer.toggle();
                    self.after_command()?;
                }
                HostEvent::Command(Command::ResetStep) => {
                    self.timer.reset_current_step();
                    self.after_command()?;
                }
                HostEvent::Command(Command::ResetRun) => {
                    self.timer.reset_run();
                    self.after_command()?;
                }
            }
        }

        self.ticker.cancel();
        log::info!("Leaving run of \"{}\"", self.timer.recipe().name);
        Ok(SessionReport {
            state: self.timer.state().clone(),
            alerts: self.alerts,
        })
    }

    /// Apply one tick. Returns true when the run just finished.
    fn on_tick(&mut self) -> bool {
        let mut finished = false;
        for event in self.timer.tick() {
            match event {
                TimerEvent::AlertFired { step } => {
                    log::info!("Step {} is about to end", step + 1);
                    self.alerts += 1;
                    self.sink.play_alert_sound();
                }
                TimerEvent::StepCompleted { step } => log::info!("Step {} done", step + 1),
                TimerEvent::StepStarted { step, running } => {
                    log::debug!("Step {} current (running: {running})", step + 1);
                }
                TimerEvent::RunFinished => finished = true,
            }
        }
        if self.timer.state().is_running {
            self.ticker.arm();
        }
        finished
    }

    /// Drop any pending tick, schedule a fresh one if still running.
    fn after_command(&mut self) -> std::io::Result<()> {
        self.ticker.cancel();
        if self.timer.state().is_running {
            self.ticker.arm();
        }
        self.render()
    }

    fn render(&mut self) -> std::io::Result<()> {
        let text = render(self.timer.recipe(), self.timer.state());
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
