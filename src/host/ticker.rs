use std::time::Duration;

use async_channel::Sender;
use tokio::task::JoinHandle;

use super::session::HostEvent;

/// Scheduling collaborator. Keeps at most one tick in flight; every
/// cancel bumps the generation so a tick already queued is recognisably
/// stale.
pub struct Ticker {
    sender: Sender<HostEvent>,
    period: Duration,
    pending: Option<JoinHandle<()>>,
    generation: u64,
}

impl Ticker {
    pub fn new(sender: Sender<HostEvent>, period: Duration) -> Self {
        Self {
            sender,
            period,
            pending: None,
            generation: 0,
        }
    }

    /// Schedule the next tick one period from now, replacing any pending one.
    pub fn arm(&mut self) {
        self.cancel();
        let generation = self.generation;
        let sender = self.sender.clone();
        let period = self.period;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(period).await;
            let _ = sender.send(HostEvent::Tick(generation)).await;
        }));
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
