use async_channel::Sender;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::session::HostEvent;

pub const HELP: &str = "commands: p (or enter) start/pause, r reset step, R reset run, q back";

/// User commands accepted during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Toggle,
    ResetStep,
    ResetRun,
    Back,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        // A bare space counts as toggle, so only strip the line ending.
        let line = line.trim_end_matches(['\r', '\n']);
        match line {
            "" | " " | "p" | "P" => Some(Command::Toggle),
            "r" => Some(Command::ResetStep),
            "R" => Some(Command::ResetRun),
            "q" | "Q" | "b" => Some(Command::Back),
            _ => match line.trim() {
                "start" | "pause" | "toggle" => Some(Command::Toggle),
                "reset" => Some(Command::ResetStep),
                "restart" => Some(Command::ResetRun),
                "back" | "quit" => Some(Command::Back),
                _ => None,
            },
        }
    }
}

/// Forward stdin lines to the session as commands. Sends `InputClosed`
/// at end of input.
pub fn spawn_stdin_reader(sender: Sender<HostEvent>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => match Command::parse(&line) {
                    Some(command) => {
                        if sender.send(HostEvent::Command(command)).await.is_err() {
                            return;
                        }
                    }
                    None => eprintln!("unknown command {line:?}; {HELP}"),
                },
                Ok(None) => break,
                Err(e) => {
                    log::warn!("Failed to read stdin: {e}");
                    break;
                }
            }
        }
        let _ = sender.send(HostEvent::InputClosed).await;
    });
}
