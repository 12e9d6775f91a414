use std::io::Write;

use crate::config::{AlertConfig, AlertSound};

/// Audio collaborator: turns an alert event into something audible.
/// Failures are the sink's problem and never reach the run.
pub trait AlertSink: Send {
    fn play_alert_sound(&self);
}

/// Rings the terminal bell.
pub struct TerminalBell;

impl AlertSink for TerminalBell {
    fn play_alert_sound(&self) {
        let mut stderr = std::io::stderr();
        if let Err(e) = stderr.write_all(b"\x07").and_then(|()| stderr.flush()) {
            log::warn!("Bell failed: {e}");
        }
    }
}

pub struct Silent;

impl AlertSink for Silent {
    fn play_alert_sound(&self) {}
}

/// Pick the sink described by `config`.
pub fn sink_for(config: &AlertConfig) -> Box<dyn AlertSink> {
    match config.sound {
        AlertSound::Bell => Box::new(TerminalBell),
        AlertSound::Silent => Box::new(Silent),
        #[cfg(feature = "sound")]
        AlertSound::Tone => Box::new(tone::Tone::new(config.tone_hz, config.tone_ms)),
        #[cfg(not(feature = "sound"))]
        AlertSound::Tone => {
            log::warn!("Built without the `sound` feature, using the terminal bell");
            Box::new(TerminalBell)
        }
    }
}

#[cfg(feature = "sound")]
mod tone {
    use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
    use std::f32::consts::PI;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use super::AlertSink;

    /// A short sine tone with a fade-out, played on its own thread.
    pub struct Tone {
        freq: f32,
        duration: Duration,
    }

    impl Tone {
        pub fn new(freq: f32, millis: u64) -> Self {
            Self {
                freq,
                duration: Duration::from_millis(millis),
            }
        }
    }

    impl AlertSink for Tone {
        fn play_alert_sound(&self) {
            let (freq, duration) = (self.freq, self.duration);
            std::thread::spawn(move || {
                if let Err(e) = play_blocking(freq, duration) {
                    log::warn!("Alert tone failed: {e}");
                }
            });
        }
    }

    fn play_blocking(
        freq: f32,
        duration: Duration,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("No output device found")?;
        let config = device.default_output_config()?;
        let sample_rate = config.sample_rate() as f32;
        let channels = config.channels() as usize;

        let total = (sample_rate * duration.as_secs_f32()) as usize;
        let samples: Arc<Vec<f32>> = Arc::new(
            (0..total)
                .map(|i| {
                    let t = i as f32 / sample_rate;
                    let envelope = 1.0 - i as f32 / total as f32;
                    (2.0 * PI * freq * t).sin() * envelope * 0.3
                })
                .collect(),
        );

        let cursor = Arc::new(AtomicUsize::new(0));
        let stream = device.build_output_stream(
            &config.into(),
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let mut idx = cursor.load(Ordering::Relaxed);
                for frame in data.chunks_mut(channels) {
                    let value = samples.get(idx).copied().unwrap_or(0.0);
                    frame.fill(value);
                    idx += 1;
                }
                cursor.store(idx, Ordering::Relaxed);
            },
            |err| log::error!("Audio output error: {err}"),
            None,
        )?;

        stream.play()?;
        std::thread::sleep(duration + Duration::from_millis(50));
        drop(stream);
        Ok(())
    }
}
