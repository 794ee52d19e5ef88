// System sound cues: short synthesized beeps for clicks, window open/close and errors

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SoundCue {
    Click,
    WindowOpen,
    WindowClose,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Sawtooth,
}

/// One oscillator burst
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tone {
    pub frequency: f32,
    pub duration_ms: u64,
    /// Offset from the start of the cue
    pub delay_ms: u64,
    pub waveform: Waveform,
}

impl Tone {
    const fn new(frequency: f32, duration_ms: u64, delay_ms: u64, waveform: Waveform) -> Self {
        Self {
            frequency,
            duration_ms,
            delay_ms,
            waveform,
        }
    }
}

/// Peak gain every tone starts at
pub const TONE_GAIN: f32 = 0.1;

impl SoundCue {
    pub fn tones(&self) -> Vec<Tone> {
        use Waveform::*;
        match self {
            SoundCue::Click => vec![Tone::new(800.0, 50, 0, Square)],
            SoundCue::WindowOpen => vec![Tone::new(440.0, 100, 0, Sine), Tone::new(554.0, 100, 50, Sine)],
            SoundCue::WindowClose => vec![Tone::new(554.0, 100, 0, Sine), Tone::new(440.0, 100, 50, Sine)],
            SoundCue::Error => vec![Tone::new(200.0, 200, 0, Sawtooth)],
        }
    }

    /// Wall time from the first tone starting to the last one ending
    pub fn total_duration_ms(&self) -> u64 {
        self.tones()
            .iter()
            .map(|t| t.delay_ms + t.duration_ms)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(feature = "audio")]
pub use player::SoundPlayer;

#[cfg(feature = "audio")]
mod player {
    use std::time::Duration;

    use rodio::source::SineWave;
    use rodio::{OutputStream, OutputStreamHandle, Source};

    use super::SoundCue;
    use crate::state::events::{DeskEvent, EventBus, SubscriptionId};

    /// Plays cues on the default output device.
    ///
    /// Every tone is rendered as a sine burst; the waveform is a hint for
    /// renderers that can synthesize it.
    #[derive(Clone)]
    pub struct SoundPlayer {
        stream_handle: OutputStreamHandle,
    }

    impl SoundPlayer {
        /// Returns the player and the output stream.
        /// The caller must keep the `OutputStream` alive for as long as sound should play.
        pub fn new() -> Result<(Self, OutputStream), rodio::StreamError> {
            let (stream, stream_handle) = OutputStream::try_default()?;
            tracing::info!(event = "desk.sound.output_opened");
            Ok((Self { stream_handle }, stream))
        }

        pub fn play(&self, cue: SoundCue) {
            for tone in cue.tones() {
                let source = SineWave::new(tone.frequency)
                    .take_duration(Duration::from_millis(tone.duration_ms))
                    .amplify(super::TONE_GAIN)
                    .delay(Duration::from_millis(tone.delay_ms));
                if let Err(e) = self.stream_handle.play_raw(source) {
                    tracing::warn!(event = "desk.sound.play_failed", cue = ?cue, error = %e);
                }
            }
        }

        /// Play every cue published on the bus
        pub fn attach(self, bus: &mut EventBus) -> SubscriptionId {
            bus.subscribe(move |event| {
                if let DeskEvent::SoundCue { cue } = event {
                    self.play(*cue);
                }
            })
        }
    }
}
