//! Tone output
//!
//! The simulation only ever asks for "play this pitch now". Each tone is
//! fire-and-forget: the sink owns its own device lifetime and mixing.

/// Something that can play a short tone
pub trait ToneSink {
    /// Start a tone; returns immediately, the tone stops itself
    fn play_tone(&self, frequency_hz: f32, gain: f32, duration_secs: f32);
}

/// Logs tones instead of playing them (headless runs)
#[derive(Debug, Default)]
pub struct LogSink {
    played: std::cell::Cell<u64>,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tones requested so far
    pub fn played(&self) -> u64 {
        self.played.get()
    }
}

impl ToneSink for LogSink {
    fn play_tone(&self, frequency_hz: f32, gain: f32, duration_secs: f32) {
        self.played.set(self.played.get() + 1);
        log::debug!("tone {frequency_hz:.2} Hz gain {gain:.2} for {duration_secs}s");
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::WebAudioSink;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::ToneSink;

    /// Web Audio sink: one sine oscillator per tone
    pub struct WebAudioSink {
        ctx: Option<AudioContext>,
    }

    impl Default for WebAudioSink {
        fn default() -> Self {
            Self::new()
        }
    }

    impl WebAudioSink {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self { ctx }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Create an oscillator with its own gain node
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            gain: f32,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain_node = ctx.create_gain().ok()?;

            osc.set_type(OscillatorType::Sine);
            osc.frequency().set_value(freq);
            gain_node.gain().set_value(gain);
            osc.connect_with_audio_node(&gain_node).ok()?;
            gain_node.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain_node))
        }
    }

    impl ToneSink for WebAudioSink {
        fn play_tone(&self, frequency_hz: f32, gain: f32, duration_secs: f32) {
            if gain <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let Some((osc, _gain)) = Self::create_osc(ctx, frequency_hz, gain) else {
                log::warn!("Could not build oscillator for {frequency_hz} Hz");
                return;
            };
            let t = ctx.current_time();
            osc.start().ok();
            osc.stop_with_when(t + duration_secs as f64).ok();
        }
    }
}
