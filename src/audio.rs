//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects and a looping background drone, no
//! external files needed.

use web_sys::{AudioContext, AudioNode, GainNode, OscillatorNode, OscillatorType};

use crate::platform::{AudioSink, MusicAction, SoundEffect, music_action};
use crate::settings::Settings;

/// Two detuned oscillators feeding one gain node
struct Drone {
    oscillators: [OscillatorNode; 2],
    gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    sfx_gain: f32,
    music_gain: f32,
    muted: bool,
    drone: Option<Drone>,
    /// The last start attempt failed
    drone_failed: bool,
}

impl AudioManager {
    pub fn new(settings: &Settings) -> Self {
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            sfx_gain: settings.sfx_gain(),
            music_gain: settings.music_gain(),
            muted: false,
            drone: None,
            drone_failed: false,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.update_drone_level();
    }

    fn effective_sfx(&self) -> f32 {
        if self.muted { 0.0 } else { self.sfx_gain }
    }

    fn effective_music(&self) -> f32 {
        if self.muted { 0.0 } else { self.music_gain }
    }

    fn update_drone_level(&self) {
        if let Some(drone) = &self.drone {
            drone.gain.gain().set_value(self.effective_music() * 0.15);
        }
    }

    // === Sound generators ===

    /// Create an oscillator with its own gain, routed into `output`
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
        output: &AudioNode,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(output).ok()?;

        Some((osc, gain))
    }

    /// Hit - low thump with a short crunch on top
    fn play_hit(ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        let out = ctx.destination();

        if let Some((osc, gain)) = Self::create_osc(ctx, 160.0, OscillatorType::Sine, &out) {
            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.18)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.15)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.2).ok();
        }

        if let Some((osc, gain)) = Self::create_osc(ctx, 900.0, OscillatorType::Square, &out) {
            gain.gain().set_value_at_time(vol * 0.12, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.06)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.08).ok();
        }
    }

    /// Game over - sad descending
    fn play_game_over(ctx: &AudioContext, vol: f32) {
        let out = ctx.destination();
        for (i, freq) in [400.0, 350.0, 300.0, 200.0].iter().enumerate() {
            let delay = i as f64 * 0.2;
            if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine, &out) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.3)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.4).ok();
            }
        }
    }

    /// Menu move - short blip
    fn play_menu_move(ctx: &AudioContext, vol: f32) {
        let out = ctx.destination();
        let Some((osc, gain)) = Self::create_osc(ctx, 660.0, OscillatorType::Triangle, &out)
        else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.05)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.07).ok();
    }

    /// Menu select - rising two-note chime
    fn play_menu_select(ctx: &AudioContext, vol: f32) {
        let out = ctx.destination();
        for (i, freq) in [660.0, 990.0].iter().enumerate() {
            let delay = i as f64 * 0.07;
            if let Some((osc, gain)) = Self::create_osc(ctx, *freq, OscillatorType::Sine, &out) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.25, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.2).ok();
            }
        }
    }

    fn start_drone(&mut self) {
        let Some(ctx) = &self.ctx else { return };
        match Self::build_drone(ctx, self.effective_music() * 0.15) {
            Some(drone) => {
                log::info!("Background loop started");
                self.drone = Some(drone);
            }
            None => {
                // Not retried until the music intent turns off and on again
                log::warn!("Failed to start background loop");
                self.drone_failed = true;
            }
        }
    }

    /// Wire the whole graph first; nothing is started or audible unless every
    /// node was created and connected.
    fn build_drone(ctx: &AudioContext, level: f32) -> Option<Drone> {
        let gain = ctx.create_gain().ok()?;
        gain.gain().set_value(level);

        // A fifth apart, one slightly detuned so the pair beats slowly
        let make = |freq: f32, osc_type: OscillatorType| {
            let osc = ctx.create_oscillator().ok()?;
            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            Some(osc)
        };
        let low = make(55.0, OscillatorType::Sawtooth);
        let high = make(82.8, OscillatorType::Triangle);

        let (Some(low), Some(high)) = (low, high) else {
            gain.disconnect().ok();
            return None;
        };
        let oscillators = [low, high];

        let started = gain.connect_with_audio_node(&ctx.destination()).is_ok()
            && oscillators.iter().all(|osc| osc.start().is_ok());
        if !started {
            for osc in &oscillators {
                osc.stop().ok();
                osc.disconnect().ok();
            }
            gain.disconnect().ok();
            return None;
        }

        Some(Drone { oscillators, gain })
    }

    fn stop_drone(&mut self) {
        if let Some(drone) = self.drone.take() {
            for osc in &drone.oscillators {
                osc.stop().ok();
            }
            drone.gain.disconnect().ok();
            log::info!("Background loop stopped");
        }
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_sfx();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Hit => Self::play_hit(ctx, vol),
            SoundEffect::GameOver => Self::play_game_over(ctx, vol),
            SoundEffect::MenuMove => Self::play_menu_move(ctx, vol),
            SoundEffect::MenuSelect => Self::play_menu_select(ctx, vol),
        }
    }

    fn set_music(&mut self, on: bool) {
        match music_action(on, self.drone.is_some(), self.drone_failed) {
            MusicAction::Start => self.start_drone(),
            MusicAction::Stop => self.stop_drone(),
            MusicAction::Keep => {}
        }
        if !on {
            self.drone_failed = false;
        }
    }
}
