//! Platform abstraction layer
//!
//! The seams between the simulation and whatever hosts it:
//! - Fixed-timestep frame driver
//! - Render and audio sinks
//! - Routing of simulation events to sound

pub mod headless;

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{FrameView, GameEvent};

pub use headless::HeadlessSink;

/// Largest frame delta fed into the accumulator (seconds)
pub const MAX_FRAME_DT: f32 = 0.1;

/// Receives one read-only view per rendered frame
pub trait RenderSink {
    fn present(&mut self, view: &FrameView<'_>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Hit,
    GameOver,
    MenuMove,
    MenuSelect,
}

pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
    /// Whether the background loop should be playing
    fn set_music(&mut self, on: bool);
}

/// Sound for a simulation event, if any
pub fn sound_for(event: &GameEvent) -> Option<SoundEffect> {
    match event {
        GameEvent::Hit { .. } => Some(SoundEffect::Hit),
        GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
        GameEvent::MenuMoved => Some(SoundEffect::MenuMove),
        GameEvent::Started { .. } | GameEvent::Resumed | GameEvent::ReturnedToMenu => {
            Some(SoundEffect::MenuSelect)
        }
        GameEvent::Spawned { .. } | GameEvent::Paused | GameEvent::QuitRequested => None,
    }
}

/// What a music player should do with the current intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicAction {
    Start,
    Stop,
    Keep,
}

/// Decide how to follow the music intent. A failed start is not retried
/// while the intent stays on.
pub fn music_action(wanted: bool, running: bool, start_failed: bool) -> MusicAction {
    match (wanted, running) {
        (true, false) if !start_failed => MusicAction::Start,
        (false, true) => MusicAction::Stop,
        _ => MusicAction::Keep,
    }
}

/// Play the sounds for one tick's events and apply the music intent
pub fn forward_audio(events: &[GameEvent], music_wanted: bool, sink: &mut impl AudioSink) {
    for effect in events.iter().filter_map(sound_for) {
        sink.play(effect);
    }
    sink.set_music(music_wanted);
}

/// Turns variable frame deltas into a whole number of `SIM_DT` steps
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedTimestep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame delta and return how many steps to run now
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        // Cap dt to prevent spiral of death
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }

        // Drop backlog we could not catch up on
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }

    /// Forget leftover time (after a pause or tab switch)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        played: Vec<SoundEffect>,
        music: Option<bool>,
    }

    impl AudioSink for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }

        fn set_music(&mut self, on: bool) {
            self.music = Some(on);
        }
    }

    #[test]
    fn test_forward_audio() {
        let mut sink = Recorder::default();
        let events = [
            GameEvent::Spawned { enemy_id: 1 },
            GameEvent::Hit { enemy_id: 1 },
            GameEvent::GameOver { score: -60, hits: 3 },
        ];
        forward_audio(&events, true, &mut sink);
        assert_eq!(sink.played, vec![SoundEffect::Hit, SoundEffect::GameOver]);
        assert_eq!(sink.music, Some(true));
    }

    #[test]
    fn test_menu_sounds() {
        assert_eq!(sound_for(&GameEvent::MenuMoved), Some(SoundEffect::MenuMove));
        assert_eq!(
            sound_for(&GameEvent::Started { seed: 3 }),
            Some(SoundEffect::MenuSelect)
        );
        assert_eq!(sound_for(&GameEvent::Paused), None);
    }

    #[test]
    fn test_music_action() {
        assert_eq!(music_action(true, false, false), MusicAction::Start);
        assert_eq!(music_action(true, true, false), MusicAction::Keep);
        assert_eq!(music_action(false, true, false), MusicAction::Stop);
        assert_eq!(music_action(false, false, true), MusicAction::Keep);
    }

    #[test]
    fn test_failed_music_start_is_not_retried_every_tick() {
        // Wanted on every tick, but the first start fails
        let mut failed = false;
        let mut attempts = 0;
        for _ in 0..60 {
            if music_action(true, false, failed) == MusicAction::Start {
                attempts += 1;
                failed = true;
            }
        }
        assert_eq!(attempts, 1);
    }

    #[test]
    fn test_timestep_accumulates() {
        let mut clock = FixedTimestep::new(0.01, 8);
        assert_eq!(clock.advance(0.005), 0);
        assert_eq!(clock.advance(0.006), 1);
        assert_eq!(clock.advance(0.03), 3);
    }

    #[test]
    fn test_timestep_caps_long_frames() {
        let mut clock = FixedTimestep::new(0.01, 4);
        // A multi-second hitch counts as MAX_FRAME_DT, then hits the substep cap
        assert_eq!(clock.advance(5.0), 4);
        assert!(clock.advance(0.0) <= 1);

        let mut clock = FixedTimestep::default();
        let steps = clock.advance(5.0);
        assert!((5..=MAX_SUBSTEPS).contains(&steps));

        clock.reset();
        assert_eq!(clock.advance(-1.0), 0);
    }
}
