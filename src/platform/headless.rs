//! Logging sink for running without a window (native demo, tests)

use super::{AudioSink, RenderSink, SoundEffect};
use crate::sim::{FrameView, GamePhase};

/// Counts what it is shown and logs phase changes
#[derive(Debug, Default)]
pub struct HeadlessSink {
    pub frames: u64,
    pub sounds: Vec<SoundEffect>,
    pub music: bool,
    pub peak_enemies: usize,
    last_phase: Option<GamePhase>,
}

impl RenderSink for HeadlessSink {
    fn present(&mut self, view: &FrameView<'_>) {
        self.frames += 1;
        self.peak_enemies = self.peak_enemies.max(view.enemies.len());

        if self.last_phase != Some(view.phase) {
            self.last_phase = Some(view.phase);
            match view.menu {
                Some(menu) => log::info!(
                    "[frame {}] {} (score {}, best {:?})",
                    self.frames,
                    menu.title,
                    view.score,
                    view.best_score
                ),
                None => log::info!("[frame {}] playing", self.frames),
            }
        }
        log::trace!(
            "frame {}: player x={:.1} enemies={} score={} hits_left={}",
            self.frames,
            view.player.x,
            view.enemies.len(),
            view.score,
            view.hits_left
        );
    }
}

impl AudioSink for HeadlessSink {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sound: {effect:?}");
        self.sounds.push(effect);
    }

    fn set_music(&mut self, on: bool) {
        if on != self.music {
            log::info!("music {}", if on { "on" } else { "off" });
            self.music = on;
        }
    }
}
