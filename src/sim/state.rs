//! Game state and core simulation types
//!
//! `GameState` is the one owned session object. Everything that belongs to a
//! single game lives in [`Run`], which is rebuilt from scratch on every new
//! game.

use glam::Vec2;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Aabb;
use crate::consts::*;
use crate::tuning::Tuning;

/// Top-level mode. Exactly one is active, so combinations like "menu while
/// game over" cannot be represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Title menu (initial)
    Menu,
    /// Active gameplay
    Playing,
    /// Simulation frozen, pause menu shown
    Paused,
    /// Run ended, final snapshot shown
    GameOver,
}

/// Something that asks the state machine to change phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Start,
    Pause,
    Resume,
    QuitToMenu,
    Died,
    ToMenu,
}

impl GamePhase {
    /// Transition table. `None` means the trigger is not valid from here.
    pub fn next(self, transition: Transition) -> Option<GamePhase> {
        use GamePhase::*;
        use Transition::*;
        match (self, transition) {
            (Menu, Start) => Some(Playing),
            (Playing, Pause) => Some(Paused),
            (Playing, Died) => Some(GameOver),
            (Paused, Resume) => Some(Playing),
            (Paused, QuitToMenu) => Some(Menu),
            (GameOver, ToMenu) => Some(Menu),
            _ => None,
        }
    }

    /// Whether this phase shows a selectable menu
    pub fn has_menu(self) -> bool {
        !matches!(self, GamePhase::Playing)
    }
}

/// Things that happened during a tick, for audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A fresh run began
    Started { seed: u64 },
    Spawned { enemy_id: u32 },
    Hit { enemy_id: u32 },
    GameOver { score: i64, hits: u32 },
    Paused,
    Resumed,
    /// Menu highlight changed
    MenuMoved,
    ReturnedToMenu,
    QuitRequested,
}

/// The player's sprite. Only the horizontal position is free.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub x: f32,
}

impl Default for Player {
    fn default() -> Self {
        // Start centered
        Self {
            x: (SCREEN_WIDTH - PLAYER_WIDTH) / 2.0,
        }
    }
}

impl Player {
    /// Top-left corner
    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, PLAYER_Y)
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos(), Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }
}

/// A falling enemy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Per-tick displacement, fixed for the enemy's lifetime
    pub vel: Vec2,
}

impl Enemy {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT))
    }

    /// Entirely below the playfield
    pub fn is_gone(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT
    }
}

/// State for a single game, from Start to GameOver
#[derive(Debug, Clone)]
pub struct Run {
    /// Seed this run's RNG was built from
    pub seed: u64,
    pub player: Player,
    /// Live enemies in spawn order
    pub enemies: Vec<Enemy>,
    pub score: i64,
    pub hits: u32,
    /// Play time in seconds (only advances while Playing)
    pub clock: f64,
    /// Clock value of the last spawn
    pub last_spawn: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl Run {
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            seed,
            player: Player::default(),
            enemies: Vec::new(),
            score: tuning.initial_score,
            hits: 0,
            clock: 0.0,
            last_spawn: 0.0,
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new enemy ID
    pub fn next_enemy_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed; each run draws its own seed from it
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    /// Highlighted option in the active menu
    pub menu_select: usize,
    /// Set only on the tick a collision happened
    pub hit_flag: bool,
    /// Current (or last finished) run
    pub run: Run,
    /// Best final score this session
    pub best_score: Option<i64>,
    /// Background music has been requested at least once
    pub music_started: bool,
    /// The player chose Quit
    pub quit_requested: bool,
    /// Events raised by the last tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a new session with the given seed and tuning
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let run = Run::new(seed, &tuning);
        Self {
            seed,
            tuning,
            phase: GamePhase::Menu,
            menu_select: 0,
            hit_flag: false,
            run,
            best_score: None,
            music_started: false,
            quit_requested: false,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Apply a transition if the table allows it. Returns whether it did.
    pub fn transition(&mut self, transition: Transition) -> bool {
        let Some(next) = self.phase.next(transition) else {
            log::warn!("Ignoring {:?} while {:?}", transition, self.phase);
            return false;
        };

        match transition {
            Transition::Start => {
                let seed = self.rng.next_u64();
                self.run = Run::new(seed, &self.tuning);
                self.music_started = true;
                self.events.push(GameEvent::Started { seed });
                log::info!("Run started with seed: {}", seed);
            }
            Transition::Pause => {
                self.events.push(GameEvent::Paused);
                log::info!("Paused at score {}", self.run.score);
            }
            Transition::Resume => {
                self.events.push(GameEvent::Resumed);
                log::info!("Resumed");
            }
            Transition::Died => {
                let (score, hits) = (self.run.score, self.run.hits);
                self.best_score = Some(self.best_score.map_or(score, |best| best.max(score)));
                self.events.push(GameEvent::GameOver { score, hits });
                log::info!("Game over: score {} after {} hits", score, hits);
            }
            Transition::QuitToMenu | Transition::ToMenu => {
                self.events.push(GameEvent::ReturnedToMenu);
            }
        }

        self.phase = next;
        if next.has_menu() {
            self.menu_select = 0;
        }
        true
    }

    /// Ask the driver to stop
    pub fn request_quit(&mut self) {
        if !self.quit_requested {
            self.quit_requested = true;
            self.events.push(GameEvent::QuitRequested);
            log::info!("Quit requested");
        }
    }

    /// Whether the background loop should be playing
    pub fn music_wanted(&self) -> bool {
        self.music_started && !self.quit_requested
    }

    /// Take the events raised by the last tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use GamePhase::*;
        use Transition::*;

        assert_eq!(Menu.next(Start), Some(Playing));
        assert_eq!(Playing.next(Pause), Some(Paused));
        assert_eq!(Paused.next(Resume), Some(Playing));
        assert_eq!(Paused.next(QuitToMenu), Some(Menu));
        assert_eq!(Playing.next(Died), Some(GameOver));
        assert_eq!(GameOver.next(ToMenu), Some(Menu));

        // Nothing else is reachable
        assert_eq!(Menu.next(Died), None);
        assert_eq!(Menu.next(Resume), None);
        assert_eq!(GameOver.next(Start), None);
        assert_eq!(GameOver.next(Resume), None);
        assert_eq!(Paused.next(Died), None);
        assert_eq!(Playing.next(Start), None);
    }

    #[test]
    fn test_new_session_starts_in_menu() {
        let state = GameState::new(7, Tuning::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(!state.music_wanted());
        assert!(state.run.enemies.is_empty());
    }

    #[test]
    fn test_invalid_transition_is_ignored() {
        let mut state = GameState::new(7, Tuning::default());
        assert!(!state.transition(Transition::Died));
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_start_builds_fresh_run() {
        let mut state = GameState::new(7, Tuning::default());
        assert!(state.transition(Transition::Start));
        state.run.score = 999;
        state.run.hits = 2;
        state.run.enemies.push(Enemy {
            id: 1,
            pos: Vec2::ZERO,
            vel: Vec2::Y,
        });

        state.transition(Transition::Pause);
        state.transition(Transition::QuitToMenu);
        state.transition(Transition::Start);

        assert_eq!(state.run.score, INITIAL_SCORE);
        assert_eq!(state.run.hits, 0);
        assert!(state.run.enemies.is_empty());
        assert_eq!(state.run.player, Player::default());
        assert!(state.music_wanted());
    }

    #[test]
    fn test_runs_are_seeded_from_session() {
        let mut a = GameState::new(42, Tuning::default());
        let mut b = GameState::new(42, Tuning::default());
        a.transition(Transition::Start);
        b.transition(Transition::Start);
        assert_eq!(a.run.seed, b.run.seed);
    }

    #[test]
    fn test_best_score_tracks_maximum() {
        let mut state = GameState::new(1, Tuning::default());
        for score in [40, 120, 80] {
            state.transition(Transition::Start);
            state.run.score = score;
            state.transition(Transition::Died);
            state.transition(Transition::ToMenu);
        }
        assert_eq!(state.best_score, Some(120));
    }

    #[test]
    fn test_quit_is_reported_once() {
        let mut state = GameState::new(1, Tuning::default());
        state.request_quit();
        state.request_quit();
        assert_eq!(state.drain_events(), vec![GameEvent::QuitRequested]);
        assert!(state.events.is_empty());
    }
}
