//! Sépan - A falling-enemy dodge arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (state machine, spawning, motion, collisions, score)
//! - `renderer`: Scene building and the WebGPU pipeline
//! - `platform`: Render/audio sink seams and the fixed-timestep driver
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use error::ConfigError;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per displayed frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions, shared with the renderer viewport
    pub const SCREEN_WIDTH: f32 = 1000.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Player sprite size
    pub const PLAYER_WIDTH: f32 = 64.0;
    pub const PLAYER_HEIGHT: f32 = 64.0;
    /// Player rides the bottom edge of the playfield
    pub const PLAYER_Y: f32 = SCREEN_HEIGHT - PLAYER_HEIGHT;
    /// Rightmost legal player x
    pub const PLAYER_MAX_X: f32 = SCREEN_WIDTH - PLAYER_WIDTH;

    /// Enemy sprite size
    pub const ENEMY_WIDTH: f32 = 48.0;
    pub const ENEMY_HEIGHT: f32 = 48.0;
    /// Enemies enter from just above the visible playfield
    pub const ENEMY_SPAWN_Y: f32 = -ENEMY_HEIGHT;
    /// Rightmost legal spawn x
    pub const ENEMY_MAX_X: f32 = SCREEN_WIDTH - ENEMY_WIDTH;

    /// Starting score handicap
    pub const INITIAL_SCORE: i64 = -5;
}
