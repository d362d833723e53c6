//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Per-tick movement, the clock only drives the spawn timer
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod input;
pub mod menu;
pub mod motion;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod view;

pub use autopilot::autopilot_input;
pub use collision::{Aabb, first_overlap, resolve_hit};
pub use input::{
    ButtonEdges, Buttons, ControllerId, ControllerInput, InputSnapshot, KeyboardState, Keys,
    TickInput,
};
pub use menu::{MenuOption, handle_menu};
pub use state::{Enemy, GameEvent, GamePhase, GameState, Player, Run, Transition};
pub use tick::tick;
pub use view::{FrameView, MenuView};
