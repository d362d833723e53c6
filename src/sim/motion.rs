//! Motion integration
//!
//! Movement is per tick, not time-scaled: one tick is one step.

use super::input::{InputSnapshot, Keys};
use super::state::{Enemy, Player};
use crate::consts::PLAYER_MAX_X;
use crate::tuning::Tuning;

/// Net horizontal intent from held keys: -1, 0 or +1
pub fn steer(input: &impl InputSnapshot) -> f32 {
    let mut dir = 0.0;
    if input.is_pressed(Keys::MOVE_LEFT) {
        dir -= 1.0;
    }
    if input.is_pressed(Keys::MOVE_RIGHT) {
        dir += 1.0;
    }
    dir
}

/// Step the player and clamp to the playfield
pub fn move_player(player: &mut Player, dir: f32, tuning: &Tuning) {
    player.x = (player.x + dir * tuning.player_step).clamp(0.0, PLAYER_MAX_X);
}

/// Advance every enemy by its velocity, then drop those below the playfield.
///
/// Single pass; survivors keep their spawn order. Returns how many were
/// removed.
pub fn advance_enemies(enemies: &mut Vec<Enemy>) -> usize {
    let before = enemies.len();
    enemies.retain_mut(|enemy| {
        enemy.pos += enemy.vel;
        !enemy.is_gone()
    });
    before - enemies.len()
}
