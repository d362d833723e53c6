//! Enemy spawning
//!
//! At most one enemy per tick, and never more often than the tuning's
//! spawn interval. There is no cap on live enemies; motion culls them once
//! they fall off the bottom.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, Run};
use crate::consts::{ENEMY_MAX_X, ENEMY_SPAWN_Y};
use crate::tuning::Tuning;

/// Whether the spawn interval has elapsed on the run clock
pub fn spawn_due(run: &Run, tuning: &Tuning) -> bool {
    run.clock - run.last_spawn >= f64::from(tuning.spawn_interval)
}

/// Roll a new enemy just above the playfield
pub fn roll_enemy(run: &mut Run, tuning: &Tuning) -> Enemy {
    let id = run.next_enemy_id();
    let x = run.rng.random_range(0.0..=ENEMY_MAX_X);
    let speed = run
        .rng
        .random_range(tuning.enemy_speed_min..=tuning.enemy_speed_max);
    let drift = if tuning.enemy_drift > 0.0 {
        run.rng.random_range(-tuning.enemy_drift..=tuning.enemy_drift)
    } else {
        0.0
    };

    Enemy {
        id,
        pos: Vec2::new(x, ENEMY_SPAWN_Y),
        vel: Vec2::new(drift, speed),
    }
}

/// Spawn one enemy if due. Returns the new enemy's ID.
pub fn spawn_tick(run: &mut Run, tuning: &Tuning) -> Option<u32> {
    if !spawn_due(run, tuning) {
        return None;
    }

    let enemy = roll_enemy(run, tuning);
    run.last_spawn = run.clock;
    run.enemies.push(enemy);
    log::debug!(
        "Spawned enemy {} at x={:.1} vel=({:.2}, {:.2})",
        enemy.id,
        enemy.pos.x,
        enemy.vel.x,
        enemy.vel.y
    );
    Some(enemy.id)
}
