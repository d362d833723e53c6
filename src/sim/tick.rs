//! Fixed timestep simulation tick
//!
//! Exactly one handler runs per tick, chosen by the current phase. While
//! playing, the pipeline order is spawn, move, collide, score.

use super::input::InputSnapshot;
use super::state::{GameEvent, GamePhase, GameState, Transition};
use super::{collision, menu, motion, score, spawner};

/// Advance the game state by one tick.
///
/// `dt` only feeds the play clock used by the spawn timer; movement is per
/// tick. Events raised by this tick replace those of the previous one, so
/// drivers should drain them after every call.
pub fn tick(state: &mut GameState, input: &impl InputSnapshot, dt: f32) {
    state.events.clear();
    state.hit_flag = false;

    match state.phase {
        GamePhase::Playing => {
            // Pausing freezes this tick too
            if menu::pause_requested(input) {
                state.transition(Transition::Pause);
                return;
            }
            step_playing(state, input, dt);
        }
        GamePhase::Menu | GamePhase::Paused | GamePhase::GameOver => {
            menu::handle_menu(state, input);
        }
    }
}

fn step_playing(state: &mut GameState, input: &impl InputSnapshot, dt: f32) {
    let GameState {
        run,
        tuning,
        events,
        hit_flag,
        ..
    } = state;

    run.time_ticks += 1;
    run.clock += f64::from(dt);

    if let Some(enemy_id) = spawner::spawn_tick(run, tuning) {
        events.push(GameEvent::Spawned { enemy_id });
    }

    motion::move_player(&mut run.player, motion::steer(input), tuning);
    motion::advance_enemies(&mut run.enemies);

    let hit = collision::resolve_hit(&run.player, &mut run.enemies);
    if let Some(enemy) = hit {
        *hit_flag = true;
        events.push(GameEvent::Hit { enemy_id: enemy.id });
        log::debug!("Hit by enemy {} at tick {}", enemy.id, run.time_ticks);
    }

    if score::settle(run, hit.is_some(), tuning) == score::Lifecycle::Dead {
        state.transition(Transition::Died);
    }
}
