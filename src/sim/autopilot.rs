//! Idle/demo mode - the autopilot plays the game
//!
//! Produces the input a (cautious) player would give for the current state:
//! confirms menus and sidesteps whatever is about to land on the player.

use super::input::{Keys, TickInput};
use super::state::{Enemy, GamePhase, GameState};
use crate::consts::*;

/// How far above the player (pixels) enemies are considered a threat
const LOOKAHEAD: f32 = 260.0;
/// Extra clearance kept on each side when dodging
const MARGIN: f32 = 12.0;
/// Dead zone around the center when idling
const CENTER_SLACK: f32 = 40.0;

/// Input for the current tick
pub fn autopilot_input(state: &GameState) -> TickInput {
    let mut input = TickInput::default();

    match state.phase {
        GamePhase::Menu | GamePhase::Paused => {
            // First option is Play / Resume
            if !state.quit_requested {
                input.pressed = if state.menu_select == 0 {
                    Keys::ENTER
                } else {
                    Keys::UP
                };
            }
        }
        GamePhase::GameOver => input.pressed = Keys::ENTER,
        GamePhase::Playing => input.held = dodge(state),
    }

    input
}

/// Ticks until the enemy's bottom edge reaches the player's top edge
fn ticks_to_impact(enemy: &Enemy) -> f32 {
    let gap = PLAYER_Y - (enemy.pos.y + ENEMY_HEIGHT);
    (gap / enemy.vel.y).max(0.0)
}

/// Pick a direction away from the most urgent threat
fn dodge(state: &GameState) -> Keys {
    let player_x = state.run.player.x;
    let step = state.tuning.player_step.max(f32::EPSILON);

    let threat = state
        .run
        .enemies
        .iter()
        .filter(|e| e.pos.y + ENEMY_HEIGHT >= PLAYER_Y - LOOKAHEAD && e.pos.y < SCREEN_HEIGHT)
        .filter(|e| {
            // Where it will be horizontally when it arrives
            let x = e.pos.x + e.vel.x * ticks_to_impact(e);
            x < player_x + PLAYER_WIDTH + MARGIN && player_x < x + ENEMY_WIDTH + MARGIN
        })
        .min_by(|a, b| {
            ticks_to_impact(a)
                .partial_cmp(&ticks_to_impact(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    let Some(threat) = threat else {
        // Drift back toward the middle
        let center = PLAYER_MAX_X / 2.0;
        return if player_x < center - CENTER_SLACK {
            Keys::RIGHT
        } else if player_x > center + CENTER_SLACK {
            Keys::LEFT
        } else {
            Keys::empty()
        };
    };

    let arrival = ticks_to_impact(threat);
    let threat_x = threat.pos.x + threat.vel.x * arrival;
    let reach = step * arrival.max(1.0);

    // Positions that clear the threat on either side
    let left_target = threat_x - PLAYER_WIDTH - MARGIN;
    let right_target = threat_x + ENEMY_WIDTH + MARGIN;
    let can_left = left_target >= 0.0 && player_x - left_target <= reach;
    let can_right = right_target <= PLAYER_MAX_X && right_target - player_x <= reach;

    let prefer_left = threat_x + ENEMY_WIDTH / 2.0 > player_x + PLAYER_WIDTH / 2.0;
    match (can_left, can_right) {
        (true, true) if prefer_left => Keys::LEFT,
        (true, true) => Keys::RIGHT,
        (true, false) => Keys::LEFT,
        (false, true) => Keys::RIGHT,
        // Cornered: run for the side with more room
        (false, false) if left_target >= 0.0 => Keys::LEFT,
        (false, false) => Keys::RIGHT,
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::sim::state::Transition;
    use crate::sim::tick;
    use crate::tuning::Tuning;

    fn playing() -> GameState {
        let mut state = GameState::new(8, Tuning::default());
        state.transition(Transition::Start);
        state
    }

    #[test]
    fn test_confirms_menus() {
        let mut state = GameState::new(8, Tuning::default());
        assert_eq!(autopilot_input(&state).pressed, Keys::ENTER);

        state.menu_select = 1;
        assert_eq!(autopilot_input(&state).pressed, Keys::UP);

        state.request_quit();
        assert!(autopilot_input(&state).pressed.is_empty());
    }

    #[test]
    fn test_sidesteps_falling_enemy() {
        let mut state = playing();
        let px = state.run.player.x;

        // Slightly right of center: go left
        state.run.enemies.push(Enemy {
            id: 1,
            pos: Vec2::new(px + 20.0, PLAYER_Y - 150.0),
            vel: Vec2::new(0.0, 5.0),
        });
        assert_eq!(autopilot_input(&state).held, Keys::LEFT);

        // Slightly left of center: go right
        state.run.enemies[0].pos.x = px - 10.0;
        assert_eq!(autopilot_input(&state).held, Keys::RIGHT);
    }

    #[test]
    fn test_cornered_goes_the_open_way() {
        let mut state = playing();
        state.run.player.x = 0.0;
        state.run.enemies.push(Enemy {
            id: 1,
            pos: Vec2::new(0.0, PLAYER_Y - 100.0),
            vel: Vec2::new(0.0, 5.0),
        });
        assert_eq!(autopilot_input(&state).held, Keys::RIGHT);
    }

    #[test]
    fn test_returns_to_center_when_clear() {
        let mut state = playing();
        state.run.player.x = 10.0;
        assert_eq!(autopilot_input(&state).held, Keys::RIGHT);
        state.run.player.x = PLAYER_MAX_X;
        assert_eq!(autopilot_input(&state).held, Keys::LEFT);
    }

    #[test]
    fn test_autopilot_starts_and_plays() {
        let mut state = GameState::new(2024, Tuning::default());
        for _ in 0..600 {
            let input = autopilot_input(&state);
            tick::tick(&mut state, &input, SIM_DT);
        }
        assert!(state.run.time_ticks > 0);
        assert!(state.music_wanted());
    }
}
