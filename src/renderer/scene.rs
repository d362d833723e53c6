//! Builds the frame's quads from a `FrameView`
//!
//! Everything is in playfield pixels (origin top-left, y down). Menu text is
//! drawn by the HUD, not here.

use glam::Vec2;

use super::shapes;
use super::vertex::{Palette, Vertex};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{FrameView, GamePhase};

/// Border drawn around the player while the hit flash is up
const FLASH_BORDER: f32 = 4.0;

pub fn build_scene(view: &FrameView<'_>, settings: &Settings) -> Vec<Vertex> {
    let palette = Palette::for_contrast(settings.high_contrast);
    let field = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    let mut vertices = Vec::with_capacity(6 * (view.enemies.len() + 4));
    vertices.extend(shapes::rect(Vec2::ZERO, field, palette.background));

    if !view.shows_playfield() {
        return vertices;
    }

    for enemy in view.enemies {
        vertices.extend(shapes::rect(
            enemy.pos,
            Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT),
            palette.enemy,
        ));
    }

    let player_size = Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT);
    vertices.extend(shapes::rect(view.player, player_size, palette.player));

    if view.hit_flag && settings.effective_hit_flash() {
        vertices.extend(shapes::rect(Vec2::ZERO, field, palette.hit_flash));
        vertices.extend(shapes::frame(
            view.player,
            player_size,
            FLASH_BORDER,
            palette.enemy,
        ));
    }

    // Frozen gameplay behind the menu
    if matches!(view.phase, GamePhase::Paused | GamePhase::GameOver) {
        vertices.extend(shapes::rect(Vec2::ZERO, field, palette.overlay));
    }

    vertices
}
