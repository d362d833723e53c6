//! Collision detection between the player and enemies
//!
//! Sprites are axis-aligned rectangles anchored at their top-left corner.
//! Only one collision is resolved per tick: if several enemies overlap the
//! player at once, the earliest spawned one is taken and the others are
//! left for the following ticks.

use glam::Vec2;

use super::state::{Enemy, Player};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap; rectangles that only share an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }
}

/// Index of the first enemy (in collection order) touching the player
pub fn first_overlap(player: &Player, enemies: &[Enemy]) -> Option<usize> {
    let player_box = player.bounds();
    enemies.iter().position(|e| e.bounds().overlaps(&player_box))
}

/// Find the first overlapping enemy and remove it from the collection.
///
/// Returns the removed enemy, if any.
pub fn resolve_hit(player: &Player, enemies: &mut Vec<Enemy>) -> Option<Enemy> {
    let index = first_overlap(player, enemies)?;
    // `remove` keeps the survivors in spawn order
    Some(enemies.remove(index))
}
