//! Read-only per-frame snapshot handed to renderers

use glam::Vec2;

use super::menu::{self, MenuOption};
use super::state::{Enemy, GamePhase, GameState};

/// Menu currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuView {
    pub title: &'static str,
    pub options: &'static [MenuOption],
    pub selected: usize,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    /// Player top-left
    pub player: Vec2,
    pub enemies: &'a [Enemy],
    pub score: i64,
    pub hits: u32,
    pub hits_left: u32,
    pub hit_flag: bool,
    pub best_score: Option<i64>,
    pub menu: Option<MenuView>,
}

impl FrameView<'_> {
    /// Whether gameplay sprites are drawn (live or as a frozen backdrop)
    pub fn shows_playfield(&self) -> bool {
        self.phase != GamePhase::Menu
    }
}

impl GameState {
    pub fn view(&self) -> FrameView<'_> {
        let menu = self.phase.has_menu().then(|| MenuView {
            title: menu::title_for(self.phase),
            options: menu::options_for(self.phase),
            selected: self.menu_select,
        });

        FrameView {
            phase: self.phase,
            player: self.run.player.pos(),
            enemies: &self.run.enemies,
            score: self.run.score,
            hits: self.run.hits,
            hits_left: self.tuning.max_hits.saturating_sub(self.run.hits),
            hit_flag: self.hit_flag,
            best_score: self.best_score,
            menu,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Transition;
    use crate::tuning::Tuning;

    #[test]
    fn test_menu_view_per_phase() {
        let mut state = GameState::new(1, Tuning::default());
        let view = state.view();
        assert!(!view.shows_playfield());
        let menu = view.menu.unwrap();
        assert_eq!(menu.options, &[MenuOption::Play, MenuOption::Quit]);
        assert_eq!(menu.selected, 0);

        state.transition(Transition::Start);
        let view = state.view();
        assert!(view.menu.is_none());
        assert!(view.shows_playfield());
        assert_eq!(view.hits_left, 3);

        state.transition(Transition::Pause);
        assert_eq!(state.view().menu.unwrap().title, "Paused");
    }
}
