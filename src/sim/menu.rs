//! Menu screens and their input handlers
//!
//! Menu, Paused and GameOver each show a short list of options. Navigation
//! clamps at both ends (no wraparound).

use super::input::{Buttons, InputSnapshot, Keys};
use super::state::{GameEvent, GamePhase, GameState, Transition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Play,
    Quit,
    Resume,
    MainMenu,
}

impl MenuOption {
    pub fn label(self) -> &'static str {
        match self {
            MenuOption::Play => "Play",
            MenuOption::Quit => "Quit",
            MenuOption::Resume => "Resume",
            MenuOption::MainMenu => "Main Menu",
        }
    }
}

pub const MAIN_MENU: &[MenuOption] = &[MenuOption::Play, MenuOption::Quit];
pub const PAUSE_MENU: &[MenuOption] = &[MenuOption::Resume, MenuOption::MainMenu];
pub const GAME_OVER_MENU: &[MenuOption] = &[MenuOption::MainMenu];

/// Options shown in a phase (empty while playing)
pub fn options_for(phase: GamePhase) -> &'static [MenuOption] {
    match phase {
        GamePhase::Menu => MAIN_MENU,
        GamePhase::Paused => PAUSE_MENU,
        GamePhase::GameOver => GAME_OVER_MENU,
        GamePhase::Playing => &[],
    }
}

pub fn title_for(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Menu => "Le Sépan",
        GamePhase::Paused => "Paused",
        GamePhase::GameOver => "Game Over",
        GamePhase::Playing => "",
    }
}

/// Menu actions decoded from one input snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuIntents {
    pub up: bool,
    pub down: bool,
    pub activate: bool,
    pub escape: bool,
    /// Controller Start
    pub start: bool,
}

impl MenuIntents {
    pub fn read(input: &impl InputSnapshot) -> Self {
        Self {
            up: input.is_just_pressed(Keys::NAV_UP)
                || input.any_button_just_pressed(Buttons::DPAD_UP),
            down: input.is_just_pressed(Keys::NAV_DOWN)
                || input.any_button_just_pressed(Buttons::DPAD_DOWN),
            activate: input.is_just_pressed(Keys::ACTIVATE)
                || input.any_button_just_pressed(Buttons::SOUTH),
            escape: input.is_just_pressed(Keys::ESCAPE),
            start: input.any_button_just_pressed(Buttons::START),
        }
    }
}

/// Whether the pause request is present (used while playing)
pub fn pause_requested(input: &impl InputSnapshot) -> bool {
    input.is_just_pressed(Keys::ESCAPE) || input.any_button_just_pressed(Buttons::START)
}

/// Run the input handler of whichever menu is showing
pub fn handle_menu(state: &mut GameState, input: &impl InputSnapshot) {
    let options = options_for(state.phase);
    if options.is_empty() {
        return;
    }
    let intents = MenuIntents::read(input);

    // Escape or Start on the pause screen resumes
    if state.phase == GamePhase::Paused && (intents.escape || intents.start) {
        state.transition(Transition::Resume);
        return;
    }

    let last = options.len() - 1;
    let before = state.menu_select.min(last);
    let mut selected = before;
    if intents.up {
        selected = selected.saturating_sub(1);
    }
    if intents.down {
        selected = (selected + 1).min(last);
    }
    state.menu_select = selected;
    if selected != before {
        state.events.push(GameEvent::MenuMoved);
    }

    // Start doubles as "confirm" outside of the pause screen
    if intents.activate || intents.start {
        activate(state, options[selected]);
    }
}

fn activate(state: &mut GameState, option: MenuOption) {
    match option {
        MenuOption::Play => {
            state.transition(Transition::Start);
        }
        MenuOption::Quit => state.request_quit(),
        MenuOption::Resume => {
            state.transition(Transition::Resume);
        }
        MenuOption::MainMenu => {
            let transition = if state.phase == GamePhase::Paused {
                Transition::QuitToMenu
            } else {
                Transition::ToMenu
            };
            state.transition(transition);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::input::{ControllerId, TickInput};
    use crate::tuning::Tuning;

    fn menu_state() -> GameState {
        GameState::new(5, Tuning::default())
    }

    #[test]
    fn test_selection_clamps_without_wrap() {
        let mut state = menu_state();
        handle_menu(&mut state, &TickInput::tapping(Keys::UP));
        assert_eq!(state.menu_select, 0);
        assert!(state.events.is_empty());

        handle_menu(&mut state, &TickInput::tapping(Keys::DOWN));
        assert_eq!(state.menu_select, 1);
        assert_eq!(state.drain_events(), vec![GameEvent::MenuMoved]);

        handle_menu(&mut state, &TickInput::tapping(Keys::S));
        assert_eq!(state.menu_select, 1);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_held_keys_do_not_navigate() {
        let mut state = menu_state();
        handle_menu(&mut state, &TickInput::holding(Keys::DOWN | Keys::ENTER));
        assert_eq!(state.menu_select, 0);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_escape_does_nothing_on_title() {
        let mut state = menu_state();
        handle_menu(&mut state, &TickInput::tapping(Keys::ESCAPE));
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(!state.quit_requested);
    }

    #[test]
    fn test_play_starts_run() {
        let mut state = menu_state();
        handle_menu(&mut state, &TickInput::tapping(Keys::ENTER));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_quit_option() {
        let mut state = menu_state();
        handle_menu(&mut state, &TickInput::tapping(Keys::DOWN));
        handle_menu(&mut state, &TickInput::tapping(Keys::SPACE));
        assert!(state.quit_requested);
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_controller_navigation() {
        let pad = ControllerId(2);
        let mut state = menu_state();
        handle_menu(
            &mut state,
            &TickInput::default().with_controller(pad, Buttons::DPAD_DOWN),
        );
        assert_eq!(state.menu_select, 1);
        handle_menu(
            &mut state,
            &TickInput::default().with_controller(pad, Buttons::DPAD_UP),
        );
        handle_menu(
            &mut state,
            &TickInput::default().with_controller(pad, Buttons::SOUTH),
        );
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_pause_menu_options() {
        let mut state = menu_state();
        state.transition(Transition::Start);
        state.transition(Transition::Pause);
        assert_eq!(state.menu_select, 0);

        // Escape resumes
        handle_menu(&mut state, &TickInput::tapping(Keys::ESCAPE));
        assert_eq!(state.phase, GamePhase::Playing);

        state.transition(Transition::Pause);
        handle_menu(&mut state, &TickInput::tapping(Keys::DOWN));
        handle_menu(&mut state, &TickInput::tapping(Keys::ENTER));
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.menu_select, 0);
    }

    #[test]
    fn test_game_over_returns_to_menu() {
        let mut state = menu_state();
        state.transition(Transition::Start);
        state.transition(Transition::Died);

        handle_menu(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        handle_menu(&mut state, &TickInput::tapping(Keys::ENTER));
        assert_eq!(state.phase, GamePhase::Menu);
    }

    #[test]
    fn test_labels() {
        let labels: Vec<_> = options_for(GamePhase::Paused)
            .iter()
            .map(|o| o.label())
            .collect();
        assert_eq!(labels, vec!["Resume", "Main Menu"]);
        assert!(options_for(GamePhase::Playing).is_empty());
    }
}
