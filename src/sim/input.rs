//! Input snapshot consumed by the simulation
//!
//! The simulation never talks to devices. Each tick it is handed something
//! implementing [`InputSnapshot`]: held keys, keys pressed since the last
//! tick, and per-controller button edges.

use bitflags::bitflags;

bitflags! {
    /// Keyboard keys the game reacts to
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Keys: u16 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const UP = 1 << 2;
        const DOWN = 1 << 3;
        const A = 1 << 4;
        const D = 1 << 5;
        const W = 1 << 6;
        const S = 1 << 7;
        const ENTER = 1 << 8;
        const SPACE = 1 << 9;
        const ESCAPE = 1 << 10;

        const MOVE_LEFT = Self::LEFT.bits() | Self::A.bits();
        const MOVE_RIGHT = Self::RIGHT.bits() | Self::D.bits();
        const NAV_UP = Self::UP.bits() | Self::W.bits();
        const NAV_DOWN = Self::DOWN.bits() | Self::S.bits();
        const ACTIVATE = Self::ENTER.bits() | Self::SPACE.bits();
    }
}

bitflags! {
    /// Standard-layout controller buttons the game reacts to
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Buttons: u8 {
        const SOUTH = 1 << 0;
        const START = 1 << 1;
        const DPAD_UP = 1 << 2;
        const DPAD_DOWN = 1 << 3;
        const DPAD_LEFT = 1 << 4;
        const DPAD_RIGHT = 1 << 5;
    }
}

impl Keys {
    /// Map a DOM `KeyboardEvent.key` value to a game key
    pub fn from_dom_key(key: &str) -> Option<Keys> {
        match key {
            "ArrowLeft" => Some(Keys::LEFT),
            "ArrowRight" => Some(Keys::RIGHT),
            "ArrowUp" => Some(Keys::UP),
            "ArrowDown" => Some(Keys::DOWN),
            "a" | "A" => Some(Keys::A),
            "d" | "D" => Some(Keys::D),
            "w" | "W" => Some(Keys::W),
            "s" | "S" => Some(Keys::S),
            "Enter" => Some(Keys::ENTER),
            " " => Some(Keys::SPACE),
            "Escape" => Some(Keys::ESCAPE),
            _ => None,
        }
    }
}

impl Buttons {
    /// Map a W3C standard-gamepad button index to a game button
    pub fn from_standard_index(index: u32) -> Option<Buttons> {
        match index {
            0 => Some(Buttons::SOUTH),
            9 => Some(Buttons::START),
            12 => Some(Buttons::DPAD_UP),
            13 => Some(Buttons::DPAD_DOWN),
            14 => Some(Buttons::DPAD_LEFT),
            15 => Some(Buttons::DPAD_RIGHT),
            _ => None,
        }
    }
}

/// Opaque controller identifier handed out by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerId(pub u32);

/// Read-only view of the input devices for one tick
pub trait InputSnapshot {
    /// Whether any of `key` is currently held
    fn is_pressed(&self, key: Keys) -> bool;
    /// Whether any of `key` went down since the previous tick
    fn is_just_pressed(&self, key: Keys) -> bool;
    /// Controllers currently connected
    fn connected_controllers(&self) -> Vec<ControllerId>;
    /// Whether any of `button` went down on controller `id` since the previous tick
    fn is_button_just_pressed(&self, id: ControllerId, button: Buttons) -> bool;

    /// Whether any connected controller pressed `button` this tick
    fn any_button_just_pressed(&self, button: Buttons) -> bool {
        self.connected_controllers()
            .into_iter()
            .any(|id| self.is_button_just_pressed(id, button))
    }
}

/// Per-controller button edges for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerInput {
    pub id: ControllerId,
    pub just_pressed: Buttons,
}

/// Concrete input snapshot (deterministic, built by the platform layer)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keys held this tick
    pub held: Keys,
    /// Keys pressed since the previous tick
    pub pressed: Keys,
    /// Connected controllers and their button edges
    pub controllers: Vec<ControllerInput>,
}

impl TickInput {
    /// Snapshot with only held keys
    pub fn holding(keys: Keys) -> Self {
        Self {
            held: keys,
            ..Default::default()
        }
    }

    /// Snapshot with a key that was just pressed (and is therefore held)
    pub fn tapping(keys: Keys) -> Self {
        Self {
            held: keys,
            pressed: keys,
            ..Default::default()
        }
    }

    /// Add a controller and the buttons it just pressed
    pub fn with_controller(mut self, id: ControllerId, just_pressed: Buttons) -> Self {
        self.set_controller(id, just_pressed);
        self
    }

    /// Record edges for a controller, replacing any previous entry for it
    pub fn set_controller(&mut self, id: ControllerId, just_pressed: Buttons) {
        if let Some(existing) = self.controllers.iter_mut().find(|c| c.id == id) {
            existing.just_pressed = just_pressed;
        } else {
            self.controllers.push(ControllerInput { id, just_pressed });
        }
    }

    /// Drop one-shot state after the first substep of a frame
    pub fn clear_edges(&mut self) {
        self.pressed = Keys::empty();
        for controller in &mut self.controllers {
            controller.just_pressed = Buttons::empty();
        }
    }
}

impl InputSnapshot for TickInput {
    fn is_pressed(&self, key: Keys) -> bool {
        self.held.intersects(key)
    }

    fn is_just_pressed(&self, key: Keys) -> bool {
        self.pressed.intersects(key)
    }

    fn connected_controllers(&self) -> Vec<ControllerId> {
        self.controllers.iter().map(|c| c.id).collect()
    }

    fn is_button_just_pressed(&self, id: ControllerId, button: Buttons) -> bool {
        self.controllers
            .iter()
            .any(|c| c.id == id && c.just_pressed.intersects(button))
    }
}

/// Keyboard state accumulated from key events between frames
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: Keys,
    pressed: Keys,
}

impl KeyboardState {
    /// Key went down; auto-repeat events must not be reported as presses
    pub fn key_down(&mut self, key: Keys, repeat: bool) {
        if !repeat && !self.held.contains(key) {
            self.pressed |= key;
        }
        self.held |= key;
    }

    pub fn key_up(&mut self, key: Keys) {
        self.held.remove(key);
    }

    /// Release everything (window lost focus)
    pub fn release_all(&mut self) {
        self.held = Keys::empty();
    }

    /// Take the keys pressed since the last call, plus what is held now
    pub fn take_frame(&mut self) -> (Keys, Keys) {
        let pressed = std::mem::take(&mut self.pressed);
        (self.held, pressed)
    }
}

/// Turns polled controller button states into just-pressed edges
#[derive(Debug, Clone, Default)]
pub struct ButtonEdges {
    previous: Vec<(ControllerId, Buttons)>,
}

impl ButtonEdges {
    /// Feed the buttons held on every connected controller this frame.
    ///
    /// Returns each controller with the buttons that went down since the
    /// last poll. Controllers missing from `polled` are forgotten, so a
    /// reconnect starts from a clean slate.
    pub fn update(&mut self, polled: &[(ControllerId, Buttons)]) -> Vec<ControllerInput> {
        let edges = polled
            .iter()
            .map(|&(id, held)| {
                let before = self
                    .previous
                    .iter()
                    .find(|(prev_id, _)| *prev_id == id)
                    .map(|&(_, b)| b)
                    .unwrap_or_default();
                let just_pressed = held.difference(before);
                for button in just_pressed.iter() {
                    log::debug!("Button {:?} pressed on controller {}", button, id.0);
                }
                ControllerInput { id, just_pressed }
            })
            .collect();
        self.previous = polled.to_vec();
        edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_match_either_key() {
        let input = TickInput::holding(Keys::A);
        assert!(input.is_pressed(Keys::MOVE_LEFT));
        assert!(!input.is_pressed(Keys::MOVE_RIGHT));
        assert!(!input.is_just_pressed(Keys::MOVE_LEFT));
    }

    #[test]
    fn test_controller_edges_are_per_controller() {
        let input = TickInput::default()
            .with_controller(ControllerId(0), Buttons::empty())
            .with_controller(ControllerId(3), Buttons::SOUTH);

        assert_eq!(
            input.connected_controllers(),
            vec![ControllerId(0), ControllerId(3)]
        );
        assert!(!input.is_button_just_pressed(ControllerId(0), Buttons::SOUTH));
        assert!(input.is_button_just_pressed(ControllerId(3), Buttons::SOUTH));
        assert!(input.any_button_just_pressed(Buttons::SOUTH));
        assert!(!input.any_button_just_pressed(Buttons::START));
    }

    #[test]
    fn test_clear_edges_keeps_held() {
        let mut input = TickInput::tapping(Keys::RIGHT)
            .with_controller(ControllerId(1), Buttons::START);
        input.clear_edges();
        assert!(input.is_pressed(Keys::RIGHT));
        assert!(!input.is_just_pressed(Keys::RIGHT));
        assert!(!input.any_button_just_pressed(Buttons::START));
        assert_eq!(input.connected_controllers().len(), 1);
    }

    #[test]
    fn test_keyboard_ignores_repeat() {
        let mut kb = KeyboardState::default();
        kb.key_down(Keys::ENTER, false);
        kb.key_down(Keys::ENTER, true);
        assert_eq!(kb.take_frame(), (Keys::ENTER, Keys::ENTER));

        // Still held, but no new press
        kb.key_down(Keys::ENTER, true);
        assert_eq!(kb.take_frame(), (Keys::ENTER, Keys::empty()));

        kb.key_up(Keys::ENTER);
        assert_eq!(kb.take_frame(), (Keys::empty(), Keys::empty()));
    }

    #[test]
    fn test_quick_tap_between_frames_still_counts() {
        let mut kb = KeyboardState::default();
        kb.key_down(Keys::ESCAPE, false);
        kb.key_up(Keys::ESCAPE);
        assert_eq!(kb.take_frame(), (Keys::empty(), Keys::ESCAPE));
    }

    #[test]
    fn test_button_edges() {
        let pad = ControllerId(0);
        let mut edges = ButtonEdges::default();

        let first = edges.update(&[(pad, Buttons::SOUTH)]);
        assert_eq!(first[0].just_pressed, Buttons::SOUTH);

        // Held: no edge
        let second = edges.update(&[(pad, Buttons::SOUTH | Buttons::START)]);
        assert_eq!(second[0].just_pressed, Buttons::START);

        // Disconnect then reconnect with the button held counts as a press
        assert!(edges.update(&[]).is_empty());
        let again = edges.update(&[(pad, Buttons::SOUTH)]);
        assert_eq!(again[0].just_pressed, Buttons::SOUTH);
    }

    #[test]
    fn test_dom_and_gamepad_mapping() {
        assert_eq!(Keys::from_dom_key("ArrowLeft"), Some(Keys::LEFT));
        assert_eq!(Keys::from_dom_key(" "), Some(Keys::SPACE));
        assert_eq!(Keys::from_dom_key("q"), None);
        assert_eq!(Buttons::from_standard_index(9), Some(Buttons::START));
        assert_eq!(Buttons::from_standard_index(3), None);
    }
}
