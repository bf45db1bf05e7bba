use std::collections::HashSet;

use crate::coords::Vec2;

use super::{Key, MouseButton};

/// Input state for the window, updated by the runtime and read by scenes.
///
/// Held-state queries (`key_down`, `button_down`) reflect the current
/// frame; transition queries (`key_pressed`, `key_released`,
/// `button_pressed`) cover events since the previous frame and are cleared
/// by the runtime after each frame is consumed.
#[derive(Debug, Default)]
pub struct InputState {
    keys_down: HashSet<Key>,
    keys_pressed: HashSet<Key>,
    keys_released: HashSet<Key>,

    buttons_down: HashSet<MouseButton>,
    buttons_pressed: HashSet<MouseButton>,

    pointer: Option<Vec2>,
    wheel: f32,
    focused: bool,
}

impl InputState {
    // ── queries (scene-facing) ────────────────────────────────────────────

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether `key` went down since the previous frame.
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Whether `key` went up since the previous frame.
    pub fn key_released(&self, key: Key) -> bool {
        self.keys_released.contains(&key)
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Whether `button` went down since the previous frame.
    pub fn button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// Pointer position in logical pixels, if the pointer is over the
    /// window.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Vertical scroll accumulated this frame, in lines (positive = away
    /// from the user).
    pub fn wheel(&self) -> f32 {
        self.wheel
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    // ── mutation (runtime-facing) ─────────────────────────────────────────

    pub(crate) fn on_key_down(&mut self, key: Key) {
        if self.keys_down.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub(crate) fn on_key_up(&mut self, key: Key) {
        if self.keys_down.remove(&key) {
            self.keys_released.insert(key);
        }
    }

    pub(crate) fn on_button_down(&mut self, button: MouseButton) {
        if self.buttons_down.insert(button) {
            self.buttons_pressed.insert(button);
        }
    }

    pub(crate) fn on_button_up(&mut self, button: MouseButton) {
        self.buttons_down.remove(&button);
    }

    pub(crate) fn on_pointer_moved(&mut self, pos: Vec2) {
        self.pointer = Some(pos);
    }

    pub(crate) fn on_pointer_left(&mut self) {
        self.pointer = None;
    }

    pub(crate) fn on_wheel(&mut self, lines: f32) {
        self.wheel += lines;
    }

    pub(crate) fn on_focus_changed(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            // Clear "down" sets on focus loss; a release delivered to
            // another window would otherwise leave keys stuck here.
            self.keys_down.clear();
            self.buttons_down.clear();
        }
    }

    /// Clears per-frame transition state after the frame is consumed.
    pub(crate) fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.buttons_pressed.clear();
        self.wheel = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_lasts_one_frame_down_persists() {
        let mut input = InputState::default();
        input.on_key_down(Key::Space);
        assert!(input.key_pressed(Key::Space));
        assert!(input.key_down(Key::Space));

        input.end_frame();
        assert!(!input.key_pressed(Key::Space));
        assert!(input.key_down(Key::Space));
    }

    #[test]
    fn key_repeat_does_not_retrigger_pressed() {
        let mut input = InputState::default();
        input.on_key_down(Key::A);
        input.end_frame();
        // Platform key repeat delivers another "down" without an "up".
        input.on_key_down(Key::A);
        assert!(!input.key_pressed(Key::A));
    }

    #[test]
    fn released_is_reported_for_one_frame() {
        let mut input = InputState::default();
        input.on_key_down(Key::W);
        input.end_frame();
        input.on_key_up(Key::W);
        assert!(input.key_released(Key::W));
        assert!(!input.key_down(Key::W));

        input.end_frame();
        assert!(!input.key_released(Key::W));
    }

    #[test]
    fn wheel_accumulates_within_a_frame() {
        let mut input = InputState::default();
        input.on_wheel(1.0);
        input.on_wheel(0.5);
        assert_eq!(input.wheel(), 1.5);
        input.end_frame();
        assert_eq!(input.wheel(), 0.0);
    }

    #[test]
    fn focus_loss_clears_held_state() {
        let mut input = InputState::default();
        input.on_key_down(Key::D);
        input.on_button_down(MouseButton::Left);
        input.on_focus_changed(false);
        assert!(!input.key_down(Key::D));
        assert!(!input.button_down(MouseButton::Left));
    }
}
