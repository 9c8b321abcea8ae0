// Keyboard / analog stick adapter

use super::action::{Action, InputBindings};
use super::{FrameInput, InputAdapter};
use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Turns key presses (and optionally an analog stick) into `FrameInput`.
///
/// Digital keys give a horizontal axis of -1, 0 or 1. When an analog value is
/// set it takes over the axis; jump still comes from the keys.
#[derive(Debug)]
pub struct AxisInputAdapter {
    bindings: InputBindings,

    /// Keys currently held down
    held_keys: HashSet<KeyCode>,

    /// Jump went down since the last sample
    jump_pressed: bool,

    /// Jump went up since the last sample
    jump_released: bool,

    /// Analog stick value overriding the digital axis
    analog_axis: Option<f32>,
}

impl AxisInputAdapter {
    pub fn new(bindings: InputBindings) -> Self {
        for action in [Action::MoveLeft, Action::MoveRight, Action::Jump] {
            if !bindings.has_binding(action) {
                log::warn!("No key bound to {:?}", action);
            }
        }

        Self {
            bindings,
            held_keys: HashSet::new(),
            jump_pressed: false,
            jump_released: false,
            analog_axis: None,
        }
    }

    pub fn with_default_bindings() -> Self {
        Self::new(InputBindings::defaults())
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only physical key codes are bound
        if let PhysicalKey::Code(key_code) = event.physical_key {
            match event.state {
                ElementState::Pressed if !event.repeat => self.press_key(key_code),
                ElementState::Pressed => {}
                ElementState::Released => self.release_key(key_code),
            }
        }
    }

    /// Register a key going down
    pub fn press_key(&mut self, key: KeyCode) {
        let Some(action) = self.bindings.get_action(key) else {
            return;
        };
        let was_held = self.is_held(action);
        if self.held_keys.insert(key) && action == Action::Jump && !was_held {
            self.jump_pressed = true;
        }
    }

    /// Register a key going up
    pub fn release_key(&mut self, key: KeyCode) {
        if !self.held_keys.remove(&key) {
            return;
        }
        if self.bindings.get_action(key) == Some(Action::Jump) && !self.is_held(Action::Jump) {
            self.jump_released = true;
        }
    }

    /// Set or clear the analog stick value
    pub fn set_analog_axis(&mut self, value: Option<f32>) {
        self.analog_axis = value;
    }

    /// Whether any key bound to `action` is held
    pub fn is_held(&self, action: Action) -> bool {
        self.held_keys
            .iter()
            .any(|key| self.bindings.get_action(*key) == Some(action))
    }

    /// Current horizontal axis without consuming edges
    pub fn horizontal(&self) -> f32 {
        if let Some(value) = self.analog_axis {
            return value;
        }

        let mut horizontal = 0.0;
        if self.is_held(Action::MoveLeft) {
            horizontal -= 1.0;
        }
        if self.is_held(Action::MoveRight) {
            horizontal += 1.0;
        }
        horizontal
    }

    pub fn bindings(&self) -> &InputBindings {
        &self.bindings
    }
}

impl Default for AxisInputAdapter {
    fn default() -> Self {
        Self::with_default_bindings()
    }
}

impl InputAdapter for AxisInputAdapter {
    fn sample(&mut self) -> FrameInput {
        let input = FrameInput::new(self.horizontal(), self.jump_pressed, self.jump_released);
        self.jump_pressed = false;
        self.jump_released = false;
        input.clamped()
    }

    fn reset(&mut self) {
        self.held_keys.clear();
        self.jump_pressed = false;
        self.jump_released = false;
        self.analog_axis = None;
    }
}
