// Shared gameplay model
//
// Tunables that belong to the level rather than to a single player. The
// controller holds a handle to a provider and reads it every frame, so a
// change made between frames applies on the next one.

use std::cell::RefCell;
use std::rc::Rc;

/// Source of the jump tunables read once per frame
pub trait ModelProvider {
    /// Multiplier on the player's take-off speed
    fn jump_modifier(&self) -> f32;

    /// Factor applied to upward velocity when jump is released early, in (0, 1]
    fn jump_deceleration(&self) -> f32;
}

/// Take-off multiplier must be finite and positive
pub fn is_valid_jump_modifier(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Short-hop factor must be in (0, 1]; 1.0 disables damping
pub fn is_valid_jump_deceleration(value: f32) -> bool {
    value > 0.0 && value <= 1.0
}

/// Default platformer tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlatformerModel {
    pub jump_modifier: f32,
    pub jump_deceleration: f32,
}

impl Default for PlatformerModel {
    fn default() -> Self {
        Self {
            jump_modifier: 1.5,
            jump_deceleration: 0.5,
        }
    }
}

impl PlatformerModel {
    /// Wrap the model so it can be tuned while a controller reads it
    pub fn shared(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }
}

impl ModelProvider for PlatformerModel {
    fn jump_modifier(&self) -> f32 {
        self.jump_modifier
    }

    fn jump_deceleration(&self) -> f32 {
        self.jump_deceleration
    }
}

impl<T: ModelProvider> ModelProvider for RefCell<T> {
    fn jump_modifier(&self) -> f32 {
        self.borrow().jump_modifier()
    }

    fn jump_deceleration(&self) -> f32 {
        self.borrow().jump_deceleration()
    }
}
