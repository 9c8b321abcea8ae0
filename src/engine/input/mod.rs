// Input handling system
//
// Every input device is reduced to the same per-frame triplet before it
// reaches the character controller:
//
// - `action`: game actions and the key bindings that trigger them
// - `axis`: keyboard / analog stick adapter
// - `swipe`: touch screen adapter (half-screen steering, vertical swipe to jump)
//
// ## Usage Example
//
// ```rust
// use jumplab::engine::input::{AxisInputAdapter, InputAdapter};
//
// let mut input = AxisInputAdapter::with_default_bindings();
//
// // In your event loop, forward keyboard events
// input.process_keyboard_event(&key_event);
//
// // Once per simulation tick, take the normalized input
// let frame = input.sample();
// controller.update(frame);
// ```

pub mod action;
pub mod axis;
pub mod swipe;

// Re-export commonly used types
pub use action::{Action, InputBindings};
pub use axis::AxisInputAdapter;
pub use swipe::{SwipeInputAdapter, TouchPhase, DEFAULT_SWIPE_DISTANCE, MAX_PENDING_TOUCHES};

use crate::core::math::clamp_axis;

/// Device-independent input for one simulation frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    /// Horizontal movement in [-1, 1]
    pub horizontal: f32,
    /// Jump went down this frame
    pub jump_pressed: bool,
    /// Jump went up this frame
    pub jump_released: bool,
}

impl FrameInput {
    /// Input with nothing held and nothing pressed
    pub const NEUTRAL: Self = Self {
        horizontal: 0.0,
        jump_pressed: false,
        jump_released: false,
    };

    pub fn new(horizontal: f32, jump_pressed: bool, jump_released: bool) -> Self {
        Self {
            horizontal,
            jump_pressed,
            jump_released,
        }
    }

    /// Horizontal movement only
    pub fn moving(horizontal: f32) -> Self {
        Self::new(horizontal, false, false)
    }

    /// Jump pressed this frame
    pub fn jump() -> Self {
        Self::new(0.0, true, false)
    }

    /// Jump released this frame
    pub fn release() -> Self {
        Self::new(0.0, false, true)
    }

    /// Same input with the axis clamped into [-1, 1]
    pub fn clamped(self) -> Self {
        Self {
            horizontal: clamp_axis(self.horizontal),
            ..self
        }
    }
}

/// A device that produces one `FrameInput` per simulation frame
pub trait InputAdapter {
    /// Produce this frame's input and clear per-frame edges.
    ///
    /// Call exactly once per simulation tick, before the controller update.
    fn sample(&mut self) -> FrameInput;

    /// Forget everything currently held or pending
    fn reset(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_is_default() {
        assert_eq!(FrameInput::NEUTRAL, FrameInput::default());
    }

    #[test]
    fn test_constructors() {
        assert!(FrameInput::jump().jump_pressed);
        assert!(FrameInput::release().jump_released);
        assert_eq!(FrameInput::moving(-0.5).horizontal, -0.5);
    }

    #[test]
    fn test_clamped_keeps_buttons() {
        let input = FrameInput::new(4.0, true, true).clamped();
        assert_eq!(input, FrameInput::new(1.0, true, true));
        assert_eq!(FrameInput::moving(f32::NAN).clamped().horizontal, 0.0);
    }
}
