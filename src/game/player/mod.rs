// Player character
//
// - Jump lifecycle state machine
// - Velocity computation run right after it
// - Controller tying both to a kinematic body, a model and an event sink
// - Player stats and the shared platformer model

pub mod controller;
pub mod events;
pub mod model;
pub mod motion;
pub mod state;
pub mod stats;

// Re-export commonly used types
pub use controller::{CharacterController, CharacterControllerBuilder, ControllerState};
pub use events::{ActorId, PlayerEvent};
pub use model::{ModelProvider, PlatformerModel};
pub use motion::{compute_velocity, AnimatorParams, Motion, FACING_DEAD_ZONE};
pub use state::{JumpEvent, JumpInput, JumpState, JumpStateMachine};
pub use stats::{PlayerStats, BASE_STATS};

/// Controller construction errors
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Controller has no kinematic body")]
    MissingBody,

    #[error("Controller has no model provider")]
    MissingModel,

    #[error("Controller has no event sink")]
    MissingEventSink,

    #[error("Invalid player stat {name}: {value}")]
    InvalidStat { name: &'static str, value: f32 },

    #[error("Invalid model value {name}: {value}")]
    InvalidModel { name: &'static str, value: f32 },
}
