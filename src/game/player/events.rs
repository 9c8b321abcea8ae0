// Player lifecycle events handed to the event scheduler

use super::state::JumpEvent;

/// Identifies the actor an event is about
pub type ActorId = u32;

/// Event scheduled by a `CharacterController`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerEvent {
    /// The player left the ground after a jump
    Jumped { actor: ActorId },
    /// The player touched down after a jump
    Landed { actor: ActorId },
    /// The player released jump early
    StopJump { actor: ActorId },
}

impl PlayerEvent {
    pub fn new(actor: ActorId, event: JumpEvent) -> Self {
        match event {
            JumpEvent::Jumped => Self::Jumped { actor },
            JumpEvent::Landed => Self::Landed { actor },
            JumpEvent::StopJump => Self::StopJump { actor },
        }
    }

    pub fn actor(&self) -> ActorId {
        match *self {
            Self::Jumped { actor } | Self::Landed { actor } | Self::StopJump { actor } => actor,
        }
    }

    pub fn kind(&self) -> JumpEvent {
        match self {
            Self::Jumped { .. } => JumpEvent::Jumped,
            Self::Landed { .. } => JumpEvent::Landed,
            Self::StopJump { .. } => JumpEvent::StopJump,
        }
    }
}
