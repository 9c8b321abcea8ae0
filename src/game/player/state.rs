// Jump state machine

/// Where the player is in the jump lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JumpState {
    /// Standing or walking on the ground
    #[default]
    Grounded,
    /// Jump accepted, take-off happens on this same frame
    PrepareToJump,
    /// Take-off velocity applied, waiting for the body to leave the ground
    Jumping,
    /// Airborne
    InFlight,
    /// Touched down this frame
    Landed,
}

impl JumpState {
    /// Check if a new jump may start from this state
    pub fn can_jump(&self) -> bool {
        matches!(self, Self::Grounded)
    }

    /// Get the animation name for this state
    pub fn animation_name(&self) -> &'static str {
        match self {
            Self::Grounded => "idle",
            Self::PrepareToJump => "jump_prepare",
            Self::Jumping => "jump",
            Self::InFlight => "in_flight",
            Self::Landed => "land",
        }
    }
}

/// Lifecycle notifications produced by `JumpStateMachine::advance`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpEvent {
    /// The body left the ground after a jump
    Jumped,
    /// The body touched down after a jump
    Landed,
    /// Jump input released, the ascent should be cut short
    StopJump,
}

/// Jump-related input for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpInput {
    pub pressed: bool,
    pub released: bool,
}

impl JumpInput {
    pub fn new(pressed: bool, released: bool) -> Self {
        Self { pressed, released }
    }
}

/// Five-state jump lifecycle.
///
/// Only `advance` moves the machine between states. The two request flags are
/// read and cleared by the velocity step that runs right after it.
#[derive(Debug, Clone)]
pub struct JumpStateMachine {
    current_state: JumpState,
    previous_state: JumpState,
    frames_in_state: u32,
    jump_requested: bool,
    stop_jump_requested: bool,
}

impl Default for JumpStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl JumpStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: JumpState::Grounded,
            previous_state: JumpState::Grounded,
            frames_in_state: 0,
            jump_requested: false,
            stop_jump_requested: false,
        }
    }

    /// Get the current state
    pub fn state(&self) -> JumpState {
        self.current_state
    }

    /// Get the state held before the last transition
    pub fn previous_state(&self) -> JumpState {
        self.previous_state
    }

    /// Number of completed frames spent in the current state
    pub fn frames_in_state(&self) -> u32 {
        self.frames_in_state
    }

    /// Take-off velocity should be applied this frame
    pub fn jump_requested(&self) -> bool {
        self.jump_requested
    }

    /// The ascent should be damped this frame
    pub fn stop_jump_requested(&self) -> bool {
        self.stop_jump_requested
    }

    pub(crate) fn clear_jump_request(&mut self) {
        self.jump_requested = false;
    }

    pub(crate) fn clear_stop_jump_request(&mut self) {
        self.stop_jump_requested = false;
    }

    fn transition(&mut self, new_state: JumpState) {
        if self.current_state != new_state {
            log::debug!("Jump state {:?} -> {:?}", self.current_state, new_state);
            self.previous_state = self.current_state;
            self.current_state = new_state;
            self.frames_in_state = 0;
        }
    }

    /// Run one frame of the lifecycle.
    ///
    /// Input is applied first (a press from `Grounded`, otherwise a release),
    /// then the state advances on its own or on `grounded_now`. Returns the
    /// events raised this frame in the order they happened.
    pub fn advance(&mut self, input: JumpInput, grounded_now: bool) -> Vec<JumpEvent> {
        let mut events = Vec::new();
        let entered = self.current_state;

        self.jump_requested = false;

        if self.current_state.can_jump() && input.pressed {
            self.transition(JumpState::PrepareToJump);
        } else if input.released {
            self.stop_jump_requested = true;
            events.push(JumpEvent::StopJump);
        }

        match self.current_state {
            JumpState::PrepareToJump => {
                self.transition(JumpState::Jumping);
                self.jump_requested = true;
                self.stop_jump_requested = false;
            }
            JumpState::Jumping => {
                if !grounded_now {
                    events.push(JumpEvent::Jumped);
                    self.transition(JumpState::InFlight);
                }
            }
            JumpState::InFlight => {
                if grounded_now {
                    events.push(JumpEvent::Landed);
                    self.transition(JumpState::Landed);
                }
            }
            JumpState::Landed => self.transition(JumpState::Grounded),
            JumpState::Grounded => {}
        }

        if self.current_state == entered {
            self.frames_in_state = self.frames_in_state.saturating_add(1);
            if self.current_state == JumpState::Jumping {
                log::trace!(
                    "Still grounded {} frames after take-off",
                    self.frames_in_state
                );
            }
        }

        events
    }

    /// Drop any jump in progress and return to `Grounded`
    pub fn reset(&mut self) {
        self.transition(JumpState::Grounded);
        self.frames_in_state = 0;
        self.jump_requested = false;
        self.stop_jump_requested = false;
    }
}
