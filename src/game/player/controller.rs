// Player character controller

use std::rc::Rc;

use glam::Vec2;

use super::events::{ActorId, PlayerEvent};
use super::model::{is_valid_jump_deceleration, is_valid_jump_modifier, ModelProvider};
use super::motion::{compute_velocity, AnimatorParams};
use super::state::{JumpInput, JumpState, JumpStateMachine};
use super::stats::PlayerStats;
use super::ControllerError;
use crate::engine::events::EventSink;
use crate::engine::input::FrameInput;
use crate::engine::physics::KinematicBody;

/// Everything the controller tracks between frames
#[derive(Debug, Clone)]
pub struct ControllerState {
    pub(crate) jump: JumpStateMachine,
    /// Gated, clamped movement input (y is always 0)
    pub move_input: Vec2,
    pub stats: PlayerStats,
    pub control_enabled: bool,
    /// Sprite faces left
    pub facing_flipped: bool,
}

impl ControllerState {
    pub fn new(stats: PlayerStats) -> Self {
        Self {
            jump: JumpStateMachine::new(),
            move_input: Vec2::ZERO,
            stats,
            control_enabled: true,
            facing_flipped: false,
        }
    }

    /// Read-only view of the jump lifecycle
    pub fn jump(&self) -> &JumpStateMachine {
        &self.jump
    }

    pub fn jump_state(&self) -> JumpState {
        self.jump.state()
    }
}

/// Builder wiring a controller to its collaborators.
///
/// Every collaborator is required; `build` refuses to guess defaults.
pub struct CharacterControllerBuilder<B> {
    actor: ActorId,
    stats: PlayerStats,
    control_enabled: bool,
    body: Option<B>,
    model: Option<Rc<dyn ModelProvider>>,
    events: Option<Box<dyn EventSink<PlayerEvent>>>,
}

impl<B: KinematicBody> CharacterControllerBuilder<B> {
    pub fn new() -> Self {
        Self {
            actor: 0,
            stats: PlayerStats::default(),
            control_enabled: true,
            body: None,
            model: None,
            events: None,
        }
    }

    /// Set the actor id stamped on emitted events
    pub fn actor(mut self, actor: ActorId) -> Self {
        self.actor = actor;
        self
    }

    pub fn stats(mut self, stats: PlayerStats) -> Self {
        self.stats = stats;
        self
    }

    /// Start with control disabled (cutscenes, spawn animations)
    pub fn control_enabled(mut self, enabled: bool) -> Self {
        self.control_enabled = enabled;
        self
    }

    pub fn body(mut self, body: B) -> Self {
        self.body = Some(body);
        self
    }

    pub fn model(mut self, model: Rc<dyn ModelProvider>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn events<S>(mut self, sink: S) -> Self
    where
        S: EventSink<PlayerEvent> + 'static,
    {
        self.events = Some(Box::new(sink));
        self
    }

    /// Build the controller, failing if a collaborator is missing or a tunable
    /// would make the player unable to move or jump
    pub fn build(self) -> Result<CharacterController<B>, ControllerError> {
        let body = self.body.ok_or(ControllerError::MissingBody)?;
        let model = self.model.ok_or(ControllerError::MissingModel)?;
        let events = self.events.ok_or(ControllerError::MissingEventSink)?;

        if let Some((name, value)) = self.stats.first_invalid() {
            return Err(ControllerError::InvalidStat { name, value });
        }

        let jump_modifier = model.jump_modifier();
        if !is_valid_jump_modifier(jump_modifier) {
            return Err(ControllerError::InvalidModel {
                name: "jump_modifier",
                value: jump_modifier,
            });
        }
        let jump_deceleration = model.jump_deceleration();
        if !is_valid_jump_deceleration(jump_deceleration) {
            return Err(ControllerError::InvalidModel {
                name: "jump_deceleration",
                value: jump_deceleration,
            });
        }

        let mut state = ControllerState::new(self.stats);
        state.control_enabled = self.control_enabled;

        log::debug!(
            "Controller for actor {} ready (max speed {}, take-off speed {})",
            self.actor,
            self.stats.max_speed,
            self.stats.jump_take_off_speed
        );

        Ok(CharacterController {
            actor: self.actor,
            body,
            model,
            events,
            state,
            animator: AnimatorParams::default(),
        })
    }
}

impl<B: KinematicBody> Default for CharacterControllerBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts per-frame input into jump state, velocity and lifecycle events
pub struct CharacterController<B> {
    actor: ActorId,
    body: B,
    model: Rc<dyn ModelProvider>,
    events: Box<dyn EventSink<PlayerEvent>>,
    state: ControllerState,
    animator: AnimatorParams,
}

impl<B: KinematicBody> CharacterController<B> {
    pub fn builder() -> CharacterControllerBuilder<B> {
        CharacterControllerBuilder::new()
    }

    /// Run one simulation frame.
    ///
    /// Call after sampling input and before stepping the body. Returns the
    /// jump state the frame ended in.
    pub fn update(&mut self, input: FrameInput) -> JumpState {
        let input = if self.state.control_enabled {
            input.clamped()
        } else {
            FrameInput::NEUTRAL
        };
        self.state.move_input = Vec2::new(input.horizontal, 0.0);

        let grounded_now = self.body.is_grounded();

        let jump_input = JumpInput::new(input.jump_pressed, input.jump_released);
        for event in self.state.jump.advance(jump_input, grounded_now) {
            self.events.schedule(PlayerEvent::new(self.actor, event));
        }

        let motion = compute_velocity(
            &mut self.state,
            self.body.velocity(),
            grounded_now,
            self.model.as_ref(),
        );
        self.body.set_velocity(motion.velocity);
        self.body.set_target_velocity(motion.target_velocity);
        self.animator = motion.animator;

        self.state.jump.state()
    }

    /// Enable or revoke player control. A jump in progress keeps going.
    pub fn set_control_enabled(&mut self, enabled: bool) {
        if self.state.control_enabled != enabled {
            log::info!(
                "Control {} for actor {}",
                if enabled { "enabled" } else { "disabled" },
                self.actor
            );
            self.state.control_enabled = enabled;
        }
    }

    /// Put the player back on its feet at `position`
    pub fn respawn(&mut self, position: Vec2) {
        self.state.jump.reset();
        self.state.move_input = Vec2::ZERO;
        self.body.teleport(position);
        self.body.set_target_velocity(Vec2::ZERO);
        log::info!("Actor {} respawned at {}", self.actor, position);
    }

    pub fn actor(&self) -> ActorId {
        self.actor
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn jump_state(&self) -> JumpState {
        self.state.jump.state()
    }

    pub fn control_enabled(&self) -> bool {
        self.state.control_enabled
    }

    pub fn facing_flipped(&self) -> bool {
        self.state.facing_flipped
    }

    /// Animator values computed by the last update
    pub fn animator(&self) -> AnimatorParams {
        self.animator
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    /// Mutable access for the physics step
    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::events::EventQueue;
    use crate::engine::physics::SimpleBody;
    use crate::game::player::model::PlatformerModel;
    use crate::game::player::stats::BASE_STATS;
    use approx::assert_relative_eq;

    const DT: f32 = 1.0 / 60.0;

    /// Body whose grounded flag is set by the test
    #[derive(Debug, Default)]
    struct ScriptedBody {
        grounded: bool,
        velocity: Vec2,
        target_velocity: Vec2,
        teleported_to: Option<Vec2>,
    }

    impl ScriptedBody {
        fn grounded() -> Self {
            Self {
                grounded: true,
                ..Self::default()
            }
        }
    }

    impl KinematicBody for ScriptedBody {
        fn is_grounded(&self) -> bool {
            self.grounded
        }

        fn velocity(&self) -> Vec2 {
            self.velocity
        }

        fn set_velocity(&mut self, velocity: Vec2) {
            self.velocity = velocity;
        }

        fn set_target_velocity(&mut self, target: Vec2) {
            self.target_velocity = target;
        }

        fn teleport(&mut self, position: Vec2) {
            self.teleported_to = Some(position);
            self.velocity = Vec2::ZERO;
        }
    }

    fn controller<B: KinematicBody>(body: B) -> (CharacterController<B>, EventQueue<PlayerEvent>) {
        let queue = EventQueue::new();
        let controller = CharacterController::builder()
            .actor(7)
            .body(body)
            .model(Rc::new(PlatformerModel::default()))
            .events(queue.clone())
            .build()
            .unwrap();
        (controller, queue)
    }

    /// Scripted controller already in the air
    fn in_flight() -> (CharacterController<ScriptedBody>, EventQueue<PlayerEvent>) {
        let (mut controller, queue) = controller(ScriptedBody::grounded());
        controller.update(FrameInput::jump());
        controller.body_mut().grounded = false;
        controller.update(FrameInput::NEUTRAL);
        assert_eq!(controller.jump_state(), JumpState::InFlight);
        queue.drain();
        (controller, queue)
    }

    #[test]
    fn test_build_requires_body() {
        let result = CharacterController::<ScriptedBody>::builder()
            .model(Rc::new(PlatformerModel::default()))
            .events(EventQueue::new())
            .build();
        assert!(matches!(result, Err(ControllerError::MissingBody)));
    }

    #[test]
    fn test_build_requires_model() {
        let result = CharacterController::builder()
            .body(ScriptedBody::grounded())
            .events(EventQueue::new())
            .build();
        assert!(matches!(result, Err(ControllerError::MissingModel)));
    }

    #[test]
    fn test_build_requires_event_sink() {
        let result = CharacterController::builder()
            .body(ScriptedBody::grounded())
            .model(Rc::new(PlatformerModel::default()))
            .build();
        assert!(matches!(result, Err(ControllerError::MissingEventSink)));
    }

    #[test]
    fn test_build_rejects_bad_stats() {
        let result = CharacterController::builder()
            .body(ScriptedBody::grounded())
            .model(Rc::new(PlatformerModel::default()))
            .events(EventQueue::new())
            .stats(PlayerStats {
                max_speed: 0.0,
                ..BASE_STATS
            })
            .build();
        assert!(matches!(
            result,
            Err(ControllerError::InvalidStat {
                name: "max_speed",
                ..
            })
        ));
    }

    #[test]
    fn test_build_rejects_bad_model() {
        let model = PlatformerModel {
            jump_deceleration: 1.5,
            ..PlatformerModel::default()
        };
        let result = CharacterController::builder()
            .body(ScriptedBody::grounded())
            .model(Rc::new(model))
            .events(EventQueue::new())
            .build();
        assert!(matches!(
            result,
            Err(ControllerError::InvalidModel {
                name: "jump_deceleration",
                ..
            })
        ));

        let model = PlatformerModel {
            jump_modifier: f32::NAN,
            ..PlatformerModel::default()
        };
        let result = CharacterController::builder()
            .body(ScriptedBody::grounded())
            .model(Rc::new(model))
            .events(EventQueue::new())
            .build();
        assert!(matches!(
            result,
            Err(ControllerError::InvalidModel {
                name: "jump_modifier",
                ..
            })
        ));
    }

    #[test]
    fn test_spawn_state() {
        let (controller, _) = controller(ScriptedBody::grounded());
        assert_eq!(controller.jump_state(), JumpState::Grounded);
        assert!(controller.control_enabled());
        assert_eq!(controller.actor(), 7);
        assert!(!controller.facing_flipped());
    }

    #[test]
    fn test_jump_sequence_over_two_frames() {
        let (mut controller, queue) = controller(ScriptedBody::grounded());

        assert_eq!(controller.update(FrameInput::jump()), JumpState::Jumping);
        assert_eq!(controller.state().jump().previous_state(), JumpState::PrepareToJump);
        assert_relative_eq!(controller.body().velocity.y, 7.0 * 1.5);
        assert!(queue.is_empty());

        controller.body_mut().grounded = false;
        assert_eq!(controller.update(FrameInput::NEUTRAL), JumpState::InFlight);
        assert_eq!(queue.drain(), vec![PlayerEvent::Jumped { actor: 7 }]);
    }

    #[test]
    fn test_landing_then_grounded_next_frame() {
        let (mut controller, queue) = in_flight();

        controller.body_mut().grounded = true;
        assert_eq!(controller.update(FrameInput::NEUTRAL), JumpState::Landed);
        assert_eq!(queue.drain(), vec![PlayerEvent::Landed { actor: 7 }]);

        assert_eq!(controller.update(FrameInput::NEUTRAL), JumpState::Grounded);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_release_damps_ascent_and_emits() {
        let (mut controller, queue) = in_flight();
        controller.body_mut().velocity.y = 10.0;

        controller.update(FrameInput::release());
        assert_eq!(controller.body().velocity.y, 5.0);
        assert_eq!(queue.drain(), vec![PlayerEvent::StopJump { actor: 7 }]);
    }

    #[test]
    fn test_release_while_falling_keeps_velocity() {
        let (mut controller, _) = in_flight();
        controller.body_mut().velocity.y = -3.0;

        controller.update(FrameInput::release());
        assert_eq!(controller.body().velocity.y, -3.0);
    }

    #[test]
    fn test_model_changes_apply_next_frame() {
        let model = PlatformerModel::default().shared();
        let mut controller = CharacterController::builder()
            .body(ScriptedBody::grounded())
            .model(model.clone())
            .events(EventQueue::new())
            .build()
            .unwrap();

        model.borrow_mut().jump_modifier = 2.0;
        controller.update(FrameInput::jump());
        assert_eq!(controller.body().velocity.y, 14.0);
    }

    #[test]
    fn test_live_tuned_deceleration_out_of_range_is_ignored() {
        let model = PlatformerModel::default().shared();
        let queue = EventQueue::new();
        let mut controller = CharacterController::builder()
            .body(ScriptedBody::grounded())
            .model(model.clone())
            .events(queue.clone())
            .build()
            .unwrap();
        controller.update(FrameInput::jump());
        controller.body_mut().grounded = false;
        controller.update(FrameInput::NEUTRAL);

        model.borrow_mut().jump_deceleration = 2.0;
        controller.body_mut().velocity.y = 10.0;
        controller.update(FrameInput::release());
        assert_eq!(controller.body().velocity.y, 10.0);

        // Back in range, the next short hop damps again
        model.borrow_mut().jump_deceleration = 0.5;
        controller.update(FrameInput::release());
        assert_eq!(controller.body().velocity.y, 5.0);
    }

    #[test]
    fn test_horizontal_input_sets_target_and_facing() {
        let (mut controller, _) = controller(ScriptedBody::grounded());

        controller.update(FrameInput::moving(-1.0));
        assert_eq!(controller.body().target_velocity, Vec2::new(-7.0, 0.0));
        assert!(controller.facing_flipped());

        controller.update(FrameInput::moving(0.005));
        assert!(controller.facing_flipped());
        assert_relative_eq!(controller.body().target_velocity.x, 0.035);
    }

    #[test]
    fn test_out_of_range_axis_is_clamped() {
        let (mut controller, _) = controller(ScriptedBody::grounded());
        controller.update(FrameInput::moving(5.0));
        assert_eq!(controller.body().target_velocity, Vec2::new(7.0, 0.0));
        assert_eq!(controller.state().move_input.x, 1.0);
    }

    #[test]
    fn test_disabled_control_zeroes_input_but_still_lands() {
        let (mut controller, queue) = in_flight();
        controller.set_control_enabled(false);

        controller.update(FrameInput::moving(1.0));
        assert_eq!(controller.body().target_velocity, Vec2::ZERO);
        assert_eq!(controller.jump_state(), JumpState::InFlight);

        controller.body_mut().grounded = true;
        assert_eq!(controller.update(FrameInput::moving(1.0)), JumpState::Landed);
        assert_eq!(queue.drain(), vec![PlayerEvent::Landed { actor: 7 }]);
        assert_eq!(controller.update(FrameInput::NEUTRAL), JumpState::Grounded);
    }

    #[test]
    fn test_disabled_control_ignores_jump_buttons() {
        let (mut controller, queue) = controller(ScriptedBody::grounded());
        controller.set_control_enabled(false);

        controller.update(FrameInput::new(0.0, true, true));
        assert_eq!(controller.jump_state(), JumpState::Grounded);
        assert!(queue.is_empty());

        controller.set_control_enabled(true);
        assert_eq!(controller.update(FrameInput::jump()), JumpState::Jumping);
    }

    #[test]
    fn test_grounded_without_input_is_fixed_point() {
        let (mut controller, queue) = controller(ScriptedBody::grounded());
        for _ in 0..5 {
            assert_eq!(controller.update(FrameInput::NEUTRAL), JumpState::Grounded);
        }
        assert!(queue.is_empty());
        assert_eq!(controller.body().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_animator_reflects_last_update() {
        let (mut controller, _) = controller(ScriptedBody::grounded());
        controller.body_mut().velocity.x = 7.0;
        controller.update(FrameInput::NEUTRAL);
        let animator = controller.animator();
        assert!(animator.grounded);
        assert_eq!(animator.velocity_x, 1.0);
    }

    #[test]
    fn test_respawn_resets_jump_and_teleports() {
        let (mut controller, _) = in_flight();
        controller.respawn(Vec2::new(2.0, 3.0));
        assert_eq!(controller.jump_state(), JumpState::Grounded);
        assert_eq!(controller.body().teleported_to, Some(Vec2::new(2.0, 3.0)));
        assert_eq!(controller.body().velocity, Vec2::ZERO);
    }

    #[test]
    fn test_full_jump_with_simple_body() {
        let (mut controller, queue) = controller(SimpleBody::builder().build());
        let mut states = Vec::new();

        let mut input = FrameInput::jump();
        for _ in 0..240 {
            states.push(controller.update(input));
            controller.body_mut().step(DT);
            input = FrameInput::NEUTRAL;
            if states.last() == Some(&JumpState::Grounded) && states.len() > 2 {
                break;
            }
        }

        assert_eq!(states[0], JumpState::Jumping);
        assert_eq!(states[1], JumpState::InFlight);
        assert!(states.contains(&JumpState::Landed));
        assert_eq!(states.last(), Some(&JumpState::Grounded));
        assert_eq!(
            queue.drain(),
            vec![PlayerEvent::Jumped { actor: 7 }, PlayerEvent::Landed { actor: 7 }]
        );
    }

    #[test]
    fn test_short_hop_lowers_apex() {
        fn apex(release_after: usize) -> f32 {
            let (mut controller, _) = controller(SimpleBody::builder().build());
            let mut highest: f32 = 0.0;
            for frame in 0..240 {
                let input = match frame {
                    0 => FrameInput::jump(),
                    f if f == release_after => FrameInput::release(),
                    _ => FrameInput::NEUTRAL,
                };
                controller.update(input);
                controller.body_mut().step(DT);
                highest = highest.max(controller.body().position().y);
            }
            highest
        }

        assert!(apex(5) < apex(200));
    }
}
