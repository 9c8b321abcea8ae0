use std::rc::Rc;

use anyhow::Result;
use log::info;
use winit::{
    event::{ElementState, Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

use jumplab::engine::events::{EventDispatcher, EventQueue};
use jumplab::engine::game_loop::GameLoop;
use jumplab::engine::input::{
    Action, AxisInputAdapter, FrameInput, InputAdapter, SwipeInputAdapter, DEFAULT_SWIPE_DISTANCE,
};
use jumplab::engine::physics::SimpleBody;
use jumplab::game::player::{CharacterController, PlatformerModel, PlayerEvent, BASE_STATS};

const WINDOW_WIDTH: u32 = 1280;
const WINDOW_HEIGHT: u32 = 720;

/// Merge keyboard and touch input for one tick
fn combine(keys: FrameInput, touch: FrameInput) -> FrameInput {
    let horizontal = if keys.horizontal != 0.0 {
        keys.horizontal
    } else {
        touch.horizontal
    };
    FrameInput::new(
        horizontal,
        keys.jump_pressed || touch.jump_pressed,
        keys.jump_released || touch.jump_released,
    )
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting JumpLab...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("JumpLab")
        .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let size = window.inner_size();
    let mut keyboard = AxisInputAdapter::with_default_bindings();
    info!("Jump keys: {:?}", keyboard.bindings().keys_for(Action::Jump));

    // Swipe threshold is in physical pixels
    let mut touch = SwipeInputAdapter::new(size.width, size.height)
        .with_swipe_distance(DEFAULT_SWIPE_DISTANCE * window.scale_factor() as f32);
    info!("Swipe distance: {:.0}px", touch.swipe_distance());

    let events = EventQueue::<PlayerEvent>::new();
    let mut dispatcher = EventDispatcher::new();
    dispatcher.subscribe(|event: &PlayerEvent| match event {
        PlayerEvent::Jumped { actor } => info!("Actor {} jumped", actor),
        PlayerEvent::Landed { actor } => info!("Actor {} landed", actor),
        PlayerEvent::StopJump { actor } => info!("Actor {} released jump", actor),
    });
    info!("{} event handler(s) registered", dispatcher.handler_count());

    let mut player = CharacterController::builder()
        .actor(0)
        .stats(BASE_STATS)
        .body(SimpleBody::builder().build())
        .model(Rc::new(PlatformerModel::default()))
        .events(events.clone())
        .build()?;

    let mut game_loop = GameLoop::new();
    let dt = game_loop.fixed_timestep();

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Resized(physical_size),
                ..
            } => {
                touch.set_screen_size(physical_size.width, physical_size.height);
                info!("Window resized to {:?}", physical_size);
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if event.state == ElementState::Pressed && !event.repeat {
                    match event.physical_key {
                        PhysicalKey::Code(KeyCode::Escape) => elwt.exit(),
                        PhysicalKey::Code(KeyCode::KeyP) => game_loop.toggle_pause(),
                        PhysicalKey::Code(KeyCode::KeyC) => {
                            let enabled = !player.control_enabled();
                            player.set_control_enabled(enabled);
                        }
                        _ => {}
                    }
                }
                keyboard.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::Touch(touch_event),
                ..
            } => {
                touch.process_winit_touch(&touch_event);
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                // Nothing is drawn; the title bar shows the jump state
                let jump = player.state().jump();
                window.set_title(&format!(
                    "JumpLab - {} ({} frames) at {}",
                    jump.state().animation_name(),
                    jump.frames_in_state(),
                    player.body().position()
                ));
            }
            Event::AboutToWait => {
                for _ in 0..game_loop.begin_frame() {
                    let input = combine(keyboard.sample(), touch.sample());
                    player.update(input);
                    player.body_mut().step(dt);
                }
                dispatcher.dispatch(&events);

                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
