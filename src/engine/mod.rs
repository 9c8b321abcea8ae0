// Engine modules: input, physics, events, timing

pub mod events;
pub mod game_loop;
pub mod input;
pub mod physics;
