// JumpLab: platformer character controller
//
// The crate is split the same way the game is driven:
// - `engine`: input adapters, kinematic body, event queue, fixed-timestep loop
// - `game`: the player controller and its jump state machine
// - `core`: small math helpers shared by both

pub mod core;
pub mod engine;
pub mod game;
