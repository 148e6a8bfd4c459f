//! Desk agent library.
//!
//! Playback engine for animated desktop agents: sprite-atlas characters that
//! greet, idle, gesture and look around. Exposes the engine, its ECS
//! resources, systems and messages for hosts and integration tests.

pub mod app;
pub mod controller;
pub mod direction;
pub mod events;
pub mod resources;
pub mod systems;
