//! Agent systems.
//!
//! Submodules overview
//! - [`agent`] – apply commands and publish engine output
//! - [`agenttimers`] – advance agent timers and dispatch expirations
//! - [`audio`] – play sound cues through the sound bank
//! - [`render`] – track the tile currently on screen
//! - [`time`] – update host time and delta

pub mod agent;
pub mod agenttimers;
pub mod audio;
pub mod render;
pub mod time;
