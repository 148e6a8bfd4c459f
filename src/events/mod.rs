//! Messages and events exchanged between the engine and its host.
//!
//! Submodules:
//! - [`agent`] – engine output: frame changes, sound cues, start/stop
//! - [`command`] – requests from the presentation layer
//! - [`timer`] – expired agent timers, dispatched through an observer
pub mod agent;
pub mod command;
pub mod timer;
