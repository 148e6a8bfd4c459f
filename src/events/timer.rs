//! Agent timer expiration events.
//!
//! When one of the agent's one-shot timers expires, an [`AgentTimerEvent`] is
//! triggered. The observer hands the handle back to the playback engine,
//! which advances the current animation or starts an idle animation.
//!
//! # Related
//!
//! - [`crate::resources::agenttimers::AgentTimers`] – the timer facility
//! - [`crate::systems::agenttimers::update_agent_timers`] – the system that emits these events
//! - [`crate::systems::agenttimers::agent_timer_observer`] – the observer that handles them

use bevy_ecs::prelude::*;

use crate::resources::agenttimers::{TimerHandle, TimerPurpose};

/// Event emitted when an agent timer expires.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentTimerEvent {
    /// The expired timer.
    pub handle: TimerHandle,
    /// Whether it was the frame timer or the idle trigger.
    pub purpose: TimerPurpose,
}
