//! Agent timer systems.
//!
//! - [`update_agent_timers`] – advances the engine's timer clock and emits
//!   events for expired timers
//! - [`agent_timer_observer`] – hands each expired timer back to the engine
//!
//! # System Flow
//!
//! Each frame:
//!
//! 1. `update_agent_timers` advances [`AgentTimers`](crate::resources::agenttimers::AgentTimers)
//!    by the frame delta
//! 2. Every expired timer is triggered as an [`AgentTimerEvent`], in deadline order
//! 3. `agent_timer_observer` calls [`PlaybackEngine::on_timer`], which ticks
//!    the current animation or starts an idle animation
//! 4. Timers re-armed by the engine count from the new clock and fire on a
//!    later frame

use bevy_ecs::prelude::*;
use log::trace;

use crate::events::timer::AgentTimerEvent;
use crate::resources::playback::PlaybackEngine;
use crate::resources::worldtime::WorldTime;

/// Advance the agent's timers and trigger an event per expired timer.
pub fn update_agent_timers(
    world_time: Res<WorldTime>,
    mut engine: ResMut<PlaybackEngine>,
    mut commands: Commands,
) {
    let fired = engine.timers_mut().advance(world_time.delta_ms());
    for timer in fired {
        trace!("Agent timer {} expired ({:?})", timer.handle.id(), timer.purpose);
        commands.trigger(AgentTimerEvent {
            handle: timer.handle,
            purpose: timer.purpose,
        });
    }
}

/// Observer that dispatches an expired timer into the playback engine.
pub fn agent_timer_observer(trigger: On<AgentTimerEvent>, mut engine: ResMut<PlaybackEngine>) {
    let event = trigger.event();
    engine.on_timer(event.handle);
}
