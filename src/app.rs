//! World assembly and the headless host loop.
//!
//! [`build_world`] inserts every resource the agent systems need and
//! registers the timer observer. [`build_schedule`] orders the systems for
//! one host frame:
//!
//! 1. `update_agent_timers` – expired timers trigger [`AgentTimerEvent`]s,
//!    handled by [`agent_timer_observer`] at the following sync point
//! 2. `update_agent_commands` / `process_agent_commands` – apply commands
//! 3. `flush_agent_messages` / `update_agent_messages` – publish engine output
//! 4. `track_agent_frames`, `play_sound_cues` – react to the output
//!
//! [`run_for`] drives the schedule with a fixed frame length, standing in for
//! the window's event loop.
//!
//! [`AgentTimerEvent`]: crate::events::timer::AgentTimerEvent

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use log::debug;

use crate::events::agent::AgentMessage;
use crate::events::command::AgentCommand;
use crate::resources::placement::AgentPlacement;
use crate::resources::playback::PlaybackEngine;
use crate::resources::soundbank::SoundBank;
use crate::resources::spriteatlas::SpriteAtlas;
use crate::resources::worldtime::WorldTime;
use crate::systems::agent::{
    flush_agent_messages, process_agent_commands, update_agent_commands, update_agent_messages,
};
use crate::systems::agenttimers::{agent_timer_observer, update_agent_timers};
use crate::systems::audio::play_sound_cues;
use crate::systems::render::{AgentFrame, track_agent_frames};
use crate::systems::time::update_world_time;

/// Create a world holding `engine` and its collaborators.
pub fn build_world(
    engine: PlaybackEngine,
    atlas: SpriteAtlas,
    sounds: SoundBank,
    placement: AgentPlacement,
) -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(AgentFrame::rest(&atlas));
    world.insert_resource(atlas);
    world.insert_resource(sounds);
    world.insert_resource(placement);
    world.insert_resource(engine);
    world.init_resource::<Messages<AgentMessage>>();
    world.init_resource::<Messages<AgentCommand>>();

    world.spawn(Observer::new(agent_timer_observer));
    // Observers must exist before the first timer fires.
    world.flush();
    world
}

pub fn build_schedule() -> Schedule {
    let mut update = Schedule::default();
    update.add_systems(
        (
            update_agent_timers,
            update_agent_commands,
            process_agent_commands,
            flush_agent_messages,
            update_agent_messages,
            (track_agent_frames, play_sound_cues),
        )
            .chain(),
    );
    update
}

/// Queue a command for the next frame.
pub fn send_command(world: &mut World, command: AgentCommand) {
    world.resource_mut::<Messages<AgentCommand>>().write(command);
}

/// Run one host frame of `frame_ms` milliseconds.
pub fn step(world: &mut World, schedule: &mut Schedule, frame_ms: f64) {
    update_world_time(world, (frame_ms / 1000.0) as f32);
    schedule.run(world);
    world.clear_trackers();
}

/// Run frames of `frame_ms` until `duration_ms` of agent time has passed.
///
/// Returns the number of frames run.
pub fn run_for(
    world: &mut World,
    schedule: &mut Schedule,
    duration_ms: f64,
    frame_ms: f64,
) -> u64 {
    let frame_ms = frame_ms.max(1.0);
    let mut frames = 0;
    let mut elapsed = 0.0;
    while elapsed < duration_ms {
        step(world, schedule, frame_ms);
        elapsed += frame_ms;
        frames += 1;
    }
    debug!("Ran {frames} frames ({elapsed:.0} ms)");
    frames
}
