//! Messages pushed by the playback engine to its collaborators.
//!
//! The engine never draws or plays audio itself. It queues [`AgentMessage`]s
//! in emission order; the host drains them into the ECS message queue where
//! the renderer and sound systems read them.
//!
//! # Related
//!
//! - [`crate::systems::agent::flush_agent_messages`] – moves engine output into `Messages<AgentMessage>`
//! - [`crate::systems::render::track_agent_frames`] – follows `FrameChanged`
//! - [`crate::systems::audio::play_sound_cues`] – follows `SoundCue`

use bevy_ecs::message::Message;

/// Engine output, in the order it happened.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum AgentMessage {
    /// Draw the atlas tile at this index, or nothing for `-1`.
    FrameChanged { sprite_index: i32 },
    /// Play the preloaded clip with this name.
    SoundCue { name: String },
    /// An animation became active.
    PlaybackStarted { animation: String },
    /// The engine went dormant.
    PlaybackStopped,
}
