//! Requests sent to the agent by the presentation layer.
//!
//! Window code, input handlers and scripts write [`AgentCommand`]s instead of
//! touching the engine directly. The
//! [`process_agent_commands`](crate::systems::agent::process_agent_commands)
//! system applies them through the
//! [`GestureController`](crate::controller::GestureController).
//!
//! Completion callbacks cannot travel through messages; callers that need one
//! use [`PlaybackEngine::play_request`](crate::resources::playback::PlaybackEngine::play_request)
//! directly.

use bevy_ecs::message::Message;

use crate::direction::ScreenPoint;

#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub enum AgentCommand {
    Play {
        name: String,
        right_now: bool,
        looping: bool,
    },
    Stop {
        right_now: bool,
    },
    Activate,
    GestureAt(ScreenPoint),
    LookAt(ScreenPoint),
    Show,
    Hide,
    /// The agent window moved; its center is now here.
    MoveTo(ScreenPoint),
}
