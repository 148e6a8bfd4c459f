//! Systems bridging the playback engine with the rest of the world.
//!
//! - [`process_agent_commands`] applies [`AgentCommand`]s through the
//!   [`GestureController`]
//! - [`flush_agent_messages`] moves engine output into `Messages<AgentMessage>`
//! - [`update_agent_messages`] advances the message queue so readers see this
//!   frame's messages
//!
//! Run them chained in that order, after the timer systems.

use bevy_ecs::prelude::*;
use log::warn;

use crate::controller::GestureController;
use crate::events::agent::AgentMessage;
use crate::events::command::AgentCommand;
use crate::resources::placement::AgentPlacement;
use crate::resources::playback::{PlayRequest, PlaybackEngine};

/// Apply pending agent commands in the order they were written.
///
/// Unknown animation names are logged and dropped; the engine keeps its
/// previous state.
pub fn process_agent_commands(
    mut reader: MessageReader<AgentCommand>,
    mut engine: ResMut<PlaybackEngine>,
    mut placement: ResMut<AgentPlacement>,
) {
    for command in reader.read() {
        if let AgentCommand::MoveTo(center) = command {
            placement.center = *center;
            continue;
        }

        let mut controller = GestureController::new(&mut engine, placement.center);
        let result = match command {
            AgentCommand::Play {
                name,
                right_now,
                looping,
            } => controller.play_request(
                PlayRequest::new(name.clone())
                    .right_now(*right_now)
                    .looping(*looping),
            ),
            AgentCommand::Stop { right_now } => {
                controller.stop(*right_now);
                Ok(())
            }
            AgentCommand::Activate => {
                controller.activate();
                Ok(())
            }
            AgentCommand::GestureAt(target) => controller.gesture_at(*target),
            AgentCommand::LookAt(target) => controller.look_at(*target),
            AgentCommand::Show => {
                controller.show();
                Ok(())
            }
            AgentCommand::Hide => {
                controller.hide();
                Ok(())
            }
            AgentCommand::MoveTo(_) => Ok(()),
        };
        if let Err(e) = result {
            warn!("Agent command {:?} failed: {}", command, e);
        }
    }
}

/// Write everything the engine emitted since the last frame.
pub fn flush_agent_messages(
    mut engine: ResMut<PlaybackEngine>,
    mut writer: MessageWriter<AgentMessage>,
) {
    writer.write_batch(engine.drain_messages());
}

/// Advance the ECS message queue for [`AgentMessage`].
pub fn update_agent_messages(mut messages: ResMut<Messages<AgentMessage>>) {
    messages.update();
}

/// Advance the ECS message queue for [`AgentCommand`].
pub fn update_agent_commands(mut messages: ResMut<Messages<AgentCommand>>) {
    messages.update();
}
