//! Headless presentation of the agent.
//!
//! The window layer is out of process; this module keeps the one piece of
//! drawing state the agent has, the tile currently on screen, up to date
//! from the engine's [`AgentMessage`]s.

use bevy_ecs::prelude::*;
use log::debug;

use crate::events::agent::AgentMessage;
use crate::resources::spriteatlas::{SpriteAtlas, TileRect};

/// Tile the agent currently shows.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentFrame {
    /// `-1` draws nothing.
    pub sprite_index: i32,
    pub rect: Option<TileRect>,
    /// Number of frame changes applied so far.
    pub changes: u64,
}

impl AgentFrame {
    /// The rest pose, sprite 0.
    pub fn rest(atlas: &SpriteAtlas) -> Self {
        Self {
            sprite_index: 0,
            rect: atlas.tile_rect(0),
            changes: 0,
        }
    }

    fn show(&mut self, atlas: &SpriteAtlas, sprite_index: i32) {
        self.sprite_index = sprite_index;
        self.rect = atlas.tile_rect(sprite_index);
        self.changes += 1;
    }
}

/// Follow `FrameChanged` messages; fall back to the rest pose when playback
/// stops.
pub fn track_agent_frames(
    mut reader: MessageReader<AgentMessage>,
    atlas: Res<SpriteAtlas>,
    mut frame: ResMut<AgentFrame>,
) {
    for message in reader.read() {
        match message {
            AgentMessage::FrameChanged { sprite_index } => {
                frame.show(&atlas, *sprite_index);
                debug!("Drawing sprite {} at {:?}", sprite_index, frame.rect);
            }
            AgentMessage::PlaybackStopped => {
                frame.show(&atlas, 0);
            }
            AgentMessage::SoundCue { .. } | AgentMessage::PlaybackStarted { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        let mut world = World::new();
        let atlas = SpriteAtlas::new(10, 20, 30);
        world.insert_resource(AgentFrame::rest(&atlas));
        world.insert_resource(atlas);
        world.init_resource::<Messages<AgentMessage>>();
        world
    }

    #[test]
    fn follows_last_frame_and_rests_after_stop() {
        let mut world = world();
        world
            .resource_mut::<Messages<AgentMessage>>()
            .write(AgentMessage::FrameChanged { sprite_index: 4 });

        let mut schedule = Schedule::default();
        schedule.add_systems(track_agent_frames);
        schedule.run(&mut world);

        let frame = *world.resource::<AgentFrame>();
        assert_eq!(frame.sprite_index, 4);
        assert_eq!(
            frame.rect,
            Some(TileRect {
                x: 10,
                y: 20,
                width: 10,
                height: 20
            })
        );

        world
            .resource_mut::<Messages<AgentMessage>>()
            .write(AgentMessage::PlaybackStopped);
        schedule.run(&mut world);
        let frame = *world.resource::<AgentFrame>();
        assert_eq!(frame.sprite_index, 0);
        assert_eq!(frame.changes, 2);
    }

    #[test]
    fn empty_sprite_has_no_rect() {
        let mut world = world();
        world
            .resource_mut::<Messages<AgentMessage>>()
            .write(AgentMessage::FrameChanged { sprite_index: -1 });
        let mut schedule = Schedule::default();
        schedule.add_systems(track_agent_frames);
        schedule.run(&mut world);
        assert_eq!(world.resource::<AgentFrame>().rect, None);
    }
}
