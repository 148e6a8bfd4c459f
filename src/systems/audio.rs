//! Sound cue playback.
//!
//! [`play_sound_cues`] reads [`AgentMessage::SoundCue`] and hands each name to
//! the [`SoundBank`]. Cues for clips that were never loaded, or arriving while
//! sound is disabled, are dropped.

use bevy_ecs::prelude::*;
use log::{debug, trace};

use crate::events::agent::AgentMessage;
use crate::resources::soundbank::SoundBank;

pub fn play_sound_cues(mut reader: MessageReader<AgentMessage>, mut bank: ResMut<SoundBank>) {
    for message in reader.read() {
        let AgentMessage::SoundCue { name } = message else {
            continue;
        };
        if bank.play(name) {
            trace!("Played sound '{name}'");
        } else {
            debug!("Dropped sound cue '{name}'");
        }
    }
}
