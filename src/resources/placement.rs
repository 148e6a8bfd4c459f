//! Where the agent is on screen.
//!
//! The window layer owns positioning; it reports the center of the agent's
//! sprite here so gestures and looks can be aimed relative to it.

use bevy_ecs::prelude::Resource;

use crate::direction::ScreenPoint;

/// Screen-space center of the agent sprite.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentPlacement {
    pub center: ScreenPoint,
}

impl AgentPlacement {
    pub fn new(center: ScreenPoint) -> Self {
        Self { center }
    }
}
