//! Caller-facing operations on the agent.
//!
//! [`GestureController`] borrows the engine together with the agent's
//! current screen center and exposes the operations the presentation layer
//! uses. It keeps no state of its own.

use log::{info, warn};

use crate::direction::{self, ScreenPoint};
use crate::resources::playback::{
    PlayRequest, PlaybackCallback, PlaybackEngine, PlaybackError,
};

/// Played when the agent appears.
pub const GREETING_ANIMATION: &str = "Greeting";
/// Played before the agent disappears.
pub const GOODBYE_ANIMATION: &str = "GoodBye";

pub struct GestureController<'a> {
    engine: &'a mut PlaybackEngine,
    center: ScreenPoint,
}

impl<'a> GestureController<'a> {
    pub fn new(engine: &'a mut PlaybackEngine, center: ScreenPoint) -> Self {
        Self { engine, center }
    }

    pub fn play(
        &mut self,
        name: &str,
        right_now: bool,
        callback: Option<PlaybackCallback>,
    ) -> Result<(), PlaybackError> {
        self.engine.play(name, right_now, callback)
    }

    pub fn play_request(&mut self, request: PlayRequest) -> Result<(), PlaybackError> {
        self.engine.play_request(request)
    }

    pub fn stop(&mut self, right_now: bool) {
        self.engine.request_stop(right_now);
    }

    pub fn activate(&mut self) {
        self.engine.activate();
    }

    /// Point towards `target` with one of the four `Gesture*` animations.
    pub fn gesture_at(&mut self, target: ScreenPoint) -> Result<(), PlaybackError> {
        self.activate();
        let direction = direction::resolve(self.center, target, false);
        self.engine.play(&format!("Gesture{direction}"), false, None)
    }

    /// Look towards `target` with one of the eight `Look*` animations.
    pub fn look_at(&mut self, target: ScreenPoint) -> Result<(), PlaybackError> {
        self.activate();
        let direction = direction::resolve(self.center, target, true);
        self.engine.play(&format!("Look{direction}"), false, None)
    }

    /// Make the agent visible and greet, if the agent has a greeting.
    pub fn show(&mut self) {
        info!("Showing agent");
        self.engine.set_visible(true);
        if self.engine.config().contains(GREETING_ANIMATION) {
            if let Err(e) = self.engine.play(GREETING_ANIMATION, false, None) {
                warn!("Greeting failed to start: {e}");
            }
        }
    }

    /// Say goodbye, then hide once the animation completes.
    pub fn hide(&mut self) {
        info!("Hiding agent");
        if self.engine.config().contains(GOODBYE_ANIMATION) {
            let request = PlayRequest::new(GOODBYE_ANIMATION)
                .on_complete(|engine| engine.set_visible(false));
            if let Err(e) = self.engine.play_request(request) {
                warn!("Goodbye failed to start: {e}");
            }
        } else {
            self.engine.set_visible(false);
        }
    }

    pub fn list_animations(&self) -> Vec<&str> {
        self.engine.list_animations()
    }
}
