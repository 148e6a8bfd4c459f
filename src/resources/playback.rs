//! Animation playback engine.
//!
//! [`PlaybackEngine`] is the state machine behind the agent. It owns the
//! current animation and frame, the request queue, the completion callback
//! slot, the idle trigger and the timer facility. Everything that changes
//! playback state goes through its methods; collaborators only see the
//! [`AgentMessage`]s it emits.
//!
//! # States
//!
//! - **Dormant** – nothing is playing. A `play` starts immediately.
//! - **Playing** – an animation advances one frame per frame-timer expiry.
//!   New `play` requests are queued.
//! - **Stopping** – a flag on top of Playing. The animation leaves through
//!   the next frame that declares an `exitBranch`, or ends naturally.
//!
//! # Frame Advancement
//!
//! On each frame-timer expiry [`PlaybackEngine::tick`] picks the next frame:
//!
//! 1. A pending graceful stop and an `exitBranch` on the current frame: jump
//!    there and clear the stop request.
//! 2. Otherwise, if the frame has `branching`: draw `0..=99` and walk the
//!    branches in order, subtracting weights until one claims the draw.
//!    Unclaimed draws fall through to step 3.
//! 3. Otherwise the next frame in sequence.
//!
//! Running past the last frame wraps for looping requests and terminates
//! otherwise. Termination fires the completion callback exactly once, arms
//! the idle trigger for a visible agent and starts the next queued request.

use std::fmt;

use bevy_ecs::prelude::Resource;
use log::{debug, info, warn};
use thiserror::Error;

use crate::events::agent::AgentMessage;
use crate::resources::agenttimers::{AgentTimers, TimerHandle, TimerPurpose};
use crate::resources::animationconfig::{AnimationConfig, Branch};
use crate::resources::idlescheduler::{IdleScheduler, choose_idle_animation};
use crate::resources::playbackqueue::{PlaybackQueue, QueuedPlayback};
use crate::resources::randomsource::{FastRandSource, RandomSource};

/// Called once when the animation it was attached to completes.
///
/// The engine is passed in so a callback can chain further requests.
pub type PlaybackCallback = Box<dyn FnOnce(&mut PlaybackEngine) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("unknown animation '{0}'")]
    UnknownAnimation(String),
}

/// Snapshot of the playback state machine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub current_animation: Option<String>,
    /// Only meaningful while `playing`.
    pub current_frame: usize,
    pub playing: bool,
    pub stopping: bool,
    pub looping: bool,
}

/// A full play request.
///
/// ```ignore
/// engine.play_request(
///     PlayRequest::new("Greeting").on_complete(|engine| {
///         engine.set_visible(true);
///     }),
/// )?;
/// ```
pub struct PlayRequest {
    pub name: String,
    pub right_now: bool,
    pub looping: bool,
    pub callback: Option<PlaybackCallback>,
}

impl PlayRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            right_now: false,
            looping: false,
            callback: None,
        }
    }

    /// Discard the current animation and the queue before starting.
    pub fn right_now(mut self, right_now: bool) -> Self {
        self.right_now = right_now;
        self
    }

    /// Wrap to the first frame instead of terminating.
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    pub fn on_complete(
        mut self,
        callback: impl FnOnce(&mut PlaybackEngine) + Send + Sync + 'static,
    ) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for PlayRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayRequest")
            .field("name", &self.name)
            .field("right_now", &self.right_now)
            .field("looping", &self.looping)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// Resolve a weighted branch for a draw in `0..=99`.
///
/// Branches are walked in declared order; the first whose weight exceeds the
/// remaining draw wins. Returns `None` when the weights are exhausted, in
/// which case the caller advances by one frame.
pub fn resolve_branch(branches: &[Branch], draw: u32) -> Option<usize> {
    let mut remaining = draw;
    for branch in branches {
        if remaining < branch.weight {
            return Some(branch.frame_index);
        }
        remaining -= branch.weight;
    }
    None
}

#[derive(Resource)]
pub struct PlaybackEngine {
    config: AnimationConfig,
    state: PlaybackState,
    pending_callback: Option<PlaybackCallback>,
    queue: PlaybackQueue,
    idle: IdleScheduler,
    timers: AgentTimers,
    frame_timer: Option<TimerHandle>,
    rng: Box<dyn RandomSource>,
    outbox: Vec<AgentMessage>,
    visible: bool,
}

impl fmt::Debug for PlaybackEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlaybackEngine")
            .field("state", &self.state)
            .field("pending_callback", &self.pending_callback.is_some())
            .field("queue", &self.queue)
            .field("idle", &self.idle)
            .field("frame_timer", &self.frame_timer)
            .field("visible", &self.visible)
            .finish()
    }
}

impl PlaybackEngine {
    /// Dormant, visible engine drawing from a fresh `fastrand` generator.
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            state: PlaybackState::default(),
            pending_callback: None,
            queue: PlaybackQueue::new(),
            idle: IdleScheduler::new(),
            timers: AgentTimers::new(),
            frame_timer: None,
            rng: Box::new(FastRandSource::new()),
            outbox: Vec::new(),
            visible: true,
        }
    }

    pub fn with_random_source(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    // --- requests ---

    /// Play `name`, queueing it behind the current animation unless
    /// `right_now` is set.
    pub fn play(
        &mut self,
        name: &str,
        right_now: bool,
        callback: Option<PlaybackCallback>,
    ) -> Result<(), PlaybackError> {
        self.play_request(PlayRequest {
            name: name.to_string(),
            right_now,
            looping: false,
            callback,
        })
    }

    pub fn play_request(&mut self, request: PlayRequest) -> Result<(), PlaybackError> {
        if !self.config.contains(&request.name) {
            warn!("Rejected play request for unknown animation '{}'", request.name);
            return Err(PlaybackError::UnknownAnimation(request.name));
        }

        self.idle.cancel(&mut self.timers);
        if request.right_now {
            self.hard_stop();
        }

        if self.state.playing {
            debug!("Queueing '{}' behind {:?}", request.name, self.state.current_animation);
            self.queue.enqueue(QueuedPlayback {
                name: request.name,
                looping: request.looping,
                callback: request.callback,
            });
        } else {
            self.start(request.name, request.looping, request.callback);
        }
        Ok(())
    }

    /// Stop playback. The queue is always discarded.
    ///
    /// A graceful stop only sets the stopping flag; the animation ends at its
    /// next exit branch or at its natural end, and its callback still fires.
    /// An immediate stop drops the callback, emits `PlaybackStopped` and goes
    /// dormant now, even if nothing was playing.
    pub fn request_stop(&mut self, right_now: bool) {
        self.queue.clear();
        if right_now {
            self.hard_stop();
        } else if self.state.playing {
            debug!("Graceful stop requested for {:?}", self.state.current_animation);
            self.state.stopping = true;
        }
    }

    /// Leave ambient mode: cancel the idle trigger and ask the current
    /// animation to wind down.
    pub fn activate(&mut self) {
        self.idle.cancel(&mut self.timers);
        if self.state.playing {
            self.state.stopping = true;
        }
    }

    /// Play a random `Idle*` animation. Does nothing if the agent has none.
    pub fn play_random_idle(&mut self) {
        let Some(name) = choose_idle_animation(&self.config, self.rng.as_mut()) else {
            debug!("No idle animations to play");
            return;
        };
        let name = name.to_string();
        info!("Playing idle animation '{name}'");
        if let Err(e) = self.play(&name, false, None) {
            warn!("Idle animation failed to start: {e}");
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.idle.cancel(&mut self.timers);
        }
    }

    // --- timers ---

    /// Advance the timer clock and dispatch every expired timer in order.
    pub fn advance(&mut self, elapsed_ms: f64) {
        let fired = self.timers.advance(elapsed_ms);
        for timer in fired {
            self.on_timer(timer.handle);
        }
    }

    /// React to an expired timer. Handles that are no longer armed are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) {
        if self.frame_timer == Some(handle) {
            self.frame_timer = None;
            self.tick();
        } else if self.idle.take_if_armed(handle) {
            self.play_random_idle();
        } else {
            debug!("Ignoring stale timer {}", handle.id());
        }
    }

    /// Advance the current animation by one frame.
    pub fn tick(&mut self) {
        let Some(name) = self.state.current_animation.clone() else {
            return;
        };
        let config = self.config.clone();
        let Some(animation) = config.animation(&name) else {
            return;
        };
        let current = self.state.current_frame;
        let Some(frame) = animation.frame(current) else {
            return;
        };

        let mut next = current + 1;
        match frame.exit_branch {
            Some(exit) if self.state.stopping => {
                // The wind-down runs to the end; it never wraps.
                self.state.stopping = false;
                self.state.looping = false;
                next = exit;
            }
            _ if frame.has_branching() => {
                let draw = self.rng.int_in_range(0, 99);
                if let Some(target) = resolve_branch(&frame.branching, draw) {
                    next = target;
                }
            }
            _ => {}
        }

        if next >= animation.len() {
            if self.state.looping && !self.state.stopping {
                next = 0;
            } else {
                info!("Animation '{name}' complete");
                self.terminate();
                return;
            }
        }

        self.enter_frame(next, true);
    }

    // --- queries ---

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn list_animations(&self) -> Vec<&str> {
        self.config.names()
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.playing
    }

    pub fn is_stopping(&self) -> bool {
        self.state.stopping
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn current_animation(&self) -> Option<&str> {
        self.state.current_animation.as_deref()
    }

    pub fn current_frame(&self) -> Option<usize> {
        self.state.playing.then_some(self.state.current_frame)
    }

    /// Sprite of the current frame, or `None` when dormant.
    pub fn current_sprite_index(&self) -> Option<i32> {
        let name = self.state.current_animation.as_deref()?;
        let frame = self.config.animation(name)?.frame(self.state.current_frame)?;
        Some(frame.sprite_index)
    }

    pub fn has_pending_callback(&self) -> bool {
        self.pending_callback.is_some()
    }

    pub fn queued_animations(&self) -> Vec<&str> {
        self.queue.names().collect()
    }

    pub fn idle_armed(&self) -> bool {
        self.idle.is_armed()
    }

    pub fn frame_timer_armed(&self) -> bool {
        self.frame_timer.is_some()
    }

    pub fn timers(&self) -> &AgentTimers {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut AgentTimers {
        &mut self.timers
    }

    /// Take every message emitted since the last drain.
    pub fn drain_messages(&mut self) -> Vec<AgentMessage> {
        std::mem::take(&mut self.outbox)
    }

    // --- internals ---

    fn start(&mut self, name: String, looping: bool, callback: Option<PlaybackCallback>) {
        self.idle.cancel(&mut self.timers);
        self.cancel_frame_timer();
        info!("Playing '{name}'{}", if looping { " (looping)" } else { "" });

        self.state = PlaybackState {
            current_animation: Some(name.clone()),
            current_frame: 0,
            playing: true,
            stopping: false,
            looping,
        };
        self.pending_callback = callback;
        self.outbox
            .push(AgentMessage::PlaybackStarted { animation: name });
        self.enter_frame(0, false);
    }

    /// Make `index` current, emit its output and arm the frame timer.
    fn enter_frame(&mut self, index: usize, with_sound: bool) {
        let Some(name) = self.state.current_animation.as_deref() else {
            return;
        };
        let Some(frame) = self
            .config
            .animation(name)
            .and_then(|animation| animation.frame(index))
        else {
            return;
        };
        let sprite_index = frame.sprite_index;
        let duration_ms = frame.duration_ms;
        let sound = if with_sound { frame.sound.clone() } else { None };

        self.state.current_frame = index;
        debug!("Frame {index} of '{name}' (sprite {sprite_index}, {duration_ms} ms)");
        self.outbox.push(AgentMessage::FrameChanged { sprite_index });
        if let Some(name) = sound {
            self.outbox.push(AgentMessage::SoundCue { name });
        }
        self.frame_timer = Some(self.timers.schedule_once(duration_ms, TimerPurpose::Frame));
    }

    /// Go dormant now, without firing the callback. Runs the termination
    /// path even when nothing is playing, so the idle trigger is re-armed.
    fn hard_stop(&mut self) {
        self.queue.clear();
        self.pending_callback = None;
        info!("Stopping {:?} immediately", self.state.current_animation);
        self.terminate();
    }

    fn terminate(&mut self) {
        self.cancel_frame_timer();
        self.state = PlaybackState::default();
        self.outbox.push(AgentMessage::PlaybackStopped);

        if let Some(callback) = self.pending_callback.take() {
            callback(self);
        }
        // A callback that started something new owns what happens next.
        if self.state.playing {
            return;
        }

        self.idle
            .arm(self.visible, &mut self.timers, self.rng.as_mut());
        if let Some(next) = self.queue.dequeue() {
            debug!("Dequeued '{}'", next.name);
            self.start(next.name, next.looping, next.callback);
        }
    }

    fn cancel_frame_timer(&mut self) {
        if let Some(handle) = self.frame_timer.take() {
            self.timers.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::randomsource::ScriptedRandom;

    fn branches(pairs: &[(u32, usize)]) -> Vec<Branch> {
        pairs
            .iter()
            .map(|&(weight, frame_index)| Branch {
                weight,
                frame_index,
            })
            .collect()
    }

    fn engine(json: &str) -> PlaybackEngine {
        PlaybackEngine::new(AnimationConfig::from_json_str(json).unwrap())
            .with_random_source(ScriptedRandom::constant(0))
    }

    const TWO_FRAMES: &str = r#"{ "framesize": [4, 4], "animations": {
        "A": { "frames": [ { "duration": 100, "spriteIndex": 1 }, { "duration": 50, "spriteIndex": 2, "sound": "beep" } ] }
    } }"#;

    #[test]
    fn branch_walk_follows_cumulative_weights() {
        let table = branches(&[(30, 5), (70, 6)]);
        for draw in 0..30 {
            assert_eq!(resolve_branch(&table, draw), Some(5));
        }
        for draw in 30..100 {
            assert_eq!(resolve_branch(&table, draw), Some(6));
        }
    }

    #[test]
    fn unclaimed_draw_falls_through() {
        let table = branches(&[(20, 1), (30, 2)]);
        assert_eq!(resolve_branch(&table, 49), Some(2));
        assert_eq!(resolve_branch(&table, 50), None);
        assert_eq!(resolve_branch(&table, 80), None);
    }

    #[test]
    fn oversubscribed_weights_first_branch_wins() {
        let table = branches(&[(80, 1), (80, 2)]);
        assert_eq!(resolve_branch(&table, 79), Some(1));
        assert_eq!(resolve_branch(&table, 99), Some(2));
    }

    #[test]
    fn start_emits_started_then_first_frame_without_sound() {
        let mut engine = engine(TWO_FRAMES);
        engine.play("A", false, None).unwrap();
        assert_eq!(
            engine.drain_messages(),
            vec![
                AgentMessage::PlaybackStarted {
                    animation: "A".to_string()
                },
                AgentMessage::FrameChanged { sprite_index: 1 },
            ]
        );
        assert_eq!(engine.current_frame(), Some(0));
        assert!(engine.frame_timer_armed());
    }

    #[test]
    fn tick_emits_frame_then_sound() {
        let mut engine = engine(TWO_FRAMES);
        engine.play("A", false, None).unwrap();
        engine.drain_messages();

        engine.advance(100.0);
        assert_eq!(
            engine.drain_messages(),
            vec![
                AgentMessage::FrameChanged { sprite_index: 2 },
                AgentMessage::SoundCue {
                    name: "beep".to_string()
                },
            ]
        );
        assert_eq!(engine.current_frame(), Some(1));
    }

    #[test]
    fn frame_timer_respects_duration() {
        let mut engine = engine(TWO_FRAMES);
        engine.play("A", false, None).unwrap();
        engine.advance(99.0);
        assert_eq!(engine.current_frame(), Some(0));
        engine.advance(1.0);
        assert_eq!(engine.current_frame(), Some(1));
    }

    #[test]
    fn unknown_animation_leaves_state_untouched() {
        let mut engine = engine(TWO_FRAMES);
        engine.play("A", false, None).unwrap();
        engine.drain_messages();
        let before = engine.state().clone();

        let err = engine.play("Missing", true, None).unwrap_err();
        assert_eq!(err, PlaybackError::UnknownAnimation("Missing".to_string()));
        assert_eq!(engine.state(), &before);
        assert!(engine.drain_messages().is_empty());
    }

    #[test]
    fn hard_stop_while_dormant_still_goes_dormant() {
        let mut engine = engine(TWO_FRAMES);
        engine.activate();
        assert!(!engine.idle_armed());

        engine.request_stop(true);
        assert_eq!(engine.drain_messages(), vec![AgentMessage::PlaybackStopped]);
        assert!(!engine.is_playing());
        assert!(engine.idle_armed());
    }

    #[test]
    fn immediate_play_while_dormant_stops_first() {
        let mut engine = engine(TWO_FRAMES);
        engine.play("A", true, None).unwrap();
        assert_eq!(
            engine.drain_messages(),
            vec![
                AgentMessage::PlaybackStopped,
                AgentMessage::PlaybackStarted {
                    animation: "A".to_string()
                },
                AgentMessage::FrameChanged { sprite_index: 1 },
            ]
        );
        assert!(!engine.idle_armed());
    }

    #[test]
    fn hidden_hard_stop_does_not_arm_idle() {
        let mut engine = engine(TWO_FRAMES).with_visible(false);
        engine.request_stop(true);
        assert_eq!(engine.drain_messages(), vec![AgentMessage::PlaybackStopped]);
        assert!(!engine.idle_armed());
    }

    #[test]
    fn graceful_stop_while_dormant_is_noop() {
        let mut engine = engine(TWO_FRAMES);
        engine.request_stop(false);
        assert!(!engine.is_stopping());
        assert!(engine.drain_messages().is_empty());
        assert!(!engine.idle_armed());
    }

    #[test]
    fn hidden_agent_does_not_arm_idle() {
        let mut engine = engine(TWO_FRAMES).with_visible(false);
        engine.play("A", false, None).unwrap();
        engine.advance(100.0);
        engine.advance(50.0);
        assert!(!engine.is_playing());
        assert!(!engine.idle_armed());
    }

    #[test]
    fn hiding_cancels_idle_trigger() {
        let mut engine = engine(TWO_FRAMES);
        engine.play("A", false, None).unwrap();
        engine.request_stop(true);
        assert!(engine.idle_armed());
        engine.set_visible(false);
        assert!(!engine.idle_armed());
        assert_eq!(engine.timers().pending_count(), 0);
    }

    #[test]
    fn current_sprite_tracks_frame() {
        let mut engine = engine(TWO_FRAMES);
        assert_eq!(engine.current_sprite_index(), None);
        engine.play("A", false, None).unwrap();
        assert_eq!(engine.current_sprite_index(), Some(1));
        engine.advance(100.0);
        assert_eq!(engine.current_sprite_index(), Some(2));
    }
}
