//! One-shot timer facility for the agent.
//!
//! [`AgentTimers`] keeps a millisecond clock and a small set of pending
//! one-shot timers. The host advances the clock every frame (see
//! [`crate::systems::agenttimers::update_agent_timers`]); expired timers are
//! handed back as [`FiredTimer`]s in deadline order so the engine can react
//! to them. A timer fires at most once and a canceled timer never fires.
//!
//! The engine only ever keeps two timers alive: the frame timer of the
//! current animation and the idle trigger.

use smallvec::SmallVec;

/// Identifies a scheduled timer. Handles are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// What the engine should do when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPurpose {
    /// Advance the current animation by one frame.
    Frame,
    /// Start a random idle animation.
    Idle,
}

/// A timer that expired during [`AgentTimers::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub purpose: TimerPurpose,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    handle: TimerHandle,
    purpose: TimerPurpose,
    deadline_ms: f64,
}

/// Fired timers from one advance; at most two are ever pending.
pub type FiredTimers = SmallVec<[FiredTimer; 2]>;

#[derive(Debug, Default, Clone)]
pub struct AgentTimers {
    now_ms: f64,
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl AgentTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current facility clock in milliseconds.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Schedule a one-shot timer `delay_ms` from now.
    pub fn schedule_once(&mut self, delay_ms: u64, purpose: TimerPurpose) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.pending.push(PendingTimer {
            handle,
            purpose,
            deadline_ms: self.now_ms + delay_ms as f64,
        });
        handle
    }

    /// Cancel a timer. Unknown or already fired handles are ignored.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|timer| timer.handle != handle);
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|timer| timer.handle == handle)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Milliseconds until the earliest pending deadline.
    pub fn next_deadline_in(&self) -> Option<f64> {
        self.pending
            .iter()
            .map(|timer| (timer.deadline_ms - self.now_ms).max(0.0))
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Move the clock forward and collect every expired timer.
    ///
    /// Timers are returned by deadline, ties in scheduling order. Timers
    /// scheduled after this call returns start counting from the new clock.
    pub fn advance(&mut self, elapsed_ms: f64) -> FiredTimers {
        self.now_ms += elapsed_ms.max(0.0);
        let now = self.now_ms;

        let mut expired: Vec<PendingTimer> = Vec::new();
        self.pending.retain(|timer| {
            if timer.deadline_ms <= now {
                expired.push(*timer);
                false
            } else {
                true
            }
        });
        expired.sort_by(|a, b| {
            a.deadline_ms
                .total_cmp(&b.deadline_ms)
                .then(a.handle.cmp(&b.handle))
        });

        expired
            .into_iter()
            .map(|timer| FiredTimer {
                handle: timer.handle,
                purpose: timer.purpose,
            })
            .collect()
    }
}
