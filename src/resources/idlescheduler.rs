//! Idle trigger for a dormant, visible agent.
//!
//! After every termination the engine arms the scheduler. When the one-shot
//! timer fires, the engine plays a random animation whose name starts with
//! `Idle`. Any play request cancels the pending trigger first.

use log::debug;

use crate::resources::agenttimers::{AgentTimers, TimerHandle, TimerPurpose};
use crate::resources::animationconfig::AnimationConfig;
use crate::resources::randomsource::RandomSource;

/// Shortest delay before an idle animation kicks in.
pub const IDLE_DELAY_MIN_MS: u32 = 5000;
/// Longest delay before an idle animation kicks in.
pub const IDLE_DELAY_MAX_MS: u32 = 15000;

#[derive(Debug, Default)]
pub struct IdleScheduler {
    pending: Option<TimerHandle>,
}

impl IdleScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the idle trigger if the agent is visible.
    ///
    /// Re-arming replaces any trigger that is still pending.
    pub fn arm(&mut self, visible: bool, timers: &mut AgentTimers, rng: &mut dyn RandomSource) {
        if !visible {
            return;
        }
        self.cancel(timers);
        let delay = rng.int_in_range(IDLE_DELAY_MIN_MS, IDLE_DELAY_MAX_MS);
        debug!("Idle trigger armed in {delay} ms");
        self.pending = Some(timers.schedule_once(u64::from(delay), TimerPurpose::Idle));
    }

    pub fn cancel(&mut self, timers: &mut AgentTimers) {
        if let Some(handle) = self.pending.take() {
            timers.cancel(handle);
        }
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the trigger if `handle` is the one currently armed.
    pub fn take_if_armed(&mut self, handle: TimerHandle) -> bool {
        if self.pending == Some(handle) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}

/// Pick a random `Idle*` animation, or `None` when the agent has none.
pub fn choose_idle_animation<'a>(
    config: &'a AnimationConfig,
    rng: &mut dyn RandomSource,
) -> Option<&'a str> {
    let candidates = config.idle_names();
    if candidates.is_empty() {
        return None;
    }
    Some(candidates[rng.index(candidates.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::randomsource::ScriptedRandom;

    fn config(names: &[&str]) -> AnimationConfig {
        let animations: Vec<String> = names
            .iter()
            .map(|name| format!(r#""{name}": {{ "frames": [ {{ "duration": 10 }} ] }}"#))
            .collect();
        AnimationConfig::from_json_str(&format!(
            r#"{{ "framesize": [8, 8], "animations": {{ {} }} }}"#,
            animations.join(",")
        ))
        .unwrap()
    }

    #[test]
    fn arm_when_hidden_does_nothing() {
        let mut timers = AgentTimers::new();
        let mut idle = IdleScheduler::new();
        idle.arm(false, &mut timers, &mut ScriptedRandom::constant(0));
        assert!(!idle.is_armed());
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn arm_uses_random_delay_in_range() {
        let mut timers = AgentTimers::new();
        let mut idle = IdleScheduler::new();
        idle.arm(true, &mut timers, &mut ScriptedRandom::constant(2500));
        assert!(idle.is_armed());

        assert!(timers.advance(7499.0).is_empty());
        let fired = timers.advance(1.0);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].purpose, TimerPurpose::Idle);
        assert!(idle.take_if_armed(fired[0].handle));
        assert!(!idle.is_armed());
    }

    #[test]
    fn rearm_replaces_pending_trigger() {
        let mut timers = AgentTimers::new();
        let mut idle = IdleScheduler::new();
        let mut rng = ScriptedRandom::constant(0);
        idle.arm(true, &mut timers, &mut rng);
        idle.arm(true, &mut timers, &mut rng);
        assert_eq!(timers.pending_count(), 1);
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut timers = AgentTimers::new();
        let mut idle = IdleScheduler::new();
        idle.arm(true, &mut timers, &mut ScriptedRandom::constant(0));
        idle.cancel(&mut timers);
        idle.cancel(&mut timers);
        assert!(!idle.is_armed());
        assert_eq!(timers.pending_count(), 0);
    }

    #[test]
    fn chooses_only_idle_prefixed_animations() {
        let config = config(&["Wave", "IdleBlink", "Idle1_1", "Greeting"]);
        let mut rng = ScriptedRandom::new(vec![0, 1, 2]);
        assert_eq!(choose_idle_animation(&config, &mut rng), Some("Idle1_1"));
        assert_eq!(choose_idle_animation(&config, &mut rng), Some("IdleBlink"));
        assert_eq!(choose_idle_animation(&config, &mut rng), Some("Idle1_1"));
    }

    #[test]
    fn no_idle_candidates_is_none() {
        let config = config(&["Wave"]);
        assert_eq!(
            choose_idle_animation(&config, &mut ScriptedRandom::constant(0)),
            None
        );
    }
}
