//! Countdown clock
//!
//! A monotonic integer-second countdown driven by an external periodic
//! timer. The clock never mutates game state itself: it reports the
//! outcome of each tick and emits fire-and-forget feedback events at the
//! warning thresholds, and the controller acts on those. Expiry is
//! edge-triggered: the clock reports it on the tick that lands on zero and
//! never again until it is reset.

use serde::{Deserialize, Serialize};

use crate::{FeedbackEvent, constants};

/// What a single tick amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing moved: paused, or already expired and reported
    Idle,
    /// The countdown decremented and time remains
    Running,
    /// The countdown just reached zero; reported exactly once
    Expired,
}

/// A countdown over whole seconds with pause/resume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clock {
    seconds_remaining: u32,
    total_seconds: u32,
    paused: bool,
    expiry_reported: bool,
}

impl Clock {
    /// Creates a running clock with `total_seconds` on it
    pub fn new(total_seconds: u32) -> Self {
        Self {
            seconds_remaining: total_seconds,
            total_seconds,
            paused: false,
            expiry_reported: false,
        }
    }

    /// Seconds left on the countdown
    pub fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }

    /// The full duration the countdown started from
    pub fn total_seconds(&self) -> u32 {
        self.total_seconds
    }

    /// Whether ticking is currently suspended
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Suspends ticking; the remaining time is kept, not reset
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes ticking from wherever the countdown was suspended
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flips between paused and running
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Rewinds the clock to a fresh `total_seconds`, running and unexpired
    pub fn reset(&mut self, total_seconds: u32) {
        self.seconds_remaining = total_seconds;
        self.total_seconds = total_seconds;
        self.paused = false;
        self.expiry_reported = false;
    }

    /// Advances the countdown by one tick interval
    ///
    /// Decrements while time remains and the clock is not paused. Landing
    /// on the alarm threshold emits a one-shot [`FeedbackEvent::Alarm`];
    /// every tick at or under the final-stretch threshold emits
    /// [`FeedbackEvent::Tick`]. The feedback sink is fire-and-forget and
    /// never gates the countdown itself.
    pub fn tick(&mut self, feedback: &mut impl FnMut(FeedbackEvent)) -> TickOutcome {
        if self.paused {
            return TickOutcome::Idle;
        }

        if self.seconds_remaining == 0 {
            return TickOutcome::Idle;
        }

        self.seconds_remaining -= 1;

        if self.seconds_remaining == constants::clock::ALARM_AT {
            feedback(FeedbackEvent::Alarm);
        } else if (1..=constants::clock::TICK_UNDER).contains(&self.seconds_remaining) {
            feedback(FeedbackEvent::Tick);
        }

        if self.seconds_remaining == 0 && !self.expiry_reported {
            self.expiry_reported = true;
            return TickOutcome::Expired;
        }

        TickOutcome::Running
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn drain(clock: &mut Clock) -> (Vec<FeedbackEvent>, Vec<TickOutcome>) {
        let mut events = vec![];
        let mut outcomes = vec![];
        for _ in 0..clock.total_seconds() + 3 {
            outcomes.push(clock.tick(&mut |event| events.push(event)));
        }
        (events, outcomes)
    }

    #[test]
    fn test_countdown_decrements_once_per_tick() {
        let mut clock = Clock::new(30);
        clock.tick(&mut |_| {});
        clock.tick(&mut |_| {});
        assert_eq!(clock.seconds_remaining(), 28);
        assert_eq!(clock.total_seconds(), 30);
    }

    #[test]
    fn test_pause_freezes_without_resetting() {
        let mut clock = Clock::new(30);
        clock.tick(&mut |_| {});
        clock.pause();

        assert_eq!(clock.tick(&mut |_| {}), TickOutcome::Idle);
        assert_eq!(clock.seconds_remaining(), 29);

        clock.resume();
        assert_eq!(clock.tick(&mut |_| {}), TickOutcome::Running);
        assert_eq!(clock.seconds_remaining(), 28);
    }

    #[test]
    fn test_alarm_fires_once_at_threshold() {
        let mut clock = Clock::new(12);
        let (events, _) = drain(&mut clock);

        let alarms = events
            .iter()
            .filter(|event| matches!(event, FeedbackEvent::Alarm))
            .count();
        assert_eq!(alarms, 1);
    }

    #[test]
    fn test_final_stretch_ticks() {
        let mut clock = Clock::new(7);
        let (events, _) = drain(&mut clock);

        let ticks = events
            .iter()
            .filter(|event| matches!(event, FeedbackEvent::Tick))
            .count();
        // One per remaining second in 5..=1.
        assert_eq!(ticks, 5);
    }

    #[test]
    fn test_expiry_is_edge_triggered() {
        let mut clock = Clock::new(3);
        let (_, outcomes) = drain(&mut clock);

        let expiries = outcomes
            .iter()
            .filter(|outcome| matches!(outcome, TickOutcome::Expired))
            .count();
        assert_eq!(expiries, 1);
        assert_eq!(*outcomes.last().unwrap(), TickOutcome::Idle);
        assert_eq!(clock.seconds_remaining(), 0);
    }

    #[test]
    fn test_reset_clears_expiry_edge() {
        let mut clock = Clock::new(1);
        assert_eq!(clock.tick(&mut |_| {}), TickOutcome::Expired);

        clock.reset(2);
        assert_eq!(clock.seconds_remaining(), 2);
        assert!(!clock.is_paused());
        clock.tick(&mut |_| {});
        assert_eq!(clock.tick(&mut |_| {}), TickOutcome::Expired);
    }

    #[test]
    fn test_toggle_pause() {
        let mut clock = Clock::new(5);
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }
}
