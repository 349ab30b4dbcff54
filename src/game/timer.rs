//! Question countdown timer
//!
//! The countdown itself is clock-free: something outside calls `tick` once
//! per second. Every `start` issues a fresh `TaskToken`; ticks carrying an
//! older token are ignored, so a superseded ticker can never touch the
//! current countdown.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default countdown length in seconds
pub const DEFAULT_TIMER_SECS: u32 = 30;

/// Generation token identifying one scheduled deferred task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskToken(u64);

impl TaskToken {
    pub fn new(generation: u64) -> Self {
        TaskToken(generation)
    }
}

/// Result of delivering one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Stale token or timer not running
    Ignored,
    /// Counted down, this many seconds remain
    Counted(u32),
    /// Reached zero and stopped itself
    Expired,
}

/// Display band for the remaining time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerUrgency {
    /// More than 10 seconds left
    Calm,
    /// 6 to 10 seconds left
    Warning,
    /// 5 seconds or less
    Critical,
}

/// Countdown state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: u32,
    duration: u32,
    running: bool,
    generation: u64,
}

impl Countdown {
    pub fn new(duration: u32) -> Self {
        Countdown {
            remaining: duration,
            duration,
            running: false,
            generation: 0,
        }
    }

    /// Seconds left on the clock
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Duration the countdown was last started with
    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start (or restart) from `duration` seconds
    ///
    /// Any previously issued token becomes stale.
    pub fn start(&mut self, duration: u32) -> TaskToken {
        self.generation += 1;
        self.duration = duration;
        self.remaining = duration;
        self.running = true;
        TaskToken(self.generation)
    }

    /// Stop counting, keeping the remaining value
    pub fn stop(&mut self) {
        self.running = false;
        self.generation += 1;
    }

    /// Stop and restore the full `duration`
    pub fn reset(&mut self, duration: u32) {
        self.stop();
        self.duration = duration;
        self.remaining = duration;
    }

    /// Deliver one elapsed second
    pub fn tick(&mut self, token: TaskToken) -> TickOutcome {
        if !self.running || token.0 != self.generation {
            return TickOutcome::Ignored;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.stop();
            TickOutcome::Expired
        } else {
            TickOutcome::Counted(self.remaining)
        }
    }

    pub fn urgency(&self) -> TimerUrgency {
        match self.remaining {
            r if r > 10 => TimerUrgency::Calm,
            r if r > 5 => TimerUrgency::Warning,
            _ => TimerUrgency::Critical,
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Countdown::new(DEFAULT_TIMER_SECS)
    }
}

/// Formats as `m:ss`
impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_to_zero() {
        let mut timer = Countdown::default();
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 30);

        let token = timer.start(30);
        for expected in (1..30).rev() {
            assert_eq!(timer.tick(token), TickOutcome::Counted(expected));
        }
        assert_eq!(timer.tick(token), TickOutcome::Expired);
        assert_eq!(timer.remaining(), 0);
        assert!(!timer.is_running());

        // Further ticks from the same ticker do nothing
        assert_eq!(timer.tick(token), TickOutcome::Ignored);
        assert_eq!(timer.remaining(), 0);
    }

    #[test]
    fn test_restart_supersedes_old_token() {
        let mut timer = Countdown::default();
        let first = timer.start(30);
        timer.tick(first);
        timer.tick(first);
        assert_eq!(timer.remaining(), 28);

        let second = timer.start(10);
        assert_ne!(first, second);
        assert_eq!(timer.remaining(), 10);
        assert_eq!(timer.tick(first), TickOutcome::Ignored);
        assert_eq!(timer.remaining(), 10);
        assert_eq!(timer.tick(second), TickOutcome::Counted(9));
    }

    #[test]
    fn test_stop_keeps_remaining() {
        let mut timer = Countdown::default();
        let token = timer.start(30);
        timer.tick(token);
        timer.stop();

        assert_eq!(timer.remaining(), 29);
        assert!(!timer.is_running());
        assert_eq!(timer.tick(token), TickOutcome::Ignored);
    }

    #[test]
    fn test_reset() {
        let mut timer = Countdown::default();
        let token = timer.start(45);
        timer.tick(token);
        timer.reset(DEFAULT_TIMER_SECS);

        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 30);
        assert_eq!(timer.duration(), 30);
    }

    #[test]
    fn test_zero_duration_expires_on_first_tick() {
        let mut timer = Countdown::default();
        let token = timer.start(0);
        assert_eq!(timer.tick(token), TickOutcome::Expired);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_display_and_urgency() {
        let mut timer = Countdown::new(75);
        assert_eq!(timer.to_string(), "1:15");
        assert_eq!(timer.urgency(), TimerUrgency::Calm);

        timer.reset(10);
        assert_eq!(timer.to_string(), "0:10");
        assert_eq!(timer.urgency(), TimerUrgency::Warning);

        timer.reset(5);
        assert_eq!(timer.to_string(), "0:05");
        assert_eq!(timer.urgency(), TimerUrgency::Critical);
    }
}
