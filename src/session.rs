//! Real-time driver for the scoreboard
//!
//! `Session` owns a `Scoreboard` and turns its deferred work into tokio
//! tasks: an interval ticker per countdown and a one-shot sleep per
//! celebration. Those tasks never touch the engine. They post `Deferred`
//! events to a channel, and the session's single owner drains the channel
//! with `next_deferred` + `handle`, so every mutation still happens on one
//! logical thread of control.
//!
//! Starting a countdown aborts the previous ticker, a reset aborts both
//! tasks, and dropping the session aborts whatever is left.

use crate::core::{AwardId, TeamId};
use crate::game::cue::CueSink;
use crate::game::engine::Scoreboard;
use crate::game::logger::ScoreLogger;
use crate::game::state::{GameState, Theme};
use crate::game::timer::{TaskToken, TickOutcome};
use crate::Result;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};

/// Countdown resolution
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Work scheduled by a background task, delivered to the owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// One second elapsed on the countdown identified by the token
    TimerTick(TaskToken),
    /// The celebration delay identified by the token ran out
    ClearCelebration(TaskToken),
}

/// What handling a deferred event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredOutcome {
    Tick(TickOutcome),
    CelebrationCleared,
    /// Superseded by a newer operation
    Stale,
}

/// Scoreboard plus its scheduled background tasks
pub struct Session<C: CueSink> {
    engine: Scoreboard<C>,
    tx: mpsc::UnboundedSender<Deferred>,
    rx: mpsc::UnboundedReceiver<Deferred>,
    ticker: Option<JoinHandle<()>>,
    celebration: Option<JoinHandle<()>>,
}

impl<C: CueSink> Session<C> {
    /// Wrap an engine. Must be called inside a tokio runtime.
    pub fn new(engine: Scoreboard<C>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Session {
            engine,
            tx,
            rx,
            ticker: None,
            celebration: None,
        }
    }

    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    pub fn engine(&self) -> &Scoreboard<C> {
        &self.engine
    }

    pub fn logger(&self) -> &ScoreLogger {
        self.engine.logger()
    }

    pub fn logger_mut(&mut self) -> &mut ScoreLogger {
        self.engine.logger_mut()
    }

    pub fn cues(&self) -> &C {
        self.engine.cues()
    }

    /// Is a countdown ticker task alive?
    pub fn has_ticker(&self) -> bool {
        self.ticker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Is a celebration clear still scheduled?
    pub fn has_pending_celebration(&self) -> bool {
        self.celebration.as_ref().is_some_and(|h| !h.is_finished())
            || self.engine.pending_celebration().is_some()
    }

    pub fn award_points(&mut self, team_id: TeamId, points: u32) -> Result<AwardId> {
        self.engine.award_points(team_id, points)
    }

    pub fn award_selected(&mut self, team_id: TeamId) -> Result<AwardId> {
        self.engine.award_selected(team_id)
    }

    pub fn advance_to_finals(&mut self) -> Result<()> {
        self.engine.advance_to_finals()
    }

    /// Finish the game and schedule the celebration clear
    pub fn finish_game(&mut self) -> Result<()> {
        let token = self.engine.finish_game()?;
        let delay = self.engine.config().celebration_delay;
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            time::sleep(delay).await;
            let _ = tx.send(Deferred::ClearCelebration(token));
        });
        if let Some(old) = self.celebration.replace(handle) {
            old.abort();
        }
        Ok(())
    }

    /// Reset the game and cancel every scheduled task
    pub fn reset_game(&mut self) {
        self.cancel_tasks();
        self.engine.reset_game();
    }

    pub fn set_selected_points(&mut self, points: u32) -> Result<()> {
        self.engine.set_selected_points(points)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.engine.toggle_theme()
    }

    /// Start (or restart) the countdown and its ticker
    pub fn start_timer(&mut self, duration_secs: u32) -> Result<()> {
        let token = self.engine.start_timer(duration_secs)?;
        let tx = self.tx.clone();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(TICK_PERIOD);
            interval.tick().await; // first tick completes immediately
            loop {
                interval.tick().await;
                if tx.send(Deferred::TimerTick(token)).is_err() {
                    break;
                }
            }
        });
        if let Some(old) = self.ticker.replace(handle) {
            old.abort();
        }
        Ok(())
    }

    /// Start the countdown from the configured default
    pub fn start_default_timer(&mut self) -> Result<()> {
        self.start_timer(self.engine.config().timer_secs)
    }

    pub fn stop_timer(&mut self) {
        self.engine.stop_timer();
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    /// Wait for the next deferred event
    pub async fn next_deferred(&mut self) -> Option<Deferred> {
        self.rx.recv().await
    }

    /// Apply a deferred event to the engine
    pub fn handle(&mut self, event: Deferred) -> DeferredOutcome {
        match event {
            Deferred::TimerTick(token) => {
                let outcome = self.engine.tick(token);
                if !self.engine.state().timer.is_running() {
                    if let Some(handle) = self.ticker.take() {
                        handle.abort();
                    }
                }
                match outcome {
                    TickOutcome::Ignored => DeferredOutcome::Stale,
                    other => DeferredOutcome::Tick(other),
                }
            }
            Deferred::ClearCelebration(token) => {
                if self.engine.clear_celebration(token) {
                    self.celebration = None;
                    DeferredOutcome::CelebrationCleared
                } else {
                    DeferredOutcome::Stale
                }
            }
        }
    }

    /// Process deferred events for `duration`, then return
    pub async fn run_for(&mut self, duration: Duration) {
        let deadline = Instant::now() + duration;
        loop {
            let event = tokio::select! {
                event = self.rx.recv() => event,
                _ = time::sleep_until(deadline) => None,
            };
            match event {
                Some(event) => {
                    self.handle(event);
                }
                None => break,
            }
        }
    }

    fn cancel_tasks(&mut self) {
        for handle in [self.ticker.take(), self.celebration.take()].into_iter().flatten() {
            handle.abort();
        }
    }
}

impl<C: CueSink> Drop for Session<C> {
    fn drop(&mut self) {
        self.cancel_tasks();
    }
}
