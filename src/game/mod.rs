//! Scoreboard engine, state and round structure

pub mod cue;
pub mod demo;
pub mod engine;
pub mod logger;
pub mod moderator;
pub mod ranking;
pub mod round;
pub mod state;
pub mod timer;

pub use cue::{BellCues, Cue, CueSink, RecordingCues, SilentCues};
pub use demo::{run_demo, DemoEndReason, DemoLoop, DemoResult};
pub use engine::{Scoreboard, ScoreboardConfig, CELEBRATION_DELAY};
pub use logger::{LogEntry, OutputFormat, ScoreLogger, VerbosityLevel};
pub use moderator::{Moderator, ModeratorAction, RandomModerator, ScriptedModerator};
pub use round::Round;
pub use state::{GameState, Theme, FINALIST_COUNT};
pub use timer::{Countdown, TaskToken, TickOutcome, TimerUrgency, DEFAULT_TIMER_SECS};
