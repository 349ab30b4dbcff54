//! Line-oriented moderator console
//!
//! The console is the presentation layer: it turns typed commands into
//! engine operations and enforces the click rules the engine leaves to its
//! surface (no scoring once finished, only finalists during the finals,
//! no advancing before anyone has scored).

use crate::core::{is_standard, TeamId};
use crate::game::cue::CueSink;
use crate::game::logger::OutputFormat;
use crate::game::timer::TickOutcome;
use crate::game::{GameState, Round};
use crate::session::{DeferredOutcome, Session};
use crate::{Result, TriviaError};
use std::fmt::Write as FmtWrite;

/// A parsed console command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Award points to a team (selected value unless given)
    Award { team: String, points: Option<u32> },
    /// Change the selected point value
    Points(u32),
    /// Advance the top teams to the finals
    Finals,
    /// Finish the game
    Finish,
    /// Reset to the seed roster
    Reset,
    /// Start the countdown (default length unless given)
    TimerStart(Option<u32>),
    TimerStop,
    Theme,
    /// Print the leaderboard
    Board,
    /// Print the top N teams
    Top(usize),
    Stats,
    History,
    Help,
    Quit,
}

fn parse_number<T: std::str::FromStr>(s: &str, what: &str) -> Result<T> {
    s.parse::<T>()
        .map_err(|_| TriviaError::ParseError(format!("invalid {what} '{s}'")))
}

impl Command {
    /// Parse one input line; blank lines yield `None`
    ///
    /// A bare team id or name is shorthand for `award <team>`.
    pub fn parse(line: &str) -> Result<Option<Command>> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&head, rest)) = words.split_first() else {
            return Ok(None);
        };

        let command = match (head.to_lowercase().as_str(), rest) {
            ("award" | "a", []) => {
                return Err(TriviaError::ParseError("award needs a team".to_string()))
            }
            ("award" | "a", [team]) => Command::Award {
                team: team.to_string(),
                points: None,
            },
            ("award" | "a", [team @ .., last]) => match last.parse::<u32>() {
                Ok(points) => Command::Award {
                    team: team.join(" "),
                    points: Some(points),
                },
                Err(_) => Command::Award {
                    team: rest.join(" "),
                    points: None,
                },
            },
            ("points" | "p", [value]) => Command::Points(parse_number(value, "point value")?),
            ("finals", []) => Command::Finals,
            ("finish", []) => Command::Finish,
            ("reset", []) => Command::Reset,
            ("timer" | "t", ["start"]) | ("timer" | "t", []) => Command::TimerStart(None),
            ("timer" | "t", ["start", secs]) => {
                Command::TimerStart(Some(parse_number(secs, "duration")?))
            }
            ("timer" | "t", ["stop"]) => Command::TimerStop,
            ("theme", []) => Command::Theme,
            ("board" | "b", []) => Command::Board,
            ("top", []) => Command::Top(4),
            ("top", [n]) => Command::Top(parse_number(n, "count")?),
            ("stats", []) => Command::Stats,
            ("history" | "log", []) => Command::History,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit" | "q", []) => Command::Quit,
            _ if !KEYWORDS.contains(&head.to_lowercase().as_str()) => Command::Award {
                team: words.join(" "),
                points: None,
            },
            _ => return Err(TriviaError::ParseError(format!("bad arguments for '{head}'"))),
        };
        Ok(Some(command))
    }
}

const KEYWORDS: &[&str] = &[
    "award", "a", "points", "p", "finals", "finish", "reset", "timer", "t", "theme", "board",
    "b", "top", "stats", "history", "log", "help", "?", "quit", "exit", "q",
];

/// Result of executing a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to show the moderator (may be empty)
    Show(String),
    Quit,
}

/// Console state: just the rendering format
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    format: OutputFormat,
}

impl Console {
    pub fn new(format: OutputFormat) -> Self {
        Console { format }
    }

    /// Parse and execute one input line
    pub fn execute_line<C: CueSink>(&self, session: &mut Session<C>, line: &str) -> Reply {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(session, command),
            Ok(None) => Reply::Show(String::new()),
            Err(err) => Reply::Show(format!("error: {err} (type 'help')")),
        }
    }

    pub fn execute<C: CueSink>(&self, session: &mut Session<C>, command: Command) -> Reply {
        match self.dispatch(session, command) {
            Ok(reply) => reply,
            Err(err) => Reply::Show(format!("error: {err}")),
        }
    }

    fn dispatch<C: CueSink>(&self, session: &mut Session<C>, command: Command) -> Result<Reply> {
        let text = match command {
            Command::Award { team, points } => {
                let team_id = resolve_team(session.state(), &team)?;
                if let Some(reason) = click_blocked(session.state(), team_id) {
                    return Ok(Reply::Show(reason));
                }
                let points = points.unwrap_or(session.state().selected_points);
                session.award_points(team_id, points)?;
                let team = session.state().team(team_id)?;
                format!(
                    "{} {} +{} -> {} (rank {})",
                    team.emoji, team.name, points, team.score, team.rank
                )
            }
            Command::Points(points) => {
                session.set_selected_points(points)?;
                if is_standard(points) {
                    format!("Selected {points} points")
                } else {
                    format!("Selected {points} points (non-standard value)")
                }
            }
            Command::Finals => {
                let state = session.state();
                if state.current_round != Round::Rubric {
                    return Err(TriviaError::WrongRound(state.current_round));
                }
                if !state.can_advance_to_finals() {
                    return Ok(Reply::Show(
                        "Finals are available once a team has scored".to_string(),
                    ));
                }
                session.advance_to_finals()?;
                self.render_finalists(session.state())
            }
            Command::Finish => {
                session.finish_game()?;
                self.render_celebration(session.state())
            }
            Command::Reset => {
                session.reset_game();
                "Game reset: seed roster restored".to_string()
            }
            Command::TimerStart(secs) => {
                match secs {
                    Some(secs) => session.start_timer(secs)?,
                    None => session.start_default_timer()?,
                }
                let timer = &session.state().timer;
                format!("Timer running: {} ({}s)", timer, timer.duration())
            }
            Command::TimerStop => {
                session.stop_timer();
                format!("Timer stopped at {}", session.state().timer)
            }
            Command::Theme => format!("Theme: {:?}", session.toggle_theme()).to_lowercase(),
            Command::Board => self.render_board(session.state()),
            Command::Top(count) => self.render_top(session.state(), count),
            Command::Stats => self.render_stats(session.state()),
            Command::History => self.render_history(session.state()),
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Show(text))
    }

    /// Text for a deferred event worth announcing
    pub fn describe_deferred(&self, state: &GameState, outcome: DeferredOutcome) -> Option<String> {
        match outcome {
            DeferredOutcome::Tick(TickOutcome::Counted(left)) if left <= 5 => {
                Some(format!("⏱ {}", state.timer))
            }
            _ => None,
        }
    }

    pub fn render_board(&self, state: &GameState) -> String {
        if self.format == OutputFormat::Json {
            return to_json(state);
        }

        let mut out = String::new();
        let _ = writeln!(
            out,
            "Round: {}   Timer: {}{}   Points: {}   Theme: {:?}",
            state.current_round,
            state.timer,
            if state.timer.is_running() { " (running)" } else { "" },
            state.selected_points,
            state.theme,
        );
        for team in state.top_teams(state.teams.len()) {
            let marker = match state.current_round {
                Round::Final if state.is_finalist(team.id) => '*',
                Round::Final => '-',
                _ => ' ',
            };
            let _ = writeln!(
                out,
                "{marker}{:>2}. {} {:<20} {:>6}",
                team.rank,
                team.emoji,
                team.name.as_str(),
                team.score
            );
        }
        if state.show_confetti {
            out.push_str(&self.render_celebration(state));
        }
        out.trim_end().to_string()
    }

    fn render_top(&self, state: &GameState, count: usize) -> String {
        let top = state.top_teams(count);
        if self.format == OutputFormat::Json {
            return to_json(&top);
        }
        top.iter()
            .enumerate()
            .map(|(i, t)| format!("{}. {} {} ({})", i + 1, t.emoji, t.name, t.score))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_stats(&self, state: &GameState) -> String {
        let stats = state.stats();
        if self.format == OutputFormat::Json {
            return to_json(&stats);
        }
        format!(
            "Teams: {}   Questions: {} ({} rubric, {} final)   Total points: {}",
            stats.teams,
            stats.questions,
            stats.rubric_questions,
            stats.final_questions,
            stats.total_points
        )
    }

    fn render_history(&self, state: &GameState) -> String {
        if self.format == OutputFormat::Json {
            return to_json(&state.awards);
        }
        if state.awards.is_empty() {
            return "No points awarded yet".to_string();
        }
        let mut lines: Vec<String> = state
            .awards
            .records()
            .iter()
            .map(|r| {
                let name = state
                    .team(r.team_id)
                    .map(|t| t.name.to_string())
                    .unwrap_or_else(|_| r.team_id.to_string());
                format!(
                    "{} [{}] {} +{} at {}",
                    r.id,
                    r.round,
                    name,
                    r.points,
                    r.timestamp.format("%H:%M:%S")
                )
            })
            .collect();

        let totals: Vec<String> = state
            .teams
            .iter()
            .map(|t| (t, state.awards.points_for(t.id)))
            .filter(|&(_, total)| total > 0)
            .map(|(t, total)| format!("{} {}", t.name, total))
            .collect();
        lines.push(format!("Totals: {}", totals.join(", ")));
        lines.join("\n")
    }

    fn render_finalists(&self, state: &GameState) -> String {
        let names: Vec<String> = state
            .finalists()
            .iter()
            .filter_map(|&id| state.team(id).ok())
            .map(|t| format!("{} {}", t.emoji, t.name))
            .collect();
        format!("Finals! Qualified: {}", names.join(", "))
    }

    fn render_celebration(&self, state: &GameState) -> String {
        match state.winner() {
            Some(winner) => format!(
                "\n🎉 {} {} wins with {} points! 🎉",
                winner.emoji, winner.name, winner.score
            ),
            None => String::new(),
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

fn resolve_team(state: &GameState, reference: &str) -> Result<TeamId> {
    state
        .find_team(reference)
        .ok_or_else(|| TriviaError::ParseError(format!("no team matches '{reference}'")))
}

/// Why a click on `team_id` is not allowed right now, if it isn't
fn click_blocked(state: &GameState, team_id: TeamId) -> Option<String> {
    if state.can_score(team_id) {
        return None;
    }
    let name = state.team(team_id).map(|t| t.name.to_string()).unwrap_or_default();
    Some(match state.current_round {
        Round::Finished => "The game is finished; reset to play again".to_string(),
        _ => format!("{name} did not qualify for the finals"),
    })
}

const HELP: &str = "\
Commands:
  award <team> [points]   award points (team id or name; bare id works too)
  points <n>              select the point value for the next award
  finals                  advance the top 4 teams to the finals
  finish                  end the game and celebrate
  reset                   restore the seed roster
  timer start [secs]      start the countdown (default 30)
  timer stop              stop the countdown
  theme                   toggle dark/light
  board | top [n] | stats | history
  help | quit";
