//! Trivia Scoreboard - Main Binary
//!
//! Moderator console for a live trivia competition, plus a self-playing demo

use clap::{Parser, Subcommand, ValueEnum};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use trivia_scoreboard::{
    console::{Console, Reply},
    game::{
        run_demo, BellCues, CueSink, OutputFormat, RandomModerator, Scoreboard,
        ScoreboardConfig, SilentCues, VerbosityLevel,
    },
    session::Session,
};

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

/// Output format for logs and board rendering
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// One JSON object per line
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(Parser)]
#[command(name = "trivia")]
#[command(about = "Trivia Scoreboard - live scoring for trivia competitions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the moderator console on stdin
    Play {
        /// Verbosity level (silent/0, minimal/1, normal/2, verbose/3)
        #[arg(long, short = 'v', default_value = "normal")]
        verbosity: VerbosityArg,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,

        /// Countdown length used by `timer start` without an argument
        #[arg(long, default_value_t = 30)]
        timer: u32,

        /// Don't ring the terminal bell for audio cues
        #[arg(long)]
        quiet_cues: bool,
    },

    /// Play a full game with a random moderator
    Demo {
        /// Random seed (entropy when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Questions asked in each round
        #[arg(long, default_value_t = 10)]
        questions: usize,

        /// Verbosity level (silent/0, minimal/1, normal/2, verbose/3)
        #[arg(long, short = 'v', default_value = "minimal")]
        verbosity: VerbosityArg,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: FormatArg,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            verbosity,
            format,
            timer,
            quiet_cues,
        } => run_play(verbosity.into(), format.into(), timer, quiet_cues).await?,
        Commands::Demo {
            seed,
            questions,
            verbosity,
            format,
        } => run_demo_game(seed, questions, verbosity.into(), format.into())?,
    }

    Ok(())
}

/// What woke the console loop
enum Input {
    Line(Option<String>),
    Deferred(Option<trivia_scoreboard::session::Deferred>),
}

async fn run_play(
    verbosity: VerbosityLevel,
    format: OutputFormat,
    timer_secs: u32,
    quiet_cues: bool,
) -> anyhow::Result<()> {
    if timer_secs == 0 {
        anyhow::bail!("--timer must be at least 1 second");
    }

    let cues: Box<dyn CueSink> = if quiet_cues {
        Box::new(SilentCues)
    } else {
        Box::new(BellCues::stdout())
    };
    let config = ScoreboardConfig {
        timer_secs,
        ..ScoreboardConfig::default()
    };
    let mut engine = Scoreboard::with_config(config, cues);
    engine.logger_mut().set_verbosity(verbosity);
    engine.logger_mut().set_output_format(format);

    let mut session = Session::new(engine);
    let console = Console::new(format);

    if format == OutputFormat::Text {
        println!("=== Trivia Scoreboard ===  (type 'help' for commands)\n");
    }
    println!("{}", console.render_board(session.state()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line?),
            event = session.next_deferred() => Input::Deferred(event),
        };

        match input {
            Input::Line(None) => break,
            Input::Line(Some(line)) => match console.execute_line(&mut session, &line) {
                Reply::Quit => break,
                Reply::Show(text) if text.is_empty() => {}
                Reply::Show(text) => println!("{text}"),
            },
            Input::Deferred(Some(event)) => {
                let outcome = session.handle(event);
                if let Some(text) = console.describe_deferred(session.state(), outcome) {
                    println!("{text}");
                }
            }
            // The session holds a sender, so the channel never closes while it lives
            Input::Deferred(None) => tokio::time::sleep(Duration::from_millis(10)).await,
        }
    }

    Ok(())
}

fn run_demo_game(
    seed: Option<u64>,
    questions: usize,
    verbosity: VerbosityLevel,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut moderator = match seed {
        Some(seed) => {
            if format == OutputFormat::Text {
                println!("Using random seed: {seed}");
            }
            RandomModerator::with_seed(seed)
        }
        None => RandomModerator::new(),
    };

    let mut engine = Scoreboard::with_cues(SilentCues);
    engine.logger_mut().set_verbosity(verbosity);
    engine.logger_mut().set_output_format(format);

    let result = run_demo(&mut engine, &mut moderator, questions);
    let console = Console::new(format);

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&result)?);
        }
        OutputFormat::Text => {
            println!("\n=== Game Over ===");
            match result.winner.map(|id| engine.state().team(id)).transpose()? {
                Some(winner) => println!("Winner: {} {}", winner.emoji, winner.name),
                None => println!("No winner"),
            }
            println!(
                "Awards: {} rubric, {} final ({} points)",
                result.rubric_awards, result.final_awards, result.total_points
            );
            println!("Reason: {:?}", result.end_reason);
            println!("\n=== Final Board ===");
            println!("{}", console.render_board(engine.state()));
        }
    }

    Ok(())
}
