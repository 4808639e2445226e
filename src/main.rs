use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use log::{LevelFilter, info, warn};
use ratatui::backend::CrosstermBackend;
use simplelog::{Config, WriteLogger};
use tick_snake::config::{
    DEFAULT_GRID_SIZE, DEFAULT_LOG_FILE, DEFAULT_SPEED, FRAME_INTERVAL_MS, THEME_DEFAULT,
};
use tick_snake::error::GameError;
use tick_snake::game::{GameState, TickOutcome};
use tick_snake::input::poll_input;
use tick_snake::session::{Session, SessionEvent};
use tick_snake::terminal_runtime::{GameScreen, install_panic_hook};

#[derive(Debug, Parser)]
#[command(version, about = "Turn-stepped Snake in the terminal")]
struct Cli {
    /// Side length of the square grid.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: u16,

    /// Autoplay pace in moves per second (1.0 to 15.0).
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    speed: f64,

    /// Start with autoplay on instead of moving one cell per key press.
    #[arg(long)]
    autoplay: bool,

    /// Seed food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// File that receives log output.
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    log_file: PathBuf,

    /// Minimum level written to the log file.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli);

    let state = build_state(&cli)
        .map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))?;
    info!(
        "starting {0}x{0} game, speed {1}, autoplay {2}, seed {3:?}",
        cli.grid_size, cli.speed, cli.autoplay, cli.seed
    );

    install_panic_hook();
    let mut session = Session::new(state, cli.autoplay, Instant::now());
    let mut screen = GameScreen::enter()?;
    let result = run(&mut screen, &mut session);
    drop(screen);

    info!(
        "session ended at score {}, {} ticks",
        session.state().score(),
        session.state().tick_count()
    );
    result
}

/// Installs the file logger and reports whether logging is active.
///
/// A log file that cannot be created disables logging instead of stopping
/// the game; `--log-level off` never touches the file system.
fn init_logging(cli: &Cli) -> bool {
    let level = LevelFilter::from(cli.log_level);
    if level == LevelFilter::Off {
        return false;
    }

    let file = match File::create(&cli.log_file) {
        Ok(file) => file,
        Err(error) => {
            eprintln!(
                "Logging disabled, cannot create {}: {error}",
                cli.log_file.display()
            );
            return false;
        }
    };

    match WriteLogger::init(level, Config::default(), file) {
        Ok(()) => true,
        Err(error) => {
            eprintln!("Failed to initialize logger: {error}");
            false
        }
    }
}

fn build_state(cli: &Cli) -> Result<GameState, GameError> {
    let mut state = match cli.seed {
        Some(seed) => GameState::new_with_seed(cli.grid_size, seed)?,
        None => GameState::new(cli.grid_size)?,
    };
    state.set_speed(cli.speed)?;
    Ok(state)
}

fn run(
    screen: &mut GameScreen<CrosstermBackend<io::Stdout>>,
    session: &mut Session,
) -> io::Result<()> {
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);

    loop {
        screen.draw_session(session, &THEME_DEFAULT)?;

        if let Some(input) = poll_input(frame_interval)? {
            match session.handle_input(input, Instant::now()) {
                SessionEvent::Quit => break,
                SessionEvent::Continue(outcome) => log_outcome(session, outcome),
            }
        }

        let outcome = session.autoplay_tick(Instant::now());
        log_outcome(session, outcome);
    }

    Ok(())
}

fn log_outcome(session: &Session, outcome: Option<TickOutcome>) {
    match outcome {
        Some(TickOutcome::Collided(_) | TickOutcome::BoardFilled) => {
            match serde_json::to_string(&session.state().snapshot()) {
                Ok(json) => info!("final state: {json}"),
                Err(error) => warn!("could not serialize final state: {error}"),
            }
        }
        Some(TickOutcome::Ate) => info!("ate food, score {}", session.state().score()),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use clap::Parser;

    use super::{Cli, init_logging};

    fn unreachable_log_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join(format!("tick-snake-missing-{label}-{nanos}"))
            .join("tick-snake.log")
    }

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tick-snake").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn log_level_off_skips_the_log_file() {
        let path = unreachable_log_path("off");
        let path_arg = path.to_string_lossy().into_owned();
        let cli = cli(&["--log-level", "off", "--log-file", &path_arg]);

        assert!(!init_logging(&cli));
        assert!(!path.exists());
    }

    #[test]
    fn uncreatable_log_file_disables_logging() {
        let path = unreachable_log_path("info");
        let path_arg = path.to_string_lossy().into_owned();
        let cli = cli(&["--log-level", "info", "--log-file", &path_arg]);

        assert!(!init_logging(&cli));
    }

    #[test]
    fn defaults_match_the_game_defaults() {
        let cli = cli(&[]);

        assert_eq!(cli.grid_size, 20);
        assert!((cli.speed - 6.0).abs() < f64::EPSILON);
        assert!(!cli.autoplay);
        assert_eq!(cli.seed, None);
    }
}
