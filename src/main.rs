use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::Parser;
use grid_snake::app::{handle_input, poll_timeout};
use grid_snake::config::FRAME_INTERVAL_MS;
use grid_snake::error::AppError;
use grid_snake::game::{Game, GameStatus, TickOutcome};
use grid_snake::input::{GameInput, InputHandler};
use grid_snake::logging::init_file_logging;
use grid_snake::renderer;
use grid_snake::settings::{self, Overrides, Settings};
use grid_snake::terminal_runtime::{install_panic_hook, TerminalSession};
use tracing::info;

#[derive(Debug, Parser)]
#[command(version, about = "Grid Snake in the terminal")]
struct Cli {
    /// Grid width in cells.
    #[arg(long)]
    width: Option<u16>,

    /// Grid height in cells.
    #[arg(long)]
    height: Option<u16>,

    /// Length of a freshly spawned snake.
    #[arg(long = "initial-length")]
    initial_length: Option<usize>,

    /// Starting tick interval in milliseconds.
    #[arg(long = "interval")]
    interval_ms: Option<u64>,

    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,

    /// Settings file (JSON). Defaults to the platform config directory.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep running when the terminal loses focus.
    #[arg(long = "no-auto-pause")]
    no_auto_pause: bool,

    /// Write tracing output to this file.
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            width: self.width,
            height: self.height,
            initial_length: self.initial_length,
            initial_interval_ms: self.interval_ms,
            seed: self.seed,
            no_auto_pause: self.no_auto_pause,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("grid-snake: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    if let Some(path) = cli.log_file.as_deref() {
        init_file_logging(path)?;
    }

    let file = settings::load_settings_file(cli.config.as_deref())?;
    let settings = settings::resolve(&file, &cli.overrides())?;
    info!(?settings, "starting");

    install_panic_hook();
    let mut session = TerminalSession::enter()?;
    play(&mut session, settings)
}

fn play(session: &mut TerminalSession, settings: Settings) -> Result<(), AppError> {
    let mut game = match settings.seed {
        Some(seed) => Game::with_seed(settings.game, seed),
        None => Game::new(settings.game),
    };
    let mut input = InputHandler::new();
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut last_tick = Instant::now();

    loop {
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &game))?;

        let wait = poll_timeout(
            game.status(),
            game.tick_interval(),
            last_tick.elapsed(),
            frame_interval,
        );
        if let Some(game_input) = input.poll_input(wait)? {
            if game_input == GameInput::Quit {
                info!(score = game.score(), "quit");
                break;
            }

            let was_running = game.status() == GameStatus::Running;
            handle_input(&mut game, game_input, settings.auto_pause);
            if !was_running && game.status() == GameStatus::Running {
                last_tick = Instant::now();
            }
        }

        if game.status() != GameStatus::Running {
            continue;
        }

        if last_tick.elapsed() >= game.tick_interval() {
            let outcome = game.advance();
            last_tick = Instant::now();
            if let TickOutcome::Collided(reason) = outcome {
                info!(?reason, score = game.score(), ticks = game.tick_count(), "game over");
            }
        }
    }

    Ok(())
}
