mod app;
mod render;
mod theme;

use app::App;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use cxn_core::{Board, BundledProvider, PuzzleSource, SessionConfig};
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use theme::ThemeChoice;
use tracing_subscriber::EnvFilter;

/// Group sixteen words into four hidden categories
#[derive(Debug, Parser)]
#[command(name = "connections", version, about)]
struct Args {
    /// Puzzle dataset to play from (orig or nyt)
    #[arg(long, default_value = "orig")]
    source: PuzzleSource,

    /// Puzzle number to start with
    #[arg(long, default_value_t = 1)]
    puzzle: u32,

    /// Seed for reproducible shuffles
    #[arg(long)]
    seed: Option<u64>,

    /// How long feedback messages stay visible, in milliseconds
    #[arg(long, default_value_t = 5000)]
    feedback_ms: u64,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeChoice::Dark)]
    theme: ThemeChoice,

    /// Write logs to this file (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    // Fail before raw mode so the error reaches a normal terminal
    init_tracing(args.log_file.as_deref())?;

    let provider = BundledProvider::new()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let config = SessionConfig {
        feedback_delay: Duration::from_millis(args.feedback_ms),
    };
    let mut board = Board::new(provider, config);
    if let Some(seed) = args.seed {
        board = board.with_seed(seed);
    }
    let mut app = App::new(board, args.theme, args.puzzle, args.source);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        tracing::error!(error = %e, "terminal loop failed");
        eprintln!("Error: {}", e);
    }

    Ok(())
}

/// Install a file logger; without a path nothing is installed so the
/// raw-mode terminal is never written to.
fn init_tracing(path: Option<&Path>) -> io::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        // Render
        render::render(stdout, app)?;
        stdout.flush()?;

        // Handle input with timeout for timer updates
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    // Handle Ctrl+C
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }

                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick(last_tick.elapsed());
            last_tick = Instant::now();
        }
    }

    Ok(())
}
