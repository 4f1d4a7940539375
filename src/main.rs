mod display;

use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use platformer::compute::{apply_command, init_state, tick};
use platformer::entities::{Command, DisplayMode, GameState, GameStatus};
use platformer::view::project;
use platformer::Config;

#[derive(Parser, Debug)]
#[command(name = "platformer", about = "Side-scrolling terminal platformer")]
struct Args {
    /// JSON config file; missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for the level layout and respawns.
    #[arg(long)]
    seed: Option<u64>,
    /// Start in emoji mode, whatever the config file says.
    #[arg(long)]
    rich: bool,
    /// Override the tick rate.
    #[arg(long)]
    fps: Option<u32>,
    /// Write logs to this file (terminal output is taken by the game).
    #[arg(long)]
    log_file: Option<PathBuf>,
}

// ── Input mapping ─────────────────────────────────────────────────────────────

enum HostAction {
    Core(Command),
    Respawn,
    Quit,
}

fn map_key(code: KeyCode, modifiers: KeyModifiers, status: GameStatus) -> Option<HostAction> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(HostAction::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(HostAction::Quit),
        KeyCode::Char('r') | KeyCode::Char('R') if status == GameStatus::GameOver => {
            Some(HostAction::Respawn)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char(' ') => {
            Some(HostAction::Core(Command::Jump))
        }
        KeyCode::Char('m') | KeyCode::Char('M') => Some(HostAction::Core(Command::ToggleMode)),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => {
            Some(HostAction::Core(Command::MoveLeft))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => {
            Some(HostAction::Core(Command::MoveRight))
        }
        _ => None,
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.  Input is applied between ticks, so the
/// session always has exactly one mutator.
fn game_loop<W: Write>(
    out: &mut W,
    config: &Config,
    rng: &mut StdRng,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    let frame_time = Duration::from_millis(1000 / u64::from(config.fps));
    let mut state: GameState = init_state(config, rng);

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            if kind != KeyEventKind::Press {
                continue;
            }
            match map_key(code, modifiers, state.status) {
                Some(HostAction::Quit) => return Ok(()),
                Some(HostAction::Respawn) => {
                    let mode = state.mode;
                    state = init_state(config, rng);
                    state.mode = mode;
                    log::info!("Respawned");
                }
                Some(HostAction::Core(command)) => apply_command(&mut state, command),
                None => {}
            }
        }

        tick(&mut state, rng);

        display::render(out, &project(&state)).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        // Stderr shares the screen with the game, so stay quiet unless asked.
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")),
    };
    builder.init();
    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    if let Some(fps) = args.fps {
        config.fps = fps;
    }
    if args.rich {
        config.start_mode = DisplayMode::Rich;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;
    let config = load_config(&args)?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut out = BufWriter::new(stdout());
    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &config, &mut rng, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
