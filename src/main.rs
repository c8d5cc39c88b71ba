mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use alien_turret::{Canvas, Driver, FileScoreStore, FrameOutcome, GameConfig};

use display::{Hud, Layout};

type Game = Driver<Canvas, FileScoreStore, StdRng>;

#[derive(Parser)]
#[command(name = "alien_turret")]
#[command(about = "Shoot the aliens down before they land", long_about = None)]
#[command(version)]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the best score is kept (default: ~/.alien_turret_score)
    #[arg(long)]
    score_file: Option<PathBuf>,

    /// Seed for a reproducible alien sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Initial alien speed (snapped to the speed dial)
    #[arg(long)]
    speed: Option<u32>,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One iteration per frame: drain input, step the driver, repaint, sleep.
/// Returns when the player quits.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
    frame_len: Duration,
) -> std::io::Result<()> {
    let layout = Layout::new(&game.state().config);
    let dial_step = game.state().config.speed.step;
    let clock = Instant::now();

    loop {
        let frame_start = Instant::now();
        let now = clock.elapsed();

        // Input first, so a click lands before this frame's ticks
        while let Ok(ev) = rx.try_recv() {
            match ev {
                Event::Key(KeyEvent {
                    code,
                    kind: KeyEventKind::Press,
                    modifiers,
                    ..
                }) => match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(());
                    }
                    KeyCode::Char(' ') | KeyCode::Enter => {
                        game.toggle(now);
                    }
                    KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => {
                        game.set_speed(game.speed() + dial_step);
                    }
                    KeyCode::Char('-') | KeyCode::Left => {
                        game.set_speed(game.speed().saturating_sub(dial_step));
                    }
                    _ => {}
                },
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    if let Some(alien) = display::press_target(game.surface(), &layout, column, row) {
                        game.press(alien);
                    }
                }
                _ => {}
            }
        }

        if game.frame(now) == FrameOutcome::GameOver {
            info!("game over with {} points", game.score());
        }

        let hud = Hud {
            score: game.score(),
            best: game.best_score(),
            speed: game.speed(),
            phase: game.phase(),
        };
        display::render(out, game.surface(), &layout, &hud)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            std::thread::sleep(frame_len - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> alien_turret::Result<()> {
    // The terminal is in raw mode while playing, so stay quiet unless asked.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    let store = match cli.score_file {
        Some(path) => FileScoreStore::new(path),
        None => FileScoreStore::in_home(),
    };
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let frame_len = Duration::from_millis(config.display.frame_ms);

    let mut game = Driver::new(config, Canvas::new(), store, rng);
    if let Some(speed) = cli.speed {
        game.set_speed(speed);
    }

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)?;

    // Blocking reads live on their own thread; the loop polls the channel.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // loop is gone
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &mut game, &rx, frame_len);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result?;
    Ok(())
}
