mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use sidescroller::interface::InputIntents;
use sidescroller::{GameConfig, Session};

use display::TerminalRenderer;

/// Path of an optional RON file overriding [`GameConfig`] defaults.
const CONFIG_ENV: &str = "SIDESCROLLER_CONFIG";

/// Path of the log file. Logging is off when unset: the terminal is in raw
/// mode and owned by the renderer.
const LOG_ENV: &str = "SIDESCROLLER_LOG";

/// A key counts as held if its last press/repeat event arrived within this
/// many ticks. Covers terminals that never report key releases.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` ticks.
fn is_held(key_tick: &HashMap<KeyCode, u64>, key: &KeyCode, tick: u64) -> bool {
    key_tick
        .get(key)
        .map(|&last| tick.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_tick: &HashMap<KeyCode, u64>, keys: &[KeyCode], tick: u64) -> bool {
    keys.iter().any(|k| is_held(key_tick, k, tick))
}

fn load_config() -> Result<GameConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {path}"))?;
            GameConfig::from_ron_str(&source).with_context(|| format!("invalid config: {path}"))
        }
        Err(_) => Ok(GameConfig::default()),
    }
}

fn init_logging() -> Result<()> {
    let Ok(path) = std::env::var(LOG_ENV) else {
        return Ok(());
    };
    let file = File::create(&path).with_context(|| format!("failed to create log file: {path}"))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: every press/repeat event stamps its key with the current
/// tick in `key_tick`. Each tick, keys still inside `HOLD_WINDOW` are treated
/// as held and folded into one `InputIntents`, so moving, jumping and firing
/// can all happen at once. Fire and reload are edge signals taken straight
/// from the press events of this tick.
fn game_loop<W: Write>(
    renderer: &mut TerminalRenderer<W>,
    session: &mut Session<StdRng>,
    rx: &mpsc::Receiver<Event>,
) -> Result<()> {
    let frame = Duration::from_secs_f64(1.0 / session.config().tick_rate_hz as f64);

    let mut key_tick: HashMap<KeyCode, u64> = HashMap::new();
    let mut tick: u64 = 0;

    loop {
        let frame_start = Instant::now();
        tick += 1;

        let mut intents = InputIntents::default();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press | KeyEventKind::Repeat => {
                    key_tick.insert(code, tick);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') if !session.is_running() => {
                            session.restart();
                            key_tick.clear();
                        }
                        KeyCode::Char('r') | KeyCode::Char('R') => intents.reload = true,
                        KeyCode::Char(' ') | KeyCode::Enter => intents.fire = true,
                        _ => {}
                    }
                }
                KeyEventKind::Release => {
                    key_tick.remove(&code);
                }
            }
        }

        intents.move_left = any_held(
            &key_tick,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            tick,
        );
        intents.move_right = any_held(
            &key_tick,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            tick,
        );
        intents.jump = any_held(
            &key_tick,
            &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
            tick,
        );

        session.advance(&intents, renderer);
        session.render(renderer).context("failed to draw frame")?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging()?;
    let config = load_config()?;
    let mut session = Session::start(config, StdRng::from_entropy())?;

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Key-release events where the terminal supports them; others fall back
    // to the hold window.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking event reads live on their own thread so the tick loop never
    // waits on I/O.
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

    let result = TerminalRenderer::new(
        &mut out,
        config.viewport_width,
        config.viewport_height,
    )
    .context("failed to query terminal size")
    .and_then(|mut renderer| game_loop(&mut renderer, &mut session, &rx));

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
