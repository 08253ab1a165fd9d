mod display;

use std::collections::HashMap;
use std::io::{self, stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use wave_shooter::compute::{init_state, tick};
use wave_shooter::config::FPS;
use wave_shooter::{Clock, FieldConfig, FrameInput, GameStatus, MonotonicClock, SessionState};

use display::Viewport;

const FRAME: Duration = Duration::from_micros(1_000_000 / FPS as u64);

const LOG_FILE: &str = "wave_shooter.log";
const SEED_VAR: &str = "WAVE_SHOOTER_SEED";

const LEFT_KEYS: [KeyCode; 3] = [KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')];
const RIGHT_KEYS: [KeyCode; 3] = [KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')];
const FIRE_KEYS: [KeyCode; 1] = [KeyCode::Char(' ')];

// ── Held keys ─────────────────────────────────────────────────────────────────

/// Frames a press or repeat keeps a key down when the terminal never sends
/// releases. OS auto-repeat refreshes it well inside 8 frames at 60 FPS.
const HOLD_WINDOW: u64 = 8;

/// Last frame each key was seen pressed, so several keys can be held at once.
#[derive(Default)]
struct HeldKeys {
    last_seen: HashMap<KeyCode, u64>,
}

impl HeldKeys {
    /// Fold one terminal event in. Returns true for a quit key press.
    fn apply(&mut self, ev: Event, frame: u64) -> bool {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            return false;
        };
        match kind {
            KeyEventKind::Press => {
                self.last_seen.insert(code, frame);
                is_quit_key(&code, modifiers)
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(code, frame);
                false
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&code);
                false
            }
        }
    }

    fn any_down(&self, keys: &[KeyCode], frame: u64) -> bool {
        keys.iter().any(|key| {
            self.last_seen
                .get(key)
                .is_some_and(|&seen| frame.saturating_sub(seen) <= HOLD_WINDOW)
        })
    }

    fn snapshot(&self, frame: u64, quit: bool) -> FrameInput {
        FrameInput {
            left: self.any_down(&LEFT_KEYS, frame),
            right: self.any_down(&RIGHT_KEYS, frame),
            fire: self.any_down(&FIRE_KEYS, frame),
            quit,
        }
    }
}

fn is_quit_key(code: &KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

// ── Session loop ──────────────────────────────────────────────────────────────

/// Drive `tick` at a fixed frame rate until the player quits. A lost session
/// keeps its last frame on screen until a quit key arrives.
fn run<W: Write>(
    out: &mut W,
    state: &mut SessionState,
    events: &mpsc::Receiver<Event>,
    rng: &mut StdRng,
) -> io::Result<()> {
    let clock = MonotonicClock::new();
    let mut keys = HeldKeys::default();
    let mut frame: u64 = 0;

    loop {
        let started = Instant::now();
        frame += 1;

        let mut quit = false;
        for ev in events.try_iter() {
            quit |= keys.apply(ev, frame);
        }

        if state.is_running() {
            let input = keys.snapshot(frame, quit);
            if tick(state, &input, clock.now(), rng) == GameStatus::Quit {
                return Ok(());
            }
        } else if quit {
            return Ok(());
        }

        let (cols, rows) = terminal::size()?;
        display::render(out, state, &Viewport::new(cols, rows, state))?;

        if let Some(rest) = FRAME.checked_sub(started.elapsed()) {
            thread::sleep(rest);
        }
    }
}

// ── Terminal setup ────────────────────────────────────────────────────────────

/// Raw mode plus alternate screen. Returns whether the terminal accepted
/// key-release reporting (kitty protocol); others fall back to `HOLD_WINDOW`.
fn enter_terminal<W: Write>(out: &mut W) -> io::Result<bool> {
    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;
    Ok(out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok())
}

/// Best effort; runs on every exit path.
fn leave_terminal<W: Write>(out: &mut W, enhanced: bool) {
    if enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Blocking reads live on their own thread; the frame loop drains the channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });
    rx
}

fn session_rng() -> StdRng {
    let seed = std::env::var(SEED_VAR).ok().map(|raw| (raw.trim().parse::<u64>(), raw));
    match seed {
        Some((Ok(seed), _)) => {
            info!("using fixed seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        Some((Err(e), raw)) => {
            warn!("ignoring {SEED_VAR}={raw:?}: {e}");
            StdRng::from_entropy()
        }
        None => StdRng::from_entropy(),
    }
}

fn main() -> io::Result<()> {
    simple_logging::log_to_file(LOG_FILE, log::LevelFilter::Info)?;
    info!("starting wave_shooter");

    let mut rng = session_rng();
    let mut state = init_state(FieldConfig::default(), &mut rng).map_err(|e| {
        error!("invalid field configuration: {e}");
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let mut out = BufWriter::new(stdout());
    let enhanced = enter_terminal(&mut out)?;
    let events = spawn_input_thread();

    let result = run(&mut out, &mut state, &events, &mut rng);
    if let Err(e) = &result {
        error!("session aborted: {e}");
    }
    leave_terminal(&mut out, enhanced);

    info!(
        "session ended ({:?}): score {}, kills {}, passed {}, level {}",
        state.status,
        state.score,
        state.kills,
        state.passed,
        state.level().number()
    );
    result
}
