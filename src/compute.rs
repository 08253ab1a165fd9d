//! Session loop.
//!
//! `tick` advances a `SessionState` by exactly one frame, in place. Side
//! effects are limited to the injected RNG and the `log` facade, so a seeded
//! RNG plus a scripted clock replays a session exactly.

use log::{info, warn};
use rand::Rng;

use crate::collision;
use crate::config::{ConfigError, FieldConfig};
use crate::difficulty::Difficulty;
use crate::entities::{FrameInput, GameStatus, LossCause, SessionState, Ship};
use crate::formation::{FormationController, StepContext};
use crate::projectiles::ProjectileManager;
use crate::segments::SegmentAllocator;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh session: ship at the bottom centre, one free-roaming enemy at the
/// top, every segment free, level 1.
pub fn init_state(config: FieldConfig, rng: &mut impl Rng) -> Result<SessionState, ConfigError> {
    config.validate()?;

    let segments = SegmentAllocator::new(
        config.field_width,
        config.segment_count,
        config.enemy_width,
    );
    let mut formations = FormationController::new();
    formations.spawn_free_roaming(&config, 0.0, rng);

    Ok(SessionState {
        ship: Ship::spawn(&config),
        segments,
        formations,
        projectiles: ProjectileManager::new(),
        difficulty: Difficulty::default(),
        score: 0,
        kills: 0,
        passed: 0,
        elapsed: 0.0,
        last_clock: None,
        frame: 0,
        status: GameStatus::Playing,
        loss: None,
        config,
    })
}

// ── Input-driven transitions ────────────────────────────────────────────────

pub fn move_ship_left(state: &mut SessionState) {
    let ship = &mut state.ship;
    ship.rect.x = (ship.rect.x - ship.speed).max(0.0);
}

pub fn move_ship_right(state: &mut SessionState) {
    let max_x = state.config.field_width - state.ship.rect.w;
    let ship = &mut state.ship;
    ship.rect.x = (ship.rect.x + ship.speed).min(max_x);
}

/// Fire from the ship, subject to the bullet delay.
pub fn player_shoot(state: &mut SessionState) -> bool {
    let now_ms = state.elapsed_ms();
    state
        .projectiles
        .try_fire(&state.ship.rect, now_ms, &state.config)
}

/// Add kills from a collision pass to the counters.
pub fn record_kills(state: &mut SessionState, kills: u32) {
    state.kills += kills;
    state.score += kills * state.config.kill_score;
}

// ── Clock ────────────────────────────────────────────────────────────────────

/// Feed a raw monotonic clock reading into the session clock. The first
/// reading only anchors the clock; later ones add their delta clamped to
/// `[0, max_frame_dt]`.
pub fn advance_clock(state: &mut SessionState, now: f64) -> f64 {
    let dt = match state.last_clock {
        Some(prev) => {
            let raw = now - prev;
            if raw > state.config.max_frame_dt {
                warn!("frame stalled for {raw:.3}s, clamped to {:.3}s", state.config.max_frame_dt);
            }
            raw.clamp(0.0, state.config.max_frame_dt)
        }
        None => 0.0,
    };
    state.last_clock = Some(now);
    state.elapsed += dt;
    dt
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame. `now` is a monotonic clock reading
/// in seconds. Returns the status after the frame; a finished session is
/// left untouched.
pub fn tick(
    state: &mut SessionState,
    input: &FrameInput,
    now: f64,
    rng: &mut impl Rng,
) -> GameStatus {
    if state.status != GameStatus::Playing {
        return state.status;
    }
    if input.quit {
        info!("quit requested at frame {} with score {}", state.frame, state.score);
        state.status = GameStatus::Quit;
        return state.status;
    }

    // ── 1. Time ──────────────────────────────────────────────────────────────
    advance_clock(state, now);
    state.frame += 1;
    let elapsed = state.elapsed;

    // ── 2. Difficulty ────────────────────────────────────────────────────────
    state.difficulty.update_level(state.kills);

    // ── 3. Player fire + bullet integration ─────────────────────────────────
    if input.fire {
        player_shoot(state);
    }
    state
        .projectiles
        .advance(state.config.bullet_speed, state.config.field_height);

    // ── 4. Ship ──────────────────────────────────────────────────────────────
    if input.left {
        move_ship_left(state);
    }
    if input.right {
        move_ship_right(state);
    }

    // ── 5. Disband wiped-out groups ──────────────────────────────────────────
    state.formations.release_empty(&mut state.segments);

    // ── 6. Spawn ─────────────────────────────────────────────────────────────
    let level = state.difficulty.level;
    state
        .formations
        .try_spawn(&mut state.segments, level, elapsed, &state.config, rng);

    // ── 7. Formations ────────────────────────────────────────────────────────
    let ctx = StepContext {
        config: &state.config,
        ship: state.ship.rect,
        now: elapsed,
        pacing: state.difficulty.pacing,
        shooting: state.difficulty.shooting,
    };
    state.passed += state.formations.step(&ctx, &mut state.projectiles, rng);

    // ── 8. Collisions ────────────────────────────────────────────────────────
    let report = collision::resolve(
        &mut state.formations,
        &mut state.projectiles,
        &state.ship.rect,
    );
    record_kills(state, report.kills);

    // ── 9. Terminal conditions ───────────────────────────────────────────────
    if report.ship_hit() {
        let cause = if report.rammed {
            LossCause::Rammed
        } else {
            LossCause::Shot
        };
        info!(
            "game over ({cause:?}) at frame {}: score {}, kills {}, level {}",
            state.frame,
            state.score,
            state.kills,
            state.difficulty.level.number()
        );
        state.loss = Some(cause);
        state.status = GameStatus::GameOver;
        return state.status;
    }

    // ── 10. Shooting duty cycle ──────────────────────────────────────────────
    state.difficulty.update_shooting(elapsed);

    state.status
}
