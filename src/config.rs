//! Field configuration.
//!
//! The constants are the arcade tuning at 1400x980; `FieldConfig` bundles
//! them so a session can be started with other dimensions.

use thiserror::Error;

// ── Field ─────────────────────────────────────────────────────────────────────

pub const FIELD_WIDTH: f32 = 1400.0;
pub const FIELD_HEIGHT: f32 = 980.0;
pub const FPS: u32 = 60;

// ── Enemies ───────────────────────────────────────────────────────────────────

pub const ENEMY_WIDTH: f32 = 50.0;
pub const ENEMY_HEIGHT: f32 = 50.0;
pub const ENEMY_SPACING: f32 = 20.0;
/// Vertical pitch of a spawned column and amplitude step of the snake.
pub const ENEMY_DELAY_HEIGHT: f32 = ENEMY_SPACING + ENEMY_HEIGHT;

pub const SEGMENT_COUNT: usize = 5;
pub const MAX_ENEMIES: usize = 12;

/// Seconds between successful spawns.
pub const ENEMY_SPAWN_INTERVAL: f64 = 5.0;
pub const ENEMY_SPEED: f32 = 1.0;
pub const ENEMY_SINE_SPEED: f64 = 1.0;
/// Members per group once the level is above 1.
pub const COLUMN_SIZE: usize = 4;
/// Leaders only home in while `field_height - leader.y` exceeds this.
pub const HOMING_THRESHOLD: f32 = 700.0;

// ── Ship & bullets ────────────────────────────────────────────────────────────

pub const SHIP_WIDTH: f32 = 60.0;
pub const SHIP_HEIGHT: f32 = 50.0;
pub const SHIP_SPEED: f32 = 5.0;

pub const BULLET_WIDTH: f32 = 10.0;
pub const BULLET_HEIGHT: f32 = 20.0;
/// Pixels per frame, both directions.
pub const BULLET_SPEED: f32 = 5.0;
/// Milliseconds between player shots.
pub const BULLET_DELAY: u64 = 150;

pub const KILL_SCORE: u32 = 100;

/// Largest dt the session clock accepts from one frame (seconds).
pub const MAX_FRAME_DT: f64 = 0.25;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("field must have a positive size, got {width}x{height}")]
    EmptyField { width: f32, height: f32 },
    #[error("segment count must be at least 1")]
    NoSegments,
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("segment width {segment_width} is narrower than an enemy ({enemy_width})")]
    SegmentTooNarrow { segment_width: f32, enemy_width: f32 },
    #[error("ship ({ship_width} wide) does not fit in a {field_width} wide field")]
    ShipTooWide { ship_width: f32, field_width: f32 },
}

/// Externally supplied constants for one session.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub field_width: f32,
    pub field_height: f32,
    pub segment_count: usize,
    pub max_enemies: usize,

    pub enemy_width: f32,
    pub enemy_height: f32,
    pub enemy_delay_height: f32,
    pub enemy_speed: f32,
    pub enemy_sine_speed: f64,
    pub spawn_interval: f64,
    pub column_size: usize,
    pub homing_threshold: f32,

    pub ship_width: f32,
    pub ship_height: f32,
    pub ship_speed: f32,

    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub bullet_delay_ms: u64,

    pub kill_score: u32,
    pub max_frame_dt: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            segment_count: SEGMENT_COUNT,
            max_enemies: MAX_ENEMIES,

            enemy_width: ENEMY_WIDTH,
            enemy_height: ENEMY_HEIGHT,
            enemy_delay_height: ENEMY_DELAY_HEIGHT,
            enemy_speed: ENEMY_SPEED,
            enemy_sine_speed: ENEMY_SINE_SPEED,
            spawn_interval: ENEMY_SPAWN_INTERVAL,
            column_size: COLUMN_SIZE,
            homing_threshold: HOMING_THRESHOLD,

            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            ship_speed: SHIP_SPEED,

            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_speed: BULLET_SPEED,
            bullet_delay_ms: BULLET_DELAY,

            kill_score: KILL_SCORE,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl FieldConfig {
    pub fn segment_width(&self) -> f32 {
        self.field_width / self.segment_count as f32
    }

    /// Reject configurations the simulation cannot run with (division by a
    /// zero segment count, inverted clamp ranges, ...).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.field_width > 0.0 && self.field_height > 0.0) {
            return Err(ConfigError::EmptyField {
                width: self.field_width,
                height: self.field_height,
            });
        }
        if self.segment_count == 0 {
            return Err(ConfigError::NoSegments);
        }

        let positive: [(&'static str, f64); 8] = [
            ("enemy_width", self.enemy_width as f64),
            ("enemy_height", self.enemy_height as f64),
            ("ship_width", self.ship_width as f64),
            ("ship_height", self.ship_height as f64),
            ("bullet_width", self.bullet_width as f64),
            ("bullet_height", self.bullet_height as f64),
            ("spawn_interval", self.spawn_interval),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { name, value });
            }
        }

        if self.segment_width() < self.enemy_width {
            return Err(ConfigError::SegmentTooNarrow {
                segment_width: self.segment_width(),
                enemy_width: self.enemy_width,
            });
        }
        if self.ship_width > self.field_width {
            return Err(ConfigError::ShipTooWide {
                ship_width: self.ship_width,
                field_width: self.field_width,
            });
        }
        Ok(())
    }
}

