//! Game entity types: plain data plus trivial accessors, no frame logic.

use crate::config::FieldConfig;
use crate::difficulty::Difficulty;
use crate::formation::FormationController;
use crate::geometry::Rect;
use crate::projectiles::ProjectileManager;
use crate::segments::{SegmentAllocator, SegmentBounds, SegmentId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    One,
    Two,
    Three,
}

impl Level {
    pub fn number(self) -> u8 {
        match self {
            Level::One => 1,
            Level::Two => 2,
            Level::Three => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
    Quit,
}

/// What ended a lost session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LossCause {
    /// An enemy body touched the ship.
    Rammed,
    /// An enemy bullet touched the ship.
    Shot,
}

// ── Input ─────────────────────────────────────────────────────────────────────

/// Pressed-key snapshot for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub fire: bool,
    pub quit: bool,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    /// Travels up.
    Player,
    /// Travels down.
    Enemy,
}

impl BulletOwner {
    /// Sign of the vertical velocity.
    pub fn direction(self) -> f32 {
        match self {
            BulletOwner::Player => -1.0,
            BulletOwner::Enemy => 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    pub rect: Rect,
    pub owner: BulletOwner,
}

// ── Ship & enemies ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Ship {
    pub rect: Rect,
    /// Pixels per frame.
    pub speed: f32,
}

impl Ship {
    /// Bottom-centre of the field, like the arcade cabinet layout.
    pub fn spawn(config: &FieldConfig) -> Self {
        Self {
            rect: Rect::new(
                config.field_width / 2.0,
                config.field_height - config.ship_height,
                config.ship_width,
                config.ship_height,
            ),
            speed: config.ship_speed,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Session seconds at creation; drives the wobble and snake phase.
    pub spawn_time: f64,
}

impl Enemy {
    pub fn new(x: f32, y: f32, config: &FieldConfig, spawn_time: f64) -> Self {
        Self {
            rect: Rect::new(x, y, config.enemy_width, config.enemy_height),
            spawn_time,
        }
    }
}

/// An ordered formation. Slot 0 is the leader; when it dies the next
/// survivor takes over on the following frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FormationGroup {
    pub enemies: Vec<Enemy>,
    /// `None` for free-roaming groups.
    pub segment: Option<SegmentId>,
    pub bounds: SegmentBounds,
}

impl FormationGroup {
    pub fn leader(&self) -> Option<&Enemy> {
        self.enemies.first()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

// ── Master session state ──────────────────────────────────────────────────────

/// Everything one play session owns. Built by `compute::init_state` and
/// advanced in place by `compute::tick`.
#[derive(Clone, Debug)]
pub struct SessionState {
    pub config: FieldConfig,
    pub ship: Ship,
    pub segments: SegmentAllocator,
    pub formations: FormationController,
    pub projectiles: ProjectileManager,
    pub difficulty: Difficulty,
    pub score: u32,
    pub kills: u32,
    /// Enemies that left the bottom of the field alive.
    pub passed: u32,
    /// Session seconds (sum of clamped frame deltas).
    pub elapsed: f64,
    /// Last raw clock reading fed to `tick`.
    pub last_clock: Option<f64>,
    pub frame: u64,
    pub status: GameStatus,
    pub loss: Option<LossCause>,
}

impl SessionState {
    pub fn level(&self) -> Level {
        self.difficulty.level
    }

    pub fn elapsed_ms(&self) -> u64 {
        (self.elapsed * 1000.0) as u64
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn ship(&self) -> &Rect {
        &self.ship.rect
    }

    /// Every live enemy rectangle, group by group.
    pub fn enemies(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.formations.enemies().map(|e| &e.rect)
    }

    pub fn player_bullets(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.projectiles.player.iter().map(|b| &b.rect)
    }

    pub fn enemy_bullets(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.projectiles.enemy.iter().map(|b| &b.rect)
    }
}
