//! Level progression and the shared shooting duty cycle.

use log::info;

use crate::entities::Level;

// ── Difficulty tables ────────────────────────────────────────────────────────

const LEVEL_TWO_KILLS: u32 = 3;
const LEVEL_THREE_KILLS: u32 = 10;

/// Global pacing knobs. Level transitions overwrite them wholesale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pacing {
    /// Seconds between flips of the shooting gate.
    pub shooting_interval: f64,
    /// Per-enemy, per-frame fire probability while the gate is open.
    pub shooting_chance: f64,
    /// Leader descent factor and follower vertical offset.
    pub enemy_advance_speed: f32,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            shooting_interval: 1.0,
            shooting_chance: 0.01,
            enemy_advance_speed: 0.53,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Difficulty {
    pub level: Level,
    pub pacing: Pacing,
    /// Open while enemies may fire.
    pub shooting: bool,
    pub last_flip: f64,
}

impl Default for Difficulty {
    fn default() -> Self {
        Self {
            level: Level::One,
            pacing: Pacing::default(),
            shooting: false,
            last_flip: 0.0,
        }
    }
}

impl Difficulty {
    /// Apply every threshold `kills` has crossed. Levels never go down, so a
    /// session that already reached level 3 ignores further calls.
    /// Returns the new level when it changed.
    pub fn update_level(&mut self, kills: u32) -> Option<Level> {
        let before = self.level;

        if self.level < Level::Two && kills >= LEVEL_TWO_KILLS {
            self.level = Level::Two;
            self.pacing.shooting_interval = 1.5;
        }
        if self.level < Level::Three && kills >= LEVEL_THREE_KILLS {
            self.level = Level::Three;
            self.pacing.shooting_interval = 1.0;
            self.pacing.shooting_chance = 0.04;
            self.pacing.enemy_advance_speed = 1.0;
        }

        if self.level != before {
            info!("level {} reached at {} kills", self.level.number(), kills);
            Some(self.level)
        } else {
            None
        }
    }

    /// Flip the shooting gate once `shooting_interval` has passed since the
    /// previous flip.
    pub fn update_shooting(&mut self, now: f64) -> bool {
        if now - self.last_flip > self.pacing.shooting_interval {
            self.shooting = !self.shooting;
            self.last_flip = now;
        }
        self.shooting
    }
}
