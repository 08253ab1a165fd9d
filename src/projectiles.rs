//! Player and enemy bullet lists.

use crate::config::FieldConfig;
use crate::entities::{BulletOwner, Projectile};
use crate::geometry::Rect;

#[derive(Clone, Debug, Default)]
pub struct ProjectileManager {
    pub player: Vec<Projectile>,
    pub enemy: Vec<Projectile>,
    /// Session millisecond stamp of the last accepted player shot.
    last_shot_ms: Option<u64>,
}

/// Bullets are spawned at half the nominal bullet size.
fn bullet_size(config: &FieldConfig) -> (f32, f32) {
    (config.bullet_width / 2.0, config.bullet_height / 2.0)
}

impl ProjectileManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire from the ship's top edge unless the last shot was under
    /// `bullet_delay_ms` ago. Returns whether a bullet was created.
    pub fn try_fire(&mut self, ship: &Rect, now_ms: u64, config: &FieldConfig) -> bool {
        if let Some(last) = self.last_shot_ms {
            if now_ms.saturating_sub(last) < config.bullet_delay_ms {
                return false;
            }
        }
        let (w, h) = bullet_size(config);
        self.player.push(Projectile {
            rect: Rect::new(ship.center_x() - w / 2.0, ship.y - h, w, h),
            owner: BulletOwner::Player,
        });
        self.last_shot_ms = Some(now_ms);
        true
    }

    /// Drop a bullet from the bottom-centre of `shooter`.
    pub fn spawn_enemy_bullet(&mut self, shooter: &Rect, config: &FieldConfig) {
        let (w, h) = bullet_size(config);
        self.enemy.push(Projectile {
            rect: Rect::new(shooter.center_x() - w / 2.0, shooter.bottom(), w, h),
            owner: BulletOwner::Enemy,
        });
    }

    /// Move every bullet one frame and prune the ones that left the field.
    pub fn advance(&mut self, speed: f32, field_height: f32) {
        for bullet in self.player.iter_mut().chain(self.enemy.iter_mut()) {
            bullet.rect.y += bullet.owner.direction() * speed;
        }
        self.player.retain(|b| b.rect.y >= 0.0);
        self.enemy.retain(|b| b.rect.y <= field_height);
    }

    pub fn len(&self) -> usize {
        self.player.len() + self.enemy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.player.is_empty() && self.enemy.is_empty()
    }
}
