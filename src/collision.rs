//! Per-frame overlap resolution between ship, enemies and bullets.
//!
//! Only current-frame rectangles are compared. A bullet fast enough to jump
//! over a target in one frame passes through it.

use crate::formation::FormationController;
use crate::geometry::Rect;
use crate::projectiles::ProjectileManager;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Enemies destroyed by player bullets this frame.
    pub kills: u32,
    /// An enemy body overlapped the ship.
    pub rammed: bool,
    /// An enemy bullet overlapped the ship.
    pub shot: bool,
}

impl CollisionReport {
    pub fn ship_hit(&self) -> bool {
        self.rammed || self.shot
    }
}

/// Resolve every interaction for this frame. Each enemy is consumed by at
/// most one player bullet, the first one in list order that overlaps it.
pub fn resolve(
    formations: &mut FormationController,
    projectiles: &mut ProjectileManager,
    ship: &Rect,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    let player_bullets = &mut projectiles.player;

    for group in formations.groups.iter_mut() {
        group.enemies.retain(|enemy| {
            if enemy.rect.overlaps(ship) {
                report.rammed = true;
            }
            match player_bullets
                .iter()
                .position(|b| b.rect.overlaps(&enemy.rect))
            {
                Some(hit) => {
                    player_bullets.remove(hit);
                    report.kills += 1;
                    false
                }
                None => true,
            }
        });
    }

    let before = projectiles.enemy.len();
    projectiles.enemy.retain(|b| !b.rect.overlaps(ship));
    report.shot = projectiles.enemy.len() < before;

    report
}
