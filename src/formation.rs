//! Enemy formation groups: spawning, leader kinematics and the trailing snake.
//!
//! Followers are never integrated frame to frame. Each frame their position
//! is recomputed from the leader, the group's age and their slot, so the
//! snake shape is a pure function of `(leader, time_since_spawn, index, size)`.

use glam::Vec2;
use log::debug;
use rand::Rng;

use crate::config::FieldConfig;
use crate::difficulty::Pacing;
use crate::entities::{Enemy, FormationGroup, Level};
use crate::geometry::{steering, Rect};
use crate::projectiles::ProjectileManager;
use crate::segments::{SegmentAllocator, SegmentBounds, SegmentId};

/// Read-only inputs shared by every group update in a frame.
#[derive(Clone, Copy, Debug)]
pub struct StepContext<'a> {
    pub config: &'a FieldConfig,
    pub ship: Rect,
    /// Session seconds.
    pub now: f64,
    pub pacing: Pacing,
    /// Global duty-cycle gate.
    pub shooting: bool,
}

#[derive(Clone, Debug, Default)]
pub struct FormationController {
    pub groups: Vec<FormationGroup>,
    /// Session seconds of the last successful segment spawn.
    pub last_spawn_time: f64,
}

impl FormationController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_enemies(&self) -> usize {
        self.groups.iter().map(FormationGroup::len).sum()
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> + '_ {
        self.groups.iter().flat_map(|g| g.enemies.iter())
    }

    /// A single enemy that owns no segment and may drift across the whole
    /// field. Sessions open with one of these.
    pub fn spawn_free_roaming(&mut self, config: &FieldConfig, now: f64, rng: &mut impl Rng) {
        let bounds = SegmentBounds {
            lo: 0.0,
            hi: config.field_width - config.enemy_width,
        };
        let x = rng.gen_range(bounds.lo..=bounds.hi);
        self.groups.push(FormationGroup {
            enemies: vec![Enemy::new(x, 0.0, config, now)],
            segment: None,
            bounds,
        });
        debug!("free-roaming enemy spawned at x={x:.0}");
    }

    /// Spawn a group into a free segment if the spawn interval has passed,
    /// a segment is free and the enemy cap leaves room. Refusals are silent
    /// and leave the timer untouched so the next frame tries again.
    pub fn try_spawn(
        &mut self,
        segments: &mut SegmentAllocator,
        level: Level,
        now: f64,
        config: &FieldConfig,
        rng: &mut impl Rng,
    ) -> Option<SegmentId> {
        if now - self.last_spawn_time <= config.spawn_interval {
            return None;
        }
        if self.live_enemies() >= config.max_enemies {
            debug!("spawn deferred: {} enemies alive", self.live_enemies());
            return None;
        }
        let segment = segments.try_reserve(rng)?;

        let x = segments.spawn_x(segment);
        let enemies: Vec<Enemy> = if level > Level::One {
            // Column parked above the top edge; it unfolds into the snake
            // as soon as the followers are first positioned.
            let pitch = config.enemy_delay_height * 2.0;
            (0..config.column_size)
                .map(|i| Enemy::new(x, -pitch - i as f32 * pitch, config, now))
                .collect()
        } else {
            vec![Enemy::new(x, 0.0, config, now)]
        };

        debug!(
            "spawned {} enemies in segment {} at x={x:.0}",
            enemies.len(),
            segment.0
        );
        self.groups.push(FormationGroup {
            enemies,
            segment: Some(segment),
            bounds: segments.bounds(segment),
        });
        self.last_spawn_time = now;
        Some(segment)
    }

    /// Disband empty groups and hand their segments back. Returns how many
    /// groups were dropped.
    pub fn release_empty(&mut self, segments: &mut SegmentAllocator) -> usize {
        let before = self.groups.len();
        self.groups.retain(|group| {
            if group.is_empty() {
                segments.release(group.segment);
                debug!("group disbanded, segment {:?} released", group.segment);
                false
            } else {
                true
            }
        });
        before - self.groups.len()
    }

    /// Advance every group one frame. Returns the number of enemies that
    /// left the bottom of the field.
    pub fn step(
        &mut self,
        ctx: &StepContext<'_>,
        projectiles: &mut ProjectileManager,
        rng: &mut impl Rng,
    ) -> u32 {
        self.groups
            .iter_mut()
            .map(|group| step_group(group, ctx, projectiles, rng))
            .sum()
    }
}

/// Position of the member in slot `index` of a group of `group_size`.
/// Slot 0 is the leader itself.
pub fn follower_position(
    leader: Vec2,
    time_since_spawn: f64,
    index: usize,
    group_size: usize,
    advance_speed: f32,
    config: &FieldConfig,
) -> Vec2 {
    if index == 0 {
        return leader;
    }
    let phase = config.enemy_sine_speed * (time_since_spawn + index as f64 / group_size as f64);
    let x_offset = index as f32 * config.enemy_delay_height * phase.sin() as f32;
    let y_offset = advance_speed + index as f32 * config.enemy_height;
    leader + Vec2::new(x_offset, y_offset)
}

/// Lateral wobble, optional homing toward the ship, then clamp into bounds.
pub fn update_leader(leader: &mut Enemy, bounds: SegmentBounds, ctx: &StepContext<'_>) {
    let config = ctx.config;
    let time_since_spawn = ctx.now - leader.spawn_time;

    leader.rect.x += time_since_spawn.sin() as f32 * config.enemy_speed;

    let dir = steering(leader.rect.position(), ctx.ship.position());
    if config.field_height - leader.rect.y > config.homing_threshold {
        leader.rect.x += config.enemy_speed * dir.x;
        leader.rect.y += ctx.pacing.enemy_advance_speed * dir.y;
    }

    leader.rect.x = bounds.clamp(leader.rect.x);
}

/// One frame for one group. Empty groups are left for `release_empty`.
pub fn step_group(
    group: &mut FormationGroup,
    ctx: &StepContext<'_>,
    projectiles: &mut ProjectileManager,
    rng: &mut impl Rng,
) -> u32 {
    let size = group.enemies.len();
    let bounds = group.bounds;
    let Some(leader) = group.enemies.first_mut() else {
        return 0;
    };
    let time_since_spawn = ctx.now - leader.spawn_time;
    update_leader(leader, bounds, ctx);
    let anchor = leader.rect.position();

    for (index, enemy) in group.enemies.iter_mut().enumerate().skip(1) {
        let pos = follower_position(
            anchor,
            time_since_spawn,
            index,
            size,
            ctx.pacing.enemy_advance_speed,
            ctx.config,
        );
        enemy.rect.x = pos.x;
        enemy.rect.y = pos.y;
    }

    if ctx.shooting {
        for enemy in &group.enemies {
            if rng.gen::<f64>() < ctx.pacing.shooting_chance {
                projectiles.spawn_enemy_bullet(&enemy.rect, ctx.config);
            }
        }
    }

    let field_height = ctx.config.field_height;
    group.enemies.retain(|e| e.rect.y <= field_height);
    (size - group.enemies.len()) as u32
}
