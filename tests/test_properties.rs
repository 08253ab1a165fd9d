use glam::Vec2;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use wave_shooter::config::FieldConfig;
use wave_shooter::difficulty::{Difficulty, Pacing};
use wave_shooter::entities::{Enemy, Level};
use wave_shooter::formation::{follower_position, update_leader, StepContext};
use wave_shooter::geometry::Rect;
use wave_shooter::segments::{SegmentAllocator, SegmentId};

proptest! {
    #[test]
    fn leader_stays_inside_its_segment(
        segment in 0usize..5,
        x in -500.0f32..2000.0,
        y in -600.0f32..1000.0,
        age in 0.0f64..10_000.0,
        ship_x in 0.0f32..1340.0,
        fast in any::<bool>(),
    ) {
        let cfg = FieldConfig::default();
        let segs = SegmentAllocator::new(cfg.field_width, cfg.segment_count, cfg.enemy_width);
        let bounds = segs.bounds(SegmentId(segment));
        let pacing = if fast {
            Pacing { shooting_interval: 1.0, shooting_chance: 0.04, enemy_advance_speed: 1.0 }
        } else {
            Pacing::default()
        };
        let ctx = StepContext {
            config: &cfg,
            ship: Rect::new(ship_x, 930.0, 60.0, 50.0),
            now: age,
            pacing,
            shooting: false,
        };
        let mut leader = Enemy::new(x, y, &cfg, 0.0);
        update_leader(&mut leader, bounds, &ctx);

        prop_assert!(leader.rect.x >= bounds.lo && leader.rect.x <= bounds.hi);
        prop_assert!(leader.rect.y.is_finite());
        prop_assert!(leader.rect.y >= y);
    }

    #[test]
    fn follower_position_is_pure_and_finite(
        lx in -1000.0f32..2000.0,
        ly in -1000.0f32..2000.0,
        t in 0.0f64..100_000.0,
        size in 1usize..8,
        slot in 0usize..8,
        advance in 0.0f32..2.0,
    ) {
        let cfg = FieldConfig::default();
        let index = slot % size;
        let leader = Vec2::new(lx, ly);
        let a = follower_position(leader, t, index, size, advance, &cfg);
        let b = follower_position(leader, t, index, size, advance, &cfg);

        prop_assert_eq!(a, b);
        prop_assert!(a.is_finite());
        // Lateral swing never exceeds the slot's amplitude
        let amplitude = index as f32 * cfg.enemy_delay_height;
        prop_assert!((a.x - lx).abs() <= amplitude + 1e-2);
        if index > 0 {
            prop_assert!(a.y > ly);
        }
    }

    #[test]
    fn level_is_monotonic(kills in prop::collection::vec(0u32..40, 1..30)) {
        let mut d = Difficulty::default();
        let mut best = Level::One;
        for k in kills {
            d.update_level(k);
            prop_assert!(d.level >= best);
            best = d.level;
        }
    }

    #[test]
    fn segments_are_never_double_booked(
        seed in any::<u64>(),
        ops in prop::collection::vec(prop::option::of(0usize..5), 1..60),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut segs = SegmentAllocator::new(1400.0, 5, 50.0);
        let mut held: Vec<SegmentId> = Vec::new();

        // `None` reserves, `Some(i)` releases segment i
        for op in ops {
            match op {
                None => {
                    let got = segs.try_reserve(&mut rng);
                    match got {
                        Some(id) => {
                            prop_assert!(!held.contains(&id));
                            held.push(id);
                        }
                        None => prop_assert_eq!(held.len(), 5),
                    }
                }
                Some(i) => {
                    segs.release(Some(SegmentId(i)));
                    held.retain(|id| id.0 != i);
                }
            }
            prop_assert_eq!(segs.free_count(), 5 - held.len());
            for id in &held {
                prop_assert!(segs.is_occupied(*id));
            }
        }
    }
}
