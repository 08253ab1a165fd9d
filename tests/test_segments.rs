use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use wave_shooter::segments::*;

fn allocator() -> SegmentAllocator {
    SegmentAllocator::new(1400.0, 5, 50.0)
}

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

#[test]
fn new_allocator_is_all_free() {
    let segs = allocator();
    assert_eq!(segs.len(), 5);
    assert_eq!(segs.free_count(), 5);
    assert!((0..5).all(|i| !segs.is_occupied(SegmentId(i))));
}

#[test]
fn reserve_hands_out_each_segment_once() {
    let mut segs = allocator();
    let mut rng = seeded_rng();
    let mut seen = HashSet::new();
    for _ in 0..5 {
        let id = segs.try_reserve(&mut rng).expect("free segment");
        assert!(seen.insert(id), "segment {id:?} handed out twice");
        assert!(segs.is_occupied(id));
    }
    assert_eq!(segs.free_count(), 0);
    assert_eq!(segs.try_reserve(&mut rng), None);
}

#[test]
fn reserve_picks_the_only_free_segment() {
    let mut segs = allocator();
    let mut rng = seeded_rng();
    let mut taken = Vec::new();
    for _ in 0..4 {
        taken.push(segs.try_reserve(&mut rng).unwrap());
    }
    let last = (0..5).map(SegmentId).find(|id| !taken.contains(id)).unwrap();
    assert_eq!(segs.try_reserve(&mut rng), Some(last));
}

#[test]
fn reserve_is_spread_across_segments() {
    let mut rng = seeded_rng();
    let mut hits = [0u32; 5];
    for _ in 0..500 {
        let mut segs = allocator();
        let id = segs.try_reserve(&mut rng).unwrap();
        hits[id.0] += 1;
    }
    assert!(hits.iter().all(|&h| h > 50), "skewed choice: {hits:?}");
}

#[test]
fn release_twice_is_a_noop() {
    let mut segs = allocator();
    let mut rng = seeded_rng();
    let id = segs.try_reserve(&mut rng).unwrap();
    segs.release(Some(id));
    assert!(!segs.is_occupied(id));
    segs.release(Some(id));
    assert!(!segs.is_occupied(id));
    assert_eq!(segs.free_count(), 5);
}

#[test]
fn release_none_and_unknown_ids_are_ignored() {
    let mut segs = allocator();
    let mut rng = seeded_rng();
    let id = segs.try_reserve(&mut rng).unwrap();
    segs.release(None);
    segs.release(Some(SegmentId(99)));
    assert!(segs.is_occupied(id));
    assert_eq!(segs.free_count(), 4);
    assert!(!segs.is_occupied(SegmentId(99)));
}

#[test]
fn released_segment_can_be_reserved_again() {
    let mut segs = allocator();
    let mut rng = seeded_rng();
    let ids: Vec<_> = (0..5).map(|_| segs.try_reserve(&mut rng).unwrap()).collect();
    segs.release(Some(ids[2]));
    assert_eq!(segs.try_reserve(&mut rng), Some(ids[2]));
}

#[test]
fn bounds_leave_room_for_an_enemy() {
    let segs = allocator();
    assert_eq!(segs.bounds(SegmentId(0)), SegmentBounds { lo: 0.0, hi: 230.0 });
    assert_eq!(segs.bounds(SegmentId(4)), SegmentBounds { lo: 1120.0, hi: 1350.0 });
}

#[test]
fn neighbouring_bounds_do_not_overlap() {
    let segs = allocator();
    for i in 0..4 {
        let a = segs.bounds(SegmentId(i));
        let b = segs.bounds(SegmentId(i + 1));
        // An enemy at a.hi ends exactly where b starts
        assert!(a.hi + 50.0 <= b.lo);
    }
}

#[test]
fn spawn_x_centres_enemy_in_segment() {
    let segs = allocator();
    assert_eq!(segs.spawn_x(SegmentId(0)), 115.0);
    assert_eq!(segs.spawn_x(SegmentId(2)), 675.0);
    let b = segs.bounds(SegmentId(2));
    assert!(b.contains(segs.spawn_x(SegmentId(2))));
}

#[test]
fn bounds_clamp() {
    let b = SegmentBounds { lo: 10.0, hi: 20.0 };
    assert_eq!(b.clamp(5.0), 10.0);
    assert_eq!(b.clamp(15.0), 15.0);
    assert_eq!(b.clamp(25.0), 20.0);
}
