//! Lateral spawn segments.
//!
//! The field is cut into `segment_count` equal vertical strips. A formation
//! group spawned into a strip keeps it until the group is wiped out, so two
//! segment-owned groups never start on top of each other.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub usize);

/// Horizontal range a group leader's x is clamped into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentBounds {
    pub lo: f32,
    pub hi: f32,
}

impl SegmentBounds {
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.lo, self.hi)
    }

    pub fn contains(&self, x: f32) -> bool {
        x >= self.lo && x <= self.hi
    }
}

#[derive(Clone, Debug)]
pub struct SegmentAllocator {
    occupied: Vec<bool>,
    segment_width: f32,
    enemy_width: f32,
}

impl SegmentAllocator {
    /// `segment_count` must be non-zero; `FieldConfig::validate` guarantees it.
    pub fn new(field_width: f32, segment_count: usize, enemy_width: f32) -> Self {
        Self {
            occupied: vec![false; segment_count],
            segment_width: field_width / segment_count as f32,
            enemy_width,
        }
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    pub fn free_count(&self) -> usize {
        self.occupied.iter().filter(|&&o| !o).count()
    }

    pub fn is_occupied(&self, id: SegmentId) -> bool {
        self.occupied.get(id.0).copied().unwrap_or(false)
    }

    /// Pick a free segment uniformly at random and mark it taken.
    pub fn try_reserve(&mut self, rng: &mut impl Rng) -> Option<SegmentId> {
        let free: Vec<usize> = self
            .occupied
            .iter()
            .enumerate()
            .filter(|(_, &o)| !o)
            .map(|(i, _)| i)
            .collect();
        let &index = free.choose(rng)?;
        self.occupied[index] = true;
        Some(SegmentId(index))
    }

    /// Free a segment. Releasing `None`, an already free segment or an
    /// unknown id does nothing.
    pub fn release(&mut self, id: Option<SegmentId>) {
        if let Some(slot) = id.and_then(|id| self.occupied.get_mut(id.0)) {
            *slot = false;
        }
    }

    /// `[i * w, (i + 1) * w - enemy_width]` for segment width `w`.
    pub fn bounds(&self, id: SegmentId) -> SegmentBounds {
        let lo = id.0 as f32 * self.segment_width;
        SegmentBounds {
            lo,
            hi: lo + self.segment_width - self.enemy_width,
        }
    }

    /// Spawn x that centres an enemy in the segment.
    pub fn spawn_x(&self, id: SegmentId) -> f32 {
        id.0 as f32 * self.segment_width + self.segment_width / 2.0 - self.enemy_width / 2.0
    }
}
