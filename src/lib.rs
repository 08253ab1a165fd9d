//! Wave Shooter - enemy-wave simulation for a fixed-timestep arcade shooter
//!
//! Core modules:
//! - `segments`: lateral spawn slots and their occupancy
//! - `formation`: leader/follower snake groups, spawning, enemy fire
//! - `projectiles`: player and enemy bullets
//! - `collision`: per-frame overlap resolution
//! - `difficulty`: level progression and the shooting duty cycle
//! - `compute`: the session loop tying them together
//!
//! Nothing here draws or polls input; front-ends read rectangles off
//! `SessionState` and feed `FrameInput` snapshots into `compute::tick`.

pub mod clock;
pub mod collision;
pub mod compute;
pub mod config;
pub mod difficulty;
pub mod entities;
pub mod formation;
pub mod geometry;
pub mod projectiles;
pub mod segments;

pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{ConfigError, FieldConfig};
pub use entities::{FrameInput, GameStatus, Level, SessionState};
pub use geometry::Rect;
