// Animation data types
// One entry per flying text label

use std::time::{Duration, Instant};

/// Identifier assigned by the registry, starts at 1 and never repeats
pub type EntryId = u64;

/// Point in stage-local pixels (origin at the stage's top-left corner)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation, `t` is not clamped
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Tilt of the label at the first and last keyframe, in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub start_deg: f32,
    pub end_deg: f32,
}

/// Everything the sampler draws for a new entry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trajectory {
    pub start: Point,
    pub end: Point,
    pub duration_ms: f32,
    pub delay_ms: f32,
    pub rotation: Rotation,
}

/// One in-flight text animation. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationEntry {
    pub id: EntryId,
    pub text: String,
    pub start: Point,
    pub end: Point,
    pub duration_ms: f32,
    pub delay_ms: f32,
    pub rotation: Rotation,
    pub spawned_at: Instant,
}

impl AnimationEntry {
    pub fn new(id: EntryId, text: String, trajectory: Trajectory, spawned_at: Instant) -> Self {
        Self {
            id,
            text,
            start: trajectory.start,
            end: trajectory.end,
            duration_ms: trajectory.duration_ms,
            delay_ms: trajectory.delay_ms,
            rotation: trajectory.rotation,
            spawned_at,
        }
    }

    /// Delay plus duration, i.e. when the last keyframe is reached
    pub fn visible_lifetime(&self) -> Duration {
        Duration::from_secs_f64((self.delay_ms as f64 + self.duration_ms as f64) / 1000.0)
    }

    /// Time since the entry was created, zero if `now` is earlier
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.spawned_at)
    }
}
