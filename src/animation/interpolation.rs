// Keyframe evaluation for a single entry
//
// Linear translation from start to end over the duration, rotation lerped
// between the two stored angles, opacity ramps in over the first 10% and out
// over the last 10%. Before the delay has passed nothing is shown; after the
// duration the last keyframe holds (fully transparent) until removal.

use super::types::{AnimationEntry, Point};
use std::time::Instant;

const FADE_IN_END: f32 = 0.1;
const FADE_OUT_START: f32 = 0.9;

/// Where and how to draw an entry at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub position: Point,
    pub rotation_deg: f32,
    pub opacity: f32,
}

/// Progress through the keyframes in `[0, 1]`, `None` while still delayed
pub fn progress(entry: &AnimationEntry, now: Instant) -> Option<f32> {
    let elapsed_ms = entry.elapsed(now).as_secs_f32() * 1000.0;
    if elapsed_ms < entry.delay_ms {
        return None;
    }
    if entry.duration_ms <= 0.0 {
        return Some(1.0);
    }
    Some(((elapsed_ms - entry.delay_ms) / entry.duration_ms).clamp(0.0, 1.0))
}

/// Opacity for a given progress
pub fn opacity_at(t: f32) -> f32 {
    if t <= 0.0 || t >= 1.0 {
        0.0
    } else if t < FADE_IN_END {
        t / FADE_IN_END
    } else if t <= FADE_OUT_START {
        1.0
    } else {
        (1.0 - t) / (1.0 - FADE_OUT_START)
    }
}

/// Evaluates the entry's keyframes at `now`. Returns `None` when the entry
/// should not be drawn at all.
pub fn frame_at(entry: &AnimationEntry, now: Instant) -> Option<Frame> {
    let t = progress(entry, now)?;
    let opacity = opacity_at(t);
    if opacity <= 0.0 {
        return None;
    }

    let rotation = entry.rotation;
    Some(Frame {
        position: entry.start.lerp(entry.end, t),
        rotation_deg: rotation.start_deg + (rotation.end_deg - rotation.start_deg) * t,
        opacity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::types::{Rotation, Trajectory};
    use std::time::Duration;

    fn entry_at(spawned_at: Instant) -> AnimationEntry {
        let trajectory = Trajectory {
            start: Point::new(-100.0, 100.0),
            end: Point::new(900.0, 300.0),
            duration_ms: 4000.0,
            delay_ms: 200.0,
            rotation: Rotation {
                start_deg: -10.0,
                end_deg: 10.0,
            },
        };
        AnimationEntry::new(1, "hello".to_string(), trajectory, spawned_at)
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_hidden_during_delay() {
        let t0 = Instant::now();
        let entry = entry_at(t0);

        assert_eq!(progress(&entry, t0), None);
        assert_eq!(progress(&entry, t0 + Duration::from_millis(199)), None);
        assert_eq!(frame_at(&entry, t0 + Duration::from_millis(100)), None);
    }

    #[test]
    fn test_midpoint_frame() {
        let t0 = Instant::now();
        let entry = entry_at(t0);

        let frame = frame_at(&entry, t0 + Duration::from_millis(2200)).unwrap();
        assert!(close(frame.position.x, 400.0), "{:?}", frame);
        assert!(close(frame.position.y, 200.0), "{:?}", frame);
        assert!(close(frame.rotation_deg, 0.0), "{:?}", frame);
        assert_eq!(frame.opacity, 1.0);
    }

    #[test]
    fn test_opacity_keyframes() {
        assert_eq!(opacity_at(0.0), 0.0);
        assert!(close(opacity_at(0.05), 0.5));
        assert_eq!(opacity_at(0.1), 1.0);
        assert_eq!(opacity_at(0.5), 1.0);
        assert_eq!(opacity_at(0.9), 1.0);
        assert!(close(opacity_at(0.95), 0.5));
        assert_eq!(opacity_at(1.0), 0.0);
    }

    #[test]
    fn test_holds_last_keyframe_after_duration() {
        let t0 = Instant::now();
        let entry = entry_at(t0);

        assert_eq!(progress(&entry, t0 + Duration::from_millis(9000)), Some(1.0));
        assert_eq!(frame_at(&entry, t0 + Duration::from_millis(9000)), None);
    }
}
