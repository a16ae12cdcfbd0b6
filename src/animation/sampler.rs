// Random trajectory generation for new entries

use super::types::{Point, Rotation, Trajectory};
use crate::settings::SpawnSettings;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of trajectories for new entries.
///
/// The registry only talks to this trait so tests can pin the draws.
pub trait SpawnSampler {
    fn sample(&mut self, viewport_width: f32) -> Trajectory;

    /// Width used when the caller could not measure the viewport
    fn fallback_viewport_width(&self) -> f32;
}

/// Uniform draws from the ranges in [`SpawnSettings`]
pub struct RandomSampler<R: Rng = StdRng> {
    settings: SpawnSettings,
    rng: R,
}

impl RandomSampler<StdRng> {
    pub fn from_entropy(settings: SpawnSettings) -> Self {
        Self::new(settings, StdRng::from_entropy())
    }

    #[cfg(test)]
    pub fn seeded(settings: SpawnSettings, seed: u64) -> Self {
        Self::new(settings, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSampler<R> {
    pub fn new(settings: SpawnSettings, rng: R) -> Self {
        Self { settings, rng }
    }

    /// Applies to the next sample; validated settings are expected
    pub fn set_settings(&mut self, settings: SpawnSettings) {
        self.settings = settings;
    }

    fn band_y(&mut self) -> f32 {
        let s = &self.settings;
        self.rng.gen_range(s.band_top..s.band_bottom())
    }

    fn tilt(&mut self) -> f32 {
        let max = self.settings.max_rotation_deg;
        self.rng.gen_range(-max..max)
    }
}

impl<R: Rng> SpawnSampler for RandomSampler<R> {
    fn sample(&mut self, viewport_width: f32) -> Trajectory {
        let start_y = self.band_y();
        let end_y = self.band_y();

        let s = &self.settings;
        let duration_range = s.duration_min_ms..s.duration_max_ms();
        let max_delay_ms = s.max_delay_ms;
        let start_x = s.start_x;
        let end_x = viewport_width + s.exit_margin;

        let duration_ms = self.rng.gen_range(duration_range);
        let delay_ms = self.rng.gen_range(0.0..max_delay_ms);
        let rotation = Rotation {
            start_deg: self.tilt(),
            end_deg: self.tilt(),
        };

        Trajectory {
            start: Point::new(start_x, start_y),
            end: Point::new(end_x, end_y),
            duration_ms,
            delay_ms,
            rotation,
        }
    }

    fn fallback_viewport_width(&self) -> f32 {
        self.settings.fallback_viewport_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_stay_in_configured_ranges() {
        let settings = SpawnSettings::default();
        let mut sampler = RandomSampler::seeded(settings.clone(), 7);

        for _ in 0..1000 {
            let t = sampler.sample(1280.0);

            assert!((3000.0..8000.0).contains(&t.duration_ms), "{}", t.duration_ms);
            assert!((0.0..500.0).contains(&t.delay_ms), "{}", t.delay_ms);
            assert!((50.0..450.0).contains(&t.start.y), "{}", t.start.y);
            assert!((50.0..450.0).contains(&t.end.y), "{}", t.end.y);
            assert!((-10.0..10.0).contains(&t.rotation.start_deg));
            assert!((-10.0..10.0).contains(&t.rotation.end_deg));
            assert_eq!(t.start.x, -100.0);
            assert_eq!(t.end.x, 1380.0);
        }
    }

    #[test]
    fn test_same_seed_same_draws() {
        let mut a = RandomSampler::seeded(SpawnSettings::default(), 42);
        let mut b = RandomSampler::seeded(SpawnSettings::default(), 42);

        for _ in 0..10 {
            assert_eq!(a.sample(800.0), b.sample(800.0));
        }
    }

    #[test]
    fn test_settings_change_applies_to_next_sample() {
        let mut sampler = RandomSampler::seeded(SpawnSettings::default(), 3);
        sampler.set_settings(SpawnSettings {
            band_top: 10.0,
            band_height: 5.0,
            exit_margin: 0.0,
            ..SpawnSettings::default()
        });

        let t = sampler.sample(500.0);
        assert!((10.0..15.0).contains(&t.start.y));
        assert_eq!(t.end.x, 500.0);
    }
}
