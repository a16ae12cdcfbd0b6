use crate::CONFY_APP_NAME;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SettingsError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("vertical band height must be positive and survive rounding, got {0}")]
    EmptyBand(f32),
    #[error("duration span must be positive and survive rounding, got {0} ms")]
    EmptyDurationSpan(f32),
    #[error("minimum duration must not be negative, got {0} ms")]
    NegativeDuration(f32),
    #[error("max delay must be positive, got {0} ms")]
    EmptyDelayRange(f32),
    #[error("max rotation must be positive, got {0} deg")]
    EmptyRotationRange(f32),
    #[error("fallback viewport width must be positive, got {0}")]
    BadFallbackWidth(f32),
    #[error("registry capacity must be at least 1")]
    ZeroCapacity,
    #[error("input length limit must be at least 1")]
    ZeroInputLimit,
}

/// Where new entries start, where they go and how long they take
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSettings {
    pub band_top: f32,
    pub band_height: f32,
    pub start_x: f32,
    pub exit_margin: f32, // added to viewport width for the end x
    pub duration_min_ms: f32,
    pub duration_span_ms: f32,
    pub max_delay_ms: f32,
    pub max_rotation_deg: f32,
    pub fallback_viewport_width: f32,
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            band_top: 50.0,
            band_height: 400.0,
            start_x: -100.0,
            exit_margin: 100.0,
            duration_min_ms: 3000.0,
            duration_span_ms: 5000.0,
            max_delay_ms: 500.0,
            max_rotation_deg: 10.0,
            fallback_viewport_width: 1200.0,
        }
    }
}

impl SpawnSettings {
    pub fn load() -> Self {
        load_validated("spawn", Self::validate)
    }

    pub fn save(&self) {
        store("spawn", self);
    }

    pub fn band_bottom(&self) -> f32 {
        self.band_top + self.band_height
    }

    pub fn duration_max_ms(&self) -> f32 {
        self.duration_min_ms + self.duration_span_ms
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            ("band_top", self.band_top),
            ("band_height", self.band_height),
            ("start_x", self.start_x),
            ("exit_margin", self.exit_margin),
            ("duration_min_ms", self.duration_min_ms),
            ("duration_span_ms", self.duration_span_ms),
            ("max_delay_ms", self.max_delay_ms),
            ("max_rotation_deg", self.max_rotation_deg),
            ("fallback_viewport_width", self.fallback_viewport_width),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(SettingsError::NotFinite(name));
            }
        }

        // The sampled ranges must stay non-empty after f32 rounding
        if self.band_height <= 0.0 || self.band_bottom() <= self.band_top {
            return Err(SettingsError::EmptyBand(self.band_height));
        }
        if self.duration_min_ms < 0.0 {
            return Err(SettingsError::NegativeDuration(self.duration_min_ms));
        }
        if self.duration_span_ms <= 0.0 || self.duration_max_ms() <= self.duration_min_ms {
            return Err(SettingsError::EmptyDurationSpan(self.duration_span_ms));
        }
        if self.max_delay_ms <= 0.0 {
            return Err(SettingsError::EmptyDelayRange(self.max_delay_ms));
        }
        if self.max_rotation_deg <= 0.0 {
            return Err(SettingsError::EmptyRotationRange(self.max_rotation_deg));
        }
        if self.fallback_viewport_width <= 0.0 {
            return Err(SettingsError::BadFallbackWidth(
                self.fallback_viewport_width,
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrySettings {
    pub capacity: usize,
    pub grace_ms: u64, // extra time after the last keyframe before removal
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            capacity: 5,
            grace_ms: 1000,
        }
    }
}

impl RegistrySettings {
    pub fn load() -> Self {
        load_validated("registry", Self::validate)
    }

    pub fn save(&self) {
        store("registry", self);
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.capacity == 0 {
            return Err(SettingsError::ZeroCapacity);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiSettings {
    pub max_input_chars: usize,
    pub show_settings_window: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            max_input_chars: 50,
            show_settings_window: false,
        }
    }
}

impl UiSettings {
    pub fn load() -> Self {
        load_validated("ui", Self::validate)
    }

    pub fn save(&self) {
        store("ui", self);
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.max_input_chars == 0 {
            return Err(SettingsError::ZeroInputLimit);
        }
        Ok(())
    }
}

fn load_validated<T>(name: &str, validate: fn(&T) -> Result<(), SettingsError>) -> T
where
    T: Default + Serialize + for<'de> Deserialize<'de>,
{
    let loaded: T = match confy::load(CONFY_APP_NAME, name) {
        Ok(value) => value,
        Err(e) => {
            log::warn!("Failed to load '{}' settings, using defaults: {}", name, e);
            return T::default();
        }
    };

    match validate(&loaded) {
        Ok(()) => loaded,
        Err(e) => {
            log::warn!("Invalid '{}' settings, using defaults: {}", name, e);
            T::default()
        }
    }
}

fn store<T: Serialize>(name: &str, value: &T) {
    if let Err(e) = confy::store(CONFY_APP_NAME, name, value) {
        log::warn!("Failed to store '{}' settings: {}", name, e);
    }
}

// Aggregate struct for convenience
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub spawn: SpawnSettings,
    pub registry: RegistrySettings,
    pub ui: UiSettings,
}

impl Settings {
    pub fn load() -> Self {
        let settings = Self {
            spawn: SpawnSettings::load(),
            registry: RegistrySettings::load(),
            ui: UiSettings::load(),
        };
        log::info!(
            "Settings loaded: capacity {}, grace {} ms, input limit {}",
            settings.registry.capacity,
            settings.registry.grace_ms,
            settings.ui.max_input_chars
        );
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert_eq!(SpawnSettings::default().validate(), Ok(()));
        assert_eq!(RegistrySettings::default().validate(), Ok(()));
        assert_eq!(UiSettings::default().validate(), Ok(()));
    }

    #[test]
    fn test_default_ranges() {
        let spawn = SpawnSettings::default();
        assert_eq!(spawn.band_bottom(), 450.0);
        assert_eq!(spawn.duration_max_ms(), 8000.0);

        let registry = RegistrySettings::default();
        assert_eq!(registry.capacity, 5);
        assert_eq!(registry.grace_ms, 1000);
    }

    #[test]
    fn test_rejects_degenerate_ranges() {
        let spawn = SpawnSettings {
            duration_span_ms: 0.0,
            ..SpawnSettings::default()
        };
        assert_eq!(
            spawn.validate(),
            Err(SettingsError::EmptyDurationSpan(0.0))
        );

        let spawn = SpawnSettings {
            band_height: f32::NAN,
            ..SpawnSettings::default()
        };
        assert_eq!(spawn.validate(), Err(SettingsError::NotFinite("band_height")));

        let registry = RegistrySettings {
            capacity: 0,
            ..RegistrySettings::default()
        };
        assert_eq!(registry.validate(), Err(SettingsError::ZeroCapacity));
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let cases = [
            SpawnSettings {
                band_top: f32::NAN,
                ..SpawnSettings::default()
            },
            SpawnSettings {
                duration_min_ms: f32::INFINITY,
                ..SpawnSettings::default()
            },
            SpawnSettings {
                start_x: f32::NEG_INFINITY,
                ..SpawnSettings::default()
            },
            SpawnSettings {
                exit_margin: f32::NAN,
                ..SpawnSettings::default()
            },
        ];
        for spawn in cases {
            assert!(
                matches!(spawn.validate(), Err(SettingsError::NotFinite(_))),
                "{:?}",
                spawn
            );
        }
    }

    #[test]
    fn test_rejects_ranges_lost_to_rounding() {
        let spawn = SpawnSettings {
            duration_min_ms: 1.0e10,
            duration_span_ms: 1.0,
            ..SpawnSettings::default()
        };
        assert_eq!(spawn.validate(), Err(SettingsError::EmptyDurationSpan(1.0)));

        let spawn = SpawnSettings {
            band_top: 1.0e10,
            band_height: 1.0,
            ..SpawnSettings::default()
        };
        assert_eq!(spawn.validate(), Err(SettingsError::EmptyBand(1.0)));
    }

    #[test]
    fn test_validated_settings_sample_without_panicking() {
        use crate::animation::{RandomSampler, SpawnSampler};

        let extreme = SpawnSettings {
            band_top: -1.0e6,
            band_height: 0.5,
            duration_min_ms: 0.0,
            duration_span_ms: 0.001,
            max_delay_ms: 0.001,
            max_rotation_deg: 0.001,
            ..SpawnSettings::default()
        };
        assert_eq!(extreme.validate(), Ok(()));

        let mut sampler = RandomSampler::seeded(extreme, 5);
        for _ in 0..100 {
            let t = sampler.sample(800.0);
            assert!(t.duration_ms >= 0.0 && t.duration_ms < 0.001);
        }
    }
}
