//! Face configuration
//!
//! Every tunable has a default, so an empty TOML table or JSON object is a
//! valid configuration.

use crate::error::{FaceError, Result};
use ocelli_paint::Filter;
use serde::{Deserialize, Serialize};

/// Top-level face configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct FaceConfig {
    /// Seed for idle delays, look directions and background phases
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Period of the command dispatch tick
    #[serde(default = "default_dispatch_interval")]
    pub dispatch_interval_ms: f64,
    /// Transitions kept for diagnostics
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub dots: DotFieldConfig,
    #[serde(default = "default_eye_bloom")]
    pub eye_bloom: BloomConfig,
    #[serde(default)]
    pub background: BackgroundConfig,
}

fn default_seed() -> u64 {
    0x0ce1_1100
}

fn default_dispatch_interval() -> f64 {
    1000.0
}

fn default_history_limit() -> usize {
    32
}

fn default_eye_bloom() -> BloomConfig {
    BloomConfig {
        intensity: 0.5,
        threshold: 0.1,
        scale: 0.2,
    }
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            dispatch_interval_ms: default_dispatch_interval(),
            history_limit: default_history_limit(),
            timing: TimingConfig::default(),
            dots: DotFieldConfig::default(),
            eye_bloom: default_eye_bloom(),
            background: BackgroundConfig::default(),
        }
    }
}

impl FaceConfig {
    /// Reject values the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(FaceError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        }

        positive("dispatch_interval_ms", self.dispatch_interval_ms)?;

        let t = &self.timing;
        positive("timing.idle_delay_min_ms", t.idle_delay_min_ms)?;
        positive("timing.idle_delay_max_ms", t.idle_delay_max_ms)?;
        if t.idle_delay_max_ms <= t.idle_delay_min_ms {
            return Err(FaceError::InvalidConfig(format!(
                "timing.idle_delay_max_ms ({}) must exceed idle_delay_min_ms ({})",
                t.idle_delay_max_ms, t.idle_delay_min_ms
            )));
        }
        for (name, value) in [
            ("timing.blink_ms", t.blink_ms),
            ("timing.look_ms", t.look_ms),
            ("timing.recenter_ms", t.recenter_ms),
            ("timing.nod_ms", t.nod_ms),
            ("timing.hop_ms", t.hop_ms),
            ("timing.sleep_close_ms", t.sleep_close_ms),
            ("timing.breath_period_ms", t.breath_period_ms),
            ("timing.smile_ms", t.smile_ms),
            ("timing.cancel_smile_ms", t.cancel_smile_ms),
            ("timing.think_ramp_ms", t.think_ramp_ms),
            ("timing.think_period_ms", t.think_period_ms),
        ] {
            positive(name, value as f64)?;
        }
        if t.cancel_think_wait_ms < 0.0 {
            return Err(FaceError::InvalidConfig(
                "timing.cancel_think_wait_ms must not be negative".to_string(),
            ));
        }
        if t.nod_cycles == 0 {
            return Err(FaceError::InvalidConfig(
                "timing.nod_cycles must be at least 1".to_string(),
            ));
        }

        positive("dots.pitch", self.dots.pitch as f64)?;
        if self.dots.min_size > self.dots.max_size {
            return Err(FaceError::InvalidConfig(
                "dots.min_size must not exceed dots.max_size".to_string(),
            ));
        }
        positive("background.pitch", self.background.pitch as f64)?;
        let speed = self.background.speed;
        if !(speed.is_finite() && speed >= 0.0) {
            return Err(FaceError::InvalidConfig(format!(
                "background.speed must be a non-negative number, got {speed}"
            )));
        }
        Ok(())
    }
}

/// Durations of every timed behaviour, in milliseconds
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    pub idle_delay_min_ms: f64,
    pub idle_delay_max_ms: f64,
    pub blink_ms: f32,
    pub look_ms: f32,
    pub recenter_ms: f32,
    pub nod_ms: f32,
    pub nod_cycles: u32,
    pub hop_ms: f32,
    pub sleep_close_ms: f32,
    pub breath_period_ms: f32,
    pub breath_amplitude: f32,
    pub smile_ms: f32,
    pub cancel_smile_ms: f32,
    pub cancel_think_wait_ms: f64,
    pub think_ramp_ms: f32,
    pub think_period_ms: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            idle_delay_min_ms: 1500.0,
            idle_delay_max_ms: 5500.0,
            blink_ms: 1500.0,
            look_ms: 500.0,
            recenter_ms: 300.0,
            nod_ms: 2500.0,
            nod_cycles: 2,
            hop_ms: 1500.0,
            sleep_close_ms: 1000.0,
            breath_period_ms: 4000.0,
            breath_amplitude: 3.0,
            smile_ms: 1000.0,
            cancel_smile_ms: 500.0,
            cancel_think_wait_ms: 300.0,
            think_ramp_ms: 500.0,
            think_period_ms: 1500.0,
        }
    }
}

/// Halftone dot field drawn inside each eye
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DotFieldConfig {
    /// Grid pitch in pixels
    pub pitch: f32,
    /// Elliptical distance ratios (x:y)
    pub ratio_x: f32,
    pub ratio_y: f32,
    /// Dot diameter range
    pub min_size: f32,
    pub max_size: f32,
    pub radial_weight: f32,
    pub vertical_weight: f32,
}

impl Default for DotFieldConfig {
    fn default() -> Self {
        Self {
            pitch: 10.0,
            ratio_x: 10.0,
            ratio_y: 11.0,
            min_size: 2.0,
            max_size: 12.0,
            radial_weight: 0.4,
            vertical_weight: 0.6,
        }
    }
}

/// Bloom post-filter parameters
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct BloomConfig {
    pub intensity: f32,
    pub threshold: f32,
    pub scale: f32,
}

impl BloomConfig {
    pub fn filter(&self) -> Filter {
        Filter::bloom(self.intensity, self.threshold, self.scale)
    }
}

/// Ambient particle field behind the eyes
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct BackgroundConfig {
    pub enabled: bool,
    pub pitch: f32,
    pub min_size: f32,
    pub max_size: f32,
    /// Probability that a grid cell holds a dot
    pub density: f32,
    pub alpha: f32,
    /// Phase advance per millisecond, in radians
    pub speed: f32,
    /// Fraction of the size range a dot pulses through
    pub wave_amplitude: f32,
    pub bloom: BloomConfig,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            pitch: 50.0,
            min_size: 3.0,
            max_size: 7.0,
            density: 1.0,
            alpha: 0.5,
            speed: 0.0005,
            wave_amplitude: 0.5,
            bloom: BloomConfig {
                intensity: 0.3,
                threshold: 0.2,
                scale: 0.5,
            },
        }
    }
}
