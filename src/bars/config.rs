use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::error::ConfigError;

pub const DEFAULT_GROUP_LEVEL: i32 = 5;
pub const DEFAULT_SAMPLE_RATE: f64 = 44_100.0;
pub const DEFAULT_FREQUENCY_BIN_COUNT: usize = 1024;
pub const DEFAULT_MIN_FREQ: f64 = 20.0;
pub const DEFAULT_MAX_FREQ: f64 = 22_000.0;

/// Parameters of one bar layout.
///
/// `group_level` selects how many bars share an octave (1 = 1/24 octave,
/// 8 = one bar per octave) and is clamped to 1..=8 when used.
/// `sample_rate` and `frequency_bin_count` must describe the analyser that
/// feeds [`BarContext::update`](super::context::BarContext::update).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarConfig {
    pub group_level: i32,
    pub sample_rate: f64,
    pub frequency_bin_count: usize,
    pub min_freq: f64,
    pub max_freq: f64,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            group_level: DEFAULT_GROUP_LEVEL,
            sample_rate: DEFAULT_SAMPLE_RATE,
            frequency_bin_count: DEFAULT_FREQUENCY_BIN_COUNT,
            min_freq: DEFAULT_MIN_FREQ,
            max_freq: DEFAULT_MAX_FREQ,
        }
    }
}

impl BarConfig {
    pub fn with_group_level(mut self, group_level: i32) -> Self {
        self.group_level = group_level;
        self
    }

    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_frequency_bin_count(mut self, frequency_bin_count: usize) -> Self {
        self.frequency_bin_count = frequency_bin_count;
        self
    }

    pub fn with_freq_range(mut self, min_freq: f64, max_freq: f64) -> Self {
        self.min_freq = min_freq;
        self.max_freq = max_freq;
        self
    }

    /// Strict check for callers that want to report a bad configuration
    /// instead of silently getting an empty layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(ConfigError::InvalidSampleRate(self.sample_rate));
        }
        if self.frequency_bin_count == 0 {
            return Err(ConfigError::InvalidBinCount);
        }
        // NaN bounds compare as None
        match self.min_freq.partial_cmp(&self.max_freq) {
            Some(Ordering::Less) => Ok(()),
            _ => Err(ConfigError::InvalidRange {
                min_freq: self.min_freq,
                max_freq: self.max_freq,
            }),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
