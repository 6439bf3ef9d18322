use thiserror::Error;

/// Reasons a [`BarConfig`](super::config::BarConfig) cannot produce bars.
///
/// Only returned by the strict [`BarConfig::validate`](super::config::BarConfig::validate);
/// layout building itself treats these as an empty layout.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("min_freq ({min_freq} Hz) must be below max_freq ({max_freq} Hz)")]
    InvalidRange { min_freq: f64, max_freq: f64 },

    #[error("sample_rate must be a positive number of Hz, got {0}")]
    InvalidSampleRate(f64),

    #[error("frequency_bin_count must be greater than zero")]
    InvalidBinCount,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    #[error("magnitude buffer has {actual} bins, layout was built for {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}
