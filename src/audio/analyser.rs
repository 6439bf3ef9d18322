use serde::{Deserialize, Serialize};

use crate::audio::fft::FftEngine;

/// Anything that can hand the bar layout one frame of byte magnitudes.
pub trait SpectrumSource {
    fn sample_rate(&self) -> f64;

    fn frequency_bin_count(&self) -> usize;

    /// Overwrites `out` (which must hold `frequency_bin_count()` bytes) with
    /// the current frame.
    fn fill_byte_frequency_data(&mut self, out: &mut [u8]);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyserConfig {
    pub fft_size: usize,
    /// Weight of the previous frame, 0..1.
    pub smoothing: f32,
    pub min_decibels: f32,
    pub max_decibels: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 8192,
            smoothing: 0.5,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

pub const MIN_FFT_SIZE: usize = 32;
pub const MAX_FFT_SIZE: usize = 32768;

/// Turns raw samples into smoothed byte magnitudes, one byte per bin, with
/// `[min_decibels, max_decibels]` mapped linearly onto 0..=255.
pub struct ByteAnalyser {
    sample_rate: f64,
    config: AnalyserConfig,
    fft: FftEngine,
    smoothed: Vec<f32>,
    samples: Vec<f32>,
}

impl ByteAnalyser {
    pub fn new(sample_rate: f64, config: AnalyserConfig) -> Self {
        let fft_size = config
            .fft_size
            .clamp(MIN_FFT_SIZE, MAX_FFT_SIZE)
            .next_power_of_two();
        if fft_size != config.fft_size {
            log::warn!("fft_size {} adjusted to {fft_size}", config.fft_size);
        }
        let config = AnalyserConfig {
            fft_size,
            smoothing: config.smoothing.clamp(0.0, 1.0),
            ..config
        };
        Self {
            sample_rate,
            fft: FftEngine::new(fft_size),
            smoothed: vec![0.0; fft_size / 2],
            samples: Vec::with_capacity(fft_size),
            config,
        }
    }

    pub fn config(&self) -> &AnalyserConfig {
        &self.config
    }

    /// Supplies the time-domain block analysed by the next frame.
    pub fn push_samples(&mut self, samples: &[f32]) {
        let keep = self.config.fft_size;
        self.samples.extend_from_slice(samples);
        if self.samples.len() > keep {
            let drop = self.samples.len() - keep;
            self.samples.drain(0..drop);
        }
    }

    fn analyse(&mut self) {
        let tau = self.config.smoothing;
        let mags = self.fft.magnitudes(&self.samples);
        for (s, &m) in self.smoothed.iter_mut().zip(mags) {
            *s = tau * *s + (1.0 - tau) * m;
        }
    }

    fn to_byte(&self, magnitude: f32) -> u8 {
        let db = 20.0 * magnitude.max(f32::MIN_POSITIVE).log10();
        let range = self.config.max_decibels - self.config.min_decibels;
        if range <= 0.0 {
            return 0;
        }
        let scaled = 255.0 * (db - self.config.min_decibels) / range;
        scaled.clamp(0.0, 255.0) as u8
    }
}

impl SpectrumSource for ByteAnalyser {
    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    fn frequency_bin_count(&self) -> usize {
        self.config.fft_size / 2
    }

    fn fill_byte_frequency_data(&mut self, out: &mut [u8]) {
        self.analyse();
        for (o, &m) in out.iter_mut().zip(&self.smoothed) {
            *o = self.to_byte(m);
        }
    }
}
