use rustfft::{num_complex::Complex, FftPlanner};
use std::sync::Arc;

/// Windowed forward FFT over a fixed block size with reusable buffers.
pub struct FftEngine {
    fft_size: usize,
    window: Vec<f32>,
    fft: Arc<dyn rustfft::Fft<f32>>,
    buf: Vec<Complex<f32>>,
    mags: Vec<f32>,
}

impl FftEngine {
    pub fn new(fft_size: usize) -> Self {
        let mut planner = FftPlanner::<f32>::new();
        let fft = planner.plan_fft_forward(fft_size);
        let window = blackman_window(fft_size);
        let buf = vec![Complex::new(0.0, 0.0); fft_size];
        let mags = vec![0.0f32; fft_size / 2];
        Self {
            fft_size,
            window,
            fft,
            buf,
            mags,
        }
    }

    pub fn fft_size(&self) -> usize {
        self.fft_size
    }

    /// Magnitudes of the first `fft_size / 2` bins, scaled by `1 / fft_size`.
    /// Uses the most recent `fft_size` samples of `input`, zero-padding at the
    /// front when fewer are available.
    pub fn magnitudes(&mut self, input: &[f32]) -> &[f32] {
        let tail = &input[input.len().saturating_sub(self.fft_size)..];
        let pad = self.fft_size - tail.len();
        for i in 0..self.fft_size {
            let x = if i < pad { 0.0 } else { tail[i - pad] };
            self.buf[i] = Complex::new(x * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buf);

        let scale = 1.0 / self.fft_size as f32;
        for (m, c) in self.mags.iter_mut().zip(&self.buf) {
            *m = c.norm() * scale;
        }
        &self.mags
    }
}

fn blackman_window(n: usize) -> Vec<f32> {
    const A0: f32 = 0.42;
    const A1: f32 = 0.5;
    const A2: f32 = 0.08;
    let mut w = vec![0.0; n];
    for (i, v) in w.iter_mut().enumerate() {
        let x = 2.0 * std::f32::consts::PI * i as f32 / n as f32;
        *v = A0 - A1 * x.cos() + A2 * (2.0 * x).cos();
    }
    w
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f32, sample_rate: f32, n: usize) -> Vec<f32> {
        (0..n)
            .map(|i| (2.0 * std::f32::consts::PI * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn sine_peaks_in_its_bin() {
        let mut fft = FftEngine::new(1024);
        // bin 64 of a 1024-point transform at 48 kHz
        let mags = fft.magnitudes(&sine(3000.0, 48_000.0, 1024));
        assert_eq!(mags.len(), 512);
        let peak = mags
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i);
        assert_eq!(peak, Some(64));
    }

    #[test]
    fn short_input_is_padded() {
        let mut fft = FftEngine::new(256);
        let mags = fft.magnitudes(&[0.0; 10]);
        assert!(mags.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn window_tapers_to_zero() {
        let w = blackman_window(64);
        assert!(w[0].abs() < 1e-6);
        assert!((w[32] - 1.0).abs() < 1e-6);
    }
}
