/// Nearest analysis bin for `freq`, with bins spread linearly from 0 Hz to
/// Nyquist. Always returns an index below `frequency_bin_count`; degenerate
/// inputs fall back to bin 0.
pub fn freq_to_bin(freq: f64, sample_rate: f64, frequency_bin_count: usize) -> usize {
    if frequency_bin_count == 0 || !(sample_rate.is_finite() && sample_rate > 0.0) {
        return 0;
    }
    let nyquist = sample_rate / 2.0;
    let pos = (freq / nyquist * frequency_bin_count as f64).round();
    if pos.is_nan() || pos <= 0.0 {
        return 0;
    }
    (pos as usize).min(frequency_bin_count - 1)
}

/// Centre frequency of `bin`, the inverse of [`freq_to_bin`].
pub fn bin_to_freq(bin: usize, sample_rate: f64, frequency_bin_count: usize) -> f64 {
    if frequency_bin_count == 0 {
        return 0.0;
    }
    bin as f64 * (sample_rate / 2.0) / frequency_bin_count as f64
}
