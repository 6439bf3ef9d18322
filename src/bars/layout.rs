use serde::Serialize;

use super::bins::freq_to_bin;
use super::config::BarConfig;
use super::scale::tempered_scale;

/// One display bar and the slice of analysis bins it reads.
///
/// When `ini_bin == end_bin` the bin may be shared with neighbouring bars;
/// `factor` then interpolates between that bin and the one below it so the
/// bars in a shared run get distinct heights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    pub ini_bin: usize,
    pub end_bin: usize,
    pub factor: f32,
    pub value: f32,
}

impl Bar {
    fn new(ini_bin: usize, end_bin: usize) -> Self {
        Self {
            ini_bin,
            end_bin: end_bin.max(ini_bin),
            factor: 1.0,
            value: 0.0,
        }
    }

    pub fn is_single_bin(&self) -> bool {
        self.ini_bin == self.end_bin
    }

    pub fn bin_span(&self) -> usize {
        self.end_bin - self.ini_bin + 1
    }
}

/// An ordered bar list, left to right, and the bin count it was built for.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BarLayout {
    pub frequency_bin_count: usize,
    /// Tempered-scale frequency each bar was placed at.
    pub freqs: Vec<f64>,
    pub bars: Vec<Bar>,
}

impl BarLayout {
    /// Lays out bars for `config`. Invalid configurations produce an empty
    /// layout, which callers treat as "nothing to display".
    pub fn build(config: &BarConfig) -> Self {
        let empty = Self {
            frequency_bin_count: config.frequency_bin_count,
            ..Self::default()
        };

        if let Err(e) = config.validate() {
            log::debug!("empty bar layout: {e}");
            return empty;
        }

        let freqs = tempered_scale(config.group_level, config.min_freq, config.max_freq);
        let bars = match freqs.len() {
            0 => {
                log::debug!(
                    "empty bar layout: no tempered frequencies in {}..{} Hz",
                    config.min_freq,
                    config.max_freq
                );
                return empty;
            }
            1 => vec![Bar::new(0, config.frequency_bin_count - 1)],
            _ => assign_bins(&freqs, config.sample_rate, config.frequency_bin_count),
        };

        log::debug!(
            "bar layout: {} bars over {} bins (group level {})",
            bars.len(),
            config.frequency_bin_count,
            config.group_level
        );

        Self {
            frequency_bin_count: config.frequency_bin_count,
            freqs,
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

fn assign_bins(freqs: &[f64], sample_rate: f64, bin_count: usize) -> Vec<Bar> {
    let to_bin = |f: f64| freq_to_bin(f, sample_rate, bin_count);

    let mut bars: Vec<Bar> = Vec::with_capacity(freqs.len());
    // tentative end bin of the previous bar
    let mut prev_end = 0usize;
    let mut run_idx: Option<usize> = None;
    let mut run_len = 0usize;

    for (i, &freq) in freqs.iter().enumerate() {
        let bin = to_bin(freq);
        let idx = if prev_end > 0 && prev_end < bin {
            prev_end + 1
        } else {
            bin
        };

        if run_idx == Some(idx) {
            run_len += 1;
        } else {
            ramp_shared_run(&mut bars, run_len);
            run_idx = Some(idx);
            run_len = 1;
        }

        // claim half of the unused bins up to the next bar
        let mut end = bin;
        if let Some(&next) = freqs.get(i + 1) {
            let gap = to_bin(next).saturating_sub(bin);
            if gap > 1 {
                end += (gap as f64 / 2.0).round() as usize;
            }
        }
        prev_end = end;

        bars.push(Bar::new(idx, end));
    }
    ramp_shared_run(&mut bars, run_len);

    bars
}

/// Gives the last `run_len` bars, which all start on the same bin, factors
/// 1/n, 2/n, ..., 1.
fn ramp_shared_run(bars: &mut [Bar], run_len: usize) {
    if run_len < 2 {
        return;
    }
    let start = bars.len() - run_len;
    for (rank, bar) in bars[start..].iter_mut().enumerate() {
        bar.factor = (rank + 1) as f32 / run_len as f32;
    }
}
