use super::layout::Bar;

const BYTE_MAX: f32 = 255.0;

/// Refreshes every bar from one frame of byte magnitudes and returns the
/// mean bar value (0 for an empty slice of bars).
///
/// `magnitudes` must cover every bin the bars reference; callers check the
/// length against the layout first.
pub fn update_bars(bars: &mut [Bar], magnitudes: &[u8]) -> f32 {
    if bars.is_empty() {
        return 0.0;
    }

    let mut energy = 0.0;
    for bar in bars.iter_mut() {
        bar.value = bar_magnitude(bar, magnitudes) / BYTE_MAX;
        energy += bar.value;
    }
    energy / bars.len() as f32
}

fn bar_magnitude(bar: &Bar, magnitudes: &[u8]) -> f32 {
    if bar.is_single_bin() {
        // interpolate from the bin below, weighted by rank in the shared run
        let cur = magnitudes[bar.ini_bin] as f32;
        let prev = match bar.ini_bin {
            0 => cur,
            i => magnitudes[i - 1] as f32,
        };
        prev + (cur - prev) * bar.factor
    } else {
        magnitudes[bar.ini_bin..=bar.end_bin]
            .iter()
            .copied()
            .max()
            .unwrap_or(0) as f32
    }
}
