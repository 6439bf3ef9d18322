/// Steps per octave of the quarter-tone grid.
pub const STEPS_PER_OCTAVE: i32 = 24;

pub const MIN_GROUP_LEVEL: i32 = 1;
pub const MAX_GROUP_LEVEL: i32 = 8;

const A4_HZ: f64 = 440.0;
// C0 sits 114 quarter-tones below A4
const C0_STEPS_BELOW_A4: i32 = 114;

/// Frequency ratio between two neighbouring steps (24th root of 2).
pub fn step_ratio() -> f64 {
    2f64.powf(1.0 / STEPS_PER_OCTAVE as f64)
}

/// C0 on the 24-tone grid, ~16.35 Hz.
pub fn c0() -> f64 {
    A4_HZ * step_ratio().powf(-(C0_STEPS_BELOW_A4 as f64))
}

/// Step divisor for a group level. Levels 5..=8 map to 6, 8, 12 and 24 so
/// each level is an even fraction of the octave.
pub fn group_divisor(group_level: i32) -> u32 {
    match group_level.clamp(MIN_GROUP_LEVEL, MAX_GROUP_LEVEL) {
        1 => 1,
        2 => 2,
        3 => 3,
        4 => 4,
        5 => 6,
        6 => 8,
        7 => 12,
        _ => 24,
    }
}

/// Octave fraction covered by one bar at `group_level`, e.g. "1/4 octave".
pub fn group_label(group_level: i32) -> String {
    let per_octave = STEPS_PER_OCTAVE as u32 / group_divisor(group_level);
    if per_octave == 1 {
        "1 octave".to_string()
    } else {
        format!("1/{per_octave} octave")
    }
}

/// Frequencies of the tempered scale inside `[min_freq, max_freq]`, keeping
/// every `group_divisor(group_level)`-th step counted from C0.
pub fn tempered_scale(group_level: i32, min_freq: f64, max_freq: f64) -> Vec<f64> {
    let mut out = Vec::new();
    if !max_freq.is_finite() {
        return out;
    }

    let ratio = step_ratio();
    let base = c0();
    let group = group_divisor(group_level);

    let mut step: u32 = 0;
    loop {
        let freq = base * ratio.powf(step as f64);
        if freq > max_freq {
            break;
        }
        if freq >= min_freq && step % group == 0 {
            out.push(freq);
        }
        step += 1;
    }
    out
}
