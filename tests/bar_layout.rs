use approx::assert_relative_eq;
use tempered_bars::{BarConfig, BarContext, BarLayout};

fn configs() -> Vec<BarConfig> {
    let mut out = Vec::new();
    for level in 1..=8 {
        for (rate, bins) in [(44_100.0, 1024), (48_000.0, 4096), (22_050.0, 256), (8000.0, 32)] {
            for (lo, hi) in [(20.0, 22_000.0), (0.0, 440.0), (100.0, 4000.0), (1000.0, 30_000.0)] {
                out.push(
                    BarConfig::default()
                        .with_group_level(level)
                        .with_sample_rate(rate)
                        .with_frequency_bin_count(bins)
                        .with_freq_range(lo, hi),
                );
            }
        }
    }
    out
}

fn count(level: i32) -> usize {
    BarLayout::build(&BarConfig::default().with_group_level(level)).len()
}

#[test]
fn bins_stay_in_bounds() {
    for config in configs() {
        let layout = BarLayout::build(&config);
        assert!(!layout.is_empty(), "{config:?}");
        for bar in &layout.bars {
            assert!(bar.ini_bin <= bar.end_bin, "{config:?}: {bar:?}");
            assert!(bar.end_bin < config.frequency_bin_count, "{config:?}: {bar:?}");
            assert!(bar.factor > 0.0 && bar.factor <= 1.0, "{config:?}: {bar:?}");
        }
    }
}

#[test]
fn bars_never_step_backwards() {
    for config in configs() {
        let layout = BarLayout::build(&config);
        for pair in layout.bars.windows(2) {
            assert!(pair[0].ini_bin <= pair[1].ini_bin, "{config:?}: {pair:?}");
        }
    }
}

#[test]
fn group_level_clamps() {
    assert_eq!(count(0), count(1));
    assert_eq!(count(-5), count(1));
    assert_eq!(count(9), count(8));
}

#[test]
fn upper_group_levels_use_remapped_divisors() {
    // default window holds 243 quarter-tone steps from step 7 to step 249
    let counts: Vec<usize> = (5..=8).map(count).collect();
    assert_eq!(counts, vec![40, 31, 20, 10]);
    assert_eq!(count(1), 243);
}

#[test]
fn default_layout_golden() {
    let layout = BarLayout::build(&BarConfig::default());
    assert_eq!(layout.len(), 40);
    assert_eq!(layout.bars[0].ini_bin, 1);
    let last = layout.bars.last().unwrap();
    assert_eq!((last.ini_bin, last.end_bin), (853, 925));
    assert_relative_eq!(layout.freqs[0], 23.124_651_419_477_15, epsilon = 1e-6);
}

#[test]
fn shared_bin_runs_ramp_to_one() {
    for config in configs() {
        let layout = BarLayout::build(&config);
        let bars = &layout.bars;
        let mut start = 0;
        while start < bars.len() {
            let mut end = start + 1;
            while end < bars.len() && bars[end].ini_bin == bars[start].ini_bin {
                end += 1;
            }
            let n = end - start;
            for (k, bar) in bars[start..end].iter().enumerate() {
                let want = if n > 1 { (k + 1) as f32 / n as f32 } else { 1.0 };
                assert_relative_eq!(bar.factor, want, epsilon = 1e-6);
            }
            start = end;
        }
    }
}

#[test]
fn rebuilding_is_idempotent() {
    for config in configs() {
        assert_eq!(BarLayout::build(&config), BarLayout::build(&config));
    }
}

#[test]
fn saturated_and_silent_frames() {
    for config in configs() {
        let mut ctx = BarContext::new(&config);
        let n = config.frequency_bin_count;

        ctx.update(&vec![255; n]).unwrap();
        assert!(ctx.current_bars().iter().all(|b| b.value == 1.0));
        assert_eq!(ctx.current_energy(), 1.0);

        ctx.update(&vec![0; n]).unwrap();
        assert!(ctx.current_bars().iter().all(|b| b.value == 0.0));
        assert_eq!(ctx.current_energy(), 0.0);
    }
}

#[test]
fn ramp_shows_in_values() {
    let mut ctx = BarContext::new(&BarConfig::default());
    // a step from bin 1 to bin 2 lights the shared run on bin 2 in thirds
    let mut frame = vec![0u8; 1024];
    frame[2] = 255;
    ctx.update(&frame).unwrap();

    let values: Vec<f32> = ctx.current_bars()[2..5].iter().map(|b| b.value).collect();
    assert_relative_eq!(values[0], 1.0 / 3.0, epsilon = 1e-6);
    assert_relative_eq!(values[1], 2.0 / 3.0, epsilon = 1e-6);
    assert_relative_eq!(values[2], 1.0, epsilon = 1e-6);
    // the run on bin 3 interpolates back down from bin 2
    assert_relative_eq!(ctx.current_bars()[5].value, 0.5, epsilon = 1e-6);
}
