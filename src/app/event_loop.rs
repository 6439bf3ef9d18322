use anyhow::Result;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tempered_bars::audio::analyser::{ByteAnalyser, SpectrumSource};
use tempered_bars::audio::capture::AudioCapture;
use tempered_bars::data::config::AppConfig;
use tempered_bars::SharedBars;

use crate::app::meter::meter_line;
use crate::app::watcher::ConfigWatcher;
use crate::cli::BarArgs;

/// Capture -> analyser -> bars, once per frame, until `frames` run out.
pub fn run(
    config: AppConfig,
    path: PathBuf,
    overrides: BarArgs,
    frames: Option<u64>,
) -> Result<()> {
    let capture = AudioCapture::start()?;
    let mut analyser = ByteAnalyser::new(capture.sample_rate() as f64, config.analyser.clone());

    let watcher = ConfigWatcher::new(
        path,
        overrides,
        analyser.sample_rate(),
        analyser.frequency_bin_count(),
    );
    let bars = SharedBars::new(&watcher.bar_config(&config));
    log::info!(
        "{} bars over {} bins at {} Hz",
        bars.current_bars().len(),
        analyser.frequency_bin_count(),
        analyser.sample_rate()
    );
    watcher.spawn(bars.clone());

    let mut magnitudes = vec![0u8; analyser.frequency_bin_count()];
    let frame_dt = fps_to_dt(config.fps);
    let mut stdout = io::stdout().lock();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();

        analyser.push_samples(&capture.take_samples());
        analyser.fill_byte_frequency_data(&mut magnitudes);
        // the layout is always built for the analyser's bin count
        bars.update(&magnitudes)?;

        let line = bars.with_bars(meter_line);
        write!(stdout, "\r{line}")?;
        stdout.flush()?;

        frame += 1;
        if frames.is_some_and(|n| frame >= n) {
            break;
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_dt {
            std::thread::sleep(frame_dt - elapsed);
        }
    }

    writeln!(stdout)?;
    Ok(())
}

fn fps_to_dt(fps: u32) -> Duration {
    let fps = fps.clamp(1, 240);
    Duration::from_millis((1000 / fps) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_interval_is_clamped() {
        assert_eq!(fps_to_dt(60), Duration::from_millis(16));
        assert_eq!(fps_to_dt(0), Duration::from_millis(1000));
        assert_eq!(fps_to_dt(10_000), Duration::from_millis(4));
    }
}
