use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::{Duration, SystemTime};

use tempered_bars::data::config::AppConfig;
use tempered_bars::{BarConfig, SharedBars};

use crate::cli::BarArgs;

const POLL: Duration = Duration::from_millis(500);

/// Rebuilds the shared layout whenever the config file changes on disk.
///
/// The analyser's sample rate and bin count are fixed for the session and
/// always override what the file says.
pub struct ConfigWatcher {
    path: PathBuf,
    overrides: BarArgs,
    sample_rate: f64,
    frequency_bin_count: usize,
    last_modified: Option<SystemTime>,
}

impl ConfigWatcher {
    pub fn new(
        path: PathBuf,
        overrides: BarArgs,
        sample_rate: f64,
        frequency_bin_count: usize,
    ) -> Self {
        let last_modified = modified(&path);
        Self {
            path,
            overrides,
            sample_rate,
            frequency_bin_count,
            last_modified,
        }
    }

    /// Effective bar config for `file`.
    pub fn bar_config(&self, file: &AppConfig) -> BarConfig {
        let mut config = self.overrides.apply(file.bars.clone());
        config.sample_rate = self.sample_rate;
        config.frequency_bin_count = self.frequency_bin_count;
        config
    }

    /// Rebuilds `bars` if the file changed since the last poll.
    pub fn poll(&mut self, bars: &SharedBars) -> bool {
        let now = modified(&self.path);
        if now == self.last_modified {
            return false;
        }
        self.last_modified = now;

        let file = match AppConfig::load_or_default(Some(&self.path)) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("keeping current layout: {e:#}");
                return false;
            }
        };
        let n = bars.build_layout(&self.bar_config(&file));
        log::info!("config reloaded from {}: {n} bars", self.path.display());
        true
    }

    pub fn spawn(mut self, bars: SharedBars) -> JoinHandle<()> {
        thread::spawn(move || loop {
            thread::sleep(POLL);
            self.poll(&bars);
        })
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuilds_when_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let bars = SharedBars::new(&BarConfig::default());

        let mut watcher = ConfigWatcher::new(path.clone(), BarArgs::default(), 44_100.0, 1024);
        assert!(!watcher.poll(&bars));

        fs::write(&path, "[bars]\ngroup_level = 8\n").unwrap();
        assert!(watcher.poll(&bars));
        assert_eq!(bars.current_bars().len(), 10);
        assert!(!watcher.poll(&bars));
    }

    #[test]
    fn session_rate_and_bins_win() {
        let watcher = ConfigWatcher::new(
            PathBuf::from("unused.toml"),
            BarArgs {
                group_level: Some(1),
                ..BarArgs::default()
            },
            48_000.0,
            4096,
        );
        let mut file = AppConfig::default();
        file.bars.sample_rate = 8000.0;
        file.bars.frequency_bin_count = 16;

        let config = watcher.bar_config(&file);
        assert_eq!(config.sample_rate, 48_000.0);
        assert_eq!(config.frequency_bin_count, 4096);
        assert_eq!(config.group_level, 1);
    }
}
