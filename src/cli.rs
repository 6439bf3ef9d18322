//! Command-line argument parsing.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use tempered_bars::BarConfig;

#[derive(Parser, Debug)]
#[command(name = "tempered-bars")]
#[command(about = "Equal-tempered spectrum bars", long_about = None)]
pub struct Cli {
    /// Config file (defaults to $TEMPERED_BARS_CONFIG or the OS config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the bar layout for the effective configuration
    Layout {
        #[command(flatten)]
        bars: BarArgs,

        /// Emit TOML instead of a table
        #[arg(long)]
        toml: bool,
    },

    /// List group levels with the bar count each produces
    Levels {
        #[command(flatten)]
        bars: BarArgs,
    },

    /// Drive the bars from the live audio input
    Live {
        #[command(flatten)]
        bars: BarArgs,

        /// Stop after this many frames
        #[arg(long, value_name = "N")]
        frames: Option<u64>,
    },

    /// Show or create the config file
    Config {
        /// Write the default config if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Per-run overrides of the `[bars]` config section.
#[derive(Args, Debug, Default, Clone)]
pub struct BarArgs {
    /// 1 (1/24 octave) to 8 (1 octave)
    #[arg(short, long, value_name = "LEVEL", allow_negative_numbers = true)]
    pub group_level: Option<i32>,

    #[arg(long, value_name = "HZ")]
    pub min_freq: Option<f64>,

    #[arg(long, value_name = "HZ")]
    pub max_freq: Option<f64>,

    /// Ignored by `live`, which uses the input device's rate
    #[arg(long, value_name = "HZ")]
    pub sample_rate: Option<f64>,

    /// Ignored by `live`, which uses the analyser's bin count
    #[arg(long, value_name = "N")]
    pub bins: Option<usize>,
}

impl BarArgs {
    pub fn apply(&self, mut config: BarConfig) -> BarConfig {
        if let Some(v) = self.group_level {
            config.group_level = v;
        }
        if let Some(v) = self.min_freq {
            config.min_freq = v;
        }
        if let Some(v) = self.max_freq {
            config.max_freq = v;
        }
        if let Some(v) = self.sample_rate {
            config.sample_rate = v;
        }
        if let Some(v) = self.bins {
            config.frequency_bin_count = v;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_only_given_fields() {
        let args = BarArgs {
            group_level: Some(2),
            max_freq: Some(8000.0),
            ..BarArgs::default()
        };
        let config = args.apply(BarConfig::default());
        assert_eq!(config.group_level, 2);
        assert_eq!(config.max_freq, 8000.0);
        assert_eq!(config.min_freq, 20.0);
        assert_eq!(config.frequency_bin_count, 1024);
    }

    #[test]
    fn parses_layout_overrides() {
        let cli = Cli::try_parse_from([
            "tempered-bars",
            "layout",
            "-g",
            "-5",
            "--bins",
            "4096",
            "--toml",
        ])
        .unwrap();
        match cli.command {
            Command::Layout { bars, toml } => {
                assert_eq!(bars.group_level, Some(-5));
                assert_eq!(bars.bins, Some(4096));
                assert!(toml);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
