use anyhow::{Context, Result};
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

use tempered_bars::bars::bins::bin_to_freq;
use tempered_bars::bars::scale::{group_label, MAX_GROUP_LEVEL, MIN_GROUP_LEVEL};
use tempered_bars::data::config::AppConfig;
use tempered_bars::{BarConfig, BarContext, BarLayout};

/// Human-readable table of `layout`, one row per bar.
pub fn layout_table(config: &BarConfig, layout: &BarLayout) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# {} bars, group level {} ({}), {} bins @ {} Hz",
        layout.len(),
        config.group_level,
        group_label(config.group_level),
        layout.frequency_bin_count,
        config.sample_rate
    );
    if layout.is_empty() {
        if let Err(e) = config.validate() {
            let _ = writeln!(out, "# {e}");
        }
        return out;
    }

    let _ = writeln!(
        out,
        "{:>4} {:>10} {:>6} {:>6} {:>7} {:>10}",
        "bar", "note Hz", "ini", "end", "factor", "bins Hz"
    );
    for (i, (bar, freq)) in layout.bars.iter().zip(&layout.freqs).enumerate() {
        let lo = bin_to_freq(bar.ini_bin, config.sample_rate, layout.frequency_bin_count);
        let _ = writeln!(
            out,
            "{i:>4} {freq:>10.2} {:>6} {:>6} {:>7.3} {lo:>10.1}",
            bar.ini_bin, bar.end_bin, bar.factor
        );
    }
    out
}

#[derive(Serialize)]
struct LayoutDump<'a> {
    config: &'a BarConfig,
    layout: &'a BarLayout,
}

pub fn layout_toml(config: &BarConfig, layout: &BarLayout) -> Result<String> {
    toml::to_string_pretty(&LayoutDump { config, layout }).context("serializing layout")
}

pub fn print_layout(config: &BarConfig, as_toml: bool) -> Result<()> {
    let ctx = BarContext::new(config);
    let out = if as_toml {
        layout_toml(config, ctx.layout())?
    } else {
        layout_table(config, ctx.layout())
    };
    print!("{out}");
    Ok(())
}

/// Bar count per group level for the window in `base`.
pub fn levels_table(base: &BarConfig) -> String {
    let mut out = String::new();
    for level in MIN_GROUP_LEVEL..=MAX_GROUP_LEVEL {
        let config = base.clone().with_group_level(level);
        let n = BarLayout::build(&config).len();
        let _ = writeln!(out, "{level}  {:<12} {n:>4} bars", group_label(level));
    }
    out
}

pub fn config_command(path: &Path, init: bool) -> Result<()> {
    if init && !path.exists() {
        AppConfig::default().save(path)?;
        log::info!("wrote default config to {}", path.display());
    }
    let config = AppConfig::load_or_default(Some(path))?;
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}
