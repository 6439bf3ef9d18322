mod commands;
mod event_loop;
mod meter;
mod watcher;

use anyhow::Result;

use tempered_bars::data::config::AppConfig;

use crate::cli::{Cli, Command};

pub fn run(cli: Cli) -> Result<()> {
    let path = cli.config.unwrap_or_else(AppConfig::default_path);

    match cli.command {
        Command::Layout { bars, toml } => {
            let config = AppConfig::load_or_default(Some(&path))?;
            commands::print_layout(&bars.apply(config.bars), toml)
        }
        Command::Levels { bars } => {
            let config = AppConfig::load_or_default(Some(&path))?;
            print!("{}", commands::levels_table(&bars.apply(config.bars)));
            Ok(())
        }
        Command::Live { bars, frames } => {
            let config = AppConfig::load_or_default(Some(&path))?;
            event_loop::run(config, path, bars, frames)
        }
        Command::Config { init } => commands::config_command(&path, init),
    }
}
