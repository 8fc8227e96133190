use crate::common::GlobalOpts;
use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use rtpkg_config::Config;
use rtpkg_logger as logger;
use rtpkg_manifest::RenderFormat;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the current configuration
    Show,
    /// Set a configuration value (profile, format, output)
    Set { key: String, value: String },
    /// Print the path of the configuration file
    Path,
}

pub fn handle_config(action: ConfigAction, opts: &GlobalOpts) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load().context("Failed to load config")?;
            println!("{}", "Configuration:".bold().green());
            if config.is_empty() {
                if opts.verbosity_level() > 0 {
                    println!("  {}", "(empty)".yellow());
                }
            } else {
                for (key, value) in config.values_iter() {
                    println!("  {}: {}", key.cyan(), value);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            if key == "format" {
                value
                    .parse::<RenderFormat>()
                    .context("Refusing to store format")?;
            }
            let mut config = Config::load().context("Failed to load config")?;
            config.set(&key, value.clone())?;
            config.save().context("Failed to save config")?;
            if !opts.quiet {
                logger::success(&format!("Set {} = {}", key, value));
            }
        }
        ConfigAction::Path => {
            let config_path = Config::path();
            logger::debug(&format!("Config resolved to: {}", config_path.display()));
            println!("{}", config_path.display());
        }
    }
    Ok(())
}
