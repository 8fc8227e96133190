//! Common types and utilities shared across commands

use anyhow::{Context, Result};
use clap::Parser;
use rtpkg_config::Config;
use rtpkg_logger as logger;
use rtpkg_manifest::RuntimeProfile;
use std::path::PathBuf;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,

    #[arg(
        long,
        global = true,
        default_value = ".",
        help = "Root directory of the runtime package"
    )]
    pub root: PathBuf,

    #[arg(
        long,
        global = true,
        help = "Runtime profile TOML (overrides the configured profile)"
    )]
    pub profile: Option<PathBuf>,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Profile from `--profile`, then the config file, then the built-in default
    pub fn load_profile(&self, config: &Config) -> Result<RuntimeProfile> {
        let path = self
            .profile
            .clone()
            .or_else(|| config.profile.as_ref().map(PathBuf::from));

        match path {
            Some(path) => {
                logger::debug(&format!("Using runtime profile: {}", path.display()));
                RuntimeProfile::load_from_path(&path)
                    .with_context(|| format!("Failed to load profile {}", path.display()))
            }
            None => Ok(RuntimeProfile::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(profile: Option<PathBuf>) -> GlobalOpts {
        GlobalOpts {
            quiet: false,
            verbose: 2,
            root: PathBuf::from("."),
            profile,
        }
    }

    #[test]
    fn test_quiet_wins_over_verbose() {
        let mut o = opts(None);
        assert_eq!(o.verbosity_level(), 2);
        o.quiet = true;
        assert_eq!(o.verbosity_level(), 0);
    }

    #[test]
    fn test_default_profile_without_overrides() {
        let profile = opts(None).load_profile(&Config::default());
        assert!(profile.is_ok_and(|p| p.name == "mlserver-mlflow"));
    }

    #[test]
    fn test_flag_profile_takes_precedence() {
        let config = Config {
            profile: Some("/nonexistent/config-profile.toml".to_string()),
            ..Default::default()
        };
        let result = opts(Some(PathBuf::from("/nonexistent/flag-profile.toml"))).load_profile(&config);
        let message = result.map(|_| String::new()).unwrap_or_else(|e| e.to_string());
        assert!(message.contains("flag-profile.toml"));
    }
}
