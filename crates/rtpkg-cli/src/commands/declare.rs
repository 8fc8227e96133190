use crate::common::GlobalOpts;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rtpkg_config::Config;
use rtpkg_logger as logger;
use rtpkg_manifest::{declare, FileBackend, RenderFormat, WriterBackend};
use std::path::PathBuf;
use tracing::debug;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Toml,
    Json,
    PkgInfo,
}

impl From<FormatArg> for RenderFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Toml => RenderFormat::Toml,
            FormatArg::Json => RenderFormat::Json,
            FormatArg::PkgInfo => RenderFormat::PkgInfo,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct DeclareCommand {
    /// Output format (defaults to the configured format, then toml)
    #[arg(short, long, value_enum)]
    pub format: Option<FormatArg>,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

fn effective_format(cmd: &DeclareCommand, config: &Config) -> Result<RenderFormat> {
    if let Some(format) = cmd.format {
        return Ok(format.into());
    }
    match config.format.as_deref() {
        Some(configured) => configured
            .parse::<RenderFormat>()
            .context("Invalid 'format' in config"),
        None => Ok(RenderFormat::default()),
    }
}

pub fn handle_declare(cmd: DeclareCommand, opts: &GlobalOpts) -> Result<()> {
    let config = Config::load().context("Failed to load config")?;
    let profile = opts.load_profile(&config)?;
    let format = effective_format(&cmd, &config)?;
    let output = cmd
        .output
        .clone()
        .or_else(|| config.output.as_ref().map(PathBuf::from));

    debug!("Declare output: {:?}", output);
    logger::step(&format!(
        "Declaring {} from {} as {}",
        profile.name,
        opts.root.display(),
        format
    ));

    let metadata = match output {
        Some(path) => {
            let mut backend = FileBackend::new(path, format);
            let metadata = declare(&opts.root, &profile, &mut backend)?;
            if !opts.quiet {
                logger::success(&format!(
                    "Declared {} {} -> {}",
                    metadata.name,
                    metadata.version,
                    backend.path().display()
                ));
            }
            metadata
        }
        None => {
            let stdout = std::io::stdout();
            let mut backend = WriterBackend::new(stdout.lock(), format);
            declare(&opts.root, &profile, &mut backend)?
        }
    };

    if metadata.long_description.trim().is_empty() {
        logger::warn(&format!("{} is empty, long description is blank", profile.readme));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(format: Option<FormatArg>) -> DeclareCommand {
        DeclareCommand {
            format,
            output: None,
        }
    }

    #[test]
    fn test_flag_format_wins() {
        let config = Config {
            format: Some("json".to_string()),
            ..Default::default()
        };
        let format = effective_format(&cmd(Some(FormatArg::PkgInfo)), &config);
        assert!(format.is_ok_and(|f| f == RenderFormat::PkgInfo));
    }

    #[test]
    fn test_configured_format_used() {
        let config = Config {
            format: Some("json".to_string()),
            ..Default::default()
        };
        let format = effective_format(&cmd(None), &config);
        assert!(format.is_ok_and(|f| f == RenderFormat::Json));
    }

    #[test]
    fn test_invalid_configured_format() {
        let config = Config {
            format: Some("yaml".to_string()),
            ..Default::default()
        };
        assert!(effective_format(&cmd(None), &config).is_err());
    }

    #[test]
    fn test_default_format_is_toml() {
        let format = effective_format(&cmd(None), &Config::default());
        assert!(format.is_ok_and(|f| f == RenderFormat::Toml));
    }
}
