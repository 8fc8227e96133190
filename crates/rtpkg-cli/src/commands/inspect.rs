//! Single-field queries: version, long description, package list

use crate::common::GlobalOpts;
use anyhow::{Context, Result};
use rtpkg_config::Config;
use rtpkg_manifest::{load_description_from, resolve_packages, RuntimeProfile, VersionResolver};
use std::io::Write;

fn profile(opts: &GlobalOpts) -> Result<RuntimeProfile> {
    let config = Config::load().context("Failed to load config")?;
    opts.load_profile(&config)
}

/// Print the resolved `__version__`
pub fn handle_version(opts: &GlobalOpts) -> Result<()> {
    let profile = profile(opts)?;
    let version = VersionResolver::from_profile(&profile).resolve(&opts.root)?;
    println!("{}", version);
    Ok(())
}

/// Print the long description exactly as stored on disk
pub fn handle_describe(opts: &GlobalOpts) -> Result<()> {
    let profile = profile(opts)?;
    let description = load_description_from(&opts.root, &profile.readme)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(description.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Print one module path per line
pub fn handle_packages(opts: &GlobalOpts) -> Result<()> {
    let profile = profile(opts)?;
    for package in resolve_packages(&opts.root, &profile)? {
        println!("{}", package);
    }
    Ok(())
}
