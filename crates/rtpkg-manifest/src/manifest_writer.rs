//! Atomic manifest writes
//!
//! Writes go through a sibling `.tmp` file and a rename so a reader never
//! observes a half-written manifest.

use crate::errors::ManifestError;
use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Atomically replace `path` with `content`
pub fn write_atomic(path: &Path, content: &str) -> Result<(), ManifestError> {
    debug!("Writing manifest to: {:?}", path);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let temp_path = temp_path_for(path);
    {
        let file = fs::File::create(&temp_path)?;
        let mut writer = std::io::BufWriter::with_capacity(64 * 1024, file);
        writer.write_all(content.as_bytes())?;
        writer.flush()?;
    }

    fs::rename(&temp_path, path)?;
    info!("Manifest written successfully to: {:?}", path);
    Ok(())
}
