use crate::errors::ManifestError;
use crate::profile::DEFAULT_README;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Read `<root>/README.md` verbatim
pub fn load_description(root: &Path) -> Result<String, ManifestError> {
    load_description_from(root, DEFAULT_README)
}

/// Read `<root>/<file_name>` verbatim, line endings and trailing newline included
pub fn load_description_from(root: &Path, file_name: &str) -> Result<String, ManifestError> {
    let path = root.join(file_name);
    debug!("Loading long description from: {:?}", path);
    fs::read_to_string(&path).map_err(|e| ManifestError::read_failed(&path, e))
}
