//! Version resolution from a package's `version.py`
//!
//! The file is parsed, never executed. Each non-blank, non-comment line must
//! be a single string assignment:
//!
//! ```text
//! __version__ = "1.2.3"
//! __version__: str = '1.2.3'  # trailing comments are fine
//! ```
//!
//! Later assignments to the same name replace earlier ones.

use crate::errors::ManifestError;
use crate::profile::{
    is_identifier, module_dir_name, RuntimeProfile, DEFAULT_PACKAGE_NAME, DEFAULT_VERSION_FILE,
};
use ahash::AHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const VERSION_KEY: &str = "__version__";

/// Bindings produced by parsing a version file
#[derive(Debug, Default)]
pub struct VersionModule {
    bindings: AHashMap<String, String>,
}

impl VersionModule {
    /// Parse version file content; `source` is only used for error reporting
    pub fn parse(content: &str, source: &Path) -> Result<Self, ManifestError> {
        let mut bindings = AHashMap::new();
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (name, value) =
                parse_assignment(line).map_err(|reason| ManifestError::MalformedVersionFile {
                    path: source.to_path_buf(),
                    line: idx + 1,
                    reason,
                })?;
            bindings.insert(name.to_string(), value.to_string());
        }

        Ok(VersionModule { bindings })
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.bindings.get(name).map(String::as_str)
    }
}

/// Parse `name = "value"` (optionally `name: str = "value"  # comment`)
fn parse_assignment(line: &str) -> Result<(&str, &str), String> {
    let eq_idx = line
        .find('=')
        .ok_or_else(|| "expected an assignment".to_string())?;
    let target = line[..eq_idx].trim();
    let rhs = line[eq_idx + 1..].trim();

    let name = match target.split_once(':') {
        Some((name, annotation)) => {
            let annotation = annotation.trim();
            if annotation != "str" {
                return Err(format!("unsupported annotation '{}'", annotation));
            }
            name.trim()
        }
        None => target,
    };
    if !is_identifier(name) {
        return Err(format!("'{}' is not a valid name", name));
    }

    let quote = match rhs.chars().next() {
        Some(q @ ('"' | '\'')) => q,
        _ => return Err(format!("value of '{}' must be a string literal", name)),
    };
    let body = &rhs[1..];
    let close_idx = body
        .find(quote)
        .ok_or_else(|| "unterminated string literal".to_string())?;
    let value = &body[..close_idx];
    if value.contains('\\') {
        return Err("escape sequences are not supported".to_string());
    }

    let rest = body[close_idx + 1..].trim();
    if !rest.is_empty() && !rest.starts_with('#') {
        return Err(format!("unexpected content after string: '{}'", rest));
    }

    Ok((name, value))
}

/// Locates and reads the version file of one package
#[derive(Debug, Clone)]
pub struct VersionResolver {
    package_name: String,
    version_file: String,
}

impl VersionResolver {
    pub fn new(package_name: &str) -> Self {
        VersionResolver {
            package_name: package_name.to_string(),
            version_file: DEFAULT_VERSION_FILE.to_string(),
        }
    }

    pub fn from_profile(profile: &RuntimeProfile) -> Self {
        VersionResolver {
            package_name: profile.name.clone(),
            version_file: profile.version_file.clone(),
        }
    }

    /// `<root>/<package_name with '-' replaced by '_'>/<version_file>`
    pub fn version_path(&self, root: &Path) -> PathBuf {
        root.join(module_dir_name(&self.package_name))
            .join(&self.version_file)
    }

    pub fn resolve(&self, root: &Path) -> Result<String, ManifestError> {
        let path = self.version_path(root);
        debug!("Resolving version from: {:?}", path);

        let content = fs::read_to_string(&path).map_err(|e| ManifestError::read_failed(&path, e))?;
        let module = VersionModule::parse(&content, &path)?;

        module
            .get(VERSION_KEY)
            .map(str::to_string)
            .ok_or_else(|| ManifestError::MissingVersionBinding {
                path,
                key: VERSION_KEY.to_string(),
            })
    }
}

/// Resolve the version of the default runtime package under `root`
pub fn resolve_version(root: &Path) -> Result<String, ManifestError> {
    VersionResolver::new(DEFAULT_PACKAGE_NAME).resolve(root)
}
