//! Fixed metadata of a runtime package
//!
//! A profile holds everything about a declaration that does not come from the
//! source tree. The default profile is the MLflow runtime; sibling runtimes
//! supply their own TOML file with kebab-case keys. Keys left out of a file
//! keep the default value.

use crate::errors::ManifestError;
use crate::types::DescriptionFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_PACKAGE_NAME: &str = "mlserver-mlflow";
pub const DEFAULT_VERSION_FILE: &str = "version.py";
pub const DEFAULT_README: &str = "README.md";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct RuntimeProfile {
    pub name: String,
    pub url: String,
    pub author: String,
    pub author_email: String,
    pub description: String,
    pub license: String,
    pub long_description_format: DescriptionFormat,
    pub dependencies: Vec<String>,
    /// Explicit module paths; discovered from the tree when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub packages: Option<Vec<String>>,
    pub version_file: String,
    pub readme: String,
}

impl Default for RuntimeProfile {
    fn default() -> Self {
        RuntimeProfile {
            name: DEFAULT_PACKAGE_NAME.to_string(),
            url: "https://github.com/SeldonIO/MLServer.git".to_string(),
            author: "Seldon Technologies Ltd.".to_string(),
            author_email: "hello@seldon.io".to_string(),
            description: "MLflow runtime for MLServer".to_string(),
            license: "Apache 2.0".to_string(),
            long_description_format: DescriptionFormat::Markdown,
            dependencies: vec!["mlserver".to_string(), "mlflow".to_string()],
            packages: None,
            version_file: DEFAULT_VERSION_FILE.to_string(),
            readme: DEFAULT_README.to_string(),
        }
    }
}

impl RuntimeProfile {
    /// Load a profile from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self, ManifestError> {
        debug!("Loading runtime profile from: {:?}", path);
        let content = fs::read_to_string(path).map_err(|e| ManifestError::read_failed(path, e))?;
        let profile: RuntimeProfile =
            toml::from_str(&content).map_err(|source| ManifestError::ProfileParse {
                path: path.to_path_buf(),
                source,
            })?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.name.trim().is_empty() {
            return Err(ManifestError::InvalidProfile(
                "package name must not be empty".to_string(),
            ));
        }
        if self.version_file.trim().is_empty() || self.readme.trim().is_empty() {
            return Err(ManifestError::InvalidProfile(
                "version-file and readme must name a file".to_string(),
            ));
        }
        let single_line = [
            ("name", self.name.as_str()),
            ("url", self.url.as_str()),
            ("author", self.author.as_str()),
            ("author-email", self.author_email.as_str()),
            ("description", self.description.as_str()),
            ("license", self.license.as_str()),
        ]
        .into_iter()
        .chain(self.dependencies.iter().map(|d| ("dependencies", d.as_str())));
        for (key, value) in single_line {
            if value.contains(['\n', '\r']) {
                return Err(ManifestError::InvalidProfile(format!(
                    "{} must be a single line: {:?}",
                    key, value
                )));
            }
        }
        if let Some(dep) = self.dependencies.iter().find(|d| d.trim().is_empty()) {
            return Err(ManifestError::InvalidProfile(format!(
                "empty dependency entry {:?}",
                dep
            )));
        }
        if let Some(packages) = &self.packages {
            if let Some(bad) = packages.iter().find(|p| !is_module_path(p)) {
                return Err(ManifestError::InvalidProfile(format!(
                    "'{}' is not a dotted module path",
                    bad
                )));
            }
        }
        Ok(())
    }
}

/// Directory holding the importable package (`mlserver-mlflow` -> `mlserver_mlflow`)
pub fn module_dir_name(package_name: &str) -> String {
    package_name.replace('-', "_")
}

/// `a.b_c.d` style path made of identifier segments
pub fn is_module_path(path: &str) -> bool {
    !path.is_empty() && path.split('.').all(is_identifier)
}

pub(crate) fn is_identifier(segment: &str) -> bool {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) if first == '_' || first.is_alphabetic() => {
            chars.all(|c| c == '_' || c.is_alphanumeric())
        }
        _ => false,
    }
}
