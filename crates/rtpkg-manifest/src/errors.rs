use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while resolving or declaring a runtime package
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("File not found: {}", .path.display())]
    MissingFile { path: PathBuf },

    #[error("'{key}' is not defined in {}", .path.display())]
    MissingVersionBinding { path: PathBuf, key: String },

    #[error("Malformed version file {}:{line}: {reason}", .path.display())]
    MalformedVersionFile {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse profile {}: {source}", .path.display())]
    ProfileParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize manifest: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to walk package tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Unknown output format: {0} (expected toml, json or pkg-info)")]
    UnknownFormat(String),
}

impl ManifestError {
    /// Map a failed read of `path`, keeping "not found" distinct from other IO failures
    pub fn read_failed(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            ManifestError::MissingFile {
                path: path.to_path_buf(),
            }
        } else {
            ManifestError::Io(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_missing_file() {
        let err = ManifestError::read_failed(
            Path::new("pkg/version.py"),
            io::Error::from(io::ErrorKind::NotFound),
        );
        assert!(matches!(err, ManifestError::MissingFile { ref path } if path.ends_with("version.py")));
    }

    #[test]
    fn test_other_read_errors_stay_io() {
        let err = ManifestError::read_failed(
            Path::new("README.md"),
            io::Error::from(io::ErrorKind::PermissionDenied),
        );
        assert!(matches!(err, ManifestError::Io(_)));
    }

    #[test]
    fn test_malformed_display_includes_line() {
        let err = ManifestError::MalformedVersionFile {
            path: PathBuf::from("mlserver_mlflow/version.py"),
            line: 3,
            reason: "expected an assignment".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed version file mlserver_mlflow/version.py:3: expected an assignment"
        );
    }
}
