//! Importable sub-package discovery
//!
//! Mirrors setuptools' `find_packages()`: a directory is a package when it
//! holds an `__init__.py`, directory names containing `.` are never packages,
//! and the walk does not descend into non-package directories.

use crate::errors::ManifestError;
use crate::profile::RuntimeProfile;
use std::collections::BTreeSet;
use std::io;
use std::path::Path;
use tracing::{debug, info};
use walkdir::{DirEntry, WalkDir};

const PACKAGE_MARKER: &str = "__init__.py";

fn is_package_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && !entry.file_name().to_string_lossy().contains('.')
        && entry.path().join(PACKAGE_MARKER).is_file()
}

/// Walk `root` and return every importable package as a dotted module path
pub fn discover_packages(root: &Path) -> Result<BTreeSet<String>, ManifestError> {
    debug!("Discovering packages under: {:?}", root);
    let mut packages = BTreeSet::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || is_package_dir(e));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            // Dangling symlinks cannot be packages
            Err(e) if e.io_error().is_some_and(|err| err.kind() == io::ErrorKind::NotFound) => {
                debug!("Skipping unreadable entry: {:?}", e.path());
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let module = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join(".");
        packages.insert(module);
    }

    info!("Discovered {} packages", packages.len());
    Ok(packages)
}

/// Use the profile's explicit package list when present, otherwise discover
pub fn resolve_packages(
    root: &Path,
    profile: &RuntimeProfile,
) -> Result<BTreeSet<String>, ManifestError> {
    match &profile.packages {
        Some(explicit) => {
            debug!("Using {} packages declared in profile", explicit.len());
            Ok(explicit.iter().cloned().collect())
        }
        None => discover_packages(root),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn make_package(root: &Path, rel: &str) -> bool {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).is_ok() && fs::write(dir.join(PACKAGE_MARKER), "").is_ok()
    }

    #[test]
    fn test_discovers_nested_packages() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let root = temp_dir.path();
        assert!(make_package(root, "mlserver_mlflow"));
        assert!(make_package(root, "mlserver_mlflow/codecs"));
        assert!(make_package(root, "tests"));

        let packages = discover_packages(root);
        assert!(packages.is_ok());
        let Ok(packages) = packages else {
            return;
        };
        let found: Vec<&str> = packages.iter().map(String::as_str).collect();
        assert_eq!(found, vec!["mlserver_mlflow", "mlserver_mlflow.codecs", "tests"]);
    }

    #[test]
    fn test_skips_packages_below_plain_directories() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let root = temp_dir.path();
        assert!(make_package(root, "mlserver_mlflow"));
        // docs/ has no marker, so docs/source is never reached
        assert!(make_package(root, "docs/source"));
        assert!(fs::create_dir_all(root.join("mlserver_mlflow/__pycache__")).is_ok());

        let packages = discover_packages(root);
        assert!(packages.is_ok_and(|p| p.len() == 1 && p.contains("mlserver_mlflow")));
    }

    #[test]
    fn test_skips_dotted_directory_names() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let root = temp_dir.path();
        assert!(make_package(root, ".venv"));
        assert!(make_package(root, "mlserver_mlflow.egg-info"));

        let packages = discover_packages(root);
        assert!(packages.is_ok_and(|p| p.is_empty()));
    }

    #[test]
    fn test_marker_file_without_directory_is_ignored() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let root = temp_dir.path();
        assert!(fs::write(root.join(PACKAGE_MARKER), "").is_ok());
        assert!(fs::write(root.join("setup.py"), "").is_ok());

        let packages = discover_packages(root);
        assert!(packages.is_ok_and(|p| p.is_empty()));
    }

    #[test]
    fn test_explicit_profile_list_bypasses_discovery() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let root = temp_dir.path();
        assert!(make_package(root, "mlserver_mlflow"));
        assert!(make_package(root, "tests"));

        let profile = RuntimeProfile {
            packages: Some(vec![
                "mlserver_mlflow.codecs".to_string(),
                "mlserver_mlflow".to_string(),
            ]),
            ..Default::default()
        };
        let packages = resolve_packages(root, &profile);
        assert!(packages.is_ok_and(|p| p.len() == 2 && !p.contains("tests")));
    }

    #[cfg(unix)]
    #[test]
    fn test_follows_symlinked_package_directory() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let root = temp_dir.path().join("runtime");
        let vendored = temp_dir.path().join("vendored_codecs");
        assert!(make_package(&root, "mlserver_mlflow"));
        assert!(make_package(&vendored, ""));
        assert!(
            std::os::unix::fs::symlink(&vendored, root.join("mlserver_mlflow/codecs")).is_ok()
        );

        let packages = discover_packages(&root);
        assert!(packages.is_ok_and(|p| p.len() == 2 && p.contains("mlserver_mlflow.codecs")));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlinks_are_skipped() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let root = temp_dir.path();
        assert!(make_package(root, "mlserver_mlflow"));
        assert!(
            std::os::unix::fs::symlink(root.join("does-not-exist"), root.join("latest-build"))
                .is_ok()
        );
        assert!(std::os::unix::fs::symlink(
            root.join("gone.py"),
            root.join("mlserver_mlflow/stale.py")
        )
        .is_ok());

        let packages = discover_packages(root);
        assert!(packages.is_ok_and(|p| p.len() == 1 && p.contains("mlserver_mlflow")));
    }
}
