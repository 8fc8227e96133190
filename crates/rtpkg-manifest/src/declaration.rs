//! Package declaration: resolve, assemble, register
//!
//! Every input is resolved before the backend is touched. A missing README or
//! a broken version file aborts the declaration and the backend never sees a
//! partial record.

use crate::backend::BuildBackend;
use crate::description::load_description_from;
use crate::errors::ManifestError;
use crate::package_discovery::resolve_packages;
use crate::profile::RuntimeProfile;
use crate::types::PackageMetadata;
use crate::version::VersionResolver;
use smallvec::SmallVec;
use std::path::Path;
use tracing::{debug, info};

/// Build the metadata record for the runtime rooted at `root`
pub fn assemble(root: &Path, profile: &RuntimeProfile) -> Result<PackageMetadata, ManifestError> {
    profile.validate()?;
    debug!("Assembling declaration for '{}' from {:?}", profile.name, root);

    let version = VersionResolver::from_profile(profile).resolve(root)?;
    let long_description = load_description_from(root, &profile.readme)?;
    let packages = resolve_packages(root, profile)?;

    Ok(PackageMetadata {
        name: profile.name.clone(),
        version,
        url: profile.url.clone(),
        author: profile.author.clone(),
        author_email: profile.author_email.clone(),
        description: profile.description.clone(),
        license: profile.license.clone(),
        packages,
        dependencies: SmallVec::from_vec(profile.dependencies.clone()),
        long_description_format: profile.long_description_format,
        long_description,
    })
}

/// Assemble the declaration and hand it to `backend` exactly once
pub fn declare<B: BuildBackend + ?Sized>(
    root: &Path,
    profile: &RuntimeProfile,
    backend: &mut B,
) -> Result<PackageMetadata, ManifestError> {
    let metadata = assemble(root, profile)?;
    backend.register(&metadata)?;
    info!("Declared {} {}", metadata.name, metadata.version);
    Ok(metadata)
}
