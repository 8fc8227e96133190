//! Runtime package declaration
//!
//! Resolves the version and long description of a runtime package from its
//! source tree, assembles the package metadata, and hands it to a build
//! backend that renders it for the packaging system.
//!
//! The version is read from `<package>/version.py` by static parsing; the
//! file is never executed.

pub mod backend;
pub mod declaration;
pub mod description;
pub mod errors;
pub mod manifest_writer;
pub mod package_discovery;
pub mod profile;
pub mod types;
pub mod version;

pub use backend::{render, BuildBackend, FileBackend, RenderFormat, WriterBackend};
pub use declaration::{assemble, declare};
pub use description::{load_description, load_description_from};
pub use errors::ManifestError;
pub use profile::RuntimeProfile;
pub use types::{DescriptionFormat, PackageMetadata};
pub use version::{resolve_version, VersionModule, VersionResolver, VERSION_KEY};

pub use package_discovery::{discover_packages, resolve_packages};
