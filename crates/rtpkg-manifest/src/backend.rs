//! Build backends: where an assembled declaration goes
//!
//! The packaging system downstream of `rtpkg` consumes one rendered
//! document per package. A backend receives the finished
//! [`PackageMetadata`] exactly once per declaration.

use crate::errors::ManifestError;
use crate::manifest_writer::write_atomic;
use crate::types::PackageMetadata;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Receiver of a finished declaration
pub trait BuildBackend {
    fn register(&mut self, metadata: &PackageMetadata) -> Result<(), ManifestError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderFormat {
    #[default]
    Toml,
    Json,
    /// Core metadata 2.1, as found in `PKG-INFO` / `METADATA`
    PkgInfo,
}

impl FromStr for RenderFormat {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "toml" => Ok(RenderFormat::Toml),
            "json" => Ok(RenderFormat::Json),
            "pkg-info" | "pkginfo" => Ok(RenderFormat::PkgInfo),
            other => Err(ManifestError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RenderFormat::Toml => "toml",
            RenderFormat::Json => "json",
            RenderFormat::PkgInfo => "pkg-info",
        };
        f.write_str(name)
    }
}

/// Render metadata in the requested format
pub fn render(metadata: &PackageMetadata, format: RenderFormat) -> Result<String, ManifestError> {
    match format {
        RenderFormat::Toml => Ok(toml::to_string_pretty(metadata)?),
        RenderFormat::Json => {
            let mut json = serde_json::to_string_pretty(metadata)?;
            json.push('\n');
            Ok(json)
        }
        RenderFormat::PkgInfo => Ok(render_pkg_info(metadata)),
    }
}

fn render_pkg_info(metadata: &PackageMetadata) -> String {
    let mut out = String::new();
    let mut header = |key: &str, value: &str| {
        if !value.is_empty() {
            out.push_str(&format!("{}: {}\n", key, value));
        }
    };

    header("Metadata-Version", "2.1");
    header("Name", &metadata.name);
    header("Version", &metadata.version);
    header("Summary", &metadata.description);
    header("Home-page", &metadata.url);
    header("Author", &metadata.author);
    header("Author-email", &metadata.author_email);
    header("License", &metadata.license);
    header(
        "Description-Content-Type",
        metadata.long_description_format.content_type(),
    );
    for dependency in &metadata.dependencies {
        header("Requires-Dist", dependency);
    }

    out.push('\n');
    out.push_str(&metadata.long_description);
    out
}

/// Renders into any writer (stdout for the CLI)
pub struct WriterBackend<W: Write> {
    writer: W,
    format: RenderFormat,
}

impl<W: Write> WriterBackend<W> {
    pub fn new(writer: W, format: RenderFormat) -> Self {
        WriterBackend { writer, format }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> BuildBackend for WriterBackend<W> {
    fn register(&mut self, metadata: &PackageMetadata) -> Result<(), ManifestError> {
        let rendered = render(metadata, self.format)?;
        self.writer.write_all(rendered.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Renders into a file, replacing it atomically
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    format: RenderFormat,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>, format: RenderFormat) -> Self {
        FileBackend {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BuildBackend for FileBackend {
    fn register(&mut self, metadata: &PackageMetadata) -> Result<(), ManifestError> {
        debug!("Rendering {} as {} into {:?}", metadata.name, self.format, self.path);
        let rendered = render(metadata, self.format)?;
        write_atomic(&self.path, &rendered)
    }
}
