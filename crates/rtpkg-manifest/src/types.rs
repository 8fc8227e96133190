//! Package metadata handed to build backends
//!
//! Field names on the wire follow the setuptools keyword arguments
//! (`install_requires`, `long_description_content_type`) so the rendered
//! manifest reads the same as the `setup()` call it replaces.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::fmt;

/// Markup format of the long description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DescriptionFormat {
    #[serde(rename = "text/plain", alias = "plain")]
    Plain,
    #[default]
    #[serde(rename = "text/markdown", alias = "markdown")]
    Markdown,
    #[serde(rename = "text/x-rst", alias = "rst")]
    Rst,
}

impl DescriptionFormat {
    /// MIME type used for `Description-Content-Type`
    pub fn content_type(self) -> &'static str {
        match self {
            DescriptionFormat::Plain => "text/plain",
            DescriptionFormat::Markdown => "text/markdown",
            DescriptionFormat::Rst => "text/x-rst",
        }
    }
}

impl fmt::Display for DescriptionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.content_type())
    }
}

/// Complete declaration of one runtime package
///
/// Built once per invocation by [`crate::declaration::assemble`] and consumed
/// by a [`crate::backend::BuildBackend`]. It carries no timestamps, so two
/// assemblies over an unchanged tree compare and render identically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
    pub url: String,
    pub author: String,
    pub author_email: String,
    pub description: String,
    pub license: String,
    #[serde(default)]
    pub packages: BTreeSet<String>,
    #[serde(rename = "install_requires", default)]
    pub dependencies: SmallVec<[String; 4]>,
    #[serde(rename = "long_description_content_type", default)]
    pub long_description_format: DescriptionFormat,
    pub long_description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types() {
        assert_eq!(DescriptionFormat::Plain.content_type(), "text/plain");
        assert_eq!(DescriptionFormat::Markdown.content_type(), "text/markdown");
        assert_eq!(DescriptionFormat::Rst.to_string(), "text/x-rst");
    }

    #[test]
    fn test_format_accepts_short_alias() {
        #[derive(Deserialize)]
        struct Holder {
            format: DescriptionFormat,
        }
        let short: Result<Holder, _> = toml::from_str("format = \"rst\"");
        assert!(short.is_ok_and(|h| h.format == DescriptionFormat::Rst));

        let mime: Result<Holder, _> = toml::from_str("format = \"text/plain\"");
        assert!(mime.is_ok_and(|h| h.format == DescriptionFormat::Plain));
    }

    #[test]
    fn test_setuptools_keys_on_the_wire() {
        let metadata = PackageMetadata {
            name: "mlserver-mlflow".to_string(),
            version: "1.2.3".to_string(),
            url: String::new(),
            author: String::new(),
            author_email: String::new(),
            description: String::new(),
            license: String::new(),
            packages: BTreeSet::new(),
            dependencies: SmallVec::from_vec(vec!["mlserver".to_string()]),
            long_description_format: DescriptionFormat::Markdown,
            long_description: "Hello".to_string(),
        };
        let json = serde_json::to_value(&metadata).unwrap_or_default();
        assert_eq!(json["install_requires"][0], "mlserver");
        assert_eq!(json["long_description_content_type"], "text/markdown");
    }
}
