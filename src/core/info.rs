//! Artifact descriptors returned by rules.

use serde::{Deserialize, Serialize};

/// The files a rule causes to exist.
///
/// `files` order is meaningful to downstream consumers (object files in
/// input order, for example).
pub trait Info {
    fn files(&self) -> &[String];
}

/// Plain artifact descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultInfo {
    pub files: Vec<String>,
}

impl DefaultInfo {
    pub fn new<I>(files: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        DefaultInfo {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

impl Info for DefaultInfo {
    fn files(&self) -> &[String] {
        &self.files
    }
}

/// Descriptor for a static library archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchiveInfo {
    pub files: Vec<String>,
    /// Path of the produced archive
    pub lib: String,
}

impl Info for ArchiveInfo {
    fn files(&self) -> &[String] {
        &self.files
    }
}

impl From<ArchiveInfo> for DefaultInfo {
    fn from(info: ArchiveInfo) -> Self {
        DefaultInfo { files: info.files }
    }
}
