//! Locating generated artifacts by partial filename
//!
//! The artifact directory is listed once per run; each task then scans that
//! listing and takes the first entry whose name contains its search string.

use crate::models::MatchedFile;
use crate::Result;
use std::path::{Path, PathBuf};

pub const PNG_EXTENSION: &str = ".png";

/// A single read of the artifact directory, in the order the OS returned it.
#[derive(Debug, Clone)]
pub struct ArtifactListing {
    dir: PathBuf,
    names: Vec<String>,
}

impl ArtifactListing {
    pub fn read(dir: &Path) -> Result<Self> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            match entry.file_name().into_string() {
                Ok(name) => names.push(name),
                Err(name) => tracing::warn!("Skipping non UTF-8 file name: {:?}", name),
            }
        }

        Ok(Self::from_names(dir, names))
    }

    /// Build a listing with a fixed entry order.
    pub fn from_names(dir: &Path, names: Vec<String>) -> Self {
        Self {
            dir: dir.to_path_buf(),
            names,
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn find(&self, search: &str, extension: &str) -> Option<MatchedFile> {
        first_match(&self.names, search, extension).map(|name| MatchedFile {
            name: name.to_string(),
            path: self.dir.join(name),
        })
    }
}

/// First name containing `search` and ending with `extension`.
pub fn first_match<'a>(names: &'a [String], search: &str, extension: &str) -> Option<&'a str> {
    names
        .iter()
        .map(String::as_str)
        .find(|name| name.contains(search) && name.ends_with(extension))
}
