//! Emitters turning a schema into generated files
//!
//! Emitters are pure: they render [`GeneratedFile`]s in memory and never touch
//! the filesystem. Writing happens afterwards through
//! [`GeneratedFile::write_to`].

pub mod class;
pub mod docs;

pub use class::{ClassEmitter, ClassOptions, CrudQueries, KeyColumnStrategy};
pub use docs::DocsEmitter;

use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// How a generated file is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace any existing file
    Overwrite,
    /// Append to the file, creating it if absent
    Append,
}

/// Represents a generated file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output root
    pub path: PathBuf,
    /// File content
    pub content: String,
    /// File description for user feedback
    pub description: String,
    /// Write mode
    pub mode: WriteMode,
}

impl GeneratedFile {
    /// Write the file below `root`, creating parent directories
    ///
    /// Returns the full path that was written.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be created or the file cannot be
    /// written.
    pub fn write_to(&self, root: &Path) -> Result<PathBuf> {
        let full_path = root.join(&self.path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        match self.mode {
            WriteMode::Overwrite => fs::write(&full_path, &self.content)?,
            WriteMode::Append => {
                let mut file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&full_path)?;
                file.write_all(self.content.as_bytes())?;
            }
        }

        tracing::debug!(path = %full_path.display(), mode = ?self.mode, "wrote file");
        Ok(full_path)
    }
}
