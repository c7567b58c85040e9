//! Destinations for generated schema documents.

use crate::avro::SchemaDocument;
use crate::error::CodegenError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Receives rendered schema documents.
pub trait SchemaSink {
    /// Writes one document.
    ///
    /// # Errors
    /// Returns `CodegenError` if the document cannot be rendered or stored.
    fn write(&mut self, document: &SchemaDocument) -> Result<(), CodegenError>;
}

/// Writes documents as `.avsc` files below a root directory.
///
/// Existing files are overwritten.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
    written: usize,
}

impl DirectorySink {
    /// Opens the output root, creating it if missing.
    ///
    /// # Errors
    /// Returns `CodegenError::NotADirectory` if the path exists but is not a
    /// directory, or `CodegenError::Io` if it cannot be created.
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, CodegenError> {
        let root = root.into();
        ensure_output_dir(&root)?;
        Ok(Self { root, written: 0 })
    }

    /// Returns the output root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the number of files written.
    #[must_use]
    pub const fn written(&self) -> usize {
        self.written
    }
}

impl SchemaSink for DirectorySink {
    fn write(&mut self, document: &SchemaDocument) -> Result<(), CodegenError> {
        let path = self.root.join(document.relative_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut rendered = document.render()?;
        rendered.push('\n');
        fs::write(&path, rendered)?;
        self.written += 1;
        debug!(schema = %document.full_name(), path = %path.display(), "wrote schema");
        Ok(())
    }
}

/// Checks that an output root is a directory if it exists.
///
/// # Errors
/// Returns `CodegenError::NotADirectory` if the path exists but is not a
/// directory.
pub fn check_output_dir(root: &Path) -> Result<(), CodegenError> {
    if root.exists() && !root.is_dir() {
        return Err(CodegenError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Validates an output root, creating it if missing.
///
/// # Errors
/// Returns `CodegenError::NotADirectory` if the path exists but is not a
/// directory, or `CodegenError::Io` if it cannot be created.
pub fn ensure_output_dir(root: &Path) -> Result<(), CodegenError> {
    check_output_dir(root)?;
    if !root.exists() {
        fs::create_dir_all(root)?;
        info!(path = %root.display(), "created output directory");
    }
    Ok(())
}

/// Keeps rendered documents in memory, keyed by relative path.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    documents: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a rendered document by relative path.
    #[must_use]
    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.documents.get(path.as_ref()).map(String::as_str)
    }

    /// Iterates over relative paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.documents.keys().map(PathBuf::as_path)
    }

    /// Returns the number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns true if no document was stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Consumes the sink and returns the stored documents.
    #[must_use]
    pub fn into_documents(self) -> BTreeMap<PathBuf, String> {
        self.documents
    }
}

impl SchemaSink for MemorySink {
    fn write(&mut self, document: &SchemaDocument) -> Result<(), CodegenError> {
        self.documents
            .insert(document.relative_path(), document.render()?);
        Ok(())
    }
}
