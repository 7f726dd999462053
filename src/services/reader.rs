//! Directory reader for loading input documents
//!
//! Collects the text files in an input folder into [`Document`] values, the
//! way the index expects them: deterministic ordering, hidden and unsupported
//! files skipped.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{DocuChatError, Result};
use crate::models::Document;

/// File extensions treated as plain-text documents
const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "md", "markdown", "rst", "text"];

/// Reads every supported text file in a directory into documents.
#[derive(Debug, Clone)]
pub struct DirectoryReader {
    input_dir: PathBuf,
    recursive: bool,
}

impl DirectoryReader {
    pub fn new(input_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            recursive: false,
        }
    }

    /// Descend into subdirectories as well
    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Load all supported documents from the input directory.
    ///
    /// Returns an error if the directory does not exist or contains no
    /// loadable documents.
    pub fn load_data(&self) -> Result<Vec<Document>> {
        if !self.input_dir.is_dir() {
            return Err(DocuChatError::not_found(format!(
                "input directory {}",
                self.input_dir.display()
            )));
        }

        let mut files = Vec::new();
        self.collect_files(&self.input_dir, &mut files)?;
        files.sort();

        let mut documents = Vec::with_capacity(files.len());
        for path in files {
            let file_name = path
                .strip_prefix(&self.input_dir)
                .unwrap_or(&path)
                .to_string_lossy()
                .to_string();

            let text = fs::read_to_string(&path).map_err(|e| {
                DocuChatError::document_load(format!(
                    "failed to read {} as UTF-8 text: {e}",
                    path.display()
                ))
            })?;

            if text.trim().is_empty() {
                warn!("Skipping empty file: {}", path.display());
                continue;
            }

            debug!(file = %file_name, chars = text.len(), "Loaded document");
            documents.push(Document::new(file_name, path, text));
        }

        if documents.is_empty() {
            return Err(DocuChatError::document_load(format!(
                "no loadable documents in {}",
                self.input_dir.display()
            )));
        }

        Ok(documents)
    }

    fn collect_files(&self, dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            let name = entry.file_name();
            if name.to_string_lossy().starts_with('.') {
                continue;
            }

            if path.is_dir() {
                if self.recursive {
                    self.collect_files(&path, files)?;
                }
                continue;
            }

            if Self::is_supported(&path) {
                files.push(path);
            } else {
                debug!("Skipping unsupported file: {}", path.display());
            }
        }

        Ok(())
    }

    fn is_supported(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
            .unwrap_or(false)
    }
}
