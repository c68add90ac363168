//! Document domain types
//!
//! A document is only ever sent as part of an [`UploadBatch`], and a batch can
//! only be built by screening candidates against [`ALLOWED_EXTENSIONS`]. This
//! keeps disallowed files from ever reaching the upload endpoint.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ValidationError, skipped_files_notice};

/// Extensions accepted by the document extraction backend
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["pdf", "doc", "docx", "xls", "xlsx"];

/// A file picked by the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFile {
    /// Display name, also used as the multipart file name
    pub name: String,
    /// Location on disk
    pub path: PathBuf,
}

impl DocumentFile {
    /// Creates a document from a path, naming it after the final path component
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { name, path }
    }

    /// Lowercased text after the last `.` in the name, empty when there is none
    pub fn extension(&self) -> String {
        match self.name.rsplit_once('.') {
            Some((_, ext)) => ext.to_lowercase(),
            None => String::new(),
        }
    }

    /// Whether the extension is in [`ALLOWED_EXTENSIONS`]
    pub fn has_allowed_extension(&self) -> bool {
        let ext = self.extension();
        ALLOWED_EXTENSIONS.contains(&ext.as_str())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A non-empty, screened set of documents ready to submit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch {
    files: Vec<DocumentFile>,
}

impl UploadBatch {
    /// Screens candidates and builds a batch from the survivors
    ///
    /// Files with a disallowed extension are dropped and listed in the
    /// returned [`Screening`]. Fails when the input is empty or when nothing
    /// survives.
    pub fn screen(candidates: Vec<DocumentFile>) -> Result<Screening, ValidationError> {
        if candidates.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }

        let (accepted, rejected): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(DocumentFile::has_allowed_extension);
        let rejected: Vec<String> = rejected.into_iter().map(|f| f.name).collect();

        if accepted.is_empty() {
            return Err(ValidationError::NoAllowedFiles { rejected });
        }

        Ok(Screening {
            batch: UploadBatch { files: accepted },
            rejected,
        })
    }

    pub fn files(&self) -> &[DocumentFile] {
        &self.files
    }

    /// File names in submission order
    pub fn names(&self) -> Vec<String> {
        self.files.iter().map(|f| f.name.clone()).collect()
    }
}

/// Outcome of screening a set of candidate documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screening {
    pub batch: UploadBatch,
    /// Names of files dropped for having a disallowed extension
    pub rejected: Vec<String>,
}

impl Screening {
    /// Notice listing skipped files, if any were skipped
    pub fn rejection_notice(&self) -> Option<String> {
        skipped_files_notice(&self.rejected)
    }
}

/// Result of replacing the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionReport {
    /// Number of files now selected
    pub accepted: usize,
    /// Names of files that were skipped
    pub rejected: Vec<String>,
}

impl SelectionReport {
    pub fn rejection_notice(&self) -> Option<String> {
        skipped_files_notice(&self.rejected)
    }
}

/// The set of documents currently picked for the next submission
#[derive(Debug, Clone, Default)]
pub struct FileSelection {
    files: Vec<DocumentFile>,
}

impl FileSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the selection with the allowed subset of `candidates`
    ///
    /// An empty `candidates` list leaves the selection untouched and reports
    /// nothing. When no candidate is allowed the selection is cleared.
    pub fn select(
        &mut self,
        candidates: Vec<DocumentFile>,
    ) -> Result<SelectionReport, ValidationError> {
        if candidates.is_empty() {
            return Ok(SelectionReport {
                accepted: self.files.len(),
                rejected: Vec::new(),
            });
        }

        match UploadBatch::screen(candidates) {
            Ok(screening) => {
                self.files = screening.batch.files;
                Ok(SelectionReport {
                    accepted: self.files.len(),
                    rejected: screening.rejected,
                })
            }
            Err(e) => {
                self.files.clear();
                Err(e)
            }
        }
    }

    /// Drops the file at `index`, ignoring out-of-range indices
    pub fn remove(&mut self, index: usize) -> Option<DocumentFile> {
        if index < self.files.len() {
            Some(self.files.remove(index))
        } else {
            None
        }
    }

    /// Builds a batch from the current selection without clearing it
    pub fn to_batch(&self) -> Result<UploadBatch, ValidationError> {
        if self.files.is_empty() {
            return Err(ValidationError::EmptyBatch);
        }
        Ok(UploadBatch {
            files: self.files.clone(),
        })
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[DocumentFile] {
        &self.files
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
