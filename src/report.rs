//! @ai:module:intent Define the result model of a tag rewriting run
//! @ai:module:layer domain
//! @ai:module:public_api ChangeKind, FieldChange, FileReport, RunReport
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// @ai:intent What happened to a field's tag
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Updated,
    Removed,
}

impl ChangeKind {
    /// @ai:intent Classify a change from the tag before and after
    /// @ai:effects pure
    pub fn between(old: Option<&str>, new: Option<&str>) -> Self {
        match (old, new) {
            (None, _) => ChangeKind::Added,
            (Some(_), None) => ChangeKind::Removed,
            (Some(_), Some(_)) => ChangeKind::Updated,
        }
    }
}

/// @ai:intent A single field whose tag literal changed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldChange {
    pub struct_name: Option<String>,
    pub field: String,
    pub line: usize,
    pub kind: ChangeKind,
    pub old_tag: Option<String>,
    pub new_tag: Option<String>,
}

/// @ai:intent Outcome for one file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileReport {
    pub path: PathBuf,
    pub changes: Vec<FieldChange>,
    pub warnings: Vec<String>,
    pub written: bool,
    pub error: Option<String>,
}

impl FileReport {
    /// @ai:intent Report for a file that could not be processed
    pub fn failed(path: PathBuf, error: String) -> Self {
        Self {
            path,
            error: Some(error),
            ..Default::default()
        }
    }
}

/// @ai:intent Outcome for all files of one invocation
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub files_scanned: usize,
    pub files_changed: usize,
    pub fields_changed: usize,
    pub failures: usize,
}

impl RunReport {
    /// @ai:intent Add one file's report and update the totals
    pub fn push(&mut self, file: FileReport) {
        self.files_scanned += 1;
        if !file.changes.is_empty() {
            self.files_changed += 1;
        }
        self.fields_changed += file.changes.len();
        if file.error.is_some() {
            self.failures += 1;
        }
        self.files.push(file);
    }

    /// @ai:intent Check if any field would change or did change
    pub fn has_changes(&self) -> bool {
        self.fields_changed > 0
    }

    /// @ai:intent Check if every file was processed without error
    pub fn passed(&self) -> bool {
        self.failures == 0
    }
}
