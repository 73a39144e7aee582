use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// One regular file found under the scan root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub name: String,
    pub path: String,
    pub size_bytes: u64,
    pub modified_at: DateTime<Local>,
    pub extension: String,
    /// Containing directory relative to the root, `/`-separated. Empty for
    /// files that sit directly under the root.
    pub parent_folder: String,
}

impl FileRecord {
    /// First component of `parent_folder`, i.e. the immediate subfolder of
    /// the root this file rolls up into.
    #[must_use]
    pub fn top_level_folder(&self) -> Option<&str> {
        self.parent_folder
            .split('/')
            .next()
            .filter(|first| !first.is_empty())
    }
}

/// Raw result of walking a directory tree.
#[derive(Debug, Clone, Default)]
pub struct ScanSnapshot {
    pub root: String,
    pub files: Vec<FileRecord>,
    /// Names of the immediate subdirectories of the root, empty ones included.
    pub subfolders: Vec<String>,
    pub skipped_entries: usize,
}
