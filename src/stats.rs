use crate::config::ReportConfig;
use crate::types::{FileRecord, ScanSnapshot};
use chrono::{DateTime, Datelike, Duration, Local};
use std::collections::BTreeMap;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    pub total_files: usize,
    pub total_size_bytes: u64,
    pub earliest_modified_at: Option<DateTime<Local>>,
    pub latest_modified_at: Option<DateTime<Local>>,
    pub average_size_bytes: Option<u64>,
    pub skipped_entries: usize,
}

impl ScanSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubfolderSummary {
    pub name: String,
    pub path: String,
    pub file_count: usize,
    pub total_size_bytes: u64,
    pub most_recent_modified_at: Option<DateTime<Local>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSummary {
    /// Lowercase extension without the dot; empty for files without one.
    pub extension: String,
    pub file_count: usize,
    pub total_size_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearSummary {
    pub year: i32,
    pub file_count: usize,
    pub total_size_bytes: u64,
}

/// Every view of one scan that the renderers need.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub root: String,
    pub top_n: usize,
    pub recent_window_days: i64,
    pub summary: ScanSummary,
    pub largest: Vec<FileRecord>,
    pub recent: Vec<FileRecord>,
    pub oldest: Vec<FileRecord>,
    pub subfolders: Vec<SubfolderSummary>,
    pub extensions: Vec<ExtensionSummary>,
    pub years: Vec<YearSummary>,
}

#[must_use]
pub fn analyze(snapshot: &ScanSnapshot, config: &ReportConfig, now: DateTime<Local>) -> Analysis {
    let files = &snapshot.files;

    Analysis {
        root: snapshot.root.clone(),
        top_n: config.top_n,
        recent_window_days: config.recent_window_days,
        summary: summarize(files, snapshot.skipped_entries),
        largest: largest_files(files, config.top_n),
        recent: recent_files(files, now, config.recent_window_days),
        oldest: oldest_files(files, config.top_n),
        subfolders: subfolder_rollup(&snapshot.root, files, &snapshot.subfolders),
        extensions: extension_breakdown(files),
        years: year_breakdown(files),
    }
}

#[must_use]
pub fn summarize(files: &[FileRecord], skipped_entries: usize) -> ScanSummary {
    let total_files = files.len();
    let total_size_bytes: u64 = files.iter().map(|f| f.size_bytes).sum();

    ScanSummary {
        total_files,
        total_size_bytes,
        earliest_modified_at: files.iter().map(|f| f.modified_at).min(),
        latest_modified_at: files.iter().map(|f| f.modified_at).max(),
        average_size_bytes: (total_files > 0).then(|| total_size_bytes / total_files as u64),
        skipped_entries,
    }
}

/// Largest first; equal sizes are ordered by path.
#[must_use]
pub fn largest_files(files: &[FileRecord], n: usize) -> Vec<FileRecord> {
    let mut sorted: Vec<&FileRecord> = files.iter().collect();
    sorted.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes).then_with(|| a.path.cmp(&b.path)));
    sorted.into_iter().take(n).cloned().collect()
}

/// Oldest first; equal timestamps are ordered by path.
#[must_use]
pub fn oldest_files(files: &[FileRecord], n: usize) -> Vec<FileRecord> {
    let mut sorted: Vec<&FileRecord> = files.iter().collect();
    sorted.sort_by(|a, b| a.modified_at.cmp(&b.modified_at).then_with(|| a.path.cmp(&b.path)));
    sorted.into_iter().take(n).cloned().collect()
}

/// Files modified at or after `now - window_days`, newest first.
///
/// A window reaching past the representable date range keeps every file.
#[must_use]
pub fn recent_files(files: &[FileRecord], now: DateTime<Local>, window_days: i64) -> Vec<FileRecord> {
    let cutoff = Duration::try_days(window_days).and_then(|window| now.checked_sub_signed(window));
    let mut recent: Vec<FileRecord> = files
        .iter()
        .filter(|f| cutoff.is_none_or(|cutoff| f.modified_at >= cutoff))
        .cloned()
        .collect();
    recent.sort_by(|a, b| b.modified_at.cmp(&a.modified_at).then_with(|| a.path.cmp(&b.path)));
    recent
}

/// Rolls every file up into the first-level folder it lives under.
///
/// `known_folders` lists folders that must appear even when they hold no
/// files. Files directly under the root are not part of any rollup.
#[must_use]
pub fn subfolder_rollup(
    root: &str,
    files: &[FileRecord],
    known_folders: &[String],
) -> Vec<SubfolderSummary> {
    let mut groups: BTreeMap<&str, SubfolderSummary> = BTreeMap::new();
    let new_summary = |name: &str| SubfolderSummary {
        name: name.to_string(),
        path: join_root(root, name),
        file_count: 0,
        total_size_bytes: 0,
        most_recent_modified_at: None,
    };

    for name in known_folders {
        groups
            .entry(name.as_str())
            .or_insert_with(|| new_summary(name));
    }

    for file in files {
        let Some(folder) = file.top_level_folder() else {
            continue;
        };
        let group = groups.entry(folder).or_insert_with(|| new_summary(folder));
        group.file_count += 1;
        group.total_size_bytes += file.size_bytes;
        group.most_recent_modified_at = group.most_recent_modified_at.max(Some(file.modified_at));
    }

    groups.into_values().collect()
}

fn join_root(root: &str, name: &str) -> String {
    if root.is_empty() {
        name.to_string()
    } else {
        std::path::Path::new(root)
            .join(name)
            .to_string_lossy()
            .into_owned()
    }
}

/// File types ordered by how many files they account for.
#[must_use]
pub fn extension_breakdown(files: &[FileRecord]) -> Vec<ExtensionSummary> {
    let mut groups: HashMap<&str, (usize, u64)> = HashMap::new();
    for f in files {
        let entry = groups.entry(f.extension.as_str()).or_default();
        entry.0 += 1;
        entry.1 += f.size_bytes;
    }

    let mut breakdown: Vec<ExtensionSummary> = groups
        .into_iter()
        .map(|(ext, (count, size))| ExtensionSummary {
            extension: ext.to_string(),
            file_count: count,
            total_size_bytes: size,
        })
        .collect();
    breakdown.sort_by(|a, b| {
        b.file_count
            .cmp(&a.file_count)
            .then_with(|| a.extension.cmp(&b.extension))
    });
    breakdown
}

/// Files grouped by the year they were last modified, newest year first.
#[must_use]
pub fn year_breakdown(files: &[FileRecord]) -> Vec<YearSummary> {
    let mut groups: BTreeMap<i32, (usize, u64)> = BTreeMap::new();
    for f in files {
        let entry = groups.entry(f.modified_at.year()).or_default();
        entry.0 += 1;
        entry.1 += f.size_bytes;
    }

    groups
        .into_iter()
        .rev()
        .map(|(year, (count, size))| YearSummary {
            year,
            file_count: count,
            total_size_bytes: size,
        })
        .collect()
}
