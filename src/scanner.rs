use crate::error::{AuditError, Result};
use crate::types::{FileRecord, ScanSnapshot};
use chrono::{DateTime, Local};
use log::{debug, info, warn};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Walks `root` recursively and records every regular file below it.
///
/// The root must be an existing directory. Entries that cannot be read are
/// logged, counted in `skipped_entries` and left out. Symlinks are not
/// followed.
pub fn scan_directory(root: &Path) -> Result<ScanSnapshot> {
    let metadata = match fs::metadata(root) {
        Ok(m) => m,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AuditError::RootNotFound(root.to_path_buf()));
        }
        Err(source) => {
            return Err(AuditError::Io {
                path: root.to_path_buf(),
                source,
            });
        }
    };
    if !metadata.is_dir() {
        return Err(AuditError::NotADirectory(root.to_path_buf()));
    }

    let io_err = |source| AuditError::Io {
        path: root.to_path_buf(),
        source,
    };
    let root = fs::canonicalize(root).map_err(io_err)?;
    // An unreadable root is fatal, unlike unreadable entries below it.
    fs::read_dir(&root).map_err(io_err)?;

    info!("Scanning folder: {}", root.display());

    let mut snapshot = ScanSnapshot {
        root: root.to_string_lossy().into_owned(),
        ..ScanSnapshot::default()
    };

    for entry in WalkDir::new(&root).min_depth(1) {
        collect_entry(&mut snapshot, &root, entry);
    }

    snapshot.subfolders.sort();

    info!(
        "Completed scanning {} files ({} skipped)",
        snapshot.files.len(),
        snapshot.skipped_entries
    );
    Ok(snapshot)
}

/// Adds one walk result to the snapshot, counting it as skipped when it
/// cannot be read.
fn collect_entry(snapshot: &mut ScanSnapshot, root: &Path, entry: walkdir::Result<DirEntry>) {
    let entry = match entry {
        Ok(e) => e,
        Err(e) => {
            warn!("Skipping entry: {e}");
            snapshot.skipped_entries += 1;
            return;
        }
    };

    let file_type = entry.file_type();
    if file_type.is_dir() {
        if entry.depth() == 1 {
            snapshot
                .subfolders
                .push(entry.file_name().to_string_lossy().into_owned());
        }
        return;
    }
    if !file_type.is_file() {
        return;
    }

    match file_record(root, &entry) {
        Ok(record) => {
            snapshot.files.push(record);
            if snapshot.files.len() % 500 == 0 {
                debug!("  processed {} files", snapshot.files.len());
            }
        }
        Err(e) => {
            warn!("Skipping {}: {e}", entry.path().display());
            snapshot.skipped_entries += 1;
        }
    }
}

fn file_record(root: &Path, entry: &DirEntry) -> std::io::Result<FileRecord> {
    let metadata = entry.metadata()?;
    let modified: DateTime<Local> = metadata.modified()?.into();
    let path = entry.path();

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let parent_folder = path
        .parent()
        .and_then(|parent| parent.strip_prefix(root).ok())
        .map(|relative| {
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default();

    Ok(FileRecord {
        name: entry.file_name().to_string_lossy().into_owned(),
        path: path.to_string_lossy().into_owned(),
        size_bytes: metadata.len(),
        modified_at: modified,
        extension,
        parent_folder,
    })
}
