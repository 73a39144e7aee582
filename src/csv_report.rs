use crate::error::{AuditError, Result};
use crate::types::{FileRecord, ScanSnapshot};
use log::info;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Renders one CSV row per file, ordered by path.
///
/// Columns: `name,path,size_bytes,modified_at,extension,parent_folder`, with
/// RFC 3339 timestamps.
pub fn render(files: &[FileRecord]) -> Result<String> {
    let mut sorted: Vec<&FileRecord> = files.iter().collect();
    sorted.sort_by(|a, b| a.path.cmp(&b.path));

    let mut writer = csv::Writer::from_writer(Vec::new());
    if sorted.is_empty() {
        writer.write_record(HEADER)?;
    }
    for record in sorted {
        writer.serialize(record)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AuditError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

const HEADER: [&str; 6] = [
    "name",
    "path",
    "size_bytes",
    "modified_at",
    "extension",
    "parent_folder",
];

/// Reads back a census produced by [`render`].
pub fn parse<R: Read>(reader: R) -> Result<Vec<FileRecord>> {
    let mut reader = csv::Reader::from_reader(reader);
    let records = reader
        .deserialize()
        .collect::<std::result::Result<Vec<FileRecord>, csv::Error>>()?;
    Ok(records)
}

/// Loads a census file into a snapshot so it can be analysed without
/// rescanning the folder.
pub fn load_census(path: &Path) -> Result<ScanSnapshot> {
    let file = File::open(path).map_err(|source| AuditError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let files = parse(file)?;
    info!("Loaded {} records from {}", files.len(), path.display());

    let root = files
        .first()
        .and_then(infer_root)
        .unwrap_or_else(|| format!("(census: {})", path.display()));

    Ok(ScanSnapshot {
        root,
        files,
        subfolders: Vec::new(),
        skipped_entries: 0,
    })
}

/// Recovers the scan root from a record's path and relative parent folder.
fn infer_root(record: &FileRecord) -> Option<String> {
    let depth = if record.parent_folder.is_empty() {
        0
    } else {
        record.parent_folder.split('/').count()
    };
    Path::new(&record.path)
        .ancestors()
        .nth(depth + 1)
        .map(|root| root.to_string_lossy().into_owned())
}
