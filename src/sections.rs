//! Turns an [`Analysis`] into titled tables shared by the Markdown and
//! terminal renderers.

use crate::config::ReportConfig;
use crate::format::{
    MAX_NAME_LEN, escape_cell, format_count, format_date, format_optional_date, format_percent,
    format_size, truncate_filename,
};
use crate::stats::Analysis;
use crate::types::FileRecord;

/// Extension rows shown before the remainder is collapsed into one line.
pub const MAX_EXTENSION_ROWS: usize = 20;

#[derive(Debug, Clone)]
pub struct Section {
    pub title: String,
    pub note: Option<String>,
    pub header: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
    pub empty_message: &'static str,
}

/// How cell text is prepared for the target output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Markup {
    /// Pipe-escaped cells, optional action links.
    Markdown,
    Plain,
}

impl Markup {
    fn cell(self, text: &str) -> String {
        match self {
            Markup::Markdown => escape_cell(text),
            Markup::Plain => text.to_string(),
        }
    }
}

#[must_use]
pub fn summary_lines(analysis: &Analysis) -> Vec<(&'static str, String)> {
    let summary = &analysis.summary;
    let mut lines = vec![("Total files", format_count(summary.total_files))];

    if !summary.is_empty() {
        lines.push((
            "Date range",
            format!(
                "{} to {}",
                format_optional_date(summary.earliest_modified_at.as_ref()),
                format_optional_date(summary.latest_modified_at.as_ref())
            ),
        ));
        lines.push(("Total size", format_size(summary.total_size_bytes)));
        if let Some(avg) = summary.average_size_bytes {
            lines.push(("Average file size", format_size(avg)));
        }
    }
    if summary.skipped_entries > 0 {
        lines.push(("Skipped entries", format_count(summary.skipped_entries)));
    }
    lines
}

#[must_use]
pub fn build(analysis: &Analysis, config: &ReportConfig, markup: Markup) -> Vec<Section> {
    let actions = config.include_action_links && markup == Markup::Markdown;
    let recent_note = (!analysis.recent.is_empty()).then(|| {
        format!(
            "{} files modified in the last {} days",
            format_count(analysis.recent.len()),
            analysis.recent_window_days
        )
    });

    vec![
        Section {
            title: format!("Top {} Largest Files", analysis.top_n),
            note: None,
            header: file_header(actions),
            rows: file_rows(&analysis.largest, config, markup, actions),
            empty_message: "No files found",
        },
        Section {
            title: format!("Files from Last {} Days", analysis.recent_window_days),
            note: recent_note,
            header: file_header(actions),
            rows: file_rows(&analysis.recent, config, markup, actions),
            empty_message: "No recently modified files",
        },
        Section {
            title: format!("{} Oldest Files", analysis.top_n),
            note: None,
            header: file_header(actions),
            rows: file_rows(&analysis.oldest, config, markup, actions),
            empty_message: "No files found",
        },
        subfolder_section(analysis, config, markup, actions),
        extension_section(analysis, markup),
        year_section(analysis),
    ]
}

fn file_header(actions: bool) -> Vec<&'static str> {
    let mut header = vec!["File", "Size", "Modified"];
    if actions {
        header.push("Action");
    }
    header
}

fn file_rows(
    files: &[FileRecord],
    config: &ReportConfig,
    markup: Markup,
    actions: bool,
) -> Vec<Vec<String>> {
    files
        .iter()
        .map(|f| {
            let mut row = vec![
                markup.cell(&truncate_filename(&f.name, MAX_NAME_LEN)),
                format_size(f.size_bytes),
                format_date(&f.modified_at),
            ];
            if actions {
                row.push(action_link(config, &f.path));
            }
            row
        })
        .collect()
}

fn action_link(config: &ReportConfig, path: &str) -> String {
    format!("[🗑️]({})", config.action.uri_for(path))
}

fn subfolder_section(
    analysis: &Analysis,
    config: &ReportConfig,
    markup: Markup,
    actions: bool,
) -> Section {
    let mut header = vec!["Folder", "Files", "Total Size", "Most Recent"];
    if actions {
        header.push("Action");
    }

    let rows = analysis
        .subfolders
        .iter()
        .map(|s| {
            let mut row = vec![
                markup.cell(&s.name),
                format_count(s.file_count),
                format_size(s.total_size_bytes),
                format_optional_date(s.most_recent_modified_at.as_ref()),
            ];
            if actions {
                row.push(action_link(config, &s.path));
            }
            row
        })
        .collect();

    Section {
        title: "Subfolder Analysis".to_string(),
        note: None,
        header,
        rows,
        empty_message: "No subfolders found",
    }
}

fn extension_section(analysis: &Analysis, markup: Markup) -> Section {
    let total = analysis.summary.total_files;
    let mut rows: Vec<Vec<String>> = analysis
        .extensions
        .iter()
        .take(MAX_EXTENSION_ROWS)
        .map(|e| {
            let label = if e.extension.is_empty() {
                "(no extension)".to_string()
            } else {
                format!(".{}", e.extension)
            };
            vec![
                markup.cell(&label),
                format_count(e.file_count),
                format_size(e.total_size_bytes),
                format_percent(e.file_count, total),
            ]
        })
        .collect();

    let remaining = analysis.extensions.len().saturating_sub(MAX_EXTENSION_ROWS);
    if remaining > 0 {
        rows.push(vec![
            format!("...and {remaining} more"),
            String::new(),
            String::new(),
            String::new(),
        ]);
    }

    Section {
        title: "File Type Breakdown".to_string(),
        note: None,
        header: vec!["Extension", "Files", "Total Size", "Share"],
        rows,
        empty_message: "No files found",
    }
}

fn year_section(analysis: &Analysis) -> Section {
    let total = analysis.summary.total_files;
    let rows = analysis
        .years
        .iter()
        .map(|y| {
            vec![
                y.year.to_string(),
                format_count(y.file_count),
                format_size(y.total_size_bytes),
                format_percent(y.file_count, total),
            ]
        })
        .collect();

    Section {
        title: "Files by Year".to_string(),
        note: None,
        header: vec!["Year", "Files", "Total Size", "Share"],
        rows,
        empty_message: "No files found",
    }
}
