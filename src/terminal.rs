use crate::config::ReportConfig;
use crate::markdown::TITLE;
use crate::sections::{self, Markup, Section};
use crate::stats::Analysis;
use colored::Colorize;
use comfy_table::Table;

/// Console preview of the review with coloured headings and UTF-8 tables.
#[must_use]
pub fn render(analysis: &Analysis, config: &ReportConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", format!("=== {TITLE} ===").cyan()));
    out.push_str(&format!("Folder: {}\n", analysis.root));

    out.push_str(&format!("\n{}\n", "=== Summary ===".cyan()));
    for (label, value) in sections::summary_lines(analysis) {
        out.push_str(&format!("{:<20} {}\n", format!("{label}:"), value.green()));
    }
    if analysis.summary.is_empty() {
        out.push_str(&format!("{}\n", "No files found.".yellow()));
    }

    for section in sections::build(analysis, config, Markup::Plain) {
        out.push_str(&render_section(&section));
    }

    out
}

fn render_section(section: &Section) -> String {
    let mut out = format!("\n{}\n", format!("=== {} ===", section.title).cyan());

    if section.rows.is_empty() {
        out.push_str(&format!("{}.\n", section.empty_message));
        return out;
    }
    if let Some(note) = &section.note {
        out.push_str(&format!("{}\n", note.yellow()));
    }

    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(section.header.clone());
    for row in &section.rows {
        table.add_row(row.clone());
    }
    out.push_str(&format!("{table}\n"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::analyze;
    use crate::stats::tests::{local, record};
    use crate::types::ScanSnapshot;

    fn plain(analysis: &Analysis) -> String {
        colored::control::set_override(false);
        render(analysis, &ReportConfig::default())
    }

    #[test]
    fn test_terminal_empty() {
        let analysis = analyze(&ScanSnapshot::default(), &ReportConfig::default(), local(2024, 6, 20));
        let out = plain(&analysis);
        assert!(out.contains("=== Summary ==="));
        assert!(out.contains("No files found."));
        assert!(out.contains("No subfolders found."));
    }

    #[test]
    fn test_terminal_lists_files_without_action_links() {
        let snapshot = ScanSnapshot {
            root: "/dl".to_string(),
            files: vec![record("Docs", "thesis.pdf", 2048, local(2024, 6, 18))],
            subfolders: vec!["Docs".to_string()],
            skipped_entries: 1,
        };
        let config = ReportConfig {
            include_action_links: true,
            ..ReportConfig::default()
        };
        let out = render(&analyze(&snapshot, &config, local(2024, 6, 20)), &config);
        assert!(out.contains("thesis.pdf"));
        assert!(out.contains("Skipped entries"));
        assert!(!out.contains("://"));
    }
}
