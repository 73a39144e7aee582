use crate::config::ReportConfig;
use crate::sections::{self, Markup, Section};
use crate::stats::Analysis;
use comfy_table::Table;

pub const TITLE: &str = "Downloads Weekly Review";

/// Renders the review as a Markdown document with pipe tables.
#[must_use]
pub fn render(analysis: &Analysis, config: &ReportConfig) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {TITLE}\n\n"));
    md.push_str(&format!("**Folder:** `{}`\n\n", analysis.root));

    md.push_str("## Summary\n\n");
    for (label, value) in sections::summary_lines(analysis) {
        md.push_str(&format!("- **{label}:** {value}\n"));
    }
    if analysis.summary.is_empty() {
        md.push_str("\n*No files found*\n");
    }
    md.push('\n');

    for section in sections::build(analysis, config, Markup::Markdown) {
        md.push_str(&render_section(&section));
    }

    md
}

fn render_section(section: &Section) -> String {
    let mut out = format!("## {}\n\n", section.title);

    if section.rows.is_empty() {
        out.push_str(&format!("*{}*\n\n", section.empty_message));
        return out;
    }

    if let Some(note) = &section.note {
        out.push_str(&format!("*{note}*\n\n"));
    }
    out.push_str(&pipe_table(&section.header, &section.rows));
    out.push_str("\n\n");
    out
}

fn pipe_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::ASCII_MARKDOWN);
    table.set_header(header.to_vec());
    for row in rows {
        table.add_row(row.clone());
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::analyze;
    use crate::stats::tests::{local, record};
    use crate::types::{FileRecord, ScanSnapshot};

    fn render_files(files: Vec<FileRecord>, subfolders: &[&str], config: &ReportConfig) -> String {
        let snapshot = ScanSnapshot {
            root: "/dl".to_string(),
            files,
            subfolders: subfolders.iter().map(|s| s.to_string()).collect(),
            skipped_entries: 0,
        };
        render(&analyze(&snapshot, config, local(2024, 6, 20)), config)
    }

    #[test]
    fn test_empty_report() {
        let md = render_files(vec![], &[], &ReportConfig::default());
        assert!(md.starts_with("# Downloads Weekly Review\n"));
        assert!(md.contains("- **Total files:** 0\n"));
        assert!(md.contains("*No files found*"));
        assert!(md.contains("*No recently modified files*"));
        assert!(md.contains("*No subfolders found*"));
        assert!(!md.contains("NaN"));
        assert!(!md.contains("Average file size"));
    }

    #[test]
    fn test_headings_present_in_order() {
        let files = vec![
            record("", "a.txt", 10, local(2024, 6, 19)),
            record("Docs", "b.pdf", 20, local(2021, 1, 1)),
        ];
        let md = render_files(files, &["Docs"], &ReportConfig::default());

        let headings = [
            "## Summary",
            "## Top 15 Largest Files",
            "## Files from Last 7 Days",
            "## 15 Oldest Files",
            "## Subfolder Analysis",
            "## File Type Breakdown",
            "## Files by Year",
        ];
        let positions: Vec<usize> = headings
            .iter()
            .map(|h| md.find(h).unwrap_or_else(|| panic!("missing {h}")))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert!(md.contains("- **Total files:** 2"));
        assert!(md.contains("- **Total size:** 30 B"));
        assert!(md.contains("- **Average file size:** 15 B"));
        assert!(md.contains("*1 files modified in the last 7 days*"));
    }

    #[test]
    fn test_tables_are_pipe_tables() {
        let files = vec![record("", "report.pdf", 1536, local(2024, 6, 1))];
        let md = render_files(files, &[], &ReportConfig::default());

        let table_lines: Vec<&str> = md.lines().filter(|l| l.starts_with('|')).collect();
        assert!(table_lines.iter().any(|l| l.contains("File") && l.contains("Modified")));
        assert!(table_lines.iter().any(|l| l.starts_with("|--")));
        assert!(
            table_lines
                .iter()
                .any(|l| l.contains("report.pdf") && l.contains("1.5 KiB") && l.contains("2024-06-01 12:00"))
        );
    }

    #[test]
    fn test_pipes_in_names_are_escaped() {
        let files = vec![record("", "a|b.txt", 1, local(2024, 6, 1))];
        let md = render_files(files, &[], &ReportConfig::default());
        assert!(md.contains("a\\|b.txt"));
    }

    #[test]
    fn test_action_links_when_enabled() {
        let config = ReportConfig {
            include_action_links: true,
            ..ReportConfig::default()
        };
        let files = vec![record("A", "my file.zip", 1, local(2024, 6, 1))];
        let md = render_files(files, &["A", "B"], &config);
        assert!(md.contains("[🗑️](downloads-review://delete?path=/dl/A/my%20file.zip)"));
        assert!(md.contains("[🗑️](downloads-review://delete?path=/dl/B)"));

        let plain = render_files(vec![record("A", "x.zip", 1, local(2024, 6, 1))], &["A"], &ReportConfig::default());
        assert!(!plain.contains("downloads-review://"));
    }

    #[test]
    fn test_subfolder_rows() {
        let mb = 1024 * 1024;
        let files = vec![
            record("A", "1.bin", 4 * mb, local(2024, 5, 1)),
            record("A", "2.bin", 4 * mb, local(2024, 5, 2)),
            record("A/inner", "3.bin", 2 * mb, local(2024, 5, 3)),
        ];
        let md = render_files(files, &["B", "A"], &ReportConfig::default());

        let a_row = md.lines().find(|l| l.starts_with("| A ")).unwrap();
        assert!(a_row.contains("| 3 "));
        assert!(a_row.contains("10 MiB"));
        assert!(a_row.contains("2024-05-03 12:00"));

        let b_row = md.lines().find(|l| l.starts_with("| B ")).unwrap();
        assert!(b_row.contains("| 0 "));
        assert!(b_row.contains("0 B"));
        assert!(b_row.contains("| - "));
        assert!(md.find("| A ").unwrap() < md.find("| B ").unwrap());
    }

    #[test]
    fn test_custom_window_and_top_n_in_headings() {
        let config = ReportConfig {
            top_n: 5,
            recent_window_days: 30,
            ..ReportConfig::default()
        };
        let md = render_files(vec![], &[], &config);
        assert!(md.contains("## Top 5 Largest Files"));
        assert!(md.contains("## Files from Last 30 Days"));
        assert!(md.contains("## 5 Oldest Files"));
    }
}
