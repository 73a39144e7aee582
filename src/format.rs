use chrono::{DateTime, Local};

pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const MAX_NAME_LEN: usize = 40;
pub const EMPTY_MARKER: &str = "-";

#[must_use]
pub fn format_size(bytes: u64) -> String {
    human_bytes::human_bytes(bytes as f64)
}

#[must_use]
pub fn format_date(date: &DateTime<Local>) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[must_use]
pub fn format_optional_date(date: Option<&DateTime<Local>>) -> String {
    date.map_or_else(|| EMPTY_MARKER.to_string(), format_date)
}

/// Groups digits in threes with `,` regardless of locale.
#[must_use]
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[must_use]
pub fn format_percent(part: usize, whole: usize) -> String {
    if whole == 0 {
        return EMPTY_MARKER.to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / whole as f64)
}

/// Shortens long file names to `max_len` characters, keeping the extension
/// visible when there is room for it.
#[must_use]
pub fn truncate_filename(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }

    if let Some((stem, ext)) = name.rsplit_once('.') {
        let ext_len = ext.chars().count();
        if ext_len + 4 < max_len {
            let available = max_len - ext_len - 4;
            let head: String = stem.chars().take(available).collect();
            return format!("{head}...{ext}");
        }
    }

    let head: String = name.chars().take(max_len.saturating_sub(3)).collect();
    format!("{head}...")
}

/// Makes text safe for a single pipe-table cell.
#[must_use]
pub fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_size_scales_units() {
        assert_eq!(format_size(0), "0 B");
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.5 KiB");
        assert!(format_size(3 * 1024 * 1024 * 1024 + 512 * 1024 * 1024).ends_with("GiB"));
    }

    #[test]
    fn test_format_date_is_fixed() {
        let date = Local.with_ymd_and_hms(2024, 6, 1, 9, 5, 0).single().unwrap();
        assert_eq!(format_date(&date), "2024-06-01 09:05");
        assert_eq!(format_optional_date(None), "-");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(1, 4), "25.0%");
        assert_eq!(format_percent(1, 0), "-");
    }

    #[test]
    fn test_truncate_short_name_untouched() {
        assert_eq!(truncate_filename("report.pdf", 40), "report.pdf");
    }

    #[test]
    fn test_truncate_keeps_extension() {
        let name = format!("{}.pdf", "a".repeat(60));
        let short = truncate_filename(&name, 40);
        assert_eq!(short, format!("{}...pdf", "a".repeat(33)));
        assert!(short.chars().count() <= 40);
    }

    #[test]
    fn test_truncate_without_extension() {
        let name = "b".repeat(50);
        assert_eq!(truncate_filename(&name, 40), format!("{}...", "b".repeat(37)));
    }

    #[test]
    fn test_truncate_multibyte() {
        let name = format!("{}.txt", "é".repeat(50));
        let short = truncate_filename(&name, 40);
        assert!(short.ends_with("...txt"));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        assert_eq!(escape_cell("line\nbreak"), "line break");
    }
}
