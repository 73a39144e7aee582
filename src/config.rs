pub const DEFAULT_TOP_N: usize = 15;
pub const DEFAULT_RECENT_WINDOW_DAYS: i64 = 7;

/// Settings shared by the aggregator and the renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    /// Length of the "largest" and "oldest" lists.
    pub top_n: usize,
    /// Trailing window used to select recent files.
    pub recent_window_days: i64,
    /// Append an action link to every file and subfolder row.
    pub include_action_links: bool,
    pub action: ActionTemplate,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            top_n: DEFAULT_TOP_N,
            recent_window_days: DEFAULT_RECENT_WINDOW_DAYS,
            include_action_links: false,
            action: ActionTemplate::default(),
        }
    }
}

/// Builds `<scheme>://<action_id>?[<key>=<value>&...]<param>=<encoded path>`
/// links that an external command runner can act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionTemplate {
    pub scheme: String,
    pub action_id: String,
    /// Fixed query pairs placed before the path parameter.
    pub extra: Vec<(String, String)>,
    pub param: String,
}

impl Default for ActionTemplate {
    fn default() -> Self {
        ActionTemplate {
            scheme: "downloads-review".to_string(),
            action_id: "delete".to_string(),
            extra: Vec::new(),
            param: "path".to_string(),
        }
    }
}

impl ActionTemplate {
    #[must_use]
    pub fn uri_for(&self, path: &str) -> String {
        let mut query: Vec<String> = self
            .extra
            .iter()
            .map(|(key, value)| format!("{key}={}", encode_path(value)))
            .collect();
        query.push(format!("{}={}", self.param, encode_path(path)));
        format!("{}://{}?{}", self.scheme, self.action_id, query.join("&"))
    }
}

/// Parses a `KEY=VALUE` command-line argument into a fixed query pair.
pub fn parse_query_pair(arg: &str) -> std::result::Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{arg}'")),
    }
}

/// Percent-encodes a filesystem path for use as a query value.
///
/// Backslashes are normalised to `/` first. Unreserved characters, `/` and
/// `:` are kept as-is; every other byte of the UTF-8 encoding becomes `%XX`.
#[must_use]
pub fn encode_path(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let mut out = String::with_capacity(normalized.len());
    for byte in normalized.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' | b':' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
