mod config;
mod csv_report;
mod error;
mod format;
mod markdown;
mod scanner;
mod sections;
mod stats;
mod terminal;
mod types;

use chrono::Local;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use config::{ActionTemplate, DEFAULT_RECENT_WINDOW_DAYS, DEFAULT_TOP_N, ReportConfig};
use error::{AuditError, Result};
use log::info;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Markdown review with pipe tables
    Markdown,
    /// One CSV row per file
    Csv,
    /// Coloured console preview
    Terminal,
}

#[derive(Parser, Debug)]
#[command(version, about = "Review the contents of a Downloads folder", long_about = None)]
struct Args {
    /// Folder to scan (default: the user's Downloads folder)
    #[arg(long, short = 'f')]
    folder: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,

    /// Write the report to this file instead of stdout
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,

    /// Summarise a census CSV from an earlier run instead of scanning
    #[arg(long, value_name = "FILE", conflicts_with = "folder")]
    from_csv: Option<PathBuf>,

    /// Number of entries in the largest and oldest lists
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top_n: usize,

    /// Files modified within this many days count as recent
    #[arg(
        long,
        default_value_t = DEFAULT_RECENT_WINDOW_DAYS,
        value_parser = clap::value_parser!(i64).range(0..)
    )]
    recent_days: i64,

    /// Add a delete link to every file and folder row (Markdown only)
    #[arg(long)]
    action_links: bool,

    /// URI scheme of the action links
    #[arg(long, default_value = "downloads-review")]
    action_scheme: String,

    /// Action identifier placed after the scheme
    #[arg(long, default_value = "delete")]
    action_id: String,

    /// Fixed KEY=VALUE query pair placed before the path (repeatable)
    #[arg(long, value_name = "KEY=VALUE", value_parser = config::parse_query_pair)]
    action_extra: Vec<(String, String)>,

    /// Query parameter carrying the encoded path
    #[arg(long, default_value = "path")]
    action_param: String,

    /// Only log errors
    #[arg(long, short = 'q', conflicts_with = "verbose")]
    quiet: bool,

    /// Log per-entry progress
    #[arg(long, short = 'v')]
    verbose: bool,
}

impl Args {
    fn report_config(&self) -> ReportConfig {
        ReportConfig {
            top_n: self.top_n,
            recent_window_days: self.recent_days,
            include_action_links: self.action_links,
            action: ActionTemplate {
                scheme: self.action_scheme.clone(),
                action_id: self.action_id.clone(),
                extra: self.action_extra.clone(),
                param: self.action_param.clone(),
            },
        }
    }
}

fn main() {
    let args = Args::parse();

    let level = if args.quiet {
        "error"
    } else if args.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(&args) {
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let config = args.report_config();
    let now = Local::now();

    let snapshot = if let Some(census) = &args.from_csv {
        csv_report::load_census(census)?
    } else {
        let folder = match &args.folder {
            Some(folder) => folder.clone(),
            None => default_downloads_folder().ok_or(AuditError::NoDefaultFolder)?,
        };
        scanner::scan_directory(&folder)?
    };

    // Colour codes only belong on a terminal.
    if args.output.is_some() && args.format == OutputFormat::Terminal {
        colored::control::set_override(false);
    }

    // The whole document is rendered before anything is written.
    let document = match args.format {
        OutputFormat::Csv => csv_report::render(&snapshot.files)?,
        OutputFormat::Markdown => markdown::render(&stats::analyze(&snapshot, &config, now), &config),
        OutputFormat::Terminal => terminal::render(&stats::analyze(&snapshot, &config, now), &config),
    };

    write_document(&document, args.output.as_deref())
}

fn default_downloads_folder() -> Option<PathBuf> {
    let dirs = directories::UserDirs::new()?;
    Some(
        dirs.download_dir()
            .map_or_else(|| dirs.home_dir().join("Downloads"), Path::to_path_buf),
    )
}

fn write_document(document: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, document).map_err(|source| AuditError::Output {
                path: path.to_path_buf(),
                source,
            })?;
            info!("Report written to: {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(document.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|source| AuditError::Output {
                    path: PathBuf::from("<stdout>"),
                    source,
                })?;
        }
    }
    Ok(())
}
