//! Tile Coverage Check
//!
//! Scans the screenshots taken during automated camera runs over the tile map
//! and flags frames where missing tiles leave the black background visible in
//! the game view.

mod analysis;
mod detection;
mod error;
mod paths;
mod report;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use analysis::{AnalyzerConfig, LoadFailurePolicy, RegexTagger};
use report::Verdict;

/// Log file that `log` appends to, if any.
static LOG_FILE: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Exit code when at least one screenshot has a game-view intrusion.
const EXIT_ISSUES_FOUND: u8 = 1;

/// Exit code when the run could not complete.
const EXIT_RUN_FAILED: u8 = 2;

/// Logs a message to stderr and the log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    eprint!("{}", line);

    let log_path = LOG_FILE.lock().ok().and_then(|p| p.clone());
    if let Some(log_path) = log_path {
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
        {
            let _ = file.write_all(line.as_bytes());
        }
    }
}

/// Switches the log file (None disables file logging).
pub fn set_log_file(path: Option<PathBuf>) {
    if let Ok(mut p) = LOG_FILE.lock() {
        *p = path;
    }
}

#[derive(Parser)]
#[command(name = "tile_coverage_check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Flags screenshots where missing tiles expose the black background",
    long_about = None
)]
struct Cli {
    /// Directory containing the screenshots
    #[arg(default_value = paths::DEFAULT_SCREENSHOT_DIR)]
    dir: PathBuf,

    /// Config file (default: coverage_config.json next to the executable)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Channel value below which a pixel counts as black
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Number of issues listed in the summary
    #[arg(long)]
    top: Option<usize>,

    /// Skip screenshots that fail to decode instead of aborting the run
    #[arg(long)]
    skip_unreadable: bool,

    /// Write the run report as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Write a PNG bar chart of black percentage per screenshot
    #[arg(long, value_name = "PATH")]
    chart: Option<PathBuf>,

    /// Log file (default: logs/tile_coverage_check.log next to the executable)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Write the default config to PATH and exit
    #[arg(long, value_name = "PATH")]
    write_default_config: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file and applies command-line overrides.
    ///
    /// The default exe-relative file is optional; a `--config` path must exist.
    fn load_config(&self) -> Result<AnalyzerConfig> {
        let mut config = match &self.config {
            Some(path) => AnalyzerConfig::load_explicit(path)?,
            None => AnalyzerConfig::load(&paths::get_config_path()),
        };

        if let Some(threshold) = self.threshold {
            config.black_threshold = threshold;
        }
        if let Some(top) = self.top {
            config.top_issues = top;
        }
        if self.skip_unreadable {
            config.on_load_failure = LoadFailurePolicy::Skip;
        }
        Ok(config)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.log_file.is_none() {
        if let Err(e) = paths::ensure_directories() {
            eprintln!("Warning: Failed to create logs directory: {}", e);
        }
    }
    set_log_file(Some(cli.log_file.clone().unwrap_or_else(paths::get_log_file)));

    match run(&cli) {
        Ok(Verdict::Pass) => ExitCode::SUCCESS,
        Ok(Verdict::Fail) => ExitCode::from(EXIT_ISSUES_FOUND),
        Err(e) => {
            log(&format!("Error: {:#}", e));
            ExitCode::from(EXIT_RUN_FAILED)
        }
    }
}

/// Runs one analysis pass and writes the requested outputs.
fn run(cli: &Cli) -> Result<Verdict> {
    if let Some(path) = &cli.write_default_config {
        AnalyzerConfig::save_default(path)?;
        log(&format!("Default config written to {}", path.display()));
        return Ok(Verdict::Pass);
    }

    let config = cli.load_config()?;
    let tagger = RegexTagger::from_rules(&config.patterns)?;

    let screenshots = analysis::find_screenshots(&cli.dir, &config)?;
    log(&format!(
        "Found {} screenshots in {} (black threshold {})",
        screenshots.len(),
        cli.dir.display(),
        config.black_threshold
    ));

    report::print_scan_header(screenshots.len());
    let run = analysis::analyze_run(&screenshots, &config, &tagger, report::print_progress)?;
    let verdict = report::print_summary(&run, config.top_issues);

    if let Some(path) = &cli.json {
        analysis::export::export_to_json(&run, path)?;
        log(&format!("Report JSON saved: {}", path.display()));
    }
    if let Some(path) = &cli.chart {
        analysis::charts::generate_coverage_chart(&run, path)?;
        log(&format!("Coverage chart saved: {}", path.display()));
    }

    Ok(verdict)
}
