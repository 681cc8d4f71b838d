use std::path::PathBuf;
use std::sync::OnceLock;

static EXE_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Screenshot directory used when none is given on the command line.
pub const DEFAULT_SCREENSHOT_DIR: &str = "tile_coverage_test";

/// Returns the directory containing the executable.
pub fn get_exe_dir() -> &'static PathBuf {
    EXE_DIR.get_or_init(|| {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
    })
}

/// Returns the logs directory: `<exe_dir>/logs/`
pub fn get_logs_dir() -> PathBuf {
    get_exe_dir().join("logs")
}

/// Returns the default log file: `<exe_dir>/logs/tile_coverage_check.log`
pub fn get_log_file() -> PathBuf {
    get_logs_dir().join("tile_coverage_check.log")
}

/// Returns the default config file: `<exe_dir>/coverage_config.json`
pub fn get_config_path() -> PathBuf {
    get_exe_dir().join("coverage_config.json")
}

/// Ensures all output directories exist. Call at startup.
pub fn ensure_directories() -> std::io::Result<()> {
    std::fs::create_dir_all(get_logs_dir())?;
    Ok(())
}
