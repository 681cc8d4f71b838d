//! Run-level screenshot analysis.
//!
//! This module provides:
//! - Screenshot discovery in a directory
//! - Per-screenshot black-area analysis and frame verdicts
//! - Issue aggregation, ranking and pattern counts
//! - JSON export and coverage chart of a finished run

pub mod charts;
pub mod config;
pub mod export;
pub mod issues;
pub mod patterns;

pub use config::{AnalyzerConfig, LoadFailurePolicy};
pub use issues::{Issue, Severity};
pub use patterns::{PatternCount, PatternTagger, RegexTagger};

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::detection::{
    detect_black_areas, expected_ui_regions, is_game_area_intrusion, load_screenshot,
    BlackAreaResult,
};
use crate::error::{AnalyzerError, Result};

/// Where the black pixels of a frame ended up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameVerdict {
    /// No black pixels at all
    Clean,
    /// Black pixels confined to the header or sidebar
    UiOnly,
    /// Black bounding box reaches into the game view
    GameIntrusion,
}

/// Analysis result for one decoded screenshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScreenshotAnalysis {
    pub file: String,
    pub width: u32,
    pub height: u32,
    pub black: BlackAreaResult,
    pub verdict: FrameVerdict,
}

/// Per-screenshot outcome of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ScreenshotOutcome {
    Analyzed(ScreenshotAnalysis),
    Skipped { file: String, reason: String },
}

impl ScreenshotOutcome {
    pub fn file(&self) -> &str {
        match self {
            ScreenshotOutcome::Analyzed(analysis) => &analysis.file,
            ScreenshotOutcome::Skipped { file, .. } => file,
        }
    }
}

/// Everything learned from one pass over a screenshot directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// Number of screenshots discovered
    pub total_screenshots: usize,
    /// Outcomes in scan order
    pub screenshots: Vec<ScreenshotOutcome>,
    /// Issues ordered by descending black percentage
    pub issues: Vec<Issue>,
    /// Issue counts per pattern tag
    pub pattern_counts: Vec<PatternCount>,
}

impl RunReport {
    /// The run passes iff no screenshot has a game-view intrusion.
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of screenshots that were decoded and checked.
    pub fn analyzed_count(&self) -> usize {
        self.screenshots
            .iter()
            .filter(|s| matches!(s, ScreenshotOutcome::Analyzed(_)))
            .count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = (&str, &str)> {
        self.screenshots.iter().filter_map(|s| match s {
            ScreenshotOutcome::Skipped { file, reason } => Some((file.as_str(), reason.as_str())),
            ScreenshotOutcome::Analyzed(_) => None,
        })
    }
}

/// Returns the file name component as a string, falling back to the full path.
fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Lists screenshots in `dir`, sorted by file name.
///
/// Fails with `NoScreenshotsFound` if the directory is missing, unreadable,
/// or contains no file with a configured extension.
pub fn find_screenshots(dir: &Path, config: &AnalyzerConfig) -> Result<Vec<PathBuf>> {
    let not_found = || AnalyzerError::NoScreenshotsFound {
        dir: dir.to_path_buf(),
    };

    let entries = fs::read_dir(dir).map_err(|_| not_found())?;
    let mut screenshots: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && config.is_screenshot(path))
        .collect();

    if screenshots.is_empty() {
        return Err(not_found());
    }

    screenshots.sort_by_key(|path| file_name_of(path));
    Ok(screenshots)
}

/// Loads one screenshot and classifies its black area.
pub fn analyze_screenshot(path: &Path, black_threshold: u8) -> Result<ScreenshotAnalysis> {
    let img = load_screenshot(path)?;
    let (width, height) = img.dimensions();
    let black = detect_black_areas(&img, black_threshold)?;

    let verdict = match &black.region {
        None => FrameVerdict::Clean,
        Some(region) => {
            let ui = expected_ui_regions(width, height);
            if is_game_area_intrusion(region, &ui) {
                FrameVerdict::GameIntrusion
            } else {
                FrameVerdict::UiOnly
            }
        }
    };

    Ok(ScreenshotAnalysis {
        file: file_name_of(path),
        width,
        height,
        black,
        verdict,
    })
}

/// Analyzes the screenshots one at a time in file-name order.
///
/// `on_progress` is called after each screenshot with its outcome. Under
/// `LoadFailurePolicy::Abort` the first unreadable screenshot ends the run
/// with its error; under `Skip` it is recorded and the run continues. A run
/// in which every screenshot was skipped fails with `NoReadableScreenshots`.
pub fn analyze_run<F>(
    paths: &[PathBuf],
    config: &AnalyzerConfig,
    tagger: &dyn PatternTagger,
    mut on_progress: F,
) -> Result<RunReport>
where
    F: FnMut(&ScreenshotOutcome),
{
    let mut ordered: Vec<&PathBuf> = paths.iter().collect();
    ordered.sort_by_key(|path| file_name_of(path));

    let mut screenshots = Vec::with_capacity(ordered.len());
    let mut issues = Vec::new();

    for path in ordered {
        let outcome = match analyze_screenshot(path, config.black_threshold) {
            Ok(analysis) => {
                if analysis.verdict == FrameVerdict::GameIntrusion {
                    if let Some(region) = analysis.black.region {
                        issues.push(Issue {
                            file: analysis.file.clone(),
                            black_percentage: analysis.black.percentage,
                            region,
                            severity: Severity::High,
                            tags: tagger.tags(&analysis.file),
                        });
                    }
                }
                ScreenshotOutcome::Analyzed(analysis)
            }
            Err(e) => match config.on_load_failure {
                LoadFailurePolicy::Abort => return Err(e),
                LoadFailurePolicy::Skip => {
                    crate::log(&format!("Warning: Skipping screenshot: {}", e));
                    ScreenshotOutcome::Skipped {
                        file: file_name_of(path),
                        reason: e.to_string(),
                    }
                }
            },
        };

        on_progress(&outcome);
        screenshots.push(outcome);
    }

    if !screenshots.is_empty()
        && screenshots
            .iter()
            .all(|s| matches!(s, ScreenshotOutcome::Skipped { .. }))
    {
        return Err(AnalyzerError::NoReadableScreenshots {
            skipped: screenshots.len(),
        });
    }

    issues::rank_issues(&mut issues);
    let pattern_counts = patterns::count_patterns(&issues, &config.patterns);

    Ok(RunReport {
        total_screenshots: paths.len(),
        screenshots,
        issues,
        pattern_counts,
    })
}
