//! Human-readable progress and summary output for a run.
//!
//! Rendering functions return strings so the layout can be tested; the
//! `print_*` wrappers write them to stdout.

use std::fmt::Write;

use crate::analysis::{FrameVerdict, RunReport, ScreenshotOutcome};

const RULE_WIDTH: usize = 50;

/// Overall result of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn of(report: &RunReport) -> Self {
        if report.passed() {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

/// Line printed before the scan starts.
pub fn render_scan_header(total: usize) -> String {
    format!("Analyzing {} screenshots for tile coverage issues...\n", total)
}

/// Status lines for one screenshot, printed live during the scan.
pub fn render_progress(outcome: &ScreenshotOutcome) -> String {
    let mut out = format!("Analyzing: {}\n", outcome.file());
    match outcome {
        ScreenshotOutcome::Analyzed(analysis) => {
            let black = &analysis.black;
            match (analysis.verdict, black.region) {
                (FrameVerdict::GameIntrusion, Some(region)) => {
                    let _ = writeln!(out, "  [!] Black areas detected: {:.1}% of image", black.percentage);
                    let _ = writeln!(out, "  [X] Black area in game view: {}", region);
                }
                (FrameVerdict::UiOnly, _) => {
                    let _ = writeln!(out, "  [!] Black areas detected: {:.1}% of image", black.percentage);
                    let _ = writeln!(out, "  [ok] Black areas only in UI regions (expected)");
                }
                _ => {
                    let _ = writeln!(out, "  [ok] No significant black areas ({:.2}%)", black.percentage);
                }
            }
        }
        ScreenshotOutcome::Skipped { reason, .. } => {
            let _ = writeln!(out, "  [skip] {}", reason);
        }
    }
    out
}

/// Summary block: issue count, top issues, pattern counts, skipped files.
pub fn render_summary(report: &RunReport, top_n: usize) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "\n{}\nSUMMARY\n{}", rule, rule);
    let _ = writeln!(
        out,
        "Screenshots analyzed: {} of {}",
        report.analyzed_count(),
        report.total_screenshots
    );
    let skipped_count = report.skipped().count();
    if skipped_count > 0 {
        let _ = writeln!(out, "Screenshots skipped: {}", skipped_count);
    }

    if report.passed() {
        let _ = writeln!(out, "\nSUCCESS: No black areas detected in game view!");
        let _ = writeln!(out, "Tile coverage appears to be working correctly.");
    } else {
        let _ = writeln!(
            out,
            "\nISSUES FOUND: {} screenshots have black areas in game view\n",
            report.issues.len()
        );
        let _ = writeln!(out, "Most problematic screenshots:");
        for (i, issue) in report.issues.iter().take(top_n).enumerate() {
            let _ = writeln!(
                out,
                "{}. {} - {:.1}% black [{}]",
                i + 1,
                issue.file,
                issue.black_percentage,
                issue.severity
            );
            let _ = writeln!(out, "   Region: {}", issue.region);
        }

        let _ = writeln!(out, "\nThese screenshots show missing tile coverage!");
        let _ = writeln!(out, "Tiles must always extend beyond the visible viewport.");

        if !report.pattern_counts.is_empty() {
            let _ = writeln!(out);
            for pattern in &report.pattern_counts {
                let _ = writeln!(out, "[!] {} {}", pattern.count, pattern.label);
            }
        }
    }

    let skipped: Vec<_> = report.skipped().collect();
    if !skipped.is_empty() {
        let _ = writeln!(out, "\nSkipped {} unreadable screenshots:", skipped.len());
        for (file, _) in skipped {
            let _ = writeln!(out, "  - {}", file);
        }
    }

    out
}

/// Returns the verdict together with the rendered summary.
pub fn summarize(report: &RunReport, top_n: usize) -> (Verdict, String) {
    (Verdict::of(report), render_summary(report, top_n))
}

pub fn print_scan_header(total: usize) {
    println!("{}", render_scan_header(total));
}

pub fn print_progress(outcome: &ScreenshotOutcome) {
    print!("{}", render_progress(outcome));
}

/// Prints the summary block and returns the verdict.
pub fn print_summary(report: &RunReport, top_n: usize) -> Verdict {
    let (verdict, text) = summarize(report, top_n);
    print!("{}", text);
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{Issue, PatternCount, ScreenshotAnalysis, Severity};
    use crate::detection::{BlackAreaResult, Region};
    use std::collections::BTreeSet;

    fn issue(file: &str, pct: f64, tags: &[&str]) -> Issue {
        Issue {
            file: file.to_string(),
            black_percentage: pct,
            region: Region::new(0, 0, 599, 799),
            severity: Severity::High,
            tags: tags.iter().map(|t| t.to_string()).collect::<BTreeSet<_>>(),
        }
    }

    fn report_with(issues: Vec<Issue>, pattern_counts: Vec<PatternCount>) -> RunReport {
        RunReport {
            total_screenshots: 10,
            screenshots: (0..10)
                .map(|_| analyzed(FrameVerdict::Clean, 0.0, None))
                .collect(),
            issues,
            pattern_counts,
        }
    }

    fn analyzed(verdict: FrameVerdict, pct: f64, region: Option<Region>) -> ScreenshotOutcome {
        ScreenshotOutcome::Analyzed(ScreenshotAnalysis {
            file: "05_pan.png".to_string(),
            width: 800,
            height: 600,
            black: BlackAreaResult {
                has_black: region.is_some(),
                percentage: pct,
                black_pixels: 0,
                total_pixels: 480_000,
                region,
            },
            verdict,
        })
    }

    #[test]
    fn test_pass_summary() {
        let report = report_with(vec![], vec![]);
        let (verdict, text) = summarize(&report, 5);

        assert_eq!(verdict, Verdict::Pass);
        assert!(text.contains("Screenshots analyzed: 10 of 10"));
        assert!(!text.contains("Screenshots skipped"));
        assert!(text.contains("SUCCESS"));
        assert!(!text.contains("ISSUES FOUND"));
    }

    #[test]
    fn test_fail_summary_lists_top_issues() {
        let issues = (0..7)
            .map(|i| issue(&format!("{:02}_shot.png", i), 70.0 - i as f64 * 10.0, &[]))
            .collect();
        let report = report_with(issues, vec![]);
        let (verdict, text) = summarize(&report, 5);

        assert_eq!(verdict, Verdict::Fail);
        assert!(text.contains("ISSUES FOUND: 7 screenshots"));
        assert!(text.contains("1. 00_shot.png - 70.0% black [HIGH]"));
        assert!(text.contains("5. 04_shot.png - 30.0% black"));
        assert!(!text.contains("05_shot.png"));
        assert!(text.contains("Region: top=0, left=0, bottom=599, right=799"));
    }

    #[test]
    fn test_pattern_counts_listed() {
        let report = report_with(
            vec![issue("a_edge_zoom.png", 12.0, &["edge", "zoom"])],
            vec![
                PatternCount { tag: "edge".into(), label: "issues at map edges".into(), count: 1 },
                PatternCount { tag: "zoom".into(), label: "issues when zoomed out".into(), count: 1 },
            ],
        );
        let text = render_summary(&report, 5);

        assert!(text.contains("[!] 1 issues at map edges"));
        assert!(text.contains("[!] 1 issues when zoomed out"));
    }

    #[test]
    fn test_skipped_files_listed() {
        let mut report = report_with(vec![], vec![]);
        report.screenshots[7] = ScreenshotOutcome::Skipped {
            file: "07_corrupt.png".to_string(),
            reason: "bad header".to_string(),
        };
        let text = render_summary(&report, 5);

        assert!(text.contains("Screenshots analyzed: 9 of 10"));
        assert!(text.contains("Screenshots skipped: 1"));
        assert!(text.contains("Skipped 1 unreadable screenshots"));
        assert!(text.contains("  - 07_corrupt.png"));
    }

    #[test]
    fn test_progress_lines() {
        let intrusion = render_progress(&analyzed(
            FrameVerdict::GameIntrusion,
            42.25,
            Some(Region::new(300, 0, 599, 799)),
        ));
        assert!(intrusion.starts_with("Analyzing: 05_pan.png\n"));
        assert!(intrusion.contains("42.2% of image") || intrusion.contains("42.3% of image"));
        assert!(intrusion.contains("game view: top=300, left=0, bottom=599, right=799"));

        let ui = render_progress(&analyzed(FrameVerdict::UiOnly, 3.0, Some(Region::new(0, 0, 50, 799))));
        assert!(ui.contains("only in UI regions"));

        let clean = render_progress(&analyzed(FrameVerdict::Clean, 0.0, None));
        assert!(clean.contains("No significant black areas (0.00%)"));
    }
}
