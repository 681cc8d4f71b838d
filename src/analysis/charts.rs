//! Coverage chart using plotters.
//!
//! One bar per analyzed screenshot in scan order, height proportional to the
//! black percentage. Game-view intrusions are drawn in red, UI-only frames in
//! grey. Only shapes are drawn, so no font backend is needed.

use super::{FrameVerdict, RunReport, ScreenshotOutcome};
use anyhow::{anyhow, Context, Result};
use plotters::prelude::*;
use std::path::Path;

const BAR_WIDTH: u32 = 24;
const BAR_GAP: u32 = 6;
const MARGIN: u32 = 20;
const CHART_HEIGHT: u32 = 360;
const MIN_CHART_WIDTH: u32 = 320;
/// Long runs squeeze their bars into this width instead of growing the bitmap.
const MAX_CHART_WIDTH: u32 = 4096;
/// Non-zero bars never shrink below this, so tiny gaps stay visible.
const MIN_BAR_HEIGHT: u32 = 2;

const INTRUSION_COLOR: RGBColor = RGBColor(214, 48, 49);
const UI_ONLY_COLOR: RGBColor = RGBColor(160, 160, 160);
const GUIDE_COLOR: RGBColor = RGBColor(220, 220, 220);

/// Data for one bar of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageBar {
    pub file: String,
    pub percentage: f64,
    pub verdict: FrameVerdict,
}

/// Collects one bar per analyzed screenshot; skipped screenshots have no bar.
pub fn coverage_bars(report: &RunReport) -> Vec<CoverageBar> {
    report
        .screenshots
        .iter()
        .filter_map(|outcome| match outcome {
            ScreenshotOutcome::Analyzed(a) => Some(CoverageBar {
                file: a.file.clone(),
                percentage: a.black.percentage,
                verdict: a.verdict,
            }),
            ScreenshotOutcome::Skipped { .. } => None,
        })
        .collect()
}

/// Pixel height of a bar inside a plot area of `plot_height` pixels.
fn bar_height(percentage: f64, plot_height: u32) -> u32 {
    if percentage <= 0.0 {
        return 0;
    }
    let height = (percentage.min(100.0) / 100.0 * plot_height as f64).round() as u32;
    height.max(MIN_BAR_HEIGHT)
}

fn chart_width(bar_count: usize) -> u32 {
    let slot = (BAR_WIDTH + BAR_GAP) as usize;
    let bars = bar_count.saturating_mul(slot).saturating_add(2 * MARGIN as usize);
    bars.clamp(MIN_CHART_WIDTH as usize, MAX_CHART_WIDTH as usize) as u32
}

/// Horizontal pixel span `[x0, x1]` of bar `index`, relative to the left margin.
///
/// Bars keep their full width while they fit; past that every bar gets an
/// equal share of the plot width, at least one pixel wide.
fn bar_span(index: usize, bar_count: usize, plot_width: u32) -> (i32, i32) {
    let full_slot = (BAR_WIDTH + BAR_GAP) as f64;
    let slot = full_slot.min(plot_width as f64 / bar_count.max(1) as f64);
    let bar = (slot * BAR_WIDTH as f64 / full_slot).max(1.0);
    let x0 = (index as f64 * slot).floor();
    (x0 as i32, (x0 + bar).round() as i32)
}

fn bar_color(verdict: FrameVerdict) -> RGBColor {
    match verdict {
        FrameVerdict::GameIntrusion => INTRUSION_COLOR,
        _ => UI_ONLY_COLOR,
    }
}

/// Render the coverage chart of a run to a PNG file.
pub fn generate_coverage_chart(report: &RunReport, output_path: &Path) -> Result<()> {
    let bars = coverage_bars(report);
    if bars.is_empty() {
        return Err(anyhow!("No analyzed screenshots to chart"));
    }

    let width = chart_width(bars.len());
    let root = BitMapBackend::new(output_path, (width, CHART_HEIGHT)).into_drawing_area();
    root.fill(&WHITE)
        .context("Failed to fill chart background")?;

    let plot_height = CHART_HEIGHT - 2 * MARGIN;
    let top = MARGIN as i32;
    let baseline = (CHART_HEIGHT - MARGIN) as i32;
    let left = MARGIN as i32;
    let right = (width - MARGIN) as i32;

    // 100% and 50% guides
    for y in [top, top + plot_height as i32 / 2] {
        root.draw(&PathElement::new(vec![(left, y), (right, y)], GUIDE_COLOR))?;
    }

    let plot_width = width - 2 * MARGIN;
    for (i, bar) in bars.iter().enumerate() {
        let height = bar_height(bar.percentage, plot_height) as i32;
        if height == 0 {
            continue;
        }
        let (x0, x1) = bar_span(i, bars.len(), plot_width);
        root.draw(&Rectangle::new(
            [(left + x0, baseline - height), (left + x1, baseline)],
            bar_color(bar.verdict).filled(),
        ))?;
    }

    root.draw(&PathElement::new(vec![(left, baseline), (right, baseline)], BLACK))?;

    root.present().context("Failed to save chart")?;
    Ok(())
}
