//! Black pixel classification.
//!
//! Uncovered background in the game renders as (near) pure black, so a frame
//! with missing tiles shows up as a cluster of pixels whose channels are all
//! close to zero.

use image::{Rgb, RgbImage};
use serde::Serialize;
use std::path::Path;

use super::regions::Region;
use crate::error::{AnalyzerError, Result};

/// Default channel threshold: pixels with R, G and B all below this are black.
pub const DEFAULT_BLACK_THRESHOLD: u8 = 10;

/// Aggregate black-pixel statistics for one image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlackAreaResult {
    /// True when at least one black pixel was found
    pub has_black: bool,
    /// Share of black pixels, 0.0 to 100.0
    pub percentage: f64,
    /// Number of black pixels
    pub black_pixels: u64,
    /// width * height
    pub total_pixels: u64,
    /// Minimal box containing every black pixel (inclusive)
    pub region: Option<Region>,
}

/// Returns true if all three channels are strictly below the threshold.
pub fn is_black(pixel: &Rgb<u8>, threshold: u8) -> bool {
    pixel[0] < threshold && pixel[1] < threshold && pixel[2] < threshold
}

/// Scans the image for black pixels and computes their count, share and bounding box.
///
/// Rows map to `top`/`bottom`, columns to `left`/`right`.
pub fn detect_black_areas(img: &RgbImage, black_threshold: u8) -> Result<BlackAreaResult> {
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(AnalyzerError::InvalidImage {
            file: "<image buffer>".to_string(),
            width,
            height,
        });
    }

    let total_pixels = width as u64 * height as u64;
    let mut black_pixels: u64 = 0;
    let mut bounds: Option<Region> = None;

    for (x, y, pixel) in img.enumerate_pixels() {
        if !is_black(pixel, black_threshold) {
            continue;
        }
        black_pixels += 1;
        bounds = Some(match bounds {
            None => Region::new(y, x, y, x),
            Some(r) => Region::new(r.top.min(y), r.left.min(x), r.bottom.max(y), r.right.max(x)),
        });
    }

    let percentage = black_pixels as f64 / total_pixels as f64 * 100.0;

    Ok(BlackAreaResult {
        has_black: black_pixels > 0,
        percentage,
        black_pixels,
        total_pixels,
        region: bounds,
    })
}

/// Opens a screenshot and converts it to RGB8, dropping alpha and extra channels.
pub fn load_screenshot(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| AnalyzerError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    if width == 0 || height == 0 {
        return Err(AnalyzerError::InvalidImage {
            file: path.display().to_string(),
            width,
            height,
        });
    }

    Ok(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma, Rgba};
    use tempfile::tempdir;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    #[test]
    fn test_threshold_is_strict() {
        assert!(is_black(&Rgb([9, 9, 9]), 10));
        assert!(!is_black(&Rgb([10, 0, 0]), 10));
        assert!(!is_black(&Rgb([0, 0, 10]), 10));
        assert!(!is_black(&Rgb([0, 0, 0]), 0));
    }

    #[test]
    fn test_bright_image_has_no_black() {
        let img = RgbImage::from_fn(40, 30, |x, y| Rgb([10 + (x % 200) as u8, 10, 10 + y as u8]));
        let result = detect_black_areas(&img, DEFAULT_BLACK_THRESHOLD).unwrap();

        assert!(!result.has_black);
        assert_eq!(result.black_pixels, 0);
        assert_eq!(result.percentage, 0.0);
        assert!(result.region.is_none());
        assert_eq!(result.total_pixels, 1200);
    }

    #[test]
    fn test_all_black_800x600() {
        let img = RgbImage::from_pixel(800, 600, BLACK);
        let result = detect_black_areas(&img, DEFAULT_BLACK_THRESHOLD).unwrap();

        assert!(result.has_black);
        assert!((result.percentage - 100.0).abs() < 1e-9);
        assert_eq!(result.region, Some(Region::new(0, 0, 599, 799)));
    }

    #[test]
    fn test_header_band_region() {
        let img = RgbImage::from_fn(800, 600, |_, y| if y <= 50 { BLACK } else { WHITE });
        let result = detect_black_areas(&img, DEFAULT_BLACK_THRESHOLD).unwrap();

        assert_eq!(result.region, Some(Region::new(0, 0, 50, 799)));
        assert_eq!(result.black_pixels, 51 * 800);
    }

    #[test]
    fn test_sidebar_band_region() {
        let img = RgbImage::from_fn(800, 600, |x, _| if x <= 150 { BLACK } else { WHITE });
        let result = detect_black_areas(&img, DEFAULT_BLACK_THRESHOLD).unwrap();

        assert_eq!(result.region, Some(Region::new(0, 0, 599, 150)));
    }

    #[test]
    fn test_bounding_box_is_minimal() {
        let points = [(12u32, 7u32), (30, 22), (5, 15), (18, 3)];
        let img = RgbImage::from_fn(40, 30, |x, y| {
            if points.contains(&(x, y)) { BLACK } else { WHITE }
        });
        let result = detect_black_areas(&img, DEFAULT_BLACK_THRESHOLD).unwrap();
        let region = result.region.unwrap();

        assert_eq!(region, Region::new(3, 5, 22, 30));
        for &(x, y) in &points {
            assert!(x >= region.left && x <= region.right);
            assert!(y >= region.top && y <= region.bottom);
        }
        assert!(points.iter().any(|&(_, y)| y == region.top));
        assert!(points.iter().any(|&(_, y)| y == region.bottom));
        assert!(points.iter().any(|&(x, _)| x == region.left));
        assert!(points.iter().any(|&(x, _)| x == region.right));
        assert_eq!(result.black_pixels, 4);
    }

    #[test]
    fn test_percentage_bounds() {
        let img = RgbImage::from_fn(10, 10, |x, y| if (x + y) % 3 == 0 { BLACK } else { WHITE });
        let result = detect_black_areas(&img, DEFAULT_BLACK_THRESHOLD).unwrap();

        assert!(result.percentage > 0.0 && result.percentage <= 100.0);
        let expected = result.black_pixels as f64 / 100.0 * 100.0;
        assert!((result.percentage - expected).abs() < 1e-9);
    }

    #[test]
    fn test_custom_threshold() {
        let img = RgbImage::from_pixel(4, 4, Rgb([30, 30, 30]));
        assert!(!detect_black_areas(&img, 10).unwrap().has_black);
        assert!(detect_black_areas(&img, 31).unwrap().has_black);
    }

    #[test]
    fn test_zero_sized_image_is_invalid() {
        let img = RgbImage::new(0, 5);
        let err = detect_black_areas(&img, DEFAULT_BLACK_THRESHOLD).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidImage { width: 0, height: 5, .. }));
    }

    #[test]
    fn test_load_drops_alpha() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("alpha.png");
        // Transparent black is still black once alpha is dropped
        let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
            ImageBuffer::from_fn(8, 8, |x, _| if x < 4 { Rgba([0, 0, 0, 0]) } else { Rgba([200, 200, 200, 255]) });
        img.save(&path).unwrap();

        let rgb = load_screenshot(&path).unwrap();
        let result = detect_black_areas(&rgb, DEFAULT_BLACK_THRESHOLD).unwrap();
        assert_eq!(result.region, Some(Region::new(0, 0, 7, 3)));
    }

    #[test]
    fn test_load_grayscale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let img: ImageBuffer<Luma<u8>, Vec<u8>> =
            ImageBuffer::from_fn(6, 6, |_, y| if y == 5 { Luma([3]) } else { Luma([128]) });
        img.save(&path).unwrap();

        let rgb = load_screenshot(&path).unwrap();
        let result = detect_black_areas(&rgb, DEFAULT_BLACK_THRESHOLD).unwrap();
        assert_eq!(result.black_pixels, 6);
    }

    #[test]
    fn test_load_garbage_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();

        let err = load_screenshot(&path).unwrap_err();
        match err {
            AnalyzerError::ImageLoad { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
