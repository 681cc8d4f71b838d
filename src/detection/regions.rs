//! Expected UI layout and game-view intrusion test.
//!
//! The game window always shows a header strip across the top and a sidebar
//! panel on the left. Both are drawn by the UI layer and may legitimately
//! contain dark pixels; everything else is rendered by the tile map.

use serde::Serialize;
use std::fmt;

/// Height of the header strip in pixels.
pub const HEADER_HEIGHT: u32 = 60;

/// Width of the sidebar panel in pixels.
pub const SIDEBAR_WIDTH: u32 = 200;

/// A rectangle in pixel coordinates.
///
/// Bounding boxes produced by detection are inclusive on all four edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Region {
    pub top: u32,
    pub left: u32,
    pub bottom: u32,
    pub right: u32,
}

impl Region {
    pub fn new(top: u32, left: u32, bottom: u32, right: u32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top={}, left={}, bottom={}, right={}",
            self.top, self.left, self.bottom, self.right
        )
    }
}

/// The UI chrome expected in every screenshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiRegions {
    pub header: Region,
    pub sidebar: Region,
}

/// Derives the header and sidebar rectangles for a screenshot of the given size.
pub fn expected_ui_regions(width: u32, height: u32) -> UiRegions {
    UiRegions {
        header: Region::new(0, 0, HEADER_HEIGHT, width),
        sidebar: Region::new(HEADER_HEIGHT, 0, height, SIDEBAR_WIDTH),
    }
}

/// Decides whether a black bounding box reaches into the game view.
///
/// The box intrudes only if it extends below the header AND right of the
/// sidebar. This looks at the box extremes, not at individual pixels, so an
/// L-shaped black area hugging both the header and the sidebar is flagged even
/// though no game pixel is black.
pub fn is_game_area_intrusion(black_region: &Region, ui: &UiRegions) -> bool {
    black_region.bottom > ui.header.bottom && black_region.right > ui.sidebar.right
}
