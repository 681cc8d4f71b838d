//! Black-area detection for tile coverage screenshots.
//!
//! This module provides:
//! - Black pixel counting and bounding box extraction (`pixels`)
//! - The fixed UI layout and the game-view intrusion test (`regions`)

pub mod pixels;
pub mod regions;

pub use pixels::{detect_black_areas, load_screenshot, BlackAreaResult, DEFAULT_BLACK_THRESHOLD};
pub use regions::{expected_ui_regions, is_game_area_intrusion, Region};
