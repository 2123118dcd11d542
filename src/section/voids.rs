use serde::Serialize;

use super::Point;
use crate::catalog::ProductGeometry;
use crate::cut::CutWindow;

/// An elliptical core void in the display frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoreVoid {
    /// 1-based core number on the uncut plank, left to right.
    pub core: usize,
    pub center: Point,
    pub radius_x: f64,
    pub radius_y: f64,
    /// Part of the void lies outside the visible window.
    pub clipped: bool,
}

/// Cores whose bounding box overlaps the visible window.
pub fn core_voids(geometry: &ProductGeometry, window: &CutWindow) -> Vec<CoreVoid> {
    let radius_x = geometry.core_width_in / 2.0;
    let radius_y = geometry.core_height_in / 2.0;
    let center_y = geometry.core_center_y_in();

    (0..geometry.num_cores)
        .filter_map(|i| {
            let uncut_x = geometry.edge_to_first_core_in + i as f64 * geometry.core_pitch_in();
            let x = window.to_display_x(uncut_x);
            let (lo, hi) = (x - radius_x, x + radius_x);
            if !window.overlaps(lo, hi) {
                return None;
            }

            Some(CoreVoid {
                core: i + 1,
                center: Point::new(x, center_y),
                radius_x,
                radius_y,
                clipped: lo < 0.0 || hi > window.display_width_in,
            })
        })
        .collect()
}
