use tracing::debug;

use super::{ClosedPath, PathSegment, Point};
use crate::catalog::ProductGeometry;
use crate::cut::{CutSpec, CutWindow, KeeperSide};
use crate::error::ScResult;

/// Builds the plank outline, clockwise from the bottom-left.
///
/// Uncut planks carry the keyway on both edges. A cut keeps the keyway and
/// corner radius on the keeper side only; the sawn edge is a plain vertical
/// line.
pub fn build_outline(geometry: &ProductGeometry, cut: Option<&CutSpec>) -> ScResult<ClosedPath> {
    geometry.validate()?;
    let window = CutWindow::new(geometry.full_width_in, cut)?;

    let (left_keyway, right_keyway) = match cut.map(|c| c.keeper_side) {
        None => (true, true),
        Some(KeeperSide::L1) => (true, false),
        Some(KeeperSide::L2) => (false, true),
    };

    let width = window.display_width_in;
    let height = geometry.height_in;
    let radius = geometry.bottom_corner_radius_in;
    let ascending = keyway_points(geometry);

    let mut segments = Vec::with_capacity(ascending.len() * 2 + 6);

    // Left edge, bottom to top.
    let start = if left_keyway && radius > 0.0 {
        segments.push(PathSegment::ArcTo {
            to: Point::new(0.0, radius),
            center: Point::new(radius, radius),
            radius,
        });
        Point::new(radius, 0.0)
    } else {
        Point::new(0.0, 0.0)
    };

    if left_keyway {
        segments.extend(ascending.iter().map(|&to| PathSegment::LineTo { to }));
    } else {
        segments.push(PathSegment::LineTo {
            to: Point::new(0.0, height),
        });
    }

    // Top edge, then the right edge top to bottom.
    if right_keyway {
        segments.extend(
            mirror(&ascending, width)
                .into_iter()
                .map(|to| PathSegment::LineTo { to }),
        );
        if radius > 0.0 {
            segments.push(PathSegment::LineTo {
                to: Point::new(width, radius),
            });
            segments.push(PathSegment::ArcTo {
                to: Point::new(width - radius, 0.0),
                center: Point::new(width - radius, radius),
                radius,
            });
        } else {
            segments.push(PathSegment::LineTo {
                to: Point::new(width, 0.0),
            });
        }
    } else {
        segments.push(PathSegment::LineTo {
            to: Point::new(width, height),
        });
        segments.push(PathSegment::LineTo {
            to: Point::new(width, 0.0),
        });
    }

    debug!(
        "Outline for '{}' at {}\" wide: {} segments",
        geometry.product_type,
        width,
        segments.len()
    );

    Ok(ClosedPath { start, segments })
}

/// Keyway profile on the left edge, ascending: depth becomes x.
fn keyway_points(geometry: &ProductGeometry) -> Vec<Point> {
    geometry
        .keyway_profile
        .iter()
        .map(|p| Point::new(p.depth_in, p.height_in))
        .collect()
}

/// Reflects left-edge points onto the right edge: `x -> width - x`, order
/// reversed so the outline keeps walking in one direction.
pub(crate) fn mirror(points: &[Point], width: f64) -> Vec<Point> {
    points
        .iter()
        .rev()
        .map(|p| Point::new(width - p.x, p.y))
        .collect()
}
