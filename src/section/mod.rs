pub mod outline;
pub mod svg;
pub mod voids;

use serde::Serialize;

use crate::catalog::ProductGeometry;
use crate::cut::{CutSpec, CutWindow};
use crate::error::ScResult;

pub use self::outline::build_outline;
pub use self::voids::{core_voids, CoreVoid};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PathSegment {
    LineTo { to: Point },
    /// Circular arc (at most a quarter turn) ending at `to`.
    ArcTo { to: Point, center: Point, radius: f64 },
}

impl PathSegment {
    pub fn end(&self) -> Point {
        match *self {
            Self::LineTo { to } | Self::ArcTo { to, .. } => to,
        }
    }
}

/// Outline in the display frame: x = 0 at the rendered left edge, y = 0 at
/// the bottom. The final edge back to `start` is implicit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosedPath {
    pub start: Point,
    pub segments: Vec<PathSegment>,
}

impl ClosedPath {
    pub fn vertices(&self) -> Vec<Point> {
        std::iter::once(self.start)
            .chain(self.segments.iter().map(PathSegment::end))
            .collect()
    }

    /// `(min, max)` corners of the vertex bounding box.
    pub fn bounds(&self) -> (Point, Point) {
        self.vertices().iter().fold(
            (
                Point::new(f64::INFINITY, f64::INFINITY),
                Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
            ),
            |(lo, hi), p| {
                (
                    Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                    Point::new(hi.x.max(p.x), hi.y.max(p.y)),
                )
            },
        )
    }

    /// True when no two non-adjacent edges touch. Arcs are checked by chord.
    pub fn is_simple(&self) -> bool {
        let v = self.vertices();
        let n = v.len();
        if n < 3 {
            return false;
        }

        for i in 0..n {
            let (a1, a2) = (v[i], v[(i + 1) % n]);
            for j in (i + 1)..n {
                let adjacent = j == i + 1 || (i == 0 && j == n - 1);
                if adjacent {
                    continue;
                }
                let (b1, b2) = (v[j], v[(j + 1) % n]);
                if segments_touch(a1, a2, b1, b2) {
                    return false;
                }
            }
        }
        true
    }
}

fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

fn segments_touch(a1: Point, a2: Point, b1: Point, b2: Point) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && on_segment(b1, b2, a1))
        || (d2 == 0.0 && on_segment(b1, b2, a2))
        || (d3 == 0.0 && on_segment(a1, a2, b1))
        || (d4 == 0.0 && on_segment(a1, a2, b2))
}

/// Everything a renderer needs to draw one plank section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossSection {
    pub product_type: String,
    pub window: CutWindow,
    pub height_in: f64,
    pub outline: ClosedPath,
    pub voids: Vec<CoreVoid>,
}

impl CrossSection {
    pub fn display_width_in(&self) -> f64 {
        self.window.display_width_in
    }
}

pub fn build_cross_section(
    geometry: &ProductGeometry,
    cut: Option<&CutSpec>,
) -> ScResult<CrossSection> {
    let outline = build_outline(geometry, cut)?;
    let window = CutWindow::new(geometry.full_width_in, cut)?;

    Ok(CrossSection {
        product_type: geometry.product_type.clone(),
        window,
        height_in: geometry.height_in,
        outline,
        voids: core_voids(geometry, &window),
    })
}
