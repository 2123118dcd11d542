//! SVG output for external renderers. Pure string building, y axis flipped
//! so the plank bottom sits at the bottom of the image.

use std::fmt::Write;

use super::{ClosedPath, CrossSection, PathSegment, Point};

/// A strand dot in the display frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrandMarker {
    pub x: f64,
    pub y: f64,
    pub diameter_in: f64,
    pub active: bool,
}

fn num(v: f64) -> String {
    let s = format!("{:.4}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn flip(p: Point, height: f64) -> Point {
    Point::new(p.x, height - p.y)
}

/// SVG `d` attribute for `path`, with `height` used to flip the y axis.
pub fn path_data(path: &ClosedPath, height: f64) -> String {
    let mut d = String::new();
    let mut current = flip(path.start, height);
    let _ = write!(d, "M {} {}", num(current.x), num(current.y));

    for segment in &path.segments {
        match *segment {
            PathSegment::LineTo { to } => {
                let to = flip(to, height);
                let _ = write!(d, " L {} {}", num(to.x), num(to.y));
                current = to;
            }
            PathSegment::ArcTo { to, center, radius } => {
                let to = flip(to, height);
                let c = flip(center, height);
                // Arcs never exceed a quarter turn, so the cross product sign
                // alone picks the sweep direction.
                let cross = (current.x - c.x) * (to.y - c.y) - (current.y - c.y) * (to.x - c.x);
                let sweep = u8::from(cross > 0.0);
                let _ = write!(
                    d,
                    " A {} {} 0 0 {} {} {}",
                    num(radius),
                    num(radius),
                    sweep,
                    num(to.x),
                    num(to.y)
                );
                current = to;
            }
        }
    }

    d.push_str(" Z");
    d
}

/// Standalone SVG document: outline, core voids and strand dots. Inactive
/// strands are drawn hollow.
pub fn render_cross_section(section: &CrossSection, strands: &[StrandMarker]) -> String {
    let width = section.display_width_in();
    let height = section.height_in;
    let mut svg = String::new();

    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}in" height="{}in">"#,
        num(width),
        num(height),
        num(width),
        num(height)
    );
    let _ = writeln!(
        svg,
        r#"  <path class="outline" d="{}" fill="lightgray" stroke="black" stroke-width="0.05"/>"#,
        path_data(&section.outline, height)
    );

    for void in &section.voids {
        let c = flip(void.center, height);
        let _ = writeln!(
            svg,
            r#"  <ellipse class="core" cx="{}" cy="{}" rx="{}" ry="{}" fill="white" stroke="black" stroke-width="0.03"/>"#,
            num(c.x),
            num(c.y),
            num(void.radius_x),
            num(void.radius_y)
        );
    }

    for strand in strands {
        let c = flip(Point::new(strand.x, strand.y), height);
        let (class, fill) = if strand.active {
            ("strand active", "black")
        } else {
            ("strand inactive", "none")
        };
        let _ = writeln!(
            svg,
            r#"  <circle class="{}" cx="{}" cy="{}" r="{}" fill="{}" stroke="black" stroke-width="0.03"/>"#,
            class,
            num(c.x),
            num(c.y),
            num(strand.diameter_in / 2.0),
            fill
        );
    }

    svg.push_str("</svg>\n");
    svg
}
