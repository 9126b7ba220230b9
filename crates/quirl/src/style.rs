//! Edge-style drawers.
//!
//! A drawer converts the tracer's abstract boundary transitions into
//! concrete path primitives for one module size. Every transition is one
//! of four kinds:
//!
//! - straight continuation along a wall,
//! - convex 90-degree turn (the outline wraps an outer corner),
//! - reflex 90-degree turn (the outline pivots on an inner corner; a
//!   zero-length pivot, so it is always sharp),
//! - U-turn (the outline wraps the tip of a one-module-wide protrusion),
//!
//! plus the single-dot glyph for isolated cells. The five styles differ
//! only in the corner radius they apply: `square` uses none, `rounded`
//! half a module, `extra-rounded` a full module, and the two classy
//! variants round only the top-left/bottom-right diagonal pair.
//!
//! The styles are a closed set dispatched through an enum rather than an
//! open trait: the sixteen-transition contract stays explicit and
//! exhaustively matched.

use std::fmt;
use std::str::FromStr;

use crate::path::PathData;
use crate::trace::Direction;

const EPS: f64 = 1e-9;

/// Error type for style selection.
#[derive(Debug, PartialEq, Eq)]
pub enum StyleError {
    /// The style name is not one of the known identifiers.
    Unknown(String),
    /// `dots` does not trace outlines and has no edge drawer.
    NotOutlined,
}

impl fmt::Display for StyleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleError::Unknown(name) => write!(f, "unknown dot style: {name}"),
            StyleError::NotOutlined => write!(f, "the dots style has no edge drawer"),
        }
    }
}

impl std::error::Error for StyleError {}

/// The module rendering style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DotStyle {
    Square,
    /// One filled circle per module; bypasses contour tracing entirely.
    Dots,
    Rounded,
    ExtraRounded,
    Classy,
    ClassyRounded,
}

impl DotStyle {
    pub fn all() -> [DotStyle; 6] {
        [
            DotStyle::Square,
            DotStyle::Dots,
            DotStyle::Rounded,
            DotStyle::ExtraRounded,
            DotStyle::Classy,
            DotStyle::ClassyRounded,
        ]
    }

    pub fn name(self) -> &'static str {
        match self {
            DotStyle::Square => "square",
            DotStyle::Dots => "dots",
            DotStyle::Rounded => "rounded",
            DotStyle::ExtraRounded => "extra-rounded",
            DotStyle::Classy => "classy",
            DotStyle::ClassyRounded => "classy-rounded",
        }
    }
}

impl fmt::Display for DotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DotStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(DotStyle::Square),
            "dots" => Ok(DotStyle::Dots),
            "rounded" => Ok(DotStyle::Rounded),
            "extra-rounded" => Ok(DotStyle::ExtraRounded),
            "classy" => Ok(DotStyle::Classy),
            "classy-rounded" => Ok(DotStyle::ClassyRounded),
            other => Err(StyleError::Unknown(other.to_string())),
        }
    }
}

/// Orientation of a 90-degree corner on the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

/// Classified boundary transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    Straight,
    Convex(Corner),
    Reflex,
    UTurn(Direction),
}

/// Map an (arrival, departure) pair to its transition kind.
///
/// The tracer keeps the interior on the walker's left, which fixes which
/// cell corner each turn pivots on.
fn classify(from: Direction, to: Direction) -> Turn {
    use Direction::*;
    match (from, to) {
        (Top, Bottom) | (Bottom, Top) | (Left, Right) | (Right, Left) => Turn::Straight,
        (Right, Bottom) => Turn::Convex(Corner::TopLeft),
        (Top, Right) => Turn::Convex(Corner::BottomLeft),
        (Left, Top) => Turn::Convex(Corner::BottomRight),
        (Bottom, Left) => Turn::Convex(Corner::TopRight),
        // Inner corners pivot in place: entry and exit coincide.
        (Top, Left) | (Left, Bottom) | (Bottom, Right) | (Right, Top) => Turn::Reflex,
        (Top, Top) => Turn::UTurn(Top),
        (Bottom, Bottom) => Turn::UTurn(Bottom),
        (Left, Left) => Turn::UTurn(Left),
        (Right, Right) => Turn::UTurn(Right),
    }
}

/// An edge-style drawer for one module size.
#[derive(Debug, Clone, Copy)]
pub struct Drawer {
    style: DotStyle,
    size: f64,
}

impl Drawer {
    /// Create a drawer. `Dots` is rejected: it renders per-cell circles
    /// without tracing.
    pub fn new(style: DotStyle, size: f64) -> Result<Self, StyleError> {
        if style == DotStyle::Dots {
            return Err(StyleError::NotOutlined);
        }
        Ok(Self { style, size })
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    /// The corner radius this style applies at a convex corner, or 0 for
    /// a sharp corner.
    fn corner_radius(&self, corner: Corner) -> f64 {
        let classy_pair = matches!(corner, Corner::TopLeft | Corner::BottomRight);
        match self.style {
            DotStyle::Square => 0.0,
            DotStyle::Rounded => self.size / 2.0,
            DotStyle::ExtraRounded => self.size,
            DotStyle::Classy => {
                if classy_pair {
                    self.size / 2.0
                } else {
                    0.0
                }
            }
            DotStyle::ClassyRounded => {
                if classy_pair {
                    self.size
                } else {
                    0.0
                }
            }
            DotStyle::Dots => unreachable!("dots has no drawer"),
        }
    }

    /// Absolute point where a walk beginning at cell `(row, col)` with the
    /// given arrival side starts drawing.
    pub fn start_point(&self, arrival: Direction, row: usize, col: usize) -> (f64, f64) {
        let s = self.size;
        let x = col as f64 * s;
        let y = row as f64 * s;
        match arrival {
            Direction::Top => (x, y),
            Direction::Right => (x + s, y),
            Direction::Bottom => (x + s, y + s),
            Direction::Left => (x, y + s),
        }
    }

    /// Append the primitives for one boundary transition.
    pub fn transition(&self, path: &mut PathData, from: Direction, to: Direction) {
        let s = self.size;
        match classify(from, to) {
            Turn::Straight => match to {
                Direction::Bottom => path.v_line(s),
                Direction::Top => path.v_line(-s),
                Direction::Right => path.h_line(s),
                Direction::Left => path.h_line(-s),
            },
            Turn::Convex(corner) => self.convex(path, corner),
            Turn::Reflex => {}
            Turn::UTurn(side) => self.u_turn(path, side),
        }
    }

    /// Wrap a convex corner: a straight run, the corner (sharp or arced),
    /// and the straight run out.
    fn convex(&self, path: &mut PathData, corner: Corner) {
        let s = self.size;
        let r = self.corner_radius(corner);
        let leg = s - r;
        // All traced arcs share one sweep direction because the walk
        // orientation is consistent.
        match corner {
            Corner::TopLeft => {
                line_h(path, -leg);
                if r > EPS {
                    path.arc(r, r, false, -r, r);
                }
                line_v(path, leg);
            }
            Corner::BottomLeft => {
                line_v(path, leg);
                if r > EPS {
                    path.arc(r, r, false, r, r);
                }
                line_h(path, leg);
            }
            Corner::BottomRight => {
                line_h(path, leg);
                if r > EPS {
                    path.arc(r, r, false, r, -r);
                }
                line_v(path, -leg);
            }
            Corner::TopRight => {
                line_v(path, -leg);
                if r > EPS {
                    path.arc(r, r, false, -r, -r);
                }
                line_h(path, -leg);
            }
        }
    }

    /// Wrap the tip of a one-module-wide protrusion. `side` is the open
    /// side the walk doubles back toward.
    fn u_turn(&self, path: &mut PathData, side: Direction) {
        let s = self.size;
        if self.style == DotStyle::Square {
            // Three-segment zigzag around the tip.
            match side {
                Direction::Top => {
                    path.v_line(s);
                    path.h_line(s);
                    path.v_line(-s);
                }
                Direction::Bottom => {
                    path.v_line(-s);
                    path.h_line(-s);
                    path.v_line(s);
                }
                Direction::Left => {
                    path.h_line(s);
                    path.v_line(-s);
                    path.h_line(-s);
                }
                Direction::Right => {
                    path.h_line(-s);
                    path.v_line(s);
                    path.h_line(s);
                }
            }
            return;
        }
        // Half-circle cap bridging the two straight legs.
        let h = s / 2.0;
        match side {
            Direction::Top => {
                path.v_line(h);
                path.arc(h, h, false, s, 0.0);
                path.v_line(-h);
            }
            Direction::Bottom => {
                path.v_line(-h);
                path.arc(h, h, false, -s, 0.0);
                path.v_line(h);
            }
            Direction::Left => {
                path.h_line(h);
                path.arc(h, h, false, 0.0, -s);
                path.h_line(-h);
            }
            Direction::Right => {
                path.h_line(-h);
                path.arc(h, h, false, 0.0, s);
                path.h_line(h);
            }
        }
    }

    /// Emit the glyph for an isolated single-cell component.
    pub fn dot(&self, path: &mut PathData, row: usize, col: usize) {
        let s = self.size;
        let h = s / 2.0;
        let x = col as f64 * s;
        let y = row as f64 * s;
        match self.style {
            DotStyle::Square => {
                path.move_to(x, y);
                path.h_line(s);
                path.v_line(s);
                path.h_line(-s);
                path.close();
            }
            DotStyle::Rounded | DotStyle::ExtraRounded => {
                circle(path, x + h, y + h, h);
            }
            DotStyle::Classy => {
                // Rounded diamond: top-left and bottom-right corners
                // filleted, the other two sharp.
                path.move_to(x, y + h);
                path.arc(h, h, true, h, -h);
                path.h_line(h);
                path.v_line(h);
                path.arc(h, h, true, -h, h);
                path.h_line(-h);
                path.close();
            }
            DotStyle::ClassyRounded => {
                // Leaf: two full-radius arcs between the sharp corners.
                path.move_to(x, y + s);
                path.arc(s, s, true, s, -s);
                path.arc(s, s, true, -s, s);
                path.close();
            }
            DotStyle::Dots => unreachable!("dots has no drawer"),
        }
    }
}

/// Append a full circle as two half arcs.
pub(crate) fn circle(path: &mut PathData, cx: f64, cy: f64, r: f64) {
    path.move_to(cx - r, cy);
    path.arc(r, r, true, 2.0 * r, 0.0);
    path.arc(r, r, true, -2.0 * r, 0.0);
    path.close();
}

fn line_h(path: &mut PathData, dx: f64) {
    if dx.abs() > EPS {
        path.h_line(dx);
    }
}

fn line_v(path: &mut PathData, dy: f64) {
    if dy.abs() > EPS {
        path.v_line(dy);
    }
}

// ============================================================================
// TESTS
// ============================================================================
