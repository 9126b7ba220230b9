//! Path data assembly.
//!
//! Drawers emit their output through [`PathData`], a small structured
//! builder over the subset of the SVG path vocabulary the contour engine
//! needs: absolute move-to, relative horizontal/vertical lines, relative
//! elliptical arcs with a sweep flag, and close-path. The structured form
//! renders to a `d` string for the presentation layer and flattens to
//! polylines (arcs approximated via lyon_geom) for geometric checks and
//! plotter-style consumers.

use std::fmt;

use lyon_geom::{Angle, Arc, ArcFlags, SvgArc, point, vector};

/// Fill rule required to render a path correctly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillRule {
    /// Single boundary, no enclosed holes.
    NonZero,
    /// Compound path whose hole subpaths must render as cutouts.
    EvenOdd,
}

impl FillRule {
    /// The SVG attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            FillRule::NonZero => "nonzero",
            FillRule::EvenOdd => "evenodd",
        }
    }
}

/// One drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// Absolute move, starting a new subpath.
    MoveTo { x: f64, y: f64 },
    /// Relative horizontal line.
    HLine { dx: f64 },
    /// Relative vertical line.
    VLine { dy: f64 },
    /// Relative elliptical arc. Large-arc is never needed by the drawers.
    Arc {
        rx: f64,
        ry: f64,
        sweep: bool,
        dx: f64,
        dy: f64,
    },
    /// Close the current subpath.
    Close,
}

/// An ordered list of drawing commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    segments: Vec<PathSegment>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.segments.push(PathSegment::MoveTo { x, y });
    }

    pub fn h_line(&mut self, dx: f64) {
        self.segments.push(PathSegment::HLine { dx });
    }

    pub fn v_line(&mut self, dy: f64) {
        self.segments.push(PathSegment::VLine { dy });
    }

    pub fn arc(&mut self, rx: f64, ry: f64, sweep: bool, dx: f64, dy: f64) {
        self.segments.push(PathSegment::Arc {
            rx,
            ry,
            sweep,
            dx,
            dy,
        });
    }

    pub fn close(&mut self) {
        self.segments.push(PathSegment::Close);
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Number of subpaths (move-to commands).
    pub fn subpath_count(&self) -> usize {
        self.segments
            .iter()
            .filter(|s| matches!(s, PathSegment::MoveTo { .. }))
            .count()
    }

    /// Flatten into one polyline per subpath, approximating arcs with line
    /// segments within `tolerance`.
    pub fn flatten(&self, tolerance: f64) -> Vec<Vec<(f64, f64)>> {
        let mut subpaths: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        let (mut x, mut y) = (0.0, 0.0);

        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo { x: nx, y: ny } => {
                    if current.len() > 1 {
                        subpaths.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                    x = nx;
                    y = ny;
                    current.push((x, y));
                }
                PathSegment::HLine { dx } => {
                    x += dx;
                    current.push((x, y));
                }
                PathSegment::VLine { dy } => {
                    y += dy;
                    current.push((x, y));
                }
                PathSegment::Arc {
                    rx,
                    ry,
                    sweep,
                    dx,
                    dy,
                } => {
                    let svg_arc = SvgArc {
                        from: point(x, y),
                        to: point(x + dx, y + dy),
                        radii: vector(rx, ry),
                        x_rotation: Angle::radians(0.0),
                        flags: ArcFlags {
                            large_arc: false,
                            sweep,
                        },
                    };
                    if svg_arc.is_straight_line() {
                        current.push((x + dx, y + dy));
                    } else {
                        Arc::from_svg_arc(&svg_arc).for_each_flattened(
                            tolerance,
                            &mut |seg: &lyon_geom::LineSegment<f64>| {
                                current.push((seg.to.x, seg.to.y));
                            },
                        );
                    }
                    x += dx;
                    y += dy;
                }
                PathSegment::Close => {
                    if let Some(&first) = current.first() {
                        if current.last() != Some(&first) {
                            current.push(first);
                        }
                        x = first.0;
                        y = first.1;
                    }
                }
            }
        }
        if current.len() > 1 {
            subpaths.push(current);
        }
        subpaths
    }
}

impl fmt::Display for PathData {
    /// Render as an SVG `d` attribute value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo { x, y } => write!(f, "M {} {}", x, y)?,
                PathSegment::HLine { dx } => write!(f, "h{}", dx)?,
                PathSegment::VLine { dy } => write!(f, "v{}", dy)?,
                PathSegment::Arc {
                    rx,
                    ry,
                    sweep,
                    dx,
                    dy,
                } => write!(f, "a{} {} 0 0 {} {} {}", rx, ry, sweep as u8, dx, dy)?,
                PathSegment::Close => write!(f, "z")?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
