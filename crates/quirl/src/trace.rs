//! Contour tracing.
//!
//! Walks the boundary of a labeled component as a closed loop of
//! orthogonal moves. At each step the walker knows which side it arrived
//! from and probes its four neighbors in a fixed circular precedence
//! order, starting just past the arrival side; the first neighbor in the
//! same component is the next travel direction. This is Moore boundary
//! following restricted to the orthogonal neighborhood, and it keeps the
//! component interior on the walker's left throughout, so every region is
//! traced with a consistent orientation.
//!
//! Each transition (arrival side, departure side) is handed to the
//! [`Drawer`] which appends style-specific path primitives; the walk
//! terminates when it re-enters the start cell from the starting arrival
//! side. Re-entering the start cell from a different side closes a
//! different sub-loop and must not stop the walk.

use crate::label::LabelMap;
use crate::path::PathData;
use crate::style::Drawer;

/// The side from which the tracer arrived at the current cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }

    /// Row/column delta of a move toward this side.
    #[inline]
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Top => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Bottom => (1, 0),
            Direction::Left => (0, -1),
        }
    }
}

/// Circular neighbor precedence. The walker scans from just past its
/// arrival side; this ordering is what makes the walk hug the boundary
/// clockwise instead of wandering into the interior.
const PRECEDENCE: [Direction; 4] = [
    Direction::Left,
    Direction::Bottom,
    Direction::Right,
    Direction::Top,
];

#[inline]
fn precedence_index(direction: Direction) -> usize {
    match direction {
        Direction::Left => 0,
        Direction::Bottom => 1,
        Direction::Right => 2,
        Direction::Top => 3,
    }
}

/// Trace one component's closed boundary, appending drawing commands to
/// `path`.
///
/// `start` must be the component's first cell in raster order (as recorded
/// by the labeler): the walk relies on it having no same-component
/// neighbor above or to its left.
///
/// # Panics
///
/// Panics if the walk fails to close within a bound proportional to the
/// grid area. That can only happen with a malformed label map and is an
/// internal invariant violation, not a recoverable error: truncating the
/// walk would emit visibly broken geometry.
pub fn trace_region(
    map: &LabelMap,
    id: u32,
    start: (usize, usize),
    drawer: &Drawer,
    path: &mut PathData,
) {
    let (start_row, start_col) = (start.0 as isize, start.1 as isize);
    let same = |row: isize, col: isize| map.is_region(row, col, id);

    let right = same(start_row, start_col + 1);
    let below = same(start_row + 1, start_col);
    if !right && !below && !same(start_row, start_col - 1) && !same(start_row - 1, start_col) {
        // Isolated cell: no boundary walk, just the style's dot glyph.
        drawer.dot(path, start.0, start.1);
        return;
    }

    // Start orientation: prefer "arrived from the right" so the first move
    // explores downward, fall back to "arrived from below". The raster-first
    // start cell guarantees one of the two neighbors exists here.
    let start_arrival = if right {
        Direction::Right
    } else if below {
        Direction::Bottom
    } else {
        Direction::Top
    };

    let (sx, sy) = drawer.start_point(start_arrival, start.0, start.1);
    path.move_to(sx, sy);

    let max_steps = map.rows() * map.cols() * 4 + 4;
    let mut steps = 0usize;
    let (mut row, mut col) = (start_row, start_col);
    let mut arrival = start_arrival;

    loop {
        let from = precedence_index(arrival);
        let mut departure = None;
        for offset in 1..=4 {
            let candidate = PRECEDENCE[(from + offset) % 4];
            let (dr, dc) = candidate.delta();
            if same(row + dr, col + dc) {
                departure = Some(candidate);
                break;
            }
        }
        // The arrival neighbor itself is in the component, so the scan
        // always finds a departure.
        let Some(departure) = departure else {
            unreachable!("non-isolated cell lost its neighbors mid-walk");
        };

        drawer.transition(path, arrival, departure);

        let (dr, dc) = departure.delta();
        row += dr;
        col += dc;
        arrival = departure.opposite();

        if row == start_row && col == start_col && arrival == start_arrival {
            break;
        }
        steps += 1;
        assert!(
            steps <= max_steps,
            "contour walk for region {id} failed to close after {steps} steps: malformed label map"
        );
    }

    path.close();
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::label_foreground;
    use crate::mask::Mask;
    use Direction::*;
    use crate::style::{DotStyle, Drawer};

    fn mask_from_str(art: &str) -> Mask {
        let rows: Vec<Vec<bool>> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(|c| c == '#').collect())
            .collect();
        Mask::from_rows(&rows).unwrap()
    }

    fn trace_first_region(art: &str, style: DotStyle, size: f64) -> PathData {
        let mask = mask_from_str(art);
        let labeled = label_foreground(&mask);
        let drawer = Drawer::new(style, size).unwrap();
        let mut path = PathData::new();
        let region = labeled.regions[0];
        trace_region(&labeled.map, region.id, region.start, &drawer, &mut path);
        path
    }

    #[test]
    fn opposite_round_trips() {
        for d in [Top, Right, Bottom, Left] {
            assert_eq!(d.opposite().opposite(), d);
        }
    }

    #[test]
    fn square_block_traces_a_rectangle() {
        let path = trace_first_region(
            "###
             ###
             ###",
            DotStyle::Square,
            1.0,
        );
        // One closed subpath, no arcs, net displacement zero.
        assert_eq!(path.subpath_count(), 1);
        let polylines = path.flatten(0.05);
        assert_eq!(polylines.len(), 1);
        let poly = &polylines[0];
        assert_eq!(poly.first(), poly.last());
        // Outline is the 3x3 bounding square.
        let min_x = poly.iter().map(|p| p.0).fold(f64::INFINITY, f64::min);
        let max_x = poly.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        let min_y = poly.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
        let max_y = poly.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);
        assert_eq!((min_x, min_y, max_x, max_y), (0.0, 0.0, 3.0, 3.0));
    }

    #[test]
    fn isolated_cell_emits_dot_glyph() {
        let path = trace_first_region("#", DotStyle::Square, 2.0);
        // A dot glyph, not a traced transition sequence: exactly one
        // subpath describing the unit cell.
        let polylines = path.flatten(0.05);
        assert_eq!(polylines.len(), 1);
        let poly = &polylines[0];
        assert!(poly.contains(&(0.0, 0.0)));
        assert!(poly.contains(&(2.0, 2.0)));
    }

    #[test]
    fn horizontal_domino_closes() {
        let path = trace_first_region("##", DotStyle::Square, 1.0);
        let polylines = path.flatten(0.05);
        assert_eq!(polylines.len(), 1);
        let poly = &polylines[0];
        assert_eq!(poly.first(), poly.last());
        let max_x = poly.iter().map(|p| p.0).fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(max_x, 2.0);
    }

    #[test]
    fn vertical_domino_closes() {
        let path = trace_first_region(
            "#
             #",
            DotStyle::Square,
            1.0,
        );
        let polylines = path.flatten(0.05);
        assert_eq!(polylines.len(), 1);
        let max_y = polylines[0]
            .iter()
            .map(|p| p.1)
            .fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(max_y, 2.0);
    }

    #[test]
    fn l_tromino_closes_with_reflex_corner() {
        let path = trace_first_region(
            "#.
             ##",
            DotStyle::Square,
            1.0,
        );
        let polylines = path.flatten(0.05);
        assert_eq!(polylines.len(), 1);
        let poly = &polylines[0];
        assert_eq!(poly.first(), poly.last());
        // The walk pivots on the inner junction at (1, 1).
        assert!(poly.contains(&(1.0, 1.0)));
        assert!(poly.contains(&(2.0, 1.0)));
    }
}
