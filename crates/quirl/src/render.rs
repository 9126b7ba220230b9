//! Pipeline entry point.
//!
//! [`draw_shapes`] runs the full labeling, tracing, and hole compositing
//! pass over a mask and returns one fill shape per foreground component.
//! The `dots` style short-circuits the pipeline and emits one circle per
//! dark cell instead.

use crate::holes::assign_holes;
use crate::label::{label_background, label_foreground};
use crate::mask::Mask;
use crate::path::{FillRule, PathData};
use crate::style::{self, DotStyle, Drawer};
use crate::trace::trace_region;

/// One renderable shape: closed path data plus the fill rule it requires.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub path: PathData,
    pub fill_rule: FillRule,
}

/// Render every foreground component of `mask` in the given style.
///
/// Each returned shape is one foreground component together with its
/// enclosed holes as extra subpaths. Shapes carry `EvenOdd` only when a
/// hole is present, so plain components keep the default fill behavior.
/// Output order follows the components' raster order, which makes the
/// whole pass deterministic.
pub fn draw_shapes(mask: &Mask, dot_style: DotStyle, module_size: f64) -> Vec<Shape> {
    if dot_style == DotStyle::Dots {
        return draw_dots(mask, module_size);
    }
    let drawer = match Drawer::new(dot_style, module_size) {
        Ok(drawer) => drawer,
        // Dots was handled above; every other style has a drawer.
        Err(_) => return Vec::new(),
    };

    let foreground = label_foreground(mask);
    let background = label_background(mask);
    let holes = assign_holes(&foreground, &background);

    let mut shapes = Vec::with_capacity(foreground.regions.len());
    for region in &foreground.regions {
        let mut path = PathData::new();
        trace_region(&foreground.map, region.id, region.start, &drawer, &mut path);

        let mut fill_rule = FillRule::NonZero;
        if let Some(enclosed) = holes.get(&region.id) {
            for hole in enclosed {
                trace_region(&background.map, hole.id, hole.start, &drawer, &mut path);
            }
            fill_rule = FillRule::EvenOdd;
        }
        shapes.push(Shape { path, fill_rule });
    }
    shapes
}

/// One circle per dark cell, all in a single shape.
fn draw_dots(mask: &Mask, module_size: f64) -> Vec<Shape> {
    let radius = module_size / 2.0;
    let mut path = PathData::new();
    for row in 0..mask.rows() {
        for col in 0..mask.cols() {
            if mask.get(row, col) {
                let cx = col as f64 * module_size + radius;
                let cy = row as f64 * module_size + radius;
                style::circle(&mut path, cx, cy, radius);
            }
        }
    }
    if path.is_empty() {
        Vec::new()
    } else {
        vec![Shape {
            path,
            fill_rule: FillRule::NonZero,
        }]
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathSegment;

    fn mask_from_str(art: &str) -> Mask {
        let rows: Vec<Vec<bool>> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().map(|c| c == '#').collect())
            .collect();
        Mask::from_rows(&rows).unwrap()
    }

    fn arc_count(path: &PathData) -> usize {
        path.segments()
            .iter()
            .filter(|s| matches!(s, PathSegment::Arc { .. }))
            .count()
    }

    /// Signed shoelace area of one flattened subpath.
    fn area(poly: &[(f64, f64)]) -> f64 {
        let mut sum = 0.0;
        for window in poly.windows(2) {
            let (x0, y0) = window[0];
            let (x1, y1) = window[1];
            sum += x0 * y1 - x1 * y0;
        }
        sum / 2.0
    }

    /// Even-odd containment of a point across every subpath of a shape.
    fn covers(shape: &Shape, x: f64, y: f64) -> bool {
        let mut crossings = 0usize;
        for poly in shape.path.flatten(0.01) {
            for window in poly.windows(2) {
                let (x0, y0) = window[0];
                let (x1, y1) = window[1];
                if (y0 > y) != (y1 > y) {
                    let t = (y - y0) / (y1 - y0);
                    if x0 + t * (x1 - x0) > x {
                        crossings += 1;
                    }
                }
            }
        }
        crossings % 2 == 1
    }

    #[test]
    fn square_block_is_a_sharp_rectangle() {
        let mask = mask_from_str(
            "###
             ###
             ###",
        );
        let shapes = draw_shapes(&mask, DotStyle::Square, 10.0);
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].fill_rule, FillRule::NonZero);
        assert_eq!(arc_count(&shapes[0].path), 0);
        let polys = shapes[0].path.flatten(0.01);
        assert_eq!(polys.len(), 1);
        assert!((area(&polys[0]).abs() - 900.0).abs() < 1e-6);
    }

    #[test]
    fn rounded_block_gains_four_corner_arcs() {
        let mask = mask_from_str(
            "###
             ###
             ###",
        );
        let shapes = draw_shapes(&mask, DotStyle::Rounded, 10.0);
        assert_eq!(shapes.len(), 1);
        let arcs: Vec<_> = shapes[0]
            .path
            .segments()
            .iter()
            .filter_map(|s| match *s {
                PathSegment::Arc { rx, ry, .. } => Some((rx, ry)),
                _ => None,
            })
            .collect();
        assert_eq!(arcs, vec![(5.0, 5.0); 4]);
    }

    #[test]
    fn classy_tromino_rounds_the_diagonal_pair() {
        // This orientation exposes one top-left and one bottom-right
        // convex corner, so classy rounds two of the five.
        let mask = mask_from_str(
            "#.
             ##",
        );
        let shapes = draw_shapes(&mask, DotStyle::Classy, 10.0);
        assert_eq!(shapes.len(), 1);
        assert_eq!(arc_count(&shapes[0].path), 2);
    }

    #[test]
    fn ring_encloses_its_center_as_a_hole() {
        let mask = mask_from_str(
            "#####
             #####
             ##.##
             #####
             #####",
        );
        let shapes = draw_shapes(&mask, DotStyle::Square, 10.0);
        assert_eq!(shapes.len(), 1);
        let shape = &shapes[0];
        assert_eq!(shape.fill_rule, FillRule::EvenOdd);
        assert_eq!(shape.path.subpath_count(), 2);
        // Center of the empty cell stays unfilled; a ring cell is filled.
        assert!(!covers(shape, 25.0, 25.0));
        assert!(covers(shape, 5.0, 25.0));
    }

    #[test]
    fn diagonal_cells_stay_separate_dots() {
        let mask = mask_from_str(
            "#.
             .#",
        );
        let shapes = draw_shapes(&mask, DotStyle::Rounded, 10.0);
        assert_eq!(shapes.len(), 2);
        for shape in &shapes {
            assert_eq!(shape.path.subpath_count(), 1);
            assert_eq!(arc_count(&shape.path), 2);
        }
        assert!(covers(&shapes[0], 5.0, 5.0));
        assert!(covers(&shapes[1], 15.0, 15.0));
    }

    #[test]
    fn dots_mode_emits_one_circle_per_cell() {
        let mask = mask_from_str(
            "#.#
             .#.",
        );
        let shapes = draw_shapes(&mask, DotStyle::Dots, 10.0);
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].path.subpath_count(), 3);
        assert_eq!(arc_count(&shapes[0].path), 6);
        assert!(covers(&shapes[0], 5.0, 5.0));
        assert!(!covers(&shapes[0], 15.0, 5.0));
    }

    #[test]
    fn output_is_idempotent() {
        let mask = mask_from_str(
            "##..#
             .###.
             #..##",
        );
        for style in DotStyle::all() {
            let first: Vec<String> = draw_shapes(&mask, style, 4.0)
                .iter()
                .map(|s| s.path.to_string())
                .collect();
            let second: Vec<String> = draw_shapes(&mask, style, 4.0)
                .iter()
                .map(|s| s.path.to_string())
                .collect();
            assert_eq!(first, second, "{style:?} output changed between runs");
        }
    }

    #[test]
    fn square_fill_covers_exactly_the_dark_cells() {
        let mask = mask_from_str(
            "##.#.
             .##..
             #.###
             ..#.#",
        );
        let shapes = draw_shapes(&mask, DotStyle::Square, 2.0);
        for row in 0..mask.rows() {
            for col in 0..mask.cols() {
                let x = col as f64 * 2.0 + 1.0;
                let y = row as f64 * 2.0 + 1.0;
                let covered = shapes.iter().any(|s| covers(s, x, y));
                assert_eq!(
                    covered,
                    mask.get(row, col),
                    "cell ({row}, {col}) coverage mismatch"
                );
            }
        }
    }

    #[test]
    fn emitted_path_strings_parse_as_svg() {
        let mask = mask_from_str(
            "###
             #.#
             ###",
        );
        for style in DotStyle::all() {
            for shape in draw_shapes(&mask, style, 10.0) {
                let d = shape.path.to_string();
                let segments: Result<Vec<_>, _> =
                    svgtypes::PathParser::from(d.as_str()).collect();
                assert!(segments.is_ok(), "{style:?} produced unparsable d: {d}");
                assert!(!segments.unwrap().is_empty());
            }
        }
    }
}
