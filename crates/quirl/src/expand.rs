//! Circular canvas expansion.
//!
//! A square mask can be embedded in a larger grid whose inscribed circle
//! fully contains the original square. The band between the square and
//! the circle is filled by projecting the original mask with wrap-around
//! indexing, so the ring carries QR-like texture without encoding
//! anything. The interior block is copied verbatim.

use crate::mask::Mask;

/// Padding (in modules, per side) that places an `n`-module square fully
/// inside the inscribed circle of the padded grid, with one spare module.
///
/// The square's diagonal is `n * sqrt(2)`; the circle's diameter is
/// `n + 2p`, so `p` must be at least `n (sqrt(2) - 1) / 2`.
pub fn circle_padding(n: usize) -> usize {
    let exact = n as f64 * (std::f64::consts::SQRT_2 - 1.0) / 2.0;
    exact.ceil() as usize + 1
}

/// Grow a square mask by `padding` modules on every side, clip to the
/// inscribed circle, and texture the ring from the original mask.
///
/// The interior block is copied verbatim regardless of `padding`; only
/// ring cells are clipped to the circle. The mask must be square.
pub fn expand_to_circle(mask: &Mask, padding: usize) -> Mask {
    assert_eq!(
        mask.rows(),
        mask.cols(),
        "circular expansion needs a square mask"
    );
    let n = mask.rows();
    if padding == 0 || n == 0 {
        return mask.clone();
    }
    let side = n + 2 * padding;
    let center = side as f64 / 2.0;
    let radius = side as f64 / 2.0;

    let mut out = Mask::empty(side, side);
    for row in 0..side {
        for col in 0..side {
            let in_square = (padding..padding + n).contains(&row)
                && (padding..padding + n).contains(&col);
            if in_square {
                out.set(row, col, mask.get(row - padding, col - padding));
                continue;
            }
            let dy = row as f64 + 0.5 - center;
            let dx = col as f64 + 0.5 - center;
            if dx * dx + dy * dy > radius * radius {
                continue;
            }
            // Wrap-around projection of the source grid.
            let src_row = (row as isize - padding as isize).rem_euclid(n as isize) as usize;
            let src_col = (col as isize - padding as isize).rem_euclid(n as isize) as usize;
            out.set(row, col, mask.get(src_row, src_col));
        }
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(n: usize) -> Mask {
        let rows: Vec<Vec<bool>> = (0..n)
            .map(|r| (0..n).map(|c| (r + c) % 2 == 0).collect())
            .collect();
        Mask::from_rows(&rows).unwrap()
    }

    #[test]
    fn padding_fits_the_diagonal() {
        for n in [1, 21, 25, 45, 177] {
            let p = circle_padding(n);
            let diameter = (n + 2 * p) as f64;
            assert!(n as f64 * std::f64::consts::SQRT_2 <= diameter);
        }
        assert_eq!(circle_padding(21), 6);
    }

    #[test]
    fn interior_block_is_preserved() {
        let mask = checker(9);
        let p = circle_padding(9);
        let out = expand_to_circle(&mask, p);
        assert_eq!(out.rows(), 9 + 2 * p);
        for row in 0..9 {
            for col in 0..9 {
                assert_eq!(out.get(row + p, col + p), mask.get(row, col));
            }
        }
    }

    #[test]
    fn undersized_padding_still_preserves_interior() {
        // With padding below circle_padding(n) the square's corners poke
        // outside the inscribed circle; they must be copied anyway.
        let mask = checker(9);
        let out = expand_to_circle(&mask, 1);
        for row in 0..9 {
            for col in 0..9 {
                assert_eq!(out.get(row + 1, col + 1), mask.get(row, col));
            }
        }
    }

    #[test]
    #[should_panic(expected = "square mask")]
    fn non_square_mask_is_rejected() {
        let mask = Mask::from_rows(&[
            vec![true, false, true],
            vec![false, true, false],
        ])
        .unwrap();
        expand_to_circle(&mask, 2);
    }

    #[test]
    fn corners_outside_the_circle_are_empty() {
        let out = expand_to_circle(&checker(9), circle_padding(9));
        let side = out.rows();
        assert!(!out.get(0, 0));
        assert!(!out.get(0, side - 1));
        assert!(!out.get(side - 1, 0));
        assert!(!out.get(side - 1, side - 1));
    }

    #[test]
    fn ring_carries_texture() {
        let out = expand_to_circle(&checker(9), circle_padding(9));
        let side = out.rows();
        let p = circle_padding(9);
        let mut ring_dark = 0usize;
        for row in 0..side {
            for col in 0..side {
                let in_square =
                    (p..p + 9).contains(&row) && (p..p + 9).contains(&col);
                if !in_square && out.get(row, col) {
                    ring_dark += 1;
                }
            }
        }
        assert!(ring_dark > 0);
    }

    #[test]
    fn expansion_is_deterministic() {
        let mask = checker(11);
        let p = circle_padding(11);
        let a = expand_to_circle(&mask, p);
        let b = expand_to_circle(&mask, p);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_padding_is_identity() {
        let mask = checker(5);
        assert_eq!(expand_to_circle(&mask, 0), mask);
    }
}
