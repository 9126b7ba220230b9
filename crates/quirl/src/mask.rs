//! Dot-mask construction from an encoded QR symbol.
//!
//! The mask is the boolean foreground grid the rest of the pipeline
//! consumes: `true` cells are dark modules that survive the reserved-region
//! filters. Finder zones are excluded so the presentation layer can draw
//! styled corner ornaments over them; an optional centered window is
//! excluded to leave room for an embedded logo.

use std::fmt;

/// Side length of a finder pattern template, in modules.
pub const FINDER_SIZE: usize = 7;

/// Side length of the corner-dot template inside a finder, in modules.
pub const CORNER_DOT_SIZE: usize = 3;

/// Offset of the corner-dot template from its finder origin, in modules.
pub const CORNER_DOT_OFFSET: usize = 2;

/// Access to an encoded QR symbol, supplied by an external encoder.
///
/// The core never inspects payload bytes or error-correction data; this
/// grid query is the whole input contract.
pub trait Symbol {
    /// Grid side length in modules. Must be at least 1.
    fn module_count(&self) -> usize;

    /// Whether the module at `(row, col)` is dark.
    ///
    /// Both indices are in `0..module_count()`.
    fn is_dark(&self, row: usize, col: usize) -> bool;
}

/// Error type for mask construction.
#[derive(Debug, PartialEq, Eq)]
pub enum MaskError {
    /// The symbol reported a module count of zero.
    EmptySymbol,
    /// Explicit row data had rows of unequal length.
    RaggedRows,
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaskError::EmptySymbol => write!(f, "symbol has zero modules"),
            MaskError::RaggedRows => write!(f, "rows have unequal lengths"),
        }
    }
}

impl std::error::Error for MaskError {}

/// A centered exclusion window for an embedded logo, in module units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoBox {
    pub width: usize,
    pub height: usize,
}

/// Options controlling which symbol modules reach the mask.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskOptions {
    /// Exclude the three 7x7 finder zones so ornaments can replace them.
    pub reserve_finders: bool,
    /// Exclude a centered window for an embedded logo.
    pub logo: Option<LogoBox>,
}

/// A 2D boolean module grid, row-major, origin top-left.
///
/// Square when built from a symbol; possibly larger after circular
/// expansion. Immutable once built for a render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Mask {
    /// Create an all-background mask.
    pub fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Build the foreground mask from an encoded symbol.
    ///
    /// A cell is foreground iff the module is dark and the cell is not
    /// inside any exclusion zone. Pure function of its inputs.
    pub fn from_symbol(symbol: &impl Symbol, options: &MaskOptions) -> Result<Self, MaskError> {
        let n = symbol.module_count();
        if n == 0 {
            return Err(MaskError::EmptySymbol);
        }

        let logo = options.logo.map(|logo| centered_box(n, logo));

        let mut mask = Mask::empty(n, n);
        for row in 0..n {
            for col in 0..n {
                if options.reserve_finders && in_finder_zone(row, col, n) {
                    continue;
                }
                if let Some((top, left, height, width)) = logo {
                    if row >= top && row < top + height && col >= left && col < left + width {
                        continue;
                    }
                }
                if symbol.is_dark(row, col) {
                    mask.set(row, col, true);
                }
            }
        }
        Ok(mask)
    }

    /// Build a mask from explicit row data. Rows must share one length.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, MaskError> {
        if rows.is_empty() {
            return Err(MaskError::EmptySymbol);
        }
        let cols = rows[0].len();
        if cols == 0 || rows.iter().any(|r| r.len() != cols) {
            return Err(MaskError::RaggedRows);
        }
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for row in rows {
            cells.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            cells,
        })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the cell at `(row, col)` is foreground.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub(crate) fn set(&mut self, row: usize, col: usize, value: bool) {
        self.cells[row * self.cols + col] = value;
    }

    /// Number of foreground cells.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }
}

/// Whether `(row, col)` falls inside one of the three finder templates.
///
/// Finders are 7x7 boxes anchored at the top-left, top-right and
/// bottom-left corners of the symbol.
pub fn in_finder_zone(row: usize, col: usize, n: usize) -> bool {
    if n < FINDER_SIZE {
        return false;
    }
    let near_start = |i: usize| i < FINDER_SIZE;
    let near_end = |i: usize| i >= n - FINDER_SIZE;
    (near_start(row) && near_start(col))
        || (near_start(row) && near_end(col))
        || (near_end(row) && near_start(col))
}

/// Resolve a centered logo window to `(top, left, height, width)`, clamped
/// to the grid.
fn centered_box(n: usize, logo: LogoBox) -> (usize, usize, usize, usize) {
    let width = logo.width.min(n);
    let height = logo.height.min(n);
    let left = (n - width) / 2;
    let top = (n - height) / 2;
    (top, left, height, width)
}

// ============================================================================
// TESTS
// ============================================================================
