//! Connected-component labeling over the module mask.
//!
//! A single top-to-bottom, left-to-right raster pass assigns provisional
//! component ids while recording equivalences between ids that turn out to
//! name the same region; a resolution pass then rewrites every cell to the
//! minimum id in its equivalence class. Foreground cells are grouped with
//! 4-connectivity, background cells with 8-connectivity.
//!
//! The background pass also carries a synthetic border component: every
//! background cell on the outer edge of the grid is unioned with
//! [`BORDER_ID`], so the "outside" is always one component and never a
//! candidate hole.

use crate::mask::Mask;

/// Canonical id of the synthetic outer-border component in the
/// background pass. Never assigned to a foreground component.
pub const BORDER_ID: u32 = 1;

/// Neighborhood used when grouping cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    /// Edge-adjacent neighbors only (foreground pass).
    Four,
    /// Edge- and corner-adjacent neighbors (background pass).
    Eight,
}

/// A labeled grid: each cell holds 0 (not part of this pass) or a
/// canonical component id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    rows: usize,
    cols: usize,
    cells: Vec<u32>,
}

impl LabelMap {
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Component id at `(row, col)`, or 0 for unlabeled cells.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.cells[row * self.cols + col]
    }

    /// Whether the (possibly out-of-bounds) cell belongs to `id`.
    ///
    /// Signed coordinates let boundary walks probe past the grid edge
    /// without wrapping.
    #[inline]
    pub fn is_region(&self, row: isize, col: isize, id: u32) -> bool {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return false;
        }
        self.get(row as usize, col as usize) == id
    }
}

/// One resolved component: its canonical id and the first cell holding it
/// in raster order. The start cell anchors contour tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub id: u32,
    pub start: (usize, usize),
}

/// Result of one labeling pass.
#[derive(Debug, Clone)]
pub struct Labeled {
    pub map: LabelMap,
    /// Regions in raster order of their start cells.
    pub regions: Vec<Region>,
}

/// Disjoint-set over component ids with path compression.
///
/// Unions always root the smaller id, so the representative of a class is
/// its minimum member - which keeps final ids deterministic.
struct DisjointSet {
    parent: Vec<u32>,
}

impl DisjointSet {
    fn new() -> Self {
        // Index 0 is unused; ids start at 1.
        Self { parent: vec![0] }
    }

    fn alloc(&mut self) -> u32 {
        let id = self.parent.len() as u32;
        self.parent.push(id);
        id
    }

    fn find(&mut self, id: u32) -> u32 {
        let mut root = id;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        // Path compression.
        let mut cur = id;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        let (min, max) = if ra < rb { (ra, rb) } else { (rb, ra) };
        self.parent[max as usize] = min;
    }
}

/// Label 4-connected foreground components. Ids start at 1.
pub fn label_foreground(mask: &Mask) -> Labeled {
    label_cells(mask, true, Connectivity::Four, false)
}

/// Label 8-connected background components, merging everything that
/// touches the grid edge into the synthetic [`BORDER_ID`] component.
pub fn label_background(mask: &Mask) -> Labeled {
    label_cells(mask, false, Connectivity::Eight, true)
}

fn label_cells(mask: &Mask, polarity: bool, conn: Connectivity, with_border: bool) -> Labeled {
    let rows = mask.rows();
    let cols = mask.cols();
    let mut ds = DisjointSet::new();
    if with_border {
        let border = ds.alloc();
        debug_assert_eq!(border, BORDER_ID);
    }

    let mut cells = vec![0u32; rows * cols];
    let mut neighbors: Vec<u32> = Vec::with_capacity(5);

    for row in 0..rows {
        for col in 0..cols {
            if mask.get(row, col) != polarity {
                continue;
            }

            neighbors.clear();
            let mut push = |id: u32| {
                if id != 0 {
                    neighbors.push(id);
                }
            };
            if col > 0 {
                push(cells[row * cols + col - 1]);
            }
            if row > 0 {
                push(cells[(row - 1) * cols + col]);
                if conn == Connectivity::Eight {
                    if col > 0 {
                        push(cells[(row - 1) * cols + col - 1]);
                    }
                    if col + 1 < cols {
                        push(cells[(row - 1) * cols + col + 1]);
                    }
                }
            }
            if with_border && (row == 0 || col == 0 || row == rows - 1 || col == cols - 1) {
                push(BORDER_ID);
            }

            let id = match neighbors.iter().copied().min() {
                None => ds.alloc(),
                Some(min) => {
                    for &other in &neighbors {
                        if other != min {
                            ds.union(min, other);
                        }
                    }
                    min
                }
            };
            cells[row * cols + col] = id;
        }
    }

    // Resolution pass: canonicalize every cell and record each component's
    // first raster coordinate.
    let mut regions: Vec<Region> = Vec::new();
    let mut seen: Vec<bool> = vec![false; ds.parent.len()];
    for row in 0..rows {
        for col in 0..cols {
            let id = cells[row * cols + col];
            if id == 0 {
                continue;
            }
            let canonical = ds.find(id);
            cells[row * cols + col] = canonical;
            if !seen[canonical as usize] {
                seen[canonical as usize] = true;
                regions.push(Region {
                    id: canonical,
                    start: (row, col),
                });
            }
        }
    }

    Labeled {
        map: LabelMap { rows, cols, cells },
        regions,
    }
}

// ============================================================================
// TESTS
// ============================================================================
