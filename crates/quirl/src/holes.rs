//! Hole ownership.
//!
//! Enclosed background components become holes in the dark shape that
//! surrounds them. A background component qualifies only when every dark
//! cell it touches belongs to a single foreground component; pockets that
//! border two or more dark components are dropped rather than guessed at.
//! The synthetic border component is never a hole.

use std::collections::HashMap;

use crate::label::{BORDER_ID, Labeled, Region};

/// Assign enclosed background regions to the foreground region that owns
/// them. Keys are foreground component ids; values are the holes to carve
/// from that component, in raster order.
pub fn assign_holes(foreground: &Labeled, background: &Labeled) -> HashMap<u32, Vec<Region>> {
    let mut holes: HashMap<u32, Vec<Region>> = HashMap::new();
    for region in &background.regions {
        if region.id == BORDER_ID {
            continue;
        }
        if let Some(owner) = sole_neighbor(foreground, background, region.id) {
            holes.entry(owner).or_default().push(*region);
        }
    }
    holes
}

/// The one foreground id orthogonally adjacent to every cell of the given
/// background component, or None if the component touches zero or several.
fn sole_neighbor(foreground: &Labeled, background: &Labeled, id: u32) -> Option<u32> {
    let mut owner: Option<u32> = None;
    for row in 0..background.map.rows() {
        for col in 0..background.map.cols() {
            if background.map.get(row, col) != id {
                continue;
            }
            for (dr, dc) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
                let (nr, nc) = (row as isize + dr, col as isize + dc);
                if nr < 0 || nc < 0 {
                    continue;
                }
                let (nr, nc) = (nr as usize, nc as usize);
                if nr >= foreground.map.rows() || nc >= foreground.map.cols() {
                    continue;
                }
                let fg = foreground.map.get(nr, nc);
                if fg == 0 {
                    continue;
                }
                match owner {
                    None => owner = Some(fg),
                    Some(existing) if existing != fg => return None,
                    Some(_) => {}
                }
            }
        }
    }
    owner
}

// ============================================================================
// TESTS
// ============================================================================
