//! # quirl
//!
//! Region outlining and contour path generation for stylized QR rendering.
//!
//! The pipeline turns a boolean module grid (supplied by an external QR
//! encoder) into SVG path data where adjacent modules merge into smooth
//! contiguous shapes:
//!
//! 1. [`mask`] builds the foreground grid, filtering reserved finder zones
//!    and an optional logo window.
//! 2. [`expand`] optionally grows the grid into a circular canvas.
//! 3. [`label`] groups foreground cells into 4-connected components and
//!    background cells into 8-connected components.
//! 4. [`trace`] walks each component boundary as a closed loop of
//!    orthogonal direction transitions.
//! 5. [`style`] converts transitions into straight/arc path primitives for
//!    the selected dot style.
//! 6. [`holes`] folds fully-enclosed background components back into their
//!    owning foreground path under an even-odd fill rule.
//!
//! Everything is a pure computation over in-memory grids: no I/O, no
//! rendering backends, no shared state between invocations. The
//! presentation layer (document assembly, rasterization) lives in the CLI
//! crate.

pub mod expand;
pub mod holes;
pub mod label;
pub mod mask;
pub mod path;
pub mod render;
pub mod style;
pub mod trace;

// Re-export common types at crate root for convenience.
pub use expand::{circle_padding, expand_to_circle};
pub use holes::assign_holes;
pub use label::{BORDER_ID, LabelMap, Labeled, Region, label_background, label_foreground};
pub use mask::{LogoBox, Mask, MaskError, MaskOptions, Symbol};
pub use path::{FillRule, PathData};
pub use render::{Shape, draw_shapes};
pub use style::{DotStyle, Drawer, StyleError};
pub use trace::{Direction, trace_region};
