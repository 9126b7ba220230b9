//! CLI command implementations.
//!
//! This module contains the implementations for the CLI subcommands:
//! - `render` - Encode a payload and emit a stylized QR as SVG/PNG/JSON
//! - `styles` - List available dot styles
//!
//! The interactive `preview` TUI lives in `main.rs` alongside the
//! terminal plumbing it needs.

pub mod common;
pub mod config;
pub mod document;
pub mod encode;
pub mod render;

pub use common::OutputFormat;
pub use config::RenderConfig;
pub use encode::encode_payload;
pub use render::cmd_render;
