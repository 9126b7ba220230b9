//! Common utilities shared across CLI commands.

use chrono::Local;
use image::{DynamicImage, RgbaImage};
use resvg::usvg;
use tiny_skia::Pixmap;

/// Output format for the render command.
#[derive(Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

/// Rasterize an SVG document to a pixmap of the given size, scaled to fit.
pub fn render_pixmap(svg: &str, width: u32, height: u32) -> Result<Pixmap, String> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options)
        .map_err(|e| format!("failed to parse generated SVG: {}", e))?;

    let mut pixmap =
        Pixmap::new(width, height).ok_or_else(|| "failed to create pixmap".to_string())?;

    let tree_size = tree.size();
    let scale = (width as f32 / tree_size.width()).min(height as f32 / tree_size.height());
    let tx = (width as f32 - tree_size.width() * scale) / 2.0;
    let ty = (height as f32 - tree_size.height() * scale) / 2.0;
    let transform = tiny_skia::Transform::from_scale(scale, scale).post_translate(tx, ty);

    resvg::render(&tree, transform, &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Convert a rendered pixmap to an `image` buffer for terminal display.
pub fn pixmap_to_image(pixmap: Pixmap) -> Result<DynamicImage, String> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let rgba = RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| "failed to convert pixmap".to_string())?;
    Ok(DynamicImage::ImageRgba8(rgba))
}

/// Timestamped default output filename, e.g. `quirl-20260828-142501.png`.
pub fn default_output_name(extension: &str) -> String {
    format!(
        "quirl-{}.{}",
        Local::now().format("%Y%m%d-%H%M%S"),
        extension
    )
}
