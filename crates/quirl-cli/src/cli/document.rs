//! SVG document assembly.
//!
//! The core produces bare path data; this module wraps it in a complete
//! SVG document with the background plate, optional gradient fill, the
//! three styled finder ornaments, and an optional center logo image.

use quirl::mask::{CORNER_DOT_OFFSET, CORNER_DOT_SIZE, FINDER_SIZE};
use quirl::{DotStyle, FillRule, Mask, PathData, Shape};

use super::config::RenderConfig;

const GRADIENT_ID: &str = "quirl-gradient";

/// Assemble the final SVG document.
///
/// `symbol_modules` is the side length of the encoded symbol and
/// `padding` the circular-expansion padding in modules (0 for a square
/// canvas); together they place the finder ornaments over the reserved
/// corners.
pub fn svg_document(
    config: &RenderConfig,
    style: DotStyle,
    mask: &Mask,
    shapes: &[Shape],
    symbol_modules: usize,
    padding: usize,
) -> String {
    let s = config.module_size;
    let grid_w = mask.cols() as f64 * s;
    let grid_h = mask.rows() as f64 * s;
    let width = grid_w + 2.0 * config.margin;
    let height = grid_h + 2.0 * config.margin;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
"#,
        width, height, width, height
    ));

    if let Some(gradient) = &config.gradient {
        svg.push_str(&format!(
            r#"<defs>
<linearGradient id="{}" gradientTransform="rotate({} 0.5 0.5)">
<stop offset="0" stop-color="{}"/>
<stop offset="1" stop-color="{}"/>
</linearGradient>
</defs>
"#,
            GRADIENT_ID, gradient.rotation, gradient.from, gradient.to
        ));
    }

    if let Some(background) = &config.background {
        if config.circle {
            svg.push_str(&format!(
                "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>\n",
                width / 2.0,
                height / 2.0,
                width / 2.0,
                background
            ));
        } else {
            svg.push_str(&format!(
                "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
                background
            ));
        }
    }

    let fill = if config.gradient.is_some() {
        format!("url(#{})", GRADIENT_ID)
    } else {
        config.foreground.clone()
    };
    svg.push_str(&format!(
        "<g transform=\"translate({}, {})\" fill=\"{}\">\n",
        config.margin, config.margin, fill
    ));

    for shape in shapes {
        if shape.fill_rule == FillRule::EvenOdd {
            svg.push_str(&format!(
                "  <path fill-rule=\"evenodd\" d=\"{}\"/>\n",
                shape.path
            ));
        } else {
            svg.push_str(&format!("  <path d=\"{}\"/>\n", shape.path));
        }
    }

    for path in finder_ornaments(style, symbol_modules, padding, s) {
        svg.push_str(&format!(
            "  <path fill-rule=\"evenodd\" d=\"{}\"/>\n",
            path
        ));
    }

    svg.push_str("</g>\n");

    if let Some(logo) = &config.logo {
        let logo_w = logo.width as f64 * s;
        let logo_h = logo.height as f64 * s;
        svg.push_str(&format!(
            "<image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\"/>\n",
            logo.path,
            config.margin + (grid_w - logo_w) / 2.0,
            config.margin + (grid_h - logo_h) / 2.0,
            logo_w,
            logo_h
        ));
    }

    svg.push_str("</svg>\n");
    svg
}

/// One ring-plus-dot ornament path per reserved finder corner.
fn finder_ornaments(
    style: DotStyle,
    symbol_modules: usize,
    padding: usize,
    s: f64,
) -> Vec<PathData> {
    let n = symbol_modules;
    if n < FINDER_SIZE {
        return Vec::new();
    }
    let anchors = [(0, 0), (0, n - FINDER_SIZE), (n - FINDER_SIZE, 0)];
    anchors
        .iter()
        .map(|&(row, col)| {
            let x = (col + padding) as f64 * s;
            let y = (row + padding) as f64 * s;
            let mut path = PathData::new();
            ornament_ring(&mut path, style, x, y, s);
            ornament_dot(&mut path, style, x, y, s);
            path
        })
        .collect()
}

/// The 7x7 outline with its 5x5 cutout, styled to match the modules.
fn ornament_ring(path: &mut PathData, style: DotStyle, x: f64, y: f64, s: f64) {
    let outer = FINDER_SIZE as f64 * s;
    let inner = outer - 2.0 * s;
    match style {
        DotStyle::Square | DotStyle::Classy => {
            rounded_rect(path, x, y, outer, outer, 0.0);
            rounded_rect(path, x + s, y + s, inner, inner, 0.0);
        }
        DotStyle::Rounded | DotStyle::ClassyRounded => {
            rounded_rect(path, x, y, outer, outer, s);
            rounded_rect(path, x + s, y + s, inner, inner, s / 2.0);
        }
        DotStyle::ExtraRounded => {
            rounded_rect(path, x, y, outer, outer, 2.0 * s);
            rounded_rect(path, x + s, y + s, inner, inner, s);
        }
        DotStyle::Dots => {
            circle(path, x + outer / 2.0, y + outer / 2.0, outer / 2.0);
            circle(path, x + outer / 2.0, y + outer / 2.0, inner / 2.0);
        }
    }
}

/// The solid 3x3 center of a finder.
fn ornament_dot(path: &mut PathData, style: DotStyle, x: f64, y: f64, s: f64) {
    let size = CORNER_DOT_SIZE as f64 * s;
    let offset = CORNER_DOT_OFFSET as f64 * s;
    let (x, y) = (x + offset, y + offset);
    match style {
        DotStyle::Square | DotStyle::Classy => rounded_rect(path, x, y, size, size, 0.0),
        DotStyle::Rounded | DotStyle::ClassyRounded => {
            rounded_rect(path, x, y, size, size, s / 2.0)
        }
        DotStyle::ExtraRounded => rounded_rect(path, x, y, size, size, s),
        DotStyle::Dots => circle(path, x + size / 2.0, y + size / 2.0, size / 2.0),
    }
}

/// Clockwise rectangle subpath with optional corner radius.
fn rounded_rect(path: &mut PathData, x: f64, y: f64, w: f64, h: f64, r: f64) {
    if r <= 0.0 {
        path.move_to(x, y);
        path.h_line(w);
        path.v_line(h);
        path.h_line(-w);
        path.close();
        return;
    }
    path.move_to(x + r, y);
    path.h_line(w - 2.0 * r);
    path.arc(r, r, true, r, r);
    path.v_line(h - 2.0 * r);
    path.arc(r, r, true, -r, r);
    path.h_line(-(w - 2.0 * r));
    path.arc(r, r, true, -r, -r);
    path.v_line(-(h - 2.0 * r));
    path.arc(r, r, true, r, -r);
    path.close();
}

/// Clockwise circle subpath as two half arcs.
fn circle(path: &mut PathData, cx: f64, cy: f64, r: f64) {
    path.move_to(cx - r, cy);
    path.arc(r, r, true, 2.0 * r, 0.0);
    path.arc(r, r, true, -2.0 * r, 0.0);
    path.close();
}
