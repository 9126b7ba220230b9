//! Render command implementation.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use quirl::{
    DotStyle, FillRule, LogoBox, Mask, MaskOptions, circle_padding, draw_shapes, expand_to_circle,
};

use super::common::{OutputFormat, default_output_name, render_pixmap};
use super::config::{GradientConfig, RenderConfig};
use super::document::svg_document;
use super::encode::{encode_payload, parse_ec_level};

/// One shape in JSON output format.
#[derive(Serialize)]
struct JsonShape {
    d: String,
    fill_rule: String,
}

/// JSON output: document metrics plus the raw path data.
#[derive(Serialize)]
struct JsonOutput {
    width: f64,
    height: f64,
    modules: usize,
    module_size: f64,
    style: String,
    shapes: Vec<JsonShape>,
}

/// Parse a `from:to[:rotation]` gradient argument.
fn parse_gradient(value: &str) -> Result<GradientConfig, String> {
    let parts: Vec<&str> = value.split(':').collect();
    match parts.as_slice() {
        [from, to] => Ok(GradientConfig {
            from: from.to_string(),
            to: to.to_string(),
            rotation: 0.0,
        }),
        [from, to, rotation] => Ok(GradientConfig {
            from: from.to_string(),
            to: to.to_string(),
            rotation: rotation
                .parse()
                .map_err(|_| format!("invalid gradient rotation: {}", rotation))?,
        }),
        _ => Err(format!(
            "invalid gradient: {}. Use from:to or from:to:rotation.",
            value
        )),
    }
}

/// Execute the render command.
pub fn cmd_render(args: &[String]) {
    // A config file, if any, seeds the options; flags override it.
    let mut config = RenderConfig::default();
    let mut i = 0;
    while i < args.len() {
        if args[i] == "-c" || args[i] == "--config" {
            i += 1;
            if i < args.len() {
                config = RenderConfig::from_path(Path::new(&args[i])).unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                });
            }
        }
        i += 1;
    }

    let mut output_path: Option<String> = None;
    let mut format = OutputFormat::Svg;
    let mut data: Option<String> = config.data.clone();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--config" => {
                i += 1; // handled above
            }
            "-s" | "--style" => {
                i += 1;
                if i < args.len() {
                    config.style = args[i].clone();
                }
            }
            "-m" | "--module-size" => {
                i += 1;
                if i < args.len() {
                    config.module_size = args[i].parse().unwrap_or(config.module_size);
                }
            }
            "--margin" => {
                i += 1;
                if i < args.len() {
                    config.margin = args[i].parse().unwrap_or(config.margin);
                }
            }
            "-e" | "--ec-level" => {
                i += 1;
                if i < args.len() {
                    config.ec_level = args[i].clone();
                }
            }
            "-o" | "--output" => {
                i += 1;
                if i < args.len() {
                    output_path = Some(args[i].clone());
                }
            }
            "-f" | "--format" => {
                i += 1;
                if i < args.len() {
                    format = match args[i].to_lowercase().as_str() {
                        "svg" => OutputFormat::Svg,
                        "png" => OutputFormat::Png,
                        "json" => OutputFormat::Json,
                        other => {
                            eprintln!("Unknown format: {}. Use 'svg', 'png' or 'json'.", other);
                            std::process::exit(1);
                        }
                    };
                }
            }
            "--circle" => {
                config.circle = true;
            }
            "--fg" => {
                i += 1;
                if i < args.len() {
                    config.foreground = args[i].clone();
                }
            }
            "--bg" => {
                i += 1;
                if i < args.len() {
                    config.background = Some(args[i].clone());
                }
            }
            "--no-background" => {
                config.background = None;
            }
            "--gradient" => {
                i += 1;
                if i < args.len() {
                    config.gradient = Some(parse_gradient(&args[i]).unwrap_or_else(|e| {
                        eprintln!("Error: {}", e);
                        std::process::exit(1);
                    }));
                }
            }
            other if !other.starts_with('-') => {
                data = Some(other.to_string());
            }
            other => {
                eprintln!("Unknown option: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(data) = data else {
        eprintln!("Usage: quirl render <text> [options]");
        eprintln!("No payload given (positional argument or 'data' in a config file).");
        std::process::exit(1);
    };

    let style: DotStyle = config.style.parse().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let ec_level = parse_ec_level(&config.ec_level).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let symbol = encode_payload(&data, ec_level).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let options = MaskOptions {
        reserve_finders: true,
        logo: config.logo.as_ref().map(|logo| LogoBox {
            width: logo.width,
            height: logo.height,
        }),
    };
    let mask = Mask::from_symbol(&symbol, &options).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let symbol_modules = mask.rows();
    let (mask, padding) = if config.circle {
        let padding = circle_padding(symbol_modules);
        (expand_to_circle(&mask, padding), padding)
    } else {
        (mask, 0)
    };

    let shapes = draw_shapes(&mask, style, config.module_size);
    let svg = svg_document(&config, style, &mask, &shapes, symbol_modules, padding);

    match format {
        OutputFormat::Svg => write_text(output_path.as_deref(), &svg),
        OutputFormat::Json => {
            let width = mask.cols() as f64 * config.module_size + 2.0 * config.margin;
            let height = mask.rows() as f64 * config.module_size + 2.0 * config.margin;
            let output = JsonOutput {
                width,
                height,
                modules: mask.cols(),
                module_size: config.module_size,
                style: style.name().to_string(),
                shapes: shapes
                    .iter()
                    .map(|shape| JsonShape {
                        d: shape.path.to_string(),
                        fill_rule: match shape.fill_rule {
                            FillRule::NonZero => "nonzero".to_string(),
                            FillRule::EvenOdd => "evenodd".to_string(),
                        },
                    })
                    .collect(),
            };
            let json = serde_json::to_string_pretty(&output).unwrap_or_else(|e| {
                eprintln!("Error: failed to serialize JSON: {}", e);
                std::process::exit(1);
            });
            write_text(output_path.as_deref(), &json);
        }
        OutputFormat::Png => {
            let width = (mask.cols() as f64 * config.module_size + 2.0 * config.margin) as u32;
            let height = (mask.rows() as f64 * config.module_size + 2.0 * config.margin) as u32;
            let pixmap = render_pixmap(&svg, width.max(1), height.max(1)).unwrap_or_else(|e| {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            });
            let png = pixmap.encode_png().unwrap_or_else(|e| {
                eprintln!("Error: failed to encode PNG: {}", e);
                std::process::exit(1);
            });
            let path = output_path.unwrap_or_else(|| default_output_name("png"));
            fs::write(&path, png).unwrap_or_else(|e| {
                eprintln!("Error: failed to write {}: {}", path, e);
                std::process::exit(1);
            });
            eprintln!("Wrote {}", path);
        }
    }
}

/// Write text output to a file, or to stdout for `None` / `-`.
fn write_text(path: Option<&str>, text: &str) {
    match path {
        None | Some("-") => {
            let mut stdout = io::stdout();
            let _ = stdout.write_all(text.as_bytes());
            let _ = stdout.write_all(b"\n");
        }
        Some(path) => {
            fs::write(path, text).unwrap_or_else(|e| {
                eprintln!("Error: failed to write {}: {}", path, e);
                std::process::exit(1);
            });
            eprintln!("Wrote {}", path);
        }
    }
}
