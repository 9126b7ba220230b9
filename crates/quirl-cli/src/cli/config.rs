//! Declarative render configuration.
//!
//! Configs are YAML (or JSON) files covering everything the `render`
//! flags cover, so a look can be versioned and reused. Flags given on the
//! command line override the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A complete render configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Payload to encode (flags may override).
    #[serde(default)]
    pub data: Option<String>,

    /// Dot style name (see `quirl styles`).
    #[serde(default = "default_style")]
    pub style: String,

    /// Module size in user units.
    #[serde(default = "default_module_size")]
    pub module_size: f64,

    /// Quiet-zone margin around the symbol, in user units.
    #[serde(default = "default_margin")]
    pub margin: f64,

    /// Expand the canvas to a circle with a textured ring.
    #[serde(default)]
    pub circle: bool,

    /// Error-correction level: L, M, Q or H.
    #[serde(default = "default_ec_level")]
    pub ec_level: String,

    /// Foreground fill color.
    #[serde(default = "default_foreground")]
    pub foreground: String,

    /// Background plate color; `null` for transparent.
    #[serde(default = "default_background")]
    pub background: Option<String>,

    /// Optional two-stop linear gradient; replaces the flat foreground.
    #[serde(default)]
    pub gradient: Option<GradientConfig>,

    /// Optional embedded center logo.
    #[serde(default)]
    pub logo: Option<LogoConfig>,
}

/// A two-stop linear gradient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientConfig {
    pub from: String,
    pub to: String,

    /// Rotation in degrees around the symbol center.
    #[serde(default)]
    pub rotation: f64,
}

/// An embedded logo: an image reference plus the centered module window
/// cleared for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoConfig {
    /// Image href copied into the SVG output.
    pub path: String,

    /// Cleared window width in modules.
    #[serde(default = "default_logo_modules")]
    pub width: usize,

    /// Cleared window height in modules.
    #[serde(default = "default_logo_modules")]
    pub height: usize,
}

fn default_style() -> String {
    "square".to_string()
}

fn default_module_size() -> f64 {
    10.0
}

fn default_margin() -> f64 {
    40.0
}

fn default_ec_level() -> String {
    "M".to_string()
}

fn default_foreground() -> String {
    "#000000".to_string()
}

fn default_background() -> Option<String> {
    Some("#ffffff".to_string())
}

fn default_logo_modules() -> usize {
    5
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            data: None,
            style: default_style(),
            module_size: default_module_size(),
            margin: default_margin(),
            circle: false,
            ec_level: default_ec_level(),
            foreground: default_foreground(),
            background: default_background(),
            gradient: None,
            logo: None,
        }
    }
}

impl RenderConfig {
    /// Load a config from a YAML or JSON file, chosen by extension.
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            serde_json::from_str(&text)
                .map_err(|e| format!("failed to parse {}: {}", path.display(), e))
        } else {
            serde_yaml::from_str(&text)
                .map_err(|e| format!("failed to parse {}: {}", path.display(), e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_yaml_fills_defaults() {
        let config: RenderConfig = serde_yaml::from_str("data: HELLO\n").unwrap();
        assert_eq!(config.data.as_deref(), Some("HELLO"));
        assert_eq!(config.style, "square");
        assert_eq!(config.module_size, 10.0);
        assert_eq!(config.ec_level, "M");
        assert!(config.background.is_some());
        assert!(config.gradient.is_none());
    }

    #[test]
    fn gradient_and_logo_parse() {
        let yaml = "
data: HELLO
style: rounded
circle: true
gradient:
  from: \"#102030\"
  to: \"#405060\"
  rotation: 45
logo:
  path: logo.png
  width: 7
";
        let config: RenderConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.circle);
        let gradient = config.gradient.unwrap();
        assert_eq!(gradient.from, "#102030");
        assert_eq!(gradient.rotation, 45.0);
        let logo = config.logo.unwrap();
        assert_eq!(logo.width, 7);
        assert_eq!(logo.height, 5);
    }

    #[test]
    fn json_config_round_trips() {
        let config = RenderConfig {
            data: Some("x".to_string()),
            style: "classy".to_string(),
            ..RenderConfig::default()
        };
        let text = serde_json::to_string(&config).unwrap();
        let back: RenderConfig = serde_json::from_str(&text).unwrap();
        assert_eq!(back.style, "classy");
        assert_eq!(back.data.as_deref(), Some("x"));
    }
}
