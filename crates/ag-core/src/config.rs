use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::color::{Channels, LumaWeights, NO_FONT_COLOR};
use crate::error::CoreError;

/// Configuration complète d'une conversion.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use ag_core::config::ConvertConfig;
/// let config = ConvertConfig::default();
/// assert_eq!(config.braille_threshold, 128);
/// assert!(config.font_override().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ConvertConfig {
    // === Mode de rendu ===
    /// "Ascii" | "Braille"
    pub render_mode: RenderMode,
    /// Inverser couleurs, index de palette et sens du seuil Braille.
    pub negative: bool,
    /// Use the sample's RGB instead of its grayscale triple.
    pub colored: bool,
    /// Grayscale output: color-formatting errors abort even without `colored`.
    pub grayscale: bool,
    /// 70-level palette instead of the 10-level one.
    pub complex: bool,
    /// Background escapes instead of foreground ones.
    pub color_bg: bool,
    /// Custom palette (lightest→densest). Overrides the built-ins when non-empty.
    pub custom_palette: String,
    /// Solid glyph color. `[255, 255, 255]` means no override.
    pub font_color: Channels,

    // === Braille ===
    /// Depth threshold for lighting a dot.
    pub braille_threshold: u8,

    // === Contours ===
    /// Overlay Sobel direction glyphs.
    pub edge_detect: bool,
    /// Gradient magnitude below which a cell keeps its glyph.
    pub edge_threshold: f64,
    /// Gradient magnitude formula.
    pub gradient: GradientPolicy,
    /// Luminance weights for the edge pass.
    pub luma: LumaWeights,
}

/// Render mode enumeration.
///
/// # Example
/// ```
/// use ag_core::config::RenderMode;
/// let mode = RenderMode::default();
/// assert!(matches!(mode, RenderMode::Ascii));
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum RenderMode {
    /// Density palette, one glyph per sample.
    #[default]
    Ascii,
    /// Braille Unicode patterns (2×4 samples per glyph).
    Braille,
}

/// How the Sobel pass combines `gx` and `gy` into one magnitude.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum GradientPolicy {
    /// `sqrt(gx² + gy²)`.
    #[default]
    Euclidean,
    /// `sqrt(((gy ^ 2) + gx) ^ 2)` with `^` as bitwise XOR, as earlier
    /// releases computed it.
    LegacyXor,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            render_mode: RenderMode::Ascii,
            negative: false,
            colored: false,
            grayscale: false,
            complex: false,
            color_bg: false,
            custom_palette: String::new(),
            font_color: NO_FONT_COLOR,
            braille_threshold: 128,
            edge_detect: false,
            edge_threshold: 100.0,
            gradient: GradientPolicy::Euclidean,
            luma: LumaWeights::Rec709,
        }
    }
}

impl ConvertConfig {
    /// Font color override, `None` for the white sentinel.
    #[must_use]
    pub fn font_override(&self) -> Option<Channels> {
        (self.font_color != NO_FONT_COLOR).then_some(self.font_color)
    }

    /// Whether color-formatting failures on sample colors abort the conversion.
    #[inline(always)]
    #[must_use]
    pub fn strict_color(&self) -> bool {
        self.colored || self.grayscale
    }

    /// Clamp numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        if self.edge_threshold.is_finite() {
            self.edge_threshold = self.edge_threshold.max(0.0);
        }
    }

    /// Reject values that no clamp can repair.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] for a non-finite edge threshold.
    ///
    /// # Example
    /// ```
    /// use ag_core::config::ConvertConfig;
    /// let mut config = ConvertConfig::default();
    /// assert!(config.validate().is_ok());
    /// config.edge_threshold = f64::NAN;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.edge_threshold.is_finite() {
            return Err(CoreError::Config(format!(
                "edge_threshold doit être fini, reçu {}",
                self.edge_threshold
            )));
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    convert: Option<ConvertSection>,
}

/// Convert section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct ConvertSection {
    render_mode: Option<RenderMode>,
    negative: Option<bool>,
    colored: Option<bool>,
    grayscale: Option<bool>,
    complex: Option<bool>,
    color_bg: Option<bool>,
    custom_palette: Option<String>,
    font_color: Option<Channels>,
    braille_threshold: Option<u8>,
    edge_detect: Option<bool>,
    edge_threshold: Option<f64>,
    gradient: Option<GradientPolicy>,
    luma: Option<LumaWeights>,
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this schema, or if a
/// value fails [`ConvertConfig::validate`].
///
/// # Example
/// ```
/// use ag_core::config::{parse_config, RenderMode};
/// let config = parse_config("[convert]\nrender_mode = \"Braille\"\nnegative = true\n").unwrap();
/// assert_eq!(config.render_mode, RenderMode::Braille);
/// assert!(config.negative);
/// assert!(!config.colored);
/// ```
pub fn parse_config(content: &str) -> Result<ConvertConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = ConvertConfig::default();

    if let Some(c) = file.convert {
        if let Some(v) = c.render_mode {
            config.render_mode = v;
        }
        if let Some(v) = c.negative {
            config.negative = v;
        }
        if let Some(v) = c.colored {
            config.colored = v;
        }
        if let Some(v) = c.grayscale {
            config.grayscale = v;
        }
        if let Some(v) = c.complex {
            config.complex = v;
        }
        if let Some(v) = c.color_bg {
            config.color_bg = v;
        }
        if let Some(v) = c.custom_palette {
            config.custom_palette = v;
        }
        if let Some(v) = c.font_color {
            config.font_color = v;
        }
        if let Some(v) = c.braille_threshold {
            config.braille_threshold = v;
        }
        if let Some(v) = c.edge_detect {
            config.edge_detect = v;
        }
        if let Some(v) = c.edge_threshold {
            config.edge_threshold = v;
        }
        if let Some(v) = c.gradient {
            config.gradient = v;
        }
        if let Some(v) = c.luma {
            config.luma = v;
        }
    } else {
        log::debug!("Pas de section [convert], valeurs par défaut.");
    }

    config.clamp_all();
    config.validate()?;
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use ag_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ConvertConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;

    parse_config(&content).with_context(|| format!("Configuration invalide dans {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_section_keeps_defaults() {
        let config = parse_config("[convert]\ncomplex = true\n").unwrap();
        assert!(config.complex);
        assert_eq!(config.braille_threshold, 128);
        assert_eq!(config.font_color, NO_FONT_COLOR);
        assert_eq!(config.gradient, GradientPolicy::Euclidean);
    }

    #[test]
    fn missing_section_is_default() {
        assert_eq!(parse_config("").unwrap(), ConvertConfig::default());
    }

    #[test]
    fn shipped_default_file_matches_defaults() {
        let shipped = include_str!("../../../config/default.toml");
        assert_eq!(parse_config(shipped).unwrap(), ConvertConfig::default());
    }

    #[test]
    fn policies_deserialize_by_name() {
        let config =
            parse_config("[convert]\ngradient = \"LegacyXor\"\nluma = \"Rec601\"\n").unwrap();
        assert_eq!(config.gradient, GradientPolicy::LegacyXor);
        assert_eq!(config.luma, LumaWeights::Rec601);
    }

    #[test]
    fn out_of_range_threshold_is_rejected_by_toml() {
        assert!(parse_config("[convert]\nbraille_threshold = 300\n").is_err());
    }

    #[test]
    fn negative_edge_threshold_is_clamped() {
        let config = parse_config("[convert]\nedge_threshold = -5.0\n").unwrap();
        assert!(config.edge_threshold.abs() < f64::EPSILON);
    }

    #[test]
    fn font_color_sentinel() {
        let mut config = ConvertConfig::default();
        assert!(config.font_override().is_none());
        config.font_color = [255, 0, 0];
        assert_eq!(config.font_override(), Some([255, 0, 0]));
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[convert]\nfont_color = [10, 20, 30]\nedge_detect = true").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.font_color, [10, 20, 30]);
        assert!(config.edge_detect);
    }

    #[test]
    fn load_config_missing_file_errors() {
        let err = load_config(Path::new("/nonexistent/asciigrid.toml")).unwrap_err();
        assert!(err.to_string().contains("Impossible de lire"));
    }
}
