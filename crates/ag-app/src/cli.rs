use std::path::PathBuf;

use ag_core::color::Channels;
use ag_core::config::{ConvertConfig, GradientPolicy, RenderMode};
use clap::Parser;

/// asciigrid : rendu d'images en caractères pour le terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image à convertir (PNG, JPEG, BMP, GIF).
    pub image: PathBuf,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Largeur en caractères.
    #[arg(short = 'W', long)]
    pub width: Option<u32>,

    /// Hauteur en caractères.
    #[arg(short = 'H', long)]
    pub height: Option<u32>,

    /// Braille dot patterns instead of density glyphs.
    #[arg(short, long, default_value_t = false)]
    pub braille: bool,

    /// Inverser couleurs et densités.
    #[arg(short, long, default_value_t = false)]
    pub negative: bool,

    /// Keep the image's colors.
    #[arg(long, default_value_t = false)]
    pub color: bool,

    /// Grayscale escapes.
    #[arg(short, long, default_value_t = false)]
    pub grayscale: bool,

    /// Palette détaillée (70 niveaux).
    #[arg(long, default_value_t = false)]
    pub complex: bool,

    /// Paint backgrounds instead of glyphs.
    #[arg(long, default_value_t = false)]
    pub color_bg: bool,

    /// Custom palette, lightest to densest.
    #[arg(short, long)]
    pub map: Option<String>,

    /// Couleur unique des glyphes : "r,g,b".
    #[arg(long, value_parser = parse_rgb)]
    pub font_color: Option<Channels>,

    /// Braille dot threshold [0, 255].
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Superposer les glyphes de contours (Sobel).
    #[arg(short, long, default_value_t = false)]
    pub edges: bool,

    /// Gradient magnitude needed for an edge glyph.
    #[arg(long)]
    pub edge_threshold: Option<f64>,

    /// Legacy XOR gradient formula.
    #[arg(long, default_value_t = false)]
    pub legacy_gradient: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply the command-line flags on top of `config`.
    ///
    /// Boolean flags only switch features on; options replace the file's value.
    pub fn apply_overrides(&self, config: &mut ConvertConfig) {
        if self.braille {
            config.render_mode = RenderMode::Braille;
        }
        config.negative |= self.negative;
        config.colored |= self.color;
        config.grayscale |= self.grayscale;
        config.complex |= self.complex;
        config.color_bg |= self.color_bg;
        config.edge_detect |= self.edges;
        if let Some(ref map) = self.map {
            config.custom_palette.clone_from(map);
        }
        if let Some(rgb) = self.font_color {
            config.font_color = rgb;
        }
        if let Some(t) = self.threshold {
            config.braille_threshold = t;
        }
        if let Some(t) = self.edge_threshold {
            config.edge_threshold = t;
        }
        if self.legacy_gradient {
            config.gradient = GradientPolicy::LegacyXor;
        }
    }
}

/// Parse "r,g,b". Channels are not range-checked here: the formatter rejects
/// out-of-range values when it paints.
fn parse_rgb(s: &str) -> Result<Channels, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [r, g, b] = parts.as_slice() else {
        return Err(format!("attendu \"r,g,b\", reçu \"{s}\""));
    };
    let channel = |v: &str| v.parse::<i32>().map_err(|e| format!("canal \"{v}\" : {e}"));
    Ok([channel(*r)?, channel(*g)?, channel(*b)?])
}
