use ag_core::charset::Palette;
use ag_core::config::{ConvertConfig, RenderMode};
use ag_core::error::CoreError;
use ag_core::frame::{CharGrid, PixelGrid};
use ag_core::traits::ColorFormatter;

/// Compositor orchestre les différents modes de conversion pixel→caractère.
///
/// # Example
/// ```
/// use ag_ascii::compositor::Compositor;
/// use ag_core::config::ConvertConfig;
/// let c = Compositor::new(&ConvertConfig::default());
/// assert_eq!(c.palette().len(), 10);
/// ```
pub struct Compositor {
    palette: Palette,
    current_complex: bool,
    current_custom: String,
}

impl Compositor {
    /// Create a compositor with the palette selected by `config`.
    #[must_use]
    pub fn new(config: &ConvertConfig) -> Self {
        Self {
            palette: Palette::select(config.complex, &config.custom_palette),
            current_complex: config.complex,
            current_custom: config.custom_palette.clone(),
        }
    }

    /// Palette used for density mapping.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Rebuild the palette if the palette settings have changed.
    pub fn update_if_needed(&mut self, config: &ConvertConfig) {
        if self.current_complex != config.complex || self.current_custom != config.custom_palette {
            self.palette = Palette::select(config.complex, &config.custom_palette);
            self.current_complex = config.complex;
            self.current_custom.clone_from(&config.custom_palette);
        }
    }

    /// Convert a pixel grid, dispatching to the density mapper or the Braille
    /// encoder, then overlaying edge glyphs when enabled.
    ///
    /// `pixels` receives the inverted colors in negative mode, see
    /// [`crate::luminance::map_to_chars`].
    ///
    /// # Errors
    /// Returns the formatter's error; no partial grid is produced.
    ///
    /// # Example
    /// ```
    /// use ag_ascii::compositor::Compositor;
    /// use ag_core::config::ConvertConfig;
    /// use ag_core::frame::PixelGrid;
    /// # use ag_core::{color::Channels, error::CoreError, traits::ColorFormatter};
    /// # struct Plain;
    /// # impl ColorFormatter for Plain {
    /// #     fn paint(&self, _: Channels, g: char, _: bool) -> Result<String, CoreError> { Ok(g.to_string()) }
    /// # }
    ///
    /// let config = ConvertConfig::default();
    /// let mut compositor = Compositor::new(&config);
    /// let mut pixels = PixelGrid::from_depths(&[&[0, 255]]);
    /// let grid = compositor.convert(&mut pixels, &config, &Plain).unwrap();
    /// assert_eq!(grid.glyph_rows(), vec![" @".to_string()]);
    /// ```
    pub fn convert(
        &mut self,
        pixels: &mut PixelGrid,
        config: &ConvertConfig,
        formatter: &dyn ColorFormatter,
    ) -> Result<CharGrid, CoreError> {
        self.update_if_needed(config);

        let mut grid = match config.render_mode {
            RenderMode::Ascii => {
                crate::luminance::map_to_chars(pixels, config, &self.palette, formatter)?
            }
            RenderMode::Braille => crate::braille::map_to_braille(
                pixels,
                config,
                config.braille_threshold,
                formatter,
            )?,
        };
        log::debug!(
            "{:?} : {}×{} échantillons → {}×{} cellules",
            config.render_mode,
            pixels.width,
            pixels.height,
            grid.width,
            grid.height
        );

        if config.edge_detect {
            match config.render_mode {
                RenderMode::Ascii => {
                    let overlaid = crate::edge::overlay_edges(
                        &mut grid,
                        pixels,
                        config.edge_threshold,
                        config.gradient,
                        config.luma,
                    );
                    log::debug!("Contours : {overlaid} cellules remplacées");
                }
                RenderMode::Braille => {
                    log::warn!("Détection de contours ignorée en mode Braille.");
                }
            }
        }

        Ok(grid)
    }
}
