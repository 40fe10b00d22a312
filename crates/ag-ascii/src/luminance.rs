use ag_core::charset::Palette;
use ag_core::config::ConvertConfig;
use ag_core::error::CoreError;
use ag_core::frame::{CharGrid, PixelGrid};
use ag_core::traits::ColorFormatter;

use crate::recolor;

/// Map every sample to a palette glyph by depth.
///
/// In negative mode the palette index is mirrored and the color inverted.
/// The inverted colors are then written back into `pixels` (the `color`
/// triple in color mode, `gray` otherwise) so a later export of the same
/// grid shows the inversion. The write-back happens only once the whole
/// grid converted: on error `pixels` is left untouched.
///
/// # Errors
/// Returns the formatter's error, see [`recolor::assemble_cell`].
///
/// # Example
/// ```
/// use ag_ascii::luminance::map_to_chars;
/// use ag_core::charset::Palette;
/// use ag_core::config::ConvertConfig;
/// use ag_core::frame::PixelGrid;
/// # use ag_core::{color::Channels, error::CoreError, traits::ColorFormatter};
/// # struct Plain;
/// # impl ColorFormatter for Plain {
/// #     fn paint(&self, _: Channels, g: char, _: bool) -> Result<String, CoreError> { Ok(g.to_string()) }
/// # }
///
/// let mut pixels = PixelGrid::from_depths(&[&[0, 128, 255]]);
/// let config = ConvertConfig::default();
/// let palette = Palette::select(config.complex, &config.custom_palette);
/// let grid = map_to_chars(&mut pixels, &config, &palette, &Plain).unwrap();
/// assert_eq!(grid.glyph_rows(), vec![" +@".to_string()]);
/// ```
pub fn map_to_chars(
    pixels: &mut PixelGrid,
    config: &ConvertConfig,
    palette: &Palette,
    formatter: &dyn ColorFormatter,
) -> Result<CharGrid, CoreError> {
    let mut grid = CharGrid::new(pixels.width, pixels.height);

    for row in 0..pixels.height {
        for col in 0..pixels.width {
            let sample = pixels.get(row, col);

            let mut index = palette.index(sample.depth);
            if config.negative {
                index = palette.invert_index(index);
            }

            let color = recolor::resolve_color(sample, config);
            *grid.get_mut(row, col) =
                recolor::assemble_cell(palette.glyph(index), color, config, formatter)?;
        }
    }

    if config.negative {
        recolor::write_back(pixels, &grid, (1, 1), config.colored);
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use ag_core::charset::{CHARSET_DETAILED, CHARSET_SIMPLE};
    use ag_core::frame::PixelSample;

    use super::*;
    use crate::testing::{Failing, Tagged};

    fn simple() -> Palette {
        Palette::new(CHARSET_SIMPLE)
    }

    #[test]
    fn zero_depth_maps_to_space() {
        let mut pixels = PixelGrid::from_depths(&[&[0]]);
        let grid = map_to_chars(&mut pixels, &ConvertConfig::default(), &simple(), &Tagged).unwrap();
        assert_eq!((grid.width, grid.height), (1, 1));
        assert_eq!(grid.get(0, 0).glyph, ' ');
    }

    #[test]
    fn every_depth_follows_floor_formula() {
        let palette = Palette::new(CHARSET_DETAILED);
        let glyphs: Vec<char> = CHARSET_DETAILED.chars().collect();
        let depths: Vec<u8> = (0..=255).collect();
        let mut pixels = PixelGrid::from_depths(&[depths.as_slice()]);
        let grid = map_to_chars(&mut pixels, &ConvertConfig::default(), &palette, &Tagged).unwrap();
        for d in 0..=254usize {
            let expected = (d as f64 / 255.0 * 70.0).floor() as usize;
            assert_eq!(grid.get(0, d).glyph, glyphs[expected], "depth {d}");
        }
        assert_eq!(grid.get(0, 255).glyph, '$');
    }

    #[test]
    fn negative_mirrors_index_and_inverts_color() {
        let mut pixels = PixelGrid::from_depths(&[&[0, 255]]);
        let config = ConvertConfig {
            negative: true,
            ..ConvertConfig::default()
        };
        let grid = map_to_chars(&mut pixels, &config, &simple(), &Tagged).unwrap();
        assert_eq!(grid.get(0, 0).glyph, '@');
        assert_eq!(grid.get(0, 1).glyph, ' ');
        assert_eq!(grid.get(0, 0).color, (255, 255, 255));
        assert_eq!(grid.get(0, 0).colored_original, "<255,255,255|fg>@");
    }

    #[test]
    fn negative_writes_inverted_color_back() {
        let sample = PixelSample {
            depth: 40,
            color: (10, 20, 30),
            gray: (50, 50, 50),
        };
        let mut pixels = PixelGrid::new(2, 1, sample);
        let config = ConvertConfig {
            negative: true,
            colored: true,
            ..ConvertConfig::default()
        };
        let grid = map_to_chars(&mut pixels, &config, &simple(), &Tagged).unwrap();
        for s in &pixels.samples {
            assert_eq!(s.color, (245, 235, 225));
            assert_eq!(s.gray, (50, 50, 50));
        }
        assert_eq!(grid.get(0, 1).color, (245, 235, 225));

        // Grayscale mode writes into the grayscale triple instead.
        let mut pixels = PixelGrid::new(1, 1, sample);
        let config = ConvertConfig {
            negative: true,
            ..ConvertConfig::default()
        };
        let _ = map_to_chars(&mut pixels, &config, &simple(), &Tagged).unwrap();
        assert_eq!(pixels.get(0, 0).gray, (205, 205, 205));
        assert_eq!(pixels.get(0, 0).color, (10, 20, 30));
    }

    #[test]
    fn failure_aborts_and_leaves_input_untouched() {
        let mut pixels = PixelGrid::from_depths(&[&[10, 20], &[30, 40]]);
        let before = pixels.clone();
        let config = ConvertConfig {
            negative: true,
            colored: true,
            ..ConvertConfig::default()
        };
        assert!(map_to_chars(&mut pixels, &config, &simple(), &Failing).is_err());
        assert_eq!(pixels, before);
    }

    #[test]
    fn custom_palette_and_font_color() {
        let mut pixels = PixelGrid::from_depths(&[&[0, 200]]);
        let config = ConvertConfig {
            custom_palette: "ab".into(),
            font_color: [0, 0, 255],
            ..ConvertConfig::default()
        };
        let palette = Palette::select(config.complex, &config.custom_palette);
        let grid = map_to_chars(&mut pixels, &config, &palette, &Tagged).unwrap();
        assert_eq!(grid.glyph_rows(), vec!["ab".to_string()]);
        assert_eq!(grid.get(0, 1).colored_custom.as_deref(), Some("<0,0,255|fg>b"));
    }
}
