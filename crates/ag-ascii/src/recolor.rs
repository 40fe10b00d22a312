use ag_core::color::{Rgb, invert, widen};
use ag_core::config::ConvertConfig;
use ag_core::error::CoreError;
use ag_core::frame::{CharCell, CharGrid, PixelGrid, PixelSample};
use ag_core::traits::ColorFormatter;

/// Color a cell is drawn with: RGB or grayscale triple, inverted in negative mode.
///
/// # Example
/// ```
/// use ag_ascii::recolor::resolve_color;
/// use ag_core::config::ConvertConfig;
/// use ag_core::frame::PixelSample;
///
/// let sample = PixelSample { depth: 0, color: (200, 10, 0), gray: (70, 70, 70) };
/// let mut config = ConvertConfig::default();
/// assert_eq!(resolve_color(&sample, &config), (70, 70, 70));
/// config.colored = true;
/// config.negative = true;
/// assert_eq!(resolve_color(&sample, &config), (55, 245, 255));
/// ```
#[inline(always)]
#[must_use]
pub fn resolve_color(sample: &PixelSample, config: &ConvertConfig) -> Rgb {
    let rgb = sample.source_color(config.colored);
    if config.negative { invert(rgb) } else { rgb }
}

/// Build the output record for one glyph.
///
/// A failure painting `color` aborts only in color or grayscale mode;
/// otherwise the cell keeps an empty colored string. A failure painting the
/// font color always aborts.
///
/// # Errors
/// Propagates the formatter's [`CoreError`] unchanged.
pub fn assemble_cell(
    glyph: char,
    color: Rgb,
    config: &ConvertConfig,
    formatter: &dyn ColorFormatter,
) -> Result<CharCell, CoreError> {
    let colored_original = match formatter.paint(widen(color), glyph, config.color_bg) {
        Ok(painted) => painted,
        Err(err) if config.strict_color() => return Err(err),
        Err(err) => {
            log::trace!("Couleur ignorée pour {glyph:?} : {err}");
            String::new()
        }
    };

    let colored_custom = config
        .font_override()
        .map(|font| formatter.paint(font, glyph, config.color_bg))
        .transpose()?;

    Ok(CharCell {
        glyph,
        colored_original,
        colored_custom,
        color,
    })
}

/// Store each cell's resolved color back into the sample it was read from.
///
/// Cell `(r, c)` maps to sample `(r * stride.0, c * stride.1)`: `(1, 1)` for
/// density output, `(4, 2)` for Braille blocks.
pub fn write_back(pixels: &mut PixelGrid, cells: &CharGrid, stride: (usize, usize), colored: bool) {
    for row in 0..cells.height {
        for col in 0..cells.width {
            let color = cells.get(row, col).color;
            pixels
                .get_mut(row * stride.0, col * stride.1)
                .set_source_color(colored, color);
        }
    }
}
