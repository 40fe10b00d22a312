use ag_core::color::widen;
use ag_core::config::ConvertConfig;
use ag_core::error::CoreError;
use ag_core::frame::CharGrid;
use ag_core::traits::ColorFormatter;

/// Écrit une `CharGrid` en lignes imprimables.
///
/// Glyphs are repainted from `cell.glyph`, so edge glyphs overlaid after
/// coloring still show up:
/// - font color override → every glyph in the font color;
/// - color or grayscale mode → each glyph in its cell color;
/// - otherwise plain glyphs.
///
/// # Errors
/// Returns the formatter's error.
///
/// # Example
/// ```
/// use ag_core::config::ConvertConfig;
/// use ag_core::frame::CharGrid;
/// use ag_term::canvas::render_lines;
/// use ag_term::formatter::AnsiFormatter;
///
/// let mut grid = CharGrid::new(2, 1);
/// grid.get_mut(0, 1).glyph = '#';
/// let lines = render_lines(&grid, &ConvertConfig::default(), &AnsiFormatter::default()).unwrap();
/// assert_eq!(lines, vec![" #".to_string()]);
/// ```
pub fn render_lines(
    grid: &CharGrid,
    config: &ConvertConfig,
    formatter: &dyn ColorFormatter,
) -> Result<Vec<String>, CoreError> {
    let font = config.font_override();
    let painted = config.strict_color();

    grid.rows()
        .map(|row| -> Result<String, CoreError> {
            let mut line = String::with_capacity(row.len());
            for cell in row {
                if let Some(font) = font {
                    line.push_str(&formatter.paint(font, cell.glyph, config.color_bg)?);
                } else if painted {
                    line.push_str(&formatter.paint(widen(cell.color), cell.glyph, config.color_bg)?);
                } else {
                    line.push(cell.glyph);
                }
            }
            Ok(line)
        })
        .collect()
}
