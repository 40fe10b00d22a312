use ag_core::config::ConvertConfig;
use ag_core::error::CoreError;
use ag_core::frame::{CharGrid, PixelGrid};
use ag_core::traits::ColorFormatter;

use crate::recolor;

/// Braille base codepoint (U+2800).
pub const BRAILLE_BASE: u32 = 0x2800;

/// Samples per Braille cell, vertically.
pub const BLOCK_ROWS: usize = 4;
/// Samples per Braille cell, horizontally.
pub const BLOCK_COLS: usize = 2;

/// Bit added to the base codepoint for each dot, indexed `[row][col]`.
///
/// ```text
///  0x01 0x08
///  0x02 0x10
///  0x04 0x20
///  0x40 0x80
/// ```
pub const BRAILLE_DOTS: [[u32; BLOCK_COLS]; BLOCK_ROWS] =
    [[0x1, 0x8], [0x2, 0x10], [0x4, 0x20], [0x40, 0x80]];

/// Encode the 4×2 block whose top-left sample is `(row, col)`.
///
/// A dot is lit when `depth >= threshold`, or `depth <= threshold` in
/// negative mode. Positions past the grid edge stay unlit.
///
/// # Example
/// ```
/// use ag_ascii::braille::encode_block;
/// use ag_core::frame::PixelGrid;
///
/// let pixels = PixelGrid::from_depths(&[&[255, 0], &[0, 0], &[0, 0], &[0, 0]]);
/// assert_eq!(encode_block(&pixels, 0, 0, 128, false), '\u{2801}');
/// assert_eq!(encode_block(&pixels, 0, 0, 128, true), '\u{28FE}');
/// ```
#[must_use]
pub fn encode_block(pixels: &PixelGrid, row: usize, col: usize, threshold: u8, negative: bool) -> char {
    let mut code = BRAILLE_BASE;

    for (dy, bits) in BRAILLE_DOTS.iter().enumerate() {
        for (dx, &bit) in bits.iter().enumerate() {
            let (r, c) = (row + dy, col + dx);
            if r >= pixels.height || c >= pixels.width {
                continue;
            }
            let depth = pixels.get(r, c).depth;
            let lit = if negative {
                depth <= threshold
            } else {
                depth >= threshold
            };
            if lit {
                code += bit;
            }
        }
    }

    char::from_u32(code).unwrap_or(' ')
}

/// Encode the grid as Braille cells, one per 4×2 block of samples.
///
/// The output is `ceil(height / 4)` × `ceil(width / 2)`; trailing partial
/// blocks are encoded with their missing dots unlit. Colors come from each
/// block's top-left sample, with the same inversion, write-back and error
/// rules as [`crate::luminance::map_to_chars`].
///
/// # Errors
/// Returns the formatter's error, see [`recolor::assemble_cell`].
///
/// # Example
/// ```
/// use ag_ascii::braille::map_to_braille;
/// use ag_core::config::ConvertConfig;
/// use ag_core::frame::{PixelGrid, PixelSample};
/// # use ag_core::{color::Channels, error::CoreError, traits::ColorFormatter};
/// # struct Plain;
/// # impl ColorFormatter for Plain {
/// #     fn paint(&self, _: Channels, g: char, _: bool) -> Result<String, CoreError> { Ok(g.to_string()) }
/// # }
///
/// let mut pixels = PixelGrid::new(2, 4, PixelSample::gray(200));
/// let grid = map_to_braille(&mut pixels, &ConvertConfig::default(), 128, &Plain).unwrap();
/// assert_eq!(grid.cells.len(), 1);
/// assert_eq!(grid.get(0, 0).glyph, '\u{28FF}');
/// ```
pub fn map_to_braille(
    pixels: &mut PixelGrid,
    config: &ConvertConfig,
    threshold: u8,
    formatter: &dyn ColorFormatter,
) -> Result<CharGrid, CoreError> {
    let width = pixels.width.div_ceil(BLOCK_COLS);
    let height = pixels.height.div_ceil(BLOCK_ROWS);
    let mut grid = CharGrid::new(width, height);

    for cy in 0..height {
        for cx in 0..width {
            let (row, col) = (cy * BLOCK_ROWS, cx * BLOCK_COLS);
            let glyph = encode_block(pixels, row, col, threshold, config.negative);
            let color = recolor::resolve_color(pixels.get(row, col), config);
            *grid.get_mut(cy, cx) = recolor::assemble_cell(glyph, color, config, formatter)?;
        }
    }

    if config.negative {
        recolor::write_back(pixels, &grid, (BLOCK_ROWS, BLOCK_COLS), config.colored);
    }

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use ag_core::frame::PixelSample;

    use super::*;
    use crate::testing::{Failing, Tagged};

    #[test]
    fn dot_table_covers_all_eight_bits() {
        let mut union = 0u32;
        for &bit in BRAILLE_DOTS.iter().flatten() {
            assert_eq!(bit.count_ones(), 1);
            assert_eq!(union & bit, 0, "bit {bit:#x} used twice");
            union |= bit;
        }
        assert_eq!(union, 0xFF);
    }

    #[test]
    fn full_block_sets_every_dot() {
        let pixels = PixelGrid::new(2, 4, PixelSample::gray(200));
        assert_eq!(encode_block(&pixels, 0, 0, 128, false), '\u{28FF}');
        assert_eq!(encode_block(&pixels, 0, 0, 128, true), '\u{2800}');
    }

    #[test]
    fn threshold_is_inclusive_both_ways() {
        let pixels = PixelGrid::new(2, 4, PixelSample::gray(128));
        assert_eq!(encode_block(&pixels, 0, 0, 128, false), '\u{28FF}');
        assert_eq!(encode_block(&pixels, 0, 0, 128, true), '\u{28FF}');
    }

    #[test]
    fn single_dots_land_on_their_bits() {
        for (dy, bits) in BRAILLE_DOTS.iter().enumerate() {
            for (dx, &bit) in bits.iter().enumerate() {
                let mut pixels = PixelGrid::new(2, 4, PixelSample::gray(0));
                pixels.get_mut(dy, dx).depth = 255;
                let expected = char::from_u32(BRAILLE_BASE + bit).unwrap();
                assert_eq!(encode_block(&pixels, 0, 0, 128, false), expected);
            }
        }
    }

    #[test]
    fn uniform_grid_end_to_end() {
        let mut pixels = PixelGrid::new(2, 4, PixelSample::gray(200));
        let grid = map_to_braille(&mut pixels, &ConvertConfig::default(), 128, &Tagged).unwrap();
        assert_eq!((grid.width, grid.height), (1, 1));
        let cell = grid.get(0, 0);
        assert_eq!(cell.glyph as u32, BRAILLE_BASE + 0xFF);
        assert_eq!(cell.color, (200, 200, 200));
    }

    #[test]
    fn remainder_blocks_are_partial() {
        // 5 rows × 3 columns → 2 × 2 cells.
        let mut pixels = PixelGrid::new(3, 5, PixelSample::gray(255));
        let grid = map_to_braille(&mut pixels, &ConvertConfig::default(), 128, &Tagged).unwrap();
        assert_eq!((grid.width, grid.height), (2, 2));
        assert_eq!(grid.get(0, 0).glyph, '\u{28FF}');
        // Right column missing: only 0x1, 0x2, 0x4, 0x40.
        assert_eq!(grid.get(0, 1).glyph, '\u{2847}');
        // One row, one column: only 0x1.
        assert_eq!(grid.get(1, 1).glyph, '\u{2801}');
        // One row, two columns: 0x1 and 0x8.
        assert_eq!(grid.get(1, 0).glyph, '\u{2809}');
    }

    #[test]
    fn color_comes_from_top_left_sample() {
        let mut pixels = PixelGrid::new(2, 4, PixelSample::gray(0));
        pixels.get_mut(0, 0).color = (9, 9, 9);
        pixels.get_mut(3, 1).color = (200, 0, 0);
        let config = ConvertConfig {
            colored: true,
            ..ConvertConfig::default()
        };
        let grid = map_to_braille(&mut pixels, &config, 128, &Tagged).unwrap();
        assert_eq!(grid.get(0, 0).color, (9, 9, 9));
    }

    #[test]
    fn negative_writes_back_top_left_only() {
        let mut pixels = PixelGrid::new(4, 4, PixelSample::gray(10));
        let config = ConvertConfig {
            negative: true,
            ..ConvertConfig::default()
        };
        let grid = map_to_braille(&mut pixels, &config, 128, &Tagged).unwrap();
        assert_eq!(grid.get(0, 0).glyph, '\u{28FF}');
        assert_eq!(pixels.get(0, 0).gray, (245, 245, 245));
        assert_eq!(pixels.get(0, 2).gray, (245, 245, 245));
        assert_eq!(pixels.get(1, 1).gray, (10, 10, 10));
    }

    #[test]
    fn formatting_failure_aborts() {
        let mut pixels = PixelGrid::new(2, 4, PixelSample::gray(0));
        let config = ConvertConfig {
            grayscale: true,
            ..ConvertConfig::default()
        };
        assert!(map_to_braille(&mut pixels, &config, 128, &Failing).is_err());

        // Plain mode tolerates it.
        let plain = ConvertConfig::default();
        assert!(map_to_braille(&mut pixels, &plain, 128, &Failing).is_ok());
    }
}
