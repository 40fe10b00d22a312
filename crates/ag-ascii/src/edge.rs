use std::f64::consts::PI;

use ag_core::color::LumaWeights;
use ag_core::config::GradientPolicy;
use ag_core::frame::{CharGrid, PixelGrid};

use crate::convolve::{Kernel3, Matrix, convolve};

/// Horizontal derivative kernel.
pub const SOBEL_X: Kernel3 = [[1, 0, -1], [2, 0, -2], [1, 0, -1]];
/// Vertical derivative kernel.
pub const SOBEL_Y: Kernel3 = [[1, 2, 1], [0, 0, 0], [-1, -2, -1]];

/// A cell whose gradient reached the edge threshold.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelAngle {
    /// Gradient magnitude, truncated. 0 when the magnitude is NaN.
    pub gradient: i32,
    /// `atan2(gy, gx)` in radians, within [-π, π].
    pub angle: f64,
    /// Directional glyph for `angle`.
    pub glyph: char,
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub col: usize,
}

/// Combine the two derivatives into a magnitude according to `policy`.
///
/// `LegacyXor` evaluates `sqrt(((gy ^ 2) + gx) ^ 2)`; a negative radicand
/// yields NaN.
///
/// # Example
/// ```
/// use ag_ascii::edge::gradient_magnitude;
/// use ag_core::config::GradientPolicy;
/// assert_eq!(gradient_magnitude(GradientPolicy::Euclidean, 3, 4), 5.0);
/// assert_eq!(gradient_magnitude(GradientPolicy::LegacyXor, 0, 4), 2.0);
/// ```
#[inline(always)]
#[must_use]
pub fn gradient_magnitude(policy: GradientPolicy, gx: i32, gy: i32) -> f64 {
    match policy {
        GradientPolicy::Euclidean => {
            let (gx, gy) = (f64::from(gx), f64::from(gy));
            (gx * gx + gy * gy).sqrt()
        }
        GradientPolicy::LegacyXor => f64::from(((gy ^ 2) + gx) ^ 2).sqrt(),
    }
}

/// Map an angle in [-π, π] to one of `| / - \`.
///
/// Eight 45° sectors centred on multiples of π/4; both poles map to `|`.
///
/// # Example
/// ```
/// use ag_ascii::edge::angle_to_glyph;
/// use std::f64::consts::PI;
/// assert_eq!(angle_to_glyph(0.0), '|');
/// assert_eq!(angle_to_glyph(PI / 4.0), '/');
/// assert_eq!(angle_to_glyph(-PI), '|');
/// ```
#[must_use]
pub fn angle_to_glyph(angle: f64) -> char {
    const GLYPHS: [char; 4] = ['|', '/', '-', '\\'];
    let bounds = [
        -7.0 * PI / 8.0,
        -5.0 * PI / 8.0,
        -3.0 * PI / 8.0,
        -PI / 8.0,
        PI / 8.0,
        3.0 * PI / 8.0,
        5.0 * PI / 8.0,
        7.0 * PI / 8.0,
    ];
    let sector = bounds.iter().position(|&b| angle < b).unwrap_or(bounds.len());
    GLYPHS[sector % GLYPHS.len()]
}

/// Sobel pass over a luminance matrix.
///
/// Cells with a magnitude below `threshold` are dropped. The result is in
/// row-major order, not sorted by magnitude.
///
/// # Example
/// ```
/// use ag_ascii::convolve::Matrix;
/// use ag_ascii::edge::sobel;
/// use ag_core::config::GradientPolicy;
///
/// let flat = Matrix::filled(4, 4, 80);
/// assert!(sobel(&flat, 1.0, GradientPolicy::Euclidean).is_empty());
/// ```
#[must_use]
pub fn sobel(gray: &Matrix, threshold: f64, policy: GradientPolicy) -> Vec<PixelAngle> {
    let gx = convolve(gray, &Matrix::from(SOBEL_X));
    let gy = convolve(gray, &Matrix::from(SOBEL_Y));

    let mut angles = Vec::new();

    for row in 0..gray.height {
        for col in 0..gray.width {
            let (x, y) = (gx.get(row, col), gy.get(row, col));
            let magnitude = gradient_magnitude(policy, x, y);

            // NaN never compares below: such cells are kept.
            if magnitude < threshold {
                continue;
            }

            let angle = f64::from(y).atan2(f64::from(x));
            angles.push(PixelAngle {
                gradient: magnitude as i32,
                angle,
                glyph: angle_to_glyph(angle),
                row,
                col,
            });
        }
    }

    angles
}

/// Luminance of every sample's grayscale triple.
///
/// # Example
/// ```
/// use ag_ascii::edge::luminance_matrix;
/// use ag_core::color::LumaWeights;
/// use ag_core::frame::PixelGrid;
///
/// let pixels = PixelGrid::from_depths(&[&[0, 100]]);
/// let lum = luminance_matrix(&pixels, LumaWeights::Rec601);
/// assert_eq!(lum.get(0, 0), 0);
/// ```
#[must_use]
pub fn luminance_matrix(pixels: &PixelGrid, luma: LumaWeights) -> Matrix {
    let mut lum = Matrix::filled(pixels.width, pixels.height, 0);
    for row in 0..pixels.height {
        for col in 0..pixels.width {
            lum.set(row, col, luma.luminance(pixels.get(row, col).gray));
        }
    }
    lum
}

/// Replace glyphs with Sobel direction glyphs wherever the gradient reaches
/// `threshold`. Colors and colored strings are left as they are.
///
/// Returns the number of overlaid cells.
///
/// # Panics
/// Panics if `cells` and `pixels` differ in shape.
///
/// # Example
/// ```
/// use ag_ascii::edge::overlay_edges;
/// use ag_core::color::LumaWeights;
/// use ag_core::config::GradientPolicy;
/// use ag_core::frame::{CharGrid, PixelGrid};
///
/// let pixels = PixelGrid::from_depths(&[&[0, 0, 255], &[0, 0, 255], &[0, 0, 255]]);
/// let mut cells = CharGrid::new(3, 3);
/// let n = overlay_edges(&mut cells, &pixels, 500.0, GradientPolicy::Euclidean, LumaWeights::Rec709);
/// assert_eq!(n, 6);
/// assert_eq!(cells.glyph_rows()[0], " ||");
/// ```
pub fn overlay_edges(
    cells: &mut CharGrid,
    pixels: &PixelGrid,
    threshold: f64,
    gradient: GradientPolicy,
    luma: LumaWeights,
) -> usize {
    assert!(
        cells.width == pixels.width && cells.height == pixels.height,
        "edge overlay needs matching grids, got {}×{} cells for {}×{} samples",
        cells.width,
        cells.height,
        pixels.width,
        pixels.height
    );

    let lum = luminance_matrix(pixels, luma);
    let edges = sobel(&lum, threshold, gradient);

    for edge in &edges {
        cells.get_mut(edge.row, edge.col).glyph = edge.glyph;
    }

    edges.len()
}

#[cfg(test)]
mod tests {
    use ag_core::frame::PixelSample;

    use super::*;

    #[test]
    fn angle_sectors() {
        assert_eq!(angle_to_glyph(0.0), '|');
        assert_eq!(angle_to_glyph(PI / 4.0), '/');
        assert_eq!(angle_to_glyph(PI / 2.0), '-');
        assert_eq!(angle_to_glyph(3.0 * PI / 4.0), '\\');
        assert_eq!(angle_to_glyph(PI), '|');
        assert_eq!(angle_to_glyph(-PI), '|');
        assert_eq!(angle_to_glyph(-3.0 * PI / 4.0), '/');
        assert_eq!(angle_to_glyph(-PI / 2.0), '-');
        assert_eq!(angle_to_glyph(-PI / 4.0), '\\');
    }

    #[test]
    fn sector_boundaries_belong_to_upper_sector() {
        assert_eq!(angle_to_glyph(PI / 8.0), '/');
        assert_eq!(angle_to_glyph(-PI / 8.0), '|');
        assert_eq!(angle_to_glyph(7.0 * PI / 8.0), '|');
    }

    #[test]
    fn legacy_xor_values() {
        // ((0 ^ 2) + 3) ^ 2 = 7
        assert!((gradient_magnitude(GradientPolicy::LegacyXor, 3, 0) - 7f64.sqrt()).abs() < 1e-12);
        // ((0 ^ 2) + 0) ^ 2 = 0
        assert_eq!(gradient_magnitude(GradientPolicy::LegacyXor, 0, 0), 0.0);
        // ((0 ^ 2) - 10) ^ 2 = -6
        assert!(gradient_magnitude(GradientPolicy::LegacyXor, -10, 0).is_nan());
    }

    #[test]
    fn vertical_step_yields_vertical_glyphs() {
        let lum = Matrix::from([[0, 0, 255], [0, 0, 255], [0, 0, 255]]);
        let edges = sobel(&lum, 500.0, GradientPolicy::Euclidean);

        let positions: Vec<_> = edges.iter().map(|e| (e.row, e.col)).collect();
        assert_eq!(positions, vec![(0, 1), (0, 2), (1, 1), (1, 2), (2, 1), (2, 2)]);
        for e in &edges {
            assert_eq!(e.gradient, 1020);
            assert_eq!(e.glyph, '|');
        }
    }

    #[test]
    fn horizontal_step_yields_dash() {
        let lum = Matrix::from([[0, 0, 0], [0, 0, 0], [255, 255, 255]]);
        let edges = sobel(&lum, 500.0, GradientPolicy::Euclidean);
        assert_eq!(edges.len(), 6);
        assert!(edges.iter().all(|e| e.glyph == '-' && e.row >= 1));
    }

    #[test]
    fn legacy_policy_keeps_nan_cells() {
        // gx = -1020 at columns 1 and 2, gy = 0: radicand is negative.
        let lum = Matrix::from([[0, 0, 255], [0, 0, 255]]);
        let edges = sobel(&lum, 1e9, GradientPolicy::LegacyXor);
        assert_eq!(edges.len(), 4);
        assert!(edges.iter().all(|e| e.gradient == 0));
    }

    #[test]
    fn flat_field_overlays_nothing() {
        let pixels = PixelGrid::new(6, 5, PixelSample::gray(140));
        let mut cells = CharGrid::new(6, 5);
        for cell in &mut cells.cells {
            cell.glyph = '+';
        }
        let before = cells.clone();
        for policy in [GradientPolicy::Euclidean, GradientPolicy::LegacyXor] {
            let n = overlay_edges(&mut cells, &pixels, 0.5, policy, LumaWeights::Rec709);
            assert_eq!(n, 0);
            assert_eq!(cells, before);
        }
    }

    #[test]
    fn overlay_leaves_colors_untouched() {
        let pixels = PixelGrid::from_depths(&[&[0, 255], &[0, 255]]);
        let mut cells = CharGrid::new(2, 2);
        for cell in &mut cells.cells {
            cell.glyph = '#';
            cell.color = (1, 2, 3);
            cell.colored_original = "<#>".to_string();
        }
        let n = overlay_edges(&mut cells, &pixels, 1.0, GradientPolicy::Euclidean, LumaWeights::Rec709);
        assert_eq!(n, 4);
        for cell in &cells.cells {
            assert_eq!(cell.glyph, '|');
            assert_eq!(cell.color, (1, 2, 3));
            assert_eq!(cell.colored_original, "<#>");
        }
    }

    #[test]
    fn luminance_reads_gray_triple_not_color() {
        let sample = PixelSample {
            depth: 0,
            color: (255, 255, 255),
            gray: (10, 10, 10),
        };
        let pixels = PixelGrid::new(2, 3, sample);
        let lum = luminance_matrix(&pixels, LumaWeights::Rec709);
        assert_eq!((lum.width, lum.height), (2, 3));
        assert!(lum.data.iter().all(|&v| v == 9 || v == 10));
    }

    #[test]
    #[should_panic(expected = "matching grids")]
    fn mismatched_shapes_panic() {
        let pixels = PixelGrid::new(4, 4, PixelSample::gray(0));
        let mut cells = CharGrid::new(2, 1);
        let _ = overlay_edges(&mut cells, &pixels, 1.0, GradientPolicy::Euclidean, LumaWeights::Rec709);
    }
}
