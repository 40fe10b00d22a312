use ag_core::frame::{PixelGrid, PixelSample};

use crate::image::FrameBuffer;

/// Hauteur d'une cellule terminal rapportée à sa largeur.
pub const CELL_ASPECT: f64 = 2.0;

/// Largeur par défaut quand ni largeur ni hauteur ne sont demandées.
pub const DEFAULT_WIDTH: u32 = 80;

/// Output size in character cells for an image of `native` pixels.
///
/// A missing dimension is derived from the other so the picture keeps its
/// proportions once each cell is `aspect` times taller than wide. With
/// neither given the width defaults to [`DEFAULT_WIDTH`]. Never returns a
/// zero dimension.
///
/// # Example
/// ```
/// use ag_source::sample::{CELL_ASPECT, target_size};
/// assert_eq!(target_size((200, 100), Some(40), None, CELL_ASPECT), (40, 10));
/// assert_eq!(target_size((200, 100), None, Some(10), CELL_ASPECT), (40, 10));
/// assert_eq!(target_size((200, 100), Some(7), Some(3), CELL_ASPECT), (7, 3));
/// ```
#[must_use]
pub fn target_size(
    native: (u32, u32),
    width: Option<u32>,
    height: Option<u32>,
    aspect: f64,
) -> (u32, u32) {
    let (nw, nh) = (f64::from(native.0.max(1)), f64::from(native.1.max(1)));
    let cells = |v: f64| (v.round() as u32).max(1);
    match (width, height) {
        (Some(w), Some(h)) => (w.max(1), h.max(1)),
        (Some(w), None) => (w.max(1), cells(f64::from(w) * nh / nw / aspect)),
        (None, Some(h)) => (cells(f64::from(h) * aspect * nw / nh), h.max(1)),
        (None, None) => (
            DEFAULT_WIDTH,
            cells(f64::from(DEFAULT_WIDTH) * nh / nw / aspect),
        ),
    }
}

/// Échantillonne chaque pixel en `PixelSample`.
///
/// `depth` is the BT.709 luminance, `color` the pixel's RGB and `gray` the
/// depth replicated on three channels. Alpha is ignored.
///
/// # Panics
/// Panics if the frame has a zero dimension.
///
/// # Example
/// ```
/// use ag_source::image::FrameBuffer;
/// use ag_source::sample::sample_grid;
/// let mut fb = FrameBuffer::new(1, 1);
/// fb.data.copy_from_slice(&[255, 255, 255, 255]);
/// let grid = sample_grid(&fb);
/// assert_eq!(grid.get(0, 0).depth, 255);
/// ```
#[must_use]
pub fn sample_grid(frame: &FrameBuffer) -> PixelGrid {
    let mut grid = PixelGrid::new(
        frame.width as usize,
        frame.height as usize,
        PixelSample::default(),
    );
    for (sample, px) in grid.samples.iter_mut().zip(frame.data.chunks_exact(4)) {
        let depth = luminance(px[0], px[1], px[2]);
        *sample = PixelSample {
            depth,
            color: (px[0], px[1], px[2]),
            gray: (depth, depth, depth),
        };
    }
    grid
}

#[inline(always)]
fn luminance(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 2126 + u32::from(g) * 7152 + u32::from(b) * 722) / 10000) as u8
}
