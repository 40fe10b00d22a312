use std::path::Path;

use anyhow::{Context, Result};

/// Image décodée en RGBA, avant échantillonnage.
///
/// # Example
/// ```
/// use ag_source::image::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer noir aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use ag_source::image::FrameBuffer;
    /// let mut fb = FrameBuffer::new(2, 1);
    /// fb.data[4..8].copy_from_slice(&[1, 2, 3, 4]);
    /// assert_eq!(fb.pixel(1, 0), (1, 2, 3, 4));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        (
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        )
    }
}

/// Charge une image depuis le disque (PNG, JPEG, BMP, GIF).
///
/// # Errors
/// Returns an error if the file cannot be read or decoded, or if it has
/// no pixels.
///
/// # Example
/// ```no_run
/// use ag_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img = image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    anyhow::ensure!(
        width > 0 && height > 0,
        "Image vide: {} ({width}×{height})",
        path.display()
    );
    log::debug!("Image chargée: {} ({width}×{height})", path.display());
    Ok(FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    })
}
