use anyhow::{Context, Result};
use fast_image_resize::images::Image;
use fast_image_resize::{PixelType, ResizeOptions, Resizer as FirResizer};

use crate::image::FrameBuffer;

/// Resizer réutilisable wrappant `fast_image_resize`.
///
/// # Example
/// ```
/// use ag_source::image::FrameBuffer;
/// use ag_source::resize::Resizer;
/// let mut r = Resizer::new();
/// let src = FrameBuffer::new(100, 100);
/// let mut dst = FrameBuffer::new(50, 25);
/// r.resize_into(&src, &mut dst).unwrap();
/// assert_eq!(dst.data.len(), 50 * 25 * 4);
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
    src_buf: Vec<u8>,
}

impl Resizer {
    /// Create a new resizer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new(),
            src_buf: Vec::new(),
        }
    }

    /// Resize `src` into `dst`; the dimensions of `dst` set the output size.
    ///
    /// # Errors
    /// Returns an error if either buffer does not match its dimensions or
    /// the resize fails.
    pub fn resize_into(&mut self, src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<()> {
        if src.width == dst.width && src.height == dst.height {
            dst.data.copy_from_slice(&src.data);
            return Ok(());
        }

        // from_slice_u8 wants a mutable source slice
        self.src_buf.clear();
        self.src_buf.extend_from_slice(&src.data);

        let src_image =
            Image::from_slice_u8(src.width, src.height, &mut self.src_buf, PixelType::U8x4)
                .context("Dimensions source invalides")?;
        let mut dst_image =
            Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x4)
                .context("Dimensions destination invalides")?;

        self.inner
            .resize(&src_image, &mut dst_image, Some(&self.options))
            .context("Échec du redimensionnement")?;

        log::debug!(
            "Redimensionné {}×{} → {}×{}",
            src.width,
            src.height,
            dst.width,
            dst.height
        );
        Ok(())
    }

    /// One-shot resize into a new buffer.
    ///
    /// # Errors
    /// Same as [`Resizer::resize_into`].
    pub fn resize(&mut self, src: &FrameBuffer, width: u32, height: u32) -> Result<FrameBuffer> {
        let mut dst = FrameBuffer::new(width, height);
        self.resize_into(src, &mut dst)?;
        Ok(dst)
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}
