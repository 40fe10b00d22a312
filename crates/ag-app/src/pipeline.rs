use std::path::Path;
use std::time::Instant;

use ag_ascii::braille::{BLOCK_COLS, BLOCK_ROWS};
use ag_ascii::compositor::Compositor;
use ag_core::config::{ConvertConfig, RenderMode};
use ag_core::traits::ColorFormatter;
use ag_source::image::load_image;
use ag_source::resize::Resizer;
use ag_source::sample::{CELL_ASPECT, sample_grid, target_size};
use ag_term::canvas::render_lines;
use anyhow::{Context, Result};

/// Image → lignes imprimables.
///
/// `width`/`height` are in output characters; a Braille character covers
/// a 2×4 block of samples, so the image is resized accordingly.
///
/// # Errors
/// Returns an error if the image cannot be loaded or resized, or if a color
/// cannot be formatted.
pub fn render_image(
    path: &Path,
    config: &ConvertConfig,
    width: Option<u32>,
    height: Option<u32>,
    formatter: &dyn ColorFormatter,
) -> Result<Vec<String>> {
    let started = Instant::now();
    let frame = load_image(path)?;

    let (cols, rows) = target_size((frame.width, frame.height), width, height, CELL_ASPECT);
    let (sample_w, sample_h) = match config.render_mode {
        RenderMode::Ascii => (cols, rows),
        RenderMode::Braille => (cols * BLOCK_COLS as u32, rows * BLOCK_ROWS as u32),
    };
    let resized = Resizer::new().resize(&frame, sample_w, sample_h)?;
    let mut pixels = sample_grid(&resized);

    let mut compositor = Compositor::new(config);
    let grid = compositor
        .convert(&mut pixels, config, formatter)
        .context("Échec de la conversion")?;
    let lines = render_lines(&grid, config, formatter).context("Échec du rendu")?;

    log::info!(
        "{} : {}×{} cellules en {:.1?}",
        path.display(),
        grid.width,
        grid.height,
        started.elapsed()
    );
    Ok(lines)
}
