pub mod braille;
pub mod compositor;
pub mod convolve;
pub mod edge;
/// Character conversion engine for asciigrid.
///
/// Converts pixel-sample grids to character grids: density palettes,
/// Braille dot patterns and Sobel edge glyphs.
pub mod luminance;
pub mod recolor;

pub use compositor::Compositor;
