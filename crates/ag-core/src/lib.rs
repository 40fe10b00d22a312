/// Configuration, types, and shared structures for asciigrid.
///
/// This crate contains the grid types, palettes, configuration and the
/// color-formatter seam shared across the asciigrid workspace.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use charset::Palette;
pub use config::ConvertConfig;
pub use error::CoreError;
pub use frame::{CharCell, CharGrid, PixelGrid, PixelSample};
pub use traits::ColorFormatter;

/// Re-exports pour accès par chemin sémantique.
pub mod grid {
    pub use crate::frame::{CharCell, CharGrid, PixelGrid, PixelSample};
}
