/// Image sources for asciigrid: decoding, downsampling, sampling.
pub mod image;
pub mod resize;
pub mod sample;

pub use crate::image::{FrameBuffer, load_image};
pub use resize::Resizer;
pub use sample::{CELL_ASPECT, sample_grid, target_size};
