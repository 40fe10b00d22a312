pub mod canvas;
/// Terminal output for asciigrid.
///
/// Provides the ANSI color formatter and line rendering of character grids.
pub mod formatter;

pub use canvas::render_lines;
pub use formatter::{AnsiFormatter, ColorDepth};
