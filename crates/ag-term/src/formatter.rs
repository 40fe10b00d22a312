use ag_core::color::{Channels, Rgb, narrow};
use ag_core::error::CoreError;
use ag_core::traits::ColorFormatter;
use crossterm::style::{Color, Stylize};

/// Palette depth the terminal is driven with.
///
/// # Example
/// ```
/// use ag_term::formatter::ColorDepth;
/// assert_eq!(ColorDepth::default(), ColorDepth::TrueColor);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorDepth {
    /// 24-bit RGB escapes.
    #[default]
    TrueColor,
    /// 256-color escapes, RGB quantized to the 6×6×6 cube.
    Ansi256,
}

impl ColorDepth {
    /// Truecolor when `COLORTERM` advertises it, 256 colors otherwise.
    #[must_use]
    pub fn detect() -> Self {
        let colorterm = std::env::var("COLORTERM").unwrap_or_default();
        let depth = Self::from_colorterm(&colorterm);
        log::debug!("COLORTERM={colorterm:?} → {depth:?}");
        depth
    }

    /// Interpret a `COLORTERM` value.
    ///
    /// # Example
    /// ```
    /// use ag_term::formatter::ColorDepth;
    /// assert_eq!(ColorDepth::from_colorterm("truecolor"), ColorDepth::TrueColor);
    /// assert_eq!(ColorDepth::from_colorterm(""), ColorDepth::Ansi256);
    /// ```
    #[must_use]
    pub fn from_colorterm(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "truecolor" | "24bit" => Self::TrueColor,
            _ => Self::Ansi256,
        }
    }

    fn color(self, rgb: Rgb) -> Color {
        let (r, g, b) = rgb;
        match self {
            Self::TrueColor => Color::Rgb { r, g, b },
            Self::Ansi256 => Color::AnsiValue(ansi256(rgb)),
        }
    }
}

/// Index of the nearest 6×6×6 cube entry (16..=231).
///
/// # Example
/// ```
/// use ag_term::formatter::ansi256;
/// assert_eq!(ansi256((0, 0, 0)), 16);
/// assert_eq!(ansi256((255, 255, 255)), 231);
/// assert_eq!(ansi256((255, 0, 0)), 196);
/// ```
#[must_use]
pub fn ansi256(rgb: Rgb) -> u8 {
    let level = |c: u8| c / 43; // 256 / 6 ≈ 43
    16 + 36 * level(rgb.0) + 6 * level(rgb.1) + level(rgb.2)
}

/// Formatter émettant les séquences ANSI via crossterm.
///
/// Respects `NO_COLOR`: crossterm drops the escapes when it is set.
///
/// # Example
/// ```
/// use ag_core::traits::ColorFormatter;
/// use ag_term::formatter::AnsiFormatter;
///
/// let f = AnsiFormatter::default();
/// assert!(f.paint([10, 20, 30], '#', false).unwrap().contains('#'));
/// assert!(f.paint([10, 20, 300], '#', false).is_err());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AnsiFormatter {
    depth: ColorDepth,
}

impl AnsiFormatter {
    /// Formatter for the given color depth.
    #[must_use]
    pub fn new(depth: ColorDepth) -> Self {
        Self { depth }
    }

    /// Color depth in use.
    #[must_use]
    pub fn depth(&self) -> ColorDepth {
        self.depth
    }
}

impl ColorFormatter for AnsiFormatter {
    fn paint(&self, rgb: Channels, glyph: char, background: bool) -> Result<String, CoreError> {
        let color = self.depth.color(narrow(rgb)?);
        let styled = if background {
            glyph.on(color)
        } else {
            glyph.with(color)
        };
        Ok(styled.to_string())
    }
}
