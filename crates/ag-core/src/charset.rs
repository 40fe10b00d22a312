/// 10 caractères, compact, bon contraste.
pub const CHARSET_SIMPLE: &str = " .:-=+*#%@";

/// 70 caractères (Paul Bourke), résolution maximale.
pub const CHARSET_DETAILED: &str =
    " .'`^\",:;Il!i><~+_-?][}{1)(|\\/tfjrxnuvczXYUJCLQ0OZmwqpdbkhao*#MW&8%B@$";

/// Ordered glyph palette mapping depth [0..255] → index → character.
///
/// The depth → index table is pre-computed at construction for O(1)
/// per-cell cost and never changes afterwards.
///
/// # Example
/// ```
/// use ag_core::charset::Palette;
/// let palette = Palette::new(" .:#@");
/// assert_eq!(palette.glyph(palette.index(0)), ' ');
/// assert_eq!(palette.glyph(palette.index(255)), '@');
/// ```
#[derive(Clone, Debug)]
pub struct Palette {
    glyphs: Vec<char>,
    lut: [usize; 256],
}

impl Palette {
    /// Build a palette from a charset ordered lightest→densest.
    ///
    /// # Panics
    /// Panics if `charset` is empty.
    #[must_use]
    pub fn new(charset: &str) -> Self {
        let glyphs: Vec<char> = charset.chars().collect();
        assert!(!glyphs.is_empty(), "palette must contain at least one glyph");

        let len = glyphs.len();
        let mut lut = [0usize; 256];
        for (depth, slot) in lut.iter_mut().enumerate() {
            *slot = if depth == 255 {
                // floor(255/255 * N) would be N, one past the end.
                len - 1
            } else {
                (depth as f64 / 255.0 * len as f64) as usize
            };
        }
        Self { glyphs, lut }
    }

    /// Pick the palette for a conversion: a non-empty `custom` string wins,
    /// otherwise the 70-level table when `complex`, else the 10-level one.
    ///
    /// # Example
    /// ```
    /// use ag_core::charset::Palette;
    /// assert_eq!(Palette::select(false, "").len(), 10);
    /// assert_eq!(Palette::select(true, "").len(), 70);
    /// assert_eq!(Palette::select(true, "ab").len(), 2);
    /// ```
    #[must_use]
    pub fn select(complex: bool, custom: &str) -> Self {
        if !custom.is_empty() {
            Self::new(custom)
        } else if complex {
            Self::new(CHARSET_DETAILED)
        } else {
            Self::new(CHARSET_SIMPLE)
        }
    }

    /// Number of glyphs.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always false: empty palettes are rejected at construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Index for a depth: `floor(depth / 255 * N)`, with 255 pinned to `N - 1`.
    #[inline(always)]
    #[must_use]
    pub fn index(&self, depth: u8) -> usize {
        self.lut[depth as usize]
    }

    /// Mirror an index for negative mode: `(N - 1) - index`.
    ///
    /// # Example
    /// ```
    /// use ag_core::charset::Palette;
    /// let palette = Palette::new("abcd");
    /// assert_eq!(palette.invert_index(0), 3);
    /// assert_eq!(palette.invert_index(palette.invert_index(1)), 1);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn invert_index(&self, index: usize) -> usize {
        self.len() - 1 - index
    }

    /// Glyph at `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[inline(always)]
    #[must_use]
    pub fn glyph(&self, index: usize) -> char {
        self.glyphs[index]
    }
}
