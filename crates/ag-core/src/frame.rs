use crate::color::Rgb;

/// Un échantillon par cellule de sortie, produit par le décodeur amont.
///
/// # Example
/// ```
/// use ag_core::frame::PixelSample;
/// let s = PixelSample::gray(128);
/// assert_eq!(s.depth, 128);
/// assert_eq!(s.gray, (128, 128, 128));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelSample {
    /// Luminance [0, 255] driving glyph selection.
    pub depth: u8,
    /// Couleur d'origine (RGB).
    pub color: Rgb,
    /// Grayscale triple used when color mode is off.
    pub gray: Rgb,
}

impl PixelSample {
    /// Sample whose color and grayscale triples both replicate `depth`.
    #[must_use]
    pub fn gray(depth: u8) -> Self {
        Self {
            depth,
            color: (depth, depth, depth),
            gray: (depth, depth, depth),
        }
    }

    /// The triple selected by color mode: `color` when `colored`, else `gray`.
    #[inline(always)]
    #[must_use]
    pub fn source_color(&self, colored: bool) -> Rgb {
        if colored { self.color } else { self.gray }
    }

    /// Overwrite the triple selected by color mode.
    #[inline(always)]
    pub fn set_source_color(&mut self, colored: bool, rgb: Rgb) {
        if colored {
            self.color = rgb;
        } else {
            self.gray = rgb;
        }
    }
}

/// Grille d'entrée, row-major, une ligne par rangée de caractères.
///
/// # Example
/// ```
/// use ag_core::frame::{PixelGrid, PixelSample};
/// let grid = PixelGrid::new(4, 2, PixelSample::gray(10));
/// assert_eq!(grid.samples.len(), 8);
/// assert_eq!(grid.get(1, 3).depth, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    /// Samples, row-major.
    pub samples: Vec<PixelSample>,
    /// Width in samples.
    pub width: usize,
    /// Height in samples.
    pub height: usize,
}

impl PixelGrid {
    /// Crée une grille uniforme.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn new(width: usize, height: usize, fill: PixelSample) -> Self {
        assert!(
            width > 0 && height > 0,
            "PixelGrid requires non-zero dimensions, got {width}×{height}"
        );
        Self {
            samples: vec![fill; width * height],
            width,
            height,
        }
    }

    /// Build a grid from rows of samples.
    ///
    /// # Panics
    /// Panics if there are no rows, the first row is empty, or rows differ in length.
    ///
    /// # Example
    /// ```
    /// use ag_core::frame::{PixelGrid, PixelSample};
    /// let grid = PixelGrid::from_rows(vec![
    ///     vec![PixelSample::gray(0), PixelSample::gray(1)],
    ///     vec![PixelSample::gray(2), PixelSample::gray(3)],
    /// ]);
    /// assert_eq!(grid.get(1, 0).depth, 2);
    /// ```
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<PixelSample>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        assert!(
            width > 0 && height > 0,
            "PixelGrid requires non-zero dimensions, got {width}×{height}"
        );
        let mut samples = Vec::with_capacity(width * height);
        for (i, row) in rows.into_iter().enumerate() {
            assert_eq!(row.len(), width, "row {i} is not {width} samples wide");
            samples.extend(row);
        }
        Self {
            samples,
            width,
            height,
        }
    }

    /// Build a grid of gray samples from rows of depth values.
    ///
    /// # Panics
    /// Same preconditions as [`PixelGrid::from_rows`].
    #[must_use]
    pub fn from_depths(rows: &[&[u8]]) -> Self {
        Self::from_rows(
            rows.iter()
                .map(|row| row.iter().copied().map(PixelSample::gray).collect())
                .collect(),
        )
    }

    /// Sample at (row, col).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> &PixelSample {
        &self.samples[row * self.width + col]
    }

    /// Mutable sample at (row, col).
    #[inline(always)]
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut PixelSample {
        &mut self.samples[row * self.width + col]
    }
}

/// Single cell in the character grid.
///
/// # Example
/// ```
/// use ag_core::frame::CharCell;
/// let cell = CharCell::default();
/// assert_eq!(cell.glyph, ' ');
/// assert!(cell.colored_custom.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharCell {
    /// Caractère à afficher, sans séquence d'échappement.
    pub glyph: char,
    /// Glyph wrapped in a terminal escape for the sample's (possibly inverted) color.
    pub colored_original: String,
    /// Glyph wrapped for the font color override, when one is set.
    pub colored_custom: Option<String>,
    /// The RGB actually used for this cell.
    pub color: Rgb,
}

impl Default for CharCell {
    fn default() -> Self {
        Self {
            glyph: ' ',
            colored_original: String::new(),
            colored_custom: None,
            color: (0, 0, 0),
        }
    }
}

/// Grille de sortie, row-major.
///
/// # Example
/// ```
/// use ag_core::frame::{CharCell, CharGrid};
/// let mut grid = CharGrid::new(3, 2);
/// grid.get_mut(1, 2).glyph = '@';
/// assert_eq!(grid.get(1, 2).glyph, '@');
/// assert_eq!(grid.glyph_rows(), vec!["   ".to_string(), "  @".to_string()]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    /// Cells, row-major.
    pub cells: Vec<CharCell>,
    /// Width in characters.
    pub width: usize,
    /// Height in characters.
    pub height: usize,
}

impl CharGrid {
    /// Crée une grille de cellules par défaut.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![CharCell::default(); width * height],
            width,
            height,
        }
    }

    /// Cell at (row, col).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> &CharCell {
        &self.cells[row * self.width + col]
    }

    /// Mutable cell at (row, col).
    #[inline(always)]
    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut CharCell {
        &mut self.cells[row * self.width + col]
    }

    /// Iterate over rows of cells.
    pub fn rows(&self) -> impl Iterator<Item = &[CharCell]> {
        self.cells.chunks(self.width.max(1))
    }

    /// Plain glyphs, one string per row.
    #[must_use]
    pub fn glyph_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.glyph).collect())
            .collect()
    }
}
