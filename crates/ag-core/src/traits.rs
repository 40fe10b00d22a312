use crate::color::Channels;
use crate::error::CoreError;

/// Wraps a glyph in the terminal escape sequence for an RGB color.
///
/// Implémenté par : `AnsiFormatter` (ag-term). Tests use in-crate fakes.
///
/// # Example
/// ```
/// use ag_core::color::{narrow, Channels};
/// use ag_core::error::CoreError;
/// use ag_core::traits::ColorFormatter;
///
/// struct Brackets;
/// impl ColorFormatter for Brackets {
///     fn paint(&self, rgb: Channels, glyph: char, _background: bool) -> Result<String, CoreError> {
///         let (r, g, b) = narrow(rgb)?;
///         Ok(format!("[{r},{g},{b}]{glyph}"))
///     }
/// }
///
/// assert_eq!(Brackets.paint([1, 2, 3], '#', false).unwrap(), "[1,2,3]#");
/// ```
pub trait ColorFormatter {
    /// Retourne le glyph entouré de la séquence couleur.
    ///
    /// `background` selects a background escape instead of a foreground one.
    ///
    /// # Errors
    /// Returns [`CoreError::ColorOutOfRange`] when a channel cannot be represented.
    fn paint(&self, rgb: Channels, glyph: char, background: bool) -> Result<String, CoreError>;
}
