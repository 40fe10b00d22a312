use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// RGB triple stored on samples and cells.
pub type Rgb = (u8, u8, u8);

/// Wide RGB channels as accepted by a [`crate::traits::ColorFormatter`].
///
/// Font colors come from user input and may fall outside `0..=255`;
/// the formatter is the component that rejects them.
pub type Channels = [i32; 3];

/// Font color sentinel meaning "no override".
pub const NO_FONT_COLOR: Channels = [255, 255, 255];

/// Negative d'une couleur : `255 - c` par canal.
///
/// # Example
/// ```
/// use ag_core::color::invert;
/// assert_eq!(invert((0, 100, 255)), (255, 155, 0));
/// ```
#[inline(always)]
#[must_use]
pub fn invert(rgb: Rgb) -> Rgb {
    (255 - rgb.0, 255 - rgb.1, 255 - rgb.2)
}

/// Widen a stored color into formatter channels. Lossless.
#[inline(always)]
#[must_use]
pub fn widen(rgb: Rgb) -> Channels {
    [i32::from(rgb.0), i32::from(rgb.1), i32::from(rgb.2)]
}

/// Narrow formatter channels back into a displayable color.
///
/// # Errors
/// Returns [`CoreError::ColorOutOfRange`] for the first channel outside `0..=255`.
///
/// # Example
/// ```
/// use ag_core::color::narrow;
/// assert_eq!(narrow([1, 2, 3]).unwrap(), (1, 2, 3));
/// assert!(narrow([256, 0, 0]).is_err());
/// ```
pub fn narrow(channels: Channels) -> Result<Rgb, CoreError> {
    let mut out = [0u8; 3];
    for ((slot, value), name) in out.iter_mut().zip(channels).zip(['r', 'g', 'b']) {
        *slot = u8::try_from(value).map_err(|_| CoreError::ColorOutOfRange {
            channel: name,
            value,
        })?;
    }
    Ok((out[0], out[1], out[2]))
}

/// Luminance weighting used to turn a grayscale triple into one intensity.
///
/// # Example
/// ```
/// use ag_core::color::LumaWeights;
/// assert_eq!(LumaWeights::Rec709.luminance((0, 0, 0)), 0);
/// assert_eq!(LumaWeights::Rec601.luminance((200, 0, 0)), 59);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum LumaWeights {
    /// `0.2126 R + 0.7152 G + 0.0722 B` (BT.709).
    #[default]
    Rec709,
    /// `0.299 R + 0.587 G + 0.114 B` (BT.601).
    Rec601,
}

impl LumaWeights {
    /// Weighted sum of the three channels, truncated toward zero.
    #[inline(always)]
    #[must_use]
    pub fn luminance(self, rgb: Rgb) -> i32 {
        let (wr, wg, wb) = match self {
            Self::Rec709 => (0.2126, 0.7152, 0.0722),
            Self::Rec601 => (0.299, 0.587, 0.114),
        };
        (f64::from(rgb.0) * wr + f64::from(rgb.1) * wg + f64::from(rgb.2) * wb) as i32
    }
}
