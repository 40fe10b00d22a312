use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A color channel cannot be represented as a terminal color.
    #[error("Canal {channel} hors limites : {value} (attendu 0..=255)")]
    ColorOutOfRange {
        /// Channel name: 'r', 'g' or 'b'.
        channel: char,
        /// The offending value.
        value: i32,
    },

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),
}
