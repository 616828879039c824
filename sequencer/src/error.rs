use thiserror::Error;

pub type Result<T> = std::result::Result<T, SequenceError>;

#[derive(Error, Debug)]
pub enum SequenceError {
    /// A requested digit is outside 0..=9.
    #[error("digits must be integers between 0 and 9, got {0}")]
    InvalidDigit(u8),

    /// Gutter bounds with the lower bound above the upper one.
    #[error("spacing range must have min <= max, got ({min}, {max})")]
    InvalidSpacing { min: usize, max: usize },

    #[error("label {0} out of range, must be between 0 and 9")]
    LabelOutOfRange(u8),

    #[error("image number {index} out of range for label {label}, must be below {count}")]
    GlyphOutOfRange {
        label: u8,
        index: usize,
        count: usize,
    },

    /// The corpus holds no glyph for a requested digit.
    #[error("corpus has no glyphs with label {0}")]
    NoGlyphs(u8),

    #[error("malformed corpus: {0}")]
    MalformedCorpus(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SequenceError {
    /// Caller input errors, raised before the corpus is touched.
    pub fn is_value_error(&self) -> bool {
        matches!(
            self,
            SequenceError::InvalidDigit(_) | SequenceError::InvalidSpacing { .. }
        )
    }

    /// Index errors raised at the corpus view.
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            SequenceError::LabelOutOfRange(_)
                | SequenceError::GlyphOutOfRange { .. }
                | SequenceError::NoGlyphs(_)
        )
    }
}
