pub mod canvas;
pub mod compositor;
pub mod config;
pub mod corpus;
pub mod error;
pub mod glyphs;
pub mod labels;
pub mod random;
pub mod source;

pub use canvas::{Canvas, NormalizedCanvas};
pub use compositor::{Compositor, Spacing, generate_sequence, generate_sequence_seeded};
pub use config::CorpusConfig;
pub use corpus::CorpusView;
pub use error::SequenceError;
pub use glyphs::{GlyphBlock, GlyphHeader, GlyphSource, GlyphStore};
pub use labels::LabelIndex;
pub use random::RandomSource;
pub use source::{ByteSource, FileSource};
