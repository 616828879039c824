use crate::{
    config::CorpusConfig,
    error::{Result, SequenceError},
    glyphs::{GlyphBlock, GlyphSource, GlyphStore},
    labels::{LabelIndex, NUM_CLASSES},
    source::FileSource,
};

/// Glyphs addressed by `(label, local index)`.
///
/// This is where indices are bounds-checked before they reach the glyph source.
pub struct CorpusView<G> {
    glyphs: G,
    labels: LabelIndex,
}

impl CorpusView<GlyphStore<FileSource>> {
    pub fn open(config: &CorpusConfig) -> Result<Self> {
        tracing::debug!(
            images = %config.image_path.display(),
            labels = %config.label_path.display(),
            "opening corpus"
        );
        let glyphs = GlyphStore::open(FileSource::detect(&config.image_path)?)?;
        let labels = LabelIndex::parse(&FileSource::detect(&config.label_path)?)?;
        Self::new(glyphs, labels)
    }
}

impl<G: GlyphSource> CorpusView<G> {
    /// Fails when the image and label counts disagree.
    pub fn new(glyphs: G, labels: LabelIndex) -> Result<Self> {
        if glyphs.num_glyphs() != labels.num_labels() {
            return Err(SequenceError::MalformedCorpus(format!(
                "{} images but {} labels",
                glyphs.num_glyphs(),
                labels.num_labels()
            )));
        }
        Ok(Self { glyphs, labels })
    }

    pub fn labels(&self) -> &LabelIndex {
        &self.labels
    }

    pub fn glyph_count(&self, label: u8) -> usize {
        self.labels.positions_for(label).len()
    }

    pub fn glyph(&self, label: u8, index: usize) -> Result<GlyphBlock> {
        if label as usize >= NUM_CLASSES {
            return Err(SequenceError::LabelOutOfRange(label));
        }
        let positions = self.labels.positions_for(label);
        let Some(&global) = positions.get(index) else {
            return Err(SequenceError::GlyphOutOfRange {
                label,
                index,
                count: positions.len(),
            });
        };
        self.glyphs.glyph(global)
    }
}
