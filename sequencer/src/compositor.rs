use rand::{SeedableRng, rngs::SmallRng};

use crate::{
    canvas::{Canvas, NormalizedCanvas},
    config::CorpusConfig,
    corpus::CorpusView,
    error::{Result, SequenceError},
    glyphs::{GlyphBlock, GlyphSource},
    random::RandomSource,
};

/// Inclusive bounds on gutter width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacing {
    pub min: usize,
    pub max: usize,
}

impl Spacing {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn fixed(width: usize) -> Self {
        Self::new(width, width)
    }
}

/// Checks caller input. Runs before the corpus is opened or read.
pub fn validate(digits: &[u8], spacing: Spacing) -> Result<()> {
    if let Some(&d) = digits.iter().find(|&&d| d > 9) {
        return Err(SequenceError::InvalidDigit(d));
    }
    if spacing.min > spacing.max {
        return Err(SequenceError::InvalidSpacing {
            min: spacing.min,
            max: spacing.max,
        });
    }
    Ok(())
}

/// Builds sequence images out of corpus glyphs.
pub struct Compositor<'a, G> {
    corpus: &'a CorpusView<G>,
    pad_left: bool,
}

impl<'a, G: GlyphSource> Compositor<'a, G> {
    pub fn new(corpus: &'a CorpusView<G>) -> Self {
        Self {
            corpus,
            pad_left: false,
        }
    }

    /// Also put a gutter before the first glyph.
    pub fn pad_left(mut self, on: bool) -> Self {
        self.pad_left = on;
        self
    }

    /// Composites one random glyph per digit, left to right, into a `width`-column canvas.
    ///
    /// The canvas is as tall as the tallest chosen glyph. Ink is inverted so that
    /// background comes out white; whatever the glyphs and gutters do not cover
    /// stays white, and anything past `width` is cut off.
    pub fn compose<R: RandomSource + ?Sized>(
        &self,
        digits: &[u8],
        spacing: Spacing,
        width: usize,
        rng: &mut R,
    ) -> Result<Canvas> {
        validate(digits, spacing)?;

        let chosen = self.choose_glyphs(digits, rng)?;
        let rows = chosen.iter().map(GlyphBlock::rows).max().unwrap_or(0);
        let elements = self.insert_gutters(chosen, spacing, rng);

        tracing::debug!(
            digits = digits.len(),
            elements = elements.len(),
            rows,
            width,
            "compositing sequence"
        );
        Ok(concatenate(&elements, rows, width))
    }

    pub fn compose_normalized<R: RandomSource + ?Sized>(
        &self,
        digits: &[u8],
        spacing: Spacing,
        width: usize,
        rng: &mut R,
    ) -> Result<NormalizedCanvas> {
        Ok(self.compose(digits, spacing, width, rng)?.normalize())
    }

    fn choose_glyphs<R: RandomSource + ?Sized>(
        &self,
        digits: &[u8],
        rng: &mut R,
    ) -> Result<Vec<GlyphBlock>> {
        digits
            .iter()
            .map(|&d| {
                let count = self.corpus.glyph_count(d);
                if count == 0 {
                    return Err(SequenceError::NoGlyphs(d));
                }
                let i = rng.uniform_below(count);
                tracing::trace!(digit = d, index = i, "chose glyph");
                self.corpus.glyph(d, i)
            })
            .collect()
    }

    fn insert_gutters<R: RandomSource + ?Sized>(
        &self,
        glyphs: Vec<GlyphBlock>,
        spacing: Spacing,
        rng: &mut R,
    ) -> Vec<GlyphBlock> {
        let mut out = Vec::with_capacity(glyphs.len() * 2);
        for (i, glyph) in glyphs.into_iter().enumerate() {
            if i != 0 || self.pad_left {
                let w = rng.uniform_in_range(spacing.min, spacing.max);
                out.push(GlyphBlock::filled(1, w, 0));
            }
            out.push(glyph);
        }
        out
    }
}

/// Copies element columns into consecutive canvas columns, inverting each pixel.
/// Zero-width elements take no column.
fn concatenate(elements: &[GlyphBlock], rows: usize, width: usize) -> Canvas {
    let mut canvas = Canvas::blank(rows, width);
    let columns = elements
        .iter()
        .filter(|e| !e.is_empty())
        .flat_map(|e| (0..e.cols()).map(move |c| (e, c)));

    for (out_col, (element, col)) in (0..width).zip(columns) {
        for r in 0..element.rows().min(rows) {
            canvas.set(r, out_col, 255 - element.get(r, col));
        }
    }
    canvas
}

/// Opens the corpus named by `config` and composites with an OS-seeded RNG.
pub fn generate_sequence(
    config: &CorpusConfig,
    digits: &[u8],
    spacing: Spacing,
    width: usize,
) -> Result<NormalizedCanvas> {
    let mut rng = SmallRng::from_os_rng();
    generate_with(config, digits, spacing, width, &mut rng)
}

pub fn generate_sequence_seeded(
    config: &CorpusConfig,
    digits: &[u8],
    spacing: Spacing,
    width: usize,
    seed: u64,
) -> Result<NormalizedCanvas> {
    let mut rng = SmallRng::seed_from_u64(seed);
    generate_with(config, digits, spacing, width, &mut rng)
}

fn generate_with(
    config: &CorpusConfig,
    digits: &[u8],
    spacing: Spacing,
    width: usize,
    rng: &mut SmallRng,
) -> Result<NormalizedCanvas> {
    validate(digits, spacing)?;
    let corpus = CorpusView::open(config)?;
    Compositor::new(&corpus).compose_normalized(digits, spacing, width, rng)
}
