use crate::{
    error::Result,
    source::{ByteSource, read_exact_at},
};

const HEADER_LEN: u64 = 16;

/// Row-major grid of 8-bit intensities, 0 = background, 255 = full ink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBlock {
    rows: usize,
    cols: usize,
    pixels: Vec<u8>,
}

impl GlyphBlock {
    pub fn new(rows: usize, cols: usize, pixels: Vec<u8>) -> Self {
        assert_eq!(pixels.len(), rows * cols, "pixel count must be rows * cols");
        Self { rows, cols, pixels }
    }

    pub fn filled(rows: usize, cols: usize, value: u8) -> Self {
        Self::new(rows, cols, vec![value; rows * cols])
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn row(&self, r: usize) -> &[u8] {
        &self.pixels[r * self.cols..(r + 1) * self.cols]
    }

    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.pixels[r * self.cols + c]
    }

    /// Zero-width blocks contribute no columns to a composite.
    pub fn is_empty(&self) -> bool {
        self.cols == 0
    }
}

/// Anything that can hand out glyphs by global position.
pub trait GlyphSource {
    fn num_glyphs(&self) -> usize;

    /// Caller guarantees `index < num_glyphs()`.
    fn glyph(&self, index: usize) -> Result<GlyphBlock>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphHeader {
    pub num_images: u32,
    pub num_rows: u32,
    pub num_cols: u32,
}

impl GlyphHeader {
    pub fn record_len(&self) -> usize {
        self.num_rows as usize * self.num_cols as usize
    }
}

/// Random-access reader over an image blob:
/// `[magic][num_images][num_rows][num_cols]` (big-endian u32) then fixed-size records.
#[derive(Debug)]
pub struct GlyphStore<S> {
    source: S,
    header: GlyphHeader,
}

impl<S: ByteSource> GlyphStore<S> {
    pub fn open(source: S) -> Result<Self> {
        let header = Self::read_header(&source)?;
        tracing::debug!(
            num_images = header.num_images,
            num_rows = header.num_rows,
            num_cols = header.num_cols,
            "read glyph header"
        );
        Ok(Self { source, header })
    }

    pub fn read_header(source: &S) -> Result<GlyphHeader> {
        let b = read_exact_at(source, 4, 12)?;
        let field = |i: usize| u32::from_be_bytes([b[i], b[i + 1], b[i + 2], b[i + 3]]);
        Ok(GlyphHeader {
            num_images: field(0),
            num_rows: field(4),
            num_cols: field(8),
        })
    }

    pub fn header(&self) -> GlyphHeader {
        self.header
    }

    /// No bounds check against `num_images`; a read past the blob end is an I/O error.
    pub fn glyph_at(&self, index: usize) -> Result<GlyphBlock> {
        let len = self.header.record_len();
        let offset = HEADER_LEN + len as u64 * index as u64;
        let pixels = read_exact_at(&self.source, offset, len)?;
        Ok(GlyphBlock::new(
            self.header.num_rows as usize,
            self.header.num_cols as usize,
            pixels,
        ))
    }
}

impl<S: ByteSource> GlyphSource for GlyphStore<S> {
    fn num_glyphs(&self) -> usize {
        self.header.num_images as usize
    }

    fn glyph(&self, index: usize) -> Result<GlyphBlock> {
        self.glyph_at(index)
    }
}
