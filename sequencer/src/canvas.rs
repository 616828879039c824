/// Value of a canvas pixel nothing has been written to.
pub const BLANK: u8 = 255;

/// Row-major 8-bit composite, 0 = black ink, 255 = white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    rows: usize,
    cols: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn blank(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            pixels: vec![BLANK; rows * cols],
        }
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

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.pixels[r * self.cols + c]
    }

    pub fn row(&self, r: usize) -> &[u8] {
        &self.pixels[r * self.cols..(r + 1) * self.cols]
    }

    pub(crate) fn set(&mut self, r: usize, c: usize, value: u8) {
        self.pixels[r * self.cols + c] = value;
    }

    pub fn normalize(&self) -> NormalizedCanvas {
        NormalizedCanvas {
            rows: self.rows,
            cols: self.cols,
            values: self.pixels.iter().map(|&p| p as f32 / 255.0).collect(),
        }
    }
}

/// Canvas scaled into `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedCanvas {
    rows: usize,
    cols: usize,
    values: Vec<f32>,
}

impl NormalizedCanvas {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, r: usize, c: usize) -> f32 {
        self.values[r * self.cols + c]
    }

    pub fn row(&self, r: usize) -> &[f32] {
        &self.values[r * self.cols..(r + 1) * self.cols]
    }
}
