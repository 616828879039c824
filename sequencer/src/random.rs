use rand::Rng;

/// The draws the compositor makes. Swappable so compositions can be replayed.
pub trait RandomSource {
    /// Uniform in `[0, n)`. `n` is never zero.
    fn uniform_below(&mut self, n: usize) -> usize;

    /// Uniform in `[lo, hi]`, both ends included.
    fn uniform_in_range(&mut self, lo: usize, hi: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_below(&mut self, n: usize) -> usize {
        self.random_range(0..n)
    }

    fn uniform_in_range(&mut self, lo: usize, hi: usize) -> usize {
        self.random_range(lo..=hi)
    }
}
