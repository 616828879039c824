use std::path::PathBuf;

/// Where a corpus lives on disk. Either file may be raw or gzip-compressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusConfig {
    pub image_path: PathBuf,
    pub label_path: PathBuf,
}

impl CorpusConfig {
    pub fn new(image_path: impl Into<PathBuf>, label_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            label_path: label_path.into(),
        }
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self::new(
            "data/train-images-idx3-ubyte.gz",
            "data/train-labels-idx1-ubyte.gz",
        )
    }
}
