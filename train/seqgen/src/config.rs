use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use sequencer::CorpusConfig;
use serde::{Deserialize, Serialize};

use crate::fetch::Fetcher;

/// Settings read from an optional JSON file. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub images_url: String,
    pub labels_url: String,
    pub images_path: PathBuf,
    pub labels_path: PathBuf,
    pub out_dir: PathBuf,
    pub pad_left: bool,
    pub download_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let corpus = CorpusConfig::default();
        Self {
            images_url: "https://storage.googleapis.com/cvdf-datasets/mnist/train-images-idx3-ubyte.gz"
                .to_string(),
            labels_url: "https://storage.googleapis.com/cvdf-datasets/mnist/train-labels-idx1-ubyte.gz"
                .to_string(),
            images_path: corpus.image_path,
            labels_path: corpus.label_path,
            out_dir: PathBuf::from("."),
            pad_left: false,
            download_timeout_secs: 300,
        }
    }
}

impl AppConfig {
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn corpus(&self) -> CorpusConfig {
        CorpusConfig::new(&self.images_path, &self.labels_path)
    }

    /// Downloads whichever corpus files are missing from their configured URLs.
    pub fn fetch_corpus(&self) -> anyhow::Result<()> {
        let fetcher = Fetcher::new(Duration::from_secs(self.download_timeout_secs))?;
        for (path, url) in [
            (&self.images_path, &self.images_url),
            (&self.labels_path, &self.labels_url),
        ] {
            fetcher
                .download_file(url, path)
                .with_context(|| format!("fetching corpus file {}", path.display()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_means_defaults() {
        assert_eq!(AppConfig::load(None).unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seqgen.json");
        fs::write(&path, r#"{ "images_path": "corpus/img", "pad_left": true }"#).unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.images_path, PathBuf::from("corpus/img"));
        assert!(cfg.pad_left);
        assert_eq!(cfg.labels_path, AppConfig::default().labels_path);
        assert_eq!(cfg.corpus().image_path, PathBuf::from("corpus/img"));
    }

    #[test]
    fn bad_json_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ nope").unwrap();
        let err = AppConfig::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }

    #[test]
    fn fetch_skips_files_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig {
            images_url: "http://127.0.0.1:1/images.gz".into(),
            labels_url: "http://127.0.0.1:1/labels.gz".into(),
            images_path: dir.path().join("images.gz"),
            labels_path: dir.path().join("labels.gz"),
            ..AppConfig::default()
        };
        fs::write(&cfg.images_path, b"img").unwrap();
        fs::write(&cfg.labels_path, b"lbl").unwrap();
        cfg.fetch_corpus().unwrap();
    }

    #[test]
    fn failed_fetch_names_file_and_url() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = AppConfig {
            images_url: "http://127.0.0.1:1/images.gz".into(),
            images_path: dir.path().join("images.gz"),
            download_timeout_secs: 5,
            ..AppConfig::default()
        };
        let msg = format!("{:#}", cfg.fetch_corpus().unwrap_err());
        assert!(msg.contains("images.gz"));
        assert!(msg.contains(&cfg.images_url));
    }
}
