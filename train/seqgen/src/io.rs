use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use sequencer::NormalizedCanvas;

use crate::{record::JsonRecord, render};

/// Output of dataset mode: `images/{id:06}.png` plus one `labels.jsonl` line per image.
pub struct DatasetWriter {
    out_dir: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl DatasetWriter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            writer: None,
        }
    }

    pub fn image_rel(id: u32) -> String {
        format!("images/{id:06}.png")
    }

    pub fn init_output(&mut self) -> anyhow::Result<()> {
        let dir = self.out_dir.join("images");
        fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
        if self.writer.is_none() {
            let path = self.out_dir.join("labels.jsonl");
            let file =
                File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            self.writer = Some(BufWriter::with_capacity(1 << 20, file));
        }
        Ok(())
    }

    pub fn save_png(&self, canvas: &NormalizedCanvas, id: u32) -> anyhow::Result<()> {
        render::save_png(canvas, &self.out_dir.join(Self::image_rel(id)))
    }

    pub fn write_labels_jsonl(&mut self, rec: &JsonRecord) -> anyhow::Result<()> {
        let json = serde_json::to_string(rec)?;
        if let Some(ref mut writer) = self.writer {
            writeln!(writer, "{json}")?;
        }
        Ok(())
    }

    pub fn finalize_output(&mut self) -> anyhow::Result<()> {
        if let Some(writer) = self.writer.take() {
            writer.into_inner()?.sync_all()?;
        }
        Ok(())
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seed: u64, pad_left: bool) -> JsonRecord {
        JsonRecord {
            schema: "v1",
            image: DatasetWriter::image_rel(seed as u32),
            labels: vec![4, 2],
            spacing: [1, 3],
            width: 64,
            seed,
            pad_left,
        }
    }

    #[test]
    fn writes_one_line_per_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut w = DatasetWriter::new(dir.path());
        w.init_output().unwrap();
        w.write_labels_jsonl(&record(7, false)).unwrap();
        w.write_labels_jsonl(&record(8, true)).unwrap();
        w.finalize_output().unwrap();

        assert!(dir.path().join("images").is_dir());
        let text = fs::read_to_string(dir.path().join("labels.jsonl")).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["image"], "images/000007.png");
        assert_eq!(lines[0]["labels"], serde_json::json!([4, 2]));
        assert!(lines[0].get("pad_left").is_none());
        assert_eq!(lines[1]["pad_left"], true);
    }
}
