use std::path::PathBuf;

use anyhow::ensure;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "seqgen",
    about = "Render a digit sequence from handwritten-digit glyphs"
)]
pub struct Args {
    /// Digits to render, e.g. 0123456789
    pub sequence: String,
    /// Narrowest gutter between digits, in pixels
    pub min_spacing: usize,
    /// Widest gutter between digits, in pixels
    pub max_spacing: usize,
    /// Width of the output image; the sequence is cut or padded on the right
    pub image_width: usize,
    /// JSON config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Decompressed image blob, overrides the config
    #[arg(long)]
    pub images: Option<PathBuf>,
    /// Decompressed label blob, overrides the config
    #[arg(long)]
    pub labels: Option<PathBuf>,
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
    /// Base seed; random when omitted
    #[arg(long)]
    pub seed: Option<u64>,
    /// Write a dataset of this many images plus labels.jsonl
    #[arg(long)]
    pub count: Option<u32>,
    /// Put a gutter before the first digit too
    #[arg(long)]
    pub pad_left: bool,
}

pub fn parse_digits(sequence: &str) -> anyhow::Result<Vec<u8>> {
    ensure!(
        !sequence.is_empty() && sequence.bytes().all(|b| b.is_ascii_digit()),
        "argument sequence must be a sequence of digits, got {sequence:?}"
    );
    Ok(sequence.bytes().map(|b| b - b'0').collect())
}
