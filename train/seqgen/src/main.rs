use std::fs;

use anyhow::Context;
use clap::Parser;
use rand::{RngCore, SeedableRng};
use rand_xoshiro::SplitMix64;
use sequencer::{CorpusView, Spacing, compositor::validate};
use tracing_subscriber::EnvFilter;

use crate::{
    cli::Args, config::AppConfig, generator::SequenceItemGenerator, io::DatasetWriter,
    record::JsonRecord,
};

mod cli;
mod config;
mod fetch;
mod generator;
mod io;
mod record;
mod render;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    run(Args::parse())
}

fn run(args: Args) -> anyhow::Result<()> {
    let digits = cli::parse_digits(&args.sequence)?;
    let spacing = Spacing::new(args.min_spacing, args.max_spacing);
    validate(&digits, spacing)?;

    let mut cfg = AppConfig::load(args.config.as_deref())?;
    if let Some(p) = args.images {
        cfg.images_path = p;
    }
    if let Some(p) = args.labels {
        cfg.labels_path = p;
    }
    if let Some(p) = args.out_dir {
        cfg.out_dir = p;
    }
    cfg.pad_left |= args.pad_left;

    cfg.fetch_corpus()?;
    let corpus = CorpusView::open(&cfg.corpus()).context("opening corpus")?;
    tracing::info!(
        images = %cfg.images_path.display(),
        num_labels = corpus.labels().num_labels(),
        "corpus loaded"
    );

    let generator = SequenceItemGenerator {
        corpus: &corpus,
        digits,
        spacing,
        width: args.image_width,
        pad_left: cfg.pad_left,
    };
    let base_seed = args.seed.unwrap_or_else(rand::random);

    match args.count {
        None => {
            fs::create_dir_all(&cfg.out_dir)
                .with_context(|| format!("creating {}", cfg.out_dir.display()))?;
            let canvas = generator.generate_with_seed(base_seed)?;
            let path = cfg.out_dir.join(format!("{}.png", args.sequence));
            render::save_png(&canvas, &path)?;
            tracing::info!(path = %path.display(), seed = base_seed, "wrote image");
        }
        Some(count) => {
            let mut writer = DatasetWriter::new(&cfg.out_dir);
            writer.init_output()?;
            for id in 0..count {
                let mut sm = SplitMix64::seed_from_u64(base_seed.wrapping_add(id as u64));
                let seed = sm.next_u64();

                let canvas = generator.generate_with_seed(seed)?;
                writer.save_png(&canvas, id)?;
                writer.write_labels_jsonl(&JsonRecord {
                    schema: "v1",
                    image: DatasetWriter::image_rel(id),
                    labels: generator.digits.clone(),
                    spacing: [spacing.min, spacing.max],
                    width: generator.width,
                    seed,
                    pad_left: generator.pad_left,
                })?;
            }
            writer.finalize_output()?;
            tracing::info!(
                count,
                out_dir = %writer.out_dir().display(),
                base_seed,
                "wrote dataset"
            );
        }
    }

    Ok(())
}
