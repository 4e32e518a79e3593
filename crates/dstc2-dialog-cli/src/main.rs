//! CLI for the DSTC2 dialogue dataset adapter.
//!
//! Subcommands:
//!  - `stats`   : load a corpus and report turn/dialogue counts per split.
//!  - `batches` : draw whole-dialogue batches and print which dialogues each holds.
//!  - `vocab`   : export the input-text vocabulary of a split.
//!
//! Usage examples:
//!  cargo run -p dstc2-dialog -- stats --data dstc2.json
//!  cargo run -p dstc2-dialog -- batches --data dstc2.json --batch-size 4 --seed 7
//!  cargo run -p dstc2-dialog -- vocab --data dstc2.json --out vocab.txt
//!
//! Logs go to stderr through `tracing-subscriber`; set `RUST_LOG` to adjust.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use dstc2_dialog::{
    load_dataset_json, save_vocab, BatchConfig, DataType, DialogueDataset, SplitConfig,
};

/// CLI entrypoint.
#[derive(Parser)]
#[command(
    name = "dstc2-dialog",
    about = "DSTC2 dialogue dataset tools — split stats, dialogue batches, vocabulary export",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Report turn and dialogue counts for every split.
    Stats(StatsArgs),

    /// Draw batches of whole dialogues and print their dialogue ranges.
    Batches(BatchesArgs),

    /// Write the sorted input-text vocabulary of a split to a file.
    Vocab(VocabArgs),
}

/// Corpus location and optional re-splitting, shared by every subcommand.
#[derive(Args, Debug)]
struct CorpusArgs {
    /// Path to the corpus JSON ({"train": [...], "valid": [...], "test": [...]}).
    #[arg(short, long, value_name = "PATH")]
    data: PathBuf,

    /// Re-split the pooled corpus by dialogue: fraction of dialogues for `valid`.
    #[arg(long, default_value_t = 0.0)]
    valid_ratio: f64,

    /// Re-split the pooled corpus by dialogue: fraction of dialogues for `test`.
    #[arg(long, default_value_t = 0.0)]
    test_ratio: f64,

    /// Seed for dialogue re-splitting.
    #[arg(long, default_value_t = 0)]
    split_seed: u64,
}

impl CorpusArgs {
    fn load(&self) -> Result<DialogueDataset> {
        let split = SplitConfig {
            valid_ratio: self.valid_ratio,
            test_ratio: self.test_ratio,
            seed: self.split_seed,
        };
        let policy = split.policy().context("building split policy")?;
        load_dataset_json(&self.data, policy.as_ref())
            .with_context(|| format!("loading corpus from {}", self.data.display()))
    }
}

#[derive(Args, Debug)]
struct StatsArgs {
    #[command(flatten)]
    corpus: CorpusArgs,

    /// Output as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct BatchesArgs {
    #[command(flatten)]
    corpus: CorpusArgs,

    /// Optional JSON file with a batch configuration; flags below override it.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum number of dialogues per batch (default: 8).
    #[arg(short, long)]
    batch_size: Option<usize>,

    /// Split to draw from: train|valid|test|all (default: train).
    #[arg(long)]
    split: Option<String>,

    /// Keep corpus order instead of shuffling dialogues.
    #[arg(long)]
    no_shuffle: bool,

    /// Seed for the dialogue shuffle (fresh entropy when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Print each batch as a JSON line including its turns.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct VocabArgs {
    #[command(flatten)]
    corpus: CorpusArgs,

    /// Split whose inputs form the vocabulary: train|valid|test|all.
    #[arg(long, default_value = "train")]
    split: String,

    /// Output file (created or truncated).
    #[arg(short, long, value_name = "PATH")]
    out: PathBuf,
}

/// Application entry point.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("dstc2_dialog=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Stats(args) => run_stats(args),
        Commands::Batches(args) => run_batches(args),
        Commands::Vocab(args) => run_vocab(args),
    }
}

/// Run the `stats` subcommand.
fn run_stats(args: StatsArgs) -> Result<()> {
    let ds = args.corpus.load()?;
    let summary = ds.summary();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("{:<6} {:>8} {:>10}", "split", "turns", "dialogues");
    for s in &summary {
        println!("{:<6} {:>8} {:>10}", s.split.as_str(), s.turns, s.dialogues);
    }
    Ok(())
}

/// Merge the optional config file with command-line overrides.
fn resolve_batch_config(args: &BatchesArgs) -> Result<BatchConfig> {
    let mut cfg = match &args.config {
        Some(path) => read_batch_config(path)?,
        None => BatchConfig::default(),
    };
    if let Some(batch_size) = args.batch_size {
        cfg.batch_size = batch_size;
    }
    if let Some(split) = &args.split {
        cfg.data_type = split
            .parse::<DataType>()
            .with_context(|| format!("parsing --split '{}'", split))?;
    }
    if args.no_shuffle {
        cfg.shuffle = false;
    }
    if args.seed.is_some() {
        cfg.seed = args.seed;
    }
    Ok(cfg)
}

fn read_batch_config(path: &Path) -> Result<BatchConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading batch config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing batch config {}", path.display()))
}

/// Run the `batches` subcommand.
fn run_batches(args: BatchesArgs) -> Result<()> {
    let cfg = resolve_batch_config(&args)?;
    tracing::debug!(?cfg, "effective batch config");
    let ds = args.corpus.load()?;
    let mut rng = cfg.rng();

    let mut batches = ds
        .batch_generator(cfg.batch_size, cfg.data_type, cfg.shuffle, &mut rng)
        .with_context(|| format!("drawing batches from '{}'", cfg.data_type))?;

    if !args.json {
        println!(
            "{} dialogues in '{}', {} batches of up to {} dialogues (shuffle={})",
            batches.num_dialogues(),
            cfg.data_type,
            batches.num_batches(),
            cfg.batch_size,
            cfg.shuffle
        );
    }

    let mut n = 0usize;
    while let Some((picked, batch)) = batches.next_with_indices() {
        if args.json {
            let line = json!({
                "batch": n,
                "dialogues": picked,
                "turns": batch,
            });
            println!("{}", serde_json::to_string(&line)?);
        } else {
            let ranges = picked
                .iter()
                .map(|idx| idx.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            println!("batch {:>4}: {:>4} turns  [{}]", n, batch.len(), ranges);
        }
        n += 1;
    }
    Ok(())
}

/// Run the `vocab` subcommand.
fn run_vocab(args: VocabArgs) -> Result<()> {
    let ds = args.corpus.load()?;
    let turns = ds
        .data_by_name(&args.split)
        .with_context(|| format!("selecting split '{}'", args.split))?;
    save_vocab(turns, &args.out)
        .with_context(|| format!("writing vocabulary to {}", args.out.display()))?;
    println!(
        "Wrote vocabulary of {} turns from '{}' to {}",
        turns.len(),
        args.split,
        args.out.display()
    );
    Ok(())
}
