mod summary;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use wordtag_core::{compute_statistics, split_context};
use wordtag_features::{
    FEATURES_COLUMN, FeatureStage, MinMaxNormalizer, PipelineContext, word_tagging_pipeline,
};

#[derive(Parser)]
#[command(name = "wordtag", version, about = "Word-tagging feature pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the featurization pipeline over a TSV dataset.
    Featurize {
        /// Tab-separated input with Label, WordNum, Word, Context columns.
        input: PathBuf,

        /// Rows to preview after featurization.
        #[arg(long, default_value_t = 5)]
        preview: usize,

        /// Seed recorded in the pipeline context for downstream training.
        #[arg(long, env = "WORDTAG_SEED", default_value_t = 1)]
        seed: u64,

        /// Min-max scale the feature vector to [0, 1].
        #[arg(long)]
        normalize: bool,
    },

    /// Print the string statistics for one token.
    Stats { text: String },

    /// Split a sentence around the word at the given index.
    Context { sentence: String, index: usize },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    match Cli::parse().command {
        Commands::Featurize {
            input,
            preview,
            seed,
            normalize,
        } => featurize(&input, preview, seed, normalize),
        Commands::Stats { text } => {
            let stats = compute_statistics(&text);
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
        Commands::Context { sentence, index } => {
            let pair = split_context(&sentence, index)?;
            println!("before: {}", pair.before);
            println!("after:  {}", pair.after);
            Ok(())
        }
    }
}

fn featurize(input: &Path, preview: usize, seed: u64, normalize: bool) -> anyhow::Result<()> {
    let batches = wordtag_data::read_tsv(input)
        .with_context(|| format!("reading {}", input.display()))?;
    let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
    info!(rows, "loaded dataset");

    let pipeline = word_tagging_pipeline(PipelineContext { seed });
    let mut featurized = pipeline.transform(&batches).context("running pipeline")?;

    if normalize {
        let scaler =
            MinMaxNormalizer::fit(FEATURES_COLUMN, &featurized).context("fitting normalizer")?;
        featurized = featurized
            .iter()
            .map(|b| scaler.transform(b))
            .collect::<Result<_, _>>()
            .context("normalizing features")?;
        info!(width = scaler.width(), "normalized feature vector");
    }

    if let Some(first) = featurized.first() {
        summary::print_batch_summary(first, rows)?;
        if preview > 0 {
            let n = preview.min(first.num_rows());
            summary::print_preview(&first.slice(0, n))?;
        }
    }

    Ok(())
}
