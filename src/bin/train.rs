//! Bigram model training binary.
//!
//! Loads a name corpus, fits the transition count matrix, and saves the
//! model as JSON for later generation.

use bigram::persist::save_model;
use bigram::{load_corpus, Alphabet, BigramModel, CorpusConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bigram-train",
    about = "Fit a bigram model on a corpus of names"
)]
struct Args {
    /// Path to the corpus file (one name per line)
    #[arg(long, default_value = "data/names.txt")]
    corpus: PathBuf,

    /// Output model file (JSON)
    #[arg(long, default_value = "data/model.json")]
    output: PathBuf,

    /// Maximum number of names to read from the corpus
    #[arg(long, default_value_t = 100_000)]
    max_names: usize,

    /// Maximum name length in characters; longer lines are skipped
    #[arg(long, default_value_t = 64)]
    max_name_len: usize,
}

fn main() {
    let args = Args::parse();
    let alphabet = Alphabet::lowercase();
    let config = CorpusConfig {
        max_names: args.max_names,
        max_name_len: args.max_name_len,
    };

    eprintln!("Loading corpus: {}", args.corpus.display());
    let corpus = load_corpus(&args.corpus, &alphabet, &config).expect("Failed to load corpus");
    eprintln!("  Names: {}", corpus.len());
    if corpus.skipped > 0 {
        eprintln!("  Skipped {} invalid lines", corpus.skipped);
    }

    let model = BigramModel::fit(alphabet, &corpus).expect("Failed to fit model");

    let populated = model
        .counts()
        .outer_iter()
        .filter(|row| row.sum() > 0)
        .count();
    eprintln!("  Transitions: {}", model.total_transitions());
    eprintln!("  Populated rows: {}/{}", populated, model.size());

    save_model(&model, &args.output, corpus.len()).expect("Failed to save model");
    eprintln!("Model saved: {}", args.output.display());
}
