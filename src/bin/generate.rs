//! Name generation binary.
//!
//! Fits a bigram model on a corpus (or loads a saved model) and prints
//! sampled names, one per line.

use bigram::persist::load_model;
use bigram::sampling::{generate_names, generate_names_parallel, Sampler, DEFAULT_MAX_LEN};
use bigram::{load_corpus, Alphabet, BigramModel, CorpusConfig};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "bigram-generate",
    about = "Generate names from a fitted bigram model"
)]
struct Args {
    /// Path to the corpus file (one name per line)
    #[arg(long, default_value = "data/names.txt")]
    corpus: PathBuf,

    /// Load a saved model instead of fitting the corpus
    #[arg(long)]
    model: Option<PathBuf>,

    /// Number of names to generate
    #[arg(long, default_value_t = 40)]
    count: usize,

    /// Random seed
    #[arg(long, default_value_t = 2_147_483_647)]
    seed: u64,

    /// Maximum letters per generated name
    #[arg(long, default_value_t = DEFAULT_MAX_LEN)]
    max_len: usize,

    /// Generate in parallel with one derived seed per name
    #[arg(long)]
    parallel: bool,
}

fn main() {
    let args = Args::parse();

    let model = match args.model {
        Some(ref path) => {
            eprintln!("Loading model: {}", path.display());
            let (data, model) = load_model(path).expect("Failed to load model");
            eprintln!("  Fitted on {} names", data.names_trained);
            model
        }
        None => {
            eprintln!("Fitting corpus: {}", args.corpus.display());
            let alphabet = Alphabet::lowercase();
            let corpus = load_corpus(&args.corpus, &alphabet, &CorpusConfig::default())
                .expect("Failed to load corpus");
            eprintln!("  Names: {}", corpus.len());
            if corpus.skipped > 0 {
                eprintln!("  Skipped {} invalid lines", corpus.skipped);
            }
            BigramModel::fit(alphabet, &corpus).expect("Failed to fit model")
        }
    };

    let sampler = Sampler::with_max_len(&model, args.max_len);
    let names = if args.parallel {
        generate_names_parallel(&sampler, args.seed, args.count)
    } else {
        let mut rng = StdRng::seed_from_u64(args.seed);
        generate_names(&sampler, &mut rng, args.count)
    }
    .expect("Failed to generate names");

    for name in &names {
        println!("{}", name);
    }
}
