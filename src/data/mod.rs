//! Corpus loading, tokenization, and alphabet management.
//!
//! ## Submodules
//!
//! - [`alphabet`] — Character-to-index alphabet with a boundary symbol
//! - [`corpus`] — Name-per-line corpus loading and boundary framing

pub mod alphabet;
pub mod corpus;

pub use alphabet::Alphabet;
pub use corpus::{load_corpus, Corpus, CorpusConfig, CorpusError, TokenizedName};
