//! Core bigram model implementation.
//!
//! This module provides the fundamental counting and normalization
//! operations:
//! - Transition counting over boundary-framed names
//! - Row normalization into a stochastic probability matrix
//!
//! ## Probability Estimate
//!
//! Each row of the probability matrix is the maximum-likelihood estimate
//! of the next-symbol distribution given the current symbol:
//! ```text
//! P[i][j] = N[i][j] / Σ_j N[i][j]
//! ```
//!
//! Rows whose counts sum to zero are left all-zero rather than smoothed,
//! so an unobserved symbol stays visibly unreachable.

use ndarray::Array2;
use std::error::Error;
use std::fmt;

use crate::data::{Alphabet, Corpus, TokenizedName};

/// Error type for model construction and sampling.
#[derive(Debug, Clone)]
pub enum ModelError {
    /// Fitting was attempted on a corpus with no names
    EmptyCorpus,
    /// Shape mismatch in matrix operations
    ShapeMismatch(String),
    /// The sampler landed on a symbol with no outgoing transitions
    DeadEndState(usize),
    /// A generated name hit the length cap without terminating
    NameTooLong { cap: usize },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::EmptyCorpus => write!(f, "Cannot fit a model on an empty corpus"),
            ModelError::ShapeMismatch(msg) => write!(f, "Shape mismatch: {}", msg),
            ModelError::DeadEndState(idx) => {
                write!(f, "Symbol {} has no outgoing transitions", idx)
            }
            ModelError::NameTooLong { cap } => {
                write!(f, "Generated name exceeded {} characters", cap)
            }
        }
    }
}

impl Error for ModelError {}

pub type ModelResult<T> = Result<T, ModelError>;

/// Count symbol-to-symbol transitions across a set of tokenized names.
///
/// Every adjacent pair in a framed name contributes one count, so the
/// boundary row records which letters start names and the boundary column
/// records which letters end them. A degenerate (empty) name contributes
/// a single boundary-to-boundary count.
pub fn transition_counts(names: &[TokenizedName], size: usize) -> Array2<u64> {
    let mut counts = Array2::zeros((size, size));
    for name in names {
        for pair in name.symbols().windows(2) {
            counts[[pair[0], pair[1]]] += 1;
        }
    }
    counts
}

/// Normalize each count row into a probability distribution.
///
/// Rows that sum to zero stay all-zero instead of dividing into NaN.
/// Counts remain in integer space until this point, so refitting the same
/// corpus reproduces the matrix exactly.
pub fn row_normalize(counts: &Array2<u64>) -> Array2<f64> {
    let (rows, cols) = counts.dim();
    let mut probs = Array2::zeros((rows, cols));
    for (i, row) in counts.outer_iter().enumerate() {
        let total: u64 = row.sum();
        if total == 0 {
            continue;
        }
        let total = total as f64;
        for (j, &count) in row.iter().enumerate() {
            probs[[i, j]] = count as f64 / total;
        }
    }
    probs
}

/// A character-level bigram model over a fixed alphabet.
///
/// Holds the raw transition counts and the row-stochastic probability
/// matrix derived from them. Counts are the source of truth: the
/// probability matrix is always recomputed from counts, never mutated
/// on its own.
#[derive(Debug, Clone)]
pub struct BigramModel {
    /// The alphabet the count matrix is indexed by.
    alphabet: Alphabet,
    /// Transition counts, shape (size, size), row = source symbol.
    counts: Array2<u64>,
    /// Row-normalized probabilities, same shape as `counts`.
    probs: Array2<f64>,
}

impl BigramModel {
    /// Fit a model to a loaded corpus.
    ///
    /// # Errors
    /// - `EmptyCorpus` if the corpus holds no names
    pub fn fit(alphabet: Alphabet, corpus: &Corpus) -> ModelResult<Self> {
        if corpus.is_empty() {
            return Err(ModelError::EmptyCorpus);
        }
        let counts = transition_counts(&corpus.names, alphabet.size());
        let probs = row_normalize(&counts);
        Ok(Self {
            alphabet,
            counts,
            probs,
        })
    }

    /// Rebuild a model from an existing count matrix.
    ///
    /// Used when reloading a persisted model, where counts round-trip
    /// through the file and probabilities are derived fresh.
    ///
    /// # Errors
    /// - `ShapeMismatch` if the matrix is not square with one row per symbol
    pub fn from_counts(alphabet: Alphabet, counts: Array2<u64>) -> ModelResult<Self> {
        let size = alphabet.size();
        if counts.dim() != (size, size) {
            return Err(ModelError::ShapeMismatch(format!(
                "expected {size}x{size} counts for this alphabet, got {}x{}",
                counts.nrows(),
                counts.ncols()
            )));
        }
        let probs = row_normalize(&counts);
        Ok(Self {
            alphabet,
            counts,
            probs,
        })
    }

    /// The alphabet this model is indexed by.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Number of symbols, and thus the matrix dimension.
    pub fn size(&self) -> usize {
        self.alphabet.size()
    }

    /// Raw transition counts, one row per source symbol.
    pub fn counts(&self) -> &Array2<u64> {
        &self.counts
    }

    /// Row-stochastic transition probabilities.
    ///
    /// Row `i` sums to one when symbol `i` appears as a bigram source
    /// anywhere in the corpus, and is all-zero otherwise.
    pub fn probabilities(&self) -> &Array2<f64> {
        &self.probs
    }

    /// Total number of observed transitions across the whole matrix.
    pub fn total_transitions(&self) -> u64 {
        self.counts.sum()
    }
}
