//! # Bigram name generator
//!
//! A character-level bigram model that learns name structure from a
//! corpus and samples new names from it.
//!
//! ## Overview
//!
//! Names are framed with a boundary symbol and every adjacent symbol pair
//! is counted into a transition matrix. Row-normalizing the counts gives
//! a Markov chain over characters; generation walks that chain from the
//! boundary symbol until the boundary is drawn again, using multinomial
//! draws decomposed into sequential binomial trials.
//!
//! ## Structure
//!
//! - [`core`] — Transition counting, normalization, the fitted model
//! - [`data`] — Alphabet, corpus loading, boundary framing
//! - [`sampling`] — Uniform/binomial/multinomial primitives and the sampler
//! - [`persist`] — Model save/load as JSON

pub mod core;
pub mod data;
pub mod persist;
pub mod sampling;

pub use crate::core::{row_normalize, transition_counts, BigramModel, ModelError, ModelResult};
pub use data::{load_corpus, Alphabet, Corpus, CorpusConfig, CorpusError, TokenizedName};
pub use persist::{load_model, save_model, ModelFile};
pub use sampling::{generate_names, generate_names_parallel, Sampler};
