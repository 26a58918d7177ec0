//! Corpus loading and name tokenization.
//!
//! A corpus is a plain-text file with one name per line. Each name is
//! encoded into symbol indices and framed with the boundary symbol on
//! both sides, so the bigram counts capture which letters start and end
//! names. Lines that fail validation are skipped and counted rather than
//! aborting the load.

use std::error::Error;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use super::alphabet::Alphabet;

/// Errors raised while loading a corpus file.
#[derive(Debug)]
pub enum CorpusError {
    /// The corpus file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// No line in the file survived validation.
    Empty { path: PathBuf },
}

impl fmt::Display for CorpusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorpusError::Io { path, source } => {
                write!(f, "failed to read corpus {}: {source}", path.display())
            }
            CorpusError::Empty { path } => {
                write!(f, "corpus {} contains no usable names", path.display())
            }
        }
    }
}

impl Error for CorpusError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CorpusError::Io { source, .. } => Some(source),
            CorpusError::Empty { .. } => None,
        }
    }
}

/// Limits applied while reading a corpus file.
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Maximum number of names to keep; reading stops once reached.
    pub max_names: usize,
    /// Maximum name length in characters; longer lines are skipped.
    pub max_name_len: usize,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            max_names: 100_000,
            max_name_len: 64,
        }
    }
}

/// A single name encoded as symbol indices, framed by the boundary symbol.
///
/// An empty name encodes to the two-symbol sequence (boundary, boundary).
/// That degenerate pair still contributes a boundary-to-boundary count,
/// matching how framing treats a zero-length name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedName(Vec<usize>);

impl TokenizedName {
    /// Encode a raw name, adding the boundary frame.
    ///
    /// Returns `None` if any character falls outside the alphabet's
    /// letters. The boundary character itself is rejected inside a name
    /// since it would corrupt the framing.
    #[must_use]
    pub fn encode(name: &str, alphabet: &Alphabet) -> Option<Self> {
        let boundary = alphabet.boundary();
        let mut symbols = Vec::with_capacity(name.len() + 2);
        symbols.push(boundary);
        for c in name.chars() {
            match alphabet.index_of(c) {
                Some(idx) if idx != boundary => symbols.push(idx),
                _ => return None,
            }
        }
        symbols.push(boundary);
        Some(Self(symbols))
    }

    /// The framed symbol sequence: boundary, letters, boundary.
    #[must_use]
    pub fn symbols(&self) -> &[usize] {
        &self.0
    }

    /// Number of letters between the boundary frame.
    #[must_use]
    pub fn letter_count(&self) -> usize {
        self.0.len() - 2
    }

    /// Decode back to the raw name, dropping the boundary frame.
    #[must_use]
    pub fn raw(&self, alphabet: &Alphabet) -> String {
        self.0[1..self.0.len() - 1]
            .iter()
            .filter_map(|&idx| alphabet.char_at(idx))
            .collect()
    }
}

/// A loaded corpus: tokenized names plus a count of rejected lines.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Names that passed validation, in file order.
    pub names: Vec<TokenizedName>,
    /// Lines rejected for out-of-alphabet characters or excessive length.
    pub skipped: usize,
}

impl Corpus {
    /// Number of names kept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no names were kept.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Load a newline-separated corpus of names.
///
/// Lines containing characters outside the alphabet or longer than
/// `config.max_name_len` are skipped and counted in [`Corpus::skipped`].
/// Empty lines are kept as degenerate names. Reading stops once
/// `config.max_names` names have been collected.
///
/// # Errors
///
/// Returns [`CorpusError::Io`] if the file cannot be read, and
/// [`CorpusError::Empty`] if no line survives validation.
pub fn load_corpus(
    path: &Path,
    alphabet: &Alphabet,
    config: &CorpusConfig,
) -> Result<Corpus, CorpusError> {
    let text = fs::read_to_string(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    let mut skipped = 0usize;
    for line in text.lines() {
        if names.len() >= config.max_names {
            break;
        }
        if line.chars().count() > config.max_name_len {
            skipped += 1;
            continue;
        }
        match TokenizedName::encode(line, alphabet) {
            Some(name) => names.push(name),
            None => skipped += 1,
        }
    }

    if names.is_empty() {
        return Err(CorpusError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(Corpus { names, skipped })
}
