//! Model save/load for fitted bigram models.
//!
//! Serializes the alphabet and transition counts to JSON. Probabilities
//! are not stored: they are re-derived from the counts on load, so the
//! file keeps a single source of truth.

use crate::core::BigramModel;
use crate::data::Alphabet;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serializable model data.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelFile {
    /// Alphabet characters in index order, boundary symbol last.
    pub alphabet: String,
    /// Transition count matrix as nested Vec for serialization.
    pub counts: Vec<Vec<u64>>,
    /// Number of corpus names the model was fitted on.
    #[serde(default)]
    pub names_trained: usize,
}

/// Convert an Array2 to Vec<Vec<u64>> for serialization.
fn array2_to_vecs(arr: &Array2<u64>) -> Vec<Vec<u64>> {
    arr.rows().into_iter().map(|row| row.to_vec()).collect()
}

/// Convert Vec<Vec<u64>> back to Array2.
fn vecs_to_array2(vecs: &[Vec<u64>]) -> Result<Array2<u64>, String> {
    if vecs.is_empty() {
        return Ok(Array2::zeros((0, 0)));
    }
    let nrows = vecs.len();
    let ncols = vecs[0].len();
    let flat: Vec<u64> = vecs.iter().flat_map(|r| r.iter().copied()).collect();
    Array2::from_shape_vec((nrows, ncols), flat)
        .map_err(|e| format!("Failed to reconstruct count matrix: {e}"))
}

/// Save a fitted model to a JSON file.
///
/// # Errors
///
/// Returns an error if the file cannot be written or the data cannot be serialized.
pub fn save_model(model: &BigramModel, path: &Path, names_trained: usize) -> Result<(), String> {
    let data = ModelFile {
        alphabet: model.alphabet().chars().iter().collect(),
        counts: array2_to_vecs(model.counts()),
        names_trained,
    };

    let json = serde_json::to_string_pretty(&data)
        .map_err(|e| format!("Failed to serialize model: {e}"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create model directory: {e}"))?;
    }

    std::fs::write(path, json)
        .map_err(|e| format!("Failed to write model to {}: {e}", path.display()))
}

/// Load a fitted model from a JSON file.
///
/// Rebuilds the alphabet from the stored character string and derives the
/// probability matrix from the stored counts.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the count
/// matrix does not match the stored alphabet.
pub fn load_model(path: &Path) -> Result<(ModelFile, BigramModel), String> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read model from {}: {e}", path.display()))?;

    let data: ModelFile =
        serde_json::from_str(&json).map_err(|e| format!("Failed to parse model: {e}"))?;

    let alphabet = Alphabet::from_chars(data.alphabet.chars().collect())?;
    let counts = vecs_to_array2(&data.counts)?;
    let model = BigramModel::from_counts(alphabet, counts)
        .map_err(|e| format!("Failed to rebuild model: {e}"))?;

    Ok((data, model))
}
