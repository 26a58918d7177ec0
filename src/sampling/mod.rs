//! Multinomial sampling primitives and name generation.
//!
//! Generation walks the bigram chain: start at the boundary symbol, draw
//! the next symbol from the current row of the probability matrix, and
//! stop when the boundary comes up again.
//!
//! ## Multinomial Decomposition
//!
//! A multinomial draw over k outcomes is decomposed into at most k-1
//! sequential binomial draws with renormalized probabilities:
//! ```text
//! X_i ~ Binomial(n - Σ_{j<i} X_j,  p_i / (1 - Σ_{j<i} p_j))
//! ```
//! The last outcome absorbs whatever trials remain. Each binomial draw
//! runs its trials as one uniform draw apiece, so the number of uniform
//! draws consumed is a deterministic function of the outcome sequence.
//! That makes generation exactly reproducible from a seed.

use ndarray::ArrayView1;
use rand::distributions::Open01;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::core::{BigramModel, ModelError, ModelResult};

/// Default cap on generated name length, in letters.
pub const DEFAULT_MAX_LEN: usize = 256;

/// One uniform draw in the open interval (0, 1).
///
/// Both endpoints are excluded, so a probability-zero outcome can never
/// win a trial and a probability-one outcome can never lose it.
pub fn unit_open<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.sample(Open01)
}

/// Draw from Binomial(n, p) as n explicit Bernoulli trials.
///
/// Each trial consumes exactly one uniform draw and succeeds when the
/// draw falls below `p`. The per-trial structure is part of the sampling
/// contract, not an implementation detail: the multinomial decomposition
/// and seed reproducibility both depend on it.
pub fn binomial<R: Rng + ?Sized>(rng: &mut R, n: u64, p: f64) -> u64 {
    let mut successes = 0;
    for _ in 0..n {
        if unit_open(rng) < p {
            successes += 1;
        }
    }
    successes
}

/// Draw from Multinomial(n, row) by sequential binomial decomposition.
///
/// # Algorithm
/// Walk outcomes left to right. For each outcome, renormalize its
/// probability against the mass not yet allocated, draw a binomial over
/// the remaining trials, and subtract. The final outcome takes whatever
/// trials are left, so the result always sums to `n`.
///
/// Ties are impossible by construction: every trial lands in exactly one
/// outcome, in index order.
pub fn multinomial<R: Rng + ?Sized>(rng: &mut R, n: u64, row: ArrayView1<'_, f64>) -> Vec<u64> {
    let k = row.len();
    let mut out = vec![0u64; k];
    if k == 0 {
        return out;
    }

    let mut remaining = n;
    let mut mass_left = 1.0f64;
    for i in 0..k - 1 {
        let p_cond = row[i] / mass_left;
        let drawn = binomial(rng, remaining, p_cond);
        out[i] = drawn;
        remaining -= drawn;
        mass_left -= row[i];
    }
    out[k - 1] = remaining;
    out
}

/// Draws names from a fitted model, one symbol at a time.
///
/// Borrows the model so one probability matrix serves any number of
/// generation calls. The length cap turns a chain stuck on letters into
/// an error instead of an unbounded loop.
#[derive(Debug, Clone, Copy)]
pub struct Sampler<'m> {
    model: &'m BigramModel,
    max_len: usize,
}

impl<'m> Sampler<'m> {
    /// Sampler with the default length cap.
    pub fn new(model: &'m BigramModel) -> Self {
        Self::with_max_len(model, DEFAULT_MAX_LEN)
    }

    /// Sampler with an explicit length cap, in letters.
    pub fn with_max_len(model: &'m BigramModel, max_len: usize) -> Self {
        Self { model, max_len }
    }

    /// The model this sampler draws from.
    pub fn model(&self) -> &'m BigramModel {
        self.model
    }

    /// Generate one name.
    ///
    /// Starts at the boundary symbol, repeatedly draws a single-trial
    /// multinomial over the current row, and finishes when the boundary
    /// is drawn again. The boundary itself is never emitted.
    ///
    /// # Errors
    /// - `DeadEndState` if the walk reaches a symbol whose row has no
    ///   observed transitions (all-zero probability row)
    /// - `NameTooLong` if the cap fills before the boundary is drawn
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> ModelResult<String> {
        let alphabet = self.model.alphabet();
        let probs = self.model.probabilities();
        let boundary = alphabet.boundary();

        let mut current = boundary;
        let mut letters: Vec<char> = Vec::new();
        loop {
            let row = probs.row(current);
            if row.sum() == 0.0 {
                return Err(ModelError::DeadEndState(current));
            }

            let draw = multinomial(rng, 1, row);
            // The single trial lands in exactly one outcome.
            let next = draw
                .iter()
                .position(|&c| c > 0)
                .unwrap_or(self.model.size() - 1);

            if next == boundary {
                break;
            }
            if letters.len() == self.max_len {
                return Err(ModelError::NameTooLong { cap: self.max_len });
            }
            letters.push(alphabet.chars()[next]);
            current = next;
        }

        Ok(letters.into_iter().collect())
    }
}

/// Generate `count` names from one sequential random stream.
///
/// Name i+1 picks up the stream exactly where name i left off, so a fixed
/// seed reproduces the whole batch.
///
/// # Errors
/// Stops at the first name that fails; see [`Sampler::generate`].
pub fn generate_names<R: Rng + ?Sized>(
    sampler: &Sampler<'_>,
    rng: &mut R,
    count: usize,
) -> ModelResult<Vec<String>> {
    let mut names = Vec::with_capacity(count);
    for _ in 0..count {
        names.push(sampler.generate(rng)?);
    }
    Ok(names)
}

/// Generate `count` names in parallel, one derived stream per name.
///
/// Name i draws from `StdRng` seeded with `base_seed + i`, so the batch
/// is deterministic for a fixed base seed and independent of thread
/// scheduling. The sequence differs from the single-stream path.
///
/// # Errors
/// Fails if any name fails; see [`Sampler::generate`].
pub fn generate_names_parallel(
    sampler: &Sampler<'_>,
    base_seed: u64,
    count: usize,
) -> ModelResult<Vec<String>> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(i as u64));
            sampler.generate(&mut rng)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Alphabet, Corpus, TokenizedName};
    use ndarray::{arr1, Array2};
    use rand::RngCore;

    /// Wraps an RNG and counts how many words it hands out.
    struct CountingRng {
        inner: StdRng,
        draws: usize,
    }

    impl CountingRng {
        fn seeded(seed: u64) -> Self {
            Self {
                inner: StdRng::seed_from_u64(seed),
                draws: 0,
            }
        }
    }

    impl RngCore for CountingRng {
        fn next_u32(&mut self) -> u32 {
            self.draws += 1;
            self.inner.next_u32()
        }

        fn next_u64(&mut self) -> u64 {
            self.draws += 1;
            self.inner.next_u64()
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            self.inner.fill_bytes(dest);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.inner.try_fill_bytes(dest)
        }
    }

    fn model_from(names: &[&str]) -> BigramModel {
        let alphabet = Alphabet::lowercase();
        let corpus = Corpus {
            names: names
                .iter()
                .map(|n| TokenizedName::encode(n, &alphabet).expect("valid name"))
                .collect(),
            skipped: 0,
        };
        BigramModel::fit(alphabet, &corpus).expect("fit")
    }

    #[test]
    fn test_unit_open_stays_in_open_interval() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let u = unit_open(&mut rng);
            assert!(u > 0.0 && u < 1.0, "draw {} outside (0,1)", u);
        }
    }

    #[test]
    fn test_binomial_degenerate_probabilities() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(binomial(&mut rng, 100, 0.0), 0);
        assert_eq!(binomial(&mut rng, 100, 1.0), 100);
        assert_eq!(binomial(&mut rng, 0, 0.5), 0);
    }

    #[test]
    fn test_binomial_consumes_one_draw_per_trial() {
        let mut rng = CountingRng::seeded(7);
        binomial(&mut rng, 17, 0.5);
        assert_eq!(rng.draws, 17);
    }

    #[test]
    fn test_binomial_statistical() {
        let mut rng = StdRng::seed_from_u64(7);
        let successes = binomial(&mut rng, 10_000, 0.5);
        // ~50 standard deviations of slack; a correct sampler cannot miss this.
        assert!((2500..=7500).contains(&successes), "got {}", successes);
    }

    #[test]
    fn test_multinomial_sums_to_n() {
        let mut rng = StdRng::seed_from_u64(7);
        let row = arr1(&[0.2, 0.3, 0.5]);
        let out = multinomial(&mut rng, 1000, row.view());
        assert_eq!(out.iter().sum::<u64>(), 1000);
    }

    #[test]
    fn test_multinomial_single_trial_single_winner() {
        let mut rng = StdRng::seed_from_u64(7);
        let row = arr1(&[0.25; 4]);
        for _ in 0..100 {
            let out = multinomial(&mut rng, 1, row.view());
            assert_eq!(out.iter().sum::<u64>(), 1);
            assert_eq!(out.iter().filter(|&&c| c > 0).count(), 1);
        }
    }

    #[test]
    fn test_multinomial_certain_outcome_draw_count() {
        // Probability 1 on the first outcome: one trial, one draw, done.
        let mut rng = CountingRng::seeded(7);
        let row = arr1(&[1.0, 0.0, 0.0]);
        let out = multinomial(&mut rng, 1, row.view());
        assert_eq!(out, vec![1, 0, 0]);
        assert_eq!(rng.draws, 1);

        // Probability 1 on the second outcome: the first trial fails
        // (draws stay above zero), the renormalized second succeeds.
        let mut rng = CountingRng::seeded(7);
        let row = arr1(&[0.0, 1.0, 0.0]);
        let out = multinomial(&mut rng, 1, row.view());
        assert_eq!(out, vec![0, 1, 0]);
        assert_eq!(rng.draws, 2);
    }

    #[test]
    fn test_multinomial_last_outcome_absorbs_remainder() {
        let mut rng = StdRng::seed_from_u64(7);
        let row = arr1(&[0.0, 0.0, 1.0]);
        let out = multinomial(&mut rng, 5, row.view());
        assert_eq!(out, vec![0, 0, 5]);
    }

    #[test]
    fn test_multinomial_statistical_split() {
        let mut rng = StdRng::seed_from_u64(7);
        let row = arr1(&[0.5, 0.5]);
        let out = multinomial(&mut rng, 10_000, row.view());
        assert!((4000..=6000).contains(&out[0]), "got {:?}", out);
    }

    #[test]
    fn test_generate_single_path_chain() {
        // With only "ab" observed, every walk is .ab. and every name "ab".
        let model = model_from(&["ab"]);
        let sampler = Sampler::new(&model);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(sampler.generate(&mut rng).expect("generate"), "ab");
        }
    }

    #[test]
    fn test_generate_uses_alphabet_letters_only() {
        let model = model_from(&["emma", "olivia", "ava", "mia", "sophia"]);
        let sampler = Sampler::new(&model);
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let name = sampler.generate(&mut rng).expect("generate");
            assert!(name.chars().all(|c| c.is_ascii_lowercase()), "{:?}", name);
        }
    }

    #[test]
    fn test_generate_deterministic_for_seed() {
        let model = model_from(&["emma", "olivia", "ava"]);
        let sampler = Sampler::new(&model);

        let mut a = StdRng::seed_from_u64(99);
        let mut b = StdRng::seed_from_u64(99);
        let first: Vec<String> = (0..30).map(|_| sampler.generate(&mut a).unwrap()).collect();
        let second: Vec<String> = (0..30).map(|_| sampler.generate(&mut b).unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_generate_dead_end_row_is_an_error() {
        // 'a' was only ever seen as a name start, so row 0 is all-zero.
        let alphabet = Alphabet::lowercase();
        let mut counts = Array2::<u64>::zeros((27, 27));
        counts[[26, 0]] = 1;
        let model = BigramModel::from_counts(alphabet, counts).expect("build");

        let sampler = Sampler::new(&model);
        let mut rng = StdRng::seed_from_u64(7);
        let result = sampler.generate(&mut rng);
        assert!(matches!(result, Err(ModelError::DeadEndState(0))));
    }

    #[test]
    fn test_generate_length_cap_is_an_error() {
        // 'a' always follows 'a': the walk can never reach the boundary.
        let alphabet = Alphabet::lowercase();
        let mut counts = Array2::<u64>::zeros((27, 27));
        counts[[26, 0]] = 1;
        counts[[0, 0]] = 1;
        let model = BigramModel::from_counts(alphabet, counts).expect("build");

        let sampler = Sampler::with_max_len(&model, 5);
        let mut rng = StdRng::seed_from_u64(7);
        let result = sampler.generate(&mut rng);
        assert!(matches!(result, Err(ModelError::NameTooLong { cap: 5 })));
    }

    #[test]
    fn test_generate_names_shares_one_stream() {
        let model = model_from(&["emma", "olivia", "ava"]);
        let sampler = Sampler::new(&model);

        let mut rng = StdRng::seed_from_u64(7);
        let batch = generate_names(&sampler, &mut rng, 10).expect("batch");

        let mut rng = StdRng::seed_from_u64(7);
        let manual: Vec<String> = (0..10).map(|_| sampler.generate(&mut rng).unwrap()).collect();
        assert_eq!(batch, manual);
    }

    #[test]
    fn test_generate_names_parallel_deterministic() {
        let model = model_from(&["emma", "olivia", "ava", "mia"]);
        let sampler = Sampler::new(&model);

        let first = generate_names_parallel(&sampler, 7, 50).expect("batch");
        let second = generate_names_parallel(&sampler, 7, 50).expect("batch");
        assert_eq!(first, second);
        assert_eq!(first.len(), 50);
    }

    #[test]
    fn test_generate_names_parallel_matches_per_name_seeds() {
        let model = model_from(&["emma", "olivia", "ava", "mia"]);
        let sampler = Sampler::new(&model);

        let batch = generate_names_parallel(&sampler, 100, 8).expect("batch");
        for (i, name) in batch.iter().enumerate() {
            let mut rng = StdRng::seed_from_u64(100 + i as u64);
            assert_eq!(&sampler.generate(&mut rng).expect("generate"), name);
        }
    }
}
