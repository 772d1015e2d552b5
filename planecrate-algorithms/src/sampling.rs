//! Random consensus sampling

use planecrate_core::{Error, Result};
use rand::Rng;

/// Default number of draws allowed per requested index before giving up
pub const MAX_SAMPLING_ATTEMPTS_PER_INDEX: usize = 100;

/// Draws distinct random indices by rejection sampling with a bounded budget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsensusSampler {
    pub max_attempts_per_index: usize,
}

impl Default for ConsensusSampler {
    fn default() -> Self {
        Self {
            max_attempts_per_index: MAX_SAMPLING_ATTEMPTS_PER_INDEX,
        }
    }
}

impl ConsensusSampler {
    /// Draw `k` distinct indices uniformly from `0..population`.
    ///
    /// Duplicates are rejected and redrawn. At most
    /// `k * max_attempts_per_index` draws are made; running out fails with
    /// [`Error::SamplingExhausted`].
    pub fn sample<R: Rng + ?Sized>(
        &self,
        k: usize,
        population: usize,
        rng: &mut R,
    ) -> Result<Vec<usize>> {
        if k > population {
            return Err(Error::SampleSizeExceedsPopulation {
                requested: k,
                population,
            });
        }

        let mut indices = Vec::with_capacity(k);
        let budget = k.saturating_mul(self.max_attempts_per_index);
        let mut attempts = 0;

        while indices.len() < k {
            if attempts >= budget {
                return Err(Error::SamplingExhausted {
                    requested: k,
                    drawn: indices.len(),
                });
            }
            attempts += 1;

            let index = rng.gen_range(0..population);
            if !indices.contains(&index) {
                indices.push(index);
            }
        }

        Ok(indices)
    }
}

/// Draw `k` distinct indices from `0..population` with the default budget
pub fn sample_indices<R: Rng + ?Sized>(
    k: usize,
    population: usize,
    rng: &mut R,
) -> Result<Vec<usize>> {
    ConsensusSampler::default().sample(k, population, rng)
}
