//! Recombination operators for linear-functions programs.

pub mod genome;
pub mod two_point;
pub mod whole_function;

pub use genome::{Function, Genome, Program};
pub use two_point::{apply_function_sequence_two_point, find_two_points, splice_two_point};
pub use whole_function::apply_whole_function_swap;

use crate::config::traits::check_rate;
use crate::config::RecombinationConfig;
use crate::error::PsynthError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Match functions of two programs and decide which pairs to recombine.
///
/// Both index lists are shuffled independently and zipped up to the shorter
/// program's length. Pair 0 is always kept; later pairs are kept with
/// probability `rate`.
pub(crate) fn matched_pairs<R: Rng + ?Sized>(
    len_1: usize,
    len_2: usize,
    rate: f64,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    assert!(len_1 > 0 && len_2 > 0, "recombination needs two non-empty programs");

    let mut ids_1: Vec<usize> = (0..len_1).collect();
    let mut ids_2: Vec<usize> = (0..len_2).collect();
    ids_1.shuffle(rng);
    ids_2.shuffle(rng);

    ids_1
        .into_iter()
        .zip(ids_2)
        .enumerate()
        .filter_map(|(i, pair)| (i == 0 || rng.gen_bool(rate)).then_some(pair))
        .collect()
}

/// Holds the per-pair application rates for both recombination operators.
#[derive(Debug, Clone, Default)]
pub struct Recombiner {
    func_seq_recomb_rate: f64,
    whole_func_swap_rate: f64,
}

impl Recombiner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RecombinationConfig) -> Result<Self, PsynthError> {
        let mut recombiner = Self::new();
        recombiner.set_func_seq_recomb_rate(config.per_func_seq_recomb_rate)?;
        recombiner.set_whole_func_swap_rate(config.whole_func_swap_rate)?;
        Ok(recombiner)
    }

    pub fn set_func_seq_recomb_rate(&mut self, rate: f64) -> Result<(), PsynthError> {
        check_rate("Per-function sequence recombination rate", rate)?;
        self.func_seq_recomb_rate = rate;
        Ok(())
    }

    pub fn set_whole_func_swap_rate(&mut self, rate: f64) -> Result<(), PsynthError> {
        check_rate("Whole-function swap rate", rate)?;
        self.whole_func_swap_rate = rate;
        Ok(())
    }

    pub fn func_seq_recomb_rate(&self) -> f64 {
        self.func_seq_recomb_rate
    }

    pub fn whole_func_swap_rate(&self) -> f64 {
        self.whole_func_swap_rate
    }

    pub fn apply_two_point<I: Clone, T, R: Rng + ?Sized>(
        &self,
        program_1: &mut Program<I, T>,
        program_2: &mut Program<I, T>,
        rng: &mut R,
    ) -> usize {
        apply_function_sequence_two_point(self.func_seq_recomb_rate, program_1, program_2, rng)
    }

    pub fn apply_whole_function<I, T, R: Rng + ?Sized>(
        &self,
        program_1: &mut Program<I, T>,
        program_2: &mut Program<I, T>,
        rng: &mut R,
    ) -> usize {
        apply_whole_function_swap(self.whole_func_swap_rate, program_1, program_2, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_first_pair_always_matched() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let pairs = matched_pairs(3, 8, 0.0, &mut rng);
            assert_eq!(pairs.len(), 1);
            assert!(pairs[0].0 < 3 && pairs[0].1 < 8);
        }
    }

    #[test]
    fn test_full_rate_matches_shorter_length() {
        let mut rng = StdRng::seed_from_u64(1);
        let pairs = matched_pairs(3, 8, 1.0, &mut rng);
        assert_eq!(pairs.len(), 3);

        let mut left: Vec<_> = pairs.iter().map(|p| p.0).collect();
        left.sort_unstable();
        assert_eq!(left, vec![0, 1, 2]);

        let mut right: Vec<_> = pairs.iter().map(|p| p.1).collect();
        right.sort_unstable();
        right.dedup();
        assert_eq!(right.len(), 3);
    }

    #[test]
    fn test_rejects_invalid_rates() {
        let mut recombiner = Recombiner::new();
        assert!(recombiner.set_func_seq_recomb_rate(-0.1).is_err());
        assert!(recombiner.set_whole_func_swap_rate(1.1).is_err());
        assert!(recombiner.set_whole_func_swap_rate(0.8).is_ok());
        assert_eq!(recombiner.whole_func_swap_rate(), 0.8);
    }
}
