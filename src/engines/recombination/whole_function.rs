use super::genome::Program;
use super::matched_pairs;
use rand::Rng;

/// Swap whole functions (tag and instructions) between two programs.
///
/// Uses the same matching as two-point crossover: the first matched pair is
/// always swapped and every later pair with probability `rate`. Returns the
/// number of swapped pairs.
pub fn apply_whole_function_swap<I, T, R>(
    rate: f64,
    program_1: &mut Program<I, T>,
    program_2: &mut Program<I, T>,
    rng: &mut R,
) -> usize
where
    R: Rng + ?Sized,
{
    let pairs = matched_pairs(program_1.len(), program_2.len(), rate, rng);
    for &(f1_id, f2_id) in &pairs {
        std::mem::swap(&mut program_1[f1_id], &mut program_2[f2_id]);
    }
    pairs.len()
}
