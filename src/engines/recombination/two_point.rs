use super::genome::Program;
use super::matched_pairs;
use rand::Rng;

/// Pick an inclusive cut range `(start, end)` in a sequence of `length` items.
///
/// A length-1 sequence always yields `(0, 0)`. For longer sequences the result
/// satisfies `start < end < length`: two uniform draws are ordered, and a
/// repeated draw is widened toward the front or back edge.
///
/// # Panics
///
/// Panics if `length == 0`.
pub fn find_two_points<R: Rng + ?Sized>(length: usize, rng: &mut R) -> (usize, usize) {
    assert!(length > 0, "cannot pick cut points in an empty function");
    if length == 1 {
        return (0, 0);
    }

    let x = rng.gen_range(0..length);
    let y = rng.gen_range(0..length);
    let (mut start, mut end) = if x <= y { (x, y) } else { (y, x) };

    if start == end {
        if start == 0 {
            end = rng.gen_range(1..length);
        } else if end == length - 1 {
            start = end - rng.gen_range(1..length);
        } else {
            start = 0;
        }
    }

    (start, end)
}

/// Exchange the inclusive fragments `cut_1` of `seq_1` and `cut_2` of `seq_2`.
///
/// Returns `(seq_1[..s1] ++ seq_2[s2..=e2] ++ seq_1[e1+1..],
///           seq_2[..s2] ++ seq_1[s1..=e1] ++ seq_2[e2+1..])`.
pub fn splice_two_point<I: Clone>(
    seq_1: &[I],
    seq_2: &[I],
    cut_1: (usize, usize),
    cut_2: (usize, usize),
) -> (Vec<I>, Vec<I>) {
    let (s1, e1) = cut_1;
    let (s2, e2) = cut_2;
    assert!(s1 <= e1 && e1 < seq_1.len(), "cut {:?} out of range", cut_1);
    assert!(s2 <= e2 && e2 < seq_2.len(), "cut {:?} out of range", cut_2);

    let mut child_1 = Vec::with_capacity(s1 + (e2 - s2 + 1) + (seq_1.len() - e1 - 1));
    child_1.extend_from_slice(&seq_1[..s1]);
    child_1.extend_from_slice(&seq_2[s2..=e2]);
    child_1.extend_from_slice(&seq_1[e1 + 1..]);

    let mut child_2 = Vec::with_capacity(s2 + (e1 - s1 + 1) + (seq_2.len() - e2 - 1));
    child_2.extend_from_slice(&seq_2[..s2]);
    child_2.extend_from_slice(&seq_1[s1..=e1]);
    child_2.extend_from_slice(&seq_2[e2 + 1..]);

    (child_1, child_2)
}

/// Two-point crossover between matched functions of two programs.
///
/// Functions are matched by shuffling each program's function indices and
/// pairing them up. The first pair is always recombined; every later pair with
/// probability `rate`. Tags stay with their slot; only instructions move.
/// Returns the number of recombined pairs.
pub fn apply_function_sequence_two_point<I, T, R>(
    rate: f64,
    program_1: &mut Program<I, T>,
    program_2: &mut Program<I, T>,
    rng: &mut R,
) -> usize
where
    I: Clone,
    R: Rng + ?Sized,
{
    let pairs = matched_pairs(program_1.len(), program_2.len(), rate, rng);
    for &(f1_id, f2_id) in &pairs {
        let cut_1 = find_two_points(program_1[f1_id].len(), rng);
        let cut_2 = find_two_points(program_2[f2_id].len(), rng);
        let (new_1, new_2) = splice_two_point(
            program_1[f1_id].instructions(),
            program_2[f2_id].instructions(),
            cut_1,
            cut_2,
        );
        log::trace!(
            "Two-point: p1[{}] {:?} <-> p2[{}] {:?}",
            f1_id,
            cut_1,
            f2_id,
            cut_2
        );
        program_1[f1_id].set_instructions(new_1);
        program_2[f2_id].set_instructions(new_2);
    }
    pairs.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_length_one_is_noop_cut() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..100 {
            assert_eq!(find_two_points(1, &mut rng), (0, 0));
        }
    }

    #[test]
    fn test_cuts_are_strict_and_in_range() {
        let mut rng = StdRng::seed_from_u64(2);
        for length in 2..12 {
            for _ in 0..2_000 {
                let (start, end) = find_two_points(length, &mut rng);
                assert!(start < end, "({}, {}) for length {}", start, end, length);
                assert!(end < length, "({}, {}) for length {}", start, end, length);
            }
        }
    }

    #[test]
    fn test_cuts_reach_both_edges() {
        let mut rng = StdRng::seed_from_u64(5);
        let cuts: Vec<_> = (0..2_000).map(|_| find_two_points(6, &mut rng)).collect();
        assert!(cuts.iter().any(|&(s, _)| s == 0));
        assert!(cuts.iter().any(|&(_, e)| e == 5));
    }

    #[test]
    fn test_splice_lengths() {
        let f1: Vec<u32> = (0..5).collect();
        let f2: Vec<u32> = (10..14).collect();

        let (c1, c2) = splice_two_point(&f1, &f2, (1, 3), (0, 2));

        assert_eq!(c1.len(), 1 + 3 + 1);
        assert_eq!(c1, vec![0, 10, 11, 12, 4]);
        assert_eq!(c2.len(), 3 + 1);
        assert_eq!(c2, vec![1, 2, 3, 13]);
    }

    #[test]
    fn test_splice_with_noop_cut() {
        let (c1, c2) = splice_two_point(&['a'], &['x', 'y', 'z'], (0, 0), (1, 2));
        assert_eq!(c1, vec!['y', 'z']);
        assert_eq!(c2, vec!['x', 'a']);
    }
}
