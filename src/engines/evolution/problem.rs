use crate::engines::injection::BitSignature;
use crate::engines::recombination::Program;
use crate::types::{Score, TestId};
use rand::Rng;

/// Outcome of evaluating one program on every test case.
#[derive(Debug, Clone, PartialEq)]
pub struct Phenotype {
    /// Per-test score; 0 means failed or untested.
    pub scores: Vec<Score>,
    pub passes: BitSignature,
}

impl Phenotype {
    pub fn new(scores: Vec<Score>, passes: BitSignature) -> Self {
        assert_eq!(scores.len(), passes.width(), "one score per test");
        Self { scores, passes }
    }

    /// Scores of 1.0 for passed tests and 0.0 for failed ones.
    pub fn from_pass_fail(passed: &[bool]) -> Self {
        Self {
            scores: passed.iter().map(|&p| if p { 1.0 } else { 0.0 }).collect(),
            passes: BitSignature::from_bools(passed),
        }
    }

    pub fn passed(&self, test_id: TestId) -> bool {
        self.passes.get(test_id)
    }

    pub fn num_passes(&self) -> usize {
        self.passes.count_ones()
    }

    pub fn aggregate_score(&self) -> Score {
        self.scores.iter().sum()
    }

    /// Keep only the results for `test_ids`; every other test reads as
    /// untested (score 0, not passed).
    pub fn restricted_to(&self, test_ids: &[TestId]) -> Self {
        let mut scores = vec![0.0; self.scores.len()];
        let mut passes = BitSignature::new(self.passes.width());
        for &test_id in test_ids {
            scores[test_id] = self.scores[test_id];
            passes.set(test_id, self.passes.get(test_id));
        }
        Self { scores, passes }
    }
}

/// The problem-specific collaborator: runs programs against test cases,
/// generates fresh programs and optionally mutates offspring.
pub trait Problem<I, T> {
    fn num_tests(&self) -> usize;

    /// Run the program on every test.
    fn evaluate(&self, program: &Program<I, T>) -> Phenotype;

    /// Run the program on `test_ids` only. Problems with expensive tests
    /// should override this; the default evaluates everything and masks.
    fn evaluate_tests(&self, program: &Program<I, T>, test_ids: &[TestId]) -> Phenotype {
        let phenotype = self.evaluate(program);
        if test_ids.len() == self.num_tests() {
            phenotype
        } else {
            phenotype.restricted_to(test_ids)
        }
    }

    /// A new random program, used by random injection.
    fn random_program<R: Rng + ?Sized>(&self, rng: &mut R) -> Program<I, T>;

    fn mutate<R: Rng + ?Sized>(&self, _program: &mut Program<I, T>, _rng: &mut R) {}
}
