/// Global id of a candidate (organism position in the population).
pub type CandidateId = usize;

/// Id of a primary criterion (one per test case).
pub type CriterionId = usize;

/// Id of a test case.
pub type TestId = usize;

/// Scalar score produced by a criterion. Higher is better.
pub type Score = f64;
