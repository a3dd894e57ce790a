use crate::types::{CandidateId, TestId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Summary of one generation's selected parents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectedStatistics {
    pub num_unique_cand_selected: usize,
    pub entropy_cand_selected: f64,
    pub parents_num_tests_covered: usize,
    pub parent_test_coverage: Vec<bool>,
    pub parent_genome_ages: Vec<usize>,
}

impl SelectedStatistics {
    /// `passed(candidate, test)` reports whether a candidate passes a test and
    /// `age(candidate)` its genome age.
    pub fn calculate<P, A>(selected: &[CandidateId], num_tests: usize, passed: P, age: A) -> Self
    where
        P: Fn(CandidateId, TestId) -> bool,
        A: Fn(CandidateId) -> usize,
    {
        let mut counts: BTreeMap<CandidateId, usize> = BTreeMap::new();
        for &id in selected {
            *counts.entry(id).or_insert(0) += 1;
        }

        let parent_test_coverage: Vec<bool> = (0..num_tests)
            .map(|test_id| selected.iter().any(|&id| passed(id, test_id)))
            .collect();

        Self {
            num_unique_cand_selected: counts.len(),
            entropy_cand_selected: shannon_entropy(counts.values().copied(), selected.len()),
            parents_num_tests_covered: parent_test_coverage.iter().filter(|&&c| c).count(),
            parent_test_coverage,
            parent_genome_ages: selected.iter().map(|&id| age(id)).collect(),
        }
    }
}

/// Shannon entropy (bits) of a distribution given by occurrence counts.
fn shannon_entropy(counts: impl Iterator<Item = usize>, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    counts
        .map(|count| {
            let p = count as f64 / total as f64;
            -p * p.log2()
        })
        .sum()
}
