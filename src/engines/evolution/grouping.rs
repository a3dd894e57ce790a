use crate::config::{EvaluationConfig, EvaluationMode};
use crate::engines::selection::Selector;
use crate::types::{CandidateId, TestId};
use rand::seq::SliceRandom;
use rand::Rng;

/// Organism and test groups for one update. Organisms in group `g` are
/// evaluated, and selected, on the tests in group `g` only.
#[derive(Debug, Clone, PartialEq)]
pub struct Groupings {
    org_groups: Vec<Vec<CandidateId>>,
    test_groups: Vec<Vec<TestId>>,
    org_group_of: Vec<usize>,
}

impl Groupings {
    /// One group holding every organism and every test.
    pub fn single(num_orgs: usize, num_tests: usize) -> Self {
        Self::from_groups(vec![(0..num_orgs).collect()], vec![(0..num_tests).collect()], num_orgs)
    }

    /// Draw this update's groups.
    ///
    /// Cohort mode shuffles organisms and tests and deals each into
    /// `num_cohorts` near-equal cohorts (the first cohorts take the
    /// remainder). Down-sample mode keeps one organism group and samples
    /// `max(1, floor(rate * num_tests))` distinct tests.
    pub fn assign<R: Rng + ?Sized>(
        config: &EvaluationConfig,
        num_orgs: usize,
        num_tests: usize,
        rng: &mut R,
    ) -> Self {
        match config.mode {
            EvaluationMode::Full => Self::single(num_orgs, num_tests),
            EvaluationMode::Cohort => {
                assert!(
                    config.num_cohorts >= 1 && config.num_cohorts <= num_orgs,
                    "cannot split {} organisms into {} cohorts",
                    num_orgs,
                    config.num_cohorts
                );
                let org_groups = shuffled_cohorts(num_orgs, config.num_cohorts, rng);
                let test_groups = shuffled_cohorts(num_tests, config.num_cohorts, rng);
                Self::from_groups(org_groups, test_groups, num_orgs)
            }
            EvaluationMode::DownSample => {
                let sample_size = if num_tests == 0 {
                    0
                } else {
                    ((config.downsample_rate * num_tests as f64) as usize).clamp(1, num_tests)
                };
                let mut tests: Vec<TestId> = (0..num_tests).collect();
                tests.shuffle(rng);
                tests.truncate(sample_size);
                tests.sort_unstable();
                Self::from_groups(vec![(0..num_orgs).collect()], vec![tests], num_orgs)
            }
        }
    }

    fn from_groups(
        org_groups: Vec<Vec<CandidateId>>,
        test_groups: Vec<Vec<TestId>>,
        num_orgs: usize,
    ) -> Self {
        debug_assert_eq!(org_groups.len(), test_groups.len());
        let mut org_group_of = vec![0; num_orgs];
        for (group_id, members) in org_groups.iter().enumerate() {
            for &org_id in members {
                org_group_of[org_id] = group_id;
            }
        }
        Self {
            org_groups,
            test_groups,
            org_group_of,
        }
    }

    pub fn num_groups(&self) -> usize {
        self.org_groups.len()
    }

    pub fn org_group(&self, group_id: usize) -> &[CandidateId] {
        &self.org_groups[group_id]
    }

    pub fn test_group(&self, group_id: usize) -> &[TestId] {
        &self.test_groups[group_id]
    }

    /// Tests the organism is evaluated on this update.
    pub fn tests_for(&self, org_id: CandidateId) -> &[TestId] {
        &self.test_groups[self.org_group_of[org_id]]
    }

    /// Select up to `num_to_select` parents, group by group: each group
    /// contributes as many parents as it has organisms until the quota runs
    /// out. Parents come back grouped in group order.
    pub fn select<R: Rng + ?Sized>(
        &self,
        selector: &mut Selector<'_>,
        num_to_select: usize,
        rng: &mut R,
    ) -> Vec<CandidateId> {
        let mut selected = Vec::with_capacity(num_to_select);
        for (orgs, tests) in self.org_groups.iter().zip(&self.test_groups) {
            let n = orgs.len().min(num_to_select - selected.len());
            if n == 0 {
                if selected.len() == num_to_select {
                    break;
                }
                continue;
            }
            selected.extend(selector.select(n, orgs, tests, rng));
        }
        log::debug!(
            "Selected {} parents across {} groups",
            selected.len(),
            self.num_groups()
        );
        selected
    }
}

fn shuffled_cohorts<R: Rng + ?Sized>(
    count: usize,
    num_cohorts: usize,
    rng: &mut R,
) -> Vec<Vec<usize>> {
    let mut ids: Vec<usize> = (0..count).collect();
    ids.shuffle(rng);

    let base = count / num_cohorts;
    let extra = count % num_cohorts;
    let mut rest = ids.as_slice();
    (0..num_cohorts)
        .map(|cohort| {
            let size = base + usize::from(cohort < extra);
            let (members, tail) = rest.split_at(size);
            rest = tail;
            let mut members = members.to_vec();
            members.sort_unstable();
            members
        })
        .collect()
}
