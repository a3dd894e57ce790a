use super::criteria::CriterionSet;
use crate::types::{CandidateId, CriterionId, Score};

/// Dense candidate x criterion matrix for one selection call.
///
/// Rows follow the order of the requested candidate list, not global ids.
/// Columns `0..p` hold the requested primary criteria in request order and
/// columns `p..p+a` hold every auxiliary criterion.
#[derive(Debug, Default)]
pub struct ScoreTable {
    scores: Vec<Score>,
    num_rows: usize,
    num_cols: usize,
    num_primary: usize,
}

impl ScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite every cell by calling the bound criteria.
    pub fn rebuild(
        &mut self,
        criteria: &CriterionSet,
        candidate_ids: &[CandidateId],
        criterion_ids: &[CriterionId],
    ) {
        self.num_rows = candidate_ids.len();
        self.num_primary = criterion_ids.len();
        self.num_cols = criterion_ids.len() + criteria.num_auxiliary();

        self.scores.clear();
        self.scores.reserve(self.num_rows * self.num_cols);
        for &cand_id in candidate_ids {
            for &crit_id in criterion_ids {
                self.scores.push(criteria.primary_score(cand_id, crit_id));
            }
            for aux_id in 0..criteria.num_auxiliary() {
                self.scores.push(criteria.auxiliary_score(cand_id, aux_id));
            }
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Score {
        debug_assert!(row < self.num_rows && col < self.num_cols);
        self.scores[row * self.num_cols + col]
    }

    pub fn row(&self, row: usize) -> &[Score] {
        &self.scores[row * self.num_cols..(row + 1) * self.num_cols]
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    pub fn num_primary(&self) -> usize {
        self.num_primary
    }

    pub fn num_auxiliary(&self) -> usize {
        self.num_cols - self.num_primary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::selection::criteria::Criterion;

    fn grid_criteria() -> CriterionSet<'static> {
        // candidate c, test t scores c * 10 + t; auxiliary scores -c
        let primary = (0..4)
            .map(|c| {
                (0..3)
                    .map(|t| Box::new(move || (c * 10 + t) as f64) as Criterion)
                    .collect()
            })
            .collect();
        let auxiliary = (0..4)
            .map(|c| vec![Box::new(move || -(c as f64)) as Criterion])
            .collect();
        CriterionSet::new(primary, auxiliary).unwrap()
    }

    #[test]
    fn test_rows_follow_requested_order() {
        let criteria = grid_criteria();
        let mut table = ScoreTable::new();
        table.rebuild(&criteria, &[3, 1], &[2, 0]);

        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.num_cols(), 3);
        assert_eq!(table.row(0), &[32.0, 30.0, -3.0]);
        assert_eq!(table.row(1), &[12.0, 10.0, -1.0]);
    }

    #[test]
    fn test_rebuild_discards_previous_contents() {
        let criteria = grid_criteria();
        let mut table = ScoreTable::new();
        table.rebuild(&criteria, &[0, 1, 2, 3], &[0, 1, 2]);
        table.rebuild(&criteria, &[2], &[1]);

        assert_eq!(table.num_rows(), 1);
        assert_eq!(table.num_primary(), 1);
        assert_eq!(table.num_auxiliary(), 1);
        assert_eq!(table.row(0), &[21.0, -2.0]);
    }
}
