use super::criteria::CriterionSet;
use super::ordering::OrderingComposer;
use super::score_table::ScoreTable;
use crate::error::PsynthError;
use crate::types::{CandidateId, CriterionId};
use rand::Rng;

/// Lexicase selection over primary criteria, optionally with auxiliary
/// criteria (such as negative genome age) constrained to an ordering prefix.
///
/// For every winner a fresh criterion ordering is drawn and the candidate pool
/// is filtered criterion by criterion, keeping only the members with the best
/// score. Remaining ties are broken uniformly at random.
pub struct LexicaseSelect<'a> {
    criteria: CriterionSet<'a>,
    order_limit: usize,
    table: ScoreTable,
    composer: OrderingComposer,
    pool: Vec<usize>,
}

impl<'a> LexicaseSelect<'a> {
    /// Plain lexicase: every criterion, auxiliary included, is a peer.
    pub fn new(criteria: CriterionSet<'a>) -> Self {
        Self {
            criteria,
            order_limit: usize::MAX,
            table: ScoreTable::new(),
            composer: OrderingComposer::new(),
            pool: Vec::new(),
        }
    }

    /// Constrained lexicase: auxiliary criteria only appear at ordering
    /// positions below `order_limit`.
    pub fn with_order_limit(
        criteria: CriterionSet<'a>,
        order_limit: usize,
    ) -> Result<Self, PsynthError> {
        if order_limit < criteria.num_auxiliary() {
            return Err(PsynthError::Configuration(format!(
                "Order limit {} is smaller than the number of auxiliary criteria ({})",
                order_limit,
                criteria.num_auxiliary()
            )));
        }
        let mut select = Self::new(criteria);
        select.order_limit = order_limit;
        Ok(select)
    }

    pub fn order_limit(&self) -> usize {
        self.order_limit
    }

    pub fn criteria(&self) -> &CriterionSet<'a> {
        &self.criteria
    }

    /// Select `n` winners from `candidate_ids` using the primary criteria in
    /// `criterion_ids` plus every auxiliary criterion.
    ///
    /// Winners are drawn independently, so the same id may appear more than once.
    ///
    /// # Panics
    ///
    /// Panics if `n > 0` and `candidate_ids` is empty, or if any candidate or
    /// criterion id is out of range.
    pub fn select<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        candidate_ids: &[CandidateId],
        criterion_ids: &[CriterionId],
        rng: &mut R,
    ) -> Vec<CandidateId> {
        if n == 0 {
            return Vec::new();
        }
        assert!(!candidate_ids.is_empty(), "lexicase selection needs at least one candidate");

        self.table.rebuild(&self.criteria, candidate_ids, criterion_ids);
        let num_primary = self.table.num_primary();
        let num_auxiliary = self.table.num_auxiliary();
        if self.order_limit != usize::MAX && self.order_limit > num_primary + num_auxiliary {
            log::warn!(
                "Lexicase: order limit {} exceeds the {} criteria in play; clamping",
                self.order_limit,
                num_primary + num_auxiliary
            );
        }
        log::debug!(
            "Lexicase: selecting {} from {} candidates over {} primary + {} auxiliary criteria",
            n,
            candidate_ids.len(),
            num_primary,
            num_auxiliary
        );

        let mut winners = Vec::with_capacity(n);
        for _ in 0..n {
            let ordering = self
                .composer
                .compose(num_primary, num_auxiliary, self.order_limit, rng);
            let row = filter_pool(&self.table, ordering, &mut self.pool, rng);
            winners.push(candidate_ids[row]);
        }
        winners
    }
}

/// Run one elimination over `ordering` and return the winning table row.
fn filter_pool<R: Rng + ?Sized>(
    table: &ScoreTable,
    ordering: &[usize],
    pool: &mut Vec<usize>,
    rng: &mut R,
) -> usize {
    pool.clear();
    pool.extend(0..table.num_rows());

    for &col in ordering {
        if pool.len() == 1 {
            break;
        }
        let mut best = comparable(table.get(pool[0], col));
        for &row in &pool[1..] {
            let score = comparable(table.get(row, col));
            if score.total_cmp(&best).is_gt() {
                best = score;
            }
        }
        pool.retain(|&row| comparable(table.get(row, col)).total_cmp(&best).is_eq());
    }

    if pool.len() == 1 {
        pool[0]
    } else {
        pool[rng.gen_range(0..pool.len())]
    }
}

/// Folds `-0.0` into `0.0` so that numerically equal scores tie under
/// `total_cmp`. NaN keeps a fixed place in the order, so the best score is
/// always a pool member.
fn comparable(score: f64) -> f64 {
    if score == 0.0 {
        0.0
    } else {
        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::selection::criteria::Criterion;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table_criteria(scores: &[Vec<f64>], ages: Option<&[f64]>) -> CriterionSet<'static> {
        let primary = scores
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&s| Box::new(move || s) as Criterion)
                    .collect()
            })
            .collect();
        match ages {
            Some(ages) => {
                let auxiliary = ages
                    .iter()
                    .map(|&age| vec![Box::new(move || -age) as Criterion])
                    .collect();
                CriterionSet::new(primary, auxiliary).unwrap()
            }
            None => CriterionSet::primary_only(primary).unwrap(),
        }
    }

    #[test]
    fn test_zero_selections() {
        let mut select = LexicaseSelect::new(table_criteria(&[vec![1.0]], None));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(select.select(0, &[], &[0], &mut rng).is_empty());
    }

    #[test]
    fn test_single_criterion_picks_max() {
        let scores = vec![vec![0.2], vec![0.9], vec![0.4], vec![0.1], vec![0.5]];
        let mut select = LexicaseSelect::new(table_criteria(&scores, None));
        let mut rng = StdRng::seed_from_u64(42);

        let winners = select.select(20, &[0, 1, 2, 3, 4], &[0], &mut rng);
        assert_eq!(winners.len(), 20);
        assert!(winners.iter().all(|&id| id == 1));
    }

    #[test]
    fn test_ties_broken_among_best_only() {
        let scores = vec![vec![1.0], vec![0.0], vec![1.0], vec![0.0]];
        let mut select = LexicaseSelect::new(table_criteria(&scores, None));
        let mut rng = StdRng::seed_from_u64(9);

        let winners = select.select(200, &[0, 1, 2, 3], &[0], &mut rng);
        assert!(winners.iter().all(|&id| id == 0 || id == 2));
        assert!(winners.contains(&0));
        assert!(winners.contains(&2));
    }

    #[test]
    fn test_signed_zeros_tie() {
        let scores = vec![vec![0.0], vec![-0.0], vec![-1.0]];
        let mut select = LexicaseSelect::new(table_criteria(&scores, None));
        let mut rng = StdRng::seed_from_u64(21);

        let winners = select.select(200, &[0, 1, 2], &[0], &mut rng);
        assert!(winners.contains(&0));
        assert!(winners.contains(&1));
        assert!(!winners.contains(&2));
    }

    #[test]
    fn test_nan_scores_never_empty_the_pool() {
        let scores = vec![vec![f64::NAN, 1.0], vec![f64::NAN, 0.0]];
        let mut select = LexicaseSelect::new(table_criteria(&scores, None));
        let mut rng = StdRng::seed_from_u64(5);

        let winners = select.select(50, &[0, 1], &[0, 1], &mut rng);
        assert_eq!(winners.len(), 50);
        assert!(winners.iter().all(|&id| id < 2));
    }

    #[test]
    fn test_generalist_always_wins() {
        let scores = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 1.0]];
        let mut select = LexicaseSelect::new(table_criteria(&scores, None));
        let mut rng = StdRng::seed_from_u64(0);

        let winners = select.select(50, &[0, 1, 2], &[0, 1], &mut rng);
        assert!(winners.iter().all(|&id| id == 2));
    }

    #[test]
    fn test_specialists_each_win_some_orderings() {
        let scores = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let mut select = LexicaseSelect::new(table_criteria(&scores, None));
        let mut rng = StdRng::seed_from_u64(4);

        let winners = select.select(100, &[0, 1], &[0, 1], &mut rng);
        assert!(winners.contains(&0));
        assert!(winners.contains(&1));
    }

    #[test]
    fn test_winners_translated_to_global_ids() {
        let scores = vec![vec![5.0], vec![1.0], vec![3.0], vec![9.0]];
        let mut select = LexicaseSelect::new(table_criteria(&scores, None));
        let mut rng = StdRng::seed_from_u64(2);

        // Candidate 3 is not eligible; candidate 0 is the best of the rest
        let winners = select.select(5, &[2, 1, 0], &[0], &mut rng);
        assert_eq!(winners, vec![0; 5]);
    }

    #[test]
    fn test_criterion_subset_restricts_filtering() {
        let scores = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let mut select = LexicaseSelect::new(table_criteria(&scores, None));
        let mut rng = StdRng::seed_from_u64(8);

        let winners = select.select(10, &[0, 1], &[1], &mut rng);
        assert_eq!(winners, vec![1; 10]);
    }

    #[test]
    fn test_age_breaks_ties_when_placed_first() {
        // Identical performance; only age differs. With a limit of 1 the age
        // criterion is always first and the youngest candidate always wins.
        let scores = vec![vec![1.0, 1.0], vec![1.0, 1.0], vec![1.0, 1.0]];
        let ages = [4.0, 0.0, 2.0];
        let mut select =
            LexicaseSelect::with_order_limit(table_criteria(&scores, Some(&ages[..])), 1).unwrap();
        let mut rng = StdRng::seed_from_u64(6);

        let winners = select.select(30, &[0, 1, 2], &[0, 1], &mut rng);
        assert!(winners.iter().all(|&id| id == 1));
    }

    #[test]
    fn test_age_never_outranks_leading_test_when_limited() {
        // Candidate 0 is older but passes test 0. The age criterion can only be
        // considered first or second; when second, candidate 0 survives test 0.
        let scores = vec![vec![1.0], vec![0.0]];
        let ages = [10.0, 0.0];
        let mut select =
            LexicaseSelect::with_order_limit(table_criteria(&scores, Some(&ages[..])), 2).unwrap();
        let mut rng = StdRng::seed_from_u64(12);

        let winners = select.select(200, &[0, 1], &[0], &mut rng);
        assert!(winners.contains(&0));
        assert!(winners.contains(&1));
    }

    #[test]
    fn test_order_limit_below_auxiliary_count_rejected() {
        let scores = vec![vec![1.0]];
        let ages = [0.0];
        let result = LexicaseSelect::with_order_limit(table_criteria(&scores, Some(&ages[..])), 0);
        assert!(matches!(result, Err(PsynthError::Configuration(_))));
    }

    #[test]
    #[should_panic(expected = "at least one candidate")]
    fn test_empty_candidates_panics() {
        let mut select = LexicaseSelect::new(table_criteria(&[vec![1.0]], None));
        let mut rng = StdRng::seed_from_u64(1);
        select.select(1, &[], &[0], &mut rng);
    }
}
