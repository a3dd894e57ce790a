use super::criteria::Criterion;
use crate::error::PsynthError;
use crate::types::{CandidateId, Score};
use rand::Rng;

/// Tournament selection: pick the best of `tournament_size` random candidates
/// by a single aggregate score per candidate.
pub struct TournamentSelect<'a> {
    aggregate: Vec<Criterion<'a>>,
    tournament_size: usize,
    scores: Vec<Score>,
}

impl<'a> TournamentSelect<'a> {
    pub fn new(aggregate: Vec<Criterion<'a>>, tournament_size: usize) -> Result<Self, PsynthError> {
        if tournament_size == 0 {
            return Err(PsynthError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            aggregate,
            tournament_size,
            scores: Vec::new(),
        })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Select `n` winners. Entrants are drawn with replacement; the first
    /// entrant seen with the best score wins.
    pub fn select<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        candidate_ids: &[CandidateId],
        rng: &mut R,
    ) -> Vec<CandidateId> {
        if n == 0 {
            return Vec::new();
        }
        assert!(!candidate_ids.is_empty(), "tournament selection needs at least one candidate");

        self.scores.clear();
        for &cand_id in candidate_ids {
            assert!(
                cand_id < self.aggregate.len(),
                "candidate id {} out of range ({} candidates)",
                cand_id,
                self.aggregate.len()
            );
            self.scores.push(self.aggregate[cand_id].score());
        }

        (0..n)
            .map(|_| {
                let mut best_idx = rng.gen_range(0..candidate_ids.len());
                let mut best_score = self.scores[best_idx];
                for _ in 1..self.tournament_size {
                    let idx = rng.gen_range(0..candidate_ids.len());
                    if self.scores[idx] > best_score {
                        best_idx = idx;
                        best_score = self.scores[idx];
                    }
                }
                candidate_ids[best_idx]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn aggregates(scores: &[f64]) -> Vec<Criterion<'static>> {
        scores.iter().map(|&s| Box::new(move || s) as Criterion).collect()
    }

    #[test]
    fn test_returns_requested_count_from_pool() {
        let mut select = TournamentSelect::new(aggregates(&[1.0, 2.0, 3.0, 4.0]), 2).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let winners = select.select(25, &[0, 2, 3], &mut rng);
        assert_eq!(winners.len(), 25);
        assert!(winners.iter().all(|id| [0, 2, 3].contains(id)));
    }

    #[test]
    fn test_size_one_is_uniform_draw() {
        let mut select = TournamentSelect::new(aggregates(&[0.0, 100.0]), 1).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let winners = select.select(100, &[0, 1], &mut rng);
        assert!(winners.contains(&0));
    }

    #[test]
    fn test_large_tournament_prefers_best() {
        let mut select = TournamentSelect::new(aggregates(&[0.0, 1.0, 5.0, 2.0]), 64).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let winners = select.select(10, &[0, 1, 2, 3], &mut rng);
        assert_eq!(winners, vec![2; 10]);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(TournamentSelect::new(aggregates(&[1.0]), 0).is_err());
    }
}
