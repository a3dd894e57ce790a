//! Parent selection: lexicase (plain and age-constrained) and tournament.

pub mod criteria;
pub mod lexicase;
pub mod ordering;
pub mod score_table;
pub mod statistics;
pub mod tournament;

pub use criteria::{Criterion, CriterionSet, Scoreable};
pub use lexicase::LexicaseSelect;
pub use ordering::OrderingComposer;
pub use score_table::ScoreTable;
pub use statistics::SelectedStatistics;
pub use tournament::TournamentSelect;

use crate::types::{CandidateId, CriterionId};
use rand::Rng;

/// A configured selection scheme with the common `select` contract.
pub enum Selector<'a> {
    Lexicase(LexicaseSelect<'a>),
    Tournament(TournamentSelect<'a>),
}

impl<'a> Selector<'a> {
    /// Select `n` candidate ids from `candidate_ids`. Tournament selection
    /// ignores `criterion_ids` and ranks by its aggregate score.
    pub fn select<R: Rng + ?Sized>(
        &mut self,
        n: usize,
        candidate_ids: &[CandidateId],
        criterion_ids: &[CriterionId],
        rng: &mut R,
    ) -> Vec<CandidateId> {
        match self {
            Selector::Lexicase(select) => select.select(n, candidate_ids, criterion_ids, rng),
            Selector::Tournament(select) => select.select(n, candidate_ids, rng),
        }
    }
}

impl<'a> From<LexicaseSelect<'a>> for Selector<'a> {
    fn from(select: LexicaseSelect<'a>) -> Self {
        Selector::Lexicase(select)
    }
}

impl<'a> From<TournamentSelect<'a>> for Selector<'a> {
    fn from(select: TournamentSelect<'a>) -> Self {
        Selector::Tournament(select)
    }
}
