use crate::error::PsynthError;
use crate::types::{CandidateId, CriterionId, Score};

/// A zero-argument scalar evaluator bound to one (candidate, test-or-trait) pair.
///
/// Implementations must not have side effects, but may read mutable state
/// (through `Cell`/`RefCell` or a shared borrow), so results are never cached.
pub trait Scoreable {
    fn score(&self) -> Score;
}

impl<F> Scoreable for F
where
    F: Fn() -> Score,
{
    fn score(&self) -> Score {
        self()
    }
}

pub type Criterion<'a> = Box<dyn Scoreable + 'a>;

/// Per-candidate primary and auxiliary criteria.
///
/// Index `i` in one candidate's primary list means the same test as index `i`
/// in every other candidate's list. The same holds for auxiliary criteria.
pub struct CriterionSet<'a> {
    primary: Vec<Vec<Criterion<'a>>>,
    auxiliary: Vec<Vec<Criterion<'a>>>,
    num_primary: usize,
    num_auxiliary: usize,
}

impl<'a> CriterionSet<'a> {
    pub fn new(
        primary: Vec<Vec<Criterion<'a>>>,
        auxiliary: Vec<Vec<Criterion<'a>>>,
    ) -> Result<Self, PsynthError> {
        if primary.is_empty() {
            return Err(PsynthError::Selection(
                "Criterion set needs at least one candidate".to_string(),
            ));
        }
        if primary.len() != auxiliary.len() {
            return Err(PsynthError::Selection(format!(
                "Primary criteria cover {} candidates but auxiliary criteria cover {}",
                primary.len(),
                auxiliary.len()
            )));
        }

        let num_primary = primary[0].len();
        let num_auxiliary = auxiliary[0].len();
        for (cand_id, (p, a)) in primary.iter().zip(&auxiliary).enumerate() {
            if p.len() != num_primary || a.len() != num_auxiliary {
                return Err(PsynthError::Selection(format!(
                    "Candidate {} exposes {} primary / {} auxiliary criteria, expected {} / {}",
                    cand_id,
                    p.len(),
                    a.len(),
                    num_primary,
                    num_auxiliary
                )));
            }
        }

        Ok(Self {
            primary,
            auxiliary,
            num_primary,
            num_auxiliary,
        })
    }

    /// Criteria without any auxiliary traits.
    pub fn primary_only(primary: Vec<Vec<Criterion<'a>>>) -> Result<Self, PsynthError> {
        let auxiliary = primary.iter().map(|_| Vec::new()).collect();
        Self::new(primary, auxiliary)
    }

    pub fn num_candidates(&self) -> usize {
        self.primary.len()
    }

    pub fn num_primary(&self) -> usize {
        self.num_primary
    }

    pub fn num_auxiliary(&self) -> usize {
        self.num_auxiliary
    }

    pub fn primary_score(&self, candidate: CandidateId, criterion: CriterionId) -> Score {
        assert!(
            candidate < self.num_candidates(),
            "candidate id {} out of range ({} candidates)",
            candidate,
            self.num_candidates()
        );
        assert!(
            criterion < self.num_primary,
            "criterion id {} out of range ({} primary criteria)",
            criterion,
            self.num_primary
        );
        self.primary[candidate][criterion].score()
    }

    pub fn auxiliary_score(&self, candidate: CandidateId, auxiliary: usize) -> Score {
        assert!(
            candidate < self.num_candidates(),
            "candidate id {} out of range ({} candidates)",
            candidate,
            self.num_candidates()
        );
        self.auxiliary[candidate][auxiliary].score()
    }
}
