use rand::seq::SliceRandom;
use rand::Rng;

const UNSET: usize = usize::MAX;

/// Draws criterion orderings in which auxiliary criteria sit inside a prefix.
///
/// Columns `0..p` are primary criteria and `p..p+a` auxiliary ones (the layout
/// of [`ScoreTable`](super::score_table::ScoreTable)). Every auxiliary column
/// lands at a distinct, uniformly drawn position below the order limit; the
/// primary columns fill the remaining positions in uniformly random order.
///
/// Buffers are kept between calls but fully rewritten on every draw.
#[derive(Debug, Default)]
pub struct OrderingComposer {
    primary: Vec<usize>,
    slots: Vec<usize>,
    ordering: Vec<usize>,
}

impl OrderingComposer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose a fresh ordering of `num_primary + num_auxiliary` columns.
    ///
    /// `order_limit` above the ordering length is clamped to it.
    ///
    /// # Panics
    ///
    /// Panics if `order_limit < num_auxiliary`.
    pub fn compose<R: Rng + ?Sized>(
        &mut self,
        num_primary: usize,
        num_auxiliary: usize,
        order_limit: usize,
        rng: &mut R,
    ) -> &[usize] {
        assert!(
            order_limit >= num_auxiliary,
            "order limit {} cannot hold {} auxiliary criteria",
            order_limit,
            num_auxiliary
        );
        let len = num_primary + num_auxiliary;
        let limit = order_limit.min(len);

        self.primary.clear();
        self.primary.extend(0..num_primary);
        self.primary.shuffle(rng);

        self.ordering.clear();
        self.ordering.resize(len, UNSET);

        if num_auxiliary > 0 {
            self.slots.clear();
            self.slots.extend(0..limit);
            self.slots.shuffle(rng);
            for (aux_i, &slot) in self.slots.iter().take(num_auxiliary).enumerate() {
                self.ordering[slot] = num_primary + aux_i;
            }
        }

        // Primaries take the free positions in shuffled order
        for (slot, &col) in self
            .ordering
            .iter_mut()
            .filter(|slot| **slot == UNSET)
            .zip(self.primary.iter())
        {
            *slot = col;
        }
        debug_assert!(self.ordering.iter().all(|&col| col != UNSET));

        &self.ordering
    }
}
