use crate::types::TestId;
use serde::{Deserialize, Serialize};

const WORD_BITS: usize = 64;

/// Fixed-width pass/fail bit pattern over test ids (bit set = test passed).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitSignature {
    words: Vec<u64>,
    width: usize,
}

impl BitSignature {
    pub fn new(width: usize) -> Self {
        Self {
            words: vec![0; width.div_ceil(WORD_BITS)],
            width,
        }
    }

    pub fn from_bools(bits: &[bool]) -> Self {
        let mut signature = Self::new(bits.len());
        for (test_id, &passed) in bits.iter().enumerate() {
            signature.set(test_id, passed);
        }
        signature
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn get(&self, test_id: TestId) -> bool {
        assert!(test_id < self.width, "test id {} out of range ({})", test_id, self.width);
        (self.words[test_id / WORD_BITS] >> (test_id % WORD_BITS)) & 1 == 1
    }

    pub fn set(&mut self, test_id: TestId, passed: bool) {
        assert!(test_id < self.width, "test id {} out of range ({})", test_id, self.width);
        let mask = 1u64 << (test_id % WORD_BITS);
        if passed {
            self.words[test_id / WORD_BITS] |= mask;
        } else {
            self.words[test_id / WORD_BITS] &= !mask;
        }
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn union(&self, other: &Self) -> Self {
        self.assert_same_width(other);
        Self {
            words: self.words.iter().zip(&other.words).map(|(a, b)| a | b).collect(),
            width: self.width,
        }
    }

    /// True when every bit set in `other` is also set in `self`.
    pub fn is_superset_of(&self, other: &Self) -> bool {
        self.assert_same_width(other);
        self.words.iter().zip(&other.words).all(|(a, b)| b & !a == 0)
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.width).map(move |i| self.get(i))
    }

    fn assert_same_width(&self, other: &Self) {
        assert_eq!(
            self.width, other.width,
            "signature widths differ ({} vs {})",
            self.width, other.width
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_across_words() {
        let mut signature = BitSignature::new(130);
        signature.set(0, true);
        signature.set(64, true);
        signature.set(129, true);
        signature.set(64, false);

        assert!(signature.get(0));
        assert!(!signature.get(64));
        assert!(signature.get(129));
        assert_eq!(signature.count_ones(), 2);
    }

    #[test]
    fn test_union_and_superset() {
        let a = BitSignature::from_bools(&[true, false, true, false]);
        let b = BitSignature::from_bools(&[false, true, true, false]);
        let u = a.union(&b);

        assert_eq!(u.iter().collect::<Vec<_>>(), vec![true, true, true, false]);
        assert!(u.is_superset_of(&a));
        assert!(u.is_superset_of(&b));
        assert!(!a.is_superset_of(&b));
        assert!(a.is_superset_of(&a));
    }

    #[test]
    #[should_panic(expected = "widths differ")]
    fn test_mismatched_widths_panic() {
        BitSignature::new(3).union(&BitSignature::new(4));
    }
}
