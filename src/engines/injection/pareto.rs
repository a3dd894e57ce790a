//! Pareto front over pairs of organisms, using the union of their pass/fail
//! signatures as a binary coverage vector.

use super::signature::BitSignature;
use crate::types::CandidateId;
use std::collections::HashSet;

/// Two organisms and the union of their pass/fail signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRecord {
    pub org_ids: (CandidateId, CandidateId),
    pub phen_union: BitSignature,
}

impl PairRecord {
    pub fn new(
        org_a: CandidateId,
        phen_a: &BitSignature,
        org_b: CandidateId,
        phen_b: &BitSignature,
    ) -> Self {
        Self {
            org_ids: (org_a, org_b),
            phen_union: phen_a.union(phen_b),
        }
    }
}

/// `a` dominates `b` when `a` covers every test `b` covers plus at least one more.
pub fn dominates(a: &BitSignature, b: &BitSignature) -> bool {
    a != b && a.is_superset_of(b)
}

/// Indices of the records not dominated by any other record.
///
/// Records with identical unions do not dominate each other and are all kept.
/// Returns an empty front only for an empty input.
pub fn pareto_front(records: &[PairRecord]) -> Vec<usize> {
    let mut front: Vec<usize> = Vec::new();
    if records.is_empty() {
        return front;
    }
    front.push(0);

    for (cur_id, cur) in records.iter().enumerate().skip(1) {
        let mut dominated = false;
        let mut front_i = 0;
        while front_i < front.len() {
            let member = &records[front[front_i]];
            if dominates(&cur.phen_union, &member.phen_union) {
                // Evict and look at whatever was swapped into this slot
                front.swap_remove(front_i);
            } else if dominates(&member.phen_union, &cur.phen_union) {
                dominated = true;
                break;
            } else {
                front_i += 1;
            }
        }
        if !dominated {
            front.push(cur_id);
        }
    }

    front
}

/// The non-dominated records themselves.
pub fn front_records(records: &[PairRecord]) -> Vec<&PairRecord> {
    pareto_front(records).into_iter().map(|i| &records[i]).collect()
}

/// Records for every unordered pair of organisms, skipping pairs whose union
/// repeats one already recorded.
pub fn unique_union_pairs(signatures: &[BitSignature]) -> Vec<PairRecord> {
    let mut seen: HashSet<BitSignature> = HashSet::new();
    let mut records = Vec::new();
    for i in 0..signatures.len() {
        for j in i + 1..signatures.len() {
            let record = PairRecord::new(i, &signatures[i], j, &signatures[j]);
            if seen.insert(record.phen_union.clone()) {
                records.push(record);
            }
        }
    }
    records
}
