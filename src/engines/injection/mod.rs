//! Injection of recombined organisms, optionally biased toward parent pairs
//! with complementary test coverage.

pub mod injector;
pub mod pareto;
pub mod signature;

pub use injector::{InjectionPlan, Injector};
pub use pareto::{dominates, front_records, pareto_front, unique_union_pairs, PairRecord};
pub use signature::BitSignature;
