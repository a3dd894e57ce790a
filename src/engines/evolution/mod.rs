//! A thin generational driver around selection, recombination and injection.

pub mod engine;
pub mod grouping;
pub mod problem;
pub mod progress;

pub use engine::{EvolutionEngine, GenerationReport, RunSummary};
pub use grouping::Groupings;
pub use problem::{Phenotype, Problem};
pub use progress::{ChannelProgressCallback, LogProgressCallback, ProgressCallback, ProgressMessage};
