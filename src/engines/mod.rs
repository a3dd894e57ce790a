pub mod evolution;
pub mod injection;
pub mod recombination;
pub mod selection;
