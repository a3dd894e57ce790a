pub mod traits;
pub mod run;
pub mod evaluation;
pub mod selection;
pub mod recombination;
pub mod injection;
pub mod manager;

pub use manager::{AppConfig, ConfigManager};
pub use run::{RunConfig, StopMode};
pub use evaluation::{EvaluationConfig, EvaluationMode};
pub use selection::{SelectionConfig, SelectionMethod};
pub use recombination::RecombinationConfig;
pub use injection::{InjectionConfig, InjectionMode};
