use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::PsynthError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub population_size: usize,
    pub stop_mode: StopMode,
    pub generations: usize,
    /// Test-case evaluation budget in evaluations stop mode.
    pub max_evaluations: usize,
    pub seed: Option<u64>,
}

/// Which budget ends a run that has not found a solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopMode {
    Generations,
    Evaluations,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            stop_mode: StopMode::Generations,
            generations: 100,
            max_evaluations: 100_000,
            seed: None,
        }
    }
}

impl ConfigSection for RunConfig {
    fn section_name() -> &'static str {
        "run"
    }

    fn validate(&self) -> Result<(), PsynthError> {
        if self.population_size < 2 {
            return Err(PsynthError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }
        if self.stop_mode == StopMode::Evaluations && self.max_evaluations == 0 {
            return Err(PsynthError::Configuration(
                "Evaluation budget must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Run".to_string(),
            fields: vec![
                FieldManifest::new(
                    "population_size",
                    "integer",
                    serde_json::json!(100),
                    "Number of organisms per generation",
                )
                .with_range(2.0, 100_000.0),
                FieldManifest::new(
                    "stop_mode",
                    "enum",
                    serde_json::json!("generations"),
                    "Run budget: generations or evaluations",
                ),
                FieldManifest::new(
                    "generations",
                    "integer",
                    serde_json::json!(100),
                    "Number of generations to run in generations stop mode",
                ),
                FieldManifest::new(
                    "max_evaluations",
                    "integer",
                    serde_json::json!(100_000),
                    "Test-case evaluations to spend in evaluations stop mode",
                ),
                FieldManifest::new(
                    "seed",
                    "integer",
                    serde_json::Value::Null,
                    "Random seed; omitted means seeded from entropy",
                ),
            ],
        }
    }
}
