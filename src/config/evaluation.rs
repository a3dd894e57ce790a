use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::PsynthError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub mode: EvaluationMode,
    /// Organism/test cohorts per update in cohort mode.
    pub num_cohorts: usize,
    /// Fraction of the tests sampled per update in down-sample mode.
    pub downsample_rate: f64,
}

/// How organisms and tests are grouped for evaluation and selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EvaluationMode {
    /// Every organism on every test.
    Full,
    /// Organisms and tests split into matching cohorts.
    Cohort,
    /// Every organism on one random sample of the tests.
    DownSample,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self {
            mode: EvaluationMode::Full,
            num_cohorts: 10,
            downsample_rate: 0.1,
        }
    }
}

impl ConfigSection for EvaluationConfig {
    fn section_name() -> &'static str {
        "evaluation"
    }

    fn validate(&self) -> Result<(), PsynthError> {
        if self.mode == EvaluationMode::Cohort && self.num_cohorts == 0 {
            return Err(PsynthError::Configuration(
                "Cohort evaluation needs at least one cohort".to_string(),
            ));
        }
        if self.mode == EvaluationMode::DownSample
            && !(self.downsample_rate > 0.0 && self.downsample_rate <= 1.0)
        {
            return Err(PsynthError::Configuration(format!(
                "Down-sample rate must be in (0, 1] (got {})",
                self.downsample_rate
            )));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Evaluation".to_string(),
            fields: vec![
                FieldManifest::new(
                    "mode",
                    "enum",
                    serde_json::json!("full"),
                    "Evaluation mode: full, cohort or down-sample",
                ),
                FieldManifest::new(
                    "num_cohorts",
                    "integer",
                    serde_json::json!(10),
                    "Cohorts per update in cohort mode (at most the population size)",
                )
                .with_range(1.0, 100_000.0),
                FieldManifest::new(
                    "downsample_rate",
                    "float",
                    serde_json::json!(0.1),
                    "Fraction of tests sampled per update in down-sample mode",
                )
                .with_range(0.0, 1.0),
            ],
        }
    }
}
