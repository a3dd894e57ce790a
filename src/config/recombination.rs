use super::traits::{check_rate, ConfigManifest, ConfigSection, FieldManifest};
use crate::error::PsynthError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecombinationConfig {
    /// Chance that each matched function pair after the first is spliced.
    pub per_func_seq_recomb_rate: f64,
    /// Chance that each matched function pair after the first is swapped whole.
    /// Read by [`Recombiner::apply_whole_function`](crate::engines::recombination::Recombiner::apply_whole_function)
    /// only; injection offspring are spliced, never swapped.
    pub whole_func_swap_rate: f64,
}

impl Default for RecombinationConfig {
    fn default() -> Self {
        Self {
            per_func_seq_recomb_rate: 0.1,
            whole_func_swap_rate: 0.1,
        }
    }
}

impl ConfigSection for RecombinationConfig {
    fn section_name() -> &'static str {
        "recombination"
    }

    fn validate(&self) -> Result<(), PsynthError> {
        check_rate("Per-function sequence recombination rate", self.per_func_seq_recomb_rate)?;
        check_rate("Whole-function swap rate", self.whole_func_swap_rate)?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Recombination".to_string(),
            fields: vec![
                FieldManifest::new(
                    "per_func_seq_recomb_rate",
                    "float",
                    serde_json::json!(0.1),
                    "Two-point splice rate for matched function pairs after the first",
                )
                .with_range(0.0, 1.0),
                FieldManifest::new(
                    "whole_func_swap_rate",
                    "float",
                    serde_json::json!(0.1),
                    "Whole-function swap rate for matched function pairs after the first; \
                     library API only, injection offspring use two-point splicing",
                )
                .with_range(0.0, 1.0),
            ],
        }
    }
}
