use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::PsynthError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionConfig {
    pub mode: InjectionMode,
    /// Inject every `interval` updates (update 0 never injects).
    pub interval: usize,
    /// Organisms injected per injection event.
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InjectionMode {
    None,
    /// Freshly generated organisms.
    Random,
    RecombineRandom,
    RecombineComplement,
}

impl Default for InjectionConfig {
    fn default() -> Self {
        Self {
            mode: InjectionMode::None,
            interval: 10,
            count: 10,
        }
    }
}

impl ConfigSection for InjectionConfig {
    fn section_name() -> &'static str {
        "injection"
    }

    fn validate(&self) -> Result<(), PsynthError> {
        if self.mode != InjectionMode::None && self.interval == 0 {
            return Err(PsynthError::Configuration(
                "Injection interval must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Injection".to_string(),
            fields: vec![
                FieldManifest::new(
                    "mode",
                    "enum",
                    serde_json::json!("none"),
                    "Organism injection mode: none, random, recombine-random or recombine-complement",
                ),
                FieldManifest::new(
                    "interval",
                    "integer",
                    serde_json::json!(10),
                    "Updates between injection events",
                )
                .with_range(1.0, 1_000_000.0),
                FieldManifest::new(
                    "count",
                    "integer",
                    serde_json::json!(10),
                    "Organisms injected per event (must be below population size)",
                ),
            ],
        }
    }
}
