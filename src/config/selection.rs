use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use crate::error::PsynthError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    pub method: SelectionMethod,
    pub tournament_size: usize,
    /// Auxiliary criteria may only appear at ordering positions below this limit.
    pub age_order_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionMethod {
    Lexicase,
    AgeLexicase,
    Tournament,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            method: SelectionMethod::Lexicase,
            tournament_size: 4,
            age_order_limit: 10,
        }
    }
}

impl ConfigSection for SelectionConfig {
    fn section_name() -> &'static str {
        "selection"
    }

    fn validate(&self) -> Result<(), PsynthError> {
        if self.method == SelectionMethod::Tournament && self.tournament_size == 0 {
            return Err(PsynthError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        // Age-lexicase binds exactly one auxiliary criterion (genome age).
        if self.method == SelectionMethod::AgeLexicase && self.age_order_limit < 1 {
            return Err(PsynthError::Configuration(
                "Age order limit must leave room for the age criterion".to_string(),
            ));
        }
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Selection".to_string(),
            fields: vec![
                FieldManifest::new(
                    "method",
                    "enum",
                    serde_json::json!("lexicase"),
                    "Parent selection scheme: lexicase, age-lexicase or tournament",
                ),
                FieldManifest::new(
                    "tournament_size",
                    "integer",
                    serde_json::json!(4),
                    "Number of candidates drawn per tournament",
                )
                .with_range(1.0, 1024.0),
                FieldManifest::new(
                    "age_order_limit",
                    "integer",
                    serde_json::json!(10),
                    "Latest ordering position at which the age criterion may appear",
                ),
            ],
        }
    }
}
