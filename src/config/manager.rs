use super::{
    evaluation::{EvaluationConfig, EvaluationMode},
    injection::InjectionConfig,
    recombination::RecombinationConfig,
    run::RunConfig,
    selection::SelectionConfig,
    traits::{ConfigManifest, ConfigSection},
};
use crate::error::PsynthError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `PSYNTH_SELECTION__METHOD=tournament`.
pub const ENV_PREFIX: &str = "PSYNTH";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub run: RunConfig,
    pub evaluation: EvaluationConfig,
    pub selection: SelectionConfig,
    pub recombination: RecombinationConfig,
    pub injection: InjectionConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), PsynthError> {
        self.run.validate()?;
        self.evaluation.validate()?;
        self.selection.validate()?;
        self.recombination.validate()?;
        self.injection.validate()?;
        if self.injection.mode != super::InjectionMode::None
            && self.injection.count >= self.run.population_size
        {
            return Err(PsynthError::Configuration(format!(
                "Injection count ({}) must be smaller than population size ({})",
                self.injection.count, self.run.population_size
            )));
        }
        if self.evaluation.mode == EvaluationMode::Cohort
            && self.evaluation.num_cohorts > self.run.population_size
        {
            return Err(PsynthError::Configuration(format!(
                "Cohort count ({}) cannot exceed population size ({})",
                self.evaluation.num_cohorts, self.run.population_size
            )));
        }
        Ok(())
    }

    pub fn manifests(&self) -> Vec<ConfigManifest> {
        vec![
            self.run.to_manifest(),
            self.evaluation.to_manifest(),
            self.selection.to_manifest(),
            self.recombination.to_manifest(),
            self.injection.to_manifest(),
        ]
    }
}

pub struct ConfigManager {
    config: AppConfig,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    /// Load a TOML file, layering `PSYNTH_`-prefixed environment variables on top.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), PsynthError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from(path.as_ref()).format(::config::FileFormat::Toml))
            .add_source(Self::env_source())
            .build()?;
        self.install(settings.try_deserialize()?)
    }

    /// Load from defaults plus environment overrides only.
    pub fn load_from_env(&mut self) -> Result<(), PsynthError> {
        let settings = ::config::Config::builder()
            .add_source(Self::env_source())
            .build()?;
        self.install(settings.try_deserialize()?)
    }

    pub fn load_from_str(&mut self, contents: &str) -> Result<(), PsynthError> {
        let settings = ::config::Config::builder()
            .add_source(::config::File::from_str(contents, ::config::FileFormat::Toml))
            .build()?;
        self.install(settings.try_deserialize()?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PsynthError> {
        let toml_str = toml::to_string_pretty(&self.config)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    pub fn update<F>(&mut self, f: F) -> Result<(), PsynthError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.config.clone();
        f(&mut candidate);
        self.install(candidate)
    }

    fn install(&mut self, config: AppConfig) -> Result<(), PsynthError> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    fn env_source() -> ::config::Environment {
        ::config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{InjectionMode, SelectionMethod, StopMode};

    #[test]
    fn test_defaults_validate() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_load_partial_toml() {
        let mut manager = ConfigManager::new();
        manager
            .load_from_str(
                r#"
                [selection]
                method = "age-lexicase"
                age_order_limit = 3

                [injection]
                mode = "recombine-complement"
                count = 4
                "#,
            )
            .unwrap();

        let config = manager.get();
        assert_eq!(config.selection.method, SelectionMethod::AgeLexicase);
        assert_eq!(config.selection.age_order_limit, 3);
        assert_eq!(config.injection.mode, InjectionMode::RecombineComplement);
        assert_eq!(config.injection.interval, 10);
        assert_eq!(config.run.population_size, 100);
    }

    #[test]
    fn test_rejects_out_of_range_rate() {
        let mut manager = ConfigManager::new();
        let result = manager.update(|c| c.recombination.whole_func_swap_rate = 1.5);
        assert!(matches!(result, Err(PsynthError::Configuration(_))));
        // Rejected updates leave the previous config in place
        assert_eq!(manager.get().recombination.whole_func_swap_rate, 0.1);
    }

    #[test]
    fn test_rejects_injection_count_at_population_size() {
        let mut manager = ConfigManager::new();
        let result = manager.update(|c| {
            c.run.population_size = 10;
            c.injection.mode = InjectionMode::RecombineRandom;
            c.injection.count = 10;
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_manifests_cover_all_sections() {
        let manifests = AppConfig::default().manifests();
        let sections: Vec<_> = manifests.iter().map(|m| m.section.as_str()).collect();
        assert_eq!(sections, vec!["Run", "Evaluation", "Selection", "Recombination", "Injection"]);
    }

    #[test]
    fn test_load_evaluation_and_stop_modes() {
        let mut manager = ConfigManager::new();
        manager
            .load_from_str(
                r#"
                [run]
                stop_mode = "evaluations"
                max_evaluations = 5000

                [evaluation]
                mode = "cohort"
                num_cohorts = 4

                [injection]
                mode = "random"
                "#,
            )
            .unwrap();

        let config = manager.get();
        assert_eq!(config.run.stop_mode, StopMode::Evaluations);
        assert_eq!(config.run.max_evaluations, 5000);
        assert_eq!(config.evaluation.mode, EvaluationMode::Cohort);
        assert_eq!(config.evaluation.num_cohorts, 4);
        assert_eq!(config.injection.mode, InjectionMode::Random);
    }

    #[test]
    fn test_rejects_more_cohorts_than_organisms() {
        let mut manager = ConfigManager::new();
        let result = manager.update(|c| {
            c.run.population_size = 8;
            c.evaluation.mode = EvaluationMode::Cohort;
            c.evaluation.num_cohorts = 9;
        });
        assert!(matches!(result, Err(PsynthError::Configuration(_))));
    }

    #[test]
    fn test_rejects_zero_downsample_rate() {
        let mut manager = ConfigManager::new();
        let result = manager.update(|c| {
            c.evaluation.mode = EvaluationMode::DownSample;
            c.evaluation.downsample_rate = 0.0;
        });
        assert!(result.is_err());
    }
}
