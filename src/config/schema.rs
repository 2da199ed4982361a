//! YAML schema for declarative tuning configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::hpo::{GridSearch, HyperparameterSpace, RandomSearch, TuneSearcher};
use crate::model::ImageClassifier;
use crate::tuner::Objective;

/// Search strategy selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TuneStrategy {
    #[default]
    Random,
    Grid,
}

impl std::str::FromStr for TuneStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(Self::Random),
            "grid" => Ok(Self::Grid),
            _ => Err(format!("Unknown strategy: {s}. Use: random, grid")),
        }
    }
}

impl std::fmt::Display for TuneStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Random => write!(f, "random"),
            Self::Grid => write!(f, "grid"),
        }
    }
}

/// Where trial records are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub directory: PathBuf,
    pub name: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self { directory: PathBuf::from("tuning"), name: "image_classifier".to_string() }
    }
}

/// Complete tuning configuration
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuneConfig {
    pub project: ProjectConfig,

    /// Input shape and class count of the image classifier
    pub model: ImageClassifier,

    pub strategy: TuneStrategy,

    /// Fixed seed for reproducible sampling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    pub max_trials: usize,

    /// Epoch budget handed to the trainer per trial
    pub epochs: usize,

    pub objective: Objective,

    /// Discard previously recorded trials instead of resuming
    pub overwrite: bool,

    /// Consecutive duplicate suggestions tolerated before the search stops
    pub max_retries_per_suggestion: usize,

    pub max_consecutive_failed_trials: usize,
}

impl Default for TuneConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            model: ImageClassifier::default(),
            strategy: TuneStrategy::default(),
            seed: None,
            max_trials: 10,
            epochs: 2,
            objective: Objective::default(),
            overwrite: false,
            max_retries_per_suggestion: 20,
            max_consecutive_failed_trials: 3,
        }
    }
}

impl TuneConfig {
    /// `<directory>/<name>`
    pub fn project_dir(&self) -> PathBuf {
        self.project.directory.join(&self.project.name)
    }

    /// Searcher for the configured strategy over `space`
    pub fn build_searcher(&self, space: HyperparameterSpace) -> Box<dyn TuneSearcher> {
        match self.strategy {
            TuneStrategy::Random => Box::new(RandomSearch::new(space, self.seed)),
            TuneStrategy::Grid => Box::new(GridSearch::new(space)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HyperModel;
    use crate::tuner::Direction;

    #[test]
    fn test_deserialize_empty_config() {
        let config: TuneConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, TuneConfig::default());
        assert_eq!(config.project_dir(), PathBuf::from("tuning/image_classifier"));
    }

    #[test]
    fn test_deserialize_full_config() {
        let yaml = r"
project:
  directory: runs
  name: mnist
model:
  input_shape: [32, 32, 3]
  num_classes: 100
strategy: grid
seed: 42
max_trials: 50
epochs: 5
objective:
  name: val_loss
  direction: min
overwrite: true
max_retries_per_suggestion: 5
max_consecutive_failed_trials: 1
";
        let config: TuneConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.project_dir(), PathBuf::from("runs/mnist"));
        assert_eq!(config.model, ImageClassifier::new([32, 32, 3], 100));
        assert_eq!(config.strategy, TuneStrategy::Grid);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.max_trials, 50);
        assert_eq!(config.epochs, 5);
        assert_eq!(config.objective.direction, Direction::Min);
        assert!(config.overwrite);
        assert_eq!(config.max_retries_per_suggestion, 5);
        assert_eq!(config.max_consecutive_failed_trials, 1);
    }

    #[test]
    fn test_partial_project_keeps_defaults() {
        let config: TuneConfig = serde_yaml::from_str("project:\n  name: fashion\n").unwrap();
        assert_eq!(config.project.directory, PathBuf::from("tuning"));
        assert_eq!(config.project.name, "fashion");
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(serde_yaml::from_str::<TuneConfig>("strategy: tpe\n").is_err());
        assert!("bayesian".parse::<TuneStrategy>().is_err());
        assert_eq!("GRID".parse::<TuneStrategy>().unwrap(), TuneStrategy::Grid);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = TuneConfig { seed: Some(1), strategy: TuneStrategy::Grid, ..TuneConfig::default() };
        let yaml = serde_yaml::to_string(&config).unwrap();
        let back: TuneConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_build_searcher_by_strategy() {
        let space = ImageClassifier::default().search_space().unwrap();
        let random = TuneConfig { seed: Some(3), ..TuneConfig::default() }.build_searcher(space.clone());
        assert!(!random.exhaustive());
        let grid = TuneConfig { strategy: TuneStrategy::Grid, ..TuneConfig::default() }.build_searcher(space);
        assert!(grid.exhaustive());
    }
}
