//! Objective metric and ranking direction

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::hpo::TrialStatus;
use crate::tracking::TrialRecord;

/// Whether larger or smaller objective values are better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    #[serde(alias = "maximize")]
    Max,
    #[serde(alias = "minimize")]
    Min,
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "max" | "maximize" => Ok(Self::Max),
            "min" | "minimize" => Ok(Self::Min),
            _ => Err(format!("Unknown direction: {s}. Use: max, min")),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Max => write!(f, "max"),
            Self::Min => write!(f, "min"),
        }
    }
}

/// Metric the search optimizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub name: String,
    #[serde(default)]
    pub direction: Direction,
}

impl Default for Objective {
    fn default() -> Self {
        Self::maximize("val_accuracy")
    }
}

impl Objective {
    pub fn maximize(name: impl Into<String>) -> Self {
        Self { name: name.into(), direction: Direction::Max }
    }

    pub fn minimize(name: impl Into<String>) -> Self {
        Self { name: name.into(), direction: Direction::Min }
    }

    /// Read the objective from reported metrics
    pub fn score(&self, metrics: &BTreeMap<String, f64>) -> Result<f64> {
        metrics.get(&self.name).copied().ok_or_else(|| Error::MissingObjective(self.name.clone()))
    }

    /// Whether `candidate` beats `incumbent`
    pub fn is_better(&self, candidate: f64, incumbent: f64) -> bool {
        match self.direction {
            Direction::Max => candidate > incumbent,
            Direction::Min => candidate < incumbent,
        }
    }

    /// Leaderboard order: completed trials best-first, then the rest by id
    pub fn rank(&self, a: &TrialRecord, b: &TrialRecord) -> Ordering {
        let score = |r: &TrialRecord| r.score.filter(|_| r.status == TrialStatus::Completed);
        match (score(a), score(b)) {
            (Some(x), Some(y)) => {
                let by_score = match self.direction {
                    Direction::Max => y.total_cmp(&x),
                    Direction::Min => x.total_cmp(&y),
                };
                by_score.then(a.trial_id.cmp(&b.trial_id))
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.trial_id.cmp(&b.trial_id),
        }
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hpo::{Assignment, Trial};

    fn record(id: usize, score: Option<f64>) -> TrialRecord {
        let mut trial = Trial::new(id, Assignment::new());
        match score {
            Some(s) => trial.complete(s, BTreeMap::new(), 1),
            None => trial.fail("boom"),
        }
        TrialRecord::from_trial(&trial, None)
    }

    #[test]
    fn test_default_objective() {
        let objective = Objective::default();
        assert_eq!(objective.name, "val_accuracy");
        assert_eq!(objective.direction, Direction::Max);
        assert_eq!(objective.to_string(), "val_accuracy (max)");
    }

    #[test]
    fn test_is_better() {
        assert!(Objective::maximize("acc").is_better(0.9, 0.8));
        assert!(!Objective::maximize("acc").is_better(0.8, 0.8));
        assert!(Objective::minimize("loss").is_better(0.1, 0.2));
    }

    #[test]
    fn test_score_missing_metric() {
        let mut metrics = BTreeMap::new();
        metrics.insert("val_loss".to_string(), 0.3);
        assert_eq!(Objective::minimize("val_loss").score(&metrics).unwrap(), 0.3);
        let err = Objective::default().score(&metrics).unwrap_err();
        assert!(matches!(err, Error::MissingObjective(name) if name == "val_accuracy"));
    }

    #[test]
    fn test_rank_orders_completed_first() {
        let mut records = [record(0, None), record(1, Some(0.5)), record(2, Some(0.9)), record(3, Some(0.5))];
        let objective = Objective::default();
        records.sort_by(|a, b| objective.rank(a, b));
        let ids: Vec<_> = records.iter().map(|r| r.trial_id).collect();
        assert_eq!(ids, vec![2, 1, 3, 0]);

        let objective = Objective::minimize("val_accuracy");
        records.sort_by(|a, b| objective.rank(a, b));
        let ids: Vec<_> = records.iter().map(|r| r.trial_id).collect();
        assert_eq!(ids, vec![1, 3, 2, 0]);
    }

    #[test]
    fn test_direction_parse_and_serde() {
        assert_eq!("Maximize".parse::<Direction>().unwrap(), Direction::Max);
        assert_eq!("min".parse::<Direction>().unwrap(), Direction::Min);
        assert!("up".parse::<Direction>().is_err());

        let objective: Objective = serde_yaml::from_str("name: val_loss\ndirection: minimize\n").unwrap();
        assert_eq!(objective, Objective::minimize("val_loss"));
        let objective: Objective = serde_yaml::from_str("name: val_accuracy\n").unwrap();
        assert_eq!(objective, Objective::default());
    }
}
