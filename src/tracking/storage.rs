//! Trial storage backends
//!
//! Provides the `TrialRecorder` trait, a JSON directory implementation for
//! persisting trials to disk, and an in-memory implementation.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::{Result, TrackingError, TrialRecord};
use crate::tuner::TuneResult;

const TRIAL_PREFIX: &str = "trial_";
const SUMMARY_FILE: &str = "summary.json";

/// Trait for trial storage backends
///
/// Implementations persist and retrieve finished trials.
pub trait TrialRecorder {
    /// Save (or overwrite) a trial record
    fn record(&mut self, record: &TrialRecord) -> Result<()>;

    /// Load one trial by id
    fn load_trial(&self, trial_id: usize) -> Result<TrialRecord>;

    /// Load all stored trials, ordered by id
    fn load_trials(&self) -> Result<Vec<TrialRecord>>;

    /// Persist the final search summary
    fn save_summary(&mut self, summary: &TuneResult) -> Result<()>;

    /// Remove every stored trial and summary
    fn clear(&mut self) -> Result<()>;
}

/// JSON directory backend
///
/// Stores each trial as `trial_{id:04}.json` in the project directory, plus
/// `summary.json` once a search finishes.
///
/// # Example
///
/// ```no_run
/// use afinar::tracking::storage::JsonDirRecorder;
///
/// let recorder = JsonDirRecorder::new("tuning/mnist");
/// ```
#[derive(Debug, Clone)]
pub struct JsonDirRecorder {
    dir: PathBuf,
}

impl JsonDirRecorder {
    /// Create a recorder; the directory is created on first write
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self { dir: dir.as_ref().to_path_buf() }
    }

    /// Project directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn trial_path(&self, trial_id: usize) -> PathBuf {
        self.dir.join(format!("{TRIAL_PREFIX}{trial_id:04}.json"))
    }

    /// Path of the summary file
    pub fn summary_path(&self) -> PathBuf {
        self.dir.join(SUMMARY_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }

    fn trial_files(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            let is_trial = path
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with(TRIAL_PREFIX) && n.ends_with(".json"));
            if is_trial {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// Load a previously saved summary
    pub fn load_summary(&self) -> Result<TuneResult> {
        let json = fs::read_to_string(self.summary_path())?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl TrialRecorder for JsonDirRecorder {
    fn record(&mut self, record: &TrialRecord) -> Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(record)?;
        fs::write(self.trial_path(record.trial_id), json)?;
        Ok(())
    }

    fn load_trial(&self, trial_id: usize) -> Result<TrialRecord> {
        let path = self.trial_path(trial_id);
        if !path.exists() {
            return Err(TrackingError::TrialNotFound(trial_id));
        }
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    fn load_trials(&self) -> Result<Vec<TrialRecord>> {
        let mut records = Vec::new();
        for path in self.trial_files()? {
            let json = fs::read_to_string(&path)?;
            records.push(serde_json::from_str::<TrialRecord>(&json)?);
        }
        records.sort_by_key(|r| r.trial_id);
        Ok(records)
    }

    fn save_summary(&mut self, summary: &TuneResult) -> Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(summary)?;
        fs::write(self.summary_path(), json)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        for path in self.trial_files()? {
            fs::remove_file(path)?;
        }
        let summary = self.summary_path();
        if summary.exists() {
            fs::remove_file(summary)?;
        }
        Ok(())
    }
}

/// In-memory trial backend for testing
///
/// Stores records in a `BTreeMap`. No persistence.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecorder {
    records: BTreeMap<usize, TrialRecord>,
    summary: Option<TuneResult>,
}

impl InMemoryRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Last saved summary
    pub fn summary(&self) -> Option<&TuneResult> {
        self.summary.as_ref()
    }
}

impl TrialRecorder for InMemoryRecorder {
    fn record(&mut self, record: &TrialRecord) -> Result<()> {
        self.records.insert(record.trial_id, record.clone());
        Ok(())
    }

    fn load_trial(&self, trial_id: usize) -> Result<TrialRecord> {
        self.records.get(&trial_id).cloned().ok_or(TrackingError::TrialNotFound(trial_id))
    }

    fn load_trials(&self) -> Result<Vec<TrialRecord>> {
        Ok(self.records.values().cloned().collect())
    }

    fn save_summary(&mut self, summary: &TuneResult) -> Result<()> {
        self.summary = Some(summary.clone());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.records.clear();
        self.summary = None;
        Ok(())
    }
}

impl<R: TrialRecorder + ?Sized> TrialRecorder for &mut R {
    fn record(&mut self, record: &TrialRecord) -> Result<()> {
        (**self).record(record)
    }

    fn load_trial(&self, trial_id: usize) -> Result<TrialRecord> {
        (**self).load_trial(trial_id)
    }

    fn load_trials(&self) -> Result<Vec<TrialRecord>> {
        (**self).load_trials()
    }

    fn save_summary(&mut self, summary: &TuneResult) -> Result<()> {
        (**self).save_summary(summary)
    }

    fn clear(&mut self) -> Result<()> {
        (**self).clear()
    }
}
