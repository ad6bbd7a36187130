//! Schedule definitions
//!
//! This module provides:
//! - **Definitions**: named stage sequences declared in TOML
//! - **Library**: a registry of definitions keyed by id
//! - **Loader**: file and directory loading with fail-fast validation
//!
//! A definition is the declarative side of a
//! [`SimpleCounterQueue`](crate::counter::SimpleCounterQueue): load it once,
//! build queues from it as needed.

mod error;
mod loader;

pub use error::ScheduleError;
pub use loader::{load_schedules_from_dir, load_schedules_from_file};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// A named stage sequence (loaded from config)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDefinition {
    /// Unique identifier for this schedule
    pub id: String,

    /// Display name
    pub name: String,

    /// Stage time limits, in seconds, in play order
    pub stages: Vec<f64>,
}

impl ScheduleDefinition {
    /// Check structural validity; returns the reason on failure.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("schedule id must not be empty".to_string());
        }
        if self.stages.is_empty() {
            return Err(format!("schedule `{}` has no stages", self.id));
        }
        if let Some((index, &limit)) = self
            .stages
            .iter()
            .enumerate()
            .find(|&(_, &limit)| limit <= 0.0)
        {
            return Err(format!(
                "schedule `{}` stage {} has non-positive limit {}",
                self.id, index, limit
            ));
        }
        Ok(())
    }
}

/// Registry of schedule definitions keyed by id.
#[derive(Debug, Clone, Default)]
pub struct ScheduleLibrary {
    schedules: HashMap<String, ScheduleDefinition>,
}

impl ScheduleLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition; duplicate ids are rejected rather than silently
    /// replaced.
    pub fn insert(&mut self, definition: ScheduleDefinition) -> Result<(), ScheduleError> {
        if self.schedules.contains_key(&definition.id) {
            return Err(ScheduleError::DuplicateId { id: definition.id });
        }
        self.schedules.insert(definition.id.clone(), definition);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&ScheduleDefinition> {
        self.schedules.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScheduleDefinition> {
        self.schedules.values()
    }

    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }

    /// Load every definition under `dir` (recursive). Returns how many were
    /// added.
    pub fn load_dir(&mut self, dir: &std::path::Path) -> Result<usize, ScheduleError> {
        let definitions = load_schedules_from_dir(dir)?;
        let count = definitions.len();
        for definition in definitions {
            self.insert(definition)?;
        }
        tracing::info!(count, dir = %dir.display(), "loaded schedule definitions");
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn definition(id: &str, stages: Vec<f64>) -> ScheduleDefinition {
        ScheduleDefinition {
            id: id.to_string(),
            name: id.to_string(),
            stages,
        }
    }

    #[test]
    fn validate_rejects_bad_definitions() {
        assert!(definition("ok", vec![1.0, 2.0]).validate().is_ok());
        assert!(definition("", vec![1.0]).validate().is_err());
        assert!(definition("empty", Vec::new()).validate().is_err());
        assert!(definition("zero", vec![1.0, 0.0]).validate().is_err());
    }

    #[test]
    fn library_rejects_duplicate_ids() {
        let mut library = ScheduleLibrary::new();
        library.insert(definition("waves", vec![2.0])).unwrap();

        let err = library.insert(definition("waves", vec![3.0])).unwrap_err();
        assert!(matches!(err, ScheduleError::DuplicateId { id } if id == "waves"));

        assert_eq!(library.len(), 1);
        assert_eq!(library.get("waves").unwrap().stages, vec![2.0]);
    }
}
