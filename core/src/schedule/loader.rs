//! Schedule definition loading
//!
//! Load schedule definitions from TOML files. A file holds any number of
//! `[[schedule]]` tables:
//!
//! ```toml
//! [[schedule]]
//! id = "spawn_waves"
//! name = "Spawn Waves"
//! stages = [2.0, 3.0, 1.0]
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::{ScheduleDefinition, ScheduleError};

#[derive(Debug, Deserialize)]
struct ScheduleFile {
    #[serde(default, rename = "schedule")]
    schedules: Vec<ScheduleDefinition>,
}

/// Load schedule definitions from a single TOML file.
pub fn load_schedules_from_file(path: &Path) -> Result<Vec<ScheduleDefinition>, ScheduleError> {
    let content = fs::read_to_string(path).map_err(|source| ScheduleError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    let file: ScheduleFile = toml::from_str(&content).map_err(|source| ScheduleError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;

    for definition in &file.schedules {
        definition
            .validate()
            .map_err(|reason| ScheduleError::InvalidDefinition {
                path: path.to_path_buf(),
                reason,
            })?;
    }

    Ok(file.schedules)
}

/// Load all schedule definitions from a directory (recursive over `.toml`
/// files). A missing directory yields an empty list.
pub fn load_schedules_from_dir(dir: &Path) -> Result<Vec<ScheduleDefinition>, ScheduleError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut definitions = Vec::new();
    load_schedules_recursive(dir, &mut definitions)?;
    Ok(definitions)
}

fn load_schedules_recursive(
    dir: &Path,
    definitions: &mut Vec<ScheduleDefinition>,
) -> Result<(), ScheduleError> {
    let entries = fs::read_dir(dir).map_err(|source| ScheduleError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries.flatten() {
        let path = entry.path();

        if path.is_dir() {
            load_schedules_recursive(&path, definitions)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            definitions.extend(load_schedules_from_file(&path)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_schedule_tables() {
        let toml = r#"
[[schedule]]
id = "spawn_waves"
name = "Spawn Waves"
stages = [2.0, 3.0, 1.0]

[[schedule]]
id = "enrage"
name = "Enrage"
stages = [300.0]
"#;

        let file: ScheduleFile = toml::from_str(toml).expect("failed to parse TOML");
        assert_eq!(file.schedules.len(), 2);

        let waves = &file.schedules[0];
        assert_eq!(waves.id, "spawn_waves");
        assert_eq!(waves.name, "Spawn Waves");
        assert_eq!(waves.stages, vec![2.0, 3.0, 1.0]);

        assert_eq!(file.schedules[1].stages, vec![300.0]);
        for definition in &file.schedules {
            assert!(definition.validate().is_ok());
        }
    }

    #[test]
    fn empty_file_yields_no_schedules() {
        let file: ScheduleFile = toml::from_str("").expect("failed to parse TOML");
        assert!(file.schedules.is_empty());
    }

    #[test]
    fn stage_lists_must_be_positive() {
        let toml = r#"
[[schedule]]
id = "bad"
name = "Bad"
stages = [2.0, -1.0]
"#;

        let file: ScheduleFile = toml::from_str(toml).expect("failed to parse TOML");
        let reason = file.schedules[0].validate().unwrap_err();
        assert!(reason.contains("non-positive"));
    }
}
