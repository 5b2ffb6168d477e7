//! Project file model.
//!
//! The persisted project JSON wraps a task collection with display
//! metadata. Field names are camelCase on the wire (`startDate`). The
//! interpreter itself never reads this format; the CLI loads it, hands
//! the in-memory `data.tasks` to the core, and writes the result back.

use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::task::GanttData;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GanttProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Milliseconds since the epoch.
    pub start_date: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
    #[serde(default)]
    pub data: GanttData,
}

impl GanttProject {
    pub fn new(name: impl Into<String>, start_date: i64) -> Self {
        Self {
            id: format!("project-{}", Uuid::new_v4()),
            name: name.into(),
            description: String::new(),
            start_date,
            resources: Vec::new(),
            data: GanttData::default(),
        }
    }

    /// Read a project file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::ProjectNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let project = serde_json::from_str(&content)?;
        Ok(project)
    }

    /// Write the project back as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    #[test]
    fn round_trips_camel_case_wire_format() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("demo.json");

        let mut project = GanttProject::new("Demo", 1_000);
        project.data.tasks.push(Task::new("Research", 0, 1));
        project.save(&path).expect("save");

        let raw = std::fs::read_to_string(&path).expect("read");
        assert!(raw.contains("\"startDate\""));

        let loaded = GanttProject::load(&path).expect("load");
        assert_eq!(loaded, project);
    }

    #[test]
    fn missing_file_is_a_user_error() {
        let err = GanttProject::load(Path::new("/nonexistent/p.json")).unwrap_err();
        assert!(matches!(err, Error::ProjectNotFound(_)));
        assert_eq!(err.exit_code(), crate::error::exit_codes::USER_ERROR);
    }
}
