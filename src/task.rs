//! Task model for plotline.
//!
//! A `Task` is one schedulable bar on the timeline; `GanttData` is the
//! full in-memory collection a project view owns. The interpreter
//! receives a snapshot and returns a new one, so everything here is
//! clone-friendly plain data plus a handful of collection helpers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Accent color applied to tasks created without an explicit color.
pub const DEFAULT_TASK_COLOR: &str = "#6366F1";

/// Color applied to milestones created through chat commands.
pub const MILESTONE_COLOR: &str = "#F59E0B";

/// Derived completion state of a task. Never stored: always recomputed
/// from `progress` so no mutation path can leave it stale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    NotStarted,
    InProgress,
    Completed,
}

/// A unit of schedulable work.
///
/// `start` and `end` are millisecond Unix timestamps with the invariant
/// `start <= end` (the interpreter swaps inverted bounds on entry).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub progress: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub milestone: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Task {
    /// A fresh task with generated id and chat-creation defaults.
    pub fn new(name: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            id: format!("task-{}", Uuid::new_v4()),
            name: name.into(),
            start,
            end,
            progress: 0,
            dependencies: Vec::new(),
            milestone: false,
            feature: None,
            assignee: None,
            color: Some(DEFAULT_TASK_COLOR.to_string()),
        }
    }

    /// A zero-duration milestone at `date`.
    pub fn milestone(name: impl Into<String>, date: i64) -> Self {
        Self {
            id: format!("milestone-{}", Uuid::new_v4()),
            name: name.into(),
            start: date,
            end: date,
            progress: 0,
            dependencies: Vec::new(),
            milestone: true,
            feature: None,
            assignee: None,
            color: Some(MILESTONE_COLOR.to_string()),
        }
    }

    /// Completion state derived from `progress`.
    pub fn status(&self) -> Status {
        match self.progress {
            0 => Status::NotStarted,
            100.. => Status::Completed,
            _ => Status::InProgress,
        }
    }

    /// Display color, falling back to the accent default.
    pub fn display_color(&self) -> &str {
        self.color.as_deref().unwrap_or(DEFAULT_TASK_COLOR)
    }

    /// Record a dependency on `id`, ignoring duplicates.
    pub fn add_dependency(&mut self, id: &str) {
        if !self.dependencies.iter().any(|dep| dep == id) {
            self.dependencies.push(id.to_string());
        }
    }
}

/// Display grouping metadata. The interpreter never touches categories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// The task collection a project view owns: ordered tasks plus categories.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GanttData {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub categories: Vec<Category>,
}

impl GanttData {
    /// Case-insensitive exact-name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&Task> {
        self.tasks
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Index of the task whose name matches case-insensitively.
    pub fn index_by_name(&self, name: &str) -> Option<usize> {
        self.tasks
            .iter()
            .position(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Collection with tasks in the deterministic display order.
    pub fn sorted(&self) -> Self {
        Self {
            tasks: sort_tasks(&self.tasks),
            categories: self.categories.clone(),
        }
    }
}

/// Deterministic display/storage order over a task list.
///
/// Ungrouped tasks come first, sorted by start. Feature groups follow,
/// ordered by each group's earliest start, members sorted by start.
/// Stable and idempotent; ties keep their existing relative order.
pub fn sort_tasks(tasks: &[Task]) -> Vec<Task> {
    let mut ungrouped: Vec<Task> = Vec::new();
    let mut groups: Vec<(String, Vec<Task>)> = Vec::new();

    for task in tasks {
        match &task.feature {
            Some(feature) => match groups.iter_mut().find(|(name, _)| name == feature) {
                Some((_, members)) => members.push(task.clone()),
                None => groups.push((feature.clone(), vec![task.clone()])),
            },
            None => ungrouped.push(task.clone()),
        }
    }

    ungrouped.sort_by_key(|t| t.start);
    for (_, members) in &mut groups {
        members.sort_by_key(|t| t.start);
    }
    // Members are sorted, so each group's first task carries its minimum.
    groups.sort_by_key(|(_, members)| members.first().map(|t| t.start));

    let mut sorted = ungrouped;
    for (_, members) in groups {
        sorted.extend(members);
    }
    sorted
}

/// Drop every reference to `id` from every task's dependency list.
pub fn prune_dependencies(tasks: &mut [Task], id: &str) {
    for task in tasks.iter_mut() {
        task.dependencies.retain(|dep| dep != id);
    }
}
