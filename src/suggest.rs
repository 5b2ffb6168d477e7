//! Suggestion engine for chat command composition.
//!
//! Pure function over the partial input and the current task list; safe
//! to call on every keystroke. Pool order is part of the contract:
//! static templates stay in declaration order and task-derived
//! candidates follow collection order, so truncation to five keeps the
//! most prominent entries.

use crate::task::Task;

/// Input shorter than this produces no suggestions.
pub const MIN_INPUT_LEN: usize = 3;

/// Maximum number of suggestions returned.
pub const MAX_SUGGESTIONS: usize = 5;

/// Static example commands, in display order.
const TEMPLATES: [&str; 6] = [
    "add task \"Task Name\" from day 1 to day 5",
    "update task \"Task Name\" progress to 50%",
    "extend task \"Task Name\" by 5 days",
    "delete task \"Task Name\"",
    "add milestone \"Milestone Name\" on day 10",
    "add dependency from \"Task A\" to \"Task B\"",
];

/// Up to five candidate completions for `input` over `tasks`.
///
/// Classification by leading verb selects the pool; the pool is then
/// filtered to entries containing the lowercased input and truncated in
/// pool order. Near-empty input yields nothing.
pub fn suggestions(input: &str, tasks: &[Task]) -> Vec<String> {
    if input.len() < MIN_INPUT_LEN {
        return Vec::new();
    }
    let input = input.to_lowercase();

    let pool: Vec<String> = if input.starts_with("add") {
        TEMPLATES
            .iter()
            .filter(|cmd| cmd.starts_with("add"))
            .map(|cmd| cmd.to_string())
            .collect()
    } else if input.starts_with("update") {
        tasks
            .iter()
            .map(|t| format!("update task \"{}\" progress to ", t.name))
            .collect()
    } else if input.starts_with("extend") {
        tasks
            .iter()
            .map(|t| format!("extend task \"{}\" by ", t.name))
            .collect()
    } else if input.starts_with("delete") {
        tasks
            .iter()
            .map(|t| format!("delete task \"{}\"", t.name))
            .collect()
    } else if input.contains("task") && !tasks.is_empty() {
        tasks.iter().map(|t| format!("\"{}\"", t.name)).collect()
    } else {
        TEMPLATES.iter().map(|cmd| cmd.to_string()).collect()
    };

    pool.into_iter()
        .filter(|candidate| candidate.to_lowercase().contains(&input))
        .take(MAX_SUGGESTIONS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(names: &[&str]) -> Vec<Task> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Task::new(*name, i as i64, i as i64 + 1))
            .collect()
    }

    #[test]
    fn short_input_is_silent() {
        assert!(suggestions("", &tasks(&["A"])).is_empty());
        assert!(suggestions("ad", &tasks(&["A"])).is_empty());
    }

    #[test]
    fn add_offers_add_templates_only() {
        let out = suggestions("add", &tasks(&["A"]));
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|s| s.starts_with("add")));
    }

    #[test]
    fn update_parameterizes_existing_tasks_in_order() {
        let out = suggestions("update", &tasks(&["Research", "Design"]));
        assert_eq!(
            out,
            vec![
                "update task \"Research\" progress to ",
                "update task \"Design\" progress to ",
            ]
        );
    }

    #[test]
    fn filter_is_case_insensitive_substring() {
        let out = suggestions("DELETE TASK \"RES", &tasks(&["Research", "Design"]));
        assert_eq!(out, vec!["delete task \"Research\""]);
    }

    #[test]
    fn truncates_to_five_in_pool_order() {
        let many = tasks(&["t1", "t2", "t3", "t4", "t5", "t6", "t7"]);
        let out = suggestions("delete", &many);
        assert_eq!(out.len(), 5);
        assert_eq!(out[0], "delete task \"t1\"");
        assert_eq!(out[4], "delete task \"t5\"");
    }

    #[test]
    fn unknown_lead_falls_back_to_all_templates() {
        assert!(suggestions("how do", &tasks(&["A"])).is_empty());
        let out = suggestions("day 1", &[]);
        // "day 1" appears in the first add template only.
        assert_eq!(out, vec!["add task \"Task Name\" from day 1 to day 5"]);
    }

    #[test]
    fn task_mention_quotes_names() {
        let out = suggestions("task", &tasks(&["Subtask audit", "Design"]));
        assert_eq!(out, vec!["\"Subtask audit\""]);
    }
}
