//! Rule-based natural-language command interpreter.
//!
//! Maps one free-text instruction plus a task snapshot to a new snapshot
//! and a confirmation message. Intent is classified by keyword presence
//! in a fixed precedence order; each intent then extracts its fields with
//! a small regex grammar. The input collection is never mutated: every
//! branch either returns a freshly built collection or fails before
//! constructing one.
//!
//! Precedence (first match wins): add task, update progress, extend task,
//! delete task, add milestone, add dependency, then a non-failing generic
//! help reply. Callers that host a chat transcript should go through
//! [`crate::session::ChatSession`], which converts failures into system
//! messages.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::dates::{add_days, format_ms, Calendar};
use crate::error::{Error, Intent, Result};
use crate::task::{prune_dependencies, GanttData, Task};

/// Help reply for input that matches no command grammar.
pub const HELP_MESSAGE: &str = "I'm not sure how to process that request. \
    Try commands like 'Add a task Design from day 5 to day 10' or \
    'Update task Research progress to 50%'.";

/// Default task length when a command gives only a start bound.
pub const DEFAULT_DURATION_DAYS: i64 = 5;

/// Result of a successfully interpreted command: the full new collection
/// (untouched tasks included) and a human-readable confirmation.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub data: GanttData,
    pub message: String,
}

/// Interpret `command` against `data` using today's calendar.
pub fn interpret(command: &str, data: &GanttData) -> Result<Interpretation> {
    interpret_at(command, data, Calendar::today())
}

/// Interpret `command` against `data` with an explicit date context.
///
/// The calendar fixes "today" and the day-1 Monday anchor for every
/// bound in this one command.
pub fn interpret_at(command: &str, data: &GanttData, calendar: Calendar) -> Result<Interpretation> {
    let lower = command.to_lowercase();

    if lower.contains("add") && lower.contains("task") {
        debug!(intent = "add_task", "classified command");
        add_task(command, data, &calendar)
    } else if (lower.contains("update") || lower.contains("set")) && lower.contains("progress") {
        debug!(intent = "update_progress", "classified command");
        update_progress(command, data)
    } else if lower.contains("extend") && lower.contains("task") {
        debug!(intent = "extend_task", "classified command");
        extend_task(command, data)
    } else if (lower.contains("delete") || lower.contains("remove")) && lower.contains("task") {
        debug!(intent = "delete_task", "classified command");
        delete_task(command, data)
    } else if lower.contains("add") && lower.contains("milestone") {
        debug!(intent = "add_milestone", "classified command");
        add_milestone(command, data, &calendar)
    } else if lower.contains("add") && lower.contains("dependency") {
        debug!(intent = "add_dependency", "classified command");
        add_dependency(command, data)
    } else {
        debug!(intent = "none", "no command grammar matched");
        Ok(Interpretation {
            data: data.clone(),
            message: HELP_MESSAGE.to_string(),
        })
    }
}

/// Compiled extraction patterns, shared across interpretations.
struct Grammar {
    add_name_quoted: Regex,
    add_name_bare: Regex,
    from_day: Regex,
    from_date: Regex,
    to_day: Regex,
    to_date: Regex,
    progress_name_quoted: Regex,
    progress_name_bare: Regex,
    progress_value: Regex,
    extend_name_quoted: Regex,
    extend_name_bare: Regex,
    extend_days: Regex,
    delete_name_quoted: Regex,
    delete_name_bare: Regex,
    milestone_name_quoted: Regex,
    milestone_name_bare: Regex,
    on_day: Regex,
    on_date: Regex,
    dependency_quoted: Regex,
    dependency_bare: Regex,
}

impl Grammar {
    fn new() -> Self {
        let build = |pattern: &str| Regex::new(pattern).expect("grammar pattern is valid");
        Self {
            add_name_quoted: build(r#"(?i)add(?:\s+a)?\s+task\s+["']([^"']+)["']"#),
            add_name_bare: build(r#"(?i)add(?:\s+a)?\s+task\s+([^"']+?)\s+from"#),
            from_day: build(r"(?i)\bfrom\s+(?:day\s+)?(\d+)\b"),
            from_date: build(r"(?i)\bfrom\s+([A-Za-z]+\s+\d+)"),
            to_day: build(r"(?i)\bto\s+(?:day\s+)?(\d+)\b"),
            to_date: build(r"(?i)\bto\s+([A-Za-z]+\s+\d+)"),
            progress_name_quoted: build(
                r#"(?i)(?:update|set)\s+(?:task\s+)?["']([^"']+)["']\s+progress"#,
            ),
            progress_name_bare: build(r"(?i)(?:update|set)\s+(?:task\s+)?(.+?)\s+progress"),
            progress_value: build(r"(?i)progress\s+(?:to\s+)?(\d+)\s*(?:%|percent)?"),
            extend_name_quoted: build(r#"(?i)extend\s+(?:task\s+)?["']([^"']+)["']"#),
            extend_name_bare: build(r"(?i)extend\s+(?:task\s+)?(.+?)\s+by"),
            extend_days: build(r"(?i)\bby\s+(\d+)\s+days?"),
            delete_name_quoted: build(r#"(?i)(?:delete|remove)\s+(?:task\s+)?["']([^"']+)["']"#),
            delete_name_bare: build(r"(?i)(?:delete|remove)\s+(?:task\s+)?(.+)"),
            milestone_name_quoted: build(r#"(?i)add(?:\s+a)?\s+milestone\s+["']([^"']+)["']"#),
            milestone_name_bare: build(r"(?i)add(?:\s+a)?\s+milestone\s+(.+?)\s+on"),
            on_day: build(r"(?i)\bon\s+(?:day\s+)?(\d+)\b"),
            on_date: build(r"(?i)\bon\s+([A-Za-z]+\s+\d+)"),
            dependency_quoted: build(r#"(?i)from\s+["']([^"']+)["']\s+to\s+["']([^"']+)["']"#),
            dependency_bare: build(r"(?i)from\s+(.+?)\s+to\s+(.+)"),
        }
    }
}

fn grammar() -> &'static Grammar {
    static GRAMMAR: OnceLock<Grammar> = OnceLock::new();
    GRAMMAR.get_or_init(Grammar::new)
}

/// First capture of the first matching pattern, trimmed.
fn capture<'t>(command: &'t str, patterns: &[&Regex]) -> Option<&'t str> {
    patterns.iter().find_map(|re| {
        re.captures(command)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
    })
}

/// A date bound as written in the command: a project day number or a
/// literal month-day date.
enum Bound {
    Day(i64),
    Literal(String),
}

impl Bound {
    fn extract(command: &str, day_re: &Regex, date_re: &Regex) -> Option<Self> {
        if let Some(caps) = day_re.captures(command) {
            let text = caps[1].trim();
            // A digit run too large for i64 still counts as a bound; it
            // fails resolution rather than silently defaulting.
            return Some(match text.parse() {
                Ok(n) => Bound::Day(n),
                Err(_) => Bound::Literal(text.to_string()),
            });
        }
        date_re
            .captures(command)
            .map(|caps| Bound::Literal(caps[1].trim().to_string()))
    }

    fn resolve(&self, calendar: &Calendar) -> Option<i64> {
        match self {
            Bound::Day(n) => calendar.day(*n),
            Bound::Literal(text) => calendar.parse_month_day(text),
        }
    }
}

fn add_task(command: &str, data: &GanttData, calendar: &Calendar) -> Result<Interpretation> {
    let g = grammar();
    let name = capture(command, &[&g.add_name_quoted, &g.add_name_bare]);
    let from = Bound::extract(command, &g.from_day, &g.from_date);
    let to = Bound::extract(command, &g.to_day, &g.to_date);

    let Some(name) = name else {
        return Err(Error::Intent(Intent::AddTask));
    };
    if name.is_empty() || (from.is_none() && to.is_none()) {
        return Err(Error::Intent(Intent::AddTask));
    }

    let start = match &from {
        Some(bound) => bound.resolve(calendar).ok_or(Error::InvalidDates)?,
        None => calendar.today_ms(),
    };
    let end = match &to {
        Some(bound) => bound.resolve(calendar).ok_or(Error::InvalidDates)?,
        None => add_days(start, DEFAULT_DURATION_DAYS).ok_or(Error::InvalidDates)?,
    };
    let (start, end) = if start > end { (end, start) } else { (start, end) };

    let task = Task::new(name, start, end);
    let message = format!(
        "Added task \"{}\" from {} to {}.",
        name,
        format_ms(start),
        format_ms(end)
    );

    let mut updated = data.clone();
    updated.tasks.push(task);
    Ok(Interpretation {
        data: updated,
        message,
    })
}

fn update_progress(command: &str, data: &GanttData) -> Result<Interpretation> {
    let g = grammar();
    let name = capture(command, &[&g.progress_name_quoted, &g.progress_name_bare]);
    let value = g
        .progress_value
        .captures(command)
        .and_then(|caps| caps[1].parse::<u32>().ok());

    let (Some(name), Some(value)) = (name, value) else {
        return Err(Error::Intent(Intent::UpdateProgress));
    };
    let progress = value.min(100) as u8;

    let index = data
        .index_by_name(name)
        .ok_or_else(|| Error::TaskNotFound(name.to_string()))?;

    let mut updated = data.clone();
    updated.tasks[index].progress = progress;
    Ok(Interpretation {
        data: updated,
        message: format!("Updated progress for task \"{name}\" to {progress}%."),
    })
}

fn extend_task(command: &str, data: &GanttData) -> Result<Interpretation> {
    let g = grammar();
    let name = capture(command, &[&g.extend_name_quoted, &g.extend_name_bare]);
    let days = g
        .extend_days
        .captures(command)
        .and_then(|caps| caps[1].parse::<i64>().ok());

    let (Some(name), Some(days)) = (name, days) else {
        return Err(Error::Intent(Intent::ExtendTask));
    };

    let index = data
        .index_by_name(name)
        .ok_or_else(|| Error::TaskNotFound(name.to_string()))?;

    let mut updated = data.clone();
    let end =
        add_days(updated.tasks[index].end, days).ok_or(Error::Intent(Intent::ExtendTask))?;
    updated.tasks[index].end = end;
    Ok(Interpretation {
        data: updated,
        message: format!(
            "Extended task \"{name}\" by {days} days to end on {}.",
            format_ms(end)
        ),
    })
}

fn delete_task(command: &str, data: &GanttData) -> Result<Interpretation> {
    let g = grammar();
    let name = capture(command, &[&g.delete_name_quoted, &g.delete_name_bare]);

    let Some(name) = name else {
        return Err(Error::Intent(Intent::DeleteTask));
    };
    if name.is_empty() {
        return Err(Error::Intent(Intent::DeleteTask));
    }

    let index = data
        .index_by_name(name)
        .ok_or_else(|| Error::TaskNotFound(name.to_string()))?;

    let mut updated = data.clone();
    let removed = updated.tasks.remove(index);
    prune_dependencies(&mut updated.tasks, &removed.id);
    Ok(Interpretation {
        data: updated,
        message: format!("Removed task \"{name}\" from the project."),
    })
}

fn add_milestone(command: &str, data: &GanttData, calendar: &Calendar) -> Result<Interpretation> {
    let g = grammar();
    let name = capture(command, &[&g.milestone_name_quoted, &g.milestone_name_bare]);
    let bound = Bound::extract(command, &g.on_day, &g.on_date);

    let (Some(name), Some(bound)) = (name, bound) else {
        return Err(Error::Intent(Intent::AddMilestone));
    };
    if name.is_empty() {
        return Err(Error::Intent(Intent::AddMilestone));
    }

    let date = bound.resolve(calendar).ok_or(Error::InvalidDate)?;
    let milestone = Task::milestone(name, date);
    let message = format!("Added milestone \"{}\" on {}.", name, format_ms(date));

    let mut updated = data.clone();
    updated.tasks.push(milestone);
    Ok(Interpretation {
        data: updated,
        message,
    })
}

fn add_dependency(command: &str, data: &GanttData) -> Result<Interpretation> {
    let g = grammar();
    let caps = g
        .dependency_quoted
        .captures(command)
        .or_else(|| g.dependency_bare.captures(command))
        .ok_or(Error::Intent(Intent::AddDependency))?;
    let from_name = caps[1].trim().to_string();
    let to_name = caps[2].trim().to_string();

    let from_id = data
        .find_by_name(&from_name)
        .map(|t| t.id.clone())
        .ok_or(Error::TasksNotFound)?;
    let to_index = data.index_by_name(&to_name).ok_or(Error::TasksNotFound)?;

    let mut updated = data.clone();
    updated.tasks[to_index].add_dependency(&from_id);
    Ok(Interpretation {
        data: updated,
        message: format!("Added dependency from \"{from_name}\" to \"{to_name}\"."),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::MS_PER_DAY;
    use chrono::NaiveDate;

    fn cal() -> Calendar {
        // 2026-08-27 is a Thursday; day 1 resolves to Monday the 24th.
        Calendar::at(NaiveDate::from_ymd_opt(2026, 8, 27).unwrap())
    }

    #[test]
    fn quoted_name_wins_over_bare() {
        let out = interpret_at(r#"add task "Deep Work" from day 1 to day 3"#, &GanttData::default(), cal())
            .unwrap();
        assert_eq!(out.data.tasks[0].name, "Deep Work");
    }

    #[test]
    fn bare_name_runs_up_to_from() {
        let out = interpret_at(
            "add a task Design review from day 2 to day 4",
            &GanttData::default(),
            cal(),
        )
        .unwrap();
        assert_eq!(out.data.tasks[0].name, "Design review");
    }

    #[test]
    fn name_casing_is_preserved() {
        let out = interpret_at(
            r#"ADD TASK "Testing" FROM DAY 1 TO DAY 2"#,
            &GanttData::default(),
            cal(),
        )
        .unwrap();
        assert_eq!(out.data.tasks[0].name, "Testing");
    }

    #[test]
    fn literal_dates_resolve_in_calendar_year() {
        let out = interpret_at(
            r#"add task "Summer" from june 15 to june 20"#,
            &GanttData::default(),
            cal(),
        )
        .unwrap();
        let task = &out.data.tasks[0];
        assert_eq!(task.end - task.start, 5 * MS_PER_DAY);
        assert!(out.message.contains("June 15, 2026"));
    }

    #[test]
    fn unparseable_date_fails_with_dates_message() {
        let err = interpret_at(
            r#"add task "X" from notamonth 5 to day 3"#,
            &GanttData::default(),
            cal(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Couldn't understand the dates in your request"
        );
    }

    #[test]
    fn milestone_keeps_add_precedence_over_dependency() {
        // "add" + "milestone" must classify before "add" + "dependency"
        // when both keyword pairs appear.
        let data = GanttData::default();
        let out = interpret_at(
            r#"add milestone "Dependency freeze" on day 4"#,
            &data,
            cal(),
        )
        .unwrap();
        assert!(out.data.tasks[0].milestone);
    }

    #[test]
    fn input_collection_is_untouched() {
        let data = GanttData {
            tasks: vec![Task::new("Research", 0, MS_PER_DAY)],
            categories: Vec::new(),
        };
        let before = data.clone();
        let _ = interpret_at(r#"set task "Research" progress to 40%"#, &data, cal()).unwrap();
        assert_eq!(data, before);
    }
}
