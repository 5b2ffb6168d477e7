//! plotline sort command implementation.

use std::path::PathBuf;

use crate::dates::format_ms;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::project::GanttProject;
use crate::task::Task;

/// Options for the sort command
pub struct SortOptions {
    pub write: bool,
    pub project: PathBuf,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct SortReport {
    task_count: usize,
    written: bool,
    tasks: Vec<Task>,
}

pub fn run(options: SortOptions) -> Result<()> {
    let mut project = GanttProject::load(&options.project)?;
    let sorted = project.data.sorted();

    if options.write {
        project.data = sorted.clone();
        project.save(&options.project)?;
    }

    let mut human = HumanOutput::new(format!(
        "{} task(s) in display order",
        sorted.tasks.len()
    ));
    for task in &sorted.tasks {
        let group = task.feature.as_deref().unwrap_or("-");
        human.push_detail(format!(
            "[{group}] {} ({} to {})",
            task.name,
            format_ms(task.start),
            format_ms(task.end)
        ));
    }

    let report = SortReport {
        task_count: sorted.tasks.len(),
        written: options.write,
        tasks: sorted.tasks,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "sort",
        &report,
        Some(&human),
    )
}
