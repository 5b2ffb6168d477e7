//! plotline interpret command implementation.

use std::path::PathBuf;

use crate::collaborator::select_interpreter;
use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::project::GanttProject;
use crate::task::Task;

/// Options for the interpret command
pub struct InterpretOptions {
    pub text: String,
    pub write: bool,
    pub project: PathBuf,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct InterpretReport {
    message: String,
    task_count: usize,
    written: bool,
    tasks: Vec<Task>,
}

pub fn run(options: InterpretOptions) -> Result<()> {
    let config = Config::load_for_project(options.config.as_ref(), &options.project);
    let mut project = GanttProject::load(&options.project)?;

    let interpreter = select_interpreter(&config, None)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let outcome = runtime.block_on(interpreter.interpret(&options.text, &project.data))?;

    let updated = outcome.data.sorted();
    if options.write {
        project.data = updated.clone();
        project.save(&options.project)?;
    }

    let report = InterpretReport {
        message: outcome.message.clone(),
        task_count: updated.tasks.len(),
        written: options.write,
        tasks: updated.tasks,
    };

    let mut human = HumanOutput::new(outcome.message);
    human.push_summary("tasks", report.task_count.to_string());
    if options.write {
        human.push_summary("written", options.project.display().to_string());
    }

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "interpret",
        &report,
        Some(&human),
    )
}
