//! plotline suggest command implementation.

use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::output::{emit_success, HumanOutput, OutputOptions};
use crate::project::GanttProject;
use crate::suggest::suggestions;

/// Options for the suggest command
pub struct SuggestOptions {
    pub text: String,
    pub project: PathBuf,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub quiet: bool,
}

#[derive(serde::Serialize)]
struct SuggestReport {
    input: String,
    suggestions: Vec<String>,
}

pub fn run(options: SuggestOptions) -> Result<()> {
    let config = Config::load_for_project(options.config.as_ref(), &options.project);
    let project = GanttProject::load(&options.project)?;

    let mut candidates = suggestions(&options.text, &project.data.tasks);
    candidates.truncate(config.suggestion_limit());

    let mut human = HumanOutput::new(format!(
        "{} suggestion(s) for \"{}\"",
        candidates.len(),
        options.text
    ));
    for candidate in &candidates {
        human.push_detail(candidate.clone());
    }

    let report = SuggestReport {
        input: options.text,
        suggestions: candidates,
    };

    emit_success(
        OutputOptions {
            json: options.json,
            quiet: options.quiet,
        },
        "suggest",
        &report,
        Some(&human),
    )
}
