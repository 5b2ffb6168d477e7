//! plotline chat command implementation.
//!
//! Reads commands line by line from stdin, maintains the transcript in a
//! `ChatSession`, and prints each system reply. Failures never end the
//! session; `exit`, `quit`, or EOF do.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::collaborator::select_interpreter;
use crate::config::Config;
use crate::error::Result;
use crate::project::GanttProject;
use crate::session::ChatSession;

/// Options for the chat command
pub struct ChatOptions {
    pub write: bool,
    pub project: PathBuf,
    pub config: Option<PathBuf>,
    pub quiet: bool,
}

pub fn run(options: ChatOptions) -> Result<()> {
    let config = Config::load_for_project(options.config.as_ref(), &options.project);
    let mut project = GanttProject::load(&options.project)?;

    let interpreter = select_interpreter(&config, None)?;
    let runtime = tokio::runtime::Runtime::new()?;
    let mut session = ChatSession::new(project.data.clone());

    if !options.quiet {
        println!(
            "Chatting with project \"{}\" ({} tasks). Type 'exit' to finish.",
            project.name,
            project.data.tasks.len()
        );
    }

    let stdin = io::stdin();
    loop {
        if !options.quiet {
            print!("plotline> ");
            io::stdout().flush()?;
        }

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        let reply = runtime.block_on(session.submit(line, interpreter.as_ref()));
        println!("{}", reply.content);
    }

    if options.write {
        project.data = session.data().clone();
        project.save(&options.project)?;
        if !options.quiet {
            println!("Saved {} task(s) to {}.", project.data.tasks.len(), options.project.display());
        }
    }

    Ok(())
}
