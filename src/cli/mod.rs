//! Command-line interface for plotline
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

mod chat;
mod interpret;
mod sort;
mod suggest;

/// plotline - chat-driven Gantt timeline editor
///
/// Edits a project's task timeline through natural-language commands,
/// suggests command completions, and keeps tasks in a deterministic
/// feature-grouped order.
#[derive(Parser, Debug)]
#[command(name = "plotline")]
#[command(author, version, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the project JSON file
    #[arg(long, global = true, env = "PLOTLINE_PROJECT")]
    pub project: Option<PathBuf>,

    /// Path to a .plotline.toml config file
    #[arg(long, global = true, env = "PLOTLINE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interpret one natural-language command against the project
    Interpret {
        /// The command text, e.g. 'add task "Design" from day 5 to day 10'
        text: String,

        /// Write the updated task set back to the project file
        #[arg(long)]
        write: bool,
    },

    /// Suggest command completions for partial input
    Suggest {
        /// Partial command text
        text: String,
    },

    /// Show (or write back) the deterministic task ordering
    Sort {
        /// Write the sorted task set back to the project file
        #[arg(long)]
        write: bool,
    },

    /// Interactive chat session over the project
    Chat {
        /// Write the final task set back when the session ends
        #[arg(long)]
        write: bool,
    },
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let project = require_project(self.project)?;
        match self.command {
            Commands::Interpret { text, write } => interpret::run(interpret::InterpretOptions {
                text,
                write,
                project,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Suggest { text } => suggest::run(suggest::SuggestOptions {
                text,
                project,
                config: self.config,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Sort { write } => sort::run(sort::SortOptions {
                write,
                project,
                json: self.json,
                quiet: self.quiet,
            }),
            Commands::Chat { write } => chat::run(chat::ChatOptions {
                write,
                project,
                config: self.config,
                quiet: self.quiet,
            }),
        }
    }
}

fn require_project(project: Option<PathBuf>) -> Result<PathBuf> {
    project.ok_or_else(|| {
        crate::error::Error::InvalidArgument(
            "--project <FILE> is required (or set PLOTLINE_PROJECT)".to_string(),
        )
    })
}
