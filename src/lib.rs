//! plotline - Chat-Driven Gantt Timeline Editor Library
//!
//! This library provides the core functionality for the plotline CLI,
//! turning natural-language chat commands into consistent task-set
//! mutations.
//!
//! # Core Concepts
//!
//! - **Command Interpreter**: one free-text instruction plus a task
//!   snapshot in, a new snapshot plus a confirmation message out
//! - **Suggestion Engine**: ranked command completions for partial input
//! - **Task Ordering**: deterministic feature-grouped chronological order
//! - **Collaborators**: model-backed interpreters behind the same
//!   contract as the built-in rule grammar
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `collaborator`: Interpreter trait, reply normalization, selection
//! - `config`: Configuration loading from `.plotline.toml`
//! - `dates`: Calendar anchor and millisecond-timestamp helpers
//! - `error`: Error types and result aliases
//! - `interpreter`: Rule-based natural-language command interpreter
//! - `output`: JSON envelope and human-readable command output
//! - `project`: Project JSON file model
//! - `session`: Chat transcript boundary and failure isolation
//! - `suggest`: Suggestion engine
//! - `task`: Task model, ordering, and collection helpers

pub mod cli;
pub mod collaborator;
pub mod config;
pub mod dates;
pub mod error;
pub mod interpreter;
pub mod output;
pub mod project;
pub mod session;
pub mod suggest;
pub mod task;

pub use collaborator::{Interpreter, RuleInterpreter};
pub use error::{Error, Result};
pub use interpreter::{interpret, interpret_at, Interpretation};
pub use suggest::suggestions;
pub use task::{sort_tasks, GanttData, Task};
