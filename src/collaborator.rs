//! Swappable interpreter contract and model-backed collaborator plumbing.
//!
//! The built-in rule grammar and any remote model endpoint sit behind one
//! async trait so the chat boundary never cares which is answering. A
//! model-backed collaborator receives [`SYSTEM_INSTRUCTION`] plus the
//! current task snapshot and must reply with a full task list and a
//! message; [`normalize_reply`] sanitizes that reply before the core
//! accepts it. Network transport stays with the collaborator.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{ChatBackend, Config};
use crate::error::{Error, Result};
use crate::interpreter::{interpret, Interpretation};
use crate::task::{GanttData, Task, DEFAULT_TASK_COLOR};

/// Output-shape instruction handed to model-backed collaborators.
pub const SYSTEM_INSTRUCTION: &str = r#"You are a Gantt chart task manager. Follow these rules exactly:

1. Only modify tasks when explicitly asked
2. Always return this exact JSON structure:
{
  "tasks": [
    {
      "id": "string (keep existing ID if task exists)",
      "name": "string (task name)",
      "start": number (Unix timestamp in milliseconds),
      "end": number (Unix timestamp in milliseconds),
      "progress": number (between 0 and 100),
      "dependencies": string[] (keep existing unless asked to change),
      "milestone": boolean (true/false),
      "feature": "string (keep existing unless asked to change)",
      "color": "string (hex color like #FF0000)"
    }
  ],
  "message": "string (brief response about what changed)"
}

Important:
- Keep all existing task IDs unchanged
- Keep all existing dependencies unless specifically asked to modify
- If you don't understand a command, keep existing task data unchanged
- All dates must be valid Unix timestamps in milliseconds
- Progress must be between 0 and 100
- Return the complete tasks array, including unmodified tasks"#;

/// Fallback confirmation when a collaborator reply carries no message.
const DEFAULT_REPLY_MESSAGE: &str = "Task updated successfully";

/// Anything that can turn one chat command plus a task snapshot into a
/// new snapshot and a reply.
///
/// The rule-based interpreter completes synchronously under this
/// signature; model-backed implementations await a network round-trip.
#[async_trait]
pub trait Interpreter: Send + Sync {
    async fn interpret(&self, text: &str, data: &GanttData) -> Result<Interpretation>;

    /// Short backend label for logs and status output.
    fn name(&self) -> &'static str;
}

/// The built-in rule-based interpreter.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleInterpreter;

#[async_trait]
impl Interpreter for RuleInterpreter {
    async fn interpret(&self, text: &str, data: &GanttData) -> Result<Interpretation> {
        interpret(text, data)
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}

/// The task list + message a model-backed collaborator returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollaboratorReply {
    pub tasks: Vec<RawTask>,
    #[serde(default)]
    pub message: String,
}

/// A task as a collaborator reported it, before sanitizing.
///
/// `progress` is deliberately wide and `dependencies`/`color` optional:
/// model output drifts, and the integration layer owns the cleanup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTask {
    pub id: String,
    pub name: String,
    pub start: i64,
    pub end: i64,
    #[serde(default)]
    pub progress: i64,
    #[serde(default)]
    pub dependencies: Option<Vec<String>>,
    #[serde(default)]
    pub milestone: bool,
    #[serde(default)]
    pub feature: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl CollaboratorReply {
    /// Parse a collaborator's JSON body.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|_| Error::Collaborator("Invalid response format from collaborator".into()))
    }
}

/// Accept a collaborator reply into the core's task model.
///
/// Clamps progress into [0,100], defaults missing dependency lists and
/// colors, and carries the untouched categories over from the current
/// collection. Empty reply messages get a generic confirmation.
pub fn normalize_reply(current: &GanttData, reply: CollaboratorReply) -> Interpretation {
    let tasks = reply
        .tasks
        .into_iter()
        .map(|raw| {
            let progress = raw.progress.clamp(0, 100) as u8;
            if progress as i64 != raw.progress {
                warn!(task = %raw.id, reported = raw.progress, "clamped collaborator progress");
            }
            Task {
                id: raw.id,
                name: raw.name,
                start: raw.start,
                end: raw.end,
                progress,
                dependencies: raw.dependencies.unwrap_or_default(),
                milestone: raw.milestone,
                feature: raw.feature,
                assignee: raw.assignee,
                color: raw.color.or_else(|| Some(DEFAULT_TASK_COLOR.to_string())),
            }
        })
        .collect();

    let message = if reply.message.trim().is_empty() {
        DEFAULT_REPLY_MESSAGE.to_string()
    } else {
        reply.message
    };

    Interpretation {
        data: GanttData {
            tasks,
            categories: current.categories.clone(),
        },
        message,
    }
}

/// Pick the interpreter for the configured backend.
///
/// `rules` always resolves to the built-in grammar. Model backends need
/// a caller-registered collaborator (the core ships no transport), and
/// the custom backend additionally needs its endpoint filled in.
pub fn select_interpreter(
    config: &Config,
    collaborator: Option<Arc<dyn Interpreter>>,
) -> Result<Arc<dyn Interpreter>> {
    match config.chat.backend {
        ChatBackend::Rules => Ok(Arc::new(RuleInterpreter)),
        backend => {
            if backend == ChatBackend::Custom && !config.endpoint.is_configured() {
                return Err(Error::InvalidConfig(
                    "custom chat backend requires endpoint.url and endpoint.model".into(),
                ));
            }
            collaborator.ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "chat backend '{backend}' requires an external collaborator"
                ))
            })
        }
    }
}
