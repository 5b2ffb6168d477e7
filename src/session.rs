//! Chat session boundary.
//!
//! Owns the transcript and the last-known-good task collection. Every
//! interpreter failure is caught exactly here and surfaced as a system
//! message; the collection is only replaced when a command fully
//! succeeds, so a failed attempt can never corrupt prior state.
//! Transcripts are transient: they live for the session and are never
//! persisted.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ulid::Ulid;
use tracing::debug;

use crate::collaborator::Interpreter;
use crate::task::GanttData;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    System,
}

/// One transcript entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub content: String,
    pub sender: Sender,
    /// Milliseconds since the epoch.
    pub timestamp: i64,
    /// Set on placeholder entries while a collaborator round-trip is
    /// in flight.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_processing: bool,
}

impl ChatMessage {
    fn new(content: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Ulid::new().to_string(),
            content: content.into(),
            sender,
            timestamp: Utc::now().timestamp_millis(),
            is_processing: false,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, Sender::User)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(content, Sender::System)
    }

    /// Placeholder system entry shown while a reply is pending.
    pub fn processing() -> Self {
        let mut msg = Self::new("...", Sender::System);
        msg.is_processing = true;
        msg
    }
}

/// A chat-driven editing session over one task collection.
pub struct ChatSession {
    data: GanttData,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(data: GanttData) -> Self {
        Self {
            data,
            messages: Vec::new(),
        }
    }

    /// The last-known-good task collection.
    pub fn data(&self) -> &GanttData {
        &self.data
    }

    /// Transcript so far, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Submit one command and return the system reply.
    ///
    /// The user message and the reply are both appended to the
    /// transcript. On success the collection is replaced with the
    /// interpreter's result in display order; on failure the collection
    /// is left untouched and the error text becomes the reply.
    pub async fn submit(
        &mut self,
        text: &str,
        interpreter: &dyn Interpreter,
    ) -> ChatMessage {
        self.messages.push(ChatMessage::user(text));

        let reply = match interpreter.interpret(text, &self.data).await {
            Ok(outcome) => {
                self.data = outcome.data.sorted();
                ChatMessage::system(outcome.message)
            }
            Err(err) => {
                debug!(error = %err, "command failed; keeping prior task state");
                ChatMessage::system(err.chat_message())
            }
        };

        self.messages.push(reply.clone());
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborator::RuleInterpreter;
    use crate::error::{Error, Result};
    use crate::interpreter::Interpretation;
    use crate::task::Task;

    struct BrokenBackend(&'static str);

    #[async_trait::async_trait]
    impl Interpreter for BrokenBackend {
        async fn interpret(&self, _text: &str, _data: &GanttData) -> Result<Interpretation> {
            Err(Error::Collaborator(self.0.to_string()))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[tokio::test]
    async fn failed_command_keeps_prior_state() {
        let data = GanttData {
            tasks: vec![Task::new("Research", 0, 1)],
            categories: Vec::new(),
        };
        let mut session = ChatSession::new(data.clone());

        let reply = session
            .submit("delete task \"Ghost\"", &RuleInterpreter)
            .await;

        assert_eq!(reply.sender, Sender::System);
        assert_eq!(reply.content, "Task \"Ghost\" not found");
        assert_eq!(session.data(), &data);
        // Transcript has the user message and the error reply.
        assert_eq!(session.messages().len(), 2);
        assert_eq!(session.messages()[0].sender, Sender::User);
    }

    #[tokio::test]
    async fn collaborator_failure_text_is_verbatim() {
        let mut session = ChatSession::new(GanttData::default());

        let reply = session
            .submit("add task \"Kickoff\"", &BrokenBackend("upstream timed out"))
            .await;

        assert_eq!(reply.sender, Sender::System);
        assert_eq!(reply.content, "upstream timed out");
    }

    #[tokio::test]
    async fn empty_collaborator_failure_gets_an_apology() {
        let mut session = ChatSession::new(GanttData::default());

        let reply = session
            .submit("add task \"Kickoff\"", &BrokenBackend("  "))
            .await;

        assert_eq!(reply.content, "Sorry, I couldn't process your request.");
    }

    #[tokio::test]
    async fn successful_command_replaces_state_in_display_order() {
        let mut session = ChatSession::new(GanttData::default());

        let reply = session
            .submit("add task \"Kickoff\" from day 1 to day 2", &RuleInterpreter)
            .await;

        assert!(reply.content.contains("Kickoff"));
        assert_eq!(session.data().tasks.len(), 1);

        let reply = session.submit("banana", &RuleInterpreter).await;
        assert!(reply.content.starts_with("I'm not sure"));
        assert_eq!(session.data().tasks.len(), 1);
    }
}
