//! A fake model-backed collaborator exercised through the same chat
//! boundary as the built-in rule interpreter.

use async_trait::async_trait;
use plotline::collaborator::{normalize_reply, CollaboratorReply, Interpreter};
use plotline::error::{Error, Result};
use plotline::interpreter::Interpretation;
use plotline::session::ChatSession;
use plotline::task::{GanttData, Task};

/// Replays a canned JSON reply, the way a remote endpoint would.
struct CannedCollaborator {
    body: String,
}

#[async_trait]
impl Interpreter for CannedCollaborator {
    async fn interpret(&self, _text: &str, data: &GanttData) -> Result<Interpretation> {
        let reply = CollaboratorReply::from_json(&self.body)?;
        Ok(normalize_reply(data, reply))
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

/// Always fails, the way a timed-out endpoint would.
struct FailingCollaborator;

#[async_trait]
impl Interpreter for FailingCollaborator {
    async fn interpret(&self, _text: &str, _data: &GanttData) -> Result<Interpretation> {
        Err(Error::Collaborator("upstream timed out".into()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

#[tokio::test]
async fn collaborator_reply_is_normalized_before_acceptance() {
    let body = r#"{
        "tasks": [
            {"id": "t1", "name": "Research", "start": 0, "end": 86400000, "progress": 250}
        ],
        "message": "Bumped research progress"
    }"#;
    let collaborator = CannedCollaborator { body: body.into() };
    let mut session = ChatSession::new(GanttData::default());

    let reply = session.submit("set research to done", &collaborator).await;

    assert_eq!(reply.content, "Bumped research progress");
    let task = &session.data().tasks[0];
    assert_eq!(task.progress, 100);
    assert!(task.dependencies.is_empty());
    assert!(task.color.is_some());
}

#[tokio::test]
async fn collaborator_failure_surfaces_without_corrupting_state() {
    let data = GanttData {
        tasks: vec![Task::new("Research", 0, 1)],
        categories: Vec::new(),
    };
    let mut session = ChatSession::new(data.clone());

    let reply = session.submit("anything", &FailingCollaborator).await;

    assert_eq!(reply.content, "upstream timed out");
    assert_eq!(session.data(), &data);
}

#[tokio::test]
async fn malformed_collaborator_body_is_a_chat_visible_error() {
    let collaborator = CannedCollaborator {
        body: "{\"message\": \"no tasks key\"}".into(),
    };
    let mut session = ChatSession::new(GanttData::default());

    let reply = session.submit("anything", &collaborator).await;

    assert!(reply.content.contains("Invalid response format"));
    assert!(session.data().tasks.is_empty());
}
