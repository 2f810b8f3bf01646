mod error;
mod gemini;

pub use error::BreakdownError;
pub use gemini::GeminiClient;

use crate::domain::{Locale, TaskId};
use crate::store::{BreakdownOutcome, BreakdownRequest};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

/// Something that can turn a task title into a handful of subtask titles
#[async_trait]
pub trait BreakdownClient: Send + Sync {
    /// Return 3 to 5 short, actionable steps written in `locale`'s language
    async fn breakdown(&self, title: &str, locale: Locale) -> Result<Vec<String>, BreakdownError>;
}

/// Prompt sent to the model
pub fn build_prompt(title: &str, locale: Locale) -> String {
    format!(
        "Break down the following task into 3 to 5 smaller, actionable sub-tasks. \
         The output must be in {} language. Keep them concise. Task: \"{}\"",
        locale.language_name(),
        title
    )
}

/// Errors and empty answers end up the same way: no new subtasks
pub fn collapse(task_id: &str, result: Result<Vec<String>, BreakdownError>) -> BreakdownOutcome {
    match result {
        Ok(titles) => BreakdownOutcome::Produced(titles),
        Err(e) => {
            tracing::warn!(task_id = %task_id, error = %e, "breakdown failed");
            BreakdownOutcome::Failed
        }
    }
}

/// Message sent back to the event loop when a request settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownFinished {
    pub task_id: TaskId,
    pub outcome: BreakdownOutcome,
}

pub type BreakdownSender = mpsc::UnboundedSender<BreakdownFinished>;
pub type BreakdownReceiver = mpsc::UnboundedReceiver<BreakdownFinished>;

/// Runs breakdown requests on a tokio runtime and reports each one back over
/// a channel that the event loop drains. The store decides whether a request
/// may start; see `TaskStore::begin_breakdown`.
pub struct BreakdownDispatcher {
    client: Arc<dyn BreakdownClient>,
    runtime: Handle,
    sender: BreakdownSender,
}

impl BreakdownDispatcher {
    pub fn new(client: Arc<dyn BreakdownClient>, runtime: Handle) -> (Self, BreakdownReceiver) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (
            Self {
                client,
                runtime,
                sender,
            },
            receiver,
        )
    }

    /// Start a request. Requests for different tasks run independently.
    ///
    /// Exactly one `BreakdownFinished` is sent per request, even if the
    /// client panics.
    pub fn dispatch(&self, request: BreakdownRequest) {
        let client = Arc::clone(&self.client);
        let sender = self.sender.clone();
        let BreakdownRequest {
            task_id,
            title,
            locale,
        } = request;

        tracing::info!(task_id = %task_id, locale = locale.code(), "breakdown requested");
        let call = self
            .runtime
            .spawn(async move { client.breakdown(&title, locale).await });
        self.runtime.spawn(async move {
            let outcome = match call.await {
                Ok(result) => collapse(&task_id, result),
                Err(e) => {
                    tracing::error!(task_id = %task_id, error = %e, "breakdown task aborted");
                    BreakdownOutcome::Failed
                }
            };
            // Receiver is gone only when the app is shutting down
            let _ = sender.send(BreakdownFinished { task_id, outcome });
        });
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    /// Fake collaborator that counts calls and can be held open
    pub struct FakeClient {
        pub calls: AtomicUsize,
        pub reply: Result<Vec<String>, String>,
        pub gate: Option<Arc<Notify>>,
    }

    impl FakeClient {
        pub fn replying(titles: &[&str]) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Ok(titles.iter().map(|t| t.to_string()).collect()),
                gate: None,
            }
        }

        pub fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Err("boom".to_string()),
                gate: None,
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl BreakdownClient for FakeClient {
        async fn breakdown(&self, _title: &str, _locale: Locale) -> Result<Vec<String>, BreakdownError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            self.reply
                .clone()
                .map_err(BreakdownError::Parse)
        }
    }
}
