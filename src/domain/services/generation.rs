#[cfg(test)]
#[path = "generation_test.rs"]
mod tests;

use tokio::sync::mpsc;

use crate::domain::models::format_prompt;
use crate::domain::models::BackendBox;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;
use crate::domain::models::PromptMessage;

pub const FALLBACK_RESPONSE: &str = "I encountered an error. Please try again.";

/// Fully assembled response text. When the backend failed, `text` holds the
/// fallback response and `error` the reason to show the user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub error: Option<String>,
}

impl Completion {
    fn failed(err: &anyhow::Error) -> Completion {
        return Completion {
            text: FALLBACK_RESPONSE.to_string(),
            error: Some(format!("{err}")),
        };
    }

    pub fn is_error(&self) -> bool {
        return self.error.is_some();
    }
}

pub struct GenerationClient {
    backend: BackendBox,
}

impl GenerationClient {
    pub fn new(backend: BackendBox) -> GenerationClient {
        return GenerationClient { backend };
    }

    /// Formats the messages into one prompt, waits for the backend stream to
    /// finish, and returns the concatenated fragments. Errors are never
    /// propagated to the caller.
    pub async fn generate(&self, messages: &[PromptMessage]) -> Completion {
        let prompt = BackendPrompt::new(format_prompt(messages));
        let (tx, mut rx) = mpsc::unbounded_channel::<BackendResponse>();

        let res = self.backend.get_completion(prompt, &tx).await;
        drop(tx);

        if let Err(err) = res {
            tracing::error!(error = ?err, "Generation request failed");
            return Completion::failed(&err);
        }

        let mut text = "".to_string();
        while let Some(fragment) = rx.recv().await {
            text += &fragment.text;
            if fragment.done {
                break;
            }
        }

        tracing::debug!(chars = text.len(), "Generation request completed");
        return Completion { text, error: None };
    }
}
