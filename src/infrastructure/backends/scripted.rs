use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;
use crate::domain::models::BackendResponse;

pub const DEFAULT_REPLY: &str = "Stay consistent and hydrated.";

pub enum Reply {
    Fragments(Vec<&'static str>),
    Failure(&'static str),
}

/// Backend replaying canned replies in order, recording every prompt it
/// receives. Falls back to `DEFAULT_REPLY` once the script runs out.
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Reply>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedBackend {
    pub fn new(replies: Vec<Reply>) -> (ScriptedBackend, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(vec![]));
        let backend = ScriptedBackend {
            replies: Mutex::new(replies.into_iter().collect()),
            prompts: prompts.clone(),
        };

        return (backend, prompts);
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn health_check(&self) -> Result<()> {
        return Ok(());
    }

    async fn get_completion<'a>(
        &self,
        prompt: BackendPrompt,
        tx: &'a mpsc::UnboundedSender<BackendResponse>,
    ) -> Result<()> {
        self.prompts.lock().unwrap().push(prompt.text);

        let reply = self.replies.lock().unwrap().pop_front();
        let fragments = match reply {
            Some(Reply::Fragments(fragments)) => fragments,
            Some(Reply::Failure(reason)) => bail!(reason),
            None => vec![DEFAULT_REPLY],
        };

        for fragment in fragments {
            tx.send(BackendResponse {
                text: fragment.to_string(),
                done: false,
            })?;
        }
        tx.send(BackendResponse {
            text: "".to_string(),
            done: true,
        })?;

        return Ok(());
    }
}
