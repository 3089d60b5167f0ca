#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use super::GenerationClient;
use super::SessionStore;
use crate::domain::models::ChatAction;
use crate::domain::models::Message;
use crate::domain::models::PromptMessage;
use crate::domain::models::Render;

pub const COACH_INSTRUCTION: &str = "You are a knowledgeable, friendly, and professional Fitness and Nutrition Coach. Your goal is to provide evidence-based, practical, and personalized advice on fitness, nutrition, and overall health. Focus on providing accurate, science-backed information while keeping responses concise and actionable.";

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /new (/n) - Starts a new chat session and switches to it.
- /sessions (/s) - Lists all chat sessions. The active session is marked with *.
- /switch (/sw) [SESSION_NUMBER] - Switches to a session from /sessions.
- /delete (/d) [SESSION_NUMBER] - Deletes a session. Deleting the last session starts a fresh one.
- /history (/hi) - Shows every message in the active session.
- /edit (/e) [MESSAGE_NUMBER] - Edits a previous question. The answer is regenerated when you save.
- /remove (/rm) [MESSAGE_NUMBER] - Removes a message from the active session.
- /quit /exit (/q) - Exit.
- /help (/h) - Provides this help menu.

Anything else is sent to your coach as a question.
        "#;

    return text.trim().to_string();
}

/// Chat feature state: the session store plus the edit cursor.
///
/// Every user interaction is a `ChatAction`; handling it mutates the store and
/// returns what should be rendered next.
pub struct ChatView {
    store: SessionStore,
    editing: Option<usize>,
}

impl Default for ChatView {
    fn default() -> ChatView {
        return ChatView::new(SessionStore::default());
    }
}

impl ChatView {
    pub fn new(store: SessionStore) -> ChatView {
        return ChatView {
            store,
            editing: None,
        };
    }

    pub fn store(&self) -> &SessionStore {
        return &self.store;
    }

    pub fn editing(&self) -> Option<usize> {
        return self.editing;
    }

    pub async fn handle(&mut self, action: ChatAction, client: &GenerationClient) -> Result<Render> {
        tracing::debug!(action = ?action, "chat action");

        match action {
            ChatAction::Submit(query) => return self.submit(&query, client).await,
            ChatAction::Edit(index) => return self.edit(index),
            ChatAction::Save(query) => return self.save(&query, client).await,
            ChatAction::DeleteMessage(index) => return self.delete_message(index),
            ChatAction::NewSession => {
                self.store.create_session();
                self.editing = None;
            }
            ChatAction::SwitchSession(index) => {
                self.store.switch_session(index)?;
                self.editing = None;
            }
            ChatAction::DeleteSession(index) => {
                let was_active = index == self.store.active_index();
                self.store.delete_session(index)?;
                if was_active {
                    self.editing = None;
                }
            }
        }

        return Ok(Render::History);
    }

    async fn ask(query: &str, client: &GenerationClient) -> (String, Option<String>) {
        let completion = client
            .generate(&[
                PromptMessage::system(COACH_INSTRUCTION),
                PromptMessage::user(query),
            ])
            .await;

        return (completion.text, completion.error);
    }

    async fn submit(&mut self, query: &str, client: &GenerationClient) -> Result<Render> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Render::Noop);
        }

        let (response, error) = ChatView::ask(query, client).await;
        let active = self.store.active_index();
        self.store.append_message(active, query, &response)?;

        return Ok(Render::Exchange {
            message: Message::new(query, &response),
            error,
        });
    }

    fn edit(&mut self, index: usize) -> Result<Render> {
        let message = match self.store.active().messages.get(index) {
            Some(message) => message,
            None => bail!(format!("There is no message {} to edit", index + 1)),
        };

        let render = Render::EditPrompt {
            index,
            query: message.query.to_string(),
        };
        self.editing = Some(index);

        return Ok(render);
    }

    async fn save(&mut self, query: &str, client: &GenerationClient) -> Result<Render> {
        let index = match self.editing {
            Some(index) => index,
            None => bail!("No message is being edited"),
        };
        let query = query.trim();
        if query.is_empty() {
            bail!("An edited question can't be empty");
        }

        let (response, error) = ChatView::ask(query, client).await;
        let active = self.store.active_index();
        self.store.edit_message(active, index, query, &response)?;
        self.editing = None;

        let message = self.store.active().messages[index].clone();
        return Ok(Render::Exchange { message, error });
    }

    fn delete_message(&mut self, index: usize) -> Result<Render> {
        let active = self.store.active_index();
        self.store.delete_message(active, index)?;

        self.editing = match self.editing {
            Some(editing) if editing == index => None,
            Some(editing) if editing > index => Some(editing - 1),
            other => other,
        };

        return Ok(Render::History);
    }
}
