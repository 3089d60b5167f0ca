#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Message;

const TITLE_MAX_CHARS: usize = 40;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// First query submitted to the session. Set once.
    pub title_hint: Option<String>,
    pub messages: Vec<Message>,
}

impl Session {
    pub fn push(&mut self, message: Message) {
        if self.title_hint.is_none() {
            self.title_hint = Some(message.query.to_string());
        }
        self.messages.push(message);
    }

    /// Label shown in session listings. `position` is the session's index in
    /// the store and is used when nothing has been asked yet.
    pub fn title(&self, position: usize) -> String {
        let hint = match &self.title_hint {
            Some(hint) => hint,
            None => return format!("Chat {}", position + 1),
        };

        if hint.chars().count() > TITLE_MAX_CHARS {
            let truncated = hint.chars().take(TITLE_MAX_CHARS).collect::<String>();
            return format!("{truncated}...");
        }

        return hint.to_string();
    }
}
