#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// One query and response pair within a chat session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub query: String,
    pub response: String,
    /// Response that was replaced by the most recent edit.
    pub original_response: Option<String>,
}

impl Message {
    pub fn new(query: &str, response: &str) -> Message {
        return Message {
            query: query.to_string(),
            response: response.to_string(),
            original_response: None,
        };
    }

    /// Replaces the query and response in place, archiving only the response
    /// that was current before this edit.
    pub fn edit(&mut self, query: &str, response: &str) {
        let previous = std::mem::replace(&mut self.response, response.to_string());
        self.query = query.to_string();
        self.original_response = Some(previous);
    }

    pub fn is_edited(&self) -> bool {
        return self.original_response.is_some();
    }
}
