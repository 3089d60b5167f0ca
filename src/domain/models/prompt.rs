#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Model,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn new(role: Role, content: &str) -> PromptMessage {
        return PromptMessage {
            role,
            content: content.to_string(),
        };
    }

    pub fn system(content: &str) -> PromptMessage {
        return PromptMessage::new(Role::System, content);
    }

    pub fn user(content: &str) -> PromptMessage {
        return PromptMessage::new(Role::User, content);
    }
}

/// Serializes role tagged messages into the single prompt string sent to a
/// backend, one `role: content` entry per line.
pub fn format_prompt(messages: &[PromptMessage]) -> String {
    return messages
        .iter()
        .map(|message| {
            return format!("{}: {}", message.role, message.content);
        })
        .collect::<Vec<String>>()
        .join("\n");
}
