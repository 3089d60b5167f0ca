use super::Message;

/// A discrete user interaction with the chat view. Indices are zero based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatAction {
    Submit(String),
    Edit(usize),
    Save(String),
    DeleteMessage(usize),
    NewSession,
    SwitchSession(usize),
    DeleteSession(usize),
}

/// What the presentation layer should draw after an action was handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Render {
    Noop,
    Exchange {
        message: Message,
        error: Option<String>,
    },
    EditPrompt {
        index: usize,
        query: String,
    },
    History,
}
