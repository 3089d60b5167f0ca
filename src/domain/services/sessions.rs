#[cfg(test)]
#[path = "sessions_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::Message;
use crate::domain::models::Session;

/// In-memory collection of chat sessions for the lifetime of the process.
///
/// The collection is never empty and the active index always points at an
/// existing session.
pub struct SessionStore {
    sessions: Vec<Session>,
    active: usize,
}

impl Default for SessionStore {
    fn default() -> SessionStore {
        return SessionStore {
            sessions: vec![Session::default()],
            active: 0,
        };
    }
}

impl SessionStore {
    pub fn len(&self) -> usize {
        return self.sessions.len();
    }

    pub fn sessions(&self) -> &[Session] {
        return &self.sessions;
    }

    pub fn get(&self, index: usize) -> Option<&Session> {
        return self.sessions.get(index);
    }

    pub fn active_index(&self) -> usize {
        return self.active;
    }

    pub fn active(&self) -> &Session {
        return &self.sessions[self.active];
    }

    fn session_mut(&mut self, index: usize) -> Result<&mut Session> {
        let count = self.sessions.len();
        match self.sessions.get_mut(index) {
            Some(session) => return Ok(session),
            None => bail!(format!(
                "Session {} does not exist, there are {count} sessions",
                index + 1
            )),
        }
    }

    fn check_message(session: &Session, message_index: usize) -> Result<()> {
        if message_index >= session.messages.len() {
            bail!(format!(
                "Message {} does not exist, the session has {} messages",
                message_index + 1,
                session.messages.len()
            ));
        }

        return Ok(());
    }

    /// Appends an empty session, makes it active, and returns its index.
    pub fn create_session(&mut self) -> usize {
        self.sessions.push(Session::default());
        self.active = self.sessions.len() - 1;
        tracing::debug!(index = self.active, "created session");

        return self.active;
    }

    pub fn switch_session(&mut self, index: usize) -> Result<()> {
        self.session_mut(index)?;
        self.active = index;

        return Ok(());
    }

    /// Removes a session. Deleting the active session selects the previous
    /// one, and deleting the only session replaces it with an empty one.
    pub fn delete_session(&mut self, index: usize) -> Result<()> {
        self.session_mut(index)?;
        self.sessions.remove(index);

        if self.sessions.is_empty() {
            self.sessions.push(Session::default());
            self.active = 0;
        } else if index < self.active || (index == self.active && index > 0) {
            self.active -= 1;
        }

        tracing::debug!(index, active = self.active, "deleted session");
        return Ok(());
    }

    pub fn append_message(&mut self, session_index: usize, query: &str, response: &str) -> Result<()> {
        let session = self.session_mut(session_index)?;
        session.push(Message::new(query, response));

        return Ok(());
    }

    pub fn edit_message(
        &mut self,
        session_index: usize,
        message_index: usize,
        new_query: &str,
        new_response: &str,
    ) -> Result<()> {
        let session = self.session_mut(session_index)?;
        SessionStore::check_message(session, message_index)?;
        session.messages[message_index].edit(new_query, new_response);

        return Ok(());
    }

    pub fn delete_message(&mut self, session_index: usize, message_index: usize) -> Result<()> {
        let session = self.session_mut(session_index)?;
        SessionStore::check_message(session, message_index)?;
        session.messages.remove(message_index);

        return Ok(());
    }
}
