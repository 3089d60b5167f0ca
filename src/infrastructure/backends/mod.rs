pub mod gemini;
#[cfg(test)]
pub mod scripted;

use anyhow::Result;

use crate::domain::models::BackendBox;

pub struct BackendManager {}

impl BackendManager {
    /// Returns the configured backend once it has passed its health check.
    pub async fn get() -> Result<BackendBox> {
        let backend: BackendBox = Box::<gemini::Gemini>::default();
        backend.health_check().await?;

        return Ok(backend);
    }
}
