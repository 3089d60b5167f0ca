#[cfg(test)]
#[path = "workout_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::GenerationClient;
use crate::domain::models::PromptMessage;
use crate::domain::models::WorkoutPlan;
use crate::domain::models::WorkoutRequest;

pub const TRAINER_INSTRUCTION: &str =
    "You are a professional fitness trainer creating personalized workout plans.";

pub struct WorkoutView {}

impl WorkoutView {
    /// Returns the plan alongside the generation error, if any. On error the
    /// plan holds the fallback response.
    pub async fn generate(
        request: &WorkoutRequest,
        client: &GenerationClient,
    ) -> (WorkoutPlan, Option<String>) {
        tracing::debug!(
            goal = %request.goal,
            level = %request.level,
            duration = request.duration_minutes,
            "generating workout plan"
        );

        let completion = client
            .generate(&[
                PromptMessage::system(TRAINER_INSTRUCTION),
                PromptMessage::user(&request.prompt()),
            ])
            .await;

        return (WorkoutPlan::new(&completion.text), completion.error);
    }

    /// Writes the plan verbatim as `workout_plan.txt` inside `dir`, creating
    /// the directory when missing.
    pub async fn export(plan: &WorkoutPlan, dir: &path::Path) -> Result<path::PathBuf> {
        if !dir.exists() {
            fs::create_dir_all(dir).await?;
        }

        let file_path = dir.join(plan.file_name());
        let mut file = fs::File::create(&file_path).await?;
        file.write_all(plan.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(path = ?file_path, "exported workout plan");
        return Ok(file_path);
    }
}
