#[cfg(test)]
#[path = "bmi_test.rs"]
mod tests;

use anyhow::Result;

use super::GenerationClient;
use crate::domain::models::Bmi;
use crate::domain::models::BmiCategory;
use crate::domain::models::PromptMessage;

pub const ADVICE_INSTRUCTION: &str =
    "You are a fitness expert providing brief, actionable advice.";

#[derive(Clone, Debug, PartialEq)]
pub struct BmiReport {
    pub bmi: Bmi,
    pub category: BmiCategory,
    pub recommendation: String,
    pub error: Option<String>,
}

pub struct BmiView {}

impl BmiView {
    pub async fn calculate(
        weight_kg: f64,
        height_cm: f64,
        client: &GenerationClient,
    ) -> Result<BmiReport> {
        let bmi = Bmi::new(weight_kg, height_cm)?;
        let category = bmi.category();
        tracing::debug!(bmi = bmi.value, category = %category, "calculated bmi");

        let completion = client
            .generate(&[
                PromptMessage::system(ADVICE_INSTRUCTION),
                PromptMessage::user(&bmi.recommendation_prompt()),
            ])
            .await;

        return Ok(BmiReport {
            bmi,
            category,
            recommendation: completion.text,
            error: completion.error,
        });
    }
}
