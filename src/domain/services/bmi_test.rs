use anyhow::Result;

use super::BmiView;
use super::ADVICE_INSTRUCTION;
use crate::domain::models::BmiCategory;
use crate::domain::services::GenerationClient;
use crate::domain::services::FALLBACK_RESPONSE;
use crate::infrastructure::backends::scripted::Reply;
use crate::infrastructure::backends::scripted::ScriptedBackend;

#[tokio::test]
async fn it_reports_bmi_with_recommendation() -> Result<()> {
    let (backend, prompts) = ScriptedBackend::new(vec![Reply::Fragments(vec![
        "Add vegetables. ",
        "Walk 30 minutes.",
    ])]);
    let client = GenerationClient::new(Box::new(backend));

    let report = BmiView::calculate(70.0, 170.0, &client).await?;
    assert_eq!(report.bmi.rounded(), "24.2");
    assert_eq!(report.category, BmiCategory::Normal);
    assert_eq!(report.category.label(), "Normal weight");
    assert_eq!(report.recommendation, "Add vegetables. Walk 30 minutes.");
    assert_eq!(report.error, None);

    let prompts = prompts.lock().unwrap();
    assert_eq!(
        prompts[0],
        format!(
            "system: {ADVICE_INSTRUCTION}\nuser: {}",
            report.bmi.recommendation_prompt()
        )
    );
    assert!(prompts[0].contains("Given a BMI of 24.2,"));

    return Ok(());
}

#[tokio::test]
async fn it_rejects_invalid_measurements_without_generating() {
    let (backend, prompts) = ScriptedBackend::new(vec![]);
    let client = GenerationClient::new(Box::new(backend));

    let res = BmiView::calculate(10.0, 170.0, &client).await;
    assert!(res.is_err());
    assert!(prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn it_keeps_classification_when_generation_fails() -> Result<()> {
    let (backend, _prompts) = ScriptedBackend::new(vec![Reply::Failure("blocked")]);
    let client = GenerationClient::new(Box::new(backend));

    let report = BmiView::calculate(100.0, 170.0, &client).await?;
    assert_eq!(report.category, BmiCategory::Obese);
    assert_eq!(report.recommendation, FALLBACK_RESPONSE);
    assert_eq!(report.error, Some("blocked".to_string()));

    return Ok(());
}
