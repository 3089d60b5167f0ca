use anyhow::Result;
use test_utils::scratch_dir;
use test_utils::workout_plan_fixture;
use tokio::fs;

use super::WorkoutView;
use super::TRAINER_INSTRUCTION;
use crate::domain::models::Equipment;
use crate::domain::models::ExperienceLevel;
use crate::domain::models::WorkoutGoal;
use crate::domain::models::WorkoutPlan;
use crate::domain::models::WorkoutRequest;
use crate::domain::services::GenerationClient;
use crate::domain::services::FALLBACK_RESPONSE;
use crate::infrastructure::backends::scripted::Reply;
use crate::infrastructure::backends::scripted::ScriptedBackend;

fn request() -> WorkoutRequest {
    return WorkoutRequest::new(
        WorkoutGoal::WeightLoss,
        ExperienceLevel::Beginner,
        vec![Equipment::ResistanceBands],
        30,
    )
    .unwrap();
}

#[tokio::test]
async fn it_generates_plan_from_request() {
    let (backend, prompts) = ScriptedBackend::new(vec![Reply::Fragments(vec![
        "## Warm-up\n",
        "- March in place",
    ])]);
    let client = GenerationClient::new(Box::new(backend));

    let (plan, error) = WorkoutView::generate(&request(), &client).await;
    assert_eq!(plan.text, "## Warm-up\n- March in place");
    assert_eq!(error, None);

    let prompts = prompts.lock().unwrap();
    assert_eq!(
        prompts[0],
        format!("system: {TRAINER_INSTRUCTION}\nuser: {}", request().prompt())
    );
}

#[tokio::test]
async fn it_returns_fallback_plan_on_failure() {
    let (backend, _prompts) = ScriptedBackend::new(vec![Reply::Failure("timeout")]);
    let client = GenerationClient::new(Box::new(backend));

    let (plan, error) = WorkoutView::generate(&request(), &client).await;
    assert_eq!(plan.text, FALLBACK_RESPONSE);
    assert_eq!(error, Some("timeout".to_string()));
}

#[tokio::test]
async fn it_exports_plan_verbatim() -> Result<()> {
    let dir = scratch_dir("workout-export");
    let plan = WorkoutPlan::new(workout_plan_fixture());

    let file_path = WorkoutView::export(&plan, &dir).await?;
    assert_eq!(file_path, dir.join("workout_plan.txt"));

    let contents = fs::read_to_string(&file_path).await?;
    assert_eq!(contents, workout_plan_fixture());

    fs::remove_dir_all(&dir).await?;
    return Ok(());
}
