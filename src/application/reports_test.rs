use anyhow::Result;
use test_utils::scratch_dir;
use tokio::fs;

use super::format_bmi_report;
use super::format_workout_plan;
use super::run_workout;
use crate::domain::models::Bmi;
use crate::domain::models::BmiCategory;
use crate::domain::models::Equipment;
use crate::domain::models::ExperienceLevel;
use crate::domain::models::WorkoutGoal;
use crate::domain::models::WorkoutPlan;
use crate::domain::models::WorkoutRequest;
use crate::domain::services::BmiReport;
use crate::domain::services::GenerationClient;
use crate::infrastructure::backends::scripted::Reply;
use crate::infrastructure::backends::scripted::ScriptedBackend;

fn request() -> WorkoutRequest {
    return WorkoutRequest::new(
        WorkoutGoal::Endurance,
        ExperienceLevel::Intermediate,
        vec![Equipment::None],
        30,
    )
    .unwrap();
}

#[test]
fn it_formats_a_bmi_report() -> Result<()> {
    let bmi = Bmi::new(70.0, 175.0)?;
    let report = BmiReport {
        bmi,
        category: bmi.category(),
        recommendation: "Keep up your current routine.".to_string(),
        error: None,
    };

    let res = format_bmi_report(&report);
    assert_eq!(report.category, BmiCategory::Normal);
    assert!(res.contains("22.9"));
    assert!(res.contains("Normal weight"));
    assert!(res.contains("Keep up your current routine."));
    assert!(!res.contains("Error:"));
    return Ok(());
}

#[test]
fn it_formats_a_bmi_report_with_an_error() -> Result<()> {
    let bmi = Bmi::new(110.0, 170.0)?;
    let report = BmiReport {
        bmi,
        category: bmi.category(),
        recommendation: "I encountered an error. Please try again.".to_string(),
        error: Some("quota exceeded".to_string()),
    };

    let res = format_bmi_report(&report);
    assert!(res.contains("Obese"));
    assert!(res.contains("Error: quota exceeded"));
    return Ok(());
}

#[test]
fn it_titles_a_workout_plan() {
    let res = format_workout_plan(&request(), &WorkoutPlan::new("- Easy run"));
    assert!(res.contains("30 minute Endurance plan (Intermediate)"));
    assert!(res.ends_with("\n\n- Easy run"));
}

#[tokio::test]
async fn it_saves_the_plan_when_generation_succeeds() -> Result<()> {
    let dir = scratch_dir("reports-success");
    let (backend, _prompts) = ScriptedBackend::new(vec![Reply::Fragments(vec!["- Easy run"])]);
    let client = GenerationClient::new(Box::new(backend));

    run_workout(&request(), Some(dir.as_path()), &client).await?;

    let saved = fs::read_to_string(dir.join("workout_plan.txt")).await?;
    assert_eq!(saved, "- Easy run");

    fs::remove_dir_all(&dir).await?;
    return Ok(());
}

#[tokio::test]
async fn it_skips_saving_when_generation_fails() -> Result<()> {
    let dir = scratch_dir("reports-failure");
    let (backend, _prompts) = ScriptedBackend::new(vec![Reply::Failure("timeout")]);
    let client = GenerationClient::new(Box::new(backend));

    run_workout(&request(), Some(dir.as_path()), &client).await?;

    assert!(!dir.join("workout_plan.txt").exists());
    return Ok(());
}
