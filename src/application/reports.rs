#[cfg(test)]
#[path = "reports_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use yansi::Paint;

use crate::domain::models::BmiCategory;
use crate::domain::models::WorkoutPlan;
use crate::domain::models::WorkoutRequest;
use crate::domain::services::BmiReport;
use crate::domain::services::BmiView;
use crate::domain::services::GenerationClient;
use crate::domain::services::WorkoutView;

fn paint_category(category: BmiCategory) -> Paint<&'static str> {
    match category {
        BmiCategory::Normal => return Paint::green(category.label()),
        BmiCategory::Underweight | BmiCategory::Overweight => {
            return Paint::yellow(category.label())
        }
        BmiCategory::Obese => return Paint::red(category.label()),
    }
}

pub fn format_bmi_report(report: &BmiReport) -> String {
    let mut lines = vec![
        format!("Your BMI: {}", Paint::new(report.bmi.rounded()).bold()),
        format!("Category: {}", paint_category(report.category)),
        "".to_string(),
        Paint::new("Personalized recommendations").underline().to_string(),
        report.recommendation.to_string(),
    ];
    if let Some(error) = &report.error {
        lines.push(Paint::red(format!("Error: {error}")).to_string());
    }

    return lines.join("\n");
}

pub fn format_workout_plan(request: &WorkoutRequest, plan: &WorkoutPlan) -> String {
    let title = format!(
        "{} minute {} plan ({})",
        request.duration_minutes,
        request.goal.label(),
        request.level.label()
    );

    return format!("{}\n\n{}", Paint::new(title).underline().bold(), plan.text);
}

pub async fn run_bmi(weight_kg: f64, height_cm: f64, client: &GenerationClient) -> Result<()> {
    let report = BmiView::calculate(weight_kg, height_cm, client).await?;
    println!("{}", format_bmi_report(&report));

    return Ok(());
}

/// Prints the plan, and saves it under `output` only when generation
/// succeeded.
pub async fn run_workout(
    request: &WorkoutRequest,
    output: Option<&path::Path>,
    client: &GenerationClient,
) -> Result<()> {
    let (plan, error) = WorkoutView::generate(request, client).await;
    println!("{}", format_workout_plan(request, &plan));

    if let Some(error) = error {
        eprintln!("{}", Paint::red(format!("Error: {error}")));
        return Ok(());
    }

    if let Some(dir) = output {
        let file_path = WorkoutView::export(&plan, dir).await?;
        println!(
            "\nSaved plan to {} ({})",
            file_path.to_string_lossy(),
            plan.mime_type()
        );
    }

    return Ok(());
}
