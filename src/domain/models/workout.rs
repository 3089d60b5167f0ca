#[cfg(test)]
#[path = "workout_test.rs"]
mod tests;

use std::ops::RangeInclusive;

use anyhow::bail;
use anyhow::Result;
use strum::EnumIter;
use strum::EnumString;
use strum::EnumVariantNames;

pub const DURATION_MINUTES_RANGE: RangeInclusive<u32> = 15..=120;
pub const DEFAULT_DURATION_MINUTES: u32 = 45;

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, EnumString, EnumVariantNames, strum::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum WorkoutGoal {
    WeightLoss,
    MuscleGain,
    GeneralFitness,
    Endurance,
}

impl WorkoutGoal {
    pub fn label(&self) -> &'static str {
        match self {
            WorkoutGoal::WeightLoss => return "Weight Loss",
            WorkoutGoal::MuscleGain => return "Muscle Gain",
            WorkoutGoal::GeneralFitness => return "General Fitness",
            WorkoutGoal::Endurance => return "Endurance",
        }
    }
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, EnumString, EnumVariantNames, strum::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ExperienceLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn label(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => return "Beginner",
            ExperienceLevel::Intermediate => return "Intermediate",
            ExperienceLevel::Advanced => return "Advanced",
        }
    }
}

#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, EnumString, EnumVariantNames, strum::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Equipment {
    None,
    Dumbbells,
    ResistanceBands,
    PullUpBar,
    FullGym,
}

impl Equipment {
    pub fn label(&self) -> &'static str {
        match self {
            Equipment::None => return "None",
            Equipment::Dumbbells => return "Dumbbells",
            Equipment::ResistanceBands => return "Resistance Bands",
            Equipment::PullUpBar => return "Pull-up Bar",
            Equipment::FullGym => return "Full Gym",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutRequest {
    pub goal: WorkoutGoal,
    pub level: ExperienceLevel,
    pub equipment: Vec<Equipment>,
    pub duration_minutes: u32,
}

impl WorkoutRequest {
    pub fn new(
        goal: WorkoutGoal,
        level: ExperienceLevel,
        equipment: Vec<Equipment>,
        duration_minutes: u32,
    ) -> Result<WorkoutRequest> {
        if !DURATION_MINUTES_RANGE.contains(&duration_minutes) {
            bail!(format!(
                "Workout duration must be between {} and {} minutes, got {duration_minutes}",
                DURATION_MINUTES_RANGE.start(),
                DURATION_MINUTES_RANGE.end()
            ));
        }

        let mut deduped: Vec<Equipment> = vec![];
        for item in equipment {
            if !deduped.contains(&item) {
                deduped.push(item);
            }
        }

        return Ok(WorkoutRequest {
            goal,
            level,
            equipment: deduped,
            duration_minutes,
        });
    }

    fn equipment_list(&self) -> String {
        if self.equipment.is_empty() {
            return Equipment::None.label().to_string();
        }

        return self
            .equipment
            .iter()
            .map(|item| return item.label())
            .collect::<Vec<&str>>()
            .join(", ");
    }

    pub fn prompt(&self) -> String {
        return [
            format!(
                "Create a {}-minute workout plan for a {} level person focusing on {}.",
                self.duration_minutes,
                self.level.label(),
                self.goal.label()
            ),
            format!("Available equipment: {}.", self.equipment_list()),
            "Include:".to_string(),
            "1. Warm-up".to_string(),
            "2. Main exercises with sets and reps".to_string(),
            "3. Cool-down".to_string(),
            "Format the response with clear sections and bullet points.".to_string(),
        ]
        .join("\n");
    }
}

/// A generated plan, downloadable as a plain text artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkoutPlan {
    pub text: String,
}

impl WorkoutPlan {
    pub const FILE_NAME: &'static str = "workout_plan.txt";
    pub const MIME_TYPE: &'static str = "text/plain";

    pub fn new(text: &str) -> WorkoutPlan {
        return WorkoutPlan {
            text: text.to_string(),
        };
    }

    pub fn file_name(&self) -> &'static str {
        return WorkoutPlan::FILE_NAME;
    }

    pub fn mime_type(&self) -> &'static str {
        return WorkoutPlan::MIME_TYPE;
    }

    pub fn as_bytes(&self) -> &[u8] {
        return self.text.as_bytes();
    }
}
