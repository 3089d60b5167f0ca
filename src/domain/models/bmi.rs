#[cfg(test)]
#[path = "bmi_test.rs"]
mod tests;

use std::ops::RangeInclusive;

use anyhow::bail;
use anyhow::Result;

pub const WEIGHT_KG_RANGE: RangeInclusive<f64> = 20.0..=300.0;
pub const HEIGHT_CM_RANGE: RangeInclusive<f64> = 100.0..=250.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Bands are inclusive on the lower bound and exclusive on the upper.
    pub fn from_value(bmi: f64) -> BmiCategory {
        if bmi < 18.5 {
            return BmiCategory::Underweight;
        }
        if bmi < 25.0 {
            return BmiCategory::Normal;
        }
        if bmi < 30.0 {
            return BmiCategory::Overweight;
        }

        return BmiCategory::Obese;
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => return "Underweight",
            BmiCategory::Normal => return "Normal weight",
            BmiCategory::Overweight => return "Overweight",
            BmiCategory::Obese => return "Obese",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        return write!(f, "{}", self.label());
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bmi {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub value: f64,
}

impl Bmi {
    pub fn new(weight_kg: f64, height_cm: f64) -> Result<Bmi> {
        if !WEIGHT_KG_RANGE.contains(&weight_kg) {
            bail!(format!(
                "Weight must be between {} and {} kg, got {weight_kg}",
                WEIGHT_KG_RANGE.start(),
                WEIGHT_KG_RANGE.end()
            ));
        }
        if !HEIGHT_CM_RANGE.contains(&height_cm) {
            bail!(format!(
                "Height must be between {} and {} cm, got {height_cm}",
                HEIGHT_CM_RANGE.start(),
                HEIGHT_CM_RANGE.end()
            ));
        }

        let height_m = height_cm / 100.0;
        return Ok(Bmi {
            weight_kg,
            height_cm,
            value: weight_kg / (height_m * height_m),
        });
    }

    pub fn category(&self) -> BmiCategory {
        return BmiCategory::from_value(self.value);
    }

    /// BMI rounded to one decimal, as shown to the user and embedded in prompts.
    pub fn rounded(&self) -> String {
        return format!("{:.1}", self.value);
    }

    pub fn recommendation_prompt(&self) -> String {
        return format!(
            "Given a BMI of {}, provide a short, personalized recommendation for improving health. Include one nutrition tip and one exercise tip. Keep it within 3 sentences.",
            self.rounded()
        );
    }
}
