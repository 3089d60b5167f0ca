use anyhow::Result;

use super::Bmi;
use super::BmiCategory;

#[test]
fn it_computes_bmi_from_kg_and_cm() -> Result<()> {
    let bmi = Bmi::new(70.0, 170.0)?;
    assert!((bmi.value - 24.221_453).abs() < 1e-5);
    assert_eq!(bmi.rounded(), "24.2");
    assert_eq!(bmi.category(), BmiCategory::Normal);
    assert_eq!(bmi.category().to_string(), "Normal weight");

    return Ok(());
}

#[test]
fn it_matches_formula_across_bounds() -> Result<()> {
    for weight in [20.0, 55.5, 70.0, 120.0, 300.0] {
        for height in [100.0, 150.0, 182.5, 250.0] {
            let bmi = Bmi::new(weight, height)?;
            let expected = weight / ((height / 100.0) * (height / 100.0));
            assert_eq!(bmi.value, expected);
            assert_eq!(bmi.category(), BmiCategory::from_value(expected));
        }
    }

    return Ok(());
}

#[test]
fn it_classifies_band_boundaries() {
    assert_eq!(BmiCategory::from_value(18.499), BmiCategory::Underweight);
    assert_eq!(BmiCategory::from_value(18.5), BmiCategory::Normal);
    assert_eq!(BmiCategory::from_value(24.999), BmiCategory::Normal);
    assert_eq!(BmiCategory::from_value(25.0), BmiCategory::Overweight);
    assert_eq!(BmiCategory::from_value(29.999), BmiCategory::Overweight);
    assert_eq!(BmiCategory::from_value(30.0), BmiCategory::Obese);
}

#[test]
fn it_labels_categories() {
    assert_eq!(BmiCategory::Underweight.label(), "Underweight");
    assert_eq!(BmiCategory::Normal.label(), "Normal weight");
    assert_eq!(BmiCategory::Overweight.label(), "Overweight");
    assert_eq!(BmiCategory::Obese.label(), "Obese");
}

#[test]
fn it_rejects_out_of_range_input() {
    assert!(Bmi::new(19.9, 170.0).is_err());
    assert!(Bmi::new(300.1, 170.0).is_err());
    assert!(Bmi::new(70.0, 99.0).is_err());
    assert!(Bmi::new(70.0, 251.0).is_err());
    assert!(Bmi::new(f64::NAN, 170.0).is_err());
}

#[test]
fn it_embeds_rounded_bmi_in_prompt() -> Result<()> {
    let bmi = Bmi::new(70.0, 170.0)?;

    insta::assert_snapshot!(bmi.recommendation_prompt(), @"Given a BMI of 24.2, provide a short, personalized recommendation for improving health. Include one nutrition tip and one exercise tip. Keep it within 3 sentences.");

    return Ok(());
}
