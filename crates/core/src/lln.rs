//! Lower limit of normal (LLN) estimator.

use crate::constants::{
    LLN_AGE_COEFFICIENT, LLN_FACTOR_AFRICAN_AMERICAN, LLN_FACTOR_ASIAN, LLN_FACTOR_CAUCASIAN,
    LLN_FACTOR_DEFAULT, LLN_HEIGHT_COEFFICIENT,
};
use pft_types::{Ethnicity, Gender};

/// Ethnicity multiplier applied to the LLN formula.
pub fn adjustment_factor(ethnicity: Ethnicity) -> f64 {
    match ethnicity {
        Ethnicity::Caucasian => LLN_FACTOR_CAUCASIAN,
        Ethnicity::AfricanAmerican => LLN_FACTOR_AFRICAN_AMERICAN,
        Ethnicity::Asian => LLN_FACTOR_ASIAN,
        Ethnicity::Other => LLN_FACTOR_DEFAULT,
    }
}

/// Computes the lower limit of normal for `parameter`.
///
/// `factor * (parameter - age * 0.02 + height * 0.05)`, clamped at zero. Gender is accepted
/// for signature parity with the other estimators but does not enter the formula.
pub fn calculate_lln(
    parameter: f64,
    age: f64,
    _gender: Gender,
    height_cm: f64,
    ethnicity: Ethnicity,
) -> f64 {
    let value = adjustment_factor(ethnicity)
        * (parameter - age * LLN_AGE_COEFFICIENT + height_cm * LLN_HEIGHT_COEFFICIENT);
    value.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn caucasian_uses_unit_factor() {
        let lln = calculate_lln(1.0, 50.0, Gender::Male, 170.0, Ethnicity::Caucasian);
        assert!(approx(lln, 1.0 - 1.0 + 8.5));
    }

    #[test]
    fn ethnicity_factors_scale_the_result() {
        let base = calculate_lln(2.0, 30.0, Gender::Female, 160.0, Ethnicity::Caucasian);
        let african_american =
            calculate_lln(2.0, 30.0, Gender::Female, 160.0, Ethnicity::AfricanAmerican);
        let asian = calculate_lln(2.0, 30.0, Gender::Female, 160.0, Ethnicity::Asian);

        assert!(approx(african_american, base * 0.88));
        assert!(approx(asian, base * 0.94));
    }

    #[test]
    fn other_ethnicity_matches_caucasian() {
        let caucasian = calculate_lln(1.5, 64.0, Gender::Other, 150.0, Ethnicity::Caucasian);
        let other = calculate_lln(1.5, 64.0, Gender::Other, 150.0, Ethnicity::Other);
        assert_eq!(caucasian, other);
        assert_eq!(adjustment_factor(Ethnicity::Other), 1.0);
    }

    #[test]
    fn gender_does_not_change_the_result() {
        let values: Vec<f64> = Gender::ALL
            .iter()
            .map(|g| calculate_lln(1.0, 40.0, *g, 175.0, Ethnicity::Asian))
            .collect();
        assert!(values.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn result_is_clamped_at_zero() {
        assert_eq!(calculate_lln(0.0, 120.0, Gender::Male, 0.0, Ethnicity::Caucasian), 0.0);
        assert_eq!(calculate_lln(-10.0, 0.0, Gender::Male, 0.0, Ethnicity::Asian), 0.0);
    }

    #[test]
    fn result_is_never_negative() {
        for ethnicity in Ethnicity::ALL {
            for age in [0.0, 18.0, 65.0, 120.0] {
                for height in [0.0, 100.0, 254.0] {
                    for parameter in [-5.0, 0.0, 1.0, 4.0] {
                        let lln = calculate_lln(parameter, age, Gender::Female, height, ethnicity);
                        assert!(lln >= 0.0, "negative LLN for {ethnicity} age={age} h={height}");
                    }
                }
            }
        }
    }
}
