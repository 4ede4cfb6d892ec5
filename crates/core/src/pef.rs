//! Predicted peak expiratory flow (PEF).

use crate::constants::{
    PEF_FEMALE_AGE_COEFFICIENT, PEF_FEMALE_HEIGHT_COEFFICIENT, PEF_FEMALE_INTERCEPT,
    PEF_MALE_AGE_COEFFICIENT, PEF_MALE_HEIGHT_COEFFICIENT, PEF_MALE_INTERCEPT,
};
use pft_types::Gender;

/// Predicted PEF in L/min, or `None` when no equation exists for `gender`.
///
/// The result is not clamped.
pub fn calculate_pef(age: f64, gender: Gender, height_cm: f64) -> Option<f64> {
    match gender {
        Gender::Male => Some(
            PEF_MALE_INTERCEPT + PEF_MALE_HEIGHT_COEFFICIENT * height_cm
                - PEF_MALE_AGE_COEFFICIENT * age,
        ),
        Gender::Female => Some(
            PEF_FEMALE_INTERCEPT + PEF_FEMALE_HEIGHT_COEFFICIENT * height_cm
                - PEF_FEMALE_AGE_COEFFICIENT * age,
        ),
        Gender::Other => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn male_equation() {
        let pef = calculate_pef(40.0, Gender::Male, 180.0).expect("male is supported");
        assert!((pef - (187.0 + 5.48 * 180.0 - 0.034 * 40.0)).abs() < 1e-9);
    }

    #[test]
    fn female_equation() {
        let pef = calculate_pef(25.0, Gender::Female, 165.0).expect("female is supported");
        assert!((pef - (153.0 + 4.50 * 165.0 - 0.026 * 25.0)).abs() < 1e-9);
    }

    #[test]
    fn absent_only_for_unsupported_gender() {
        for gender in Gender::ALL {
            let pef = calculate_pef(50.0, gender, 170.0);
            assert_eq!(pef.is_none(), gender == Gender::Other);
        }
    }

    #[test]
    fn not_clamped() {
        let pef = calculate_pef(0.0, Gender::Male, -100.0).expect("male is supported");
        assert!(pef < 0.0);
    }
}
