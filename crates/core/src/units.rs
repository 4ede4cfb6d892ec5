//! Unit conversion between the intake form and the normalised inputs.

use crate::constants::{CM_PER_INCH, KG_PER_LB};

/// Rounds to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Pounds to kilograms, rounded to two decimals.
pub fn pounds_to_kg(lbs: f64) -> f64 {
    round2(lbs * KG_PER_LB)
}

/// Inches to centimetres, rounded to two decimals.
pub fn inches_to_cm(inches: f64) -> f64 {
    round2(inches * CM_PER_INCH)
}

/// FEV1/FVC entered as a percentage (0-100) to the fraction the interpreter expects.
pub fn ratio_percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}
