//! Constants used throughout the PFT core crate.
//!
//! The estimator coefficients are placeholder values, not published GLI or NHANES regressions.
//! They are kept literal so that results stay reproducible across implementations.

/// LLN adjustment factor for Caucasian patients (also used for Other).
pub const LLN_FACTOR_CAUCASIAN: f64 = 1.0;

/// LLN adjustment factor for African American patients.
pub const LLN_FACTOR_AFRICAN_AMERICAN: f64 = 0.88;

/// LLN adjustment factor for Asian patients.
pub const LLN_FACTOR_ASIAN: f64 = 0.94;

/// LLN adjustment factor for any other ethnicity.
pub const LLN_FACTOR_DEFAULT: f64 = 1.0;

/// Per-year age coefficient subtracted in the LLN formula.
pub const LLN_AGE_COEFFICIENT: f64 = 0.02;

/// Per-centimetre height coefficient added in the LLN formula.
pub const LLN_HEIGHT_COEFFICIENT: f64 = 0.05;

/// Parameter passed to the LLN estimator when deriving the FEV1/FVC cutoff.
///
/// This is fixed and does not depend on the measured ratio.
pub const FEV1_FVC_LLN_PARAMETER: f64 = 1.0;

/// Male PEF equation: `intercept + height * h - age * a`.
pub const PEF_MALE_INTERCEPT: f64 = 187.0;
pub const PEF_MALE_HEIGHT_COEFFICIENT: f64 = 5.48;
pub const PEF_MALE_AGE_COEFFICIENT: f64 = 0.034;

/// Female PEF equation: `intercept + height * h - age * a`.
pub const PEF_FEMALE_INTERCEPT: f64 = 153.0;
pub const PEF_FEMALE_HEIGHT_COEFFICIENT: f64 = 4.50;
pub const PEF_FEMALE_AGE_COEFFICIENT: f64 = 0.026;

/// FEV1 % predicted at or above which obstruction is graded mild.
pub const MILD_OBSTRUCTION_MIN_FEV1_PCT: f64 = 70.0;

/// FEV1 % predicted at or above which obstruction is graded moderate (below the mild bound).
pub const MODERATE_OBSTRUCTION_MIN_FEV1_PCT: f64 = 50.0;

/// FVC % predicted below which a restrictive component is considered.
pub const RESTRICTION_MAX_FVC_PCT: f64 = 80.0;

/// DLCO_SB below which gas exchange is reported as reduced.
pub const REDUCED_DLCO_SB_THRESHOLD: f64 = 80.0;

/// Predicted value shown against every observed bar in the comparison chart.
pub const PREDICTED_PERCENT: f64 = 100.0;

/// Kilograms per pound.
pub const KG_PER_LB: f64 = 0.453592;

/// Centimetres per inch.
pub const CM_PER_INCH: f64 = 2.54;
