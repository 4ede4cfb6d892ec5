//! Input validation utilities.
//!
//! The estimators and interpreter assume range-checked inputs and do not validate. This module
//! is the check the intake boundaries (CLI, REST) run on a raw [`PftForm`] before converting it.

use crate::intake::PftForm;
use crate::{PftError, PftResult};
use serde::{Deserialize, Serialize};

/// Inclusive accepted range for one numeric field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Checks `value` for `field`, rejecting NaN and infinities before the range test.
    pub fn check(&self, field: &'static str, value: f64) -> PftResult<()> {
        if !value.is_finite() {
            return Err(PftError::NonFinite { field });
        }
        if value < self.min || value > self.max {
            return Err(PftError::OutOfRange {
                field,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Accepted ranges for every intake field.
///
/// The defaults match the bounds of the intake form widgets.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputLimits {
    pub age_years: Bounds,
    pub weight_lbs: Bounds,
    pub height_inches: Bounds,
    pub fev1_pct: Bounds,
    pub fvc_pct: Bounds,
    pub fev1_fvc_percent: Bounds,
    pub dlco_sb: Bounds,
    pub dl_va: Bounds,
    pub va_sb: Bounds,
    pub ivc_sb: Bounds,
    pub bht_seconds: Bounds,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            age_years: Bounds::new(0.0, 120.0),
            weight_lbs: Bounds::new(0.0, 660.0),
            height_inches: Bounds::new(0.0, 100.0),
            fev1_pct: Bounds::new(0.0, 150.0),
            fvc_pct: Bounds::new(0.0, 150.0),
            fev1_fvc_percent: Bounds::new(0.0, 100.0),
            dlco_sb: Bounds::new(0.0, 150.0),
            dl_va: Bounds::new(0.0, 10.0),
            va_sb: Bounds::new(0.0, 10.0),
            ivc_sb: Bounds::new(0.0, 10.0),
            bht_seconds: Bounds::new(0.0, 60.0),
        }
    }
}

/// Validates every field of `form` against `limits`, in form order.
///
/// # Errors
///
/// Returns the first violation as [`PftError::OutOfRange`] or [`PftError::NonFinite`].
pub fn validate_form(form: &PftForm, limits: &InputLimits) -> PftResult<()> {
    limits.age_years.check("age_years", f64::from(form.age_years))?;
    limits.weight_lbs.check("weight_lbs", form.weight_lbs)?;
    limits.height_inches.check("height_inches", form.height_inches)?;
    limits.fev1_pct.check("fev1_pct", form.fev1_pct)?;
    limits.fvc_pct.check("fvc_pct", form.fvc_pct)?;
    limits
        .fev1_fvc_percent
        .check("fev1_fvc_percent", form.fev1_fvc_percent)?;

    if let Some(diffusion) = &form.diffusion {
        let optional = [
            (&limits.dlco_sb, "dlco_sb", diffusion.dlco_sb),
            (&limits.dl_va, "dl_va", diffusion.dl_va),
            (&limits.va_sb, "va_sb", diffusion.va_sb),
            (&limits.ivc_sb, "ivc_sb", diffusion.ivc_sb),
            (&limits.bht_seconds, "bht_seconds", diffusion.bht_seconds),
        ];
        for (bounds, field, value) in optional {
            if let Some(value) = value {
                bounds.check(field, value)?;
            }
        }
    }

    Ok(())
}
