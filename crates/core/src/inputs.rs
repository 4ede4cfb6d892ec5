//! Normalised inputs to the estimators and the interpreter.
//!
//! All values here are already unit-normalised: height in centimetres, FEV1/FVC as a
//! fraction in `[0, 1]`. Range checks belong to the intake boundary, not to these types.

use pft_types::{Ethnicity, Gender};
use serde::{Deserialize, Serialize};

/// Patient demographics used by the predictive equations.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    /// Age in whole years.
    pub age_years: u32,
    pub gender: Gender,
    /// Standing height in centimetres.
    pub height_cm: f64,
    pub ethnicity: Ethnicity,
}

impl PatientProfile {
    /// Age as a real number, as the predictive equations take it.
    pub fn age(&self) -> f64 {
        f64::from(self.age_years)
    }
}

/// Required spirometry measurements.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpirometryInput {
    /// FEV1 as a percentage of predicted.
    pub fev1_pct_predicted: f64,
    /// FVC as a percentage of predicted.
    pub fvc_pct_predicted: f64,
    /// FEV1/FVC as a fraction (0.0 to 1.0).
    pub fev1_fvc_ratio: f64,
}

/// Optional single-breath diffusion measurements.
///
/// Each field is independently optional; the interpreter reports only what is present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiffusionInput {
    /// Single breath diffusing capacity for carbon monoxide (mL/min/mmHg).
    #[serde(default)]
    pub dlco_sb: Option<f64>,
    /// Diffusing capacity per alveolar volume (mL/min/mmHg/L).
    #[serde(default)]
    pub dl_va: Option<f64>,
    /// Alveolar volume (L).
    #[serde(default)]
    pub va_sb: Option<f64>,
    /// Inspiratory capacity during single breath testing (L).
    #[serde(default)]
    pub ivc_sb: Option<f64>,
    /// Breath-holding time (seconds).
    #[serde(default)]
    pub bht_seconds: Option<f64>,
}

impl DiffusionInput {
    /// No diffusion measurements.
    pub const fn none() -> Self {
        Self {
            dlco_sb: None,
            dl_va: None,
            va_sb: None,
            ivc_sb: None,
            bht_seconds: None,
        }
    }

    #[cfg(test)]
    pub(crate) const fn complete(dlco_sb: f64, dl_va: f64, va_sb: f64, ivc_sb: f64, bht_seconds: f64) -> Self {
        Self {
            dlco_sb: Some(dlco_sb),
            dl_va: Some(dl_va),
            va_sb: Some(va_sb),
            ivc_sb: Some(ivc_sb),
            bht_seconds: Some(bht_seconds),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dlco_sb.is_none()
            && self.dl_va.is_none()
            && self.va_sb.is_none()
            && self.ivc_sb.is_none()
            && self.bht_seconds.is_none()
    }
}

/// Everything the interpreter consumes, passed by value.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PftInputs {
    pub patient: PatientProfile,
    pub spirometry: SpirometryInput,
    #[serde(default)]
    pub diffusion: DiffusionInput,
}

impl PftInputs {
    pub fn new(patient: PatientProfile, spirometry: SpirometryInput) -> Self {
        Self {
            patient,
            spirometry,
            diffusion: DiffusionInput::none(),
        }
    }

    pub fn with_diffusion(mut self, diffusion: DiffusionInput) -> Self {
        self.diffusion = diffusion;
        self
    }
}
