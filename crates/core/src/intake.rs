//! Raw intake form, as a clinician enters it.
//!
//! Height is collected in inches, weight in pounds and FEV1/FVC as a percentage. Diffusion
//! measurements are entered all together or not at all.

use crate::inputs::{DiffusionInput, PatientProfile, PftInputs, SpirometryInput};
use crate::units::{inches_to_cm, pounds_to_kg, ratio_percent_to_fraction};
use pft_types::{Ethnicity, Gender};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PftForm {
    pub age_years: u32,
    pub weight_lbs: f64,
    pub height_inches: f64,
    pub gender: Gender,
    pub ethnicity: Ethnicity,
    /// FEV1, % predicted.
    pub fev1_pct: f64,
    /// FVC, % predicted.
    pub fvc_pct: f64,
    /// FEV1/FVC as a percentage (0-100).
    pub fev1_fvc_percent: f64,
    #[serde(default)]
    pub diffusion: Option<DiffusionInput>,
}

impl PftForm {
    pub fn weight_kg(&self) -> f64 {
        pounds_to_kg(self.weight_lbs)
    }

    pub fn height_cm(&self) -> f64 {
        inches_to_cm(self.height_inches)
    }

    pub fn profile(&self) -> PatientProfile {
        PatientProfile {
            age_years: self.age_years,
            gender: self.gender,
            height_cm: self.height_cm(),
            ethnicity: self.ethnicity,
        }
    }

    /// Normalises units and builds interpreter inputs. Does not validate.
    pub fn to_inputs(&self) -> PftInputs {
        PftInputs {
            patient: self.profile(),
            spirometry: SpirometryInput {
                fev1_pct_predicted: self.fev1_pct,
                fvc_pct_predicted: self.fvc_pct,
                fev1_fvc_ratio: ratio_percent_to_fraction(self.fev1_fvc_percent),
            },
            diffusion: self.diffusion.unwrap_or_default(),
        }
    }
}
