//! Report assembled from an intake form: patient summary, findings, PEF and chart series.

use crate::constants::PREDICTED_PERCENT;
use crate::intake::PftForm;
use crate::interpret::interpret_pft;
use crate::pef::calculate_pef;
use serde::{Deserialize, Serialize};

pub const PEF_CAVEAT: &str =
    "Caveat: NHANES equations may not fully account for variations across all ethnic groups.";
pub const PEF_UNAVAILABLE: &str = "PEF calculation not available for the selected gender.";

/// Predicted peak expiratory flow for the report.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PefEstimate {
    Available { litres_per_minute: f64 },
    Unavailable,
}

impl PefEstimate {
    pub fn from_value(value: Option<f64>) -> Self {
        match value {
            Some(litres_per_minute) => Self::Available { litres_per_minute },
            None => Self::Unavailable,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Available { litres_per_minute } => Some(*litres_per_minute),
            Self::Unavailable => None,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        match self {
            Self::Available { litres_per_minute } => vec![
                format!(
                    "Estimated Peak Expiratory Flow (PEF): {litres_per_minute:.2} L/min (based on NHANES equations)."
                ),
                PEF_CAVEAT.to_owned(),
            ],
            Self::Unavailable => vec![PEF_UNAVAILABLE.to_owned()],
        }
    }
}

/// One predicted/observed pair in the comparison chart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparisonBar {
    pub label: String,
    pub predicted: f64,
    pub observed: f64,
}

impl ComparisonBar {
    fn new(label: &str, observed: f64) -> Self {
        Self {
            label: label.to_owned(),
            predicted: PREDICTED_PERCENT,
            observed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PftReport {
    pub patient_details: String,
    pub findings: Vec<String>,
    pub pef: PefEstimate,
    pub comparison: Vec<ComparisonBar>,
}

/// Predicted vs observed series for charting. The ratio bar uses the entered percentage.
pub fn comparison_series(form: &PftForm) -> Vec<ComparisonBar> {
    let mut bars = vec![
        ComparisonBar::new("FEV1", form.fev1_pct),
        ComparisonBar::new("FVC", form.fvc_pct),
        ComparisonBar::new("FEV1/FVC", form.fev1_fvc_percent),
    ];
    if let Some(dlco) = form.diffusion.and_then(|d| d.dlco_sb) {
        bars.push(ComparisonBar::new("DLCO_SB", dlco));
    }
    bars
}

pub fn patient_details(form: &PftForm) -> String {
    format!(
        "Patient Details: Age: {}, Weight: {:.2} kg, Height: {:.2} cm, Gender: {}, Ethnicity: {}",
        form.age_years,
        form.weight_kg(),
        form.height_cm(),
        form.gender,
        form.ethnicity
    )
}

/// Builds the full report. Does not validate; see [`crate::validation::validate_form`].
pub fn build_report(form: &PftForm) -> PftReport {
    let profile = form.profile();
    PftReport {
        patient_details: patient_details(form),
        findings: interpret_pft(form.to_inputs()),
        pef: PefEstimate::from_value(calculate_pef(
            profile.age(),
            profile.gender,
            profile.height_cm,
        )),
        comparison: comparison_series(form),
    }
}
