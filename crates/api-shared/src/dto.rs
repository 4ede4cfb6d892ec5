//! Request and response bodies for the PFT APIs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Patient demographics in normalised units.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PatientReq {
    pub age_years: u32,
    /// "Male", "Female" or "Other"
    pub gender: String,
    pub height_cm: f64,
    /// "Caucasian", "African American", "Asian" or "Other"
    pub ethnicity: String,
}

/// Optional single-breath diffusion measurements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DiffusionReq {
    #[serde(default)]
    pub dlco_sb: Option<f64>,
    #[serde(default)]
    pub dl_va: Option<f64>,
    #[serde(default)]
    pub va_sb: Option<f64>,
    #[serde(default)]
    pub ivc_sb: Option<f64>,
    #[serde(default)]
    pub bht_seconds: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InterpretReq {
    pub patient: PatientReq,
    pub fev1_pct_predicted: f64,
    pub fvc_pct_predicted: f64,
    /// FEV1/FVC as a fraction (0.0 to 1.0)
    pub fev1_fvc_ratio: f64,
    #[serde(default)]
    pub diffusion: DiffusionReq,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct InterpretRes {
    pub fev1_fvc_lln: f64,
    pub patterns: Vec<String>,
    pub severity: Option<String>,
    pub dlco_reduced: Option<bool>,
    pub findings: Vec<String>,
    /// RFC 3339 timestamp
    pub generated_at: String,
}

/// Raw intake form: imperial height/weight, FEV1/FVC as a percentage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportReq {
    pub age_years: u32,
    pub weight_lbs: f64,
    pub height_inches: f64,
    pub gender: String,
    pub ethnicity: String,
    pub fev1_pct: f64,
    pub fvc_pct: f64,
    pub fev1_fvc_percent: f64,
    #[serde(default)]
    pub diffusion: Option<DiffusionReq>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComparisonBarRes {
    pub label: String,
    pub predicted: f64,
    pub observed: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportRes {
    pub patient_details: String,
    pub findings: Vec<String>,
    pub pef: Option<f64>,
    pub pef_lines: Vec<String>,
    pub comparison: Vec<ComparisonBarRes>,
    pub generated_at: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LlnReq {
    pub parameter: f64,
    pub age: f64,
    pub gender: String,
    pub height_cm: f64,
    pub ethnicity: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LlnRes {
    pub lln: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PefReq {
    pub age: f64,
    pub gender: String,
    pub height_cm: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PefRes {
    pub pef: Option<f64>,
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpret_req_defaults_missing_diffusion() {
        let req: InterpretReq = serde_json::from_str(
            r#"{
                "patient": {"age_years": 50, "gender": "Male", "height_cm": 170.0, "ethnicity": "Asian"},
                "fev1_pct_predicted": 80.0,
                "fvc_pct_predicted": 85.0,
                "fev1_fvc_ratio": 0.7
            }"#,
        )
        .expect("valid request");
        assert_eq!(req.diffusion, DiffusionReq::default());
    }

    #[test]
    fn diffusion_req_accepts_partial_fields() {
        let d: DiffusionReq = serde_json::from_str(r#"{"dlco_sb": 70.0}"#).unwrap();
        assert_eq!(d.dlco_sb, Some(70.0));
        assert!(d.bht_seconds.is_none());
    }
}
