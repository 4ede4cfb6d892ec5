//! # PFT Core
//!
//! Core logic for pulmonary function test interpretation.
//!
//! This crate contains pure computations and the checks that guard them:
//! - Lower limit of normal (LLN) and peak expiratory flow (PEF) estimators
//! - The PFT interpreter, an ordered table of rules producing display lines
//! - Intake form handling: unit conversion, range validation, report assembly
//!
//! **No API concerns**: HTTP servers, CLI parsing and wire DTOs belong in `api-rest`,
//! `pft-cli` or `api-shared`.

pub mod config;
pub mod constants;
mod error;
pub mod inputs;
pub mod intake;
pub mod interpret;
pub mod lln;
pub mod pef;
pub mod report;
pub mod units;
pub mod validation;

use std::sync::Arc;

pub use config::CoreConfig;
pub use error::{PftError, PftResult};
pub use inputs::{DiffusionInput, PatientProfile, PftInputs, SpirometryInput};
pub use intake::PftForm;
pub use interpret::{classify, interpret_pft, ObstructionSeverity, PftClassification, PftPattern};
pub use lln::calculate_lln;
pub use pef::calculate_pef;
pub use pft_types::{Ethnicity, Gender};
pub use report::{build_report, ComparisonBar, PefEstimate, PftReport};

/// Entry point for callers that hold a [`CoreConfig`].
///
/// The free functions are usable directly; the service adds input-limit enforcement from
/// configuration and logging around each call.
#[derive(Clone, Debug)]
pub struct PftService {
    cfg: Arc<CoreConfig>,
}

impl PftService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn lln(
        &self,
        parameter: f64,
        age: f64,
        gender: Gender,
        height_cm: f64,
        ethnicity: Ethnicity,
    ) -> f64 {
        let lln = calculate_lln(parameter, age, gender, height_cm, ethnicity);
        tracing::debug!(parameter, age, height_cm, %ethnicity, lln, "computed LLN");
        lln
    }

    pub fn pef(&self, age: f64, gender: Gender, height_cm: f64) -> Option<f64> {
        let pef = calculate_pef(age, gender, height_cm);
        if pef.is_none() {
            tracing::debug!(%gender, "no PEF equation for gender");
        }
        pef
    }

    pub fn interpret(&self, inputs: PftInputs) -> Vec<String> {
        let findings = interpret_pft(inputs);
        tracing::debug!(lines = findings.len(), "interpreted PFT");
        findings
    }

    pub fn classify(&self, inputs: PftInputs) -> PftClassification {
        classify(inputs)
    }

    /// Validates `form` (when limits are enforced) and builds the report.
    ///
    /// # Errors
    ///
    /// Returns [`PftError::OutOfRange`] or [`PftError::NonFinite`] for an invalid form.
    pub fn report(&self, form: &PftForm) -> PftResult<PftReport> {
        if self.cfg.enforce_input_limits() {
            validation::validate_form(form, self.cfg.input_limits()).inspect_err(|e| {
                tracing::warn!("rejected PFT form: {}", e);
            })?;
        }

        let report = build_report(form);
        tracing::info!(
            findings = report.findings.len(),
            pef_available = report.pef.value().is_some(),
            "built PFT report"
        );
        Ok(report)
    }
}
