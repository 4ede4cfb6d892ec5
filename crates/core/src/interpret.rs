//! Pulmonary function test interpreter.
//!
//! The interpreter is a fixed, ordered table of rules. Each rule looks at the same inputs and
//! contributes zero or more lines; rules are not exclusive, so obstructive and mixed findings
//! can both appear for one test. Output order is the table order, followed by the "normal"
//! fallback only when no rule produced anything.

use crate::constants::{
    FEV1_FVC_LLN_PARAMETER, MILD_OBSTRUCTION_MIN_FEV1_PCT, MODERATE_OBSTRUCTION_MIN_FEV1_PCT,
    REDUCED_DLCO_SB_THRESHOLD, RESTRICTION_MAX_FVC_PCT,
};
use crate::inputs::PftInputs;
use crate::lln::calculate_lln;
use serde::{Deserialize, Serialize};

pub const NORMAL_PFT: &str = "Normal PFT values.";
pub const NORMAL_NEXT_STEPS: &str =
    "Next steps: No action needed. Encourage routine follow-up if indicated.";

const RESTRICTIVE_PATTERN: &str = "Restrictive pattern detected.";
const RESTRICTIVE_NEXT_STEPS: &str = "Next steps: Evaluate for interstitial lung disease, obesity, or neuromuscular disorders. Consider high-resolution CT or referral to a specialist.";
const MIXED_PATTERN: &str = "Mixed obstructive and restrictive pattern detected.";
const MIXED_NEXT_STEPS: &str = "Next steps: Comprehensive workup needed. Evaluate for concurrent obstructive and restrictive conditions. Referral to pulmonology recommended.";
const REDUCED_DLCO: &str = "Reduced DLCO_SB: Suggests impaired gas exchange.";
const REDUCED_DLCO_NEXT_STEPS: &str = "Next steps: Investigate causes such as interstitial lung disease, pulmonary hypertension, or emphysema. Consider echocardiography or CT imaging.";
const NORMAL_DLCO: &str = "DLCO_SB is within normal limits.";

/// Severity band of an obstructive pattern, graded on FEV1 % predicted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstructionSeverity {
    Mild,
    Moderate,
    Severe,
}

impl ObstructionSeverity {
    /// Grades `fev1_pct` into a band. NaN grades to no band.
    pub fn grade(fev1_pct: f64) -> Option<Self> {
        if fev1_pct >= MILD_OBSTRUCTION_MIN_FEV1_PCT {
            Some(Self::Mild)
        } else if (MODERATE_OBSTRUCTION_MIN_FEV1_PCT..MILD_OBSTRUCTION_MIN_FEV1_PCT)
            .contains(&fev1_pct)
        {
            Some(Self::Moderate)
        } else if fev1_pct < MODERATE_OBSTRUCTION_MIN_FEV1_PCT {
            Some(Self::Severe)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Mild => "Severity: Mild obstruction.",
            Self::Moderate => "Severity: Moderate obstruction.",
            Self::Severe => "Severity: Severe obstruction.",
        }
    }

    pub fn next_steps(self) -> &'static str {
        match self {
            Self::Mild => "Next steps: Consider a short-acting beta-agonist (e.g., albuterol). Reassess if symptoms persist.",
            Self::Moderate => "Next steps: Consider adding long-acting bronchodilators (e.g., LABA or LAMA). Evaluate for inhaled corticosteroids if needed.",
            Self::Severe => "Next steps: Refer to a pulmonologist. Consider advanced therapies like combination inhalers or oxygen therapy if indicated.",
        }
    }
}

/// Ventilatory pattern fired by the spirometry rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PftPattern {
    Obstructive,
    Restrictive,
    Mixed,
    Normal,
}

impl PftPattern {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Obstructive => "obstructive",
            Self::Restrictive => "restrictive",
            Self::Mixed => "mixed",
            Self::Normal => "normal",
        }
    }
}

/// Structured view of what the rules decided, alongside the text findings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PftClassification {
    /// LLN cutoff the FEV1/FVC ratio was compared against.
    pub fev1_fvc_lln: f64,
    /// Spirometry patterns in rule order; `[Normal]` when none fired.
    pub patterns: Vec<PftPattern>,
    /// Present only when the obstructive pattern fired.
    pub severity: Option<ObstructionSeverity>,
    /// `None` when DLCO_SB was not measured.
    pub dlco_reduced: Option<bool>,
}

/// Shared, precomputed view of the inputs handed to every rule.
#[derive(Clone, Copy, Debug)]
struct RuleContext {
    inputs: PftInputs,
    fev1_fvc_lln: f64,
}

impl RuleContext {
    fn new(inputs: PftInputs) -> Self {
        let patient = inputs.patient;
        let fev1_fvc_lln = calculate_lln(
            FEV1_FVC_LLN_PARAMETER,
            patient.age(),
            patient.gender,
            patient.height_cm,
            patient.ethnicity,
        );
        Self {
            inputs,
            fev1_fvc_lln,
        }
    }

    fn ratio_below_lln(&self) -> bool {
        self.inputs.spirometry.fev1_fvc_ratio < self.fev1_fvc_lln
    }

    fn ratio_at_or_above_lln(&self) -> bool {
        self.inputs.spirometry.fev1_fvc_ratio >= self.fev1_fvc_lln
    }

    fn fvc_reduced(&self) -> bool {
        self.inputs.spirometry.fvc_pct_predicted < RESTRICTION_MAX_FVC_PCT
    }

    fn is_obstructive(&self) -> bool {
        self.ratio_below_lln()
    }

    fn is_restrictive(&self) -> bool {
        self.fvc_reduced() && self.ratio_at_or_above_lln()
    }

    fn is_mixed(&self) -> bool {
        self.ratio_below_lln() && self.fvc_reduced()
    }
}

type Rule = fn(&RuleContext) -> Vec<String>;

const RULES: [Rule; 8] = [
    obstructive_rule,
    restrictive_rule,
    mixed_rule,
    dlco_rule,
    dl_va_rule,
    va_rule,
    ivc_rule,
    bht_rule,
];

fn obstructive_rule(ctx: &RuleContext) -> Vec<String> {
    if !ctx.is_obstructive() {
        return Vec::new();
    }

    let mut lines = vec![format!(
        "Obstructive pattern detected (LLN-adjusted cutoff: {:.2}).",
        ctx.fev1_fvc_lln
    )];
    if let Some(severity) = ObstructionSeverity::grade(ctx.inputs.spirometry.fev1_pct_predicted) {
        lines.push(severity.label().to_owned());
        lines.push(severity.next_steps().to_owned());
    }
    lines
}

fn restrictive_rule(ctx: &RuleContext) -> Vec<String> {
    if !ctx.is_restrictive() {
        return Vec::new();
    }
    vec![RESTRICTIVE_PATTERN.to_owned(), RESTRICTIVE_NEXT_STEPS.to_owned()]
}

fn mixed_rule(ctx: &RuleContext) -> Vec<String> {
    if !ctx.is_mixed() {
        return Vec::new();
    }
    vec![MIXED_PATTERN.to_owned(), MIXED_NEXT_STEPS.to_owned()]
}

fn dlco_rule(ctx: &RuleContext) -> Vec<String> {
    match ctx.inputs.diffusion.dlco_sb {
        Some(dlco) if dlco < REDUCED_DLCO_SB_THRESHOLD => {
            vec![REDUCED_DLCO.to_owned(), REDUCED_DLCO_NEXT_STEPS.to_owned()]
        }
        Some(_) => vec![NORMAL_DLCO.to_owned()],
        None => Vec::new(),
    }
}

fn dl_va_rule(ctx: &RuleContext) -> Vec<String> {
    ctx.inputs
        .diffusion
        .dl_va
        .map(|v| {
            format!(
                "DL/VA ratio: {v:.2}. Interpretation depends on clinical context (e.g., lung volume and gas exchange)."
            )
        })
        .into_iter()
        .collect()
}

fn va_rule(ctx: &RuleContext) -> Vec<String> {
    ctx.inputs
        .diffusion
        .va_sb
        .map(|v| format!("VA_SB: {v:.2} L. This represents the alveolar volume."))
        .into_iter()
        .collect()
}

fn ivc_rule(ctx: &RuleContext) -> Vec<String> {
    ctx.inputs
        .diffusion
        .ivc_sb
        .map(|v| {
            format!("IVC_SB: {v:.2} L. Represents inspiratory capacity during single breath testing.")
        })
        .into_iter()
        .collect()
}

fn bht_rule(ctx: &RuleContext) -> Vec<String> {
    ctx.inputs
        .diffusion
        .bht_seconds
        .map(|v| {
            format!(
                "Breath-holding time (BHT): {v:.2} seconds. Ensure proper technique during test."
            )
        })
        .into_iter()
        .collect()
}

/// Interprets a PFT and returns the findings in display order.
///
/// Pure: the same inputs always give the same lines.
pub fn interpret_pft(inputs: PftInputs) -> Vec<String> {
    let ctx = RuleContext::new(inputs);

    let mut findings: Vec<String> = RULES.iter().flat_map(|rule| rule(&ctx)).collect();

    if findings.is_empty() {
        findings.push(NORMAL_PFT.to_owned());
        findings.push(NORMAL_NEXT_STEPS.to_owned());
    }

    findings
}

/// Returns the decisions behind [`interpret_pft`] as typed values.
///
/// `patterns` reflects spirometry only, so it can be `[Normal]` while diffusion lines are
/// still reported.
pub fn classify(inputs: PftInputs) -> PftClassification {
    let ctx = RuleContext::new(inputs);

    let mut patterns = Vec::new();
    if ctx.is_obstructive() {
        patterns.push(PftPattern::Obstructive);
    }
    if ctx.is_restrictive() {
        patterns.push(PftPattern::Restrictive);
    }
    if ctx.is_mixed() {
        patterns.push(PftPattern::Mixed);
    }
    if patterns.is_empty() {
        patterns.push(PftPattern::Normal);
    }

    let severity = if ctx.is_obstructive() {
        ObstructionSeverity::grade(inputs.spirometry.fev1_pct_predicted)
    } else {
        None
    };

    PftClassification {
        fev1_fvc_lln: ctx.fev1_fvc_lln,
        patterns,
        severity,
        dlco_reduced: inputs
            .diffusion
            .dlco_sb
            .map(|dlco| dlco < REDUCED_DLCO_SB_THRESHOLD),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{DiffusionInput, PatientProfile, SpirometryInput};
    use pft_types::{Ethnicity, Gender};

    // Height 170 cm at age 50 gives an LLN of 8.5, so any ratio in [0, 1] is below it.
    fn obstructed_patient() -> PatientProfile {
        PatientProfile {
            age_years: 50,
            gender: Gender::Male,
            height_cm: 170.0,
            ethnicity: Ethnicity::Caucasian,
        }
    }

    // Height 0 at age 40 gives an LLN of 0.2.
    fn low_lln_patient() -> PatientProfile {
        PatientProfile {
            age_years: 40,
            gender: Gender::Female,
            height_cm: 0.0,
            ethnicity: Ethnicity::Caucasian,
        }
    }

    fn spirometry(fev1: f64, fvc: f64, ratio: f64) -> SpirometryInput {
        SpirometryInput {
            fev1_pct_predicted: fev1,
            fvc_pct_predicted: fvc,
            fev1_fvc_ratio: ratio,
        }
    }

    fn contains(findings: &[String], needle: &str) -> bool {
        findings.iter().any(|line| line.contains(needle))
    }

    #[test]
    fn mild_obstruction() {
        let findings = interpret_pft(PftInputs::new(obstructed_patient(), spirometry(75.0, 90.0, 0.6)));

        assert_eq!(findings[0], "Obstructive pattern detected (LLN-adjusted cutoff: 8.50).");
        assert!(contains(&findings, "Mild obstruction"));
        assert!(!contains(&findings, "Moderate"));
        assert!(!contains(&findings, "Severe"));
        assert_eq!(findings.len(), 3);
    }

    #[test]
    fn moderate_obstruction() {
        let findings = interpret_pft(PftInputs::new(obstructed_patient(), spirometry(60.0, 90.0, 0.6)));
        assert!(contains(&findings, "Moderate obstruction"));
        assert!(contains(&findings, "LABA or LAMA"));
    }

    #[test]
    fn severe_obstruction() {
        let findings = interpret_pft(PftInputs::new(obstructed_patient(), spirometry(40.0, 90.0, 0.6)));
        assert!(contains(&findings, "Severe obstruction"));
        assert!(contains(&findings, "Refer to a pulmonologist"));
    }

    #[test]
    fn severity_band_edges() {
        assert_eq!(ObstructionSeverity::grade(70.0), Some(ObstructionSeverity::Mild));
        assert_eq!(ObstructionSeverity::grade(69.99), Some(ObstructionSeverity::Moderate));
        assert_eq!(ObstructionSeverity::grade(50.0), Some(ObstructionSeverity::Moderate));
        assert_eq!(ObstructionSeverity::grade(49.99), Some(ObstructionSeverity::Severe));
        assert_eq!(ObstructionSeverity::grade(0.0), Some(ObstructionSeverity::Severe));
        assert_eq!(ObstructionSeverity::grade(f64::NAN), None);
    }

    #[test]
    fn restrictive_without_mixed() {
        let findings = interpret_pft(PftInputs::new(low_lln_patient(), spirometry(85.0, 70.0, 0.8)));

        assert_eq!(findings[0], "Restrictive pattern detected.");
        assert!(!contains(&findings, "Mixed"));
        assert!(!contains(&findings, "Obstructive"));
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn obstructive_and_mixed_co_fire() {
        let findings = interpret_pft(PftInputs::new(obstructed_patient(), spirometry(60.0, 70.0, 0.5)));

        assert!(contains(&findings, "Obstructive pattern detected"));
        assert!(contains(&findings, "Mixed obstructive and restrictive pattern detected"));
        assert!(!contains(&findings, "Restrictive pattern detected"));

        let obstructive = findings
            .iter()
            .position(|l| l.starts_with("Obstructive"))
            .unwrap();
        let mixed = findings.iter().position(|l| l.starts_with("Mixed")).unwrap();
        assert!(obstructive < mixed);
    }

    #[test]
    fn normal_fallback_is_exact() {
        let findings = interpret_pft(PftInputs::new(low_lln_patient(), spirometry(100.0, 100.0, 1.0)));
        assert_eq!(findings, vec![NORMAL_PFT.to_owned(), NORMAL_NEXT_STEPS.to_owned()]);
    }

    #[test]
    fn ratio_equal_to_lln_is_not_obstructive() {
        // Age 0 and height 0 put the LLN at exactly 1.0.
        let patient = PatientProfile {
            age_years: 0,
            height_cm: 0.0,
            ..low_lln_patient()
        };
        let findings = interpret_pft(PftInputs::new(patient, spirometry(100.0, 100.0, 1.0)));
        assert_eq!(findings[0], NORMAL_PFT);
    }

    #[test]
    fn dlco_thresholds() {
        let reduced = PftInputs::new(low_lln_patient(), spirometry(100.0, 100.0, 1.0)).with_diffusion(
            DiffusionInput {
                dlco_sb: Some(70.0),
                ..DiffusionInput::none()
            },
        );
        let findings = interpret_pft(reduced);
        assert!(contains(&findings, "Reduced DLCO_SB"));
        assert!(!contains(&findings, "Normal PFT values."));

        let normal = reduced.with_diffusion(DiffusionInput {
            dlco_sb: Some(90.0),
            ..DiffusionInput::none()
        });
        assert_eq!(interpret_pft(normal), vec![NORMAL_DLCO.to_owned()]);
    }

    #[test]
    fn diffusion_lines_follow_spirometry_in_order() {
        let inputs = PftInputs::new(obstructed_patient(), spirometry(75.0, 90.0, 0.6))
            .with_diffusion(DiffusionInput::complete(85.0, 4.256, 5.5, 3.0, 10.0));
        let findings = interpret_pft(inputs);

        assert_eq!(
            &findings[3..],
            &[
                "DLCO_SB is within normal limits.".to_owned(),
                "DL/VA ratio: 4.26. Interpretation depends on clinical context (e.g., lung volume and gas exchange).".to_owned(),
                "VA_SB: 5.50 L. This represents the alveolar volume.".to_owned(),
                "IVC_SB: 3.00 L. Represents inspiratory capacity during single breath testing.".to_owned(),
                "Breath-holding time (BHT): 10.00 seconds. Ensure proper technique during test.".to_owned(),
            ]
        );
    }

    #[test]
    fn informational_fields_suppress_normal_fallback() {
        let inputs = PftInputs::new(low_lln_patient(), spirometry(100.0, 100.0, 1.0))
            .with_diffusion(DiffusionInput {
                bht_seconds: Some(9.0),
                ..DiffusionInput::none()
            });
        let findings = interpret_pft(inputs);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].starts_with("Breath-holding time (BHT): 9.00 seconds."));
    }

    #[test]
    fn interpretation_is_idempotent() {
        let inputs = PftInputs::new(obstructed_patient(), spirometry(55.0, 65.0, 0.4))
            .with_diffusion(DiffusionInput::complete(60.0, 3.0, 4.0, 2.5, 8.0));
        assert_eq!(interpret_pft(inputs), interpret_pft(inputs));
    }

    #[test]
    fn classify_reports_fired_patterns() {
        let mixed = classify(PftInputs::new(obstructed_patient(), spirometry(60.0, 70.0, 0.5)));
        assert_eq!(mixed.patterns, vec![PftPattern::Obstructive, PftPattern::Mixed]);
        assert_eq!(mixed.severity, Some(ObstructionSeverity::Moderate));
        assert!((mixed.fev1_fvc_lln - 8.5).abs() < 1e-9);
        assert_eq!(mixed.dlco_reduced, None);

        let restrictive = classify(PftInputs::new(low_lln_patient(), spirometry(40.0, 70.0, 0.8)));
        assert_eq!(restrictive.patterns, vec![PftPattern::Restrictive]);
        assert_eq!(restrictive.severity, None);

        let normal = classify(
            PftInputs::new(low_lln_patient(), spirometry(100.0, 100.0, 1.0)).with_diffusion(
                DiffusionInput {
                    dlco_sb: Some(70.0),
                    ..DiffusionInput::none()
                },
            ),
        );
        assert_eq!(normal.patterns, vec![PftPattern::Normal]);
        assert_eq!(normal.dlco_reduced, Some(true));
    }
}
