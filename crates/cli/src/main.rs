use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use pft_core::{
    config::enforce_limits_from_env_value, validation::InputLimits, CoreConfig, DiffusionInput,
    Ethnicity, Gender, PatientProfile, PftForm, PftInputs, PftService, SpirometryInput,
};

#[derive(Parser)]
#[command(name = "pft")]
#[command(about = "Pulmonary function test interpreter CLI")]
struct Cli {
    /// Print JSON instead of text lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args, Clone, Copy)]
struct DiffusionArgs {
    /// DLCO_SB (mL/min/mmHg)
    #[arg(long)]
    dlco_sb: Option<f64>,
    /// DL/VA ratio (mL/min/mmHg/L)
    #[arg(long)]
    dl_va: Option<f64>,
    /// VA_SB (L)
    #[arg(long)]
    va_sb: Option<f64>,
    /// IVC_SB (L)
    #[arg(long)]
    ivc_sb: Option<f64>,
    /// Breath-holding time (seconds)
    #[arg(long)]
    bht: Option<f64>,
}

impl DiffusionArgs {
    fn to_input(&self) -> DiffusionInput {
        DiffusionInput {
            dlco_sb: self.dlco_sb,
            dl_va: self.dl_va,
            va_sb: self.va_sb,
            ivc_sb: self.ivc_sb,
            bht_seconds: self.bht,
        }
    }
}

#[derive(Args)]
struct ReportArgs {
    /// Age in years
    #[arg(long)]
    age: u32,
    /// Weight in pounds
    #[arg(long)]
    weight_lbs: f64,
    /// Height in inches
    #[arg(long)]
    height_inches: f64,
    /// Male, Female or Other
    #[arg(long)]
    gender: Gender,
    /// Caucasian, "African American", Asian or Other
    #[arg(long)]
    ethnicity: Ethnicity,
    /// FEV1 (% predicted)
    #[arg(long)]
    fev1: f64,
    /// FVC (% predicted)
    #[arg(long)]
    fvc: f64,
    /// FEV1/FVC ratio (%)
    #[arg(long)]
    ratio_percent: f64,
    /// Skip input range validation
    #[arg(long)]
    no_limits: bool,
    #[command(flatten)]
    diffusion: DiffusionArgs,
}

impl ReportArgs {
    /// Intake form for these arguments. No diffusion flags at all means no diffusion data.
    fn to_form(&self) -> PftForm {
        let diffusion = self.diffusion.to_input();
        PftForm {
            age_years: self.age,
            weight_lbs: self.weight_lbs,
            height_inches: self.height_inches,
            gender: self.gender,
            ethnicity: self.ethnicity,
            fev1_pct: self.fev1,
            fvc_pct: self.fvc,
            fev1_fvc_percent: self.ratio_percent,
            diffusion: (!diffusion.is_empty()).then_some(diffusion),
        }
    }
}

/// Limits are enforced unless the environment turns them off or `--no-limits` is passed.
fn report_config(enforce_from_env: bool, no_limits: bool) -> CoreConfig {
    CoreConfig::new(InputLimits::default(), enforce_from_env && !no_limits)
}

#[derive(Subcommand)]
enum Commands {
    /// Interpret normalised inputs (height in cm, FEV1/FVC as a fraction)
    Interpret {
        /// Age in years
        #[arg(long)]
        age: u32,
        /// Male, Female or Other
        #[arg(long)]
        gender: Gender,
        /// Height in centimetres
        #[arg(long)]
        height_cm: f64,
        /// Caucasian, "African American", Asian or Other
        #[arg(long)]
        ethnicity: Ethnicity,
        /// FEV1 (% predicted)
        #[arg(long)]
        fev1: f64,
        /// FVC (% predicted)
        #[arg(long)]
        fvc: f64,
        /// FEV1/FVC ratio as a fraction (0.0 to 1.0)
        #[arg(long)]
        ratio: f64,
        #[command(flatten)]
        diffusion: DiffusionArgs,
    },
    /// Build a full report from intake form values (imperial units, ratio in %)
    Report(ReportArgs),
    /// Lower limit of normal for a parameter
    Lln {
        parameter: f64,
        #[arg(long)]
        age: f64,
        #[arg(long)]
        gender: Gender,
        #[arg(long)]
        height_cm: f64,
        #[arg(long)]
        ethnicity: Ethnicity,
    },
    /// Predicted peak expiratory flow (L/min)
    Pef {
        #[arg(long)]
        age: f64,
        #[arg(long)]
        gender: Gender,
        #[arg(long)]
        height_cm: f64,
    },
}

fn bullet_lines(lines: &[String]) -> Vec<String> {
    lines.iter().map(|line| format!("- {line}")).collect()
}

fn print_lines(lines: &[String]) {
    for line in bullet_lines(lines) {
        println!("{line}");
    }
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Some(Commands::Interpret {
            age,
            gender,
            height_cm,
            ethnicity,
            fev1,
            fvc,
            ratio,
            diffusion,
        }) => {
            let service = PftService::new(Arc::new(CoreConfig::default()));
            let inputs = PftInputs::new(
                PatientProfile {
                    age_years: age,
                    gender,
                    height_cm,
                    ethnicity,
                },
                SpirometryInput {
                    fev1_pct_predicted: fev1,
                    fvc_pct_predicted: fvc,
                    fev1_fvc_ratio: ratio,
                },
            )
            .with_diffusion(diffusion.to_input());

            let findings = service.interpret(inputs);
            if cli.json {
                let out = serde_json::json!({
                    "classification": service.classify(inputs),
                    "findings": findings,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                print_lines(&findings);
            }
        }
        Some(Commands::Report(args)) => {
            let enforce_limits =
                enforce_limits_from_env_value(std::env::var("PFT_ENFORCE_INPUT_LIMITS").ok())?;
            let cfg = report_config(enforce_limits, args.no_limits);
            let form = args.to_form();
            let report = PftService::new(Arc::new(cfg)).report(&form)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.patient_details);
                println!();
                println!("Results:");
                print_lines(&report.findings);
                println!();
                for line in report.pef.lines() {
                    println!("{}", line);
                }
            }
        }
        Some(Commands::Lln {
            parameter,
            age,
            gender,
            height_cm,
            ethnicity,
        }) => {
            let service = PftService::new(Arc::new(CoreConfig::default()));
            let lln = service.lln(parameter, age, gender, height_cm, ethnicity);
            if cli.json {
                println!("{}", serde_json::json!({ "lln": lln }));
            } else {
                println!("LLN: {:.2}", lln);
            }
        }
        Some(Commands::Pef {
            age,
            gender,
            height_cm,
        }) => {
            let service = PftService::new(Arc::new(CoreConfig::default()));
            let pef = service.pef(age, gender, height_cm);
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({ "pef": pef, "available": pef.is_some() })
                );
            } else {
                let estimate = pft_core::PefEstimate::from_value(pef);
                for line in estimate.lines() {
                    println!("{}", line);
                }
            }
        }
        None => {
            println!("Use 'pft --help' for commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT_ARGS: [&str; 18] = [
        "pft",
        "report",
        "--age",
        "45",
        "--weight-lbs",
        "180",
        "--height-inches",
        "70",
        "--gender",
        "Male",
        "--ethnicity",
        "Asian",
        "--fev1",
        "82",
        "--fvc",
        "88",
        "--ratio-percent",
        "74",
    ];

    fn report_args(extra: &[&str]) -> ReportArgs {
        let argv = REPORT_ARGS.iter().chain(extra).copied();
        match Cli::try_parse_from(argv).expect("arguments should parse").command {
            Some(Commands::Report(args)) => args,
            _ => panic!("expected the report subcommand"),
        }
    }

    #[test]
    fn report_without_diffusion_flags_has_no_diffusion_data() {
        let form = report_args(&[]).to_form();
        assert_eq!(form.diffusion, None);
        assert_eq!(form.age_years, 45);
        assert_eq!(form.fev1_fvc_percent, 74.0);

        let report = PftService::new(Arc::new(CoreConfig::default()))
            .report(&form)
            .expect("form is within limits");
        assert!(report.comparison.iter().all(|bar| bar.label != "DLCO_SB"));
    }

    #[test]
    fn report_with_one_diffusion_flag_keeps_partial_data() {
        let form = report_args(&["--bht", "8"]).to_form();
        let diffusion = form.diffusion.expect("diffusion should be present");
        assert_eq!(diffusion.bht_seconds, Some(8.0));
        assert_eq!(diffusion.dlco_sb, None);
    }

    #[test]
    fn report_enforces_limits_by_default() {
        let args = report_args(&["--bht", "61"]);
        let service = PftService::new(Arc::new(report_config(true, args.no_limits)));
        let err = service.report(&args.to_form()).expect_err("should reject BHT");
        assert_eq!(
            err.to_string(),
            "bht_seconds = 61 is outside the accepted range [0, 60]"
        );
    }

    #[test]
    fn report_skips_limits_with_flag_or_env() {
        let args = report_args(&["--bht", "61", "--no-limits"]);
        assert!(args.no_limits);
        assert!(!report_config(true, args.no_limits).enforce_input_limits());
        assert!(!report_config(false, false).enforce_input_limits());

        let service = PftService::new(Arc::new(report_config(true, args.no_limits)));
        assert!(service.report(&args.to_form()).is_ok());
    }

    #[test]
    fn unknown_gender_is_rejected_at_parse_time() {
        let mut argv = REPORT_ARGS;
        argv[9] = "Unknown";
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn json_flag_is_global() {
        let cli = Cli::try_parse_from([
            "pft",
            "pef",
            "--age",
            "30",
            "--gender",
            "Male",
            "--height-cm",
            "175",
            "--json",
        ])
        .expect("arguments should parse");
        assert!(cli.json);
        assert!(matches!(cli.command, Some(Commands::Pef { .. })));
    }

    #[test]
    fn bad_enforce_flag_only_affects_report() {
        std::env::set_var("PFT_ENFORCE_INPUT_LIMITS", "maybe");

        let pef = Cli::try_parse_from([
            "pft",
            "pef",
            "--age",
            "30",
            "--gender",
            "Male",
            "--height-cm",
            "175",
        ])
        .expect("arguments should parse");
        assert!(run(pef).is_ok());

        let report = Cli::try_parse_from(REPORT_ARGS).expect("arguments should parse");
        let err = run(report).expect_err("report should reject the flag");
        assert!(err.to_string().contains("PFT_ENFORCE_INPUT_LIMITS"));

        std::env::remove_var("PFT_ENFORCE_INPUT_LIMITS");
    }

    #[test]
    fn findings_print_as_bullets() {
        let lines = vec!["Normal PFT values.".to_owned(), "second".to_owned()];
        assert_eq!(
            bullet_lines(&lines),
            vec!["- Normal PFT results.".to_owned(), "- second".to_owned()]
        );
    }
}
