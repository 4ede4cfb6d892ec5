//! # API REST
//!
//! REST API implementation for the PFT interpreter.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialisation, CORS, mapping errors to status codes)
//!
//! Uses `api-shared` for request/response types and `pft-core` for all computation.

#![warn(rust_2018_idioms)]

use std::sync::Arc;

use api_shared::dto;
use api_shared::HealthService;
use axum::{extract::State, http::StatusCode, response::Json, routing::get, routing::post, Router};
use pft_core::{
    CoreConfig, DiffusionInput, Ethnicity, Gender, PatientProfile, PftError, PftForm, PftInputs,
    PftService, SpirometryInput,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

type ApiError = (StatusCode, String);

/// Application state shared across REST API handlers
#[derive(Clone)]
pub struct AppState {
    pft_service: PftService,
}

impl AppState {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            pft_service: PftService::new(cfg),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(health, interpret, report, lln, pef),
    components(schemas(
        dto::HealthRes,
        dto::PatientReq,
        dto::DiffusionReq,
        dto::InterpretReq,
        dto::InterpretRes,
        dto::ReportReq,
        dto::ReportRes,
        dto::ComparisonBarRes,
        dto::LlnReq,
        dto::LlnRes,
        dto::PefReq,
        dto::PefRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with OpenAPI docs and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/interpret", post(interpret))
        .route("/report", post(report))
        .route("/lln", post(lln))
        .route("/pef", post(pef))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn bad_request(e: impl std::fmt::Display) -> ApiError {
    (StatusCode::BAD_REQUEST, e.to_string())
}

fn parse_gender(s: &str) -> Result<Gender, ApiError> {
    s.parse::<Gender>().map_err(|e| bad_request(PftError::from(e)))
}

fn parse_ethnicity(s: &str) -> Result<Ethnicity, ApiError> {
    s.parse::<Ethnicity>().map_err(|e| bad_request(PftError::from(e)))
}

fn diffusion_from_req(d: dto::DiffusionReq) -> DiffusionInput {
    DiffusionInput {
        dlco_sb: d.dlco_sb,
        dl_va: d.dl_va,
        va_sb: d.va_sb,
        ivc_sb: d.ivc_sb,
        bht_seconds: d.bht_seconds,
    }
}

fn inputs_from_req(req: dto::InterpretReq) -> Result<PftInputs, ApiError> {
    let patient = PatientProfile {
        age_years: req.patient.age_years,
        gender: parse_gender(&req.patient.gender)?,
        height_cm: req.patient.height_cm,
        ethnicity: parse_ethnicity(&req.patient.ethnicity)?,
    };
    let spirometry = SpirometryInput {
        fev1_pct_predicted: req.fev1_pct_predicted,
        fvc_pct_predicted: req.fvc_pct_predicted,
        fev1_fvc_ratio: req.fev1_fvc_ratio,
    };
    Ok(PftInputs::new(patient, spirometry).with_diffusion(diffusion_from_req(req.diffusion)))
}

fn form_from_req(req: dto::ReportReq) -> Result<PftForm, ApiError> {
    Ok(PftForm {
        age_years: req.age_years,
        weight_lbs: req.weight_lbs,
        height_inches: req.height_inches,
        gender: parse_gender(&req.gender)?,
        ethnicity: parse_ethnicity(&req.ethnicity)?,
        fev1_pct: req.fev1_pct,
        fvc_pct: req.fvc_pct,
        fev1_fvc_percent: req.fev1_fvc_percent,
        diffusion: req.diffusion.map(diffusion_from_req),
    })
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = dto::HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks.
#[axum::debug_handler]
async fn health(State(_state): State<AppState>) -> Json<dto::HealthRes> {
    Json(HealthService::check_health())
}

#[utoipa::path(
    post,
    path = "/interpret",
    request_body = dto::InterpretReq,
    responses(
        (status = 200, description = "Interpretation of normalised inputs", body = dto::InterpretRes),
        (status = 400, description = "Unknown gender or ethnicity")
    )
)]
/// Interpret normalised PFT inputs
///
/// Inputs are not range-checked here; they are expected in metric units with the FEV1/FVC
/// ratio as a fraction.
///
/// # Errors
/// Returns `400 Bad Request` if gender or ethnicity is not recognised.
#[axum::debug_handler]
async fn interpret(
    State(state): State<AppState>,
    Json(req): Json<dto::InterpretReq>,
) -> Result<Json<dto::InterpretRes>, ApiError> {
    let inputs = inputs_from_req(req)?;
    let classification = state.pft_service.classify(inputs);
    let findings = state.pft_service.interpret(inputs);

    Ok(Json(dto::InterpretRes {
        fev1_fvc_lln: classification.fev1_fvc_lln,
        patterns: classification
            .patterns
            .iter()
            .map(|p| p.as_str().to_owned())
            .collect(),
        severity: classification.severity.map(|s| s.as_str().to_owned()),
        dlco_reduced: classification.dlco_reduced,
        findings,
        generated_at: now_rfc3339(),
    }))
}

#[utoipa::path(
    post,
    path = "/report",
    request_body = dto::ReportReq,
    responses(
        (status = 200, description = "Report for a raw intake form", body = dto::ReportRes),
        (status = 400, description = "Invalid or out-of-range input")
    )
)]
/// Build a report from a raw intake form
///
/// Converts imperial units, validates against the configured limits and returns the patient
/// summary, findings, PEF estimate and chart series.
///
/// # Errors
/// Returns `400 Bad Request` if a value is out of range or a demographic is not recognised.
#[axum::debug_handler]
async fn report(
    State(state): State<AppState>,
    Json(req): Json<dto::ReportReq>,
) -> Result<Json<dto::ReportRes>, ApiError> {
    let form = form_from_req(req)?;
    let report = state.pft_service.report(&form).map_err(bad_request)?;

    Ok(Json(dto::ReportRes {
        patient_details: report.patient_details,
        findings: report.findings,
        pef: report.pef.value(),
        pef_lines: report.pef.lines(),
        comparison: report
            .comparison
            .into_iter()
            .map(|b| dto::ComparisonBarRes {
                label: b.label,
                predicted: b.predicted,
                observed: b.observed,
            })
            .collect(),
        generated_at: now_rfc3339(),
    }))
}

#[utoipa::path(
    post,
    path = "/lln",
    request_body = dto::LlnReq,
    responses(
        (status = 200, description = "Lower limit of normal", body = dto::LlnRes),
        (status = 400, description = "Unknown gender or ethnicity")
    )
)]
#[axum::debug_handler]
async fn lln(
    State(state): State<AppState>,
    Json(req): Json<dto::LlnReq>,
) -> Result<Json<dto::LlnRes>, ApiError> {
    let lln = state.pft_service.lln(
        req.parameter,
        req.age,
        parse_gender(&req.gender)?,
        req.height_cm,
        parse_ethnicity(&req.ethnicity)?,
    );
    Ok(Json(dto::LlnRes { lln }))
}

#[utoipa::path(
    post,
    path = "/pef",
    request_body = dto::PefReq,
    responses(
        (status = 200, description = "Predicted peak expiratory flow", body = dto::PefRes),
        (status = 400, description = "Unknown gender")
    )
)]
#[axum::debug_handler]
async fn pef(
    State(state): State<AppState>,
    Json(req): Json<dto::PefReq>,
) -> Result<Json<dto::PefRes>, ApiError> {
    let pef = state
        .pft_service
        .pef(req.age, parse_gender(&req.gender)?, req.height_cm);
    Ok(Json(dto::PefRes {
        pef,
        available: pef.is_some(),
    }))
}
