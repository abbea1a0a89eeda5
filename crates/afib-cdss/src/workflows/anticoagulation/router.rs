use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use crate::error::AppError;

use super::domain::PatientRecord;
use super::intake::RawPatientFields;
use super::service::{AssessmentRequest, AssessmentResponse, AssessmentService};

/// Router exposing intake validation and full assessments.
pub fn assessment_router(service: Arc<AssessmentService>) -> Router {
    Router::new()
        .route("/api/v1/intake", post(intake_handler))
        .route("/api/v1/assessments", post(assessment_handler))
        .with_state(service)
}

pub(crate) async fn intake_handler(
    State(service): State<Arc<AssessmentService>>,
    Json(raw): Json<RawPatientFields>,
) -> Result<Json<PatientRecord>, AppError> {
    Ok(Json(service.intake(&raw)?))
}

pub(crate) async fn assessment_handler(
    State(service): State<Arc<AssessmentService>>,
    Json(request): Json<AssessmentRequest>,
) -> Result<Json<AssessmentResponse>, AppError> {
    Ok(Json(service.respond(&request)?))
}
