use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::config::AuditConfig;
use crate::workflows::anticoagulation::router::{assessment_handler, intake_handler};
use crate::workflows::anticoagulation::service::{AssessmentRequest, AssessmentService};
use crate::workflows::anticoagulation::{assessment_router, Headline};

fn service() -> Arc<AssessmentService> {
    Arc::new(AssessmentService::new(AuditConfig {
        log_assessments: true,
    }))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn intake_handler_returns_record() {
    let Json(record) = intake_handler(
        State(service()),
        Json(raw_fields("Richi", 70.0, 80.0, 90.0, 60.0)),
    )
    .await
    .expect("intake succeeds");

    assert_eq!(record.name(), "Richi");
}

#[tokio::test]
async fn intake_handler_maps_validation_error_to_unprocessable() {
    let err = intake_handler(
        State(service()),
        Json(raw_fields("Richi", 130.0, 80.0, 90.0, 60.0)),
    )
    .await
    .expect_err("age out of range");

    let response = err.into_response();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["field"], "age");
}

#[tokio::test]
async fn assessment_handler_builds_bundle() {
    let request = AssessmentRequest {
        patient: raw_fields("Richi", 40.0, 80.0, 90.0, 60.0),
        selections: Default::default(),
    };

    let Json(response) = assessment_handler(State(service()), Json(request))
        .await
        .expect("assessment succeeds");

    assert_eq!(
        response.assessment.recommendation.headline,
        Headline::NotIndicated
    );
}

#[tokio::test]
async fn assessment_route_accepts_form_payload() {
    let router = assessment_router(service());
    let payload = json!({
        "patient": {
            "patient_name": "Richi",
            "age": "80",
            "patient_weight": 70,
            "patient_kreatinin": 95,
            "patient_gfr": 60
        },
        "selections": {
            "chadsvasc": { "sex": "F", "hypertension": true },
            "medications": { "interactingDrugs": ["amiodaron"] }
        }
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/assessments")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).expect("payload")))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["generatedAt"].is_string());
    assert_eq!(body["assessment"]["chadsvasc"]["score"], 4);
    assert_eq!(body["assessment"]["interactions"]["ageGate"], true);
    assert_eq!(
        body["assessment"]["interactions"]["extendedQuestionnaire"],
        true
    );
}

#[tokio::test]
async fn assessment_route_rejects_missing_patient_field() {
    let router = assessment_router(service());
    let payload = json!({
        "patient": { "patient_name": "Richi", "age": 70 }
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/assessments")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).expect("payload")))
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["field"], "patient_weight");
}
