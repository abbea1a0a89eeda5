use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AuditConfig;

use super::domain::{ClinicalSelections, PatientRecord};
use super::evaluation::{assess, AssessmentBundle};
use super::intake::{normalize_patient, RawPatientFields, ValidationError};

/// Raw intake plus every manual selection, as posted by a form front end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub patient: RawPatientFields,
    #[serde(default)]
    pub selections: ClinicalSelections,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResponse {
    pub generated_at: DateTime<Utc>,
    pub assessment: AssessmentBundle,
}

/// Entry point shared by the HTTP router and the CLI.
#[derive(Debug, Clone, Default)]
pub struct AssessmentService {
    audit: AuditConfig,
}

impl AssessmentService {
    pub fn new(audit: AuditConfig) -> Self {
        Self { audit }
    }

    pub fn intake(&self, raw: &RawPatientFields) -> Result<PatientRecord, ValidationError> {
        normalize_patient(raw)
    }

    pub fn assess(&self, request: &AssessmentRequest) -> Result<AssessmentBundle, ValidationError> {
        let patient = normalize_patient(&request.patient)?;
        let bundle = assess(&patient, &request.selections);

        if self.audit.log_assessments {
            info!(
                score = bundle.chadsvasc.score,
                headline = ?bundle.recommendation.headline,
                tone = ?bundle.recommendation.tone,
                reasons = bundle.contraindications.reasons.len(),
                extended_questionnaire = bundle.interactions.extended_questionnaire,
                "assessment issued"
            );
        }

        Ok(bundle)
    }

    pub fn respond(
        &self,
        request: &AssessmentRequest,
    ) -> Result<AssessmentResponse, ValidationError> {
        Ok(AssessmentResponse {
            generated_at: Utc::now(),
            assessment: self.assess(request)?,
        })
    }
}
