//! Anticoagulation decision rules for atrial fibrillation.
//!
//! Data flows forward through pure stages: intake validation, CHA₂DS₂-VASc
//! scoring, contraindication evaluation, interaction and PPI evaluation, and
//! the final recommendation. [`assess`] runs all of them in one call;
//! [`AssessmentSession`] wraps them for an interactive front end.

pub mod domain;
pub mod evaluation;
pub mod intake;
pub mod router;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use domain::{
    AgeBucket, BaseMedications, ChadsVascSelections, ClinicalSelections, InteractingDrug,
    ManualContraindications, MedicationSelections, PatientRecord, Sex,
};
pub use evaluation::{
    assess, evaluate_contraindications, evaluate_gates, evaluate_interactions, evaluate_ppi,
    score_chadsvasc, synthesize_recommendation, AssessmentBundle, ChadsVascAssessment,
    ChadsVascFactor, ContraindicationAssessment, ContraindicationReason, GateEvaluation, Headline,
    InteractionAssessment, PpiEvaluation, PpiTrigger, Recommendation, ReproductiveStatus, RiskGate,
    ScoreComponent, Tone, ANTICOAGULATION_THRESHOLD,
};
pub use intake::{normalize_patient, PatientField, RawPatientFields, RawValue, ValidationError};
pub use router::assessment_router;
pub use service::{AssessmentRequest, AssessmentResponse, AssessmentService};
pub use session::{AssessmentSession, BaseMedication, Condition, ContraindicationFlag};
