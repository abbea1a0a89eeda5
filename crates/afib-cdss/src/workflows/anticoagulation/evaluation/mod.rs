mod chadsvasc;
mod contraindications;
mod interactions;
mod recommendation;

pub use chadsvasc::{
    score_chadsvasc, ChadsVascAssessment, ChadsVascFactor, ScoreComponent,
    ANTICOAGULATION_THRESHOLD,
};
pub use contraindications::{
    evaluate_contraindications, ContraindicationAssessment, ContraindicationReason,
    ReproductiveStatus,
};
pub use interactions::{
    evaluate_gates, evaluate_interactions, evaluate_ppi, GateEvaluation, InteractionAssessment,
    PpiEvaluation, PpiTrigger, RiskGate,
};
pub use recommendation::{synthesize_recommendation, Headline, Recommendation, Tone};

use super::domain::{ClinicalSelections, PatientRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Full derived state for one patient: the canonical export document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentBundle {
    pub patient: PatientRecord,
    pub chadsvasc: ChadsVascAssessment,
    pub contraindications: ContraindicationAssessment,
    pub interactions: InteractionAssessment,
    pub recommendation: Recommendation,
}

/// Run every stage in data-flow order. Pure; identical inputs always yield
/// an identical bundle.
pub fn assess(patient: &PatientRecord, selections: &ClinicalSelections) -> AssessmentBundle {
    let chadsvasc = score_chadsvasc(&selections.chadsvasc, Some(patient));
    let contraindications = evaluate_contraindications(
        Some(patient),
        chadsvasc.sex,
        &selections.contraindications,
    );
    let interactions = evaluate_interactions(&selections.medications, Some(patient));
    let recommendation =
        synthesize_recommendation(Some(patient), &chadsvasc, &contraindications, &interactions);

    debug!(
        score = chadsvasc.score,
        contraindicated = contraindications.absolute_contraindication,
        ppi = interactions.ppi_indicated,
        gates = interactions.any_gate_true,
        "assessment computed"
    );

    AssessmentBundle {
        patient: patient.clone(),
        chadsvasc,
        contraindications,
        interactions,
        recommendation,
    }
}
