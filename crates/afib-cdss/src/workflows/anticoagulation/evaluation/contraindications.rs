use serde::{Deserialize, Serialize};

use super::super::domain::{ManualContraindications, PatientRecord, Sex};

const MINIMUM_AGE: f64 = 18.0;
const RENAL_FAILURE_GFR: f64 = 15.0;

/// Sex-gated view of the pregnancy flag. Only the female variant carries it,
/// so a flag stored for any other patient cannot reach the verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReproductiveStatus {
    NotApplicable,
    Female { pregnant_or_breastfeeding: bool },
}

impl ReproductiveStatus {
    pub fn gate(sex: Option<Sex>, stored_flag: bool) -> Self {
        match sex {
            Some(Sex::Female) => ReproductiveStatus::Female {
                pregnant_or_breastfeeding: stored_flag,
            },
            Some(Sex::Male) | None => ReproductiveStatus::NotApplicable,
        }
    }

    pub fn pregnant_or_breastfeeding(self) -> bool {
        matches!(
            self,
            ReproductiveStatus::Female {
                pregnant_or_breastfeeding: true
            }
        )
    }
}

/// Absolute contraindications, in the order they are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContraindicationReason {
    #[serde(rename = "Patient is under 18 years old")]
    UnderAge18,
    #[serde(rename = "Renal failure (GFR < 15)")]
    RenalFailure,
    #[serde(rename = "Active bleeding")]
    ActiveBleeding,
    #[serde(rename = "Acute bacterial endocarditis")]
    Endocarditis,
    #[serde(rename = "Active gastrointestinal ulcer")]
    ActiveGiUlcer,
    #[serde(rename = "Liver failure CHILD C or liver disease with coagulopathy")]
    LiverFailureOrCoagulopathy,
    #[serde(rename = "Pregnant or breastfeeding")]
    PregnantOrBreastfeeding,
    #[serde(rename = "Interacting medication present")]
    InteractingMedication,
}

impl ContraindicationReason {
    pub const fn text(self) -> &'static str {
        match self {
            ContraindicationReason::UnderAge18 => "Patient is under 18 years old",
            ContraindicationReason::RenalFailure => "Renal failure (GFR < 15)",
            ContraindicationReason::ActiveBleeding => "Active bleeding",
            ContraindicationReason::Endocarditis => "Acute bacterial endocarditis",
            ContraindicationReason::ActiveGiUlcer => "Active gastrointestinal ulcer",
            ContraindicationReason::LiverFailureOrCoagulopathy => {
                "Liver failure CHILD C or liver disease with coagulopathy"
            }
            ContraindicationReason::PregnantOrBreastfeeding => "Pregnant or breastfeeding",
            ContraindicationReason::InteractingMedication => "Interacting medication present",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContraindicationAssessment {
    pub sex: Option<Sex>,
    pub active_bleeding: bool,
    pub endocarditis: bool,
    pub active_gi_ulcer: bool,
    pub liver_failure_or_coagulopathy: bool,
    /// False unless the patient is female.
    pub pregnant_or_breastfeeding: bool,
    pub interacting_medication_present: bool,
    pub under_age_18: bool,
    pub renal_failure: bool,
    pub absolute_contraindication: bool,
    pub reasons: Vec<ContraindicationReason>,
}

impl ContraindicationAssessment {
    pub fn eligible(&self) -> bool {
        !self.absolute_contraindication
    }

    pub fn verdict(&self) -> &'static str {
        if self.absolute_contraindication {
            "Patient is NOT eligible for DOAC therapy."
        } else {
            "No contraindications detected. Patient is eligible for DOAC therapy."
        }
    }

    pub fn reason_texts(&self) -> Vec<&'static str> {
        self.reasons.iter().map(|reason| reason.text()).collect()
    }
}

/// Combine the age/renal flags derived from intake with the manual ticks.
/// A missing age or GFR leaves its derived flag false.
pub fn evaluate_contraindications(
    patient: Option<&PatientRecord>,
    sex: Option<Sex>,
    manual: &ManualContraindications,
) -> ContraindicationAssessment {
    let under_age_18 = patient.is_some_and(|record| record.age() < MINIMUM_AGE);
    let renal_failure = patient.is_some_and(|record| record.gfr() < RENAL_FAILURE_GFR);
    let reproductive = ReproductiveStatus::gate(sex, manual.pregnant_or_breastfeeding);

    let checks = [
        (under_age_18, ContraindicationReason::UnderAge18),
        (renal_failure, ContraindicationReason::RenalFailure),
        (manual.active_bleeding, ContraindicationReason::ActiveBleeding),
        (manual.endocarditis, ContraindicationReason::Endocarditis),
        (manual.active_gi_ulcer, ContraindicationReason::ActiveGiUlcer),
        (
            manual.liver_failure_or_coagulopathy,
            ContraindicationReason::LiverFailureOrCoagulopathy,
        ),
        (
            reproductive.pregnant_or_breastfeeding(),
            ContraindicationReason::PregnantOrBreastfeeding,
        ),
        (
            manual.interacting_medication_present,
            ContraindicationReason::InteractingMedication,
        ),
    ];

    let reasons: Vec<ContraindicationReason> = checks
        .into_iter()
        .filter_map(|(fired, reason)| fired.then_some(reason))
        .collect();

    ContraindicationAssessment {
        sex,
        active_bleeding: manual.active_bleeding,
        endocarditis: manual.endocarditis,
        active_gi_ulcer: manual.active_gi_ulcer,
        liver_failure_or_coagulopathy: manual.liver_failure_or_coagulopathy,
        pregnant_or_breastfeeding: reproductive.pregnant_or_breastfeeding(),
        interacting_medication_present: manual.interacting_medication_present,
        under_age_18,
        renal_failure,
        absolute_contraindication: !reasons.is_empty(),
        reasons,
    }
}
