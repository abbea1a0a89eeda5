use super::domain::{AgeBucket, ClinicalSelections, InteractingDrug, PatientRecord, Sex};
use super::evaluation::{assess, score_chadsvasc, AssessmentBundle, ChadsVascAssessment};
use super::intake::{normalize_patient, RawPatientFields, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    CongestiveHeartFailure,
    Hypertension,
    Diabetes,
    StrokeOrTia,
    VascularDisease,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContraindicationFlag {
    ActiveBleeding,
    Endocarditis,
    ActiveGiUlcer,
    LiverFailureOrCoagulopathy,
    PregnantOrBreastfeeding,
    InteractingMedication,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BaseMedication {
    Aspirin,
    Clopidogrel,
    Nsaid,
    SsriOrSnri,
}

/// Mutable questionnaire state owned by a presentation layer.
///
/// Every setter leaves the session consistent; [`AssessmentSession::snapshot`]
/// recomputes the whole bundle from scratch.
#[derive(Debug, Clone, Default)]
pub struct AssessmentSession {
    patient: Option<PatientRecord>,
    selections: ClinicalSelections,
}

impl AssessmentSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the intake record. A rejected submission keeps the previous record.
    pub fn submit_patient(
        &mut self,
        raw: &RawPatientFields,
    ) -> Result<&PatientRecord, ValidationError> {
        let record = normalize_patient(raw)?;
        Ok(self.patient.insert(record))
    }

    pub fn patient(&self) -> Option<&PatientRecord> {
        self.patient.as_ref()
    }

    pub fn selections(&self) -> &ClinicalSelections {
        &self.selections
    }

    /// `None` clears the manual choice and falls back to the intake age.
    pub fn select_age_bucket(&mut self, bucket: Option<AgeBucket>) {
        self.selections.chadsvasc.age_bucket = bucket;
    }

    /// Switching away from female clears the stored pregnancy flag.
    pub fn select_sex(&mut self, sex: Sex) {
        if sex != Sex::Female {
            self.selections.contraindications.pregnant_or_breastfeeding = false;
        }
        self.selections.chadsvasc.sex = Some(sex);
    }

    pub fn set_condition(&mut self, condition: Condition, present: bool) {
        let chadsvasc = &mut self.selections.chadsvasc;
        match condition {
            Condition::CongestiveHeartFailure => chadsvasc.chf = present,
            Condition::Hypertension => chadsvasc.hypertension = present,
            Condition::Diabetes => chadsvasc.diabetes = present,
            Condition::StrokeOrTia => chadsvasc.stroke_or_tia = present,
            Condition::VascularDisease => chadsvasc.vascular_disease = present,
        }
    }

    /// The pregnancy flag can only be ticked for a female patient.
    pub fn set_contraindication(&mut self, flag: ContraindicationFlag, present: bool) {
        let female = self.selections.chadsvasc.sex == Some(Sex::Female);
        let manual = &mut self.selections.contraindications;
        match flag {
            ContraindicationFlag::ActiveBleeding => manual.active_bleeding = present,
            ContraindicationFlag::Endocarditis => manual.endocarditis = present,
            ContraindicationFlag::ActiveGiUlcer => manual.active_gi_ulcer = present,
            ContraindicationFlag::LiverFailureOrCoagulopathy => {
                manual.liver_failure_or_coagulopathy = present
            }
            ContraindicationFlag::PregnantOrBreastfeeding => {
                manual.pregnant_or_breastfeeding = present && female
            }
            ContraindicationFlag::InteractingMedication => {
                manual.interacting_medication_present = present
            }
        }
    }

    pub fn set_base_medication(&mut self, medication: BaseMedication, taken: bool) {
        let base = &mut self.selections.medications.base;
        match medication {
            BaseMedication::Aspirin => base.aspirin = taken,
            BaseMedication::Clopidogrel => base.clopidogrel = taken,
            BaseMedication::Nsaid => base.nsaid = taken,
            BaseMedication::SsriOrSnri => base.ssri_or_snri = taken,
        }
    }

    pub fn set_interacting_drug(&mut self, drug: InteractingDrug, taken: bool) {
        let drugs = &mut self.selections.medications.interacting_drugs;
        if taken {
            drugs.insert(drug);
        } else {
            drugs.remove(&drug);
        }
    }

    /// Clear every medication on the interactions step.
    pub fn reset_interactions(&mut self) {
        self.selections.medications = Default::default();
    }

    /// Live score for the stroke-risk step, usable before intake completes.
    pub fn chadsvasc_preview(&self) -> ChadsVascAssessment {
        score_chadsvasc(&self.selections.chadsvasc, self.patient.as_ref())
    }

    /// `None` until a patient record has been accepted.
    pub fn snapshot(&self) -> Option<AssessmentBundle> {
        self.patient
            .as_ref()
            .map(|patient| assess(patient, &self.selections))
    }
}
