use crate::workflows::anticoagulation::domain::PatientRecord;
use crate::workflows::anticoagulation::intake::{normalize_patient, RawPatientFields, RawValue};

pub(super) fn raw_fields(
    name: &str,
    age: f64,
    weight: f64,
    creatinine: f64,
    gfr: f64,
) -> RawPatientFields {
    RawPatientFields {
        patient_name: Some(RawValue::from(name)),
        age: Some(RawValue::from(age)),
        patient_weight: Some(RawValue::from(weight)),
        patient_kreatinin: Some(RawValue::from(creatinine)),
        patient_gfr: Some(RawValue::from(gfr)),
    }
}

pub(super) fn patient_with(age: f64, weight: f64, gfr: f64) -> PatientRecord {
    normalize_patient(&raw_fields("Richi", age, weight, 80.0, gfr)).expect("valid patient")
}

pub(super) fn patient() -> PatientRecord {
    patient_with(60.0, 80.0, 90.0)
}
