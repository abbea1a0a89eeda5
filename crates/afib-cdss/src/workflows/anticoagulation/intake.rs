use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::PatientRecord;

/// The five intake inputs with their wire keys and accepted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatientField {
    Name,
    Age,
    Weight,
    Creatinine,
    Gfr,
}

impl PatientField {
    /// Check order for missing values and ranges.
    pub const ALL: [PatientField; 5] = [
        PatientField::Name,
        PatientField::Age,
        PatientField::Weight,
        PatientField::Creatinine,
        PatientField::Gfr,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            PatientField::Name => "patient_name",
            PatientField::Age => "age",
            PatientField::Weight => "patient_weight",
            PatientField::Creatinine => "patient_kreatinin",
            PatientField::Gfr => "patient_gfr",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            PatientField::Name => "Patient name",
            PatientField::Age => "Age",
            PatientField::Weight => "Weight",
            PatientField::Creatinine => "Kreatinin",
            PatientField::Gfr => "GFR",
        }
    }

    /// Closed `(min, max)` range for numeric fields.
    pub const fn bounds(self) -> Option<(f64, f64)> {
        match self {
            PatientField::Name => None,
            PatientField::Age => Some((0.0, 120.0)),
            PatientField::Weight => Some((0.0, 300.0)),
            PatientField::Creatinine => Some((30.0, 120.0)),
            PatientField::Gfr => Some((0.0, 120.0)),
        }
    }

    const fn unit_suffix(self) -> &'static str {
        match self {
            PatientField::Creatinine => " µmol/l",
            _ => "",
        }
    }
}

/// Rejected intake, naming the first field that failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill all patient fields ({} is missing).", .0.key())]
    Missing(PatientField),
    #[error("Patient name cannot contain whitespace.")]
    NameContainsWhitespace,
    #[error("{} must be between {} and {}{}.", .field.label(), .min, .max, .field.unit_suffix())]
    OutOfRange {
        field: PatientField,
        min: f64,
        max: f64,
    },
}

impl ValidationError {
    pub fn field(&self) -> PatientField {
        match self {
            ValidationError::Missing(field) => *field,
            ValidationError::NameContainsWhitespace => PatientField::Name,
            ValidationError::OutOfRange { field, .. } => *field,
        }
    }
}

/// Form value as submitted: either a JSON number or free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

impl RawValue {
    fn is_blank(&self) -> bool {
        matches!(self, RawValue::Text(text) if text.trim().is_empty())
    }

    fn as_text(&self) -> String {
        match self {
            RawValue::Number(value) => value.to_string(),
            RawValue::Text(text) => text.clone(),
        }
    }

    /// Unparseable text becomes NaN, which then fails every range check.
    fn as_number(&self) -> f64 {
        match self {
            RawValue::Number(value) => *value,
            RawValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .unwrap_or(f64::NAN),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

/// Unvalidated intake fields, keyed the way the questionnaire form names them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPatientFields {
    pub patient_name: Option<RawValue>,
    pub age: Option<RawValue>,
    pub patient_weight: Option<RawValue>,
    pub patient_kreatinin: Option<RawValue>,
    pub patient_gfr: Option<RawValue>,
}

impl RawPatientFields {
    pub fn get(&self, field: PatientField) -> Option<&RawValue> {
        match field {
            PatientField::Name => self.patient_name.as_ref(),
            PatientField::Age => self.age.as_ref(),
            PatientField::Weight => self.patient_weight.as_ref(),
            PatientField::Creatinine => self.patient_kreatinin.as_ref(),
            PatientField::Gfr => self.patient_gfr.as_ref(),
        }
    }

    fn present(&self, field: PatientField) -> Result<&RawValue, ValidationError> {
        self.get(field)
            .filter(|value| !value.is_blank())
            .ok_or(ValidationError::Missing(field))
    }
}

/// Validate and coerce raw intake fields into a [`PatientRecord`].
pub fn normalize_patient(raw: &RawPatientFields) -> Result<PatientRecord, ValidationError> {
    let result = coerce(raw);
    match &result {
        Ok(_) => debug!("patient intake accepted"),
        Err(err) => warn!(field = err.field().key(), "patient intake rejected"),
    }
    result
}

fn coerce(raw: &RawPatientFields) -> Result<PatientRecord, ValidationError> {
    for field in PatientField::ALL {
        raw.present(field)?;
    }

    let name = raw.present(PatientField::Name)?.as_text();
    let age = raw.present(PatientField::Age)?.as_number();
    let weight = raw.present(PatientField::Weight)?.as_number();
    let creatinine = raw.present(PatientField::Creatinine)?.as_number();
    let gfr = raw.present(PatientField::Gfr)?.as_number();

    validate_typed(name, age, weight, creatinine, gfr)
}

pub(crate) fn validate_typed(
    name: String,
    age: f64,
    weight_kg: f64,
    creatinine_umol_l: f64,
    gfr: f64,
) -> Result<PatientRecord, ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::Missing(PatientField::Name));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(ValidationError::NameContainsWhitespace);
    }

    check_range(PatientField::Age, age)?;
    check_range(PatientField::Weight, weight_kg)?;
    check_range(PatientField::Creatinine, creatinine_umol_l)?;
    check_range(PatientField::Gfr, gfr)?;

    Ok(PatientRecord::from_validated(
        name,
        age,
        weight_kg,
        creatinine_umol_l,
        gfr,
    ))
}

fn check_range(field: PatientField, value: f64) -> Result<(), ValidationError> {
    let Some((min, max)) = field.bounds() else {
        return Ok(());
    };

    // NaN fails both comparisons.
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, min, max })
    }
}
