use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::intake::{self, ValidationError};

/// Validated intake record. Only produced by intake validation, so every
/// numeric field is finite and inside its closed range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PatientDocument", into = "PatientDocument")]
pub struct PatientRecord {
    name: String,
    age: f64,
    weight_kg: f64,
    creatinine_umol_l: f64,
    gfr: f64,
}

impl PatientRecord {
    pub(crate) fn from_validated(
        name: String,
        age: f64,
        weight_kg: f64,
        creatinine_umol_l: f64,
        gfr: f64,
    ) -> Self {
        Self {
            name,
            age,
            weight_kg,
            creatinine_umol_l,
            gfr,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> f64 {
        self.age
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn creatinine_umol_l(&self) -> f64 {
        self.creatinine_umol_l
    }

    pub fn gfr(&self) -> f64 {
        self.gfr
    }
}

/// Export shape of [`PatientRecord`]; deserializing runs the intake checks again.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatientDocument {
    name: String,
    age: f64,
    weight_kg: f64,
    creatinine_umol_l: f64,
    gfr: f64,
}

impl TryFrom<PatientDocument> for PatientRecord {
    type Error = ValidationError;

    fn try_from(doc: PatientDocument) -> Result<Self, Self::Error> {
        intake::validate_typed(doc.name, doc.age, doc.weight_kg, doc.creatinine_umol_l, doc.gfr)
    }
}

impl From<PatientRecord> for PatientDocument {
    fn from(record: PatientRecord) -> Self {
        Self {
            name: record.name,
            age: record.age,
            weight_kg: record.weight_kg,
            creatinine_umol_l: record.creatinine_umol_l,
            gfr: record.gfr,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    pub const fn code(self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }
}

/// CHA₂DS₂-VASc age group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBucket {
    #[serde(rename = "<18")]
    Under18,
    #[serde(rename = "18-64")]
    From18To64,
    #[serde(rename = "65-74")]
    From65To74,
    #[serde(rename = "75-80")]
    From75To80,
    #[serde(rename = ">=80")]
    Over80,
}

impl AgeBucket {
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::Under18,
        AgeBucket::From18To64,
        AgeBucket::From65To74,
        AgeBucket::From75To80,
        AgeBucket::Over80,
    ];

    /// Bucket for a numeric age. Boundaries belong to the lower bucket, so
    /// 64 is `18-64` and 80 is `75-80`.
    pub fn derive(age: f64) -> Option<Self> {
        if age.is_nan() {
            return None;
        }

        let bucket = if age < 18.0 {
            AgeBucket::Under18
        } else if age <= 64.0 {
            AgeBucket::From18To64
        } else if age <= 74.0 {
            AgeBucket::From65To74
        } else if age <= 80.0 {
            AgeBucket::From75To80
        } else {
            AgeBucket::Over80
        };

        Some(bucket)
    }

    pub const fn points(self) -> u8 {
        match self {
            AgeBucket::Under18 | AgeBucket::From18To64 => 0,
            AgeBucket::From65To74 => 1,
            AgeBucket::From75To80 | AgeBucket::Over80 => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AgeBucket::Under18 => "<18",
            AgeBucket::From18To64 => "18-64",
            AgeBucket::From65To74 => "65-74",
            AgeBucket::From75To80 => "75-80",
            AgeBucket::Over80 => ">=80",
        }
    }
}

/// Drugs whose presence triggers the age/GFR/weight bleeding-risk gates.
///
/// Declaration order is the display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractingDrug {
    Amiodaron,
    Chinidin,
    Dronedaron,
    Diltiazem,
    Verapamil,
    Erythromycin,
    Naproxen,
    Fluconazol,
    Ciclosporin,
    Tacrolimus,
}

impl InteractingDrug {
    pub const ALL: [InteractingDrug; 10] = [
        InteractingDrug::Amiodaron,
        InteractingDrug::Chinidin,
        InteractingDrug::Dronedaron,
        InteractingDrug::Diltiazem,
        InteractingDrug::Verapamil,
        InteractingDrug::Erythromycin,
        InteractingDrug::Naproxen,
        InteractingDrug::Fluconazol,
        InteractingDrug::Ciclosporin,
        InteractingDrug::Tacrolimus,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            InteractingDrug::Amiodaron => "amiodaron",
            InteractingDrug::Chinidin => "chinidin",
            InteractingDrug::Dronedaron => "dronedaron",
            InteractingDrug::Diltiazem => "diltiazem",
            InteractingDrug::Verapamil => "verapamil",
            InteractingDrug::Erythromycin => "erythromycin",
            InteractingDrug::Naproxen => "naproxen",
            InteractingDrug::Fluconazol => "fluconazol",
            InteractingDrug::Ciclosporin => "ciclosporin",
            InteractingDrug::Tacrolimus => "tacrolimus",
        }
    }
}

/// Manual CHA₂DS₂-VASc selections. `age_bucket` is the clinician's explicit
/// choice; when absent the bucket is derived from the intake age.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ChadsVascSelections {
    pub age_bucket: Option<AgeBucket>,
    pub sex: Option<Sex>,
    pub chf: bool,
    pub hypertension: bool,
    pub diabetes: bool,
    pub stroke_or_tia: bool,
    pub vascular_disease: bool,
}

/// Absolute contraindications ticked by the clinician.
///
/// `pregnant_or_breastfeeding` is the value as stored by the form; it only
/// counts for female patients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ManualContraindications {
    pub active_bleeding: bool,
    pub endocarditis: bool,
    pub active_gi_ulcer: bool,
    pub liver_failure_or_coagulopathy: bool,
    pub pregnant_or_breastfeeding: bool,
    pub interacting_medication_present: bool,
}

/// Base medications that drive the PPI rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BaseMedications {
    pub aspirin: bool,
    pub clopidogrel: bool,
    pub nsaid: bool,
    pub ssri_or_snri: bool,
}

impl BaseMedications {
    pub fn any(&self) -> bool {
        self.aspirin || self.clopidogrel || self.nsaid || self.ssri_or_snri
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MedicationSelections {
    #[serde(flatten)]
    pub base: BaseMedications,
    pub interacting_drugs: BTreeSet<InteractingDrug>,
}

/// Every manual input collected after intake.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClinicalSelections {
    pub chadsvasc: ChadsVascSelections,
    pub contraindications: ManualContraindications,
    pub medications: MedicationSelections,
}
