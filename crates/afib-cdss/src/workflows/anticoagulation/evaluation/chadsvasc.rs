use serde::{Deserialize, Serialize};

use super::super::domain::{AgeBucket, ChadsVascSelections, PatientRecord, Sex};

/// Scores at or above this value indicate anticoagulation.
pub const ANTICOAGULATION_THRESHOLD: u8 = 2;

/// CHA₂DS₂-VASc result. Score and indication are always produced together
/// by [`score_chadsvasc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChadsVascAssessment {
    pub age_bucket: Option<AgeBucket>,
    pub age_points: u8,
    pub sex: Option<Sex>,
    pub chf: bool,
    pub hypertension: bool,
    pub diabetes: bool,
    pub stroke_or_tia: bool,
    pub vascular_disease: bool,
    pub score: u8,
    pub anticoagulation_indicated: bool,
}

impl ChadsVascAssessment {
    pub fn sex_points(&self) -> u8 {
        u8::from(self.sex == Some(Sex::Female))
    }

    /// Short guidance shown next to the live score.
    pub fn advice(&self) -> &'static str {
        if self.anticoagulation_indicated {
            "Continue with contraindication assessment"
        } else {
            "No DOAK treatment indicated"
        }
    }

    /// Factors that contributed points, in scoring order.
    pub fn breakdown(&self) -> Vec<ScoreComponent> {
        let mut components = Vec::new();

        if let Some(bucket) = self.age_bucket {
            components.push(ScoreComponent {
                factor: ChadsVascFactor::Age(bucket),
                points: self.age_points,
            });
        }

        let flags = [
            (self.sex == Some(Sex::Female), ChadsVascFactor::FemaleSex, 1),
            (self.chf, ChadsVascFactor::CongestiveHeartFailure, 1),
            (self.hypertension, ChadsVascFactor::Hypertension, 1),
            (self.diabetes, ChadsVascFactor::Diabetes, 1),
            (self.stroke_or_tia, ChadsVascFactor::StrokeOrTia, 2),
            (self.vascular_disease, ChadsVascFactor::VascularDisease, 1),
        ];
        components.extend(
            flags
                .into_iter()
                .filter(|(present, _, _)| *present)
                .map(|(_, factor, points)| ScoreComponent { factor, points }),
        );

        components.retain(|component| component.points > 0);
        components
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChadsVascFactor {
    Age(AgeBucket),
    FemaleSex,
    CongestiveHeartFailure,
    Hypertension,
    Diabetes,
    StrokeOrTia,
    VascularDisease,
}

impl ChadsVascFactor {
    pub fn label(&self) -> String {
        match self {
            ChadsVascFactor::Age(bucket) => format!("Age {}", bucket.label()),
            ChadsVascFactor::FemaleSex => "Female sex".to_string(),
            ChadsVascFactor::CongestiveHeartFailure => "Congestive heart failure".to_string(),
            ChadsVascFactor::Hypertension => "Hypertension".to_string(),
            ChadsVascFactor::Diabetes => "Diabetes mellitus".to_string(),
            ChadsVascFactor::StrokeOrTia => "Stroke / TIA / thromboembolism".to_string(),
            ChadsVascFactor::VascularDisease => "Vascular disease".to_string(),
        }
    }
}

/// Single contribution to the score, for audit display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ChadsVascFactor,
    pub points: u8,
}

/// Score the CHA₂DS₂-VASc selections. A manual age bucket wins over the one
/// derived from the intake age; with neither, age contributes nothing.
pub fn score_chadsvasc(
    selections: &ChadsVascSelections,
    patient: Option<&PatientRecord>,
) -> ChadsVascAssessment {
    let age_bucket = selections
        .age_bucket
        .or_else(|| patient.and_then(|record| AgeBucket::derive(record.age())));
    let age_points = age_bucket.map(AgeBucket::points).unwrap_or(0);

    let score = age_points
        + u8::from(selections.sex == Some(Sex::Female))
        + u8::from(selections.chf)
        + u8::from(selections.hypertension)
        + u8::from(selections.diabetes)
        + 2 * u8::from(selections.stroke_or_tia)
        + u8::from(selections.vascular_disease);

    ChadsVascAssessment {
        age_bucket,
        age_points,
        sex: selections.sex,
        chf: selections.chf,
        hypertension: selections.hypertension,
        diabetes: selections.diabetes,
        stroke_or_tia: selections.stroke_or_tia,
        vascular_disease: selections.vascular_disease,
        score,
        anticoagulation_indicated: score >= ANTICOAGULATION_THRESHOLD,
    }
}
