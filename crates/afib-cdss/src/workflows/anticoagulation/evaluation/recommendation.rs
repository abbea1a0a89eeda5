use serde::{Deserialize, Serialize};

use super::super::domain::PatientRecord;
use super::chadsvasc::{ChadsVascAssessment, ANTICOAGULATION_THRESHOLD};
use super::contraindications::ContraindicationAssessment;
use super::interactions::InteractionAssessment;

const RENAL_CAUTION_GFR: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Ok,
    Warn,
}

/// Headline verdict, first matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Headline {
    Contraindicated,
    Recommend,
    Consider,
    NotIndicated,
}

impl Headline {
    pub const fn text(self) -> &'static str {
        match self {
            Headline::Contraindicated => {
                "Absolute contraindication(s) present. Anticoagulation likely NOT appropriate until addressed."
            }
            Headline::Recommend => {
                "Recommend anticoagulation (e.g., DOAC) unless other risks prevail. Consider shared decision-making."
            }
            Headline::Consider => {
                "Consider anticoagulation based on patient values and bleeding risk."
            }
            Headline::NotIndicated => {
                "Anticoagulation generally not indicated; re-evaluate if risk profile changes."
            }
        }
    }

    pub const fn tone(self) -> Tone {
        match self {
            Headline::Contraindicated => Tone::Warn,
            Headline::Recommend | Headline::Consider | Headline::NotIndicated => Tone::Ok,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub headline: Headline,
    pub text: String,
    pub tone: Tone,
    pub notes: Vec<String>,
}

impl Recommendation {
    pub fn summary(&self) -> String {
        if self.notes.is_empty() {
            self.text.clone()
        } else {
            format!("{} {}", self.text, self.notes.join(" "))
        }
    }
}

pub(crate) fn decide_headline(
    chadsvasc: &ChadsVascAssessment,
    contraindications: &ContraindicationAssessment,
) -> Headline {
    if contraindications.absolute_contraindication {
        return Headline::Contraindicated;
    }

    match chadsvasc.score {
        score if score >= ANTICOAGULATION_THRESHOLD => Headline::Recommend,
        1 => Headline::Consider,
        _ => Headline::NotIndicated,
    }
}

/// Combine the stage outputs into the final recommendation and its notes.
pub fn synthesize_recommendation(
    patient: Option<&PatientRecord>,
    chadsvasc: &ChadsVascAssessment,
    contraindications: &ContraindicationAssessment,
    interactions: &InteractionAssessment,
) -> Recommendation {
    let headline = decide_headline(chadsvasc, contraindications);
    let mut notes = Vec::new();

    if patient.is_some_and(|record| record.gfr() < RENAL_CAUTION_GFR) {
        notes.push("Impaired renal function — check DOAC dose/choice.".to_string());
    }

    let base = interactions.base_medications();
    if base.any() {
        let meds: Vec<&str> = [
            (base.aspirin, "Aspirin"),
            (base.clopidogrel, "Clopidogrel"),
            (base.nsaid, "NSAID"),
            (base.ssri_or_snri, "SSRI/SNRI"),
        ]
        .into_iter()
        .filter_map(|(taken, name)| taken.then_some(name))
        .collect();
        notes.push(format!("Concomitant meds: {}.", meds.join(", ")));
    }

    if !interactions.interacting_drugs.is_empty() {
        let drugs: Vec<&str> = interactions
            .interacting_drugs
            .iter()
            .map(|drug| drug.name())
            .collect();
        notes.push(format!("Other interacting drugs: {}.", drugs.join(", ")));
    }

    if interactions.ppi_indicated {
        let reasons: Vec<&str> = interactions
            .ppi_triggers()
            .into_iter()
            .map(|trigger| trigger.label())
            .collect();
        notes.push(format!("PPI recommended ({}).", reasons.join(", ")));
    } else {
        notes.push("PPI not routinely indicated from current inputs.".to_string());
    }

    if interactions.any_interacting_drug {
        let gates: Vec<&str> = interactions
            .positive_gates()
            .into_iter()
            .map(|gate| gate.label())
            .collect();
        if !gates.is_empty() {
            notes.push(format!("Risk gates positive: {}.", gates.join(", ")));
        }
    }

    Recommendation {
        headline,
        text: headline.text().to_string(),
        tone: headline.tone(),
        notes,
    }
}
