use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::super::domain::{BaseMedications, InteractingDrug, MedicationSelections, PatientRecord};

const AGE_GATE_YEARS: f64 = 75.0;
const GFR_GATE: f64 = 50.0;
const WEIGHT_GATE_KG: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PpiTrigger {
    DualAntiplateletTherapy,
    Nsaid,
    SsriOrSnri,
}

impl PpiTrigger {
    pub const fn label(self) -> &'static str {
        match self {
            PpiTrigger::DualAntiplateletTherapy => "dual antiplatelet therapy",
            PpiTrigger::Nsaid => "NSAID",
            PpiTrigger::SsriOrSnri => "SSRI/SNRI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskGate {
    Age,
    Gfr,
    Weight,
}

impl RiskGate {
    pub const fn label(self) -> &'static str {
        match self {
            RiskGate::Age => "age ≥75",
            RiskGate::Gfr => "GFR <50",
            RiskGate::Weight => "weight ≤60kg",
        }
    }
}

/// Outcome of the base-medication PPI rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PpiEvaluation {
    pub dual_antiplatelet_therapy: bool,
    pub ppi_indicated: bool,
}

pub fn evaluate_ppi(base: &BaseMedications) -> PpiEvaluation {
    let dual_antiplatelet_therapy = base.aspirin && base.clopidogrel;
    PpiEvaluation {
        dual_antiplatelet_therapy,
        ppi_indicated: dual_antiplatelet_therapy || base.nsaid || base.ssri_or_snri,
    }
}

/// Bleeding-risk gates. All false unless an interacting drug is present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateEvaluation {
    pub age: bool,
    pub gfr: bool,
    pub weight: bool,
}

impl GateEvaluation {
    pub fn any(&self) -> bool {
        self.age || self.gfr || self.weight
    }
}

/// Evaluate the gates for the selected interacting drugs. The patient is
/// only consulted when at least one drug is selected; a missing reading
/// fails its gate.
pub fn evaluate_gates(
    drugs: &BTreeSet<InteractingDrug>,
    patient: Option<&PatientRecord>,
) -> GateEvaluation {
    if drugs.is_empty() {
        return GateEvaluation::default();
    }

    let age = patient.map(PatientRecord::age);
    let gfr = patient.map(PatientRecord::gfr);
    let weight = patient.map(PatientRecord::weight_kg);

    GateEvaluation {
        age: age.is_some_and(|value| value >= AGE_GATE_YEARS),
        gfr: gfr.is_some_and(|value| value < GFR_GATE),
        weight: weight.is_some_and(|value| value <= WEIGHT_GATE_KG),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionAssessment {
    pub aspirin: bool,
    pub clopidogrel: bool,
    pub nsaid: bool,
    pub ssri_or_snri: bool,
    pub dual_antiplatelet_therapy: bool,
    pub ppi_indicated: bool,
    pub interacting_drugs: Vec<InteractingDrug>,
    pub any_interacting_drug: bool,
    pub age_gate: bool,
    pub gfr_gate: bool,
    pub weight_gate: bool,
    pub any_gate_true: bool,
    /// The extended bleeding-risk questionnaire should be shown.
    pub extended_questionnaire: bool,
}

impl InteractionAssessment {
    pub fn base_medications(&self) -> BaseMedications {
        BaseMedications {
            aspirin: self.aspirin,
            clopidogrel: self.clopidogrel,
            nsaid: self.nsaid,
            ssri_or_snri: self.ssri_or_snri,
        }
    }

    pub fn ppi_triggers(&self) -> Vec<PpiTrigger> {
        let mut triggers = Vec::new();
        if self.dual_antiplatelet_therapy {
            triggers.push(PpiTrigger::DualAntiplateletTherapy);
        }
        if self.nsaid {
            triggers.push(PpiTrigger::Nsaid);
        }
        if self.ssri_or_snri {
            triggers.push(PpiTrigger::SsriOrSnri);
        }
        triggers
    }

    pub fn ppi_label(&self) -> &'static str {
        if self.ppi_indicated {
            "PPI Recommended"
        } else {
            "Not Recommended"
        }
    }

    /// Gate display is suppressed when no interacting drug is selected.
    pub fn gates_visible(&self) -> bool {
        self.any_interacting_drug
    }

    pub fn positive_gates(&self) -> Vec<RiskGate> {
        [
            (self.age_gate, RiskGate::Age),
            (self.gfr_gate, RiskGate::Gfr),
            (self.weight_gate, RiskGate::Weight),
        ]
        .into_iter()
        .filter_map(|(fired, gate)| fired.then_some(gate))
        .collect()
    }
}

pub fn evaluate_interactions(
    medications: &MedicationSelections,
    patient: Option<&PatientRecord>,
) -> InteractionAssessment {
    let base = medications.base;
    let ppi = evaluate_ppi(&base);
    let gates = evaluate_gates(&medications.interacting_drugs, patient);
    let any_interacting_drug = !medications.interacting_drugs.is_empty();

    InteractionAssessment {
        aspirin: base.aspirin,
        clopidogrel: base.clopidogrel,
        nsaid: base.nsaid,
        ssri_or_snri: base.ssri_or_snri,
        dual_antiplatelet_therapy: ppi.dual_antiplatelet_therapy,
        ppi_indicated: ppi.ppi_indicated,
        interacting_drugs: medications.interacting_drugs.iter().copied().collect(),
        any_interacting_drug,
        age_gate: gates.age,
        gfr_gate: gates.gfr,
        weight_gate: gates.weight,
        any_gate_true: gates.any(),
        extended_questionnaire: any_interacting_drug && gates.any(),
    }
}
