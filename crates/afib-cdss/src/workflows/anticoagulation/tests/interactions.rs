use std::collections::BTreeSet;

use super::common::*;
use crate::workflows::anticoagulation::domain::{
    BaseMedications, InteractingDrug, MedicationSelections,
};
use crate::workflows::anticoagulation::evaluation::{
    evaluate_gates, evaluate_interactions, evaluate_ppi, PpiTrigger, RiskGate,
};

fn drugs(list: &[InteractingDrug]) -> BTreeSet<InteractingDrug> {
    list.iter().copied().collect()
}

#[test]
fn ppi_rule_holds_for_all_base_combinations() {
    for mask in 0u8..16 {
        let bit = |n: u8| mask & (1 << n) != 0;
        let base = BaseMedications {
            aspirin: bit(0),
            clopidogrel: bit(1),
            nsaid: bit(2),
            ssri_or_snri: bit(3),
        };

        let ppi = evaluate_ppi(&base);

        assert_eq!(ppi.dual_antiplatelet_therapy, base.aspirin && base.clopidogrel);
        assert_eq!(
            ppi.ppi_indicated,
            ppi.dual_antiplatelet_therapy || base.nsaid || base.ssri_or_snri,
            "mask {mask:04b}"
        );
    }
}

#[test]
fn dual_antiplatelet_therapy_indicates_ppi() {
    let medications = MedicationSelections {
        base: BaseMedications {
            aspirin: true,
            clopidogrel: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let assessment = evaluate_interactions(&medications, Some(&patient()));

    assert!(assessment.dual_antiplatelet_therapy);
    assert!(assessment.ppi_indicated);
    assert_eq!(
        assessment.ppi_triggers(),
        vec![PpiTrigger::DualAntiplateletTherapy]
    );
    assert_eq!(assessment.ppi_label(), "PPI Recommended");
}

#[test]
fn single_antiplatelet_does_not_indicate_ppi() {
    let medications = MedicationSelections {
        base: BaseMedications {
            aspirin: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let assessment = evaluate_interactions(&medications, Some(&patient()));

    assert!(!assessment.dual_antiplatelet_therapy);
    assert!(!assessment.ppi_indicated);
    assert_eq!(assessment.ppi_label(), "Not Recommended");
}

#[test]
fn gates_stay_closed_without_interacting_drug() {
    let frail = patient_with(90.0, 40.0, 20.0);

    let gates = evaluate_gates(&BTreeSet::new(), Some(&frail));
    assert!(!gates.any());

    let assessment = evaluate_interactions(&MedicationSelections::default(), Some(&frail));
    assert!(!assessment.any_interacting_drug);
    assert!(!assessment.age_gate);
    assert!(!assessment.gfr_gate);
    assert!(!assessment.weight_gate);
    assert!(!assessment.any_gate_true);
    assert!(!assessment.gates_visible());
    assert!(!assessment.extended_questionnaire);
}

#[test]
fn amiodaron_in_eighty_year_old_opens_age_gate() {
    let patient = patient_with(80.0, 70.0, 60.0);
    let medications = MedicationSelections {
        interacting_drugs: drugs(&[InteractingDrug::Amiodaron]),
        ..Default::default()
    };

    let assessment = evaluate_interactions(&medications, Some(&patient));

    assert!(assessment.any_interacting_drug);
    assert!(assessment.age_gate);
    assert!(!assessment.gfr_gate);
    assert!(!assessment.weight_gate);
    assert!(assessment.any_gate_true);
    assert!(assessment.extended_questionnaire);
    assert_eq!(assessment.positive_gates(), vec![RiskGate::Age]);
}

#[test]
fn gate_comparisons_match_thresholds() {
    let selected = drugs(&[InteractingDrug::Verapamil]);

    let at_threshold = patient_with(75.0, 60.0, 50.0);
    let gates = evaluate_gates(&selected, Some(&at_threshold));
    assert!(gates.age, "age >= 75");
    assert!(!gates.gfr, "gfr < 50 is strict");
    assert!(gates.weight, "weight <= 60");

    let below = patient_with(74.9, 60.1, 49.9);
    let gates = evaluate_gates(&selected, Some(&below));
    assert!(!gates.age);
    assert!(gates.gfr);
    assert!(!gates.weight);
}

#[test]
fn missing_patient_fails_every_gate() {
    let selected = drugs(&[InteractingDrug::Tacrolimus]);

    let gates = evaluate_gates(&selected, None);

    assert!(!gates.age && !gates.gfr && !gates.weight);
}

#[test]
fn interacting_drugs_keep_display_order() {
    let medications = MedicationSelections {
        interacting_drugs: drugs(&[
            InteractingDrug::Tacrolimus,
            InteractingDrug::Amiodaron,
            InteractingDrug::Naproxen,
        ]),
        ..Default::default()
    };

    let assessment = evaluate_interactions(&medications, Some(&patient()));

    assert_eq!(
        assessment.interacting_drugs,
        vec![
            InteractingDrug::Amiodaron,
            InteractingDrug::Naproxen,
            InteractingDrug::Tacrolimus,
        ]
    );
}

#[test]
fn medication_selections_parse_with_defaults() {
    let medications: MedicationSelections = serde_json::from_value(serde_json::json!({
        "nsaid": true,
        "interactingDrugs": ["fluconazol", "diltiazem"]
    }))
    .expect("selections parse");

    assert!(medications.base.nsaid);
    assert!(!medications.base.aspirin);
    assert_eq!(
        medications.interacting_drugs.iter().copied().collect::<Vec<_>>(),
        vec![InteractingDrug::Diltiazem, InteractingDrug::Fluconazol]
    );
}
