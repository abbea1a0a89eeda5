use super::common::*;
use crate::workflows::anticoagulation::domain::{ManualContraindications, Sex};
use crate::workflows::anticoagulation::evaluation::{
    evaluate_contraindications, ContraindicationReason, ReproductiveStatus,
};

#[test]
fn minor_is_contraindicated_regardless_of_other_flags() {
    let patient = patient_with(10.0, 35.0, 90.0);

    let assessment =
        evaluate_contraindications(Some(&patient), Some(Sex::Male), &Default::default());

    assert!(assessment.under_age_18);
    assert!(assessment.absolute_contraindication);
    assert_eq!(assessment.reason_texts(), vec!["Patient is under 18 years old"]);
    assert_eq!(
        assessment.verdict(),
        "Patient is NOT eligible for DOAC therapy."
    );
}

#[test]
fn derived_thresholds_are_strict() {
    let patient = patient_with(18.0, 80.0, 15.0);

    let assessment = evaluate_contraindications(Some(&patient), None, &Default::default());

    assert!(!assessment.under_age_18);
    assert!(!assessment.renal_failure);
    assert!(assessment.eligible());
    assert!(assessment.reasons.is_empty());

    let failing = patient_with(18.0, 80.0, 14.9);
    let assessment = evaluate_contraindications(Some(&failing), None, &Default::default());
    assert!(assessment.renal_failure);
    assert_eq!(assessment.reasons, vec![ContraindicationReason::RenalFailure]);
}

#[test]
fn reasons_follow_fixed_order() {
    let patient = patient_with(16.0, 50.0, 10.0);
    let manual = ManualContraindications {
        active_bleeding: true,
        endocarditis: true,
        active_gi_ulcer: true,
        liver_failure_or_coagulopathy: true,
        pregnant_or_breastfeeding: true,
        interacting_medication_present: true,
    };

    let assessment = evaluate_contraindications(Some(&patient), Some(Sex::Female), &manual);

    assert_eq!(
        assessment.reasons,
        vec![
            ContraindicationReason::UnderAge18,
            ContraindicationReason::RenalFailure,
            ContraindicationReason::ActiveBleeding,
            ContraindicationReason::Endocarditis,
            ContraindicationReason::ActiveGiUlcer,
            ContraindicationReason::LiverFailureOrCoagulopathy,
            ContraindicationReason::PregnantOrBreastfeeding,
            ContraindicationReason::InteractingMedication,
        ]
    );
    assert_eq!(
        assessment,
        evaluate_contraindications(Some(&patient), Some(Sex::Female), &manual)
    );
}

#[test]
fn stored_pregnancy_flag_is_inert_unless_female() {
    let patient = patient();
    let manual = ManualContraindications {
        pregnant_or_breastfeeding: true,
        ..Default::default()
    };

    for sex in [Some(Sex::Male), None] {
        let assessment = evaluate_contraindications(Some(&patient), sex, &manual);
        assert!(!assessment.pregnant_or_breastfeeding);
        assert!(!assessment.absolute_contraindication);
    }

    let female = evaluate_contraindications(Some(&patient), Some(Sex::Female), &manual);
    assert!(female.pregnant_or_breastfeeding);
    assert_eq!(
        female.reason_texts(),
        vec!["Pregnant or breastfeeding"]
    );
}

#[test]
fn reproductive_status_only_carries_flag_for_female() {
    assert_eq!(
        ReproductiveStatus::gate(Some(Sex::Male), true),
        ReproductiveStatus::NotApplicable
    );
    assert_eq!(
        ReproductiveStatus::gate(Some(Sex::Female), false),
        ReproductiveStatus::Female {
            pregnant_or_breastfeeding: false
        }
    );
}

#[test]
fn absolute_contraindication_iff_reasons_present() {
    let patient = patient();
    for mask in 0u8..64 {
        let bit = |n: u8| mask & (1 << n) != 0;
        let manual = ManualContraindications {
            active_bleeding: bit(0),
            endocarditis: bit(1),
            active_gi_ulcer: bit(2),
            liver_failure_or_coagulopathy: bit(3),
            pregnant_or_breastfeeding: bit(4),
            interacting_medication_present: bit(5),
        };

        let assessment = evaluate_contraindications(Some(&patient), Some(Sex::Male), &manual);

        assert_eq!(
            assessment.absolute_contraindication,
            !assessment.reasons.is_empty()
        );
        assert_eq!(assessment.reasons.len(), (mask & !(1 << 4)).count_ones() as usize);
    }
}

#[test]
fn missing_patient_leaves_derived_flags_false() {
    let assessment = evaluate_contraindications(None, None, &Default::default());

    assert!(!assessment.under_age_18);
    assert!(!assessment.renal_failure);
    assert_eq!(
        assessment.verdict(),
        "No contraindications detected. Patient is eligible for DOAC therapy."
    );
}

#[test]
fn reasons_serialize_as_display_text() {
    let patient = patient_with(10.0, 35.0, 90.0);
    let assessment = evaluate_contraindications(Some(&patient), None, &Default::default());

    let json = serde_json::to_value(&assessment).expect("assessment serializes");

    assert_eq!(json["underAge18"], true);
    assert_eq!(json["absoluteContraindication"], true);
    assert_eq!(json["reasons"][0], "Patient is under 18 years old");
}
