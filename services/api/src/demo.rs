use afib_cdss::error::AppError;
use afib_cdss::workflows::anticoagulation::{
    AssessmentBundle, AssessmentRequest, AssessmentService, BaseMedications, ChadsVascSelections,
    ClinicalSelections, InteractingDrug, MedicationSelections, RawPatientFields, RawValue, Sex,
};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON document with `patient` intake fields and optional `selections`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Pretty-print the resulting bundle
    #[arg(long)]
    pub(crate) pretty: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Run a single reference scenario instead of all of them
    #[arg(long, value_enum)]
    pub(crate) scenario: Option<Scenario>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Scenario {
    /// 70-year-old woman with hypertension
    A,
    /// 10-year-old patient
    B,
    /// Aspirin plus clopidogrel
    C,
    /// Amiodaron in an 80-year-old
    D,
    /// No risk factors
    E,
}

impl Scenario {
    const ALL: [Scenario; 5] = [Scenario::A, Scenario::B, Scenario::C, Scenario::D, Scenario::E];

    fn title(self) -> &'static str {
        match self {
            Scenario::A => "Scenario A: 70-year-old woman with hypertension",
            Scenario::B => "Scenario B: 10-year-old patient",
            Scenario::C => "Scenario C: dual antiplatelet therapy",
            Scenario::D => "Scenario D: amiodaron in an 80-year-old",
            Scenario::E => "Scenario E: no stroke risk factors",
        }
    }

    fn request(self) -> AssessmentRequest {
        match self {
            Scenario::A => AssessmentRequest {
                patient: intake("ScenarioA", 70.0, 72.0, 80.0),
                selections: ClinicalSelections {
                    chadsvasc: ChadsVascSelections {
                        sex: Some(Sex::Female),
                        hypertension: true,
                        ..Default::default()
                    },
                    ..Default::default()
                },
            },
            Scenario::B => AssessmentRequest {
                patient: intake("ScenarioB", 10.0, 32.0, 110.0),
                selections: ClinicalSelections::default(),
            },
            Scenario::C => AssessmentRequest {
                patient: intake("ScenarioC", 60.0, 85.0, 75.0),
                selections: ClinicalSelections {
                    chadsvasc: ChadsVascSelections {
                        sex: Some(Sex::Male),
                        ..Default::default()
                    },
                    medications: MedicationSelections {
                        base: BaseMedications {
                            aspirin: true,
                            clopidogrel: true,
                            ..Default::default()
                        },
                        ..Default::default()
                    },
                    ..Default::default()
                },
            },
            Scenario::D => AssessmentRequest {
                patient: intake("ScenarioD", 80.0, 70.0, 60.0),
                selections: ClinicalSelections {
                    medications: MedicationSelections {
                        interacting_drugs: [InteractingDrug::Amiodaron].into_iter().collect(),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            },
            Scenario::E => AssessmentRequest {
                patient: intake("ScenarioE", 50.0, 80.0, 90.0),
                selections: ClinicalSelections {
                    chadsvasc: ChadsVascSelections {
                        sex: Some(Sex::Male),
                        ..Default::default()
                    },
                    ..Default::default()
                },
            },
        }
    }
}

fn intake(name: &str, age: f64, weight: f64, gfr: f64) -> RawPatientFields {
    RawPatientFields {
        patient_name: Some(RawValue::from(name)),
        age: Some(RawValue::from(age)),
        patient_weight: Some(RawValue::from(weight)),
        patient_kreatinin: Some(RawValue::from(85.0)),
        patient_gfr: Some(RawValue::from(gfr)),
    }
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let request: AssessmentRequest = serde_json::from_str(&raw)?;

    let bundle = AssessmentService::default().assess(&request)?;

    let rendered = if args.pretty {
        serde_json::to_string_pretty(&bundle)?
    } else {
        serde_json::to_string(&bundle)?
    };
    println!("{rendered}");

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = AssessmentService::default();
    let scenarios: Vec<Scenario> = match args.scenario {
        Some(scenario) => vec![scenario],
        None => Scenario::ALL.to_vec(),
    };

    for (index, scenario) in scenarios.into_iter().enumerate() {
        if index > 0 {
            println!();
        }
        let bundle = service.assess(&scenario.request())?;
        println!("{}", scenario.title());
        print!("{}", render_bundle(&bundle));
    }

    Ok(())
}

pub(crate) fn render_bundle(bundle: &AssessmentBundle) -> String {
    let mut out = String::new();
    let patient = &bundle.patient;
    let chads = &bundle.chadsvasc;
    let ci = &bundle.contraindications;
    let interactions = &bundle.interactions;
    let recommendation = &bundle.recommendation;

    out.push_str(&format!(
        "Patient {}: age {}, weight {} kg, kreatinin {} µmol/l, GFR {}\n",
        patient.name(),
        patient.age(),
        patient.weight_kg(),
        patient.creatinine_umol_l(),
        patient.gfr()
    ));

    out.push_str(&format!(
        "CHA2DS2-VASc: {} ({}), age group {}, sex {}\n",
        chads.score,
        chads.advice(),
        chads.age_bucket.map(|bucket| bucket.label()).unwrap_or("-"),
        chads.sex.map(Sex::code).unwrap_or("-")
    ));
    for component in chads.breakdown() {
        out.push_str(&format!(
            "  +{} {}\n",
            component.points,
            component.factor.label()
        ));
    }

    out.push_str(&format!("Contraindications: {}\n", ci.verdict()));
    for reason in ci.reason_texts() {
        out.push_str(&format!("  - {reason}\n"));
    }

    let triggers: Vec<&str> = interactions
        .ppi_triggers()
        .into_iter()
        .map(|trigger| trigger.label())
        .collect();
    out.push_str(&format!(
        "PPI: {} [{}]\n",
        interactions.ppi_label(),
        if triggers.is_empty() {
            "none".to_string()
        } else {
            triggers.join(", ")
        }
    ));

    if interactions.gates_visible() {
        out.push_str(&format!(
            "Risk gates: age>=75 {}, GFR<50 {}, weight<=60 {} (any {})\n",
            interactions.age_gate,
            interactions.gfr_gate,
            interactions.weight_gate,
            interactions.any_gate_true
        ));
        if interactions.extended_questionnaire {
            out.push_str("  Extended bleeding-risk questionnaire required\n");
        }
    }

    out.push_str(&format!(
        "Recommendation [{:?}]: {}\n",
        recommendation.tone, recommendation.text
    ));
    for note in &recommendation.notes {
        out.push_str(&format!("  * {note}\n"));
    }

    out
}
