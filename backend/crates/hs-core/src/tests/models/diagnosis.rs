use crate::{AiPrediction, Diagnosis};

fn prediction(disease: &str, confidence: f64) -> AiPrediction {
    AiPrediction {
        disease: disease.to_string(),
        confidence,
    }
}

#[test]
fn given_predictions_when_top_prediction_then_highest_confidence_wins() {
    let mut d = Diagnosis::new("p".to_string(), vec!["fever".to_string()]);
    d.ai_prediction = Some(vec![
        prediction("Common cold", 0.4),
        prediction("Influenza", 0.7),
        prediction("Allergy", 0.1),
    ]);

    assert_eq!(d.top_prediction().unwrap().disease, "Influenza");
}

#[test]
fn given_no_symptoms_when_validated_then_error() {
    let d = Diagnosis::new("p".to_string(), vec![" ".to_string()]);

    assert!(d.validate().is_err());
}

#[test]
fn given_confidence_above_one_when_validated_then_error_names_disease() {
    let mut d = Diagnosis::new("p".to_string(), vec!["cough".to_string()]);
    d.ai_prediction = Some(vec![prediction("Bronchitis", 1.5)]);

    let err = d.validate().unwrap_err();

    assert!(err.to_string().contains("Bronchitis"));
}

#[test]
fn given_doctor_diagnosis_when_checked_then_reviewed() {
    let mut d = Diagnosis::new("p".to_string(), vec!["headache".to_string()]);
    assert!(!d.is_reviewed());

    d.doctor_diagnosis = Some("Tension headache".to_string());
    assert!(d.is_reviewed());
}
