// Integration tests for SymptomX
use std::collections::HashSet;
use std::sync::Arc;
use symptomx_core::{BruteForceIndex, LabelEncoding, Metric, SymptomVector, SymptomVocabulary};
use symptomx_ranking::{Prediction, PredictionResponse, RankerConfig, SymptomChecker};
use symptomx_storage::{ArtifactStore, StorageError};

const SYMPTOMS: [&str; 10] = [
    "itching",
    "skin_rash",
    "high_fever",
    "cough",
    "headache",
    "vomiting",
    "fatigue",
    "chills",
    "joint_pain",
    "nausea",
];

/// (disease, symptoms) training rows, several per disease
const TRAINING: &[(&str, &[&str])] = &[
    ("Fungal infection", &["itching", "skin_rash"]),
    ("Fungal infection", &["itching", "skin_rash", "fatigue"]),
    ("Common Cold", &["cough", "chills", "headache"]),
    ("Common Cold", &["cough", "chills"]),
    ("Common Cold", &["cough", "high_fever", "chills"]),
    ("Malaria", &["high_fever", "chills", "vomiting", "nausea"]),
    ("Malaria", &["high_fever", "chills", "headache"]),
    ("Dengue", &["high_fever", "joint_pain", "headache", "skin_rash"]),
    ("Dengue", &["high_fever", "joint_pain", "fatigue"]),
    ("Migraine", &["headache", "nausea"]),
    ("Migraine", &["headache", "vomiting", "nausea"]),
    ("Gastroenteritis", &["vomiting", "nausea", "fatigue"]),
    ("Arthritis", &["joint_pain", "fatigue"]),
    ("Allergy", &["itching", "cough"]),
];

fn build_model() -> (SymptomVocabulary, LabelEncoding, BruteForceIndex) {
    let vocabulary = SymptomVocabulary::new(SYMPTOMS).unwrap();

    let mut diseases: Vec<&str> = Vec::new();
    for (disease, _) in TRAINING {
        if !diseases.contains(disease) {
            diseases.push(disease);
        }
    }
    let labels = LabelEncoding::new(diseases.iter().copied()).unwrap();

    let rows = TRAINING.iter().map(|(disease, symptoms)| {
        let vector = SymptomVector::from_indices(
            vocabulary.len(),
            symptoms.iter().map(|s| vocabulary.position(s).unwrap()),
        );
        (vector, labels.encode(disease).unwrap())
    });
    let index = BruteForceIndex::from_rows(vocabulary.len(), Metric::Euclidean, rows).unwrap();

    (vocabulary, labels, index)
}

fn checker_from_disk() -> (tempfile::TempDir, SymptomChecker) {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(temp_dir.path());
    let (vocabulary, labels, index) = build_model();
    store.save(&vocabulary, &labels, &index, None).unwrap();

    let checker = store
        .load()
        .unwrap()
        .into_checker(RankerConfig::default())
        .unwrap();
    (temp_dir, checker)
}

/// Every non-empty subset of the first `n` symptoms
fn symptom_subsets(n: usize) -> Vec<Vec<&'static str>> {
    (1u32..(1 << n))
        .map(|mask| {
            (0..n)
                .filter(|i| mask & (1 << i) != 0)
                .map(|i| SYMPTOMS[i])
                .collect()
        })
        .collect()
}

#[test]
fn test_unrecognized_input_is_no_match() {
    let (_dir, checker) = checker_from_disk();

    let empty: [&str; 0] = [];
    assert_eq!(checker.predict(&empty).unwrap(), Prediction::NoMatch);
    assert_eq!(checker.predict(&["unicorn_itch"]).unwrap(), Prediction::NoMatch);
    assert_eq!(
        checker.predict(&["unicorn_itch", "dragon_breath", "  "]).unwrap(),
        Prediction::NoMatch
    );
}

#[test]
fn test_result_invariants_over_all_subsets() {
    let (_dir, checker) = checker_from_disk();

    for symptoms in symptom_subsets(SYMPTOMS.len()) {
        let prediction = checker.predict(&symptoms).unwrap();
        let results = match prediction {
            Prediction::Ranked(results) => results,
            Prediction::NoMatch => panic!("{:?} should be recognized", symptoms),
        };

        assert!(!results.is_empty());
        assert!(results.len() <= 5);

        let unique: HashSet<_> = results.iter().map(|r| r.disease.as_str()).collect();
        assert_eq!(unique.len(), results.len(), "duplicate disease for {:?}", symptoms);

        assert!(results
            .windows(2)
            .all(|w| w[0].confidence >= w[1].confidence));
        assert!(results.iter().all(|r| r.confidence > 0.0 && r.confidence <= 100.0));
    }
}

#[test]
fn test_exact_training_row_scores_100() {
    let (_dir, checker) = checker_from_disk();
    let prediction = checker.predict(&["itching", "skin_rash"]).unwrap();
    let top = &prediction.results()[0];
    assert_eq!(top.disease, "Fungal infection");
    assert_eq!(top.confidence, 100.0);
    assert_eq!(top.confidence_label(), "100.0%");
}

#[test]
fn test_idempotent_and_order_independent() {
    let (_dir, checker) = checker_from_disk();

    let forward = checker.predict(&["high_fever", "chills", "headache"]).unwrap();
    let again = checker.predict(&["high_fever", "chills", "headache"]).unwrap();
    let permuted = checker.predict(&["headache", "high_fever", "chills"]).unwrap();
    let reformatted = checker.predict(&["Headache", "chills", "High Fever", "chills"]).unwrap();

    assert_eq!(forward, again);
    assert_eq!(forward, permuted);
    assert_eq!(forward, reformatted);
    assert_eq!(forward.results()[0].disease, "Malaria");
}

#[test]
fn test_fewer_distinct_diseases_than_five() {
    let vocabulary = SymptomVocabulary::new(["fever", "cough", "headache"]).unwrap();
    let labels = LabelEncoding::new(["flu", "cold", "migraine"]).unwrap();
    let rows = (0..15).map(|i| {
        let bits: Vec<usize> = (0..3).filter(|b| (i + 1) & (1 << b) != 0).collect();
        (SymptomVector::from_indices(3, bits), (i % 3) as u32)
    });
    let index = BruteForceIndex::from_rows(3, Metric::Euclidean, rows).unwrap();
    let checker =
        SymptomChecker::new(vocabulary, labels, Box::new(index), RankerConfig::default()).unwrap();

    let prediction = checker.predict(&["fever", "cough"]).unwrap();
    assert_eq!(prediction.results().len(), 3);
}

#[test]
fn test_k_larger_than_training_set() {
    let (vocabulary, labels, index) = build_model();
    let rows = TRAINING.len();
    let checker = SymptomChecker::new(
        vocabulary,
        labels,
        Box::new(index),
        RankerConfig {
            neighbors: rows * 10,
            max_results: 5,
        },
    )
    .unwrap();

    let prediction = checker.predict(&["fatigue"]).unwrap();
    assert_eq!(prediction.results().len(), 5);
}

#[test]
fn test_concurrent_queries_share_engine() {
    let (_dir, checker) = checker_from_disk();
    let checker = Arc::new(checker);
    let expected = checker.predict(&["cough", "chills"]).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let checker = checker.clone();
            std::thread::spawn(move || {
                (0..50)
                    .map(|_| checker.predict(&["chills", "cough"]).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for prediction in handle.join().unwrap() {
            assert_eq!(prediction, expected);
        }
    }
}

#[test]
fn test_response_shape() {
    let (_dir, checker) = checker_from_disk();

    let response = PredictionResponse::from(checker.analyze(&["unicorn_itch"]).unwrap());
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        serde_json::json!({ "error": "no symptoms matched" })
    );

    let response = PredictionResponse::from(checker.analyze(&["cough", "chills"]).unwrap());
    let body = serde_json::to_value(&response).unwrap();
    let predictions = body["predictions"].as_array().unwrap();
    assert_eq!(predictions[0]["disease"], "Common Cold");
    assert_eq!(predictions[0]["confidence"], "100.0%");
    assert_eq!(
        predictions[0]["recommendations"],
        serde_json::json!(["Consult a doctor.", "Stay hydrated and rest."])
    );
    assert!(body.get("ignored").is_none());
}

#[test]
fn test_corrupt_model_refuses_to_load() {
    let temp_dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(temp_dir.path());
    let (vocabulary, labels, index) = build_model();
    store.save(&vocabulary, &labels, &index, None).unwrap();

    std::fs::write(temp_dir.path().join("index.bin"), b"garbage").unwrap();
    assert!(matches!(store.load(), Err(StorageError::ChecksumMismatch { .. })));
}
