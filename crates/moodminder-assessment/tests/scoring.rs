mod common;

use std::collections::BTreeMap;

use moodminder_assessment::catalog::Catalog;
use moodminder_assessment::scoring::{self, ValidationError, percent_scale, unit_scale};
use moodminder_core::models::condition::Condition;
use moodminder_core::models::responses::Responses;
use proptest::prelude::*;

use common::{BUILTIN_LEN, question, uniform};

fn score(responses: &Responses) -> scoring::MoodScore {
    common::assessor().score(responses).unwrap()
}

#[test]
fn likert_scales() {
    assert_eq!(unit_scale(1), 0.0);
    assert_eq!(unit_scale(3), 0.5);
    assert_eq!(unit_scale(5), 1.0);
    assert_eq!(percent_scale(2), 25.0);
    assert_eq!(percent_scale(4), 75.0);
}

#[test]
fn neutral_responses_score_fifty() {
    let result = score(&uniform(3));
    assert!((result.overall - 50.0).abs() < 1e-9);
    assert!(result.categories.values().all(|s| *s == 50.0));
}

#[test]
fn maximum_responses_score_one_hundred() {
    let result = score(&uniform(5));
    assert!((result.overall - 100.0).abs() < 1e-9);
    assert!(result.overall <= 100.0);
}

#[test]
fn minimum_responses_score_zero() {
    let result = score(&uniform(1));
    assert_eq!(result.overall, 0.0);
    assert!(result.categories.values().all(|s| *s == 0.0));
}

#[test]
fn category_scores_are_unweighted_means() {
    let catalog = Catalog::from_questions(
        "t",
        vec![
            question(1, "sleep", 0.9, None),
            question(2, "sleep", 0.05, None),
            question(3, "stress", 0.05, Some(Condition::Anxiety)),
        ],
    )
    .unwrap();
    let vector = scoring::normalize(&catalog, &Responses::Sequence(vec![5, 3, 1])).unwrap();
    let result = scoring::score(&catalog, &vector);

    assert_eq!(result.categories["sleep"], 75.0);
    assert_eq!(result.categories["stress"], 0.0);
    // 100 * 0.9 + 50 * 0.05 + 0 * 0.05
    assert!((result.overall - 92.5).abs() < 1e-9);
}

#[test]
fn every_catalog_category_is_reported() {
    let catalog = common::builtin();
    let result = score(&uniform(2));
    for q in catalog.questions() {
        assert!(result.categories.contains_key(&q.category));
    }
    assert_eq!(result.categories.len(), 22);
}

#[test]
fn short_sequence_is_rejected() {
    let err = common::assessor()
        .score(&Responses::Sequence(vec![3; 10]))
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::LengthMismatch {
            expected: BUILTIN_LEN,
            actual: 10
        }
    );
}

#[test]
fn long_sequence_is_rejected() {
    let err = common::assessor()
        .score(&Responses::Sequence(vec![3; BUILTIN_LEN + 1]))
        .unwrap_err();
    assert!(matches!(err, ValidationError::LengthMismatch { actual: 43, .. }));
}

#[test]
fn out_of_range_values_are_rejected() {
    let mut values = vec![3; BUILTIN_LEN];
    values[4] = 6;
    let err = common::assessor()
        .score(&Responses::Sequence(values))
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::OutOfRange {
            question_id: 5,
            value: 6
        }
    );

    let by_id = BTreeMap::from([(9, 0)]);
    let err = common::assessor()
        .score(&Responses::ById(by_id))
        .unwrap_err();
    assert_eq!(
        err,
        ValidationError::OutOfRange {
            question_id: 9,
            value: 0
        }
    );
}

#[test]
fn empty_mapping_is_all_neutral() {
    let result = score(&Responses::ById(BTreeMap::new()));
    assert_eq!(result, score(&uniform(3)));
}

#[test]
fn mapping_defaults_missing_ids_to_neutral() {
    let by_id = BTreeMap::from([(1, 5), (6, 1), (27, 2), (42, 4)]);

    let mut values = vec![3; BUILTIN_LEN];
    values[0] = 5;
    values[5] = 1;
    values[26] = 2;
    values[41] = 4;

    assert_eq!(
        score(&Responses::ById(by_id)),
        score(&Responses::Sequence(values))
    );
}

#[test]
fn mapping_ignores_unknown_ids() {
    let by_id = BTreeMap::from([(1, 5), (999, 1)]);
    let mut values = vec![3; BUILTIN_LEN];
    values[0] = 5;
    assert_eq!(
        score(&Responses::ById(by_id)),
        score(&Responses::Sequence(values))
    );
}

#[test]
fn responses_parse_from_either_json_shape() {
    let sequence: Responses = serde_json::from_str("[1, 2, 3]").unwrap();
    assert_eq!(sequence, Responses::Sequence(vec![1, 2, 3]));

    let by_id: Responses = serde_json::from_str(r#"{"1": 5, "27": 2}"#).unwrap();
    assert_eq!(by_id, Responses::ById(BTreeMap::from([(1, 5), (27, 2)])));
}

proptest! {
    #[test]
    fn overall_score_stays_within_bounds(values in prop::collection::vec(1u8..=5, BUILTIN_LEN)) {
        let result = score(&Responses::Sequence(values));
        prop_assert!((0.0..=100.0).contains(&result.overall));
        for category in result.categories.values() {
            prop_assert!((0.0..=100.0).contains(category));
        }
    }

    #[test]
    fn scoring_is_deterministic(values in prop::collection::vec(1u8..=5, BUILTIN_LEN)) {
        let responses = Responses::Sequence(values);
        prop_assert_eq!(score(&responses), score(&responses));
    }
}
