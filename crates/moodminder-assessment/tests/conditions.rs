mod common;

use std::collections::BTreeMap;

use moodminder_assessment::catalog::Catalog;
use moodminder_assessment::conditions::{detect, detected};
use moodminder_assessment::profiles::{condition_profile, condition_profiles};
use moodminder_assessment::scoring;
use moodminder_core::models::condition::Condition;
use moodminder_core::models::responses::Responses;
use proptest::prelude::*;

use common::{BUILTIN_LEN, question, uniform};

fn condition_scores(responses: &Responses) -> BTreeMap<Condition, f64> {
    common::assessor().detect_conditions(responses).unwrap()
}

#[test]
fn profiles_follow_condition_order() {
    for (profile, condition) in condition_profiles().iter().zip(Condition::ALL) {
        assert_eq!(profile.condition, condition);
        assert!(profile.threshold > 0.0 && profile.threshold < 1.0);
        assert!(profile.recommendations.len() >= 3);
        assert!(!profile.activities.is_empty());
    }
    assert_eq!(condition_profile(Condition::Depression).threshold, 0.6);
    assert_eq!(condition_profile(Condition::Anxiety).threshold, 0.6);
    assert_eq!(condition_profile(Condition::Ocd).threshold, 0.5);
}

#[test]
fn minimum_responses_score_every_condition_zero() {
    let scores = condition_scores(&uniform(1));
    assert_eq!(scores.len(), 6);
    assert!(scores.values().all(|s| *s == 0.0));
    assert!(detected(&scores).is_empty());
}

#[test]
fn maximum_responses_detect_every_condition() {
    let scores = condition_scores(&uniform(5));
    assert!(scores.values().all(|s| (*s - 1.0).abs() < 1e-12));
    assert_eq!(detected(&scores).len(), 6);
}

#[test]
fn score_equal_to_threshold_is_not_detected() {
    // Neutral answers put every condition at exactly 0.5.
    let scores = condition_scores(&uniform(3));
    for condition in [Condition::Bipolar, Condition::Ptsd, Condition::Ocd, Condition::Adhd] {
        assert_eq!(scores[&condition], 0.5);
        assert_eq!(condition_profile(condition).threshold, 0.5);
    }
    assert!(detected(&scores).is_empty());
}

#[test]
fn detection_is_strictly_above_threshold() {
    let profile = condition_profile(Condition::Depression);
    assert!(!profile.is_detected(0.6));
    assert!(profile.is_detected(0.6 + 1e-9));
    assert!(!profile.is_detected(0.59));
}

#[test]
fn conditions_are_detected_independently() {
    // Anxiety items (ids 6-10) high, everything else neutral.
    let mut values = vec![3; BUILTIN_LEN];
    for v in &mut values[5..10] {
        *v = 5;
    }
    let found = detected(&condition_scores(&Responses::Sequence(values)));
    assert_eq!(found.keys().copied().collect::<Vec<_>>(), vec![Condition::Anxiety]);
    assert_eq!(found[&Condition::Anxiety], 1.0);
}

#[test]
fn several_conditions_may_be_detected_together() {
    let mut values = vec![3; BUILTIN_LEN];
    // Bipolar (ids 11-14) and attention (ids 23-26) items high.
    let (head, tail) = values.split_at_mut(22);
    for v in head[10..14].iter_mut().chain(tail[..4].iter_mut()) {
        *v = 4;
    }
    let found = detected(&condition_scores(&Responses::Sequence(values)));
    assert_eq!(
        found.keys().copied().collect::<Vec<_>>(),
        vec![Condition::Bipolar, Condition::Adhd]
    );
}

#[test]
fn condition_score_is_weighted_by_question_weight() {
    let catalog = Catalog::from_questions(
        "t",
        vec![
            question(1, "anxiety", 0.3, Some(Condition::Anxiety)),
            question(2, "anxiety", 0.1, Some(Condition::Anxiety)),
            question(3, "sleep", 0.6, None),
        ],
    )
    .unwrap();
    let vector = scoring::normalize(&catalog, &Responses::Sequence(vec![5, 1, 1])).unwrap();
    let scores = detect(&catalog, &vector);

    // (1.0 * 0.3 + 0.0 * 0.1) / 0.4
    assert!((scores[&Condition::Anxiety] - 0.75).abs() < 1e-12);
}

#[test]
fn conditions_without_questions_are_absent() {
    let catalog = Catalog::from_questions(
        "t",
        vec![
            question(1, "mood", 0.5, Some(Condition::Depression)),
            question(2, "sleep", 0.5, None),
        ],
    )
    .unwrap();
    let vector = scoring::normalize(&catalog, &Responses::Sequence(vec![5, 5])).unwrap();
    let scores = detect(&catalog, &vector);

    assert_eq!(scores.len(), 1);
    assert_eq!(scores[&Condition::Depression], 1.0);
    assert!(!scores.contains_key(&Condition::Anxiety));
}

proptest! {
    #[test]
    fn condition_scores_stay_in_unit_range(values in prop::collection::vec(1u8..=5, BUILTIN_LEN)) {
        let scores = condition_scores(&Responses::Sequence(values));
        for score in scores.values() {
            prop_assert!((0.0..=1.0).contains(score));
        }
    }

    #[test]
    fn detected_iff_strictly_above_threshold(values in prop::collection::vec(1u8..=5, BUILTIN_LEN)) {
        let scores = condition_scores(&Responses::Sequence(values));
        let found = detected(&scores);
        for (condition, score) in &scores {
            let above = *score > condition_profile(*condition).threshold;
            prop_assert_eq!(found.contains_key(condition), above);
        }
    }
}
