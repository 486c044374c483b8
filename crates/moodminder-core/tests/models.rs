use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use moodminder_core::keys;
use moodminder_core::models::activity::Activity;
use moodminder_core::models::analysis::AnalysisResult;
use moodminder_core::models::condition::Condition;
use moodminder_core::models::mood::{BandTier, MoodBand};
use moodminder_core::models::record::AssessmentRecord;
use uuid::Uuid;

fn analysis(score: f64, band: MoodBand, created_at: jiff::Timestamp) -> AnalysisResult {
    AnalysisResult {
        overall_score: score,
        mood_category: band,
        description: String::new(),
        category_scores: BTreeMap::new(),
        areas_of_concern: vec![],
        areas_of_strength: vec![],
        insights: vec![],
        recommendations: vec![],
        detected_conditions: BTreeMap::new(),
        condition_scores: BTreeMap::new(),
        recommended_activities: BTreeSet::new(),
        game_analysis: None,
        created_at,
    }
}

#[test]
fn condition_tags_round_trip_through_from_str() {
    for condition in Condition::ALL {
        assert_eq!(Condition::from_str(condition.as_str()).unwrap(), condition);
    }
    assert!(Condition::from_str("insomnia").is_err());
}

#[test]
fn mood_bands_are_ordered_lowest_first() {
    for (i, band) in MoodBand::ALL.into_iter().enumerate() {
        assert_eq!(band.index(), i);
        assert_eq!(MoodBand::from_index(i), Some(band));
        assert_eq!(band.to_string().parse::<MoodBand>().unwrap(), band);
    }
    assert_eq!(MoodBand::from_index(5), None);
    assert!(MoodBand::Critical < MoodBand::Excellent);
}

#[test]
fn band_tiers() {
    assert_eq!(MoodBand::Critical.tier(), BandTier::Distressed);
    assert_eq!(MoodBand::Poor.tier(), BandTier::Distressed);
    assert_eq!(MoodBand::Moderate.tier(), BandTier::Neutral);
    assert_eq!(MoodBand::Good.tier(), BandTier::Positive);
    assert_eq!(MoodBand::Excellent.tier(), BandTier::Positive);
}

#[test]
fn activity_tags() {
    assert_eq!(Activity::Rps.as_str(), "rps");
    assert_eq!("guess".parse::<Activity>().unwrap(), Activity::Guess);
    assert!("chess".parse::<Activity>().is_err());
}

#[test]
fn user_segment_escapes_path_separators() {
    assert_eq!(keys::user_segment("ana"), "ana");
    assert_eq!(keys::user_segment("ana@example.com"), "ana%40example.com");
    assert_eq!(keys::user_segment("../etc/passwd"), "..%2Fetc%2Fpasswd");
    assert_eq!(keys::user_segment("a b\\c"), "a%20b%5Cc");
    assert_eq!(keys::user_segment(".."), "%2E%2E");
    assert_eq!(keys::user_segment("."), "%2E");
    assert_eq!(keys::user_segment(""), "%");
}

#[test]
fn distinct_users_get_distinct_segments() {
    let users = [
        "alice!smith@example.com",
        "alice_smith@example.com",
        "alice%21smith@example.com",
        "alice smith@example.com",
        "..",
        "%2E%2E",
        "",
        "%",
        "_",
    ];
    let segments: BTreeSet<String> = users.iter().map(|u| keys::user_segment(u)).collect();
    assert_eq!(segments.len(), users.len());
    for segment in &segments {
        assert!(!segment.contains('/'));
        assert!(segment != "." && segment != "..");
    }
}

#[test]
fn record_keys_sort_by_time() {
    let id = Uuid::nil();
    let early = keys::record("u", jiff::Timestamp::from_second(1_000).unwrap(), id);
    let late = keys::record("u", jiff::Timestamp::from_second(20_000).unwrap(), id);

    assert!(early.starts_with("history/u/"));
    assert!(early.ends_with(&format!("-{id}.json")));
    assert!(early < late);
    assert_eq!(keys::record_millis(&early), Some(1_000_000));
    assert_eq!(keys::record_millis("history/u/notes.txt"), None);
    assert_eq!(keys::record_millis("history/u/123-abc.json.tmp"), None);
}

#[test]
fn record_status_reflects_analysis() {
    let at = jiff::Timestamp::from_second(1_700_000_000).unwrap();
    let record = AssessmentRecord::new("ana", analysis(72.5, MoodBand::Good, at));

    assert_eq!(record.created_at, at);
    let status = record.status();
    assert_eq!(status.current_mood, MoodBand::Good);
    assert_eq!(status.mood_score, 72.5);
    assert_eq!(status.last_assessment, at);
}

#[test]
fn analysis_json_uses_condition_tags() {
    let mut result = analysis(80.0, MoodBand::Excellent, jiff::Timestamp::UNIX_EPOCH);
    result.detected_conditions.insert(Condition::Ptsd, 0.75);
    result.recommended_activities.insert(Activity::Breathing);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["mood_category"], "excellent");
    assert_eq!(json["detected_conditions"]["ptsd"], 0.75);
    assert_eq!(json["recommended_activities"][0], "breathing");

    let back: AnalysisResult = serde_json::from_value(json).unwrap();
    assert_eq!(back, result);
}
