//! Report composition: merges the score, band, condition scores and game
//! analysis into one [`AnalysisResult`].

use std::collections::{BTreeMap, BTreeSet};

use moodminder_core::models::activity::Activity;
use moodminder_core::models::analysis::AnalysisResult;
use moodminder_core::models::condition::Condition;
use moodminder_core::models::game::GameAnalysis;
use moodminder_core::models::mood::{BandTier, MoodBand};

use crate::conditions::detected;
use crate::profiles::{band_profile, condition_profile};
use crate::scoring::round_score;

/// Categories scoring below this are areas of concern.
pub const CONCERN_BELOW: f64 = 40.0;
/// Categories scoring above this are areas of strength.
pub const STRENGTH_ABOVE: f64 = 70.0;

const CONDITION_INSIGHT_RECOMMENDATIONS: usize = 3;
const CONDITION_RECOMMENDATIONS: usize = 2;

#[derive(Debug, Clone, Copy)]
enum Trigger {
    Below(f64),
    Above(f64),
}

struct InsightRule {
    category: &'static str,
    trigger: Trigger,
    text: &'static str,
}

/// Evaluated in order; a rule only fires when its category was scored.
static CATEGORY_INSIGHTS: [InsightRule; 8] = [
    InsightRule {
        category: "depression",
        trigger: Trigger::Below(40.0),
        text: "Your mood seems to be low today. Consider engaging in activities that usually \
               bring you joy.",
    },
    InsightRule {
        category: "depression",
        trigger: Trigger::Above(70.0),
        text: "You're in a great mood! This is a perfect time to tackle challenging tasks.",
    },
    InsightRule {
        category: "sleep",
        trigger: Trigger::Below(40.0),
        text: "Poor sleep quality can significantly impact your mood and energy. Try \
               establishing a consistent bedtime routine.",
    },
    InsightRule {
        category: "stress",
        trigger: Trigger::Above(60.0),
        text: "High stress levels detected. Consider practicing relaxation techniques like deep \
               breathing or meditation.",
    },
    InsightRule {
        category: "anxiety",
        trigger: Trigger::Above(60.0),
        text: "You're experiencing elevated anxiety. Grounding techniques and mindfulness can \
               help manage these feelings.",
    },
    InsightRule {
        category: "motivation",
        trigger: Trigger::Below(40.0),
        text: "Low energy levels might be affecting your overall well-being. Consider light \
               physical activity or a short walk.",
    },
    InsightRule {
        category: "social_connection",
        trigger: Trigger::Below(40.0),
        text: "Feeling disconnected from others? Consider reaching out to a friend or joining a \
               social activity.",
    },
    InsightRule {
        category: "hope",
        trigger: Trigger::Below(40.0),
        text: "It's normal to feel less hopeful sometimes. Focus on small, achievable goals to \
               rebuild optimism.",
    },
];

impl Trigger {
    fn fires(self, score: f64) -> bool {
        match self {
            Trigger::Below(limit) => score < limit,
            Trigger::Above(limit) => score > limit,
        }
    }
}

/// Build the report. Deterministic apart from `created_at`.
pub fn compose(
    overall_score: f64,
    category_scores: BTreeMap<String, f64>,
    mood_band: MoodBand,
    condition_scores: BTreeMap<Condition, f64>,
    game_analysis: Option<GameAnalysis>,
) -> AnalysisResult {
    let band = band_profile(mood_band);
    let detected_conditions = detected(&condition_scores);

    let areas_of_concern = category_scores
        .iter()
        .filter(|(_, score)| **score < CONCERN_BELOW)
        .map(|(category, _)| category.clone())
        .collect();
    let areas_of_strength = category_scores
        .iter()
        .filter(|(_, score)| **score > STRENGTH_ABOVE)
        .map(|(category, _)| category.clone())
        .collect();

    let mut insights = category_insights(&category_scores);
    for condition in detected_conditions.keys() {
        let profile = condition_profile(*condition);
        insights.push(format!("⚠️ {}", profile.description));
        insights.extend(
            profile
                .recommendations
                .iter()
                .take(CONDITION_INSIGHT_RECOMMENDATIONS)
                .map(|r| r.to_string()),
        );
    }
    if let Some(games) = &game_analysis {
        insights.extend(games.mood_indicators.iter().cloned());
    }

    let mut recommendations: Vec<String> =
        band.recommendations.iter().map(|r| r.to_string()).collect();
    for condition in detected_conditions.keys() {
        recommendations.extend(
            condition_profile(*condition)
                .recommendations
                .iter()
                .take(CONDITION_RECOMMENDATIONS)
                .map(|r| r.to_string()),
        );
    }

    let recommended_activities = recommended_activities(&detected_conditions, mood_band);

    AnalysisResult {
        overall_score: round_score(overall_score),
        mood_category: mood_band,
        description: band.description.to_string(),
        category_scores,
        areas_of_concern,
        areas_of_strength,
        insights,
        recommendations,
        detected_conditions,
        condition_scores,
        recommended_activities,
        game_analysis,
        created_at: jiff::Timestamp::now(),
    }
}

/// Fixed category rules, in rule order.
pub fn category_insights(category_scores: &BTreeMap<String, f64>) -> Vec<String> {
    CATEGORY_INSIGHTS
        .iter()
        .filter(|rule| {
            category_scores
                .get(rule.category)
                .is_some_and(|score| rule.trigger.fires(*score))
        })
        .map(|rule| rule.text.to_string())
        .collect()
}

/// Activities suggested by detected conditions plus the band tier's defaults.
pub fn recommended_activities(
    detected_conditions: &BTreeMap<Condition, f64>,
    mood_band: MoodBand,
) -> BTreeSet<Activity> {
    let tier_defaults: &[Activity] = match mood_band.tier() {
        BandTier::Distressed => &[Activity::Breathing, Activity::Puzzle, Activity::Memory],
        BandTier::Neutral => &[Activity::Memory, Activity::Reaction, Activity::Trivia],
        BandTier::Positive => &[Activity::Trivia, Activity::Rps, Activity::Guess],
    };

    detected_conditions
        .keys()
        .flat_map(|condition| condition_profile(*condition).activities.iter().copied())
        .chain(tier_defaults.iter().copied())
        .collect()
}
