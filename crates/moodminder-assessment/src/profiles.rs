//! Static condition and mood-band tables.

use moodminder_core::models::activity::Activity;
use moodminder_core::models::condition::Condition;
use moodminder_core::models::mood::MoodBand;

/// Per-condition detection threshold and advice.
#[derive(Debug, Clone, Copy)]
pub struct ConditionProfile {
    pub condition: Condition,
    /// A condition is detected when its score is strictly above this.
    pub threshold: f64,
    pub description: &'static str,
    /// Most important first; the report quotes a prefix of this list.
    pub recommendations: &'static [&'static str],
    pub activities: &'static [Activity],
}

impl ConditionProfile {
    pub fn is_detected(&self, score: f64) -> bool {
        score > self.threshold
    }
}

/// A mood band's score range and advice.
///
/// Ranges are half-open `[min, max)`; the top band also includes
/// [`SCORE_MAX`], so every score in `[0, 100]` belongs to exactly one band.
#[derive(Debug, Clone, Copy)]
pub struct BandProfile {
    pub band: MoodBand,
    pub min: f64,
    pub max: f64,
    pub description: &'static str,
    pub recommendations: &'static [&'static str],
}

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

impl BandProfile {
    pub fn contains(&self, score: f64) -> bool {
        score >= self.min && (score < self.max || (self.max == SCORE_MAX && score == SCORE_MAX))
    }
}

static CONDITIONS: [ConditionProfile; 6] = [
    ConditionProfile {
        condition: Condition::Depression,
        threshold: 0.6,
        description: "Signs of depression detected. You may be experiencing persistent sadness, \
                      loss of interest, or feelings of hopelessness.",
        recommendations: &[
            "Consider professional therapy or counseling",
            "Practice regular physical exercise",
            "Maintain a consistent sleep schedule",
            "Engage in activities you used to enjoy",
            "Connect with supportive friends and family",
            "Try mindfulness and meditation practices",
        ],
        activities: &[Activity::Breathing, Activity::Memory, Activity::Puzzle],
    },
    ConditionProfile {
        condition: Condition::Anxiety,
        threshold: 0.6,
        description: "Signs of anxiety detected. You may be experiencing excessive worry, \
                      restlessness, or panic symptoms.",
        recommendations: &[
            "Practice deep breathing exercises",
            "Try progressive muscle relaxation",
            "Limit caffeine and alcohol intake",
            "Establish a regular routine",
            "Consider cognitive behavioral therapy",
            "Use grounding techniques during panic attacks",
        ],
        activities: &[Activity::Breathing, Activity::Reaction, Activity::Memory],
    },
    ConditionProfile {
        condition: Condition::Bipolar,
        threshold: 0.5,
        description: "Signs of bipolar disorder detected. You may be experiencing extreme mood \
                      swings or periods of high energy.",
        recommendations: &[
            "Seek professional psychiatric evaluation",
            "Maintain a mood journal",
            "Establish regular sleep patterns",
            "Avoid alcohol and drugs",
            "Learn about triggers and warning signs",
            "Build a strong support network",
        ],
        activities: &[Activity::Breathing, Activity::Puzzle, Activity::Trivia],
    },
    ConditionProfile {
        condition: Condition::Ptsd,
        threshold: 0.5,
        description: "Signs of PTSD detected. You may be experiencing flashbacks, nightmares, \
                      or hypervigilance.",
        recommendations: &[
            "Seek trauma-focused therapy (EMDR, CBT)",
            "Practice grounding techniques",
            "Avoid triggers when possible",
            "Build a safety plan",
            "Consider support groups",
            "Focus on present-moment awareness",
        ],
        activities: &[Activity::Breathing, Activity::Memory, Activity::Puzzle],
    },
    ConditionProfile {
        condition: Condition::Ocd,
        threshold: 0.5,
        description: "Signs of OCD detected. You may be experiencing intrusive thoughts or \
                      compulsive behaviors.",
        recommendations: &[
            "Seek exposure and response prevention therapy",
            "Practice mindfulness meditation",
            "Challenge obsessive thoughts",
            "Gradually reduce compulsive behaviors",
            "Consider medication evaluation",
            "Join OCD support groups",
        ],
        activities: &[Activity::Memory, Activity::Puzzle, Activity::Trivia],
    },
    ConditionProfile {
        condition: Condition::Adhd,
        threshold: 0.5,
        description: "Signs of ADHD detected. You may be experiencing difficulty concentrating \
                      or hyperactivity.",
        recommendations: &[
            "Consider professional evaluation",
            "Use organizational tools and apps",
            "Break tasks into smaller steps",
            "Practice mindfulness and meditation",
            "Establish routines and structure",
            "Consider medication if recommended",
        ],
        activities: &[Activity::Reaction, Activity::Memory, Activity::Trivia],
    },
];

/// Lowest band first, matching [`MoodBand::ALL`].
static BANDS: [BandProfile; 5] = [
    BandProfile {
        band: MoodBand::Critical,
        min: 0.0,
        max: 20.0,
        description: "You're experiencing significant distress. Please seek immediate support.",
        recommendations: &[
            "Contact a mental health professional immediately",
            "Reach out to crisis support services",
            "Stay connected with supportive people",
            "Consider emergency mental health resources",
        ],
    },
    BandProfile {
        band: MoodBand::Poor,
        min: 20.0,
        max: 40.0,
        description: "You're going through a difficult time. It's important to seek support.",
        recommendations: &[
            "Consider professional mental health support",
            "Reach out to trusted friends or family",
            "Practice self-care activities",
            "Consider reducing your workload temporarily",
        ],
    },
    BandProfile {
        band: MoodBand::Moderate,
        min: 40.0,
        max: 60.0,
        description: "You're experiencing some challenges but have the strength to overcome them.",
        recommendations: &[
            "Practice mindfulness and breathing exercises",
            "Consider talking to a trusted friend or counselor",
            "Engage in physical activity",
            "Focus on small, achievable goals",
        ],
    },
    BandProfile {
        band: MoodBand::Good,
        min: 60.0,
        max: 80.0,
        description: "You're doing well overall with some areas for improvement.",
        recommendations: &[
            "Maintain your current routine",
            "Focus on areas that scored lower",
            "Try some stress-relief activities",
            "Connect with friends or family",
        ],
    },
    BandProfile {
        band: MoodBand::Excellent,
        min: 80.0,
        max: SCORE_MAX,
        description: "You're feeling great! Your mental health is in excellent condition.",
        recommendations: &[
            "Continue your current healthy habits",
            "Share your positive energy with others",
            "Consider mentoring someone who might be struggling",
            "Document what's working well for you",
        ],
    },
];

pub fn condition_profiles() -> &'static [ConditionProfile] {
    &CONDITIONS
}

pub fn condition_profile(condition: Condition) -> &'static ConditionProfile {
    // CONDITIONS is declared in Condition::ALL order.
    &CONDITIONS[condition as usize]
}

pub fn band_profiles() -> &'static [BandProfile] {
    &BANDS
}

pub fn band_profile(band: MoodBand) -> &'static BandProfile {
    &BANDS[band.index()]
}

/// The band whose range contains `score`, or `None` outside `[0, 100]`.
pub fn band_for_score(score: f64) -> Option<MoodBand> {
    BANDS.iter().find(|b| b.contains(score)).map(|b| b.band)
}
