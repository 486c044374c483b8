//! Game-performance analysis.
//!
//! Each supported game moves exactly one axis: memory accuracy moves
//! concentration, reaction time and breathing completion move stress, puzzle
//! solve time moves patience. Every rule that fires also leaves a short
//! indicator for the report.

use moodminder_core::models::game::{GameAnalysis, GameKind, GamePerformance, GameTelemetry};

const HIGH_ACCURACY: f64 = 0.8;
const LOW_ACCURACY: f64 = 0.5;
/// Milliseconds.
const SLOW_REACTION: f64 = 500.0;
const FAST_REACTION: f64 = 200.0;
/// Seconds.
const QUICK_SOLVE: f64 = 60.0;
const SLOW_SOLVE: f64 = 300.0;

/// `None` when no telemetry was supplied.
pub fn analyze(telemetry: Option<&GameTelemetry>) -> Option<GameAnalysis> {
    let telemetry = telemetry.filter(|t| !t.is_empty())?;

    let mut analysis = GameAnalysis::default();
    for (tag, performance) in telemetry.iter() {
        match GameKind::from_tag(tag) {
            Some(kind) => apply(kind, performance, &mut analysis),
            None => tracing::debug!(tag, "no analysis rules for game"),
        }
    }
    Some(analysis)
}

fn apply(kind: GameKind, perf: &GamePerformance, analysis: &mut GameAnalysis) {
    match kind {
        GameKind::Memory => {
            if perf.accuracy > HIGH_ACCURACY {
                note(analysis, "Good concentration");
                analysis.concentration_score += 20;
            } else if perf.accuracy < LOW_ACCURACY {
                note(analysis, "Difficulty concentrating");
                analysis.concentration_score -= 15;
            }
        }
        GameKind::Reaction => {
            if perf.avg_reaction_time > SLOW_REACTION {
                note(analysis, "High stress levels");
                analysis.stress_level += 20;
            } else if perf.avg_reaction_time < FAST_REACTION {
                note(analysis, "Calm and focused");
                analysis.stress_level -= 10;
            }
        }
        GameKind::Breathing => {
            if perf.completed {
                note(analysis, "Good self-regulation");
                analysis.stress_level -= 15;
            } else {
                note(analysis, "Difficulty with relaxation");
                analysis.stress_level += 10;
            }
        }
        GameKind::Puzzle => {
            if perf.time_to_solve < QUICK_SOLVE {
                note(analysis, "Good problem-solving skills");
                analysis.patience_level += 15;
            } else if perf.time_to_solve > SLOW_SOLVE {
                note(analysis, "Difficulty with complex tasks");
                analysis.patience_level -= 10;
            }
        }
    }
}

fn note(analysis: &mut GameAnalysis, indicator: &str) {
    analysis.mood_indicators.push(indicator.to_string());
}
