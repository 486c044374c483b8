use std::path::{Path, PathBuf};

use moodminder_assessment::MoodAssessor;
use moodminder_assessment::catalog::Catalog;
use moodminder_assessment::config::{AssessmentConfig, ClassifierSettings, LearnedSettings};
use moodminder_cli::commands::{self, AssessArgs, ConfigInitArgs};
use moodminder_core::models::analysis::AnalysisResult;
use moodminder_core::models::mood::MoodBand;
use moodminder_core::models::record::AssessmentRecord;
use moodminder_storage::HistoryStore;

fn assessor() -> MoodAssessor {
    MoodAssessor::with_catalog(Catalog::builtin().unwrap(), &ClassifierSettings::Range).unwrap()
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn run_assess(
    assessor: &MoodAssessor,
    store: Option<&HistoryStore>,
    args: &AssessArgs,
) -> eyre::Result<AnalysisResult> {
    let mut out = Vec::new();
    commands::assess(assessor, store, args, &mut out)?;
    Ok(serde_json::from_slice(&out)?)
}

#[test]
fn questions_prints_whole_catalog() {
    let mut out = Vec::new();
    commands::questions(&assessor(), None, &mut out).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 42);
    assert_eq!(list[0]["id"], 1);
    assert_eq!(list[41]["condition"], "general");
}

#[test]
fn questions_with_count_samples() {
    let mut out = Vec::new();
    commands::questions(&assessor(), Some(5), &mut out).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 5);
}

#[test]
fn assess_reads_sequence_responses() {
    let dir = tempfile::tempdir().unwrap();
    let responses = write(dir.path(), "responses.json", &format!("{:?}", vec![5; 42]));
    let args = AssessArgs {
        responses,
        games: None,
        user: None,
    };

    let result = run_assess(&assessor(), None, &args).unwrap();
    assert_eq!(result.mood_category, MoodBand::Excellent);
    assert_eq!(result.detected_conditions.len(), 6);
}

#[test]
fn assess_reads_map_responses_and_games() {
    let dir = tempfile::tempdir().unwrap();
    let responses = write(dir.path(), "quick.json", r#"{"1": 3, "27": 3, "36": 3}"#);
    let games = write(
        dir.path(),
        "games.json",
        r#"{"memory": {"accuracy": 0.9}, "puzzle": {"time_to_solve": 400}}"#,
    );
    let args = AssessArgs {
        responses,
        games: Some(games),
        user: None,
    };

    let result = run_assess(&assessor(), None, &args).unwrap();
    assert_eq!(result.mood_category, MoodBand::Moderate);
    let games = result.game_analysis.unwrap();
    assert_eq!(games.concentration_score, 20);
    assert_eq!(games.patience_level, -10);
}

#[test]
fn assess_with_user_appends_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = HistoryStore::new(dir.path().join("data"));
    let responses = write(dir.path(), "responses.json", &format!("{:?}", vec![2; 42]));
    let args = AssessArgs {
        responses,
        games: None,
        user: Some("ana".to_string()),
    };

    let result = run_assess(&assessor(), Some(&store), &args).unwrap();
    let status = store.latest("ana").unwrap().unwrap();
    assert_eq!(status.current_mood, result.mood_category);
    assert_eq!(status.mood_score, result.overall_score);

    let mut out = Vec::new();
    commands::history(&store, "ana", 30, &mut out).unwrap();
    let records: Vec<AssessmentRecord> = serde_json::from_slice(&out).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].analysis, result);
}

#[test]
fn assess_rejects_invalid_responses() {
    let dir = tempfile::tempdir().unwrap();
    let responses = write(dir.path(), "short.json", "[3, 3, 3]");
    let args = AssessArgs {
        responses,
        games: None,
        user: None,
    };

    let err = run_assess(&assessor(), None, &args).unwrap_err();
    assert!(err.to_string().contains("42"), "{err}");
}

#[test]
fn assess_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let args = AssessArgs {
        responses: dir.path().join("absent.json"),
        games: None,
        user: None,
    };

    let err = run_assess(&assessor(), None, &args).unwrap_err();
    assert!(err.to_string().contains("failed to read"), "{err}");
}

#[test]
fn train_reports_classifier() {
    let mut out = Vec::new();
    commands::train(&assessor(), &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "classifier ready: range\n");
}

#[test]
fn config_init_writes_a_loadable_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("moodminder").join("config.json");
    let args = ConfigInitArgs {
        path: Some(path.clone()),
        ..Default::default()
    };

    let mut out = Vec::new();
    commands::config_init(&args, &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().starts_with("wrote "));
    assert_eq!(
        AssessmentConfig::load(&path).unwrap(),
        AssessmentConfig::default()
    );
}

#[test]
fn config_init_keeps_an_existing_file_unless_forced() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "config.json", r#"{"config_version": 1}"#);
    let mut args = ConfigInitArgs {
        path: Some(path.clone()),
        learned: true,
        force: false,
    };

    let err = commands::config_init(&args, &mut Vec::new()).unwrap_err();
    assert!(err.to_string().contains("--force"), "{err}");
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        r#"{"config_version": 1}"#
    );

    args.force = true;
    commands::config_init(&args, &mut Vec::new()).unwrap();
    assert_eq!(
        AssessmentConfig::load(&path).unwrap().classifier,
        ClassifierSettings::Learned(LearnedSettings::default())
    );
}

#[test]
fn config_show_prints_the_classifier_mode() {
    let mut out = Vec::new();
    commands::config_show(&AssessmentConfig::default(), &mut out).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["classifier"]["mode"], "range");
    assert_eq!(json["config_version"], 1);
}
