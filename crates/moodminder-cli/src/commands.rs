use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use moodminder_assessment::MoodAssessor;
use moodminder_assessment::config::{self, AssessmentConfig, ClassifierSettings, LearnedSettings};
use moodminder_core::models::game::GameTelemetry;
use moodminder_core::models::responses::Responses;
use moodminder_storage::HistoryStore;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Environment variable overriding where assessment history is kept.
pub const DATA_DIR_ENV: &str = "MOODMINDER_DATA_DIR";

#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    /// JSON file holding a response list or an id-to-answer map
    #[arg(long)]
    pub responses: PathBuf,
    /// JSON file holding game telemetry keyed by game
    #[arg(long)]
    pub games: Option<PathBuf>,
    /// Save the result to this user's history
    #[arg(long)]
    pub user: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ConfigInitArgs {
    /// Where to write the config (defaults to MOODMINDER_CONFIG, then the
    /// platform config directory)
    #[arg(long)]
    pub path: Option<PathBuf>,
    /// Use the learned classifier instead of the score-range lookup
    #[arg(long)]
    pub learned: bool,
    /// Replace an existing file
    #[arg(long)]
    pub force: bool,
}

/// History root: `MOODMINDER_DATA_DIR`, else the platform data directory.
pub fn data_dir() -> eyre::Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let base = dirs::data_dir().ok_or_else(|| eyre::eyre!("no data directory found"))?;
    Ok(base.join("moodminder"))
}

pub fn questions(
    assessor: &MoodAssessor,
    count: Option<usize>,
    out: &mut impl Write,
) -> eyre::Result<()> {
    match count {
        Some(count) => write_json(out, &assessor.get_random_questions(count)),
        None => write_json(out, assessor.catalog().questions()),
    }
}

pub fn assess(
    assessor: &MoodAssessor,
    store: Option<&HistoryStore>,
    args: &AssessArgs,
    out: &mut impl Write,
) -> eyre::Result<()> {
    let responses: Responses = read_json(&args.responses)?;
    let games: Option<GameTelemetry> = args.games.as_deref().map(read_json).transpose()?;

    let analysis = assessor.get_mood_analysis(&responses, games.as_ref())?;

    if let Some(user) = &args.user {
        let store = store.ok_or_else(|| eyre::eyre!("no history store to save to"))?;
        let record = store.append(user, &analysis)?;
        tracing::info!(user = %user, id = %record.id, "assessment recorded");
    }

    write_json(out, &analysis)
}

pub fn history(
    store: &HistoryStore,
    user: &str,
    days: u32,
    out: &mut impl Write,
) -> eyre::Result<()> {
    let records = store.recent(user, days)?;
    tracing::debug!(user, days, count = records.len(), "history read");
    write_json(out, &records)
}

pub fn train(assessor: &MoodAssessor, out: &mut impl Write) -> eyre::Result<()> {
    assessor.warm_up()?;
    writeln!(out, "classifier ready: {}", assessor.classifier_id())?;
    Ok(())
}

/// Write a default config file.
pub fn config_init(args: &ConfigInitArgs, out: &mut impl Write) -> eyre::Result<()> {
    let path = match &args.path {
        Some(path) => path.clone(),
        None => config::config_path().ok_or_else(|| eyre::eyre!("no config directory found"))?,
    };
    if path.exists() && !args.force {
        return Err(eyre::eyre!(
            "config already exists at {} (use --force to replace it)",
            path.display()
        ));
    }

    let mut config = AssessmentConfig::default();
    if args.learned {
        config.classifier = ClassifierSettings::Learned(LearnedSettings::default());
    }
    config.save(&path)?;
    writeln!(out, "wrote {}", path.display())?;
    Ok(())
}

/// Print the config in effect.
pub fn config_show(config: &AssessmentConfig, out: &mut impl Write) -> eyre::Result<()> {
    write_json(out, config)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> eyre::Result<T> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|e| eyre::eyre!("failed to parse {}: {e}", path.display()))
}

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> eyre::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}
